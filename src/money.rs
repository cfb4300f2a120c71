//! Parsing of user-entered amounts such as `$100+50` or `(1200 - 80) / 2`.
//!
//! Only digits, a decimal point, `+ - * /` and parentheses are understood. `$`,
//! `,` and whitespace are ignored; anything else is an error.

use std::{iter::Peekable, str::Chars};

use rust_decimal::Decimal;

use crate::errors::{ProjectionError, Result};

const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(Decimal),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

/// Evaluates an arithmetic expression into an exact decimal amount.
pub fn evaluate_expression(raw: &str) -> Result<Decimal> {
    let tokens = tokenize(raw)?;
    if tokens.is_empty() {
        return Err(ProjectionError::Expression("empty amount".into()));
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if parser.pos != tokens.len() {
        return Err(ProjectionError::Expression(format!(
            "unexpected input in `{}`",
            raw.trim()
        )));
    }
    Ok(value.normalize())
}

fn tokenize(raw: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();
    while let Some(&ch) = chars.peek() {
        match ch {
            '$' | ',' => {
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => tokens.push(Token::Number(read_number(&mut chars)?)),
            '+' => push(&mut chars, &mut tokens, Token::Plus),
            '-' => push(&mut chars, &mut tokens, Token::Minus),
            '*' => push(&mut chars, &mut tokens, Token::Star),
            '/' => push(&mut chars, &mut tokens, Token::Slash),
            '(' => push(&mut chars, &mut tokens, Token::Open),
            ')' => push(&mut chars, &mut tokens, Token::Close),
            other => {
                return Err(ProjectionError::Expression(format!(
                    "unsupported character `{other}`"
                )))
            }
        }
    }
    Ok(tokens)
}

fn push(chars: &mut Peekable<Chars<'_>>, tokens: &mut Vec<Token>, token: Token) {
    chars.next();
    tokens.push(token);
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Result<Decimal> {
    let mut literal = String::new();
    while let Some(&ch) = chars.peek() {
        if ch.is_ascii_digit() || ch == '.' {
            literal.push(ch);
            chars.next();
        } else if ch == ',' {
            // thousands separator
            chars.next();
        } else {
            break;
        }
    }
    literal
        .parse::<Decimal>()
        .map_err(|_| ProjectionError::Expression(format!("invalid number `{literal}`")))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Decimal> {
        let mut value = self.term()?;
        while let Some(op) = self.peek().cloned() {
            match op {
                Token::Plus | Token::Minus => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = if op == Token::Plus {
                        value.checked_add(rhs)
                    } else {
                        value.checked_sub(rhs)
                    }
                    .ok_or_else(overflow)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<Decimal> {
        let mut value = self.factor()?;
        while let Some(token) = self.peek().cloned() {
            match token {
                Token::Star => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    value = value.checked_mul(rhs).ok_or_else(overflow)?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    if rhs.is_zero() {
                        return Err(ProjectionError::Expression("division by zero".into()));
                    }
                    value = value.checked_div(rhs).ok_or_else(overflow)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // factor := ('+' | '-') factor | number | '(' expression ')'
    fn factor(&mut self) -> Result<Decimal> {
        match self.next().cloned() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Minus) => Ok(-self.nested(Self::factor)?),
            Some(Token::Plus) => self.nested(Self::factor),
            Some(Token::Open) => {
                let value = self.nested(Self::expression)?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(ProjectionError::Expression("missing `)`".into())),
                }
            }
            Some(Token::Close) => Err(ProjectionError::Expression("unexpected `)`".into())),
            Some(_) => Err(ProjectionError::Expression("expected a number".into())),
            None => Err(ProjectionError::Expression("unexpected end of input".into())),
        }
    }

    fn nested(&mut self, rule: fn(&mut Self) -> Result<Decimal>) -> Result<Decimal> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ProjectionError::Expression("expression nested too deeply".into()));
        }
        let value = rule(self);
        self.depth -= 1;
        value
    }
}

fn overflow() -> ProjectionError {
    ProjectionError::Expression("amount out of range".into())
}

/// `lhs + rhs`, or [`ProjectionError::AmountOutOfRange`] naming `context`.
pub fn checked_add(lhs: Decimal, rhs: Decimal, context: &str) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| out_of_range(context))
}

pub fn checked_sub(lhs: Decimal, rhs: Decimal, context: &str) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| out_of_range(context))
}

pub fn checked_mul(lhs: Decimal, rhs: Decimal, context: &str) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| out_of_range(context))
}

/// Sums `amounts`, stopping at the first overflow.
pub fn checked_sum<I>(amounts: I, context: &str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| checked_add(total, amount, context))
}

pub(crate) fn out_of_range(context: &str) -> ProjectionError {
    ProjectionError::AmountOutOfRange(context.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn checked_helpers_report_overflow() {
        assert_eq!(checked_sum([dec!(1.5), dec!(2), dec!(-0.5)], "sum").unwrap(), dec!(3));
        let err = checked_add(Decimal::MAX, dec!(1), "day balance").unwrap_err();
        assert!(matches!(err, ProjectionError::AmountOutOfRange(ref what) if what == "day balance"));
        assert!(checked_mul(Decimal::MAX, dec!(2), "bill total").is_err());
        assert!(checked_sub(Decimal::MIN, dec!(1), "net").is_err());
    }

    #[test]
    fn evaluates_plain_amounts() {
        assert_eq!(evaluate_expression("100").unwrap(), dec!(100));
        assert_eq!(evaluate_expression("$1,250.75").unwrap(), dec!(1250.75));
        assert_eq!(evaluate_expression("  42.5 ").unwrap(), dec!(42.5));
    }

    #[test]
    fn honours_operator_precedence_and_parentheses() {
        assert_eq!(evaluate_expression("$100+50").unwrap(), dec!(150));
        assert_eq!(evaluate_expression("2 + 3 * 4").unwrap(), dec!(14));
        assert_eq!(evaluate_expression("(2 + 3) * 4").unwrap(), dec!(20));
        assert_eq!(evaluate_expression("1200 / 4 - 0.5").unwrap(), dec!(299.5));
        assert_eq!(evaluate_expression("10 - 2 - 3").unwrap(), dec!(5));
    }

    #[test]
    fn supports_unary_minus() {
        assert_eq!(evaluate_expression("-50").unwrap(), dec!(-50));
        assert_eq!(evaluate_expression("-(20 + 5)").unwrap(), dec!(-25));
        assert_eq!(evaluate_expression("3 * -2").unwrap(), dec!(-6));
    }

    #[test]
    fn keeps_decimal_precision() {
        assert_eq!(evaluate_expression("0.1 + 0.2").unwrap(), dec!(0.3));
        assert_eq!(evaluate_expression("10 / 4").unwrap(), dec!(2.5));
    }

    #[test]
    fn rejects_code_and_malformed_input() {
        for raw in [
            "",
            "$",
            "alert(1)",
            "1 +",
            "(1 + 2",
            "1 + 2)",
            "1..2",
            "5 / 0",
            "2 ** 3",
        ] {
            assert!(
                evaluate_expression(raw).is_err(),
                "expected `{raw}` to be rejected"
            );
        }
    }

    #[test]
    fn rejects_runaway_nesting() {
        let raw = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(evaluate_expression(&raw).is_err());
    }
}
