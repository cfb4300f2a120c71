use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use std::fmt;

use crate::config::Config;
use crate::projection::BalanceHealth;

pub const DISPLAY_DATE_FORMAT: &str = "%a, %b %-d, %Y";

/// Rendering preferences derived from the loaded [`Config`].
#[derive(Clone, Debug)]
pub struct OutputStyle {
    pub currency_symbol: String,
    pub placeholder_label: String,
    pub low_balance_threshold: Decimal,
    pub plain: bool,
}

impl OutputStyle {
    pub fn from_config(config: &Config, plain: bool) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            placeholder_label: config.placeholder_label.clone(),
            low_balance_threshold: config.low_balance_threshold,
            plain,
        }
    }

    /// `-$12.50` style amounts, always two decimals.
    pub fn money(&self, amount: Decimal) -> String {
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{:.2}", self.currency_symbol, amount.abs().round_dp(2))
    }

    pub fn label<'a>(&'a self, label: &'a str) -> &'a str {
        if label.is_empty() {
            &self.placeholder_label
        } else {
            label
        }
    }

    /// Balance coloured by its health: green, yellow when low, red when overdrawn.
    pub fn balance(&self, balance: Decimal) -> String {
        let text = self.money(balance);
        match BalanceHealth::classify(balance, self.low_balance_threshold) {
            BalanceHealth::Healthy => text.green().to_string(),
            BalanceHealth::Low => text.yellow().to_string(),
            BalanceHealth::Overdrawn => text.red().bold().to_string(),
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn section(title: impl fmt::Display) -> ColoredString {
    format!("=== {} ===", title.to_string().trim()).bold()
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{}", format!("ERROR: {message}").bright_red());
}
