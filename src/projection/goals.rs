use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::money::{checked_mul, checked_sub, out_of_range};

/// Progress of a savings balance towards its goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// `false` when no positive goal is set; the other fields are zero then.
    pub applicable: bool,
    /// Not clamped, so an overfunded account reports more than 100.
    pub percent: Decimal,
    pub remaining: Decimal,
    pub reached: bool,
}

/// Fails with `AmountOutOfRange` when the percentage does not fit in a `Decimal`,
/// which a tiny goal against a large balance can cause.
pub fn goal_progress(balance: Decimal, goal: Option<Decimal>) -> Result<GoalProgress> {
    let Some(goal) = goal.filter(|goal| *goal > Decimal::ZERO) else {
        return Ok(GoalProgress::default());
    };
    let ratio = balance
        .checked_div(goal)
        .ok_or_else(|| out_of_range("goal percent"))?;
    Ok(GoalProgress {
        applicable: true,
        percent: checked_mul(ratio, Decimal::ONE_HUNDRED, "goal percent")?.normalize(),
        remaining: checked_sub(goal, balance, "goal remaining")?.max(Decimal::ZERO),
        reached: balance >= goal,
    })
}
