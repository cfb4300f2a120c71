//! The projection engine: walks the configured window one day at a time and
//! derives every summary from the resulting ledgers.

pub mod adjustment;
pub mod aggregator;
pub mod goals;
pub mod health;
pub mod monthly;
pub mod reports;
pub mod simulator;
pub mod window;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::Result;
use crate::ledger::LedgerInputs;

pub use adjustment::{apply_adjustment, AdjustmentIndex, Overlaid};
pub use aggregator::{aggregate, ContributionMode, DailyEvents};
pub use goals::{goal_progress, GoalProgress};
pub use health::BalanceHealth;
pub use monthly::{monthly_minimums, MonthlyMinimum};
pub use reports::{totals_by_category, totals_by_name, BillTotalPolicy, Totals};
pub use simulator::{
    simulate_checking, simulate_savings, BalancePoint, DayRecord, SavingsDayRecord, SavingsLedger,
};
pub use window::ProjectionWindow;

pub const DEFAULT_MAX_PROJECTION_MONTHS: i64 = 600;

/// Knobs that change how a projection is computed rather than what it is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    pub contribution_mode: ContributionMode,
    pub bill_total_policy: BillTotalPolicy,
    pub max_projection_months: i64,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            contribution_mode: ContributionMode::default(),
            bill_total_policy: BillTotalPolicy::default(),
            max_projection_months: DEFAULT_MAX_PROJECTION_MONTHS,
        }
    }
}

impl From<&Config> for ProjectionOptions {
    fn from(config: &Config) -> Self {
        Self {
            contribution_mode: config.contribution_mode,
            bill_total_policy: config.bill_total_policy,
            max_projection_months: config.max_projection_months,
        }
    }
}

/// Goal progress for one savings account at the start and end of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub account_name: String,
    pub current: GoalProgress,
    pub projected: GoalProgress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub window: Option<ProjectionWindow>,
    pub checking: Vec<DayRecord>,
    pub savings: Vec<SavingsLedger>,
    pub monthly_minimums: Vec<MonthlyMinimum>,
    pub totals_by_name: Totals,
    pub totals_by_category: Totals,
    pub goals: Vec<SavingsGoal>,
}

impl ProjectionReport {
    pub fn is_empty(&self) -> bool {
        self.checking.is_empty()
    }

    pub fn closing_balance(&self) -> Option<Decimal> {
        self.checking.last().map(|record| record.balance)
    }

    pub fn savings_ledger(&self, account_name: &str) -> Option<&SavingsLedger> {
        self.savings
            .iter()
            .find(|ledger| ledger.account_name == account_name)
    }
}

/// Runs a full projection over `inputs`.
///
/// Inputs are validated first. Without a configured start date the report has no
/// window and no day records, but input-only totals are still filled in.
pub fn project(inputs: &LedgerInputs, options: &ProjectionOptions) -> Result<ProjectionReport> {
    inputs.validate()?;
    let window = ProjectionWindow::from_config(&inputs.projection, options.max_projection_months)?;

    let totals_by_name = totals_by_name(inputs, options.bill_total_policy, window.as_ref())?;
    let totals_by_category =
        totals_by_category(inputs, options.bill_total_policy, window.as_ref())?;

    let Some(window) = window else {
        tracing::debug!("projection start date not configured; skipping simulation");
        return Ok(ProjectionReport {
            totals_by_name,
            totals_by_category,
            ..ProjectionReport::default()
        });
    };

    let checking = simulate_checking(inputs, &window, options.contribution_mode)?;
    let savings = simulate_savings(inputs, &window)?;
    let monthly_minimums = monthly_minimums(&checking);
    let mut goals = Vec::new();
    for ledger in &savings {
        let current = goal_progress(ledger.opening_balance, ledger.goal)?;
        if current.applicable {
            goals.push(SavingsGoal {
                account_name: ledger.account_name.clone(),
                current,
                projected: goal_progress(ledger.closing_balance(), ledger.goal)?,
            });
        }
    }

    tracing::debug!(
        days = checking.len(),
        savings_ledgers = savings.len(),
        months = monthly_minimums.len(),
        "projection complete"
    );

    Ok(ProjectionReport {
        window: Some(window),
        checking,
        savings,
        monthly_minimums,
        totals_by_name,
        totals_by_category,
        goals,
    })
}
