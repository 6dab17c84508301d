use std::env;

/// Circulation rule knobs.
///
/// Defaults are the house rules: 30-day loans, 3 open loans per reader,
/// and a ban of twice the days late. `from_env` lets the composition root
/// override them without touching callers.
#[derive(Clone, Debug)]
pub struct LoanPolicy {
    pub loan_period_days: i64,
    pub max_active_loans: usize,
    pub late_ban_multiplier: i64,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 30,
            max_active_loans: 3,
            late_ban_multiplier: 2,
        }
    }
}

impl LoanPolicy {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            loan_period_days: env::var("LOAN_PERIOD_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.loan_period_days),
            max_active_loans: env::var("MAX_ACTIVE_LOANS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_active_loans),
            late_ban_multiplier: env::var("LATE_BAN_MULTIPLIER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.late_ban_multiplier),
        }
    }
}
