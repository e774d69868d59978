pub mod aggregate;
pub mod format;

use crate::config::{PlaceholderConfig, ReportConfig};
use crate::feed::types::RawAccount;
use crate::series::merge::merge_series;
use crate::series::placeholder::build_placeholder_series;
use crate::series::to_major;
use aggregate::{EquityPoint, ProfitPoint};
use chrono::{DateTime, Utc};

/// Derived view of one account. The raw record is carried along with its
/// profit metrics replaced by the recomputed sums.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    #[serde(flatten)]
    pub account: RawAccount,
    pub equity_curve: Vec<EquityPoint>,
    pub daily_profit_chart: Vec<ProfitPoint>,
    /// Deposits in major units.
    pub starting_equity: f64,
}

/// Full pipeline for one account: backfill, merge, aggregate, chart series.
pub fn build_account_report(
    account: &RawAccount,
    placeholder_cfg: &PlaceholderConfig,
    report_cfg: &ReportConfig,
    now: DateTime<Utc>,
) -> AccountReport {
    let deposits = account.metrics.total_deposits;

    let placeholder = build_placeholder_series(deposits, placeholder_cfg);
    let merged = merge_series(&account.metrics.real_results(), &placeholder);

    let sums = aggregate::aggregate(&merged, now);
    let fmt = report_cfg.date_label_format.as_str();

    let mut out = account.clone();
    out.metrics.total_profit = sums.total_profit;
    out.metrics.daily_profit = sums.latest_day_profit;
    out.metrics.weekly_profit = sums.weekly_profit;
    out.metrics.monthly_profit = sums.monthly_profit;

    AccountReport {
        account: out,
        equity_curve: aggregate::equity_curve(&merged, deposits, now, fmt),
        daily_profit_chart: aggregate::daily_profit_chart(&merged, fmt),
        starting_equity: to_major(deposits),
    }
}

pub fn build_reports(
    accounts: &[RawAccount],
    placeholder_cfg: &PlaceholderConfig,
    report_cfg: &ReportConfig,
    now: DateTime<Utc>,
) -> Vec<AccountReport> {
    accounts
        .iter()
        .map(|acc| build_account_report(acc, placeholder_cfg, report_cfg, now))
        .collect()
}
