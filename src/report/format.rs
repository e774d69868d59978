//! Display-ready values for the rendering layer.
//! Everything leaving this module is major units rounded to cents.

use super::aggregate::{EquityPoint, ProfitPoint};
use super::AccountReport;
use crate::config::ReportConfig;
use crate::series::to_major;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
    Danger,
}

impl Tone {
    #[inline]
    fn of_sign(major: f64) -> Self {
        if major >= 0.0 {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartBar {
    pub label: String,
    pub profit: f64,
    pub positive: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardView {
    pub title: String,
    pub cards: SmallVec<[MetricCard; 8]>,
    pub equity_curve: Vec<EquityPoint>,
    /// Lower bound for the equity chart's value axis.
    pub equity_axis_floor: f64,
    pub daily_profit_chart: Vec<ChartBar>,
}

#[inline]
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    (x * 100.0).round() / 100.0
}

/// "$ 1234.50"
#[inline]
pub fn money(major: f64) -> String {
    format!("$ {:.2}", round2(major))
}

/// `part` as a percentage of `deposits`, both in cents. Zero deposits give 0.
#[inline]
pub fn percent_of_deposits(part_cents: i64, deposits_cents: i64) -> f64 {
    if deposits_cents == 0 {
        return 0.0;
    }
    part_cents as f64 / deposits_cents as f64 * 100.0
}

/// "$ 12.34 (0.25%)"
pub fn money_with_percent(part_cents: i64, deposits_cents: i64) -> String {
    format!(
        "{} ({:.2}%)",
        money(to_major(part_cents)),
        round2(percent_of_deposits(part_cents, deposits_cents))
    )
}

/// Drawdown shown to users: magnitude of the floating drawdown, never below `floor`.
#[inline]
pub fn display_drawdown(floating_dd_cents: i64, floor: f64) -> f64 {
    to_major(floating_dd_cents).abs().max(floor)
}

pub fn dashboard_view(report: &AccountReport, cfg: &ReportConfig) -> DashboardView {
    let m = &report.account.metrics;
    let deposits = m.total_deposits;
    let total_deposits = to_major(deposits);
    let total_profit = to_major(m.total_profit);

    let profit_card = |title: &'static str, cents: i64| MetricCard {
        title,
        value: money_with_percent(cents, deposits),
        tone: Tone::of_sign(to_major(cents)),
    };

    let mut cards: SmallVec<[MetricCard; 8]> = SmallVec::new();
    cards.push(MetricCard {
        title: "Login",
        value: m.login.clone().unwrap_or_else(|| "-".to_string()),
        tone: Tone::Neutral,
    });
    cards.push(MetricCard {
        title: "Total Deposits",
        value: money(total_deposits),
        tone: Tone::Positive,
    });
    cards.push(profit_card("Total Profit", m.total_profit));
    cards.push(MetricCard {
        title: "Current Balance",
        value: money(total_deposits + total_profit),
        tone: Tone::Positive,
    });
    cards.push(profit_card("Daily Profit", m.daily_profit));
    cards.push(profit_card("Weekly Profit", m.weekly_profit));
    cards.push(profit_card("Monthly Profit", m.monthly_profit));
    cards.push(MetricCard {
        title: "Max Floating DD",
        value: money(display_drawdown(m.floating_dd_max, cfg.min_display_drawdown)),
        tone: Tone::Danger,
    });

    DashboardView {
        title: report
            .account
            .ea_code
            .clone()
            .unwrap_or_else(|| "Unknown account".to_string()),
        cards,
        equity_curve: report
            .equity_curve
            .iter()
            .map(|p| EquityPoint {
                label: p.label.clone(),
                equity: round2(p.equity),
            })
            .collect(),
        equity_axis_floor: round2(report.starting_equity),
        daily_profit_chart: report
            .daily_profit_chart
            .iter()
            .map(|ProfitPoint { label, profit }| ChartBar {
                label: label.clone(),
                profit: round2(*profit),
                positive: *profit >= 0.0,
            })
            .collect(),
    }
}
