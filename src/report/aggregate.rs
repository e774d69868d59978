//! Rolling profit sums and chart series over a merged daily series.
//! All functions are pure -- they take the series and a reference instant.

use crate::series::{day_start_ts, to_major, ts_to_utc, DailyResult};
use chrono::{DateTime, Datelike, Duration, Utc};

/// Profit sums in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AggregateResult {
    pub total_profit: i64,
    pub latest_day_profit: i64,
    pub weekly_profit: i64,
    pub monthly_profit: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EquityPoint {
    pub label: String,
    /// Major units.
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProfitPoint {
    pub label: String,
    /// Major units.
    pub profit: f64,
}

/// Epoch seconds of the Sunday 00:00 UTC that starts `now`'s week.
pub fn week_start_ts(now: DateTime<Utc>) -> i64 {
    let today = now.date_naive();
    let sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    day_start_ts(sunday)
}

/// Single pass over an ascending, de-duplicated series. Sums saturate at the
/// i64 bounds.
pub fn aggregate(merged: &[DailyResult], now: DateTime<Utc>) -> AggregateResult {
    let week_start = week_start_ts(now);
    let (year, month) = (now.year(), now.month());

    let mut out = AggregateResult {
        latest_day_profit: merged.last().map(|r| r.profit).unwrap_or(0),
        ..AggregateResult::default()
    };

    for day in merged {
        out.total_profit = out.total_profit.saturating_add(day.profit);

        if day.date >= week_start {
            out.weekly_profit = out.weekly_profit.saturating_add(day.profit);
        }

        let dt = ts_to_utc(day.date);
        if dt.year() == year && dt.month() == month {
            out.monthly_profit = out.monthly_profit.saturating_add(day.profit);
        }
    }

    out
}

/// Running account value starting from deposits.
///
/// One point per day. When the series is empty, or its first point is not the
/// starting equity, an anchor point dated `now` is put in front so the curve
/// always begins at the deposits.
pub fn equity_curve(
    merged: &[DailyResult],
    starting_equity_cents: i64,
    now: DateTime<Utc>,
    label_format: &str,
) -> Vec<EquityPoint> {
    let mut running = starting_equity_cents;
    let mut first_cents = None;
    let mut curve = Vec::with_capacity(merged.len() + 1);

    for day in merged {
        running = running.saturating_add(day.profit);
        first_cents.get_or_insert(running);
        curve.push(EquityPoint {
            label: format_label(day.date, label_format),
            equity: to_major(running),
        });
    }

    if first_cents != Some(starting_equity_cents) {
        curve.insert(
            0,
            EquityPoint {
                label: now.format(label_format).to_string(),
                equity: to_major(starting_equity_cents),
            },
        );
    }

    curve
}

/// Per-day profit in major units, for bar charts.
pub fn daily_profit_chart(merged: &[DailyResult], label_format: &str) -> Vec<ProfitPoint> {
    merged
        .iter()
        .map(|day| ProfitPoint {
            label: format_label(day.date, label_format),
            profit: to_major(day.profit),
        })
        .collect()
}

#[inline]
pub fn format_label(ts: i64, label_format: &str) -> String {
    ts_to_utc(ts).format(label_format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    const FMT: &str = "%Y-%m-%d";

    fn ts(y: i32, m: u32, d: u32) -> i64 {
        day_start_ts(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn dr(date: i64, profit: i64) -> DailyResult {
        DailyResult { date, profit }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // Wednesday 2026-02-11 -> Sunday 2026-02-08
        assert_eq!(week_start_ts(at(2026, 2, 11, 15)), ts(2026, 2, 8));
        // A Sunday is its own week start
        assert_eq!(week_start_ts(at(2026, 2, 8, 23)), ts(2026, 2, 8));
        // Saturday -> previous Sunday, across a month boundary
        assert_eq!(week_start_ts(at(2026, 3, 7, 1)), ts(2026, 3, 1));
        assert_eq!(week_start_ts(at(2026, 1, 3, 9)), ts(2025, 12, 28));
    }

    #[test]
    fn test_rolling_sums() {
        let merged = vec![
            dr(ts(2026, 1, 30), 100),  // previous month
            dr(ts(2026, 2, 2), 200),   // this month, previous week
            dr(ts(2026, 2, 6), -50),   // this month, previous week (Friday)
            dr(ts(2026, 2, 9), 400),   // this week (Monday)
            dr(ts(2026, 2, 10), 800),  // this week, latest
        ];
        let now = at(2026, 2, 11, 12);

        let agg = aggregate(&merged, now);

        assert_eq!(agg.total_profit, 1450);
        assert_eq!(agg.latest_day_profit, 800);
        assert_eq!(agg.weekly_profit, 1200);
        assert_eq!(agg.monthly_profit, 1350);
    }

    #[test]
    fn test_sunday_entry_counts_for_week() {
        let merged = vec![dr(ts(2026, 2, 7), 5), dr(ts(2026, 2, 8), 7)];
        let agg = aggregate(&merged, at(2026, 2, 8, 0));
        assert_eq!(agg.weekly_profit, 7);
    }

    #[test]
    fn test_month_must_match_year_too() {
        let merged = vec![dr(ts(2025, 2, 10), 999), dr(ts(2026, 2, 10), 1)];
        let agg = aggregate(&merged, at(2026, 2, 20, 0));
        assert_eq!(agg.monthly_profit, 1);
    }

    #[test]
    fn test_latest_day_is_single_entry() {
        let merged = vec![dr(ts(2026, 2, 9), 300), dr(ts(2026, 2, 10), -75)];
        assert_eq!(aggregate(&merged, at(2026, 3, 1, 0)).latest_day_profit, -75);
    }

    #[test]
    fn test_empty_series_is_all_zero() {
        assert_eq!(aggregate(&[], at(2026, 3, 1, 0)), AggregateResult::default());
    }

    #[test]
    fn test_total_independent_of_order() {
        let base: Vec<DailyResult> = (0..40)
            .map(|i| dr(ts(2026, 1, 1) + i * 86_400, (i * 37 % 23) - 11))
            .collect();
        let mut shuffled = base.clone();
        shuffled.reverse();
        shuffled.swap(3, 17);
        shuffled.rotate_left(9);

        let now = at(2026, 1, 20, 0);
        assert_eq!(aggregate(&base, now).total_profit, aggregate(&shuffled, now).total_profit);
        assert_eq!(
            aggregate(&base, now).total_profit,
            base.iter().map(|r| r.profit).sum::<i64>()
        );
    }

    #[test]
    fn test_huge_profits_saturate() {
        let half = i64::MAX / 2 + 1;
        let now = at(2026, 2, 11, 12);
        let merged = vec![dr(ts(2026, 2, 9), half), dr(ts(2026, 2, 10), half)];

        let agg = aggregate(&merged, now);
        assert_eq!(agg.total_profit, i64::MAX);
        assert_eq!(agg.weekly_profit, i64::MAX);
        assert_eq!(agg.monthly_profit, i64::MAX);
        assert_eq!(agg.latest_day_profit, half);

        let losses = vec![dr(ts(2026, 2, 9), i64::MIN), dr(ts(2026, 2, 10), -1)];
        assert_eq!(aggregate(&losses, now).total_profit, i64::MIN);

        let curve = equity_curve(&merged, 100_000, now, FMT);
        assert_eq!(curve.len(), 3);
        assert_eq!(curve[2].equity, to_major(i64::MAX));
    }

    #[test]
    fn test_equity_accumulates_from_deposits() {
        let d1 = ts(2026, 1, 5);
        let d2 = ts(2026, 1, 6);
        let merged = vec![dr(d1, 1250), dr(d2, -300)];
        let now = at(2026, 1, 7, 10);

        let curve = equity_curve(&merged, 100_000, now, FMT);

        // anchor, then one point per day
        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0], EquityPoint { label: "2026-01-07".into(), equity: 1000.0 });
        assert_eq!(curve[1], EquityPoint { label: "2026-01-05".into(), equity: 1012.5 });
        assert_eq!(curve[2], EquityPoint { label: "2026-01-06".into(), equity: 1009.5 });
    }

    #[test]
    fn test_no_anchor_when_first_point_is_starting_equity() {
        let merged = vec![dr(ts(2026, 1, 5), 0), dr(ts(2026, 1, 6), 500)];
        let curve = equity_curve(&merged, 100_000, at(2026, 1, 7, 0), FMT);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].equity, 1000.0);
        assert_eq!(curve[1].equity, 1005.0);
    }

    #[test]
    fn test_empty_series_gets_single_anchor() {
        let curve = equity_curve(&[], 250_000, at(2026, 4, 1, 8), FMT);
        assert_eq!(curve, vec![EquityPoint { label: "2026-04-01".into(), equity: 2500.0 }]);
    }

    #[test]
    fn test_daily_chart_is_major_units() {
        let merged = vec![dr(ts(2026, 1, 5), 1250), dr(ts(2026, 1, 6), -3)];
        let chart = daily_profit_chart(&merged, "%d/%m/%Y");
        assert_eq!(chart[0], ProfitPoint { label: "05/01/2026".into(), profit: 12.5 });
        assert_eq!(chart[1], ProfitPoint { label: "06/01/2026".into(), profit: -0.03 });
    }
}
