use super::generator::SeededSequence;
use super::{day_start_ts, to_major, to_minor, DailyResult, UnitSource};
use crate::config::PlaceholderConfig;
use chrono::{Datelike, Weekday};

/// Seed for an account's backfill: whole major units of its deposits.
#[inline]
pub fn seed_from_balance(initial_balance_cents: i64) -> i64 {
    initial_balance_cents / 100
}

/// Build the synthetic backfill for an account with the given deposits.
pub fn build_placeholder_series(initial_balance_cents: i64, cfg: &PlaceholderConfig) -> Vec<DailyResult> {
    let mut seq = SeededSequence::new(seed_from_balance(initial_balance_cents));
    build_with_source(&mut seq, cfg)
}

/// One entry per weekday in `[start_date, end_date)`.
///
/// Each day draws `min + u * (max - min)`, smooths it toward the previous
/// accepted value by `blend`, and rounds to cents. Candidates closer than
/// `separation` to the previous day are redrawn, at most `max_retries` times;
/// after that the last candidate is taken as is.
pub fn build_with_source<S: UnitSource>(source: &mut S, cfg: &PlaceholderConfig) -> Vec<DailyResult> {
    let min_c = to_minor(cfg.min_profit);
    let max_c = to_minor(cfg.max_profit);
    let separation_c = to_minor(cfg.separation);
    let span = cfg.max_profit - cfg.min_profit;

    let mut results = Vec::new();
    let mut last_c: Option<i64> = None;

    for day in cfg
        .start_date
        .iter_days()
        .take_while(|d| *d < cfg.end_date)
    {
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let mut attempts: u32 = 0;
        let profit_c = loop {
            let raw = cfg.min_profit + source.next_unit() * span;
            let candidate = match last_c {
                Some(prev) => to_major(prev) * cfg.blend + raw * (1.0 - cfg.blend),
                None => raw,
            };
            let candidate_c = to_minor(candidate).clamp(min_c, max_c);

            match last_c {
                None => break candidate_c,
                Some(prev) if (candidate_c - prev).abs() >= separation_c => break candidate_c,
                Some(_) if attempts >= cfg.max_retries => {
                    tracing::debug!(
                        date = %day,
                        attempts = attempts,
                        "separation not reached, accepting candidate"
                    );
                    break candidate_c;
                }
                Some(_) => attempts += 1,
            }
        };

        last_c = Some(profit_c);
        results.push(DailyResult {
            date: day_start_ts(day),
            profit: profit_c,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ts_to_utc;
    use chrono::NaiveDate;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> PlaceholderConfig {
        PlaceholderConfig {
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            ..PlaceholderConfig::default()
        }
    }

    /// Always returns the same draw; counts how often it was asked.
    struct ConstSource {
        value: f64,
        draws: u32,
    }

    impl UnitSource for ConstSource {
        fn next_unit(&mut self) -> f64 {
            self.draws += 1;
            self.value
        }
    }

    #[test]
    fn test_seed_is_whole_major_units() {
        assert_eq!(seed_from_balance(500_000), 5000);
        assert_eq!(seed_from_balance(500_099), 5000);
        assert_eq!(seed_from_balance(0), 0);
    }

    #[test]
    fn test_one_week_window_yields_five_weekdays() {
        // 2026-01-03 is a Saturday; the window ends the following Saturday.
        let cfg = window((2026, 1, 3), (2026, 1, 10));
        let series = build_placeholder_series(500_000, &cfg);
        assert_eq!(series.len(), 5);

        for r in &series {
            let wd = ts_to_utc(r.date).weekday();
            assert!(!matches!(wd, Weekday::Sat | Weekday::Sun), "weekend entry {wd}");
            assert!(r.profit >= 486 && r.profit <= 3645, "out of bounds: {}", r.profit);
        }
    }

    #[test]
    fn test_default_window_shape() {
        let cfg = PlaceholderConfig::default();
        let series = build_placeholder_series(1_234_567, &cfg);
        assert_eq!(series.len(), 25);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert!(series.iter().all(|r| r.date % 86_400 == 0));
        assert!(series.last().unwrap().date < day_start_ts(cfg.end_date));
    }

    #[test]
    fn test_consecutive_days_respect_separation() {
        let cfg = window((2025, 1, 1), (2026, 1, 1));
        let sep = to_minor(cfg.separation);
        for balance in [0, 100_000, 500_000, 7_777_777] {
            let series = build_placeholder_series(balance, &cfg);
            assert!(series.len() > 250);
            for w in series.windows(2) {
                assert!(
                    (w[1].profit - w[0].profit).abs() >= sep,
                    "balance {balance}: {} then {}",
                    w[0].profit,
                    w[1].profit
                );
            }
        }
    }

    #[test]
    fn test_same_balance_reproduces_series() {
        let cfg = PlaceholderConfig::default();
        assert_eq!(
            build_placeholder_series(250_000, &cfg),
            build_placeholder_series(250_000, &cfg)
        );
        assert_ne!(
            build_placeholder_series(250_000, &cfg),
            build_placeholder_series(260_000, &cfg)
        );
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let cfg = window((2026, 2, 9), (2026, 1, 3));
        assert!(build_placeholder_series(500_000, &cfg).is_empty());
        let same_day = window((2026, 1, 5), (2026, 1, 5));
        assert!(build_placeholder_series(500_000, &same_day).is_empty());
    }

    #[test]
    fn test_retry_loop_is_bounded() {
        // Monday and Tuesday only.
        let cfg = PlaceholderConfig {
            max_retries: 5,
            ..window((2026, 1, 5), (2026, 1, 7))
        };
        let mut source = ConstSource { value: 0.0, draws: 0 };
        let series = build_with_source(&mut source, &cfg);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].profit, 486);
        assert_eq!(series[1].profit, 486);
        // one draw for Monday, initial draw plus five retries for Tuesday
        assert_eq!(source.draws, 1 + 6);
    }

    #[test]
    fn test_flat_bounds_terminate() {
        let cfg = PlaceholderConfig {
            min_profit: 10.0,
            max_profit: 10.0,
            ..window((2026, 1, 5), (2026, 1, 31))
        };
        let series = build_placeholder_series(500_000, &cfg);
        assert!(!series.is_empty());
        assert!(series.iter().all(|r| r.profit == 1000));
    }
}
