use crate::errors::{DashboardError, DashboardResult};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub accounts_url: String,
    pub refresh_interval_secs: u64,
    pub http_timeout_secs: u64,
    pub server_port: u16,
    pub dashboard_dir: PathBuf,
    pub placeholder: PlaceholderConfig,
    pub report: ReportConfig,
}

/// Parameters of the synthetic backfill series.
#[derive(Debug, Clone)]
pub struct PlaceholderConfig {
    pub start_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
    pub min_profit: f64,
    pub max_profit: f64,
    /// Minimum distance (major units) between two consecutive generated days.
    pub separation: f64,
    /// Weight of the previous day's value when smoothing a fresh draw.
    pub blend: f64,
    pub max_retries: u32,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 9).unwrap_or(NaiveDate::MIN),
            min_profit: 4.86,
            max_profit: 36.45,
            separation: 0.50,
            blend: 0.3,
            max_retries: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// chrono format string used for chart labels.
    pub date_label_format: String,
    /// Floor applied to the displayed floating drawdown (major units).
    pub min_display_drawdown: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_label_format: "%d/%m/%Y".to_string(),
            min_display_drawdown: 214.83,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> DashboardResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = PlaceholderConfig::default();
        let placeholder = PlaceholderConfig {
            start_date: parse_env_or("PLACEHOLDER_START", defaults.start_date)?,
            end_date: parse_env_or("PLACEHOLDER_END", defaults.end_date)?,
            min_profit: parse_env_or("PLACEHOLDER_MIN_PROFIT", defaults.min_profit)?,
            max_profit: parse_env_or("PLACEHOLDER_MAX_PROFIT", defaults.max_profit)?,
            separation: parse_env_or("PLACEHOLDER_SEPARATION", defaults.separation)?,
            blend: parse_env_or("PLACEHOLDER_BLEND", defaults.blend)?,
            max_retries: parse_env_or("PLACEHOLDER_MAX_RETRIES", defaults.max_retries)?,
        };
        placeholder.validate()?;

        let report_defaults = ReportConfig::default();
        let report = ReportConfig {
            date_label_format: env_var_or("DATE_LABEL_FORMAT", &report_defaults.date_label_format),
            min_display_drawdown: parse_env_or(
                "MIN_DISPLAY_DRAWDOWN",
                report_defaults.min_display_drawdown,
            )?,
        };
        report.validate()?;

        let refresh_interval_secs = parse_env_or("REFRESH_INTERVAL_SECS", 180u64)?;
        if refresh_interval_secs == 0 {
            return Err(DashboardError::Config("REFRESH_INTERVAL_SECS must be > 0".into()));
        }

        Ok(Self {
            accounts_url: env_var("ACCOUNTS_URL")?,
            refresh_interval_secs,
            http_timeout_secs: parse_env_or("HTTP_TIMEOUT_SECS", 10u64)?,
            server_port: parse_env_or("SERVER_PORT", 3001u16)?,
            dashboard_dir: PathBuf::from(env_var_or("DASHBOARD_DIR", "dashboard/dist")),
            placeholder,
            report,
        })
    }
}

impl PlaceholderConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        if !(self.min_profit.is_finite() && self.max_profit.is_finite()) {
            return Err(DashboardError::Config("placeholder bounds must be finite".into()));
        }
        if self.min_profit > self.max_profit {
            return Err(DashboardError::Config(format!(
                "PLACEHOLDER_MIN_PROFIT ({}) > PLACEHOLDER_MAX_PROFIT ({})",
                self.min_profit, self.max_profit
            )));
        }
        if !(0.0..1.0).contains(&self.blend) {
            return Err(DashboardError::Config(format!(
                "PLACEHOLDER_BLEND must be in [0, 1), got {}",
                self.blend
            )));
        }
        if self.separation < 0.0 {
            return Err(DashboardError::Config("PLACEHOLDER_SEPARATION must be >= 0".into()));
        }
        Ok(())
    }
}

impl ReportConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        let bad = StrftimeItems::new(&self.date_label_format).any(|item| matches!(item, Item::Error));
        if bad || self.date_label_format.is_empty() {
            return Err(DashboardError::Config(format!(
                "DATE_LABEL_FORMAT is not a valid format string: {:?}",
                self.date_label_format
            )));
        }
        Ok(())
    }
}

fn env_var(key: &str) -> DashboardResult<String> {
    std::env::var(key).map_err(|_| DashboardError::Config(format!("missing env var: {key}")))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or<T>(key: &str, default: T) -> DashboardResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| DashboardError::Config(format!("{key}: {e}"))),
        Err(_) => Ok(default),
    }
}
