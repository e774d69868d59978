use crate::series::DailyResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Account ──

/// One record from the accounts endpoint. Fields the dashboard doesn't read are
/// kept in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAccount {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub ea_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_metrics")]
    pub metrics: RawMetrics,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Monetary fields are cents. Missing, null or non-numeric values read as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetrics {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_deposits: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_withdraws: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_profit: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub daily_profit: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub weekly_profit: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub monthly_profit: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub floating_dd_max: i64,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "lenient_results")]
    pub daily_results: Vec<RawDailyResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawDailyResult {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub date: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub profit: i64,
}

impl RawMetrics {
    pub fn real_results(&self) -> Vec<DailyResult> {
        self.daily_results
            .iter()
            .map(|r| DailyResult {
                date: r.date,
                profit: r.profit,
            })
            .collect()
    }
}

// ── Lenient field readers ──

fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(value_to_i64(&Value::deserialize(d)?))
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Anything other than an object reads as empty metrics, so one bad record
/// doesn't fail the whole batch.
fn lenient_metrics<'de, D: Deserializer<'de>>(d: D) -> Result<RawMetrics, D::Error> {
    Ok(match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v).unwrap_or_default(),
        _ => RawMetrics::default(),
    })
}

fn lenient_results<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RawDailyResult>, D::Error> {
    Ok(match Value::deserialize(d)? {
        v @ Value::Array(_) => serde_json::from_value(v).unwrap_or_default(),
        _ => Vec::new(),
    })
}

#[inline]
fn value_to_i64(v: &Value) -> i64 {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(finite_round))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(finite_round))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

#[inline]
fn finite_round(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.round() as i64)
}
