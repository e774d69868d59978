use super::DailyResult;

/// Backfill real results with placeholder days that precede the first real one.
///
/// `real` is sorted here; `placeholder` is expected to be ascending already.
/// With no real results the placeholder series comes back unchanged.
pub fn merge_series(real: &[DailyResult], placeholder: &[DailyResult]) -> Vec<DailyResult> {
    let mut sorted_real = real.to_vec();
    sorted_real.sort_by_key(|r| r.date);

    let Some(first_real) = sorted_real.first().map(|r| r.date) else {
        return placeholder.to_vec();
    };

    let mut merged: Vec<DailyResult> = placeholder
        .iter()
        .filter(|p| p.date < first_real)
        .copied()
        .collect();
    merged.extend(sorted_real);
    merged
}
