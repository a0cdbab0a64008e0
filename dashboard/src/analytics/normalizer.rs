use serde_json::Value;

/// Rounds half away from zero to the given number of decimal places.
pub fn round_to_decimal_places(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

/// The numeric value of a raw field, or 0 when it is missing or not a number.
pub fn numeric_or_zero(value: &Value) -> f64 {
    value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Rates and averages always produce a point, degrading to 0 on bad data.
pub fn rounded_or_zero(value: &Value, decimal_places: u32) -> f64 {
    round_to_decimal_places(numeric_or_zero(value), decimal_places)
}

/// Percentiles pass through untouched when numeric.
pub fn percentile_or_zero(value: &Value) -> f64 {
    numeric_or_zero(value)
}

/// Custom metrics are admitted only when numeric; anything else yields no point at all.
pub fn admit_custom_metric(value: &Value, decimal_places: u32) -> Option<f64> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| round_to_decimal_places(v, decimal_places))
}
