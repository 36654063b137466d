use once_cell::sync::Lazy;
use regex::Regex;

/// Size-qualified number such as "34DD"
static QUALIFIED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)[A-Z]+").expect("valid qualified number pattern"));

/// First integer or decimal substring
static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid plain number pattern"));

/// Feet and inches such as `5'7"`, `5' 7` or `5’7”`
static FEET_INCHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)['’′][^\d]*(\d+)").expect("valid feet/inches pattern"));

/// Extract a numeric measurement from a free-text field
///
/// Qualified codes ("34DD") are tried before plain numbers. Only the first
/// match is used.
///
/// # Returns
/// `None` if the field is empty or contains no digits
pub fn extract_numeric_value(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }

    if let Some(caps) = QUALIFIED_NUMBER.captures(raw) {
        return caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
    }

    PLAIN_NUMBER
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Extract a height in inches
///
/// Feet/inches notation is converted with `feet * 12 + inches`; anything
/// else is treated as a plain inch value.
pub fn extract_height_inches(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }

    if let Some(caps) = FEET_INCHES.captures(raw) {
        let feet = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
        let inches = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
        if let (Some(feet), Some(inches)) = (feet, inches) {
            return Some(feet * 12.0 + inches);
        }
    }

    extract_numeric_value(raw)
}
