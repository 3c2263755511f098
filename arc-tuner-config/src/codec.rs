//! Conversion between stored strings and user-facing values.
//!
//! Every function here is pure and total: unparseable input falls back to the
//! definition's default instead of failing.

use crate::catalog::kind::bool_to_stored;
use crate::catalog::{SettingDefinition, SettingKind};
use std::fmt;

/// A setting value as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    /// Option label (or raw stored text when no option matches)
    Choice(String),
    Boolean(bool),
    Number(i64),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Choice(label) => f.write_str(label),
            DisplayValue::Boolean(true) => f.write_str("On"),
            DisplayValue::Boolean(false) => f.write_str("Off"),
            DisplayValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Stored file text to display value.
pub fn to_display(def: &SettingDefinition, stored: &str) -> DisplayValue {
    match &def.kind {
        SettingKind::Choice { options, .. } => {
            let label = options
                .iter()
                .find(|o| o.stored == stored)
                .map_or(stored, |o| o.label.as_str());
            DisplayValue::Choice(label.to_string())
        }
        SettingKind::Boolean { .. } => {
            DisplayValue::Boolean(stored.trim().eq_ignore_ascii_case("true"))
        }
        SettingKind::Integer { default, .. } | SettingKind::Scalar { default, .. } => {
            DisplayValue::Number(parse_number(stored).unwrap_or(*default))
        }
    }
}

/// Display value to the text written in the file. A variant that does not
/// match the definition's kind is coerced.
pub fn to_stored(def: &SettingDefinition, display: &DisplayValue) -> String {
    match (&def.kind, display) {
        (SettingKind::Choice { options, .. }, DisplayValue::Choice(label)) => options
            .iter()
            .find(|o| &o.label == label)
            .map_or_else(|| label.clone(), |o| o.stored.clone()),
        (SettingKind::Choice { .. }, DisplayValue::Number(n)) => n.to_string(),
        (SettingKind::Choice { .. }, DisplayValue::Boolean(b)) => bool_to_stored(*b).to_string(),

        (SettingKind::Boolean { .. }, DisplayValue::Boolean(b)) => bool_to_stored(*b).to_string(),
        (SettingKind::Boolean { .. }, DisplayValue::Number(n)) => {
            bool_to_stored(*n != 0).to_string()
        }
        (SettingKind::Boolean { .. }, DisplayValue::Choice(text)) => {
            bool_to_stored(text.trim().eq_ignore_ascii_case("true")).to_string()
        }

        (SettingKind::Integer { .. } | SettingKind::Scalar { .. }, DisplayValue::Number(n)) => {
            n.to_string()
        }
        (SettingKind::Integer { default, .. } | SettingKind::Scalar { default, .. }, other) => {
            let n = match other {
                DisplayValue::Choice(text) => parse_number(text).unwrap_or(*default),
                DisplayValue::Boolean(b) => i64::from(*b),
                DisplayValue::Number(n) => *n,
            };
            n.to_string()
        }
    }
}

/// Interpret free text typed by a user. Choices accept a label or a stored
/// value (labels case-insensitively); booleans accept the usual on/off
/// spellings; numeric kinds accept any decimal number (truncated).
pub fn parse_display(def: &SettingDefinition, text: &str) -> Option<DisplayValue> {
    let text = text.trim();
    match &def.kind {
        SettingKind::Choice { options, .. } => options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(text))
            .or_else(|| options.iter().find(|o| o.stored == text))
            .map(|o| DisplayValue::Choice(o.label.clone())),
        SettingKind::Boolean { .. } => match text.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Some(DisplayValue::Boolean(true)),
            "false" | "off" | "no" | "0" => Some(DisplayValue::Boolean(false)),
            _ => None,
        },
        SettingKind::Integer { .. } | SettingKind::Scalar { .. } => {
            parse_number(text).map(DisplayValue::Number)
        }
    }
}

/// The definition's default as a display value.
pub fn default_display(def: &SettingDefinition) -> DisplayValue {
    to_display(def, &def.default_stored())
}

/// Parse decimal text as a float and truncate toward zero. `None` for
/// garbage and non-finite values.
fn parse_number(text: &str) -> Option<i64> {
    let value: f64 = text.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    // `as` saturates at the i64 bounds
    Some(value.trunc() as i64)
}
