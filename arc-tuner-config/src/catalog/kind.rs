//! Setting kinds and the metadata types they carry.

use serde::{Deserialize, Serialize};

/// Qualitative performance cost of changing a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceImpact {
    #[default]
    Low,
    Medium,
    High,
    VeryHigh,
}

impl PerformanceImpact {
    /// Returns a human-readable display name for this variant
    pub fn display_name(&self) -> &'static str {
        match self {
            PerformanceImpact::Low => "Low",
            PerformanceImpact::Medium => "Medium",
            PerformanceImpact::High => "High",
            PerformanceImpact::VeryHigh => "Very High",
        }
    }

    /// Returns all variants of `PerformanceImpact`
    pub fn variants() -> &'static [PerformanceImpact] {
        &[
            PerformanceImpact::Low,
            PerformanceImpact::Medium,
            PerformanceImpact::High,
            PerformanceImpact::VeryHigh,
        ]
    }
}

/// One entry of an enumerated-choice setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Value persisted in the config file
    pub stored: String,
    /// Label shown to the user
    pub label: String,
}

impl ChoiceOption {
    pub fn new(stored: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            stored: stored.into(),
            label: label.into(),
        }
    }

    /// An option whose label is its stored value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            stored: value,
        }
    }
}

/// Inclusive integer range for numeric settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
}

impl NumericRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp `value` into the range. A reversed range returns `min`.
    pub fn clamp(&self, value: i64) -> i64 {
        if self.min > self.max {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// The value domain of a setting.
///
/// Each variant carries everything the value codec needs, so conversions are
/// selected by matching on the kind rather than by inspecting a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingKind {
    /// Enumerated choice; `default` is a stored value from `options`.
    Choice {
        options: Vec<ChoiceOption>,
        default: String,
    },
    /// `True` / `False` flag.
    Boolean { default: bool },
    /// Free integer entry within a range.
    Integer { range: NumericRange, default: i64 },
    /// Bounded scalar edited with a slider.
    Scalar { range: NumericRange, default: i64 },
}

impl SettingKind {
    /// Choice whose labels equal the stored values.
    pub fn choice(options: &[&str], default: &str) -> Self {
        SettingKind::Choice {
            options: options.iter().map(|o| ChoiceOption::plain(*o)).collect(),
            default: default.to_string(),
        }
    }

    /// Choice with distinct `(stored, label)` pairs.
    pub fn labeled(options: &[(&str, &str)], default: &str) -> Self {
        SettingKind::Choice {
            options: options
                .iter()
                .map(|(stored, label)| ChoiceOption::new(*stored, *label))
                .collect(),
            default: default.to_string(),
        }
    }

    pub fn boolean(default: bool) -> Self {
        SettingKind::Boolean { default }
    }

    pub fn integer(min: i64, max: i64, default: i64) -> Self {
        SettingKind::Integer {
            range: NumericRange::new(min, max),
            default,
        }
    }

    pub fn scalar(min: i64, max: i64, default: i64) -> Self {
        SettingKind::Scalar {
            range: NumericRange::new(min, max),
            default,
        }
    }

    /// Short name of the kind: `choice`, `boolean`, `number` or `slider`.
    pub fn name(&self) -> &'static str {
        match self {
            SettingKind::Choice { .. } => "choice",
            SettingKind::Boolean { .. } => "boolean",
            SettingKind::Integer { .. } => "number",
            SettingKind::Scalar { .. } => "slider",
        }
    }

    /// Numeric range, for integer and scalar kinds.
    pub fn range(&self) -> Option<NumericRange> {
        match self {
            SettingKind::Integer { range, .. } | SettingKind::Scalar { range, .. } => Some(*range),
            _ => None,
        }
    }

    /// Choice options; empty for other kinds.
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            SettingKind::Choice { options, .. } => options,
            _ => &[],
        }
    }

    /// The default value in the form written to the config file.
    pub fn default_stored(&self) -> String {
        match self {
            SettingKind::Choice { default, .. } => default.clone(),
            SettingKind::Boolean { default } => bool_to_stored(*default).to_string(),
            SettingKind::Integer { default, .. } | SettingKind::Scalar { default, .. } => {
                default.to_string()
            }
        }
    }
}

/// Booleans are capitalized on disk.
pub(crate) fn bool_to_stored(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
