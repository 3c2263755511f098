//! Setting catalog: the read-only registry of every tunable setting.
//!
//! The catalog is built once and shared by reference. Each
//! [`SettingDefinition`] says where a setting lives in the config file
//! (section and stored key), how its value is represented ([`SettingKind`]),
//! and how it is presented (display name, description, category, impact).
//!
//! # Sub-modules
//!
//! - [`kind`]: `SettingKind`, `ChoiceOption`, `NumericRange`, `PerformanceImpact`
//! - [`definitions`]: the built-in Arc Raiders setting table

pub mod definitions;
pub mod kind;

pub use kind::{ChoiceOption, NumericRange, PerformanceImpact, SettingKind};

use crate::error::ConfigError;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

/// Category whose settings are absent from a stock config and added on demand.
pub const OPTIONAL_CATEGORY: &str = "Competitive Settings";

/// Immutable metadata for one setting.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDefinition {
    /// Unique catalog identifier
    pub key: String,
    /// Key name written in the config file (usually equal to `key`)
    pub stored_key: String,
    /// Name shown in the UI
    pub display_name: String,
    /// Explanation shown under the name
    pub description: String,
    /// Value domain and default
    pub kind: SettingKind,
    /// Owning config-file section (opaque, may contain `/` and `.`)
    pub section: String,
    /// Presentation group
    pub category: String,
    /// Performance cost tag
    pub impact: PerformanceImpact,
}

impl SettingDefinition {
    /// Create a definition whose stored key equals `key`.
    pub fn new(key: impl Into<String>, display_name: impl Into<String>, kind: SettingKind) -> Self {
        let key = key.into();
        Self {
            stored_key: key.clone(),
            key,
            display_name: display_name.into(),
            description: String::new(),
            kind,
            section: String::new(),
            category: String::new(),
            impact: PerformanceImpact::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn impact(mut self, impact: PerformanceImpact) -> Self {
        self.impact = impact;
        self
    }

    /// Override the key written to the file.
    pub fn stored_key(mut self, stored_key: impl Into<String>) -> Self {
        self.stored_key = stored_key.into();
        self
    }

    /// Default value in stored-string form.
    pub fn default_stored(&self) -> String {
        self.kind.default_stored()
    }

    /// Whether the setting belongs to the opt-in category.
    pub fn is_optional(&self) -> bool {
        self.category == OPTIONAL_CATEGORY
    }

    /// Check this definition's own invariants.
    fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Validation(format!("{}: {msg}", self.key)));

        if self.key.is_empty() {
            return Err(ConfigError::Validation("setting with empty key".to_string()));
        }
        if self.stored_key.is_empty() {
            return fail("empty stored key");
        }
        if self.display_name.is_empty() {
            return fail("missing display name");
        }
        if self.description.is_empty() {
            return fail("missing description");
        }
        if self.section.is_empty() {
            return fail("missing section");
        }
        if self.category.is_empty() {
            return fail("missing category");
        }

        match &self.kind {
            SettingKind::Choice { options, default } => {
                if options.is_empty() {
                    return fail("choice without options");
                }
                let mut seen = HashSet::new();
                for option in options {
                    if !seen.insert(option.stored.as_str()) {
                        return fail(&format!("duplicate option value '{}'", option.stored));
                    }
                }
                if !seen.contains(default.as_str()) {
                    return fail(&format!("default '{default}' is not an option"));
                }
            }
            SettingKind::Boolean { .. } => {}
            SettingKind::Integer { range, default } | SettingKind::Scalar { range, default } => {
                if range.min > range.max {
                    return fail("range min exceeds max");
                }
                if !range.contains(*default) {
                    return fail(&format!("default {default} outside range"));
                }
            }
        }
        Ok(())
    }
}

static BUILTIN: LazyLock<Arc<SettingCatalog>> =
    LazyLock::new(|| Arc::new(SettingCatalog::index(definitions::builtin_definitions())));

/// Registry of setting definitions, looked up by key.
#[derive(Debug, Clone)]
pub struct SettingCatalog {
    definitions: Vec<SettingDefinition>,
    index: HashMap<String, usize>,
}

impl SettingCatalog {
    /// Build a catalog, rejecting any definition set that breaks the
    /// catalog invariants.
    pub fn new(definitions: Vec<SettingDefinition>) -> Result<Self, ConfigError> {
        let catalog = Self::index(definitions);
        catalog.validate()?;
        Ok(catalog)
    }

    /// The shipped catalog. Built on first use and shared afterwards.
    pub fn builtin() -> Arc<SettingCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Index definitions without validating. On duplicate keys the first
    /// definition wins; `validate` reports the conflict.
    fn index(definitions: Vec<SettingDefinition>) -> Self {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.contains_key(&def.key) {
                log::error!("Duplicate setting key in catalog: {}", def.key);
                continue;
            }
            index.insert(def.key.clone(), i);
        }
        Self { definitions, index }
    }

    /// Check every catalog invariant: per-definition rules, unique keys and
    /// unique `(section, stored_key)` locations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut keys = HashSet::new();
        let mut locations = HashSet::new();
        for def in &self.definitions {
            def.validate()?;
            if !keys.insert(def.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate setting key '{}'",
                    def.key
                )));
            }
            if !locations.insert((def.section.as_str(), def.stored_key.as_str())) {
                return Err(ConfigError::Validation(format!(
                    "'{}' shares [{}] {} with another setting",
                    def.key, def.section, def.stored_key
                )));
            }
        }
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Option<&SettingDefinition> {
        self.index.get(key).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Find the definition that owns a file entry.
    pub fn find_stored(&self, section: &str, stored_key: &str) -> Option<&SettingDefinition> {
        self.definitions
            .iter()
            .find(|d| d.section == section && d.stored_key == stored_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Category names in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.definitions
            .iter()
            .map(|d| d.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Definitions of one category, in catalog order. Category match is
    /// case-insensitive.
    pub fn by_category(&self, category: &str) -> Vec<&SettingDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Definitions in the opt-in category.
    pub fn optional(&self) -> impl Iterator<Item = &SettingDefinition> {
        self.definitions.iter().filter(|d| d.is_optional())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(key: &str) -> SettingDefinition {
        SettingDefinition::new(key, "Name", SettingKind::boolean(false))
            .description("Description")
            .section("Section")
            .category("Category")
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = SettingCatalog::builtin();
        assert!(!catalog.is_empty());
        catalog.validate().expect("built-in catalog must be valid");
    }

    #[test]
    fn test_every_definition_is_well_formed() {
        let catalog = SettingCatalog::builtin();
        for d in catalog.iter() {
            assert!(!d.key.is_empty());
            assert!(!d.section.is_empty(), "{} missing section", d.key);
            assert!(!d.category.is_empty(), "{} missing category", d.key);
            assert!(!d.display_name.is_empty(), "{} missing name", d.key);
            assert!(!d.description.is_empty(), "{} missing description", d.key);
            assert!(
                ["choice", "boolean", "number", "slider"].contains(&d.kind.name()),
                "{} has unrecognized kind",
                d.key
            );
            assert_eq!(catalog.lookup(&d.key), Some(d));
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = SettingCatalog::new(vec![def("A"), def("A").section("Other")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_shared_location_rejected() {
        let result = SettingCatalog::new(vec![def("A"), def("B").stored_key("A")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let bad = SettingDefinition::new("C", "Name", SettingKind::choice(&["X", "X"], "X"))
            .description("d")
            .section("S")
            .category("K");
        assert!(SettingCatalog::new(vec![bad]).is_err());
    }

    #[test]
    fn test_default_outside_range_rejected() {
        let bad = SettingDefinition::new("N", "Name", SettingKind::integer(0, 10, 11))
            .description("d")
            .section("S")
            .category("K");
        assert!(SettingCatalog::new(vec![bad]).is_err());
    }

    #[test]
    fn test_lookup_unknown_key() {
        let catalog = SettingCatalog::builtin();
        assert!(catalog.lookup("NoSuchSetting").is_none());
        assert!(!catalog.contains("NoSuchSetting"));
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let catalog = SettingCatalog::builtin();
        let categories = catalog.categories();
        assert_eq!(categories.first(), Some(&"Upscaling"));
        assert!(categories.contains(&"Quality Settings"));
        assert!(categories.contains(&OPTIONAL_CATEGORY));
        let mut deduped = categories.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), categories.len());
    }

    #[test]
    fn test_by_category_is_case_insensitive() {
        let catalog = SettingCatalog::builtin();
        let upscaling = catalog.by_category("upscaling");
        assert!(upscaling.iter().any(|d| d.key == "DLSSMode"));
        assert!(upscaling.iter().all(|d| d.category == "Upscaling"));
    }

    #[test]
    fn test_engine_mouse_smoothing_has_distinct_stored_key() {
        let catalog = SettingCatalog::builtin();
        let engine = catalog
            .lookup("bEnableMouseSmoothing_Engine")
            .expect("engine smoothing registered");
        assert_eq!(engine.stored_key, "bEnableMouseSmoothing");
        let found = catalog
            .find_stored(&engine.section, "bEnableMouseSmoothing")
            .expect("reverse lookup");
        assert_eq!(found.key, "bEnableMouseSmoothing_Engine");
    }

    #[test]
    fn test_optional_settings_are_competitive() {
        let catalog = SettingCatalog::builtin();
        assert!(catalog.optional().count() > 0);
        assert!(catalog.optional().all(|d| d.category == OPTIONAL_CATEGORY));
        assert!(!catalog.lookup("DLSSMode").is_some_and(|d| d.is_optional()));
    }
}
