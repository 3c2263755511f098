//! Named bundles of setting values applied in one step.

use crate::catalog::{SettingCatalog, SettingKind};
use crate::document::ConfigDocument;
use crate::error::ConfigError;
use std::sync::{Arc, LazyLock};

/// A named, ordered list of `(key, stored value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub settings: Vec<(String, String)>,
}

impl Preset {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            settings: Vec::new(),
        }
    }

    /// Append one pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.push((key.into(), value.into()));
        self
    }

    /// Write every pair into `document` at its definition's location.
    ///
    /// Keys are never removed, so applying the same preset twice leaves the
    /// document as one application did. Keys the catalog does not know are
    /// skipped. Returns the number of pairs written.
    pub fn apply(&self, catalog: &SettingCatalog, document: &mut ConfigDocument) -> usize {
        let mut applied = 0;
        for (key, value) in &self.settings {
            match catalog.lookup(key) {
                Some(def) => {
                    document.set(&def.section, def.stored_key.clone(), value.clone());
                    applied += 1;
                }
                None => log::warn!("Preset '{}' references unknown setting {key}", self.name),
            }
        }
        log::info!("Applied preset '{}' ({applied} settings)", self.name);
        applied
    }
}

static BUILTIN: LazyLock<Arc<PresetTable>> = LazyLock::new(|| Arc::new(PresetTable::shipped()));

/// The set of presets offered to the user, in menu order.
#[derive(Debug, Clone, Default)]
pub struct PresetTable {
    presets: Vec<Preset>,
}

impl PresetTable {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Competitive, Balanced, Quality and Cinematic.
    pub fn builtin() -> Arc<PresetTable> {
        Arc::clone(&BUILTIN)
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Apply a preset by name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] for an unknown name; the document is not
    /// touched in that case.
    pub fn apply(
        &self,
        name: &str,
        catalog: &SettingCatalog,
        document: &mut ConfigDocument,
    ) -> Result<usize, ConfigError> {
        let preset = self
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(format!("preset '{name}'")))?;
        Ok(preset.apply(catalog, document))
    }

    /// Check that every referenced key exists and every choice value is one
    /// of the definition's options.
    pub fn validate(&self, catalog: &SettingCatalog) -> Result<(), ConfigError> {
        for preset in &self.presets {
            for (key, value) in &preset.settings {
                let def = catalog.lookup(key).ok_or_else(|| {
                    ConfigError::UnknownSetting(format!("{key} (preset '{}')", preset.name))
                })?;
                if let SettingKind::Choice { options, .. } = &def.kind
                    && !options.iter().any(|o| &o.stored == value)
                {
                    return Err(ConfigError::Validation(format!(
                        "preset '{}' sets {key} to '{value}', which is not an option",
                        preset.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn shipped() -> Self {
        Self::new(vec![competitive(), balanced(), quality(), cinematic()])
    }
}

fn competitive() -> Preset {
    Preset::new(
        "Competitive",
        "Maximum FPS and lowest latency for competitive play",
    )
    .with("DLSSMode", "Performance")
    .with("DLSSFrameGenerationMode", "Off")
    .with("NvReflexMode", "Enabled+Boost")
    .with("RTXGIQuality", "Static")
    .with("RTXGIResolutionQuality", "0")
    .with("FullscreenMode", "0")
    .with("bUseVSync", "False")
    .with("MotionBlurEnabled", "False")
    .with("LensDistortionEnabled", "False")
    .with("sg.FoliageQuality", "0")
    .with("sg.ShadowQuality", "1")
    .with("sg.EffectsQuality", "1")
    .with("sg.PostProcessQuality", "1")
    .with("sg.ViewDistanceQuality", "3")
    .with("bEnableMouseSmoothing", "False")
    .with("bViewAccelerationEnabled", "False")
    .with("r.DepthOfFieldQuality", "0")
    .with("r.BloomQuality", "0")
    .with("r.LensFlareQuality", "0")
    .with("r.SceneColorFringe.Max", "0")
    .with("r.Tonemapper.GrainQuantization", "0")
    .with("r.Vignette.Quality", "0")
    .with("r.MaxAnisotropy", "16")
    .with("AudioQualityLevel", "3")
    .with("bEnableAudioSpatialisation", "True")
}

fn balanced() -> Preset {
    Preset::new("Balanced", "Good visuals with solid performance")
        .with("DLSSMode", "Quality")
        .with("DLSSFrameGenerationMode", "Off")
        .with("NvReflexMode", "Enabled")
        .with("RTXGIQuality", "DynamicHigh")
        .with("RTXGIResolutionQuality", "2")
        .with("FullscreenMode", "1")
        .with("bUseVSync", "False")
        .with("MotionBlurEnabled", "False")
        .with("LensDistortionEnabled", "False")
        .with("sg.FoliageQuality", "2")
        .with("sg.ShadowQuality", "2")
        .with("sg.EffectsQuality", "2")
        .with("sg.PostProcessQuality", "2")
        .with("sg.ViewDistanceQuality", "3")
}

fn quality() -> Preset {
    Preset::new("Quality", "Maximum visual quality")
        .with("DLSSMode", "DLAA")
        .with("DLSSFrameGenerationMode", "Off")
        .with("NvReflexMode", "Enabled")
        .with("RTXGIQuality", "DynamicEpic")
        .with("RTXGIResolutionQuality", "3")
        .with("FullscreenMode", "1")
        .with("bUseVSync", "False")
        .with("MotionBlurEnabled", "False")
        .with("LensDistortionEnabled", "True")
        .with("sg.FoliageQuality", "3")
        .with("sg.ShadowQuality", "3")
        .with("sg.EffectsQuality", "3")
        .with("sg.PostProcessQuality", "3")
        .with("sg.ViewDistanceQuality", "4")
}

fn cinematic() -> Preset {
    Preset::new(
        "Cinematic",
        "Best visuals with frame generation for smooth playback",
    )
    .with("DLSSMode", "DLAA")
    .with("DLSSFrameGenerationMode", "On2X")
    .with("NvReflexMode", "Enabled+Boost")
    .with("RTXGIQuality", "DynamicEpic")
    .with("RTXGIResolutionQuality", "3")
    .with("FullscreenMode", "1")
    .with("bUseVSync", "False")
    .with("MotionBlurEnabled", "True")
    .with("LensDistortionEnabled", "True")
    .with("sg.FoliageQuality", "3")
    .with("sg.ShadowQuality", "3")
    .with("sg.EffectsQuality", "3")
    .with("sg.PostProcessQuality", "3")
    .with("sg.ViewDistanceQuality", "4")
}
