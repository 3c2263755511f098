//! Built-in setting table for Arc Raiders (`GameUserSettings.ini`).

use super::kind::PerformanceImpact::{High, Low, Medium, VeryHigh};
use super::{OPTIONAL_CATEGORY, PerformanceImpact, SettingDefinition, SettingKind};

/// Main game-settings section written by the Embark settings class.
pub const EMBARK_SECTION: &str = "/Script/EmbarkUserSettings.EmbarkGameUserSettings";
/// Unreal scalability groups (`sg.*` keys).
pub const SCALABILITY_SECTION: &str = "ScalabilityGroups";
/// Engine input settings.
pub const INPUT_SECTION: &str = "/Script/Engine.InputSettings";
/// Engine-level game user settings.
pub const ENGINE_USER_SECTION: &str = "/Script/Engine.GameUserSettings";
/// Engine core settings.
pub const ENGINE_SECTION: &str = "/Script/Engine.Engine";
/// Console-variable overrides (`r.*` keys).
pub const SYSTEM_SECTION: &str = "SystemSettings";

const QUALITY_LEVELS: &[(&str, &str)] =
    &[("0", "Low"), ("1", "Medium"), ("2", "High"), ("3", "Epic")];

const OFF_COMPETITIVE_ON: &[(&str, &str)] = &[("0", "Off (Competitive)"), ("1", "On")];

/// Every built-in definition, grouped by category in presentation order.
pub fn builtin_definitions() -> Vec<SettingDefinition> {
    let mut defs = Vec::new();
    defs.extend(upscaling());
    defs.extend(frame_generation());
    defs.extend(latency());
    defs.extend(ray_tracing());
    defs.extend(display());
    defs.extend(visual_effects());
    defs.extend(quality());
    defs.extend(competitive());
    defs
}

fn embark(key: &str, name: &str, kind: SettingKind, category: &str) -> SettingDefinition {
    SettingDefinition::new(key, name, kind)
        .section(EMBARK_SECTION)
        .category(category)
}

fn upscaling() -> Vec<SettingDefinition> {
    const CAT: &str = "Upscaling";
    vec![
        embark(
            "ResolutionScalingMethod",
            "Upscaling Technology",
            SettingKind::choice(&["DLSS", "XeSS", "FSR3", "None"], "DLSS"),
            CAT,
        )
        .description(
            "Which upscaler renders the final image: DLSS (NVIDIA), XeSS (Intel), FSR (AMD) or none.",
        )
        .impact(VeryHigh),
        embark(
            "DLSSMode",
            "DLSS Quality Mode",
            SettingKind::choice(
                &["DLAA", "Quality", "Balanced", "Performance", "UltraPerformance"],
                "Quality",
            ),
            CAT,
        )
        .description(
            "DLAA = native anti-aliasing only (sharpest, slowest). Quality renders at 67%, \
             Balanced at 58%, Performance at 50% and Ultra Performance at 33% (fastest, softest).",
        )
        .impact(VeryHigh),
        embark(
            "DLSSModel",
            "DLSS Model",
            SettingKind::choice(&["Transformer", "CNN"], "Transformer"),
            CAT,
        )
        .description(
            "Transformer (DLSS 4) has better motion clarity and less ghosting. \
             CNN is the older model: slightly faster, more artifacts.",
        )
        .impact(Low),
        embark(
            "XeSSMode",
            "XeSS Quality Mode",
            SettingKind::choice(
                &[
                    "NativeAA",
                    "UltraQualityPlus",
                    "UltraQuality",
                    "Quality",
                    "Balanced",
                    "Performance",
                    "UltraPerformance",
                ],
                "Quality",
            ),
            CAT,
        )
        .description("Intel XeSS quality level. Higher quality costs more performance.")
        .impact(VeryHigh),
        embark(
            "FSR3Mode",
            "FSR 3 Quality Mode",
            SettingKind::choice(
                &["NativeAA", "Quality", "Balanced", "Performance", "UltraPerformance"],
                "Balanced",
            ),
            CAT,
        )
        .description("AMD FSR quality level. Works on every GPU vendor.")
        .impact(VeryHigh),
    ]
}

fn frame_generation() -> Vec<SettingDefinition> {
    const CAT: &str = "Frame Generation";
    vec![
        embark(
            "DLSSFrameGenerationMode",
            "DLSS Frame Generation",
            SettingKind::choice(&["Off", "On", "On2X", "On3X", "On4X"], "Off"),
            CAT,
        )
        .description(
            "Generates extra frames with AI for smoother motion. Adds 15-30 ms of input latency; \
             On2X doubles the frame rate. Keep Off for competitive play.",
        )
        .impact(VeryHigh),
        embark(
            "FSR3FrameGenerationMode",
            "FSR 3 Frame Generation",
            SettingKind::choice(&["Off", "On"], "Off"),
            CAT,
        )
        .description("AMD frame generation. Runs on any GPU but adds latency.")
        .impact(VeryHigh),
    ]
}

fn latency() -> Vec<SettingDefinition> {
    const CAT: &str = "Latency";
    vec![
        embark(
            "NvReflexMode",
            "NVIDIA Reflex",
            SettingKind::choice(&["Disabled", "Enabled", "Enabled+Boost"], "Enabled"),
            CAT,
        )
        .description(
            "Cuts input latency by 20-50%. Enabled+Boost also keeps GPU clocks high, \
             which helps when CPU-bound.",
        )
        .impact(Low),
        embark(
            "ReflexLatewarpMode",
            "Reflex Frame Warp",
            SettingKind::choice(&["Off", "On"], "Off"),
            CAT,
        )
        .description(
            "Reflex 2 warps frames at display time for a further latency reduction. \
             Can show visual artifacts.",
        )
        .impact(Low),
        embark(
            "bAntiLag2Enabled",
            "AMD Anti-Lag 2",
            SettingKind::boolean(true),
            CAT,
        )
        .description("AMD latency reduction. Only effective on AMD RDNA GPUs.")
        .impact(Low),
    ]
}

fn ray_tracing() -> Vec<SettingDefinition> {
    const CAT: &str = "Ray Tracing";
    vec![
        embark(
            "RTXGIQuality",
            "RTX Global Illumination",
            SettingKind::choice(
                &["Static", "DynamicLow", "DynamicMedium", "DynamicHigh", "DynamicEpic"],
                "DynamicHigh",
            ),
            CAT,
        )
        .description(
            "Ray-traced indirect lighting. Static turns it off (fastest); \
             DynamicEpic looks best but can cost 25-45% of the frame rate.",
        )
        .impact(VeryHigh),
        embark(
            "RTXGIResolutionQuality",
            "RTX GI Resolution",
            SettingKind::labeled(QUALITY_LEVELS, "3"),
            CAT,
        )
        .description("Resolution of the global illumination pass. 0 = Low, 3 = Epic.")
        .impact(High),
    ]
}

fn display() -> Vec<SettingDefinition> {
    const CAT: &str = "Display";
    vec![
        embark(
            "FullscreenMode",
            "Fullscreen Mode",
            SettingKind::labeled(
                &[
                    ("0", "Exclusive Fullscreen"),
                    ("1", "Borderless Windowed"),
                    ("2", "Windowed"),
                ],
                "1",
            ),
            CAT,
        )
        .description(
            "Exclusive has the lowest latency but slow Alt+Tab. Borderless integrates \
             with the desktop. Windowed runs in a normal window.",
        )
        .impact(Low),
        embark("bUseVSync", "VSync", SettingKind::boolean(false), CAT)
            .description(
                "Locks frames to the monitor refresh. Leave off with Reflex for the lowest latency.",
            )
            .impact(Medium),
        embark(
            "FrameRateLimit",
            "Frame Rate Limit",
            SettingKind::integer(0, 500, 0),
            CAT,
        )
        .description("0 = unlimited. Cap slightly below the refresh rate for G-Sync/FreeSync.")
        .impact(Medium),
        embark(
            "bUseHDRDisplayOutput",
            "HDR Output",
            SettingKind::boolean(false),
            CAT,
        )
        .description("Wider color range and brightness on HDR-capable monitors.")
        .impact(Low),
    ]
}

fn visual_effects() -> Vec<SettingDefinition> {
    const CAT: &str = "Visual Effects";
    vec![
        embark(
            "MotionBlurEnabled",
            "Motion Blur",
            SettingKind::boolean(false),
            CAT,
        )
        .description("Blurs fast-moving objects. Off is recommended for competitive play.")
        .impact(Low),
        embark(
            "LensDistortionEnabled",
            "Lens Distortion",
            SettingKind::boolean(false),
            CAT,
        )
        .description("Simulated camera lens curvature. Off keeps screen edges clear.")
        .impact(Low),
    ]
}

fn scalability(
    key: &str,
    name: &str,
    description: &str,
    impact: PerformanceImpact,
) -> SettingDefinition {
    SettingDefinition::new(key, name, SettingKind::labeled(QUALITY_LEVELS, "3"))
        .description(description)
        .section(SCALABILITY_SECTION)
        .category("Quality Settings")
        .impact(impact)
}

fn quality() -> Vec<SettingDefinition> {
    vec![
        SettingDefinition::new(
            "sg.ViewDistanceQuality",
            "View Distance",
            SettingKind::labeled(
                &[
                    ("0", "Low"),
                    ("1", "Medium"),
                    ("2", "High"),
                    ("3", "Epic"),
                    ("4", "Cinematic"),
                ],
                "3",
            ),
        )
        .description(
            "How far objects render before LOD or culling. Higher sees farther at more GPU cost.",
        )
        .section(SCALABILITY_SECTION)
        .category("Quality Settings")
        .impact(Medium),
        scalability(
            "sg.ShadowQuality",
            "Shadow Quality",
            "Shadow map resolution and filtering, from 512 px (Low) to 4096 px (Epic).",
            High,
        ),
        scalability(
            "sg.TextureQuality",
            "Texture Quality",
            "Texture resolution. Mostly affects VRAM use rather than frame rate.",
            Low,
        ),
        scalability(
            "sg.EffectsQuality",
            "Effects Quality",
            "Particle counts, explosions and debris complexity.",
            Medium,
        ),
        scalability(
            "sg.FoliageQuality",
            "Foliage Quality",
            "Grass and tree density. Low gives sparse vegetation; Epic gives lush environments.",
            High,
        ),
        scalability(
            "sg.PostProcessQuality",
            "Post Processing",
            "Bloom, lens flares, color grading and depth of field.",
            Low,
        ),
        scalability(
            "sg.ReflectionQuality",
            "Reflection Quality",
            "Screen-space reflections and reflection probe quality.",
            Medium,
        ),
        scalability(
            "sg.ShadingQuality",
            "Shading Quality",
            "Material complexity and subsurface scattering for skin and hair.",
            Medium,
        ),
        scalability(
            "sg.GlobalIlluminationQuality",
            "Global Illumination",
            "Indirect lighting quality used when RTX GI is off.",
            Medium,
        ),
        scalability(
            "sg.AntiAliasingQuality",
            "Anti-Aliasing Quality",
            "TAA sample count. Usually overridden by DLSS, XeSS or FSR.",
            Low,
        ),
        SettingDefinition::new(
            "sg.ResolutionQuality",
            "Resolution Scale %",
            SettingKind::scalar(25, 100, 100),
        )
        .description("Internal render resolution percentage. Usually driven by the upscaler.")
        .section(SCALABILITY_SECTION)
        .category("Quality Settings")
        .impact(VeryHigh),
    ]
}

fn competitive_in(section: &str, key: &str, name: &str, kind: SettingKind) -> SettingDefinition {
    SettingDefinition::new(key, name, kind)
        .section(section)
        .category(OPTIONAL_CATEGORY)
}

fn competitive() -> Vec<SettingDefinition> {
    vec![
        // Mouse and input
        competitive_in(
            INPUT_SECTION,
            "bEnableMouseSmoothing",
            "Mouse Smoothing",
            SettingKind::boolean(false),
        )
        .description(
            "Disable for competitive play. Smoothing interpolates mouse movement, \
             adding input lag and inconsistent aim.",
        ),
        competitive_in(
            INPUT_SECTION,
            "bViewAccelerationEnabled",
            "Mouse Acceleration",
            SettingKind::boolean(false),
        )
        .description(
            "Disable for competitive play. Acceleration scales sensitivity with movement \
             speed, which breaks muscle memory.",
        ),
        competitive_in(
            ENGINE_USER_SECTION,
            "bEnableMouseSmoothing_Engine",
            "Engine Mouse Smoothing",
            SettingKind::boolean(false),
        )
        .stored_key("bEnableMouseSmoothing")
        .description(
            "Second mouse smoothing switch in the engine settings. Disable both this and the \
             input-settings version for the most direct response.",
        ),
        // Visual clutter
        competitive_in(
            SYSTEM_SECTION,
            "r.DepthOfFieldQuality",
            "Depth of Field",
            SettingKind::labeled(&[("0", "Off (Competitive)"), ("1", "Low"), ("2", "High")], "0"),
        )
        .description("Distance blur. 0 turns it off for maximum visibility."),
        competitive_in(
            SYSTEM_SECTION,
            "r.BloomQuality",
            "Bloom Quality",
            SettingKind::labeled(
                &[
                    ("0", "Off (Competitive)"),
                    ("1", "Low"),
                    ("2", "Medium"),
                    ("3", "High"),
                    ("4", "Epic"),
                ],
                "0",
            ),
        )
        .description("Glow around bright objects. Off reduces visual noise around targets."),
        competitive_in(
            SYSTEM_SECTION,
            "r.LensFlareQuality",
            "Lens Flare",
            SettingKind::labeled(&[("0", "Off (Competitive)"), ("1", "Low"), ("2", "High")], "0"),
        )
        .description("Flares from bright lights. Off avoids enemies hiding near light sources."),
        competitive_in(
            SYSTEM_SECTION,
            "r.SceneColorFringe.Max",
            "Chromatic Aberration",
            SettingKind::labeled(&[("0", "Off (Competitive)"), ("0.5", "Low"), ("1", "Full")], "0"),
        )
        .description("Color fringing at screen edges. Purely cosmetic; off gives cleaner edges."),
        competitive_in(
            SYSTEM_SECTION,
            "r.Tonemapper.Sharpen",
            "Sharpening",
            SettingKind::scalar(0, 2, 0),
        )
        .description(
            "Post-process sharpening. 0 leaves sharpening to the upscaler; \
             high values can introduce artifacts.",
        ),
        competitive_in(
            SYSTEM_SECTION,
            "r.Tonemapper.GrainQuantization",
            "Film Grain Quantization",
            SettingKind::labeled(OFF_COMPETITIVE_ON, "0"),
        )
        .description("Quantization noise from the tonemapper. Off for a cleaner image."),
        competitive_in(
            SYSTEM_SECTION,
            "r.Vignette.Quality",
            "Vignette",
            SettingKind::labeled(OFF_COMPETITIVE_ON, "0"),
        )
        .description("Darkened screen corners. Off keeps the periphery fully visible."),
        // Performance tweaks
        competitive_in(
            SYSTEM_SECTION,
            "r.OneFrameThreadLag",
            "One Frame Thread Lag",
            SettingKind::labeled(
                &[("0", "Off (Lower Latency)"), ("1", "On (Default/Stable)")],
                "1",
            ),
        )
        .description(
            "Experimental. 0 removes one frame of input lag but may stutter on some systems; \
             test before ranked matches.",
        )
        .impact(Medium),
        competitive_in(
            ENGINE_SECTION,
            "bSmoothFrameRate",
            "Smooth Frame Rate",
            SettingKind::boolean(true),
        )
        .description(
            "Experimental. Engine frame pacing. False may lower latency at the risk of stutter.",
        ),
        competitive_in(
            SYSTEM_SECTION,
            "r.CreateShadersOnLoad",
            "Precompile Shaders on Load",
            SettingKind::labeled(&[("0", "Off (Faster Load)"), ("1", "On (Less Stutter)")], "1"),
        )
        .description(
            "Experimental. 1 compiles shaders while loading (longer loads, fewer hitches).",
        ),
        // Textures and VRAM
        competitive_in(
            SYSTEM_SECTION,
            "r.Streaming.PoolSize",
            "Texture Pool Size (MB)",
            SettingKind::integer(1024, 16384, 4096),
        )
        .description(
            "Advanced. Texture streaming budget in MB. Suggested: 6 GB GPU = 4096, \
             8 GB = 6144, 12 GB or more = 8192.",
        )
        .impact(Medium),
        competitive_in(
            SYSTEM_SECTION,
            "r.MaxAnisotropy",
            "Anisotropic Filtering",
            SettingKind::labeled(
                &[
                    ("1", "1x (Lowest)"),
                    ("2", "2x"),
                    ("4", "4x"),
                    ("8", "8x"),
                    ("16", "16x (Best)"),
                ],
                "16",
            ),
        )
        .description("Texture clarity at oblique angles. 16x is nearly free on modern GPUs."),
        competitive_in(
            SYSTEM_SECTION,
            "r.TextureStreaming",
            "Texture Streaming",
            SettingKind::labeled(&[("0", "Off (All High-Res)"), ("1", "On (Dynamic)")], "1"),
        )
        .description(
            "Advanced. 0 loads every texture at full resolution and can crash GPUs with little VRAM.",
        ),
        // Audio
        competitive_in(
            EMBARK_SECTION,
            "AudioQualityLevel",
            "Audio Quality Level",
            SettingKind::labeled(QUALITY_LEVELS, "3"),
        )
        .description("Audio processing quality. Higher levels improve positional accuracy."),
        competitive_in(
            EMBARK_SECTION,
            "bEnableAudioSpatialisation",
            "Audio Spatialization",
            SettingKind::boolean(true),
        )
        .description("3D positional audio for locating footsteps and gunfire."),
    ]
}
