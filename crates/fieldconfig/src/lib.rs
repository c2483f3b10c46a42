//! Scene configuration for the canvas field animator.
//!
//! A configuration file names one or more scenes; each scene lists the entity
//! variants it contains, how many of each to allocate, the ranges their
//! constant parameters are sampled from, and the palette they draw with.
//! The bundled presets cover a loading screen, a landing page and four
//! section backgrounds.

mod color;
mod range;
mod scene;

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub use color::Color;
pub use range::SampleRange;
pub use scene::{
    BeaconConfig, LineConfig, LinkConfig, NodeConfig, ParticleConfig, RingConfig, SceneConfig,
    ShapeConfig, SignalConfig, SparkConfig, SpawnConfig, WaveConfig,
};

/// Frame rate the per-frame constants of the bundled scenes were tuned at.
pub const DEFAULT_REFERENCE_FPS: f32 = 60.0;

const BUILTIN_PRESETS: &str = include_str!("../presets/builtin.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldConfig {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub scenes: BTreeMap<String, SceneConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    pub scene: Option<String>,
    pub reference_fps: Option<f32>,
}

pub(crate) fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_duration_opt(deserializer).map(|d| d.unwrap_or(Duration::ZERO))
}

fn deserialize_duration_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Option<Duration>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map(Some)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(Duration::from_secs(v)))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Some(Duration::from_secs(v as u64)))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Duration::try_from_secs_f64(v)
                .map(Some)
                .map_err(|err| E::custom(format!("invalid duration {v}: {err}")))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(Visitor)
}

impl FieldConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: FieldConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    /// Scenes shipped with the crate: `loading`, `civitas`, `vortex`,
    /// `nexora`, `social` and `landing`.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_PRESETS)
    }

    pub fn scene(&self, name: &str) -> Option<&SceneConfig> {
        self.scenes.get(name)
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn default_scene(&self) -> Option<&str> {
        self.defaults.scene.as_deref()
    }

    pub fn reference_fps(&self) -> f32 {
        self.defaults.reference_fps.unwrap_or(DEFAULT_REFERENCE_FPS)
    }

    /// Adds every scene from `other` whose name is not already defined here.
    pub fn merge_missing(&mut self, other: &FieldConfig) {
        for (name, scene) in &other.scenes {
            self.scenes
                .entry(name.clone())
                .or_insert_with(|| scene.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        if self.scenes.is_empty() {
            return Err(ConfigError::Invalid(
                "config must define at least one scene".into(),
            ));
        }

        for (name, scene) in &self.scenes {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("scene names may not be empty".into()));
            }
            scene.validate(name)?;
        }

        if let Some(default_scene) = &self.defaults.scene {
            if !self.scenes.contains_key(default_scene) {
                return Err(ConfigError::Invalid(format!(
                    "defaults.scene references unknown scene '{default_scene}'"
                )));
            }
        }

        if let Some(fps) = self.defaults.reference_fps {
            if !fps.is_finite() || fps <= 0.0 {
                return Err(ConfigError::Invalid(
                    "defaults.reference_fps must be greater than zero".into(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
version = 1
seed = 42

[defaults]
scene = "waves"
reference_fps = 30

[scenes.waves]
palette = ["#48bb78", "rgb(66, 165, 245)"]

[scenes.waves.waves]
count = 5
amplitude = 10

[scenes.pulse]

[scenes.pulse.rings]
count = 0
decay = 0.003

[scenes.pulse.rings.spawn]
initial = 5
stagger = "1s"
interval = 2.5
cap = 8
"##;

    #[test]
    fn parses_sample_config() {
        let config = FieldConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.default_scene(), Some("waves"));
        assert_eq!(config.reference_fps(), 30.0);

        let waves = config.scene("waves").unwrap();
        assert_eq!(waves.palette.len(), 2);
        let wave_cfg = waves.waves.as_ref().unwrap();
        assert_eq!(wave_cfg.count, 5);
        assert_eq!(wave_cfg.amplitude, SampleRange::fixed(10.0));
        assert_eq!(wave_cfg.frequency, WaveConfig::default().frequency);

        let pulse = config.scene("pulse").unwrap();
        assert_eq!(pulse.palette, vec![Color::GOLD]);
        let spawn = pulse.rings.as_ref().unwrap().spawn.as_ref().unwrap();
        assert_eq!(spawn.initial, 5);
        assert_eq!(spawn.stagger, Duration::from_secs(1));
        assert_eq!(spawn.interval, Duration::from_millis(2500));
        assert_eq!(spawn.cap, Some(8));
    }

    #[test]
    fn bundled_presets_validate() {
        let config = FieldConfig::builtin().expect("builtin presets");
        for name in ["loading", "civitas", "vortex", "nexora", "social", "landing"] {
            let scene = config.scene(name).unwrap_or_else(|| panic!("missing {name}"));
            assert!(scene.initial_entity_count() > 0 || scene.rings.is_some());
        }
        assert_eq!(config.reference_fps(), DEFAULT_REFERENCE_FPS);
    }

    #[test]
    fn rejects_unknown_default_scene() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[defaults]
scene = "missing"

[scenes.main.waves]
count = 1
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unsupported_version() {
        let err = FieldConfig::from_toml_str("version = 2\n[scenes.main]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("version")));
    }

    #[test]
    fn rejects_empty_scene_table() {
        let err = FieldConfig::from_toml_str("version = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.main.waves]
amplitude = [40, 10]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("waves.amplitude")));
    }

    #[test]
    fn rejects_opacity_above_one() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.main.shapes]
opacity = [0.5, 1.5]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("shapes.opacity")));
    }

    #[test]
    fn rejects_zero_spawn_interval() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.main.rings.spawn]
interval = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("interval")));
    }

    #[test]
    fn rejects_infinite_duration() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1
[scenes.main.rings.spawn]
interval = inf
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = FieldConfig::from_toml_str(
            r#"
version = 1
[scenes.main.rings.spawn]
stagger = 1e300
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_empty_palette() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.main]
palette = []
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_links_without_nodes() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.main.links]
count = 3
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("links")));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.main.waves]
amplitud = 3
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_bad_color() {
        let err = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.main]
palette = ["teal"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn merge_missing_keeps_user_scenes() {
        let mut config = FieldConfig::from_toml_str(
            r#"
version = 1

[scenes.civitas.waves]
count = 2
"#,
        )
        .unwrap();
        let builtin = FieldConfig::builtin().unwrap();
        config.merge_missing(&builtin);
        assert_eq!(
            config.scene("civitas").unwrap().waves.as_ref().unwrap().count,
            2
        );
        assert!(config.scene("loading").is_some());
    }
}
