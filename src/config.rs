// filepath: src/config.rs
//! Configuration handling for scribbler
//!
//! Settings come from an ordered list of sources. Each source is a
//! [`ConfigLayer`] in which every key is optional; resolution walks the
//! layers front to back and the first layer that sets a key wins:
//!
//! 1. `SCRIBBLER_*` environment variables
//! 2. the TOML config file (created with defaults when missing)
//! 3. built-in defaults

use crate::draw::Rgba;
use crate::error::ConfigError;
use crate::surface::{DrawStyle, StackLayer};
use serde::{Deserialize, Serialize};
use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub const DEFAULT_STROKE_COLOR: &str = "blue";
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;
pub const DEFAULT_SURFACE_ID: &str = "scribbler";
pub const DEFAULT_TOGGLE_KEY: &str = "Escape";

const ENV_PREFIX: &str = "SCRIBBLER_";
const ENV_CONFIG_PATH: &str = "SCRIBBLER_CONFIG";

/// One configuration source; unset keys defer to later sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_layer: Option<StackLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_layer: Option<StackLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_key: Option<String>,
}

impl ConfigLayer {
    /// A layer with every key set to its built-in default
    pub fn defaults() -> Self {
        Self {
            stroke_color: Some(DEFAULT_STROKE_COLOR.to_string()),
            line_width: Some(DEFAULT_LINE_WIDTH),
            surface_id: Some(DEFAULT_SURFACE_ID.to_string()),
            active_layer: Some(StackLayer::Overlay),
            inactive_layer: Some(StackLayer::Bottom),
            toggle_key: Some(DEFAULT_TOGGLE_KEY.to_string()),
        }
    }

    /// Layer built from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars_os(std::env::vars_os())
    }

    /// Like [`ConfigLayer::from_vars`] for raw OS strings. Names that are not
    /// UTF-8 are skipped; a non UTF-8 `SCRIBBLER_*` value is an error.
    pub fn from_vars_os<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut utf8 = Vec::new();
        for (name, value) in vars {
            let Ok(name) = name.into_string() else {
                continue;
            };
            if !name.starts_with(ENV_PREFIX) {
                continue;
            }
            match value.into_string() {
                Ok(value) => utf8.push((name, value)),
                Err(value) => {
                    return Err(ConfigError::InvalidEnv {
                        name,
                        value: value.to_string_lossy().into_owned(),
                    })
                }
            }
        }
        Self::from_vars(utf8)
    }

    /// Layer built from `SCRIBBLER_<KEY>` variables; other variables are ignored
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut layer = Self::default();
        for (name, value) in vars {
            let name = name.as_ref();
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.into();
            let invalid = || ConfigError::InvalidEnv {
                name: name.to_string(),
                value: value.clone(),
            };
            match key {
                "STROKE_COLOR" => layer.stroke_color = Some(value.clone()),
                "LINE_WIDTH" => {
                    layer.line_width = Some(value.trim().parse().map_err(|_| invalid())?)
                }
                "SURFACE_ID" => layer.surface_id = Some(value.clone()),
                "ACTIVE_LAYER" => {
                    layer.active_layer = Some(value.parse().map_err(|_| invalid())?)
                }
                "INACTIVE_LAYER" => {
                    layer.inactive_layer = Some(value.parse().map_err(|_| invalid())?)
                }
                "TOGGLE_KEY" => layer.toggle_key = Some(value.clone()),
                _ => {}
            }
        }
        Ok(layer)
    }

    /// Load a layer from a TOML file, writing the defaults there if it does not exist
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let defaults = Self::defaults();
                defaults.save_to_file(path)?;
                log::info!("Wrote default configuration to {}", path.display());
                Ok(defaults)
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Save the layer as TOML
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Create the directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_error)
    }
}

/// Fully resolved settings with no optional keys
#[derive(Debug, Clone, PartialEq)]
pub struct ScribblerConfig {
    pub stroke_color: Rgba,
    pub line_width: f32,
    pub surface_id: String,
    pub active_layer: StackLayer,
    pub inactive_layer: StackLayer,
    pub toggle_key: String,
}

impl Default for ScribblerConfig {
    fn default() -> Self {
        let style = DrawStyle::default();
        Self {
            stroke_color: style.stroke_color,
            line_width: style.line_width,
            surface_id: DEFAULT_SURFACE_ID.to_string(),
            active_layer: StackLayer::Overlay,
            inactive_layer: StackLayer::Bottom,
            toggle_key: DEFAULT_TOGGLE_KEY.to_string(),
        }
    }
}

impl ScribblerConfig {
    /// Path of the config file: `$SCRIBBLER_CONFIG`, else `<config dir>/scribbler/config.toml`
    pub fn get_config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("scribbler")
        } else {
            PathBuf::from(".config/scribbler")
        };

        config_dir.join("config.toml")
    }

    /// Resolve environment, config file and defaults, in that order
    pub fn load() -> Result<Self, ConfigError> {
        let env = ConfigLayer::from_env()?;
        let file = ConfigLayer::load_from_file(&Self::get_config_path())?;
        Self::resolve(&[env, file])
    }

    /// Resolve layers in precedence order; keys no layer sets take their default
    pub fn resolve(layers: &[ConfigLayer]) -> Result<Self, ConfigError> {
        fn first<'a, T: 'a>(
            layers: &'a [ConfigLayer],
            key: impl Fn(&'a ConfigLayer) -> Option<T>,
        ) -> Option<T> {
            layers.iter().find_map(key)
        }

        let defaults = Self::default();

        let stroke_color = match first(layers, |l| l.stroke_color.as_deref()) {
            Some(value) => Rgba::from_css(value)?,
            None => defaults.stroke_color,
        };

        let line_width = first(layers, |l| l.line_width).unwrap_or(defaults.line_width);
        if !(line_width.is_finite() && line_width > 0.0) {
            return Err(ConfigError::InvalidLineWidth(line_width));
        }

        let active_layer = first(layers, |l| l.active_layer).unwrap_or(defaults.active_layer);
        let inactive_layer = first(layers, |l| l.inactive_layer).unwrap_or(defaults.inactive_layer);
        if active_layer < inactive_layer {
            return Err(ConfigError::InvertedLayers {
                active: active_layer,
                inactive: inactive_layer,
            });
        }

        Ok(Self {
            stroke_color,
            line_width,
            surface_id: first(layers, |l| l.surface_id.clone()).unwrap_or(defaults.surface_id),
            active_layer,
            inactive_layer,
            toggle_key: first(layers, |l| l.toggle_key.clone()).unwrap_or(defaults.toggle_key),
        })
    }

    pub fn style(&self) -> DrawStyle {
        DrawStyle {
            stroke_color: self.stroke_color,
            line_width: self.line_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_layer() {
        let from_layer = ScribblerConfig::resolve(&[ConfigLayer::defaults()]).unwrap();
        assert_eq!(from_layer, ScribblerConfig::default());
        assert_eq!(from_layer.stroke_color, Rgba::new(0, 0, 255, 255));
        assert_eq!(from_layer.line_width, 2.0);
        assert_eq!(from_layer.toggle_key, "Escape");
    }

    #[test]
    fn earlier_layers_take_precedence() {
        let env = ConfigLayer {
            line_width: Some(5.0),
            ..Default::default()
        };
        let file = ConfigLayer {
            stroke_color: Some("red".into()),
            line_width: Some(3.0),
            ..Default::default()
        };
        let config = ScribblerConfig::resolve(&[env, file]).unwrap();
        assert_eq!(config.line_width, 5.0);
        assert_eq!(config.stroke_color, Rgba::new(255, 0, 0, 255));
        assert_eq!(config.surface_id, DEFAULT_SURFACE_ID);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_color = ConfigLayer {
            stroke_color: Some("bleu".into()),
            ..Default::default()
        };
        assert!(matches!(
            ScribblerConfig::resolve(&[bad_color]),
            Err(ConfigError::InvalidColor { .. })
        ));

        let bad_width = ConfigLayer {
            line_width: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            ScribblerConfig::resolve(&[bad_width]),
            Err(ConfigError::InvalidLineWidth(_))
        ));
    }

    #[test]
    fn env_vars_fill_a_layer() {
        let layer = ConfigLayer::from_vars([
            ("SCRIBBLER_STROKE_COLOR", "#ff8800"),
            ("SCRIBBLER_LINE_WIDTH", " 4.5 "),
            ("SCRIBBLER_ACTIVE_LAYER", "top"),
            ("SCRIBBLER_UNKNOWN", "ignored"),
            ("HOME", "/root"),
        ])
        .unwrap();
        assert_eq!(layer.stroke_color.as_deref(), Some("#ff8800"));
        assert_eq!(layer.line_width, Some(4.5));
        assert_eq!(layer.active_layer, Some(StackLayer::Top));
        assert_eq!(layer.surface_id, None);
    }

    #[test]
    fn malformed_env_values_are_errors() {
        let err = ConfigLayer::from_vars([("SCRIBBLER_LINE_WIDTH", "wide")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref name, .. } if name == "SCRIBBLER_LINE_WIDTH"));
        assert!(ConfigLayer::from_vars([("SCRIBBLER_INACTIVE_LAYER", "basement")]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_environment_is_not_fatal() {
        use std::os::unix::ffi::OsStringExt;

        let garbage = || OsString::from_vec(vec![0xff, 0xfe]);
        let layer = ConfigLayer::from_vars_os([
            (OsString::from("SOME_OTHER_VAR"), garbage()),
            (garbage(), OsString::from("x")),
            (OsString::from("SCRIBBLER_TOGGLE_KEY"), OsString::from("F8")),
        ])
        .unwrap();
        assert_eq!(layer.toggle_key.as_deref(), Some("F8"));

        let err =
            ConfigLayer::from_vars_os([(OsString::from("SCRIBBLER_SURFACE_ID"), garbage())])
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref name, .. } if name == "SCRIBBLER_SURFACE_ID"));
    }

    #[test]
    fn active_layer_below_inactive_is_rejected() {
        let inverted = ConfigLayer {
            active_layer: Some(StackLayer::Bottom),
            inactive_layer: Some(StackLayer::Overlay),
            ..Default::default()
        };
        assert!(matches!(
            ScribblerConfig::resolve(&[inverted]),
            Err(ConfigError::InvertedLayers { .. })
        ));

        let same = ConfigLayer {
            active_layer: Some(StackLayer::Top),
            inactive_layer: Some(StackLayer::Top),
            ..Default::default()
        };
        assert!(ScribblerConfig::resolve(&[same]).is_ok());
    }

    #[test]
    fn toml_layer_names_ignore_case() {
        let layer: ConfigLayer = toml::from_str(
            r#"
            active_layer = "Overlay"
            inactive_layer = " BOTTOM "
            "#,
        )
        .unwrap();
        assert_eq!(layer.active_layer, Some(StackLayer::Overlay));
        assert_eq!(layer.inactive_layer, Some(StackLayer::Bottom));
        assert!(toml::from_str::<ConfigLayer>("active_layer = \"sky\"").is_err());
    }

    #[test]
    fn layer_parses_from_toml() {
        let layer: ConfigLayer = toml::from_str(
            r#"
            stroke_color = "green"
            inactive_layer = "background"
            "#,
        )
        .unwrap();
        assert_eq!(layer.stroke_color.as_deref(), Some("green"));
        assert_eq!(layer.inactive_layer, Some(StackLayer::Background));
        assert_eq!(layer.line_width, None);
    }
}
