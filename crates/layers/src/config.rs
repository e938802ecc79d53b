//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::fmt;
use std::fs;
use std::path::Path;

use render::{ColorParseError, Rgb};
use runtime::DEFAULT_TRANSITION_S;
use scene::NoDataPolicy;
use serde::Deserialize;

use crate::symbology::DivergingScale;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Color(ColorParseError),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Color(err) => write!(f, "{err}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ColorParseError> for ConfigError {
    fn from(err: ColorParseError) -> Self {
        ConfigError::Color(err)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScaleConfig {
    /// Low, midpoint and high domain stops.
    pub domain: [f64; 3],
    /// CSS colors for the three stops.
    pub colors: [String; 3],
    /// Spacing between legend values.
    pub legend_step: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            domain: [-100.0, 0.0, 100.0],
            colors: [
                "#B71C1C".to_string(),
                "rgb(243, 240, 225)".to_string(),
                "#1d7d0a".to_string(),
            ],
            legend_step: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobeConfig {
    /// Degrees of rotation per pixel of drag at scale 1.
    pub drag_sensitivity: f64,
    /// Resampling tolerance in pixels.
    pub precision_px: f64,
    pub transition_s: f64,
    pub no_data_policy: NoDataPolicy,
    pub no_data_fill: String,
    pub scale: ScaleConfig,
    /// Narrow-screen layout: no globe shadow, short no-data label.
    pub compact: bool,
    pub globe_top: String,
    pub globe_bottom: String,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 50.0,
            precision_px: 100.0,
            transition_s: DEFAULT_TRANSITION_S,
            no_data_policy: NoDataPolicy::default(),
            no_data_fill: "#dfe2e8".to_string(),
            scale: ScaleConfig::default(),
            compact: false,
            globe_top: "#2493C3".to_string(),
            globe_bottom: "#2C4099".to_string(),
        }
    }
}

/// Colors resolved from their CSS strings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub no_data: Rgb,
    pub globe_top: Rgb,
    pub globe_bottom: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            no_data: Rgb::new(0xdf, 0xe2, 0xe8),
            globe_top: Rgb::new(0x24, 0x93, 0xc3),
            globe_bottom: Rgb::new(0x2c, 0x40, 0x99),
        }
    }
}

impl GlobeConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&payload)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dragSensitivity must be positive, got {}",
                self.drag_sensitivity
            )));
        }
        if !(self.precision_px.is_finite() && self.precision_px >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "precisionPx must be non-negative, got {}",
                self.precision_px
            )));
        }
        if !(self.transition_s.is_finite() && self.transition_s >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "transitionS must be non-negative, got {}",
                self.transition_s
            )));
        }
        self.diverging_scale().map(|_| ())
    }

    pub fn diverging_scale(&self) -> Result<DivergingScale, ConfigError> {
        let [lo, mid, hi] = &self.scale.colors;
        DivergingScale::new(
            self.scale.domain,
            [Rgb::parse(lo)?, Rgb::parse(mid)?, Rgb::parse(hi)?],
            self.scale.legend_step,
        )
        .map_err(ConfigError::Invalid)
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            no_data: Rgb::parse(&self.no_data_fill)?,
            globe_top: Rgb::parse(&self.globe_top)?,
            globe_bottom: Rgb::parse(&self.globe_bottom)?,
        })
    }
}
