use crate::error::ThemeError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BEZIER_OFFSET: f32 = 100.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BezierTheme {
    /// Distance control points are pulled away from their anchors.
    pub offset: f32,
}

impl Default for BezierTheme {
    fn default() -> Self {
        Self {
            offset: DEFAULT_BEZIER_OFFSET,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub bezier: BezierTheme,
}

impl Theme {
    /// Parse a (possibly partial) theme document. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Theme, ThemeError> {
        let theme: Theme = serde_json::from_str(s)?;
        theme.validate()?;
        Ok(theme)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Theme, ThemeError> {
        let theme: Theme = serde_json::from_value(v)?;
        theme.validate()?;
        Ok(theme)
    }

    pub fn validate(&self) -> Result<(), ThemeError> {
        let offset = self.bezier.offset;
        if !offset.is_finite() || offset < 0.0 {
            return Err(ThemeError::InvalidOffset(offset));
        }
        Ok(())
    }
}
