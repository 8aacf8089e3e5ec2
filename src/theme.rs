//! Theme data model and value resolvers.
//!
//! The theme is read-only during a render pass. Core code reads it only
//! through the resolvers below (and `spacings.base` / `breakpoints` in the
//! processor), never mutates it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::css::Interpolation;
use crate::error::{Error, Result};
use crate::util::format_number;

/// Breakpoint names in ascending order.
pub const BREAKPOINT_NAMES: [&str; 5] = ["xs", "sm", "md", "lg", "xl"];

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Breakpoint name to pixel threshold.
    #[serde(default)]
    pub breakpoints: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    pub spacings: Spacings,
    #[serde(default)]
    pub fonts: BTreeMap<String, Font>,
    /// Color type (`primary`, `neutral`, ...) to named colors.
    #[serde(default)]
    pub colors: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub max_width: String,
}

/// Named spacing multipliers. `base` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacings {
    pub base: f64,
    /// Additional sizes such as `small`, `medium`, `large`.
    #[serde(flatten)]
    pub sizes: BTreeMap<String, f64>,
}

impl Spacings {
    /// Spacings with only a base multiplier.
    pub fn new(base: f64) -> Self {
        Self {
            base,
            sizes: BTreeMap::new(),
        }
    }

    /// Look up a multiplier by name; `base` is always present.
    pub fn get(&self, name: &str) -> Option<f64> {
        if name == "base" {
            Some(self.base)
        } else {
            self.sizes.get(name).copied()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

impl Theme {
    /// A theme with the given base spacing and nothing else.
    pub fn new(base_spacing: f64) -> Self {
        Self {
            breakpoints: BTreeMap::new(),
            container: None,
            spacings: Spacings::new(base_spacing),
            fonts: BTreeMap::new(),
            colors: BTreeMap::new(),
            dimensions: BTreeMap::new(),
        }
    }

    /// Parse a theme from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a theme from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Builder-style breakpoint registration.
    pub fn with_breakpoint(mut self, name: &str, px: u32) -> Self {
        self.breakpoints.insert(name.to_string(), px);
        self
    }

    /// Builder-style color registration.
    pub fn with_color(mut self, color_type: &str, name: &str, value: &str) -> Self {
        self.colors
            .entry(color_type.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Pixel threshold of a breakpoint.
    pub fn breakpoint(&self, name: &str) -> Option<u32> {
        self.breakpoints.get(name).copied()
    }

    /// Multiply each value by the `kind` spacing multiplier.
    ///
    /// Values are joined with spaces so one call can produce a shorthand
    /// (`[1.0, 2.0]` → `8px 16px`). Without a unit the bare numbers are
    /// returned.
    pub fn resolve_spacing(&self, values: &[f64], unit: Option<&str>, kind: &str) -> Result<String> {
        let multiplier = self
            .spacings
            .get(kind)
            .ok_or_else(|| Error::UnknownSpacing(kind.to_string()))?;
        let unit = unit.unwrap_or("");

        Ok(values
            .iter()
            .map(|v| format!("{}{unit}", format_number(v * multiplier)))
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Resolve a `type.name` color key, optionally applying an alpha channel.
    ///
    /// With an alpha the color must be a hex color; the result is
    /// `#rrggbbaa`.
    pub fn resolve_color(&self, key: &str, alpha: Option<f64>) -> Result<String> {
        let (color_type, name) = key
            .split_once('.')
            .ok_or_else(|| Error::UnknownColor(key.to_string()))?;
        let color = self
            .colors
            .get(color_type)
            .and_then(|palette| palette.get(name))
            .ok_or_else(|| Error::UnknownColor(key.to_string()))?;

        match alpha {
            Some(alpha) => hex_with_alpha(color, alpha),
            None => Ok(color.clone()),
        }
    }

    /// Style object for a named font.
    pub fn resolve_font(&self, name: &str) -> Result<Interpolation> {
        let font = self
            .fonts
            .get(name)
            .ok_or_else(|| Error::UnknownFont(name.to_string()))?;

        let px = |v: f64| Interpolation::from(format!("{}px", format_number(v)));
        Ok(Interpolation::object([
            ("fontFamily", font.family.clone().into()),
            ("fontSize", px(font.size)),
            ("fontWeight", font.weight.map(f64::from).into()),
            ("lineHeight", font.line_height.map(px).into()),
            ("letterSpacing", font.letter_spacing.map(px).into()),
        ]))
    }

    /// Dimension value by name.
    pub fn resolve_dimension(&self, name: &str) -> Result<String> {
        self.dimensions
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownDimension(name.to_string()))
    }
}

/// Convert `#rgb` / `#rrggbb` to `#rrggbbaa`.
pub fn hex_with_alpha(hex: &str, alpha: f64) -> Result<String> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(Error::InvalidAlpha(alpha));
    }

    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| Error::InvalidHexColor(hex.to_string()))?;

    let full = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return Err(Error::InvalidHexColor(hex.to_string())),
    };

    let alpha_byte = (alpha * 255.0).round() as u8;
    Ok(format!("#{full}{alpha_byte:02x}"))
}
