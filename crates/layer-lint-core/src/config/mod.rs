//! # Config Module
//!
//! Rule configuration for the rename and color audit.
//!
//! - `defaults`: builtin categories, color paths and state colors
//! - `normalize`: repairs an arbitrary persisted value into a [`RuleConfig`]
//! - `store`: `config.toml` persistence under a versioned key
//!
//! ```rust
//! use layer_lint_core::config::{normalize_config, RuleConfig};
//!
//! let raw = serde_json::json!({ "frameLayerName": "  cell  " });
//! let config = normalize_config(Some(&raw));
//! assert_eq!(config.frame_layer_name, "cell");
//! assert_eq!(config.rename_rules, RuleConfig::default().rename_rules);
//! ```

mod defaults;
mod normalize;
mod store;

use serde::{Deserialize, Serialize};

pub use defaults::{
    default_always_allowed, default_color_paths, default_rename_rules, BuiltinCategory,
    BUILTIN_CATEGORIES, DEFAULT_ALWAYS_ALLOWED, DEFAULT_BRAND_PATH, DEFAULT_FRAME_LAYER_NAME,
    DEFAULT_INVERSE_PATH, DEFAULT_REGULAR_PATH,
};
pub use normalize::{normalize_config, normalize_path, normalize_prefix};
pub use store::{CONFIG_FILE, CONFIG_KEY};

/// Canonical rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Label for frames named "Frame" / "Frame N"
    pub frame_layer_name: String,
    pub color_paths: ColorPaths,
    /// Ordered; paths are unique (case-insensitive)
    pub rename_rules: Vec<RenameRule>,
    /// Colors that never count as a mismatch
    pub always_allowed_colors: Vec<AllowedColor>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            frame_layer_name: DEFAULT_FRAME_LAYER_NAME.to_string(),
            color_paths: default_color_paths(),
            rename_rules: default_rename_rules(),
            always_allowed_colors: default_always_allowed(),
        }
    }
}

impl RuleConfig {
    /// Re-run normalization over this config.
    pub fn normalized(&self) -> Self {
        match serde_json::to_value(self) {
            Ok(value) => normalize_config(Some(&value)),
            Err(_) => Self::default(),
        }
    }

    pub fn is_always_allowed(&self, color: &str) -> bool {
        self.always_allowed_colors.iter().any(|c| c.color == color)
    }
}

/// Color path prefixes, always ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPaths {
    pub regular: String,
    pub inverse: String,
    pub brand: String,
}

impl ColorPaths {
    pub fn prefix(&self, path_type: PathType) -> &str {
        match path_type {
            PathType::Regular => &self.regular,
            PathType::Inverse => &self.inverse,
            PathType::Brand => &self.brand,
        }
    }
}

/// Color path family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    Regular,
    Inverse,
    Brand,
}

impl PathType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Some(Self::Regular),
            "inverse" => Some(Self::Inverse),
            "brand" => Some(Self::Brand),
            _ => None,
        }
    }
}

/// Rename text whose category is the final segment of `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRule {
    pub new_name: String,
    /// Full color token path, no trailing slash
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedColor {
    pub name: String,
    pub color: String,
}
