//! Builtin Rule Defaults
//!
//! Values used whenever the persisted configuration is missing a field
//! or carries one that cannot be repaired.

use super::{AllowedColor, ColorPaths, PathType, RenameRule};

/// Label applied to generically named frames.
pub const DEFAULT_FRAME_LAYER_NAME: &str = "item";

pub const DEFAULT_REGULAR_PATH: &str = "colors/content/text/regular/";
pub const DEFAULT_INVERSE_PATH: &str = "colors/content/text/inverse/";
pub const DEFAULT_BRAND_PATH: &str = "colors/content/text/brand/";

/// Builtin text categories, in rule order.
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "heading",
        new_name: "heading-text",
        path_types: &[PathType::Regular, PathType::Inverse],
    },
    BuiltinCategory {
        name: "title",
        new_name: "title-text",
        path_types: &[PathType::Regular, PathType::Inverse],
    },
    BuiltinCategory {
        name: "subtitle",
        new_name: "subtitle-text",
        path_types: &[PathType::Regular, PathType::Inverse],
    },
    BuiltinCategory {
        name: "body",
        new_name: "body-text",
        path_types: &[PathType::Regular, PathType::Inverse],
    },
    BuiltinCategory {
        name: "highlighted",
        new_name: "highlighted-text",
        path_types: &[PathType::Brand, PathType::Inverse],
    },
    BuiltinCategory {
        name: "info",
        new_name: "info-text",
        path_types: &[PathType::Regular, PathType::Inverse],
    },
    BuiltinCategory {
        name: "caption",
        new_name: "caption-text",
        path_types: &[PathType::Regular, PathType::Inverse],
    },
    BuiltinCategory {
        name: "overline",
        new_name: "overline-text",
        path_types: &[PathType::Regular, PathType::Inverse],
    },
];

/// State colors that are never a mismatch, as `(name, color)`.
pub const DEFAULT_ALWAYS_ALLOWED: &[(&str, &str)] = &[
    ("Info", "colors/state/info"),
    ("Success", "colors/state/success"),
    ("Warning", "colors/state/warning"),
    ("Error", "colors/state/error"),
    ("Disabled", "colors/content/text/regular/disabled"),
];

/// Static definition of a builtin category.
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// Category key (final path segment of its color tokens)
    pub name: &'static str,
    /// Layer name applied to matching text
    pub new_name: &'static str,
    /// Color path families the category may use
    pub path_types: &'static [PathType],
}

impl BuiltinCategory {
    /// Expand into one rename rule per allowed path family.
    pub fn rules(&self, paths: &ColorPaths) -> Vec<RenameRule> {
        self.path_types
            .iter()
            .map(|pt| RenameRule {
                new_name: self.new_name.to_string(),
                path: format!("{}{}", paths.prefix(*pt), self.name),
            })
            .collect()
    }
}

pub fn default_color_paths() -> ColorPaths {
    ColorPaths {
        regular: DEFAULT_REGULAR_PATH.to_string(),
        inverse: DEFAULT_INVERSE_PATH.to_string(),
        brand: DEFAULT_BRAND_PATH.to_string(),
    }
}

pub fn default_rename_rules() -> Vec<RenameRule> {
    let paths = default_color_paths();
    BUILTIN_CATEGORIES
        .iter()
        .flat_map(|c| c.rules(&paths))
        .collect()
}

pub fn default_always_allowed() -> Vec<AllowedColor> {
    DEFAULT_ALWAYS_ALLOWED
        .iter()
        .map(|(name, color)| AllowedColor {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories_exist() {
        assert_eq!(BUILTIN_CATEGORIES.len(), 8);
        assert!(BUILTIN_CATEGORIES.iter().any(|c| c.name == "heading"));
        assert!(BUILTIN_CATEGORIES.iter().any(|c| c.name == "overline"));
    }

    #[test]
    fn test_default_rules_two_per_category() {
        let rules = default_rename_rules();
        assert_eq!(rules.len(), BUILTIN_CATEGORIES.len() * 2);
        assert_eq!(rules[0].path, "colors/content/text/regular/heading");
        assert_eq!(rules[1].path, "colors/content/text/inverse/heading");
        assert_eq!(rules[0].new_name, "heading-text");
    }

    #[test]
    fn test_highlighted_uses_brand() {
        let rules = default_rename_rules();
        let highlighted: Vec<_> = rules
            .iter()
            .filter(|r| r.new_name == "highlighted-text")
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(
            highlighted,
            vec![
                "colors/content/text/brand/highlighted",
                "colors/content/text/inverse/highlighted"
            ]
        );
    }
}
