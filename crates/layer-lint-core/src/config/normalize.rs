//! Config Normalizer
//!
//! Turns whatever was persisted (possibly nothing, possibly garbage) into a
//! canonical [`RuleConfig`]. Each field falls back to its builtin default
//! independently. Never fails.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::defaults::{
    default_always_allowed, default_color_paths, default_rename_rules, DEFAULT_BRAND_PATH,
    DEFAULT_FRAME_LAYER_NAME, DEFAULT_INVERSE_PATH, DEFAULT_REGULAR_PATH,
};
use super::{AllowedColor, ColorPaths, PathType, RenameRule, RuleConfig};

/// Normalize a raw persisted configuration.
pub fn normalize_config(raw: Option<&Value>) -> RuleConfig {
    let Some(obj) = raw.and_then(Value::as_object) else {
        return RuleConfig::default();
    };

    RuleConfig {
        frame_layer_name: non_empty_str(obj.get("frameLayerName"))
            .unwrap_or_else(|| DEFAULT_FRAME_LAYER_NAME.to_string()),
        color_paths: normalize_color_paths(obj.get("colorPaths")),
        rename_rules: normalize_rename_rules(obj.get("renameRules")),
        always_allowed_colors: normalize_allowed_colors(obj.get("alwaysAllowedColors")),
    }
}

/// Trim and strip trailing slashes from a token path.
pub fn normalize_path(path: &str) -> Option<String> {
    let trimmed = path
        .trim()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim a path prefix and make it end in exactly one slash.
pub fn normalize_prefix(prefix: &str) -> Option<String> {
    normalize_path(prefix).map(|p| format!("{p}/"))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn normalize_color_paths(value: Option<&Value>) -> ColorPaths {
    let Some(obj) = value.and_then(Value::as_object) else {
        return default_color_paths();
    };

    let prefix = |key: &str, fallback: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .and_then(normalize_prefix)
            .unwrap_or_else(|| fallback.to_string())
    };

    ColorPaths {
        regular: prefix("regular", DEFAULT_REGULAR_PATH),
        inverse: prefix("inverse", DEFAULT_INVERSE_PATH),
        brand: prefix("brand", DEFAULT_BRAND_PATH),
    }
}

fn normalize_rename_rules(value: Option<&Value>) -> Vec<RenameRule> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return default_rename_rules();
    };

    let mut seen = HashSet::new();
    let rules: Vec<RenameRule> = entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(rule_from_entry)
        .filter(|rule| seen.insert(rule.path.to_lowercase()))
        .collect();

    if rules.is_empty() {
        return default_rename_rules();
    }
    rules
}

/// Canonical `{newName, path}` or legacy `{category, pathType}`.
fn rule_from_entry(entry: &Map<String, Value>) -> Option<RenameRule> {
    let new_name = non_empty_str(entry.get("newName"));

    if let Some(path) = entry
        .get("path")
        .and_then(Value::as_str)
        .and_then(normalize_path)
    {
        return new_name.map(|new_name| RenameRule { new_name, path });
    }

    let category = non_empty_str(entry.get("category"))?;
    let category = category.trim_matches('/');
    if category.is_empty() {
        return None;
    }
    let path_type = entry
        .get("pathType")
        .and_then(Value::as_str)
        .and_then(PathType::parse)?;
    let path = normalize_path(&format!(
        "{}{}",
        default_color_paths().prefix(path_type),
        category
    ))?;

    Some(RenameRule {
        new_name: new_name.unwrap_or_else(|| format!("{category}-text")),
        path,
    })
}

fn normalize_allowed_colors(value: Option<&Value>) -> Vec<AllowedColor> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return default_always_allowed();
    };

    let mut seen = HashSet::new();
    let colors: Vec<AllowedColor> = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(color) => normalize_path(color).map(|color| AllowedColor {
                name: last_segment(&color).to_string(),
                color,
            }),
            Value::Object(obj) => {
                let color = obj
                    .get("color")
                    .and_then(Value::as_str)
                    .and_then(normalize_path)?;
                let name = non_empty_str(obj.get("name"))
                    .unwrap_or_else(|| last_segment(&color).to_string());
                Some(AllowedColor { name, color })
            }
            _ => None,
        })
        .filter(|c| seen.insert(c.color.to_lowercase()))
        .collect();

    // `[]` is an explicit opt-out; a list of nothing but junk is not
    if colors.is_empty() && !entries.is_empty() {
        return default_always_allowed();
    }
    colors
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_config_is_default() {
        assert_eq!(normalize_config(None), RuleConfig::default());
        assert_eq!(normalize_config(Some(&json!("nope"))), RuleConfig::default());
        assert_eq!(normalize_config(Some(&json!([1, 2]))), RuleConfig::default());
    }

    #[test]
    fn test_field_by_field_fallback() {
        let raw = json!({
            "frameLayerName": "   ",
            "colorPaths": { "regular": "tokens/fg", "inverse": 42 },
            "renameRules": "not a list",
        });
        let config = normalize_config(Some(&raw));
        assert_eq!(config.frame_layer_name, DEFAULT_FRAME_LAYER_NAME);
        assert_eq!(config.color_paths.regular, "tokens/fg/");
        assert_eq!(config.color_paths.inverse, DEFAULT_INVERSE_PATH);
        assert_eq!(config.color_paths.brand, DEFAULT_BRAND_PATH);
        assert_eq!(config.rename_rules, default_rename_rules());
        assert_eq!(config.always_allowed_colors, default_always_allowed());
    }

    #[test]
    fn test_prefix_trailing_slashes_collapse() {
        assert_eq!(normalize_prefix(" a/b/// ").as_deref(), Some("a/b/"));
        assert_eq!(normalize_prefix("///"), None);
        assert_eq!(normalize_path("a/b/").as_deref(), Some("a/b"));
    }

    #[test]
    fn test_rules_drop_invalid_and_duplicates() {
        let raw = json!({
            "renameRules": [
                { "newName": "heading-text", "path": "c/regular/heading/" },
                { "newName": "", "path": "c/regular/title" },
                { "newName": "body-text", "path": "  " },
                { "newName": "other", "path": "C/Regular/Heading" },
                "garbage",
                { "newName": "body-text", "path": "c/regular/body" },
            ]
        });
        let config = normalize_config(Some(&raw));
        assert_eq!(
            config.rename_rules,
            vec![
                RenameRule {
                    new_name: "heading-text".into(),
                    path: "c/regular/heading".into()
                },
                RenameRule {
                    new_name: "body-text".into(),
                    path: "c/regular/body".into()
                },
            ]
        );
    }

    #[test]
    fn test_all_rules_invalid_falls_back() {
        let raw = json!({ "renameRules": [ { "newName": "x" } ] });
        assert_eq!(normalize_config(Some(&raw)).rename_rules, default_rename_rules());
    }

    #[test]
    fn test_legacy_rule_shape() {
        let raw = json!({
            "colorPaths": { "brand": "custom/brand/" },
            "renameRules": [
                { "category": "title", "pathType": "inverse" },
                { "category": "highlighted", "pathType": "Brand", "newName": "hl" },
                { "category": "body", "pathType": "sideways" },
            ]
        });
        let rules = normalize_config(Some(&raw)).rename_rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].path, "colors/content/text/inverse/title");
        assert_eq!(rules[0].new_name, "title-text");
        // legacy rules always use the builtin prefixes
        assert_eq!(rules[1].path, "colors/content/text/brand/highlighted");
        assert_eq!(rules[1].new_name, "hl");
    }

    #[test]
    fn test_allowed_colors() {
        let raw = json!({
            "alwaysAllowedColors": [
                { "name": "Error", "color": "colors/state/error/" },
                "colors/state/ERROR",
                "colors/state/warning",
                { "name": "no color" },
                7,
            ]
        });
        let allowed = normalize_config(Some(&raw)).always_allowed_colors;
        assert_eq!(
            allowed,
            vec![
                AllowedColor {
                    name: "Error".into(),
                    color: "colors/state/error".into()
                },
                AllowedColor {
                    name: "warning".into(),
                    color: "colors/state/warning".into()
                },
            ]
        );
    }

    #[test]
    fn test_empty_allowed_list_is_kept() {
        let raw = json!({ "alwaysAllowedColors": [] });
        assert!(normalize_config(Some(&raw)).always_allowed_colors.is_empty());
    }

    #[test]
    fn test_all_allowed_invalid_falls_back() {
        for raw in [
            json!({ "alwaysAllowedColors": [7] }),
            json!({ "alwaysAllowedColors": [{ "name": "x" }, "  ", null] }),
        ] {
            assert_eq!(
                normalize_config(Some(&raw)).always_allowed_colors,
                default_always_allowed()
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            json!(null),
            json!({}),
            json!({
                "frameLayerName": " row ",
                "colorPaths": { "regular": "x//", "inverse": "y", "brand": "" },
                "renameRules": [
                    { "category": "caption", "pathType": "regular" },
                    { "newName": "a", "path": "x/a///" },
                    { "newName": "b", "path": "X/A" },
                ],
                "alwaysAllowedColors": [ "s/ok/", { "name": "S", "color": "s/OK" } ],
            }),
        ];
        for raw in &inputs {
            let once = normalize_config(Some(raw));
            let twice = once.normalized();
            assert_eq!(once, twice, "not idempotent for {raw}");
        }
    }
}
