//! Rule Index
//!
//! Lookup tables derived from the rename rules: category key → target name
//! and allowed colors, and color path → category key. Built once per run
//! and never modified.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::{RenameRule, RuleConfig};

/// Target name and allowed colors for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub new_name: String,
    /// Every color path declared for the category, first-seen order
    pub color: Vec<String>,
}

impl CategoryEntry {
    pub fn allows(&self, color: &str) -> bool {
        self.color.iter().any(|c| c == color)
    }
}

/// Category key → entry.
#[derive(Debug, Clone, Default)]
pub struct CategoryMapping {
    entries: HashMap<String, CategoryEntry>,
    order: Vec<String>,
}

impl CategoryMapping {
    pub fn get(&self, key: &str) -> Option<&CategoryEntry> {
        self.entries.get(key)
    }

    /// Category keys in first-seen order
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryEntry)> {
        self.order
            .iter()
            .filter_map(|k| self.entries.get(k).map(|e| (k.as_str(), e)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Full color path → category key.
#[derive(Debug, Clone, Default)]
pub struct ColorIndex {
    by_path: HashMap<String, String>,
}

impl ColorIndex {
    pub fn category_for(&self, color: &str) -> Option<&str> {
        self.by_path.get(color).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

/// Both lookup tables for one configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    pub categories: CategoryMapping,
    pub colors: ColorIndex,
}

impl RuleIndex {
    /// Build from rename rules.
    ///
    /// - A repeated category takes the `newName` of its last rule
    /// - Color paths of a repeated category accumulate
    pub fn build(rules: &[RenameRule]) -> Self {
        let mut categories = CategoryMapping::default();
        let mut colors = ColorIndex::default();

        for rule in rules {
            let Some(key) = category_key(&rule.path) else {
                continue;
            };

            match categories.entries.get_mut(key) {
                Some(entry) => {
                    entry.new_name = rule.new_name.clone();
                    if !entry.allows(&rule.path) {
                        entry.color.push(rule.path.clone());
                    }
                }
                None => {
                    categories.order.push(key.to_string());
                    categories.entries.insert(
                        key.to_string(),
                        CategoryEntry {
                            new_name: rule.new_name.clone(),
                            color: vec![rule.path.clone()],
                        },
                    );
                }
            }

            colors
                .by_path
                .entry(rule.path.clone())
                .or_insert_with(|| key.to_string());
        }

        Self { categories, colors }
    }

    pub fn from_config(config: &RuleConfig) -> Self {
        Self::build(&config.rename_rules)
    }
}

/// Last non-empty `/`-delimited segment.
pub fn category_key(path: &str) -> Option<&str> {
    path.rsplit('/').find(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(new_name: &str, path: &str) -> RenameRule {
        RenameRule {
            new_name: new_name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_category_key() {
        assert_eq!(category_key("colors/content/text/regular/heading"), Some("heading"));
        assert_eq!(category_key("heading//"), Some("heading"));
        assert_eq!(category_key("solo"), Some("solo"));
        assert_eq!(category_key("//"), None);
    }

    #[test]
    fn test_duplicate_category_merges_colors() {
        let index = RuleIndex::build(&[
            rule("title-a", "c/regular/title"),
            rule("body-text", "c/regular/body"),
            rule("title-b", "c/inverse/title"),
        ]);

        let title = index.categories.get("title").unwrap();
        assert_eq!(title.new_name, "title-b");
        assert_eq!(title.color, vec!["c/regular/title", "c/inverse/title"]);
        assert_eq!(index.categories.keys(), ["title", "body"]);

        assert_eq!(index.colors.category_for("c/inverse/title"), Some("title"));
        assert_eq!(index.colors.category_for("c/regular/body"), Some("body"));
        assert_eq!(index.colors.category_for("c/regular"), None);
    }

    #[test]
    fn test_every_key_is_a_final_segment_and_no_path_lost() {
        let config = RuleConfig::default();
        let index = RuleIndex::from_config(&config);

        for key in index.categories.keys() {
            assert!(
                config
                    .rename_rules
                    .iter()
                    .any(|r| category_key(&r.path) == Some(key.as_str())),
                "{key} is not the final segment of any rule"
            );
        }
        for r in &config.rename_rules {
            let key = category_key(&r.path).unwrap();
            assert!(index.categories.get(key).unwrap().allows(&r.path));
            assert_eq!(index.colors.category_for(&r.path), Some(key));
        }
        assert_eq!(index.categories.len(), 8);
        assert_eq!(index.colors.len(), 16);
    }

    #[test]
    fn test_empty_rules() {
        let index = RuleIndex::build(&[]);
        assert!(index.categories.is_empty());
        assert!(index.colors.is_empty());
        assert_eq!(index.categories.iter().count(), 0);
    }
}
