//! Classification Resolver
//!
//! Decides the category of a text element. The text style name is tried
//! first; only when it yields nothing is the element's color looked up in
//! the color index.

use serde::Serialize;
use tracing::{debug, warn};

use crate::element::{Element, Renamer};
use crate::metadata::MetadataRecord;
use crate::resolution::ResolutionCache;

use super::index::RuleIndex;

/// How a category was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMethod {
    TextStyle,
    ColorFallback,
    Unclassified,
}

/// Category decision for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// From the text style name. Subject to the color audit.
    TextStyle { category: String },
    /// From the color itself, so compliant by construction. Never audited.
    ColorFallback { category: String },
    Unclassified,
}

impl Classification {
    pub fn method(&self) -> ClassificationMethod {
        match self {
            Self::TextStyle { .. } => ClassificationMethod::TextStyle,
            Self::ColorFallback { .. } => ClassificationMethod::ColorFallback,
            Self::Unclassified => ClassificationMethod::Unclassified,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Self::TextStyle { category } | Self::ColorFallback { category } => Some(category),
            Self::Unclassified => None,
        }
    }
}

/// Classification of one element, as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub element_id: String,
    pub category: Option<String>,
    pub method: ClassificationMethod,
}

impl ClassificationResult {
    pub fn new(element: &Element, classification: &Classification) -> Self {
        Self {
            element_id: element.id.clone(),
            category: classification.category().map(str::to_string),
            method: classification.method(),
        }
    }
}

/// Category resolver over a prebuilt index and a filled cache.
pub struct ClassificationResolver<'a> {
    index: &'a RuleIndex,
    cache: &'a ResolutionCache,
}

impl<'a> ClassificationResolver<'a> {
    pub fn new(index: &'a RuleIndex, cache: &'a ResolutionCache) -> Self {
        Self { index, cache }
    }

    pub fn classify(&self, element: &Element) -> Classification {
        if let Some(category) = self.by_text_style(element) {
            return Classification::TextStyle {
                category: category.to_string(),
            };
        }
        if let Some(category) = self.by_color(element) {
            return Classification::ColorFallback {
                category: category.to_string(),
            };
        }
        Classification::Unclassified
    }

    /// First segment of the text style name, if it is a known category.
    fn by_text_style(&self, element: &Element) -> Option<&'a str> {
        let style = self.cache.style(element.text_style_id.as_deref()?)?;
        let head = text_style_name(style)?.split('/').next()?;
        self.index
            .categories
            .keys()
            .iter()
            .find(|k| k.as_str() == head)
            .map(String::as_str)
    }

    fn by_color(&self, element: &Element) -> Option<&'a str> {
        let color = self.cache.color_name(element)?;
        self.index.colors.category_for(color)
    }

    /// Target name for a category.
    pub fn target_name(&self, category: &str) -> Option<&'a str> {
        self.index
            .categories
            .get(category)
            .map(|e| e.new_name.as_str())
    }
}

/// Rename `element` unless it already carries `new_name`.
///
/// Returns whether a rename happened. Rejections are logged and dropped.
pub fn apply_name<R: Renamer>(element: &mut Element, new_name: &str, renamer: &mut R) -> bool {
    if element.name == new_name {
        return false;
    }
    match renamer.rename(element, new_name) {
        Ok(()) => {
            debug!(id = %element.id, from = %element.name, to = new_name, "renamed");
            element.name = new_name.to_string();
            true
        }
        Err(e) => {
            warn!(id = %element.id, error = %e, "rename rejected");
            false
        }
    }
}

/// Name of a text style record, ignoring other kinds.
pub fn text_style_name(record: &MetadataRecord) -> Option<&str> {
    match record {
        MetadataRecord::TextStyle { .. } => record.name(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::error::{LayerLintError, Result};
    use crate::metadata::MetadataProvider;
    use futures::executor::block_on;
    use std::collections::HashMap;

    struct MapProvider {
        styles: HashMap<&'static str, MetadataRecord>,
        variables: HashMap<&'static str, MetadataRecord>,
    }

    impl MetadataProvider for MapProvider {
        async fn fetch_style(&self, id: &str) -> Result<Option<MetadataRecord>> {
            Ok(self.styles.get(id).cloned())
        }

        async fn fetch_variable(&self, id: &str) -> Result<Option<MetadataRecord>> {
            Ok(self.variables.get(id).cloned())
        }
    }

    struct Locked;

    impl Renamer for Locked {
        fn rename(&mut self, element: &Element, _new_name: &str) -> Result<()> {
            Err(LayerLintError::RenameRejected {
                id: element.id.clone(),
                reason: "locked".to_string(),
            })
        }
    }

    struct Accept;

    impl Renamer for Accept {
        fn rename(&mut self, _element: &Element, _new_name: &str) -> Result<()> {
            Ok(())
        }
    }

    fn provider() -> MapProvider {
        MapProvider {
            styles: [
                ("S:heading", MetadataRecord::text_style("heading/large")),
                ("S:unknown", MetadataRecord::text_style("display/xl")),
                ("S:paint", MetadataRecord::paint_style("heading/paint")),
                (
                    "S:fill-body",
                    MetadataRecord::paint_style("colors/content/text/regular/body"),
                ),
            ]
            .into_iter()
            .collect(),
            variables: [(
                "V:title",
                MetadataRecord::variable("colors/content/text/inverse/title"),
            )]
            .into_iter()
            .collect(),
        }
    }

    fn classify_all(elements: &[Element]) -> Vec<Classification> {
        let index = RuleIndex::from_config(&RuleConfig::default());
        let refs: Vec<_> = elements.iter().collect();
        let cache = block_on(ResolutionCache::preload(&provider(), &refs));
        let resolver = ClassificationResolver::new(&index, &cache);
        elements.iter().map(|e| resolver.classify(e)).collect()
    }

    #[test]
    fn test_text_style_wins() {
        let results = classify_all(&[Element::text("1", "t")
            .with_text_style("S:heading")
            .with_fill_variable("V:title")]);
        assert_eq!(
            results[0],
            Classification::TextStyle {
                category: "heading".into()
            }
        );
    }

    #[test]
    fn test_color_fallback_variable_then_style() {
        let results = classify_all(&[
            Element::text("1", "t").with_fill_variable("V:title"),
            Element::text("2", "t").with_fill_style("S:fill-body"),
            Element::text("3", "t")
                .with_text_style("S:unknown")
                .with_fill_style("S:fill-body"),
        ]);
        assert_eq!(results[0].method(), ClassificationMethod::ColorFallback);
        assert_eq!(results[0].category(), Some("title"));
        assert_eq!(results[1].category(), Some("body"));
        assert_eq!(results[2].method(), ClassificationMethod::ColorFallback);
    }

    #[test]
    fn test_non_text_style_is_ignored() {
        let results = classify_all(&[Element::text("1", "t").with_text_style("S:paint")]);
        assert_eq!(results[0], Classification::Unclassified);
    }

    #[test]
    fn test_nothing_matches() {
        let results = classify_all(&[
            Element::text("1", "t"),
            Element::text("2", "t").with_text_style("S:missing"),
            Element::text("3", "t").with_text_style("S:unknown"),
        ]);
        assert!(results.iter().all(|c| *c == Classification::Unclassified));
        assert_eq!(results[0].category(), None);
    }

    #[test]
    fn test_apply_name() {
        let mut element = Element::text("1", "Label");
        assert!(!apply_name(&mut element, "Label", &mut Accept));
        assert!(!apply_name(&mut element, "body-text", &mut Locked));
        assert_eq!(element.name, "Label");
        assert!(apply_name(&mut element, "body-text", &mut Accept));
        assert_eq!(element.name, "body-text");
    }

    #[test]
    fn test_text_style_name() {
        assert_eq!(
            text_style_name(&MetadataRecord::text_style("body/s")),
            Some("body/s")
        );
        assert_eq!(text_style_name(&MetadataRecord::variable("body/s")), None);
    }
}
