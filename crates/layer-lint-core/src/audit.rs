//! Audit Engine
//!
//! Checks that text classified by its style uses a color its category
//! allows. Elements classified by color are never passed in here.

use tracing::debug;

use crate::category::RuleIndex;
use crate::config::RuleConfig;
use crate::element::Element;
use crate::resolution::ResolutionCache;

pub struct AuditEngine<'a> {
    config: &'a RuleConfig,
    index: &'a RuleIndex,
    cache: &'a ResolutionCache,
}

impl<'a> AuditEngine<'a> {
    pub fn new(config: &'a RuleConfig, index: &'a RuleIndex, cache: &'a ResolutionCache) -> Self {
        Self {
            config,
            index,
            cache,
        }
    }

    /// Whether `element`'s color is allowed for `category`.
    ///
    /// An element with no resolvable color is not compliant.
    pub fn is_compliant(&self, element: &Element, category: &str) -> bool {
        let Some(color) = self.cache.color_name(element) else {
            debug!(id = %element.id, "no resolvable color");
            return false;
        };
        if self.config.is_always_allowed(color) {
            return true;
        }
        self.index
            .categories
            .get(category)
            .is_some_and(|entry| entry.allows(color))
    }

    /// Mismatched elements, in input order.
    pub fn audit<'e, I>(&self, staged: I) -> Vec<&'e Element>
    where
        I: IntoIterator<Item = (&'e Element, &'e str)>,
    {
        staged
            .into_iter()
            .filter(|(element, category)| !self.is_compliant(element, category))
            .map(|(element, _)| element)
            .collect()
    }
}
