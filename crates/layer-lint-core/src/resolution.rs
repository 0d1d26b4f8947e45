//! Resolution Cache
//!
//! Bulk, deduplicated lookup of the styles and variables a batch of
//! elements refers to. Everything is fetched up front, concurrently, and
//! the cache is complete before classification starts.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::element::Element;
use crate::error::Result;
use crate::metadata::{MetadataProvider, MetadataRecord};

/// Resolved metadata by id. `None` marks an id that could not be resolved.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    styles: HashMap<String, Option<MetadataRecord>>,
    variables: HashMap<String, Option<MetadataRecord>>,
}

impl ResolutionCache {
    /// Fetch every style and variable referenced by `elements`.
    pub async fn preload<P: MetadataProvider>(provider: &P, elements: &[&Element]) -> Self {
        let style_ids = unique_ids(
            elements
                .iter()
                .flat_map(|e| [e.text_style_id.as_deref(), e.fill_style_id.as_deref()]),
        );
        let variable_ids = unique_ids(
            elements
                .iter()
                .map(|e| e.bound_fill_variable_id.as_deref()),
        );

        let (styles, variables) = futures::join!(
            fetch_styles(provider, style_ids),
            fetch_variables(provider, variable_ids)
        );

        debug!(
            styles = styles.len(),
            variables = variables.len(),
            "metadata preloaded"
        );
        Self { styles, variables }
    }

    /// Resolved style, if any.
    pub fn style(&self, id: &str) -> Option<&MetadataRecord> {
        self.styles.get(id).and_then(Option::as_ref)
    }

    /// Resolved variable, if any.
    pub fn variable(&self, id: &str) -> Option<&MetadataRecord> {
        self.variables.get(id).and_then(Option::as_ref)
    }

    /// Name of the element's effective color: bound fill variable first,
    /// then fill style.
    pub fn color_name(&self, element: &Element) -> Option<&str> {
        element
            .bound_fill_variable_id
            .as_deref()
            .and_then(|id| self.variable(id))
            .and_then(MetadataRecord::name)
            .or_else(|| {
                element
                    .fill_style_id
                    .as_deref()
                    .and_then(|id| self.style(id))
                    .and_then(MetadataRecord::name)
            })
    }

    /// Number of distinct style ids looked up.
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Number of distinct variable ids looked up.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

/// Distinct non-empty ids in first-seen order.
fn unique_ids<'a>(ids: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.flatten()
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}

async fn fetch_styles<P: MetadataProvider>(
    provider: &P,
    ids: Vec<String>,
) -> HashMap<String, Option<MetadataRecord>> {
    let fetches = ids.into_iter().map(|id| async move {
        let result = provider.fetch_style(&id).await;
        let record = settle(&id, result);
        (id, record)
    });
    join_all(fetches).await.into_iter().collect()
}

async fn fetch_variables<P: MetadataProvider>(
    provider: &P,
    ids: Vec<String>,
) -> HashMap<String, Option<MetadataRecord>> {
    if !provider.supports_variables() {
        debug!(count = ids.len(), "variable lookup unavailable");
        return ids.into_iter().map(|id| (id, None)).collect();
    }

    let fetches = ids.into_iter().map(|id| async move {
        let result = provider.fetch_variable(&id).await;
        let record = settle(&id, result);
        (id, record)
    });
    join_all(fetches).await.into_iter().collect()
}

fn settle(id: &str, result: Result<Option<MetadataRecord>>) -> Option<MetadataRecord> {
    match result {
        Ok(record) => record,
        Err(e) => {
            warn!(id, error = %e, "metadata lookup failed");
            None
        }
    }
}
