//! Orchestrator
//!
//! Runs the whole batch once: frame renames, text classification and
//! renames, then the color audit. Produces an [`AuditReport`] and performs
//! no UI actions itself.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::audit::AuditEngine;
use crate::category::{
    apply_name, Classification, ClassificationResolver, ClassificationResult, RuleIndex,
};
use crate::config::RuleConfig;
use crate::element::{Element, NodeKind, Renamer};
use crate::metadata::MetadataProvider;
use crate::resolution::ResolutionCache;

// ASCII digits only; `\d` would also match other scripts
static DEFAULT_FRAME_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Frame( [0-9]+)?$").expect("valid frame name pattern"));

/// Whether a frame still carries a host-generated name.
pub fn is_default_frame_name(name: &str) -> bool {
    DEFAULT_FRAME_NAME_RE.is_match(name)
}

/// Aggregate result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Elements handed to the run
    pub selection_size: usize,
    /// Text elements among them
    pub text_candidates: usize,
    pub text_renamed: usize,
    pub frames_renamed: usize,
    /// Style-classified text handed to the color audit
    pub audited: usize,
    /// Style-classified text whose color is not allowed, in input order
    pub mismatched: Vec<Element>,
    pub classifications: Vec<ClassificationResult>,
}

impl AuditReport {
    fn empty(selection_size: usize) -> Self {
        Self {
            selection_size,
            text_candidates: 0,
            text_renamed: 0,
            frames_renamed: 0,
            audited: 0,
            mismatched: Vec::new(),
            classifications: Vec::new(),
        }
    }

    /// Ids of mismatched elements, for host selection.
    pub fn mismatched_ids(&self) -> Vec<&str> {
        self.mismatched.iter().map(|e| e.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Ready,
    Completed,
}

/// Single-shot pipeline over one batch of elements.
pub struct Orchestrator<P> {
    config: RuleConfig,
    index: RuleIndex,
    provider: P,
    state: RunState,
}

impl<P: MetadataProvider> Orchestrator<P> {
    pub fn new(config: RuleConfig, provider: P) -> Self {
        let index = RuleIndex::from_config(&config);
        Self {
            config,
            index,
            provider,
            state: RunState::Ready,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the pipeline. Returns `None` if this orchestrator already ran.
    pub async fn run<R: Renamer>(
        &mut self,
        elements: &mut [Element],
        renamer: &mut R,
    ) -> Option<AuditReport> {
        if self.state == RunState::Completed {
            debug!("run already completed, ignoring");
            return None;
        }
        self.state = RunState::Completed;

        let mut report = AuditReport::empty(elements.len());
        if elements.is_empty() {
            return Some(report);
        }

        report.frames_renamed = self.rename_frames(elements, renamer);

        let text_indices: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_text())
            .map(|(i, _)| i)
            .collect();
        report.text_candidates = text_indices.len();
        if text_indices.is_empty() {
            return Some(report);
        }

        let cache = {
            let texts: Vec<&Element> = text_indices.iter().map(|&i| &elements[i]).collect();
            ResolutionCache::preload(&self.provider, &texts).await
        };

        let resolver = ClassificationResolver::new(&self.index, &cache);
        let mut staged: Vec<(usize, String)> = Vec::new();

        for &i in &text_indices {
            let classification = resolver.classify(&elements[i]);
            report
                .classifications
                .push(ClassificationResult::new(&elements[i], &classification));

            let Some(category) = classification.category() else {
                continue;
            };
            if let Some(new_name) = resolver.target_name(category) {
                if apply_name(&mut elements[i], new_name, renamer) {
                    report.text_renamed += 1;
                }
            }
            if let Classification::TextStyle { category } = classification {
                staged.push((i, category));
            }
        }

        report.audited = staged.len();
        let engine = AuditEngine::new(&self.config, &self.index, &cache);
        report.mismatched = engine
            .audit(staged.iter().map(|(i, c)| (&elements[*i], c.as_str())))
            .into_iter()
            .cloned()
            .collect();

        info!(
            text_renamed = report.text_renamed,
            frames_renamed = report.frames_renamed,
            mismatched = report.mismatched.len(),
            "run complete"
        );
        Some(report)
    }

    fn rename_frames<R: Renamer>(&self, elements: &mut [Element], renamer: &mut R) -> usize {
        let label = self.config.frame_layer_name.as_str();
        let mut renamed = 0;
        for element in elements.iter_mut() {
            if element.kind == NodeKind::Frame
                && is_default_frame_name(&element.name)
                && apply_name(element, label, renamer)
            {
                renamed += 1;
            }
        }
        renamed
    }
}
