pub mod audit;
pub mod category;
pub mod config;
pub mod element;
pub mod error;
pub mod metadata;
pub mod orchestrator;
pub mod resolution;
pub mod snapshot;
pub mod summary;

pub use audit::AuditEngine;
pub use category::{
    CategoryEntry, CategoryMapping, Classification, ClassificationMethod, ClassificationResolver,
    ClassificationResult, ColorIndex, RuleIndex,
};
pub use config::{
    normalize_config, AllowedColor, ColorPaths, PathType, RenameRule, RuleConfig, CONFIG_KEY,
};
pub use element::{BoundFills, Element, NodeKind, Renamer};
pub use error::{LayerLintError, Result};
pub use metadata::{MetadataProvider, MetadataRecord, RecordKind};
pub use orchestrator::{is_default_frame_name, AuditReport, Orchestrator, RunState};
pub use resolution::ResolutionCache;
pub use snapshot::{DocumentSnapshot, NodeSnapshot, SnapshotProvider, SnapshotRenamer};
pub use summary::{plural, Outcome, Summary};
