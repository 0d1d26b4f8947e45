//! Style and variable metadata.
//!
//! Records are fetched by id through a [`MetadataProvider`] supplied by the
//! host. They are read-only and live for a single run.

use crate::error::Result;

/// Kind of a resolved metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    TextStyle,
    PaintStyle,
    Variable,
}

/// A resolved style or variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataRecord {
    TextStyle { name: Option<String> },
    PaintStyle { name: Option<String> },
    Variable { name: Option<String> },
}

impl MetadataRecord {
    pub fn text_style(name: impl Into<String>) -> Self {
        Self::TextStyle {
            name: Some(name.into()),
        }
    }

    pub fn paint_style(name: impl Into<String>) -> Self {
        Self::PaintStyle {
            name: Some(name.into()),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable {
            name: Some(name.into()),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::TextStyle { .. } => RecordKind::TextStyle,
            Self::PaintStyle { .. } => RecordKind::PaintStyle,
            Self::Variable { .. } => RecordKind::Variable,
        }
    }

    /// Token path, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Self::TextStyle { name } | Self::PaintStyle { name } | Self::Variable { name } => name,
        };
        name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Host capability for looking up styles and variables by id.
///
/// `Ok(None)` means not found. Errors are not fatal to a run; the
/// resolution cache turns them into unresolved entries.
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    async fn fetch_style(&self, id: &str) -> Result<Option<MetadataRecord>>;

    async fn fetch_variable(&self, id: &str) -> Result<Option<MetadataRecord>>;

    /// Whether variable lookup exists in this host at all.
    fn supports_variables(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_none() {
        let record = MetadataRecord::Variable {
            name: Some(String::new()),
        };
        assert_eq!(record.name(), None);
        assert_eq!(record.kind(), RecordKind::Variable);
    }

    #[test]
    fn test_name_and_kind() {
        let record = MetadataRecord::text_style("heading/large");
        assert_eq!(record.name(), Some("heading/large"));
        assert_eq!(record.kind(), RecordKind::TextStyle);
        assert_eq!(MetadataRecord::PaintStyle { name: None }.name(), None);
    }
}
