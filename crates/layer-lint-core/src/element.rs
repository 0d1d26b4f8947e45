//! Candidate elements and the host rename capability.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Node type, as far as the engine cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Text,
    Frame,
    Other,
}

impl NodeKind {
    /// Parse a host node type (`"TEXT"`, `"FRAME"`, ...).
    pub fn from_host(node_type: &str) -> Self {
        match node_type {
            "TEXT" => Self::Text,
            "FRAME" => Self::Frame,
            _ => Self::Other,
        }
    }
}

/// Snapshot of a candidate element taken at run start.
///
/// `name` is the only field a run modifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub text_style_id: Option<String>,
    pub fill_style_id: Option<String>,
    pub bound_fill_variable_id: Option<String>,
}

impl Element {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            text_style_id: None,
            fill_style_id: None,
            bound_fill_variable_id: None,
        }
    }

    pub fn text(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Text)
    }

    pub fn frame(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Frame)
    }

    pub fn with_text_style(mut self, id: impl Into<String>) -> Self {
        self.text_style_id = Some(id.into());
        self
    }

    pub fn with_fill_style(mut self, id: impl Into<String>) -> Self {
        self.fill_style_id = Some(id.into());
        self
    }

    pub fn with_fill_variable(mut self, id: impl Into<String>) -> Self {
        self.bound_fill_variable_id = Some(id.into());
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }
}

/// Host capability for renaming an element.
///
/// A rejected rename leaves the element untouched and the run continues.
pub trait Renamer {
    fn rename(&mut self, element: &Element, new_name: &str) -> Result<()>;
}

/// Bound fill variables as hosts report them.
///
/// Depending on host version this is a list, a map keyed by slot index,
/// or a bare id. Only slot 0 matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundFills {
    List(Vec<VariableSlot>),
    Sparse(BTreeMap<String, VariableSlot>),
    Single(String),
    Unknown(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableSlot {
    Id(String),
    Alias { id: Option<String> },
    Unknown(serde_json::Value),
}

impl VariableSlot {
    fn id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            Self::Alias { id } => id.as_deref(),
            Self::Unknown(_) => None,
        }
    }
}

impl BoundFills {
    /// Id of the first bound fill variable.
    pub fn first_id(&self) -> Option<String> {
        let id = match self {
            Self::List(slots) => slots.first().and_then(VariableSlot::id),
            Self::Sparse(slots) => slots.get("0").and_then(VariableSlot::id),
            Self::Single(id) => Some(id.as_str()),
            Self::Unknown(_) => None,
        };
        id.filter(|id| !id.is_empty()).map(str::to_string)
    }
}
