//! Document Snapshot
//!
//! JSON export of a selection together with the styles and variables it
//! references. Serves as the metadata provider and rename target when the
//! engine runs outside the design tool.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::{BoundFills, Element, NodeKind, Renamer};
use crate::error::{LayerLintError, Result};
use crate::metadata::{MetadataProvider, MetadataRecord};

/// Exported selection plus metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Flattened selection
    #[serde(default)]
    pub selection: Vec<NodeSnapshot>,
    #[serde(default)]
    pub styles: HashMap<String, StyleEntry>,
    /// Absent when the exporting host had no variable support
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, VariableEntry>>,
    /// Ids whose lookup fails
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreachable: Vec<String>,
}

/// One exported node. Unknown fields are kept for write-back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    /// Not always a string (mixed styles are exported as other values)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<BoundFills>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleEntry {
    #[serde(rename = "type")]
    pub style_type: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableEntry {
    #[serde(default)]
    pub name: Option<String>,
}

fn default_true() -> bool {
    true
}

fn string_id(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<&NodeSnapshot> for Element {
    fn from(node: &NodeSnapshot) -> Self {
        Element {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: NodeKind::from_host(&node.node_type),
            text_style_id: string_id(node.text_style_id.as_ref()),
            fill_style_id: string_id(node.fill_style_id.as_ref()),
            bound_fill_variable_id: node
                .bound_variables
                .as_ref()
                .and_then(|bv| bv.fills.as_ref())
                .and_then(BoundFills::first_id),
        }
    }
}

impl StyleEntry {
    /// Only text and paint styles are meaningful to the engine.
    fn to_record(&self) -> Option<MetadataRecord> {
        let name = self.name.clone();
        match self.style_type.as_str() {
            "TEXT" => Some(MetadataRecord::TextStyle { name }),
            "PAINT" => Some(MetadataRecord::PaintStyle { name }),
            _ => None,
        }
    }
}

impl DocumentSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LayerLintError::DocumentNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| LayerLintError::DocumentParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Visible nodes as engine elements, in selection order.
    pub fn candidates(&self) -> Vec<Element> {
        self.selection
            .iter()
            .filter(|n| n.visible)
            .map(Element::from)
            .collect()
    }

    /// Copy element names back onto the matching nodes.
    pub fn apply_names(&mut self, elements: &[Element]) -> usize {
        let names: HashMap<&str, &str> = elements
            .iter()
            .map(|e| (e.id.as_str(), e.name.as_str()))
            .collect();

        let mut changed = 0;
        for node in &mut self.selection {
            if let Some(name) = names.get(node.id.as_str()) {
                if node.name != *name {
                    node.name = name.to_string();
                    changed += 1;
                }
            }
        }
        changed
    }

    pub fn provider(&self) -> SnapshotProvider<'_> {
        SnapshotProvider {
            document: self,
            unreachable: self.unreachable.iter().map(String::as_str).collect(),
        }
    }

    pub fn renamer(&self) -> SnapshotRenamer {
        SnapshotRenamer {
            locked: self
                .selection
                .iter()
                .filter(|n| n.locked)
                .map(|n| n.id.clone())
                .collect(),
        }
    }
}

/// Serves metadata out of a [`DocumentSnapshot`].
pub struct SnapshotProvider<'a> {
    document: &'a DocumentSnapshot,
    unreachable: HashSet<&'a str>,
}

impl SnapshotProvider<'_> {
    fn check_reachable(&self, id: &str) -> Result<()> {
        if self.unreachable.contains(id) {
            return Err(LayerLintError::FetchFailed {
                id: id.to_string(),
                reason: "marked unreachable in snapshot".to_string(),
            });
        }
        Ok(())
    }
}

impl MetadataProvider for SnapshotProvider<'_> {
    async fn fetch_style(&self, id: &str) -> Result<Option<MetadataRecord>> {
        self.check_reachable(id)?;
        Ok(self.document.styles.get(id).and_then(StyleEntry::to_record))
    }

    async fn fetch_variable(&self, id: &str) -> Result<Option<MetadataRecord>> {
        self.check_reachable(id)?;
        Ok(self
            .document
            .variables
            .as_ref()
            .and_then(|vars| vars.get(id))
            .map(|v| MetadataRecord::Variable {
                name: v.name.clone(),
            }))
    }

    fn supports_variables(&self) -> bool {
        self.document.variables.is_some()
    }
}

/// Rejects renames of locked nodes.
#[derive(Debug, Default)]
pub struct SnapshotRenamer {
    locked: HashSet<String>,
}

impl Renamer for SnapshotRenamer {
    fn rename(&mut self, element: &Element, _new_name: &str) -> Result<()> {
        if self.locked.contains(&element.id) {
            return Err(LayerLintError::RenameRejected {
                id: element.id.clone(),
                reason: "node is locked".to_string(),
            });
        }
        Ok(())
    }
}
