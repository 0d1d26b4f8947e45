//! Run summary shown to the user.

use std::fmt;

use serde::Serialize;

use crate::orchestrator::AuditReport;

/// Mutually exclusive outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// No renames and no mismatches
    NothingToDo,
    /// Renames happened, every audited color is allowed
    RenamedOnly,
    /// At least one mismatch (renames may or may not have happened)
    Mismatched,
}

impl Outcome {
    pub fn of(report: &AuditReport) -> Self {
        if !report.mismatched.is_empty() {
            Self::Mismatched
        } else if report.text_renamed + report.frames_renamed > 0 {
            Self::RenamedOnly
        } else {
            Self::NothingToDo
        }
    }
}

/// Renderable summary of an [`AuditReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub outcome: Outcome,
    pub text_renamed: usize,
    pub frames_renamed: usize,
    /// Style-classified text that went through the color audit
    pub audited: usize,
    pub mismatched: usize,
    /// Nothing was selected at all
    pub empty_selection: bool,
    /// The selection held no text layers
    pub no_text_layers: bool,
}

impl Summary {
    pub fn new(report: &AuditReport) -> Self {
        Self {
            outcome: Outcome::of(report),
            text_renamed: report.text_renamed,
            frames_renamed: report.frames_renamed,
            audited: report.audited,
            mismatched: report.mismatched.len(),
            empty_selection: report.selection_size == 0,
            no_text_layers: report.text_candidates == 0,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty_selection {
            return f.write_str("Select at least one frame or text layer.");
        }
        if self.no_text_layers && self.frames_renamed == 0 {
            return f.write_str("No text layers found.");
        }

        let mut parts = Vec::new();
        if self.text_renamed > 0 {
            parts.push(format!(
                "{} renamed",
                plural(self.text_renamed, "text layer", "text layers")
            ));
        }
        if self.frames_renamed > 0 {
            parts.push(format!(
                "{} renamed",
                plural(self.frames_renamed, "frame", "frames")
            ));
        }

        if self.audited == 0 && !parts.is_empty() {
            return write!(f, "{}.", parts.join(". "));
        }

        let tail = match self.outcome {
            Outcome::Mismatched => format!(
                "{} selected.",
                plural(self.mismatched, "mismatched layer", "mismatched layers")
            ),
            Outcome::RenamedOnly | Outcome::NothingToDo => "Everything is perfect!".to_string(),
        };

        if parts.is_empty() {
            f.write_str(&tail)
        } else {
            write!(f, "{}. {}", parts.join(". "), tail)
        }
    }
}

/// `"1 frame"`, `"2 frames"`.
pub fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn report(text: usize, frames: usize, mismatched: usize) -> AuditReport {
        AuditReport {
            selection_size: 5,
            text_candidates: 3,
            text_renamed: text,
            frames_renamed: frames,
            audited: 3,
            mismatched: (0..mismatched)
                .map(|i| Element::text(i.to_string(), "t"))
                .collect(),
            classifications: Vec::new(),
        }
    }

    #[test]
    fn test_outcome_classes() {
        assert_eq!(Outcome::of(&report(0, 0, 0)), Outcome::NothingToDo);
        assert_eq!(Outcome::of(&report(1, 0, 0)), Outcome::RenamedOnly);
        assert_eq!(Outcome::of(&report(0, 2, 0)), Outcome::RenamedOnly);
        assert_eq!(Outcome::of(&report(0, 0, 1)), Outcome::Mismatched);
        assert_eq!(Outcome::of(&report(3, 1, 1)), Outcome::Mismatched);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Summary::new(&report(0, 0, 0)).to_string(),
            "Everything is perfect!"
        );
        assert_eq!(
            Summary::new(&report(1, 0, 0)).to_string(),
            "1 text layer renamed. Everything is perfect!"
        );
        assert_eq!(
            Summary::new(&report(2, 1, 0)).to_string(),
            "2 text layers renamed. 1 frame renamed. Everything is perfect!"
        );
        assert_eq!(
            Summary::new(&report(0, 3, 1)).to_string(),
            "3 frames renamed. 1 mismatched layer selected."
        );
        assert_eq!(
            Summary::new(&report(0, 0, 2)).to_string(),
            "2 mismatched layers selected."
        );
    }

    #[test]
    fn test_empty_selection_message() {
        let mut empty = report(0, 0, 0);
        empty.selection_size = 0;
        let summary = Summary::new(&empty);
        assert_eq!(summary.outcome, Outcome::NothingToDo);
        assert_eq!(summary.to_string(), "Select at least one frame or text layer.");
    }

    #[test]
    fn test_frames_without_text() {
        let mut frames_only = report(0, 2, 0);
        frames_only.text_candidates = 0;
        frames_only.audited = 0;
        assert_eq!(Summary::new(&frames_only).to_string(), "2 frames renamed.");

        frames_only.frames_renamed = 0;
        assert_eq!(Summary::new(&frames_only).to_string(), "No text layers found.");
    }

    #[test]
    fn test_nothing_audited_drops_verdict() {
        let mut unstaged = report(2, 1, 0);
        unstaged.audited = 0;
        assert_eq!(
            Summary::new(&unstaged).to_string(),
            "2 text layers renamed. 1 frame renamed."
        );

        unstaged.text_renamed = 0;
        unstaged.frames_renamed = 0;
        assert_eq!(Summary::new(&unstaged).to_string(), "Everything is perfect!");
    }
}
