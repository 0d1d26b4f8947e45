//! # Category Module
//!
//! Assigns text elements to semantic categories (heading, title, body, ...).
//!
//! ## Module layout
//!
//! - `index`: lookup tables derived from the rename rules
//! - `resolver`: per-element classification (text style, then color)
//!
//! ## Example
//!
//! ```rust
//! use layer_lint_core::category::RuleIndex;
//! use layer_lint_core::config::RuleConfig;
//!
//! let index = RuleIndex::from_config(&RuleConfig::default());
//! let heading = index.categories.get("heading").unwrap();
//! assert_eq!(heading.new_name, "heading-text");
//! assert_eq!(
//!     index.colors.category_for("colors/content/text/inverse/heading"),
//!     Some("heading")
//! );
//! ```

mod index;
mod resolver;

pub use index::{category_key, CategoryEntry, CategoryMapping, ColorIndex, RuleIndex};
pub use resolver::{
    apply_name, text_style_name, Classification, ClassificationMethod, ClassificationResolver,
    ClassificationResult,
};
