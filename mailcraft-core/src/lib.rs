//! # Mailcraft Core
//!
//! Document model for email templates built out of sections, columns and
//! content elements.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               mailcraft-core                │
//! ├─────────────────────────────────────────────┤
//! │  Template tree    │  Editor session         │
//! │  - Sections       │  - Selection            │
//! │  - Columns        │  - No-op on stale refs  │
//! │  - Elements       │  - Scripted commands    │
//! ├─────────────────────────────────────────────┤
//! │  Defaults         │  Variable catalog       │
//! │  - Palette items  │  - $token$ reference    │
//! │  - Starter layout │  - Grouped by category  │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod defaults;
pub mod element;
pub mod error;
pub mod session;
pub mod template;
pub mod variables;

pub use command::{EditorCommand, ElementRef, ElementTarget, LastMarker};
pub use element::{
    Element, ElementId, ElementKind, ElementStyle, ElementType, ElementUpdate, TextAlign,
};
pub use error::{TemplateError, TemplateResult};
pub use session::{EditorSession, Selection};
pub use template::{
    Column, ColumnId, ElementPath, MoveDirection, Section, SectionId, Template, FULL_WIDTH,
    MAX_COLUMNS, MIN_COLUMN_WIDTH,
};
pub use variables::Variable;

/// Mailcraft core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
