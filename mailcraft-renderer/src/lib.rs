//! # Mailcraft Renderer
//!
//! Turns a [`mailcraft_core::Template`] into markup.
//!
//! ## Outputs
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Shared render walk             │
//! ├──────────────────────┬──────────────────────┤
//! │ Preview              │ Export               │
//! │ - selection classes  │ - inline styles only │
//! │ - ui-control buttons │ - XHTML shell        │
//! │ - fragment           │ - standalone doc     │
//! └──────────────────────┴──────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod html;
pub mod preview;
mod render;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, HtmlExporter, DEFAULT_FILE_NAME, DOCTYPE};
pub use preview::PreviewRenderer;
pub use render::{EDITOR_ONLY_CLASSES, UI_CONTROL_CLASS};
