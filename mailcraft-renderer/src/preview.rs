//! Editor preview rendering.

use mailcraft_core::{EditorSession, Selection, Template};

use crate::render::{render_template, RenderMode};

/// Renders the editor view of a template: the same structure as the export
/// plus selection highlighting, placeholder borders and control buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewRenderer;

impl PreviewRenderer {
    /// Render a template with the given selection highlighted.
    #[must_use]
    pub fn render(template: &Template, selection: &Selection) -> String {
        let mut out = String::with_capacity(4096);
        render_template(&mut out, template, RenderMode::Preview(selection));
        out
    }

    /// Render the current state of an editing session.
    #[must_use]
    pub fn render_session(session: &EditorSession) -> String {
        Self::render(session.template(), &session.selection())
    }
}
