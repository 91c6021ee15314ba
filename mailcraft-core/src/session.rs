//! Editor session state: the template being edited plus the user's selection.
//!
//! An [`EditorSession`] is an owned value handed to whatever needs to read or
//! mutate it. Every editing operation degrades to a logged no-op when it
//! refers to something that no longer exists, so a stale selection can never
//! corrupt the tree.

use serde::{Deserialize, Serialize};

use crate::{
    defaults, ColumnId, Element, ElementId, ElementPath, ElementType, ElementUpdate,
    MoveDirection, Section, SectionId, Template, TemplateError, TemplateResult,
};

/// What the user currently has selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Active section.
    pub section: Option<SectionId>,
    /// Active column, within the active section.
    pub column: Option<ColumnId>,
    /// Active element.
    pub element: Option<ElementPath>,
}

impl Selection {
    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section.is_none() && self.column.is_none() && self.element.is_none()
    }
}

/// An editing session over one template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorSession {
    template: Template,
    selection: Selection,
}

impl EditorSession {
    /// Start a session on an existing template.
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self {
            template,
            selection: Selection::default(),
        }
    }

    /// Start a session on the five-section starter template.
    #[must_use]
    pub fn with_default_template() -> Self {
        Self::new(defaults::default_template())
    }

    /// The template being edited.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The active section, if it still exists.
    #[must_use]
    pub fn active_section(&self) -> Option<&Section> {
        self.selection
            .section
            .and_then(|id| self.template.section(id))
    }

    /// The active element, if it still exists.
    #[must_use]
    pub fn active_element(&self) -> Option<&Element> {
        self.selection
            .element
            .and_then(|path| self.template.element(path))
    }

    /// Append a new empty section.
    pub fn add_section(&mut self) -> SectionId {
        let id = self.template.add_section();
        tracing::debug!("Added section {id}");
        id
    }

    /// Remove a section. Returns whether anything was removed.
    pub fn remove_section(&mut self, id: SectionId) -> bool {
        let removed = settle("remove section", self.template.remove_section(id)).is_some();
        if removed {
            if self.selection.section == Some(id) {
                self.selection.section = None;
                self.selection.column = None;
            }
            self.revalidate_selection();
        }
        removed
    }

    /// Swap a section with its neighbour. Returns whether it moved.
    pub fn move_section(&mut self, id: SectionId, direction: MoveDirection) -> bool {
        settle("move section", self.template.move_section(id, direction)).is_some()
    }

    /// Drop a default element of `element_type` onto a column.
    pub fn drop_element(
        &mut self,
        section: SectionId,
        column: ColumnId,
        element_type: ElementType,
    ) -> Option<ElementId> {
        settle(
            "drop element",
            self.template.drop_element(section, column, element_type),
        )
    }

    /// Merge a partial update into an element. Returns whether it applied.
    pub fn update_element(&mut self, path: ElementPath, update: ElementUpdate) -> bool {
        settle("update element", self.template.update_element(path, update)).is_some()
    }

    /// Remove an element. Returns whether anything was removed.
    ///
    /// Clears the active element only if it is the one removed.
    pub fn remove_element(&mut self, path: ElementPath) -> bool {
        let removed = settle("remove element", self.template.remove_element(path)).is_some();
        if removed && self.selection.element == Some(path) {
            self.selection.element = None;
        }
        removed
    }

    /// Set a section's background color. Returns whether it applied.
    pub fn set_section_background(&mut self, id: SectionId, color: impl Into<String>) -> bool {
        settle(
            "set section background",
            self.template.set_section_background(id, color),
        )
        .is_some()
    }

    /// Split a section into `count` equal columns. Returns whether it applied.
    pub fn split_section(&mut self, id: SectionId, count: u8) -> bool {
        let split = settle("split section", self.template.split_section(id, count)).is_some();
        if split {
            self.follow_moved_element(id);
            self.revalidate_selection();
        }
        split
    }

    /// Merge all columns of a section into one. Returns whether it applied.
    pub fn merge_columns(&mut self, id: SectionId) -> bool {
        let merged = settle("merge columns", self.template.merge_columns(id)).is_some();
        if merged {
            self.selection.column = None;
            self.follow_moved_element(id);
            self.revalidate_selection();
        }
        merged
    }

    /// Set a column's width in percent. Returns whether it applied.
    pub fn set_column_width(&mut self, section: SectionId, column: ColumnId, width: f32) -> bool {
        settle(
            "set column width",
            self.template.set_column_width(section, column, width),
        )
        .is_some()
    }

    /// Set a column's width from raw user input such as `"40"`.
    ///
    /// Non-numeric input is rejected like an out-of-range width.
    pub fn set_column_width_input(&mut self, section: SectionId, column: ColumnId, input: &str) -> bool {
        let parsed = input
            .trim()
            .parse::<f32>()
            .map_err(|_| TemplateError::InvalidWidth(input.to_string()));
        settle(
            "set column width",
            parsed.and_then(|width| self.template.set_column_width(section, column, width)),
        )
        .is_some()
    }

    /// Make a section the active one. Returns whether it exists.
    pub fn select_section(&mut self, id: SectionId) -> bool {
        if self.template.section(id).is_none() {
            return false;
        }
        if self.selection.section != Some(id) {
            self.selection.column = None;
        }
        self.selection.section = Some(id);
        true
    }

    /// Make a column (and its section) active. Returns whether it exists.
    pub fn select_column(&mut self, section: SectionId, column: ColumnId) -> bool {
        if self.template.column(section, column).is_none() {
            return false;
        }
        self.selection.section = Some(section);
        self.selection.column = Some(column);
        true
    }

    /// Make an element active. Returns whether it exists.
    pub fn select_element(&mut self, path: ElementPath) -> bool {
        if self.template.element(path).is_none() {
            return false;
        }
        self.selection.element = Some(path);
        true
    }

    /// Drop the whole selection.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    /// Drop selection entries that point at nodes that no longer exist.
    /// Split and merge gather a section's elements into column 0.
    fn follow_moved_element(&mut self, section: SectionId) {
        if let Some(path) = self.selection.element.as_mut() {
            if path.section == section {
                path.column = ColumnId(0);
            }
        }
    }

    fn revalidate_selection(&mut self) {
        let selection = &mut self.selection;
        match selection.section {
            Some(id) if self.template.section(id).is_none() => {
                selection.section = None;
                selection.column = None;
            }
            Some(id) => {
                if let Some(column) = selection.column {
                    if self.template.column(id, column).is_none() {
                        selection.column = None;
                    }
                }
            }
            None => selection.column = None,
        }
        if let Some(path) = selection.element {
            if self.template.element(path).is_none() {
                tracing::debug!("Active element {path} no longer exists, clearing");
                selection.element = None;
            }
        }
    }
}

/// Turn an operation result into an optional value, logging the failure.
fn settle<T>(operation: &str, result: TemplateResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring {operation}: {e}");
            None
        }
    }
}
