//! # Editor commands
//!
//! Serializable form of every editing operation, so a session can be driven
//! from a script as well as from direct calls.
//!
//! ## Example script
//!
//! ```json
//! [
//!   { "op": "add_section" },
//!   { "op": "split_section", "section": 5, "columns": 2 },
//!   { "op": "drop_element", "section": 5, "column": 1, "element_type": "button" },
//!   { "op": "update_element",
//!     "target": { "section": 5, "column": 1, "element": "last" },
//!     "update": { "company_id": "acme" } }
//! ]
//! ```
//!
//! Scripts cannot know the random ids of elements they create, so elements
//! are addressed by [`ElementRef`]: an id, a position or `"last"`.

use serde::{Deserialize, Serialize};

use crate::{
    ColumnId, EditorSession, ElementId, ElementPath, ElementType, ElementUpdate, MoveDirection,
    SectionId, Template, TemplateError, TemplateResult,
};

/// How a command addresses an element within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementRef {
    /// Position in the column, from the top.
    Index(usize),
    /// The bottom-most element.
    Last(LastMarker),
    /// Exact element id.
    Id(ElementId),
}

/// The literal `"last"` in an [`ElementRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastMarker {
    /// `"last"`.
    Last,
}

/// An element target inside a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTarget {
    /// Owning section.
    pub section: SectionId,
    /// Owning column.
    pub column: ColumnId,
    /// Element within the column.
    pub element: ElementRef,
}

impl ElementTarget {
    /// Resolve to a concrete path in `template`.
    #[must_use]
    pub fn resolve(&self, template: &Template) -> Option<ElementPath> {
        let column = template.column(self.section, self.column)?;
        let element = match self.element {
            ElementRef::Index(index) => column.elements.get(index),
            ElementRef::Last(LastMarker::Last) => column.elements.last(),
            ElementRef::Id(id) => column.element(id),
        }?;
        Some(ElementPath::new(self.section, self.column, element.id))
    }
}

impl From<ElementPath> for ElementTarget {
    fn from(path: ElementPath) -> Self {
        Self {
            section: path.section,
            column: path.column,
            element: ElementRef::Id(path.element),
        }
    }
}

/// A single editing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Append an empty section.
    AddSection,
    /// Remove a section.
    RemoveSection {
        /// Section to remove.
        section: SectionId,
    },
    /// Swap a section with its neighbour.
    MoveSection {
        /// Section to move.
        section: SectionId,
        /// Which neighbour to swap with.
        direction: MoveDirection,
    },
    /// Append a default element to a column.
    DropElement {
        /// Target section.
        section: SectionId,
        /// Target column.
        column: ColumnId,
        /// Palette type to create.
        element_type: ElementType,
    },
    /// Merge a partial update into an element.
    UpdateElement {
        /// Element to update.
        target: ElementTarget,
        /// Fields to change.
        update: ElementUpdate,
    },
    /// Remove an element.
    RemoveElement {
        /// Element to remove.
        target: ElementTarget,
    },
    /// Set a section's background color.
    SetSectionBackground {
        /// Target section.
        section: SectionId,
        /// New color.
        color: String,
    },
    /// Split a section into equal columns.
    SplitSection {
        /// Target section.
        section: SectionId,
        /// Number of columns, 1 to 5.
        columns: u8,
    },
    /// Merge a section's columns into one.
    MergeColumns {
        /// Target section.
        section: SectionId,
    },
    /// Set a column's width in percent.
    SetColumnWidth {
        /// Owning section.
        section: SectionId,
        /// Target column.
        column: ColumnId,
        /// Width, 10 to 100.
        width: f32,
    },
    /// Make a section active.
    SelectSection {
        /// Section to select.
        section: SectionId,
    },
    /// Make a column active.
    SelectColumn {
        /// Owning section.
        section: SectionId,
        /// Column to select.
        column: ColumnId,
    },
    /// Make an element active.
    SelectElement {
        /// Element to select.
        target: ElementTarget,
    },
    /// Drop the selection.
    ClearSelection,
}

impl EditorCommand {
    /// Parse a JSON array of commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names an unknown
    /// operation.
    pub fn parse_script(json: &str) -> TemplateResult<Vec<Self>> {
        serde_json::from_str(json).map_err(TemplateError::Serialization)
    }

    /// Short operation name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddSection => "add_section",
            Self::RemoveSection { .. } => "remove_section",
            Self::MoveSection { .. } => "move_section",
            Self::DropElement { .. } => "drop_element",
            Self::UpdateElement { .. } => "update_element",
            Self::RemoveElement { .. } => "remove_element",
            Self::SetSectionBackground { .. } => "set_section_background",
            Self::SplitSection { .. } => "split_section",
            Self::MergeColumns { .. } => "merge_columns",
            Self::SetColumnWidth { .. } => "set_column_width",
            Self::SelectSection { .. } => "select_section",
            Self::SelectColumn { .. } => "select_column",
            Self::SelectElement { .. } => "select_element",
            Self::ClearSelection => "clear_selection",
        }
    }
}

impl EditorSession {
    /// Apply one command. Returns whether it had any effect.
    pub fn apply(&mut self, command: EditorCommand) -> bool {
        let name = command.name();
        let applied = match command {
            EditorCommand::AddSection => {
                self.add_section();
                true
            }
            EditorCommand::RemoveSection { section } => self.remove_section(section),
            EditorCommand::MoveSection { section, direction } => {
                self.move_section(section, direction)
            }
            EditorCommand::DropElement {
                section,
                column,
                element_type,
            } => self.drop_element(section, column, element_type).is_some(),
            EditorCommand::UpdateElement { target, update } => self
                .resolve(&target)
                .is_some_and(|path| self.update_element(path, update)),
            EditorCommand::RemoveElement { target } => self
                .resolve(&target)
                .is_some_and(|path| self.remove_element(path)),
            EditorCommand::SetSectionBackground { section, color } => {
                self.set_section_background(section, color)
            }
            EditorCommand::SplitSection { section, columns } => {
                self.split_section(section, columns)
            }
            EditorCommand::MergeColumns { section } => self.merge_columns(section),
            EditorCommand::SetColumnWidth {
                section,
                column,
                width,
            } => self.set_column_width(section, column, width),
            EditorCommand::SelectSection { section } => self.select_section(section),
            EditorCommand::SelectColumn { section, column } => {
                self.select_column(section, column)
            }
            EditorCommand::SelectElement { target } => self
                .resolve(&target)
                .is_some_and(|path| self.select_element(path)),
            EditorCommand::ClearSelection => {
                self.clear_selection();
                true
            }
        };
        if !applied {
            tracing::debug!("Command {name} had no effect");
        }
        applied
    }

    /// Apply commands in order. Returns how many had an effect.
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = EditorCommand>) -> usize {
        let mut applied = 0;
        let mut total = 0;
        for command in commands {
            total += 1;
            if self.apply(command) {
                applied += 1;
            }
        }
        tracing::info!("Applied {applied} of {total} editor commands");
        applied
    }

    fn resolve(&self, target: &ElementTarget) -> Option<ElementPath> {
        let path = target.resolve(self.template());
        if path.is_none() {
            tracing::debug!(
                "No element {:?} in section {} column {}",
                target.element,
                target.section,
                target.column
            );
        }
        path
    }
}
