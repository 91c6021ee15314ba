//! The template tree: sections, columns and their elements.

use serde::{Deserialize, Serialize};

use crate::{Element, ElementId, ElementType, ElementUpdate, TemplateError, TemplateResult};

/// Narrowest width a column may be given, in percent.
pub const MIN_COLUMN_WIDTH: f32 = 10.0;

/// Full section width, in percent.
pub const FULL_WIDTH: f32 = 100.0;

/// Most columns a section can be split into.
pub const MAX_COLUMNS: u8 = 5;

/// Background given to newly added sections.
pub const DEFAULT_SECTION_BACKGROUND: &str = "#ffffff";

/// Identifier of a section, unique within its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub u32);

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a column, unique only within its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub u32);

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full address of an element. Element ids are only unique among siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementPath {
    /// Owning section.
    pub section: SectionId,
    /// Owning column.
    pub column: ColumnId,
    /// The element itself.
    pub element: ElementId,
}

impl ElementPath {
    /// Build a path from its parts.
    #[must_use]
    pub const fn new(section: SectionId, column: ColumnId, element: ElementId) -> Self {
        Self {
            section,
            column,
            element,
        }
    }
}

impl std::fmt::Display for ElementPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.section, self.column, self.element)
    }
}

/// Direction for [`Template::move_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards the top of the template.
    Up,
    /// Towards the bottom of the template.
    Down,
}

/// A vertical subdivision of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Identifier, unique within the section.
    pub id: ColumnId,
    /// Width in percent of the section.
    pub width: f32,
    /// Elements, top to bottom.
    pub elements: Vec<Element>,
}

impl Column {
    /// Create an empty column.
    #[must_use]
    pub fn new(id: ColumnId, width: f32) -> Self {
        Self {
            id,
            width,
            elements: Vec::new(),
        }
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}

/// A full-width band of the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier, unique within the template.
    pub id: SectionId,
    /// Background color as hex.
    pub background_color: String,
    /// Columns, left to right.
    pub columns: Vec<Column>,
}

impl Section {
    /// Create a section with a single full-width column.
    #[must_use]
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            background_color: DEFAULT_SECTION_BACKGROUND.to_string(),
            columns: vec![Column::new(ColumnId(0), FULL_WIDTH)],
        }
    }

    /// Get a column by ID.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn column_mut(&mut self, id: ColumnId) -> TemplateResult<&mut Column> {
        let section = self.id;
        self.columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TemplateError::ColumnNotFound { section, column: id })
    }

    /// Iterate over every element of the section, column by column.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.columns.iter().flat_map(|c| c.elements.iter())
    }

    fn take_elements(&mut self) -> Vec<Element> {
        self.columns
            .iter_mut()
            .flat_map(|c| std::mem::take(&mut c.elements))
            .collect()
    }
}

/// An email template: an ordered list of sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    sections: Vec<Section>,
}

impl Template {
    /// Create an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a template from existing sections.
    #[must_use]
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Sections, top to bottom.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Get a section by ID.
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn section_mut(&mut self, id: SectionId) -> TemplateResult<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TemplateError::SectionNotFound(id))
    }

    /// Get a column by section and column ID.
    #[must_use]
    pub fn column(&self, section: SectionId, column: ColumnId) -> Option<&Column> {
        self.section(section).and_then(|s| s.column(column))
    }

    /// Get an element by path.
    #[must_use]
    pub fn element(&self, path: ElementPath) -> Option<&Element> {
        self.column(path.section, path.column)
            .and_then(|c| c.element(path.element))
    }

    fn column_mut(&mut self, section: SectionId, column: ColumnId) -> TemplateResult<&mut Column> {
        self.section_mut(section)?.column_mut(column)
    }

    /// Total number of elements in the template.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.sections.iter().map(|s| s.elements().count()).sum()
    }

    /// Check if the template has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Append a new section with one full-width column.
    ///
    /// The new id is one past the largest existing id, or 0 for an empty
    /// template.
    pub fn add_section(&mut self) -> SectionId {
        let id = self
            .sections
            .iter()
            .map(|s| s.id.0)
            .max()
            .map_or(SectionId(0), |max| SectionId(max + 1));
        self.sections.push(Section::new(id));
        id
    }

    /// Remove a section and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is not found.
    pub fn remove_section(&mut self, id: SectionId) -> TemplateResult<Section> {
        let index = self.section_index(id)?;
        Ok(self.sections.remove(index))
    }

    /// Swap a section with its neighbour.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is not found or is already at the
    /// edge in `direction`.
    pub fn move_section(&mut self, id: SectionId, direction: MoveDirection) -> TemplateResult<()> {
        let index = self.section_index(id)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&i| i < self.sections.len()),
        }
        .ok_or(TemplateError::MoveOutOfBounds(id))?;
        self.sections.swap(index, target);
        Ok(())
    }

    fn section_index(&self, id: SectionId) -> TemplateResult<usize> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(TemplateError::SectionNotFound(id))
    }

    /// Append a default element of the given type to a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the section or column is not found.
    pub fn drop_element(
        &mut self,
        section: SectionId,
        column: ColumnId,
        element_type: ElementType,
    ) -> TemplateResult<ElementId> {
        self.insert_element(section, column, Element::with_defaults(element_type))
    }

    /// Append an element to a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the section or column is not found.
    pub fn insert_element(
        &mut self,
        section: SectionId,
        column: ColumnId,
        element: Element,
    ) -> TemplateResult<ElementId> {
        let id = element.id;
        self.column_mut(section, column)?.elements.push(element);
        Ok(id)
    }

    /// Merge a partial update into an element.
    ///
    /// # Errors
    ///
    /// Returns an error if no element exists at `path`.
    pub fn update_element(&mut self, path: ElementPath, update: ElementUpdate) -> TemplateResult<()> {
        self.column_mut(path.section, path.column)?
            .elements
            .iter_mut()
            .find(|e| e.id == path.element)
            .ok_or(TemplateError::ElementNotFound(path))?
            .apply_update(update);
        Ok(())
    }

    /// Remove an element.
    ///
    /// # Errors
    ///
    /// Returns an error if no element exists at `path`.
    pub fn remove_element(&mut self, path: ElementPath) -> TemplateResult<Element> {
        let column = self.column_mut(path.section, path.column)?;
        let index = column
            .elements
            .iter()
            .position(|e| e.id == path.element)
            .ok_or(TemplateError::ElementNotFound(path))?;
        Ok(column.elements.remove(index))
    }

    /// Set a section's background color.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is not found.
    pub fn set_section_background(&mut self, id: SectionId, color: impl Into<String>) -> TemplateResult<()> {
        self.section_mut(id)?.background_color = color.into();
        Ok(())
    }

    /// Replace a section's columns with `count` equal-width columns.
    ///
    /// Every existing element moves, in order, into the first column (id 0).
    /// The other columns are empty and numbered after the previous largest
    /// column id.
    ///
    /// # Errors
    ///
    /// Returns an error if the section is not found or `count` is not in
    /// `1..=5`.
    pub fn split_section(&mut self, id: SectionId, count: u8) -> TemplateResult<()> {
        if !(1..=MAX_COLUMNS).contains(&count) {
            return Err(TemplateError::InvalidColumnCount(count));
        }
        let section = self.section_mut(id)?;
        let width = FULL_WIDTH / f32::from(count);
        let max_id = section.columns.iter().map(|c| c.id.0).max().unwrap_or(0);

        let mut first = Column::new(ColumnId(0), width);
        first.elements = section.take_elements();

        let mut columns = Vec::with_capacity(usize::from(count));
        columns.push(first);
        columns.extend((1..u32::from(count)).map(|i| Column::new(ColumnId(max_id + i), width)));
        section.columns = columns;
        Ok(())
    }

    /// Collapse a section's columns into one full-width column (id 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the section is not found.
    pub fn merge_columns(&mut self, id: SectionId) -> TemplateResult<()> {
        let section = self.section_mut(id)?;
        let mut merged = Column::new(ColumnId(0), FULL_WIDTH);
        merged.elements = section.take_elements();
        section.columns = vec![merged];
        Ok(())
    }

    /// Set a column's width in percent.
    ///
    /// Sibling widths are not renormalized, so a section's columns may stop
    /// adding up to 100.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is not found or `width` is outside
    /// `10..=100`.
    pub fn set_column_width(&mut self, section: SectionId, column: ColumnId, width: f32) -> TemplateResult<()> {
        if !(MIN_COLUMN_WIDTH..=FULL_WIDTH).contains(&width) {
            return Err(TemplateError::InvalidWidth(width.to_string()));
        }
        self.column_mut(section, column)?.width = width;
        Ok(())
    }
}
