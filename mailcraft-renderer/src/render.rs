//! The render walk shared by preview and export.
//!
//! Both modes produce the same structure. Preview additionally emits editor
//! decoration: selection and placeholder classes plus control buttons tagged
//! with [`UI_CONTROL_CLASS`]. Export emits none of it.

use mailcraft_core::{
    Column, Element, ElementKind, ElementPath, Section, SectionId, Selection, Template,
};

use crate::html::{open_tag, text_body, InlineStyle};

/// Marker class carried by every editor-only control.
pub const UI_CONTROL_CLASS: &str = "ui-control";

/// Presentation classes that exist only in the editor view.
pub const EDITOR_ONLY_CLASSES: [&str; 6] = [
    "border-dashed",
    "border-gray-300",
    "cursor-pointer",
    "bg-blue-50",
    "bg-gray-100",
    "border-blue-500",
];

/// Which view of the template to produce.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RenderMode<'a> {
    /// Clean markup for delivery.
    Export,
    /// Editor view highlighting the given selection.
    Preview(&'a Selection),
}

impl RenderMode<'_> {
    fn selection(self) -> Option<Selection> {
        match self {
            Self::Export => None,
            Self::Preview(selection) => Some(*selection),
        }
    }
}

/// Render every section of `template` into `out`.
pub(crate) fn render_template(out: &mut String, template: &Template, mode: RenderMode<'_>) {
    for section in template.sections() {
        render_section(out, section, mode);
        out.push('\n');
    }
}

fn render_section(out: &mut String, section: &Section, mode: RenderMode<'_>) {
    let selection = mode.selection();
    let style = InlineStyle::new().with("background-color", section.background_color.as_str());
    let section_id = section.id.to_string();

    match selection {
        None => open_tag(out, "div", &["section"], &style, &[]),
        Some(selection) => {
            let border = if selection.section == Some(section.id) {
                "border-blue-500"
            } else {
                "border-gray-200"
            };
            open_tag(
                out,
                "div",
                &["section", "mb-4", "border", border],
                &style,
                &[("data-section", &section_id)],
            );
        }
    }
    out.push('>');

    if selection.is_some() {
        out.push_str(&format!("<div class=\"section-controls {UI_CONTROL_CLASS}\">"));
        for (action, glyph) in [
            ("move-up", "&#9650;"),
            ("move-down", "&#9660;"),
            ("remove-section", "&#10005;"),
        ] {
            out.push_str(&format!(
                "<button type=\"button\" class=\"{UI_CONTROL_CLASS}\" data-action=\"{action}\">{glyph}</button>"
            ));
        }
        out.push_str("</div>");
    }

    out.push_str(
        "<table class=\"section-table\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\"><tbody><tr>",
    );
    let last = section.columns.len().saturating_sub(1);
    for (index, column) in section.columns.iter().enumerate() {
        let active = selection.is_some_and(|s| {
            s.section == Some(section.id) && s.column == Some(column.id)
        });
        render_column(out, section.id, column, mode, active, index < last);
    }
    out.push_str("</tr></tbody></table></div>");
}

fn render_column(
    out: &mut String,
    section: SectionId,
    column: &Column,
    mode: RenderMode<'_>,
    active: bool,
    has_next: bool,
) {
    let style = InlineStyle::new().with("width", format!("{}%", format_percent(column.width)));
    let column_id = column.id.to_string();

    match mode {
        RenderMode::Export => open_tag(out, "td", &["column"], &style, &[]),
        RenderMode::Preview(_) => {
            let mut classes = vec!["column"];
            if active {
                classes.push("bg-gray-100");
            }
            if has_next {
                classes.extend(["border-r", "border-dashed", "border-gray-300"]);
            }
            open_tag(out, "td", &classes, &style, &[("data-column", &column_id)]);
        }
    }
    out.push('>');

    for element in &column.elements {
        let path = ElementPath::new(section, column.id, element.id);
        render_element(out, path, element, mode);
    }
    out.push_str("</td>");
}

fn render_element(out: &mut String, path: ElementPath, element: &Element, mode: RenderMode<'_>) {
    match mode {
        RenderMode::Export => out.push_str("<div class=\"element\">"),
        RenderMode::Preview(selection) => {
            let mut classes = vec![
                "element",
                "mb-2",
                "cursor-pointer",
                "relative",
                "group",
                "border",
                "border-dashed",
                "border-gray-300",
                "p-1",
            ];
            if selection.element == Some(path) {
                classes.push("bg-blue-50");
            }
            let element_id = element.id.to_string();
            open_tag(
                out,
                "div",
                &classes,
                &InlineStyle::new(),
                &[("data-element", &element_id)],
            );
            out.push('>');
            out.push_str(&format!(
                "<div class=\"absolute top-1 right-1 z-10 {UI_CONTROL_CLASS}\"><button type=\"button\" class=\"{UI_CONTROL_CLASS}\" data-action=\"remove-element\">&#215;</button></div>"
            ));
        }
    }

    render_content(out, element);
    out.push_str("</div>");
}

fn render_content(out: &mut String, element: &Element) {
    let s = &element.style;
    match &element.kind {
        ElementKind::Text { content } | ElementKind::TextArea { content } => {
            let mut style = InlineStyle::new()
                .with("color", s.color.as_str())
                .with("font-size", s.font_size.as_str())
                .with("font-weight", s.font_weight.as_str())
                .with("text-align", s.text_align.as_css())
                .with("padding", s.padding.as_str())
                .with("line-height", line_height(&s.line_height));
            if matches!(element.kind, ElementKind::TextArea { .. }) {
                style.set("white-space", "pre-wrap");
            }
            let body = text_body(content, &mut style);
            open_tag(out, "div", &[], &style, &[]);
            out.push_str(&format!(">{body}</div>"));
        }

        ElementKind::Image { src, width, height } => {
            let wrapper = InlineStyle::new()
                .with("text-align", s.text_align.as_css())
                .with("padding", s.padding.as_str());
            open_tag(out, "div", &[], &wrapper, &[]);
            out.push('>');
            let image_style = InlineStyle::new()
                .with("display", "inline-block")
                .with("max-width", "100%")
                .with("width", or_auto(width))
                .with("height", or_auto(height));
            open_tag(
                out,
                "img",
                &[],
                &image_style,
                &[("src", src.as_str()), ("alt", "Email content")],
            );
            out.push_str(" /></div>");
        }

        ElementKind::Button {
            label,
            href,
            background_color,
            ..
        } => {
            let wrapper = InlineStyle::new()
                .with("text-align", s.text_align.as_css())
                .with("padding", s.padding.as_str());
            open_tag(out, "div", &[], &wrapper, &[]);
            out.push('>');

            let mut link_style = InlineStyle::new()
                .with("display", "inline-block")
                .with("padding", "10px 20px")
                .with("background-color", or_default(background_color, "#0c7bbf"))
                .with("color", s.color.as_str())
                .with("font-size", s.font_size.as_str())
                .with("font-weight", s.font_weight.as_str())
                .with("text-decoration", "none")
                .with("border-radius", "4px")
                .with("line-height", line_height(&s.line_height));
            let body = text_body(label, &mut link_style);
            let href = href.as_deref().filter(|h| !h.trim().is_empty()).unwrap_or("#");
            open_tag(out, "a", &["button"], &link_style, &[("href", href)]);
            out.push_str(&format!(">{body}</a></div>"));
        }
    }
}

fn line_height(value: &str) -> &str {
    or_default(value, "1.5")
}

fn or_auto(value: &str) -> &str {
    or_default(value, "auto")
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Format a percentage with at most two decimals: `33.33`, `50`, `100`.
fn format_percent(value: f32) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_core::{ColumnId, ElementType};

    fn one_text_template(content: &str) -> Template {
        let mut template = Template::new();
        let section = template.add_section();
        let id = template
            .drop_element(section, ColumnId(0), ElementType::Text)
            .expect("drop");
        template
            .update_element(
                ElementPath::new(section, ColumnId(0), id),
                mailcraft_core::ElementUpdate {
                    content: Some(content.to_string()),
                    ..Default::default()
                },
            )
            .expect("update");
        template
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(100.0), "100");
        assert_eq!(format_percent(50.0), "50");
        assert_eq!(format_percent(100.0 / 3.0), "33.33");
        assert_eq!(format_percent(12.5), "12.5");
    }

    #[test]
    fn test_export_mode_has_no_decoration() {
        let template = one_text_template("Hi");
        let mut out = String::new();
        render_template(&mut out, &template, RenderMode::Export);
        assert!(!out.contains(UI_CONTROL_CLASS));
        assert!(!out.contains("<button"));
        for class in EDITOR_ONLY_CLASSES {
            assert!(!out.contains(class), "export leaked {class}");
        }
        assert!(!out.contains("class=\"\""));
        assert!(!out.contains("style=\"\""));
    }

    #[test]
    fn test_preview_mode_marks_controls_and_selection() {
        let template = one_text_template("Hi");
        let path = ElementPath::new(
            SectionId(0),
            ColumnId(0),
            template.sections()[0].columns[0].elements[0].id,
        );
        let selection = Selection {
            section: Some(SectionId(0)),
            column: Some(ColumnId(0)),
            element: Some(path),
        };
        let mut out = String::new();
        render_template(&mut out, &template, RenderMode::Preview(&selection));
        assert!(out.contains(UI_CONTROL_CLASS));
        assert!(out.contains("border-blue-500"));
        assert!(out.contains("bg-gray-100"));
        assert!(out.contains("bg-blue-50"));
        assert!(out.contains("data-action=\"remove-element\""));
        assert!(out.contains("<div class=\"section-controls ui-control\"><button"));
        assert_eq!(
            out.matches("<button type=\"button\" class=\"ui-control\" data-action=")
                .count(),
            4
        );
    }

    #[test]
    fn test_text_area_pre_wrap_once() {
        let mut template = Template::new();
        let section = template.add_section();
        let id = template
            .drop_element(section, ColumnId(0), ElementType::TextArea)
            .expect("drop");
        template
            .update_element(
                ElementPath::new(section, ColumnId(0), id),
                mailcraft_core::ElementUpdate {
                    content: Some("a\n\nb".to_string()),
                    ..Default::default()
                },
            )
            .expect("update");
        let mut out = String::new();
        render_template(&mut out, &template, RenderMode::Export);
        assert_eq!(out.matches("white-space: pre-wrap;").count(), 1);
        assert!(out.contains(">a<br/>&nbsp;<br/>b</div>"));
    }

    #[test]
    fn test_button_falls_back_to_hash_link() {
        let mut template = Template::new();
        let section = template.add_section();
        let id = template
            .drop_element(section, ColumnId(0), ElementType::Button)
            .expect("drop");
        template
            .update_element(
                ElementPath::new(section, ColumnId(0), id),
                mailcraft_core::ElementUpdate {
                    href: Some(String::new()),
                    ..Default::default()
                },
            )
            .expect("update");
        let mut out = String::new();
        render_template(&mut out, &template, RenderMode::Export);
        assert!(out.contains("href=\"#\""));
    }
}
