//! Template elements - the leaf content nodes of a column.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

/// Matches the `companyID=<value>` query parameter of a button link.
static COMPANY_ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"companyID=([^&]+)").expect("companyID pattern is valid"));

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The palette entry a new element is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Single-line text.
    Text,
    /// Multi-line text block.
    TextArea,
    /// Image by URL.
    Image,
    /// Link button.
    Button,
}

impl ElementType {
    /// All element types in palette order.
    pub const ALL: [Self; 4] = [Self::Text, Self::TextArea, Self::Image, Self::Button];
}

/// Horizontal alignment of an element's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

impl TextAlign {
    /// CSS keyword for `text-align`.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Presentation shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Text color as hex.
    pub color: String,
    /// CSS font size, e.g. `16px`.
    pub font_size: String,
    /// CSS font weight, e.g. `normal` or `bold`.
    pub font_weight: String,
    /// Content alignment.
    pub text_align: TextAlign,
    /// CSS padding shorthand.
    pub padding: String,
    /// CSS line height.
    pub line_height: String,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            font_size: "16px".to_string(),
            font_weight: "normal".to_string(),
            text_align: TextAlign::Left,
            padding: "10px".to_string(),
            line_height: "1.5".to_string(),
        }
    }
}

/// The type of content an element contains.
///
/// Each variant carries only the fields that mean something for it, so a
/// text element can never hold a link and an image can never hold a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// A single line of text.
    Text {
        /// Text content.
        content: String,
    },

    /// A multi-line text block; line breaks are significant.
    TextArea {
        /// Text content, possibly containing `\n`.
        content: String,
    },

    /// An image.
    Image {
        /// Image source URL.
        src: String,
        /// CSS width, e.g. `auto`.
        width: String,
        /// CSS height, e.g. `100px`.
        height: String,
    },

    /// A link rendered as a button.
    Button {
        /// Button label.
        label: String,
        /// Destination URL, usually containing placeholder tokens.
        href: Option<String>,
        /// Company identifier mirrored from the `companyID=` parameter of `href`.
        company_id: Option<String>,
        /// Button fill color as hex.
        background_color: String,
    },
}

impl ElementKind {
    /// The palette type this content belongs to.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Text { .. } => ElementType::Text,
            Self::TextArea { .. } => ElementType::TextArea,
            Self::Image { .. } => ElementType::Image,
            Self::Button { .. } => ElementType::Button,
        }
    }

    /// The primary textual content: text, image URL or button label.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text { content } | Self::TextArea { content } => content,
            Self::Image { src, .. } => src,
            Self::Button { label, .. } => label,
        }
    }
}

/// A partial update merged into an element by [`Element::apply_update`].
///
/// `None` fields are left untouched. Fields that do not apply to the
/// element's kind (e.g. `href` on a text element) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementUpdate {
    /// Text content, image URL or button label.
    pub content: Option<String>,
    /// Text color.
    pub color: Option<String>,
    /// Font size.
    pub font_size: Option<String>,
    /// Font weight.
    pub font_weight: Option<String>,
    /// Alignment.
    pub text_align: Option<TextAlign>,
    /// Padding.
    pub padding: Option<String>,
    /// Line height.
    pub line_height: Option<String>,
    /// Image width.
    pub width: Option<String>,
    /// Image height.
    pub height: Option<String>,
    /// Button fill color.
    pub background_color: Option<String>,
    /// Button destination URL.
    pub href: Option<String>,
    /// Button company identifier.
    pub company_id: Option<String>,
}

/// A template element with content and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Identifier, unique among its siblings.
    pub id: ElementId,
    /// Element content.
    pub kind: ElementKind,
    /// Presentation.
    pub style: ElementStyle,
}

impl Element {
    /// Create a new element with the given kind and default style.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            style: ElementStyle::default(),
        }
    }

    /// Create the element a palette drop of `element_type` produces.
    #[must_use]
    pub fn with_defaults(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Text => Self::new(ElementKind::Text {
                content: defaults::TEXT_CONTENT.to_string(),
            }),
            ElementType::TextArea => Self::new(ElementKind::TextArea {
                content: defaults::TEXT_AREA_CONTENT.to_string(),
            }),
            ElementType::Image => Self::new(ElementKind::Image {
                src: defaults::PLACEHOLDER_IMAGE_URL.to_string(),
                width: "auto".to_string(),
                height: "100px".to_string(),
            }),
            ElementType::Button => Self::new(ElementKind::Button {
                label: defaults::BUTTON_LABEL.to_string(),
                href: Some(defaults::BUTTON_HREF.to_string()),
                company_id: Some(defaults::COMPANY_ID.to_string()),
                background_color: defaults::BRAND_COLOR.to_string(),
            })
            .with_style(ElementStyle {
                color: "#ffffff".to_string(),
                font_weight: "bold".to_string(),
                text_align: TextAlign::Center,
                ..ElementStyle::default()
            }),
        }
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    /// The palette type of this element.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Merge a partial update into this element.
    ///
    /// A new `href` containing `companyID=<v>` overwrites `company_id` with
    /// `<v>`. A new non-empty `company_id` rewrites the `companyID=`
    /// parameter of the current `href`, if it has one. When both are given
    /// the value derived from `href` wins.
    pub fn apply_update(&mut self, update: ElementUpdate) {
        let ElementUpdate {
            content,
            color,
            font_size,
            font_weight,
            text_align,
            padding,
            line_height,
            width,
            height,
            background_color,
            href,
            company_id,
        } = update;

        let style = &mut self.style;
        replace_if_some(&mut style.color, color);
        replace_if_some(&mut style.font_size, font_size);
        replace_if_some(&mut style.font_weight, font_weight);
        replace_if_some(&mut style.text_align, text_align);
        replace_if_some(&mut style.padding, padding);
        replace_if_some(&mut style.line_height, line_height);

        match &mut self.kind {
            ElementKind::Text { content: current } | ElementKind::TextArea { content: current } => {
                replace_if_some(current, content);
            }
            ElementKind::Image {
                src,
                width: current_width,
                height: current_height,
            } => {
                replace_if_some(src, content);
                replace_if_some(current_width, width);
                replace_if_some(current_height, height);
            }
            ElementKind::Button {
                label,
                href: current_href,
                company_id: current_company,
                background_color: current_background,
            } => {
                replace_if_some(label, content);
                replace_if_some(current_background, background_color);
                sync_link(current_href, current_company, href, company_id);
            }
        }
    }
}

fn replace_if_some<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Apply `href`/`company_id` updates to a button, keeping them in sync.
fn sync_link(
    href: &mut Option<String>,
    company_id: &mut Option<String>,
    new_href: Option<String>,
    new_company_id: Option<String>,
) {
    match (new_href, new_company_id) {
        (Some(new_href), new_company_id) => {
            let derived = extract_company_id(&new_href).map(str::to_string);
            *href = Some(new_href);
            if let Some(value) = derived.or(new_company_id) {
                *company_id = Some(value);
            }
        }
        (None, Some(new_company_id)) => {
            if !new_company_id.is_empty() {
                if let Some(current) = href.as_mut() {
                    if let Some(rewritten) = replace_company_id(current, &new_company_id) {
                        *current = rewritten;
                    }
                }
            }
            *company_id = Some(new_company_id);
        }
        (None, None) => {}
    }
}

/// Extract the value of the `companyID=` query parameter.
#[must_use]
pub fn extract_company_id(href: &str) -> Option<&str> {
    COMPANY_ID_PARAM
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrite the value of the `companyID=` query parameter.
///
/// Returns `None` if `href` has no such parameter; a link is never given a
/// parameter it did not already carry.
#[must_use]
pub fn replace_company_id(href: &str, company_id: &str) -> Option<String> {
    if !COMPANY_ID_PARAM.is_match(href) {
        return None;
    }
    let replacement = format!("companyID={company_id}");
    Some(
        COMPANY_ID_PARAM
            .replace(href, NoExpand(&replacement))
            .into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button_with_href(href: &str) -> Element {
        let mut element = Element::with_defaults(ElementType::Button);
        if let ElementKind::Button {
            href: current,
            company_id,
            ..
        } = &mut element.kind
        {
            *current = Some(href.to_string());
            *company_id = extract_company_id(href).map(str::to_string);
        }
        element
    }

    fn link(element: &Element) -> (Option<&str>, Option<&str>) {
        match &element.kind {
            ElementKind::Button {
                href, company_id, ..
            } => (href.as_deref(), company_id.as_deref()),
            other => panic!("expected button, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_per_type() {
        let text = Element::with_defaults(ElementType::Text);
        assert_eq!(text.kind.content(), "Text content");
        assert_eq!(text.style.color, "#000000");
        assert_eq!(text.style.font_size, "16px");
        assert_eq!(text.style.text_align, TextAlign::Left);

        let area = Element::with_defaults(ElementType::TextArea);
        assert_eq!(area.kind.content(), "Longer text content...");
        assert_eq!(area.style, text.style);

        let image = Element::with_defaults(ElementType::Image);
        match &image.kind {
            ElementKind::Image { width, height, .. } => {
                assert_eq!(width, "auto");
                assert_eq!(height, "100px");
            }
            other => panic!("expected image, got {other:?}"),
        }

        let button = Element::with_defaults(ElementType::Button);
        assert_eq!(button.kind.content(), "Button Text");
        assert_eq!(button.style.color, "#ffffff");
        assert_eq!(button.style.font_weight, "bold");
        assert_eq!(button.style.text_align, TextAlign::Center);
        let (href, company_id) = link(&button);
        assert_eq!(company_id, Some(defaults::COMPANY_ID));
        assert_eq!(extract_company_id(href.expect("href")), company_id);
    }

    #[test]
    fn test_fresh_ids_differ() {
        let a = Element::with_defaults(ElementType::Text);
        let b = Element::with_defaults(ElementType::Text);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_href_update_derives_company_id() {
        let mut button = Element::with_defaults(ElementType::Button);
        button.apply_update(ElementUpdate {
            href: Some("https://x.test/a?b=1&companyID=acme42&c=2".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(link(&button).1, Some("acme42"));
    }

    #[test]
    fn test_href_without_param_keeps_company_id() {
        let mut button = Element::with_defaults(ElementType::Button);
        button.apply_update(ElementUpdate {
            href: Some("https://x.test/plain".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(link(&button), (Some("https://x.test/plain"), Some(defaults::COMPANY_ID)));
    }

    #[test]
    fn test_company_id_update_rewrites_only_that_param() {
        let mut button = button_with_href("https://x.test/?a=$workflow_id$&companyID=old&z=9");
        button.apply_update(ElementUpdate {
            company_id: Some("new$1".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(
            link(&button),
            (
                Some("https://x.test/?a=$workflow_id$&companyID=new$1&z=9"),
                Some("new$1")
            )
        );
    }

    #[test]
    fn test_company_id_update_never_injects_param() {
        let mut button = button_with_href("https://x.test/?a=1");
        button.apply_update(ElementUpdate {
            company_id: Some("acme".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(link(&button), (Some("https://x.test/?a=1"), Some("acme")));
    }

    #[test]
    fn test_empty_company_id_leaves_href() {
        let mut button = button_with_href("https://x.test/?companyID=old");
        button.apply_update(ElementUpdate {
            company_id: Some(String::new()),
            ..ElementUpdate::default()
        });
        assert_eq!(link(&button), (Some("https://x.test/?companyID=old"), Some("")));
    }

    #[test]
    fn test_href_wins_over_company_id() {
        let mut button = Element::with_defaults(ElementType::Button);
        button.apply_update(ElementUpdate {
            href: Some("https://x.test/?companyID=fromhref".to_string()),
            company_id: Some("explicit".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(
            link(&button),
            (Some("https://x.test/?companyID=fromhref"), Some("fromhref"))
        );
    }

    #[test]
    fn test_inapplicable_fields_ignored() {
        let mut text = Element::with_defaults(ElementType::Text);
        let before = text.kind.clone();
        text.apply_update(ElementUpdate {
            href: Some("https://x.test/?companyID=1".to_string()),
            width: Some("50px".to_string()),
            color: Some("#ff0000".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(text.kind, before);
        assert_eq!(text.style.color, "#ff0000");
    }

    #[test]
    fn test_content_maps_to_kind_field() {
        let mut image = Element::with_defaults(ElementType::Image);
        image.apply_update(ElementUpdate {
            content: Some("https://cdn.test/logo.png".to_string()),
            height: Some("80px".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(image.kind.content(), "https://cdn.test/logo.png");

        let mut button = Element::with_defaults(ElementType::Button);
        button.apply_update(ElementUpdate {
            content: Some("Review".to_string()),
            ..ElementUpdate::default()
        });
        assert_eq!(button.kind.content(), "Review");
    }

    #[test]
    fn test_type_names_match_kind_tags() {
        for element_type in ElementType::ALL {
            let name = serde_json::to_value(element_type).expect("serialize type");
            let kind = serde_json::to_value(&Element::with_defaults(element_type).kind)
                .expect("serialize kind");
            assert_eq!(kind["type"], name);
        }
        let parsed: ElementType = serde_json::from_str("\"text_area\"").expect("parse");
        assert_eq!(parsed, ElementType::TextArea);
        assert!(serde_json::from_str::<ElementType>("\"textarea\"").is_err());
    }
}
