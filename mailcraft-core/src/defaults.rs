//! Default content for new elements and the starter template.

use chrono::{DateTime, Datelike, Local, TimeZone};

use crate::{
    Column, ColumnId, Element, ElementKind, ElementStyle, Section, SectionId, Template, TextAlign,
    FULL_WIDTH,
};

/// Content of a freshly dropped text element.
pub const TEXT_CONTENT: &str = "Text content";

/// Content of a freshly dropped text area.
pub const TEXT_AREA_CONTENT: &str = "Longer text content...";

/// Label of a freshly dropped button.
pub const BUTTON_LABEL: &str = "Button Text";

/// Image shown until the user sets a URL.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://storage.emojot.com/pictures/generalImages/67761761cb917201e680c031-skin2.png";

/// Company identifier baked into [`BUTTON_HREF`].
pub const COMPANY_ID: &str = "6791d6ad94210ae8d23f93ae";

/// Link given to new buttons.
pub const BUTTON_HREF: &str = "https://emojot.com/emojotDashboard/samlsso?redirectPage=reports/incidentManagement/incidentEdit.jsp&workflowID=$workflow_id$&incidentID=$incident_id$&trimOut=true&companyID=6791d6ad94210ae8d23f93ae&unmask=true";

/// Brand accent used for buttons and the footer band.
pub const BRAND_COLOR: &str = "#0c7bbf";

const BODY_TEXT: &str = "A new complaint has been created. Please review it by clicking the button below.\n\nClient: $client_name$\n\nTicket ID: $incident_number$\n\nLocation: $emoSignature_Location$\n\nCategory: $incident_customFields_category$\n\nComment: $incident_customFields_customerComment$";

/// The five-section starter template, footer dated with the current year.
#[must_use]
pub fn default_template() -> Template {
    default_template_for_year(current_year())
}

/// The five-section starter template: logo, greeting, body, call to action
/// and footer.
#[must_use]
pub fn default_template_for_year(year: i32) -> Template {
    let logo = Element::new(ElementKind::Image {
        src: PLACEHOLDER_IMAGE_URL.to_string(),
        width: "auto".to_string(),
        height: "100px".to_string(),
    });

    let greeting = Element::new(ElementKind::Text {
        content: "Hi Admin,".to_string(),
    })
    .with_style(ElementStyle {
        font_size: "18px".to_string(),
        font_weight: "bold".to_string(),
        ..ElementStyle::default()
    });

    let body = Element::new(ElementKind::TextArea {
        content: BODY_TEXT.to_string(),
    });

    let call_to_action = Element::new(ElementKind::Button {
        label: "Click here to review".to_string(),
        href: Some(BUTTON_HREF.to_string()),
        company_id: Some(COMPANY_ID.to_string()),
        background_color: BRAND_COLOR.to_string(),
    })
    .with_style(ElementStyle {
        color: "#ffffff".to_string(),
        font_weight: "bold".to_string(),
        text_align: TextAlign::Center,
        ..ElementStyle::default()
    });

    let footer = Element::new(ElementKind::Text {
        content: format!("© {year} Emojot. All rights reserved."),
    })
    .with_style(ElementStyle {
        color: "#ffffff".to_string(),
        font_size: "14px".to_string(),
        text_align: TextAlign::Center,
        ..ElementStyle::default()
    });

    let sections = [
        ("#ffffff", logo),
        ("#ffffff", greeting),
        ("#ffffff", body),
        ("#ffffff", call_to_action),
        (BRAND_COLOR, footer),
    ]
    .into_iter()
    .zip(0..)
    .map(|((background, element), id)| {
        let mut column = Column::new(ColumnId(0), FULL_WIDTH);
        column.elements.push(element);
        Section {
            id: SectionId(id),
            background_color: background.to_string(),
            columns: vec![column],
        }
    })
    .collect();

    Template::from_sections(sections)
}

fn current_year() -> i32 {
    year_of(&Local::now())
}

/// Calendar year of `now` in its own time zone.
fn year_of<Tz: TimeZone>(now: &DateTime<Tz>) -> i32 {
    now.year()
}
