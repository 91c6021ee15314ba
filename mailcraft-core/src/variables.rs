//! Catalog of placeholder variables understood by the delivery backend.
//!
//! The catalog is reference data only. Tokens are copied into element
//! content by hand and pass through the exporter untouched.

use serde::Serialize;

/// A placeholder variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Literal token, e.g. `$client_name$`.
    pub name: &'static str,
    /// What the token expands to.
    pub description: &'static str,
    /// Display group.
    pub category: &'static str,
}

const fn var(name: &'static str, description: &'static str, category: &'static str) -> Variable {
    Variable {
        name,
        description,
        category,
    }
}

static CATALOG: &[Variable] = &[
    var(
        "$incident_newVal$",
        "This will hold a new value when someone change the incident property value one to another",
        "Incident",
    ),
    var(
        "$incident_oldVal$",
        "This will hold a old value when someone change the incident property value one to another",
        "Incident",
    ),
    var("$incident_updatedField$", "Field Name which is updated", "Incident"),
    var("$incident_name$", "Name of the incident", "Incident"),
    var("$workflow_id$", "Unique workflow identifier", "Workflow"),
    var(
        "$emoSignature_<key>$",
        "If you want to show emo signature data in a template this placeholder can be used",
        "Signature",
    ),
    var(
        "$incident_customFields_<fieldId>$",
        "This can be use to show custom field value in the template",
        "Custom Fields",
    ),
    var("$incident_comment_status_current$", "Current status comment", "Comment"),
    var(
        "$incident_comment_status_<statusId>$",
        "This can be used to append comment based on the status",
        "Comment",
    ),
    var("$incident_lastComment$", "Last comment of the incident", "Comment"),
    var("$emoSignature_Hospital$", "Add emo signature data", "Signature"),
    var("$incident_assigneeName$", "Current assignee name", "Assignee"),
    var("$incident_previousAssigneeName$", "Previous assignee name", "Assignee"),
    var("$incident_previousAssigneeEmail$", "Previous assignee email", "Assignee"),
    var(
        "$incident_updatedByName$",
        "Name of the person who updated the incident",
        "Update",
    ),
    var(
        "$incident_updatedByEmail$",
        "Email of the person who updated the incident",
        "Update",
    ),
    var("$incident_id$", "Unique identifier used by the system", "Incident"),
    var("$incident_companyId$", "Company Id belong to incident", "Incident"),
    var("$incident_number$", "Human readable incident number (123)", "Incident"),
    var("$incident_created_date$", "Incident created date", "Incident"),
    var("$incident_description$", "Description of the incident", "Incident"),
    var("$incident_type$", "Type of the incident", "Incident"),
    var("$incident_status$", "Status of the incident", "Incident"),
    var("$incident_priority$", "Priority of the incident", "Incident"),
    var("$client_name$", "Name of the person who created the incident", "Client"),
    var("$client_email$", "Email of the person who created the incident", "Client"),
    var(
        "$client_telephone$",
        "Telephone of the person who created the incident",
        "Client",
    ),
    var("$incidentURL$", "Append Edit URL to Incident", "URL"),
    var("showFileUrl", "Show file URL", "URL"),
    var("\"objectListPlaceholder\": true,", "Object list placeholder", "Other"),
];

/// Every known variable, in catalog order.
#[must_use]
pub fn catalog() -> &'static [Variable] {
    CATALOG
}

/// Variables grouped by category.
///
/// Categories appear in the order they are first seen in the catalog.
#[must_use]
pub fn by_category() -> Vec<(&'static str, Vec<&'static Variable>)> {
    let mut groups: Vec<(&'static str, Vec<&'static Variable>)> = Vec::new();
    for variable in CATALOG {
        match groups.iter_mut().find(|(category, _)| *category == variable.category) {
            Some((_, members)) => members.push(variable),
            None => groups.push((variable.category, vec![variable])),
        }
    }
    groups
}

/// Look a variable up by its literal token.
#[must_use]
pub fn find(name: &str) -> Option<&'static Variable> {
    CATALOG.iter().find(|v| v.name == name)
}
