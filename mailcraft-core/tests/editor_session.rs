//! Editor Session Integration Tests
//!
//! Exercises the document model through the session API:
//! - Section id bookkeeping across add/remove sequences
//! - Split/merge content preservation
//! - Button link synchronisation
//! - Selection consistency under structural edits

use std::collections::BTreeSet;

use mailcraft_core::{
    defaults, ColumnId, EditorSession, ElementId, ElementKind, ElementPath, ElementType,
    ElementUpdate, SectionId,
};

/// Pull `(href, company_id)` out of a button element.
fn button_link(session: &EditorSession, path: ElementPath) -> (String, String) {
    match &session.template().element(path).expect("button exists").kind {
        ElementKind::Button {
            href, company_id, ..
        } => (
            href.clone().expect("href"),
            company_id.clone().expect("company id"),
        ),
        other => panic!("expected button, got {other:?}"),
    }
}

fn section_ids(session: &EditorSession) -> BTreeSet<u32> {
    session.template().sections().iter().map(|s| s.id.0).collect()
}

// ============================================================================
// Section bookkeeping
// ============================================================================

#[test]
fn test_section_ids_track_adds_and_removes() {
    let mut session = EditorSession::default();
    let mut expected = BTreeSet::new();

    // Interleave adds and removes in a fixed but irregular pattern.
    for step in 0u32..40 {
        if step % 3 == 2 {
            let victim = expected.iter().nth((step as usize) % expected.len()).copied();
            if let Some(victim) = victim {
                assert!(session.remove_section(SectionId(victim)));
                expected.remove(&victim);
            }
        } else {
            let id = session.add_section();
            assert!(expected.insert(id.0), "duplicate id {id}");
        }
        assert_eq!(section_ids(&session), expected);
    }
}

#[test]
fn test_remove_every_section_restarts_ids() {
    let mut session = EditorSession::default();
    let a = session.add_section();
    let b = session.add_section();
    session.remove_section(a);
    session.remove_section(b);
    assert!(session.template().is_empty());
    assert_eq!(session.add_section(), SectionId(0));
}

// ============================================================================
// Split / merge
// ============================================================================

#[test]
fn test_split_then_merge_preserves_content() {
    let mut session = EditorSession::default();
    let section = session.add_section();
    session.split_section(section, 3);

    let mut dropped = Vec::new();
    for (column, element_type) in [
        (0, ElementType::Text),
        (1, ElementType::Image),
        (2, ElementType::Button),
        (1, ElementType::TextArea),
        (0, ElementType::Button),
    ] {
        let id = session
            .drop_element(section, ColumnId(column), element_type)
            .expect("drop");
        dropped.push((column, id));
    }
    let before: Vec<_> = session
        .template()
        .section(section)
        .expect("section")
        .elements()
        .cloned()
        .collect();

    for count in 1..=5 {
        assert!(session.split_section(section, count));
        assert!(session.merge_columns(section));

        let merged = session.template().section(section).expect("section");
        assert_eq!(merged.columns.len(), 1);
        let after: Vec<_> = merged.elements().cloned().collect();
        assert_eq!(after.len(), before.len());
        for element in &before {
            assert!(after.contains(element), "lost element {}", element.id);
        }
    }

    // Relative order from each source column survives.
    let order: Vec<ElementId> = session
        .template()
        .section(section)
        .expect("section")
        .elements()
        .map(|e| e.id)
        .collect();
    for source in 0..3 {
        let expected: Vec<ElementId> = dropped
            .iter()
            .filter(|(column, _)| *column == source)
            .map(|(_, id)| *id)
            .collect();
        let actual: Vec<ElementId> = order
            .iter()
            .copied()
            .filter(|id| expected.contains(id))
            .collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_split_widths_sum_to_full() {
    let mut session = EditorSession::default();
    let section = session.add_section();
    for count in 1..=5u8 {
        session.split_section(section, count);
        let total: f32 = session
            .template()
            .section(section)
            .expect("section")
            .columns
            .iter()
            .map(|c| c.width)
            .sum();
        assert!((total - 100.0).abs() < 1e-3, "{count} columns sum to {total}");
    }
}

// ============================================================================
// Button links
// ============================================================================

#[test]
fn test_href_update_sets_company_id() {
    let mut session = EditorSession::default();
    let section = session.add_section();
    let id = session
        .drop_element(section, ColumnId(0), ElementType::Button)
        .expect("drop");
    let path = ElementPath::new(section, ColumnId(0), id);

    for value in ["abc", "6791d6ad94210ae8d23f93ae", "x-y_z"] {
        let href = format!("https://example.test/go?workflowID=$workflow_id$&companyID={value}&unmask=true");
        assert!(session.update_element(
            path,
            ElementUpdate {
                href: Some(href.clone()),
                ..ElementUpdate::default()
            },
        ));
        assert_eq!(button_link(&session, path), (href, value.to_string()));
    }
}

#[test]
fn test_company_id_update_rewrites_href() {
    let mut session = EditorSession::default();
    let section = session.add_section();
    let id = session
        .drop_element(section, ColumnId(0), ElementType::Button)
        .expect("drop");
    let path = ElementPath::new(section, ColumnId(0), id);

    assert!(session.update_element(
        path,
        ElementUpdate {
            company_id: Some("acme".to_string()),
            ..ElementUpdate::default()
        },
    ));
    let (href, company_id) = button_link(&session, path);
    assert_eq!(company_id, "acme");
    assert_eq!(
        href,
        defaults::BUTTON_HREF.replace(defaults::COMPANY_ID, "acme"),
        "only the companyID parameter changes"
    );
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_remove_element_selection_rules() {
    let mut session = EditorSession::default();
    let section = session.add_section();
    let first = session
        .drop_element(section, ColumnId(0), ElementType::Text)
        .expect("drop");
    let second = session
        .drop_element(section, ColumnId(0), ElementType::Text)
        .expect("drop");
    let first = ElementPath::new(section, ColumnId(0), first);
    let second = ElementPath::new(section, ColumnId(0), second);

    assert!(session.select_element(first));
    assert!(session.remove_element(second));
    assert_eq!(session.selection().element, Some(first));

    assert!(session.remove_element(first));
    assert_eq!(session.selection().element, None);
}

#[test]
fn test_stale_selection_after_section_removal_is_harmless() {
    let mut session = EditorSession::with_default_template();
    let section = SectionId(2);
    assert!(session.select_column(section, ColumnId(0)));
    assert!(session.remove_section(section));
    assert!(session.active_section().is_none());

    // A width field still bound to the removed section does nothing.
    let before = session.template().clone();
    assert!(!session.set_column_width_input(section, ColumnId(0), "60"));
    assert_eq!(session.template(), &before);
}
