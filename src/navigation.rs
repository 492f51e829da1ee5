use crate::dom::Document;
use tracing::debug;

/// Deactivates every section and menu button, then activates the section
/// with id `target` and every menu button pointing at it. The two passes are
/// independent: buttons light up even when no such section exists.
pub fn activate_section(doc: &mut Document, target: &str) {
    for section in &mut doc.sections {
        section.active = false;
    }
    for button in &mut doc.menu_buttons {
        button.active = false;
    }

    match doc.sections.iter_mut().find(|section| section.id == target) {
        Some(section) => section.active = true,
        None => debug!(section = target, "no section to activate"),
    }

    for button in doc.menu_buttons.iter_mut().filter(|b| b.target == target) {
        button.active = true;
    }
}

pub fn select_menu(doc: &mut Document, target: &str) {
    activate_section(doc, target);
    close_drawer(doc);
}

pub fn open_drawer(doc: &mut Document) {
    doc.drawer_open = true;
    doc.overlay_active = true;
}

pub fn close_drawer(doc: &mut Document) {
    doc.drawer_open = false;
    doc.overlay_active = false;
}

pub fn toggle_call_actions(doc: &mut Document) {
    doc.call_actions_open = !doc.call_actions_open;
}

pub fn toggle_call_tooltip(doc: &mut Document, index: usize) {
    match doc.call_buttons.get_mut(index) {
        Some(button) => button.show_tooltip = !button.show_tooltip,
        None => debug!(index, "no call button to toggle"),
    }
}
