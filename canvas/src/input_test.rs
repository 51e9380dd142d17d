use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
}

#[test]
fn button_unknown_code_is_primary() {
    assert_eq!(Button::from_dom(7), Button::Primary);
    assert_eq!(Button::from_dom(-1), Button::Primary);
}

// =============================================================
// Key
// =============================================================

#[test]
fn delete_and_backspace_are_delete_keys() {
    assert!(Key("Delete".into()).is_delete());
    assert!(Key("Backspace".into()).is_delete());
    assert!(!Key("d".into()).is_delete());
}

#[test]
fn escape_key() {
    assert!(Key("Escape".into()).is_escape());
    assert!(!Key("Esc".into()).is_escape());
}

// =============================================================
// Modifiers / UiState
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

#[test]
fn ui_state_default_has_nothing_selected() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(ui.config_id.is_none());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert!(state.dragging_sensor().is_none());
}

#[test]
fn dragging_sensor_reports_id() {
    let id = sensors::Sensor::new(0.0, 0.0).id;
    let state = InputState::DraggingSensor {
        id,
        offset: Point::new(1.0, 2.0),
        origin: Point::new(0.0, 0.0),
        was_selected: false,
    };
    assert_eq!(state.dragging_sensor(), Some(id));
    assert!(!state.is_idle());
}

#[test]
fn dragging_intruder_is_not_a_sensor_drag() {
    let state = InputState::DraggingIntruder { offset: Point::new(0.0, 0.0) };
    assert!(state.dragging_sensor().is_none());
    assert!(!state.is_idle());
}
