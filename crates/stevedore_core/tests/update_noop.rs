use stevedore_core::{update, Msg, PanelState};

#[test]
fn update_is_noop() {
    let state = PanelState::default();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
