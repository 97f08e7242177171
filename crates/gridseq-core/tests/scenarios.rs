use gridseq_core::{
    KnobTarget, NoteParameter, PageColor, SequencerConfig, StepSequencer, StepState, page_color,
};

#[test]
fn test_edit_note_across_steps() {
    let mut seq = StepSequencer::new(SequencerConfig::default(), 4.0).unwrap();
    assert_eq!(seq.grid().num_rows(), 8);
    assert_eq!(seq.navigator().total_steps(), 16);
    assert_eq!(seq.resolution().value, 0.25);

    seq.grid_mut().set_step(2, 3, 0.8, 0.5);
    assert_eq!(seq.grid().get_step(2, 3), StepState::Start);
    assert_eq!(seq.grid().get_step(3, 3), StepState::Continue);
    assert_eq!(seq.grid().get_step(4, 3), StepState::Off);

    let editor = seq.editor().clone();
    let target = KnobTarget::Parameter(NoteParameter::Velocity);
    editor.change(seq.grid_mut(), target, 2, 3, 1, false);
    let velocity = seq.grid().get_step_velocity(2, 3);
    assert!(velocity > 0.8 && velocity < 0.81);

    for _ in 0..100 {
        editor.change(seq.grid_mut(), target, 2, 3, 1, true);
    }
    assert_eq!(seq.grid().get_step_velocity(2, 3), 1.0);

    seq.grid_mut().clear_step(2, 3);
    assert_eq!(seq.grid().get_step(2, 3), StepState::Off);
    assert_eq!(seq.grid().get_step(3, 3), StepState::Off);
}

#[test]
fn test_play_page_wins_over_selection() {
    assert_eq!(page_color(1, 4, Some(2), 3, 2), PageColor::Active);
}

#[test]
fn test_resolution_switch_keeps_notes_and_view() {
    let mut seq = StepSequencer::new(SequencerConfig::default(), 16.0).unwrap();
    seq.grid_mut().set_step(40, 0, 1.0, 1.0);
    seq.on_right();
    seq.on_right();
    assert!(seq.is_in_x_range(40));

    // 1/32: beat 10 is step 80 and the view follows to page 5
    seq.select_resolution(6).unwrap();
    assert_eq!(seq.grid().get_step(80, 0), StepState::Start);
    assert_eq!(seq.grid().get_step(87, 0), StepState::Continue);
    assert_eq!(seq.navigator().edit_page(), 4);
    assert!(!seq.is_in_x_range(80));
    seq.on_right();
    assert!(seq.is_in_x_range(80));
}
