use pranksters_rendering_macroquad::{ButtonLatch, LatchedButtons, TouchButton};

fn run_sequence(sequence: &[Option<TouchButton>]) -> Vec<LatchedButtons> {
    let mut latch = ButtonLatch::default();
    let mut frames = Vec::new();
    for &pressed in sequence {
        frames.push(latch.take());
        if let Some(button) = pressed {
            latch.register(button);
        }
    }

    // Flush any trailing latched press so the harness observes the final frame.
    frames.push(latch.take());
    frames
}

#[test]
fn touch_button_sequence_is_deterministic() {
    let sequence = [
        None,
        Some(TouchButton::Swap),
        None,
        Some(TouchButton::Action),
        Some(TouchButton::Mute),
    ];

    let first_run = run_sequence(&sequence);
    let second_run = run_sequence(&sequence);

    assert_eq!(first_run, second_run);
    assert_eq!(first_run.len(), sequence.len() + 1);
    assert_eq!(first_run[0], LatchedButtons::default());
    assert_eq!(first_run[1], LatchedButtons::default());
    assert!(first_run[2].swap);
    assert_eq!(first_run[3], LatchedButtons::default());
    assert!(first_run[4].action && !first_run[4].swap);
    assert!(first_run[5].mute);
}

#[test]
fn presses_within_one_frame_are_combined_and_fire_once() {
    let mut latch = ButtonLatch::default();
    latch.register(TouchButton::Restart);
    latch.register(TouchButton::Swap);
    latch.register(TouchButton::Swap);

    let pressed = latch.take();
    assert!(pressed.restart && pressed.swap);
    assert!(!pressed.action && !pressed.mute);
    assert_eq!(latch.take(), LatchedButtons::default());
}
