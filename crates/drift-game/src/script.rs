//! Scripted pilot for headless runs.
//!
//! The flight repeats every [`CYCLE`] frames: thrust out, fire a volley,
//! look around, cycle the camera through all three modes, then brake.

use drift_input::{Control, FrameInput};

/// Length of one scripted cycle in frames.
pub const CYCLE: u32 = 300;

/// Input for frame `frame` of the flight.
pub fn input_for(frame: u32) -> FrameInput {
    let t = frame % CYCLE;
    let mut input = FrameInput::new();

    if t < 90 {
        input = input.hold(Control::Forward);
    }
    if (60..120).contains(&t) && t % 10 == 0 {
        input = input.press(Control::Fire);
    }
    if (90..150).contains(&t) {
        input = input.with_pointer(0.5, -0.25);
    }
    if (120..135).contains(&t) {
        input = input.hold(Control::RollLeft);
    }
    if t == 160 || t == 200 || t == 240 {
        input = input.press(Control::CameraMode);
    }
    if (170..190).contains(&t) {
        input = input.with_scroll(-1.0);
    }
    if (250..290).contains(&t) {
        input = input.hold(Control::Backward);
    }
    input
}

#[cfg(test)]
mod tests {
    use drift_input::{ControlMap, InputReplay, InputSource};

    use super::*;

    #[test]
    fn test_camera_toggles_three_times_per_cycle() {
        let presses = (0..CYCLE)
            .filter(|&f| input_for(f).just_pressed(Control::CameraMode))
            .count();
        assert_eq!(presses, 3);
    }

    #[test]
    fn test_fire_presses_are_separated() {
        for f in 1..CYCLE {
            let now = input_for(f).is_active(Control::Fire);
            let before = input_for(f - 1).is_active(Control::Fire);
            assert!(!(now && before), "fire held across frames {} and {f}", f - 1);
        }
    }

    #[test]
    fn test_script_repeats() {
        assert_eq!(input_for(7), input_for(7 + CYCLE));
    }

    #[test]
    fn test_replayed_script_keeps_presses() {
        let mut pilot = InputReplay::new(ControlMap::default());
        let (mut toggles, mut shots) = (0, 0);
        for f in 0..CYCLE {
            let input = pilot.frame(&input_for(f));
            toggles += usize::from(input.just_pressed(Control::CameraMode));
            shots += usize::from(input.just_pressed(Control::Fire));
        }
        assert_eq!(toggles, 3);
        assert_eq!(shots, 6);
    }
}
