//! Pure input handling: quadrature decoding, focus arithmetic and
//! event dispatch onto a menu screen.

use super::{CharDisplay, InputEvent};
use crate::menu::{MenuScreen, Selection};

/// Move a 1-based focus one item forward, wrapping past the end.
///
/// An empty list keeps the focus where it is.
pub fn select_next(focus: usize, item_count: usize) -> usize {
    if item_count == 0 {
        focus
    } else if focus >= item_count {
        1
    } else {
        focus + 1
    }
}

/// Move a 1-based focus one item back, wrapping below the first item.
///
/// An empty list keeps the focus where it is.
pub fn select_prev(focus: usize, item_count: usize) -> usize {
    if item_count == 0 {
        focus
    } else if focus <= 1 || focus > item_count {
        item_count
    } else {
        focus - 1
    }
}

/// Physical turning direction of the knob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Map a knob rotation to a menu event.
pub fn event_for(rotation: Rotation, clockwise_is_next: bool) -> InputEvent {
    match (rotation, clockwise_is_next) {
        (Rotation::Clockwise, true) | (Rotation::CounterClockwise, false) => {
            InputEvent::RotateForward
        }
        (Rotation::Clockwise, false) | (Rotation::CounterClockwise, true) => {
            InputEvent::RotateBackward
        }
    }
}

/// Quadrature steps per mechanical detent.
const STEPS_PER_DETENT: i8 = 4;

/// Step contribution of each `(previous << 2) | current` pin state pair.
///
/// Pin state is `(a << 1) | b`. Clockwise walks 00 → 01 → 11 → 10 → 00;
/// unchanged states and double jumps (a missed edge) count as zero.
const TRANSITIONS: [i8; 16] = [0, 1, -1, 0, -1, 0, 0, 1, 1, 0, 0, -1, 0, -1, 1, 0];

/// Gray-code decoder for a two-pin rotary encoder.
#[derive(Clone, Copy, Debug)]
pub struct QuadratureDecoder {
    state: u8,
    steps: i8,
}

impl QuadratureDecoder {
    /// Start from the pins' current levels.
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: pin_state(a, b),
            steps: 0,
        }
    }

    /// Feed the latest pin levels. Returns a rotation once a full detent
    /// has been travelled in one direction.
    pub fn update(&mut self, a: bool, b: bool) -> Option<Rotation> {
        let next = pin_state(a, b);
        let index = ((self.state << 2) | next) as usize;
        self.state = next;
        self.steps += TRANSITIONS[index];

        if self.steps >= STEPS_PER_DETENT {
            self.steps = 0;
            Some(Rotation::Clockwise)
        } else if self.steps <= -STEPS_PER_DETENT {
            self.steps = 0;
            Some(Rotation::CounterClockwise)
        } else {
            None
        }
    }
}

fn pin_state(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | b as u8
}

/// Apply one input event to the active screen.
///
/// Rotation returns `Ok(None)`; a press returns what `choose` did. Errors
/// come only from `handler` and are passed through untouched.
pub fn dispatch<'a, D, P, F, E>(
    screen: &mut MenuScreen<'a, D, P>,
    event: InputEvent,
    handler: F,
) -> Result<Option<Selection>, E>
where
    D: CharDisplay,
    F: FnMut(&mut MenuScreen<'a, D, P>, &'a str, &'a P) -> Result<(), E>,
{
    match event {
        InputEvent::RotateForward => {
            screen.focus_next();
            Ok(None)
        }
        InputEvent::RotateBackward => {
            screen.focus_prev();
            Ok(None)
        }
        InputEvent::Press => screen.choose(handler).map(Some),
    }
}
