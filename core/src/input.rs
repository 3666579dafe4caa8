use serde::{Deserialize, Serialize};

use crate::*;

/// Which family of pointer events a session listens to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    #[default]
    Mouse,
    Touch,
}

/// Raw per-cell events a renderer forwards to the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    MouseDown,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchEnd,
    TouchMove,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    PressStart,
    PressEnd,
    Drag,
}

impl PointerEvent {
    pub const fn is_touch(self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchEnd | Self::TouchMove)
    }

    pub const fn gesture(self) -> Gesture {
        use PointerEvent::*;
        match self {
            MouseDown | TouchStart => Gesture::PressStart,
            MouseUp | MouseLeave | TouchEnd => Gesture::PressEnd,
            TouchMove => Gesture::Drag,
        }
    }
}

impl InputMode {
    pub const fn accepts(self, event: PointerEvent) -> bool {
        match self {
            Self::Mouse => !event.is_touch(),
            Self::Touch => event.is_touch(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PressState {
    #[default]
    Idle,
    Pressing(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Open(Coord2),
    ToggleFlag(Coord2),
}

/// What the owner of the press timer has to do after a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerAction {
    Keep,
    /// Arm the long-press timer, replacing any armed one.
    Start,
    Cancel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    pub timer: TimerAction,
    pub intent: Option<Intent>,
}

impl Reaction {
    const NONE: Self = Self {
        timer: TimerAction::Keep,
        intent: None,
    };

    const fn timer(timer: TimerAction) -> Self {
        Self {
            timer,
            intent: None,
        }
    }
}

/// Tap versus long-press versus drag, one machine per session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputDispatcher {
    state: PressState,
    is_dragging: bool,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn handle(&mut self, gesture: Gesture, coords: Coord2) -> Reaction {
        match gesture {
            Gesture::PressStart => self.press_start(coords),
            Gesture::PressEnd => self.press_end(),
            Gesture::Drag => self.drag(),
        }
    }

    pub fn press_start(&mut self, coords: Coord2) -> Reaction {
        match self.state {
            PressState::Pressing(pressed) if pressed != coords => {
                log::trace!("Press at {:?} while {:?} is held, aborting", coords, pressed);
                self.state = PressState::Idle;
                Reaction::timer(TimerAction::Cancel)
            }
            _ => {
                self.state = PressState::Pressing(coords);
                Reaction::timer(TimerAction::Start)
            }
        }
    }

    pub fn press_end(&mut self) -> Reaction {
        let was_dragging = core::mem::take(&mut self.is_dragging);
        match core::mem::take(&mut self.state) {
            PressState::Idle => Reaction::NONE,
            PressState::Pressing(_) if was_dragging => Reaction::timer(TimerAction::Cancel),
            PressState::Pressing(coords) => Reaction {
                timer: TimerAction::Cancel,
                intent: Some(Intent::Open(coords)),
            },
        }
    }

    pub fn drag(&mut self) -> Reaction {
        self.is_dragging = true;
        match core::mem::take(&mut self.state) {
            PressState::Idle => Reaction::NONE,
            PressState::Pressing(coords) => {
                log::trace!("Drag while pressing {:?}, cancelling", coords);
                Reaction::timer(TimerAction::Cancel)
            }
        }
    }

    /// The press timer fired before the press ended.
    pub fn long_press_elapsed(&mut self) -> Option<Intent> {
        match core::mem::take(&mut self.state) {
            PressState::Idle => None,
            PressState::Pressing(coords) => Some(Intent::ToggleFlag(coords)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_opens() {
        let mut input = InputDispatcher::new();

        assert_eq!(input.press_start((1, 2)).timer, TimerAction::Start);
        assert_eq!(input.state(), PressState::Pressing((1, 2)));

        let reaction = input.press_end();
        assert_eq!(reaction.timer, TimerAction::Cancel);
        assert_eq!(reaction.intent, Some(Intent::Open((1, 2))));
        assert_eq!(input.state(), PressState::Idle);
    }

    #[test]
    fn long_press_flags_and_swallows_release() {
        let mut input = InputDispatcher::new();
        input.press_start((0, 0));

        assert_eq!(input.long_press_elapsed(), Some(Intent::ToggleFlag((0, 0))));
        assert_eq!(input.state(), PressState::Idle);
        assert_eq!(input.press_end(), Reaction::NONE);
    }

    #[test]
    fn drag_cancels_without_intent() {
        let mut input = InputDispatcher::new();
        input.press_start((3, 3));

        assert_eq!(input.drag(), Reaction::timer(TimerAction::Cancel));
        assert!(input.is_dragging());
        assert_eq!(input.long_press_elapsed(), None);

        assert_eq!(input.press_end().intent, None);
        assert!(!input.is_dragging());
    }

    #[test]
    fn drag_flag_suppresses_open_until_release() {
        let mut input = InputDispatcher::new();
        input.drag();
        input.press_start((2, 2));

        let reaction = input.press_end();
        assert_eq!(reaction.intent, None);
        assert_eq!(reaction.timer, TimerAction::Cancel);

        input.press_start((2, 2));
        assert_eq!(input.press_end().intent, Some(Intent::Open((2, 2))));
    }

    #[test]
    fn second_press_elsewhere_aborts() {
        let mut input = InputDispatcher::new();
        input.press_start((0, 0));

        assert_eq!(input.press_start((1, 0)).timer, TimerAction::Cancel);
        assert_eq!(input.state(), PressState::Idle);
        assert_eq!(input.press_end().intent, None);
    }

    #[test]
    fn second_press_on_same_cell_rearms() {
        let mut input = InputDispatcher::new();
        input.press_start((0, 0));

        assert_eq!(input.press_start((0, 0)).timer, TimerAction::Start);
        assert_eq!(input.state(), PressState::Pressing((0, 0)));
    }

    #[test]
    fn release_while_idle_is_noop() {
        let mut input = InputDispatcher::new();
        assert_eq!(input.press_end(), Reaction::NONE);
    }

    #[test]
    fn mode_filters_events() {
        assert!(InputMode::Mouse.accepts(PointerEvent::MouseLeave));
        assert!(!InputMode::Mouse.accepts(PointerEvent::TouchStart));
        assert!(InputMode::Touch.accepts(PointerEvent::TouchMove));
        assert!(!InputMode::Touch.accepts(PointerEvent::MouseDown));
        assert_eq!(PointerEvent::MouseLeave.gesture(), Gesture::PressEnd);
    }
}
