//! Compose modal state machine.
//!
//! Two states, three events: `Closed + Compose -> Open`,
//! `Open + Dismiss | Submitted -> Closed`. Anything else is ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether the compose modal is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalState {
    /// Hidden.
    #[default]
    Closed,
    /// Showing.
    Open,
}

/// Something that happened to the compose modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalEvent {
    /// The user pressed the compose button.
    Compose,
    /// The user dismissed the modal.
    Dismiss,
    /// The post was submitted successfully.
    Submitted,
}

impl ModalState {
    /// Next state after `event`.
    #[must_use]
    pub const fn transition(self, event: ModalEvent) -> Self {
        match (self, event) {
            (Self::Closed, ModalEvent::Compose) => Self::Open,
            (Self::Open, ModalEvent::Dismiss | ModalEvent::Submitted) => Self::Closed,
            (state, _) => state,
        }
    }

    /// Whether the modal is showing.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Open/close contract of a modal.
#[cfg_attr(test, mockall::automock)]
pub trait ModalController {
    /// Show the modal.
    fn open_modal(&mut self);
    /// Hide the modal.
    fn close_modal(&mut self);
    /// Whether the modal is showing.
    fn is_open(&self) -> bool;
}

/// Feed an event to a controller, calling only the transition it implies.
pub fn dispatch(controller: &mut dyn ModalController, event: ModalEvent) -> ModalState {
    let current = if controller.is_open() {
        ModalState::Open
    } else {
        ModalState::Closed
    };
    let next = current.transition(event);
    if next != current {
        debug!(?event, ?current, ?next, "Compose modal transition");
        match next {
            ModalState::Open => controller.open_modal(),
            ModalState::Closed => controller.close_modal(),
        }
    }
    next
}

/// In-process compose modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeModal {
    state: ModalState,
}

impl ComposeModal {
    /// A closed modal.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ModalState {
        self.state
    }
}

impl ModalController for ComposeModal {
    fn open_modal(&mut self) {
        self.state = ModalState::Open;
    }

    fn close_modal(&mut self) {
        self.state = ModalState::Closed;
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use ModalEvent::{Compose, Dismiss, Submitted};
        use ModalState::{Closed, Open};

        assert_eq!(Closed.transition(Compose), Open);
        assert_eq!(Closed.transition(Dismiss), Closed);
        assert_eq!(Closed.transition(Submitted), Closed);
        assert_eq!(Open.transition(Compose), Open);
        assert_eq!(Open.transition(Dismiss), Closed);
        assert_eq!(Open.transition(Submitted), Closed);
    }

    #[test]
    fn test_compose_modal_round_trip() {
        let mut modal = ComposeModal::new();
        assert_eq!(dispatch(&mut modal, ModalEvent::Compose), ModalState::Open);
        assert!(modal.is_open());
        assert_eq!(dispatch(&mut modal, ModalEvent::Submitted), ModalState::Closed);
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn test_dispatch_skips_redundant_calls() {
        let mut controller = MockModalController::new();
        controller.expect_is_open().return_const(true);
        controller.expect_open_modal().never();
        controller.expect_close_modal().never();

        assert_eq!(dispatch(&mut controller, ModalEvent::Compose), ModalState::Open);
    }

    #[test]
    fn test_dispatch_closes_on_dismiss() {
        let mut controller = MockModalController::new();
        controller.expect_is_open().return_const(true);
        controller.expect_close_modal().times(1).return_const(());

        assert_eq!(dispatch(&mut controller, ModalEvent::Dismiss), ModalState::Closed);
    }
}
