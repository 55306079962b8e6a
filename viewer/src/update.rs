use std::sync::mpsc::{channel, Receiver, Sender};

use config::Colors;
use cutlist::CutList;
use model::State;

/// The outcome of reading the form file, sent from the file watcher to the window.
#[derive(Debug)]
pub enum Update {
    /// The form was read and passed through the pipeline.
    Calculated {
        /// The state of the calculator after the calculation.
        state: State,
        /// The cut list of the rendered scene, if any.
        cut_list: Option<CutList>,
        /// The colors to display the scene with.
        colors: Colors,
    },
    /// The form file could not be read or parsed.
    Unreadable(String),
}

impl Update {
    /// Creates an update from the state of a calculator.
    #[must_use]
    pub fn calculated(state: &State, colors: Colors) -> Self {
        let cut_list = state.scene().map(CutList::from_scene);

        Self::Calculated {
            state: state.clone(),
            cut_list,
            colors,
        }
    }
}

/// The sending half of an update channel.
#[derive(Clone)]
pub struct Updater {
    sender: Sender<Update>,
}

impl Updater {
    /// Creates a new updater receiver pair.
    pub fn channel() -> (Self, Receiver<Update>) {
        let (sender, receiver) = channel();

        (Self { sender }, receiver)
    }

    /// Sends an update, dropping it if the window has been closed.
    pub fn send_update(&self, update: Update) {
        if self.sender.send(update).is_err() {
            tracing::debug!("window closed, dropping update");
        }
    }
}

#[cfg(test)]
mod tests {
    use config::{Archetype, Form};
    use model::Calculator;

    use super::*;

    #[test]
    fn rendered_state_carries_a_cut_list() {
        let mut calculator = Calculator::new();
        let state = calculator.calculate(&Form::new(Archetype::Wall));

        let Update::Calculated { cut_list, .. } = Update::calculated(state, Colors::default())
        else {
            panic!("expected a calculated update");
        };
        assert!(cut_list.is_some_and(|cut_list| !cut_list.rows().is_empty()));
    }

    #[test]
    fn invalid_state_has_no_cut_list() {
        let mut calculator = Calculator::new();
        let form = Form::new(Archetype::Floor).with(config::Field::Angle, "90");
        let state = calculator.calculate(&form);

        assert!(matches!(
            Update::calculated(state, Colors::default()),
            Update::Calculated {
                state: State::Invalid(_),
                cut_list: None,
                ..
            }
        ));
    }

    #[test]
    fn updates_arrive_in_order() {
        let (updater, receiver) = Updater::channel();
        updater.send_update(Update::Unreadable("first".to_owned()));
        updater.send_update(Update::Unreadable("second".to_owned()));

        let messages: Vec<_> = receiver
            .try_iter()
            .map(|update| match update {
                Update::Unreadable(message) => message,
                Update::Calculated { .. } => String::new(),
            })
            .collect();
        assert_eq!(messages, ["first", "second"]);
    }
}
