/// The two experiences and the handoff between them.
use bevy::prelude::*;

use crate::sequencer::Navigator;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum Sections {
    #[default]
    Story,
    Valentine,
}

/// Leaving the story always lands on the proposal.
impl Navigator for NextState<Sections> {
    fn leave(&mut self) {
        self.set(Sections::Valentine);
    }
}
