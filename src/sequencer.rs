// Scene sequencer: owns the dialogue cursor and every transition between scenes.
use std::time::Duration;

use bevy::prelude::*;

use crate::error::SequencerError;
use crate::script::{Choice, Expression, LETTER_MESSAGE, SceneId, Script};
use crate::typewriter::Typewriter;

/// Everything the sequencer draws on. Calls arrive in the order the scene needs them.
pub trait Stage {
    fn set_speaker(&mut self, speaker: &str);
    /// `pulse` is how long the portrait reacts to the change.
    fn set_expression(&mut self, expression: Expression, pulse: Duration);
    fn clear_dialogue(&mut self);
    fn append_dialogue(&mut self, ch: char);
    fn clear_choices(&mut self);
    fn show_choices(&mut self, choices: &[Choice]);
    fn show_envelope(&mut self);
    fn hide_envelope(&mut self);
    fn open_envelope(&mut self);
    fn show_message(&mut self, message: &str);
    fn hide_message(&mut self);
}

/// One-way exit from the story. Nothing comes back through it.
pub trait Navigator {
    fn leave(&mut self);
}

#[derive(Resource, Debug, Clone)]
pub struct SequencerConfig {
    /// Delay between revealed characters.
    pub reveal_interval: Duration,
    /// Time the envelope animation gets before the story is left.
    pub envelope_settle: Duration,
    /// Handoff delay after the letter overlay is dismissed.
    pub message_settle: Duration,
    /// How long the portrait stays shrunk after an expression change.
    pub portrait_pulse: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            reveal_interval: Duration::from_millis(40),
            envelope_settle: Duration::from_millis(1200),
            message_settle: Duration::from_millis(500),
            portrait_pulse: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequencerState {
    pub active_scene: SceneId,
    /// Choices are inert while this is set.
    pub is_revealing: bool,
    /// One-shot for the whole session. Only a fresh `Sequencer` starts without it.
    pub affordance_opened: bool,
}

/// Reported by [`Sequencer::advance`] once per completed reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFinished {
    pub scene: SceneId,
}

#[derive(Resource, Debug)]
pub struct Sequencer {
    script: Script,
    config: SequencerConfig,
    state: SequencerState,
    reveal: Option<Typewriter>,
    rendered: Vec<Choice>,
    envelope_shown: bool,
    message_shown: bool,
    handoff: Option<Timer>,
    departed: bool,
}

impl Sequencer {
    pub fn new(script: Script, config: SequencerConfig) -> Self {
        Self {
            script,
            config,
            state: SequencerState::default(),
            reveal: None,
            rendered: Vec::new(),
            envelope_shown: false,
            message_shown: false,
            handoff: None,
            departed: false,
        }
    }

    pub fn start(&mut self, stage: &mut impl Stage) -> Result<(), SequencerError> {
        self.load_scene(SceneId(0), stage)
    }

    /// Moves the cursor to `id` and begins revealing its line.
    ///
    /// Choices are only drawn once the reveal completes in [`Sequencer::advance`].
    /// A reveal still in flight is cancelled, since this is a forced change.
    pub fn load_scene(&mut self, id: SceneId, stage: &mut impl Stage) -> Result<(), SequencerError> {
        let Some(scene) = self.script.get(id).cloned() else {
            return Err(SequencerError::InvalidSceneReference {
                requested: id,
                scene_count: self.script.scene_count(),
            });
        };

        if let Some(reveal) = self.reveal.as_mut() {
            if reveal.is_revealing() {
                debug!("cancelling reveal of {} for {id}", self.state.active_scene);
                reveal.cancel();
            }
        }

        info!("loading scene {id}");
        self.state.active_scene = id;

        stage.set_expression(scene.expression, self.config.portrait_pulse);

        self.rendered.clear();
        stage.clear_choices();

        if scene.shows_envelope && !self.state.affordance_opened {
            self.envelope_shown = true;
            stage.show_envelope();
        } else {
            self.envelope_shown = false;
            stage.hide_envelope();
        }

        stage.set_speaker(&scene.speaker);
        stage.clear_dialogue();
        self.reveal = Some(Typewriter::new(scene.text, self.config.reveal_interval));
        self.state.is_revealing = true;

        Ok(())
    }

    /// Follows a choice. Silently ignored mid-reveal or once the story is being left.
    pub fn select_choice(
        &mut self,
        target: SceneId,
        stage: &mut impl Stage,
    ) -> Result<(), SequencerError> {
        if self.state.is_revealing {
            debug!("ignoring choice {target} while revealing");
            return Ok(());
        }
        if self.state.affordance_opened {
            debug!("ignoring choice {target} after the envelope was opened");
            return Ok(());
        }
        self.load_scene(target, stage)
    }

    /// Keyboard confirm: follows the only rendered choice, if there is exactly one.
    pub fn confirm(&mut self, stage: &mut impl Stage) -> Result<(), SequencerError> {
        if self.state.is_revealing {
            return Ok(());
        }
        match self.rendered.as_slice() {
            [only] => {
                let target = only.target;
                self.select_choice(target, stage)
            }
            _ => Ok(()),
        }
    }

    /// Opens the envelope and schedules the handoff. Returns `false` if nothing happened.
    pub fn trigger_affordance(&mut self, stage: &mut impl Stage) -> bool {
        if !self.envelope_shown || self.state.affordance_opened {
            debug!("envelope click ignored");
            return false;
        }

        self.state.affordance_opened = true;
        stage.open_envelope();
        stage.show_message(LETTER_MESSAGE);
        self.message_shown = true;
        self.handoff = Some(Timer::new(self.config.envelope_settle, TimerMode::Once));

        info!("envelope opened, leaving in {:?}", self.config.envelope_settle);
        true
    }

    /// Closes the letter overlay. A pending handoff is brought forward, never duplicated.
    pub fn dismiss_message(&mut self, stage: &mut impl Stage) {
        if !self.message_shown {
            return;
        }
        self.message_shown = false;
        stage.hide_message();

        let settle = self.config.message_settle;
        if let Some(timer) = self.handoff.as_mut() {
            if timer.remaining() > settle {
                *timer = Timer::new(settle, TimerMode::Once);
            }
        }
    }

    /// Goes back to the first scene. Once the envelope is open the story is
    /// already on its way out, so this does nothing.
    pub fn reset(&mut self, stage: &mut impl Stage) -> Result<(), SequencerError> {
        if self.state.affordance_opened {
            debug!("ignoring reset after the envelope was opened");
            return Ok(());
        }
        info!("resetting story");
        self.load_scene(SceneId(0), stage)
    }

    /// Steps the reveal and any pending handoff forward by `delta`.
    pub fn advance(
        &mut self,
        delta: Duration,
        stage: &mut impl Stage,
        navigator: &mut impl Navigator,
    ) -> Option<RevealFinished> {
        let finished = self.advance_reveal(delta, stage);
        self.advance_handoff(delta, navigator);
        finished
    }

    fn advance_reveal(&mut self, delta: Duration, stage: &mut impl Stage) -> Option<RevealFinished> {
        let step = self.reveal.as_mut()?.tick(delta);
        for ch in step.appended {
            stage.append_dialogue(ch);
        }
        if !step.completed {
            return None;
        }

        let scene = self.state.active_scene;
        self.state.is_revealing = false;
        let choices = self
            .script
            .get(scene)
            .map(|s| s.choices.clone())
            .unwrap_or_default();
        if !choices.is_empty() {
            stage.show_choices(&choices);
        }
        self.rendered = choices;

        Some(RevealFinished { scene })
    }

    fn advance_handoff(&mut self, delta: Duration, navigator: &mut impl Navigator) {
        let Some(timer) = self.handoff.as_mut() else {
            return;
        };
        if !timer.tick(delta).just_finished() {
            return;
        }

        self.handoff = None;
        self.departed = true;
        info!("leaving the story");
        navigator.leave();
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn rendered_choices(&self) -> &[Choice] {
        &self.rendered
    }

    pub fn envelope_shown(&self) -> bool {
        self.envelope_shown
    }

    pub fn message_shown(&self) -> bool {
        self.message_shown
    }

    pub fn is_handing_off(&self) -> bool {
        self.handoff.is_some()
    }

    pub fn has_departed(&self) -> bool {
        self.departed
    }

    pub fn visible_dialogue(&self) -> &str {
        self.reveal.as_ref().map_or("", Typewriter::visible)
    }
}
