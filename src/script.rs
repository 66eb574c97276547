// Dialogue script: scenes, choices and the built-in sunset story.
use std::fmt;

use strum::{Display, EnumIter};

use crate::error::ScriptError;

/// Position of a scene within its script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId(pub usize);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pose shown on the cat portrait while a line is spoken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Expression {
    #[default]
    Normal,
    Excited,
    Curious,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub target: SceneId,
}

impl Choice {
    pub fn new(label: impl Into<String>, target: usize) -> Self {
        Self {
            label: label.into(),
            target: SceneId(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub id: SceneId,
    pub text: String,
    pub speaker: String,
    pub choices: Vec<Choice>,
    pub expression: Expression,
    /// Whether the envelope is offered alongside the choices.
    pub shows_envelope: bool,
}

/// A validated, closed set of scenes. Every choice lands on a scene that exists.
#[derive(Debug, Clone)]
pub struct Script {
    scenes: Vec<Scene>,
}

const CAT: &str = "Solemn the cat";

/// Shown in the overlay once the envelope has been opened.
pub const LETTER_MESSAGE: &str =
    "~ Opening Letter ~\n\nGetting ready to ask you something special...\n\n💕";

impl Script {
    pub fn new(scenes: Vec<Scene>) -> Result<Self, ScriptError> {
        if scenes.is_empty() {
            return Err(ScriptError::Empty);
        }

        for (position, scene) in scenes.iter().enumerate() {
            if scene.id != SceneId(position) {
                return Err(ScriptError::MisplacedScene {
                    position,
                    id: scene.id,
                });
            }
            if let Some(choice) = scene.choices.iter().find(|c| c.target.0 >= scenes.len()) {
                return Err(ScriptError::DanglingChoice {
                    scene: scene.id,
                    label: choice.label.clone(),
                    target: choice.target,
                });
            }
        }

        Ok(Self { scenes })
    }

    /// The sunset-mountain story that leads up to the envelope.
    pub fn sunset() -> Result<Self, ScriptError> {
        Self::new(vec![
            Scene {
                id: SceneId(0),
                text: "What a beautiful sunset! Isn't it?".into(),
                speaker: CAT.into(),
                choices: vec![Choice::new("Where am I?", 1), Choice::new("Hmm!", 1)],
                expression: Expression::Normal,
                shows_envelope: false,
            },
            Scene {
                id: SceneId(1),
                text: "Uhm... You'll see.".into(),
                speaker: CAT.into(),
                choices: vec![Choice::new("Continue...", 2)],
                expression: Expression::Curious,
                shows_envelope: false,
            },
            Scene {
                id: SceneId(2),
                text: "Oh look! A letter appeared! Try clicking on it.".into(),
                speaker: CAT.into(),
                choices: vec![],
                expression: Expression::Excited,
                shows_envelope: true,
            },
            Scene {
                id: SceneId(3),
                text: "What does the message say?".into(),
                speaker: CAT.into(),
                choices: vec![Choice::new("The End", 0)],
                expression: Expression::Normal,
                shows_envelope: false,
            },
        ])
    }

    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(id.0)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    #[cfg(test)]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }
}
