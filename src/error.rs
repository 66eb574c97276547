/// Errors raised while building scripts and moving between scenes.
use thiserror::Error;

use crate::script::SceneId;

/// Rejected while validating a dialogue script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("script has no scenes")]
    Empty,

    /// Scene ids double as positions in the script.
    #[error("scene at position {position} declares id {id}")]
    MisplacedScene { position: usize, id: SceneId },

    #[error("choice {label:?} in scene {scene} targets missing scene {target}")]
    DanglingChoice {
        scene: SceneId,
        label: String,
        target: SceneId,
    },
}

/// Raised by the sequencer when an operation cannot be carried out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequencerError {
    #[error("invalid scene reference {requested} (script has {scene_count} scenes)")]
    InvalidSceneReference {
        requested: SceneId,
        scene_count: usize,
    },
}
