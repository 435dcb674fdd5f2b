//! Round stages
//!
//! ReadyToPlay -> Playing -> Finished, each transition at most once.

use serde::{Deserialize, Serialize};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stage {
    /// Waiting for the start event; idle prompt animates
    #[default]
    ReadyToPlay,
    /// Physics, taxes and scoring run
    Playing,
    /// Round over, results finalized
    Finished,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ReadyToPlay => "ready",
            Stage::Playing => "playing",
            Stage::Finished => "finished",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageMachine {
    stage: Stage,
}

impl StageMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.stage == Stage::Playing
    }

    /// ReadyToPlay -> Playing. Returns false (and changes nothing) from any
    /// other stage.
    pub fn start(&mut self) -> bool {
        match self.stage {
            Stage::ReadyToPlay => {
                self.stage = Stage::Playing;
                true
            }
            Stage::Playing | Stage::Finished => false,
        }
    }

    /// Playing -> Finished. Returns false from any other stage.
    pub fn finish(&mut self) -> bool {
        match self.stage {
            Stage::Playing => {
                self.stage = Stage::Finished;
                true
            }
            Stage::ReadyToPlay | Stage::Finished => false,
        }
    }
}
