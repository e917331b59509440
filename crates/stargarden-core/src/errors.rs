//! Action rejection taxonomy.
//!
//! Every failure here is a validation rejection, never fatal: the attempted
//! action is a no-op and prior state is unchanged. Messages are user-facing
//! (they become notifications).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    UnknownPlant(String),
    UnknownResearch(String),
    PlotOutOfRange(usize),
    PlotOccupied,
    PlotEmpty,
    /// Harvest attempted before growth progress reached 100.
    NotReady,
    InsufficientSeeds {
        needed: u32,
    },
    InsufficientResearch {
        needed: u32,
    },
    ResearchLocked,
    ResearchAlreadyCompleted,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::UnknownPlant(id) => write!(f, "Unknown plant: {}", id),
            ActionError::UnknownResearch(id) => write!(f, "Unknown research: {}", id),
            ActionError::PlotOutOfRange(index) => write!(f, "No such garden plot: {}", index),
            ActionError::PlotOccupied => write!(f, "This plot already has a plant"),
            ActionError::PlotEmpty => write!(f, "This plot is empty"),
            ActionError::NotReady => write!(f, "Plant is not ready for harvest"),
            ActionError::InsufficientSeeds { needed } => {
                write!(f, "Not enough seeds. Need {}", needed)
            }
            ActionError::InsufficientResearch { needed } => {
                write!(f, "Not enough research points. Need {}", needed)
            }
            ActionError::ResearchLocked => write!(f, "Research not available yet"),
            ActionError::ResearchAlreadyCompleted => write!(f, "Research already completed"),
        }
    }
}

impl std::error::Error for ActionError {}
