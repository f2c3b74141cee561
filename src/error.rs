use thiserror::Error;

/// Errors produced by the pitch engine.
///
/// `InvalidInput` is raised before any time stepping happens; the caller can
/// retry with corrected parameters. `DivergedSimulation` means the run blew
/// up numerically and the same input will fail again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PitchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("simulation diverged: {0}")]
    DivergedSimulation(String),
}

impl PitchError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PitchError::InvalidInput(msg.into())
    }

    pub fn diverged(msg: impl Into<String>) -> Self {
        PitchError::DivergedSimulation(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PitchError::InvalidInput(_))
    }

    pub fn is_diverged(&self) -> bool {
        matches!(self, PitchError::DivergedSimulation(_))
    }
}

pub type PitchResult<T> = Result<T, PitchError>;
