use thiserror::Error;

use crate::technique::Technique;

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to draw random bytes for input tokens: {0}")]
    Entropy(#[from] rand::Error),

    #[error("failed to parse input fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("technique {technique} produced unexpected output")]
    Mismatch { technique: Technique },

    #[error("unknown concatenation technique: {0:?}")]
    UnknownTechnique(String),
}
