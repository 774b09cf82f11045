use thiserror::Error;

use gd_behavior::BehaviorError;
use gd_core::{CoreError, EntityId};
use gd_rank::RankError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0} does not exist in the world")]
    UnknownEntity(EntityId),

    #[error("{0} has its profession locked")]
    ProfessionLocked(EntityId),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("rank change rejected: {0}")]
    Rank(#[from] RankError),

    #[error("behavior setup failed: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
