use thiserror::Error;

use crate::GuardRank;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("cannot move from {from} to {to}")]
    NotPurchasable { from: GuardRank, to: GuardRank },

    #[error("{to} costs {needed}, only {available} available")]
    InsufficientCurrency {
        to:        GuardRank,
        needed:    u32,
        available: u32,
    },
}

pub type RankResult<T> = Result<T, RankError>;
