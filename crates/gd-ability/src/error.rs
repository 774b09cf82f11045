use thiserror::Error;

use crate::AbilityId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog lists {found} abilities, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("slot {slot} holds {found}, expected {expected}")]
    Misplaced {
        slot:     usize,
        expected: AbilityId,
        found:    AbilityId,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
