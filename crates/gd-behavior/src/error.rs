use thiserror::Error;

use gd_core::EntityId;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("guard {0} is missing from the world")]
    GuardMissing(EntityId),

    #[error("behaviors `{first}` and `{second}` share priority {priority}")]
    DuplicatePriority {
        priority: u8,
        first:    &'static str,
        second:   &'static str,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
