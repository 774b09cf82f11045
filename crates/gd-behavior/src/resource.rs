//! Exclusive capabilities a behavior can claim.

use bitflags::bitflags;

bitflags! {
    /// At most one running behavior holds each flag.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Resources: u8 {
        /// Navigation and position control.
        const MOVEMENT  = 1 << 0;
        /// Look direction.
        const AIM       = 1 << 1;
        /// The guard's active target.
        const TARGETING = 1 << 2;
    }
}
