//! Engine-issued identifiers.
//!
//! The host engine allocates every id; the core only stores and compares
//! them.  An id is the sole handle the core keeps to another entity, so
//! every use goes back through the engine to re-validate liveness.

use std::fmt;

/// Declare a `Copy + Ord + Hash` newtype around an engine handle.
///
/// `$label` prefixes the `Display` form, e.g. `entity#12`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        $vis struct $name(pub $inner);

        impl $name {
            /// The engine's raw handle.
            #[inline]
            pub const fn raw(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(raw: $inner) -> Self {
                $name(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Any entity the engine knows: guard, hostile, civilian, player.
    pub struct EntityId(u32) => "entity";
}

typed_id! {
    /// A projectile spawned through the engine.
    pub struct ProjectileId(u32) => "projectile";
}
