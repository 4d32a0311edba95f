// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Opaque handle types identifying backend-owned simulation entities.
//!
//! Handles are backend-local integers allocated from a single monotonically
//! increasing counter starting at 1. They carry no generation counter, so a
//! destroyed handle is indistinguishable from a never-issued one; callers
//! are responsible for not reusing handles after `remove_*`. This is a
//! deliberate relaxed contract.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

macro_rules! define_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode,
        )]
        pub struct $name(pub u32);

        impl $name {
            /// Sentinel returned by creation calls that cannot produce an entity.
            pub const INVALID: Self = Self(0xFFFF_FFFF);

            /// Returns `true` unless this is the [`Self::INVALID`] sentinel.
            #[inline]
            pub fn is_valid(&self) -> bool {
                *self != Self::INVALID
            }
        }
    };
}

define_handle!(
    /// Opaque handle to a rigid body in the physics engine.
    RigidBodyHandle
);
define_handle!(
    /// Opaque handle to a collider in the physics engine.
    ColliderHandle
);
define_handle!(
    /// Opaque handle to a soft body in the physics engine.
    SoftBodyHandle
);
define_handle!(
    /// Opaque handle to a fluid volume in the physics engine.
    FluidHandle
);
define_handle!(
    /// Opaque handle to a cloth patch in the physics engine.
    ClothHandle
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sentinel() {
        assert_eq!(RigidBodyHandle::INVALID.0, 0xFFFF_FFFF);
        assert!(!RigidBodyHandle::INVALID.is_valid());
        assert!(RigidBodyHandle(1).is_valid());
        assert!(!ClothHandle::INVALID.is_valid());
        assert!(FluidHandle(42).is_valid());
    }
}
