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

//! # Graviton Engine
//!
//! The physics engine facade. It selects one concrete backend at
//! initialization, forwards every contract operation 1:1, and degrades to
//! safe defaults while uninitialized.

#![warn(missing_docs)]

pub mod engine;

pub use engine::PhysicsEngine;

/// Convenient single-import surface for engine consumers.
pub mod prelude {
    pub use crate::engine::PhysicsEngine;
    pub use graviton_core::error::PhysicsError;
    pub use graviton_core::math::{Quat, Quaternion, Vec2, Vec3};
    pub use graviton_core::physics::{
        ClothDesc, ClothHandle, ColliderDesc, ColliderHandle, ColliderShape, CollisionCallback,
        CollisionInfo, FluidDesc, FluidHandle, PhysicsBackendKind, PhysicsProvider, Ray,
        RaycastHit, RigidBodyDesc, RigidBodyHandle, SoftBodyDesc, SoftBodyHandle,
    };
}
