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

//! # Physics Abstractions
//!
//! Universal traits and types for physics simulation providers: opaque
//! handles, entity descriptors, query types, and the [`PhysicsProvider`]
//! contract every backend must satisfy.

pub mod desc;
pub mod handle;
pub mod provider;
pub mod query;

pub use self::desc::{
    ClothDesc, ColliderDesc, ColliderShape, FluidDesc, RigidBodyDesc, SoftBodyDesc,
};
pub use self::handle::{
    ClothHandle, ColliderHandle, FluidHandle, RigidBodyHandle, SoftBodyHandle,
};
pub use self::provider::{PhysicsBackendKind, PhysicsProvider};
pub use self::query::{CollisionCallback, CollisionInfo, Ray, RaycastHit};
