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

//! # Graviton Backends
//!
//! Concrete implementations of the [`graviton_core::physics::PhysicsProvider`]
//! contract: a full 3D world with soft-body, fluid, and cloth simulation, and
//! a reduced planar world restricted to rigid bodies.

#![warn(missing_docs)]

pub mod dim2;
pub mod dim3;

pub use dim2::PhysicsWorld2d;
pub use dim3::PhysicsWorld3d;
