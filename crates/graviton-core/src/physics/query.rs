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

//! Contact reporting and ray-intersection query types.

use crate::math::Vec3;
use crate::physics::handle::RigidBodyHandle;

/// A contact reported between two rigid bodies during a simulation step.
#[derive(Debug, Clone, Copy)]
pub struct CollisionInfo {
    /// First body of the overlapping pair.
    pub body_a: RigidBodyHandle,
    /// Second body of the overlapping pair.
    pub body_b: RigidBodyHandle,
    /// Contact position, the midpoint between the two body origins.
    pub contact_point: Vec3,
    /// Contact normal pointing from `body_a` toward `body_b`.
    pub contact_normal: Vec3,
    /// Synthesized penetration depth.
    pub penetration_depth: f32,
}

/// Bound callback invoked inline for every overlapping pair during a step.
///
/// A provider holds a single callback slot: registering a new callback
/// replaces the previous one, and registering `None` clears it. The callback
/// runs synchronously inside `step` and must not re-enter the engine.
pub type CollisionCallback = Box<dyn FnMut(&CollisionInfo)>;

/// A ray for intersection queries.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Vec3,
    /// Direction of the ray; not required to be normalized.
    pub direction: Vec3,
    /// Hits farther than this along the ray are ignored.
    pub max_distance: f32,
}

impl Ray {
    /// Creates a ray with the default maximum distance of 1000.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            max_distance: 1000.0,
        }
    }
}

/// The nearest intersection found by a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The body that was hit.
    pub body: RigidBodyHandle,
    /// World-space intersection point.
    pub point: Vec3,
    /// Surface normal at the intersection point.
    pub normal: Vec3,
    /// Distance from the ray origin, in units of the direction's length.
    pub distance: f32,
}
