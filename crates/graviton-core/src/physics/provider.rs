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

//! The interface contract every physics backend must satisfy.

use serde::{Deserialize, Serialize};

use crate::math::{Quat, Vec3};
use crate::physics::desc::{ClothDesc, ColliderDesc, FluidDesc, RigidBodyDesc, SoftBodyDesc};
use crate::physics::handle::{
    ClothHandle, ColliderHandle, FluidHandle, RigidBodyHandle, SoftBodyHandle,
};
use crate::physics::query::{CollisionCallback, Ray, RaycastHit};

/// The concrete backend variants selectable at engine initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhysicsBackendKind {
    /// Full 3D simulation: rigid, soft, fluid, and cloth bodies.
    #[default]
    Dim3,
    /// Planar simulation: rigid bodies only, AABB collision.
    Dim2,
}

/// Interface contract for a physics simulation provider.
///
/// Providers are single-threaded and synchronous: the owning facade calls
/// `step` once per frame and all queries in between, from one thread. A
/// provider exclusively owns its handle-to-entity maps; callers hold only
/// plain integer handles.
///
/// Fail-soft semantics apply to every operation: `remove_*` on an unknown
/// handle is a silent no-op, read accessors for unknown handles return
/// zero-valued data, and boolean queries return `false`. Read accessors copy
/// data out rather than exposing internal state.
pub trait PhysicsProvider {
    /// Advances the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// Sets the global gravity vector.
    fn set_gravity(&mut self, gravity: Vec3);

    /// Returns the global gravity vector.
    fn gravity(&self) -> Vec3;

    /// Adds a rigid body to the simulation.
    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle;

    /// Removes a rigid body and every collider attached to it.
    fn remove_body(&mut self, handle: RigidBodyHandle);

    /// Manually sets the position and rotation of a rigid body.
    fn set_body_transform(&mut self, handle: RigidBodyHandle, position: Vec3, rotation: Quat);

    /// Returns the position and rotation of a rigid body.
    fn body_transform(&self, handle: RigidBodyHandle) -> (Vec3, Quat);

    /// Sets the linear velocity of a rigid body.
    fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3);

    /// Returns the linear velocity of a rigid body.
    fn body_velocity(&self, handle: RigidBodyHandle) -> Vec3;

    /// Applies a force to a dynamic rigid body, integrated against a fixed
    /// 60 Hz step rather than the frame `dt`.
    fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec3);

    /// Applies an instantaneous impulse to a dynamic rigid body
    /// (`velocity += impulse / mass`, no time scaling).
    fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3);

    /// Adds a collider owned by `body`.
    fn add_collider(&mut self, body: RigidBodyHandle, desc: ColliderDesc) -> ColliderHandle;

    /// Removes a collider from the simulation.
    fn remove_collider(&mut self, handle: ColliderHandle);

    /// Returns the handles of all live rigid bodies.
    fn get_all_bodies(&self) -> Vec<RigidBodyHandle>;

    /// Returns the handles of all live colliders.
    fn get_all_colliders(&self) -> Vec<ColliderHandle>;

    /// Adds a soft body to the simulation.
    fn add_soft_body(&mut self, desc: SoftBodyDesc) -> SoftBodyHandle;

    /// Removes a soft body from the simulation.
    fn remove_soft_body(&mut self, handle: SoftBodyHandle);

    /// Returns a snapshot of a soft body's vertex positions.
    fn soft_body_vertices(&self, handle: SoftBodyHandle) -> Vec<Vec3>;

    /// Adds a fluid volume to the simulation.
    fn add_fluid(&mut self, desc: FluidDesc) -> FluidHandle;

    /// Removes a fluid volume from the simulation.
    fn remove_fluid(&mut self, handle: FluidHandle);

    /// Returns a snapshot of a fluid's particle positions.
    fn fluid_particles(&self, handle: FluidHandle) -> Vec<Vec3>;

    /// Adds a cloth patch to the simulation.
    fn add_cloth(&mut self, desc: ClothDesc) -> ClothHandle;

    /// Removes a cloth patch from the simulation.
    fn remove_cloth(&mut self, handle: ClothHandle);

    /// Returns a snapshot of a cloth's vertex positions.
    fn cloth_vertices(&self, handle: ClothHandle) -> Vec<Vec3>;

    /// Pins a cloth's first vertex to `body`, displaced by `offset`.
    fn attach_cloth_to_body(
        &mut self,
        cloth: ClothHandle,
        body: RigidBodyHandle,
        offset: Vec3,
    );

    /// Registers the single contact callback, replacing any previous
    /// registration; `None` clears the slot.
    fn set_collision_callback(&mut self, callback: Option<CollisionCallback>);

    /// Returns the nearest intersection of `ray` with any rigid body, or
    /// `None` on a miss.
    fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit>;

    /// Tests two rigid bodies for overlap with the same law the collision
    /// pass uses internally.
    fn are_colliding(&self, body_a: RigidBodyHandle, body_b: RigidBodyHandle) -> bool;
}
