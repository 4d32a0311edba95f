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

//! Defines the `PhysicsEngine` facade owning the active backend.

use graviton_backends::{PhysicsWorld2d, PhysicsWorld3d};
use graviton_core::error::PhysicsError;
use graviton_core::math::{Quat, Vec3};
use graviton_core::physics::{
    ClothDesc, ClothHandle, ColliderDesc, ColliderHandle, CollisionCallback, FluidDesc,
    FluidHandle, PhysicsBackendKind, PhysicsProvider, Ray, RaycastHit, RigidBodyDesc,
    RigidBodyHandle, SoftBodyDesc, SoftBodyHandle,
};

/// The front door of the physics subsystem.
///
/// Exactly one backend is active between `initialize` and `shutdown`; the
/// facade exclusively owns it and forwards every operation 1:1. While
/// uninitialized, handle-returning calls yield the invalid sentinel,
/// reads yield zero-valued data, boolean queries yield `false`, and
/// mutators are silent no-ops rather than panics. Swapping backends
/// requires `shutdown` followed by `initialize`; there is no hot-swap.
#[derive(Default)]
pub struct PhysicsEngine {
    provider: Option<Box<dyn PhysicsProvider>>,
    kind: Option<PhysicsBackendKind>,
}

impl PhysicsEngine {
    /// Creates an uninitialized engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects and activates a backend.
    ///
    /// Fails with [`PhysicsError::AlreadyInitialized`] if a backend is
    /// already active.
    pub fn initialize(&mut self, kind: PhysicsBackendKind) -> Result<(), PhysicsError> {
        if self.provider.is_some() {
            log::warn!("PhysicsEngine: initialize called while already initialized");
            return Err(PhysicsError::AlreadyInitialized);
        }

        let provider: Box<dyn PhysicsProvider> = match kind {
            PhysicsBackendKind::Dim3 => Box::new(PhysicsWorld3d::new()),
            PhysicsBackendKind::Dim2 => Box::new(PhysicsWorld2d::new()),
        };
        self.provider = Some(provider);
        self.kind = Some(kind);
        log::info!("PhysicsEngine: initialized with {kind:?} backend");
        Ok(())
    }

    /// Advances the active backend by `dt` seconds. Expected to be called
    /// once per frame by the owning thread.
    pub fn update(&mut self, dt: f32) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.step(dt);
        }
    }

    /// Tears down the active backend, freeing every entity it owns.
    pub fn shutdown(&mut self) {
        if self.provider.take().is_some() {
            self.kind = None;
            log::info!("PhysicsEngine: shut down");
        }
    }

    /// Returns `true` while a backend is active.
    pub fn is_initialized(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns the active backend kind, if any.
    pub fn backend_kind(&self) -> Option<PhysicsBackendKind> {
        self.kind
    }

    // --- Rigid body management ---

    /// Creates a rigid body; `INVALID` while uninitialized.
    pub fn create_rigid_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle {
        match self.provider.as_deref_mut() {
            Some(provider) => provider.add_body(desc),
            None => RigidBodyHandle::INVALID,
        }
    }

    /// Destroys a rigid body and every collider attached to it.
    pub fn destroy_rigid_body(&mut self, handle: RigidBodyHandle) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.remove_body(handle);
        }
    }

    /// Repositions a rigid body.
    pub fn set_rigid_body_transform(
        &mut self,
        handle: RigidBodyHandle,
        position: Vec3,
        rotation: Quat,
    ) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.set_body_transform(handle, position, rotation);
        }
    }

    /// Reads a rigid body's transform; zero position and identity rotation
    /// while uninitialized or for unknown handles.
    pub fn rigid_body_transform(&self, handle: RigidBodyHandle) -> (Vec3, Quat) {
        match self.provider.as_deref() {
            Some(provider) => provider.body_transform(handle),
            None => (Vec3::ZERO, Quat::IDENTITY),
        }
    }

    /// Sets a rigid body's linear velocity.
    pub fn set_rigid_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.set_body_velocity(handle, velocity);
        }
    }

    /// Reads a rigid body's linear velocity; zero while uninitialized.
    pub fn rigid_body_velocity(&self, handle: RigidBodyHandle) -> Vec3 {
        match self.provider.as_deref() {
            Some(provider) => provider.body_velocity(handle),
            None => Vec3::ZERO,
        }
    }

    /// Applies a force to a dynamic body (fixed 60 Hz integration step).
    pub fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec3) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.apply_force(handle, force);
        }
    }

    /// Applies an instantaneous impulse to a dynamic body.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.apply_impulse(handle, impulse);
        }
    }

    // --- Collider management ---

    /// Creates a collider owned by `body`; `INVALID` while uninitialized.
    pub fn create_collider(&mut self, body: RigidBodyHandle, desc: ColliderDesc) -> ColliderHandle {
        match self.provider.as_deref_mut() {
            Some(provider) => provider.add_collider(body, desc),
            None => ColliderHandle::INVALID,
        }
    }

    /// Destroys a collider.
    pub fn destroy_collider(&mut self, handle: ColliderHandle) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.remove_collider(handle);
        }
    }

    // --- Soft body management ---

    /// Creates a soft body; `INVALID` while uninitialized or unsupported.
    pub fn create_soft_body(&mut self, desc: SoftBodyDesc) -> SoftBodyHandle {
        match self.provider.as_deref_mut() {
            Some(provider) => provider.add_soft_body(desc),
            None => SoftBodyHandle::INVALID,
        }
    }

    /// Destroys a soft body.
    pub fn destroy_soft_body(&mut self, handle: SoftBodyHandle) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.remove_soft_body(handle);
        }
    }

    /// Snapshot of a soft body's vertices; empty while uninitialized.
    pub fn soft_body_vertices(&self, handle: SoftBodyHandle) -> Vec<Vec3> {
        match self.provider.as_deref() {
            Some(provider) => provider.soft_body_vertices(handle),
            None => Vec::new(),
        }
    }

    // --- Fluid simulation ---

    /// Creates a fluid volume; `INVALID` while uninitialized or unsupported.
    pub fn create_fluid(&mut self, desc: FluidDesc) -> FluidHandle {
        match self.provider.as_deref_mut() {
            Some(provider) => provider.add_fluid(desc),
            None => FluidHandle::INVALID,
        }
    }

    /// Destroys a fluid volume.
    pub fn destroy_fluid(&mut self, handle: FluidHandle) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.remove_fluid(handle);
        }
    }

    /// Snapshot of a fluid's particles; empty while uninitialized.
    pub fn fluid_particles(&self, handle: FluidHandle) -> Vec<Vec3> {
        match self.provider.as_deref() {
            Some(provider) => provider.fluid_particles(handle),
            None => Vec::new(),
        }
    }

    // --- Cloth simulation ---

    /// Creates a cloth patch; `INVALID` while uninitialized or unsupported.
    pub fn create_cloth(&mut self, desc: ClothDesc) -> ClothHandle {
        match self.provider.as_deref_mut() {
            Some(provider) => provider.add_cloth(desc),
            None => ClothHandle::INVALID,
        }
    }

    /// Destroys a cloth patch.
    pub fn destroy_cloth(&mut self, handle: ClothHandle) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.remove_cloth(handle);
        }
    }

    /// Snapshot of a cloth's vertices; empty while uninitialized.
    pub fn cloth_vertices(&self, handle: ClothHandle) -> Vec<Vec3> {
        match self.provider.as_deref() {
            Some(provider) => provider.cloth_vertices(handle),
            None => Vec::new(),
        }
    }

    /// Pins a cloth's first vertex to `body`, displaced by `offset`.
    pub fn attach_cloth_to_body(
        &mut self,
        cloth: ClothHandle,
        body: RigidBodyHandle,
        offset: Vec3,
    ) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.attach_cloth_to_body(cloth, body, offset);
        }
    }

    // --- Collision detection ---

    /// Registers the single contact callback; replaces any previous
    /// registration, `None` clears it.
    pub fn set_collision_callback(&mut self, callback: Option<CollisionCallback>) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.set_collision_callback(callback);
        }
    }

    /// Nearest ray intersection with any rigid body; `None` while
    /// uninitialized or on a miss.
    pub fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit> {
        match self.provider.as_deref() {
            Some(provider) => provider.cast_ray(ray),
            None => None,
        }
    }

    /// Pairwise overlap test; `false` while uninitialized.
    pub fn are_colliding(&self, body_a: RigidBodyHandle, body_b: RigidBodyHandle) -> bool {
        match self.provider.as_deref() {
            Some(provider) => provider.are_colliding(body_a, body_b),
            None => false,
        }
    }

    // --- Physics settings ---

    /// Sets the global gravity vector.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        if let Some(provider) = self.provider.as_deref_mut() {
            provider.set_gravity(gravity);
        }
    }

    /// Reads the global gravity vector; zero while uninitialized.
    pub fn gravity(&self) -> Vec3 {
        match self.provider.as_deref() {
            Some(provider) => provider.gravity(),
            None => Vec3::ZERO,
        }
    }
}
