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

//! Planar implementation of the physics provider.
//!
//! State is kept in 2D; the contract boundary still speaks `Vec3`/`Quat`
//! with `z` pinned to 0 and identity rotations. Collision detection uses
//! axis-aligned bounding boxes sized by each body's most recently attached
//! collider. Soft bodies, fluids, and cloth are unsupported no-ops.

use std::collections::HashMap;

use graviton_core::math::{Quat, Vec2, Vec3};
use graviton_core::physics::{
    ClothDesc, ClothHandle, ColliderDesc, ColliderHandle, ColliderShape, CollisionCallback,
    CollisionInfo, FluidDesc, FluidHandle, PhysicsProvider, Ray, RaycastHit, RigidBodyDesc,
    RigidBodyHandle, SoftBodyDesc, SoftBodyHandle,
};

/// Forces integrate against a fixed 60 Hz step, not the frame dt.
const FORCE_STEP: f32 = 0.016;

/// Depth reported for every synthesized contact.
const CONTACT_DEPTH: f32 = 0.1;

struct BodyState2d {
    position: Vec2,
    /// Planar spin angle; no code path updates it after creation, so
    /// transform reads always report the identity rotation.
    #[allow(dead_code)]
    rotation: f32,
    velocity: Vec2,
    mass: f32,
    kinematic: bool,
    /// AABB extents for collision, overwritten by whichever box or sphere
    /// collider was attached most recently.
    size: Vec2,
}

/// The reduced planar physics world.
pub struct PhysicsWorld2d {
    next_handle: u32,
    bodies: HashMap<RigidBodyHandle, BodyState2d>,
    colliders: HashMap<ColliderHandle, ColliderDesc>,
    collider_bodies: HashMap<ColliderHandle, RigidBodyHandle>,
    gravity: Vec3,
    collision_callback: Option<CollisionCallback>,
}

impl Default for PhysicsWorld2d {
    fn default() -> Self {
        Self {
            next_handle: 1,
            bodies: HashMap::new(),
            colliders: HashMap::new(),
            collider_bodies: HashMap::new(),
            gravity: Vec3::new(0.0, -9.81, 0.0),
            collision_callback: None,
        }
    }
}

impl PhysicsWorld2d {
    /// Creates an empty world with default gravity.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    /// Inclusive AABB overlap: touching boxes count as colliding.
    fn aabb_overlap(&self, body_a: RigidBodyHandle, body_b: RigidBodyHandle) -> bool {
        let (Some(state_a), Some(state_b)) = (self.bodies.get(&body_a), self.bodies.get(&body_b))
        else {
            return false;
        };

        let half_a = state_a.size * 0.5;
        let half_b = state_b.size * 0.5;

        let overlap_x = state_a.position.x + half_a.x >= state_b.position.x - half_b.x
            && state_b.position.x + half_b.x >= state_a.position.x - half_a.x;
        let overlap_y = state_a.position.y + half_a.y >= state_b.position.y - half_b.y
            && state_b.position.y + half_b.y >= state_a.position.y - half_a.y;

        overlap_x && overlap_y
    }

    fn dispatch_contacts(&mut self) {
        let Some(mut callback) = self.collision_callback.take() else {
            return;
        };

        let mut handles: Vec<RigidBodyHandle> = self.bodies.keys().copied().collect();
        handles.sort_unstable_by_key(|handle| handle.0);

        for (i, &body_a) in handles.iter().enumerate() {
            for &body_b in &handles[i + 1..] {
                if !self.aabb_overlap(body_a, body_b) {
                    continue;
                }
                let (Some(state_a), Some(state_b)) =
                    (self.bodies.get(&body_a), self.bodies.get(&body_b))
                else {
                    continue;
                };
                let contact = (state_a.position + state_b.position) * 0.5;
                let normal = (state_b.position - state_a.position).normalize();
                let info = CollisionInfo {
                    body_a,
                    body_b,
                    contact_point: Vec3::new(contact.x, contact.y, 0.0),
                    contact_normal: Vec3::new(normal.x, normal.y, 0.0),
                    penetration_depth: CONTACT_DEPTH,
                };
                callback(&info);
            }
        }

        self.collision_callback = Some(callback);
    }
}

impl PhysicsProvider for PhysicsWorld2d {
    fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            if body.kinematic {
                continue;
            }
            // Only the y component of gravity acts in the plane.
            body.velocity.y += self.gravity.y * dt;
            body.position = body.position + body.velocity * dt;
        }

        self.dispatch_contacts();
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    fn gravity(&self) -> Vec3 {
        self.gravity
    }

    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle {
        let handle = RigidBodyHandle(self.alloc_handle());
        self.bodies.insert(
            handle,
            BodyState2d {
                position: Vec2::new(desc.position.x, desc.position.y),
                rotation: 0.0,
                velocity: Vec2::ZERO,
                mass: desc.mass,
                kinematic: desc.kinematic,
                size: Vec2::ONE,
            },
        );
        log::debug!("PhysicsWorld2d: created rigid body {handle:?}");
        handle
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(&handle);

        let orphaned: Vec<ColliderHandle> = self
            .collider_bodies
            .iter()
            .filter(|(_, owner)| **owner == handle)
            .map(|(collider, _)| *collider)
            .collect();
        for collider in orphaned {
            self.remove_collider(collider);
        }
        log::debug!("PhysicsWorld2d: destroyed rigid body {handle:?}");
    }

    fn set_body_transform(&mut self, handle: RigidBodyHandle, position: Vec3, _rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.position = Vec2::new(position.x, position.y);
        }
    }

    fn body_transform(&self, handle: RigidBodyHandle) -> (Vec3, Quat) {
        match self.bodies.get(&handle) {
            Some(body) => (
                Vec3::new(body.position.x, body.position.y, 0.0),
                Quat::IDENTITY,
            ),
            None => (Vec3::ZERO, Quat::IDENTITY),
        }
    }

    fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.velocity = Vec2::new(velocity.x, velocity.y);
        }
    }

    fn body_velocity(&self, handle: RigidBodyHandle) -> Vec3 {
        match self.bodies.get(&handle) {
            Some(body) => Vec3::new(body.velocity.x, body.velocity.y, 0.0),
            None => Vec3::ZERO,
        }
    }

    fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            if !body.kinematic {
                let acceleration = Vec2::new(force.x, force.y) / body.mass;
                body.velocity = body.velocity + acceleration * FORCE_STEP;
            }
        }
    }

    fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            if !body.kinematic {
                body.velocity = body.velocity + Vec2::new(impulse.x, impulse.y) / body.mass;
            }
        }
    }

    fn add_collider(&mut self, body: RigidBodyHandle, desc: ColliderDesc) -> ColliderHandle {
        let handle = ColliderHandle(self.alloc_handle());

        // The owning body's collision extents track the newest box or
        // sphere collider; other shapes leave them untouched.
        if let Some(state) = self.bodies.get_mut(&body) {
            match &desc.shape {
                ColliderShape::Box(size) => state.size = Vec2::new(size.x, size.y),
                ColliderShape::Sphere(radius) => {
                    state.size = Vec2::new(radius * 2.0, radius * 2.0)
                }
                _ => {}
            }
        }

        self.colliders.insert(handle, desc);
        self.collider_bodies.insert(handle, body);
        log::debug!("PhysicsWorld2d: created collider {handle:?} on body {body:?}");
        handle
    }

    fn remove_collider(&mut self, handle: ColliderHandle) {
        self.colliders.remove(&handle);
        self.collider_bodies.remove(&handle);
    }

    fn get_all_bodies(&self) -> Vec<RigidBodyHandle> {
        self.bodies.keys().copied().collect()
    }

    fn get_all_colliders(&self) -> Vec<ColliderHandle> {
        self.colliders.keys().copied().collect()
    }

    fn add_soft_body(&mut self, _desc: SoftBodyDesc) -> SoftBodyHandle {
        // Deformables are not supported in the planar world.
        SoftBodyHandle::INVALID
    }

    fn remove_soft_body(&mut self, _handle: SoftBodyHandle) {}

    fn soft_body_vertices(&self, _handle: SoftBodyHandle) -> Vec<Vec3> {
        Vec::new()
    }

    fn add_fluid(&mut self, _desc: FluidDesc) -> FluidHandle {
        FluidHandle::INVALID
    }

    fn remove_fluid(&mut self, _handle: FluidHandle) {}

    fn fluid_particles(&self, _handle: FluidHandle) -> Vec<Vec3> {
        Vec::new()
    }

    fn add_cloth(&mut self, _desc: ClothDesc) -> ClothHandle {
        ClothHandle::INVALID
    }

    fn remove_cloth(&mut self, _handle: ClothHandle) {}

    fn cloth_vertices(&self, _handle: ClothHandle) -> Vec<Vec3> {
        Vec::new()
    }

    fn attach_cloth_to_body(
        &mut self,
        _cloth: ClothHandle,
        _body: RigidBodyHandle,
        _offset: Vec3,
    ) {
    }

    fn set_collision_callback(&mut self, callback: Option<CollisionCallback>) {
        self.collision_callback = callback;
    }

    fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit> {
        let mut hit: Option<RaycastHit> = None;
        let mut nearest = ray.max_distance;

        let origin = Vec2::new(ray.origin.x, ray.origin.y);
        let direction = Vec2::new(ray.direction.x, ray.direction.y);

        for (&handle, body) in &self.bodies {
            // Bodies are approximated by the circle enclosing their AABB.
            let radius = body.size.length() * 0.5;

            let oc = origin - body.position;
            let a = direction.dot(direction);
            let b = 2.0 * oc.dot(direction);
            let c = oc.dot(oc) - radius * radius;
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                continue;
            }

            let t = (-b - discriminant.sqrt()) / (2.0 * a);
            if t > 0.0 && t < nearest {
                nearest = t;
                let point = origin + direction * t;
                let normal = (point - body.position).normalize();
                hit = Some(RaycastHit {
                    body: handle,
                    point: Vec3::new(point.x, point.y, 0.0),
                    normal: Vec3::new(normal.x, normal.y, 0.0),
                    distance: t,
                });
            }
        }

        hit
    }

    fn are_colliding(&self, body_a: RigidBodyHandle, body_b: RigidBodyHandle) -> bool {
        self.aabb_overlap(body_a, body_b)
    }
}
