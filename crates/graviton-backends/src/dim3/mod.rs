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

//! Full 3D implementation of the physics provider.
//!
//! Rigid bodies integrate under gravity with semi-implicit Euler; soft
//! bodies, fluids, and cloth run their own per-vertex/per-particle passes.
//! Collision detection is an O(n²) pairwise test against each body's
//! bounding sphere, and raycasts use the same sphere approximation.

mod deformable;

use std::collections::HashMap;

use graviton_core::math::{Quat, Vec3};
use graviton_core::physics::{
    ClothDesc, ClothHandle, ColliderDesc, ColliderHandle, ColliderShape, CollisionCallback,
    CollisionInfo, FluidDesc, FluidHandle, PhysicsProvider, Ray, RaycastHit, RigidBodyDesc,
    RigidBodyHandle, SoftBodyDesc, SoftBodyHandle,
};

use self::deformable::{ClothState, FluidState, SoftBodyState};

/// Bounding radius assumed for a body with no usable collider.
const DEFAULT_BODY_RADIUS: f32 = 0.5;

/// Forces integrate against a fixed 60 Hz step, not the frame dt.
const FORCE_STEP: f32 = 0.016;

/// Depth reported for every synthesized contact.
const CONTACT_DEPTH: f32 = 0.1;

struct BodyState {
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    mass: f32,
    kinematic: bool,
}

/// The full 3D physics world.
pub struct PhysicsWorld3d {
    next_handle: u32,
    bodies: HashMap<RigidBodyHandle, BodyState>,
    soft_bodies: HashMap<SoftBodyHandle, SoftBodyState>,
    fluids: HashMap<FluidHandle, FluidState>,
    cloths: HashMap<ClothHandle, ClothState>,
    colliders: HashMap<ColliderHandle, ColliderDesc>,
    collider_bodies: HashMap<ColliderHandle, RigidBodyHandle>,
    gravity: Vec3,
    collision_callback: Option<CollisionCallback>,
}

impl Default for PhysicsWorld3d {
    fn default() -> Self {
        Self {
            next_handle: 1,
            bodies: HashMap::new(),
            soft_bodies: HashMap::new(),
            fluids: HashMap::new(),
            cloths: HashMap::new(),
            colliders: HashMap::new(),
            collider_bodies: HashMap::new(),
            gravity: Vec3::new(0.0, -9.81, 0.0),
            collision_callback: None,
        }
    }
}

impl PhysicsWorld3d {
    /// Creates an empty world with default gravity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles for every entity kind come from one shared counter.
    fn alloc_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    /// Sphere radius a body is approximated with: the first collider found
    /// for it decides (sphere radius, or half the box diagonal); bodies
    /// without a usable collider fall back to the default radius.
    fn bounding_radius(&self, body: RigidBodyHandle) -> f32 {
        for (collider, owner) in &self.collider_bodies {
            if *owner != body {
                continue;
            }
            if let Some(desc) = self.colliders.get(collider) {
                return match &desc.shape {
                    ColliderShape::Sphere(radius) => *radius,
                    ColliderShape::Box(size) => size.length() * 0.5,
                    _ => DEFAULT_BODY_RADIUS,
                };
            }
        }
        DEFAULT_BODY_RADIUS
    }

    fn sphere_overlap(&self, body_a: RigidBodyHandle, body_b: RigidBodyHandle) -> bool {
        let (Some(state_a), Some(state_b)) = (self.bodies.get(&body_a), self.bodies.get(&body_b))
        else {
            return false;
        };
        let distance = state_a.position.distance(state_b.position);
        distance < self.bounding_radius(body_a) + self.bounding_radius(body_b)
    }

    /// Pairwise overlap pass, run only while a callback is registered.
    /// Pairs are visited in ascending handle order and reported inline.
    fn dispatch_contacts(&mut self) {
        let Some(mut callback) = self.collision_callback.take() else {
            return;
        };

        let mut handles: Vec<RigidBodyHandle> = self.bodies.keys().copied().collect();
        handles.sort_unstable_by_key(|handle| handle.0);

        for (i, &body_a) in handles.iter().enumerate() {
            for &body_b in &handles[i + 1..] {
                if !self.sphere_overlap(body_a, body_b) {
                    continue;
                }
                let (Some(state_a), Some(state_b)) =
                    (self.bodies.get(&body_a), self.bodies.get(&body_b))
                else {
                    continue;
                };
                let info = CollisionInfo {
                    body_a,
                    body_b,
                    contact_point: (state_a.position + state_b.position) * 0.5,
                    contact_normal: (state_b.position - state_a.position).normalize(),
                    penetration_depth: CONTACT_DEPTH,
                };
                callback(&info);
            }
        }

        self.collision_callback = Some(callback);
    }
}

impl PhysicsProvider for PhysicsWorld3d {
    fn step(&mut self, dt: f32) {
        // Semi-implicit Euler: velocity first, then position from the new
        // velocity. Kinematic bodies are driven externally.
        for body in self.bodies.values_mut() {
            if body.kinematic {
                continue;
            }
            body.velocity = body.velocity + self.gravity * dt;
            body.position = body.position + body.velocity * dt;
        }

        for soft_body in self.soft_bodies.values_mut() {
            soft_body.integrate(self.gravity, dt);
        }

        for fluid in self.fluids.values_mut() {
            fluid.integrate(self.gravity, dt);
        }

        for cloth in self.cloths.values_mut() {
            cloth.integrate(self.gravity, dt);
            // Attached cloth: the first vertex is hard-pinned to the body
            // every tick, overriding the gravity pass.
            if let Some(body) = cloth.attached_body {
                if let Some(state) = self.bodies.get(&body) {
                    if let Some(first) = cloth.vertices.first_mut() {
                        *first = state.position + cloth.attachment_offset;
                    }
                }
            }
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
            BodyState {
                position: desc.position,
                rotation: desc.rotation,
                velocity: Vec3::ZERO,
                mass: desc.mass,
                kinematic: desc.kinematic,
            },
        );
        log::debug!("PhysicsWorld3d: created rigid body {handle:?}");
        handle
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(&handle);

        // Destroying a body takes every collider that references it along.
        let orphaned: Vec<ColliderHandle> = self
            .collider_bodies
            .iter()
            .filter(|(_, owner)| **owner == handle)
            .map(|(collider, _)| *collider)
            .collect();
        for collider in orphaned {
            self.remove_collider(collider);
        }
        log::debug!("PhysicsWorld3d: destroyed rigid body {handle:?}");
    }

    fn set_body_transform(&mut self, handle: RigidBodyHandle, position: Vec3, rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.position = position;
            body.rotation = rotation;
        }
    }

    fn body_transform(&self, handle: RigidBodyHandle) -> (Vec3, Quat) {
        match self.bodies.get(&handle) {
            Some(body) => (body.position, body.rotation),
            None => (Vec3::ZERO, Quat::IDENTITY),
        }
    }

    fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.velocity = velocity;
        }
    }

    fn body_velocity(&self, handle: RigidBodyHandle) -> Vec3 {
        match self.bodies.get(&handle) {
            Some(body) => body.velocity,
            None => Vec3::ZERO,
        }
    }

    fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            if !body.kinematic {
                let acceleration = force / body.mass;
                body.velocity = body.velocity + acceleration * FORCE_STEP;
            }
        }
    }

    fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            if !body.kinematic {
                body.velocity = body.velocity + impulse / body.mass;
            }
        }
    }

    fn add_collider(&mut self, body: RigidBodyHandle, desc: ColliderDesc) -> ColliderHandle {
        let handle = ColliderHandle(self.alloc_handle());
        self.colliders.insert(handle, desc);
        self.collider_bodies.insert(handle, body);
        log::debug!("PhysicsWorld3d: created collider {handle:?} on body {body:?}");
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

    fn add_soft_body(&mut self, desc: SoftBodyDesc) -> SoftBodyHandle {
        let handle = SoftBodyHandle(self.alloc_handle());
        self.soft_bodies.insert(handle, SoftBodyState::from_desc(desc));
        log::debug!("PhysicsWorld3d: created soft body {handle:?}");
        handle
    }

    fn remove_soft_body(&mut self, handle: SoftBodyHandle) {
        self.soft_bodies.remove(&handle);
    }

    fn soft_body_vertices(&self, handle: SoftBodyHandle) -> Vec<Vec3> {
        match self.soft_bodies.get(&handle) {
            Some(soft_body) => soft_body.vertices.clone(),
            None => Vec::new(),
        }
    }

    fn add_fluid(&mut self, desc: FluidDesc) -> FluidHandle {
        let handle = FluidHandle(self.alloc_handle());
        let fluid = FluidState::from_desc(&desc);
        log::debug!(
            "PhysicsWorld3d: created fluid {handle:?} with {} particles",
            fluid.particles.len()
        );
        self.fluids.insert(handle, fluid);
        handle
    }

    fn remove_fluid(&mut self, handle: FluidHandle) {
        self.fluids.remove(&handle);
    }

    fn fluid_particles(&self, handle: FluidHandle) -> Vec<Vec3> {
        match self.fluids.get(&handle) {
            Some(fluid) => fluid.particles.clone(),
            None => Vec::new(),
        }
    }

    fn add_cloth(&mut self, desc: ClothDesc) -> ClothHandle {
        let handle = ClothHandle(self.alloc_handle());
        self.cloths.insert(handle, ClothState::from_desc(&desc));
        log::debug!("PhysicsWorld3d: created cloth {handle:?}");
        handle
    }

    fn remove_cloth(&mut self, handle: ClothHandle) {
        self.cloths.remove(&handle);
    }

    fn cloth_vertices(&self, handle: ClothHandle) -> Vec<Vec3> {
        match self.cloths.get(&handle) {
            Some(cloth) => cloth.vertices.clone(),
            None => Vec::new(),
        }
    }

    fn attach_cloth_to_body(&mut self, cloth: ClothHandle, body: RigidBodyHandle, offset: Vec3) {
        if let Some(state) = self.cloths.get_mut(&cloth) {
            state.attached_body = Some(body);
            state.attachment_offset = offset;
        }
    }

    fn set_collision_callback(&mut self, callback: Option<CollisionCallback>) {
        self.collision_callback = callback;
    }

    fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit> {
        let mut hit: Option<RaycastHit> = None;
        let mut nearest = ray.max_distance;

        for (&handle, body) in &self.bodies {
            let radius = self.bounding_radius(handle);

            // Ray-sphere intersection; only the nearer root counts, so rays
            // starting inside a sphere miss it.
            let oc = ray.origin - body.position;
            let a = ray.direction.dot(ray.direction);
            let b = 2.0 * oc.dot(ray.direction);
            let c = oc.dot(oc) - radius * radius;
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                continue;
            }

            let t = (-b - discriminant.sqrt()) / (2.0 * a);
            if t > 0.0 && t < nearest {
                nearest = t;
                let point = ray.origin + ray.direction * t;
                hit = Some(RaycastHit {
                    body: handle,
                    point,
                    normal: (point - body.position).normalize(),
                    distance: t,
                });
            }
        }

        hit
    }

    fn are_colliding(&self, body_a: RigidBodyHandle, body_b: RigidBodyHandle) -> bool {
        self.sphere_overlap(body_a, body_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sphere_body(world: &mut PhysicsWorld3d, position: Vec3, radius: f32) -> RigidBodyHandle {
        let body = world.add_body(RigidBodyDesc {
            position,
            ..Default::default()
        });
        world.add_collider(
            body,
            ColliderDesc {
                shape: ColliderShape::Sphere(radius),
            },
        );
        body
    }

    #[test]
    fn test_semi_implicit_euler_free_fall() {
        let mut world = PhysicsWorld3d::new();
        let body = world.add_body(RigidBodyDesc {
            position: Vec3::new(0.0, 10.0, 0.0),
            ..Default::default()
        });

        let dt = 0.01;
        let steps = 100;
        for _ in 0..steps {
            world.step(dt);
        }

        // Velocity updates before position, so after N steps the height is
        // y0 + g·dt²·N(N+1)/2 rather than the explicit-Euler N(N-1)/2 sum.
        let n = steps as f32;
        let expected_y = 10.0 + -9.81 * dt * dt * (n * (n + 1.0) / 2.0);
        let (position, _) = world.body_transform(body);
        assert_relative_eq!(position.y, expected_y, epsilon = 1e-3);

        // And it matches the continuous free-fall law to first order.
        let continuous = 10.0 - 0.5 * 9.81 * (n * dt) * (n * dt);
        assert_relative_eq!(position.y, continuous, epsilon = 0.1);

        let velocity = world.body_velocity(body);
        assert_relative_eq!(velocity.y, -9.81 * n * dt, epsilon = 1e-3);
    }

    #[test]
    fn test_kinematic_bodies_ignore_gravity_and_forces() {
        let mut world = PhysicsWorld3d::new();
        let body = world.add_body(RigidBodyDesc {
            position: Vec3::new(1.0, 2.0, 3.0),
            kinematic: true,
            ..Default::default()
        });

        world.apply_force(body, Vec3::new(100.0, 0.0, 0.0));
        world.apply_impulse(body, Vec3::new(100.0, 0.0, 0.0));
        for _ in 0..10 {
            world.step(0.016);
        }

        let (position, _) = world.body_transform(body);
        assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(world.body_velocity(body), Vec3::ZERO);

        // But it can still be repositioned externally.
        world.set_body_transform(body, Vec3::new(5.0, 5.0, 5.0), Quat::IDENTITY);
        let (position, _) = world.body_transform(body);
        assert_eq!(position, Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_apply_impulse_is_exact() {
        let mut world = PhysicsWorld3d::new();
        let body = world.add_body(RigidBodyDesc {
            mass: 2.0,
            ..Default::default()
        });

        world.set_body_velocity(body, Vec3::new(1.0, 0.0, 0.0));
        world.apply_impulse(body, Vec3::new(4.0, -6.0, 0.0));

        // velocity += impulse / mass, no time scaling.
        assert_eq!(world.body_velocity(body), Vec3::new(3.0, -3.0, 0.0));
    }

    #[test]
    fn test_apply_force_uses_fixed_step() {
        let mut world = PhysicsWorld3d::new();
        let body = world.add_body(RigidBodyDesc {
            mass: 2.0,
            ..Default::default()
        });

        world.apply_force(body, Vec3::new(10.0, 0.0, 0.0));

        // The velocity change is (force / mass) * 0.016 no matter what dt
        // the caller later steps with.
        let velocity = world.body_velocity(body);
        assert_eq!(velocity.x, (10.0 / 2.0) * 0.016);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_sphere_overlap_law() {
        let mut world = PhysicsWorld3d::new();
        let a = sphere_body(&mut world, Vec3::ZERO, 1.0);
        let b = sphere_body(&mut world, Vec3::new(2.5, 0.0, 0.0), 1.0);
        assert!(!world.are_colliding(a, b)); // 2.5 >= 1 + 1

        let c = sphere_body(&mut world, Vec3::new(1.5, 0.0, 0.0), 1.0);
        assert!(world.are_colliding(a, c)); // 1.5 < 1 + 1

        // Unknown handles never collide.
        assert!(!world.are_colliding(a, RigidBodyHandle(999)));
    }

    #[test]
    fn test_default_radius_and_box_diagonal() {
        let mut world = PhysicsWorld3d::new();

        // No colliders at all: both bodies fall back to radius 0.5.
        let a = world.add_body(RigidBodyDesc::default());
        let b = world.add_body(RigidBodyDesc {
            position: Vec3::new(0.9, 0.0, 0.0),
            ..Default::default()
        });
        assert!(world.are_colliding(a, b));
        world.set_body_transform(b, Vec3::new(1.1, 0.0, 0.0), Quat::IDENTITY);
        assert!(!world.are_colliding(a, b));

        // A box is approximated by half its diagonal: |(2,2,1)|/2 = 1.5.
        world.add_collider(
            a,
            ColliderDesc {
                shape: ColliderShape::Box(Vec3::new(2.0, 2.0, 1.0)),
            },
        );
        world.set_body_transform(b, Vec3::new(1.9, 0.0, 0.0), Quat::IDENTITY);
        assert!(world.are_colliding(a, b)); // 1.9 < 1.5 + 0.5
        world.set_body_transform(b, Vec3::new(2.1, 0.0, 0.0), Quat::IDENTITY);
        assert!(!world.are_colliding(a, b));
    }

    #[test]
    fn test_remove_body_cascades_to_colliders() {
        let mut world = PhysicsWorld3d::new();
        let body = world.add_body(RigidBodyDesc::default());
        let other = world.add_body(RigidBodyDesc::default());
        world.add_collider(body, ColliderDesc::default());
        world.add_collider(
            body,
            ColliderDesc {
                shape: ColliderShape::Sphere(2.0),
            },
        );
        let kept = world.add_collider(other, ColliderDesc::default());

        assert_eq!(world.get_all_colliders().len(), 3);
        world.remove_body(body);
        assert_eq!(world.get_all_colliders(), vec![kept]);
        assert_eq!(world.get_all_bodies(), vec![other]);

        // Removing an unknown handle is a silent no-op.
        world.remove_body(body);
        assert_eq!(world.get_all_bodies(), vec![other]);
    }

    #[test]
    fn test_raycast_hits_sphere_surface() {
        let mut world = PhysicsWorld3d::new();
        let body = sphere_body(&mut world, Vec3::ZERO, 1.0);

        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = world.cast_ray(&ray).expect("ray should hit the sphere");

        assert_eq!(hit.body, body);
        assert_relative_eq!(hit.point.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_raycast_nearest_hit_and_max_distance() {
        let mut world = PhysicsWorld3d::new();
        let near = sphere_body(&mut world, Vec3::new(3.0, 0.0, 0.0), 1.0);
        let _far = sphere_body(&mut world, Vec3::new(8.0, 0.0, 0.0), 1.0);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = world.cast_ray(&ray).expect("ray should hit the near body");
        assert_eq!(hit.body, near);
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-5);

        // Beyond max_distance nothing is reported.
        let short = Ray {
            max_distance: 1.5,
            ..ray
        };
        assert!(world.cast_ray(&short).is_none());

        // A ray pointing away misses.
        let away = Ray::new(Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0));
        assert!(world.cast_ray(&away).is_none());
    }

    #[test]
    fn test_fluid_particle_count_is_invariant() {
        let mut world = PhysicsWorld3d::new();
        for count in [27u32, 30, 64, 100] {
            let fluid = world.add_fluid(FluidDesc {
                particle_count: count,
                ..Default::default()
            });
            assert_eq!(world.fluid_particles(fluid).len(), count as usize);
            for _ in 0..25 {
                world.step(0.016);
            }
            assert_eq!(world.fluid_particles(fluid).len(), count as usize);
        }
    }

    #[test]
    fn test_fluid_floor_clamps_particles() {
        let mut world = PhysicsWorld3d::new();
        let fluid = world.add_fluid(FluidDesc {
            position: Vec3::new(0.0, -9.5, 0.0),
            size: Vec3::new(1.0, 1.0, 1.0),
            particle_count: 27,
            ..Default::default()
        });

        for _ in 0..120 {
            world.step(0.016);
        }

        for particle in world.fluid_particles(fluid) {
            assert!(particle.y >= -10.0, "particle fell through the floor");
        }
    }

    #[test]
    fn test_soft_body_vertices_fall_independently() {
        let mut world = PhysicsWorld3d::new();
        let soft_body = world.add_soft_body(SoftBodyDesc {
            vertices: vec![
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![0, 1, 2],
            ..Default::default()
        });

        let before = world.soft_body_vertices(soft_body);
        assert_eq!(before.len(), 3);

        for _ in 0..10 {
            world.step(0.016);
        }

        let after = world.soft_body_vertices(soft_body);
        assert_eq!(after.len(), 3);
        for (a, b) in before.iter().zip(&after) {
            assert!(a.y > b.y, "every vertex sinks under gravity");
            assert_eq!(a.x, b.x);
        }

        world.remove_soft_body(soft_body);
        assert!(world.soft_body_vertices(soft_body).is_empty());
    }

    #[test]
    fn test_cloth_grid_counts_and_fixed_corners() {
        let mut world = PhysicsWorld3d::new();
        let cloth = world.add_cloth(ClothDesc {
            resolution_x: 4,
            resolution_y: 3,
            ..Default::default()
        });

        let initial = world.cloth_vertices(cloth);
        assert_eq!(initial.len(), 12);
        {
            let state = world.cloths.get(&cloth).unwrap();
            assert_eq!(state.indices.len(), 6 * 3 * 2);
            assert!(state.fixed[0] && state.fixed[3]);
            assert!(!state.fixed[1] && !state.fixed[4]);
        }

        for _ in 0..10 {
            world.step(0.016);
        }

        let settled = world.cloth_vertices(cloth);
        assert_eq!(settled.len(), 12);
        // Pinned corners stay put while interior vertices sink.
        assert_eq!(settled[0], initial[0]);
        assert_eq!(settled[3], initial[3]);
        assert!(settled[5].y < initial[5].y);
    }

    #[test]
    fn test_cloth_attachment_pins_first_vertex() {
        let mut world = PhysicsWorld3d::new();
        let body = world.add_body(RigidBodyDesc {
            position: Vec3::new(0.0, 5.0, 0.0),
            kinematic: true,
            ..Default::default()
        });
        let cloth = world.add_cloth(ClothDesc {
            resolution_x: 3,
            resolution_y: 3,
            fixed_corners: false,
            ..Default::default()
        });

        let offset = Vec3::new(0.0, 1.0, 0.0);
        world.attach_cloth_to_body(cloth, body, offset);

        world.step(0.016);
        assert_eq!(world.cloth_vertices(cloth)[0], Vec3::new(0.0, 6.0, 0.0));

        // The pin tracks the body when it is repositioned.
        world.set_body_transform(body, Vec3::new(2.0, 5.0, 0.0), Quat::IDENTITY);
        world.step(0.016);
        assert_eq!(world.cloth_vertices(cloth)[0], Vec3::new(2.0, 6.0, 0.0));
    }

    #[test]
    fn test_collision_callback_reports_each_overlapping_pair() {
        let mut world = PhysicsWorld3d::new();
        world.set_gravity(Vec3::ZERO);
        let a = sphere_body(&mut world, Vec3::ZERO, 1.0);
        let b = sphere_body(&mut world, Vec3::new(1.5, 0.0, 0.0), 1.0);
        let _far = sphere_body(&mut world, Vec3::new(100.0, 0.0, 0.0), 1.0);

        let contacts: Rc<RefCell<Vec<CollisionInfo>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&contacts);
        world.set_collision_callback(Some(Box::new(move |info| {
            sink.borrow_mut().push(*info);
        })));

        world.step(0.016);

        let recorded = contacts.borrow();
        assert_eq!(recorded.len(), 1);
        let info = &recorded[0];
        assert_eq!(info.body_a, a);
        assert_eq!(info.body_b, b);
        assert_relative_eq!(info.contact_point.x, 0.75, epsilon = 1e-5);
        assert_relative_eq!(info.contact_normal.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(info.penetration_depth, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_collision_callback_single_slot() {
        let mut world = PhysicsWorld3d::new();
        world.set_gravity(Vec3::ZERO);
        sphere_body(&mut world, Vec3::ZERO, 1.0);
        sphere_body(&mut world, Vec3::new(1.0, 0.0, 0.0), 1.0);

        let first: Rc<RefCell<u32>> = Rc::new(RefCell::new(0));
        let second: Rc<RefCell<u32>> = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&first);
        world.set_collision_callback(Some(Box::new(move |_| *sink.borrow_mut() += 1)));
        world.step(0.016);

        // Replacing the callback unregisters the previous one.
        let sink = Rc::clone(&second);
        world.set_collision_callback(Some(Box::new(move |_| *sink.borrow_mut() += 1)));
        world.step(0.016);

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 1);

        // Clearing the slot disables the pass entirely.
        world.set_collision_callback(None);
        world.step(0.016);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn test_unknown_handles_degrade_to_defaults() {
        let world = PhysicsWorld3d::new();
        let ghost = RigidBodyHandle(77);
        assert_eq!(world.body_transform(ghost), (Vec3::ZERO, Quat::IDENTITY));
        assert_eq!(world.body_velocity(ghost), Vec3::ZERO);
        assert!(world.soft_body_vertices(SoftBodyHandle(77)).is_empty());
        assert!(world.fluid_particles(FluidHandle(77)).is_empty());
        assert!(world.cloth_vertices(ClothHandle(77)).is_empty());
    }

    #[test]
    fn test_handles_are_monotonic_from_one() {
        let mut world = PhysicsWorld3d::new();
        let body = world.add_body(RigidBodyDesc::default());
        assert_eq!(body.0, 1);
        let collider = world.add_collider(body, ColliderDesc::default());
        assert_eq!(collider.0, 2);
        let cloth = world.add_cloth(ClothDesc::default());
        assert_eq!(cloth.0, 3);
        assert!(body.is_valid() && collider.is_valid() && cloth.is_valid());
    }
}
