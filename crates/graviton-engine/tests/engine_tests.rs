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

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use graviton_engine::prelude::*;

#[test]
fn test_initialize_and_shutdown() {
    let mut engine = PhysicsEngine::new();
    assert!(!engine.is_initialized());
    assert_eq!(engine.backend_kind(), None);

    engine.initialize(PhysicsBackendKind::Dim3).unwrap();
    assert!(engine.is_initialized());
    assert_eq!(engine.backend_kind(), Some(PhysicsBackendKind::Dim3));

    engine.update(0.016);
    engine.shutdown();
    assert!(!engine.is_initialized());
    assert_eq!(engine.backend_kind(), None);
}

#[test]
fn test_double_initialize_fails() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();
    assert_eq!(
        engine.initialize(PhysicsBackendKind::Dim2),
        Err(PhysicsError::AlreadyInitialized)
    );
    // The active backend is unchanged.
    assert_eq!(engine.backend_kind(), Some(PhysicsBackendKind::Dim3));
}

#[test]
fn test_backend_swap_requires_shutdown() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();
    engine.shutdown();
    engine.initialize(PhysicsBackendKind::Dim2).unwrap();
    assert_eq!(engine.backend_kind(), Some(PhysicsBackendKind::Dim2));

    // Entities from the previous backend are gone; the new backend hands
    // out fresh handles starting over.
    let body = engine.create_rigid_body(RigidBodyDesc::default());
    assert!(body.is_valid());
}

#[test]
fn test_uninitialized_engine_degrades_to_defaults() {
    let mut engine = PhysicsEngine::new();

    assert_eq!(
        engine.create_rigid_body(RigidBodyDesc::default()),
        RigidBodyHandle::INVALID
    );
    assert_eq!(
        engine.create_collider(RigidBodyHandle(1), ColliderDesc::default()),
        ColliderHandle::INVALID
    );
    assert_eq!(
        engine.create_soft_body(SoftBodyDesc::default()),
        SoftBodyHandle::INVALID
    );
    assert_eq!(engine.create_fluid(FluidDesc::default()), FluidHandle::INVALID);
    assert_eq!(engine.create_cloth(ClothDesc::default()), ClothHandle::INVALID);

    let ghost = RigidBodyHandle(1);
    assert_eq!(
        engine.rigid_body_transform(ghost),
        (Vec3::ZERO, Quat::IDENTITY)
    );
    assert_eq!(engine.rigid_body_velocity(ghost), Vec3::ZERO);
    assert_eq!(engine.gravity(), Vec3::ZERO);
    assert!(engine.soft_body_vertices(SoftBodyHandle(1)).is_empty());
    assert!(engine.fluid_particles(FluidHandle(1)).is_empty());
    assert!(engine.cloth_vertices(ClothHandle(1)).is_empty());
    assert!(!engine.are_colliding(ghost, RigidBodyHandle(2)));
    assert!(engine
        .cast_ray(&Ray::new(Vec3::ZERO, Vec3::X))
        .is_none());

    // Mutators are silent no-ops rather than panics.
    engine.update(0.016);
    engine.destroy_rigid_body(ghost);
    engine.set_rigid_body_velocity(ghost, Vec3::X);
    engine.apply_force(ghost, Vec3::X);
    engine.apply_impulse(ghost, Vec3::X);
    engine.set_gravity(Vec3::new(0.0, -1.0, 0.0));
    engine.set_collision_callback(Some(Box::new(|_| {})));
    engine.shutdown();
}

#[test]
fn test_rigid_body_round_trip() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    let body = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(1.0, 2.0, 3.0),
        ..Default::default()
    });
    assert!(body.is_valid());

    let (position, rotation) = engine.rigid_body_transform(body);
    assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(rotation, Quat::IDENTITY);

    engine.set_rigid_body_velocity(body, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(engine.rigid_body_velocity(body), Vec3::new(5.0, 0.0, 0.0));

    engine.destroy_rigid_body(body);
    assert_eq!(
        engine.rigid_body_transform(body),
        (Vec3::ZERO, Quat::IDENTITY)
    );
}

#[test]
fn test_impulse_round_trip_law() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    let body = engine.create_rigid_body(RigidBodyDesc {
        mass: 4.0,
        ..Default::default()
    });
    engine.set_rigid_body_velocity(body, Vec3::new(0.0, 1.0, 0.0));
    engine.apply_impulse(body, Vec3::new(8.0, 0.0, -2.0));

    // Exactly impulse / mass on top of the prior velocity.
    assert_eq!(
        engine.rigid_body_velocity(body),
        Vec3::new(2.0, 1.0, -0.5)
    );
}

#[test]
fn test_gravity_setting() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    assert_relative_eq!(engine.gravity().y, -9.81);
    engine.set_gravity(Vec3::new(0.0, -20.0, 0.0));
    assert_eq!(engine.gravity(), Vec3::new(0.0, -20.0, 0.0));
}

#[test]
fn test_free_fall_through_facade() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    let body = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(0.0, 10.0, 0.0),
        ..Default::default()
    });

    let dt = 1.0 / 60.0;
    for _ in 0..60 {
        engine.update(dt);
    }

    let (position, _) = engine.rigid_body_transform(body);
    // One second of free fall from rest: y ≈ y0 − g/2, up to the
    // semi-implicit discretization bias.
    assert_relative_eq!(position.y, 10.0 - 0.5 * 9.81, epsilon = 0.1);
    assert!(position.y < 10.0 - 0.5 * 9.81 + 0.001);
}

#[test]
fn test_raycast_through_facade() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    let body = engine.create_rigid_body(RigidBodyDesc::default());
    engine.create_collider(
        body,
        ColliderDesc {
            shape: ColliderShape::Sphere(1.0),
        },
    );

    let ray = Ray {
        origin: Vec3::new(-5.0, 0.0, 0.0),
        direction: Vec3::new(1.0, 0.0, 0.0),
        max_distance: 10.0,
    };
    let hit = engine.cast_ray(&ray).expect("ray should hit");
    assert_eq!(hit.body, body);
    assert_relative_eq!(hit.point.x, -1.0, epsilon = 1e-5);
    assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-5);
}

#[test]
fn test_soft_body_through_facade() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    let soft_body = engine.create_soft_body(SoftBodyDesc {
        vertices: vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        indices: vec![0, 1, 2],
        ..Default::default()
    });
    assert!(soft_body.is_valid());
    assert_eq!(engine.soft_body_vertices(soft_body).len(), 3);

    engine.destroy_soft_body(soft_body);
    assert!(engine.soft_body_vertices(soft_body).is_empty());
}

#[test]
fn test_fluid_and_cloth_invariants_through_facade() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    let fluid = engine.create_fluid(FluidDesc {
        particle_count: 125,
        ..Default::default()
    });
    let cloth = engine.create_cloth(ClothDesc {
        resolution_x: 10,
        resolution_y: 10,
        ..Default::default()
    });

    assert_eq!(engine.fluid_particles(fluid).len(), 125);
    assert_eq!(engine.cloth_vertices(cloth).len(), 100);

    for _ in 0..30 {
        engine.update(0.016);
    }

    assert_eq!(engine.fluid_particles(fluid).len(), 125);
    assert_eq!(engine.cloth_vertices(cloth).len(), 100);
}

#[test]
fn test_cloth_attachment_through_facade() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();

    let platform = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(0.0, 8.0, 0.0),
        kinematic: true,
        ..Default::default()
    });
    let cloth = engine.create_cloth(ClothDesc {
        resolution_x: 5,
        resolution_y: 5,
        fixed_corners: false,
        ..Default::default()
    });
    engine.attach_cloth_to_body(cloth, platform, Vec3::new(0.5, 0.0, 0.0));

    engine.update(0.016);
    assert_eq!(
        engine.cloth_vertices(cloth)[0],
        Vec3::new(0.5, 8.0, 0.0)
    );
}

#[test]
fn test_collision_callback_through_facade() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3).unwrap();
    engine.set_gravity(Vec3::ZERO);

    let a = engine.create_rigid_body(RigidBodyDesc::default());
    let b = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(0.5, 0.0, 0.0),
        ..Default::default()
    });

    let contacts: Rc<RefCell<Vec<(RigidBodyHandle, RigidBodyHandle)>>> =
        Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&contacts);
    engine.set_collision_callback(Some(Box::new(move |info: &CollisionInfo| {
        sink.borrow_mut().push((info.body_a, info.body_b));
    })));

    engine.update(0.016);
    assert_eq!(contacts.borrow().as_slice(), &[(a, b)]);
    assert!(engine.are_colliding(a, b));
}

#[test]
fn test_dim2_backend_contract() {
    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim2).unwrap();

    // Deformable creates are unsupported no-ops in the planar backend.
    assert_eq!(
        engine.create_soft_body(SoftBodyDesc::default()),
        SoftBodyHandle::INVALID
    );
    assert_eq!(engine.create_fluid(FluidDesc::default()), FluidHandle::INVALID);
    assert_eq!(engine.create_cloth(ClothDesc::default()), ClothHandle::INVALID);

    // Rigid bodies still simulate, with z pinned to zero.
    let body = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(0.0, 10.0, 5.0),
        ..Default::default()
    });
    assert!(body.is_valid());

    for _ in 0..10 {
        engine.update(0.016);
    }

    let (position, rotation) = engine.rigid_body_transform(body);
    assert!(position.y < 10.0);
    assert_eq!(position.z, 0.0);
    assert_eq!(rotation, Quat::IDENTITY);

    // The AABB overlap law holds through the facade.
    let other = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(0.9, position.y, 0.0),
        ..Default::default()
    });
    engine.set_rigid_body_transform(body, Vec3::new(0.0, 0.0, 0.0), Quat::IDENTITY);
    engine.set_rigid_body_transform(other, Vec3::new(0.9, 0.0, 0.0), Quat::IDENTITY);
    assert!(engine.are_colliding(body, other));
    engine.set_rigid_body_transform(other, Vec3::new(1.1, 0.0, 0.0), Quat::IDENTITY);
    assert!(!engine.are_colliding(body, other));
}
