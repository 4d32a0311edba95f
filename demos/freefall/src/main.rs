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

// Graviton freefall demo
// Drives a small scene for two simulated seconds and logs the read-backs
// a renderer would consume each frame.

use anyhow::Result;
use graviton_engine::prelude::*;

const DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 120;

fn main() -> Result<()> {
    env_logger::init();

    let mut engine = PhysicsEngine::new();
    engine.initialize(PhysicsBackendKind::Dim3)?;

    // A sphere dropped onto a kinematic platform.
    let ball = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(0.0, 10.0, 0.0),
        ..Default::default()
    });
    engine.create_collider(
        ball,
        ColliderDesc {
            shape: ColliderShape::Sphere(0.5),
        },
    );

    let platform = engine.create_rigid_body(RigidBodyDesc {
        position: Vec3::new(0.0, 0.0, 0.0),
        kinematic: true,
        ..Default::default()
    });
    engine.create_collider(
        platform,
        ColliderDesc {
            shape: ColliderShape::Box(Vec3::new(4.0, 0.5, 4.0)),
        },
    );

    // A small banner cloth pinned to the platform, and a splash of fluid.
    let banner = engine.create_cloth(ClothDesc {
        position: Vec3::new(-1.0, 2.0, 0.0),
        size: Vec2::new(2.0, 2.0),
        resolution_x: 8,
        resolution_y: 8,
        ..Default::default()
    });
    engine.attach_cloth_to_body(banner, platform, Vec3::new(0.0, 2.0, 0.0));

    let splash = engine.create_fluid(FluidDesc {
        position: Vec3::new(2.0, 4.0, 2.0),
        size: Vec3::new(1.0, 1.0, 1.0),
        particle_count: 64,
        ..Default::default()
    });

    engine.set_collision_callback(Some(Box::new(|info: &CollisionInfo| {
        log::info!(
            "contact: {:?} <-> {:?} at ({:.2}, {:.2}, {:.2}), depth {:.2}",
            info.body_a,
            info.body_b,
            info.contact_point.x,
            info.contact_point.y,
            info.contact_point.z,
            info.penetration_depth,
        );
    })));

    for frame in 0..FRAMES {
        engine.update(DT);

        if frame % 30 == 0 {
            let (position, _) = engine.rigid_body_transform(ball);
            log::info!(
                "frame {frame:3}: ball at ({:.2}, {:.2}, {:.2})",
                position.x,
                position.y,
                position.z,
            );
        }
    }

    // The per-frame read-backs a renderer would copy out.
    let cloth_vertices = engine.cloth_vertices(banner);
    let particles = engine.fluid_particles(splash);
    log::info!(
        "read back {} cloth vertices, {} fluid particles",
        cloth_vertices.len(),
        particles.len(),
    );

    // Aim a ray straight at the ball's final position.
    let (ball_position, _) = engine.rigid_body_transform(ball);
    let origin = Vec3::new(-5.0, ball_position.y, 0.0);
    let ray = Ray::new(origin, Vec3::new(1.0, 0.0, 0.0));
    match engine.cast_ray(&ray) {
        Some(hit) => log::info!(
            "ray hit {:?} at distance {:.2}",
            hit.body,
            hit.distance
        ),
        None => log::info!("ray missed"),
    }

    engine.shutdown();
    Ok(())
}
