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

//! Deformable entity state for the 3D world: soft bodies, fluid particle
//! volumes, and cloth patches.

use graviton_core::math::{Vec2, Vec3};
use graviton_core::physics::{ClothDesc, FluidDesc, RigidBodyHandle, SoftBodyDesc};

/// World-space floor height fluids bounce against.
pub(crate) const FLUID_FLOOR_Y: f32 = -10.0;

/// Velocity kept after a particle bounces off the floor.
const FLUID_BOUNCE_DAMPING: f32 = 0.5;

/// An unconstrained deformable mesh; vertices fall independently.
pub(crate) struct SoftBodyState {
    pub(crate) vertices: Vec<Vec3>,
    #[allow(dead_code)]
    pub(crate) indices: Vec<u32>,
    #[allow(dead_code)]
    pub(crate) mass: f32,
    #[allow(dead_code)]
    pub(crate) stiffness: f32,
    #[allow(dead_code)]
    pub(crate) damping: f32,
}

impl SoftBodyState {
    pub(crate) fn from_desc(desc: SoftBodyDesc) -> Self {
        Self {
            vertices: desc.vertices,
            indices: desc.indices,
            mass: desc.mass,
            stiffness: desc.stiffness,
            damping: desc.damping,
        }
    }

    /// No structural constraints are solved; every vertex accumulates the
    /// gravity displacement on its own.
    pub(crate) fn integrate(&mut self, gravity: Vec3, dt: f32) {
        let fall = gravity * (dt * dt);
        for vertex in &mut self.vertices {
            *vertex = *vertex + fall;
        }
    }
}

/// A fixed-count particle volume with a one-sided floor collision.
pub(crate) struct FluidState {
    pub(crate) particles: Vec<Vec3>,
    pub(crate) velocities: Vec<Vec3>,
    #[allow(dead_code)]
    pub(crate) viscosity: f32,
    #[allow(dead_code)]
    pub(crate) density: f32,
    #[allow(dead_code)]
    pub(crate) surface_tension: f32,
}

impl FluidState {
    /// Lays particles out once on a cubic grid of side
    /// `ceil(cbrt(particle_count))`, anchored at `desc.position` and spaced
    /// to span `desc.size.x`, stopping at exactly `particle_count`
    /// particles. The count never changes afterwards.
    pub(crate) fn from_desc(desc: &FluidDesc) -> Self {
        let count = desc.particle_count as usize;
        let side = (desc.particle_count as f32).cbrt().ceil() as usize;
        let spacing = if side > 0 {
            desc.size.x / side as f32
        } else {
            0.0
        };

        let mut particles = Vec::with_capacity(count);
        'grid: for x in 0..side {
            for y in 0..side {
                for z in 0..side {
                    if particles.len() == count {
                        break 'grid;
                    }
                    particles.push(
                        desc.position
                            + Vec3::new(
                                x as f32 * spacing,
                                y as f32 * spacing,
                                z as f32 * spacing,
                            ),
                    );
                }
            }
        }

        let velocities = vec![Vec3::ZERO; particles.len()];
        Self {
            particles,
            velocities,
            viscosity: desc.viscosity,
            density: desc.density,
            surface_tension: desc.surface_tension,
        }
    }

    pub(crate) fn integrate(&mut self, gravity: Vec3, dt: f32) {
        for (position, velocity) in self.particles.iter_mut().zip(&mut self.velocities) {
            *velocity = *velocity + gravity * dt;
            *position = *position + *velocity * dt;

            // One-sided floor: clamp and reflect with damping.
            if position.y < FLUID_FLOOR_Y {
                position.y = FLUID_FLOOR_Y;
                velocity.y = -velocity.y * FLUID_BOUNCE_DAMPING;
            }
        }
    }
}

/// A rectangular vertex grid, optionally pinned at its top corners and
/// optionally attached to a rigid body.
pub(crate) struct ClothState {
    pub(crate) vertices: Vec<Vec3>,
    #[allow(dead_code)]
    pub(crate) indices: Vec<u32>,
    pub(crate) fixed: Vec<bool>,
    #[allow(dead_code)]
    pub(crate) resolution: (u32, u32),
    #[allow(dead_code)]
    pub(crate) mass: f32,
    #[allow(dead_code)]
    pub(crate) stiffness: f32,
    #[allow(dead_code)]
    pub(crate) damping: f32,
    pub(crate) attached_body: Option<RigidBodyHandle>,
    pub(crate) attachment_offset: Vec3,
}

impl ClothState {
    /// Builds the `resolution_x × resolution_y` grid row-major from
    /// `desc.position`, hanging downward along -y, with two triangles per
    /// quad. With `fixed_corners` the two top-row corner vertices are
    /// pinned.
    pub(crate) fn from_desc(desc: &ClothDesc) -> Self {
        let (rx, ry) = (desc.resolution_x as usize, desc.resolution_y as usize);
        let step = Vec2::new(
            desc.size.x / (desc.resolution_x as f32 - 1.0),
            desc.size.y / (desc.resolution_y as f32 - 1.0),
        );

        let mut vertices = Vec::with_capacity(rx * ry);
        let mut fixed = Vec::with_capacity(rx * ry);
        for y in 0..ry {
            for x in 0..rx {
                vertices.push(
                    desc.position
                        + Vec3::new(x as f32 * step.x, -(y as f32) * step.y, 0.0),
                );
                let corner = (x == 0 || x + 1 == rx) && y == 0;
                fixed.push(desc.fixed_corners && corner);
            }
        }

        let mut indices = Vec::with_capacity(rx.saturating_sub(1) * ry.saturating_sub(1) * 6);
        for y in 0..ry.saturating_sub(1) {
            for x in 0..rx.saturating_sub(1) {
                let i0 = (y * rx + x) as u32;
                let i1 = i0 + 1;
                let i2 = i0 + rx as u32;
                let i3 = i2 + 1;
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }

        Self {
            vertices,
            indices,
            fixed,
            resolution: (desc.resolution_x, desc.resolution_y),
            mass: desc.mass,
            stiffness: desc.stiffness,
            damping: desc.damping,
            attached_body: None,
            attachment_offset: Vec3::ZERO,
        }
    }

    /// Gravity pass over the non-fixed vertices. The attachment pin is
    /// applied afterwards by the world, which owns the body positions.
    pub(crate) fn integrate(&mut self, gravity: Vec3, dt: f32) {
        let fall = gravity * (dt * dt);
        for (vertex, fixed) in self.vertices.iter_mut().zip(&self.fixed) {
            if !*fixed {
                *vertex = *vertex + fall;
            }
        }
    }
}
