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

//! Descriptors consumed by the entity creation calls of a physics provider.

use serde::{Deserialize, Serialize};

use crate::math::{Quat, Vec2, Vec3};

/// Description for creating a rigid body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    /// Initial position.
    pub position: Vec3,
    /// Initial rotation.
    pub rotation: Quat,
    /// Mass of the body in kg.
    pub mass: f32,
    /// Kinematic bodies are excluded from gravity and force integration but
    /// may be repositioned externally each frame.
    pub kinematic: bool,
    /// Advisory tag marking a body as intended for the planar backend.
    pub planar: bool,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            mass: 1.0,
            kinematic: false,
            planar: false,
        }
    }
}

/// Supported collider shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Axis-aligned box given by its full extents.
    Box(Vec3),
    /// Sphere with radius.
    Sphere(f32),
    /// Capsule with full height and radius.
    Capsule {
        /// Full height of the capsule along its axis.
        height: f32,
        /// Radius of the capsule caps.
        radius: f32,
    },
    /// Arbitrary triangle mesh, approximated by a default bounding sphere.
    Mesh,
    /// Infinite plane.
    Plane,
}

/// Description for creating a collider attached to a rigid body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Shape of the collider.
    pub shape: ColliderShape,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::Box(Vec3::ONE),
        }
    }
}

/// Description for creating a soft body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftBodyDesc {
    /// Vertex positions of the deformable mesh.
    pub vertices: Vec<Vec3>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
    /// Total mass of the body.
    pub mass: f32,
    /// Stiffness coefficient in `[0, 1]`.
    pub stiffness: f32,
    /// Velocity damping coefficient.
    pub damping: f32,
}

impl Default for SoftBodyDesc {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            mass: 1.0,
            stiffness: 0.5,
            damping: 0.1,
        }
    }
}

/// Description for creating a fluid volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidDesc {
    /// Corner the particle grid is anchored at.
    pub position: Vec3,
    /// Extents of the requested volume.
    pub size: Vec3,
    /// Number of particles; fixed for the lifetime of the fluid.
    pub particle_count: u32,
    /// Viscosity coefficient.
    pub viscosity: f32,
    /// Rest density.
    pub density: f32,
    /// Surface tension coefficient.
    pub surface_tension: f32,
}

impl Default for FluidDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            size: Vec3::new(10.0, 10.0, 10.0),
            particle_count: 1000,
            viscosity: 0.1,
            density: 1.0,
            surface_tension: 0.5,
        }
    }
}

/// Description for creating a cloth patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClothDesc {
    /// Position of the first (top-left) vertex.
    pub position: Vec3,
    /// Physical size of the patch in its local plane.
    pub size: Vec2,
    /// Number of vertices along the x axis.
    pub resolution_x: u32,
    /// Number of vertices along the y axis.
    pub resolution_y: u32,
    /// Total mass of the patch.
    pub mass: f32,
    /// Stiffness coefficient in `[0, 1]`.
    pub stiffness: f32,
    /// Velocity damping coefficient.
    pub damping: f32,
    /// Pins the two top-row corner vertices in place.
    pub fixed_corners: bool,
}

impl Default for ClothDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            size: Vec2::new(10.0, 10.0),
            resolution_x: 20,
            resolution_y: 20,
            mass: 1.0,
            stiffness: 0.8,
            damping: 0.2,
            fixed_corners: true,
        }
    }
}
