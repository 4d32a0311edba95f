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

//! Defines the error type for the physics subsystem.
//!
//! The subsystem is fail-soft by design: operations on unknown handles or an
//! uninitialized engine degrade to safe defaults instead of erroring, so the
//! only fallible operation is engine initialization itself.

use std::fmt;

/// An error raised by the physics engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    /// `initialize` was called while a backend was already active. The
    /// engine must be shut down before another backend can be selected.
    AlreadyInitialized,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::AlreadyInitialized => {
                write!(f, "physics engine is already initialized")
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
