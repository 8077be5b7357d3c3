//! Core library for the procedurally generated 3D fractal tree.
//!
//! Main components:
//! - [`branch`] — branch instances (world transform + color).
//! - [`camera`] — perspective projection and orbit camera controller.
//! - [`color`] — RGB color type used for branch materials.
//! - [`config`] — tree shape and generation constants.
//! - [`generate`] — recursive fractal branch generation.
//! - [`geometry`] — the tapered-cylinder mesh shared by all branches.
//! - [`scene`] — scene assembly: trunk, branches, and lights.

pub mod branch;
pub mod camera;
pub mod color;
pub mod config;
pub mod generate;
pub mod geometry;
pub mod scene;
