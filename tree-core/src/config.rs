use crate::color::Rgb;
use std::f32::consts::FRAC_PI_4;

#[derive(Clone, Copy, Debug)]
pub struct TreeConfig {
    /// Number of recursion levels below the trunk.
    pub levels: u32,
    /// Diameter of the branch cylinder at its base.
    pub branch_width: f32,
    /// Height of the branch cylinder.
    pub branch_height: f32,
    /// Uniform shrink factor applied at every level.
    pub child_scale: f32,
    /// Tilt of each child away from its parent axis, in radians.
    pub branch_angle: f32,
    /// Green shift per level for the first child (divided by `levels`).
    pub green_step_first: f32,
    /// Green shift per level for the second child (divided by `levels`).
    pub green_step_second: f32,
    pub trunk_color: Rgb,
    /// Radial segment count of the shared cylinder mesh.
    pub radial_segments: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            levels: 12,
            branch_width: 50.0,
            branch_height: 200.0,
            child_scale: 0.75,
            branch_angle: FRAC_PI_4,
            green_step_first: 0.7,
            green_step_second: 0.64,
            trunk_color: Rgb::from_hex(0xa04500),
            radial_segments: 10,
        }
    }
}
