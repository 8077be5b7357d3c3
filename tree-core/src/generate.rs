//! Recursive fractal branch generation.
//!
//! Starting from the trunk, every level emits two child branches per parent
//! branch. A child is placed by composing a fixed chain of elementary
//! transforms (rotation, lateral offset, tilt, shrink, climb) and the two
//! children mirror each other in offset and tilt sign, with slightly
//! different green shifts so the foliage reads as two interleaved tones.

use crate::{branch::Branch, color::Rgb, config::TreeConfig};
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Number of branches emitted for a full tree of `levels` levels,
/// excluding the trunk.
///
/// Each internal call emits two children and recurses into both, which is a
/// geometric series: `2^(levels + 1) - 2`.
pub fn branch_count(levels: u32) -> usize {
    (1usize << (levels + 1)) - 2
}

/// Recursively emits branch instances into `sink`.
///
/// For each of the two children of the current branch:
///
/// 1. Derive the child color by shifting the parent's green channel by the
///    configured step divided by the total level count.
/// 2. Compose the child's local transform, left to right:
///    quarter turn about Y, lateral offset of `±branch_width / 2` along X,
///    tilt of `∓branch_angle` about Z, uniform `child_scale`, then a climb
///    of `branch_height` along Y. The offset and tilt signs mirror between
///    the two children.
/// 3. Emit the child with world transform `local * parent`. The
///    multiplication order is load-bearing: swapping it reshapes the tree.
/// 4. Recurse with `level - 1`, passing the child's **local** transform as
///    the next parent. Propagating the local rather than the world matrix
///    is what makes every level re-apply the whole chain multiplicatively,
///    so branches shrink and rotate relative to their immediate parent.
///
/// Emission is depth-first: first child, its entire subtree, then the
/// second child and its subtree.
///
/// ### Parameters
/// - `sink` - Output list; branches are appended in generation order.
/// - `level` - Remaining recursion depth; `0` emits nothing and returns.
/// - `parent` - The parent's local transform (the trunk transform at the
///   root call).
/// - `color` - The parent's color.
/// - `cfg` - Shape constants; `cfg.levels` is the total depth used to size
///   the per-level green steps.
pub fn grow(sink: &mut Vec<Branch>, level: u32, parent: &Mat4, color: Rgb, cfg: &TreeConfig) {
    if level == 0 {
        return;
    }

    let levels = cfg.levels.max(1) as f32;
    let half_width = cfg.branch_width / 2.0;

    let children = [
        (1.0_f32, cfg.green_step_first),
        (-1.0_f32, cfg.green_step_second),
    ];

    for (side, green_step) in children {
        let child_color = color.with_green_shift(green_step / levels);

        let local = Mat4::from_rotation_y(FRAC_PI_2)
            * Mat4::from_translation(Vec3::new(side * half_width, 0.0, 0.0))
            * Mat4::from_rotation_z(-side * cfg.branch_angle)
            * Mat4::from_scale(Vec3::splat(cfg.child_scale))
            * Mat4::from_translation(Vec3::new(0.0, cfg.branch_height, 0.0));

        sink.push(Branch::new(local * *parent, child_color));
        grow(sink, level - 1, &local, child_color, cfg);
    }
}
