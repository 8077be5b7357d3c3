//! Scene assembly: the shared mesh, the trunk, the generated branches, and
//! the two lights.

use crate::{
    branch::Branch, color::Rgb, config::TreeConfig, generate, geometry::Mesh,
};
use glam::{Mat4, Vec3};

/// Directional light with a fixed direction toward the light source.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    /// Normalized direction from a surface toward the light.
    pub direction: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

/// Uniform fill light applied to every surface regardless of orientation.
#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

/// The fixed two-light rig: one white directional light placed at
/// `(-1, 2, 4)` shining toward the origin, plus a white ambient fill.
#[derive(Clone, Copy, Debug)]
pub struct Lighting {
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            directional: DirectionalLight {
                direction: Vec3::new(-1.0, 2.0, 4.0).normalize(),
                color: Rgb::WHITE,
                intensity: 1.0,
            },
            ambient: AmbientLight {
                color: Rgb::WHITE,
                intensity: 1.0,
            },
        }
    }
}

impl Lighting {
    /// Shades a base color for a surface with the given unit normal.
    ///
    /// Lambert diffuse from the directional light plus the ambient term,
    /// clamped to the displayable range per channel.
    pub fn shade(&self, base: Rgb, normal: Vec3) -> Rgb {
        let lambert = normal.dot(self.directional.direction).max(0.0);
        let diffuse = self.directional.intensity * lambert;
        let ambient = self.ambient.intensity;

        Rgb::new(
            base.r * (ambient * self.ambient.color.r + diffuse * self.directional.color.r),
            base.g * (ambient * self.ambient.color.g + diffuse * self.directional.color.g),
            base.b * (ambient * self.ambient.color.b + diffuse * self.directional.color.b),
        )
        .clamped()
    }
}

/// The complete renderable scene.
///
/// Built once at startup and never mutated afterwards: branches are only
/// ever inserted during generation, and the mesh is owned here exactly once
/// no matter how many instances reference it.
#[derive(Debug)]
pub struct Scene {
    pub mesh: Mesh,
    /// Trunk first, then every generated branch in depth-first order.
    pub branches: Vec<Branch>,
    pub lights: Lighting,
}

impl Scene {
    /// Builds the scene for the given configuration.
    ///
    /// The shared mesh is a tapered cylinder (top radius `0.65 * width`,
    /// bottom radius `width`). The trunk is shifted down by half the branch
    /// height and seeds the recursion with its own transform and color.
    pub fn build(cfg: &TreeConfig) -> Self {
        let mesh = Mesh::tapered_cylinder(
            cfg.branch_width * 0.65,
            cfg.branch_width,
            cfg.branch_height,
            cfg.radial_segments,
        );

        let trunk_transform =
            Mat4::from_translation(Vec3::new(0.0, -cfg.branch_height / 2.0, 0.0));

        let mut branches = Vec::with_capacity(generate::branch_count(cfg.levels) + 1);
        branches.push(Branch::new(trunk_transform, cfg.trunk_color));
        generate::grow(
            &mut branches,
            cfg.levels,
            &trunk_transform,
            cfg.trunk_color,
            cfg,
        );

        Self {
            mesh,
            branches,
            lights: Lighting::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_emits_trunk_plus_generated_branches() {
        let cfg = TreeConfig {
            levels: 3,
            ..TreeConfig::default()
        };
        let scene = Scene::build(&cfg);
        assert_eq!(scene.branches.len(), 1 + generate::branch_count(3));
    }

    #[test]
    fn trunk_is_shifted_down_by_half_its_height() {
        let scene = Scene::build(&TreeConfig::default());
        let base = scene.branches[0]
            .transform
            .transform_point3(Vec3::new(0.0, 100.0, 0.0));
        // The cylinder's top ring lands at the origin.
        assert!(base.length() < 1e-4);
    }

    #[test]
    fn mesh_size_is_independent_of_instance_count() {
        let small = Scene::build(&TreeConfig {
            levels: 1,
            ..TreeConfig::default()
        });
        let large = Scene::build(&TreeConfig {
            levels: 6,
            ..TreeConfig::default()
        });

        assert_eq!(small.mesh.positions.len(), large.mesh.positions.len());
        assert_eq!(small.mesh.triangle_count(), large.mesh.triangle_count());
        assert!(large.branches.len() > small.branches.len());
    }

    #[test]
    fn shade_lights_surfaces_facing_the_light_more() {
        let lights = Lighting::default();
        let base = Rgb::new(0.4, 0.2, 0.1);

        let toward = lights.shade(base, lights.directional.direction);
        let away = lights.shade(base, -lights.directional.direction);

        // Facing away leaves only the ambient term.
        assert_eq!(away, Rgb::new(0.4, 0.2, 0.1));
        // Facing the light head-on doubles every channel.
        assert!((toward.r - 0.8).abs() < 1e-5);
        assert!((toward.g - 0.4).abs() < 1e-5);
        assert!((toward.b - 0.2).abs() < 1e-5);
    }

    #[test]
    fn shade_clamps_overdriven_channels() {
        let lights = Lighting::default();
        // Greens past 1.0 are expected late in the recursion.
        let base = Rgb::new(0.6275, 1.3, 0.0);
        let lit = lights.shade(base, lights.directional.direction);
        assert_eq!(lit.g, 1.0);
        assert!(lit.r <= 1.0 && lit.b == 0.0);
    }
}
