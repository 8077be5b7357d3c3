//! The tapered-cylinder mesh shared by every branch instance.

use glam::Vec3;

/// An indexed triangle mesh in local (model) space.
///
/// The mesh is built exactly once per scene and shared by reference across
/// all branch instances; only the per-instance transform and color differ.
#[derive(Debug)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Builds a capped cylinder with different top and bottom radii.
    ///
    /// The cylinder is aligned with the Y axis and centered at the origin,
    /// spanning `-height / 2 ..= height / 2`. Triangles wind
    /// counter-clockwise when viewed from outside, so the geometric normal
    /// `(b - a) × (c - a)` points outward.
    ///
    /// ### Parameters
    /// - `top_radius` - Ring radius at `y = +height / 2`.
    /// - `bottom_radius` - Ring radius at `y = -height / 2`.
    /// - `height` - Extent along the Y axis.
    /// - `segments` - Radial subdivision count (minimum 3).
    ///
    /// ### Returns
    /// A mesh with `2 * segments + 2` vertices and `4 * segments` triangles.
    pub fn tapered_cylinder(
        top_radius: f32,
        bottom_radius: f32,
        height: f32,
        segments: u32,
    ) -> Self {
        let segments = segments.max(3);
        let half = height / 2.0;

        let mut positions = Vec::with_capacity(2 * segments as usize + 2);

        // Top ring [0, segments), bottom ring [segments, 2 * segments).
        for ring in [(top_radius, half), (bottom_radius, -half)] {
            let (radius, y) = ring;
            for i in 0..segments {
                let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
                positions.push(Vec3::new(radius * theta.cos(), y, radius * theta.sin()));
            }
        }

        let top_center = positions.len() as u32;
        positions.push(Vec3::new(0.0, half, 0.0));
        let bottom_center = positions.len() as u32;
        positions.push(Vec3::new(0.0, -half, 0.0));

        let mut triangles = Vec::with_capacity(4 * segments as usize);
        for i in 0..segments {
            let next = (i + 1) % segments;
            let (t0, t1) = (i, next);
            let (b0, b1) = (segments + i, segments + next);

            // Side quad, split so both halves keep outward winding.
            triangles.push([t0, b1, b0]);
            triangles.push([t0, t1, b1]);

            // Caps: top fan faces +Y, bottom fan faces -Y.
            triangles.push([top_center, t1, t0]);
            triangles.push([bottom_center, b0, b1]);
        }

        Self {
            positions,
            triangles,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_triangle_counts_follow_segments() {
        let mesh = Mesh::tapered_cylinder(32.5, 50.0, 200.0, 10);
        assert_eq!(mesh.positions.len(), 22);
        assert_eq!(mesh.triangle_count(), 40);
    }

    #[test]
    fn segments_are_clamped_to_a_valid_minimum() {
        let mesh = Mesh::tapered_cylinder(1.0, 1.0, 1.0, 0);
        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn side_triangles_wind_outward() {
        let mesh = Mesh::tapered_cylinder(32.5, 50.0, 200.0, 16);

        // First side triangle sits near theta = 0, so its outward normal
        // must have a positive X component.
        let [a, b, c] = mesh.triangles[0];
        let (a, b, c) = (
            mesh.positions[a as usize],
            mesh.positions[b as usize],
            mesh.positions[c as usize],
        );
        let normal = (b - a).cross(c - a);
        assert!(normal.x > 0.0, "side normal should point outward: {normal}");
    }

    #[test]
    fn cap_triangles_face_along_y() {
        let mesh = Mesh::tapered_cylinder(32.5, 50.0, 200.0, 16);

        let [a, b, c] = mesh.triangles[2];
        let top_normal = (mesh.positions[b as usize] - mesh.positions[a as usize])
            .cross(mesh.positions[c as usize] - mesh.positions[a as usize]);
        assert!(top_normal.y > 0.0, "top cap should face +Y");

        let [a, b, c] = mesh.triangles[3];
        let bottom_normal = (mesh.positions[b as usize] - mesh.positions[a as usize])
            .cross(mesh.positions[c as usize] - mesh.positions[a as usize]);
        assert!(bottom_normal.y < 0.0, "bottom cap should face -Y");
    }

    #[test]
    fn rings_sit_at_half_height() {
        let mesh = Mesh::tapered_cylinder(10.0, 20.0, 100.0, 8);
        assert!(mesh.positions[0].y == 50.0);
        assert!(mesh.positions[8].y == -50.0);

        // Radii match the requested taper.
        assert!((mesh.positions[0].length() - f32::hypot(10.0, 50.0)).abs() < 1e-4);
        assert!((mesh.positions[8].length() - f32::hypot(20.0, 50.0)).abs() < 1e-4);
    }
}
