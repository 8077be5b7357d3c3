use crate::color::Rgb;
use glam::Mat4;

/// One rendered copy of the shared cylinder mesh.
///
/// Branches carry no geometry of their own; the mesh lives once on the
/// scene and every instance differs only by transform and color.
#[derive(Clone, Copy, Debug)]
pub struct Branch {
    pub transform: Mat4,
    pub color: Rgb,
}

impl Branch {
    pub fn new(transform: Mat4, color: Rgb) -> Self {
        Self { transform, color }
    }
}
