use glam::{dvec3, DVec3};

use crate::primitive::Primitive;

/// A mirroring across one or both of the horizontal axes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mirror {
    /// Negates the X coordinate, mirroring left and right.
    X,
    /// Negates the Y coordinate, mirroring front and back.
    Y,
    /// Negates both the X and the Y coordinate.
    XY,
}

impl Mirror {
    /// Mirrors a point or direction.
    pub fn apply(self, vector: DVec3) -> DVec3 {
        match self {
            Mirror::X => dvec3(-vector.x, vector.y, vector.z),
            Mirror::Y => dvec3(vector.x, -vector.y, vector.z),
            Mirror::XY => dvec3(-vector.x, -vector.y, vector.z),
        }
    }
}

/// Returns the primitive together with its mirror image.
pub fn mirrored_pair(primitive: Primitive, mirror: Mirror) -> [Primitive; 2] {
    [primitive, primitive.mirrored(mirror)]
}

/// Returns the primitive together with its mirror images in all four quadrants.
pub fn mirrored_quad(primitive: Primitive) -> [Primitive; 4] {
    [
        primitive,
        primitive.mirrored(Mirror::X),
        primitive.mirrored(Mirror::Y),
        primitive.mirrored(Mirror::XY),
    ]
}
