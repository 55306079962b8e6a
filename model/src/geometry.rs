use glam::{DQuat, DVec3};

/// Returns the shortest arc rotation turning the direction `from` onto the direction `to`.
///
/// Both directions are normalized first. If either is zero, the identity is returned.
/// Anti-parallel directions result in a half turn around an axis orthogonal to `from`.
pub fn align(from: DVec3, to: DVec3) -> DQuat {
    let from = from.normalize_or_zero();
    let to = to.normalize_or_zero();

    if from == DVec3::ZERO || to == DVec3::ZERO {
        DQuat::IDENTITY
    } else {
        DQuat::from_rotation_arc(from, to)
    }
}

/// A line segment in 3D space.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    /// The start point.
    pub start: DVec3,
    /// The end point.
    pub end: DVec3,
}

impl Segment {
    /// Creates a new segment from a start and an end point.
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// Returns the length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Returns the midpoint of the segment.
    pub fn center(&self) -> DVec3 {
        self.start.midpoint(self.end)
    }

    /// Returns the normalized direction from start to end, zero for a degenerate segment.
    pub fn direction(&self) -> DVec3 {
        (self.end - self.start).normalize_or_zero()
    }

    /// Returns the point at the given fraction of the segment.
    pub fn point_at(&self, fraction: f64) -> DVec3 {
        self.start.lerp(self.end, fraction)
    }
}
