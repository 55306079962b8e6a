use glam::{dvec3, DAffine3, DQuat, DVec3};

use crate::{
    geometry::{align, Segment},
    util::Mirror,
};

/// A structural member of a shoring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Member {
    /// A horizontal plate below the pillars or shores.
    BottomPlate,
    /// A horizontal plate above the pillars or shores.
    TopPlate,
    /// A plate on the ground carrying the foot of a wall strut.
    SolePlate,
    /// A vertical plate against the wall carrying the head of a wall strut.
    Header,
    /// A vertical pillar of a box shoring.
    Pillar,
    /// An inclined strut of a wall shoring.
    Strut,
    /// The tall shore of a sloped floor frame.
    TallShore,
    /// The short shore of a sloped floor frame.
    ShortShore,
    /// A driven wedge pair.
    Wedge,
    /// A horizontal connector board.
    Connector,
    /// A diagonal board in the front or back face of a box shoring.
    FrontDiagonal,
    /// A diagonal board in the left or right face of a box shoring.
    SideDiagonal,
    /// A diagonal brace board.
    Brace,
    /// A block preventing a strut from sliding.
    Stopper,
    /// A plywood panel.
    Plywood,
}

impl Member {
    /// Returns the name of the member as shown in the cut list.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Member::BottomPlate => "Bottom plate",
            Member::TopPlate => "Top plate",
            Member::SolePlate => "Sole plate",
            Member::Header => "Header",
            Member::Pillar => "Pillar",
            Member::Strut => "Strut",
            Member::TallShore => "Tall shore",
            Member::ShortShore => "Short shore",
            Member::Wedge => "Wedge pair",
            Member::Connector => "Connector",
            Member::FrontDiagonal => "Front diagonal",
            Member::SideDiagonal => "Side diagonal",
            Member::Brace => "Brace",
            Member::Stopper => "Stopper",
            Member::Plywood => "Plywood",
        }
    }

    /// Returns the material tag used for displaying the member.
    #[must_use]
    pub fn material(self) -> MaterialTag {
        match self {
            Member::BottomPlate
            | Member::TopPlate
            | Member::SolePlate
            | Member::Header => MaterialTag::Plate,
            Member::Pillar | Member::Strut | Member::TallShore | Member::ShortShore => {
                MaterialTag::Pillar
            }
            Member::Wedge => MaterialTag::Wedge,
            Member::Connector => MaterialTag::Connector,
            Member::FrontDiagonal | Member::SideDiagonal | Member::Brace => MaterialTag::Brace,
            Member::Stopper => MaterialTag::Stopper,
            Member::Plywood => MaterialTag::Plywood,
        }
    }
}

/// A tag selecting the color and opacity a member is displayed with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum MaterialTag {
    /// Pillars, struts and shores.
    Pillar,
    /// Plates and headers.
    Plate,
    /// Wedges.
    Wedge,
    /// Horizontal connectors.
    Connector,
    /// Diagonal braces.
    Brace,
    /// Stoppers.
    Stopper,
    /// Plywood panels.
    Plywood,
}

impl MaterialTag {
    /// All material tags.
    pub const ALL: [MaterialTag; 7] = [
        MaterialTag::Pillar,
        MaterialTag::Plate,
        MaterialTag::Wedge,
        MaterialTag::Connector,
        MaterialTag::Brace,
        MaterialTag::Stopper,
        MaterialTag::Plywood,
    ];
}

/// A rectangular prism placed in the scene.
///
/// The prism is centered at its position, its length runs along the local Z-axis
/// which the orientation turns onto the direction of the member.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Primitive {
    /// The member the prism represents.
    pub member: Member,
    /// The width (local X), depth (local Y) and length (local Z) in meters.
    pub size: DVec3,
    /// The center of the prism in meters.
    pub position: DVec3,
    /// The rotation turning the local Z-axis onto the member direction.
    pub orientation: DQuat,
}

impl Primitive {
    /// Creates a prism centered at `center` with its length running along `axis`.
    #[must_use]
    pub fn along(
        member: Member,
        axis: DVec3,
        center: DVec3,
        width: f64,
        depth: f64,
        length: f64,
    ) -> Self {
        Self {
            member,
            size: dvec3(width, depth, length),
            position: center,
            orientation: align(DVec3::Z, axis),
        }
    }

    /// Creates a prism spanning from `start` to `end`.
    #[must_use]
    pub fn between(member: Member, start: DVec3, end: DVec3, width: f64, depth: f64) -> Self {
        let segment = Segment::new(start, end);

        Self::along(
            member,
            segment.direction(),
            segment.center(),
            width,
            depth,
            segment.length(),
        )
    }

    /// Returns the length of the prism along its direction.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.size.z
    }

    /// Returns the direction the length of the prism runs along.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Returns the mirror image of the prism.
    #[must_use]
    pub fn mirrored(&self, mirror: Mirror) -> Self {
        Self {
            position: mirror.apply(self.position),
            orientation: align(DVec3::Z, mirror.apply(self.direction())),
            ..*self
        }
    }

    /// Returns the transform mapping the unit cube centered at the origin onto the prism.
    #[must_use]
    pub fn transform(&self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(self.size, self.orientation, self.position)
    }

    /// Returns the eight corner points of the prism.
    #[must_use]
    pub fn corners(&self) -> [DVec3; 8] {
        let transform = self.transform();

        [
            dvec3(-0.5, -0.5, -0.5),
            dvec3(0.5, -0.5, -0.5),
            dvec3(-0.5, 0.5, -0.5),
            dvec3(0.5, 0.5, -0.5),
            dvec3(-0.5, -0.5, 0.5),
            dvec3(0.5, -0.5, 0.5),
            dvec3(-0.5, 0.5, 0.5),
            dvec3(0.5, 0.5, 0.5),
        ]
        .map(|corner| transform.transform_point3(corner))
    }
}

/// Bounded region containing a set of primitives given by two points.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds {
    /// Corner point with minimal coordinates.
    pub min: DVec3,
    /// Corner point with maximal coordinates.
    pub max: DVec3,
}

impl Bounds {
    /// Creates the bounds containing all given points, [`None`] if there are none.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                Some(Bounds { min, max }) => Bounds {
                    min: min.min(point),
                    max: max.max(point),
                },
                None => Bounds {
                    min: point,
                    max: point,
                },
            })
        })
    }

    /// Returns the size of the bounds.
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Returns the center of the bounds.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.min.midpoint(self.max)
    }

    /// Returns the diameter of the bounds.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.size().length()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn horizontal_plate_lies_flat() {
        let plate = Primitive::along(
            Member::BottomPlate,
            DVec3::X,
            dvec3(0.0, 0.6, 0.05),
            0.1,
            0.2,
            2.0,
        );
        let bounds = Bounds::from_points(plate.corners()).unwrap();

        assert!(bounds.size().abs_diff_eq(dvec3(2.0, 0.2, 0.1), 1e-12));
        assert!(bounds.center().abs_diff_eq(plate.position, 1e-12));
    }

    #[test]
    fn diagonal_spans_its_end_points() {
        let start = dvec3(-0.7, 0.6, 0.5);
        let end = dvec3(0.7, 0.6, 1.4);
        let brace = Primitive::between(Member::FrontDiagonal, start, end, 0.1, 0.025);

        assert_relative_eq!(brace.length(), start.distance(end));
        assert!(brace.position.abs_diff_eq(dvec3(0.0, 0.6, 0.95), 1e-12));
        assert!(brace
            .direction()
            .abs_diff_eq((end - start).normalize(), 1e-12));
        // The board stays in its face, the depth axis keeps pointing along Y
        assert!((brace.orientation * DVec3::Y).abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn mirrored_diagonal_points_the_other_way() {
        let brace = Primitive::between(
            Member::SideDiagonal,
            dvec3(0.7, -0.6, 0.3),
            dvec3(0.7, 0.6, 0.9),
            0.025,
            0.1,
        );
        let mirrored = brace.mirrored(Mirror::Y);

        assert_eq!(mirrored.position.y, -brace.position.y);
        assert_eq!(mirrored.position.x, brace.position.x);
        assert_eq!(mirrored.position.z, brace.position.z);
        assert!(mirrored
            .direction()
            .abs_diff_eq(Mirror::Y.apply(brace.direction()), 1e-12));
        assert_eq!(mirrored.size, brace.size);
    }

    #[test]
    fn every_member_has_a_material() {
        let members = [
            Member::BottomPlate,
            Member::Pillar,
            Member::Wedge,
            Member::Connector,
            Member::Brace,
            Member::Stopper,
            Member::Plywood,
        ];
        let mut materials: Vec<_> = members.iter().map(|member| member.material()).collect();
        materials.sort();

        assert_eq!(materials, MaterialTag::ALL);
    }

    #[test]
    fn empty_bounds() {
        assert_eq!(Bounds::from_points([]), None);
    }
}
