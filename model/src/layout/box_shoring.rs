use glam::{dvec3, DVec3};

use crate::{
    derived::BoxQuantities,
    layout::{BOARD, MARGIN, SECTION},
    primitive::{Member, Primitive},
    util::{mirrored_pair, mirrored_quad, Mirror},
};

/// Places the members of a box shoring centered on the Z-axis.
///
/// The pillars stand on wedge pairs on the bottom plates, which run along X in front of
/// and behind the centerline. Connectors tie the pillars together at the bottom, middle and
/// top on all four faces, diagonals brace the front, back and side faces.
pub fn primitives(quantities: &BoxQuantities) -> Vec<Primitive> {
    let &BoxQuantities {
        measured_length,
        top_thickness,
        bottom_thickness,
        wedge_height,
        strut_spacing,
        connector_width,
        strut_length,
        front_rise,
        front_run,
        side_rise,
        plate_length,
        ..
    } = quantities;

    let half_spacing = strut_spacing / 2.0;
    let foot = bottom_thickness + wedge_height;
    let middle = foot + strut_length / 2.0;
    let connector_face = half_spacing + SECTION / 2.0 + BOARD / 2.0;
    let diagonal_face = connector_face + BOARD;

    let mut primitives = Vec::new();

    let bottom_plate = Primitive::along(
        Member::BottomPlate,
        DVec3::X,
        dvec3(0.0, half_spacing, bottom_thickness / 2.0),
        bottom_thickness,
        SECTION,
        plate_length,
    );
    let top_plate = Primitive::along(
        Member::TopPlate,
        DVec3::X,
        dvec3(0.0, half_spacing, measured_length - top_thickness / 2.0),
        top_thickness,
        SECTION,
        plate_length,
    );
    primitives.extend(mirrored_pair(bottom_plate, Mirror::Y));
    primitives.extend(mirrored_pair(top_plate, Mirror::Y));

    let wedge = Primitive::along(
        Member::Wedge,
        DVec3::Z,
        dvec3(half_spacing, half_spacing, bottom_thickness + wedge_height / 2.0),
        SECTION,
        SECTION,
        wedge_height,
    );
    let pillar = Primitive::along(
        Member::Pillar,
        DVec3::Z,
        dvec3(half_spacing, half_spacing, middle),
        SECTION,
        SECTION,
        strut_length,
    );
    primitives.extend(mirrored_quad(wedge));
    primitives.extend(mirrored_quad(pillar));

    let connector_heights = [
        foot + MARGIN + connector_width / 2.0,
        middle,
        foot + strut_length - MARGIN - connector_width / 2.0,
    ];
    for height in connector_heights {
        let front_connector = Primitive::along(
            Member::Connector,
            DVec3::X,
            dvec3(0.0, connector_face, height),
            connector_width,
            BOARD,
            front_run,
        );
        let side_connector = Primitive::along(
            Member::Connector,
            DVec3::Y,
            dvec3(connector_face, 0.0, height),
            BOARD,
            connector_width,
            front_run,
        );
        primitives.extend(mirrored_pair(front_connector, Mirror::Y));
        primitives.extend(mirrored_pair(side_connector, Mirror::X));
    }

    let front_diagonal = Primitive::between(
        Member::FrontDiagonal,
        dvec3(-front_run / 2.0, diagonal_face, middle - front_rise / 2.0),
        dvec3(front_run / 2.0, diagonal_face, middle + front_rise / 2.0),
        connector_width,
        BOARD,
    );
    primitives.extend(mirrored_pair(front_diagonal, Mirror::Y));

    // Lower and upper diagonals cross each other to form an X on each side
    let lower_start = foot + MARGIN + connector_width;
    let upper_start = middle + connector_width;
    let lower_side_diagonal = Primitive::between(
        Member::SideDiagonal,
        dvec3(diagonal_face, -half_spacing, lower_start),
        dvec3(diagonal_face, half_spacing, lower_start + side_rise),
        BOARD,
        connector_width,
    );
    let upper_side_diagonal = Primitive::between(
        Member::SideDiagonal,
        dvec3(diagonal_face, half_spacing, upper_start),
        dvec3(diagonal_face, -half_spacing, upper_start + side_rise),
        BOARD,
        connector_width,
    );
    primitives.extend(mirrored_pair(lower_side_diagonal, Mirror::X));
    primitives.extend(mirrored_pair(upper_side_diagonal, Mirror::X));

    primitives
}
