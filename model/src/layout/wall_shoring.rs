use glam::{dvec3, DVec3};

use crate::{
    derived::WallQuantities,
    geometry::Segment,
    layout::{BOARD, PLYWOOD, SECTION},
    primitive::{Member, Primitive},
    util::{mirrored_pair, Mirror},
};

/// Places the members of a wall shoring.
///
/// The wall face lies in the YZ-plane at X = 0 with the ground at Z = 0. A plywood panel
/// against the wall carries one header per strut, the struts lean from their sole plates
/// against the headers and are held by wedges and stoppers at both ends.
pub fn primitives(quantities: &WallQuantities) -> Vec<Primitive> {
    let &WallQuantities {
        top_thickness,
        bottom_thickness,
        wedge_length,
        strut_spacing,
        connector_width,
        stopper_width,
        rise,
        run,
        strut_length,
        header_length,
        sole_plate_length,
        plywood_width,
        ..
    } = quantities;

    let half_spacing = strut_spacing / 2.0;
    let header_face = PLYWOOD + top_thickness;
    let strut = Segment::new(
        dvec3(header_face + run, half_spacing, bottom_thickness),
        dvec3(header_face, half_spacing, bottom_thickness + rise),
    );
    let block_height = bottom_thickness + SECTION / 2.0;

    let mut primitives = Vec::new();

    primitives.push(Primitive::along(
        Member::Plywood,
        DVec3::Z,
        dvec3(PLYWOOD / 2.0, 0.0, header_length / 2.0),
        PLYWOOD,
        plywood_width,
        header_length,
    ));

    let header = Primitive::along(
        Member::Header,
        DVec3::Z,
        dvec3(PLYWOOD + top_thickness / 2.0, half_spacing, header_length / 2.0),
        top_thickness,
        SECTION,
        header_length,
    );
    let sole_plate = Primitive::along(
        Member::SolePlate,
        DVec3::X,
        dvec3(
            header_face + sole_plate_length / 2.0,
            half_spacing,
            bottom_thickness / 2.0,
        ),
        bottom_thickness,
        SECTION,
        sole_plate_length,
    );
    let strut_primitive = Primitive::between(
        Member::Strut,
        strut.start,
        strut.end,
        SECTION,
        SECTION,
    );
    let wedge = Primitive::along(
        Member::Wedge,
        DVec3::X,
        dvec3(strut.start.x + wedge_length / 2.0, half_spacing, block_height),
        SECTION,
        SECTION,
        wedge_length,
    );
    let foot_stopper = Primitive::along(
        Member::Stopper,
        DVec3::X,
        dvec3(
            strut.start.x + wedge_length + stopper_width / 2.0,
            half_spacing,
            block_height,
        ),
        SECTION,
        SECTION,
        stopper_width,
    );
    let head_stopper = Primitive::along(
        Member::Stopper,
        DVec3::Z,
        dvec3(
            header_face + SECTION / 2.0,
            half_spacing,
            strut.end.z + stopper_width / 2.0,
        ),
        SECTION,
        SECTION,
        stopper_width,
    );

    for primitive in [
        header,
        sole_plate,
        strut_primitive,
        wedge,
        foot_stopper,
        head_stopper,
    ] {
        primitives.extend(mirrored_pair(primitive, Mirror::Y));
    }

    // Connector and brace lie on the upper face of the struts
    let normal = dvec3(rise, 0.0, run) / strut_length;
    let center = strut.center();
    let connector = Primitive::along(
        Member::Connector,
        DVec3::Y,
        dvec3(center.x, 0.0, center.z) + normal * (SECTION + BOARD) / 2.0,
        connector_width,
        BOARD,
        strut_spacing + 2.0 * SECTION,
    );
    primitives.push(connector);

    let mirrored_strut = Segment::new(
        Mirror::Y.apply(strut.start),
        Mirror::Y.apply(strut.end),
    );
    let brace_offset = normal * (SECTION / 2.0 + 1.5 * BOARD);
    primitives.push(Primitive::between(
        Member::Brace,
        mirrored_strut.point_at(0.2) + brace_offset,
        strut.point_at(0.8) + brace_offset,
        connector_width,
        BOARD,
    ));

    primitives
}
