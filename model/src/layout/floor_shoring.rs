use glam::{dvec3, DVec3};

use crate::{
    derived::FloorQuantities,
    layout::{BOARD, MARGIN, SECTION},
    primitive::{Member, Primitive},
    util::{mirrored_pair, Mirror},
};

/// Places the members of a sloped floor shoring.
///
/// The ground rises towards +X by the slope angle and passes through the origin. Each of
/// the two frames, in front of and behind the centerline, consists of a tall shore at X = 0
/// and a short shore further up the slope, standing on a sloped bottom plate and carrying
/// a horizontal top plate.
pub fn primitives(quantities: &FloorQuantities) -> Vec<Primitive> {
    let &FloorQuantities {
        measured_length,
        top_thickness,
        bottom_thickness,
        strut_spacing,
        connector_width,
        stopper_width,
        angle,
        bottom_rise,
        shore_length,
        short_shore_length,
        frame_run,
        top_plate_length,
        bottom_plate_length,
    } = quantities;

    let half_spacing = strut_spacing / 2.0;
    let (sin, cos) = angle.sin_cos();
    let slope = dvec3(cos, 0.0, sin);
    let slope_normal = dvec3(-sin, 0.0, cos);
    let ceiling = measured_length - top_thickness;
    let short_foot = frame_run * angle.tan() + bottom_rise;
    let connector_face = half_spacing + SECTION / 2.0 + BOARD / 2.0;

    let mut primitives = Vec::new();

    let top_plate = Primitive::along(
        Member::TopPlate,
        DVec3::X,
        dvec3(frame_run / 2.0, half_spacing, ceiling + top_thickness / 2.0),
        top_thickness,
        SECTION,
        top_plate_length,
    );
    let ground_center = dvec3(frame_run / 2.0, half_spacing, frame_run / 2.0 * angle.tan());
    let bottom_plate = Primitive::along(
        Member::BottomPlate,
        slope,
        ground_center + slope_normal * bottom_thickness / 2.0,
        bottom_thickness,
        SECTION,
        bottom_plate_length,
    );
    let tall_shore = Primitive::along(
        Member::TallShore,
        DVec3::Z,
        dvec3(0.0, half_spacing, bottom_rise + shore_length / 2.0),
        SECTION,
        SECTION,
        shore_length,
    );
    let short_shore = Primitive::along(
        Member::ShortShore,
        DVec3::Z,
        dvec3(frame_run, half_spacing, short_foot + short_shore_length / 2.0),
        SECTION,
        SECTION,
        short_shore_length,
    );
    // Downhill of the tall shore foot, lying on the sloped bottom plate
    let stopper = Primitive::along(
        Member::Stopper,
        slope,
        dvec3(0.0, half_spacing, bottom_rise)
            - slope * (SECTION + stopper_width) / 2.0
            + slope_normal * SECTION / 2.0,
        SECTION,
        SECTION,
        stopper_width,
    );
    let frame_connector = Primitive::along(
        Member::Connector,
        DVec3::X,
        dvec3(
            frame_run / 2.0,
            connector_face,
            ceiling - MARGIN - connector_width / 2.0,
        ),
        connector_width,
        BOARD,
        frame_run + 2.0 * SECTION,
    );
    let brace = Primitive::between(
        Member::Brace,
        dvec3(0.0, connector_face + BOARD, bottom_rise + MARGIN),
        dvec3(
            frame_run,
            connector_face + BOARD,
            ceiling - MARGIN - connector_width,
        ),
        connector_width,
        BOARD,
    );

    for primitive in [
        top_plate,
        bottom_plate,
        tall_shore,
        short_shore,
        stopper,
        frame_connector,
        brace,
    ] {
        primitives.extend(mirrored_pair(primitive, Mirror::Y));
    }

    // Cross connectors tie the two frames together at mid height of each shore
    let cross_length = strut_spacing + 2.0 * SECTION;
    let shore_face = (SECTION + BOARD) / 2.0;
    primitives.push(Primitive::along(
        Member::Connector,
        DVec3::Y,
        dvec3(-shore_face, 0.0, bottom_rise + shore_length / 2.0),
        BOARD,
        connector_width,
        cross_length,
    ));
    primitives.push(Primitive::along(
        Member::Connector,
        DVec3::Y,
        dvec3(
            frame_run + shore_face,
            0.0,
            short_foot + short_shore_length / 2.0,
        ),
        BOARD,
        connector_width,
        cross_length,
    ));

    primitives
}
