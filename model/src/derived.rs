use config::{
    Archetype, BoxMeasurements, FloorMeasurements, MeasurementRecord, WallMeasurements,
};

use crate::{Error, Warning};

/// Centimeters per meter, measurements are given in centimeters.
const CENTIMETERS: f64 = 100.0;
/// The cross section of pillars, struts and shores in centimeters.
const SECTION: f64 = 10.0;
/// The overhang of a plate beyond the outermost strut face in centimeters.
const CANTILEVER: f64 = 30.0;
/// Struts are cut shorter by this multiple of the wedge thickness to leave room for driving the wedges.
const WEDGE_ALLOWANCE: f64 = 1.1;
/// The length the wall header extends above the ideal strut height in centimeters.
const HEADER_ALLOWANCE: f64 = 75.0;

/// The derived quantities of a box shoring in meters.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoxQuantities {
    /// The measured clearance between floor and ceiling.
    pub measured_length: f64,
    /// The thickness of a top plate.
    pub top_thickness: f64,
    /// The thickness of a bottom plate.
    pub bottom_thickness: f64,
    /// The height of a driven wedge pair below a pillar.
    pub wedge_height: f64,
    /// The spacing between two pillars.
    pub strut_spacing: f64,
    /// The width of the connector boards.
    pub connector_width: f64,
    /// The cut length of a pillar.
    pub strut_length: f64,
    /// The pillar length if the wedges were not driven.
    pub ideal_strut_length: f64,
    /// The length of a front diagonal.
    pub front_diagonal: f64,
    /// The vertical extent of a front diagonal.
    pub front_rise: f64,
    /// The horizontal extent of a front diagonal.
    pub front_run: f64,
    /// The length of a side diagonal.
    pub side_diagonal: f64,
    /// The vertical extent of a side diagonal.
    pub side_rise: f64,
    /// The length of a top or bottom plate.
    pub plate_length: f64,
}

impl BoxQuantities {
    /// Derives the quantities from the given measurements.
    #[must_use]
    pub fn new(measurements: &BoxMeasurements) -> Self {
        let &BoxMeasurements {
            length,
            top_thickness,
            bottom_thickness,
            wedge_thickness,
            strut_spacing,
            connector_width,
        } = measurements;

        let strut_length =
            length - top_thickness - bottom_thickness - wedge_thickness * WEDGE_ALLOWANCE;
        let ideal_strut_length = length - top_thickness - bottom_thickness - wedge_thickness;

        let front_rise = length * 0.5 - connector_width;
        let front_run = strut_spacing + 2.0 * SECTION;
        let front_diagonal = front_rise.hypot(front_run);

        let side_rise = (strut_length - SECTION) * 0.5 - connector_width * 2.0;
        let side_diagonal = side_rise.hypot(strut_spacing);

        let plate_length = strut_spacing + SECTION + 2.0 * CANTILEVER;

        Self {
            measured_length: length / CENTIMETERS,
            top_thickness: top_thickness / CENTIMETERS,
            bottom_thickness: bottom_thickness / CENTIMETERS,
            wedge_height: (length - top_thickness - bottom_thickness - strut_length) / CENTIMETERS,
            strut_spacing: strut_spacing / CENTIMETERS,
            connector_width: connector_width / CENTIMETERS,
            strut_length: strut_length / CENTIMETERS,
            ideal_strut_length: ideal_strut_length / CENTIMETERS,
            front_diagonal: front_diagonal / CENTIMETERS,
            front_rise: front_rise / CENTIMETERS,
            front_run: front_run / CENTIMETERS,
            side_diagonal: side_diagonal / CENTIMETERS,
            side_rise: side_rise / CENTIMETERS,
            plate_length: plate_length / CENTIMETERS,
        }
    }
}

/// The derived quantities of a wall shoring in meters and radians.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WallQuantities {
    /// The measured wall height.
    pub measured_length: f64,
    /// The thickness of the header plate.
    pub top_thickness: f64,
    /// The thickness of the sole plate.
    pub bottom_thickness: f64,
    /// The length of a driven wedge pair at a strut foot.
    pub wedge_length: f64,
    /// The spacing between the two struts.
    pub strut_spacing: f64,
    /// The width of the connector boards.
    pub connector_width: f64,
    /// The width of a stopper.
    pub stopper_width: f64,
    /// The design angle.
    pub angle: f64,
    /// The ideal strut height at two thirds of the wall height.
    pub ideal_length: f64,
    /// The vertical extent of a strut, from the sole plate to the strut head.
    pub rise: f64,
    /// The horizontal extent of a strut, from the header face to the strut foot.
    pub run: f64,
    /// The cut length of a strut.
    pub strut_length: f64,
    /// The length of the header plate.
    pub header_length: f64,
    /// The length of the sole plate.
    pub sole_plate_length: f64,
    /// The width of the plywood panel behind the headers.
    pub plywood_width: f64,
}

impl WallQuantities {
    /// Derives the quantities from the given measurements.
    #[must_use]
    pub fn new(measurements: &WallMeasurements) -> Self {
        let &WallMeasurements {
            length,
            top_thickness,
            bottom_thickness,
            wedge_thickness,
            strut_spacing,
            connector_width,
            stopper_width,
            angle,
        } = measurements;

        let angle = angle.to_radians();
        let tan = angle.tan();

        let ideal_length = length * 2.0 / 3.0;
        let rise = ideal_length - bottom_thickness + stopper_width * tan;
        let run = ideal_length - top_thickness + stopper_width / tan;
        let strut_length = rise.hypot(run);
        let header_length = length * 2.0 / 3.0 + HEADER_ALLOWANCE;

        let wedge_length = wedge_thickness * WEDGE_ALLOWANCE;
        let sole_plate_length = run + wedge_length + stopper_width;
        let plywood_width = strut_spacing + SECTION + 2.0 * CANTILEVER;

        Self {
            measured_length: length / CENTIMETERS,
            top_thickness: top_thickness / CENTIMETERS,
            bottom_thickness: bottom_thickness / CENTIMETERS,
            wedge_length: wedge_length / CENTIMETERS,
            strut_spacing: strut_spacing / CENTIMETERS,
            connector_width: connector_width / CENTIMETERS,
            stopper_width: stopper_width / CENTIMETERS,
            angle,
            ideal_length: ideal_length / CENTIMETERS,
            rise: rise / CENTIMETERS,
            run: run / CENTIMETERS,
            strut_length: strut_length / CENTIMETERS,
            header_length: header_length / CENTIMETERS,
            sole_plate_length: sole_plate_length / CENTIMETERS,
            plywood_width: plywood_width / CENTIMETERS,
        }
    }

    /// Returns true if the header is longer than the measured wall height.
    #[must_use]
    pub fn header_exceeds_clearance(&self) -> bool {
        self.measured_length < self.header_length
    }
}

/// The derived quantities of a sloped floor shoring in meters and radians.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FloorQuantities {
    /// The measured clearance at the tall shore.
    pub measured_length: f64,
    /// The thickness of a top plate.
    pub top_thickness: f64,
    /// The thickness of a sloped bottom plate, perpendicular to the slope.
    pub bottom_thickness: f64,
    /// The spacing between the two frames.
    pub strut_spacing: f64,
    /// The width of the connector boards.
    pub connector_width: f64,
    /// The width of a stopper.
    pub stopper_width: f64,
    /// The slope angle.
    pub angle: f64,
    /// The vertical extent of a bottom plate.
    pub bottom_rise: f64,
    /// The cut length of a tall shore.
    pub shore_length: f64,
    /// The cut length of a short shore.
    pub short_shore_length: f64,
    /// The horizontal distance between the tall and the short shore of a frame.
    pub frame_run: f64,
    /// The length of a top plate.
    pub top_plate_length: f64,
    /// The length of a sloped bottom plate.
    pub bottom_plate_length: f64,
}

impl FloorQuantities {
    /// Derives the quantities from the given measurements.
    #[must_use]
    pub fn new(measurements: &FloorMeasurements) -> Self {
        let &FloorMeasurements {
            length,
            top_thickness,
            bottom_thickness,
            strut_spacing,
            connector_width,
            stopper_width,
            angle,
        } = measurements;

        let angle = angle.to_radians();
        let (tan, cos) = (angle.tan(), angle.cos());

        let bottom_rise = bottom_thickness / cos;
        let shore_length = length - top_thickness - bottom_rise;
        let frame_run = strut_spacing - SECTION;
        let short_shore_length = (shore_length / tan - frame_run) * tan;

        let top_plate_length = frame_run + SECTION + 2.0 * CANTILEVER;
        let bottom_plate_length = top_plate_length / cos;

        Self {
            measured_length: length / CENTIMETERS,
            top_thickness: top_thickness / CENTIMETERS,
            bottom_thickness: bottom_thickness / CENTIMETERS,
            strut_spacing: strut_spacing / CENTIMETERS,
            connector_width: connector_width / CENTIMETERS,
            stopper_width: stopper_width / CENTIMETERS,
            angle,
            bottom_rise: bottom_rise / CENTIMETERS,
            shore_length: shore_length / CENTIMETERS,
            short_shore_length: short_shore_length / CENTIMETERS,
            frame_run: frame_run / CENTIMETERS,
            top_plate_length: top_plate_length / CENTIMETERS,
            bottom_plate_length: bottom_plate_length / CENTIMETERS,
        }
    }
}

/// The quantities derived from a measurement record.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DerivedQuantities {
    /// The quantities of a box shoring.
    Box(BoxQuantities),
    /// The quantities of a wall shoring.
    Wall(WallQuantities),
    /// The quantities of a sloped floor shoring.
    Floor(FloorQuantities),
}

impl DerivedQuantities {
    /// Derives the quantities of a measurement record.
    #[must_use]
    pub fn from_record(record: &MeasurementRecord) -> Self {
        match record {
            MeasurementRecord::Box(measurements) => Self::Box(BoxQuantities::new(measurements)),
            MeasurementRecord::Wall(measurements) => Self::Wall(WallQuantities::new(measurements)),
            MeasurementRecord::Floor(measurements) => {
                Self::Floor(FloorQuantities::new(measurements))
            }
        }
    }

    /// Returns the archetype the quantities belong to.
    #[must_use]
    pub fn archetype(&self) -> Archetype {
        match self {
            DerivedQuantities::Box(_) => Archetype::Box,
            DerivedQuantities::Wall(_) => Archetype::Wall,
            DerivedQuantities::Floor(_) => Archetype::Floor,
        }
    }

    /// Returns the named lengths in meters which have to be finite and positive.
    #[must_use]
    pub fn lengths(&self) -> Vec<(&'static str, f64)> {
        match self {
            DerivedQuantities::Box(quantities) => vec![
                ("strut length", quantities.strut_length),
                ("ideal strut length", quantities.ideal_strut_length),
                ("front diagonal", quantities.front_diagonal),
                ("side diagonal", quantities.side_diagonal),
                ("plate length", quantities.plate_length),
                ("wedge height", quantities.wedge_height),
                ("front run", quantities.front_run),
            ],
            DerivedQuantities::Wall(quantities) => vec![
                ("ideal length", quantities.ideal_length),
                ("strut rise", quantities.rise),
                ("strut run", quantities.run),
                ("strut length", quantities.strut_length),
                ("header length", quantities.header_length),
                ("sole plate length", quantities.sole_plate_length),
                ("wedge length", quantities.wedge_length),
                ("plywood width", quantities.plywood_width),
            ],
            DerivedQuantities::Floor(quantities) => vec![
                ("shore length", quantities.shore_length),
                ("short shore length", quantities.short_shore_length),
                ("frame run", quantities.frame_run),
                ("top plate length", quantities.top_plate_length),
                ("bottom plate length", quantities.bottom_plate_length),
            ],
        }
    }

    /// Checks that every derived length is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeometricDegeneracy`] naming the first offending quantity.
    pub fn check(&self) -> Result<(), Error> {
        match self
            .lengths()
            .into_iter()
            .find(|&(_, value)| !(value.is_finite() && value > 0.0))
        {
            Some((quantity, value)) => Err(Error::GeometricDegeneracy { quantity, value }),
            None => Ok(()),
        }
    }

    /// Returns the advisory warnings of the derived quantities.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        match self {
            DerivedQuantities::Wall(quantities) if quantities.header_exceeds_clearance() => {
                vec![Warning::HeaderExceedsClearance {
                    header_length: quantities.header_length,
                    measured_length: quantities.measured_length,
                }]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use config::{Archetype, Field, Form};

    use super::*;

    fn derive(form: &Form) -> DerivedQuantities {
        DerivedQuantities::from_record(&form.normalize().unwrap())
    }

    #[test]
    fn box_strut_lengths() {
        let form = Form::new(Archetype::Box)
            .with(Field::Length, "200")
            .with(Field::TopThickness, "10")
            .with(Field::BottomThickness, "10")
            .with(Field::WedgeThickness, "5")
            .with(Field::StrutSpacing, "120")
            .with(Field::ConnectorWidth, "10");

        let DerivedQuantities::Box(quantities) = derive(&form) else {
            panic!("expected box quantities");
        };

        assert_relative_eq!(quantities.strut_length * 100.0, 174.5, epsilon = 1e-9);
        assert_relative_eq!(quantities.ideal_strut_length * 100.0, 175.0, epsilon = 1e-9);
        assert_relative_eq!(
            quantities.front_diagonal * 100.0,
            (90.0_f64.powi(2) + 140.0_f64.powi(2)).sqrt(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            quantities.side_diagonal * 100.0,
            (62.25_f64.powi(2) + 120.0_f64.powi(2)).sqrt(),
            epsilon = 1e-9
        );
        assert_relative_eq!(quantities.wedge_height * 100.0, 5.5, epsilon = 1e-9);
    }

    #[test]
    fn wall_header_warning() {
        let form = Form::new(Archetype::Wall).with(Field::Length, "150");
        let derived = derive(&form);

        let DerivedQuantities::Wall(quantities) = derived else {
            panic!("expected wall quantities");
        };

        assert_relative_eq!(quantities.header_length * 100.0, 175.0, epsilon = 1e-9);
        assert_eq!(
            derived.warnings(),
            vec![Warning::HeaderExceedsClearance {
                header_length: quantities.header_length,
                measured_length: 1.5,
            }]
        );
        assert!(derived.check().is_ok());
    }

    #[test]
    fn wall_without_warning_above_clearance() {
        let derived = derive(&Form::new(Archetype::Wall).with(Field::Length, "300"));

        assert!(derived.warnings().is_empty());
    }

    #[test]
    fn wall_strut_length_at_45_degrees() {
        let DerivedQuantities::Wall(quantities) = derive(&Form::new(Archetype::Wall)) else {
            panic!("expected wall quantities");
        };

        // 200 * 2/3 - 10 + 10 on both axes
        let leg = 200.0 * 2.0 / 3.0;
        assert_relative_eq!(quantities.rise * 100.0, leg, epsilon = 1e-9);
        assert_relative_eq!(quantities.run * 100.0, leg, epsilon = 1e-9);
        assert_relative_eq!(
            quantities.strut_length * 100.0,
            leg * 2.0_f64.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn floor_short_shore_is_shorter_by_the_slope() {
        let DerivedQuantities::Floor(quantities) = derive(&Form::new(Archetype::Floor)) else {
            panic!("expected floor quantities");
        };

        let shore = 200.0 - 10.0 - 10.0 / 45.0_f64.to_radians().cos();
        assert_relative_eq!(quantities.shore_length * 100.0, shore, epsilon = 1e-9);
        assert_relative_eq!(
            quantities.short_shore_length * 100.0,
            shore - 110.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn contradictory_box_inputs_are_degenerate() {
        let derived = derive(&Form::new(Archetype::Box).with(Field::WedgeThickness, "500"));

        assert_eq!(
            derived.check().map_err(|error| matches!(
                error,
                Error::GeometricDegeneracy {
                    quantity: "strut length",
                    ..
                }
            )),
            Err(true)
        );
    }

    #[test]
    fn floor_spacing_below_section_is_degenerate() {
        let derived = derive(&Form::new(Archetype::Floor).with(Field::StrutSpacing, "5"));

        assert!(derived.check().is_err());
    }

    #[test]
    fn negative_wedge_thickness_is_degenerate() {
        let derived = derive(&Form::new(Archetype::Box).with(Field::WedgeThickness, "-5"));

        assert!(matches!(
            derived.check(),
            Err(Error::GeometricDegeneracy {
                quantity: "wedge height",
                ..
            })
        ));

        let derived = derive(&Form::new(Archetype::Wall).with(Field::WedgeThickness, "-5"));

        assert!(matches!(
            derived.check(),
            Err(Error::GeometricDegeneracy {
                quantity: "wedge length",
                ..
            })
        ));
    }

    #[test]
    fn derivation_is_deterministic() {
        for archetype in Archetype::ALL {
            let form = Form::new(archetype);

            assert_eq!(derive(&form), derive(&form));
        }
    }
}
