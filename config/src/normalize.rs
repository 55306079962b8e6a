use std::fmt;

use crate::{Archetype, Field, FiniteFloat, Form};

/// The message shown instead of a result if the form is missing required data.
pub const MISSING_DATA_MESSAGE: &str = "缺少必要資料，無法計算";

/// The normalized measurements of the box archetype in centimeters.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BoxMeasurements {
    /// The measured clearance between floor and ceiling.
    pub length: f64,
    /// The thickness of the top plate.
    pub top_thickness: f64,
    /// The thickness of the bottom plate.
    pub bottom_thickness: f64,
    /// The thickness of a wedge.
    pub wedge_thickness: f64,
    /// The spacing between two pillars.
    pub strut_spacing: f64,
    /// The width of the connector boards.
    pub connector_width: f64,
}

/// The normalized measurements of the wall archetype in centimeters and degrees.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WallMeasurements {
    /// The measured wall height.
    pub length: f64,
    /// The thickness of the header plate against the wall.
    pub top_thickness: f64,
    /// The thickness of the sole plate on the ground.
    pub bottom_thickness: f64,
    /// The thickness of a wedge.
    pub wedge_thickness: f64,
    /// The spacing between the two struts.
    pub strut_spacing: f64,
    /// The width of the connector boards.
    pub connector_width: f64,
    /// The width of a stopper.
    pub stopper_width: f64,
    /// The design angle in degrees.
    pub angle: f64,
}

/// The normalized measurements of the sloped floor archetype in centimeters and degrees.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FloorMeasurements {
    /// The measured clearance at the tall shore.
    pub length: f64,
    /// The thickness of the top plate.
    pub top_thickness: f64,
    /// The thickness of the sloped bottom plate.
    pub bottom_thickness: f64,
    /// The spacing between two shores.
    pub strut_spacing: f64,
    /// The width of the connector boards.
    pub connector_width: f64,
    /// The width of a stopper.
    pub stopper_width: f64,
    /// The slope angle in degrees.
    pub angle: f64,
}

/// A normalized set of measurements, all fields required by the archetype are finite.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MeasurementRecord {
    /// The measurements of a box shoring.
    Box(BoxMeasurements),
    /// The measurements of a wall shoring.
    Wall(WallMeasurements),
    /// The measurements of a sloped floor shoring.
    Floor(FloorMeasurements),
}

impl MeasurementRecord {
    /// Returns the archetype the measurements belong to.
    #[must_use]
    pub fn archetype(&self) -> Archetype {
        match self {
            MeasurementRecord::Box(_) => Archetype::Box,
            MeasurementRecord::Wall(_) => Archetype::Wall,
            MeasurementRecord::Floor(_) => Archetype::Floor,
        }
    }

    /// Returns the value of a field, [`None`] if the archetype does not use it.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.fields()
            .into_iter()
            .find_map(|(other, value)| (other == field).then_some(value))
    }

    /// Returns all fields with their values in form order.
    #[must_use]
    pub fn fields(&self) -> Vec<(Field, f64)> {
        match *self {
            MeasurementRecord::Box(measurements) => vec![
                (Field::Length, measurements.length),
                (Field::TopThickness, measurements.top_thickness),
                (Field::BottomThickness, measurements.bottom_thickness),
                (Field::WedgeThickness, measurements.wedge_thickness),
                (Field::StrutSpacing, measurements.strut_spacing),
                (Field::ConnectorWidth, measurements.connector_width),
            ],
            MeasurementRecord::Wall(measurements) => vec![
                (Field::Length, measurements.length),
                (Field::TopThickness, measurements.top_thickness),
                (Field::BottomThickness, measurements.bottom_thickness),
                (Field::WedgeThickness, measurements.wedge_thickness),
                (Field::StrutSpacing, measurements.strut_spacing),
                (Field::ConnectorWidth, measurements.connector_width),
                (Field::StopperWidth, measurements.stopper_width),
                (Field::Angle, measurements.angle),
            ],
            MeasurementRecord::Floor(measurements) => vec![
                (Field::Length, measurements.length),
                (Field::TopThickness, measurements.top_thickness),
                (Field::BottomThickness, measurements.bottom_thickness),
                (Field::StrutSpacing, measurements.strut_spacing),
                (Field::ConnectorWidth, measurements.connector_width),
                (Field::StopperWidth, measurements.stopper_width),
                (Field::Angle, measurements.angle),
            ],
        }
    }
}

/// The reason a field failed validation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Reason {
    /// The field is missing or empty.
    Missing,
    /// The field is not a finite number.
    NotANumber,
    /// The field is a number outside of the allowed range.
    OutOfRange,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reason::Missing => "missing",
            Reason::NotANumber => "not a number",
            Reason::OutOfRange => "out of range",
        })
    }
}

/// A field which failed validation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldFailure {
    /// The failing field.
    pub field: Field,
    /// The reason of the failure.
    pub reason: Reason,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field, self.reason)
    }
}

/// The error returned if required fields are missing or invalid.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{}: {}", MISSING_DATA_MESSAGE, list(.failures))]
pub struct ValidationError {
    failures: Vec<FieldFailure>,
}

impl ValidationError {
    /// Returns the failing fields with their reasons.
    #[must_use]
    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// Returns true if the given field failed validation.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.failures.iter().any(|failure| failure.field == field)
    }
}

fn list(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses form fields while collecting every failure.
struct FieldParser<'a> {
    form: &'a Form,
    failures: Vec<FieldFailure>,
}

impl<'a> FieldParser<'a> {
    fn new(form: &'a Form) -> Self {
        Self {
            form,
            failures: Vec::new(),
        }
    }

    /// Parses a field, returning NaN and recording the failure if it is invalid.
    fn parse(&mut self, field: Field) -> f64 {
        let raw = self.form.fields.get(field).map(str::trim).unwrap_or("");

        if raw.is_empty() {
            self.fail(field, Reason::Missing);
            return f64::NAN;
        }

        match raw.parse::<FiniteFloat>() {
            Ok(value) => value.into(),
            Err(_) => {
                self.fail(field, Reason::NotANumber);
                f64::NAN
            }
        }
    }

    /// Parses an angle in degrees which has to be strictly between 0 and 90.
    fn parse_angle(&mut self, field: Field) -> f64 {
        let angle = self.parse(field);

        if angle.is_finite() && !(angle > 0.0 && angle < 90.0) {
            self.fail(field, Reason::OutOfRange);
        }

        angle
    }

    fn fail(&mut self, field: Field, reason: Reason) {
        self.failures.push(FieldFailure { field, reason });
    }

    fn finish(self, record: MeasurementRecord) -> Result<MeasurementRecord, ValidationError> {
        if self.failures.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError {
                failures: self.failures,
            })
        }
    }
}

/// Normalizes the fields required by the archetype of the form.
pub fn normalize(form: &Form) -> Result<MeasurementRecord, ValidationError> {
    let mut parser = FieldParser::new(form);

    let record = match form.archetype {
        Archetype::Box => MeasurementRecord::Box(BoxMeasurements {
            length: parser.parse(Field::Length),
            top_thickness: parser.parse(Field::TopThickness),
            bottom_thickness: parser.parse(Field::BottomThickness),
            wedge_thickness: parser.parse(Field::WedgeThickness),
            strut_spacing: parser.parse(Field::StrutSpacing),
            connector_width: parser.parse(Field::ConnectorWidth),
        }),
        Archetype::Wall => MeasurementRecord::Wall(WallMeasurements {
            length: parser.parse(Field::Length),
            top_thickness: parser.parse(Field::TopThickness),
            bottom_thickness: parser.parse(Field::BottomThickness),
            wedge_thickness: parser.parse(Field::WedgeThickness),
            strut_spacing: parser.parse(Field::StrutSpacing),
            connector_width: parser.parse(Field::ConnectorWidth),
            stopper_width: parser.parse(Field::StopperWidth),
            angle: parser.parse_angle(Field::Angle),
        }),
        Archetype::Floor => MeasurementRecord::Floor(FloorMeasurements {
            length: parser.parse(Field::Length),
            top_thickness: parser.parse(Field::TopThickness),
            bottom_thickness: parser.parse(Field::BottomThickness),
            strut_spacing: parser.parse(Field::StrutSpacing),
            connector_width: parser.parse(Field::ConnectorWidth),
            stopper_width: parser.parse(Field::StopperWidth),
            angle: parser.parse_angle(Field::Angle),
        }),
    };

    parser.finish(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_defaults_normalize() {
        let record = Form::new(Archetype::Box).normalize().unwrap();

        assert_eq!(
            record,
            MeasurementRecord::Box(BoxMeasurements {
                length: 200.0,
                top_thickness: 10.0,
                bottom_thickness: 10.0,
                wedge_thickness: 5.0,
                strut_spacing: 120.0,
                connector_width: 10.0,
            })
        );
        assert_eq!(record.get(Field::Angle), None);
        assert_eq!(record.get(Field::StrutSpacing), Some(120.0));
    }

    #[test]
    fn empty_length_is_rejected_for_every_archetype() {
        for archetype in Archetype::ALL {
            let error = Form::new(archetype)
                .with(Field::Length, "")
                .normalize()
                .unwrap_err();

            assert_eq!(
                error.failures(),
                &[FieldFailure {
                    field: Field::Length,
                    reason: Reason::Missing,
                }]
            );
            assert!(error.to_string().contains("length"));
            assert!(error.to_string().starts_with(MISSING_DATA_MESSAGE));
        }
    }

    #[test]
    fn all_failing_fields_are_reported() {
        let mut form = Form::new(Archetype::Wall)
            .with(Field::TopThickness, "ten")
            .with(Field::Angle, "0");
        form.fields.remove(Field::StopperWidth);

        let error = form.normalize().unwrap_err();

        assert_eq!(
            error.failures(),
            &[
                FieldFailure {
                    field: Field::TopThickness,
                    reason: Reason::NotANumber,
                },
                FieldFailure {
                    field: Field::StopperWidth,
                    reason: Reason::Missing,
                },
                FieldFailure {
                    field: Field::Angle,
                    reason: Reason::OutOfRange,
                },
            ]
        );
    }

    #[test]
    fn unused_fields_are_ignored() {
        let form = Form::new(Archetype::Box)
            .with(Field::Angle, "garbage")
            .with(Field::StopperWidth, "");

        assert!(form.normalize().is_ok());

        let form = Form::new(Archetype::Floor).with(Field::WedgeThickness, "");

        assert!(form.normalize().is_ok());
    }

    #[test]
    fn angle_range_is_exclusive() {
        for angle in ["0", "90", "-10", "120"] {
            let error = Form::new(Archetype::Floor)
                .with(Field::Angle, angle)
                .normalize()
                .unwrap_err();

            assert!(error.contains(Field::Angle));
        }

        assert!(Form::new(Archetype::Floor)
            .with(Field::Angle, "89.5")
            .normalize()
            .is_ok());
    }

    #[test]
    fn infinite_values_are_not_numbers() {
        let error = Form::new(Archetype::Box)
            .with(Field::StrutSpacing, "inf")
            .normalize()
            .unwrap_err();

        assert_eq!(error.failures()[0].reason, Reason::NotANumber);
    }

    #[test]
    fn message_lists_every_failure() {
        let error = Form::new(Archetype::Wall)
            .with(Field::Length, "")
            .with(Field::Angle, "95")
            .normalize()
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("{MISSING_DATA_MESSAGE}: length (missing), angle (out of range)")
        );
    }
}
