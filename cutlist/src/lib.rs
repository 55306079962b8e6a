//! The `cutlist` crate implements the generation of a cut list from an assembled scene.

use std::fmt::{self, Display, Formatter, Write};

use model::{Member, Primitive, Scene};

/// Centimeters per meter.
const CENTIMETERS: f64 = 100.0;

/// A cut list grouping equal members of a scene.
#[derive(Clone, PartialEq, Debug)]
pub struct CutList {
    rows: Vec<Row>,
}

impl CutList {
    /// Creates a cut list from the primitives of a scene.
    ///
    /// Primitives of the same member with equal dimensions, rounded to a tenth of a
    /// millimeter, are counted in a single row. Rows are ordered by first appearance.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let mut rows: Vec<Row> = Vec::new();

        for primitive in scene.primitives() {
            let row = Row::from(primitive);

            match rows.iter_mut().find(|other| other.matches(&row)) {
                Some(other) => other.quantity += 1,
                None => rows.push(row),
            }
        }

        Self { rows }
    }

    /// Returns the rows of the cut list.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the total length of all members in meters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_length(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.length * row.quantity as f64)
            .sum()
    }

    /// Converts the cut list to a CSV file.
    #[must_use]
    pub fn to_csv_file(&self) -> String {
        let mut out = "Quantity;Member;Length (cm);Section (cm);\n".to_owned();

        for row in &self.rows {
            writeln!(
                out,
                "{};{};{:.1};{:.1} x {:.1};",
                row.quantity,
                row.member.name(),
                row.length * CENTIMETERS,
                row.width * CENTIMETERS,
                row.depth * CENTIMETERS,
            )
            .expect("format should never fail");
        }

        out
    }
}

impl Display for CutList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}

/// A row of a cut list.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Row {
    /// The member to cut.
    pub member: Member,
    /// The number of pieces.
    pub quantity: usize,
    /// The length of a piece in meters.
    pub length: f64,
    /// The width of a piece in meters.
    pub width: f64,
    /// The depth of a piece in meters.
    pub depth: f64,
}

impl Row {
    fn matches(&self, other: &Row) -> bool {
        self.member == other.member
            && tenth_millimeters(self.length) == tenth_millimeters(other.length)
            && tenth_millimeters(self.width) == tenth_millimeters(other.width)
            && tenth_millimeters(self.depth) == tenth_millimeters(other.depth)
    }
}

impl From<&Primitive> for Row {
    fn from(primitive: &Primitive) -> Self {
        Self {
            member: primitive.member,
            quantity: 1,
            length: primitive.length(),
            width: primitive.size.x,
            depth: primitive.size.y,
        }
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ×{}: {:.1} cm ({:.1} × {:.1} cm)",
            self.member.name(),
            self.quantity,
            self.length * CENTIMETERS,
            self.width * CENTIMETERS,
            self.depth * CENTIMETERS,
        )
    }
}

#[allow(clippy::cast_possible_truncation)]
fn tenth_millimeters(meters: f64) -> i64 {
    (meters * 10_000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use config::{Archetype, Field, Form};
    use model::Calculation;

    use super::*;

    fn scene(form: &Form) -> Scene {
        Calculation::try_from_form(form).unwrap().scene
    }

    #[test]
    fn every_primitive_is_counted_once() {
        for archetype in Archetype::ALL {
            let scene = scene(&Form::new(archetype));
            let cut_list = CutList::from_scene(&scene);
            let quantity: usize = cut_list.rows().iter().map(|row| row.quantity).sum();

            assert_eq!(quantity, scene.primitives().len());
        }
    }

    #[test]
    fn lengths_equal_the_scene() {
        let scene = scene(&Form::new(Archetype::Wall).with(Field::Angle, "60"));
        let cut_list = CutList::from_scene(&scene);

        for primitive in scene.primitives() {
            assert!(cut_list.rows().iter().any(|row| row.member == primitive.member
                && (row.length - primitive.length()).abs() < 1e-4));
        }

        let total: f64 = scene.primitives().iter().map(Primitive::length).sum();
        assert_relative_eq!(cut_list.total_length(), total, epsilon = 1e-9);
    }

    #[test]
    fn box_pillars_form_a_single_row() {
        let cut_list = CutList::from_scene(&scene(&Form::new(Archetype::Box)));
        let pillars: Vec<_> = cut_list
            .rows()
            .iter()
            .filter(|row| row.member == Member::Pillar)
            .collect();

        assert_eq!(pillars.len(), 1);
        assert_eq!(pillars[0].quantity, 4);
        assert_eq!(pillars[0].to_string(), "Pillar ×4: 174.5 cm (10.0 × 10.0 cm)");
    }

    #[test]
    fn csv_has_a_header_and_one_line_per_row() {
        let cut_list = CutList::from_scene(&scene(&Form::new(Archetype::Floor)));
        let csv = cut_list.to_csv_file();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("Quantity;Member;Length (cm);Section (cm);"));
        assert_eq!(lines.count(), cut_list.rows().len());
        assert!(csv.contains("2;Tall shore;"));
    }
}
