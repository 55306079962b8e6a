use config::{Form, MeasurementRecord};

use crate::{derived::DerivedQuantities, scene::Scene, Error, Warning};

/// The result of a successful calculation.
#[derive(Clone, PartialEq, Debug)]
pub struct Calculation {
    /// The normalized measurements.
    pub record: MeasurementRecord,
    /// The quantities derived from the measurements.
    pub derived: DerivedQuantities,
    /// The assembled scene.
    pub scene: Scene,
    /// Advisory warnings, which did not prevent rendering.
    pub warnings: Vec<Warning>,
}

impl Calculation {
    /// Runs the whole pipeline for a form.
    ///
    /// # Errors
    ///
    /// Returns an error if a field fails validation, a derived length is degenerate or a placed
    /// primitive has a size which is not finite and positive.
    pub fn try_from_form(form: &Form) -> Result<Self, Error> {
        let record = form.normalize()?;
        let derived = DerivedQuantities::from_record(&record);
        derived.check()?;
        let warnings = derived.warnings();
        let scene = Scene::assemble(&derived);
        scene.check()?;

        Ok(Self {
            record,
            derived,
            scene,
            warnings,
        })
    }
}

/// The state of a calculator.
#[derive(Clone, Default, PartialEq, Debug)]
pub enum State {
    /// Nothing has been calculated yet.
    #[default]
    Idle,
    /// The last calculation failed, no scene is shown.
    Invalid(Error),
    /// The last calculation succeeded.
    Rendered(Calculation),
}

impl State {
    /// Returns the scene of a successful calculation.
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            State::Rendered(calculation) => Some(&calculation.scene),
            State::Idle | State::Invalid(_) => None,
        }
    }
}

/// Drives the pipeline and holds the outcome of the last calculation.
#[derive(Default)]
pub struct Calculator {
    state: State,
}

impl Calculator {
    /// Creates an idle calculator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Calculates the scene of a form, replacing the result of any previous calculation.
    pub fn calculate(&mut self, form: &Form) -> &State {
        self.state = State::Idle;
        tracing::info!(archetype = form.archetype.name(), "calculating shoring");

        self.state = match Calculation::try_from_form(form) {
            Ok(calculation) => {
                for warning in &calculation.warnings {
                    tracing::warn!("{warning}");
                }
                tracing::info!(
                    primitives = calculation.scene.primitives().len(),
                    "rendered shoring"
                );
                State::Rendered(calculation)
            }
            Err(error) => {
                match &error {
                    Error::Validation(_) => tracing::info!("{error}"),
                    Error::GeometricDegeneracy { .. } => tracing::warn!("{error}"),
                }
                State::Invalid(error)
            }
        };

        &self.state
    }

    /// Discards the result of the last calculation.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use config::{Archetype, Field, MISSING_DATA_MESSAGE};

    use super::*;

    #[test]
    fn starts_idle() {
        assert_eq!(Calculator::new().state(), &State::Idle);
    }

    #[test]
    fn valid_form_is_rendered() {
        let mut calculator = Calculator::new();

        for archetype in Archetype::ALL {
            let state = calculator.calculate(&Form::new(archetype));

            let State::Rendered(calculation) = state else {
                panic!("expected a rendered state for {archetype:?}");
            };
            assert_eq!(calculation.scene.archetype(), archetype);
            assert!(!calculation.scene.primitives().is_empty());
        }
    }

    #[test]
    fn empty_length_discards_the_previous_scene() {
        let mut calculator = Calculator::new();
        calculator.calculate(&Form::new(Archetype::Box));
        assert!(calculator.state().scene().is_some());

        let state = calculator.calculate(&Form::new(Archetype::Box).with(Field::Length, ""));

        let State::Invalid(Error::Validation(error)) = state else {
            panic!("expected a validation error");
        };
        assert!(error.contains(Field::Length));
        assert!(error.to_string().starts_with(MISSING_DATA_MESSAGE));
        assert_eq!(calculator.state().scene(), None);
    }

    #[test]
    fn short_wall_renders_with_a_warning() {
        let mut calculator = Calculator::new();
        let state = calculator.calculate(&Form::new(Archetype::Wall).with(Field::Length, "150"));

        let State::Rendered(calculation) = state else {
            panic!("expected a rendered state");
        };
        assert!(matches!(
            calculation.warnings.as_slice(),
            [Warning::HeaderExceedsClearance { .. }]
        ));
    }

    #[test]
    fn degenerate_geometry_is_invalid() {
        let mut calculator = Calculator::new();
        let state =
            calculator.calculate(&Form::new(Archetype::Box).with(Field::WedgeThickness, "500"));

        assert!(matches!(
            state,
            State::Invalid(Error::GeometricDegeneracy { .. })
        ));
    }

    #[test]
    fn negative_sizes_are_never_rendered() {
        let cases = [
            (Archetype::Box, Field::WedgeThickness),
            (Archetype::Box, Field::StrutSpacing),
            (Archetype::Box, Field::ConnectorWidth),
            (Archetype::Wall, Field::WedgeThickness),
            (Archetype::Wall, Field::StrutSpacing),
            (Archetype::Wall, Field::ConnectorWidth),
            (Archetype::Wall, Field::StopperWidth),
            (Archetype::Floor, Field::ConnectorWidth),
            (Archetype::Floor, Field::StopperWidth),
        ];
        let mut calculator = Calculator::new();

        for (archetype, field) in cases {
            let state = calculator.calculate(&Form::new(archetype).with(field, "-100"));

            assert!(
                matches!(state, State::Invalid(Error::GeometricDegeneracy { .. })),
                "{archetype:?} with a negative {field} was not rejected"
            );
        }
    }

    #[test]
    fn rendered_primitives_have_positive_finite_sizes() {
        let forms = Archetype::ALL.into_iter().flat_map(|archetype| {
            [
                Form::new(archetype),
                Form::new(archetype).with(Field::Length, "150"),
                Form::new(archetype).with(Field::Length, "400"),
                Form::new(archetype).with(Field::Angle, "30"),
                Form::new(archetype).with(Field::StrutSpacing, "60"),
            ]
        });
        let mut calculator = Calculator::new();

        for form in forms {
            if let State::Rendered(calculation) = calculator.calculate(&form) {
                for primitive in calculation.scene.primitives() {
                    assert!(
                        primitive
                            .size
                            .to_array()
                            .iter()
                            .all(|value| value.is_finite() && *value > 0.0),
                        "{:?} has size {}",
                        primitive.member,
                        primitive.size
                    );
                }
            }
        }
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut calculator = Calculator::new();
        calculator.calculate(&Form::new(Archetype::Floor));
        calculator.reset();

        assert_eq!(calculator.state(), &State::Idle);
    }

    #[test]
    fn recalculation_is_deterministic() {
        let form = Form::new(Archetype::Wall).with(Field::Angle, "60");
        let mut calculator = Calculator::new();
        let first = calculator.calculate(&form).clone();

        assert_eq!(calculator.calculate(&form), &first);
    }
}
