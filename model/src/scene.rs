use config::Archetype;
use glam::{dvec3, DVec3};

use crate::{
    derived::DerivedQuantities,
    layout,
    primitive::{Bounds, Member, Primitive},
    Error,
};

/// A light illuminating the scene.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Light {
    /// A light shining from infinitely far away in a fixed direction.
    Directional {
        /// The direction the light is shining in.
        direction: DVec3,
        /// The intensity of the light.
        intensity: f64,
    },
    /// A light illuminating everything evenly.
    Ambient {
        /// The intensity of the light.
        intensity: f64,
    },
}

/// The primitives of one shoring together with the lights illuminating them.
#[derive(Clone, PartialEq, Debug)]
pub struct Scene {
    archetype: Archetype,
    primitives: Vec<Primitive>,
    lights: [Light; 2],
}

impl Scene {
    /// Assembles the scene of the shoring described by the derived quantities.
    #[must_use]
    pub fn assemble(derived: &DerivedQuantities) -> Self {
        Self {
            archetype: derived.archetype(),
            primitives: layout::primitives(derived),
            lights: [
                Light::Directional {
                    direction: dvec3(-0.4, 0.6, -1.0).normalize(),
                    intensity: 2.0,
                },
                Light::Ambient { intensity: 0.4 },
            ],
        }
    }

    /// Returns the archetype of the shoring.
    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Returns the primitives in placement order.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Returns the primitives of a single member.
    pub fn members(&self, member: Member) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(move |primitive| primitive.member == member)
    }

    /// Returns the directional and the ambient light.
    #[must_use]
    pub fn lights(&self) -> &[Light; 2] {
        &self.lights
    }

    /// Returns the bounds containing every primitive, [`None`] for an empty scene.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.primitives.iter().flat_map(Primitive::corners))
    }

    /// Checks that every primitive has a finite and positive size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeometricDegeneracy`] naming the member of the first offending primitive.
    pub fn check(&self) -> Result<(), Error> {
        for primitive in &self.primitives {
            if let Some(&value) = primitive
                .size
                .to_array()
                .iter()
                .find(|value| !(value.is_finite() && **value > 0.0))
            {
                return Err(Error::GeometricDegeneracy {
                    quantity: primitive.member.name(),
                    value,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::{Field, Form};

    use super::*;

    fn scene(archetype: Archetype) -> Scene {
        let record = Form::new(archetype).normalize().unwrap();
        Scene::assemble(&DerivedQuantities::from_record(&record))
    }

    #[test]
    fn assembling_is_deterministic() {
        for archetype in Archetype::ALL {
            assert_eq!(scene(archetype), scene(archetype));
        }
    }

    #[test]
    fn one_directional_and_one_ambient_light() {
        let scene = scene(Archetype::Box);
        let [directional, ambient] = scene.lights();

        assert!(matches!(directional, Light::Directional { .. }));
        assert!(matches!(ambient, Light::Ambient { .. }));
    }

    #[test]
    fn box_scene_stands_on_the_ground() {
        let scene = scene(Archetype::Box);
        let bounds = scene.bounds().unwrap();

        assert!(bounds.min.z.abs() < 1e-12);
        assert!((bounds.max.z - 2.0).abs() < 1e-12);
        assert_eq!(scene.archetype(), Archetype::Box);
        assert_eq!(scene.members(Member::Pillar).count(), 4);
    }

    #[test]
    fn default_scenes_pass_the_size_check() {
        for archetype in Archetype::ALL {
            assert_eq!(scene(archetype).check(), Ok(()));
        }
    }

    #[test]
    fn negative_connector_width_fails_the_size_check() {
        let record = Form::new(Archetype::Box)
            .with(Field::ConnectorWidth, "-10")
            .normalize()
            .unwrap();
        let scene = Scene::assemble(&DerivedQuantities::from_record(&record));

        assert!(matches!(
            scene.check(),
            Err(Error::GeometricDegeneracy { quantity, .. }) if quantity == Member::Connector.name()
        ));
    }
}
