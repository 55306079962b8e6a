use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer};

/// A shoring archetype, each with its own set of required fields and formulas.
#[derive(Copy, Clone, Default, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// A box shoring with four vertical pillars.
    #[default]
    Box,
    /// A raking shoring leaning against a wall.
    Wall,
    /// A shoring on a sloped floor with a tall and a short shore per frame.
    Floor,
}

impl Archetype {
    /// All archetypes.
    pub const ALL: [Archetype; 3] = [Archetype::Box, Archetype::Wall, Archetype::Floor];

    /// Returns the fields required for calculating the archetype.
    #[must_use]
    pub fn required_fields(self) -> &'static [Field] {
        use Field::{
            Angle, BottomThickness, ConnectorWidth, Length, StopperWidth, StrutSpacing,
            TopThickness, WedgeThickness,
        };

        match self {
            Archetype::Box => &[
                Length,
                TopThickness,
                BottomThickness,
                WedgeThickness,
                StrutSpacing,
                ConnectorWidth,
            ],
            Archetype::Wall => &[
                Length,
                TopThickness,
                BottomThickness,
                WedgeThickness,
                StrutSpacing,
                ConnectorWidth,
                StopperWidth,
                Angle,
            ],
            Archetype::Floor => &[
                Length,
                TopThickness,
                BottomThickness,
                StrutSpacing,
                ConnectorWidth,
                StopperWidth,
                Angle,
            ],
        }
    }

    /// Returns the name of the archetype as shown to the user.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Archetype::Box => "Box shoring",
            Archetype::Wall => "Wall shoring",
            Archetype::Floor => "Sloped floor shoring",
        }
    }
}

/// A named dimension of the shoring form.
///
/// Linear dimensions are given in centimeters, the angle in degrees.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Field {
    /// The measured length, the clearance between floor and ceiling or the wall height.
    Length,
    /// The thickness of the top plate.
    TopThickness,
    /// The thickness of the bottom plate.
    BottomThickness,
    /// The thickness of a wedge.
    WedgeThickness,
    /// The spacing between two struts.
    StrutSpacing,
    /// The width of the connector boards.
    ConnectorWidth,
    /// The width of a stopper.
    StopperWidth,
    /// The design angle in degrees.
    Angle,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 8] = [
        Field::Length,
        Field::TopThickness,
        Field::BottomThickness,
        Field::WedgeThickness,
        Field::StrutSpacing,
        Field::ConnectorWidth,
        Field::StopperWidth,
        Field::Angle,
    ];

    /// Returns the key of the field used by the form.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Field::Length => "length",
            Field::TopThickness => "top_thickness",
            Field::BottomThickness => "bottom_thickness",
            Field::WedgeThickness => "wedge_thickness",
            Field::StrutSpacing => "strut_spacing",
            Field::ConnectorWidth => "connector_width",
            Field::StopperWidth => "stopper_width",
            Field::Angle => "angle",
        }
    }

    /// Returns the default value the form is initialized with.
    #[must_use]
    pub fn default_value(self) -> &'static str {
        match self {
            Field::Length => "200",
            Field::TopThickness | Field::BottomThickness => "10",
            Field::WedgeThickness => "5",
            Field::StrutSpacing => "120",
            Field::ConnectorWidth | Field::StopperWidth => "10",
            Field::Angle => "45",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| format!("unknown field `{key}`"))
    }
}

/// The raw string values of the form fields.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Fields(BTreeMap<Field, String>);

impl Fields {
    /// Creates an empty set of fields without any default values.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Sets the raw value of a field.
    pub fn set(&mut self, field: Field, value: &str) {
        self.0.insert(field, value.to_owned());
    }

    /// Removes a field, leaving it missing.
    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl Default for Fields {
    fn default() -> Self {
        Self(
            Field::ALL
                .into_iter()
                .map(|field| (field, field.default_value().to_owned()))
                .collect(),
        )
    }
}

// The form may hand over numbers as well as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawValue> for String {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Text(text) => text,
            RawValue::Integer(integer) => integer.to_string(),
            RawValue::Float(float) => float.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner: BTreeMap<String, RawValue> = BTreeMap::deserialize(deserializer)?;
        let mut fields = Fields::default();

        for (key, value) in inner {
            let field = key.parse().map_err(D::Error::custom)?;
            fields.0.insert(field, value.into());
        }

        Ok(fields)
    }
}
