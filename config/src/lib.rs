//! The `config` crate contains everything related to the shoring form: the available fields,
//! their default values, the display colors and the normalization of raw form input.

mod fields;
mod normalize;
mod primitives;

use std::{fs::read_to_string, io, path::Path};

use serde::Deserialize;

pub use fields::{Archetype, Field, Fields};
pub use hex_color::HexColor;
pub use normalize::{
    BoxMeasurements, FieldFailure, FloorMeasurements, MeasurementRecord, Reason, ValidationError,
    WallMeasurements, MISSING_DATA_MESSAGE,
};
pub use primitives::FiniteFloat;

/// A color.
pub type Color = HexColor;

/// The TOML text of the default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// A configuration of the shoring calculator.
#[derive(Clone, Deserialize, PartialEq, Eq, Debug)]
pub struct Config {
    /// The form state, the archetype and its raw field values.
    pub form: Form,
    /// The colors used for displaying the shoring.
    #[serde(default)]
    pub colors: Colors,
}

impl Config {
    /// Reads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the file could not be read or parsed.
    pub fn try_from_path(config_path: &Path) -> Result<Self, Error> {
        Ok(toml::from_str(&read_to_string(config_path)?)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG)
            .expect("default configuration should always be deserializable")
    }
}

/// The state of the shoring form as delivered by the form layer.
#[derive(Clone, Default, Deserialize, PartialEq, Eq, Debug)]
pub struct Form {
    /// The selected archetype.
    pub archetype: Archetype,
    /// The raw field values, missing entries are filled with their default values.
    #[serde(default)]
    pub fields: Fields,
}

impl Form {
    /// Creates a form for the given archetype with all fields set to their default values.
    #[must_use]
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            fields: Fields::default(),
        }
    }

    /// Sets the raw value of a field.
    #[must_use]
    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.fields.set(field, value);
        self
    }

    /// Normalizes the raw field values required by the archetype.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every required field which is missing,
    /// not a finite number or out of range.
    pub fn normalize(&self) -> Result<MeasurementRecord, ValidationError> {
        normalize::normalize(self)
    }
}

/// The colors used for displaying the members of a shoring, including their opacity.
#[derive(Clone, Deserialize, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct Colors {
    /// The color of pillars, struts and shores.
    pub pillar: Color,
    /// The color of top, bottom and sole plates.
    pub plate: Color,
    /// The color of the wedges.
    pub wedge: Color,
    /// The color of horizontal connectors.
    pub connector: Color,
    /// The color of diagonal braces.
    pub brace: Color,
    /// The color of the stoppers.
    pub stopper: Color,
    /// The color of plywood panels.
    pub plywood: Color,
    /// The color of the background.
    pub background: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            pillar: Color::rgba(0xC8, 0x96, 0x5A, 0xFF),
            plate: Color::rgba(0x8B, 0x5A, 0x2B, 0xFF),
            wedge: Color::rgba(0xE0, 0x4A, 0x3C, 0xFF),
            connector: Color::rgba(0x3C, 0x8D, 0xBC, 0xFF),
            brace: Color::rgba(0x2E, 0xA0, 0x5A, 0xFF),
            stopper: Color::rgba(0xF0, 0xB4, 0x29, 0xFF),
            plywood: Color::rgba(0xD9, 0xC0, 0x8C, 0x99),
            background: Color::rgba(0x20, 0x22, 0x26, 0xFF),
        }
    }
}

/// The error type for errors regarding parsing configurations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to open file.
    #[error("failed to open file")]
    FileOpen(#[from] io::Error),
    /// Failed to parse TOML.
    #[error("failed to parse TOML")]
    TomlParse(#[from] toml::de::Error),
    /// Float is not finite.
    #[error("float is not finite")]
    NonFiniteFloat,
}
