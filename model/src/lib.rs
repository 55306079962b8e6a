//! The `model` crate turns validated measurements into derived quantities and a scene of
//! placed primitives describing a shoring.

mod calculator;
mod derived;
mod geometry;
mod layout;
mod primitive;
mod scene;
mod util;

use std::fmt::{self, Display, Formatter};

use config::ValidationError;

pub use calculator::{Calculation, Calculator, State};
pub use derived::{BoxQuantities, DerivedQuantities, FloorQuantities, WallQuantities};
pub use geometry::{align, Segment};
pub use primitive::{Bounds, MaterialTag, Member, Primitive};
pub use scene::{Light, Scene};
pub use util::Mirror;

/// An error preventing a scene from being computed.
#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum Error {
    /// One or more fields of the form are missing or invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A derived length is not finite or not positive.
    #[error("geometric degeneracy: {quantity} is {value}")]
    GeometricDegeneracy {
        /// The name of the offending quantity.
        quantity: &'static str,
        /// The value of the offending quantity in meters.
        value: f64,
    },
}

/// An advisory condition which does not prevent rendering.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Warning {
    /// The wall header is longer than the measured clearance.
    HeaderExceedsClearance {
        /// The length of the header in meters.
        header_length: f64,
        /// The measured clearance in meters.
        measured_length: f64,
    },
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Warning::HeaderExceedsClearance {
                header_length,
                measured_length,
            } => write!(
                f,
                "header length {:.1} cm exceeds the measured length {:.1} cm",
                header_length * 100.0,
                measured_length * 100.0
            ),
        }
    }
}
