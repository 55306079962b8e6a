mod box_shoring;
mod floor_shoring;
mod wall_shoring;

use crate::{derived::DerivedQuantities, primitive::Primitive};

/// The cross section of pillars, struts, shores and stoppers.
const SECTION: f64 = 0.1;
/// The thickness of connector and brace boards.
const BOARD: f64 = 0.025;
/// The thickness of a plywood panel.
const PLYWOOD: f64 = 0.018;
/// The distance kept between a connector and the end of a pillar.
const MARGIN: f64 = 0.05;

/// Places all members of the shoring described by the derived quantities.
pub fn primitives(derived: &DerivedQuantities) -> Vec<Primitive> {
    match derived {
        DerivedQuantities::Box(quantities) => box_shoring::primitives(quantities),
        DerivedQuantities::Wall(quantities) => wall_shoring::primitives(quantities),
        DerivedQuantities::Floor(quantities) => floor_shoring::primitives(quantities),
    }
}
