//! Location and dimension vocabulary shared by the labeller, extractor and
//! predicate engine.
//!
//! `Dimensions` and the DE-9IM cell addressing scheme are carried over
//! directly from geo's `relate::geomgraph::IntersectionMatrix`, which
//! in turn is "heavily based on [JTS's IntersectionMatrix]". `Location` is
//! spec.md §3's enum; it plays the same role geo's `CoordPos` plays,
//! plus the transient `None` state spec.md calls out explicitly.

use std::fmt;

/// Where a point/edge/component sits relative to a geometry.
///
/// `None` is "unknown yet" and only ever appears as a transient labelling
/// state inside the labeller; it never survives into a finished label or into
/// the predicate engine's matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
    None,
}

impl Location {
    pub fn is_known(self) -> bool {
        !matches!(self, Location::None)
    }

    /// Boundary counts as Interior for the overlay mark-step inclusion rules
    /// (spec.md §4.6).
    pub fn as_interior_or_exterior(self) -> Location {
        match self {
            Location::Boundary => Location::Interior,
            other => other,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
            Location::None => '_',
        };
        write!(f, "{c}")
    }
}

/// The dimension of a cell in a DE-9IM matrix, ordered so that
/// `Empty < ZeroDimensional < OneDimensional < TwoDimensional`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimensions {
    Empty,
    ZeroDimensional,
    OneDimensional,
    TwoDimensional,
}

impl Dimensions {
    pub fn char_code(self) -> char {
        match self {
            Dimensions::Empty => 'F',
            Dimensions::ZeroDimensional => '0',
            Dimensions::OneDimensional => '1',
            Dimensions::TwoDimensional => '2',
        }
    }

    pub fn from_geometry_dim(dim: usize) -> Self {
        match dim {
            0 => Dimensions::ZeroDimensional,
            1 => Dimensions::OneDimensional,
            2 => Dimensions::TwoDimensional,
            _ => Dimensions::Empty,
        }
    }
}

/// Index helper so a `[[Dimensions; 3]; 3]` can be addressed by `Location`
/// rather than by raw `usize`, matching the ordering convention DE-9IM uses
/// (Interior, Boundary, Exterior) rather than the enum's declaration order.
pub(crate) fn location_index(loc: Location) -> usize {
    match loc {
        Location::Interior => 0,
        Location::Boundary => 1,
        Location::Exterior => 2,
        Location::None => panic!("Location::None has no DE-9IM row/column"),
    }
}
