#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]

//! A planar topology and overlay engine: robust boolean set operations
//! (union/intersection/difference/symmetric difference), a DE-9IM predicate
//! engine, and a polygon validator/repairer, built around a snap-rounding
//! noder and a half-edge overlay graph.
//!
//! # Modules
//!
//! - [`precision`]: the [`precision::PrecisionModel`] controlling whether
//!   coordinates are used as-is ("floating") or snapped to a fixed grid.
//! - [`noding`]: the noder that fully intersects a set of input line strings
//!   and splits them at every intersection point, plus the `SnapIfNeeded`
//!   robustness wrapper around it.
//! - [`edge`]/[`graph`]/[`labeller`]/[`extract`]: the half-edge overlay graph
//!   pipeline — build edges from noded input, label them with each input's
//!   topological location, and extract the boolean-op result from the marked
//!   subgraph.
//! - [`overlay`]: the public entry point for the four boolean set operations.
//! - [`relate`]: the DE-9IM matrix engine and its named OGC predicates.
//! - [`validate`]: the polygon/geometry validator and `MakeValid` repair path.
//! - [`prepared_geometry`]: a cached, repeatedly-queryable geometry for
//!   predicate evaluation against many right-hand geometries.
//! - [`kernel`]: the robust geometric primitives (orientation, line
//!   intersection, point-in-ring) the rest of the crate is built on.
//!
//! # Example
//!
//! ```
//! use planar_topology::overlay::{overlay, OverlayOp};
//! use planar_topology::geometry;
//! use geo_types::{polygon, Geometry};
//!
//! let a: Geometry<f64> =
//!     polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0), (x: 0.0, y: 0.0)].into();
//! let b: Geometry<f64> =
//!     polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0), (x: 1.0, y: 1.0)].into();
//!
//! let result = overlay(&a, &b, OverlayOp::Intersection).unwrap();
//! assert!(!geometry::is_empty(&result));
//! ```

extern crate geo_types;
extern crate num_traits;

#[macro_use]
extern crate log;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub mod edge;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod graph;
pub mod kernel;
pub mod labeller;
pub mod location;
pub mod noding;
pub mod overlay;
pub mod precision;
pub mod prepared_geometry;
pub mod relate;
pub mod validate;

pub use error::GeoTopologyError;
pub use location::Location;
pub use overlay::{overlay, overlay_with, OverlayOp};
pub use precision::PrecisionModel;
pub use prepared_geometry::PreparedGeometry;
pub use relate::{
    contains, covered_by, covers, crosses, disjoint, equals_topo, intersects, overlaps, relate, relate_matches,
    relate_with, touches, within, BoundaryNodeRule, IntersectionMatrix, Pattern,
};
pub use validate::{make_valid, validate, validate_all, ValidationError, ValidationErrorCode};

pub use geo_types::{coord, line_string, point, polygon, CoordNum};

/// The numeric bound the whole engine is generic over: finite-precision
/// floating point with total ordering of magnitudes (`Float`), a usable
/// absolute value (`Signed`), finite bounds (`Bounded`), and the ability to
/// step to the adjacent representable value (`NextAfter`), which the noder's
/// snap-rounding fallback uses to nudge coincident-but-not-equal coordinates
/// apart.
pub trait GeoFloat:
    CoordNum + num_traits::Float + num_traits::Signed + num_traits::Bounded + float_next_after::NextAfter
{
}

impl<T> GeoFloat for T where
    T: CoordNum + num_traits::Float + num_traits::Signed + num_traits::Bounded + float_next_after::NextAfter
{
}
