//! The predicate engine (spec.md §4.7 "Predicate engine (RelateNG)"):
//! computes the DE-9IM intersection matrix between two geometries and
//! exposes the named OGC predicates built on top of it.

pub mod boundary;
pub mod geometry_view;
pub mod matrix;
mod predicate;
pub mod topology;

pub use boundary::{
    BoundaryNodeRule, EndpointBoundaryNodeRule, Mod2BoundaryNodeRule, MonovalentEndpointBoundaryNodeRule,
    MultivalentEndpointBoundaryNodeRule,
};
pub use geometry_view::GeometryView;
pub use matrix::{IntersectionMatrix, Pattern};
pub use predicate::{
    contains, covered_by, covers, crosses, disjoint, equals_topo, intersects, overlaps, relate, relate_matches,
    relate_with, touches, within,
};
