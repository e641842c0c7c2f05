//! Builds the initial edge set from two input geometries (spec.md §4.3):
//! flattens every polygon ring and linestring into a tagged segment string,
//! nodes them all together, then assembles and merges (spec.md §4.3's
//! merger) the initial per-edge label for every noded substring.
//!
//! Grounded on geo's `GeometryGraph::add_geometry`, which performs
//! the analogous "walk every ring/line of an input and hand its segments to
//! the graph" step -- here generalized to two inputs feeding one shared
//! noder/merger rather than one `GeometryGraph` per input.

use std::collections::HashMap;

use geo_types::{Coord, Geometry};

use crate::edge::{Edge, InputLabel, RingRole, TopologyLabel};
use crate::error::GeoTopologyError;
use crate::geometry;
use crate::location::Location;
use crate::noding::{self, NodedSegmentString};
use crate::precision::PrecisionModel;
use crate::GeoFloat;

/// Per-segment-string bookkeeping threaded through noding: which input
/// contributed it and, for area rings, its role and whether it was supplied
/// in its canonical direction (spec.md §4.3).
#[derive(Debug, Clone, Copy)]
struct StringTag {
    input: usize,
    role: Option<RingRole>,
    is_canonical_direction: bool,
}

/// The merged, labelled edges ready for the overlay graph, plus each
/// input's isolated point components (spec.md §4.6 point build / mixed-point
/// overlay dispatch).
pub struct BuiltEdges<T: GeoFloat> {
    pub edges: Vec<Edge<T>>,
    pub points: [Vec<Coord<T>>; 2],
}

/// Runs the noder across both inputs' rings/lines combined, then builds and
/// merges the initial edge set (spec.md §4.3).
pub fn build_edges<T: GeoFloat>(
    a: &Geometry<T>,
    b: &Geometry<T>,
    precision: &PrecisionModel<T>,
) -> Result<BuiltEdges<T>, GeoTopologyError<T>> {
    let mut strings: Vec<NodedSegmentString<T, StringTag>> = Vec::new();

    for (input, geom) in [a, b].into_iter().enumerate() {
        for (ring, is_hole) in geometry::all_rings(geom) {
            if ring.0.len() < 4 {
                continue;
            }
            let role = if is_hole { RingRole::Hole } else { RingRole::Shell };
            let is_ccw = signed_area(&ring.0) > T::zero();
            let is_canonical_direction = match role {
                RingRole::Shell => !is_ccw,
                RingRole::Hole => is_ccw,
            };
            strings.push(NodedSegmentString::new(
                ring.0,
                StringTag {
                    input,
                    role: Some(role),
                    is_canonical_direction,
                },
            ));
        }
        for line in geometry::line_strings(geom) {
            if line.0.len() < 2 {
                continue;
            }
            strings.push(NodedSegmentString::new(
                line.0,
                StringTag {
                    input,
                    role: None,
                    is_canonical_direction: true,
                },
            ));
        }
    }

    let substrings = noding::node(strings, precision, false)?;

    let mut edges: Vec<Edge<T>> = Vec::new();
    let mut index: HashMap<((i64, i64), (i64, i64)), usize> = HashMap::new();

    for (tag, coords) in substrings {
        if coords.len() != 2 || coords[0] == coords[1] {
            continue;
        }
        let ka = coord_key(coords[0]);
        let kb = coord_key(coords[1]);
        let (key, needs_reverse) = if ka <= kb { ((ka, kb), false) } else { ((kb, ka), true) };

        let mut edge = Edge::new(edges.len(), coords, single_input_label(tag));
        if let Some(role) = tag.role {
            edge.add_depth_delta(
                tag.input,
                Edge::initial_depth_delta(role, tag.is_canonical_direction),
            );
        }
        if needs_reverse {
            edge.reverse();
        }

        if let Some(&existing_idx) = index.get(&key) {
            edges[existing_idx]
                .merge_from(&edge)
                .map_err(|msg| GeoTopologyError::topology_exception(msg, edge.origin()))?;
        } else {
            index.insert(key, edges.len());
            edges.push(edge);
        }
    }

    let points = [geometry::points(a), geometry::points(b)];
    Ok(BuiltEdges { edges, points })
}

fn single_input_label(tag: StringTag) -> TopologyLabel {
    let input_label = match tag.role {
        Some(role) => {
            let (loc_left, loc_right) = if tag.is_canonical_direction {
                (Location::Exterior, Location::Interior)
            } else {
                (Location::Interior, Location::Exterior)
            };
            InputLabel::area(loc_left, loc_right, role == RingRole::Hole)
        }
        None => InputLabel::line(Location::Interior),
    };
    let mut label = TopologyLabel::absent();
    label.set_input(tag.input, input_label);
    label
}

/// Shoelace sum (not halved): positive for a CCW ring, negative for CW.
fn signed_area<T: GeoFloat>(coords: &[Coord<T>]) -> T {
    let mut area = T::zero();
    for w in coords.windows(2) {
        area = area + (w[0].x * w[1].y - w[1].x * w[0].y);
    }
    area
}

fn coord_key<T: GeoFloat>(c: Coord<T>) -> (i64, i64) {
    let to_f64 = |v: T| <f64 as num_traits::NumCast>::from(v).unwrap_or(0.0);
    let scale = 1e9;
    ((to_f64(c.x) * scale).round() as i64, (to_f64(c.y) * scale).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn disjoint_squares_produce_eight_distinct_edges() {
        let a = Geometry::from(polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)]);
        let b = Geometry::from(polygon![(x: 20.0, y: 20.0), (x: 30.0, y: 20.0), (x: 30.0, y: 30.0), (x: 20.0, y: 30.0), (x: 20.0, y: 20.0)]);
        let built = build_edges(&a, &b, &PrecisionModel::Floating).unwrap();
        assert_eq!(built.edges.len(), 8);
        for edge in &built.edges {
            assert!(edge.label().for_input(0).dimension.is_area() || edge.label().for_input(1).dimension.is_area());
        }
    }

    #[test]
    fn coincident_edge_from_both_inputs_merges_into_one() {
        let a = Geometry::from(polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)]);
        let b = a.clone();
        let built = build_edges(&a, &b, &PrecisionModel::Floating).unwrap();
        assert_eq!(built.edges.len(), 4);
        for edge in &built.edges {
            assert_eq!(edge.label().for_input(0).loc_left, edge.label().for_input(1).loc_left);
        }
    }
}
