//! The edge model and edge merger (spec.md §4.3).
//!
//! Grounded on geo's `geomgraph::Edge`, generalized from "an edge
//! relating one or two already-built geometries" to "an edge built fresh out
//! of noded substrings, whose label is assembled incrementally by the
//! merger".

pub mod builder;
mod label;

pub use label::{Dimension, InputLabel, TopologyLabel};

use geo_types::Coord;

use crate::GeoFloat;

/// Ring role, used to pick the canonical orientation's depth-delta sign
/// (spec.md §4.3: "canonical ring orientation is shell=clockwise,
/// hole=counterclockwise").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingRole {
    Shell,
    Hole,
}

/// One noded substring promoted to a full edge: a coordinate sequence plus
/// its assembled label and a monotone id (spec.md §3 "Edge").
#[derive(Debug, Clone)]
pub struct Edge<T: GeoFloat> {
    id: usize,
    coords: Vec<Coord<T>>,
    label: TopologyLabel,
    /// Per-input running total of +1/-1 depth contributions accumulated
    /// during merging (spec.md §4.3's "depth delta").
    depth_delta: [i32; 2],
}

impl<T: GeoFloat> Edge<T> {
    /// Builds a new edge. `coords` must have at least two points and no two
    /// consecutive equal points (spec.md §3); the noder is responsible for
    /// upholding that before constructing edges.
    pub fn new(id: usize, coords: Vec<Coord<T>>, label: TopologyLabel) -> Self {
        debug_assert!(coords.len() >= 2, "edge must have at least two coordinates");
        Edge {
            id,
            coords,
            label,
            depth_delta: [0, 0],
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn coords(&self) -> &[Coord<T>] {
        &self.coords
    }

    pub fn label(&self) -> &TopologyLabel {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut TopologyLabel {
        &mut self.label
    }

    pub fn origin(&self) -> Coord<T> {
        self.coords[0]
    }

    pub fn destination(&self) -> Coord<T> {
        *self.coords.last().expect("edge has at least one coordinate")
    }

    pub fn depth_delta(&self, input: usize) -> i32 {
        self.depth_delta[input]
    }

    pub fn add_depth_delta(&mut self, input: usize, delta: i32) {
        self.depth_delta[input] += delta;
    }

    /// Depth delta contributed by an edge on construction: +1 when it's
    /// canonically oriented (exterior on the left, interior on the right),
    /// else -1 (spec.md §4.3).
    pub fn initial_depth_delta(role: RingRole, is_canonical_direction: bool) -> i32 {
        let canonical_sign = match role {
            RingRole::Shell => 1,
            RingRole::Hole => -1,
        };
        if is_canonical_direction {
            canonical_sign
        } else {
            -canonical_sign
        }
    }

    /// Reverses the coordinate sequence and flips the label's sides, used
    /// when two merged edges were noded in opposite directions (spec.md
    /// §4.3: "edges are ... 'equal' modulo reversal for merging").
    pub fn reverse(&mut self) {
        self.coords.reverse();
        self.label.flip();
        self.depth_delta.swap(0, 1);
        self.depth_delta = [-self.depth_delta[0], -self.depth_delta[1]];
    }

    /// Whether this edge's coordinate sequence is the reverse of `other`'s,
    /// i.e. they would merge (spec.md §4.3 merger: "grouped by equivalent
    /// coordinate sequence modulo direction").
    pub fn is_reverse_of(&self, other: &[Coord<T>]) -> bool {
        self.coords.len() == other.len()
            && self
                .coords
                .iter()
                .zip(other.iter().rev())
                .all(|(a, b)| a == b)
    }

    /// Merges `delta`/`label` from a coincident edge from a (possibly
    /// different) input into this one, per spec.md §4.3's merger rule.
    pub fn merge_from(&mut self, other: &Edge<T>) -> Result<(), String> {
        self.label.merge(&other.label)?;
        for i in 0..2 {
            self.depth_delta[i] += other.depth_delta[i];
        }
        Ok(())
    }

    /// An edge becomes a collapsed line edge once its combined depth delta
    /// nets to zero and its sides agree (spec.md §4.3).
    pub fn is_collapsed(&self, input: usize) -> bool {
        self.depth_delta[input] == 0 && self.label.for_input(input).dimension.is_area()
    }

    pub fn collapse_to_line(&mut self, input: usize) {
        let mut label = self.label.for_input(input);
        label.collapse_to_line();
        self.label.set_input(input, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use geo_types::coord;

    fn simple_edge(coords: Vec<Coord<f64>>) -> Edge<f64> {
        Edge::new(
            0,
            coords,
            TopologyLabel::new(
                InputLabel::area(Location::Interior, Location::Exterior, false),
                InputLabel::absent(),
            ),
        )
    }

    #[test]
    fn origin_and_destination() {
        let edge = simple_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 0.0 },
        ]);
        assert_eq!(edge.origin(), coord! { x: 0.0, y: 0.0 });
        assert_eq!(edge.destination(), coord! { x: 2.0, y: 0.0 });
    }

    #[test]
    fn reverse_flips_label_and_depth() {
        let mut edge = simple_edge(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }]);
        edge.add_depth_delta(0, 1);
        edge.reverse();
        assert_eq!(edge.origin(), coord! { x: 1.0, y: 0.0 });
        assert_eq!(edge.label().for_input(0).loc_left, Location::Exterior);
        assert_eq!(edge.depth_delta(0), -1);
    }

    #[test]
    fn is_reverse_of_detects_matching_sequence() {
        let edge = simple_edge(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }]);
        let reversed = [coord! { x: 1.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }];
        assert!(edge.is_reverse_of(&reversed));
    }

    #[test]
    fn collapsed_when_depth_delta_nets_zero() {
        let mut edge = simple_edge(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }]);
        edge.add_depth_delta(0, 1);
        edge.add_depth_delta(0, -1);
        assert!(edge.is_collapsed(0));
        edge.collapse_to_line(0);
        assert_eq!(edge.label().for_input(0).dimension, Dimension::Line);
    }
}
