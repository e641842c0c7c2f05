//! `TopologyLabel` (spec.md §3 "TopologyLabel (per edge)").
//!
//! Shaped after geo's `geomgraph::{Label, TopologyPosition}` pair --
//! same idea of "one slot per input, area inputs get left/on/right, line
//! inputs get just `on`" -- but flattened into a single struct per spec.md's
//! vocabulary (`dimension`, `locLeft`/`locRight`/`locLine`, `isHole`) instead
//! of geo's `Option<CoordPos>` trio, since the overlay's labeller
//! (spec.md §4.5) needs an explicit `Dimension::Unknown`/`Dimension::None`
//! distinction geo's relate engine never had to make (geo
//! only ever relates two *already fully-formed* geometries; this crate's
//! labeller discovers dimension during merging).

use std::fmt;

use crate::location::Location;

/// What an edge represents in a given input geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// The edge bounds an area; `loc_left`/`loc_right` are meaningful.
    Area,
    /// The edge is part of a linear (1-D) input.
    Line,
    /// The edge is known to come from this input, but its dimension hasn't
    /// been determined yet (transient, set during noding/merging).
    Unknown,
    /// The edge does not appear in this input at all.
    None,
}

impl Dimension {
    pub fn is_area(self) -> bool {
        matches!(self, Dimension::Area)
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Dimension::None | Dimension::Unknown)
    }

    /// Area beats Line beats Unknown beats None (spec.md §4.3 merger rule).
    fn rank(self) -> u8 {
        match self {
            Dimension::Area => 3,
            Dimension::Line => 2,
            Dimension::Unknown => 1,
            Dimension::None => 0,
        }
    }

    pub fn combine(self, other: Dimension) -> Dimension {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }
}

/// The label an edge carries for a single input geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLabel {
    pub dimension: Dimension,
    pub loc_left: Location,
    pub loc_right: Location,
    pub loc_line: Location,
    pub is_hole: bool,
}

impl InputLabel {
    pub fn absent() -> Self {
        InputLabel {
            dimension: Dimension::None,
            loc_left: Location::None,
            loc_right: Location::None,
            loc_line: Location::None,
            is_hole: false,
        }
    }

    pub fn area(loc_left: Location, loc_right: Location, is_hole: bool) -> Self {
        InputLabel {
            dimension: Dimension::Area,
            loc_left,
            loc_right,
            loc_line: Location::None,
            is_hole,
        }
    }

    pub fn line(loc_line: Location) -> Self {
        InputLabel {
            dimension: Dimension::Line,
            loc_left: Location::None,
            loc_right: Location::None,
            loc_line,
            is_hole: false,
        }
    }

    pub fn unknown() -> Self {
        InputLabel {
            dimension: Dimension::Unknown,
            loc_left: Location::None,
            loc_right: Location::None,
            loc_line: Location::None,
            is_hole: false,
        }
    }

    /// Swaps left/right, used when building an edge's symmetric half-edge
    /// (spec.md §4.4: "for the reverse half-edge, left/right sides are
    /// swapped").
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.loc_left, &mut self.loc_right);
    }

    /// A collapsed area ring becomes a line edge taking its location from
    /// the parent ring's role (spec.md §4.5 Step B): holes collapse to
    /// Exterior, shells to Interior.
    pub fn collapse_to_line(&mut self) {
        if self.dimension == Dimension::Area {
            self.loc_line = if self.is_hole {
                Location::Exterior
            } else {
                Location::Interior
            };
            self.dimension = Dimension::Line;
        }
    }
}

impl fmt::Display for InputLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dimension {
            Dimension::Area => write!(f, "{}{}{}", self.loc_left, 'a', self.loc_right),
            Dimension::Line => write!(f, "_{}{}", 'l', self.loc_line),
            Dimension::Unknown => write!(f, "?_?"),
            Dimension::None => write!(f, "___"),
        }
    }
}

/// The full per-edge label: one [`InputLabel`] per input geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyLabel {
    inputs: [InputLabel; 2],
}

impl TopologyLabel {
    pub fn new(a: InputLabel, b: InputLabel) -> Self {
        TopologyLabel { inputs: [a, b] }
    }

    pub fn absent() -> Self {
        TopologyLabel {
            inputs: [InputLabel::absent(), InputLabel::absent()],
        }
    }

    pub fn for_input(&self, index: usize) -> InputLabel {
        self.inputs[index]
    }

    pub fn set_input(&mut self, index: usize, label: InputLabel) {
        self.inputs[index] = label;
    }

    pub fn flip(&mut self) {
        self.inputs[0].flip();
        self.inputs[1].flip();
    }

    /// Merges the label of a coincident edge from the same or another input
    /// into `self`, applying spec.md §4.3's merger rule. Returns an error
    /// message describing the conflict if both inputs disagree about which
    /// side is interior.
    pub fn merge(&mut self, other: &TopologyLabel) -> Result<(), String> {
        for i in 0..2 {
            let a = self.inputs[i];
            let b = other.inputs[i];
            if a.dimension == Dimension::Area && b.dimension == Dimension::Area {
                let left_conflicts = a.loc_left.is_known()
                    && b.loc_left.is_known()
                    && a.loc_left != b.loc_left;
                let right_conflicts = a.loc_right.is_known()
                    && b.loc_right.is_known()
                    && a.loc_right != b.loc_right;
                if left_conflicts || right_conflicts {
                    return Err(format!(
                        "conflicting area labels on input {i}: {a} vs {b}"
                    ));
                }
            }
            self.inputs[i] = InputLabel {
                dimension: a.dimension.combine(b.dimension),
                loc_left: if a.loc_left.is_known() { a.loc_left } else { b.loc_left },
                loc_right: if a.loc_right.is_known() { a.loc_right } else { b.loc_right },
                loc_line: if a.loc_line.is_known() { a.loc_line } else { b.loc_line },
                is_hole: a.is_hole || b.is_hole,
            };
        }
        Ok(())
    }
}

impl fmt::Display for TopologyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.inputs[0], self.inputs[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_combine_prefers_area() {
        assert_eq!(Dimension::Line.combine(Dimension::Area), Dimension::Area);
        assert_eq!(Dimension::Unknown.combine(Dimension::Line), Dimension::Line);
        assert_eq!(Dimension::None.combine(Dimension::Unknown), Dimension::Unknown);
    }

    #[test]
    fn flip_swaps_left_right() {
        let mut label = InputLabel::area(Location::Interior, Location::Exterior, false);
        label.flip();
        assert_eq!(label.loc_left, Location::Exterior);
        assert_eq!(label.loc_right, Location::Interior);
    }

    #[test]
    fn merge_agrees_on_matching_area_sides() {
        let mut a = TopologyLabel::new(
            InputLabel::area(Location::Interior, Location::Exterior, false),
            InputLabel::absent(),
        );
        let b = TopologyLabel::new(
            InputLabel::area(Location::Interior, Location::Exterior, false),
            InputLabel::absent(),
        );
        assert!(a.merge(&b).is_ok());
        assert_eq!(a.for_input(0).loc_left, Location::Interior);
    }

    #[test]
    fn merge_reports_conflicting_area_sides() {
        let mut a = TopologyLabel::new(
            InputLabel::area(Location::Interior, Location::Exterior, false),
            InputLabel::absent(),
        );
        let b = TopologyLabel::new(
            InputLabel::area(Location::Exterior, Location::Interior, false),
            InputLabel::absent(),
        );
        assert!(a.merge(&b).is_err());
    }

    #[test]
    fn collapse_to_line_uses_hole_role() {
        let mut shell = InputLabel::area(Location::Interior, Location::Exterior, false);
        shell.collapse_to_line();
        assert_eq!(shell.dimension, Dimension::Line);
        assert_eq!(shell.loc_line, Location::Interior);

        let mut hole = InputLabel::area(Location::Interior, Location::Exterior, true);
        hole.collapse_to_line();
        assert_eq!(hole.loc_line, Location::Exterior);
    }
}
