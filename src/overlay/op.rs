//! The four boolean set operations (spec.md §6 "Operation codes").

use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymmetricDifference,
}

impl OverlayOp {
    /// Mark-step inclusion rule (spec.md §4.6): is a half-edge whose right
    /// side sits at `right_a`/`right_b` (Boundary already folded into
    /// Interior by the caller) on the result area's boundary for this op?
    pub fn includes_edge(self, right_a: Location, right_b: Location) -> bool {
        let a_in = right_a == Location::Interior;
        let b_in = right_b == Location::Interior;
        match self {
            OverlayOp::Intersection => a_in && b_in,
            OverlayOp::Union => a_in || b_in,
            OverlayOp::Difference => a_in && !b_in,
            OverlayOp::SymmetricDifference => a_in != b_in,
        }
    }

    /// Predicted result dimension when one or both inputs are empty
    /// (spec.md §4.6 operation pipeline step 1).
    pub fn empty_input_result_dimension(self, dim_a: usize, dim_b: usize) -> usize {
        match self {
            OverlayOp::Intersection => dim_a.min(dim_b),
            OverlayOp::Union | OverlayOp::SymmetricDifference => dim_a.max(dim_b),
            OverlayOp::Difference => dim_a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_requires_both_interior() {
        assert!(OverlayOp::Intersection.includes_edge(Location::Interior, Location::Interior));
        assert!(!OverlayOp::Intersection.includes_edge(Location::Interior, Location::Exterior));
    }

    #[test]
    fn union_requires_either_interior() {
        assert!(OverlayOp::Union.includes_edge(Location::Interior, Location::Exterior));
        assert!(!OverlayOp::Union.includes_edge(Location::Exterior, Location::Exterior));
    }

    #[test]
    fn difference_requires_a_not_b() {
        assert!(OverlayOp::Difference.includes_edge(Location::Interior, Location::Exterior));
        assert!(!OverlayOp::Difference.includes_edge(Location::Interior, Location::Interior));
    }

    #[test]
    fn symmetric_difference_requires_exactly_one() {
        assert!(OverlayOp::SymmetricDifference.includes_edge(Location::Interior, Location::Exterior));
        assert!(!OverlayOp::SymmetricDifference.includes_edge(Location::Interior, Location::Interior));
        assert!(!OverlayOp::SymmetricDifference.includes_edge(Location::Exterior, Location::Exterior));
    }
}
