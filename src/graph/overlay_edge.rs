//! `OverlayEdge` (spec.md §3): one directed half-edge of the overlay graph.
//!
//! Grounded on geo's half-edge-adjacent `Quadrant`-based CCW ordering
//! (`geomgraph::quadrant`), generalized from "compare two edges around a
//! node" to a full half-edge structure with an explicit symmetric pointer and
//! a CCW-successor pointer, per spec.md §4.4. Storage is arena-based (plain
//! `Vec<OverlayEdge<T>>` indexed by `HalfEdgeId`) rather than `Rc<RefCell<_>>`
//! graphs of pointers, per spec.md §9's design note to avoid reference
//! cycles.

use geo_types::Coord;

use crate::edge::TopologyLabel;
use crate::GeoFloat;

/// Index into the arena of half-edges. `HalfEdgeId(i)` and its symmetric
/// partner always occupy `i` and `i ^ 1` (even ids point "forward", odd ids
/// are their `sym`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);

impl HalfEdgeId {
    pub fn sym(self) -> HalfEdgeId {
        HalfEdgeId(self.0 ^ 1)
    }
}

/// The quadrant of a direction vector, used as the coarse component of the
/// sign-exact CCW-around-origin comparator (spec.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Quadrant {
    Ne,
    Nw,
    Sw,
    Se,
}

impl Quadrant {
    fn new<T: GeoFloat>(dx: T, dy: T) -> Self {
        if dx >= T::zero() && dy >= T::zero() {
            Quadrant::Ne
        } else if dx < T::zero() && dy >= T::zero() {
            Quadrant::Nw
        } else if dx < T::zero() && dy < T::zero() {
            Quadrant::Sw
        } else {
            Quadrant::Se
        }
    }
}

/// One directed half-edge: origin, direction point (the next vertex along
/// the full edge), a back-pointer to the edge's full coordinate array
/// (stored on [`crate::graph::OverlayGraph`] rather than duplicated here),
/// and the bookkeeping fields the labeller/extractor fill in.
#[derive(Debug, Clone)]
pub struct OverlayEdge<T: GeoFloat> {
    pub origin: Coord<T>,
    pub direction_point: Coord<T>,
    /// Index of the full edge's coordinate sequence in the owning graph's
    /// edge table; both `self` and `self.sym` share it.
    pub edge_index: usize,
    pub next_ccw: HalfEdgeId,
    pub label: TopologyLabel,
    pub is_in_result_area: bool,
    pub is_in_result_line: bool,
    pub is_visited: bool,
    /// Set during extraction once this half-edge has been assigned to an
    /// edge ring.
    pub ring: Option<usize>,
}

impl<T: GeoFloat> OverlayEdge<T> {
    fn direction(&self) -> (T, T) {
        (
            self.direction_point.x - self.origin.x,
            self.direction_point.y - self.origin.y,
        )
    }

    /// Sign-exact CCW-around-origin ordering: quadrant first, cross-product
    /// second, so two half-edges are never mis-ordered by floating rounding
    /// (spec.md §4.4).
    pub fn compare_direction(&self, other: &OverlayEdge<T>) -> std::cmp::Ordering {
        let (dx1, dy1) = self.direction();
        let (dx2, dy2) = other.direction();
        let q1 = Quadrant::new(dx1, dy1);
        let q2 = Quadrant::new(dx2, dy2);
        if q1 != q2 {
            return q1.cmp(&q2);
        }
        let cross = dx1 * dy2 - dx2 * dy1;
        if cross > T::zero() {
            std::cmp::Ordering::Less
        } else if cross < T::zero() {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    }
}
