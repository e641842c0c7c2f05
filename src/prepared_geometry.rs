//! `PreparedGeometry` (SPEC_FULL.md §F.2): caches a fixed A-side's
//! [`GeometryView`] so repeated predicate evaluation against varying B
//! reuses the same flattened component buckets instead of re-walking A's
//! geometry tree on every call.
//!
//! Grounded on geo's `relate/geomgraph/index/prepared_geometry.rs`
//! (which caches a `GeometryGraph` for the fixed side) and this crate's own
//! `prepared_geometry.rs` stub, reworked against [`GeometryView`] +
//! [`compute_matrix`] instead of geo's `GeometryGraph`, since this
//! crate's predicate engine already takes flattened views rather than graphs
//! (spec.md §4.7 "Prepared mode": "the A side may be pre-built into cached
//! indexes ... reused across repeated evaluation against varying B").

use geo_types::Geometry;

use crate::relate::boundary::{BoundaryNodeRule, Mod2BoundaryNodeRule};
use crate::relate::geometry_view::GeometryView;
use crate::relate::matrix::{IntersectionMatrix, Pattern};
use crate::relate::topology::compute_matrix;
use crate::GeoFloat;

/// A geometry whose component view has already been computed, ready for
/// repeated relate/predicate calls against varying right-hand geometries.
pub struct PreparedGeometry<T: GeoFloat> {
    view: GeometryView<T>,
}

impl<T: GeoFloat> PreparedGeometry<T> {
    pub fn new(geometry: &Geometry<T>) -> Self {
        PreparedGeometry {
            view: GeometryView::from_geometry(geometry),
        }
    }

    /// The full DE-9IM matrix of the prepared geometry against `other`,
    /// under `rule`.
    pub fn relate_with(&self, other: &Geometry<T>, rule: &dyn BoundaryNodeRule) -> IntersectionMatrix {
        let other_view = GeometryView::from_geometry(other);
        compute_matrix(&self.view, &other_view, rule)
    }

    /// `relate_with` under the default mod-2 boundary node rule.
    pub fn relate(&self, other: &Geometry<T>) -> IntersectionMatrix {
        self.relate_with(other, &Mod2BoundaryNodeRule)
    }

    pub fn intersects(&self, other: &Geometry<T>) -> bool {
        if self.view.is_empty() || GeometryView::from_geometry(other).is_empty() {
            return false;
        }
        self.relate(other).is_intersects()
    }

    pub fn contains(&self, other: &Geometry<T>) -> bool {
        Pattern::compile("T*****FF*")
            .map(|pattern| self.relate(other).matches(&pattern))
            .unwrap_or(false)
    }

    pub fn covers(&self, other: &Geometry<T>) -> bool {
        let m = self.relate(other);
        ["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"]
            .iter()
            .any(|p| m.matches_str(p).unwrap_or(false))
    }
}

/// Batch-mode `intersects`, parallelized across `others` with `rayon` when
/// the `multithreading` feature is on (SPEC_FULL.md §D: "the predicate
/// engine's prepared mode across independent B-geometries"), grounded on
/// `geo`'s own `multithreading` feature, which fans its algorithms out with
/// `rayon::prelude::*` over a slice of independent inputs rather than
/// threading state through a single call.
#[cfg(feature = "multithreading")]
impl<T: GeoFloat + Send + Sync> PreparedGeometry<T> {
    pub fn intersects_many(&self, others: &[Geometry<T>]) -> Vec<bool> {
        use rayon::prelude::*;
        others.par_iter().map(|other| self.intersects(other)).collect()
    }
}

#[cfg(not(feature = "multithreading"))]
impl<T: GeoFloat> PreparedGeometry<T> {
    pub fn intersects_many(&self, others: &[Geometry<T>]) -> Vec<bool> {
        others.iter().map(|other| self.intersects(other)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, polygon};

    #[test]
    fn prepared_polygon_reused_across_several_points() {
        let poly: Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)].into();
        let prepared = PreparedGeometry::new(&poly);

        let inside: Geometry<f64> = Geometry::from(point! { x: 5.0, y: 5.0 });
        let outside: Geometry<f64> = Geometry::from(point! { x: 50.0, y: 50.0 });
        assert!(prepared.contains(&inside));
        assert!(!prepared.contains(&outside));
    }

    #[test]
    fn intersects_many_matches_per_point_intersects() {
        let poly: Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)].into();
        let prepared = PreparedGeometry::new(&poly);

        let others = vec![
            Geometry::from(point! { x: 5.0, y: 5.0 }),
            Geometry::from(point! { x: 50.0, y: 50.0 }),
            Geometry::from(point! { x: 0.0, y: 0.0 }),
        ];
        let batched = prepared.intersects_many(&others);
        let sequential: Vec<bool> = others.iter().map(|g| prepared.intersects(g)).collect();
        assert_eq!(batched, sequential);
        assert_eq!(batched, vec![true, false, true]);
    }
}
