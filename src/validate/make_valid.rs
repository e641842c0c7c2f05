//! `MakeValid` (spec.md §4.8, SPEC_FULL §F.3): "not a validator but a repair
//! path ... fully noded boundary -> area from `BuildArea` polygonisation ->
//! residual cut edges and collapsed points recombined into a geometry
//! collection of the same overall dimension."
//!
//! Grounded on `geo`'s `algorithm::validity` split-at-self-intersection
//! repair (`validity/split/*`), reworked on top of this crate's own noder and
//! overlay graph rather than `geo`'s `i_overlay` integration, since this
//! crate's noder/extractor already perform the "fully node, then polygonise
//! by depth" steps `BuildArea` needs.

use geo_types::{Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::error::GeoTopologyError;
use crate::geometry;
use crate::overlay::build_area_from_self;
use crate::precision::PrecisionModel;
use crate::GeoFloat;

/// Repairs `geometry` into a topologically valid geometry of the same
/// overall dimension (spec.md §4.8 MakeValid).
///
/// Area components self-node and re-polygonise by depth parity (`BuildArea`);
/// any linework that never closes into an area (a dangling spike, a
/// self-touching collapse) survives as a residual line component; isolated
/// points pass through unchanged. The repaired result is a
/// `GeometryCollection` only when more than one dimension of output survives.
pub fn make_valid<T: GeoFloat>(geometry: &Geometry<T>) -> Result<Geometry<T>, GeoTopologyError<T>> {
    make_valid_with(geometry, &PrecisionModel::Floating)
}

pub fn make_valid_with<T: GeoFloat>(
    geometry: &Geometry<T>,
    precision: &PrecisionModel<T>,
) -> Result<Geometry<T>, GeoTopologyError<T>> {
    if geometry::is_empty(geometry) {
        return Ok(geometry.clone());
    }

    let has_area_input = !geometry::all_rings(geometry).is_empty();
    let points = geometry::points(geometry);

    let (polygons, lines) = if has_area_input {
        build_area_from_self(geometry, precision)?
    } else {
        (Vec::new(), standalone_lines(geometry))
    };

    let polygons: Vec<Polygon<T>> = polygons
        .into_iter()
        .map(|built| {
            Polygon::new(
                built.shell.into_line_string(),
                built.holes.into_iter().map(|h| h.into_line_string()).collect(),
            )
        })
        .collect();

    let mut members = Vec::new();
    if !polygons.is_empty() {
        members.push(Geometry::MultiPolygon(MultiPolygon::new(polygons)));
    }
    if !lines.is_empty() {
        members.push(Geometry::MultiLineString(MultiLineString::new(lines)));
    }
    if !points.is_empty() {
        members.push(if points.len() == 1 {
            Geometry::Point(Point(points[0]))
        } else {
            Geometry::MultiPoint(MultiPoint::new(points.into_iter().map(Point).collect()))
        });
    }

    Ok(match members.len() {
        0 => geometry::empty_of_dimension(geometry::dimension(geometry)),
        1 => members.into_iter().next().unwrap(),
        _ => Geometry::GeometryCollection(GeometryCollection::new_from(members)),
    })
}

fn standalone_lines<T: GeoFloat>(geometry: &Geometry<T>) -> Vec<LineString<T>> {
    geometry::line_strings(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn valid_polygon_round_trips() {
        let square: Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)].into();
        let repaired = make_valid(&square).unwrap();
        assert!(!geometry::is_empty(&repaired));
        assert_eq!(geometry::dimension(&repaired), 2);
    }

    #[test]
    fn bowtie_polygon_repairs_into_two_lobes() {
        let bowtie: Geometry<f64> = Geometry::Polygon(Polygon::new(
            geo_types::line_string![
                (x: 0.0, y: 0.0), (x: 10.0, y: 10.0), (x: 10.0, y: 0.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0),
            ],
            vec![],
        ));
        let repaired = make_valid(&bowtie).unwrap();
        assert!(!geometry::is_empty(&repaired));
    }

    #[test]
    fn empty_geometry_passes_through() {
        let empty: Geometry<f64> = geometry::empty_of_dimension(2);
        let repaired = make_valid(&empty).unwrap();
        assert!(geometry::is_empty(&repaired));
    }
}
