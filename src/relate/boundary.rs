//! `BoundaryNodeRule` (SPEC_FULL.md §F.1): which endpoints of a multi-curve
//! count as boundary points.
//!
//! geo hardcodes the SFS Mod-2 rule directly in
//! `GeometryGraph::determine_boundary` ("For now, we only support the SFS
//! Mod-2 Rule. We could make this configurable if we wanted to support
//! alternative boundary rules."). This module is that configurability,
//! grounded on GEOS's `algorithm::BoundaryNodeRule` family.

/// How many times an endpoint must appear across a multi-curve's components
/// for it to count as a boundary point, rather than interior.
pub trait BoundaryNodeRule: std::fmt::Debug {
    /// `boundary_count` is how many linestring endpoints coincide at a point.
    fn is_in_boundary(&self, boundary_count: usize) -> bool;
}

/// The default OGC SFS rule: boundary iff an odd number of endpoints
/// coincide. Matches geo's `determine_boundary`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mod2BoundaryNodeRule;

impl BoundaryNodeRule for Mod2BoundaryNodeRule {
    fn is_in_boundary(&self, boundary_count: usize) -> bool {
        boundary_count % 2 == 1
    }
}

/// Any endpoint at all is a boundary point, regardless of how many curves
/// share it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointBoundaryNodeRule;

impl BoundaryNodeRule for EndpointBoundaryNodeRule {
    fn is_in_boundary(&self, boundary_count: usize) -> bool {
        boundary_count > 0
    }
}

/// Boundary iff three or more curve endpoints coincide there.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultivalentEndpointBoundaryNodeRule;

impl BoundaryNodeRule for MultivalentEndpointBoundaryNodeRule {
    fn is_in_boundary(&self, boundary_count: usize) -> bool {
        boundary_count >= 3
    }
}

/// Boundary iff exactly one curve endpoint lies there (true endpoints of an
/// otherwise-interior-only network).
#[derive(Debug, Clone, Copy, Default)]
pub struct MonovalentEndpointBoundaryNodeRule;

impl BoundaryNodeRule for MonovalentEndpointBoundaryNodeRule {
    fn is_in_boundary(&self, boundary_count: usize) -> bool {
        boundary_count == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod2_treats_odd_counts_as_boundary() {
        let rule = Mod2BoundaryNodeRule;
        assert!(rule.is_in_boundary(1));
        assert!(!rule.is_in_boundary(2));
        assert!(rule.is_in_boundary(3));
        assert!(!rule.is_in_boundary(0));
    }

    #[test]
    fn endpoint_rule_ignores_parity() {
        let rule = EndpointBoundaryNodeRule;
        assert!(rule.is_in_boundary(1));
        assert!(rule.is_in_boundary(2));
        assert!(!rule.is_in_boundary(0));
    }

    #[test]
    fn multivalent_requires_three_or_more() {
        let rule = MultivalentEndpointBoundaryNodeRule;
        assert!(!rule.is_in_boundary(2));
        assert!(rule.is_in_boundary(3));
    }

    #[test]
    fn monovalent_requires_exactly_one() {
        let rule = MonovalentEndpointBoundaryNodeRule;
        assert!(rule.is_in_boundary(1));
        assert!(!rule.is_in_boundary(2));
        assert!(!rule.is_in_boundary(0));
    }
}
