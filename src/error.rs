//! Error taxonomy for the topology kernel (spec.md §7).
//!
//! Mirrors geo's habit of hand-writing `std::error::Error`
//! impls (see `relate::IntersectionMatrix`'s `InvalidInputError`) rather than
//! reaching for a derive macro crate.

use std::fmt;

use geo_types::Coord;

/// Everything that can go wrong inside the kernel.
///
/// `Robustness` failures (`TopologyException`) carry the coordinate at which
/// the inconsistency was detected, so callers can report a witness the same
/// way `validate` does.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoTopologyError<T: geo_types::CoordNum> {
    /// Null/malformed input: mixed-dimension collection where forbidden, a
    /// DE-9IM pattern string of the wrong length or alphabet, etc.
    InvalidArgument(String),
    /// The requested operation has no defined behavior for the given input
    /// (e.g. an overlay over un-linearised curve geometry).
    UnsupportedOperation(String),
    /// A robustness failure: the noder, labeller or extractor detected an
    /// inconsistency that could not be resolved at the current precision.
    TopologyException { message: String, witness: Coord<T> },
    /// The host requested cancellation via a checkpoint.
    Cancelled,
    /// An internal invariant was violated. Always a bug, never user input.
    AssertionFailed(String),
}

impl<T: geo_types::CoordNum> fmt::Display for GeoTopologyError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::UnsupportedOperation(msg) => write!(f, "unsupported operation: {msg}"),
            Self::TopologyException { message, witness } => {
                write!(
                    f,
                    "topology exception at ({:?}, {:?}): {message}",
                    witness.x, witness.y
                )
            }
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::AssertionFailed(msg) => write!(f, "internal assertion failed: {msg}"),
        }
    }
}

impl<T: geo_types::CoordNum + fmt::Debug> std::error::Error for GeoTopologyError<T> {}

impl<T: geo_types::CoordNum> GeoTopologyError<T> {
    pub fn topology_exception(message: impl Into<String>, witness: Coord<T>) -> Self {
        Self::TopologyException {
            message: message.into(),
            witness,
        }
    }
}

/// Fires at noder entry, after labelling and before extraction (spec.md §5).
///
/// A host can implement this to interrupt a long-running overlay; the default
/// no-op implementation never cancels.
pub trait Interrupt {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// An `Interrupt` that never cancels. Used when the caller doesn't supply one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverInterrupt;
impl Interrupt for NeverInterrupt {}

pub(crate) fn checkpoint<T: geo_types::CoordNum>(
    interrupt: &dyn Interrupt,
) -> Result<(), GeoTopologyError<T>> {
    if interrupt.is_cancelled() {
        Err(GeoTopologyError::Cancelled)
    } else {
        Ok(())
    }
}
