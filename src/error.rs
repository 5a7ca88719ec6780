use thiserror::Error;

/// The type of error returned during [`crate::build_hull`].
///
/// Both variants are fatal to the call: the caller receives no partial
/// hull and decides whether to retry with different input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HullError {
    /// Fewer than four input vertices were supplied; a polytope needs at
    /// least a tetrahedron to be well-defined.
    #[error("insufficient points: need at least 4, got {found}")]
    InsufficientPoints {
        /// The number of points that were actually supplied.
        found: usize,
    },
    /// The first four input vertices are exactly coplanar, so the seed
    /// tetrahedron has zero volume and no hull can be built from them.
    #[error("degenerate input: the seed tetrahedron is coplanar")]
    DegenerateInput,
}
