//! # collide3d
//!
//! The computational-geometry core of a small 3D collision-detection
//! toolkit: incremental convex hull construction and Separating Axis
//! Theorem (SAT) intersection testing for convex polyhedra.
//!
//! Two algorithms do the hard work:
//!
//! - [`build_hull`] constructs a [`MeshTopology`] that is the convex hull
//!   of an input point cloud, by incremental visibility insertion
//!   (Quickhull-style).
//! - [`SatTester`] decides whether two such hulls intersect, using face
//!   normals and Gauss-map-pruned edge-pair axes.
//!
//! Mesh file I/O, visualization, mesh preprocessing, and CLI argument
//! parsing are deliberately outside this crate — see the crate's
//! companion design notes for the collaborator interfaces they are
//! expected to implement against [`MeshTopology`].
//!
//! ## References
//!
//! - C. Bradford Barber et al. 1996. [The Quickhull Algorithm for Convex Hulls](https://www.cise.ufl.edu/~ungor/courses/fall06/papers/QuickHull.pdf)
//! - Dirk Gregorius. GDC 2013. [The Separating Axis Test Between Convex Polyhedra](https://box2d.org/files/ErinCatto_SeparatingAxisTest_GDC2013.pdf)

#![warn(missing_docs, clippy::all)]

mod error;
mod hull;
mod mesh;
mod sat;
mod util;

pub use error::HullError;
pub use hull::build_hull;
pub use mesh::{Edge, Face, MeshTopology, Vertex};
pub use sat::SatTester;
