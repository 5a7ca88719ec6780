use glam::DVec3;

use crate::mesh::MeshTopology;

/// Decides intersection between two convex, 2-manifold [`MeshTopology`]
/// instances via the Separating Axis Theorem, pruning edge-pair axes with
/// the Gauss-map (Minkowski-face) test so that only the
/// `O(|E_A| + |E_B|)`-ish subset of edge pairs that can actually
/// contribute a separating axis gets projected, instead of the full
/// `O(|E_A| · |E_B|)`.
///
/// Holds borrowed references to both bodies for the duration of a hit
/// test; the two [`MeshTopology`]s must outlive the tester.
pub struct SatTester<'a> {
    a: &'a MeshTopology,
    b: &'a MeshTopology,
    num_chunks: u32,
}

impl<'a> SatTester<'a> {
    /// Builds a tester for `a` and `b`, batching axis projection into
    /// `num_chunks` chunks. `num_chunks` is purely a performance knob —
    /// [`SatTester::hit_test`]'s result is identical for any value ≥ 1 — and
    /// is clamped to 1 if given 0.
    pub fn new(a: &'a MeshTopology, b: &'a MeshTopology, num_chunks: u32) -> Self {
        Self {
            a,
            b,
            num_chunks: num_chunks.max(1),
        }
    }

    /// Returns `true` if the two polytopes intersect, including merely
    /// touching (equal projection bounds on every axis).
    pub fn hit_test(&self) -> bool {
        let axes = self.build_axes();
        if axes.is_empty() {
            return true;
        }

        let num_chunks = self.num_chunks as usize;
        let chunk_size = ((axes.len() + num_chunks - 1) / num_chunks).max(1);

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            axes.par_chunks(chunk_size)
                .all(|chunk| !chunk_has_separating_axis(chunk, self.a, self.b))
        }
        #[cfg(not(feature = "parallel"))]
        {
            axes.chunks(chunk_size)
                .all(|chunk| !chunk_has_separating_axis(chunk, self.a, self.b))
        }
    }

    /// Builds the full candidate-axis set: every face normal of `a`, every
    /// face normal of `b`, and every edge-pair cross product that passes
    /// the Minkowski-face test. Axes are left unnormalized — the
    /// projection-interval comparison is scale-invariant.
    fn build_axes(&self) -> Vec<DVec3> {
        let mut axes = Vec::with_capacity(
            self.a.face_normals().len() + self.b.face_normals().len(),
        );
        axes.extend_from_slice(self.a.face_normals());
        axes.extend_from_slice(self.b.face_normals());
        axes.extend(edge_pair_axes(self.a, self.b));
        axes
    }
}

/// The edge-pair cross-product axes of `a` and `b` that survive the
/// Gauss-map (Minkowski-face) test.
fn edge_pair_axes(a: &MeshTopology, b: &MeshTopology) -> Vec<DVec3> {
    let mut axes = Vec::new();
    for (i, &(p1, p2)) in a.edges().iter().enumerate() {
        let edge_a = a.vertices()[p1] - a.vertices()[p2];
        let (ga, gb) = a.edge_gauss_map()[i];

        for (j, &(q1, q2)) in b.edges().iter().enumerate() {
            let edge_b = b.vertices()[q1] - b.vertices()[q2];
            let (gc, gd) = b.edge_gauss_map()[j];

            if is_minkowski_face(ga, gb, gc, gd) {
                axes.push(edge_a.cross(edge_b));
            }
        }
    }
    axes
}

/// The three-scalar-triple-product Gauss-map overlap test: the arc from
/// `a` to `b` on S² crosses the arc from `c` to `d` on B's antipodal Gauss
/// image iff all three signs hold.
fn is_minkowski_face(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> bool {
    let bxa = b.cross(a);
    let dxc = d.cross(c);

    let cba = c.dot(bxa);
    let dba = d.dot(bxa);
    let adc = a.dot(dxc);
    let bdc = b.dot(dxc);

    cba * dba < 0.0 && adc * bdc < 0.0 && cba * bdc > 0.0
}

fn chunk_has_separating_axis(chunk: &[DVec3], a: &MeshTopology, b: &MeshTopology) -> bool {
    chunk.iter().any(|axis| axis_separates(*axis, a, b))
}

fn axis_separates(axis: DVec3, a: &MeshTopology, b: &MeshTopology) -> bool {
    let (min_a, max_a) = project(axis, a.vertices());
    let (min_b, max_b) = project(axis, b.vertices());
    max_a < min_b || max_b < min_a
}

fn project(axis: DVec3, verts: &[DVec3]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in verts {
        let p = axis.dot(*v);
        min = min.min(p);
        max = max.max(p);
    }
    (min, max)
}
