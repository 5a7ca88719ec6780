use std::collections::BTreeMap;

use glam::DVec3;

/// A point in ℝ³, referred to elsewhere by its stable index into a
/// [`MeshTopology`]'s vertex array.
pub type Vertex = DVec3;

/// Canonical identity of a [`Face`]: its three vertex indices sorted
/// ascending. Orientation is recorded separately inside the `Face` value,
/// so two faces built from the same three vertices in different winding
/// orders still collide on this key.
pub type FaceKey = [usize; 3];

/// Canonical identity of an [`Edge`]: its two vertex indices sorted
/// ascending.
pub type EdgeKey = [usize; 2];

pub(crate) fn face_key(indices: [usize; 3]) -> FaceKey {
    let mut k = indices;
    k.sort_unstable();
    k
}

pub(crate) fn edge_key(p: usize, q: usize) -> EdgeKey {
    if p < q {
        [p, q]
    } else {
        [q, p]
    }
}

/// An oriented triangle of a [`MeshTopology`].
///
/// `indices` is ordered so that, for any interior reference point of the
/// hull, the signed tetrahedron volume of `(indices, reference)` is
/// positive — the outward-normal invariant.
#[derive(Debug, Clone)]
pub struct Face {
    /// The face's vertex indices, in outward-facing (counterclockwise as
    /// seen from outside the hull) order.
    pub indices: [usize; 3],
    /// The cached outward normal. Not normalized to unit length — every
    /// consumer (containment checks, SAT axis projection) only cares about
    /// its direction and sign, which are scale-invariant.
    pub normal: DVec3,
    /// `normal · indices[0]`, i.e. the plane's signed distance from the
    /// origin along `normal`.
    pub distance_from_origin: f64,
}

/// An unordered pair of vertex indices with up to two adjacent faces.
///
/// While a hull is under construction an edge may carry only one adjacent
/// face (it sits on the current horizon); once the hull is closed every
/// surviving edge carries exactly two.
#[derive(Debug, Clone)]
pub struct Edge {
    /// One endpoint (unordered relative to `p2`).
    pub p1: usize,
    /// The other endpoint.
    pub p2: usize,
    adj_faces: Vec<FaceKey>,
}

impl Edge {
    fn new(p1: usize, p2: usize) -> Self {
        Self {
            p1,
            p2,
            adj_faces: Vec::with_capacity(2),
        }
    }

    /// The faces currently adjacent to this edge (0, 1, or 2 of them).
    pub fn adjacent_faces(&self) -> &[FaceKey] {
        &self.adj_faces
    }

    fn add_adjacent_face(&mut self, key: FaceKey) {
        if self.adj_faces.len() >= 2 {
            log::warn!(
                "TopologyViolation: edge ({}, {}) already has 2 adjacent faces, refusing to attach {:?}",
                self.p1, self.p2, key
            );
            return;
        }
        self.adj_faces.push(key);
    }

    fn remove_adjacent_face(&mut self, key: FaceKey) {
        if let Some(pos) = self.adj_faces.iter().position(|k| *k == key) {
            self.adj_faces.remove(pos);
        }
    }
}

/// An indexed triangle mesh with derived edge/adjacency bookkeeping.
///
/// A `MeshTopology` is born inside [`crate::build_hull`] and mutated only
/// by the hull builder. Once construction returns, it is frozen: SAT
/// consumes it read-only, and the only mutation a caller may still make is
/// [`MeshTopology::translate`].
#[derive(Debug, Clone)]
pub struct MeshTopology {
    vertices: Vec<Vertex>,
    faces: BTreeMap<FaceKey, Face>,
    edges: BTreeMap<EdgeKey, Edge>,
    face_normals: Vec<DVec3>,
    edge_list: Vec<(usize, usize)>,
    edge_gauss_map: Vec<(DVec3, DVec3)>,
}

impl MeshTopology {
    pub(crate) fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            faces: BTreeMap::new(),
            edges: BTreeMap::new(),
            face_normals: Vec::new(),
            edge_list: Vec::new(),
            edge_gauss_map: Vec::new(),
        }
    }

    pub(crate) fn vertex_positions(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn faces(&self) -> &BTreeMap<FaceKey, Face> {
        &self.faces
    }

    pub(crate) fn edges_map(&self) -> &BTreeMap<EdgeKey, Edge> {
        &self.edges
    }

    /// Inserts a triangle with the given (already outward-oriented)
    /// vertex indices, computing its normal and updating the adjacency of
    /// its three edges. Returns the face's canonical key.
    pub(crate) fn insert_face(&mut self, indices: [usize; 3]) -> FaceKey {
        let key = face_key(indices);
        let [a, b, c] = indices.map(|i| self.vertices[i]);
        let normal = triangle_normal(a, b, c);
        let distance_from_origin = normal.dot(a);
        self.faces.insert(
            key,
            Face {
                indices,
                normal,
                distance_from_origin,
            },
        );

        for i in 0..3 {
            let p = indices[i];
            let q = indices[(i + 1) % 3];
            let ekey = edge_key(p, q);
            self.edges
                .entry(ekey)
                .or_insert_with(|| Edge::new(p, q))
                .add_adjacent_face(key);
        }

        key
    }

    pub(crate) fn remove_face(&mut self, key: FaceKey) -> Option<Face> {
        self.faces.remove(&key)
    }

    pub(crate) fn detach_face_from_edge(&mut self, ekey: EdgeKey, fkey: FaceKey) {
        if let Some(edge) = self.edges.get_mut(&ekey) {
            edge.remove_adjacent_face(fkey);
        }
    }

    pub(crate) fn remove_edge(&mut self, key: EdgeKey) {
        self.edges.remove(&key);
    }

    /// Populates the derived arrays (`face_normals`, `edges`,
    /// `edge_gauss_map`) consumed by [`crate::SatTester`]. Called once by
    /// the hull builder after the incremental loop completes.
    pub(crate) fn finalize(&mut self) {
        self.face_normals = self.faces.values().map(|f| f.normal).collect();
        self.edge_list.clear();
        self.edge_gauss_map.clear();

        for (ekey, edge) in &self.edges {
            if edge.adj_faces.len() == 2 {
                let n0 = self.faces[&edge.adj_faces[0]].normal;
                let n1 = self.faces[&edge.adj_faces[1]].normal;
                self.edge_list.push((edge.p1, edge.p2));
                self.edge_gauss_map.push((n0, n1));
            } else {
                log::warn!(
                    "NonManifoldEdge: edge {:?} has {} adjacent face(s), excluding from Gauss map",
                    ekey,
                    edge.adj_faces.len()
                );
            }
        }
    }

    /// The axis-aligned bounding box of the vertex set, as `(min, max)`.
    pub fn bounds(&self) -> (Vertex, Vertex) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min, max)
    }

    /// Adds `t` to every vertex in place. Face/edge connectivity and the
    /// cached normals are translation-invariant and are left untouched.
    pub fn translate(&mut self, t: Vertex) {
        for v in &mut self.vertices {
            *v += t;
        }
    }

    /// The outward normal of every face (not unit length), in the mesh's
    /// internal (canonical-key) order.
    pub fn face_normals(&self) -> &[DVec3] {
        &self.face_normals
    }

    /// Every manifold edge, as an endpoint-index pair, in the same order
    /// as [`MeshTopology::edge_gauss_map`].
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edge_list
    }

    /// For each manifold edge (aligned by index with
    /// [`MeshTopology::edges`]), the pair of outward normals of its two
    /// adjacent faces — the edge's Gauss-map entry.
    pub fn edge_gauss_map(&self) -> &[(DVec3, DVec3)] {
        &self.edge_gauss_map
    }

    /// The raw vertex positions, indexed as referenced by [`Face`] and
    /// [`Edge`].
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// The outward normal of a counterclockwise-wound triangle `(a, b, c)`.
pub(crate) fn triangle_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_key_is_order_independent() {
        assert_eq!(face_key([1, 2, 3]), face_key([3, 1, 2]));
        assert_eq!(face_key([3, 2, 1]), face_key([1, 2, 3]));
    }

    #[test]
    fn edge_key_is_order_independent() {
        assert_eq!(edge_key(4, 1), edge_key(1, 4));
    }

    #[test]
    fn bounds_of_unit_cube() {
        let verts = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
        ];
        let mesh = MeshTopology::new(verts);
        let (min, max) = mesh.bounds();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::ONE);
    }

    #[test]
    fn translate_shifts_every_vertex() {
        let mut mesh = MeshTopology::new(vec![DVec3::ZERO, DVec3::ONE]);
        mesh.translate(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices()[0], DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices()[1], DVec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn insert_face_builds_edge_adjacency() {
        let mut mesh = MeshTopology::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]);
        let fkey = mesh.insert_face([0, 1, 2]);
        assert_eq!(fkey, [0, 1, 2]);
        for (p, q) in [(0, 1), (1, 2), (2, 0)] {
            let e = mesh.edges_map().get(&edge_key(p, q)).unwrap();
            assert_eq!(e.adjacent_faces(), &[fkey]);
        }
    }

    #[test]
    fn third_adjacent_face_is_refused_not_stored() {
        let mut mesh = MeshTopology::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(-1.0, 0.0, 0.0),
        ]);
        mesh.insert_face([0, 1, 2]);
        mesh.insert_face([0, 2, 1]); // shares edge (0,1) and (1,2)/(2,0) reversed
        mesh.insert_face([0, 4, 1]); // third face on edge (0,1)
        let e = mesh.edges_map().get(&edge_key(0, 1)).unwrap();
        assert_eq!(e.adjacent_faces().len(), 2);
    }
}
