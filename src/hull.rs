use std::collections::BTreeMap;

use glam::DVec3;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::HullError;
use crate::mesh::{EdgeKey, FaceKey, MeshTopology, Vertex};
use crate::util::signed_volume;

/// Builds the convex hull of `vertices` by incremental visibility insertion
/// (Quickhull-style), following the seed-tetrahedron-then-cone-construction
/// algorithm.
///
/// `show_progress` drives a side-channel progress indicator over the
/// incremental insertion loop; it never affects which points end up on the
/// hull or how faces are wound.
///
/// # Errors
/// Returns [`HullError::InsufficientPoints`] if `vertices.len() < 4`, or
/// [`HullError::DegenerateInput`] if the first four vertices are exactly
/// coplanar.
pub fn build_hull(vertices: &[Vertex], show_progress: bool) -> Result<MeshTopology, HullError> {
    if vertices.len() < 4 {
        return Err(HullError::InsufficientPoints {
            found: vertices.len(),
        });
    }

    let mut mesh = MeshTopology::new(vertices.to_vec());
    seed_tetrahedron(&mut mesh)?;

    let bar = if show_progress {
        let bar = ProgressBar::new((vertices.len() - 4) as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} vertices inserted")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    for p in 4..vertices.len() {
        insert_vertex(&mut mesh, p);
        bar.inc(1);
    }
    bar.finish_and_clear();

    mesh.finalize();
    Ok(mesh)
}

/// Seeds the hull with the tetrahedron formed by the first four input
/// vertices (indices 0..3), orienting each of its four faces so that the
/// opposing vertex lies on the interior side.
fn seed_tetrahedron(mesh: &mut MeshTopology) -> Result<(), HullError> {
    let verts = mesh.vertex_positions().to_vec();

    for apex in 0..4usize {
        let mut face = [0usize; 3];
        let mut next = 0;
        for i in 0..4usize {
            if i != apex {
                face[next] = i;
                next += 1;
            }
        }

        let vol = signed_volume(verts[face[0]], verts[face[1]], verts[face[2]], verts[apex]);
        if vol == 0.0 {
            log::warn!(
                "DegenerateInput: seed tetrahedron ({}, {}, {}, {}) is coplanar",
                face[0], face[1], face[2], apex
            );
            return Err(HullError::DegenerateInput);
        }

        let oriented = if vol < 0.0 {
            [face[0], face[2], face[1]]
        } else {
            face
        };
        mesh.insert_face(oriented);
    }

    Ok(())
}

/// One step of the incremental algorithm: classify every current face's
/// visibility from `p`, walk the horizon, delete the visible region, and
/// cone new faces from `p` to every horizon edge.
fn insert_vertex(mesh: &mut MeshTopology, p: usize) {
    let verts = mesh.vertex_positions().to_vec();
    let point = verts[p];

    let visibility = match classify_visibility(mesh, &verts, point) {
        Some(v) => v,
        None => {
            // Coplanar with some existing face: treat p as on-boundary, skip it.
            log::debug!("CoplanarSkip: vertex {p} is coplanar with an existing face, skipping");
            return;
        }
    };

    if !visibility.values().any(|visible| *visible) {
        // Strictly interior: no face sees p, nothing to do.
        return;
    }

    let (edges_to_delete, horizon) = walk_horizon(mesh, &visibility);

    for ekey in &edges_to_delete {
        mesh.remove_edge(*ekey);
    }
    for fkey in visibility
        .iter()
        .filter_map(|(key, visible)| visible.then_some(*key))
    {
        mesh.remove_face(fkey);
    }

    for (q1, q2, invisible_key) in horizon {
        let apex = unique_vertex(mesh, invisible_key, q1, q2);
        let vol = signed_volume(verts[q1], verts[q2], point, verts[apex]);
        let oriented = if vol > 0.0 { [q1, q2, p] } else { [q1, p, q2] };
        mesh.insert_face(oriented);
    }
}

/// Computes `s(f, p)` for every current face and classifies visibility.
/// Returns `None` the instant any face yields an exact zero (p is coplanar
/// with an existing face and must be discarded per the coplanar-skip
/// policy), matching the source's early-break behavior.
fn classify_visibility(
    mesh: &MeshTopology,
    verts: &[DVec3],
    point: DVec3,
) -> Option<BTreeMap<FaceKey, bool>> {
    let mut visibility = BTreeMap::new();
    for (key, face) in mesh.faces() {
        let [a, b, c] = face.indices;
        let vol = signed_volume(verts[a], verts[b], verts[c], point);
        if vol == 0.0 {
            return None;
        }
        visibility.insert(*key, vol < 0.0);
    }
    Some(visibility)
}

/// Partitions edges into "delete" (both adjacent faces visible) and
/// "horizon" (exactly one adjacent face visible), detaching the visible
/// face from each horizon edge's adjacency along the way.
fn walk_horizon(
    mesh: &mut MeshTopology,
    visibility: &BTreeMap<FaceKey, bool>,
) -> (Vec<EdgeKey>, Vec<(usize, usize, FaceKey)>) {
    let mut to_delete = Vec::new();
    let mut horizon = Vec::new();
    let mut detach = Vec::new();

    for (ekey, edge) in mesh.edges_map() {
        let adj = edge.adjacent_faces();
        if adj.len() < 2 {
            continue; // border edge mid-construction; left untouched
        }

        let v0 = visibility[&adj[0]];
        let v1 = visibility[&adj[1]];

        if v0 && v1 {
            to_delete.push(*ekey);
        } else if v0 || v1 {
            let (visible_key, invisible_key) = if v0 { (adj[0], adj[1]) } else { (adj[1], adj[0]) };
            detach.push((*ekey, visible_key));
            horizon.push((edge.p1, edge.p2, invisible_key));
        }
        // both invisible: untouched
    }

    for (ekey, visible_key) in detach {
        mesh.detach_face_from_edge(ekey, visible_key);
    }

    (to_delete, horizon)
}

/// The vertex of face `fkey` that is not one of `q1`/`q2` — the horizon
/// edge's reference apex, which lies strictly behind the new cone face.
fn unique_vertex(mesh: &MeshTopology, fkey: FaceKey, q1: usize, q2: usize) -> usize {
    mesh.faces()[&fkey]
        .indices
        .into_iter()
        .find(|v| *v != q1 && *v != q2)
        .expect("a triangle face always has exactly one vertex outside any of its edges")
}
