use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::core::shared::VertexIdx;
use super::Mesh;

/// Cleans up a mesh before compression:
/// vertices with bit-identical positions are merged, faces that became degenerate or that repeat
/// another face's vertex set are dropped, and vertices no face refers to are removed.
pub fn preprocess(mesh: Mesh) -> Mesh {
    let num_vertices = mesh.num_vertices();
    let num_faces = mesh.num_faces();

    let mesh = merge_duplicate_vertices(mesh);
    let mesh = remove_degenerate_and_duplicate_faces(mesh);
    let mesh = remove_unreferenced_vertices(mesh);

    if mesh.num_vertices() != num_vertices || mesh.num_faces() != num_faces {
        warn!(
            removed_vertices = num_vertices - mesh.num_vertices(),
            removed_faces = num_faces - mesh.num_faces(),
            "preprocessing modified the mesh"
        );
    }
    mesh
}

fn merge_duplicate_vertices(mut mesh: Mesh) -> Mesh {
    let mut first_with_position = HashMap::new();
    let remap = mesh.positions.iter()
        .enumerate()
        .map(|(v, p)| {
            let key = p.as_array().map(f64::to_bits);
            *first_with_position.entry(key).or_insert(v)
        })
        .collect::<Vec<_>>();

    for f in &mut mesh.faces {
        for v in f.iter_mut() {
            *v = remap[*v];
        }
    }
    mesh
}

fn remove_degenerate_and_duplicate_faces(mut mesh: Mesh) -> Mesh {
    let mut seen = HashSet::new();
    mesh.faces.retain(|&f| {
        if f[0] == f[1] || f[1] == f[2] || f[2] == f[0] {
            return false;
        }
        let mut key = f;
        key.sort_unstable();
        seen.insert(key)
    });
    mesh
}

fn remove_unreferenced_vertices(mut mesh: Mesh) -> Mesh {
    let mut new_idx: Vec<Option<VertexIdx>> = vec![None; mesh.positions.len()];
    let mut kept = Vec::new();
    for f in &mut mesh.faces {
        for v in f.iter_mut() {
            let old = *v;
            *v = *new_idx[old].get_or_insert_with(|| {
                kept.push(old);
                kept.len() - 1
            });
        }
    }

    mesh.positions = kept.iter().map(|&v| mesh.positions[v]).collect();
    if let Some(normals) = &mut mesh.normals {
        *normals = kept.iter().map(|&v| normals[v]).collect();
    }
    mesh
}
