#![allow(dead_code)]

use std::collections::HashSet;

use edgebreaker::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

pub fn mesh(positions: Vec<[f64; 3]>, faces: Vec<[usize; 3]>) -> Mesh {
    let mut builder = MeshBuilder::new();
    builder
        .set_positions(positions.into_iter().map(NdVector::from).collect())
        .set_faces(faces);
    builder.build().unwrap()
}

pub fn tetrahedron() -> Mesh {
    mesh(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    )
}

pub fn octahedron() -> Mesh {
    let positions = vec![
        [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0], [0.0, 0.0, -1.0],
    ];
    let mut faces = Vec::new();
    for (x, sx) in [(0, 1), (1, -1)] {
        for (y, sy) in [(2, 1), (3, -1)] {
            for (z, sz) in [(4, 1), (5, -1)] {
                // mirroring an odd number of axes flips the winding
                if sx * sy * sz > 0 {
                    faces.push([x, y, z]);
                } else {
                    faces.push([x, z, y]);
                }
            }
        }
    }
    mesh(positions, faces)
}

pub fn cube() -> Mesh {
    // vertex 'x + 2y + 4z' sits at '(x, y, z)'
    let positions = (0..8)
        .map(|v| [(v & 1) as f64, ((v >> 1) & 1) as f64, ((v >> 2) & 1) as f64])
        .collect();
    let quads = [[0, 2, 3, 1], [4, 5, 7, 6], [0, 1, 5, 4], [2, 6, 7, 3], [0, 4, 6, 2], [1, 3, 7, 5]];
    let faces = quads.iter()
        .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
        .collect();
    mesh(positions, faces)
}

pub fn icosahedron() -> Mesh {
    let t = (1.0 + 5_f64.sqrt()) / 2.0;
    mesh(
        vec![
            [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
            [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
            [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
        ],
        vec![
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ],
    )
}

/// Unit sphere with a vertex at each pole and 'stacks - 1' rings of 'slices' vertices.
pub fn uv_sphere(stacks: usize, slices: usize) -> Mesh {
    use std::f64::consts::PI;

    let mut positions = vec![[0.0, 1.0, 0.0]];
    for i in 1..stacks {
        let theta = PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let phi = 2.0 * PI * j as f64 / slices as f64;
            positions.push([theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()]);
        }
    }
    let south = positions.len();
    positions.push([0.0, -1.0, 0.0]);

    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + j % slices;
    let mut faces = Vec::new();
    for j in 0..slices {
        faces.push([0, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (u0, u1) = (ring(i, j), ring(i, j + 1));
            let (l0, l1) = (ring(i + 1, j), ring(i + 1, j + 1));
            faces.push([u0, l0, l1]);
            faces.push([u0, l1, u1]);
        }
    }
    for j in 0..slices {
        faces.push([ring(stacks - 1, j), south, ring(stacks - 1, j + 1)]);
    }
    mesh(positions, faces)
}

/// The closed meshes every round-trip test runs on.
pub fn closed_meshes() -> Vec<(&'static str, Mesh)> {
    vec![
        ("tetrahedron", tetrahedron()),
        ("octahedron", octahedron()),
        ("cube", cube()),
        ("icosahedron", icosahedron()),
        ("uv_sphere_4x3", uv_sphere(4, 3)),
        ("uv_sphere_16x24", uv_sphere(16, 24)),
        ("uv_sphere_40x7", uv_sphere(40, 7)),
    ]
}

/// Faces with each triangle rotated to start at its smallest vertex, sorted.
pub fn canonical_faces(faces: impl IntoIterator<Item = [usize; 3]>) -> Vec<[usize; 3]> {
    let mut out = faces.into_iter()
        .map(|f| {
            let i = (0..3).min_by_key(|&i| f[i]).unwrap();
            [f[i], f[(i + 1) % 3], f[(i + 2) % 3]]
        })
        .collect::<Vec<_>>();
    out.sort_unstable();
    out
}

/// Every ordering of '0..n'.
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for rest in permutations(n - 1) {
        for i in 0..n {
            let mut p = rest.clone();
            p.insert(i, n - 1);
            out.push(p);
        }
    }
    out
}

/// Applies up to 'count' random edge flips that keep the mesh manifold and every vertex degree
/// at least 3.
pub fn flip_edges(mesh: &Mesh, rng: &mut impl Rng, count: usize) -> Mesh {
    let mut faces = mesh.get_faces().to_vec();
    let degree = |faces: &[[usize; 3]], v: usize| {
        faces.iter()
            .filter(|f| f.contains(&v))
            .flat_map(|f| f.iter().copied())
            .filter(|&u| u != v)
            .collect::<HashSet<_>>()
            .len()
    };

    let mut flipped = 0;
    for _ in 0..20 * count {
        if flipped == count {
            break;
        }
        let f = rng.gen_range(0..faces.len());
        let k = rng.gen_range(0..3);
        let [a, b, c] = [faces[f][k], faces[f][(k + 1) % 3], faces[f][(k + 2) % 3]];
        // the face across 'a -> b' traverses 'b -> a'
        let Some((g, i)) = faces.iter()
            .enumerate()
            .find_map(|(g, h)| (0..3).find(|&i| h[i] == b && h[(i + 1) % 3] == a).map(|i| (g, i)))
        else {
            continue;
        };
        let d = faces[g][(i + 2) % 3];
        let has_edge = faces.iter().any(|h| h.contains(&c) && h.contains(&d));
        if c == d || has_edge || degree(&faces, a) <= 3 || degree(&faces, b) <= 3 {
            continue;
        }
        faces[f] = [c, a, d];
        faces[g] = [d, b, c];
        flipped += 1;
    }

    let positions = mesh.get_positions().iter().map(|p| *p.as_array()).collect();
    self::mesh(positions, faces)
}

/// Renumbers the vertices at random, shuffles the faces and rotates each face.
pub fn relabel(mesh: &Mesh, rng: &mut impl Rng) -> Mesh {
    let mut labels = (0..mesh.num_vertices()).collect::<Vec<_>>();
    labels.shuffle(rng);

    let mut positions = vec![[0.0; 3]; mesh.num_vertices()];
    for (v, p) in mesh.get_positions().iter().enumerate() {
        positions[labels[v]] = *p.as_array();
    }
    let mut faces = mesh.get_faces()
        .iter()
        .map(|f| {
            let k = rng.gen_range(0..3);
            [labels[f[k]], labels[f[(k + 1) % 3]], labels[f[(k + 2) % 3]]]
        })
        .collect::<Vec<_>>();
    faces.shuffle(rng);
    self::mesh(positions, faces)
}
