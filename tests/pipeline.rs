mod common;

use edgebreaker::encode::connectivity::edgebreaker::Err as CompressErr;
use edgebreaker::eval::closest_vertex;
use edgebreaker::prelude::*;

use common::*;

fn config(quantization_bits: u8, password: Option<&str>) -> encode::Config {
    encode::Config {
        quantization_bits,
        password: password.map(str::to_owned),
        ..encode::Config::default()
    }
}

fn decode_config(password: Option<&str>) -> decode::Config {
    decode::Config { password: password.map(str::to_owned) }
}

/// A unit sphere whose normals are its positions.
fn sphere_with_normals() -> Mesh {
    let sphere = uv_sphere(16, 24);
    let mut builder = MeshBuilder::new();
    builder
        .set_positions(sphere.get_positions().to_vec())
        .set_faces(sphere.get_faces().to_vec())
        .set_normals(sphere.get_positions().to_vec());
    builder.build().unwrap()
}

#[test]
fn encode_decode() {
    let sphere = uv_sphere(16, 24);
    let buffer = encode(&sphere, &config(12, None)).unwrap();
    let decoded = decode(&buffer, &decode_config(None)).unwrap();

    assert_eq!(MeshStats::of(&decoded), MeshStats::of(&sphere));
    assert_eq!(decoded.get_normals().map(<[_]>::len), Some(sphere.num_vertices()));

    // half a grid step per axis, with some slack for the f32 bounds
    let tolerance = 2.0 * 2.0 / 2047.0;
    assert!(hausdorff_distance(&sphere, &decoded) < tolerance);
    assert!(hausdorff_distance(&decoded, &sphere) < tolerance);
}

#[test]
fn coarse_quantization_keeps_connectivity() {
    let cube = cube();
    for bits in [2, 4, 15] {
        let buffer = encode(&cube, &config(bits, None)).unwrap();
        let decoded = decode(&buffer, &decode_config(None)).unwrap();
        assert_eq!(MeshStats::of(&decoded), MeshStats::of(&cube), "{} bits", bits);
    }
}

#[test]
fn normals_survive() {
    let sphere = sphere_with_normals();
    let buffer = encode(&sphere, &config(12, None)).unwrap();
    let decoded = decode(&buffer, &decode_config(None)).unwrap();

    // each decoded normal is the Fibonacci point closest to the position of its vertex
    let normals = decoded.get_normals().unwrap();
    for (p, n) in decoded.get_positions().iter().zip(normals) {
        assert!((*p - *n).norm() < 0.02, "{:?} vs {:?}", p, n);
        let original = closest_vertex(&sphere, *p).unwrap();
        assert!((sphere.get_positions()[original] - *n).norm() < 0.02);
    }
}

#[test]
fn bytes_round_trip() {
    let sphere = sphere_with_normals();
    let buffer = encode(&sphere, &config(10, None)).unwrap();
    let bytes = buffer.to_bytes();
    assert_eq!(bytes.len(), (buffer.len() + 7) / 8);

    let from_bytes = decode(&Buffer::from_bytes(bytes), &decode_config(None)).unwrap();
    assert_eq!(from_bytes, decode(&buffer, &decode_config(None)).unwrap());
}

#[test]
fn password() {
    let sphere = sphere_with_normals();
    let plain = encode(&sphere, &config(12, None)).unwrap();
    let scrambled = encode(&sphere, &config(12, Some("hunter2"))).unwrap();
    assert_eq!(plain.len(), scrambled.len());
    assert_ne!(plain, scrambled);

    let expected = decode(&plain, &decode_config(None)).unwrap();
    let decoded = decode(&scrambled, &decode_config(Some("hunter2"))).unwrap();
    assert_eq!(decoded, expected);

    // the header is left in the clear, so a wrong password still parses but rebuilds something else
    assert_ne!(decode(&scrambled, &decode_config(Some("hunter3"))), Ok(expected.clone()));
    assert_ne!(decode(&scrambled, &decode_config(None)), Ok(expected));
}

#[test]
fn invalid_inputs() {
    let sphere = uv_sphere(16, 24);
    for bits in [0, 16] {
        assert_eq!(
            encode(&sphere, &config(bits, None)),
            Err(encode::Err::InvalidQuantizationBits(bits))
        );
    }

    let disc = mesh(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
        vec![[0, 1, 2], [0, 2, 3]],
    );
    assert_eq!(
        encode(&disc, &config(10, None)),
        Err(encode::Err::ConnectivityError(CompressErr::OpenMesh { boundary_edges: 4 }))
    );

    let buffer = encode(&sphere, &config(10, None)).unwrap();
    let truncated = Buffer::from_bytes(buffer.to_bytes()[..20].to_vec());
    assert!(matches!(
        decode(&truncated, &decode_config(None)),
        Err(decode::Err::HeaderError(_))
    ));
}

#[test]
fn obj_pipeline() {
    let dir = std::env::temp_dir().join(format!("edgebreaker-pipeline-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("icosahedron.obj");
    let output = dir.join("decoded.obj");

    write_obj(&input, &icosahedron()).unwrap();
    let mesh = preprocess(load_obj(&input).unwrap());
    let decoded = decode(&encode(&mesh, &config(14, None)).unwrap(), &decode_config(None)).unwrap();
    write_obj(&output, &decoded).unwrap();

    let reloaded = load_obj(&output).unwrap();
    assert_eq!(MeshStats::of(&reloaded), MeshStats::of(&icosahedron()));
    assert!(reloaded.get_normals().is_some());
    assert!(hausdorff_distance(&icosahedron(), &reloaded) < 1e-3);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn every_tetrahedron_labeling() {
    // corner-of-a-cube positions push the parallelogram predictions up to two grid widths away
    let positions = [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let faces = tetrahedron().get_faces().to_vec();

    for labels in permutations(4) {
        let mut relabeled = vec![[0.0; 3]; 4];
        for (v, p) in positions.iter().enumerate() {
            relabeled[labels[v]] = *p;
        }
        let tetrahedron = mesh(relabeled, faces.iter().map(|f| f.map(|v| labels[v])).collect());

        let buffer = encode(&tetrahedron, &config(10, None))
            .unwrap_or_else(|e| panic!("{:?}: {}", labels, e));
        let decoded = decode(&buffer, &decode_config(None)).unwrap();

        assert_eq!(MeshStats::of(&decoded), MeshStats::of(&tetrahedron), "{:?}", labels);
        assert!(hausdorff_distance(&tetrahedron, &decoded) < 1e-6, "{:?}", labels);
        assert!(hausdorff_distance(&decoded, &tetrahedron) < 1e-6, "{:?}", labels);
    }
}

#[test]
fn vertices_sharing_a_grid_cell_are_merged() {
    // the face [1, 2, 3] of a tetrahedron split around a point that lands in the cell of vertex 1
    let mut positions = tetrahedron().get_positions().iter().map(|p| *p.as_array()).collect::<Vec<_>>();
    let [x, y, z] = positions[1];
    positions.push([x + 1e-6, y - 1e-6, z + 1e-6]);
    let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 4], [2, 3, 4], [3, 1, 4]];
    let split = mesh(positions, faces);

    let buffer = encode(&split, &config(10, None)).unwrap();
    let decoded = decode(&buffer, &decode_config(None)).unwrap();

    assert_eq!(MeshStats::of(&decoded), MeshStats::of(&tetrahedron()));
    assert_eq!(decoded.get_normals().map(<[_]>::len), Some(4));
    assert!(hausdorff_distance(&split, &decoded) < 2.0 * 2.0 / 511.0);
}

#[test]
fn single_triangle() {
    let triangle = mesh(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], vec![[0, 1, 2]]);
    let buffer = encode(&triangle, &config(10, None)).unwrap();
    let decoded = decode(&buffer, &decode_config(None)).unwrap();

    assert_eq!(MeshStats::of(&decoded), MeshStats::of(&triangle));
    assert!(hausdorff_distance(&triangle, &decoded) < 1e-6);
}
