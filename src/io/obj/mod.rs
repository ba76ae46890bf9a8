use std::fmt::Debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::core::mesh::builder::{self, MeshBuilder};
use crate::core::mesh::Mesh;
use crate::core::shared::NdVector;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to load the OBJ file: {0}")]
    LoadError(#[from] tobj::LoadError),
    #[error("Mesh Builder Error: {0}")]
    MeshBuilderError(#[from] builder::Err),
    #[error("Model '{model}' has a normal index {index} out of range.")]
    NormalIndexOutOfRange { model: String, index: usize },
}

/// Loads every model of an OBJ file into a single triangle mesh. Faces are triangulated, and
/// vertices are indexed by position only, so that texture or normal seams do not split them.
/// If the file has normals, each vertex gets the average of the normals its corners refer to.
pub fn load_obj<P: AsRef<Path> + Debug>(path: P) -> Result<Mesh, Err> {
    let op = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path.as_ref(), &op)?;

    let mut positions = Vec::new();
    let mut faces = Vec::new();
    let mut normal_sums = Vec::new();
    let mut has_normals = true;
    for model in &models {
        let mesh = &model.mesh;
        let offset = positions.len();
        positions.extend(
            mesh.positions.chunks_exact(3)
                .map(|x| NdVector::from([x[0] as f64, x[1] as f64, x[2] as f64]))
        );
        faces.extend(
            mesh.indices.chunks_exact(3)
                .map(|x| [x[0] as usize + offset, x[1] as usize + offset, x[2] as usize + offset])
        );

        normal_sums.resize(positions.len(), NdVector::<3, f64>::zero());
        if mesh.normals.is_empty() || mesh.normal_indices.len() != mesh.indices.len() {
            has_normals = false;
            continue;
        }
        for (&v, &n) in mesh.indices.iter().zip(&mesh.normal_indices) {
            let n = n as usize;
            let normal = mesh.normals.get(3 * n..3 * n + 3)
                .ok_or_else(|| Err::NormalIndexOutOfRange { model: model.name.clone(), index: n })?;
            if let Some(sum) = normal_sums.get_mut(v as usize + offset) {
                *sum += NdVector::from([normal[0] as f64, normal[1] as f64, normal[2] as f64]);
            }
        }
    }
    debug!(models = models.len(), vertices = positions.len(), triangles = faces.len(), has_normals, "loaded OBJ");

    let mut builder = MeshBuilder::new();
    builder
        .set_positions(positions)
        .set_faces(faces);
    if has_normals && !models.is_empty() {
        builder.set_normals(
            normal_sums.into_iter()
                .map(|n| n.normalize().unwrap_or(n))
                .collect()
        );
    }
    Ok(builder.build()?)
}

/// Writes 'mesh' as `v` and `vn` lines followed by `f` lines that use the same index for the
/// position and the normal.
pub fn write_obj<P: AsRef<Path> + Debug>(path: P, mesh: &Mesh) -> Result<(), Err> {
    let mut file_writer = BufWriter::new(File::create(path.as_ref())?);
    for point in mesh.get_positions() {
        writeln!(file_writer, "v {} {} {}", point.get(0), point.get(1), point.get(2))?;
    }
    if let Some(normals) = mesh.get_normals() {
        for normal in normals {
            writeln!(file_writer, "vn {} {} {}", normal.get(0), normal.get(1), normal.get(2))?;
        }
        for face in mesh.get_faces() {
            writeln!(file_writer, "f {0}//{0} {1}//{1} {2}//{2}", face[0] + 1, face[1] + 1, face[2] + 1)?;
        }
    } else {
        for face in mesh.get_faces() {
            writeln!(file_writer, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
        }
    }
    file_writer.flush()?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("edgebreaker-{}-{}", std::process::id(), name))
    }

    #[test]
    fn seams_do_not_split_vertices() {
        let path = temp_path("quad.obj");
        std::fs::write(&path, "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vt 0.5 0.5
vn 0 0 1
vn 0 0 -1
f 1/1/1 2/2/1 3/3/1 4/5/2
").unwrap();
        let mesh = load_obj(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.get_faces(), &[[0, 1, 2], [0, 2, 3]]);
        let normals = mesh.get_normals().unwrap();
        assert_eq!(normals[1], NdVector::from([0.0, 0.0, 1.0]));
        // vertex 3 only ever refers to the second normal
        assert_eq!(normals[3], NdVector::from([0.0, 0.0, -1.0]));
    }

    #[test]
    fn write_then_load() {
        let mut builder = MeshBuilder::new();
        builder
            .set_positions(vec![
                NdVector::from([0.0, 0.0, 0.0]),
                NdVector::from([1.5, 0.0, 0.0]),
                NdVector::from([0.0, -2.0, 0.25]),
            ])
            .set_faces(vec![[0, 1, 2]])
            .set_normals(vec![NdVector::from([0.0, 0.0, 1.0]); 3]);
        let mesh = builder.build().unwrap();

        let path = temp_path("triangle.obj");
        write_obj(&path, &mesh).unwrap();
        let loaded = load_obj(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, mesh);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(load_obj(temp_path("missing.obj")), Err(Err::LoadError(_))));
    }
}
