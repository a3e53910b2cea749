//! # Binary Geometry Files
//!
//! Loader and writer for the four-file mesh layout.
//!
//! ## File Layout
//!
//! ```text
//! <mesh>.vtx   positions   u32 count, count x [f32; 3]   (required)
//! <mesh>.tex   UVs         u32 count, count x [f32; 2]   (optional, empty if absent)
//! <mesh>.nml   normals     u32 count, count x [f32; 3]   (optional, recomputed if absent)
//! <mesh>.idx   triangles   u32 count, count x i32        (required)
//! ```
//!
//! Everything is little-endian. Bytes past the last record are ignored.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kerbonaut_assets::GeometryLoader;
//!
//! let loader = GeometryLoader::new("GameData/KerbonautRedux/Models/");
//! for mesh in loader.load_all() {
//!     println!("{}: {} triangles", mesh.name(), mesh.triangle_count());
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use kerbonaut_shared::{Vec2, Vec3};
use thiserror::Error;

use crate::mesh::Mesh;

/// Position file extension.
pub const VERTEX_EXT: &str = "vtx";
/// UV file extension.
pub const UV_EXT: &str = "tex";
/// Normal file extension.
pub const NORMAL_EXT: &str = "nml";
/// Index file extension.
pub const INDEX_EXT: &str = "idx";

/// Size of the leading record count.
const HEADER_SIZE: usize = 4;

/// Errors loading or writing one mesh.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// A geometry file could not be read or written.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A required file is absent.
    #[error("missing required file {0:?}")]
    MissingFile(PathBuf),

    /// The file holds fewer records than its header claims.
    #[error("{path:?} claims {expected} records but holds {found}")]
    Truncated {
        /// File involved.
        path: PathBuf,
        /// Count from the header.
        expected: usize,
        /// Whole records actually present.
        found: usize,
    },

    /// UV count is neither zero nor the vertex count.
    #[error("mesh '{mesh}': {vertices} vertices but {uvs} UVs")]
    UvMismatch {
        /// Mesh name.
        mesh: String,
        /// Vertex count.
        vertices: usize,
        /// UV count.
        uvs: usize,
    },

    /// Normal count differs from the vertex count.
    #[error("mesh '{mesh}': {vertices} vertices but {normals} normals")]
    NormalMismatch {
        /// Mesh name.
        mesh: String,
        /// Vertex count.
        vertices: usize,
        /// Normal count.
        normals: usize,
    },

    /// Index count is not a multiple of three.
    #[error("mesh '{mesh}': {indices} indices do not form whole triangles")]
    PartialTriangle {
        /// Mesh name.
        mesh: String,
        /// Index count.
        indices: usize,
    },

    /// An index is negative or past the last vertex.
    #[error("mesh '{mesh}': index {index} out of range for {vertices} vertices")]
    IndexOutOfRange {
        /// Mesh name.
        mesh: String,
        /// Offending index.
        index: i32,
        /// Vertex count.
        vertices: usize,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

fn io_error(path: &Path, source: std::io::Error) -> GeometryError {
    GeometryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// =============================================================================
// LOADER
// =============================================================================

/// Reads meshes from a models directory.
#[derive(Clone, Debug)]
pub struct GeometryLoader {
    dir: PathBuf,
}

impl GeometryLoader {
    /// Creates a loader over `dir`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The models directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Mesh names with a position file in the directory, sorted.
    #[must_use]
    pub fn list_meshes(&self) -> Vec<String> {
        let mut names = Vec::new();

        if let Ok(entries) = fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == VERTEX_EXT) {
                    if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(name.to_string());
                    }
                }
            }
        }

        names.sort();
        names
    }

    /// Loads one mesh by name.
    ///
    /// # Errors
    ///
    /// Returns error if the position or index file is missing, any present
    /// file is unreadable or truncated, or the arrays fail validation.
    pub fn load(&self, name: &str) -> GeometryResult<Mesh> {
        let vertices = read_records(&self.required(name, VERTEX_EXT)?, 12, read_vec3)?;
        let indices = read_records(&self.required(name, INDEX_EXT)?, 4, |b| read_i32(b, 0))?;

        let uv_path = self.file(name, UV_EXT);
        let uvs = if uv_path.exists() {
            read_records(&uv_path, 8, |b| Vec2::new(read_f32(b, 0), read_f32(b, 4)))?
        } else {
            Vec::new()
        };

        let normal_path = self.file(name, NORMAL_EXT);
        let normals = if normal_path.exists() {
            Some(read_records(&normal_path, 12, read_vec3)?)
        } else {
            None
        };

        Mesh::new(name, vertices, uvs, normals, indices)
    }

    /// Loads every mesh in the directory. Failures are logged and skipped.
    #[must_use]
    pub fn load_all(&self) -> Vec<Mesh> {
        if !self.dir.is_dir() {
            tracing::warn!("Models directory not found: {:?}", self.dir);
            return Vec::new();
        }

        let mut meshes = Vec::new();
        for name in self.list_meshes() {
            match self.load(&name) {
                Ok(mesh) => {
                    tracing::debug!(
                        "Loaded mesh {}: {} vertices, {} triangles",
                        name,
                        mesh.vertices().len(),
                        mesh.triangle_count()
                    );
                    meshes.push(mesh);
                }
                Err(e) => tracing::warn!("Failed to load mesh {}: {}", name, e),
            }
        }
        meshes
    }

    fn file(&self, name: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{name}.{ext}"))
    }

    fn required(&self, name: &str, ext: &str) -> GeometryResult<PathBuf> {
        let path = self.file(name, ext);
        if path.exists() {
            Ok(path)
        } else {
            Err(GeometryError::MissingFile(path))
        }
    }
}

/// Reads a count-prefixed array of fixed-size records.
fn read_records<T>(
    path: &Path,
    record_size: usize,
    decode: impl Fn(&[u8]) -> T,
) -> GeometryResult<Vec<T>> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;

    let body_len = bytes.len().saturating_sub(HEADER_SIZE);
    let found = body_len / record_size;
    if bytes.len() < HEADER_SIZE {
        return Err(GeometryError::Truncated {
            path: path.to_path_buf(),
            expected: 0,
            found,
        });
    }

    let expected = read_u32(&bytes, 0) as usize;
    if expected > found {
        return Err(GeometryError::Truncated {
            path: path.to_path_buf(),
            expected,
            found,
        });
    }

    let body = &bytes[HEADER_SIZE..HEADER_SIZE + expected * record_size];
    Ok(body.chunks_exact(record_size).map(decode).collect())
}

fn read_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn read_i32(b: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn read_f32(b: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn read_vec3(b: &[u8]) -> Vec3 {
    Vec3::new(read_f32(b, 0), read_f32(b, 4), read_f32(b, 8))
}

// =============================================================================
// WRITER
// =============================================================================

/// Writes meshes in the layout [`GeometryLoader`] reads.
#[derive(Clone, Debug)]
pub struct GeometryWriter {
    dir: PathBuf,
}

impl GeometryWriter {
    /// Creates a writer into `dir`. The directory must exist.
    #[must_use]
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Writes all four files for `mesh`. An empty UV array writes no `.tex`.
    ///
    /// # Errors
    ///
    /// Returns error if any file cannot be written.
    pub fn write(&self, mesh: &Mesh) -> GeometryResult<()> {
        self.write_vertices(mesh.name(), mesh.vertices())?;
        if !mesh.uvs().is_empty() {
            self.write_uvs(mesh.name(), mesh.uvs())?;
        }
        self.write_normals(mesh.name(), mesh.normals())?;
        let indices: Vec<i32> = mesh
            .indices()
            .iter()
            .map(|&i| i32::try_from(i).unwrap_or(i32::MAX))
            .collect();
        self.write_indices(mesh.name(), &indices)
    }

    /// Writes `<name>.vtx`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write_vertices(&self, name: &str, vertices: &[Vec3]) -> GeometryResult<()> {
        self.write_records(name, VERTEX_EXT, vertices, |v, out| {
            for c in v.to_array() {
                out.extend_from_slice(&c.to_le_bytes());
            }
        })
    }

    /// Writes `<name>.tex`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write_uvs(&self, name: &str, uvs: &[Vec2]) -> GeometryResult<()> {
        self.write_records(name, UV_EXT, uvs, |uv, out| {
            for c in uv.to_array() {
                out.extend_from_slice(&c.to_le_bytes());
            }
        })
    }

    /// Writes `<name>.nml`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write_normals(&self, name: &str, normals: &[Vec3]) -> GeometryResult<()> {
        self.write_records(name, NORMAL_EXT, normals, |n, out| {
            for c in n.to_array() {
                out.extend_from_slice(&c.to_le_bytes());
            }
        })
    }

    /// Writes `<name>.idx`.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn write_indices(&self, name: &str, indices: &[i32]) -> GeometryResult<()> {
        self.write_records(name, INDEX_EXT, indices, |i, out| {
            out.extend_from_slice(&i.to_le_bytes());
        })
    }

    fn write_records<T>(
        &self,
        name: &str,
        ext: &str,
        records: &[T],
        encode: impl Fn(&T, &mut Vec<u8>),
    ) -> GeometryResult<()> {
        let path = self.dir.join(format!("{name}.{ext}"));
        let count = u32::try_from(records.len()).unwrap_or(u32::MAX);

        let mut out = Vec::with_capacity(HEADER_SIZE + records.len() * 12);
        out.extend_from_slice(&count.to_le_bytes());
        for record in records.iter().take(count as usize) {
            encode(record, &mut out);
        }

        fs::write(&path, out).map_err(|e| io_error(&path, e))
    }
}
