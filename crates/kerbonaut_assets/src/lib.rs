//! # Kerbonaut Assets
//!
//! Meshes, textures and materials for crew cosmetics.
//!
//! ## Sources
//!
//! - **Meshes** come from a models directory in the binary four-file layout
//!   (see [`geometry`]).
//! - **Textures** are not read from disk. The host already holds them and
//!   reports them through [`TextureStore`].
//! - **Materials** are built by the host through [`RenderHost`]; the cache
//!   only resolves which shader and textures to ask for.
//!
//! A failed mesh is logged and skipped. A failed texture lookup is `None`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod texture;

pub use cache::AssetCache;
pub use geometry::{GeometryError, GeometryLoader, GeometryResult, GeometryWriter};
pub use material::{
    resolve_shader, MaterialDesc, MaterialError, MaterialHandle, MaterialRequest, MaterialResult,
    RenderHost, ShaderId, BUMP_SCALE,
};
pub use mesh::Mesh;
pub use texture::{Texture, TextureId, TextureStore};
