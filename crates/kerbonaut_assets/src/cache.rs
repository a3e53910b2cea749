//! # Asset Cache
//!
//! Name -> mesh and key -> texture maps, each filled by one scan and fully
//! replaced on the next.
//!
//! ## Texture resolution
//!
//! `get_texture("foo.png")` tries, first hit wins:
//!
//! ```text
//! 1. "<prefix>foo"
//! 2. "foo"
//! 3. "foo.png"
//! ```

use std::collections::HashMap;

use kerbonaut_shared::TEXTURE_DIR;

use crate::geometry::GeometryLoader;
use crate::material::{resolve_shader, MaterialDesc, MaterialHandle, MaterialRequest, MaterialResult, RenderHost};
use crate::mesh::Mesh;
use crate::texture::{Texture, TextureStore};

/// Extensions stripped from the end of texture keys before lookup.
const TEXTURE_SUFFIXES: [&str; 2] = [".png", ".dds"];

/// Loaded meshes and textures.
#[derive(Debug)]
pub struct AssetCache {
    meshes: HashMap<String, Mesh>,
    textures: HashMap<String, Texture>,
    texture_prefix: String,
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(TEXTURE_DIR)
    }
}

impl AssetCache {
    /// Creates an empty cache resolving texture keys under `texture_prefix`.
    #[must_use]
    pub fn new(texture_prefix: impl Into<String>) -> Self {
        Self {
            meshes: HashMap::new(),
            textures: HashMap::new(),
            texture_prefix: texture_prefix.into(),
        }
    }

    /// Replaces the meshes with everything `loader` can load.
    /// Returns the number cached.
    pub fn load_meshes(&mut self, loader: &GeometryLoader) -> usize {
        self.meshes.clear();
        for mesh in loader.load_all() {
            self.meshes.insert(mesh.name().to_owned(), mesh);
        }
        tracing::info!("Loaded {} meshes from {:?}", self.meshes.len(), loader.dir());
        self.meshes.len()
    }

    /// Replaces the textures with everything resident in `store`.
    /// Returns the number cached.
    pub fn load_textures(&mut self, store: &dyn TextureStore) -> usize {
        self.textures.clear();
        for texture in store.textures() {
            self.textures.insert(texture.name.clone(), texture);
        }
        tracing::info!("Indexed {} textures", self.textures.len());
        self.textures.len()
    }

    /// Mesh by exact name.
    #[must_use]
    pub fn get_mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.get(name)
    }

    /// Texture by key, with prefix and suffix fallbacks.
    #[must_use]
    pub fn get_texture(&self, key: &str) -> Option<&Texture> {
        let bare = strip_texture_suffix(key);
        let prefixed = format!("{}{}", self.texture_prefix, bare);

        let found = self
            .textures
            .get(&prefixed)
            .or_else(|| self.textures.get(bare))
            .or_else(|| self.textures.get(key));

        if found.is_none() {
            tracing::warn!("Texture not found. Tried: '{}', '{}', '{}'", prefixed, bare, key);
        }
        found
    }

    /// Resolves the request's textures and shader and has the host build
    /// the material.
    ///
    /// # Errors
    ///
    /// Returns error if neither the requested shader nor `fallback_shader`
    /// exists in the host.
    pub fn create_material(
        &self,
        host: &mut dyn RenderHost,
        request: &MaterialRequest<'_>,
        fallback_shader: &str,
    ) -> MaterialResult<MaterialHandle> {
        let (shader, shader_name) = resolve_shader(host, request.shader, fallback_shader)?;

        let diffuse = self.get_texture(request.diffuse).map(|t| t.id);
        let normal_map = request
            .normal_map
            .filter(|key| !key.is_empty())
            .and_then(|key| self.get_texture(key))
            .map(|t| t.id);

        let desc = MaterialDesc::new(shader, shader_name, diffuse, normal_map, request.color);
        tracing::debug!(
            "Creating material: shader {}, diffuse {}, normal map {}",
            desc.shader_name,
            desc.diffuse.is_some(),
            desc.normal_map.is_some()
        );
        Ok(host.create_material(&desc))
    }

    /// Cached mesh names, sorted.
    #[must_use]
    pub fn mesh_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.meshes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of cached meshes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of cached textures.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Drops every mesh and texture.
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.textures.clear();
    }
}

fn strip_texture_suffix(key: &str) -> &str {
    TEXTURE_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix))
        .unwrap_or(key)
}
