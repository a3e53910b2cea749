//! Textures resident in the host and the interface that enumerates them.

/// Opaque host handle for a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// A texture the host has already loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    /// Host asset name, e.g. `KerbonautRedux/Textures/valentina_hair`.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Host handle.
    pub id: TextureId,
}

impl Texture {
    /// Creates a texture entry.
    #[must_use]
    pub fn new(name: impl Into<String>, width: u32, height: u32, id: u64) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            id: TextureId(id),
        }
    }
}

/// Host asset store the texture cache is filled from.
pub trait TextureStore {
    /// Every texture currently resident.
    fn textures(&self) -> Vec<Texture>;
}

impl TextureStore for Vec<Texture> {
    fn textures(&self) -> Vec<Texture> {
        self.clone()
    }
}
