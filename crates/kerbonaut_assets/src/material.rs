//! # Materials
//!
//! Material construction is delegated to the host renderer. This module only
//! decides *what* to ask for:
//!
//! 1. The requested shader, or the fallback shader if the host lacks it
//! 2. A diffuse texture with a white tint, or the flat color without one
//! 3. A normal map at bump scale 1.0 when one resolves

use kerbonaut_shared::Color;
use thiserror::Error;

use crate::texture::TextureId;

/// Bump scale applied with every normal map.
pub const BUMP_SCALE: f32 = 1.0;

/// Opaque host handle for a shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u64);

/// Opaque host handle for a created material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// Everything the host needs to build a material.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDesc {
    /// Resolved shader.
    pub shader: ShaderId,
    /// Name the shader was resolved from.
    pub shader_name: String,
    /// Main texture.
    pub diffuse: Option<TextureId>,
    /// Normal map, bound with [`Self::bump_scale`].
    pub normal_map: Option<TextureId>,
    /// Main color. White when `diffuse` is set.
    pub color: Color,
    /// Normal map strength.
    pub bump_scale: f32,
}

/// Host rendering capabilities.
pub trait RenderHost {
    /// Looks up a shader by name.
    fn find_shader(&self, name: &str) -> Option<ShaderId>;

    /// Builds a material from `desc`.
    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialHandle;
}

/// A material request in terms of texture keys and names.
#[derive(Clone, Copy, Debug)]
pub struct MaterialRequest<'a> {
    /// Diffuse texture key.
    pub diffuse: &'a str,
    /// Normal map texture key.
    pub normal_map: Option<&'a str>,
    /// Color used when the diffuse texture does not resolve.
    pub color: Color,
    /// Requested shader name.
    pub shader: &'a str,
}

/// Errors creating a material.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MaterialError {
    /// Neither the requested nor the fallback shader exists in the host.
    #[error("shader '{requested}' not found and fallback '{fallback}' unavailable")]
    NoShader {
        /// Shader the request named.
        requested: String,
        /// Fallback that was also tried.
        fallback: String,
    },
}

/// Result type for material creation.
pub type MaterialResult<T> = Result<T, MaterialError>;

/// Resolves the shader for `requested`, falling back to `fallback`.
///
/// # Errors
///
/// Returns error if the host has neither shader.
pub fn resolve_shader(
    host: &dyn RenderHost,
    requested: &str,
    fallback: &str,
) -> MaterialResult<(ShaderId, String)> {
    if let Some(id) = host.find_shader(requested) {
        return Ok((id, requested.to_owned()));
    }

    tracing::warn!("Shader '{}' not found, falling back to {}", requested, fallback);
    host.find_shader(fallback)
        .map(|id| (id, fallback.to_owned()))
        .ok_or_else(|| MaterialError::NoShader {
            requested: requested.to_owned(),
            fallback: fallback.to_owned(),
        })
}

impl MaterialDesc {
    /// Description for already-resolved textures.
    #[must_use]
    pub fn new(
        shader: ShaderId,
        shader_name: impl Into<String>,
        diffuse: Option<TextureId>,
        normal_map: Option<TextureId>,
        color: Color,
    ) -> Self {
        Self {
            shader,
            shader_name: shader_name.into(),
            diffuse,
            normal_map,
            color: if diffuse.is_some() { Color::WHITE } else { color },
            bump_scale: BUMP_SCALE,
        }
    }
}
