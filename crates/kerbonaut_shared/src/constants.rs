//! # Format Constants
//!
//! Names and paths baked into the cosmetics format.
//!
//! **CRITICAL:** Existing documents and texture packs rely on these exact
//! strings. Changing one silently breaks every installed pack.

// =============================================================================
// ASSET LOCATIONS
// =============================================================================

/// Mod directory, relative to `GameData/`.
pub const MOD_DIR: &str = "KerbonautRedux/";

/// Prefix under which the host registers this mod's textures.
pub const TEXTURE_DIR: &str = "KerbonautRedux/Textures/";

/// Directory scanned for binary geometry, relative to the application root.
pub const MODELS_DIR: &str = "GameData/KerbonautRedux/Models/";

/// File name of the customization document.
pub const CONFIG_FILE_NAME: &str = "KerbonautRedux.json";

// =============================================================================
// PIECE DEFAULTS
// =============================================================================

/// Attachment point used when a piece names none.
pub const DEFAULT_BONE: &str = "bn_upperJaw01";

/// Shader used when a piece names none, and when the host cannot find the requested one.
pub const DEFAULT_SHADER: &str = "KSP/Specular";

/// Mesh used when a piece names none.
pub const DEFAULT_MESH: &str = "ValentinaHair";

/// Diffuse texture used when a piece names none.
pub const DEFAULT_TEXTURE: &str = "valentina_hair.png";

/// Shaders the host is known to provide.
pub const AVAILABLE_SHADERS: [&str; 9] = [
    "KSP/Specular",
    "KSP/Bumped",
    "KSP/Bumped Specular",
    "KSP/Bumped Specular (Mapped)",
    "KSP/Alpha/Cutoff",
    "KSP/Alpha/Cutoff Bumped",
    "KSP/Alpha/Translucent",
    "KSP/Alpha/Translucent Specular",
    "KSP/Alpha/Unlit Transparent",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shader_is_available() {
        assert!(AVAILABLE_SHADERS.contains(&DEFAULT_SHADER));
    }

    #[test]
    fn test_texture_dir_under_mod_dir() {
        assert!(TEXTURE_DIR.starts_with(MOD_DIR));
        assert!(MODELS_DIR.contains(MOD_DIR));
    }
}
