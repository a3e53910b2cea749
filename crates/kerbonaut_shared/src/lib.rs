//! # Kerbonaut Shared
//!
//! Common types used by the config parser, the asset loader and the host context.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER touch the filesystem. If a type needs I/O, it
//! belongs in `kerbonaut_config` or `kerbonaut_assets`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    AVAILABLE_SHADERS, CONFIG_FILE_NAME, DEFAULT_BONE, DEFAULT_MESH, DEFAULT_SHADER,
    DEFAULT_TEXTURE, MODELS_DIR, MOD_DIR, TEXTURE_DIR,
};
pub use math::{Bounds, Color, Vec2, Vec3};
