//! # Kerbonaut
//!
//! Crew cosmetics for Kerbonaut Redux: customization records resolved by crew
//! name, binary hair/accessory meshes, and materials built through the host.
//!
//! ## Design Principles
//!
//! 1. **No globals** - one [`CosmeticsContext`] per host session, passed by reference
//! 2. **Total loading** - a missing or broken file is a logged default, never a panic
//! 3. **Narrow host seams** - textures, shaders and crew records are reached
//!    only through [`TextureStore`], [`RenderHost`] and [`CrewMember`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use kerbonaut::{CosmeticsContext, CosmeticsSettings};
//!
//! let settings = CosmeticsSettings::load(Path::new("kerbonaut.toml")).unwrap_or_default();
//! let mut context = CosmeticsContext::new(settings);
//! context.load(&host_textures);
//!
//! if let Some(record) = context.config("Jebediah Kerman") {
//!     for piece in record.effective_pieces() {
//!         let mesh = context.mesh(&piece.mesh_name);
//!         let material = context.create_piece_material(&mut renderer, piece)?;
//!         // attach to piece.bone_name
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod host;
pub mod settings;

pub use context::{CosmeticsContext, LoadReport};
pub use host::{apply_attributes, CrewAttribute, CrewMember};
pub use settings::{CosmeticsSettings, SettingsError, SettingsResult};

pub use kerbonaut_assets::{
    AssetCache, GeometryLoader, GeometryWriter, MaterialDesc, MaterialError, MaterialHandle, Mesh,
    RenderHost, ShaderId, Texture, TextureId, TextureStore,
};
pub use kerbonaut_config::{
    BodyRegion, ConfigRegistry, CrewAttributes, CustomizationPiece, CustomizationRecord,
    DocumentParser, HideFlags,
};
pub use kerbonaut_shared::{Bounds, Color, Vec2, Vec3, AVAILABLE_SHADERS};
