//! # Cosmetics Context
//!
//! Owns the config registry and the asset cache for one host session.
//!
//! ## Lifecycle
//!
//! ```text
//! startup:  CosmeticsContext::new(settings) -> load(store)
//! runtime:  config(name) -> mesh(piece.mesh_name) / create_material(...)
//! reload:   reload_configs(store)   (clear + repopulate everything)
//! shutdown: drop
//! ```
//!
//! Access is single-threaded. A host that queries from several threads
//! wraps the context in its own lock.

use std::path::PathBuf;

use kerbonaut_assets::{
    AssetCache, GeometryLoader, MaterialHandle, MaterialRequest, MaterialResult, Mesh, RenderHost,
    Texture, TextureStore,
};
use kerbonaut_config::{ConfigRegistry, CustomizationPiece, CustomizationRecord, DocumentParser};
use kerbonaut_shared::Color;

use crate::host::{apply_attributes, CrewMember};
use crate::settings::CosmeticsSettings;

/// Counts from one load pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    /// Document path that was tried.
    pub config_path: PathBuf,
    /// Records in the registry.
    pub configs: usize,
    /// Meshes cached.
    pub meshes: usize,
    /// Textures indexed.
    pub textures: usize,
    /// True if the registry holds the built-in record.
    pub used_fallback: bool,
}

/// Registry and asset cache for crew cosmetics.
#[derive(Debug)]
pub struct CosmeticsContext {
    settings: CosmeticsSettings,
    parser: DocumentParser,
    registry: ConfigRegistry,
    assets: AssetCache,
}

impl CosmeticsContext {
    /// Creates an empty context. Nothing is read until [`Self::load`].
    #[must_use]
    pub fn new(settings: CosmeticsSettings) -> Self {
        let parser = DocumentParser::new(settings.texture_prefix.clone());
        let assets = AssetCache::new(settings.texture_prefix.clone());
        Self {
            settings,
            parser,
            registry: ConfigRegistry::new(),
            assets,
        }
    }

    /// Startup load of meshes, textures and configs.
    pub fn load(&mut self, store: &dyn TextureStore) -> LoadReport {
        let report = self.populate(store);
        tracing::info!(
            "Cosmetics loaded: {} configs, {} meshes, {} textures",
            report.configs,
            report.meshes,
            report.textures
        );
        report
    }

    /// Drops everything and loads it again from the same sources.
    pub fn reload_configs(&mut self, store: &dyn TextureStore) -> LoadReport {
        tracing::info!("Reloading configs, meshes, and textures...");
        let report = self.populate(store);
        tracing::info!(
            "Reload complete: {} configs, {} meshes, {} textures",
            report.configs,
            report.meshes,
            report.textures
        );
        report
    }

    fn populate(&mut self, store: &dyn TextureStore) -> LoadReport {
        self.assets.clear();
        self.registry.clear();

        let textures = self.assets.load_textures(store);
        let meshes = self
            .assets
            .load_meshes(&GeometryLoader::new(self.settings.models_path()));

        let config_path = self.settings.resolve_config_path();
        let configs = self.registry.load(&config_path, &self.parser);

        LoadReport {
            config_path,
            configs,
            meshes,
            textures,
            used_fallback: self.registry.used_fallback(),
        }
    }

    /// Record for a crew member, by display name.
    #[must_use]
    pub fn config(&self, name: &str) -> Option<&CustomizationRecord> {
        self.registry.get(name)
    }

    /// Mesh by name.
    #[must_use]
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.assets.get_mesh(name)
    }

    /// Texture by key.
    #[must_use]
    pub fn texture(&self, key: &str) -> Option<&Texture> {
        self.assets.get_texture(key)
    }

    /// Builds a material through the host.
    ///
    /// # Errors
    ///
    /// Returns error if the host has neither `shader` nor the configured
    /// fallback shader.
    pub fn create_material(
        &self,
        host: &mut dyn RenderHost,
        diffuse: &str,
        normal_map: Option<&str>,
        color: Color,
        shader: &str,
    ) -> MaterialResult<MaterialHandle> {
        let request = MaterialRequest {
            diffuse,
            normal_map,
            color,
            shader,
        };
        self.assets
            .create_material(host, &request, &self.settings.fallback_shader)
    }

    /// Builds the material for one piece.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_material`].
    pub fn create_piece_material(
        &self,
        host: &mut dyn RenderHost,
        piece: &CustomizationPiece,
    ) -> MaterialResult<MaterialHandle> {
        self.create_material(
            host,
            &piece.texture_path,
            piece.normal_map_path.as_deref(),
            piece.color,
            &piece.shader,
        )
    }

    /// Writes the matching record's attribute overrides to `crew`.
    /// Returns `false` (and touches nothing) if no record matches.
    pub fn apply_crew_overrides(&self, crew: &mut dyn CrewMember) -> bool {
        let Some(record) = self.registry.get(crew.name()) else {
            return false;
        };
        tracing::debug!("Applying crew overrides from {} to {}", record.name, crew.name());
        apply_attributes(crew, &record.attributes);
        true
    }

    /// The settings in use.
    #[must_use]
    pub fn settings(&self) -> &CosmeticsSettings {
        &self.settings
    }

    /// The config registry.
    #[must_use]
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// The asset cache.
    #[must_use]
    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CrewAttribute;

    #[derive(Default)]
    struct Crew {
        name: String,
        experience_trait: String,
        courage: f32,
        stupidity: f32,
        badass: bool,
    }

    impl CrewMember for Crew {
        fn name(&self) -> &str {
            &self.name
        }

        fn set_experience_trait(&mut self, experience_trait: &str) {
            self.experience_trait = experience_trait.to_owned();
        }

        fn set_attribute(&mut self, attribute: CrewAttribute, value: f32) {
            match attribute {
                CrewAttribute::Courage => self.courage = value,
                CrewAttribute::Stupidity => self.stupidity = value,
            }
        }

        fn set_badass(&mut self, badass: bool) {
            self.badass = badass;
        }
    }

    fn empty_root() -> PathBuf {
        std::env::temp_dir().join("kerbonaut_context_no_such_root")
    }

    #[test]
    fn test_load_without_files_uses_fallback() {
        let mut context = CosmeticsContext::new(CosmeticsSettings::with_root(empty_root()));
        let report = context.load(&Vec::<Texture>::new());
        assert!(report.used_fallback);
        assert_eq!(report.configs, 1);
        assert_eq!(report.meshes, 0);
        assert_eq!(report.textures, 0);
        assert!(context.config("Valentina Kerman").is_some());
    }

    #[test]
    fn test_fallback_crew_overrides() {
        let mut context = CosmeticsContext::new(CosmeticsSettings::with_root(empty_root()));
        context.load(&Vec::<Texture>::new());

        let mut val = Crew {
            name: "Valentina Kerman".into(),
            experience_trait: "Scientist".into(),
            ..Crew::default()
        };
        assert!(context.apply_crew_overrides(&mut val));
        assert_eq!(val.experience_trait, "Pilot");
        assert_eq!(val.courage, 0.5);
        assert_eq!(val.stupidity, 0.5);
        assert!(val.badass);

        let mut bob = Crew {
            name: "Bob Kerman".into(),
            courage: 0.3,
            ..Crew::default()
        };
        assert!(!context.apply_crew_overrides(&mut bob));
        assert_eq!(bob.courage, 0.3);
    }

    #[test]
    fn test_empty_trait_is_kept() {
        let mut crew = Crew {
            name: "Bill".into(),
            experience_trait: "Engineer".into(),
            ..Crew::default()
        };
        let attributes = kerbonaut_config::CrewAttributes {
            experience_trait: Some(String::new()),
            courage: 0.9,
            stupidity: 0.1,
            is_badass: false,
        };
        apply_attributes(&mut crew, &attributes);
        assert_eq!(crew.experience_trait, "Engineer");
        assert_eq!(crew.courage, 0.9);
        assert_eq!(crew.stupidity, 0.1);
    }
}
