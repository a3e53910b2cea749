//! Customization records and the pieces they attach.

use kerbonaut_shared::{Color, Vec3, DEFAULT_BONE, DEFAULT_MESH, DEFAULT_SHADER, DEFAULT_TEXTURE};

/// One attachable cosmetic mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomizationPiece {
    /// Mesh name, a key into the asset cache.
    pub mesh_name: String,
    /// Diffuse texture path.
    pub texture_path: String,
    /// Normal map path.
    pub normal_map_path: Option<String>,
    /// Tint used when the diffuse texture is missing.
    pub color: Color,
    /// Offset from the attachment point.
    pub position: Vec3,
    /// Euler rotation in degrees.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Name of the bone the piece is bound to.
    pub bone_name: String,
    /// Shader name requested from the host.
    pub shader: String,
}

impl Default for CustomizationPiece {
    fn default() -> Self {
        Self {
            mesh_name: DEFAULT_MESH.to_owned(),
            texture_path: DEFAULT_TEXTURE.to_owned(),
            normal_map_path: None,
            color: Color::WHITE,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            bone_name: DEFAULT_BONE.to_owned(),
            shader: DEFAULT_SHADER.to_owned(),
        }
    }
}

/// Sub-mesh categories of the stock model that a record can hide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HideFlags {
    /// Stock head mesh.
    pub head: bool,
    /// Stock ponytail.
    pub ponytail: bool,
    /// Eyes.
    pub eyes: bool,
    /// Teeth.
    pub teeth: bool,
    /// Tongue.
    pub tongue: bool,
}

impl HideFlags {
    /// True if any category is hidden.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.head || self.ponytail || self.eyes || self.teeth || self.tongue
    }
}

/// Body area that can carry its own texture pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyRegion {
    /// Head
    Head,
    /// Torso
    Body,
    /// Arms
    Arms,
    /// Legs
    Legs,
    /// Helmet
    Helmet,
    /// Eyes
    Eyes,
}

impl BodyRegion {
    /// Number of regions.
    pub const COUNT: usize = 6;

    /// All regions in document order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Head,
        Self::Body,
        Self::Arms,
        Self::Legs,
        Self::Helmet,
        Self::Eyes,
    ];

    /// Document key for the region's diffuse texture.
    #[must_use]
    pub const fn diffuse_key(self) -> &'static str {
        match self {
            Self::Head => "HeadDiffuse",
            Self::Body => "BodyDiffuse",
            Self::Arms => "ArmsDiffuse",
            Self::Legs => "LegsDiffuse",
            Self::Helmet => "HelmetDiffuse",
            Self::Eyes => "EyesDiffuse",
        }
    }

    /// Document key for the region's normal map.
    #[must_use]
    pub const fn normal_key(self) -> &'static str {
        match self {
            Self::Head => "HeadNormal",
            Self::Body => "BodyNormal",
            Self::Arms => "ArmsNormal",
            Self::Legs => "LegsNormal",
            Self::Helmet => "HelmetNormal",
            Self::Eyes => "EyesNormal",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Diffuse/normal override for one region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionTextures {
    /// Diffuse texture key.
    pub diffuse: Option<String>,
    /// Normal map key.
    pub normal: Option<String>,
}

/// Per-region texture overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BodyTextures {
    regions: [RegionTextures; BodyRegion::COUNT],
}

impl BodyTextures {
    /// Override for `region`.
    #[must_use]
    pub fn get(&self, region: BodyRegion) -> &RegionTextures {
        &self.regions[region.index()]
    }

    /// Replaces the override for `region`.
    pub fn set(&mut self, region: BodyRegion, textures: RegionTextures) {
        self.regions[region.index()] = textures;
    }

    /// True if any region has a diffuse override.
    #[must_use]
    pub fn any_diffuse(&self) -> bool {
        self.regions.iter().any(|r| r.diffuse.is_some())
    }
}

/// Overrides written once to the matched crew member's persistent record.
#[derive(Clone, Debug, PartialEq)]
pub struct CrewAttributes {
    /// Experience trait (profession), e.g. `Pilot`.
    pub experience_trait: Option<String>,
    /// Courage, 0.0 - 1.0.
    pub courage: f32,
    /// Stupidity, 0.0 - 1.0.
    pub stupidity: f32,
    /// Badass flag.
    pub is_badass: bool,
}

impl Default for CrewAttributes {
    fn default() -> Self {
        Self {
            experience_trait: None,
            courage: 0.5,
            stupidity: 0.5,
            is_badass: false,
        }
    }
}

/// Every cosmetic and attribute override for one named crew member.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomizationRecord {
    /// Owning crew member name, the registry key.
    pub name: String,
    /// Attached pieces, in document order.
    pub pieces: Vec<CustomizationPiece>,
    /// Single piece from top-level keys. Only set when `pieces` is empty.
    pub legacy_piece: Option<CustomizationPiece>,
    /// Stock sub-meshes to hide.
    pub hide: HideFlags,
    /// Whole-body diffuse texture.
    pub body_texture: Option<String>,
    /// Whole-body normal map.
    pub body_normal_map: Option<String>,
    /// Per-region texture overrides.
    pub body_textures: BodyTextures,
    /// Crew attribute overrides.
    pub attributes: CrewAttributes,
}

impl CustomizationRecord {
    /// Creates an empty record for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pieces to attach: the piece list, or the legacy piece when the list is empty.
    #[must_use]
    pub fn effective_pieces(&self) -> &[CustomizationPiece] {
        if self.pieces.is_empty() {
            self.legacy_piece.as_slice()
        } else {
            &self.pieces
        }
    }

    /// True if any body region carries its own diffuse texture.
    #[must_use]
    pub fn has_region_overrides(&self) -> bool {
        self.body_textures.any_diffuse()
    }
}
