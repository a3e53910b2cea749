//! # Config Document Parser
//!
//! Turns a customization document into records.
//!
//! ## Document shape
//!
//! ```text
//! {"configs": [
//!     { "kerbalName": "...", "hideHead": true, "bodyTextures": { ... },
//!       "hairPieces": [ { "meshName": "...", ... }, ... ] },
//!     ...
//! ]}
//! ```
//!
//! A record without a name is skipped. A record without `hairPieces` (or with
//! a list holding no objects) gets one legacy piece built from its own
//! top-level keys. Once the list holds objects the legacy keys are ignored,
//! even if every piece is dropped.
//! Any structural failure rejects the whole document.

use kerbonaut_shared::{Color, Vec3, DEFAULT_BONE, DEFAULT_MESH, DEFAULT_SHADER, DEFAULT_TEXTURE, TEXTURE_DIR};

use crate::error::{ConfigError, ConfigResult};
use crate::lexer::{TokenBuffer, TokenKind};
use crate::record::{
    BodyRegion, BodyTextures, CrewAttributes, CustomizationPiece, CustomizationRecord, HideFlags,
    RegionTextures,
};
use crate::scalar::ObjectView;

/// Document key of the record array.
pub const CONFIGS_KEY: &str = "configs";

/// Record key of the piece array.
pub const PIECES_KEY: &str = "hairPieces";

/// Record key of the per-region texture object.
pub const BODY_TEXTURES_KEY: &str = "bodyTextures";

/// Entity name of the built-in record.
pub const FALLBACK_NAME: &str = "Valentina";

/// Parses customization documents.
#[derive(Clone, Debug)]
pub struct DocumentParser {
    texture_prefix: String,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new(TEXTURE_DIR)
    }
}

impl DocumentParser {
    /// Creates a parser that prefixes piece texture paths with `texture_prefix`.
    #[must_use]
    pub fn new(texture_prefix: impl Into<String>) -> Self {
        Self {
            texture_prefix: texture_prefix.into(),
        }
    }

    /// Parses every named record in `text`, in document order.
    ///
    /// Duplicate names are all returned; the registry keeps the last one.
    ///
    /// # Errors
    ///
    /// Returns error if the text does not lex, the root is not a closed
    /// object, the `configs` array is missing, or any element never closes.
    pub fn parse(&self, text: &str) -> ConfigResult<Vec<CustomizationRecord>> {
        let buf = TokenBuffer::new(text)?;
        let root = ObjectView::root(&buf).ok_or_else(|| unmatched_root(&buf))?;
        let configs = root
            .get_array(CONFIGS_KEY)
            .ok_or(ConfigError::MissingArray(CONFIGS_KEY))?;

        let mut records = Vec::new();
        for obj in configs.elements().objects()? {
            if let Some(record) = self.parse_record(&obj)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Builds one record, or `None` if it has no name.
    fn parse_record(&self, obj: &ObjectView<'_, '_>) -> ConfigResult<Option<CustomizationRecord>> {
        let Some(name) = obj.get_str("kerbalName") else {
            tracing::debug!("Skipping config object at byte {} without kerbalName", obj.offset());
            return Ok(None);
        };

        let mut record = CustomizationRecord::new(name);
        record.hide = HideFlags {
            head: obj.get_bool("hideHead", false),
            ponytail: obj.get_bool("hidePonytail", false),
            eyes: obj.get_bool("hideEyes", false),
            teeth: obj.get_bool("hideTeeth", false),
            tongue: obj.get_bool("hideTongue", false),
        };
        record.body_texture = obj.get_str("kerbalTexture").map(str::to_owned);
        record.body_normal_map = obj.get_str("kerbalNormalMap").map(str::to_owned);
        if let Some(body) = obj.get_object(BODY_TEXTURES_KEY) {
            record.body_textures = parse_body_textures(&body);
        }
        record.attributes = CrewAttributes {
            experience_trait: obj.get_str("trait").map(str::to_owned),
            courage: obj.get_f32("courage", 0.5),
            stupidity: obj.get_f32("stupidity", 0.5),
            is_badass: obj.get_bool("isBadass", false),
        };

        let piece_objects = match obj.get_array(PIECES_KEY) {
            Some(pieces) => pieces.elements().objects()?,
            None => Vec::new(),
        };
        for piece in &piece_objects {
            record.pieces.extend(self.parse_piece(piece));
        }

        // Legacy keys apply only when the piece list has no objects at all.
        if piece_objects.is_empty() {
            record.legacy_piece = self.parse_piece(obj);
            tracing::debug!("Config: {} -> single legacy piece", record.name);
        } else {
            tracing::debug!("Config: {} with {} pieces", record.name, record.pieces.len());
        }

        Ok(Some(record))
    }

    /// Builds one piece, or `None` if its mesh name is blank.
    fn parse_piece(&self, obj: &ObjectView<'_, '_>) -> Option<CustomizationPiece> {
        let mesh_name = obj.get_str("meshName").unwrap_or(DEFAULT_MESH).trim();
        if mesh_name.is_empty() {
            tracing::debug!("Dropping piece at byte {} with blank meshName", obj.offset());
            return None;
        }

        let normal_map = obj.get_str("normalMap").or_else(|| obj.get_str("bumpTexture"));

        Some(CustomizationPiece {
            mesh_name: mesh_name.to_owned(),
            texture_path: self.prefixed(obj.get_str("meshTexture").unwrap_or(DEFAULT_TEXTURE)),
            normal_map_path: normal_map.map(|n| self.prefixed(n)),
            color: Color::rgb(
                obj.get_f32("hairColorR", Color::HAIR.r),
                obj.get_f32("hairColorG", Color::HAIR.g),
                obj.get_f32("hairColorB", Color::HAIR.b),
            ),
            position: Vec3::new(
                obj.get_f32("posX", 0.0),
                obj.get_f32("posY", 0.05),
                obj.get_f32("posZ", 0.02),
            ),
            rotation: Vec3::new(
                obj.get_f32("rotX", 0.0),
                obj.get_f32("rotY", 0.0),
                obj.get_f32("rotZ", 0.0),
            ),
            scale: obj.get_f32("scale", 1.0),
            bone_name: obj.get_str("boneName").unwrap_or(DEFAULT_BONE).to_owned(),
            shader: obj.get_str("shader").unwrap_or(DEFAULT_SHADER).to_owned(),
        })
    }

    fn prefixed(&self, path: &str) -> String {
        format!("{}{}", self.texture_prefix, path)
    }

    /// The built-in record used when no document can be loaded.
    #[must_use]
    pub fn fallback_record(&self) -> CustomizationRecord {
        CustomizationRecord {
            legacy_piece: Some(CustomizationPiece {
                texture_path: self.prefixed(DEFAULT_TEXTURE),
                color: Color::HAIR,
                position: Vec3::new(0.0, 0.05, 0.02),
                ..CustomizationPiece::default()
            }),
            attributes: CrewAttributes {
                experience_trait: Some("Pilot".to_owned()),
                courage: 0.5,
                stupidity: 0.5,
                is_badass: true,
            },
            ..CustomizationRecord::new(FALLBACK_NAME)
        }
    }
}

/// Parses `text` with the default texture prefix.
///
/// # Errors
///
/// Same as [`DocumentParser::parse`].
pub fn parse_document(text: &str) -> ConfigResult<Vec<CustomizationRecord>> {
    DocumentParser::default().parse(text)
}

fn parse_body_textures(obj: &ObjectView<'_, '_>) -> BodyTextures {
    let mut textures = BodyTextures::default();
    for region in BodyRegion::ALL {
        textures.set(
            region,
            RegionTextures {
                diffuse: obj.get_str(region.diffuse_key()).map(str::to_owned),
                normal: obj.get_str(region.normal_key()).map(str::to_owned),
            },
        );
    }
    textures
}

fn unmatched_root(buf: &TokenBuffer<'_>) -> ConfigError {
    match buf.tokens().first() {
        Some(first) if first.kind == TokenKind::OpenBrace => ConfigError::UnmatchedBracket {
            bracket: '{',
            offset: first.start,
        },
        _ => ConfigError::MissingRoot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<CustomizationRecord> {
        parse_document(text).unwrap()
    }

    #[test]
    fn test_records_in_document_order() {
        let records = parse(
            r#"{"configs": [
                {"kerbalName": "Jebediah Kerman"},
                {"kerbalName": "Bill"},
                {"kerbalName": "Bob"}
            ]}"#,
        );
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Jebediah Kerman", "Bill", "Bob"]);
    }

    #[test]
    fn test_unnamed_records_skipped() {
        let records = parse(
            r#"{"configs": [
                {"meshName": "Orphan"},
                {"kerbalName": ""},
                {"kerbalName": "Val"}
            ]}"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Val");
    }

    #[test]
    fn test_empty_configs_array() {
        assert!(parse(r#"{"configs": []}"#).is_empty());
    }

    #[test]
    fn test_pieces_ignore_legacy_fields() {
        let records = parse(
            r#"{"configs": [{
                "kerbalName": "Val",
                "meshName": "LegacyHair",
                "hairPieces": [
                    {"meshName": "Bun", "shader": "KSP/Bumped", "normalMap": "bun_n.png"},
                    {"meshName": "Fringe", "bumpTexture": "fringe_n.png", "scale": 2},
                    {"meshName": "Braid", "boneName": "bn_neck01", "posX": 0.5, "rotY": 90}
                ]
            }]}"#,
        );
        let record = &records[0];
        assert!(record.legacy_piece.is_none());
        let names: Vec<_> = record.pieces.iter().map(|p| p.mesh_name.as_str()).collect();
        assert_eq!(names, vec!["Bun", "Fringe", "Braid"]);

        assert_eq!(record.pieces[0].shader, "KSP/Bumped");
        assert_eq!(
            record.pieces[0].normal_map_path.as_deref(),
            Some("KerbonautRedux/Textures/bun_n.png")
        );
        assert_eq!(
            record.pieces[1].normal_map_path.as_deref(),
            Some("KerbonautRedux/Textures/fringe_n.png")
        );
        assert_eq!(record.pieces[1].scale, 2.0);
        assert_eq!(record.pieces[2].bone_name, "bn_neck01");
        assert_eq!(record.pieces[2].position, Vec3::new(0.5, 0.05, 0.02));
        assert_eq!(record.pieces[2].rotation, Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_legacy_piece_defaults() {
        let records = parse(r#"{"configs": [{"kerbalName": "Val"}]}"#);
        let record = &records[0];
        assert!(record.pieces.is_empty());
        let piece = record.legacy_piece.as_ref().unwrap();
        assert_eq!(piece.mesh_name, "ValentinaHair");
        assert_eq!(piece.texture_path, "KerbonautRedux/Textures/valentina_hair.png");
        assert_eq!(piece.bone_name, "bn_upperJaw01");
        assert_eq!(piece.shader, "KSP/Specular");
        assert_eq!(piece.position, Vec3::new(0.0, 0.05, 0.02));
        assert_eq!(piece.rotation, Vec3::ZERO);
        assert_eq!(piece.scale, 1.0);
        assert_eq!(piece.color, Color::rgb(0.2, 0.15, 0.1));
        assert!(piece.normal_map_path.is_none());
        assert_eq!(record.effective_pieces().len(), 1);
    }

    #[test]
    fn test_legacy_piece_from_top_level() {
        let records = parse(
            r#"{"configs": [{
                "kerbalName": "Val", "hairPieces": [],
                "meshName": "Mohawk", "meshTexture": "mohawk.dds",
                "hairColorR": 1.0, "hairColorG": 0, "hairColorB": 0.5
            }]}"#,
        );
        let piece = records[0].legacy_piece.as_ref().unwrap();
        assert_eq!(piece.mesh_name, "Mohawk");
        assert_eq!(piece.texture_path, "KerbonautRedux/Textures/mohawk.dds");
        assert_eq!(piece.color, Color::new(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn test_blank_mesh_name_dropped() {
        let records = parse(
            r#"{"configs": [{"kerbalName": "Val", "hairPieces": [
                {"meshName": "   "}, {"meshName": "Bun"}
            ]}]}"#,
        );
        assert_eq!(records[0].pieces.len(), 1);
        assert_eq!(records[0].pieces[0].mesh_name, "Bun");
    }

    #[test]
    fn test_all_pieces_dropped_no_legacy() {
        let records = parse(
            r#"{"configs": [{"kerbalName": "Val", "meshName": "Bun", "hairPieces": [
                {"meshName": "  "}
            ]}]}"#,
        );
        let record = &records[0];
        assert!(record.pieces.is_empty());
        assert!(record.legacy_piece.is_none());
        assert!(record.effective_pieces().is_empty());
    }

    #[test]
    fn test_hide_flags_and_body_textures() {
        let records = parse(
            r#"{"configs": [{
                "kerbalName": "Val",
                "hideHead": true, "hideTongue": true,
                "kerbalTexture": "val_body.png", "kerbalNormalMap": "val_body_n.png",
                "bodyTextures": {
                    "HeadDiffuse": "head.png", "HeadNormal": "head_n.png",
                    "EyesDiffuse": "eyes.png"
                }
            }]}"#,
        );
        let record = &records[0];
        assert!(record.hide.head && record.hide.tongue);
        assert!(!record.hide.ponytail && !record.hide.eyes && !record.hide.teeth);
        assert_eq!(record.body_texture.as_deref(), Some("val_body.png"));
        assert_eq!(record.body_normal_map.as_deref(), Some("val_body_n.png"));

        let head = record.body_textures.get(BodyRegion::Head);
        assert_eq!(head.diffuse.as_deref(), Some("head.png"));
        assert_eq!(head.normal.as_deref(), Some("head_n.png"));
        assert_eq!(record.body_textures.get(BodyRegion::Eyes).diffuse.as_deref(), Some("eyes.png"));
        assert!(record.body_textures.get(BodyRegion::Legs).diffuse.is_none());
        assert!(record.has_region_overrides());
    }

    #[test]
    fn test_crew_attributes() {
        let records = parse(
            r#"{"configs": [
                {"kerbalName": "Val", "trait": "Scientist", "courage": 0.9, "stupidity": 0.1, "isBadass": true},
                {"kerbalName": "Bob"}
            ]}"#,
        );
        let val = &records[0].attributes;
        assert_eq!(val.experience_trait.as_deref(), Some("Scientist"));
        assert_eq!(val.courage, 0.9);
        assert_eq!(val.stupidity, 0.1);
        assert!(val.is_badass);
        assert_eq!(records[1].attributes, CrewAttributes::default());
    }

    #[test]
    fn test_braces_in_strings_do_not_break_split() {
        let records = parse(
            r#"{"configs": [
                {"kerbalName": "Weird {name}", "shader": "a]b"},
                {"kerbalName": "Normal"}
            ]}"#,
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Weird {name}");
    }

    #[test]
    fn test_custom_texture_prefix() {
        let records = DocumentParser::new("Packs/")
            .parse(r#"{"configs": [{"kerbalName": "Val"}]}"#)
            .unwrap();
        assert_eq!(
            records[0].legacy_piece.as_ref().unwrap().texture_path,
            "Packs/valentina_hair.png"
        );
    }

    #[test]
    fn test_missing_configs_array() {
        let result = DocumentParser::default().parse(r#"{"records": []}"#);
        assert!(matches!(result, Err(ConfigError::MissingArray("configs"))));
    }

    #[test]
    fn test_root_not_object() {
        let result = DocumentParser::default().parse(r#"["configs"]"#);
        assert!(matches!(result, Err(ConfigError::MissingRoot)));
    }

    #[test]
    fn test_unbalanced_record_rejects_document() {
        let result = DocumentParser::default().parse(
            r#"{"configs": [
                {"kerbalName": "Broken", "hideHead": true ,
                {"kerbalName": "Fine"}
            ]}"#,
        );
        assert!(matches!(result, Err(ConfigError::UnmatchedBracket { bracket: '{', offset: 0 })));
    }

    #[test]
    fn test_unterminated_string_rejects_document() {
        let result = DocumentParser::default().parse(r#"{"configs": [{"kerbalName": "Jeb}]}"#);
        assert!(matches!(result, Err(ConfigError::UnterminatedString(_))));
    }

    #[test]
    fn test_fallback_record() {
        let record = DocumentParser::default().fallback_record();
        assert_eq!(record.name, "Valentina");
        assert!(record.pieces.is_empty());
        let piece = record.legacy_piece.as_ref().unwrap();
        assert_eq!(piece.mesh_name, "ValentinaHair");
        assert_eq!(piece.texture_path, "KerbonautRedux/Textures/valentina_hair.png");
        assert_eq!(piece.color, Color::HAIR);
        assert_eq!(record.attributes.experience_trait.as_deref(), Some("Pilot"));
        assert!(record.attributes.is_badass);
    }
}
