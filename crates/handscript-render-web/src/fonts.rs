//! Bundled handwriting fonts and `@font-face` embedding.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::ExportError;

/// Fallback stack used after (or instead of) the page font.
pub const FALLBACK_FONT_STACK: &str = "'Comic Sans MS', 'Segoe Script', cursive, sans-serif";

/// Default cap on embedded font size.
pub const DEFAULT_MAX_FONT_BYTES: usize = 8 * 1024 * 1024;

/// Catalog entry for a bundled handwriting font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontInfo {
    /// Identifier stored in styles.
    pub name: &'static str,
    /// Human-readable family name, also used as the CSS family.
    pub display_name: &'static str,
    pub file_name: &'static str,
}

pub const AVAILABLE_FONTS: [FontInfo; 5] = [
    FontInfo {
        name: "QEBradenHill",
        display_name: "Braden Hill",
        file_name: "QEBradenHill.ttf",
    },
    FontInfo {
        name: "QEDaveMergens",
        display_name: "Dave Mergens",
        file_name: "QEDaveMergens.ttf",
    },
    FontInfo {
        name: "QEDavidReid",
        display_name: "David Reid",
        file_name: "QEDavidReid.ttf",
    },
    FontInfo {
        name: "QEDonaldRoss",
        display_name: "Donald Ross",
        file_name: "QEDonaldRoss.ttf",
    },
    FontInfo {
        name: "QERuthStafford",
        display_name: "Ruth Stafford",
        file_name: "QERuthStafford.ttf",
    },
];

pub fn font_by_name(name: &str) -> Option<&'static FontInfo> {
    AVAILABLE_FONTS.iter().find(|font| font.name == name)
}

/// CSS family for a style font: the catalog display name, or `cursive`.
pub fn css_font_family(name: &str) -> &'static str {
    font_by_name(name).map_or("cursive", |font| font.display_name)
}

/// Font file inlined as a `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    /// CSS `format()` hint, when the extension is recognized.
    pub format: Option<&'static str>,
    pub data_uri: String,
}

impl FontFace {
    /// Embed `bytes`; `path_hint` is only used to infer the format.
    pub fn from_bytes(family: impl Into<String>, path_hint: &str, bytes: &[u8]) -> Self {
        let format = font_format_from_path(path_hint);
        let mime = font_mime_type(path_hint).unwrap_or("application/octet-stream");
        Self {
            family: family.into(),
            format,
            data_uri: format!("data:{};base64,{}", mime, BASE64.encode(bytes)),
        }
    }

    /// Read and embed a font file, rejecting files over `max_bytes`.
    pub fn load(
        family: impl Into<String>,
        path: impl AsRef<Path>,
        max_bytes: usize,
    ) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if bytes.len() > max_bytes {
            return Err(ExportError::FontTooLarge {
                path: path.display().to_string(),
                bytes: bytes.len(),
                limit: max_bytes,
            });
        }
        let hint = path.to_string_lossy();
        let face = Self::from_bytes(family, &hint, &bytes);
        log::debug!(
            "embedded font '{}' from {} ({} bytes)",
            face.family,
            hint,
            bytes.len()
        );
        Ok(face)
    }

    /// `@font-face` rule for this face.
    pub fn css_rule(&self) -> String {
        let mut rule = format!(
            "@font-face {{ font-family: '{}'; src: url({})",
            css_string(&self.family),
            self.data_uri
        );
        if let Some(format) = self.format {
            rule.push_str(&format!(" format('{}')", format));
        }
        rule.push_str("; }");
        rule
    }
}

/// Full `font-family` value for `style_font`, preferring an embedded face.
pub fn font_family_stack(style_font: &str, face: Option<&FontFace>) -> String {
    if let Some(face) = face {
        return format!("'{}', {}", css_string(&face.family), FALLBACK_FONT_STACK);
    }
    match font_by_name(style_font) {
        Some(font) => format!("'{}', {}", font.display_name, FALLBACK_FONT_STACK),
        None => FALLBACK_FONT_STACK.to_string(),
    }
}

fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit(['/', '\\']).next()?;
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

fn font_format_from_path(path: &str) -> Option<&'static str> {
    let ext = extension_of(path)?;
    match ext.as_str() {
        "ttf" => Some("truetype"),
        "otf" => Some("opentype"),
        "woff" => Some("woff"),
        "woff2" => Some("woff2"),
        _ => None,
    }
}

fn font_mime_type(path: &str) -> Option<&'static str> {
    let ext = extension_of(path)?;
    match ext.as_str() {
        "woff2" => Some("font/woff2"),
        "woff" => Some("font/woff"),
        "otf" => Some("font/otf"),
        "ttf" => Some("font/ttf"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_uses_identifiers() {
        assert_eq!(
            font_by_name("QEDavidReid").map(|f| f.display_name),
            Some("David Reid")
        );
        assert!(font_by_name("David Reid").is_none());
        assert_eq!(css_font_family("QERuthStafford"), "Ruth Stafford");
        assert_eq!(css_font_family("Caveat"), "cursive");
    }

    #[test]
    fn font_format_follows_extension() {
        assert_eq!(font_format_from_path("fonts/Hand.TTF"), Some("truetype"));
        assert_eq!(font_format_from_path("hand.woff2"), Some("woff2"));
        assert_eq!(font_format_from_path("fonts.d/hand"), None);
        assert_eq!(font_mime_type("a/b/c.otf"), Some("font/otf"));
    }

    #[test]
    fn face_embeds_base64_data_uri() {
        let face = FontFace::from_bytes("Braden Hill", "QEBradenHill.ttf", b"font");
        assert_eq!(face.data_uri, "data:font/ttf;base64,Zm9udA==");
        assert_eq!(
            face.css_rule(),
            "@font-face { font-family: 'Braden Hill'; src: url(data:font/ttf;base64,Zm9udA==) format('truetype'); }"
        );
    }

    #[test]
    fn unknown_extension_still_embeds() {
        let face = FontFace::from_bytes("Mine", "hand.bin", &[0, 1]);
        assert!(face.data_uri.starts_with("data:application/octet-stream;base64,"));
        assert!(!face.css_rule().contains("format("));
    }

    #[test]
    fn family_stack_prefers_embedded_face() {
        let face = FontFace::from_bytes("Ink's Hand", "x.woff", b"x");
        assert_eq!(
            font_family_stack("QEBradenHill", Some(&face)),
            format!("'Ink\\'s Hand', {}", FALLBACK_FONT_STACK)
        );
        assert_eq!(
            font_family_stack("QEBradenHill", None),
            format!("'Braden Hill', {}", FALLBACK_FONT_STACK)
        );
        assert_eq!(font_family_stack("Caveat", None), FALLBACK_FONT_STACK);
    }

    #[test]
    fn oversized_font_files_are_rejected() {
        let path = std::env::temp_dir().join(format!(
            "handscript-font-limit-{}.ttf",
            std::process::id()
        ));
        std::fs::write(&path, [0u8; 64]).unwrap();
        let err = FontFace::load("Big", &path, 16).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            err,
            ExportError::FontTooLarge {
                bytes: 64,
                limit: 16,
                ..
            }
        ));
    }
}
