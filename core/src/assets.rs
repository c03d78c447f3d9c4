use crate::catalog::category_by_key;
use crate::error::AssetError;
use crate::urlenc::encode_component;

pub const PLACEHOLDER_WIDTH: u32 = 600;
pub const PLACEHOLDER_HEIGHT: u32 = 400;

/// Maps a category key plus filename to a concrete asset URL under a base.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    base: String,
}

impl AssetResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn resolve(&self, category: &str, filename: &str) -> Result<String, AssetError> {
        let entry = category_by_key(category)
            .ok_or_else(|| AssetError::UnknownCategory(category.to_string()))?;
        Ok(format!("{}/{}/{}", self.base, entry.folder, filename))
    }
}

/// Inline SVG placeholder as a data URL, so the page never shows the
/// broken-image glyph while the real asset is pending or failed.
pub fn placeholder_data_url(width: u32, height: u32) -> String {
    let cx = width as f64 * 0.5;
    let cy = height as f64 * 0.45;
    let r = (width.min(height) as f64 * 0.12).max(8.0);
    let label_y = height as f64 * 0.82;
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' \
         viewBox='0 0 {width} {height}'>\
         <rect width='100%' height='100%' fill='#f6f1f7'/>\
         <circle cx='{cx:.0}' cy='{cy:.0}' r='{r:.0}' fill='#d9c2dd'/>\
         <circle cx='{left:.0}' cy='{cy:.0}' r='{petal:.0}' fill='#e8d8ea'/>\
         <circle cx='{right:.0}' cy='{cy:.0}' r='{petal:.0}' fill='#e8d8ea'/>\
         <text x='{cx:.0}' y='{label_y:.0}' text-anchor='middle' \
         font-family='sans-serif' font-size='{font:.0}' fill='#9a7da0'>Floristería</text>\
         </svg>",
        left = cx - r * 1.4,
        right = cx + r * 1.4,
        petal = r * 0.7,
        font = (height as f64 * 0.08).max(10.0),
    );
    format!("data:image/svg+xml;charset=utf-8,{}", encode_component(&svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_joins_base_folder_and_filename() {
        let resolver = AssetResolver::new("assets/");
        let url = resolver.resolve("ramos-elegantes", "Ramo1.png").unwrap();
        assert_eq!(url, "assets/ramos-elegantes/Ramo1.png");
    }

    #[test]
    fn unknown_category_is_an_error() {
        let resolver = AssetResolver::new("assets");
        let err = resolver.resolve("no-such-category", "x.png").unwrap_err();
        assert!(err.to_string().contains("no-such-category"));
    }

    #[test]
    fn placeholder_is_an_svg_data_url() {
        let url = placeholder_data_url(600, 400);
        assert!(url.starts_with("data:image/svg+xml"));
        assert!(!url.contains('<'), "markup must be percent-encoded");
    }
}
