//! Viewport-width keyed asset profiles.
//!
//! The storefront publishes pre-generated size (and WebP) variants next to
//! each original, named `<stem>-<size_tag>.<ext>`. The active profile picks
//! which variant a deferred image resolves to; a resize that crosses a
//! profile boundary re-resolves already-loaded images best-effort.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakpointProfile {
    pub name: &'static str,
    pub max_width: u32,
    pub quality: u8,
    pub size_tag: &'static str,
}

pub const BREAKPOINTS: &[BreakpointProfile] = &[
    BreakpointProfile {
        name: "mobile",
        max_width: 480,
        quality: 60,
        size_tag: "sm",
    },
    BreakpointProfile {
        name: "tablet",
        max_width: 768,
        quality: 70,
        size_tag: "md",
    },
    BreakpointProfile {
        name: "desktop",
        max_width: 1200,
        quality: 80,
        size_tag: "lg",
    },
    BreakpointProfile {
        name: "wide",
        max_width: u32::MAX,
        quality: 90,
        size_tag: "xl",
    },
];

pub fn profile_for_width(width: u32) -> &'static BreakpointProfile {
    BREAKPOINTS
        .iter()
        .find(|profile| width <= profile.max_width)
        .unwrap_or(&BREAKPOINTS[BREAKPOINTS.len() - 1])
}

pub fn crossed(old_width: u32, new_width: u32) -> bool {
    profile_for_width(old_width) != profile_for_width(new_width)
}

/// Derives the sized variant URL for a source image. Data URLs and names
/// without a recognizable extension pass through unchanged.
pub fn variant_url(src: &str, profile: &BreakpointProfile, webp: bool) -> String {
    if src.starts_with("data:") {
        return src.to_string();
    }
    match src.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => {
            let ext = if webp { "webp" } else { ext };
            format!("{stem}-{}.{ext}", profile.size_tag)
        }
        _ => src.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_map_to_ordered_profiles() {
        assert_eq!(profile_for_width(320).name, "mobile");
        assert_eq!(profile_for_width(480).name, "mobile");
        assert_eq!(profile_for_width(481).name, "tablet");
        assert_eq!(profile_for_width(1024).name, "desktop");
        assert_eq!(profile_for_width(2560).name, "wide");
    }

    #[test]
    fn crossing_detects_boundary_moves_only() {
        assert!(!crossed(500, 700));
        assert!(crossed(480, 481));
        assert!(crossed(400, 1300));
    }

    #[test]
    fn variant_url_inserts_size_tag() {
        let profile = profile_for_width(700);
        assert_eq!(
            variant_url("assets/ramos-elegantes/Ramo1.png", profile, false),
            "assets/ramos-elegantes/Ramo1-md.png"
        );
        assert_eq!(
            variant_url("assets/ramos-elegantes/Ramo1.png", profile, true),
            "assets/ramos-elegantes/Ramo1-md.webp"
        );
    }

    #[test]
    fn unconvertible_sources_pass_through() {
        let profile = profile_for_width(700);
        assert_eq!(variant_url("data:image/svg+xml,abc", profile, true), "data:image/svg+xml,abc");
        assert_eq!(variant_url("assets/dir.v2/imagen", profile, false), "assets/dir.v2/imagen");
    }
}
