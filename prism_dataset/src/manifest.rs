use std::fmt::{self, Formatter};

use crate::common::trim_line_terminator;

pub const DEFAULT_NEAR_CLIPPING_PLANE: f64 = 0.01;
pub const DEFAULT_FAR_CLIPPING_PLANE: f64 = 100.0;

const MANIFEST_HEADER: &str = "Scene Metadata File\n\n";
const LIST_IMAGES_SECTION: &str =
    "[list_images]\n<filename> <image_width> <image_height> <near_clipping_plane> <far_clipping_plane>\n";
const EXCLUDE_IMAGES_SECTION: &str = "\n\n// Always specify active/exclude images after list images\n\n[exclude_images]\n<image1_idx> <image2_idx> ... <image3_idx>\n";

/// Near and far depth bounds of a camera view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippingPlanes {
    pub near: f64,
    pub far: f64,
}

impl ClippingPlanes {
    /// Parses a `"<near> <far>"` line. Returns `None` when the line doesn't
    /// carry two floats.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let near = parts.next()?.parse().ok()?;
        let far = parts.next()?.parse().ok()?;
        Some(Self { near, far })
    }
}

impl Default for ClippingPlanes {
    fn default() -> Self {
        Self {
            near: DEFAULT_NEAR_CLIPPING_PLANE,
            far: DEFAULT_FAR_CLIPPING_PLANE,
        }
    }
}

impl fmt::Display for ClippingPlanes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.near, self.far)
    }
}

/// Selects how the lines of `clipping_planes.txt` are paired with the images.
///
/// The legacy toolchain always applied the first line of the file to every
/// image even though the format suggests one line per image. That broadcast
/// behavior stays the default so that existing datasets keep converting
/// identically; `PerImage` is the opt-in pairing by position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClippingMode {
    #[default]
    BroadcastFirst,
    PerImage,
}

impl ClippingMode {
    /// Picks the clipping planes for the image at `index` from the parsed
    /// lines, falling back to the defaults when no line is available.
    pub fn planes_for(&self, index: usize, lines: &[ClippingPlanes]) -> ClippingPlanes {
        match self {
            ClippingMode::BroadcastFirst => lines.first().copied().unwrap_or_default(),
            ClippingMode::PerImage => lines.get(index).copied().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ImageEntry {
    line: String,
    planes: ClippingPlanes,
}

/// The scene metadata document of a bundle.
///
/// Entries keep their insertion order and the composed text is deterministic,
/// so composing the same inputs twice yields byte-identical output. The
/// `[exclude_images]` section is emitted with placeholder syntax only; the
/// downstream renderer fills exclusions in manually.
#[derive(Debug, Clone, Default)]
pub struct SceneManifest {
    entries: Vec<ImageEntry>,
}

impl SceneManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an image entry. `line` is the raw line from the image list;
    /// trailing line terminators are stripped, the rest (filename plus
    /// whatever metadata follows it) is kept verbatim.
    pub fn push_image(&mut self, line: &str, planes: ClippingPlanes) {
        self.entries.push(ImageEntry {
            line: trim_line_terminator(line).to_owned(),
            planes,
        });
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Composes the full manifest text.
    pub fn compose(&self) -> String {
        let mut text = String::from(MANIFEST_HEADER);
        text.push_str(LIST_IMAGES_SECTION);
        for entry in &self.entries {
            text.push_str(&format!("{} {}\n", entry.line, entry.planes));
        }
        text.push_str(EXCLUDE_IMAGES_SECTION);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_planes_render_as_legacy_defaults() {
        assert_eq!(ClippingPlanes::default().to_string(), "0.01 100");
    }

    #[test]
    fn parse_planes() {
        let planes = ClippingPlanes::parse("0.2 150.5").unwrap();
        assert_eq!(planes, ClippingPlanes { near: 0.2, far: 150.5 });
        assert!(ClippingPlanes::parse("").is_none());
        assert!(ClippingPlanes::parse("0.2").is_none());
        assert!(ClippingPlanes::parse("near far").is_none());
    }

    #[test]
    fn broadcast_uses_first_line_for_every_index() {
        let lines = vec![ClippingPlanes { near: 0.2, far: 150.0 }];
        assert_eq!(ClippingMode::BroadcastFirst.planes_for(0, &lines), lines[0]);
        assert_eq!(ClippingMode::BroadcastFirst.planes_for(7, &lines), lines[0]);
        assert_eq!(
            ClippingMode::BroadcastFirst.planes_for(0, &[]),
            ClippingPlanes::default()
        );
    }

    #[test]
    fn per_image_pairs_by_position_with_default_fallback() {
        let lines = vec![
            ClippingPlanes { near: 0.2, far: 150.0 },
            ClippingPlanes { near: 0.4, far: 250.0 },
        ];
        assert_eq!(ClippingMode::PerImage.planes_for(0, &lines), lines[0]);
        assert_eq!(ClippingMode::PerImage.planes_for(1, &lines), lines[1]);
        assert_eq!(ClippingMode::PerImage.planes_for(2, &lines), ClippingPlanes::default());
    }

    #[test]
    fn empty_manifest_has_header_and_sections_only() {
        let manifest = SceneManifest::new();
        let expected = "Scene Metadata File\n\n\
            [list_images]\n\
            <filename> <image_width> <image_height> <near_clipping_plane> <far_clipping_plane>\n\
            \n\n\
            // Always specify active/exclude images after list images\n\
            \n\
            [exclude_images]\n\
            <image1_idx> <image2_idx> ... <image3_idx>\n";
        assert_eq!(manifest.compose(), expected);
    }

    #[test]
    fn entries_keep_insertion_order_and_metadata() {
        let mut manifest = SceneManifest::new();
        manifest.push_image("a.jpg 640 480\n", ClippingPlanes::default());
        manifest.push_image("b.jpg 800 600\n", ClippingPlanes::default());
        let text = manifest.compose();
        let a = text.find("a.jpg 640 480 0.01 100\n").unwrap();
        let b = text.find("b.jpg 800 600 0.01 100\n").unwrap();
        assert!(a < b);
    }

    #[test]
    fn composing_twice_is_byte_identical() {
        let mut manifest = SceneManifest::new();
        manifest.push_image("a.jpg 640 480", ClippingPlanes { near: 0.2, far: 150.0 });
        assert_eq!(manifest.compose(), manifest.compose());
    }
}
