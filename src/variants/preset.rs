use serde::{Deserialize, Serialize};

/// A named, static transformation rule applied to a base image URL.
///
/// Presets are plain configuration data: the catalog never validates them,
/// and malformed `params` only affect the best-effort format label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPreset {
    /// Short human-readable name, unique within a table.
    pub label: String,
    /// Pre-encoded query fragment appended verbatim (e.g. `?w=800&fm=webp`).
    #[serde(default)]
    pub params: String,
    /// Free-text explanation for display.
    #[serde(default)]
    pub notes: String,
    /// Presentation tags passed through untouched (e.g. `image-avatar`).
    #[serde(default)]
    pub display_hints: Vec<String>,
}

impl VariantPreset {
    /// Create a preset with no display hints.
    pub fn new(
        label: impl Into<String>,
        params: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            params: params.into(),
            notes: notes.into(),
            display_hints: Vec::new(),
        }
    }

    /// Builder: attach display hints.
    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_hints = hints.into_iter().map(Into::into).collect();
        self
    }
}

/// The built-in preset table.
///
/// Callers pass this (or their own table) to
/// [`build_variants`](super::build_variants) explicitly.
pub fn default_presets() -> Vec<VariantPreset> {
    vec![
        VariantPreset::new("Original", "", "Original image format"),
        VariantPreset::new(
            "Scaled WebP",
            "?w=800&fm=webp&q=70",
            "WebP has robust browser support.",
        ),
        VariantPreset::new(
            "Scaled AVIF",
            "?w=800&fm=avif&q=50",
            "AVIF tends to be about 10-15% smaller than WebP, with slightly less browser support.",
        ),
        VariantPreset::new(
            "LQIP Preview",
            "?q=1&w=40&fm=webp",
            "LQIP (low-quality preview image) version. A CSS Blur(30px) filter has been applied.",
        )
        .with_hints(["loading-blur", "loading-fill"]),
        VariantPreset::new(
            "Crop: Face",
            "?fit=thumb&w=480&h=480&f=face&fm=webp",
            "You can use face or face(s) to easily generate thumbnails of people",
        )
        .with_hints(["image-avatar"]),
    ]
}
