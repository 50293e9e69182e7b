use serde::Serialize;

use super::preset::{default_presets, VariantPreset};

/// Format label used when neither the preset nor the base URL names one.
pub const FALLBACK_FORMAT: &str = "IMAGE";

/// Query key selecting the output format in the image API.
const FORMAT_KEY: &str = "fm=";

/// One derived variant of a base image.
///
/// Identity fields are fixed at construction. Only the enrichment stage can
/// produce a copy carrying a measured size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantDescriptor {
    label: String,
    params: String,
    notes: String,
    display_hints: Vec<String>,
    format: String,
    url: String,
    size_kib: Option<f64>,
}

impl VariantDescriptor {
    fn from_preset(base: &str, preset: &VariantPreset, fallback_format: &str) -> Self {
        Self {
            label: preset.label.clone(),
            params: preset.params.clone(),
            notes: preset.notes.clone(),
            display_hints: preset.display_hints.clone(),
            format: derive_format(&preset.params, fallback_format),
            url: format!("{base}{}", preset.params),
            size_kib: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn display_hints(&self) -> &[String] {
        &self.display_hints
    }

    /// Uppercase format label, never empty.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Base URL with the preset's params appended verbatim.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Measured size in KiB, or `None` when unknown or not yet probed.
    pub fn size_kib(&self) -> Option<f64> {
        self.size_kib
    }

    /// Copy of this descriptor carrying a probe result.
    pub(crate) fn with_size(&self, size_kib: Option<f64>) -> Self {
        Self {
            size_kib,
            ..self.clone()
        }
    }
}

/// Format label implied by a preset's query fragment.
///
/// Looks for an `fm=<value>` pair introduced by `?` or `&`, where the value
/// runs up to the next `&` or the end of the fragment. Returns the value
/// uppercased, or `fallback` uppercased when no non-empty value is present.
pub fn derive_format(params: &str, fallback: &str) -> String {
    let from_params = params
        .match_indices(['?', '&'])
        .filter_map(|(idx, delim)| params[idx + delim.len()..].strip_prefix(FORMAT_KEY))
        .map(|rest| rest.split('&').next().unwrap_or_default())
        .find(|value| !value.is_empty());

    match from_params {
        Some(value) => value.to_uppercase(),
        None if fallback.is_empty() => FALLBACK_FORMAT.to_string(),
        None => fallback.to_uppercase(),
    }
}

/// Format label implied by a URL's trailing extension.
///
/// The query component is ignored. Returns [`FALLBACK_FORMAT`] when there is
/// no `.` or nothing follows the last one.
pub fn base_format(identifier: &str) -> String {
    let without_query = identifier.split('?').next().unwrap_or_default();
    match without_query.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_uppercase(),
        _ => FALLBACK_FORMAT.to_string(),
    }
}

/// Derive one descriptor per preset, in table order.
///
/// Pure and total: any string is accepted as `base`, including the empty
/// string. Each call allocates fresh descriptors.
pub fn build_variants(base: &str, presets: &[VariantPreset]) -> Vec<VariantDescriptor> {
    let fallback = base_format(base);
    presets
        .iter()
        .map(|preset| VariantDescriptor::from_preset(base, preset, &fallback))
        .collect()
}

/// [`build_variants`] over [`default_presets`].
pub fn build_default_variants(base: &str) -> Vec<VariantDescriptor> {
    build_variants(base, &default_presets())
}
