//! Variant catalog: preset table and descriptor derivation.
//!
//! A [`VariantPreset`] is a named query-string transformation understood by
//! the image API. [`build_variants`] turns a base image URL plus a preset
//! table into one [`VariantDescriptor`] per preset, in table order, with the
//! size left unknown until the enrichment stage fills it in.
//!
//! Everything in this module is synchronous and side-effect free.

mod catalog;
mod preset;

pub use catalog::{
    base_format, build_default_variants, build_variants, derive_format, VariantDescriptor,
    FALLBACK_FORMAT,
};
pub use preset::{default_presets, VariantPreset};
