//! imgvariants - image variant sizing
//!
//! Derives transformed variant URLs for a base image from a preset table and
//! measures each variant's payload size with `HEAD` probes, so variants can
//! be compared without downloading them.
//!
//! - [`variants`] -- preset table and pure descriptor derivation.
//! - [`probe`] -- cancellable size probes.
//! - [`enrichment`] -- concurrent fan-out that attaches sizes.
//! - [`config`] -- TOML configuration.

pub mod config;
pub mod enrichment;
pub mod error;
pub mod probe;
pub mod variants;

pub use enrichment::EnrichmentPipeline;
pub use error::{Error, Result};
pub use probe::{HttpSizeProbe, ProbeOutcome, ProbeSettings, SizeProbe, UnknownReason};
pub use variants::{
    base_format, build_default_variants, build_variants, default_presets, derive_format,
    VariantDescriptor, VariantPreset,
};
