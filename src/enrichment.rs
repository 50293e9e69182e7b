//! Enrichment pipeline: fill in descriptor sizes with concurrent probes.
//!
//! [`EnrichmentPipeline::enrich`] runs in two phases. First every probe is
//! issued at once and the pipeline waits for all of them to settle. Then the
//! shared token is checked a single time: if it was cancelled, every probe
//! result is discarded and the input is returned untouched, so a caller that
//! cancelled never observes a partially enriched sequence.

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::probe::{ProbeOutcome, SizeProbe};
use crate::variants::{build_variants, VariantDescriptor, VariantPreset};

/// Composes the variant catalog with a [`SizeProbe`].
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = EnrichmentPipeline::new(HttpSizeProbe::default());
/// let token = CancellationToken::new();
/// let variants = pipeline
///     .build_and_enrich("https://images.example.net/photo.jpg", &default_presets(), &token)
///     .await;
/// ```
pub struct EnrichmentPipeline<P> {
    probe: P,
}

impl<P: SizeProbe> EnrichmentPipeline<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Probe every descriptor concurrently and attach the measured sizes.
    ///
    /// Output order matches input order regardless of completion order. If
    /// `cancel` is cancelled by the time all probes have settled, `descriptors`
    /// is returned unchanged. Never fails; individual probe failures leave
    /// that entry's size unknown.
    pub async fn enrich(
        &self,
        descriptors: Vec<VariantDescriptor>,
        cancel: &CancellationToken,
    ) -> Vec<VariantDescriptor> {
        let outcomes = self.probe_all(&descriptors, cancel).await;

        if cancel.is_cancelled() {
            info!(
                variants = descriptors.len(),
                "Enrichment cancelled; discarding probe results"
            );
            return descriptors;
        }

        let measured = outcomes.iter().filter(|o| o.is_measured()).count();
        debug!(
            variants = descriptors.len(),
            measured, "Enrichment complete"
        );

        descriptors
            .iter()
            .zip(&outcomes)
            .map(|(descriptor, outcome)| descriptor.with_size(outcome.kib()))
            .collect()
    }

    /// Build descriptors for `base` from `presets`, then [`enrich`](Self::enrich) them.
    pub async fn build_and_enrich(
        &self,
        base: &str,
        presets: &[VariantPreset],
        cancel: &CancellationToken,
    ) -> Vec<VariantDescriptor> {
        let descriptors = build_variants(base, presets);
        self.enrich(descriptors, cancel).await
    }

    async fn probe_all(
        &self,
        descriptors: &[VariantDescriptor],
        cancel: &CancellationToken,
    ) -> Vec<ProbeOutcome> {
        let probes = descriptors
            .iter()
            .map(|descriptor| self.probe.probe_size(descriptor.url(), cancel));
        join_all(probes).await
    }
}
