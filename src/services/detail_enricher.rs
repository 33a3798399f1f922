//! Detail enrichment
//!
//! Candidates are enriched in fixed-size batches. Lookups inside a batch run
//! concurrently; batches run one after another with a short pause in between,
//! which caps in-flight directory requests at the batch size.

use std::time::Duration;

use futures::future::join_all;

use crate::models::place::{Candidate, EnrichedPlace};
use crate::services::decision::{decide, Action, Stage, StageOutcome};
use crate::services::places::{PlacesDirectory, DETAIL_FIELDS};

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

pub struct DetailEnricher<'a> {
    directory: &'a dyn PlacesDirectory,
    config: EnrichmentConfig,
}

impl<'a> DetailEnricher<'a> {
    pub fn new(directory: &'a dyn PlacesDirectory, config: EnrichmentConfig) -> Self {
        Self { directory, config }
    }

    /// Output has the same length and order as the input.
    pub async fn enrich(&self, candidates: Vec<Candidate>) -> Vec<EnrichedPlace> {
        let batch_size = self.config.batch_size.max(1);
        let mut enriched = Vec::with_capacity(candidates.len());

        for (batch_index, batch) in candidates.chunks(batch_size).enumerate() {
            if batch_index > 0 && !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }

            let lookups = batch.iter().cloned().map(|candidate| self.enrich_one(candidate));
            enriched.extend(join_all(lookups).await);
        }

        let applied = enriched.iter().filter(|place| place.enriched).count();
        log::info!(
            "Enriched {}/{} candidates with place details",
            applied,
            enriched.len()
        );

        enriched
    }

    async fn enrich_one(&self, candidate: Candidate) -> EnrichedPlace {
        if candidate.is_synthetic() {
            return EnrichedPlace::unchanged(candidate);
        }

        let result = self
            .directory
            .get_details(&candidate.place_id, DETAIL_FIELDS)
            .await;
        let outcome = match &result {
            Ok(response) => StageOutcome::from_status(&response.status),
            Err(e) => StageOutcome::from_error(e),
        };

        match (decide(Stage::Detail, outcome), result) {
            (Action::Continue, Ok(response)) => match response.payload {
                Some(detail) if response.status.is_ok() => EnrichedPlace::merge(candidate, &detail),
                _ => EnrichedPlace::unchanged(candidate),
            },
            (_, Err(e)) => {
                log::warn!(
                    "Details lookup for {} failed: {}. Keeping search result.",
                    candidate.place_id,
                    e
                );
                EnrichedPlace::unchanged(candidate)
            }
            (_, Ok(response)) => {
                log::debug!(
                    "Details for {} returned {}, keeping search result",
                    candidate.place_id,
                    response.status.as_str()
                );
                EnrichedPlace::unchanged(candidate)
            }
        }
    }
}
