use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::services::places::{PlacesDirectory, RESOLVE_FIELDS};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedDestination {
    pub name: String,
    pub formatted_address: String,
    pub place_id: Option<String>,
}

impl ResolvedDestination {
    /// Text used to anchor category searches
    pub fn anchor_text(&self) -> &str {
        if self.formatted_address.trim().is_empty() {
            &self.name
        } else {
            &self.formatted_address
        }
    }
}

/// Turns free text into canonical destinations. Never fails: provider errors
/// and cancellation both produce an empty list.
pub struct DestinationResolver;

impl DestinationResolver {
    pub async fn resolve(
        directory: &dyn PlacesDirectory,
        query: &str,
        limit: Option<usize>,
    ) -> Vec<ResolvedDestination> {
        Self::resolve_cancellable(directory, query, limit, &CancellationToken::new()).await
    }

    pub async fn resolve_cancellable(
        directory: &dyn PlacesDirectory,
        query: &str,
        limit: Option<usize>,
        cancel: &CancellationToken,
    ) -> Vec<ResolvedDestination> {
        let query = query.trim();
        if query.is_empty() || cancel.is_cancelled() {
            return Vec::new();
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                log::debug!("Destination search for '{}' cancelled", query);
                return Vec::new();
            }
            response = directory.find_place_from_query(query, RESOLVE_FIELDS) => response,
        };

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Destination search for '{}' failed: {}", query, e);
                return Vec::new();
            }
        };

        if !response.status.is_ok() {
            log::debug!(
                "Destination search for '{}' returned {}",
                query,
                response.status.as_str()
            );
            return Vec::new();
        }

        let destinations = response
            .payload
            .into_iter()
            .filter(|place| !place.name.trim().is_empty())
            .map(|place| ResolvedDestination {
                formatted_address: place.address().unwrap_or_default(),
                name: place.name,
                place_id: place.place_id.filter(|id| !id.is_empty()),
            });

        match limit {
            Some(limit) => destinations.take(limit).collect(),
            None => destinations.collect(),
        }
    }
}
