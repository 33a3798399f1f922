use tokio_util::sync::CancellationToken;

use crate::error::PlacesError;
use crate::models::place::{Candidate, PlaceCategory};
use crate::services::places::{DirectoryStatus, PlacesDirectory, SEARCH_FIELDS};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<Candidate>),
    ZeroResults,
}

impl SearchOutcome {
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            SearchOutcome::Results(candidates) => candidates,
            SearchOutcome::ZeroResults => Vec::new(),
        }
    }
}

pub type SearchResult = Result<SearchOutcome, PlacesError>;

/// Map an interest tag to the phrase used in the attraction query
fn interest_phrase(interest: &str) -> Option<&'static str> {
    match interest {
        "food" | "foodie" => Some("food destinations"),
        "culture" | "cultural" => Some("cultural sites"),
        "history" | "historical" => Some("historical landmarks"),
        "nature" | "outdoors" => Some("parks and nature spots"),
        "art" | "arts" => Some("art museums and galleries"),
        "shopping" => Some("shopping districts"),
        "nightlife" => Some("nightlife spots"),
        "adventure" => Some("outdoor adventures"),
        "beach" | "beaches" => Some("beaches"),
        "family" => Some("family friendly attractions"),
        _ => None,
    }
}

pub fn attraction_query(destination: &str, interests: &[String]) -> String {
    let phrases: Vec<String> = interests
        .iter()
        .map(|interest| interest.trim())
        .filter(|interest| !interest.is_empty())
        .map(|interest| {
            interest_phrase(&interest.to_lowercase())
                .map(str::to_string)
                .unwrap_or_else(|| interest.to_string())
        })
        .collect();

    if phrases.is_empty() {
        format!("attractions in {}", destination)
    } else {
        format!("{} in {}", phrases.join(" "), destination)
    }
}

pub fn restaurant_query(destination: &str) -> String {
    format!("restaurants in {}", destination)
}

pub struct CandidateFetcher;

impl CandidateFetcher {
    /// Run one category search and classify the outcome
    pub async fn fetch(
        directory: &dyn PlacesDirectory,
        query: &str,
        category: PlaceCategory,
        cancel: &CancellationToken,
    ) -> SearchResult {
        if cancel.is_cancelled() {
            return Ok(SearchOutcome::ZeroResults);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                log::debug!("Search '{}' cancelled", query);
                return Ok(SearchOutcome::ZeroResults);
            }
            response = directory.text_search(query, SEARCH_FIELDS) => response?,
        };

        match response.status {
            DirectoryStatus::Ok => {
                let candidates: Vec<Candidate> = response
                    .payload
                    .iter()
                    .filter_map(|raw| Candidate::from_raw(raw, category))
                    .collect();
                log::info!("Search '{}' returned {} candidates", query, candidates.len());

                if candidates.is_empty() {
                    Ok(SearchOutcome::ZeroResults)
                } else {
                    Ok(SearchOutcome::Results(candidates))
                }
            }
            DirectoryStatus::ZeroResults => {
                log::info!("Search '{}' returned no results", query);
                Ok(SearchOutcome::ZeroResults)
            }
            status => Err(PlacesError::ProviderDenied {
                status: status.as_str().to_string(),
            }),
        }
    }

    /// Issue the attraction and restaurant searches concurrently
    pub async fn fetch_all(
        directory: &dyn PlacesDirectory,
        destination: &str,
        interests: &[String],
        cancel: &CancellationToken,
    ) -> (SearchResult, SearchResult) {
        let attractions_query = attraction_query(destination, interests);
        let restaurants_query = restaurant_query(destination);

        tokio::join!(
            Self::fetch(directory, &attractions_query, PlaceCategory::Attraction, cancel),
            Self::fetch(directory, &restaurants_query, PlaceCategory::Restaurant, cancel),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::RawPlace;
    use crate::services::places::{DirectoryResponse, PlaceField};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedDirectory {
        response: Result<DirectoryResponse<Vec<RawPlace>>, PlacesError>,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedDirectory {
        fn new(response: Result<DirectoryResponse<Vec<RawPlace>>, PlacesError>) -> Self {
            Self {
                response,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PlacesDirectory for ScriptedDirectory {
        async fn text_search(
            &self,
            query: &str,
            _fields: &[PlaceField],
        ) -> Result<DirectoryResponse<Vec<RawPlace>>, PlacesError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.response.clone()
        }

        async fn get_details(
            &self,
            _place_id: &str,
            _fields: &[PlaceField],
        ) -> Result<DirectoryResponse<Option<RawPlace>>, PlacesError> {
            unreachable!()
        }

        async fn find_place_from_query(
            &self,
            _query: &str,
            _fields: &[PlaceField],
        ) -> Result<DirectoryResponse<Vec<RawPlace>>, PlacesError> {
            unreachable!()
        }
    }

    #[test]
    fn test_attraction_query_mapping() {
        assert_eq!(attraction_query("Rome", &[]), "attractions in Rome");
        assert_eq!(
            attraction_query("Rome", &["food".to_string()]),
            "food destinations in Rome"
        );
        assert_eq!(
            attraction_query(
                "Rome",
                &["Food".to_string(), "vespa tours".to_string(), " ".to_string()]
            ),
            "food destinations vespa tours in Rome"
        );
        assert_eq!(restaurant_query("Rome"), "restaurants in Rome");
    }

    #[tokio::test]
    async fn test_ok_with_results() {
        let directory = ScriptedDirectory::new(Ok(DirectoryResponse::new(
            DirectoryStatus::Ok,
            vec![
                RawPlace::new("Colosseum", "colosseum"),
                RawPlace {
                    name: "No id".into(),
                    ..Default::default()
                },
            ],
        )));
        let outcome = CandidateFetcher::fetch(
            &directory,
            "attractions in Rome",
            PlaceCategory::Attraction,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        let candidates = outcome.into_candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].category, PlaceCategory::Attraction);
    }

    #[tokio::test]
    async fn test_zero_results_is_not_an_error() {
        let directory =
            ScriptedDirectory::new(Ok(DirectoryResponse::with_status(DirectoryStatus::ZeroResults)));
        let outcome = CandidateFetcher::fetch(
            &directory,
            "restaurants in Nowhere",
            PlaceCategory::Restaurant,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(outcome, Ok(SearchOutcome::ZeroResults));
    }

    #[tokio::test]
    async fn test_denied_is_classified() {
        let directory = ScriptedDirectory::new(Ok(DirectoryResponse::with_status(
            DirectoryStatus::RequestDenied,
        )));
        let outcome = CandidateFetcher::fetch(
            &directory,
            "attractions in Rome",
            PlaceCategory::Attraction,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(
            outcome,
            Err(PlacesError::ProviderDenied {
                status: "REQUEST_DENIED".into()
            })
        );
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let directory = ScriptedDirectory::new(Err(PlacesError::Timeout(10)));
        let outcome = CandidateFetcher::fetch(
            &directory,
            "attractions in Rome",
            PlaceCategory::Attraction,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(outcome, Err(PlacesError::Timeout(10)));
    }

    #[tokio::test]
    async fn test_fetch_all_issues_both_queries() {
        let directory = ScriptedDirectory::new(Ok(DirectoryResponse::new(
            DirectoryStatus::Ok,
            vec![RawPlace::new("Trattoria", "trattoria")],
        )));
        let (attractions, restaurants) = CandidateFetcher::fetch_all(
            &directory,
            "Rome",
            &["history".to_string()],
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(
            attractions.unwrap().into_candidates()[0].category,
            PlaceCategory::Attraction
        );
        assert_eq!(
            restaurants.unwrap().into_candidates()[0].category,
            PlaceCategory::Restaurant
        );

        let mut queries = directory.queries.lock().unwrap().clone();
        queries.sort();
        assert_eq!(
            queries,
            vec!["historical landmarks in Rome", "restaurants in Rome"]
        );
    }

    #[tokio::test]
    async fn test_cancelled_fetch_is_empty() {
        let directory = ScriptedDirectory::new(Err(PlacesError::Network("unreachable".into())));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = CandidateFetcher::fetch(
            &directory,
            "attractions in Rome",
            PlaceCategory::Attraction,
            &cancel,
        )
        .await;
        assert_eq!(outcome, Ok(SearchOutcome::ZeroResults));
        assert!(directory.queries.lock().unwrap().is_empty());
    }
}
