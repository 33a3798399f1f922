//! Stage outcome routing
//!
//! Every directory call is classified into a [`StageOutcome`]; [`decide`]
//! maps the (stage, outcome) pair to what the pipeline does next.
//!
//! | stage  | Success / ZeroResults | Denied / NetworkError / ConfigurationMissing |
//! |--------|-----------------------|----------------------------------------------|
//! | Search | Continue              | InvokeFallback                               |
//! | Detail | Continue              | SkipLocally                                  |

use crate::error::PlacesError;
use crate::services::candidate_fetcher::{SearchOutcome, SearchResult};
use crate::services::places::DirectoryStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    ZeroResults,
    Denied,
    NetworkError,
    ConfigurationMissing,
}

impl StageOutcome {
    pub fn from_error(error: &PlacesError) -> Self {
        match error {
            PlacesError::Configuration(_) => StageOutcome::ConfigurationMissing,
            PlacesError::ProviderDenied { .. } | PlacesError::Malformed(_) => StageOutcome::Denied,
            PlacesError::Network(_) | PlacesError::Timeout(_) => StageOutcome::NetworkError,
        }
    }

    pub fn from_status(status: &DirectoryStatus) -> Self {
        match status {
            DirectoryStatus::Ok => StageOutcome::Success,
            DirectoryStatus::ZeroResults => StageOutcome::ZeroResults,
            DirectoryStatus::RequestDenied | DirectoryStatus::Other(_) => StageOutcome::Denied,
        }
    }

    pub fn from_search(result: &SearchResult) -> Self {
        match result {
            Ok(SearchOutcome::Results(_)) => StageOutcome::Success,
            Ok(SearchOutcome::ZeroResults) => StageOutcome::ZeroResults,
            Err(e) => Self::from_error(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    SkipLocally,
    InvokeFallback,
}

pub fn decide(stage: Stage, outcome: StageOutcome) -> Action {
    match (stage, outcome) {
        (_, StageOutcome::Success) | (_, StageOutcome::ZeroResults) => Action::Continue,
        (Stage::Search, _) => Action::InvokeFallback,
        (Stage::Detail, _) => Action::SkipLocally,
    }
}
