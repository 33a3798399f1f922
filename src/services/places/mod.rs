//! Places directory capability
//!
//! The engine talks to the external places directory only through the
//! [`PlacesDirectory`] trait. A concrete HTTP client lives in [`google`];
//! tests inject in-memory implementations.
//!
//! Transport failures come back as `Err(PlacesError)`. Anything the provider
//! itself answered (including a rejection) comes back as `Ok` with a
//! [`DirectoryStatus`] so callers can classify the outcome per stage.

pub mod google;

use async_trait::async_trait;

use crate::error::PlacesError;
use crate::models::place::RawPlace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryStatus {
    Ok,
    ZeroResults,
    RequestDenied,
    Other(String),
}

impl DirectoryStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => DirectoryStatus::Ok,
            "ZERO_RESULTS" => DirectoryStatus::ZeroResults,
            "REQUEST_DENIED" => DirectoryStatus::RequestDenied,
            other => DirectoryStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DirectoryStatus::Ok => "OK",
            DirectoryStatus::ZeroResults => "ZERO_RESULTS",
            DirectoryStatus::RequestDenied => "REQUEST_DENIED",
            DirectoryStatus::Other(status) => status,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, DirectoryStatus::Ok)
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryResponse<T> {
    pub status: DirectoryStatus,
    pub payload: T,
}

impl<T> DirectoryResponse<T> {
    pub fn new(status: DirectoryStatus, payload: T) -> Self {
        Self { status, payload }
    }
}

impl<T: Default> DirectoryResponse<T> {
    pub fn with_status(status: DirectoryStatus) -> Self {
        Self {
            status,
            payload: T::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceField {
    Name,
    PlaceId,
    FormattedAddress,
    Rating,
    Photos,
    Geometry,
    Types,
}

impl PlaceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceField::Name => "name",
            PlaceField::PlaceId => "place_id",
            PlaceField::FormattedAddress => "formatted_address",
            PlaceField::Rating => "rating",
            PlaceField::Photos => "photos",
            PlaceField::Geometry => "geometry",
            PlaceField::Types => "types",
        }
    }

    pub fn join(fields: &[PlaceField]) -> String {
        fields
            .iter()
            .map(PlaceField::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub const SEARCH_FIELDS: &[PlaceField] = &[
    PlaceField::Name,
    PlaceField::PlaceId,
    PlaceField::FormattedAddress,
    PlaceField::Rating,
    PlaceField::Photos,
    PlaceField::Geometry,
    PlaceField::Types,
];

pub const DETAIL_FIELDS: &[PlaceField] = SEARCH_FIELDS;

/// Image bytes relayed from the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacePhoto {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub const RESOLVE_FIELDS: &[PlaceField] = &[
    PlaceField::Name,
    PlaceField::PlaceId,
    PlaceField::FormattedAddress,
    PlaceField::Geometry,
];

#[async_trait]
pub trait PlacesDirectory: Send + Sync {
    async fn text_search(
        &self,
        query: &str,
        fields: &[PlaceField],
    ) -> Result<DirectoryResponse<Vec<RawPlace>>, PlacesError>;

    async fn get_details(
        &self,
        place_id: &str,
        fields: &[PlaceField],
    ) -> Result<DirectoryResponse<Option<RawPlace>>, PlacesError>;

    async fn find_place_from_query(
        &self,
        query: &str,
        fields: &[PlaceField],
    ) -> Result<DirectoryResponse<Vec<RawPlace>>, PlacesError>;

    /// Photo bytes for a reference handed out in a place's photo link.
    async fn fetch_photo(&self, reference: &str, _max_width: u32) -> Result<PlacePhoto, PlacesError> {
        Err(PlacesError::Configuration(format!(
            "photo '{}' is not available from this directory",
            reference
        )))
    }
}
