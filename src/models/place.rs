use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub const FALLBACK_ID_PREFIX: &str = "fallback-";
pub const PLACEHOLDER_ID_PREFIX: &str = "placeholder-";

/// Synthetic ids are generated locally and must never reach the directory.
pub fn is_synthetic_place_id(place_id: &str) -> bool {
    place_id.starts_with(FALLBACK_ID_PREFIX) || place_id.starts_with(PLACEHOLDER_ID_PREFIX)
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Attraction,
    Restaurant,
}

/// A latitude or longitude as handed over by the directory: either a value
/// or a zero-argument accessor.
#[derive(Clone)]
pub enum CoordinateValue {
    Plain(f64),
    Accessor(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl CoordinateValue {
    pub fn resolve(&self) -> f64 {
        match self {
            CoordinateValue::Plain(value) => *value,
            CoordinateValue::Accessor(accessor) => accessor(),
        }
    }
}

impl fmt::Debug for CoordinateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateValue::Plain(value) => write!(f, "Plain({})", value),
            CoordinateValue::Accessor(_) => write!(f, "Accessor(<fn>)"),
        }
    }
}

impl From<f64> for CoordinateValue {
    fn from(value: f64) -> Self {
        CoordinateValue::Plain(value)
    }
}

/// The closed set of shapes a photo reference can arrive in.
#[derive(Clone)]
pub enum PhotoReference {
    CallableAccessor(Arc<dyn Fn() -> Option<String> + Send + Sync>),
    DirectUrl(String),
    UrlProperty { url: Option<String> },
}

impl PhotoReference {
    pub fn resolve(&self) -> Option<String> {
        let url = match self {
            PhotoReference::CallableAccessor(accessor) => accessor(),
            PhotoReference::DirectUrl(url) => Some(url.clone()),
            PhotoReference::UrlProperty { url } => url.clone(),
        };
        url.filter(|u| !u.trim().is_empty())
    }
}

impl fmt::Debug for PhotoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoReference::CallableAccessor(_) => write!(f, "CallableAccessor(<fn>)"),
            PhotoReference::DirectUrl(url) => write!(f, "DirectUrl({})", url),
            PhotoReference::UrlProperty { url } => write!(f, "UrlProperty({:?})", url),
        }
    }
}

/// A place record exactly as the directory returned it.
#[derive(Debug, Clone, Default)]
pub struct RawPlace {
    pub name: String,
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub photos: Vec<PhotoReference>,
    pub latitude: Option<CoordinateValue>,
    pub longitude: Option<CoordinateValue>,
    pub types: Vec<String>,
}

impl RawPlace {
    pub fn new(name: impl Into<String>, place_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            place_id: Some(place_id.into()),
            ..Default::default()
        }
    }

    /// Both halves must be present for a coordinate pair.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat.resolve(), lng.resolve())),
            _ => None,
        }
    }

    pub fn photo_urls(&self) -> Vec<String> {
        self.photos.iter().filter_map(PhotoReference::resolve).collect()
    }

    pub fn address(&self) -> Option<String> {
        self.formatted_address
            .as_ref()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Candidate {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub rating: f64,
    pub photos: Vec<String>,
    pub coordinates: Option<Coordinates>,
    pub category: PlaceCategory,
    #[serde(default)]
    pub types: Vec<String>,
}

impl Candidate {
    /// Normalise a directory record. Records without a place id are dropped.
    pub fn from_raw(raw: &RawPlace, category: PlaceCategory) -> Option<Self> {
        let place_id = raw.place_id.as_ref().filter(|id| !id.trim().is_empty())?;

        Some(Self {
            place_id: place_id.clone(),
            name: raw.name.clone(),
            formatted_address: raw.address().unwrap_or_default(),
            rating: raw.rating.unwrap_or(0.0),
            photos: raw.photo_urls(),
            coordinates: raw.coordinates(),
            category,
            types: raw.types.clone(),
        })
    }

    pub fn first_photo(&self) -> Option<String> {
        self.photos.first().cloned()
    }

    pub fn is_synthetic(&self) -> bool {
        is_synthetic_place_id(&self.place_id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnrichedPlace {
    #[serde(flatten)]
    pub place: Candidate,
    pub enriched: bool,
}

impl EnrichedPlace {
    /// Candidate kept as-is (lookup skipped or failed)
    pub fn unchanged(candidate: Candidate) -> Self {
        Self {
            place: candidate,
            enriched: false,
        }
    }

    /// Detail values win when present; known candidate values are never cleared.
    pub fn merge(candidate: Candidate, detail: &RawPlace) -> Self {
        let mut place = candidate;

        let photos = detail.photo_urls();
        if !photos.is_empty() {
            place.photos = photos;
        }
        if let Some(rating) = detail.rating {
            place.rating = rating;
        }
        if let Some(address) = detail.address() {
            place.formatted_address = address;
        }
        if let Some(coordinates) = detail.coordinates() {
            place.coordinates = Some(coordinates);
        }
        if !detail.types.is_empty() {
            place.types = detail.types.clone();
        }

        Self {
            place,
            enriched: true,
        }
    }

    pub fn place_id(&self) -> &str {
        &self.place.place_id
    }

    pub fn name(&self) -> &str {
        &self.place.name
    }
}
