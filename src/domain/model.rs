use crate::utils::error::FinderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pune neighborhoods the search is scoped to. Closed set so a bad area
/// cannot reach the Places client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    Aundh,
    Baner,
    Wakad,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Aundh, Area::Baner, Area::Wakad];

    /// The form the Places query uses, e.g. "Aundh, Pune".
    pub fn label(&self) -> &'static str {
        match self {
            Area::Aundh => "Aundh, Pune",
            Area::Baner => "Baner, Pune",
            Area::Wakad => "Wakad, Pune",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Area::Aundh => "aundh",
            Area::Baner => "baner",
            Area::Wakad => "wakad",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Area {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Area::ALL
            .iter()
            .find(|a| normalized == a.slug() || normalized == a.label().to_lowercase())
            .copied()
            .ok_or_else(|| FinderError::InvalidInput {
                field: "area".to_string(),
                value: s.to_string(),
                reason: format!(
                    "expected one of: {}",
                    Area::ALL.map(|a| a.slug()).join(", ")
                ),
            })
    }
}

/// Medical specialties the search can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    Cardiologist,
    Dermatologist,
    Neurologist,
    Oncologist,
    GeneralSurgeon,
    Orthopedic,
    Neurosurgeon,
    Pediatrician,
    Gynecologist,
    Psychiatrist,
}

impl Specialty {
    pub const ALL: [Specialty; 10] = [
        Specialty::Cardiologist,
        Specialty::Dermatologist,
        Specialty::Neurologist,
        Specialty::Oncologist,
        Specialty::GeneralSurgeon,
        Specialty::Orthopedic,
        Specialty::Neurosurgeon,
        Specialty::Pediatrician,
        Specialty::Gynecologist,
        Specialty::Psychiatrist,
    ];

    /// Lowercase term used inside the text query, e.g. "general surgeon".
    pub fn query_term(&self) -> &'static str {
        match self {
            Specialty::Cardiologist => "cardiologist",
            Specialty::Dermatologist => "dermatologist",
            Specialty::Neurologist => "neurologist",
            Specialty::Oncologist => "oncologist",
            Specialty::GeneralSurgeon => "general surgeon",
            Specialty::Orthopedic => "orthopedic",
            Specialty::Neurosurgeon => "neurosurgeon",
            Specialty::Pediatrician => "pediatrician",
            Specialty::Gynecologist => "gynecologist",
            Specialty::Psychiatrist => "psychiatrist",
        }
    }

    /// Title-case form written into the Specialty column.
    pub fn title(&self) -> &'static str {
        match self {
            Specialty::Cardiologist => "Cardiologist",
            Specialty::Dermatologist => "Dermatologist",
            Specialty::Neurologist => "Neurologist",
            Specialty::Oncologist => "Oncologist",
            Specialty::GeneralSurgeon => "General Surgeon",
            Specialty::Orthopedic => "Orthopedic",
            Specialty::Neurosurgeon => "Neurosurgeon",
            Specialty::Pediatrician => "Pediatrician",
            Specialty::Gynecologist => "Gynecologist",
            Specialty::Psychiatrist => "Psychiatrist",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_term())
    }
}

impl FromStr for Specialty {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Specialty::ALL
            .iter()
            .find(|sp| normalized == sp.query_term())
            .copied()
            .ok_or_else(|| FinderError::InvalidInput {
                field: "specialty".to_string(),
                value: s.to_string(),
                reason: format!(
                    "expected one of: {}",
                    Specialty::ALL.map(|sp| sp.query_term()).join(", ")
                ),
            })
    }
}

/// One normalized listing row. String fields use "" as the placeholder for
/// anything the API did not return; numeric fields stay empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub specialty: String,
}

/// One raw search hit, still in API shape, tagged with the query that
/// produced it.
#[derive(Debug, Clone)]
pub struct RawListing {
    pub area: Area,
    pub specialty: Option<Specialty>,
    pub place: PlaceDetails,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<ListingRecord>,
    pub workbook: Vec<u8>,
}

// ---- Places API (v1) wire types ----
// Every field is optional: a sparse payload must deserialize, missing data
// degrades to placeholders later in the normalizer.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<LocalizedText>,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    #[serde(rename = "userRatingCount")]
    pub user_rating_count: Option<u64>,
}

impl PlaceSummary {
    /// Promote a search hit to the details shape when the per-place details
    /// lookup is skipped. Fields only the details call returns stay empty.
    pub fn into_details(self) -> PlaceDetails {
        PlaceDetails {
            id: self.id,
            display_name: self.display_name,
            formatted_address: self.formatted_address,
            rating: self.rating,
            user_rating_count: self.user_rating_count,
            ..PlaceDetails::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<LocalizedText>,
    #[serde(rename = "formattedAddress")]
    pub formatted_address: Option<String>,
    #[serde(rename = "websiteUri")]
    pub website_uri: Option<String>,
    #[serde(rename = "nationalPhoneNumber")]
    pub national_phone_number: Option<String>,
    #[serde(rename = "internationalPhoneNumber")]
    pub international_phone_number: Option<String>,
    pub rating: Option<f64>,
    #[serde(rename = "userRatingCount")]
    pub user_rating_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub places: Vec<PlaceSummary>,
}
