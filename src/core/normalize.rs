use crate::core::query::SearchQuery;
use crate::domain::model::{ListingRecord, RawListing};

/// Map one raw API result into the fixed output schema. Total: any field
/// the API left out degrades to the empty placeholder (strings) or an empty
/// cell (numbers), never an error.
pub fn normalize(raw: &RawListing) -> ListingRecord {
    let place = &raw.place;
    let query = SearchQuery::new(raw.area, raw.specialty);

    // International number preferred over national when both are present.
    let phone = place
        .international_phone_number
        .clone()
        .or_else(|| place.national_phone_number.clone())
        .unwrap_or_default();

    ListingRecord {
        name: place
            .display_name
            .as_ref()
            .map(|n| n.text.clone())
            .unwrap_or_default(),
        address: place.formatted_address.clone().unwrap_or_default(),
        phone,
        website: place.website_uri.clone().unwrap_or_default(),
        rating: place.rating,
        review_count: place.user_rating_count,
        specialty: query.specialty_label().to_string(),
    }
}
