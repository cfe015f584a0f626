//! Market rent estimate for landlords pricing a listing.
//!
//! Base $1,000 for a studio, plus $400 per bedroom, $200 per bathroom and flat
//! amenity premiums. ZIP codes starting with `9` carry a 20% premium, those
//! starting with `1` a 15% premium. The suggested band is ±10% of the optimal
//! price. All arithmetic is integral so the result truncates exactly.

use serde::{Deserialize, Serialize};

const BASE_RENT: u32 = 1_000;
const PER_BEDROOM: u32 = 400;
/// Per bathroom, charged in tenths so half baths price at $100.
const PER_BATHROOM_TENTH: u32 = 20;
const PARKING_PREMIUM: u32 = 150;
const POOL_PREMIUM: u32 = 100;
const GYM_PREMIUM: u32 = 100;
/// Bathroom counts above this are priced as this many.
const MAX_BATHROOMS: f32 = 20.0;

fn default_rooms() -> u8 {
    1
}

fn default_bathrooms() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentEstimateRequest {
    #[serde(default)]
    pub zip_code: String,
    #[serde(default = "default_rooms")]
    pub bedrooms: u8,
    #[serde(default = "default_bathrooms")]
    pub bathrooms: f32,
    #[serde(default)]
    pub has_parking: bool,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub has_gym: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentEstimate {
    pub optimal_price: u32,
    pub low_range: u32,
    pub high_range: u32,
}

/// Location premium in percent.
fn location_multiplier(zip_code: &str) -> u32 {
    match zip_code.trim().chars().next() {
        Some('9') => 120,
        Some('1') => 115,
        _ => 100,
    }
}

pub fn estimate_rent(request: &RentEstimateRequest) -> RentEstimate {
    let bathroom_tenths = if request.bathrooms.is_finite() && request.bathrooms > 0.0 {
        (request.bathrooms.min(MAX_BATHROOMS) * 10.0).round() as u32
    } else {
        0
    };

    let mut base = BASE_RENT
        + u32::from(request.bedrooms) * PER_BEDROOM
        + bathroom_tenths * PER_BATHROOM_TENTH;

    if request.has_parking {
        base += PARKING_PREMIUM;
    }
    if request.has_pool {
        base += POOL_PREMIUM;
    }
    if request.has_gym {
        base += GYM_PREMIUM;
    }

    let optimal_price = base * location_multiplier(&request.zip_code) / 100;

    RentEstimate {
        optimal_price,
        low_range: optimal_price * 90 / 100,
        high_range: optimal_price * 110 / 100,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(zip_code: &str, bedrooms: u8, bathrooms: f32) -> RentEstimateRequest {
        RentEstimateRequest {
            zip_code: zip_code.to_string(),
            bedrooms,
            bathrooms,
            has_parking: false,
            has_pool: false,
            has_gym: false,
        }
    }

    #[test]
    fn midwest_two_bedroom_has_no_premium() {
        let estimate = estimate_rent(&request("50309", 2, 1.0));
        assert_eq!(
            estimate,
            RentEstimate {
                optimal_price: 2_000,
                low_range: 1_800,
                high_range: 2_200,
            }
        );
    }

    #[test]
    fn west_coast_premium_applies_after_amenities() {
        let mut req = request("94110", 2, 1.5);
        req.has_parking = true;
        let estimate = estimate_rent(&req);
        // (1000 + 800 + 300 + 150) * 1.2
        assert_eq!(estimate.optimal_price, 2_700);
        assert_eq!(estimate.low_range, 2_430);
        assert_eq!(estimate.high_range, 2_970);
    }

    #[test]
    fn east_coast_premium_truncates_exactly() {
        let estimate = estimate_rent(&request("10001", 1, 1.0));
        assert_eq!(estimate.optimal_price, 1_840);
    }

    #[test]
    fn amenities_stack() {
        let mut req = request("", 0, 1.0);
        req.has_parking = true;
        req.has_pool = true;
        req.has_gym = true;
        assert_eq!(estimate_rent(&req).optimal_price, 1_550);
    }

    #[test]
    fn missing_fields_fall_back_to_one_bed_one_bath() {
        let req: RentEstimateRequest = serde_json::from_str("{}").expect("defaults apply");
        assert_eq!(req.bedrooms, 1);
        assert_eq!(estimate_rent(&req).optimal_price, 1_600);
    }

    #[test]
    fn oversized_bathroom_counts_are_capped() {
        let req: RentEstimateRequest =
            serde_json::from_str(r#"{"zip_code":"94110","bathrooms":10000000.0}"#)
                .expect("request parses");
        let capped = estimate_rent(&request("94110", 1, 20.0));

        assert_eq!(estimate_rent(&req), capped);
        // (1000 + 400 + 4000) * 1.2
        assert_eq!(capped.optimal_price, 6_480);
    }
}
