//! Provider directory: static seed data plus pure, synchronous filtering.
//!
//! The list is small enough that a linear scan per keystroke is fine; there
//! is deliberately no index. Seed order is stable and preserved by search.

use serde::{Deserialize, Serialize};

use crate::model::ProviderId;
use crate::{haversine_distance, ValidatedCoordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Plumbing,
    Electrical,
    Cleaning,
    Carpentry,
    Painting,
    Appliance,
}

impl ServiceCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Plumbing => "Plumbing",
            Self::Electrical => "Electrical",
            Self::Cleaning => "Cleaning",
            Self::Carpentry => "Carpentry",
            Self::Painting => "Painting",
            Self::Appliance => "Appliance Repair",
        }
    }
}

/// Category selection in the directory UI. `All` disables category matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ServiceCategory),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: ServiceCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => c == category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProviderRecord {
    pub id: ProviderId,
    pub name: String,
    pub category: ServiceCategory,
    pub lat: f64,
    pub lon: f64,
    pub rating: f32,
    pub description: String,
    pub phone: String,
    pub address: String,
}

impl ServiceProviderRecord {
    /// Distance in meters from the given point, when both coordinates are
    /// valid.
    #[must_use]
    pub fn distance_from(&self, point: ValidatedCoordinate) -> Option<f64> {
        ValidatedCoordinate::new(self.lat, self.lon)
            .ok()
            .map(|coord| haversine_distance(point, coord))
    }
}

/// Case-insensitive substring match over name, description, and the
/// category label, intersected with the category filter. An empty or
/// whitespace-only query matches everything.
#[must_use]
pub fn search<'a>(
    providers: &'a [ServiceProviderRecord],
    filter: CategoryFilter,
    query: &str,
) -> Vec<&'a ServiceProviderRecord> {
    let needle = query.trim().to_lowercase();

    providers
        .iter()
        .filter(|p| filter.matches(p.category))
        .filter(|p| {
            if needle.is_empty() {
                return true;
            }
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.category.label().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Static seed directory. No lifecycle beyond process start.
#[must_use]
pub fn seed_providers() -> Vec<ServiceProviderRecord> {
    let seed: &[(&str, &str, ServiceCategory, f64, f64, f32, &str, &str, &str)] = &[
        (
            "prov-001",
            "Cascade Plumbing Co.",
            ServiceCategory::Plumbing,
            47.6097,
            -122.3331,
            4.8,
            "Leak repair, water heaters, and emergency call-outs.",
            "+1-206-555-0134",
            "1411 4th Ave, Seattle",
        ),
        (
            "prov-002",
            "Rainier Drain Works",
            ServiceCategory::Plumbing,
            47.5952,
            -122.3316,
            4.3,
            "Drain cleaning and pipe replacement for older homes.",
            "+1-206-555-0171",
            "83 S King St, Seattle",
        ),
        (
            "prov-003",
            "Voltline Electric",
            ServiceCategory::Electrical,
            47.6205,
            -122.3493,
            4.9,
            "Licensed electricians for panels, wiring, and EV chargers.",
            "+1-206-555-0119",
            "400 Broad St, Seattle",
        ),
        (
            "prov-004",
            "Northgate Spark & Switch",
            ServiceCategory::Electrical,
            47.7067,
            -122.3250,
            4.1,
            "Residential fixture installs and fault finding.",
            "+1-206-555-0160",
            "401 NE Northgate Way, Seattle",
        ),
        (
            "prov-005",
            "Fresh Nest Cleaning",
            ServiceCategory::Cleaning,
            47.6590,
            -122.3132,
            4.6,
            "Deep cleans, move-out cleans, and recurring visits.",
            "+1-206-555-0185",
            "4500 15th Ave NE, Seattle",
        ),
        (
            "prov-006",
            "Harbor Shine Services",
            ServiceCategory::Cleaning,
            47.6026,
            -122.3393,
            4.4,
            "Office and apartment cleaning with eco products.",
            "+1-206-555-0147",
            "1301 Alaskan Way, Seattle",
        ),
        (
            "prov-007",
            "Madrona Woodcraft",
            ServiceCategory::Carpentry,
            47.6125,
            -122.2900,
            4.7,
            "Custom shelving, decks, and trim carpentry.",
            "+1-206-555-0192",
            "1126 34th Ave, Seattle",
        ),
        (
            "prov-008",
            "Sound Painters Guild",
            ServiceCategory::Painting,
            47.6692,
            -122.3880,
            4.5,
            "Interior and exterior painting, drywall touch-ups.",
            "+1-206-555-0128",
            "2208 NW Market St, Seattle",
        ),
        (
            "prov-009",
            "Emerald Appliance Care",
            ServiceCategory::Appliance,
            47.6299,
            -122.3426,
            4.2,
            "Washer, dryer, and refrigerator repair, all brands.",
            "+1-206-555-0153",
            "600 Queen Anne Ave N, Seattle",
        ),
        (
            "prov-010",
            "Beacon Hill Handywork",
            ServiceCategory::Carpentry,
            47.5790,
            -122.3110,
            3.9,
            "Small carpentry jobs, door and window repair.",
            "+1-206-555-0176",
            "2821 Beacon Ave S, Seattle",
        ),
    ];

    seed.iter()
        .map(
            |&(id, name, category, lat, lon, rating, description, phone, address)| {
                ServiceProviderRecord {
                    id: ProviderId::new(id),
                    name: name.into(),
                    category,
                    lat,
                    lon,
                    rating,
                    description: description.into(),
                    phone: phone.into(),
                    address: address.into(),
                }
            },
        )
        .collect()
}
