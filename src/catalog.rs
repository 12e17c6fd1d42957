//! Catalog Module
//!
//! Static product data for the listing and the detail page.

use serde::{Deserialize, Serialize};

/// Product shown when the detail page gets no usable query.
pub const DEFAULT_PRODUCT_NAME: &str = "Transparent Umbrella";
pub const DEFAULT_PRODUCT_PRICE: u64 = 12000;

const GENERIC_DESCRIPTION: &str = "Completely useless, but fun.";
const GENERIC_RATING: f32 = 4.0;
const GENERIC_FEATURES: &[&str] = &["Completely useless features", "Zero practicality", "Pure fun"];
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x400/000000/FFFFFF?text=Product";

struct CatalogEntry {
    name: &'static str,
    price: u64,
    description: &'static str,
    rating: f32,
    features: [&'static str; 4],
}

const PRODUCTS: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Transparent Umbrella",
        price: 12000,
        description: "An umbrella that keeps nobody dry. It is fully transparent, \
                      including to rain, and everyone smiles when you carry it.",
        rating: 4.2,
        features: [
            "Fully transparent material",
            "Special rain-admitting function",
            "Design that draws every eye",
            "A new way to experience rainy days",
        ],
    },
    CatalogEntry {
        name: "Squeaky Slippers",
        price: 15000,
        description: "Slippers that squeak on every step. Not for quiet places.",
        rating: 4.5,
        features: [
            "Squeaks on every step",
            "A new dimension of floor noise",
            "Banned from libraries",
            "Zero workout effect",
        ],
    },
    CatalogEntry {
        name: "Backwards Clock",
        price: 25000,
        description: "A clock whose hands turn the wrong way. You will never know \
                      the time, but looking is twice the fun.",
        rating: 3.8,
        features: [
            "Hands rotate in reverse",
            "Special time-hiding function",
            "New joy in checking the clock",
            "Innovation in the concept of time",
        ],
    },
    CatalogEntry {
        name: "Holey Socks",
        price: 5000,
        description: "Socks with a hole for every toe. No warmth, perfect airflow.",
        rating: 4.0,
        features: [
            "A hole for every toe",
            "Zero insulation",
            "Best-in-class ventilation",
            "Free will for your toes",
        ],
    },
    CatalogEntry {
        name: "Wireless Charger",
        price: 30000,
        description: "A wireless charger that does not charge. Wireless power, \
                      wirelessly absent.",
        rating: 4.3,
        features: [
            "Wireless non-charging",
            "Completely wireless power",
            "The true meaning of wireless",
            "A new charging experience",
        ],
    },
    CatalogEntry {
        name: "Silent Bell",
        price: 18000,
        description: "A decorative bell that never rings. Visual effect only.",
        rating: 3.9,
        features: [
            "Decorative bell that does not ring",
            "Visual effect only",
            "Perfect decoration for quiet rooms",
            "The charm of a soundless bell",
        ],
    },
];

// == Product ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: u64,
    pub description: String,
    pub rating: f32,
    /// Shopper ratings folded into `rating`
    pub rating_count: u64,
    pub features: Vec<String>,
    pub image_url: String,
}

impl Product {
    /// Static details for `name` at `price`; unknown names get generic data.
    pub fn describe(name: &str, price: u64) -> Self {
        match find(name) {
            Some(entry) => Self {
                name: name.to_string(),
                price,
                description: entry.description.to_string(),
                rating: entry.rating,
                rating_count: 0,
                features: entry.features.iter().map(|f| f.to_string()).collect(),
                image_url: image_url(name),
            },
            None => Self {
                name: name.to_string(),
                price,
                description: GENERIC_DESCRIPTION.to_string(),
                rating: GENERIC_RATING,
                rating_count: 0,
                features: GENERIC_FEATURES.iter().map(|f| f.to_string()).collect(),
                image_url: PLACEHOLDER_IMAGE.to_string(),
            },
        }
    }
}

fn find(name: &str) -> Option<&'static CatalogEntry> {
    PRODUCTS.iter().find(|entry| entry.name == name)
}

/// Editorial rating a product starts from before any shopper rates it.
pub fn base_rating(name: &str) -> f32 {
    find(name).map_or(GENERIC_RATING, |entry| entry.rating)
}

fn image_url(name: &str) -> String {
    format!(
        "https://via.placeholder.com/400x400/000000/FFFFFF?text={}",
        name.replace(' ', "+")
    )
}

// == Detail Query ==
/// Query parameters of the detail page, taken as raw strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailQuery {
    pub name: Option<String>,
    pub price: Option<String>,
}

// == Catalog Operations ==
/// Every product in listing order.
pub fn list() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|entry| Product::describe(entry.name, entry.price))
        .collect()
}

/// Case-insensitive match on name or description; blank queries match all.
pub fn search(query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    list()
        .into_iter()
        .filter(|product| {
            needle.is_empty()
                || product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Product for the detail page.
///
/// Needs both `name` and an integer `price`; anything else falls back to
/// the default product.
pub fn detail(query: &DetailQuery) -> Product {
    let name = query.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let price = query
        .price
        .as_deref()
        .and_then(|p| p.trim().parse::<u64>().ok());

    match (name, price) {
        (Some(name), Some(price)) => Product::describe(name, price),
        _ => Product::describe(DEFAULT_PRODUCT_NAME, DEFAULT_PRODUCT_PRICE),
    }
}
