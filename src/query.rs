// 🔍 Query Layer - Read-only views over a catalog
//
// Every function here is stateless: it borrows a Catalog and returns garments
// in the catalog's display order. Empty results are plain empty sequences.

use crate::catalog::Catalog;
use crate::entities::{Category, Garment};
use serde::{Deserialize, Serialize};

/// How many garments the least-recently-worn view shows by default
pub const DEFAULT_LEAST_RECENT_LIMIT: usize = 5;

// ============================================================================
// SEARCH
// ============================================================================

/// Garments whose name contains `needle`, ignoring case
pub fn search_by_name<'a>(
    catalog: &'a Catalog,
    category: Category,
    needle: &str,
) -> Vec<&'a Garment> {
    search_field(catalog, category, needle, Garment::name)
}

/// Garments whose notes contain `needle`, ignoring case
pub fn search_by_notes<'a>(
    catalog: &'a Catalog,
    category: Category,
    needle: &str,
) -> Vec<&'a Garment> {
    search_field(catalog, category, needle, Garment::notes)
}

fn search_field<'a, F>(
    catalog: &'a Catalog,
    category: Category,
    needle: &str,
    field: F,
) -> Vec<&'a Garment>
where
    F: Fn(&Garment) -> &str,
{
    let needle = needle.to_lowercase();
    catalog
        .garments(category)
        .filter(|garment| field(garment).to_lowercase().contains(&needle))
        .collect()
}

// ============================================================================
// LISTINGS
// ============================================================================

/// Unworn garments of one category plus their count
#[derive(Debug, Clone, PartialEq)]
pub struct UnwornListing<'a> {
    pub garments: Vec<&'a Garment>,
    pub count: usize,
}

/// Never-worn garments, most expensive first
pub fn list_unworn(catalog: &Catalog, category: Category) -> UnwornListing<'_> {
    // Unworn garments always lead the display order
    let garments: Vec<&Garment> = catalog
        .garments(category)
        .take_while(|garment| !garment.is_worn())
        .collect();

    UnwornListing {
        count: garments.len(),
        garments,
    }
}

/// Up to `limit` worn garments, longest since last wear first.
///
/// Unworn garments are excluded.
pub fn list_least_recently_worn(
    catalog: &Catalog,
    category: Category,
    limit: usize,
) -> Vec<&Garment> {
    catalog
        .garments(category)
        .filter(|garment| garment.is_worn())
        .take(limit)
        .collect()
}

/// Every garment in one category
pub fn list_category(catalog: &Catalog, category: Category) -> Vec<&Garment> {
    catalog.garments(category).collect()
}

/// One category's slice of the whole-closet listing
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection<'a> {
    pub category: Category,
    pub garments: Vec<&'a Garment>,
}

/// Whole closet in declared category order, with its total value
#[derive(Debug, Clone, PartialEq)]
pub struct ClosetListing<'a> {
    pub sections: Vec<CategorySection<'a>>,
    pub total_value: f64,
}

impl ClosetListing<'_> {
    /// All garments, section by section
    pub fn garments(&self) -> impl Iterator<Item = &Garment> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.garments.iter().copied())
    }
}

pub fn list_all(catalog: &Catalog) -> ClosetListing<'_> {
    ClosetListing {
        sections: Catalog::categories()
            .iter()
            .map(|category| CategorySection {
                category: *category,
                garments: list_category(catalog, *category),
            })
            .collect(),
        total_value: catalog.total_value(),
    }
}

// ============================================================================
// ROW PROJECTION
// ============================================================================

/// Fixed column set for tabular display and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentRow {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: String,

    /// Rounded to cents
    #[serde(rename = "Price_Per_Wear")]
    pub price_per_wear: f64,

    #[serde(rename = "Times_Worn")]
    pub times_worn: u32,

    /// MM/DD/YYYY, or "N/A" when never worn
    #[serde(rename = "Last_Worn")]
    pub last_worn: String,

    #[serde(rename = "Notes")]
    pub notes: String,
}

impl From<&Garment> for GarmentRow {
    fn from(garment: &Garment) -> Self {
        GarmentRow {
            name: garment.name().to_string(),
            category: garment.category().to_string(),
            price_per_wear: garment.price_per_wear(),
            times_worn: garment.times_worn(),
            last_worn: garment.last_worn_display(),
            notes: garment.notes().to_string(),
        }
    }
}

/// Project a garment sequence into display rows
pub fn rows<'a, I>(garments: I) -> Vec<GarmentRow>
where
    I: IntoIterator<Item = &'a Garment>,
{
    garments.into_iter().map(GarmentRow::from).collect()
}

// ============================================================================
// TESTS
// ============================================================================
