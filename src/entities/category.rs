// 🏷️ Category Entity - The closed set of garment buckets
//
// Six fixed categories partition the closet. A garment's category is part of
// its identity: it is chosen once at insertion and never changes.
//
// Declared order (tops → accessories) is the order used whenever the whole
// closet is walked.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shirts, tees, sweaters
    Tops,

    /// Trousers, skirts, shorts
    Bottoms,

    /// Dresses, jumpsuits, overalls
    #[serde(rename = "full body")]
    FullBody,

    /// Coats and jackets
    Outerwear,

    /// Footwear
    Shoes,

    /// Bags, belts, jewellery, hats
    Accessories,
}

impl Category {
    /// Every category in declared order
    pub const ALL: [Category; 6] = [
        Category::Tops,
        Category::Bottoms,
        Category::FullBody,
        Category::Outerwear,
        Category::Shoes,
        Category::Accessories,
    ];

    /// Canonical lowercase token (e.g. "full body")
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::FullBody => "full body",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
        }
    }

    /// Title-cased label for menus
    pub fn label(&self) -> &'static str {
        match self {
            Category::Tops => "Tops",
            Category::Bottoms => "Bottoms",
            Category::FullBody => "Full Body",
            Category::Outerwear => "Outerwear",
            Category::Shoes => "Shoes",
            Category::Accessories => "Accessories",
        }
    }

    /// 1-based position in declared order
    pub fn position(&self) -> usize {
        self.slot() + 1
    }

    /// 0-based storage slot; variants are declared in `ALL` order
    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }

    /// Parse a category token (case-insensitive, surrounding whitespace ignored)
    pub fn parse(token: &str) -> Result<Category> {
        let normalized = token.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| CatalogError::InvalidCategory(token.to_string()))
    }

    /// Resolve a 1-based menu position into a category
    pub fn from_choice(choice: usize) -> Result<Category> {
        choice
            .checked_sub(1)
            .and_then(|i| Category::ALL.get(i).copied())
            .ok_or_else(|| CatalogError::InvalidChoice {
                choice: choice.to_string(),
                max: Category::ALL.len(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Category::parse(s)
    }
}

// ============================================================================
// TESTS
// ============================================================================
