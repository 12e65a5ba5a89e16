// 👕 Garment Entity - One article of clothing in the closet
//
// Identity: (category, case-insensitive name) - set at creation, never changes
// Economic value: cost in whole cents - immutable
// Usage: times_worn + last_worn - the only mutable part, changed by logging a wear
//
// The ranking rule defined here drives every listing and search result.
// It is an ORDER, not an identity: two distinct garments can rank equal
// (e.g. two unworn items of the same cost). Membership is always decided by
// the name key, never by `rank_cmp`.

use super::category::Category;
use crate::error::{CatalogError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Boundary format for wear dates (month/day/year)
pub const WEAR_DATE_FORMAT: &str = "%m/%d/%Y";

/// Shown in listings for a garment that has never been worn
pub const NOT_WORN_MARKER: &str = "N/A";

/// Largest storable cost; every cent count up to here is exact as an f64
pub const MAX_COST_CENTS: u64 = 1 << 53;

/// Parse a MM/DD/YYYY wear date.
///
/// Single-digit months and days ("1/5/2024") are accepted, but the year must
/// be four plain digits ("1/5/24" is rejected). Anything that is not a real
/// calendar date ("02/30/2024", "yesterday") is rejected.
pub fn parse_wear_date(raw: &str) -> Result<NaiveDate> {
    let invalid = || CatalogError::InvalidDate(raw.to_string());
    let trimmed = raw.trim();

    let year = trimmed.rsplit('/').next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, WEAR_DATE_FORMAT).map_err(|_| invalid())
}

/// Convert a typed amount into whole cents, rounding to the nearest cent.
///
/// Negative, non-finite and oversized amounts are rejected. `-0.0` becomes 0.
pub fn amount_to_cents(amount: f64) -> Result<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CatalogError::InvalidCost(amount));
    }
    let cents = (amount * 100.0).round();
    if cents > MAX_COST_CENTS as f64 {
        return Err(CatalogError::InvalidCost(amount));
    }
    Ok(cents as u64)
}

/// Whole cents as a currency amount
pub fn cents_to_amount(cents: u64) -> f64 {
    cents as f64 / 100.0
}

/// Case-insensitive uniqueness key for a garment name
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

// ============================================================================
// GARMENT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    // ========================================================================
    // IDENTITY (never changes)
    // ========================================================================
    /// Display name as entered; unique per category ignoring case
    name: String,

    /// Bucket this garment lives in
    category: Category,

    // ========================================================================
    // VALUES
    // ========================================================================
    /// Purchase cost in cents
    cost_cents: u64,

    /// Free-text notes captured at entry
    #[serde(default)]
    notes: String,

    // ========================================================================
    // USAGE (mutated only through wear logging)
    // ========================================================================
    /// Number of logged wears
    #[serde(default)]
    times_worn: u32,

    /// Most recent wear date; None until the first wear
    #[serde(default)]
    last_worn: Option<NaiveDate>,
}

impl Garment {
    /// Create an unworn garment.
    ///
    /// Only the catalog creates garments, so this stays crate-private.
    pub(crate) fn new(
        name: impl Into<String>,
        category: Category,
        cost: f64,
        notes: impl Into<String>,
    ) -> Result<Self> {
        let cost_cents = amount_to_cents(cost)?;
        Garment::with_cents(name, category, cost_cents, notes)
    }

    /// Create an unworn garment from an exact cent amount
    pub(crate) fn with_cents(
        name: impl Into<String>,
        category: Category,
        cost_cents: u64,
        notes: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidName);
        }
        if cost_cents > MAX_COST_CENTS {
            return Err(CatalogError::InvalidCost(cents_to_amount(cost_cents)));
        }

        Ok(Garment {
            name,
            category,
            cost_cents,
            notes: notes.into(),
            times_worn: 0,
            last_worn: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn cost(&self) -> f64 {
        cents_to_amount(self.cost_cents)
    }

    pub fn cost_cents(&self) -> u64 {
        self.cost_cents
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn times_worn(&self) -> u32 {
        self.times_worn
    }

    pub fn last_worn(&self) -> Option<NaiveDate> {
        self.last_worn
    }

    /// Uniqueness key within the category
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    /// Has this garment been worn at least once?
    pub fn is_worn(&self) -> bool {
        self.times_worn > 0
    }

    /// Price per wear, rounded to cents.
    ///
    /// An unworn garment's PPW is its full cost.
    pub fn price_per_wear(&self) -> f64 {
        if self.times_worn == 0 {
            self.cost()
        } else {
            (self.cost_cents as f64 / f64::from(self.times_worn)).round() / 100.0
        }
    }

    /// Last wear formatted as MM/DD/YYYY, or the not-worn marker
    pub fn last_worn_display(&self) -> String {
        match self.last_worn {
            Some(date) => date.format(WEAR_DATE_FORMAT).to_string(),
            None => NOT_WORN_MARKER.to_string(),
        }
    }

    /// Log one wear on `date`: bump the counter, overwrite the last-worn date.
    pub(crate) fn record_wear(&mut self, date: NaiveDate) {
        self.times_worn = self.times_worn.saturating_add(1);
        self.last_worn = Some(date);
    }

    /// Check the times-worn / last-worn pairing
    pub(crate) fn usage_is_consistent(&self) -> bool {
        (self.times_worn == 0) == self.last_worn.is_none()
    }

    /// Display ranking used by every listing.
    ///
    /// 1. Unworn before worn
    /// 2. Unworn vs unworn: higher cost first
    /// 3. Worn vs worn: earlier last-worn date first
    /// 4. Same date: fewer wears first
    /// 5. Still tied: higher cost first
    ///
    /// Returns `Equal` for garments that tie on every key; callers must not
    /// treat that as "same garment".
    pub fn rank_cmp(&self, other: &Garment) -> Ordering {
        match (self.last_worn, other.last_worn) {
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => cost_descending(self, other),
            (Some(mine), Some(theirs)) => mine
                .cmp(&theirs)
                .then_with(|| self.times_worn.cmp(&other.times_worn))
                .then_with(|| cost_descending(self, other)),
        }
    }
}

fn cost_descending(a: &Garment, b: &Garment) -> Ordering {
    b.cost_cents.cmp(&a.cost_cents)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unworn(name: &str, cost: f64) -> Garment {
        Garment::new(name, Category::Tops, cost, "").unwrap()
    }

    fn worn(name: &str, cost: f64, dates: &[&str]) -> Garment {
        let mut garment = unworn(name, cost);
        for date in dates {
            garment.record_wear(parse_wear_date(date).unwrap());
        }
        garment
    }

    #[test]
    fn test_garment_creation_defaults() {
        let garment = Garment::new("Linen Shirt", Category::Tops, 45.0, "summer").unwrap();

        assert_eq!(garment.name(), "Linen Shirt");
        assert_eq!(garment.category(), Category::Tops);
        assert_eq!(garment.cost(), 45.0);
        assert_eq!(garment.notes(), "summer");
        assert_eq!(garment.times_worn(), 0);
        assert_eq!(garment.last_worn(), None);
        assert!(!garment.is_worn());
        assert_eq!(garment.name_key(), "linen shirt");
    }

    #[test]
    fn test_garment_rejects_bad_cost_and_name() {
        assert_eq!(
            Garment::new("Tee", Category::Tops, -1.0, "").unwrap_err(),
            CatalogError::InvalidCost(-1.0)
        );
        assert!(Garment::new("Tee", Category::Tops, f64::NAN, "").is_err());
        assert!(Garment::new("Tee", Category::Tops, f64::INFINITY, "").is_err());
        assert_eq!(
            Garment::new("   ", Category::Tops, 10.0, "").unwrap_err(),
            CatalogError::InvalidName
        );
        assert!(Garment::new("Free Tee", Category::Tops, 0.0, "").is_ok());
        assert!(Garment::new("Gold Tee", Category::Tops, 1e300, "").is_err());
    }

    #[test]
    fn test_cost_is_kept_in_whole_cents() {
        let tee = unworn("Tee", 19.99);
        assert_eq!(tee.cost_cents(), 1999);
        assert_eq!(tee.cost(), 19.99);

        // Sub-cent input rounds to the nearest cent
        assert_eq!(unworn("Sock", 12.344).cost_cents(), 1234);

        assert_eq!(amount_to_cents(0.1).unwrap(), 10);
        assert_eq!(cents_to_amount(30), 0.3);
    }

    #[test]
    fn test_negative_zero_cost_is_plain_zero() {
        let freebie = unworn("Freebie", -0.0);

        assert_eq!(freebie.cost_cents(), 0);
        assert!(freebie.cost().is_sign_positive());
        assert_eq!(format!("{:.2}", freebie.price_per_wear()), "0.00");
        assert_eq!(
            Garment::new("Tee", Category::Tops, -0.001, "").unwrap_err(),
            CatalogError::InvalidCost(-0.001)
        );
    }

    #[test]
    fn test_parse_wear_date() {
        let date = parse_wear_date("01/31/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        assert_eq!(
            parse_wear_date("1/5/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );

        assert!(parse_wear_date("02/30/2024").is_err());
        assert!(parse_wear_date("13/01/2024").is_err());
        assert!(parse_wear_date("2024-01-31").is_err());
        assert!(parse_wear_date("yesterday").is_err());

        assert_eq!(
            parse_wear_date("1/1/24").unwrap_err(),
            CatalogError::InvalidDate("1/1/24".to_string())
        );
        assert!(parse_wear_date("01/01/+2024").is_err());
        assert!(parse_wear_date("01/01/20245").is_err());
        assert!(parse_wear_date(" 01/01/2024 ").is_ok());
        assert_eq!(
            parse_wear_date("").unwrap_err(),
            CatalogError::InvalidDate(String::new())
        );
    }

    #[test]
    fn test_record_wear_overwrites_last_worn() {
        let garment = worn("Tee", 30.0, &["03/01/2024", "01/15/2024"]);

        assert_eq!(garment.times_worn(), 2);
        // Most recent LOG wins, not the latest date
        assert_eq!(garment.last_worn_display(), "01/15/2024");
        assert!(garment.usage_is_consistent());
    }

    #[test]
    fn test_price_per_wear() {
        assert_eq!(unworn("Coat", 120.0).price_per_wear(), 120.0);

        let tee = worn("Tee", 10.0, &["01/01/2024", "01/02/2024", "01/03/2024"]);
        assert_eq!(tee.price_per_wear(), 3.33);

        let jeans = worn("Jeans", 50.0, &["01/01/2024", "01/02/2024"]);
        assert_eq!(jeans.price_per_wear(), 25.0);
    }

    #[test]
    fn test_last_worn_display_marker() {
        assert_eq!(unworn("Coat", 120.0).last_worn_display(), NOT_WORN_MARKER);
        assert_eq!(worn("Coat", 120.0, &["7/4/2023"]).last_worn_display(), "07/04/2023");
    }

    #[test]
    fn test_rank_unworn_before_worn() {
        let cheap_unworn = unworn("Cheap", 1.0);
        let pricey_worn = worn("Pricey", 500.0, &["01/01/2020"]);

        assert_eq!(cheap_unworn.rank_cmp(&pricey_worn), Ordering::Less);
        assert_eq!(pricey_worn.rank_cmp(&cheap_unworn), Ordering::Greater);
    }

    #[test]
    fn test_rank_unworn_by_cost_descending() {
        let shirt = unworn("Shirt", 50.0);
        let tee = unworn("Tee", 30.0);

        assert_eq!(shirt.rank_cmp(&tee), Ordering::Less);
        assert_eq!(tee.rank_cmp(&shirt), Ordering::Greater);
        assert_eq!(shirt.rank_cmp(&unworn("Other", 50.0)), Ordering::Equal);
    }

    #[test]
    fn test_rank_worn_by_earlier_date() {
        let older = worn("Older", 10.0, &["01/01/2024"]);
        let newer = worn("Newer", 99.0, &["02/01/2024"]);

        assert_eq!(older.rank_cmp(&newer), Ordering::Less);
        assert_eq!(newer.rank_cmp(&older), Ordering::Greater);
    }

    #[test]
    fn test_rank_compares_dates_not_strings() {
        // "1/1/2024" and "01/01/2024" are the same day
        let padded = worn("Padded", 10.0, &["01/01/2024", "01/01/2024"]);
        let bare = worn("Bare", 10.0, &["1/1/2024"]);

        assert_eq!(bare.rank_cmp(&padded), Ordering::Less);

        // "12/31/2023" sorts after "02/01/2024" as text but is earlier
        let december = worn("December", 10.0, &["12/31/2023"]);
        let february = worn("February", 10.0, &["02/01/2024"]);
        assert_eq!(december.rank_cmp(&february), Ordering::Less);
    }

    #[test]
    fn test_rank_same_date_fewer_wears_first() {
        let once = worn("Once", 10.0, &["05/05/2024"]);
        let twice = worn("Twice", 10.0, &["04/04/2024", "05/05/2024"]);

        assert_eq!(once.rank_cmp(&twice), Ordering::Less);
    }

    #[test]
    fn test_rank_full_tie_breaks_on_cost() {
        let dear = worn("Dear", 80.0, &["05/05/2024"]);
        let cheap = worn("Cheap", 20.0, &["05/05/2024"]);

        assert_eq!(dear.rank_cmp(&cheap), Ordering::Less);
        assert_eq!(dear.rank_cmp(&worn("Twin", 80.0, &["05/05/2024"])), Ordering::Equal);
    }
}
