// 🗄️ Catalog - Category-partitioned garment storage
//
// Each category bucket keeps TWO structures in lock-step:
// - `index`: lowercase name → Garment (membership, lookup, removal)
// - `order`: name keys sorted by `Garment::rank_cmp` (traversal)
//
// The ranking is never used to decide membership: garments that tie on every
// ranking key are still distinct entries as long as their names differ.
//
// The running total is kept in whole cents and adjusted on every insert/remove
// instead of being recomputed, so it always equals the exact sum of costs.

use crate::entities::{cents_to_amount, name_key, parse_wear_date, Category, Garment};
use crate::error::{CatalogError, Result};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

// ============================================================================
// BUCKET
// ============================================================================

/// One category's garments: a name index plus a ranked key sequence
#[derive(Debug, Default, Clone)]
struct Bucket {
    index: HashMap<String, Garment>,
    order: Vec<String>,
}

impl Bucket {
    fn len(&self) -> usize {
        self.order.len()
    }

    fn get(&self, key: &str) -> Option<&Garment> {
        self.index.get(key)
    }

    /// Position right after every garment that ranks at or before `garment`,
    /// so ties keep insertion order.
    fn slot_for(&self, garment: &Garment) -> usize {
        let index = &self.index;
        self.order.partition_point(|key| {
            index
                .get(key)
                .is_some_and(|placed| placed.rank_cmp(garment) != Ordering::Greater)
        })
    }

    fn insert(&mut self, garment: Garment) {
        let key = garment.name_key();
        let slot = self.slot_for(&garment);
        self.order.insert(slot, key.clone());
        self.index.insert(key, garment);
    }

    fn remove(&mut self, key: &str) -> Option<Garment> {
        let garment = self.index.remove(key)?;
        self.order.retain(|k| k != key);
        Some(garment)
    }

    /// Mutate a garment's ranking fields and move it to its new slot
    fn reposition_with<F>(&mut self, key: &str, update: F) -> Option<&Garment>
    where
        F: FnOnce(&mut Garment),
    {
        let mut garment = self.remove(key)?;
        update(&mut garment);
        self.insert(garment);
        self.index.get(key)
    }

    fn iter(&self) -> impl Iterator<Item = &Garment> + '_ {
        self.order.iter().filter_map(|key| self.index.get(key))
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// The closet: six buckets and a running total of garment cost.
///
/// Owned by one session; all operations are synchronous and either fully
/// apply or leave the catalog untouched.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// One bucket per category, indexed by `Category::slot`
    buckets: [Bucket; 6],
    total_value_cents: u64,
}

impl Catalog {
    /// Create an empty catalog with all six buckets present
    pub fn new() -> Self {
        Catalog {
            buckets: Default::default(),
            total_value_cents: 0,
        }
    }

    /// The fixed category set in declared order
    pub fn categories() -> &'static [Category] {
        &Category::ALL
    }

    /// Sum of cost over every garment currently in the closet
    pub fn total_value(&self) -> f64 {
        cents_to_amount(self.total_value_cents)
    }

    /// Exact total in cents
    pub fn total_value_cents(&self) -> u64 {
        self.total_value_cents
    }

    /// Number of garments across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of garments in one bucket
    pub fn count(&self, category: Category) -> usize {
        self.bucket(category).len()
    }

    /// Add a new, unworn garment to `category`.
    ///
    /// Fails with `DuplicateName` when the bucket already holds the name
    /// (ignoring case). Names may repeat across categories.
    pub fn insert(
        &mut self,
        category: Category,
        name: &str,
        cost: f64,
        notes: &str,
    ) -> Result<&Garment> {
        let garment = Garment::new(name, category, cost, notes)?;
        let key = garment.name_key();
        let total_value_cents = self
            .total_value_cents
            .checked_add(garment.cost_cents())
            .ok_or(CatalogError::InvalidCost(cost))?;

        let bucket = self.bucket_mut(category);
        if bucket.get(&key).is_some() {
            debug!(
                "event=garment_add module=catalog status=rejected reason=duplicate category={}",
                category
            );
            return Err(CatalogError::DuplicateName {
                category: category.to_string(),
                name: name.to_string(),
            });
        }

        bucket.insert(garment);
        let bucket_size = bucket.len();
        self.total_value_cents = total_value_cents;

        info!(
            "event=garment_added module=catalog status=ok category={} bucket_size={}",
            category, bucket_size
        );

        self.find(category, name).ok_or_else(|| not_found(category, name))
    }

    /// Remove a garment by category and (case-insensitive) name
    pub fn remove(&mut self, category: Category, name: &str) -> Result<Garment> {
        let garment = self
            .bucket_mut(category)
            .remove(&name_key(name))
            .ok_or_else(|| not_found(category, name))?;

        // Never underflows: the removed cost is part of the total
        self.total_value_cents -= garment.cost_cents();

        info!(
            "event=garment_removed module=catalog status=ok category={} bucket_size={}",
            category,
            self.count(category)
        );

        Ok(garment)
    }

    /// Case-insensitive lookup; absence is a normal outcome, not an error
    pub fn find(&self, category: Category, name: &str) -> Option<&Garment> {
        self.bucket(category).get(&name_key(name))
    }

    /// Log a wear from a MM/DD/YYYY date string.
    ///
    /// The date is validated here so stored dates are always comparable.
    pub fn log_wear(&mut self, category: Category, name: &str, date: &str) -> Result<&Garment> {
        if self.find(category, name).is_none() {
            return Err(not_found(category, name));
        }
        let date = parse_wear_date(date)?;
        self.log_wear_on(category, name, date)
    }

    /// Log a wear on an already-parsed date
    pub fn log_wear_on(
        &mut self,
        category: Category,
        name: &str,
        date: NaiveDate,
    ) -> Result<&Garment> {
        let garment = self
            .bucket_mut(category)
            .reposition_with(&name_key(name), |garment| garment.record_wear(date))
            .ok_or_else(|| not_found(category, name))?;

        info!(
            "event=wear_logged module=catalog status=ok category={} times_worn={}",
            category,
            garment.times_worn()
        );

        Ok(garment)
    }

    /// Garments of one category in display order
    pub fn garments(&self, category: Category) -> impl Iterator<Item = &Garment> + '_ {
        self.bucket(category).iter()
    }

    // ========================================================================
    // SNAPSHOTS (extension point for durable storage)
    // ========================================================================

    /// Capture every garment, in category then display order
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            garments: Category::ALL
                .iter()
                .flat_map(|category| self.garments(*category).cloned())
                .collect(),
        }
    }

    /// Rebuild a catalog from a snapshot.
    ///
    /// Goes through the same uniqueness checks as `insert`, and recomputes the
    /// total value from scratch.
    pub fn restore(snapshot: CatalogSnapshot) -> Result<Catalog> {
        let mut catalog = Catalog::new();

        for garment in snapshot.garments {
            if !garment.usage_is_consistent() {
                return Err(CatalogError::CorruptSnapshot(format!(
                    "`{}` in {} has times_worn={} but last_worn={}",
                    garment.name(),
                    garment.category(),
                    garment.times_worn(),
                    garment.last_worn_display()
                )));
            }
            // Rebuild through the constructor so cost/name checks re-run
            let checked = Garment::with_cents(
                garment.name(),
                garment.category(),
                garment.cost_cents(),
                garment.notes(),
            )
            .map_err(|err| CatalogError::CorruptSnapshot(err.to_string()))?;

            let category = checked.category();
            let bucket = catalog.bucket_mut(category);
            if bucket.get(&checked.name_key()).is_some() {
                return Err(CatalogError::CorruptSnapshot(format!(
                    "duplicate name `{}` in {}",
                    checked.name(),
                    category
                )));
            }
            bucket.insert(garment);
            catalog.total_value_cents = catalog
                .total_value_cents
                .checked_add(checked.cost_cents())
                .ok_or_else(|| CatalogError::CorruptSnapshot("total value overflows".to_string()))?;
        }

        info!(
            "event=catalog_restored module=catalog status=ok garments={}",
            catalog.len()
        );

        Ok(catalog)
    }

    fn bucket(&self, category: Category) -> &Bucket {
        &self.buckets[category.slot()]
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Bucket {
        &mut self.buckets[category.slot()]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(category: Category, name: &str) -> CatalogError {
    CatalogError::NotFound {
        category: category.to_string(),
        name: name.to_string(),
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Serializable image of a catalog's contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub garments: Vec<Garment>,
}

impl CatalogSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(catalog: &Catalog, category: Category) -> Vec<String> {
        catalog
            .garments(category)
            .map(|g| g.name().to_string())
            .collect()
    }

    fn scenario_a() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(Category::Tops, "Shirt", 50.0, "").unwrap();
        catalog.insert(Category::Tops, "Tee", 30.0, "").unwrap();
        catalog
    }

    #[test]
    fn test_new_catalog_is_empty() {
        let catalog = Catalog::new();

        assert!(catalog.is_empty());
        assert_eq!(catalog.total_value(), 0.0);
        for category in Catalog::categories() {
            assert_eq!(catalog.count(*category), 0);
        }
    }

    #[test]
    fn test_unworn_listed_by_cost_descending() {
        let catalog = scenario_a();

        assert_eq!(names(&catalog, Category::Tops), vec!["Shirt", "Tee"]);
        assert_eq!(catalog.total_value(), 80.0);
    }

    #[test]
    fn test_insert_order_does_not_matter() {
        let mut catalog = Catalog::new();
        catalog.insert(Category::Tops, "Tee", 30.0, "").unwrap();
        catalog.insert(Category::Tops, "Shirt", 50.0, "").unwrap();

        assert_eq!(names(&catalog, Category::Tops), vec!["Shirt", "Tee"]);
    }

    #[test]
    fn test_logged_wears_reorder_by_earlier_date() {
        let mut catalog = scenario_a();
        catalog.log_wear(Category::Tops, "Shirt", "01/01/2024").unwrap();
        catalog.log_wear(Category::Tops, "Tee", "02/01/2024").unwrap();

        assert_eq!(names(&catalog, Category::Tops), vec!["Shirt", "Tee"]);

        // Wearing the shirt again moves it behind the tee
        catalog.log_wear(Category::Tops, "shirt", "03/01/2024").unwrap();
        assert_eq!(names(&catalog, Category::Tops), vec!["Tee", "Shirt"]);
    }

    #[test]
    fn test_unworn_stays_ahead_of_worn() {
        let mut catalog = scenario_a();
        catalog.log_wear(Category::Tops, "Shirt", "01/01/2024").unwrap();

        assert_eq!(names(&catalog, Category::Tops), vec!["Tee", "Shirt"]);
    }

    #[test]
    fn test_remove_missing_leaves_catalog_unchanged() {
        let mut catalog = scenario_a();

        let err = catalog.remove(Category::Tops, "Nonexistent").unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotFound {
                category: "tops".to_string(),
                name: "Nonexistent".to_string(),
            }
        );
        assert_eq!(catalog.total_value(), 80.0);
        assert_eq!(names(&catalog, Category::Tops), vec!["Shirt", "Tee"]);
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let mut catalog = scenario_a();

        let err = catalog.insert(Category::Tops, "shirt", 10.0, "").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { .. }));
        assert_eq!(catalog.total_value(), 80.0);
        assert_eq!(catalog.count(Category::Tops), 2);
        assert_eq!(catalog.find(Category::Tops, "SHIRT").unwrap().cost(), 50.0);
    }

    #[test]
    fn test_same_name_allowed_across_categories() {
        let mut catalog = scenario_a();
        catalog.insert(Category::Accessories, "Shirt", 5.0, "pin").unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find(Category::Accessories, "shirt").unwrap().cost(), 5.0);
        assert_eq!(catalog.find(Category::Tops, "shirt").unwrap().cost(), 50.0);
    }

    #[test]
    fn test_ranking_ties_are_not_merged() {
        let mut catalog = Catalog::new();
        catalog.insert(Category::Shoes, "Loafer", 90.0, "").unwrap();
        catalog.insert(Category::Shoes, "Boot", 90.0, "").unwrap();
        catalog.insert(Category::Shoes, "Sneaker", 90.0, "").unwrap();

        assert_eq!(catalog.count(Category::Shoes), 3);
        // Ties keep insertion order
        assert_eq!(
            names(&catalog, Category::Shoes),
            vec!["Loafer", "Boot", "Sneaker"]
        );

        catalog.log_wear(Category::Shoes, "Loafer", "06/01/2024").unwrap();
        catalog.log_wear(Category::Shoes, "Boot", "06/01/2024").unwrap();
        assert_eq!(catalog.count(Category::Shoes), 3);
        assert_eq!(catalog.total_value(), 270.0);
    }

    #[test]
    fn test_remove_updates_total_and_index() {
        let mut catalog = scenario_a();

        let removed = catalog.remove(Category::Tops, "TEE").unwrap();
        assert_eq!(removed.name(), "Tee");
        assert_eq!(catalog.total_value(), 50.0);
        assert!(catalog.find(Category::Tops, "tee").is_none());
        assert_eq!(names(&catalog, Category::Tops), vec!["Shirt"]);

        // Name is free again
        catalog.insert(Category::Tops, "tee", 12.0, "").unwrap();
        assert_eq!(catalog.total_value(), 62.0);
    }

    #[test]
    fn test_total_value_tracks_inserts_and_removes() {
        let mut catalog = Catalog::new();
        let items = [
            (Category::Tops, "A", 19.99),
            (Category::Bottoms, "B", 45.5),
            (Category::Shoes, "C", 120.0),
            (Category::Outerwear, "D", 0.0),
            (Category::FullBody, "E", 75.25),
        ];
        for (category, name, cost) in items {
            catalog.insert(category, name, cost, "").unwrap();
        }
        catalog.remove(Category::Bottoms, "b").unwrap();
        catalog.remove(Category::Outerwear, "D").unwrap();

        let expected: u64 = Catalog::categories()
            .iter()
            .flat_map(|c| catalog.garments(*c))
            .map(Garment::cost_cents)
            .sum();
        assert_eq!(catalog.total_value_cents(), expected);
        assert_eq!(catalog.total_value(), 215.24);

        for (category, name, _) in items {
            let _ = catalog.remove(category, name);
        }
        assert_eq!(catalog.total_value(), 0.0);
    }

    #[test]
    fn test_total_value_is_exact_after_removals() {
        let mut catalog = Catalog::new();
        catalog.insert(Category::Tops, "A", 0.1, "").unwrap();
        catalog.insert(Category::Tops, "B", 0.2, "").unwrap();
        catalog.insert(Category::Tops, "C", 0.3, "").unwrap();
        assert_eq!(catalog.total_value_cents(), 60);

        catalog.remove(Category::Tops, "A").unwrap();
        catalog.remove(Category::Tops, "B").unwrap();

        assert_eq!(catalog.total_value_cents(), 30);
        assert_eq!(catalog.total_value(), 0.3);
        assert_eq!(
            catalog.total_value(),
            catalog.find(Category::Tops, "c").unwrap().cost()
        );
    }

    #[test]
    fn test_insert_rejects_invalid_values_without_side_effects() {
        let mut catalog = Catalog::new();

        assert_eq!(
            catalog.insert(Category::Tops, "Tee", -5.0, "").unwrap_err(),
            CatalogError::InvalidCost(-5.0)
        );
        assert_eq!(
            catalog.insert(Category::Tops, "", 5.0, "").unwrap_err(),
            CatalogError::InvalidName
        );
        assert!(catalog.is_empty());
        assert_eq!(catalog.total_value(), 0.0);
    }

    #[test]
    fn test_log_wear_rejects_bad_date() {
        let mut catalog = scenario_a();

        let err = catalog.log_wear(Category::Tops, "Tee", "31/12/2024").unwrap_err();
        assert_eq!(err, CatalogError::InvalidDate("31/12/2024".to_string()));

        let tee = catalog.find(Category::Tops, "Tee").unwrap();
        assert_eq!(tee.times_worn(), 0);
        assert_eq!(tee.last_worn(), None);
    }

    #[test]
    fn test_log_wear_missing_garment() {
        let mut catalog = scenario_a();

        let err = catalog.log_wear(Category::Shoes, "Tee", "01/01/2024").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn test_log_wear_updates_usage() {
        let mut catalog = scenario_a();
        catalog.log_wear(Category::Tops, "tee", "01/01/2024").unwrap();
        let tee = catalog.log_wear(Category::Tops, "TEE", "01/10/2024").unwrap();

        assert_eq!(tee.times_worn(), 2);
        assert_eq!(tee.last_worn_display(), "01/10/2024");
        assert_eq!(tee.price_per_wear(), 15.0);
        // Wearing never changes the aggregate
        assert_eq!(catalog.total_value(), 80.0);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut catalog = scenario_a();
        catalog.log_wear(Category::Tops, "Shirt", "01/01/2024").unwrap();
        catalog.insert(Category::Shoes, "Boot", 150.0, "resoled").unwrap();

        let json = catalog.snapshot().to_json().unwrap();
        let restored = Catalog::restore(CatalogSnapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.total_value(), 230.0);
        assert_eq!(names(&restored, Category::Tops), vec!["Tee", "Shirt"]);
        assert_eq!(restored.find(Category::Tops, "shirt").unwrap().times_worn(), 1);
        assert_eq!(restored.find(Category::Shoes, "boot").unwrap().notes(), "resoled");
    }

    #[test]
    fn test_restore_rejects_duplicates() {
        let mut snapshot = scenario_a().snapshot();
        let copy = snapshot.garments[0].clone();
        snapshot.garments.push(copy);

        let err = Catalog::restore(snapshot).unwrap_err();
        assert!(matches!(err, CatalogError::CorruptSnapshot(_)));
    }

    #[test]
    fn test_restore_rejects_inconsistent_usage() {
        let json = r#"{"garments":[{"name":"Tee","category":"tops","cost_cents":1000,"notes":"","times_worn":2,"last_worn":null}]}"#;
        let snapshot = CatalogSnapshot::from_json(json).unwrap();

        let err = Catalog::restore(snapshot).unwrap_err();
        assert!(err.to_string().contains("times_worn=2"));
    }

    #[test]
    fn test_restore_rejects_oversized_cost() {
        let json = r#"{"garments":[{"name":"Tee","category":"tops","cost_cents":18446744073709551615,"notes":"","times_worn":0,"last_worn":null}]}"#;
        let snapshot = CatalogSnapshot::from_json(json).unwrap();

        let err = Catalog::restore(snapshot).unwrap_err();
        assert!(matches!(err, CatalogError::CorruptSnapshot(_)));
    }
}
