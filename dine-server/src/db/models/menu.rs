//! Menu Aggregate
//!
//! One record per restaurant holding the three denormalized dish views:
//!
//! - `dishes`: every dish ref, in staff-controlled order
//! - `feature`: the subset whose authoritative feature flag is true
//! - `category`: label -> ordered refs; a dish sits in exactly one bucket
//!
//! All three views live in this single record and are mutated in memory,
//! so one version-checked write persists them together. Invariant: every
//! ref appearing in `feature` or a category bucket also appears in
//! `dishes` and points at an existing dish record with a matching name.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{CategoryMap, DishRef, MenuViews};
use surrealdb::RecordId;
use thiserror::Error;

pub type MenuId = RecordId;

/// View-replacement failure: the submitted collection is not a
/// reordering of the refs currently in the view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("submitted {view} list is not a reordering of the current one")]
    NotAPermutation { view: &'static str },
    #[error("dish '{0}' appears more than once")]
    DuplicateRef(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuRecord {
    pub id: Option<MenuId>,
    /// Record link to the owning restaurant
    pub restaurant: RecordId,
    #[serde(default)]
    pub dishes: Vec<DishRef>,
    #[serde(default)]
    pub feature: Vec<DishRef>,
    #[serde(default)]
    pub category: CategoryMap,
    pub update_by: String,
    /// Optimistic-concurrency counter, bumped on every persisted write
    #[serde(default)]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuRecord {
    /// Empty aggregate, created lazily on the first add-dish.
    pub fn empty(restaurant: RecordId, editor: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            restaurant,
            dishes: Vec::new(),
            feature: Vec::new(),
            category: CategoryMap::new(),
            update_by: editor.to_string(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a ref by dish name in the authoritative-order view.
    pub fn find_ref(&self, name: &str) -> Option<&DishRef> {
        self.dishes.iter().find(|r| r.name == name)
    }

    /// Insert a fresh ref into all applicable views. The category bucket
    /// is created when absent.
    pub fn insert_ref(&mut self, dish_ref: DishRef, feature: bool, category: &str) {
        if feature {
            self.feature.push(dish_ref.clone());
        }
        self.category
            .entry(category.to_string())
            .or_default()
            .push(dish_ref.clone());
        self.dishes.push(dish_ref);
    }

    /// Remove a ref from all three views. An emptied category bucket is
    /// dropped entirely.
    pub fn remove_ref(&mut self, dish_id: &str) {
        self.dishes.retain(|r| r.id != dish_id);
        self.feature.retain(|r| r.id != dish_id);
        self.category.retain(|_, bucket| {
            bucket.retain(|r| r.id != dish_id);
            !bucket.is_empty()
        });
    }

    /// Replace the feature view with a staff-supplied reordering.
    ///
    /// The submitted list must be set-equal (by dish id) to the current
    /// feature list; a blind overwrite is not accepted.
    pub fn replace_feature(&mut self, new_order: Vec<DishRef>) -> Result<(), ViewError> {
        let current: BTreeSet<&str> = self.feature.iter().map(|r| r.id.as_str()).collect();
        let submitted = ref_id_set(new_order.iter())?;
        if current != submitted {
            return Err(ViewError::NotAPermutation { view: "feature" });
        }
        self.feature = new_order;
        Ok(())
    }

    /// Replace the category map with a staff-supplied regrouping.
    ///
    /// The union of all submitted buckets must be set-equal (by dish id)
    /// to the union of the current ones, with no dish in two buckets.
    pub fn replace_category(&mut self, new_map: CategoryMap) -> Result<(), ViewError> {
        // A stored map with a dish in two buckets is a data fault;
        // report it instead of panicking mid-request.
        let current = ref_id_set(self.category.values().flatten())?;
        let submitted = ref_id_set(new_map.values().flatten())?;
        if current != submitted {
            return Err(ViewError::NotAPermutation { view: "category" });
        }
        // Drop buckets submitted empty rather than storing dead keys
        let new_map: CategoryMap = new_map
            .into_iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .collect();
        self.category = new_map;
        Ok(())
    }

    /// Build the wire-level view snapshot.
    pub fn views(&self) -> MenuViews {
        MenuViews {
            dishes: self.dishes.clone(),
            feature: self.feature.clone(),
            category: self.category.clone(),
            update_by: self.update_by.clone(),
            version: self.version,
        }
    }
}

fn ref_id_set<'a>(
    refs: impl Iterator<Item = &'a DishRef>,
) -> Result<BTreeSet<&'a str>, ViewError> {
    let mut set = BTreeSet::new();
    for r in refs {
        if !set.insert(r.id.as_str()) {
            return Err(ViewError::DuplicateRef(r.name.clone()));
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MenuRecord {
        MenuRecord::empty(
            RecordId::from_table_key("restaurant", "r1"),
            "staff:1",
            Utc::now(),
        )
    }

    fn rf(id: &str, name: &str) -> DishRef {
        DishRef::new(format!("dish:{id}"), name)
    }

    #[test]
    fn insert_populates_all_applicable_views() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");

        assert_eq!(m.dishes.len(), 1);
        assert_eq!(m.feature.len(), 1);
        assert_eq!(m.category.len(), 1);
        assert_eq!(m.category["sashimi"][0].name, "Salmon Sashimi");
    }

    #[test]
    fn non_feature_dish_stays_out_of_feature_view() {
        let mut m = menu();
        m.insert_ref(rf("a", "Miso Soup"), false, "soup");

        assert_eq!(m.dishes.len(), 1);
        assert!(m.feature.is_empty());
    }

    #[test]
    fn every_ref_in_secondary_views_is_in_dishes() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");
        m.insert_ref(rf("b", "Tuna Roll"), false, "roll");
        m.insert_ref(rf("c", "Eel Roll"), true, "roll");

        let ids: BTreeSet<_> = m.dishes.iter().map(|r| r.id.as_str()).collect();
        for r in m.feature.iter().chain(m.category.values().flatten()) {
            assert!(ids.contains(r.id.as_str()));
        }
    }

    #[test]
    fn each_dish_sits_in_exactly_one_bucket() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");
        m.insert_ref(rf("b", "Tuna Roll"), false, "roll");

        for r in &m.dishes {
            let buckets = m
                .category
                .values()
                .filter(|b| b.iter().any(|x| x.id == r.id))
                .count();
            assert_eq!(buckets, 1, "{} must be in exactly one bucket", r.name);
        }
    }

    #[test]
    fn remove_drops_emptied_bucket() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");
        m.insert_ref(rf("b", "Tuna Roll"), false, "roll");

        m.remove_ref("dish:a");

        assert_eq!(m.dishes.len(), 1);
        assert!(m.feature.is_empty());
        assert!(!m.category.contains_key("sashimi"));
        assert!(m.category.contains_key("roll"));
    }

    #[test]
    fn retract_and_reassert_moves_dish_between_buckets() {
        // Rename + reclassify: Salmon Sashimi (feature, sashimi) becomes
        // Beef Roll (not feature, roll).
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");

        m.remove_ref("dish:a");
        m.insert_ref(rf("a", "Beef Roll"), false, "roll");

        assert!(m.find_ref("Salmon Sashimi").is_none());
        assert!(!m.category.contains_key("sashimi"));
        assert_eq!(m.category["roll"][0].name, "Beef Roll");
        assert!(m.feature.is_empty());
        assert_eq!(m.dishes.len(), 1);
    }

    #[test]
    fn replace_feature_accepts_permutation() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");
        m.insert_ref(rf("b", "Eel Roll"), true, "roll");

        let reordered = vec![rf("b", "Eel Roll"), rf("a", "Salmon Sashimi")];
        assert!(m.replace_feature(reordered).is_ok());
        assert_eq!(m.feature[0].id, "dish:b");
    }

    #[test]
    fn replace_feature_rejects_foreign_or_missing_refs() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");

        let err = m.replace_feature(vec![rf("z", "Ghost Dish")]).unwrap_err();
        assert_eq!(err, ViewError::NotAPermutation { view: "feature" });

        let err = m.replace_feature(vec![]).unwrap_err();
        assert_eq!(err, ViewError::NotAPermutation { view: "feature" });
    }

    #[test]
    fn replace_feature_rejects_duplicates() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), true, "sashimi");

        let err = m
            .replace_feature(vec![rf("a", "Salmon Sashimi"), rf("a", "Salmon Sashimi")])
            .unwrap_err();
        assert_eq!(err, ViewError::DuplicateRef("Salmon Sashimi".into()));
    }

    #[test]
    fn replace_category_regroups_but_keeps_the_same_set() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), false, "sashimi");
        m.insert_ref(rf("b", "Tuna Roll"), false, "roll");

        let mut regrouped = CategoryMap::new();
        regrouped.insert(
            "specials".into(),
            vec![rf("a", "Salmon Sashimi"), rf("b", "Tuna Roll")],
        );
        assert!(m.replace_category(regrouped).is_ok());
        assert_eq!(m.category.len(), 1);
        assert_eq!(m.category["specials"].len(), 2);
    }

    #[test]
    fn replace_category_rejects_dropped_dish() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), false, "sashimi");
        m.insert_ref(rf("b", "Tuna Roll"), false, "roll");

        let mut partial = CategoryMap::new();
        partial.insert("sashimi".into(), vec![rf("a", "Salmon Sashimi")]);
        let err = m.replace_category(partial).unwrap_err();
        assert_eq!(err, ViewError::NotAPermutation { view: "category" });
    }

    #[test]
    fn replace_category_reports_corrupted_stored_map() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), false, "sashimi");
        // simulate a drifted record: the same ref in a second bucket
        m.category
            .entry("specials".into())
            .or_default()
            .push(rf("a", "Salmon Sashimi"));

        let mut submitted = CategoryMap::new();
        submitted.insert("sashimi".into(), vec![rf("a", "Salmon Sashimi")]);
        assert_eq!(
            m.replace_category(submitted),
            Err(ViewError::DuplicateRef("Salmon Sashimi".into()))
        );
    }

    #[test]
    fn replace_category_rejects_dish_in_two_buckets() {
        let mut m = menu();
        m.insert_ref(rf("a", "Salmon Sashimi"), false, "sashimi");

        let mut doubled = CategoryMap::new();
        doubled.insert("sashimi".into(), vec![rf("a", "Salmon Sashimi")]);
        doubled.insert("specials".into(), vec![rf("a", "Salmon Sashimi")]);
        assert!(matches!(
            m.replace_category(doubled),
            Err(ViewError::DuplicateRef(_))
        ));
    }
}
