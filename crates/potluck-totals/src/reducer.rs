//! Name/Brand Merge-Reducer
//!
//! Folds a flat item list into per-category buckets. Buckets and the
//! entries inside them keep first-seen order, so the same input always
//! produces the same output.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::category::category_key;
use crate::item::{ContributedItem, ItemKind};

/// How items inside one bucket are merged into entries.
///
/// Dishes and drinks merge differently on purpose: dishes by name
/// (ignoring case), drinks by brand. A brand-less drink never merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Same name, compared case-insensitively
    CaseInsensitiveName,
    /// Same brand, compared exactly; no brand means no merge
    Brand,
    /// Every item is its own entry
    Distinct,
}

impl MergePolicy {
    pub fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Dish => MergePolicy::CaseInsensitiveName,
            ItemKind::Drink => MergePolicy::Brand,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EntryKey {
    Name(String),
    Brand(String),
    Unmerged,
}

impl EntryKey {
    fn of(item: &ContributedItem, policy: MergePolicy) -> Self {
        match policy {
            MergePolicy::CaseInsensitiveName => EntryKey::Name(item.display_name.to_lowercase()),
            MergePolicy::Brand => match item.brand.as_deref() {
                Some(brand) if !brand.is_empty() => EntryKey::Brand(brand.to_string()),
                _ => EntryKey::Unmerged,
            },
            MergePolicy::Distinct => EntryKey::Unmerged,
        }
    }

    fn merges_with(&self, other: &EntryKey) -> bool {
        !matches!(self, EntryKey::Unmerged) && self == other
    }
}

/// One merged line inside a bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Name of the first item merged into this entry (brand for drinks)
    pub name: String,
    pub quantity: f64,
    /// Contributor names, first-seen order, no duplicates
    pub contributors: IndexSet<String>,
    #[serde(skip)]
    key: EntryKey,
}

impl Entry {
    fn start(item: &ContributedItem, key: EntryKey) -> Self {
        let name = match &key {
            EntryKey::Brand(brand) => brand.clone(),
            _ => item.display_name.clone(),
        };
        let mut contributors = IndexSet::new();
        contributors.insert(item.contributor_name.clone());
        Self {
            name,
            quantity: item.quantity,
            contributors,
            key,
        }
    }

    fn absorb(&mut self, item: &ContributedItem) {
        self.quantity += item.quantity;
        self.contributors.insert(item.contributor_name.clone());
    }
}

/// All entries sharing one display category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub category_key: String,
    /// Always the sum of `entries[*].quantity`
    pub total_quantity: f64,
    pub entries: Vec<Entry>,
}

impl Bucket {
    fn new(category_key: String) -> Self {
        Self {
            category_key,
            total_quantity: 0.0,
            entries: Vec::new(),
        }
    }

    fn add(&mut self, item: &ContributedItem, policy: MergePolicy) {
        let key = EntryKey::of(item, policy);
        match self.entries.iter_mut().find(|e| e.key.merges_with(&key)) {
            Some(entry) => entry.absorb(item),
            None => self.entries.push(Entry::start(item, key)),
        }
        self.total_quantity += item.quantity;
    }
}

/// Group items by category, merging each item by its own kind's policy
pub fn reduce(items: &[ContributedItem]) -> IndexMap<String, Bucket> {
    reduce_by(items, |item| MergePolicy::for_kind(item.kind))
}

/// Group items by category with one merge policy for every item
pub fn reduce_with(items: &[ContributedItem], policy: MergePolicy) -> IndexMap<String, Bucket> {
    reduce_by(items, |_| policy)
}

fn reduce_by<F>(items: &[ContributedItem], policy_of: F) -> IndexMap<String, Bucket>
where
    F: Fn(&ContributedItem) -> MergePolicy,
{
    let mut buckets: IndexMap<String, Bucket> = IndexMap::new();
    for item in items {
        let key = category_key(item).to_string();
        buckets
            .entry(key.clone())
            .or_insert_with(|| Bucket::new(key))
            .add(item, policy_of(item));
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dishes_merge_ignoring_case() {
        let items = vec![
            ContributedItem::dish("Pie", 500.0, "Desert", "Ann"),
            ContributedItem::dish("pie", 300.0, "Desert", "Bob"),
        ];
        let buckets = reduce(&items);
        let desert = &buckets["Desert"];

        assert_eq!(desert.entries.len(), 1);
        assert_eq!(desert.entries[0].name, "Pie");
        assert_eq!(desert.entries[0].quantity, 800.0);
        assert_eq!(
            desert.entries[0].contributors.iter().collect::<Vec<_>>(),
            vec!["Ann", "Bob"]
        );
        assert_eq!(desert.total_quantity, 800.0);
    }

    #[test]
    fn test_same_contributor_listed_once() {
        let items = vec![
            ContributedItem::dish("Salad", 200.0, "Entree", "Ann"),
            ContributedItem::dish("SALAD", 100.0, "Entree", "Ann"),
        ];
        let buckets = reduce(&items);
        let entry = &buckets["Entree"].entries[0];

        assert_eq!(entry.quantity, 300.0);
        assert_eq!(entry.contributors.len(), 1);
    }

    #[test]
    fn test_drinks_merge_by_brand() {
        let items = vec![
            ContributedItem::drink("Lager", Some("Ursus"), 2.0, "Beer", "Ann"),
            ContributedItem::drink("Pils", Some("Ursus"), 1.5, "Beer", "Bob"),
            ContributedItem::drink("Stout", Some("ursus"), 1.0, "Beer", "Cal"),
        ];
        let buckets = reduce(&items);
        let beer = &buckets["Beer"];

        assert_eq!(beer.entries.len(), 2);
        assert_eq!(beer.entries[0].name, "Ursus");
        assert_eq!(beer.entries[0].quantity, 3.5);
        assert_eq!(beer.entries[1].name, "ursus");
        assert_eq!(beer.total_quantity, 4.5);
    }

    #[test]
    fn test_brandless_drinks_never_merge() {
        let items = vec![
            ContributedItem::drink("Lemonade", None, 1.0, "Soft Drinks", "Ann"),
            ContributedItem::drink("Lemonade", None, 2.0, "Soft Drinks", "Ann"),
            ContributedItem::drink("Lemonade", Some(""), 0.5, "Soft Drinks", "Bob"),
        ];
        let buckets = reduce(&items);
        let soft = &buckets["Soft Drinks"];

        assert_eq!(soft.entries.len(), 3);
        assert_eq!(soft.entries[0].name, "Lemonade");
        assert_eq!(soft.total_quantity, 3.5);
    }

    #[test]
    fn test_distinct_policy_keeps_every_item() {
        let items = vec![
            ContributedItem::dish("Pie", 500.0, "Desert", "Ann"),
            ContributedItem::dish("Pie", 300.0, "Desert", "Bob"),
        ];
        let buckets = reduce_with(&items, MergePolicy::Distinct);

        assert_eq!(buckets["Desert"].entries.len(), 2);
        assert_eq!(buckets["Desert"].total_quantity, 800.0);
    }

    #[test]
    fn test_buckets_keep_first_seen_order() {
        let items = vec![
            ContributedItem::dish("Cake", 1.0, "Snacks", "Ann"),
            ContributedItem::dish("Soup", 1.0, "Entree", "Bob"),
            ContributedItem::dish("Chips", 1.0, "Snacks", "Cal"),
        ];
        let keys: Vec<_> = reduce(&items).keys().cloned().collect();
        assert_eq!(keys, vec!["Snacks", "Entree"]);
    }

    #[test]
    fn test_other_category_groups_by_label() {
        let items = vec![
            ContributedItem::drink("Cider", Some("Kopparberg"), 1.0, "Other", "Ann")
                .with_other_category("Cider"),
            ContributedItem::drink("Mead", None, 1.0, "Other", "Bob"),
        ];
        let keys: Vec<_> = reduce(&items).keys().cloned().collect();
        assert_eq!(keys, vec!["Cider", "Other"]);
    }
}
