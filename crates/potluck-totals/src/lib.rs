//! Potluck Totals
//!
//! Pure aggregation over the dishes and drinks registered in one room:
//! - category: display key of an item (with the "Other" escape hatch)
//! - reducer: merge items into per-category buckets
//! - ordering: bucket order and user list sorts
//! - format: quantities with human units
//! - family: affiliation index to family label
//!
//! Nothing here does I/O or can fail; every call recomputes from the
//! snapshot it is given.

mod category;
mod family;
mod format;
mod item;
mod ordering;
mod reducer;

pub use category::{category_key, OTHER_CATEGORY};
pub use family::{resolve_family_name, UNKNOWN_FAMILY};
pub use format::{format_quantity, KILOGRAM_THRESHOLD};
pub use item::{ContributedItem, ItemKind, RoomContext};
pub use ordering::{meal_course_rank, sorted_items, CategoryOrder, SortMode, UNRANKED};
pub use reducer::{reduce, reduce_with, Bucket, Entry, MergePolicy};

/// Buckets in display order
pub type BucketList = Vec<Bucket>;

/// Group, merge and order a room's items.
///
/// Each item merges by its own kind's policy; the category order comes
/// from [`CategoryOrder::for_items`].
pub fn aggregate(items: &[ContributedItem]) -> BucketList {
    CategoryOrder::for_items(items).order_buckets(reduce(items))
}

/// Like [`aggregate`] but with one merge policy for every item
pub fn aggregate_with(items: &[ContributedItem], policy: MergePolicy) -> BucketList {
    CategoryOrder::for_items(items).order_buckets(reduce_with(items, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn easter_dishes() -> Vec<ContributedItem> {
        vec![
            ContributedItem::dish("Pie", 500.0, "Desert", "Ann"),
            ContributedItem::dish("pie", 300.0, "Desert", "Bob"),
            ContributedItem::dish("Lamb", 1200.0, "Main Course", "Cal"),
        ]
    }

    #[test]
    fn test_end_to_end_dishes() {
        let buckets = aggregate(&easter_dishes());

        let keys: Vec<_> = buckets.iter().map(|b| b.category_key.as_str()).collect();
        assert_eq!(keys, vec!["Main Course", "Desert"]);

        let main = &buckets[0];
        assert_eq!(main.total_quantity, 1200.0);
        assert_eq!(format_quantity(main.total_quantity, ItemKind::Dish), "1.2kg");

        let desert = &buckets[1];
        assert_eq!(desert.entries.len(), 1);
        let pie = &desert.entries[0];
        assert!(pie.name.eq_ignore_ascii_case("pie"));
        assert_eq!(pie.quantity, 800.0);
        assert!(pie.contributors.contains("Ann"));
        assert!(pie.contributors.contains("Bob"));
        assert_eq!(pie.contributors.len(), 2);
        assert_eq!(format_quantity(pie.quantity, ItemKind::Dish), "800g");
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let items = easter_dishes();
        assert_eq!(aggregate(&items), aggregate(&items));
    }

    #[test]
    fn test_drinks_end_to_end() {
        let items = vec![
            ContributedItem::drink("Red", Some("Cotnari"), 0.75, "Wine", "Ann"),
            ContributedItem::drink("Lager", Some("Ursus"), 2.0, "Beer", "Bob"),
            ContributedItem::drink("White", Some("Cotnari"), 0.75, "Wine", "Cal"),
        ];
        let buckets = aggregate(&items);

        let keys: Vec<_> = buckets.iter().map(|b| b.category_key.as_str()).collect();
        assert_eq!(keys, vec!["Beer", "Wine"]);
        assert_eq!(format_quantity(buckets[1].total_quantity, ItemKind::Drink), "1.5L");
        assert_eq!(buckets[1].entries.len(), 1);
    }

    #[test]
    fn test_aggregate_with_distinct() {
        let buckets = aggregate_with(&easter_dishes(), MergePolicy::Distinct);
        assert_eq!(buckets[1].entries.len(), 2);
    }

    #[test]
    fn test_buckets_serialize_without_merge_keys() {
        let buckets = aggregate(&easter_dishes());
        let json = serde_json::to_value(&buckets).unwrap();
        let entry = &json[1]["entries"][0];

        assert_eq!(entry["quantity"], 800.0);
        assert_eq!(entry["contributors"], serde_json::json!(["Ann", "Bob"]));
        assert!(entry.get("key").is_none());
    }
}
