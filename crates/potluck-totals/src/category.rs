//! Category key resolution

use crate::item::ContributedItem;

/// Category value that defers to the item's freeform label
pub const OTHER_CATEGORY: &str = "Other";

/// Display key an item is grouped under.
///
/// `"Other"` resolves to the item's own label (or stays `"Other"` when no
/// label was given). Nothing is case-folded or trimmed: `"beer"` and
/// `"Beer"` are two different buckets.
pub fn category_key(item: &ContributedItem) -> &str {
    if item.category == OTHER_CATEGORY {
        match item.other_category.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => OTHER_CATEGORY,
        }
    } else {
        &item.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_category_passes_through() {
        let item = ContributedItem::dish("Soup", 300.0, "Entree", "Ann");
        assert_eq!(category_key(&item), "Entree");
    }

    #[test]
    fn test_other_uses_label() {
        let item = ContributedItem::drink("Cider", None, 1.0, "Other", "Ann")
            .with_other_category("Cider");
        assert_eq!(category_key(&item), "Cider");
    }

    #[test]
    fn test_other_without_label() {
        let bare = ContributedItem::drink("Mystery", None, 1.0, "Other", "Ann");
        assert_eq!(category_key(&bare), "Other");

        let empty = bare.clone().with_other_category("");
        assert_eq!(category_key(&empty), "Other");
    }

    #[test]
    fn test_case_is_not_normalized() {
        let upper = ContributedItem::drink("A", None, 1.0, "Beer", "Ann");
        let lower = ContributedItem::drink("B", None, 1.0, "beer", "Bob");
        assert_ne!(category_key(&upper), category_key(&lower));
    }
}
