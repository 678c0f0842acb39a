#![forbid(unsafe_code)]

//! Category filtering over a result set.

use crate::catalog::ALL_FILTER;
use crate::item::Item;

/// Items whose category equals `category`, or all items for [`ALL_FILTER`].
///
/// Order is preserved. Ids that match nothing yield an empty subset.
pub fn filter_items<'a>(items: &'a [Item], category: &str) -> Vec<&'a Item> {
    if category == ALL_FILTER {
        return items.iter().collect();
    }
    items.iter().filter(|i| i.category() == category).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock_inventory;
    use crate::item::Rarity;
    use proptest::prelude::*;

    fn names<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|i| i.name()).collect()
    }

    #[test]
    fn all_returns_everything_in_order() {
        let items = mock_inventory();
        let visible = filter_items(&items, ALL_FILTER);
        assert_eq!(visible.len(), 8);
        assert!(visible.iter().zip(&items).all(|(a, b)| *a == b));
    }

    #[test]
    fn category_subset() {
        let items = mock_inventory();
        assert_eq!(
            names(&filter_items(&items, "Back Accessory")),
            ["Neon Wings", "Rainbow Cape"]
        );
        assert_eq!(names(&filter_items(&items, "Hat")), ["Crimson Samurai Helmet"]);
        assert_eq!(names(&filter_items(&items, "Gear")), ["Galaxy Sword"]);
    }

    #[test]
    fn unknown_category_is_empty() {
        let items = mock_inventory();
        assert!(filter_items(&items, "Emote").is_empty());
        assert!(filter_items(&items, "hat").is_empty());
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(filter_items(&[], ALL_FILTER).is_empty());
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            0u32..1000,
            prop::sample::select(vec!["Hat", "Gear", "Shirt", "Pants"]),
            0usize..5,
        )
            .prop_map(|(id, cat, r)| Item::new(id, format!("item-{id}"), cat, None, "?", Rarity::ALL[r]))
    }

    proptest! {
        #[test]
        fn filter_is_order_preserving_subset(
            items in prop::collection::vec(arb_item(), 0..30),
            cat in prop::sample::select(vec!["Hat", "Gear", "Shirt", "Pants", "Emote"]),
        ) {
            let visible = filter_items(&items, cat);
            prop_assert!(visible.iter().all(|i| i.category() == cat));
            let expected: Vec<&Item> = items.iter().filter(|i| i.category() == cat).collect();
            prop_assert_eq!(visible, expected);
        }

        #[test]
        fn all_is_identity(items in prop::collection::vec(arb_item(), 0..30)) {
            let visible = filter_items(&items, ALL_FILTER);
            prop_assert_eq!(visible.len(), items.len());
        }
    }
}
