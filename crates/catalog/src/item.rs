use serde::{Deserialize, Serialize};

use pricetag_core::{Entity, ItemId, Money, Tag};

/// A priced, tagged catalog entry.
///
/// Only the [`Catalog`](crate::Catalog) mutates items, so that the tag index
/// always sees price and description changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    price: Money,
    description: Vec<Tag>,
}

impl Item {
    pub(crate) fn new(id: ItemId, price: Money, description: Vec<Tag>) -> Self {
        Self {
            id,
            price,
            description,
        }
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Description tags in caller order, duplicates included.
    pub fn description(&self) -> &[Tag] {
        &self.description
    }

    pub fn carries(&self, tag: Tag) -> bool {
        self.description.contains(&tag)
    }

    pub(crate) fn set_price(&mut self, price: Money) {
        self.price = price;
    }

    /// Drop every occurrence of the given tags from the description.
    pub(crate) fn strip_tags(&mut self, tags: &[Tag]) {
        self.description.retain(|t| !tags.contains(t));
    }

    pub(crate) fn into_description(self) -> Vec<Tag> {
        self.description
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            price: self.price,
            description: self.description.clone(),
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Detached copy of an item's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub price: Money,
    pub description: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[i64]) -> Vec<Tag> {
        values.iter().copied().map(Tag::new).collect()
    }

    #[test]
    fn strip_tags_removes_all_occurrences() {
        let mut item = Item::new(ItemId::new(1), Money::new(1, 0), tags(&[5, 7, 5, 9]));
        item.strip_tags(&tags(&[5, 42]));
        assert_eq!(item.description(), tags(&[7, 9]).as_slice());
        assert!(!item.carries(Tag::new(5)));
        assert!(item.carries(Tag::new(9)));
    }

    #[test]
    fn snapshot_serializes_price_as_string() {
        let item = Item::new(ItemId::new(3), Money::new(12, 5), tags(&[1, 2]));
        let json = serde_json::to_value(item.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "price": "12.5", "description": [1, 2] })
        );
    }
}
