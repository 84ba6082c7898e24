use std::collections::{BTreeMap, BTreeSet, HashMap};

use pricetag_core::{DomainError, DomainResult, Entity, ItemId, Money, Tag};

use crate::item::{Item, ItemSnapshot};

/// Result of [`Catalog::insert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// No item existed under the id.
    Created,
    /// An existing item was replaced.
    Replaced,
}

impl InsertOutcome {
    pub fn is_new(self) -> bool {
        self == InsertOutcome::Created
    }
}

/// Secondary index: tag -> items carrying it, ordered by `(price, id)`.
///
/// The price is part of the key, so a price change must go through
/// [`TagIndex::reprice`] (remove + reinsert) to keep the ordering valid.
/// Empty collections are dropped, never kept as placeholders.
#[derive(Debug, Clone, Default)]
struct TagIndex {
    entries: HashMap<Tag, BTreeSet<(Money, ItemId)>>,
}

impl TagIndex {
    fn attach(&mut self, tag: Tag, price: Money, id: ItemId) {
        self.entries.entry(tag).or_default().insert((price, id));
    }

    /// Returns `true` if an entry was removed.
    fn detach(&mut self, tag: Tag, price: Money, id: ItemId) -> bool {
        let Some(set) = self.entries.get_mut(&tag) else {
            return false;
        };
        let removed = set.remove(&(price, id));
        if set.is_empty() {
            self.entries.remove(&tag);
            tracing::trace!(tag = tag.get(), "dropped empty tag collection");
        }
        removed
    }

    /// Move an entry to its new position; no-op when the entry is absent.
    fn reprice(&mut self, tag: Tag, id: ItemId, old: Money, new: Money) {
        if let Some(set) = self.entries.get_mut(&tag) {
            if set.remove(&(old, id)) {
                set.insert((new, id));
            }
        }
    }

    fn get(&self, tag: Tag) -> Option<&BTreeSet<(Money, ItemId)>> {
        self.entries.get(&tag)
    }
}

/// In-memory item catalog.
///
/// Owns the primary index (id -> item) and the tag index. Every mutating
/// operation updates both before returning, so the following always hold:
///
/// - each tag of a stored item has exactly one entry for that item, at the
///   item's current price
/// - the tag index never references an id missing from the primary index
/// - tag collections are never empty
///
/// Queries on absent ids or tags return zero values rather than errors.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<ItemId, Item>,
    tags: TagIndex,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Insert a new item or replace an existing one.
    ///
    /// When replacing with an empty tag list, the previous description is
    /// kept and only the price changes. The replacement is applied as one
    /// step: the old entry is unlinked and the new one linked before return.
    pub fn insert(&mut self, id: ItemId, price: Money, tags: &[Tag]) -> InsertOutcome {
        let (outcome, description) = match self.items.remove(&id) {
            None => (InsertOutcome::Created, tags.to_vec()),
            Some(old) => {
                self.unlink(&old);
                let description = if tags.is_empty() {
                    old.into_description()
                } else {
                    tags.to_vec()
                };
                (InsertOutcome::Replaced, description)
            }
        };

        let item = Item::new(id, price, description);
        for &tag in item.description() {
            self.tags.attach(tag, price, id);
        }
        self.items.insert(id, item);

        tracing::debug!(id = id.get(), %price, ?outcome, "catalog insert");
        outcome
    }

    /// Current price of an item, or zero if absent.
    pub fn find(&self, id: ItemId) -> Money {
        self.items.get(&id).map_or(Money::ZERO, Item::price)
    }

    /// Copy of an item's state.
    pub fn item(&self, id: ItemId) -> Option<ItemSnapshot> {
        self.items.get(&id).map(Item::snapshot)
    }

    /// Remove an item and return the sum of its description tags.
    ///
    /// Repeated tags are counted once per occurrence. Absent ids return 0.
    pub fn delete(&mut self, id: ItemId) -> i64 {
        let Some(item) = self.items.remove(&id) else {
            return 0;
        };
        let sum = self.unlink(&item);
        tracing::debug!(id = id.get(), sum, "catalog delete");
        sum
    }

    /// Lowest price among items carrying `tag`, or zero.
    pub fn find_min_price(&self, tag: Tag) -> Money {
        self.tags
            .get(tag)
            .and_then(BTreeSet::first)
            .map_or(Money::ZERO, |&(price, _)| price)
    }

    /// Highest price among items carrying `tag`, or zero.
    pub fn find_max_price(&self, tag: Tag) -> Money {
        self.tags
            .get(tag)
            .and_then(BTreeSet::last)
            .map_or(Money::ZERO, |&(price, _)| price)
    }

    /// Number of items carrying `tag` priced within `[low, high]`.
    ///
    /// Returns 0 when `low > high` or when no item carries the tag.
    pub fn find_price_range(&self, tag: Tag, low: Money, high: Money) -> usize {
        self.try_find_price_range(tag, low, high).unwrap_or(0)
    }

    /// Like [`find_price_range`](Self::find_price_range), but reports an
    /// unknown tag as [`DomainError::TagNotFound`].
    pub fn try_find_price_range(&self, tag: Tag, low: Money, high: Money) -> DomainResult<usize> {
        if low > high {
            return Ok(0);
        }
        let set = self.tags.get(tag).ok_or(DomainError::tag_not_found(tag))?;
        let lower = (low, ItemId::new(i64::MIN));
        let upper = (high, ItemId::new(i64::MAX));
        Ok(set.range(lower..=upper).count())
    }

    /// Raise the price of every item with id in `[low, high]` by
    /// `rate_percent` percent, discarding fractional cents.
    ///
    /// Returns the summed increase across all affected items.
    pub fn price_hike(&mut self, low: ItemId, high: ItemId, rate_percent: f64) -> Money {
        if low > high {
            return Money::ZERO;
        }

        let mut net_cents: i128 = 0;
        let mut touched = 0usize;
        for (&id, item) in self.items.range_mut(low..=high) {
            let old = item.price();
            let (new, increase) = old.hiked(rate_percent);
            item.set_price(new);
            for &tag in item.description() {
                self.tags.reprice(tag, id, old, new);
            }
            net_cents = net_cents.saturating_add(increase);
            touched += 1;
        }

        let net = Money::from_total_cents(net_cents);
        tracing::debug!(
            low = low.get(),
            high = high.get(),
            rate_percent,
            touched,
            %net,
            "catalog price hike"
        );
        net
    }

    /// Remove the listed tags from an item's description.
    ///
    /// Returns the sum of the listed tags the item actually carried, each
    /// counted once. Every occurrence is stripped from the description.
    /// Absent ids return 0.
    pub fn remove_names(&mut self, id: ItemId, tags: &[Tag]) -> i64 {
        self.try_remove_names(id, tags).unwrap_or(0)
    }

    /// Like [`remove_names`](Self::remove_names), but reports an unknown id
    /// as [`DomainError::ItemNotFound`].
    pub fn try_remove_names(&mut self, id: ItemId, tags: &[Tag]) -> DomainResult<i64> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or(DomainError::item_not_found(id))?;
        let price = item.price();

        let mut sum: i64 = 0;
        for &tag in tags {
            if self.tags.detach(tag, price, id) {
                sum = sum.wrapping_add(tag.get());
            }
        }
        item.strip_tags(tags);

        tracing::debug!(id = id.get(), sum, "catalog remove names");
        Ok(sum)
    }

    /// Number of items carrying `tag`.
    pub fn tag_len(&self, tag: Tag) -> usize {
        self.tags.get(tag).map_or(0, BTreeSet::len)
    }

    /// Items carrying `tag`, cheapest first (equal prices by ascending id).
    pub fn items_with_tag(&self, tag: Tag) -> Vec<(ItemId, Money)> {
        self.tags
            .get(tag)
            .map(|set| set.iter().map(|&(price, id)| (id, price)).collect())
            .unwrap_or_default()
    }

    /// Audit both indexes against each other.
    ///
    /// Returns the first inconsistency found as an invariant violation.
    pub fn check_invariants(&self) -> DomainResult<()> {
        for (&id, item) in &self.items {
            for &tag in item.description() {
                let set = self.tags.get(tag).ok_or_else(|| {
                    DomainError::invariant(format!("item {id} carries tag {tag} with no collection"))
                })?;
                let entries: Vec<Money> = set
                    .iter()
                    .filter(|(_, entry_id)| *entry_id == id)
                    .map(|&(price, _)| price)
                    .collect();
                if entries != [item.price()] {
                    return Err(DomainError::invariant(format!(
                        "tag {tag} holds {entries:?} for item {id} priced {}",
                        item.price()
                    )));
                }
            }
        }

        for (&tag, set) in &self.tags.entries {
            if set.is_empty() {
                return Err(DomainError::invariant(format!("tag {tag} has an empty collection")));
            }
            for &(price, id) in set {
                let item = self.items.get(&id).ok_or_else(|| {
                    DomainError::invariant(format!("tag {tag} references missing item {id}"))
                })?;
                if !item.carries(tag) || item.price() != price {
                    return Err(DomainError::invariant(format!(
                        "tag {tag} entry ({price}, {id}) does not match item"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Unlink an item from the tag index; returns the sum of its tags.
    fn unlink(&mut self, item: &Item) -> i64 {
        let id = *item.id();
        let mut sum: i64 = 0;
        for &tag in item.description() {
            self.tags.detach(tag, item.price(), id);
            sum = sum.wrapping_add(tag.get());
        }
        sum
    }
}
