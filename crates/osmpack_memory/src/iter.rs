//! Iteration over a run of consecutive items.
//!
//! Each step advances by the current item's padded size. A header that is
//! truncated or claims bytes outside the region ends the iteration; nothing
//! past the region is ever read.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::item::{checked_padded_size, Item, ItemType};

/// A typed view that can be produced from an item of a fixed type.
pub trait SubItem<'a>: Sized {
    /// Type tag this view accepts.
    const ITEM_TYPE: ItemType;

    /// Wraps an item already known to carry [`Self::ITEM_TYPE`].
    fn from_item(item: Item<&'a [u8]>) -> Self;
}

/// Iterator over the items in a byte region.
#[derive(Debug, Clone)]
pub struct ItemIter<'a> {
    rest: &'a [u8],
}

impl<'a> ItemIter<'a> {
    /// Creates an iterator over `region`. The region must start at an item
    /// boundary and end one past the last byte of the last item.
    #[must_use]
    pub fn new(region: &'a [u8]) -> Self {
        Self { rest: region }
    }

    /// Returns the bytes not yet visited.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }
}

impl<'a> Iterator for ItemIter<'a> {
    type Item = Item<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match checked_padded_size(self.rest) {
            Ok(len) => {
                let (head, tail) = self.rest.split_at(len);
                self.rest = tail;
                Item::new_checked(head).ok()
            }
            Err(e) => {
                tracing::trace!(error = %e, "stopping item iteration at malformed header");
                self.rest = &[];
                None
            }
        }
    }
}

impl FusedIterator for ItemIter<'_> {}

/// Iterator yielding mutable views over the items in a byte region.
#[derive(Debug)]
pub struct ItemIterMut<'a> {
    rest: &'a mut [u8],
}

impl<'a> ItemIterMut<'a> {
    /// Creates an iterator over `region`.
    #[must_use]
    pub fn new(region: &'a mut [u8]) -> Self {
        Self { rest: region }
    }
}

impl<'a> Iterator for ItemIterMut<'a> {
    type Item = Item<&'a mut [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.rest);
        match checked_padded_size(data) {
            Ok(len) => {
                let (head, tail) = data.split_at_mut(len);
                self.rest = tail;
                Item::new_checked(head).ok()
            }
            Err(e) => {
                tracing::trace!(error = %e, "stopping item iteration at malformed header");
                None
            }
        }
    }
}

impl FusedIterator for ItemIterMut<'_> {}

/// Iterator over the items of one type in a byte region.
///
/// Items of other types are skipped. The iterator is cheap to clone, so the
/// same range can be walked again from the start.
#[derive(Debug)]
pub struct TypedItemIter<'a, T> {
    inner: ItemIter<'a>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> TypedItemIter<'a, T> {
    /// Creates a typed iterator over `region`.
    #[must_use]
    pub fn new(region: &'a [u8]) -> Self {
        Self {
            inner: ItemIter::new(region),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for TypedItemIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: SubItem<'a>> Iterator for TypedItemIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner
            .by_ref()
            .find(|item| item.item_type() == T::ITEM_TYPE)
            .map(T::from_item)
    }
}

impl<'a, T: SubItem<'a>> FusedIterator for TypedItemIter<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::padded_length;
    use crate::item::write_item_header;

    struct Raw<'a>(Item<&'a [u8]>);

    impl<'a> SubItem<'a> for Raw<'a> {
        const ITEM_TYPE: ItemType = ItemType::TagList;

        fn from_item(item: Item<&'a [u8]>) -> Self {
            Raw(item)
        }
    }

    fn region(items: &[(ItemType, usize)]) -> Vec<u8> {
        let mut data = Vec::new();
        for &(item_type, size) in items {
            let start = data.len();
            data.resize(start + padded_length(size), 0);
            write_item_header(&mut data[start..], size as u32, item_type);
        }
        data
    }

    #[test]
    fn walks_items_by_padded_size() {
        let data = region(&[
            (ItemType::TagList, 13),
            (ItemType::WayNodeList, 8),
            (ItemType::TagList, 24),
        ]);
        let sizes: Vec<_> = ItemIter::new(&data).map(|i| i.byte_size()).collect();
        assert_eq!(sizes, vec![13, 8, 24]);
    }

    #[test]
    fn empty_region_yields_nothing() {
        assert_eq!(ItemIter::new(&[]).count(), 0);
    }

    #[test]
    fn stops_at_malformed_header() {
        let mut data = region(&[(ItemType::TagList, 8), (ItemType::TagList, 8)]);
        // second header claims more than the region holds
        data[8..12].copy_from_slice(&64u32.to_le_bytes());
        assert_eq!(ItemIter::new(&data).count(), 1);

        // zero size would loop forever if accepted
        data[8..12].copy_from_slice(&0u32.to_le_bytes());
        assert_eq!(ItemIter::new(&data).count(), 1);
    }

    #[test]
    fn typed_iteration_filters_and_restarts() {
        let data = region(&[
            (ItemType::WayNodeList, 16),
            (ItemType::TagList, 8),
            (ItemType::OuterRing, 8),
            (ItemType::TagList, 16),
        ]);
        let iter: TypedItemIter<'_, Raw<'_>> = TypedItemIter::new(&data);
        let first: Vec<_> = iter.clone().map(|r| r.0.byte_size()).collect();
        let second: Vec<_> = iter.map(|r| r.0.byte_size()).collect();
        assert_eq!(first, vec![8, 16]);
        assert_eq!(first, second);
    }

    #[test]
    fn mutable_iteration_marks_removed() {
        let mut data = region(&[(ItemType::TagList, 8), (ItemType::Way, 8)]);
        for mut item in ItemIterMut::new(&mut data) {
            if item.item_type() == ItemType::TagList {
                item.set_removed(true);
            }
        }
        let removed: Vec<_> = ItemIter::new(&data).map(|i| i.removed()).collect();
        assert_eq!(removed, vec![true, false]);
    }

    proptest::proptest! {
        #[test]
        fn arbitrary_bytes_never_overrun(data in proptest::collection::vec(0u8..=255, 0..256)) {
            let mut seen = 0;
            for item in ItemIter::new(&data) {
                proptest::prop_assert!(item.padded_size() >= crate::ITEM_HEADER_SIZE);
                seen += item.padded_size();
            }
            proptest::prop_assert!(seen <= data.len());
        }
    }
}
