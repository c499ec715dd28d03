//! Item sequencer: pads a source list so a looping strip never shows a gap.

use crate::item::DisplayItem;

/// Read-only strip of items derived from a source list.
///
/// When auto-fill is requested the source list is repeated, in order,
/// until the strip holds at least twice the visible window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    items: Vec<DisplayItem>,
    source_len: usize,
    repetitions: usize,
}

impl Sequence {
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DisplayItem> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Length of the list the sequence was built from
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// How many times the source list was laid down
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Total strip length for a given per-item extent
    pub fn extent(&self, item_extent: f64) -> f64 {
        self.items.len() as f64 * item_extent
    }

    /// Positional identity of the item at `index`: duplicated entries share
    /// a source but never an index.
    pub fn key(&self, index: usize) -> Option<String> {
        self.items
            .get(index)
            .map(|item| format!("{}-{}", item.source(), index))
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a DisplayItem;
    type IntoIter = std::slice::Iter<'a, DisplayItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Number of times `source_len` items must be laid down to cover
/// `2 * visible_count` slots. Always at least one for a non-empty source.
pub fn repetitions_for(source_len: usize, visible_count: usize, auto_fill: bool) -> usize {
    if source_len == 0 {
        return 0;
    }
    if !auto_fill {
        return 1;
    }
    visible_count.saturating_mul(2).div_ceil(source_len).max(1)
}

/// Build the looping strip for a marquee row.
///
/// Pure: the same inputs always give the same sequence. An empty source
/// gives an empty sequence, which the engine treats as idle.
pub fn build_sequence(items: &[DisplayItem], visible_count: usize, auto_fill: bool) -> Sequence {
    let repetitions = repetitions_for(items.len(), visible_count, auto_fill);

    let mut strip = Vec::with_capacity(items.len().saturating_mul(repetitions));
    for _ in 0..repetitions {
        strip.extend_from_slice(items);
    }

    Sequence {
        items: strip,
        source_len: items.len(),
        repetitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<DisplayItem> {
        (1..=n)
            .map(|i| DisplayItem::new(format!("/test{}.jpg", i), format!("Test thumbnail {}", i)))
            .collect()
    }

    #[test]
    fn test_empty_source_gives_empty_sequence() {
        let seq = build_sequence(&[], 6, true);
        assert!(seq.is_empty());
        assert_eq!(seq.repetitions(), 0);
        assert_eq!(seq.extent(296.0), 0.0);
    }

    #[test]
    fn test_without_auto_fill_keeps_source_length() {
        let source = items(4);
        let seq = build_sequence(&source, 10, false);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.as_slice(), source.as_slice());
    }

    #[test]
    fn test_auto_fill_covers_twice_the_window() {
        let source = items(4);
        for visible in 0..20 {
            let seq = build_sequence(&source, visible, true);
            assert!(seq.len() >= 2 * visible, "visible={}", visible);
            assert_eq!(seq.len() % source.len(), 0);
        }

        // 2 * 5 = 10 slots over 4 items -> 3 repetitions
        let seq = build_sequence(&source, 5, true);
        assert_eq!(seq.repetitions(), 3);
        assert_eq!(seq.len(), 12);
    }

    #[test]
    fn test_huge_visible_count_does_not_overflow() {
        assert_eq!(repetitions_for(4, usize::MAX, true), usize::MAX.div_ceil(4));
        assert_eq!(repetitions_for(4, usize::MAX, false), 1);
    }

    #[test]
    fn test_auto_fill_preserves_order_in_each_repetition() {
        let source = items(3);
        let seq = build_sequence(&source, 4, true);
        for (i, item) in seq.iter().enumerate() {
            assert_eq!(item, &source[i % source.len()]);
        }
    }

    #[test]
    fn test_large_source_is_not_repeated() {
        let source = items(12);
        let seq = build_sequence(&source, 3, true);
        assert_eq!(seq.repetitions(), 1);
        assert_eq!(seq.len(), 12);
    }

    #[test]
    fn test_keys_are_positional() {
        let source = vec![DisplayItem::new("/same.jpg", "a"), DisplayItem::new("/same.jpg", "b")];
        let seq = build_sequence(&source, 2, true);
        assert_eq!(seq.key(0).as_deref(), Some("/same.jpg-0"));
        assert_eq!(seq.key(3).as_deref(), Some("/same.jpg-3"));
        assert_eq!(seq.key(4), None);
    }
}
