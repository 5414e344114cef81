//! The ordered agent set and its algebra.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use patchwork_core::{LinkId, PatchId, TurtleId};
use rand::Rng;

use crate::cursor::Cursor;

/// Keys that can be stored in an [`OrderedAgentSet`].
pub trait AgentKey: Copy + Eq + Hash + fmt::Debug {}

impl<T: Copy + Eq + Hash + fmt::Debug> AgentKey for T {}

/// A set of patches.
pub type PatchSet = OrderedAgentSet<PatchId>;
/// A set of turtles.
pub type TurtleSet = OrderedAgentSet<TurtleId>;
/// A set of links.
pub type LinkSet = OrderedAgentSet<LinkId>;

/// An ordered collection of distinct agent keys.
///
/// Order is insertion order until the set is explicitly re-sorted with
/// [`sort_asc`](Self::sort_asc) or [`sort_desc`](Self::sort_desc).
/// Removal preserves the relative order of the remaining members.
///
/// Equality compares membership only, ignoring order.
#[derive(Clone, PartialEq, Eq)]
pub struct OrderedAgentSet<K: AgentKey> {
    members: IndexSet<K>,
}

impl<K: AgentKey> Default for OrderedAgentSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AgentKey> fmt::Debug for OrderedAgentSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.members.iter()).finish()
    }
}

impl<K: AgentKey> OrderedAgentSet<K> {
    /// An empty set.
    pub fn new() -> Self {
        Self {
            members: IndexSet::new(),
        }
    }

    /// An empty set with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: IndexSet::with_capacity(capacity),
        }
    }

    // ── Membership ──────────────────────────────────────────────

    /// Append `key`. Returns `false` if it was already a member, in which
    /// case its position is unchanged.
    pub fn insert(&mut self, key: K) -> bool {
        self.members.insert(key)
    }

    /// Remove `key`, keeping the order of the others. Returns `false` if
    /// it was not a member.
    pub fn remove(&mut self, key: K) -> bool {
        self.members.shift_remove(&key)
    }

    /// Whether `key` is a member.
    pub fn contains(&self, key: K) -> bool {
        self.members.contains(&key)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Keep only members for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.members.retain(|k| keep(k));
    }

    /// Position of `key` in the current order.
    pub fn position(&self, key: K) -> Option<usize> {
        self.members.get_index_of(&key)
    }

    /// The member at `index` in the current order.
    pub fn get(&self, index: usize) -> Option<K> {
        self.members.get_index(index).copied()
    }

    // ── Traversal ───────────────────────────────────────────────

    /// Members in order. Double-ended, so `.rev()` walks backwards.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = K> + ExactSizeIterator + '_ {
        self.members.iter().copied()
    }

    /// A fresh bidirectional cursor positioned before the first member.
    pub fn cursor(&self) -> Cursor<'_, K> {
        Cursor::new(self)
    }

    /// The first member, or `None` if the set is empty.
    pub fn first(&self) -> Option<K> {
        self.members.first().copied()
    }

    /// The last member, or `None` if the set is empty.
    pub fn last(&self) -> Option<K> {
        self.members.last().copied()
    }

    /// A snapshot of the members in order.
    pub fn to_vec(&self) -> Vec<K> {
        self.members.iter().copied().collect()
    }

    // ── Predicates ──────────────────────────────────────────────

    /// Whether any member satisfies `pred`. `false` when empty.
    pub fn any(&self, mut pred: impl FnMut(&K) -> bool) -> bool {
        self.members.iter().any(|k| pred(k))
    }

    /// Whether every member satisfies `pred`. `true` when empty.
    pub fn all(&self, mut pred: impl FnMut(&K) -> bool) -> bool {
        self.members.iter().all(|k| pred(k))
    }

    // ── Algebra ─────────────────────────────────────────────────

    /// Members satisfying `pred`, in order.
    pub fn with(&self, mut pred: impl FnMut(&K) -> bool) -> Self {
        self.members.iter().copied().filter(|k| pred(k)).collect()
    }

    /// Members not in `other`, in order.
    pub fn who_are_not(&self, other: &Self) -> Self {
        self.with(|k| !other.contains(*k))
    }

    /// Every member except `key`, in order.
    pub fn without(&self, key: K) -> Self {
        self.with(|k| *k != key)
    }

    /// Members of `self` followed by members of `other` not already present.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.members.extend(other.members.iter().copied());
        out
    }

    /// Members of `self` that are also in `other`, in `self`'s order.
    pub fn intersection(&self, other: &Self) -> Self {
        self.with(|k| other.contains(*k))
    }

    /// The first `n` members (all of them if `n` exceeds the count).
    pub fn first_n_of(&self, n: usize) -> Self {
        self.members.iter().copied().take(n).collect()
    }

    /// The last `n` members in set order (all of them if `n` exceeds the count).
    pub fn last_n_of(&self, n: usize) -> Self {
        let skip = self.len().saturating_sub(n);
        self.members.iter().copied().skip(skip).collect()
    }

    // ── Random selection ────────────────────────────────────────

    /// A uniformly chosen member, or `None` if the set is empty.
    pub fn one_of<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<K> {
        if self.is_empty() {
            return None;
        }
        self.get(rng.random_range(0..self.len()))
    }

    /// Exactly `n` distinct members chosen uniformly, kept in set order.
    ///
    /// Returns `None` if `n` exceeds the count.
    pub fn n_of<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Option<Self> {
        if n > self.len() {
            return None;
        }
        let mut picked = rand::seq::index::sample(rng, self.len(), n).into_vec();
        picked.sort_unstable();
        Some(picked.into_iter().filter_map(|i| self.get(i)).collect())
    }

    /// Up to `n` distinct members chosen uniformly, kept in set order.
    pub fn up_to_n_of<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Self {
        let n = n.min(self.len());
        self.n_of(n, rng).unwrap_or_default()
    }

    // ── Ordering ────────────────────────────────────────────────

    /// Re-sort ascending by `key`. Stable: ties keep their current order.
    ///
    /// Keys are compared with [`f64::total_cmp`], so NaN sorts last.
    pub fn sort_asc(&mut self, key: impl FnMut(&K) -> f64) {
        self.sort_with(key, |a, b| a.total_cmp(b));
    }

    /// Re-sort descending by `key`. Stable: ties keep their current order.
    pub fn sort_desc(&mut self, key: impl FnMut(&K) -> f64) {
        self.sort_with(key, |a, b| b.total_cmp(a));
    }

    /// A sorted copy, ascending by `key`.
    pub fn sorted_asc(&self, key: impl FnMut(&K) -> f64) -> Self {
        let mut out = self.clone();
        out.sort_asc(key);
        out
    }

    /// A sorted copy, descending by `key`.
    pub fn sorted_desc(&self, key: impl FnMut(&K) -> f64) -> Self {
        let mut out = self.clone();
        out.sort_desc(key);
        out
    }

    fn sort_with(&mut self, mut key: impl FnMut(&K) -> f64, cmp: impl Fn(&f64, &f64) -> Ordering) {
        let mut keyed: Vec<(f64, K)> = self.members.iter().map(|k| (key(k), *k)).collect();
        keyed.sort_by(|a, b| cmp(&a.0, &b.0));
        self.members = keyed.into_iter().map(|(_, k)| k).collect();
    }

    /// The member with the largest `key`; the earliest one on ties.
    pub fn max_one_of(&self, mut key: impl FnMut(&K) -> f64) -> Option<K> {
        let mut best: Option<(f64, K)> = None;
        for k in self.members.iter().copied() {
            let v = key(&k);
            if best.is_none_or(|(b, _)| v.total_cmp(&b) == Ordering::Greater) {
                best = Some((v, k));
            }
        }
        best.map(|(_, k)| k)
    }

    /// The member with the smallest `key`; the earliest one on ties.
    pub fn min_one_of(&self, mut key: impl FnMut(&K) -> f64) -> Option<K> {
        self.max_one_of(|k| -key(k))
    }
}

impl<K: AgentKey> FromIterator<K> for OrderedAgentSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<K: AgentKey> Extend<K> for OrderedAgentSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<'a, K: AgentKey> IntoIterator for &'a OrderedAgentSet<K> {
    type Item = K;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().copied()
    }
}

impl<K: AgentKey> IntoIterator for OrderedAgentSet<K> {
    type Item = K;
    type IntoIter = indexmap::set::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn set(items: &[u32]) -> OrderedAgentSet<u32> {
        items.iter().copied().collect()
    }

    // ── Membership tests ────────────────────────────────────────

    #[test]
    fn insert_keeps_first_position() {
        let mut s = set(&[3, 1, 2]);
        assert!(!s.insert(3));
        assert_eq!(s.to_vec(), vec![3, 1, 2]);
        assert!(s.insert(0));
        assert_eq!(s.last(), Some(0));
    }

    #[test]
    fn remove_preserves_order() {
        let mut s = set(&[5, 6, 7, 8]);
        assert!(s.remove(6));
        assert!(!s.remove(6));
        assert_eq!(s.to_vec(), vec![5, 7, 8]);
    }

    #[test]
    fn first_and_last_on_empty_are_none() {
        let s = OrderedAgentSet::<u32>::new();
        assert_eq!(s.first(), None);
        assert_eq!(s.last(), None);
        assert!(!s.any(|_| true));
        assert!(s.all(|_| false));
    }

    // ── Algebra tests ───────────────────────────────────────────

    #[test]
    fn with_filters_in_order() {
        let s = set(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(s.with(|k| k % 2 == 0).to_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn who_are_not_and_without() {
        let s = set(&[1, 2, 3, 4]);
        assert_eq!(s.who_are_not(&set(&[2, 4, 9])).to_vec(), vec![1, 3]);
        assert_eq!(s.without(3).to_vec(), vec![1, 2, 4]);
    }

    #[test]
    fn union_and_intersection() {
        let a = set(&[1, 2, 3]);
        let b = set(&[3, 4, 1]);
        assert_eq!(a.union(&b).to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(a.intersection(&b).to_vec(), vec![1, 3]);
    }

    #[test]
    fn first_and_last_n_of() {
        let s = set(&[10, 20, 30, 40]);
        assert_eq!(s.first_n_of(2).to_vec(), vec![10, 20]);
        assert_eq!(s.last_n_of(2).to_vec(), vec![30, 40]);
        assert_eq!(s.last_n_of(9).len(), 4);
        assert!(s.first_n_of(0).is_empty());
    }

    // ── Ordering tests ──────────────────────────────────────────

    #[test]
    fn sort_asc_is_stable() {
        let mut s = set(&[1, 2, 3, 4]);
        // keys: 1->1, 2->0, 3->1, 4->0
        s.sort_asc(|k| (k % 2) as f64);
        assert_eq!(s.to_vec(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn sort_desc_is_stable() {
        let mut s = set(&[1, 2, 3, 4]);
        s.sort_desc(|k| (k % 2) as f64);
        assert_eq!(s.to_vec(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn nan_keys_sort_last_ascending() {
        let s = set(&[1, 2, 3]).sorted_asc(|k| if *k == 1 { f64::NAN } else { *k as f64 });
        assert_eq!(s.to_vec(), vec![2, 3, 1]);
    }

    #[test]
    fn max_and_min_one_of_prefer_earliest() {
        let s = set(&[4, 7, 1, 7]);
        assert_eq!(s.max_one_of(|k| *k as f64), Some(7));
        let t = set(&[5, 9, 6]);
        assert_eq!(t.min_one_of(|k| (*k % 3) as f64), Some(9));
        assert_eq!(OrderedAgentSet::<u32>::new().max_one_of(|_| 0.0), None);
    }

    // ── Random selection tests ──────────────────────────────────

    #[test]
    fn one_of_reaches_every_index() {
        let s = set(&[0, 1, 2]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[s.one_of(&mut rng).unwrap() as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn one_of_empty_is_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(OrderedAgentSet::<u32>::new().one_of(&mut rng), None);
    }

    #[test]
    fn n_of_rejects_oversized_requests() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(set(&[1, 2]).n_of(3, &mut rng).is_none());
        assert_eq!(set(&[1, 2]).up_to_n_of(3, &mut rng).len(), 2);
    }

    proptest! {
        #[test]
        fn n_of_is_an_ordered_subset(len in 0usize..40, n in 0usize..40, seed in any::<u64>()) {
            let s: OrderedAgentSet<usize> = (0..len).collect();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = s.up_to_n_of(n, &mut rng);
            prop_assert_eq!(picked.len(), n.min(len));
            let v = picked.to_vec();
            prop_assert!(v.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn union_minus_other_is_subset_of_self(
            a in proptest::collection::vec(0u32..20, 0..20),
            b in proptest::collection::vec(0u32..20, 0..20),
        ) {
            let a: OrderedAgentSet<u32> = a.into_iter().collect();
            let b: OrderedAgentSet<u32> = b.into_iter().collect();
            let diff = a.union(&b).who_are_not(&b);
            prop_assert!(diff.all(|k| a.contains(*k) && !b.contains(*k)));
            prop_assert_eq!(diff.len() + a.intersection(&b).len(), a.len());
        }
    }
}
