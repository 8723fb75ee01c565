//! Stable in-place merge sort with optional parallel recursion.
//!
//! The two halves of every split are disjoint `&mut` slices obtained from
//! [`slice::split_at_mut`], so sorting them on different threads needs no
//! locking. Forking uses [`rayon::join`].
//!
//! # Policies
//! - [`SortPolicy::Sequential`]: plain recursion.
//! - [`SortPolicy::AlwaysParallel`]: fork at every level. Correct, but task
//!   overhead dominates near the leaves.
//! - [`SortPolicy::Threshold`]: fork only while a sub-slice is longer than
//!   `cutoff`, then finish it sequentially. The cutoff never changes the result.

mod merge;

use merge::merge;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sub-slices at or below this length are sorted without forking.
pub const DEFAULT_CUTOFF: usize = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    Sequential,
    AlwaysParallel,
    Threshold { cutoff: usize },
}

impl Default for SortPolicy {
    fn default() -> Self {
        SortPolicy::Threshold {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

/// Sort `s` in place in ascending order.
pub fn sort<T: Ord + Clone + Send>(s: &mut [T], policy: SortPolicy) {
    sort_by(s, policy, T::cmp);
}

/// Sort `s` in place with a comparator. Equal elements keep their relative order.
pub fn sort_by<T, F>(s: &mut [T], policy: SortPolicy, cmp: F)
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    log::debug!("merge sort of {} element(s) with {policy:?}", s.len());
    match policy {
        SortPolicy::Sequential => sequential(s, &cmp),
        SortPolicy::AlwaysParallel => always_parallel(s, &cmp),
        SortPolicy::Threshold { cutoff } => gated(s, cutoff, &cmp),
    }
}

/// Sort `s` in place by a key. Equal keys keep their relative order.
pub fn sort_by_key<T, K, F>(s: &mut [T], policy: SortPolicy, key: F)
where
    T: Clone + Send,
    K: Ord,
    F: Fn(&T) -> K + Sync,
{
    sort_by(s, policy, |a, b| key(a).cmp(&key(b)));
}

fn sequential<T, F>(s: &mut [T], cmp: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if s.len() > 1 {
        let middle = s.len() / 2;
        let (left, right) = s.split_at_mut(middle);
        sequential(left, cmp);
        sequential(right, cmp);
        merge(s, middle, cmp);
    }
}

fn always_parallel<T, F>(s: &mut [T], cmp: &F)
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if s.len() > 1 {
        let middle = s.len() / 2;
        let (left, right) = s.split_at_mut(middle);
        rayon::join(|| always_parallel(left, cmp), || always_parallel(right, cmp));
        merge(s, middle, cmp);
    }
}

fn gated<T, F>(s: &mut [T], cutoff: usize, cmp: &F)
where
    T: Clone + Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if s.len() <= 1 {
        return;
    }
    if s.len() <= cutoff {
        sequential(s, cmp);
        return;
    }
    let middle = s.len() / 2;
    let (left, right) = s.split_at_mut(middle);
    rayon::join(|| gated(left, cutoff, cmp), || gated(right, cutoff, cmp));
    merge(s, middle, cmp);
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICIES: [SortPolicy; 4] = [
        SortPolicy::Sequential,
        SortPolicy::AlwaysParallel,
        SortPolicy::Threshold { cutoff: 2 },
        SortPolicy::Threshold {
            cutoff: DEFAULT_CUTOFF,
        },
    ];

    #[test]
    fn sorts_reference_input_under_every_policy() {
        for policy in POLICIES {
            let mut s = vec![5, 8, 9, 5, 0, 10, 1, 6];
            sort(&mut s, policy);
            assert_eq!(s, vec![0, 1, 5, 5, 6, 8, 9, 10], "{policy:?}");
        }
    }

    #[test]
    fn trivial_inputs() {
        for policy in POLICIES {
            let mut empty: Vec<u8> = vec![];
            sort(&mut empty, policy);
            assert!(empty.is_empty());

            let mut one = vec![42];
            sort(&mut one, policy);
            assert_eq!(one, vec![42]);
        }
    }

    #[test]
    fn zero_cutoff_forks_all_the_way_down() {
        let mut s: Vec<i64> = (0..100).rev().collect();
        sort(&mut s, SortPolicy::Threshold { cutoff: 0 });
        assert_eq!(s, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn sort_by_descending() {
        let mut s = vec![3, 1, 2];
        sort_by(&mut s, SortPolicy::AlwaysParallel, |a: &i32, b: &i32| b.cmp(a));
        assert_eq!(s, vec![3, 2, 1]);
    }
}
