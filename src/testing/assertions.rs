//! Assertion functions for parse and sort results.

use crate::parse::ParseOutput;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

fn counts<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    let mut m = HashMap::new();
    for item in items {
        *m.entry(item).or_insert(0) += 1;
    }
    m
}

/// Assert that two collections hold the same elements with the same
/// multiplicities, ignoring order.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironpool::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[3, 1, 1, 2], &[1, 2, 3, 1]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    let actual_counts = counts(actual);
    let expected_counts = counts(expected);
    if actual_counts != expected_counts {
        let missing: Vec<_> = expected_counts
            .iter()
            .filter(|(k, n)| actual_counts.get(*k) != Some(*n))
            .map(|(k, _)| *k)
            .collect();
        let extra: Vec<_> = actual_counts
            .iter()
            .filter(|(k, n)| expected_counts.get(*k) != Some(*n))
            .map(|(k, _)| *k)
            .collect();
        panic!(
            "Collection content mismatch:\n  Missing or miscounted: {missing:?}\n  Extra or miscounted: {extra:?}"
        );
    }
}

/// Assert that `sorted` is non-decreasing and a permutation of `original`.
///
/// # Panics
///
/// Panics on the first out-of-order pair, or if the multisets differ.
pub fn assert_sorted_permutation<T: Debug + Ord + Clone>(sorted: &[T], original: &[T]) {
    if let Some(i) = sorted.windows(2).position(|w| w[0] > w[1]) {
        panic!(
            "Not sorted at index {i}: {:?} > {:?}",
            sorted[i],
            sorted[i + 1]
        );
    }
    let mut expected = original.to_vec();
    expected.sort();
    assert_eq!(sorted, expected.as_slice(), "Sorted output is not a permutation of the input");
}

/// Assert that two parse outputs agree on records, rejections and line count,
/// ignoring order.
///
/// # Panics
///
/// Panics if any of the three differ.
pub fn assert_same_output(actual: &ParseOutput, expected: &ParseOutput) {
    assert_eq!(actual.lines_read, expected.lines_read, "lines_read mismatch");
    assert_collections_unordered_equal(&actual.records, &expected.records);
    assert_collections_unordered_equal(&actual.rejected, &expected.rejected);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "Collection content mismatch")]
    fn multiplicity_matters() {
        assert_collections_unordered_equal(&[1, 1, 2], &[1, 2, 2]);
    }

    #[test]
    #[should_panic(expected = "Not sorted")]
    fn detects_unsorted() {
        assert_sorted_permutation(&[1, 3, 2], &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn detects_lost_elements() {
        assert_sorted_permutation(&[1, 1, 3], &[1, 2, 3]);
    }
}
