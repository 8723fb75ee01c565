use std::cmp::Ordering;

/// Merge the sorted halves `s[..middle]` and `s[middle..]` in place.
///
/// The whole sub-slice is copied to a scratch buffer, then written back by
/// repeatedly taking the smaller head (the left one on ties, which keeps the
/// sort stable). Only a left remainder needs copying: a right remainder
/// already sits at the tail of `s`.
pub(crate) fn merge<T, F>(s: &mut [T], middle: usize, cmp: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let helper = s.to_vec();
    let high = s.len();
    let mut left = 0;
    let mut right = middle;
    let mut current = 0;

    while left < middle && right < high {
        if cmp(&helper[left], &helper[right]) != Ordering::Greater {
            s[current] = helper[left].clone();
            left += 1;
        } else {
            s[current] = helper[right].clone();
            right += 1;
        }
        current += 1;
    }

    let remaining = middle - left;
    s[current..current + remaining].clone_from_slice(&helper[left..middle]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_interleaved_halves() {
        let mut s = [1, 3, 5, 7, 2, 4, 6, 8];
        merge(&mut s, 4, &i32::cmp);
        assert_eq!(s, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn left_remainder_is_copied_back() {
        let mut s = [5, 6, 7, 1, 2];
        merge(&mut s, 3, &i32::cmp);
        assert_eq!(s, [1, 2, 5, 6, 7]);
    }

    #[test]
    fn right_remainder_stays_in_place() {
        let mut s = [1, 2, 5, 6, 7];
        merge(&mut s, 2, &i32::cmp);
        assert_eq!(s, [1, 2, 5, 6, 7]);
    }

    #[test]
    fn ties_prefer_the_left_half() {
        let mut s = [(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')];
        merge(&mut s, 2, &|x: &(i32, char), y: &(i32, char)| x.0.cmp(&y.0));
        assert_eq!(s, [(1, 'a'), (1, 'c'), (2, 'b'), (2, 'd')]);
    }

    #[test]
    fn empty_halves_are_fine() {
        let mut s = [3, 4];
        merge(&mut s, 0, &i32::cmp);
        assert_eq!(s, [3, 4]);
        merge(&mut s, 2, &i32::cmp);
        assert_eq!(s, [3, 4]);
    }
}
