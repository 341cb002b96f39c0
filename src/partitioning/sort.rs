//! Fixed-size sorting networks for the multi-hit descent order.
//!
//! When three or four children of a quad-node are hit, traversal must visit
//! them in ascending entry-distance order. The entries carry the original
//! child lane index, which breaks distance ties: equal distances keep their
//! input order, so the traversal order is deterministic for identical
//! inputs.

use crate::math::Real;

/// An entry to be ordered: entry distance, original child lane, payload.
pub type DistanceEntry<T> = (Real, u8, T);

#[inline]
fn cmp_swap<T: Copy>(v: &mut [DistanceEntry<T>], i: usize, j: usize) {
    let (a, b) = (v[i], v[j]);
    if a.0 > b.0 || (a.0 == b.0 && a.1 > b.1) {
        v[i] = b;
        v[j] = a;
    }
}

/// Sorts two entries by ascending distance (ties by ascending lane).
#[inline]
pub fn sort2<T: Copy>(v: &mut [DistanceEntry<T>]) {
    debug_assert_eq!(v.len(), 2);
    cmp_swap(v, 0, 1);
}

/// Sorts three entries by ascending distance (ties by ascending lane).
#[inline]
pub fn sort3<T: Copy>(v: &mut [DistanceEntry<T>]) {
    debug_assert_eq!(v.len(), 3);
    cmp_swap(v, 0, 1);
    cmp_swap(v, 1, 2);
    cmp_swap(v, 0, 1);
}

/// Sorts four entries by ascending distance (ties by ascending lane).
#[inline]
pub fn sort4<T: Copy>(v: &mut [DistanceEntry<T>]) {
    debug_assert_eq!(v.len(), 4);
    cmp_swap(v, 0, 1);
    cmp_swap(v, 2, 3);
    cmp_swap(v, 0, 2);
    cmp_swap(v, 1, 3);
    cmp_swap(v, 1, 2);
}

#[cfg(test)]
mod test {
    use super::{sort3, sort4};

    #[test]
    fn four_children_hit_at_1_4_2_3() {
        let mut v = [(1.0, 0, 'a'), (4.0, 1, 'b'), (2.0, 2, 'c'), (3.0, 3, 'd')];
        sort4(&mut v);
        assert_eq!(
            v.map(|e| e.0),
            [1.0, 2.0, 3.0, 4.0],
            "children hit at distances (1, 4, 2, 3) must be visited as 1, 2, 3, 4"
        );
        assert_eq!(v.map(|e| e.2), ['a', 'c', 'd', 'b']);
    }

    #[test]
    fn equal_distances_keep_lane_order() {
        let mut v = [(2.0, 0, 'a'), (2.0, 1, 'b'), (1.0, 2, 'c'), (2.0, 3, 'd')];
        sort4(&mut v);
        assert_eq!(v.map(|e| e.2), ['c', 'a', 'b', 'd']);

        let mut v = [(5.0, 0, 'a'), (5.0, 1, 'b'), (5.0, 2, 'c')];
        sort3(&mut v);
        assert_eq!(v.map(|e| e.2), ['a', 'b', 'c']);
    }

    #[test]
    fn exhaustive_permutations_of_four() {
        let distances = [3.0, 1.0, 2.0, 2.0];
        // All orderings of the four values above must come out sorted, with
        // the duplicate pair ordered by lane.
        let mut perm = [0usize, 1, 2, 3];
        let mut perms = vec![];
        heap_permutations(&mut perm, 4, &mut perms);

        for perm in perms {
            let mut v: Vec<_> = perm
                .iter()
                .enumerate()
                .map(|(lane, &p)| (distances[p], lane as u8, p))
                .collect();
            sort4(&mut v);

            for pair in v.windows(2) {
                assert!(
                    pair[0].0 < pair[1].0 || (pair[0].0 == pair[1].0 && pair[0].1 < pair[1].1)
                );
            }
        }
    }

    fn heap_permutations(v: &mut [usize; 4], k: usize, out: &mut Vec<[usize; 4]>) {
        if k == 1 {
            out.push(*v);
            return;
        }
        for i in 0..k {
            heap_permutations(v, k - 1, out);
            if k % 2 == 0 {
                v.swap(i, k - 1);
            } else {
                v.swap(0, k - 1);
            }
        }
    }
}
