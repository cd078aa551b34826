//! Behaviour shared by both layouts.
//!
//! Every check here is written once against [`StateMatrix`] and run on a
//! row-major and a column-major population holding the same values.

use super::*;
use crate::dim::{Dynamic, Fixed};
use proptest::prelude::*;

fn filled<M: StateMatrix<Value = f64>>(mut state: M, values: &[f64]) -> M {
    let d = state.dim();
    for i in 0..state.size() {
        state.state_unpack(i, &values[i * d..(i + 1) * d]).unwrap();
    }
    state
}

fn rows_of<M: StateMatrix>(state: &M) -> Vec<Vec<M::Value>> {
    (0..state.size()).map(|i| state.state_pack(i).unwrap()).collect()
}

/// Parent index in which every surviving slot keeps itself and the extra
/// copies fill the vacated slots in ascending order.
fn parents_from_counts(counts: &[usize]) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    let mut index = vec![usize::MAX; n];
    let mut extra = Vec::new();
    for (k, &c) in counts.iter().enumerate() {
        let mut c = c;
        if c > 0 && k < n {
            index[k] = k;
            c -= 1;
        }
        extra.extend(std::iter::repeat(k).take(c));
    }
    let mut extra = extra.into_iter();
    for slot in index.iter_mut().filter(|s| **s == usize::MAX) {
        *slot = extra.next().unwrap();
    }
    index
}

/// Copies of each parent beyond the one kept in its own slot.
fn extra_copies(counts: &[usize]) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    counts
        .iter()
        .enumerate()
        .flat_map(|(k, &c)| {
            let extra = if c > 0 && k < n { c - 1 } else { c };
            std::iter::repeat(k).take(extra)
        })
        .collect()
}

/// Keeps every surviving parent in its own slot and fills the other slots
/// with `extras` in the order given.
fn parents_with_extras(counts: &[usize], extras: &[usize]) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    let mut extras = extras.iter().copied();
    (0..n)
        .map(|k| {
            if k < counts.len() && counts[k] > 0 {
                k
            } else {
                extras.next().unwrap()
            }
        })
        .collect()
}

/// Whether every parent that appears in `index` sits in its own slot.
fn keeps_own_slot(index: &[usize]) -> bool {
    index
        .iter()
        .enumerate()
        .all(|(dst, &src)| src == dst || !index.contains(&dst))
}

/// Caps arbitrary counts so they sum to exactly `n`.
fn counts_summing_to(weights: &[usize], n: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n];
    let mut left = n;
    for (k, &w) in weights.iter().take(n).enumerate() {
        let take = w.min(left);
        counts[k] = take;
        left -= take;
    }
    counts[0] += left;
    counts
}

fn check_select<M>(state: M, index: &[usize])
where
    M: StateMatrix<Value = f64> + Clone + std::fmt::Debug,
{
    let before = rows_of(&state);
    let mut after = state;
    after.select(index.len(), Some(index)).unwrap();

    assert_eq!(after.size(), index.len());
    assert_eq!(after.data().len(), index.len() * after.dim());
    for (dst, &src) in index.iter().enumerate() {
        assert_eq!(after.state_pack(dst).unwrap(), before[src], "slot {dst} from {src}");
    }
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_select_duplicates_survivors() {
    let values = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0];
    let expected = vec![1.0, 1.0, 1.0, 1.0, 3.0, 3.0, 3.0, 3.0];

    let mut rows = filled(RowMajorMatrix::<f64, Fixed<2>>::new(4), &values);
    rows.select(4, Some(&[0, 0, 2, 2])).unwrap();
    assert_eq!(rows.data(), expected.as_slice());

    let mut cols = filled(ColMajorMatrix::<f64, Fixed<2>>::new(4), &values);
    cols.select(4, Some(&[0, 0, 2, 2])).unwrap();
    let mut flat = Vec::new();
    cols.read_state_matrix(MatrixLayout::RowMajor, &mut flat);
    assert_eq!(flat, expected);
}

#[test]
fn test_select_shrinks_population() {
    let values = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0];

    let mut rows = filled(RowMajorMatrix::<f64, Fixed<2>>::new(4), &values);
    rows.select(2, Some(&[3, 1])).unwrap();
    assert_eq!(rows.data(), &[4.0, 4.0, 2.0, 2.0]);
    assert_eq!(rows.data().len(), 2 * 2);

    let mut cols = filled(ColMajorMatrix::<f64, Fixed<2>>::new(4), &values);
    cols.select(2, Some(&[3, 1])).unwrap();
    assert_eq!(rows_of(&cols), vec![vec![4.0, 4.0], vec![2.0, 2.0]]);
    assert_eq!(cols.data().len(), 2 * 2);
}

#[test]
fn test_select_first_slot_duplicates_into_second() {
    let values: Vec<f64> = (0..15).map(f64::from).collect();
    let index = [0, 0, 2, 3, 4];
    check_select(filled(RowMajorMatrix::<f64, Dynamic>::with_dim(5, 3), &values), &index);
    check_select(filled(ColMajorMatrix::<f64, Dynamic>::with_dim(5, 3), &values), &index);
}

#[test]
fn test_select_ignores_trailing_index_entries() {
    let values = [1.0, 2.0, 3.0];
    let mut rows = filled(RowMajorMatrix::<f64, Fixed<1>>::new(3), &values);
    rows.select(2, Some(&[0, 0, 2, 2])).unwrap();
    assert_eq!(rows.data(), &[1.0, 1.0]);
}

#[test]
fn test_select_outside_invariant_stays_in_bounds() {
    // A swap breaks the keep-own-slot rule; values are unspecified but the
    // call must complete with a well-formed population.
    let values = [1.0, 2.0];
    let mut rows = filled(RowMajorMatrix::<f64, Fixed<1>>::new(2), &values);
    rows.select(2, Some(&[1, 0])).unwrap();
    assert_eq!(rows.size(), 2);

    let mut cols = filled(ColMajorMatrix::<f64, Fixed<1>>::new(2), &values);
    cols.select(2, Some(&[1, 0])).unwrap();
    assert_eq!(cols.data().len(), 2);
}

#[test]
fn test_parents_from_counts_keeps_own_slot() {
    assert_eq!(parents_from_counts(&[2, 0, 2, 0]), vec![0, 0, 2, 2]);
    assert_eq!(parents_from_counts(&[0, 1, 0, 1]), vec![3, 1]);
    assert_eq!(parents_from_counts(&[0, 3]), vec![1, 1, 1]);

    for counts in [&[2, 0, 2, 0][..], &[0, 1, 0, 1], &[0, 3], &[1, 0, 0, 3, 1]] {
        assert_eq!(
            parents_with_extras(counts, &extra_copies(counts)),
            parents_from_counts(counts)
        );
    }
}

#[test]
fn test_keeps_own_slot() {
    assert!(keeps_own_slot(&[0, 0, 2, 2]));
    assert!(keeps_own_slot(&[0, 3, 0, 3]));
    assert!(keeps_own_slot(&[4, 1, 1, 3, 4]));
    assert!(keeps_own_slot(&[3, 1]));
    assert!(!keeps_own_slot(&[1, 0]));
    assert!(!keeps_own_slot(&[0, 2, 1]));
}

#[test]
fn test_select_every_small_index_keeping_own_slot() {
    let mut checked = 0;
    for size in 1..=5usize {
        let values: Vec<f64> = (0..size * 2).map(|v| v as f64).collect();
        for n in 1..=5usize {
            let mut index = vec![0usize; n];
            loop {
                if keeps_own_slot(&index) {
                    check_select(filled(RowMajorMatrix::<f64, Fixed<2>>::new(size), &values), &index);
                    check_select(filled(ColMajorMatrix::<f64, Fixed<2>>::new(size), &values), &index);
                    checked += 1;
                }
                // Next index in odometer order
                let Some(pos) = index.iter().rposition(|&p| p + 1 < size) else {
                    break;
                };
                index[pos] += 1;
                index[pos + 1..].iter_mut().for_each(|p| *p = 0);
            }
        }
    }
    // size 1 alone admits exactly one index per n
    assert!(checked > 5);
}

#[test]
fn test_reserve_and_shrink_keep_values() {
    fn check<M>(state: M)
    where
        M: StateMatrix<Value = f64> + Clone + PartialEq + std::fmt::Debug,
    {
        let before = state.clone();
        let mut state = state;

        state.reserve(64);
        assert_eq!(state.data().len(), state.size() * state.dim());
        assert_eq!(state, before);

        state.reserve(1);
        assert_eq!(state, before);

        state.shrink_to_fit();
        assert_eq!(state.data().len(), state.size() * state.dim());
        assert_eq!(state, before);

        state.resize(5);
        assert_eq!(state.data().len(), 5 * state.dim());
        assert_eq!(&rows_of(&state)[..3], rows_of(&before).as_slice());
    }

    let values: Vec<f64> = (0..9).map(f64::from).collect();
    check(filled(RowMajorMatrix::<f64, Fixed<3>>::new(3), &values));
    check(filled(ColMajorMatrix::<f64, Dynamic>::with_dim(3, 3), &values));
}

// ============================================================================
// Property tests
// ============================================================================

fn population() -> impl Strategy<Value = (usize, usize, Vec<f64>)> {
    (0..24usize, 0..6usize).prop_flat_map(|(n, d)| {
        (
            Just(n),
            Just(d),
            proptest::collection::vec(-1.0e3..1.0e3f64, n * d),
        )
    })
}

fn population_with_counts() -> impl Strategy<Value = (usize, usize, Vec<f64>, Vec<usize>)> {
    (1..24usize, 1..6usize).prop_flat_map(|(n, d)| {
        (
            Just(n),
            Just(d),
            proptest::collection::vec(-1.0e3..1.0e3f64, n * d),
            proptest::collection::vec(0..4usize, n),
        )
    })
}

/// Counts paired with their extra copies in arbitrary order. With
/// `same_size` the counts sum to the population size.
fn population_with_shuffled_extras(
    same_size: bool,
) -> impl Strategy<Value = (usize, usize, Vec<f64>, Vec<usize>, Vec<usize>)> {
    population_with_counts()
        .prop_map(move |(n, d, values, counts)| {
            let counts = if same_size {
                counts_summing_to(&counts, n)
            } else {
                counts
            };
            (n, d, values, counts)
        })
        .prop_filter("empty selection", |(_, _, _, counts)| {
            counts.iter().sum::<usize>() > 0
        })
        .prop_flat_map(|(n, d, values, counts)| {
            let extras = extra_copies(&counts);
            (
                Just(n),
                Just(d),
                Just(values),
                Just(counts),
                Just(extras).prop_shuffle(),
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Serialising in either layout gives the same logical matrix.
    #[test]
    fn prop_layout_equivalence((n, d, values) in population()) {
        let rows = filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let cols = filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);

        for layout in [MatrixLayout::RowMajor, MatrixLayout::ColMajor] {
            let mut a = Vec::new();
            let mut b = Vec::new();
            rows.read_state_matrix(layout, &mut a);
            cols.read_state_matrix(layout, &mut b);
            prop_assert_eq!(a.len(), n * d);
            prop_assert_eq!(&a, &b);
        }

        let mut transposed = Vec::new();
        rows.read_state_matrix(MatrixLayout::ColMajor, &mut transposed);
        prop_assert_eq!(transposed.as_slice(), cols.data());

        for j in 0..d {
            let mut a = Vec::new();
            let mut b = Vec::new();
            rows.read_state(j, &mut a).unwrap();
            cols.read_state(j, &mut b).unwrap();
            prop_assert_eq!(a.as_slice(), cols.col_data(j));
            prop_assert_eq!(a, b);
        }
    }

    /// Shrinking or growing and coming back restores the common rows.
    #[test]
    fn prop_resize_preservation((n, d, values) in population(), other in 0..32usize) {
        let mut rows = filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let mut cols = filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let before = rows_of(&rows);

        rows.resize(other);
        cols.resize(other);
        prop_assert_eq!(rows.data().len(), other * d);
        prop_assert_eq!(cols.data().len(), other * d);
        rows.resize(n);
        cols.resize(n);

        for i in 0..n.min(other) {
            prop_assert_eq!(&rows.state_pack(i).unwrap(), &before[i]);
            prop_assert_eq!(&cols.state_pack(i).unwrap(), &before[i]);
        }
    }

    /// The identity index leaves the buffer untouched.
    #[test]
    fn prop_select_identity((n, d, values) in population()) {
        let identity: Vec<usize> = (0..n).collect();

        let mut rows = filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let rows_before = rows.clone();
        rows.select(n, Some(&identity)).unwrap();
        prop_assert_eq!(rows, rows_before);

        let mut cols = filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let cols_before = cols.clone();
        cols.select(n, Some(&identity)).unwrap();
        prop_assert_eq!(cols, cols_before);
    }

    /// Every destination receives its parent's pre-selection row, for any
    /// index that keeps surviving particles in their own slot. Covers the
    /// in-place column-major pass whenever the total count equals `n`.
    #[test]
    fn prop_select_copies_parents((n, d, values, counts) in population_with_counts()) {
        prop_assume!(counts.iter().sum::<usize>() > 0);
        let index = parents_from_counts(&counts);

        check_select(filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
        check_select(filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
    }

    /// Same-size selections, where the column-major matrix works in place.
    #[test]
    fn prop_select_in_place_same_size((n, d, values, weights) in population_with_counts()) {
        let counts = counts_summing_to(&weights, n);
        let index = parents_from_counts(&counts);
        prop_assert_eq!(index.len(), n);

        check_select(filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
        check_select(filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
    }

    /// Extra copies may fill the vacant slots in any order; every
    /// destination still receives its parent's pre-selection row whether
    /// the population grows or shrinks.
    #[test]
    fn prop_select_shuffled_extras((n, d, values, counts, extras) in population_with_shuffled_extras(false)) {
        let index = parents_with_extras(&counts, &extras);
        prop_assert!(keeps_own_slot(&index));

        check_select(filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
        check_select(filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
    }

    /// Same with the population size unchanged, where the column-major
    /// matrix copies in place.
    #[test]
    fn prop_select_shuffled_extras_same_size((n, d, values, counts, extras) in population_with_shuffled_extras(true)) {
        let index = parents_with_extras(&counts, &extras);
        prop_assert_eq!(index.len(), n);
        prop_assert!(keeps_own_slot(&index));

        check_select(filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
        check_select(filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values), &index);
    }

    /// Packing then unpacking a particle is a no-op, and unpacking then
    /// packing returns the pack.
    #[test]
    fn prop_pack_round_trip((n, d, values) in population(), seed in any::<u64>()) {
        prop_assume!(n > 0);
        let i = (seed as usize) % n;
        let pack: Vec<f64> = (0..d).map(|j| seed as f64 + j as f64).collect();

        let mut rows = filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let rows_before = rows.clone();
        let p = rows.state_pack(i).unwrap();
        rows.state_unpack(i, &p).unwrap();
        prop_assert_eq!(&rows, &rows_before);
        rows.state_unpack(i, &pack).unwrap();
        prop_assert_eq!(rows.state_pack(i).unwrap(), pack.clone());

        let mut cols = filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let cols_before = cols.clone();
        let p = cols.state_pack(i).unwrap();
        cols.state_unpack(i, &p).unwrap();
        prop_assert_eq!(&cols, &cols_before);
        cols.state_unpack(i, &pack).unwrap();
        prop_assert_eq!(cols.state_pack(i).unwrap(), pack);
    }

    /// Duplicating a particle matches packing and unpacking it.
    #[test]
    fn prop_duplicate_matches_pack((n, d, values) in population(), a in any::<usize>(), b in any::<usize>()) {
        prop_assume!(n > 0);
        let (src, dst) = (a % n, b % n);

        let mut rows = filled(RowMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let mut cols = filled(ColMajorMatrix::<f64, Dynamic>::with_dim(n, d), &values);
        let expected = rows.state_pack(src).unwrap();

        rows.duplicate(src, dst).unwrap();
        cols.duplicate(src, dst).unwrap();
        prop_assert_eq!(&rows.state_pack(dst).unwrap(), &expected);
        prop_assert_eq!(&cols.state_pack(dst).unwrap(), &expected);
        prop_assert_eq!(rows_of(&rows), rows_of(&cols));
    }
}
