//! Conversion from replication counts to a parent index.

use crate::error::ResampleError;

/// Turns replication counts into a parent index that can be applied in
/// place by a state matrix `select`.
///
/// `replication[k]` is the number of offspring of particle `k`; the counts
/// must sum to `n_out`. In the returned index every particle `k < n_out`
/// with at least one offspring keeps slot `k`, and the remaining offspring
/// fill the vacated slots in ascending order of both parent and slot.
///
/// # Errors
///
/// [`ResampleError::ReplicationMismatch`] if the counts do not sum to `n_out`.
///
/// # Examples
///
/// ```rust
/// use smc_random::resample::replication_to_index;
///
/// assert_eq!(replication_to_index(&[2, 0, 2, 0], 4).unwrap(), vec![0, 0, 2, 2]);
/// assert_eq!(replication_to_index(&[0, 1, 0, 1], 2).unwrap(), vec![3, 1]);
/// assert_eq!(replication_to_index(&[0, 3, 0], 3).unwrap(), vec![1, 1, 1]);
/// ```
pub fn replication_to_index(replication: &[usize], n_out: usize) -> Result<Vec<usize>, ResampleError> {
    let total: usize = replication.iter().sum();
    if total != n_out {
        return Err(ResampleError::ReplicationMismatch {
            expected: n_out,
            actual: total,
        });
    }

    let m = replication.len();
    let keeps_slot = |k: usize| k < m && replication[k] > 0;

    let mut index = vec![0; n_out];
    let mut vacant = 0;
    for (src, &count) in replication.iter().enumerate() {
        let mut extra = count;
        if src < n_out && count > 0 {
            index[src] = src;
            extra -= 1;
        }
        for _ in 0..extra {
            // There are exactly as many vacant slots as extra offspring.
            while keeps_slot(vacant) {
                vacant += 1;
            }
            index[vacant] = src;
            vacant += 1;
        }
    }
    Ok(index)
}

/// Checks whether `index` can be applied in place to a population of
/// `old_size` particles.
///
/// True when every parent is below `old_size` and every parent `k` that is
/// also a destination slot occupies its own slot.
///
/// # Examples
///
/// ```rust
/// use smc_random::resample::is_compaction_safe;
///
/// assert!(is_compaction_safe(&[0, 0, 2, 2], 4));
/// assert!(!is_compaction_safe(&[1, 0], 2));
/// assert!(!is_compaction_safe(&[0, 4], 4));
/// ```
pub fn is_compaction_safe(index: &[usize], old_size: usize) -> bool {
    if index.iter().any(|&p| p >= old_size) {
        return false;
    }
    let mut has_offspring = vec![false; old_size];
    for &p in index {
        has_offspring[p] = true;
    }
    (0..index.len().min(old_size)).all(|k| !has_offspring[k] || index[k] == k)
}
