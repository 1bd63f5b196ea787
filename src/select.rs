//! Order-statistic selection.
//!
//! Finds the k-th smallest element of a buffer without fully sorting it,
//! using an iterative quickselect over a Lomuto partition. The loop keeps
//! stack usage constant regardless of input size.
//!
//! # Complexity
//! Expected O(n) on typical input. Pivoting on the last element makes
//! already-sorted input the worst case at O(n²).

/// Returns the element at rank `k` (0-based) of `items` in ascending order.
///
/// Takes ownership of the buffer because selection reorders it. Callers
/// that need their data intact pass a copy, e.g. `select(data.to_vec(), k)`.
///
/// # Returns
/// - `None` if `k` is out of bounds, which includes an empty buffer.
///
/// For example, `select(vec![9, 1, 8, 2, 7], 1)` returns `Some(2)`.
pub fn select<T: Ord + Copy>(mut items: Vec<T>, k: usize) -> Option<T> {
    select_in_place(&mut items, k)
}

/// Same as [`select`] but works on a borrowed slice, leaving it partially
/// partitioned around the returned element.
pub fn select_in_place<T: Ord + Copy>(items: &mut [T], k: usize) -> Option<T> {
    if k >= items.len() {
        return None;
    }

    let mut left = 0;
    let mut right = items.len() - 1;

    loop {
        if left == right {
            return Some(items[left]);
        }

        let pivot_index = partition(items, left, right);

        if k == pivot_index {
            return Some(items[k]);
        } else if k < pivot_index {
            // k >= left, so pivot_index > left and this cannot underflow.
            right = pivot_index - 1;
        } else {
            left = pivot_index + 1;
        }
    }
}

/// Lomuto partition of `items[left..=right]` around `items[right]`.
///
/// Returns the final index of the pivot. Elements before it compare `<=`
/// the pivot, elements after it compare `>`.
fn partition<T: Ord + Copy>(
    items: &mut [T],
    left: usize,
    right: usize,
) -> usize {
    let pivot = items[right];
    // `boundary` is one past the last element known to be <= pivot.
    let mut boundary = left;

    for j in left..right {
        if items[j] <= pivot {
            items.swap(boundary, j);
            boundary += 1;
        }
    }

    items.swap(boundary, right);
    boundary
}
