use rayon::prelude::*;

/// Apply `body(item, index)` to every item, optionally in parallel, keeping
/// the output in input order.
///
/// When `sequential` is true, items are processed on the current thread (no
/// rayon overhead, best when an outer level such as a temperature scan already
/// saturates the cores). Each call gets exclusive access to its own item, so
/// per-member PRNG streams never interleave and the output does not depend on
/// the schedule.
pub fn par_map_mut<T, U>(
    items: &mut [T],
    sequential: bool,
    body: impl Fn(&mut T, usize) -> U + Send + Sync,
) -> Vec<U>
where
    T: Send,
    U: Send,
{
    if sequential {
        items
            .iter_mut()
            .enumerate()
            .map(|(idx, item)| body(item, idx))
            .collect()
    } else {
        items
            .par_iter_mut()
            .enumerate()
            .map(|(idx, item)| body(item, idx))
            .collect()
    }
}
