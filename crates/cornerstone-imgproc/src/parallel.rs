use rayon::prelude::*;

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ///
    /// Produces exactly the same values as [`ExecutionStrategy::Serial`].
    Parallel,
}

impl ExecutionStrategy {
    /// Returns true if the strategy spreads work over the Rayon thread pool.
    pub fn is_parallel(&self) -> bool {
        matches!(self, ExecutionStrategy::Parallel)
    }
}

/// Apply a function to each row of a buffer.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `data` - The row-major buffer to fill.
/// * `row_stride` - The number of elements per row (width * channels).
/// * `f` - Called with the row index and the mutable row slice.
pub fn for_each_row_mut<T: Send>(
    strategy: ExecutionStrategy,
    data: &mut [T],
    row_stride: usize,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) {
    match strategy {
        ExecutionStrategy::Serial => data
            .chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(r, row)| f(r, row)),
        ExecutionStrategy::Parallel => data
            .par_chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(r, row)| f(r, row)),
    }
}

/// Collect items produced per row, keeping row order.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `rows` - The number of rows.
/// * `f` - Called with the row index, returns the items found in that row.
pub fn flat_map_rows<U: Send>(
    strategy: ExecutionStrategy,
    rows: usize,
    f: impl Fn(usize) -> Vec<U> + Send + Sync,
) -> Vec<U> {
    match strategy {
        ExecutionStrategy::Serial => (0..rows).flat_map(f).collect(),
        ExecutionStrategy::Parallel => (0..rows).into_par_iter().flat_map_iter(f).collect(),
    }
}
