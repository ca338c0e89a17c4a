// ============================================================
// Layer 4 — K-Fold Partitioner
// ============================================================
// Deterministic, NON-shuffled k-fold cross-validation.
//
// With n records and k folds:
//   - the first n % k folds hold n / k + 1 records
//   - the remaining folds hold n / k records
//   - fold i's dev set is the i-th contiguous block
//   - fold i's train set is everything else, in original order
//
// Example with n = 7, k = 3:
//   Fold 1: dev [0 1 2]   train [3 4 5 6]
//   Fold 2: dev [3 4]     train [0 1 2 5 6]
//   Fold 3: dev [5 6]     train [0 1 2 3 4]
//
// Positions are offsets into the dataset, never fold-local,
// so exported indices always refer back to the original rows.

use std::ops::Range;

use crate::data::export::ExportError;

/// One train/dev partition. `number` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub number: usize,
    pub train:  Vec<usize>,
    pub dev:    Vec<usize>,
}

/// Split `n_records` positions into `n_folds` folds.
///
/// Fails unless `2 <= n_folds <= n_records`.
pub fn kfold(n_records: usize, n_folds: usize) -> Result<Vec<Fold>, ExportError> {
    if n_folds < 2 || n_folds > n_records {
        return Err(ExportError::InvalidFolds {
            folds:   n_folds,
            records: n_records,
        });
    }

    let blocks = dev_blocks(n_records, n_folds);
    let folds  = blocks
        .into_iter()
        .enumerate()
        .map(|(i, dev)| Fold {
            number: i + 1,
            train:  (0..dev.start).chain(dev.end..n_records).collect(),
            dev:    dev.collect(),
        })
        .collect();

    Ok(folds)
}

fn dev_blocks(n_records: usize, n_folds: usize) -> Vec<Range<usize>> {
    let base  = n_records / n_folds;
    let extra = n_records % n_folds;

    let mut start  = 0usize;
    let mut blocks = Vec::with_capacity(n_folds);
    for i in 0..n_folds {
        let size = if i < extra { base + 1 } else { base };
        blocks.push(start..start + size);
        start += size;
    }
    blocks
}
