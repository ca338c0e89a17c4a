// ============================================================
// Layer 4 — Holdout Splitter
// ============================================================
// Shuffles rows with a seeded RNG and splits off a test set:
//   - Training set: everything not held out
//   - Test set:     ceil(test_fraction * n) rows
//
// The seed is fixed per call so the same input always gives the
// same split, which keeps published test sets reproducible.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Seed used by the holdout export.
pub const HOLDOUT_SEED: u64 = 9;

/// Shuffle `rows` with `seed` and split into (train, test).
pub fn split_holdout<T>(mut rows: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let total    = rows.len();
    let n_test   = ((total as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let split_at = total - n_test.min(total);

    // split_off(n) leaves [0..n) in `rows` and returns [n..total)
    let test = rows.split_off(split_at);

    tracing::debug!(
        "Holdout split: {} train, {} test (seed {})",
        rows.len(),
        test.len(),
        seed,
    );

    (rows, test)
}
