//! Per-shot random streams
//!
//! Every shot owns a ChaCha8 generator keyed by the run seed, with the shot
//! index selecting the stream. Draws therefore depend only on
//! `(seed, shot)`, never on which worker ran the shot or in what order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator for shot `shot` of a run seeded with `seed`
pub fn shot_rng(seed: u64, shot: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(shot);
    rng
}

/// Fresh run seed from the thread-local entropy source
pub fn entropy_seed() -> u64 {
    rand::thread_rng().gen()
}
