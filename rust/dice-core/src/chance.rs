//! Randomness sources for die rolls.
//!
//! A pool owns exactly one [`Chance`] and every die it holds draws from it.
//! Two modes:
//! - `Rng`: a ChaCha8 stream, seeded from OS entropy or from a fixed `u64`.
//! - `Scripted`: replay a fixed queue of face values first, then fall back to a
//!   seeded stream. Used to force outcomes in tests and to replay logged rolls.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

/// How die values are generated.
#[derive(Debug, Clone)]
pub enum Chance {
    /// Pseudorandom stream backed by a small PRNG.
    Rng { rng: Box<ChaCha8Rng> },
    /// Queued values are consumed in order; `fallback` takes over once the queue is empty.
    Scripted {
        values: VecDeque<u32>,
        fallback: Box<ChaCha8Rng>,
    },
}

impl Chance {
    pub fn from_entropy() -> Self {
        Chance::Rng {
            rng: Box::new(ChaCha8Rng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Chance::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Scripted values on top of a stream seeded with `seed`.
    ///
    /// Each value must lie in `1..=face_count` of the die that consumes it.
    /// Debug builds panic on a value outside that range; release builds wrap it
    /// into range, with 0 mapping to `face_count`.
    pub fn scripted(values: impl IntoIterator<Item = u32>, seed: u64) -> Self {
        Chance::Scripted {
            values: values.into_iter().collect(),
            fallback: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Queue values to be replayed before the underlying stream is consulted again.
    pub fn push_scripted(&mut self, more: impl IntoIterator<Item = u32>) {
        match self {
            Chance::Scripted { values, .. } => values.extend(more),
            Chance::Rng { rng } => {
                // Keep the stream position: the current rng becomes the fallback.
                let placeholder = Box::new(ChaCha8Rng::seed_from_u64(0));
                let fallback = std::mem::replace(rng, placeholder);
                *self = Chance::Scripted {
                    values: more.into_iter().collect(),
                    fallback,
                };
            }
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn scripted_remaining(&self) -> usize {
        match self {
            Chance::Rng { .. } => 0,
            Chance::Scripted { values, .. } => values.len(),
        }
    }

    /// Draw one face value in `1..=face_count`.
    pub fn draw(&mut self, face_count: u32) -> u32 {
        debug_assert!(face_count > 0, "face_count must be positive");
        match self {
            Chance::Rng { rng } => rng.gen_range(1..=face_count),
            Chance::Scripted { values, fallback } => match values.pop_front() {
                Some(v) => {
                    debug_assert!(
                        (1..=face_count).contains(&v),
                        "scripted value {v} outside 1..={face_count}"
                    );
                    reduce_into_range(v, face_count)
                }
                None => fallback.gen_range(1..=face_count),
            },
        }
    }
}

impl Default for Chance {
    fn default() -> Self {
        Chance::from_entropy()
    }
}

/// In-range values pass through unchanged; 0 maps to `face_count`.
fn reduce_into_range(v: u32, face_count: u32) -> u32 {
    ((v % face_count) + face_count - 1) % face_count + 1
}

/// SplitMix64 step (fast, deterministic).
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive an independent seed for stream `stream` from a base seed.
///
/// Lets one user-facing `--seed` drive several pools without their streams
/// overlapping. Stable across platforms and releases.
pub fn derive_seed(base_seed: u64, stream: u64) -> u64 {
    let mut s = base_seed ^ stream.wrapping_mul(0xD6E8FEB86659FD93);
    splitmix64_next(&mut s)
}
