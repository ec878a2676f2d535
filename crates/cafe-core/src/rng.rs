//! Deterministic per-robot sensor RNG.
//!
//! # Determinism strategy
//!
//! Each robot's sensors get their own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids uniformly across the seed space.  Adding a
//! robot never disturbs the jitter sequence of the others.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-robot deterministic RNG used to jitter simulated compass and GPS
/// readings.
pub struct SensorRng(SmallRng);

impl SensorRng {
    /// Seed deterministically from the run's global seed and a robot id.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SensorRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform noise in `[-amplitude, amplitude]`.  Returns exactly `0.0`
    /// without touching the generator when `amplitude <= 0`.
    #[inline]
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        if amplitude > 0.0 {
            self.0.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        }
    }
}
