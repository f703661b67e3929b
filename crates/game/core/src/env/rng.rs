//! RNG oracle for deterministic random number generation.
//!
//! This module provides a trait-based RNG system that ensures deterministic
//! random number generation for game mechanics like special-move chances,
//! on-hit procs, loot drops and board offers.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers. A session replays
//! identically from its seed.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Common for percentage-based mechanics like proc chance.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
/// - **Good quality**: Passes statistical tests (PractRand, TestU01)
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
/// - Implementation based on PCG-XSH-RR variant
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    ///
    /// Uses LCG (Linear Congruential Generator) formula:
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    ///
    /// This is where the "permutation" happens - transforms the LCG state
    /// into high-quality random output.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        // XOR upper bits with lower bits, shift right
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;

        // Use upper bits to determine rotation amount
        let rot = (state >> 59) as u32;

        // Random rotation provides the final permutation
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute deterministic seed from game state components.
///
/// Combines multiple entropy sources to ensure unique seeds for each
/// random event in the game.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at game start (for replay/determinism)
/// * `nonce` - Roll sequence number (increments each roll)
/// * `actor_id` - Side making the roll (see [`RollContext`])
/// * `context` - What the roll decides
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // Mix all inputs using simple hash combiners
    // These constants are based on SplitMix64 and FxHash multipliers
    let mut hash = game_seed;

    // Mix in nonce (action sequence)
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);

    // Mix in actor
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);

    // Mix in context
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// What a roll decides. Mixed into the seed so that two different decisions
/// at the same sequence number never share a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    PlayerProc = 0,
    MonsterSpecial = 1,
    MonsterProc = 2,
    Evade = 3,
    Loot = 4,
    PotionFind = 5,
    Sabotage = 6,
    BoardOffer = 7,
}

impl RollContext {
    const fn actor(self) -> u32 {
        match self {
            Self::PlayerProc | Self::Evade => 0,
            Self::MonsterSpecial | Self::MonsterProc | Self::Sabotage => 1,
            Self::Loot | Self::PotionFind | Self::BoardOffer => 2,
        }
    }
}

/// Sequence of rolls derived from one seed.
///
/// The stream only carries a counter; the numbers themselves come from the
/// [`RngOracle`] passed to each call, so the same stream replays identically
/// against the same oracle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollStream {
    seed: u64,
    nonce: u64,
}

impl RollStream {
    pub const fn new(seed: u64) -> Self {
        Self { seed, nonce: 0 }
    }

    /// Number of rolls made so far.
    pub const fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, context.actor(), context as u32);
        self.nonce += 1;
        seed
    }

    /// Rolls a d100 against `percent`. Zero never succeeds, 100 always does.
    pub fn chance(
        &mut self,
        rng: &(impl RngOracle + ?Sized),
        context: RollContext,
        percent: u32,
    ) -> bool {
        if percent == 0 {
            return false;
        }
        rng.roll_d100(self.next_seed(context)) <= percent
    }

    /// Picks an index in `0..len`, or `None` for an empty range.
    pub fn pick(
        &mut self,
        rng: &(impl RngOracle + ?Sized),
        context: RollContext,
        len: usize,
    ) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let max = u32::try_from(len - 1).unwrap_or(u32::MAX);
        Some(rng.range(self.next_seed(context), 0, max) as usize)
    }

    /// Derives an independent stream, used to give each encounter its own
    /// sequence.
    pub fn fork(&mut self) -> RollStream {
        let seed = compute_seed(self.seed, self.nonce, u32::MAX, u32::MAX);
        self.nonce += 1;
        RollStream::new(seed)
    }
}

/// RNG returning the same raw value for every seed.
///
/// `FixedRng(0)` makes every percentage roll succeed (d100 = 1);
/// `FixedRng(99)` makes every roll below 100% fail (d100 = 100).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedRng(pub u32);

impl FixedRng {
    pub const ALWAYS: Self = Self(0);
    pub const NEVER: Self = Self(99);
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}
