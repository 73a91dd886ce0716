//! A linear congruential pseudo-random number generator for audio rate noise
//! and modulation sources.  This is fast and small, but it is *not*
//! cryptographically secure and the low bits have short periods - use the high
//! bits where quality matters.

#[cfg(target_has_atomic = "32")]
use core::sync::atomic::{AtomicU32, Ordering};
use rand::{RngCore, SeedableRng};

/// The initial state of a generator when no seed is provided
pub const DEFAULT_SEED: u32 = 22222;

const MULTIPLIER: u32 = 196_314_165;
const INCREMENT: u32 = 907_633_515;

#[inline(always)]
const fn step(state: u32) -> u32 {
    state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)
}

/// A linear congruential generator with a single 32 bit word of state.  The
/// parameters give the full period of 2^32 for any seed.
///
/// Each voice or device that needs noise should own its own `Lcg`.  For a
/// process-wide source, see [next_random].
///
/// This implements [RngCore] and [SeedableRng], so it may be used anywhere
/// a [rand] generator is expected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Constructor
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }
    /// Reset the generator to the given seed
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }
    /// The current state, which is also the last value returned
    pub fn state(&self) -> u32 {
        self.state
    }
    /// Advance the generator and return the new state
    #[inline(always)]
    pub fn next_random(&mut self) -> u32 {
        self.state = step(self.state);
        self.state
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.next_random()
    }
    fn next_u64(&mut self) -> u64 {
        let hi = self.next_random() as u64;
        let lo = self.next_random() as u64;
        (hi << 32) | lo
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_random().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];
    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// An [Lcg] that may be shared between threads.
///
/// The state is advanced with a compare-and-swap loop, so every call still
/// consumes exactly one step of the sequence even when several audio threads
/// draw from it at once (though which thread gets which value is then up to
/// the scheduler).
#[cfg(target_has_atomic = "32")]
#[derive(Debug)]
pub struct SharedLcg {
    state: AtomicU32,
}

#[cfg(target_has_atomic = "32")]
impl SharedLcg {
    /// Constructor
    pub const fn new(seed: u32) -> Self {
        Self {
            state: AtomicU32::new(seed),
        }
    }
    /// Reset the generator to the given seed
    pub fn seed(&self, seed: u32) {
        self.state.store(seed, Ordering::Relaxed);
    }
    /// Advance the generator and return the new state
    pub fn next_random(&self) -> u32 {
        let prev = self
            .state
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| Some(step(s)))
            .unwrap_or_else(|s| s);
        step(prev)
    }
}

#[cfg(target_has_atomic = "32")]
static GLOBAL_RNG: SharedLcg = SharedLcg::new(DEFAULT_SEED);

/// Draw from the process-wide generator, which starts at [DEFAULT_SEED].
#[cfg(target_has_atomic = "32")]
pub fn next_random() -> u32 {
    GLOBAL_RNG.next_random()
}

/// Reseed the process-wide generator used by [next_random]
#[cfg(target_has_atomic = "32")]
pub fn seed_random(seed: u32) {
    log::debug!("reseeding global generator with {seed:#010x}");
    GLOBAL_RNG.seed(seed);
}
