use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Error, RngCore, SeedableRng};

const IA: i64 = 16807;
const IM: i64 = 2_147_483_647;
const AM: f64 = 1.0 / IM as f64;
const IQ: i64 = 127_773;
const IR: i64 = 2836;
const MASK: i64 = 123_459_876;

/// Largest value returned by [`RandomSource::next_raw`].
pub const RAW_MAX: u64 = (IM - 2) as u64;

/// Park–Miller "minimal standard" generator with a Box–Muller Gaussian
/// stage.
///
/// All state is carried in the value: the current seed and the second
/// Gaussian variate of the last generated pair, if it has not been handed
/// out yet. Two sources built from the same seed produce identical streams.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomSource {
    seed: i64,
    cached: Option<f64>,
}

impl RandomSource {
    pub fn new(seed: u64) -> RandomSource {
        let mut seed = (seed % IM as u64) as i64;
        // A scrambled state of 0 (or IM) is a fixed point of the recurrence.
        if (seed ^ MASK) % IM == 0 {
            seed ^= 1;
        }
        RandomSource { seed, cached: None }
    }

    /// Seeds from the wall clock.
    pub fn from_time() -> RandomSource {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
            .unwrap_or(0);
        RandomSource::new(seed)
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Second variate of the last Gaussian pair, pending for the next call.
    pub fn cached(&self) -> Option<f64> {
        self.cached
    }

    /// Advances the generator and returns its raw output in `[0, RAW_MAX]`.
    pub fn next_raw(&mut self) -> u64 {
        (self.step() - 1) as u64
    }

    /// Uniform sample in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        AM * self.step() as f64
    }

    /// Standard normal sample (mean 0, variance 1), polar Box–Muller.
    pub fn gaussian(&mut self) -> f64 {
        if let Some(y2) = self.cached.take() {
            return y2;
        }
        let (x1, x2, r) = loop {
            let x1 = self.uniform() * 2.0 - 1.0;
            let x2 = self.uniform() * 2.0 - 1.0;
            let r = x1 * x1 + x2 * x2;
            if r < 1.0 && r > 0.0 {
                break (x1, x2, r);
            }
        };
        let fac = (-2.0 * r.ln() / r).sqrt();
        self.cached = Some(x2 * fac);
        x1 * fac
    }

    /// Uniform integer in `[min, max]`, both ends included.
    ///
    /// Raw outputs are divided into `max - min + 1` equal buckets and the
    /// leftover top values are rejected, so there is no modulo bias.
    ///
    /// # Panics
    /// Panics if `min > max` or the range is wider than [`RAW_MAX`].
    pub fn int_in_range(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "empty range {min}..={max}");
        let span = (max - min) as u64;
        assert!(span < RAW_MAX, "range {min}..={max} exceeds generator output");
        let divisor = RAW_MAX / (span + 1);
        loop {
            let r = self.next_raw() / divisor;
            if r <= span {
                return min + r as usize;
            }
        }
    }

    /// One step of the scrambled Park–Miller recurrence (Schrage's method).
    /// Returns the unscrambled state, always in `[1, IM - 1]`.
    fn step(&mut self) -> i64 {
        let mut s = self.seed ^ MASK;
        let k = s / IQ;
        s = IA * (s - k * IQ) - IR * k;
        if s < 0 {
            s += IM;
        }
        self.seed = s ^ MASK;
        s
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        let hi = self.step() >> 15;
        let lo = self.step() >> 15;
        ((hi << 16) | lo) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for RandomSource {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        RandomSource::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        RandomSource::new(state)
    }
}
