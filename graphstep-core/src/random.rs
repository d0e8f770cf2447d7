//! Park–Miller minimal standard generator.
//!
//! The stream is the only source of randomness in graph generation. Every
//! value it yields is a pure function of the seed and the number of prior
//! draws, so the same seed always reproduces the same graph.

use crate::error::{GraphError, Result};

/// Modulus of the Lehmer generator: the Mersenne prime `2^31 - 1`.
pub const MODULUS: u64 = 2_147_483_647;

/// Multiplier of the Lehmer generator (`7^5`).
pub const MULTIPLIER: u64 = 16_807;

/// Seed used by the default graph configuration.
pub const DEFAULT_SEED: u64 = 4111;

/// Seeded multiplicative congruential stream yielding values in `[0, 1)`.
///
/// The internal state always lies in `[1, MODULUS - 1]`; it is advanced and
/// read on every draw and is never rewound.
///
/// # Examples
/// ```
/// use graphstep_core::RandomStream;
///
/// let mut stream = RandomStream::try_new(4111).expect("seed is valid");
/// let value = stream.next_f64();
/// assert!((0.0..1.0).contains(&value));
/// assert_eq!(stream.state(), 69_093_577);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomStream {
    value: u64,
}

impl RandomStream {
    /// Creates a stream whose state is `seed mod MODULUS`.
    ///
    /// # Errors
    /// Returns [`GraphError::DegenerateSeed`] when the seed is a multiple of
    /// [`MODULUS`].
    pub const fn try_new(seed: u64) -> Result<Self> {
        let value = seed % MODULUS;
        if value == 0 {
            return Err(GraphError::DegenerateSeed {
                seed,
                modulus: MODULUS,
            });
        }
        Ok(Self { value })
    }

    /// Advances the stream and returns `(state - 1) / MODULUS`.
    ///
    /// `state * MULTIPLIER` stays below `2^46`, so the product never
    /// overflows `u64`.
    pub fn next_f64(&mut self) -> f64 {
        self.value = (self.value * MULTIPLIER) % MODULUS;
        // Both operands are below 2^31 and convert to f64 exactly.
        (self.value - 1) as f64 / MODULUS as f64
    }

    /// Returns the raw generator state.
    #[must_use]
    pub const fn state(&self) -> u64 {
        self.value
    }
}
