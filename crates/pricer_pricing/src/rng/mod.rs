//! # Random Number Generation
//!
//! Seeded normal streams for the path generator.
//!
//! Every valuation builds its own [`RandomStream`] from a seed and passes it
//! explicitly into path generation. Two valuations built from the same
//! [`RngKind`] and seed consume identical draws in identical order, which is
//! what makes bump-and-revalue differences free of sampling noise.
//!
//! ## Module Structure
//!
//! - [`prng`]: `rand::StdRng` wrapper with Ziggurat normals (default)
//! - [`mt`]: MT19937 stream with polar normals, compatible with legacy
//!   scientific generators
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{RandomStream, RngKind};
//!
//! let mut plus = RandomStream::new(RngKind::Mt19937, 42).unwrap();
//! let mut minus = RandomStream::new(RngKind::Mt19937, 42).unwrap();
//!
//! let mut a = vec![0.0; 8];
//! let mut b = vec![0.0; 8];
//! plus.fill_normal(&mut a);
//! minus.fill_normal(&mut b);
//! assert_eq!(a, b);
//! ```

mod mt;
mod prng;

pub use mt::MtNormalRng;
pub use prng::PricerRng;

use crate::mc::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Selects the generator behind a [`RandomStream`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RngKind {
    /// `rand::rngs::StdRng` with Ziggurat normals.
    #[default]
    StdRng,
    /// 32-bit Mersenne Twister with polar normals; seeds must fit in 32 bits.
    Mt19937,
}

impl RngKind {
    /// Returns the configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            RngKind::StdRng => "std-rng",
            RngKind::Mt19937 => "mt19937",
        }
    }

    /// Largest seed the generator accepts without losing bits.
    pub fn max_seed(&self) -> u64 {
        match self {
            RngKind::StdRng => u64::MAX,
            RngKind::Mt19937 => u64::from(u32::MAX),
        }
    }
}

impl fmt::Display for RngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RngKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "std-rng" | "stdrng" | "std" => Ok(RngKind::StdRng),
            "mt19937" | "mt" | "mersenne-twister" => Ok(RngKind::Mt19937),
            _ => Err(format!("Unknown random generator: {}", s)),
        }
    }
}

/// A seeded stream of standard normal variates.
///
/// Enum dispatch keeps the hot loop free of trait objects.
#[derive(Clone, Debug)]
pub enum RandomStream {
    /// Ziggurat normals over `StdRng`.
    Std(PricerRng),
    /// Polar normals over MT19937.
    Mt(MtNormalRng),
}

impl RandomStream {
    /// Creates a stream of the given kind.
    ///
    /// # Errors
    ///
    /// `ConfigError::SeedOutOfRange` if `seed` exceeds [`RngKind::max_seed`].
    pub fn new(kind: RngKind, seed: u64) -> Result<Self, ConfigError> {
        match kind {
            RngKind::StdRng => Ok(RandomStream::Std(PricerRng::from_seed(seed))),
            RngKind::Mt19937 => u32::try_from(seed)
                .map(|s| RandomStream::Mt(MtNormalRng::from_seed(s)))
                .map_err(|_| ConfigError::SeedOutOfRange { seed, rng: kind }),
        }
    }

    /// Generator kind of this stream.
    pub fn kind(&self) -> RngKind {
        match self {
            RandomStream::Std(_) => RngKind::StdRng,
            RandomStream::Mt(_) => RngKind::Mt19937,
        }
    }

    /// Draws one standard normal variate.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        match self {
            RandomStream::Std(rng) => rng.gen_normal(),
            RandomStream::Mt(rng) => rng.gen_normal(),
        }
    }

    /// Fills `buffer` with standard normal variates, in buffer order.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        match self {
            RandomStream::Std(rng) => rng.fill_normal(buffer),
            RandomStream::Mt(rng) => rng.fill_normal(buffer),
        }
    }
}
