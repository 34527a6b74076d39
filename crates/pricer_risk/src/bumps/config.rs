//! Absolute bump sizes for finite-difference sensitivities.

use super::error::BumpConfigError;
use super::parameter::BumpedParameter;

/// Default volatility bump (absolute vol points).
pub const DEFAULT_VOLATILITY_BUMP: f64 = 0.05;
/// Default maturity bump in years.
pub const DEFAULT_MATURITY_BUMP: f64 = 1.0;
/// Default rate bump.
pub const DEFAULT_RATE_BUMP: f64 = 0.05;
/// Default dividend yield bump.
pub const DEFAULT_DIVIDEND_BUMP: f64 = 0.10;
/// Default coupon barrier bump in price units.
pub const DEFAULT_COUPON_BARRIER_BUMP: f64 = 0.01;
/// Default autocall barrier bump in price units.
pub const DEFAULT_AUTOCALL_BARRIER_BUMP: f64 = 0.01;

/// Bump size per perturbable input.
///
/// # Examples
///
/// ```rust
/// use pricer_risk::bumps::{BumpConfig, BumpedParameter};
///
/// let bumps = BumpConfig::builder().volatility(0.01).build().unwrap();
/// assert_eq!(bumps.bump_for(BumpedParameter::Volatility), 0.01);
/// assert_eq!(bumps.bump_for(BumpedParameter::Maturity), 1.0);
///
/// assert!(BumpConfig::builder().rate(-0.01).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BumpConfig {
    volatility: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    coupon_barrier: f64,
    autocall_barrier: f64,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            volatility: DEFAULT_VOLATILITY_BUMP,
            maturity: DEFAULT_MATURITY_BUMP,
            rate: DEFAULT_RATE_BUMP,
            dividend_yield: DEFAULT_DIVIDEND_BUMP,
            coupon_barrier: DEFAULT_COUPON_BARRIER_BUMP,
            autocall_barrier: DEFAULT_AUTOCALL_BARRIER_BUMP,
        }
    }
}

impl BumpConfig {
    /// Builder starting from the default bump sizes.
    #[inline]
    pub fn builder() -> BumpConfigBuilder {
        BumpConfigBuilder {
            config: Self::default(),
        }
    }

    /// Bump size applied to `parameter`.
    #[inline]
    pub fn bump_for(&self, parameter: BumpedParameter) -> f64 {
        match parameter {
            BumpedParameter::Volatility => self.volatility,
            BumpedParameter::Maturity => self.maturity,
            BumpedParameter::Rate => self.rate,
            BumpedParameter::DividendYield => self.dividend_yield,
            BumpedParameter::CouponBarrier => self.coupon_barrier,
            BumpedParameter::AutocallBarrier => self.autocall_barrier,
        }
    }

    /// Checks every bump is positive and finite.
    ///
    /// Deserialised configurations bypass the builder; call this before use.
    ///
    /// # Errors
    ///
    /// Returns the first offending bump.
    pub fn validate(&self) -> Result<(), BumpConfigError> {
        for parameter in BumpedParameter::ALL {
            let value = self.bump_for(parameter);
            if !value.is_finite() || value <= 0.0 {
                return Err(BumpConfigError::InvalidBump {
                    parameter: parameter.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`BumpConfig`].
#[derive(Clone, Debug)]
pub struct BumpConfigBuilder {
    config: BumpConfig,
}

impl BumpConfigBuilder {
    /// Sets the volatility bump.
    pub fn volatility(mut self, bump: f64) -> Self {
        self.config.volatility = bump;
        self
    }

    /// Sets the maturity bump (years).
    pub fn maturity(mut self, bump: f64) -> Self {
        self.config.maturity = bump;
        self
    }

    /// Sets the rate bump.
    pub fn rate(mut self, bump: f64) -> Self {
        self.config.rate = bump;
        self
    }

    /// Sets the dividend yield bump.
    pub fn dividend_yield(mut self, bump: f64) -> Self {
        self.config.dividend_yield = bump;
        self
    }

    /// Sets the coupon barrier bump.
    pub fn coupon_barrier(mut self, bump: f64) -> Self {
        self.config.coupon_barrier = bump;
        self
    }

    /// Sets the autocall barrier bump.
    pub fn autocall_barrier(mut self, bump: f64) -> Self {
        self.config.autocall_barrier = bump;
        self
    }

    /// Sets the bump for `parameter`.
    pub fn bump(self, parameter: BumpedParameter, bump: f64) -> Self {
        match parameter {
            BumpedParameter::Volatility => self.volatility(bump),
            BumpedParameter::Maturity => self.maturity(bump),
            BumpedParameter::Rate => self.rate(bump),
            BumpedParameter::DividendYield => self.dividend_yield(bump),
            BumpedParameter::CouponBarrier => self.coupon_barrier(bump),
            BumpedParameter::AutocallBarrier => self.autocall_barrier(bump),
        }
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `BumpConfigError::InvalidBump` for a zero, negative or
    /// non-finite bump.
    pub fn build(self) -> Result<BumpConfig, BumpConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
