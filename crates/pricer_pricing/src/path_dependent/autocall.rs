//! Autocall observation state machine.
//!
//! Per trajectory, observation dates 1..m are walked in order:
//!
//! | Level on date k | Effect |
//! |-----------------|--------|
//! | ≥ autocall barrier | one coupon, then `Autocalled { date: k }` |
//! | ≥ coupon barrier | one coupon, stay `Active` |
//! | below coupon barrier | nothing |
//!
//! Once autocalled, later dates contribute nothing. At maturity the capital
//! protection rule pays `notional · S_T / reference_level` if `S_T` is below
//! the coupon barrier and `notional` otherwise. Which trajectories it applies
//! to depends on [`AutocallRedemption`]:
//!
//! - `Par`: only trajectories still `Active`; autocalled ones redeem `notional`
//! - `TerminalLevel`: every trajectory, on its terminal level

use crate::mc::PathMatrix;
use pricer_core::types::{AutocallRedemption, NoteTerms};

/// Lifecycle state of one trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutocallState {
    /// Not called yet.
    Active,
    /// Called on observation `date` (1-based).
    Autocalled {
        /// Observation index of the call.
        date: usize,
    },
}

/// Undiscounted cash flows of one trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryOutcome {
    /// Sum of coupons paid.
    pub coupons: f64,
    /// Number of coupons paid.
    pub coupon_count: usize,
    /// Redemption amount.
    pub redemption: f64,
    /// Observation index of the autocall event, if any.
    pub autocall_date: Option<usize>,
}

impl TrajectoryOutcome {
    /// Coupons plus redemption.
    #[inline]
    pub fn total(&self) -> f64 {
        self.coupons + self.redemption
    }

    /// Whether the note was called early.
    #[inline]
    pub fn is_autocalled(&self) -> bool {
        self.autocall_date.is_some()
    }
}

/// Streaming observer for a single trajectory.
///
/// # Example
///
/// ```
/// use pricer_core::types::NoteTerms;
/// use pricer_pricing::path_dependent::{AutocallObserver, AutocallState};
///
/// let terms = NoteTerms::builder()
///     .maturity(3.0)
///     .observation_count(3)
///     .autocall_barrier(100.0)
///     .coupon_barrier(70.0)
///     .notional(1000.0)
///     .reference_level(100.0)
///     .coupon_amount(50.0)
///     .build()
///     .unwrap();
///
/// let mut observer = AutocallObserver::new(&terms);
/// observer.observe(80.0); // coupon
/// observer.observe(105.0); // coupon + call
/// observer.observe(120.0); // ignored
///
/// assert_eq!(observer.state(), AutocallState::Autocalled { date: 2 });
/// let outcome = observer.finish(120.0);
/// assert_eq!(outcome.coupon_count, 2);
/// assert_eq!(outcome.total(), 1100.0);
/// ```
#[derive(Clone, Debug)]
pub struct AutocallObserver<'a> {
    terms: &'a NoteTerms,
    state: AutocallState,
    dates_seen: usize,
    coupon_count: usize,
}

impl<'a> AutocallObserver<'a> {
    /// Creates an observer in the `Active` state.
    #[inline]
    pub fn new(terms: &'a NoteTerms) -> Self {
        Self {
            terms,
            state: AutocallState::Active,
            dates_seen: 0,
            coupon_count: 0,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> AutocallState {
        self.state
    }

    /// Observes the level on the next observation date.
    ///
    /// Has no effect once the trajectory is autocalled.
    #[inline]
    pub fn observe(&mut self, level: f64) -> AutocallState {
        if self.state != AutocallState::Active {
            return self.state;
        }
        self.dates_seen += 1;

        if level >= self.terms.autocall_barrier {
            self.coupon_count += 1;
            self.state = AutocallState::Autocalled {
                date: self.dates_seen,
            };
        } else if level >= self.terms.coupon_barrier {
            self.coupon_count += 1;
        }
        self.state
    }

    /// Applies the redemption rule and returns the trajectory's cash flows.
    pub fn finish(self, terminal_level: f64) -> TrajectoryOutcome {
        let terms = self.terms;
        let protected = || {
            if terminal_level < terms.coupon_barrier {
                terms.notional * (terminal_level / terms.reference_level)
            } else {
                terms.notional
            }
        };

        let autocall_date = match self.state {
            AutocallState::Active => None,
            AutocallState::Autocalled { date } => Some(date),
        };
        let redemption = match (terms.autocall_redemption, autocall_date) {
            (AutocallRedemption::Par, Some(_)) => terms.notional,
            _ => protected(),
        };

        TrajectoryOutcome {
            coupons: self.coupon_count as f64 * terms.coupon_amount,
            coupon_count: self.coupon_count,
            redemption,
            autocall_date,
        }
    }
}

/// Evaluates one trajectory given its observation levels (dates 1..m).
///
/// The terminal level is the last observation; with no observations the
/// `initial` level is used.
pub fn evaluate_trajectory<I>(terms: &NoteTerms, initial: f64, observations: I) -> TrajectoryOutcome
where
    I: IntoIterator<Item = f64>,
{
    let mut observer = AutocallObserver::new(terms);
    let mut terminal = initial;
    for level in observations {
        terminal = level;
        observer.observe(level);
    }
    observer.finish(terminal)
}

/// Evaluates every trajectory of `paths` against `terms`.
///
/// Row k of the matrix is observation date k; the last row is the terminal
/// level. Trajectories are independent and returned in column order.
pub fn evaluate_paths(paths: &PathMatrix, terms: &NoteTerms) -> Vec<TrajectoryOutcome> {
    let n_steps = paths.n_steps();
    (0..paths.n_paths())
        .map(|i| {
            let mut observer = AutocallObserver::new(terms);
            for step in 1..=n_steps {
                if observer.observe(paths.level(step, i)) != AutocallState::Active {
                    break;
                }
            }
            observer.finish(paths.level(n_steps, i))
        })
        .collect()
}
