//! Presentation-side input handling.
//!
//! Dashboard and prompt collect maturity in days or years and rate/volatility
//! in percent. This module turns those into [`PricingInputs`] and enforces the
//! widget bounds, so the pricing core never sees e.g. a zero spot.

use crate::errors::{PricingError, PricingResult};
use crate::models::{OptionKind, PricingInputs};

pub const DAYS_PER_YEAR: f64 = 365.0;

pub const MIN_PRICE: f64 = 0.01;
pub const MIN_MATURITY_DAYS: f64 = 1.0;
pub const MIN_MATURITY_YEARS: f64 = 1e-6;
pub const RATE_PCT_RANGE: (f64, f64) = (-10.0, 100.0);
pub const VOL_PCT_RANGE: (f64, f64) = (0.1, 500.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Days,
    Years,
}

impl TimeUnit {
    #[inline]
    pub fn to_years(self, value: f64) -> f64 {
        match self {
            Self::Days => value / DAYS_PER_YEAR,
            Self::Years => value,
        }
    }

    fn minimum(self) -> f64 {
        match self {
            Self::Days => MIN_MATURITY_DAYS,
            Self::Years => MIN_MATURITY_YEARS,
        }
    }
}

/// Raw form values as a user enters them. Missing fields take the dashboard
/// defaults (S = K = 100, one year, r = 5 %, sigma = 20 %).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DashboardInputs {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub unit: TimeUnit,
    pub rate_pct: f64,
    pub vol_pct: f64,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            maturity: 365.0,
            unit: TimeUnit::Days,
            rate_pct: 5.0,
            vol_pct: 20.0,
        }
    }
}

impl DashboardInputs {
    /// Check widget bounds, then convert units.
    pub fn to_pricing(&self, kind: OptionKind) -> PricingResult<PricingInputs> {
        at_least("spot price", self.spot, MIN_PRICE)?;
        at_least("strike price", self.strike, MIN_PRICE)?;
        at_least("time to maturity", self.maturity, self.unit.minimum())?;
        within("risk-free rate %", self.rate_pct, RATE_PCT_RANGE)?;
        within("volatility %", self.vol_pct, VOL_PCT_RANGE)?;

        Ok(PricingInputs::new(
            self.spot,
            self.strike,
            self.unit.to_years(self.maturity),
            self.rate_pct / 100.0,
            self.vol_pct / 100.0,
            kind,
        ))
    }
}

fn at_least(field: &str, value: f64, min: f64) -> PricingResult<()> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(PricingError::invalid(format!("{field} must be >= {min}, got {value}")))
    }
}

fn within(field: &str, value: f64, (lo, hi): (f64, f64)) -> PricingResult<()> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(PricingError::invalid(format!(
            "{field} must be within [{lo}, {hi}], got {value}"
        )))
    }
}
