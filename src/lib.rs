//! # bs_greeks
//!
//! Closed-form European option prices and Greeks under Black-Scholes, a
//! finite-difference cross-check, and a small dashboard on top.
//!
//! - **`models`**: the pure pricing core. Inputs, the Black-Scholes engine
//!   and finite-difference Greeks; no I/O, no shared state.
//! - **`inputs`**, **`heatmap`**: presentation helpers for unit conversion,
//!   widget bounds and the spot × volatility price grid.
//! - **`server`**, **`cli`**: the HTTP dashboard and the terminal prompt.

pub mod cli;
pub mod config;
pub mod errors;
pub mod heatmap;
pub mod inputs;
pub mod models;
pub mod server;
pub mod state;

pub use errors::{PricingError, PricingResult};
pub use models::black_scholes::BlackScholes;
pub use models::finite_diff::{GreeksComparison, DEFAULT_SPOT_BUMP, DEFAULT_VOL_BUMP};
pub use models::{GreeksResult, NumericGreeks, OptionKind, PricingInputs, PricingModel};

/// Black-Scholes price of a European option without dividends.
///
/// # Errors
/// [`PricingError::InvalidInput`] when maturity or volatility is not positive.
pub fn price(inputs: &PricingInputs) -> PricingResult<f64> {
    BlackScholes::new().price(inputs)
}

/// Closed-form delta, gamma, vega, plus d1 and d2.
///
/// # Errors
/// [`PricingError::InvalidInput`] when maturity or volatility is not positive.
pub fn analytic_greeks(inputs: &PricingInputs) -> PricingResult<GreeksResult> {
    BlackScholes::new().greeks(inputs)
}

/// Central finite-difference delta, gamma and vega built from [`price`] alone.
///
/// `relative_spot_bump` scales with spot; `vol_bump` is absolute.
/// [`DEFAULT_SPOT_BUMP`] and [`DEFAULT_VOL_BUMP`] are the usual choices.
pub fn numeric_greeks(
    inputs: &PricingInputs,
    relative_spot_bump: f64,
    vol_bump: f64,
) -> PricingResult<NumericGreeks> {
    models::finite_diff::numeric_greeks(&BlackScholes::new(), inputs, relative_spot_bump, vol_bump)
}
