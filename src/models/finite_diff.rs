//! Central finite-difference Greeks.
//!
//! Only ever calls [`PricingModel::price`], so it is an independent oracle
//! for the closed-form Greeks rather than a second route into them.
//!
//! dS = S * relative_spot_bump
//! delta = (V(S+dS) - V(S-dS)) / (2 dS)
//! gamma = (V(S+dS) - 2 V(S) + V(S-dS)) / dS^2
//! vega  = (V(sigma+h) - V(sigma-h)) / (2 h)      (h absolute)

use crate::errors::{PricingError, PricingResult};
use crate::models::{GreeksResult, NumericGreeks, PricingInputs, PricingModel};

/// Relative spot bump used when the caller does not pick one.
pub const DEFAULT_SPOT_BUMP: f64 = 1e-4;

/// Absolute volatility bump used when the caller does not pick one.
pub const DEFAULT_VOL_BUMP: f64 = 1e-4;

/// Estimate delta, gamma and vega by bumping spot and volatility.
///
/// Fails with `InvalidInput` for non-positive bumps, or when the base inputs
/// (or the down-bumped volatility) violate the pricing preconditions.
pub fn numeric_greeks<M: PricingModel + ?Sized>(
    model: &M,
    inputs: &PricingInputs,
    relative_spot_bump: f64,
    vol_bump: f64,
) -> PricingResult<NumericGreeks> {
    check_bump("relative spot bump", relative_spot_bump)?;
    check_bump("volatility bump", vol_bump)?;

    let ds = inputs.spot * relative_spot_bump;
    let v_up = model.price(&inputs.with_spot(inputs.spot + ds))?;
    let v_down = model.price(&inputs.with_spot(inputs.spot - ds))?;
    let v_0 = model.price(inputs)?;

    let delta = (v_up - v_down) / (2.0 * ds);
    let gamma = (v_up - 2.0 * v_0 + v_down) / (ds * ds);

    let vol_up = model.price(&inputs.with_volatility(inputs.volatility + vol_bump))?;
    let vol_down = model.price(&inputs.with_volatility(inputs.volatility - vol_bump))?;
    let vega = (vol_up - vol_down) / (2.0 * vol_bump);

    Ok(NumericGreeks { delta, gamma, vega })
}

fn check_bump(name: &str, bump: f64) -> PricingResult<()> {
    if bump > 0.0 && bump.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(format!(
            "{name} must be positive and finite, got {bump}"
        )))
    }
}

/// Analytic vs numeric Greeks side by side, with absolute differences.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct GreeksComparison {
    pub analytic: NumericGreeks,
    pub numeric: NumericGreeks,
    pub abs_diff: NumericGreeks,
}

impl GreeksComparison {
    pub fn new(analytic: &GreeksResult, numeric: NumericGreeks) -> Self {
        let analytic = NumericGreeks {
            delta: analytic.delta,
            gamma: analytic.gamma,
            vega: analytic.vega,
        };
        let abs_diff = NumericGreeks {
            delta: (analytic.delta - numeric.delta).abs(),
            gamma: (analytic.gamma - numeric.gamma).abs(),
            vega: (analytic.vega - numeric.vega).abs(),
        };
        Self {
            analytic,
            numeric,
            abs_diff,
        }
    }

    /// Vega gets its own tolerance: its truncation error scales with the vol
    /// bump squared times the third vol derivative, which is much larger.
    pub fn within(&self, delta_tol: f64, gamma_tol: f64, vega_tol: f64) -> bool {
        self.abs_diff.delta < delta_tol
            && self.abs_diff.gamma < gamma_tol
            && self.abs_diff.vega < vega_tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::black_scholes::BlackScholes;
    use crate::models::OptionKind;

    fn atm(kind: OptionKind) -> PricingInputs {
        PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.2, kind)
    }

    /// Linear payoff model: price = 2*S + 3*sigma. Exact derivatives known.
    struct Linear;

    impl PricingModel for Linear {
        fn name(&self) -> &'static str {
            "linear"
        }

        fn price(&self, inputs: &PricingInputs) -> PricingResult<f64> {
            Ok(2.0 * inputs.spot + 3.0 * inputs.volatility)
        }
    }

    #[test]
    fn test_matches_analytic_for_call_and_put() {
        let model = BlackScholes::new();
        for kind in [OptionKind::Call, OptionKind::Put] {
            let inputs = atm(kind);
            let analytic = model.greeks(&inputs).unwrap();
            let numeric =
                numeric_greeks(&model, &inputs, DEFAULT_SPOT_BUMP, DEFAULT_VOL_BUMP).unwrap();
            let cmp = GreeksComparison::new(&analytic, numeric);

            assert!(cmp.abs_diff.delta < 1e-6, "{kind} delta diff={}", cmp.abs_diff.delta);
            assert!(cmp.abs_diff.gamma < 1e-6, "{kind} gamma diff={}", cmp.abs_diff.gamma);
            // Numeric vega compared against the analytic value, not itself
            assert!(cmp.abs_diff.vega < 1e-4, "{kind} vega diff={}", cmp.abs_diff.vega);
            assert!(cmp.within(1e-6, 1e-6, 1e-4));
        }
    }

    #[test]
    fn test_only_uses_prices() {
        let g = numeric_greeks(&Linear, &atm(OptionKind::Call), 1e-3, 1e-3).unwrap();
        assert!((g.delta - 2.0).abs() < 1e-9);
        assert!(g.gamma.abs() < 1e-6);
        assert!((g.vega - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_coarser_vol_bump_loosens_vega() {
        let model = BlackScholes::new();
        let inputs = PricingInputs::new(90.0, 110.0, 0.5, 0.02, 0.35, OptionKind::Put);
        let analytic = model.greeks(&inputs).unwrap();
        let fine = numeric_greeks(&model, &inputs, DEFAULT_SPOT_BUMP, 1e-4).unwrap();
        let coarse = numeric_greeks(&model, &inputs, DEFAULT_SPOT_BUMP, 5e-2).unwrap();
        let fine_err = (fine.vega - analytic.vega).abs();
        let coarse_err = (coarse.vega - analytic.vega).abs();
        assert!(fine_err < 1e-4, "fine vega err={fine_err}");
        assert!(coarse_err > fine_err);
    }

    #[test]
    fn test_rejects_bad_bumps() {
        let model = BlackScholes::new();
        let inputs = atm(OptionKind::Call);
        for (spot_bump, vol_bump) in [(0.0, 1e-4), (1e-4, 0.0), (-1e-4, 1e-4), (f64::NAN, 1e-4)] {
            let result = numeric_greeks(&model, &inputs, spot_bump, vol_bump);
            assert!(matches!(result, Err(PricingError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_vol_bump_through_zero_fails() {
        let model = BlackScholes::new();
        let inputs = atm(OptionKind::Call).with_volatility(0.01);
        let result = numeric_greeks(&model, &inputs, DEFAULT_SPOT_BUMP, 0.05);
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_base_inputs_propagate() {
        let model = BlackScholes::new();
        let inputs = PricingInputs { maturity: 0.0, ..atm(OptionKind::Put) };
        let result = numeric_greeks(&model, &inputs, DEFAULT_SPOT_BUMP, DEFAULT_VOL_BUMP);
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_works_through_trait_object() {
        let model = BlackScholes::new();
        let dyn_model: &dyn PricingModel = &model;
        let g = numeric_greeks(dyn_model, &atm(OptionKind::Call), DEFAULT_SPOT_BUMP, DEFAULT_VOL_BUMP)
            .unwrap();
        assert!(g.delta > 0.6 && g.delta < 0.65);
    }
}
