use crate::errors::PricingResult;
use crate::models::{GreeksResult, OptionKind, PricingInputs, PricingModel};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Black-Scholes-Merton European option pricing, no dividends.
///
/// d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// d2 = d1 - sigma * sqrt(T)
///
/// Call = S*Phi(d1) - K*exp(-rT)*Phi(d2)
/// Put  = K*exp(-rT)*Phi(-d2) - S*Phi(-d1)
///
/// Phi comes from statrs (erfc-based, well inside 1e-10 near the origin).
pub struct BlackScholes {
    /// Standard normal distribution (created once, reused)
    normal: Normal,
}

impl BlackScholes {
    pub fn new() -> Self {
        Self {
            normal: Normal::standard(),
        }
    }

    /// Standardized intermediates (d1, d2). Caller has already validated.
    #[inline]
    fn d1_d2(inputs: &PricingInputs) -> (f64, f64) {
        let sigma_sqrt_t = inputs.volatility * inputs.maturity.sqrt();
        let d1 = ((inputs.spot / inputs.strike).ln()
            + (inputs.rate + 0.5 * inputs.volatility * inputs.volatility) * inputs.maturity)
            / sigma_sqrt_t;
        (d1, d1 - sigma_sqrt_t)
    }

    /// Closed-form delta, gamma and vega.
    ///
    /// Gamma and vega are computed from the same expression for both kinds,
    /// so call and put values are bit-identical.
    pub fn greeks(&self, inputs: &PricingInputs) -> PricingResult<GreeksResult> {
        inputs.validate()?;

        let (d1, d2) = Self::d1_d2(inputs);
        let sqrt_t = inputs.maturity.sqrt();
        let cdf_d1 = self.normal.cdf(d1);
        let pdf_d1 = self.normal.pdf(d1);

        let delta = match inputs.kind {
            OptionKind::Call => cdf_d1,
            OptionKind::Put => cdf_d1 - 1.0,
        };
        let gamma = pdf_d1 / (inputs.spot * inputs.volatility * sqrt_t);
        let vega = inputs.spot * pdf_d1 * sqrt_t;

        Ok(GreeksResult {
            delta,
            gamma,
            vega,
            d1,
            d2,
        })
    }
}

impl Default for BlackScholes {
    fn default() -> Self {
        Self::new()
    }
}

impl PricingModel for BlackScholes {
    #[inline]
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    /// Pure function: price from inputs. Fails only on the shared preconditions.
    #[inline]
    fn price(&self, inputs: &PricingInputs) -> PricingResult<f64> {
        inputs.validate()?;

        let (d1, d2) = Self::d1_d2(inputs);
        let discounted_strike = inputs.strike * (-inputs.rate * inputs.maturity).exp();

        let value = match inputs.kind {
            OptionKind::Call => {
                inputs.spot * self.normal.cdf(d1) - discounted_strike * self.normal.cdf(d2)
            }
            OptionKind::Put => {
                discounted_strike * self.normal.cdf(-d2) - inputs.spot * self.normal.cdf(-d1)
            }
        };
        Ok(value)
    }
}
