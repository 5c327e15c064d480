pub mod black_scholes;
pub mod finite_diff;

use crate::errors::{PricingError, PricingResult};
use std::str::FromStr;

/// European option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    /// Accepts "call"/"put" in any case, ignoring surrounding whitespace.
    fn from_str(s: &str) -> PricingResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(Self::Call),
            "put" => Ok(Self::Put),
            other => Err(PricingError::invalid(format!(
                "option kind must be call or put, got {other:?}"
            ))),
        }
    }
}

/// Inputs to a single Black-Scholes evaluation. Plain value type, Copy.
///
/// `maturity` is in years, `rate` and `volatility` are annualized decimals
/// (0.05 = 5%).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PricingInputs {
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub volatility: f64,
    pub kind: OptionKind,
}

impl PricingInputs {
    #[inline]
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            kind,
        }
    }

    /// Preconditions shared by every formula: positive maturity and volatility.
    /// Written as `!(x > 0)` so NaN is rejected too.
    pub fn validate(&self) -> PricingResult<()> {
        if !(self.maturity > 0.0) {
            return Err(PricingError::invalid(format!(
                "maturity must be positive, got {}",
                self.maturity
            )));
        }
        if !(self.volatility > 0.0) {
            return Err(PricingError::invalid(format!(
                "volatility must be positive, got {}",
                self.volatility
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    #[inline]
    pub fn with_kind(self, kind: OptionKind) -> Self {
        Self { kind, ..self }
    }
}

/// Closed-form sensitivities plus the standardized d1/d2 they were built from.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GreeksResult {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub d1: f64,
    pub d2: f64,
}

/// Finite-difference estimates of the same sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct NumericGreeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
}

/// All pricing models implement this trait.
/// price() must be a pure function: deterministic output from inputs only.
/// Send + Sync so a single instance can be shared by server handlers.
pub trait PricingModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Present value of the option described by `inputs`.
    fn price(&self, inputs: &PricingInputs) -> PricingResult<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm() -> PricingInputs {
        PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call)
    }

    #[test]
    fn test_kind_parses_loosely() {
        assert_eq!("call".parse::<OptionKind>().unwrap(), OptionKind::Call);
        assert_eq!("  PUT ".parse::<OptionKind>().unwrap(), OptionKind::Put);
        assert_eq!("Call\n".parse::<OptionKind>().unwrap(), OptionKind::Call);
    }

    #[test]
    fn test_invalid_kind_rejected() {
        let err = "invalid".parse::<OptionKind>().unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
        assert!("".parse::<OptionKind>().is_err());
        assert!("straddle".parse::<OptionKind>().is_err());
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [OptionKind::Call, OptionKind::Put] {
            assert_eq!(kind.to_string().parse::<OptionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_validate_accepts_standard_inputs() {
        assert!(atm().validate().is_ok());
        // Negative rates are allowed
        assert!(PricingInputs { rate: -0.01, ..atm() }.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_maturity_and_vol() {
        for maturity in [0.0, -1.0, f64::NAN] {
            let inputs = PricingInputs { maturity, ..atm() };
            assert!(matches!(inputs.validate(), Err(PricingError::InvalidInput(_))));
        }
        for volatility in [0.0, -0.2, f64::NAN] {
            let inputs = atm().with_volatility(volatility);
            assert!(matches!(inputs.validate(), Err(PricingError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_with_helpers_only_touch_one_field() {
        let base = atm();
        let bumped = base.with_spot(101.0).with_kind(OptionKind::Put);
        assert_eq!(bumped.spot, 101.0);
        assert_eq!(bumped.kind, OptionKind::Put);
        assert_eq!(bumped.strike, base.strike);
        assert_eq!(bumped.volatility, base.volatility);
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&OptionKind::Put).unwrap();
        assert_eq!(json, "\"put\"");
        let kind: OptionKind = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(kind, OptionKind::Call);
    }
}
