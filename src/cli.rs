//! Interactive terminal prompt: read one set of inputs, print the price,
//! the Greeks, and how the closed-form Greeks compare with finite differences.

use crate::errors::{PricingError, PricingResult};
use crate::inputs::{DashboardInputs, TimeUnit};
use crate::models::black_scholes::BlackScholes;
use crate::models::finite_diff::{self, GreeksComparison};
use crate::models::{NumericGreeks, OptionKind, PricingModel};
use std::io::{BufRead, Write};

pub fn run_prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    spot_bump: f64,
    vol_bump: f64,
) -> PricingResult<()> {
    let form = DashboardInputs {
        spot: ask_number(input, out, "Enter Spot Price: ")?,
        strike: ask_number(input, out, "Enter Strike Price: ")?,
        maturity: ask_number(input, out, "Enter Time of Maturity (in Days): ")?,
        unit: TimeUnit::Days,
        rate_pct: ask_number(input, out, "Enter Risk-Free Interest Rate [%]: ")?,
        vol_pct: ask_number(input, out, "Enter Volatility [%]: ")?,
    };
    let kind: OptionKind = ask(input, out, "Enter option type (call/put): ")?.parse()?;
    let inputs = form.to_pricing(kind)?;

    tracing::debug!(?inputs, "prompt inputs collected");

    let model = BlackScholes::new();
    let price = model.price(&inputs)?;
    let analytic = model.greeks(&inputs)?;
    let numeric = finite_diff::numeric_greeks(&model, &inputs, spot_bump, vol_bump)?;
    let cmp = GreeksComparison::new(&analytic, numeric);

    let label = match kind {
        OptionKind::Call => "Call",
        OptionKind::Put => "Put",
    };
    writeln!(out, "European {label} Price: ${price:.4}")?;
    writeln!(out, "Greeks: {}", fmt_greeks(&cmp.analytic, 6))?;
    writeln!(out)?;
    writeln!(out, "Analytical greeks: {}", fmt_greeks(&cmp.analytic, 6))?;
    writeln!(out, "Numerical greeks:  {}", fmt_greeks(&cmp.numeric, 6))?;
    writeln!(out)?;
    writeln!(out, "Absolute diff:     {}", fmt_greeks(&cmp.abs_diff, 10))?;
    out.flush()?;
    Ok(())
}

fn fmt_greeks(g: &NumericGreeks, decimals: usize) -> String {
    format!(
        "delta={:.*} gamma={:.*} vega={:.*}",
        decimals, g.delta, decimals, g.gamma, decimals, g.vega
    )
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> PricingResult<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PricingError::Io(format!("input closed at {:?}", prompt.trim())));
    }
    Ok(line.trim().to_string())
}

fn ask_number<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> PricingResult<f64> {
    let raw = ask(input, out, prompt)?;
    raw.parse::<f64>().map_err(|e| {
        PricingError::invalid(format!("{} {raw:?} is not a number ({e})", prompt.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finite_diff::{DEFAULT_SPOT_BUMP, DEFAULT_VOL_BUMP};
    use std::io::Cursor;

    fn run(script: &str) -> (PricingResult<()>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = run_prompt(&mut input, &mut out, DEFAULT_SPOT_BUMP, DEFAULT_VOL_BUMP);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_reference_call_session() {
        let (result, out) = run("100\n100\n365\n5\n20\n Call \n");
        assert!(result.is_ok(), "{result:?}");
        assert!(out.contains("European Call Price: $10.4506"), "{out}");
        assert!(out.contains("Greeks: delta=0.636831 gamma=0.018762 vega=37.524035"), "{out}");
        assert!(out.contains("Numerical greeks:"));
        assert!(out.contains("Absolute diff:"));
    }

    #[test]
    fn test_put_session() {
        let (result, out) = run("100\n100\n365\n5\n20\nput\n");
        assert!(result.is_ok());
        assert!(out.contains("European Put Price: $5.5735"), "{out}");
        assert!(out.contains("delta=-0.363169"), "{out}");
    }

    #[test]
    fn test_bad_kind_is_invalid_input() {
        let (result, _) = run("100\n100\n365\n5\n20\ninvalid\n");
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_number_is_invalid_input() {
        let (result, _) = run("abc\n");
        let err = result.unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(ref m) if m.contains("Spot Price")));
    }

    #[test]
    fn test_zero_maturity_rejected() {
        let (result, out) = run("100\n100\n0\n5\n20\ncall\n");
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
        assert!(!out.contains("Price: $"));
    }

    #[test]
    fn test_closed_input_is_io_error() {
        let (result, _) = run("100\n100\n");
        assert!(matches!(result, Err(PricingError::Io(_))));
    }
}
