//! Spot × volatility price grid for the dashboard heatmap.
//!
//! Rows are volatility, columns are spot; strike, maturity and rate are held
//! fixed. Every cell is an independent `price` call. Cells carry a viridis
//! fill normalized over the grid and a black/white label picked by luminance.

use crate::errors::{PricingError, PricingResult};
use crate::inputs::MIN_PRICE;
use crate::models::{OptionKind, PricingInputs, PricingModel};

pub const DEFAULT_SIZE: usize = 10;

/// Default range around the base inputs: ±20 % on spot and volatility.
const RANGE_DOWN: f64 = 0.8;
const RANGE_UP: f64 = 1.2;

/// Lowest volatility the default range will start at (0.1 %).
const MIN_DEFAULT_VOL: f64 = 0.001;

/// Label text switches to black above this relative luminance.
const LUMINANCE_THRESHOLD: f64 = 0.55;

/// Bounds of the heatmap volatility sliders, in percent.
pub const VOL_SLIDER_PCT_RANGE: (f64, f64) = (0.01, 300.0);

/// Viridis anchor colours at t = 0, 0.1, ..., 1 (matplotlib samples).
const VIRIDIS: [[f64; 3]; 11] = [
    [0.267004, 0.004874, 0.329415],
    [0.282623, 0.140926, 0.457517],
    [0.253935, 0.265254, 0.529983],
    [0.206756, 0.371758, 0.553117],
    [0.163625, 0.471133, 0.558148],
    [0.127568, 0.566949, 0.550556],
    [0.134692, 0.658636, 0.517649],
    [0.266941, 0.748751, 0.440573],
    [0.477504, 0.821444, 0.318195],
    [0.741388, 0.873449, 0.149561],
    [0.993248, 0.906157, 0.143936],
];

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Relative luminance (Rec. 709 weights) on 0..1 channels.
    #[inline]
    pub fn luminance(&self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Piecewise-linear viridis. `t` is clamped to [0, 1].
pub fn viridis(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f64;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[lo + 1]);
    let mix = |i: usize| a[i] + (b[i] - a[i]) * frac;
    Rgb {
        r: mix(0),
        g: mix(1),
        b: mix(2),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Black,
    White,
}

impl LabelColor {
    #[inline]
    pub fn for_fill(fill: &Rgb) -> Self {
        if fill.luminance() > LUMINANCE_THRESHOLD {
            Self::Black
        } else {
            Self::White
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HeatCell {
    pub price: f64,
    pub fill: String,
    pub label: LabelColor,
}

/// One colour-mapped grid. `cells[i][j]` is volatility `i`, spot `j`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Heatmap {
    pub kind: OptionKind,
    pub min: f64,
    pub max: f64,
    pub cells: Vec<Vec<HeatCell>>,
}

/// Call and put grids over the same axes.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeatmapPair {
    pub spots: Vec<f64>,
    pub vols: Vec<f64>,
    pub call: Heatmap,
    pub put: Heatmap,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeatmapRequest {
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub spot_min: f64,
    pub spot_max: f64,
    pub vol_min: f64,
    pub vol_max: f64,
    pub size: usize,
}

impl HeatmapRequest {
    /// Default ranges around `base`: spot and volatility scaled by 0.8..1.2,
    /// with floors so the low end stays priceable.
    pub fn around(base: &PricingInputs, size: usize) -> Self {
        Self {
            strike: base.strike,
            maturity: base.maturity,
            rate: base.rate,
            spot_min: (base.spot * RANGE_DOWN).max(MIN_PRICE),
            spot_max: base.spot * RANGE_UP,
            vol_min: (base.volatility * RANGE_DOWN).max(MIN_DEFAULT_VOL),
            vol_max: base.volatility * RANGE_UP,
            size,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        if self.size < 2 {
            return Err(PricingError::invalid(format!(
                "heatmap size must be at least 2, got {}",
                self.size
            )));
        }
        if !(self.spot_min >= MIN_PRICE) {
            return Err(PricingError::invalid(format!(
                "Min Spot Price must be >= {MIN_PRICE}, got {}",
                self.spot_min
            )));
        }
        if !self.spot_max.is_finite() {
            return Err(PricingError::invalid(format!(
                "Max Spot Price must be finite, got {}",
                self.spot_max
            )));
        }
        if !(self.spot_max > self.spot_min) {
            return Err(PricingError::invalid("Max Spot Price must be > Min Spot Price."));
        }
        if !(self.vol_min > 0.0) {
            return Err(PricingError::invalid(format!(
                "Min Volatility must be positive, got {}",
                self.vol_min
            )));
        }
        if !self.vol_max.is_finite() {
            return Err(PricingError::invalid(format!(
                "Max Volatility must be finite, got {}",
                self.vol_max
            )));
        }
        if !(self.vol_max > self.vol_min) {
            return Err(PricingError::invalid("Max Volatility must be > Min Volatility."));
        }
        Ok(())
    }

    /// Price both grids with `model`.
    pub fn build(&self, model: &dyn PricingModel) -> PricingResult<HeatmapPair> {
        self.validate()?;

        let spots = linspace(self.spot_min, self.spot_max, self.size);
        let vols = linspace(self.vol_min, self.vol_max, self.size);

        let call = self.grid(model, OptionKind::Call, &spots, &vols)?;
        let put = self.grid(model, OptionKind::Put, &spots, &vols)?;

        tracing::debug!(
            model = model.name(),
            size = self.size,
            call_min = call.min,
            call_max = call.max,
            "heatmap built"
        );

        Ok(HeatmapPair {
            spots,
            vols,
            call,
            put,
        })
    }

    fn grid(
        &self,
        model: &dyn PricingModel,
        kind: OptionKind,
        spots: &[f64],
        vols: &[f64],
    ) -> PricingResult<Heatmap> {
        let mut prices = Vec::with_capacity(vols.len());
        for &vol in vols {
            let row = spots
                .iter()
                .map(|&spot| {
                    model.price(&PricingInputs::new(
                        spot,
                        self.strike,
                        self.maturity,
                        self.rate,
                        vol,
                        kind,
                    ))
                })
                .collect::<PricingResult<Vec<f64>>>()?;
            prices.push(row);
        }
        Ok(colorize(kind, prices))
    }
}

/// Attach fill and label colours, normalizing over the grid's own range.
/// A flat grid maps every cell to the low end of the colormap.
fn colorize(kind: OptionKind, prices: Vec<Vec<f64>>) -> Heatmap {
    let (min, max) = prices
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    let span = max - min;

    let cells = prices
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|price| {
                    let t = if span > 0.0 { (price - min) / span } else { 0.0 };
                    let fill = viridis(t);
                    HeatCell {
                        price,
                        fill: fill.to_hex(),
                        label: LabelColor::for_fill(&fill),
                    }
                })
                .collect()
        })
        .collect();

    Heatmap {
        kind,
        min,
        max,
        cells,
    }
}

/// Check a volatility slider value (percent) and convert it to a decimal.
pub fn vol_from_slider(field: &str, pct: f64) -> PricingResult<f64> {
    let (lo, hi) = VOL_SLIDER_PCT_RANGE;
    if pct.is_finite() && (lo..=hi).contains(&pct) {
        Ok(pct / 100.0)
    } else {
        Err(PricingError::invalid(format!(
            "{field} must be within [{lo}, {hi}] %, got {pct}"
        )))
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
