use crate::errors::{PricingError, PricingResult};
use crate::heatmap::{self, HeatmapPair, HeatmapRequest};
use crate::inputs::DashboardInputs;
use crate::models::finite_diff::{self, GreeksComparison};
use crate::models::{GreeksResult, OptionKind, PricingInputs, PricingModel};
use crate::state::{AppState, CountersSnapshot};
use axum::extract::{Query, State};
use axum::response::Json;
use portable_atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, serde::Deserialize)]
pub struct KindQuery {
    pub kind: Option<OptionKind>,
}

/// Optional heatmap range overrides. Volatility bounds are in percent,
/// like the dashboard sliders.
#[derive(Debug, serde::Deserialize)]
pub struct RangeQuery {
    pub spot_min: Option<f64>,
    pub spot_max: Option<f64>,
    pub vol_min_pct: Option<f64>,
    pub vol_max_pct: Option<f64>,
}

#[derive(Debug, serde::Serialize)]
pub struct PriceResponse {
    pub inputs: PricingInputs,
    pub call_price: f64,
    pub put_price: f64,
    pub call: GreeksResult,
    pub put: GreeksResult,
}

/// GET /api/price -- call and put price plus analytic Greeks for both
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    Query(form): Query<DashboardInputs>,
) -> PricingResult<Json<PriceResponse>> {
    state.counters.price_requests.fetch_add(1, Ordering::Relaxed);
    price_both(&state, &form)
        .map(Json)
        .map_err(|e| rejected(&state, e))
}

/// GET /api/heatmap -- call and put price grids over spot × volatility
pub async fn get_heatmap(
    State(state): State<Arc<AppState>>,
    Query(form): Query<DashboardInputs>,
    Query(range): Query<RangeQuery>,
) -> PricingResult<Json<HeatmapPair>> {
    state.counters.heatmap_requests.fetch_add(1, Ordering::Relaxed);
    build_heatmap(&state, &form, &range)
        .map(Json)
        .map_err(|e| rejected(&state, e))
}

/// GET /api/validate -- analytic vs finite-difference Greeks
pub async fn get_validate(
    State(state): State<Arc<AppState>>,
    Query(form): Query<DashboardInputs>,
    Query(kind): Query<KindQuery>,
) -> PricingResult<Json<GreeksComparison>> {
    state.counters.validation_requests.fetch_add(1, Ordering::Relaxed);
    compare_greeks(&state, &form, kind.kind.unwrap_or(OptionKind::Call))
        .map(Json)
        .map_err(|e| rejected(&state, e))
}

/// GET /api/counters -- request counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<CountersSnapshot> {
    Json(state.counters.snapshot())
}

fn price_both(state: &AppState, form: &DashboardInputs) -> PricingResult<PriceResponse> {
    let call_inputs = form.to_pricing(OptionKind::Call)?;
    let put_inputs = call_inputs.with_kind(OptionKind::Put);
    Ok(PriceResponse {
        inputs: call_inputs,
        call_price: state.model.price(&call_inputs)?,
        put_price: state.model.price(&put_inputs)?,
        call: state.model.greeks(&call_inputs)?,
        put: state.model.greeks(&put_inputs)?,
    })
}

fn build_heatmap(
    state: &AppState,
    form: &DashboardInputs,
    range: &RangeQuery,
) -> PricingResult<HeatmapPair> {
    let base = form.to_pricing(OptionKind::Call)?;
    let defaults = HeatmapRequest::around(&base, state.config.heatmap_size);
    let vol_min = match range.vol_min_pct {
        Some(pct) => heatmap::vol_from_slider("Min Volatility", pct)?,
        None => defaults.vol_min,
    };
    let vol_max = match range.vol_max_pct {
        Some(pct) => heatmap::vol_from_slider("Max Volatility", pct)?,
        None => defaults.vol_max,
    };
    let request = HeatmapRequest {
        spot_min: range.spot_min.unwrap_or(defaults.spot_min),
        spot_max: range.spot_max.unwrap_or(defaults.spot_max),
        vol_min,
        vol_max,
        ..defaults
    };
    request.build(&state.model)
}

fn compare_greeks(
    state: &AppState,
    form: &DashboardInputs,
    kind: OptionKind,
) -> PricingResult<GreeksComparison> {
    let inputs = form.to_pricing(kind)?;
    let analytic = state.model.greeks(&inputs)?;
    let numeric = finite_diff::numeric_greeks(
        &state.model,
        &inputs,
        state.config.fd_spot_bump,
        state.config.fd_vol_bump,
    )?;
    Ok(GreeksComparison::new(&analytic, numeric))
}

fn rejected(state: &AppState, err: PricingError) -> PricingError {
    state.counters.rejected_inputs.fetch_add(1, Ordering::Relaxed);
    tracing::warn!(error = %err, model = state.model.name(), "request rejected");
    err
}
