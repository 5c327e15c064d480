use crate::config::AppConfig;
use crate::models::black_scholes::BlackScholes;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Request counters. Lock-free, read by `/api/counters`.
#[derive(Debug, Default)]
pub struct Counters {
    pub price_requests: AtomicU64,
    pub heatmap_requests: AtomicU64,
    pub validation_requests: AtomicU64,
    pub rejected_inputs: AtomicU64,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct CountersSnapshot {
    pub price_requests: u64,
    pub heatmap_requests: u64,
    pub validation_requests: u64,
    pub rejected_inputs: u64,
}

impl Counters {
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            price_requests: self.price_requests.load(Ordering::Relaxed),
            heatmap_requests: self.heatmap_requests.load(Ordering::Relaxed),
            validation_requests: self.validation_requests.load(Ordering::Relaxed),
            rejected_inputs: self.rejected_inputs.load(Ordering::Relaxed),
        }
    }
}

/// Shared by every handler. The model is stateless, so one instance serves
/// all requests without locking.
pub struct AppState {
    pub config: AppConfig,
    pub model: BlackScholes,
    pub counters: Counters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            model: BlackScholes::new(),
            counters: Counters::default(),
        })
    }
}
