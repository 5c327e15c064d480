use crate::errors::{PricingError, PricingResult};
use crate::models::finite_diff::{DEFAULT_SPOT_BUMP, DEFAULT_VOL_BUMP};
use std::path::PathBuf;
use std::str::FromStr;

const MAX_HEATMAP_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub server_port: u16,
    pub dashboard_dir: PathBuf,
    pub heatmap_size: usize,
    pub fd_spot_bump: f64,
    pub fd_vol_bump: f64,
}

impl AppConfig {
    /// Load `.env` (if present) and read from the process environment.
    pub fn from_env() -> PricingResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> PricingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port: u16 = parse_or(&lookup, "SERVER_PORT", 3001)?;
        let heatmap_size: usize = parse_or(&lookup, "HEATMAP_SIZE", crate::heatmap::DEFAULT_SIZE)?;
        let fd_spot_bump: f64 = parse_or(&lookup, "FD_SPOT_BUMP", DEFAULT_SPOT_BUMP)?;
        let fd_vol_bump: f64 = parse_or(&lookup, "FD_VOL_BUMP", DEFAULT_VOL_BUMP)?;

        if !(2..=MAX_HEATMAP_SIZE).contains(&heatmap_size) {
            return Err(PricingError::Config(format!(
                "HEATMAP_SIZE: must be within 2..={MAX_HEATMAP_SIZE}, got {heatmap_size}"
            )));
        }
        for (key, bump) in [("FD_SPOT_BUMP", fd_spot_bump), ("FD_VOL_BUMP", fd_vol_bump)] {
            if !(bump > 0.0 && bump.is_finite()) {
                return Err(PricingError::Config(format!("{key}: must be positive, got {bump}")));
            }
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            dashboard_dir: PathBuf::from(
                lookup("DASHBOARD_DIR").unwrap_or_else(|| "dashboard".to_string()),
            ),
            heatmap_size,
            fd_spot_bump,
            fd_vol_bump,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.server_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            server_port: 3001,
            dashboard_dir: PathBuf::from("dashboard"),
            heatmap_size: crate::heatmap::DEFAULT_SIZE,
            fd_spot_bump: DEFAULT_SPOT_BUMP,
            fd_vol_bump: DEFAULT_VOL_BUMP,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> PricingResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PricingError::Config(format!("{key}: {e}"))),
        None => Ok(default),
    }
}
