//! JSON run configuration for the demo.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use cafe_agent::CafeLayout;
use cafe_core::SimConfig;
use cafe_motion::Pose;
use cafe_sim::WorldConfig;

/// Everything a run needs besides the CSV tables.
///
/// Every field is optional in the file; missing ones take their defaults.
///
/// ```json
/// {
///   "sim":       { "max_ticks": 40000, "snapshot_interval_ticks": 32 },
///   "world":     { "gps_jitter_m": 0.0005 },
///   "customers": [ { "id": 1 }, { "id": 2, "start": { "position": { "x": 0.0, "z": 0.0 }, "heading_deg": 180.0 } } ],
///   "keys":      "0:a"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CafeConfig {
    pub sim:         SimConfig,
    pub world:       WorldConfig,
    pub layout:      CafeLayout,
    pub staff_start: Option<Pose>,
    pub customers:   Vec<CustomerStart>,
    /// Key script in `tick:key` form, e.g. `"0:a"`.
    pub keys:        String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerStart {
    pub id:    u8,
    #[serde(default)]
    pub start: Option<Pose>,
}

impl Default for CafeConfig {
    fn default() -> Self {
        Self {
            sim:         SimConfig::default(),
            world:       WorldConfig::default(),
            layout:      CafeLayout::default(),
            staff_start: None,
            customers:   vec![CustomerStart { id: 1, start: None }, CustomerStart { id: 2, start: None }],
            keys:        "0:a".to_owned(),
        }
    }
}

impl CafeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}
