use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::planner::{BoundsPolicy, Query};

/// A batch job as read from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub grid: Vec<Vec<f64>>,
    pub queries: Vec<Query>,
    #[serde(default = "default_multiplier")]
    pub hv_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub diag_multiplier: f64,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Found,
    Unreachable,
    Error,
}

/// One row of a batch report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryReport {
    pub index: usize,
    pub start: Cell,
    pub end: Cell,
    pub status: QueryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Cell>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Batch outcome handed to renderers and report writers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub rows: usize,
    pub cols: usize,
    pub hv_multiplier: f64,
    pub diag_multiplier: f64,
    pub total_distance: f64,
    pub had_unreachable: bool,
    pub had_errors: bool,
    pub queries: Vec<QueryReport>,
}
