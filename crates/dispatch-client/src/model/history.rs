use serde::{Deserialize, Serialize};

/// Order history summary returned by the stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total: u64,
    /// Orders placed in the last 15 minutes.
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

/// One row of the recent-orders list. The server sends whole database rows, so
/// everything beyond the id is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub farmer_name: Option<String>,
    #[serde(default, alias = "crop")]
    pub crop_type: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub eta_mins: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
