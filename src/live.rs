//! Typed view of the service's live-update channel.
//!
//! The service pushes JSON messages discriminated by an `action` tag while
//! a run is in progress. This module owns the codec only; the socket the
//! messages arrive on belongs to the embedding application.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::categories::{DemographicCategory, IndustryCategory};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LiveMessage {
    /// One week of running metrics.
    SimulationUpdate(LiveFrame),
    /// The run reached its configured length.
    SimulationComplete { week: u64 },
    /// Readable failure from the service; surfaced to the user as-is.
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveFrame {
    pub week: u64,
    pub industries: BTreeMap<IndustryCategory, LiveIndustry>,
    #[serde(default)]
    pub demographics: BTreeMap<DemographicCategory, LiveDemographic>,
}

/// Running per-sector metrics. Field names differ from the setup config;
/// `payload::receive_live` maps them onto the form.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LiveIndustry {
    pub current_price: f64,
    pub funds: f64,
    /// Weekly dollars.
    pub current_wage: f64,
    pub employee_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LiveDemographic {
    pub population: u64,
    pub average_money: f64,
    /// Decimal in [0, 1].
    pub unemployment_rate: f64,
}

/// Decodes one channel message. Malformed payloads return the serde error
/// so the caller can show a readable message.
pub fn decode(text: &str) -> Result<LiveMessage, serde_json::Error> {
    serde_json::from_str(text)
}
