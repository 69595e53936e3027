//! Wire-format configuration exchanged with the simulation service.
//!
//! Field names and unit conventions here are a fixed external contract:
//! weekly compounding rates, weekly wages and salaries, snake_case keys.
//! Per-industry policy maps and the per-tier tax schedule are total over
//! their enumerations so the service never needs fallback logic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::categories::{DemographicCategory, IndustryCategory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireConfig {
    pub environment: WireEnvironment,
    pub demographics: BTreeMap<DemographicCategory, WireDemographic>,
    pub industries: BTreeMap<IndustryCategory, WireIndustry>,
    pub policies: WirePolicies,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEnvironment {
    /// Simulation length in weeks.
    pub max_simulation_length: u64,
    pub num_people: u64,
    /// Weekly compounding rate.
    pub inflation_rate: f64,
    pub random_events: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDemographic {
    /// Weekly dollars.
    pub mean_income: f64,
    pub sd_income: f64,
    /// Share of the population as a decimal in [0, 1].
    pub proportion: f64,
    pub unemployment_rate: f64,
    pub current_money_mean: f64,
    pub current_money_sd: f64,
    /// Decimal budget share per sector, total over the sector enumeration.
    pub spending_behavior: BTreeMap<IndustryCategory, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireIndustry {
    pub price: f64,
    pub inventory: f64,
    pub balance: f64,
    /// Weekly dollars.
    pub offered_wage: f64,
    pub fixed_cost: f64,
    pub raw_material_cost: f64,
    pub number_of_employees: u64,
    pub worker_efficiency: f64,
    pub debt_allowed: bool,
}

/// One marginal bracket on the wire: weekly threshold, weekly compounding
/// rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireTaxBracket {
    pub threshold: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePolicies {
    /// Decimal rate applied per sale.
    pub sales_tax: f64,
    /// Decimal rate per sector, total over the sector enumeration.
    pub corporate_tax: BTreeMap<IndustryCategory, f64>,
    /// Weekly compounding rate.
    pub property_tax: f64,
    pub tariffs: f64,
    pub subsidies: f64,
    /// Weekly dollars.
    pub minimum_wage: f64,
    /// Dollar cap per sector, total over the sector enumeration. Only
    /// honored by the service when `price_cap_enabled` is set.
    pub price_cap: BTreeMap<IndustryCategory, f64>,
    pub price_cap_enabled: bool,
    /// Schedule per tier, total over the tier enumeration, each list sorted
    /// by threshold descending.
    pub income_tax: BTreeMap<DemographicCategory, Vec<WireTaxBracket>>,
}
