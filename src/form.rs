//! Flat setup-form state.
//!
//! This is the editable representation the UI owns: annual salaries, hourly
//! wages, percentage rates. `payload::build` turns it into the weekly-unit
//! wire config; `payload::receive` comes back the other way.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::categories::{DemographicCategory, IndustryCategory};

/// A form value paired with its enable toggle.
///
/// Disabled values keep whatever the user last typed so re-enabling the
/// toggle restores it; validation and payload building only look at the
/// value when `enabled` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Toggled<T> {
    pub value: T,
    pub enabled: bool,
}

impl<T> Toggled<T> {
    pub fn on(value: T) -> Self {
        Self {
            value,
            enabled: true,
        }
    }

    pub fn off(value: T) -> Self {
        Self {
            value,
            enabled: false,
        }
    }
}

impl Toggled<f64> {
    /// Rate that reaches the wire: the value when enabled, otherwise the
    /// neutral rate.
    pub fn effective(self) -> f64 {
        if self.enabled {
            self.value
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentForm {
    /// Simulation length in weeks.
    pub max_weeks: u64,
    pub num_people: u64,
    /// Annual inflation, percent.
    pub inflation_rate: f64,
    #[serde(default)]
    pub random_events: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicForm {
    /// Mean annual income, dollars.
    pub mean_income: f64,
    pub sd_income: f64,
    /// Share of the population, percent.
    pub proportion: f64,
    /// Percent of this tier out of work at the start.
    pub unemployment_rate: f64,
    pub savings_mean: f64,
    pub savings_sd: f64,
    /// Percent of the weekly budget spent per sector. Rows are expected to
    /// sum to 100; sectors missing from the map count as zero.
    #[serde(default)]
    pub spending: BTreeMap<IndustryCategory, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryForm {
    pub starting_price: f64,
    pub starting_inventory: f64,
    pub starting_balance: f64,
    /// Hourly wage, dollars.
    pub offered_wage: f64,
    /// Weekly overhead, dollars.
    pub fixed_cost: f64,
    pub material_cost: f64,
    pub employees: u64,
    pub worker_efficiency: f64,
    #[serde(default)]
    pub debt_allowed: bool,
}

/// One marginal income-tax bracket as edited in the form: annual threshold
/// in dollars, annual rate in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyForm {
    pub sales_tax: Toggled<f64>,
    pub corporate_tax: Toggled<f64>,
    pub property_tax: Toggled<f64>,
    pub tariffs: Toggled<f64>,
    pub subsidies: Toggled<f64>,
    /// Hourly minimum wage, dollars.
    pub minimum_wage: Toggled<f64>,
    pub price_cap: Toggled<f64>,
    /// Per-sector corporate tax, percent. Sectors not present fall back to
    /// the global rate.
    #[serde(default)]
    pub corporate_tax_overrides: BTreeMap<IndustryCategory, f64>,
    /// Per-sector price cap, dollars. Sectors not present fall back to the
    /// global cap.
    #[serde(default)]
    pub price_cap_overrides: BTreeMap<IndustryCategory, f64>,
    /// Marginal income-tax schedule, in the order the user entered it.
    pub income_tax: Vec<TaxBracket>,
    /// Tier-specific schedules; tiers not present use the global schedule.
    #[serde(default)]
    pub income_tax_overrides: BTreeMap<DemographicCategory, Vec<TaxBracket>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupForm {
    pub environment: EnvironmentForm,
    pub demographics: BTreeMap<DemographicCategory, DemographicForm>,
    pub industries: BTreeMap<IndustryCategory, IndustryForm>,
    pub policy: PolicyForm,
}

impl SetupForm {
    /// Default template used to seed a fresh setup session: every category
    /// populated, proportions summing to 100, incomes rising tier over
    /// tier.
    pub fn template() -> Self {
        let mut demographics = BTreeMap::new();
        demographics.insert(
            DemographicCategory::LowerClass,
            DemographicForm {
                mean_income: 28_000.0,
                sd_income: 4_000.0,
                proportion: 40.0,
                unemployment_rate: 8.0,
                savings_mean: 2_000.0,
                savings_sd: 800.0,
                spending: spending_row([30.0, 10.0, 35.0, 15.0, 5.0, 5.0]),
            },
        );
        demographics.insert(
            DemographicCategory::MiddleClass,
            DemographicForm {
                mean_income: 62_000.0,
                sd_income: 9_000.0,
                proportion: 45.0,
                unemployment_rate: 4.5,
                savings_mean: 18_000.0,
                savings_sd: 6_000.0,
                spending: spending_row([22.0, 10.0, 32.0, 12.0, 12.0, 12.0]),
            },
        );
        demographics.insert(
            DemographicCategory::UpperClass,
            DemographicForm {
                mean_income: 140_000.0,
                sd_income: 25_000.0,
                proportion: 15.0,
                unemployment_rate: 2.5,
                savings_mean: 90_000.0,
                savings_sd: 30_000.0,
                spending: spending_row([12.0, 12.0, 28.0, 8.0, 15.0, 25.0]),
            },
        );

        let mut industries = BTreeMap::new();
        industries.insert(
            IndustryCategory::Groceries,
            IndustryForm {
                starting_price: 4.5,
                starting_inventory: 20_000.0,
                starting_balance: 150_000.0,
                offered_wage: 16.0,
                fixed_cost: 12_000.0,
                material_cost: 1.8,
                employees: 120,
                worker_efficiency: 1.0,
                debt_allowed: true,
            },
        );
        industries.insert(
            IndustryCategory::Clothing,
            IndustryForm {
                starting_price: 35.0,
                starting_inventory: 6_000.0,
                starting_balance: 120_000.0,
                offered_wage: 15.0,
                fixed_cost: 9_000.0,
                material_cost: 11.0,
                employees: 80,
                worker_efficiency: 1.0,
                debt_allowed: true,
            },
        );
        industries.insert(
            IndustryCategory::Housing,
            IndustryForm {
                starting_price: 420.0,
                starting_inventory: 900.0,
                starting_balance: 600_000.0,
                offered_wage: 22.0,
                fixed_cost: 45_000.0,
                material_cost: 150.0,
                employees: 150,
                worker_efficiency: 1.0,
                debt_allowed: true,
            },
        );
        industries.insert(
            IndustryCategory::Utilities,
            IndustryForm {
                starting_price: 60.0,
                starting_inventory: 15_000.0,
                starting_balance: 400_000.0,
                offered_wage: 24.0,
                fixed_cost: 30_000.0,
                material_cost: 18.0,
                employees: 110,
                worker_efficiency: 1.0,
                debt_allowed: false,
            },
        );
        industries.insert(
            IndustryCategory::Healthcare,
            IndustryForm {
                starting_price: 180.0,
                starting_inventory: 4_000.0,
                starting_balance: 350_000.0,
                offered_wage: 28.0,
                fixed_cost: 40_000.0,
                material_cost: 55.0,
                employees: 140,
                worker_efficiency: 1.0,
                debt_allowed: false,
            },
        );
        industries.insert(
            IndustryCategory::Entertainment,
            IndustryForm {
                starting_price: 25.0,
                starting_inventory: 10_000.0,
                starting_balance: 90_000.0,
                offered_wage: 14.0,
                fixed_cost: 7_000.0,
                material_cost: 6.0,
                employees: 60,
                worker_efficiency: 1.0,
                debt_allowed: true,
            },
        );

        Self {
            environment: EnvironmentForm {
                max_weeks: 156,
                num_people: 10_000,
                inflation_rate: 2.0,
                random_events: false,
            },
            demographics,
            industries,
            policy: PolicyForm {
                sales_tax: Toggled::on(8.0),
                corporate_tax: Toggled::on(21.0),
                property_tax: Toggled::off(1.2),
                tariffs: Toggled::off(5.0),
                subsidies: Toggled::off(2.0),
                minimum_wage: Toggled::on(12.0),
                price_cap: Toggled::off(10.0),
                corporate_tax_overrides: BTreeMap::new(),
                price_cap_overrides: BTreeMap::new(),
                income_tax: vec![
                    TaxBracket {
                        threshold: 10_000.0,
                        rate: 10.0,
                    },
                    TaxBracket {
                        threshold: 45_000.0,
                        rate: 22.0,
                    },
                    TaxBracket {
                        threshold: 120_000.0,
                        rate: 32.0,
                    },
                ],
                income_tax_overrides: BTreeMap::new(),
            },
        }
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read setup form {}", path.display()))?;
        let form: SetupForm = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(form)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("Failed to serialize setup form")?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write setup form {}", path.display()))?;
        Ok(())
    }
}

fn spending_row(shares: [f64; 6]) -> BTreeMap<IndustryCategory, f64> {
    IndustryCategory::ALL.into_iter().zip(shares).collect()
}
