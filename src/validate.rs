//! Full validation pass over the setup form.
//!
//! Every rule is checked on every call; the report is rebuilt from scratch
//! rather than patched incrementally. An empty message map means the form
//! can be submitted. Flags mirror the messages in a nested
//! section → category → field shape so the UI can highlight inputs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::categories::{DemographicCategory, IndustryCategory};
use crate::form::SetupForm;

/// Allowed drift of the demographic proportion total from 100%, in
/// percentage points (rounding slack for thirds and the like).
pub const PROPORTION_TOLERANCE: f64 = 0.5;
/// Allowed drift of a spending row total from 100%.
pub const SPENDING_TOLERANCE: f64 = 0.1;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Error key → human-readable message.
    pub messages: BTreeMap<String, String>,
    pub flags: FieldFlags,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    fn record(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FieldFlags {
    pub environment: EnvironmentFlags,
    pub demographics: BTreeMap<DemographicCategory, DemographicFlags>,
    pub industries: BTreeMap<IndustryCategory, IndustryFlags>,
    pub policy: PolicyFlags,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentFlags {
    pub max_weeks: bool,
    pub num_people: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct DemographicFlags {
    pub mean_income: bool,
    pub sd_income: bool,
    pub proportion: bool,
    pub unemployment_rate: bool,
    pub savings_mean: bool,
    pub savings_sd: bool,
    pub spending: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct IndustryFlags {
    pub starting_price: bool,
    pub starting_inventory: bool,
    pub starting_balance: bool,
    pub offered_wage: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PolicyFlags {
    pub sales_tax: bool,
    pub corporate_tax: bool,
    pub property_tax: bool,
    pub tariffs: bool,
    pub subsidies: bool,
    pub minimum_wage: bool,
    pub price_cap: bool,
    pub price_cap_overrides: BTreeMap<IndustryCategory, bool>,
}

pub fn validate(form: &SetupForm) -> ValidationReport {
    let mut report = ValidationReport::default();
    // Seed a flag row per category so the UI can index unconditionally.
    for tier in DemographicCategory::ALL {
        report
            .flags
            .demographics
            .insert(tier, DemographicFlags::default());
    }
    for sector in IndustryCategory::ALL {
        report
            .flags
            .industries
            .insert(sector, IndustryFlags::default());
    }
    check_environment(form, &mut report);
    check_demographics(form, &mut report);
    check_industries(form, &mut report);
    check_policy(form, &mut report);
    report
}

fn check_environment(form: &SetupForm, report: &mut ValidationReport) {
    if form.environment.max_weeks <= 10 {
        report.flags.environment.max_weeks = true;
        report.record(
            "environment.max_weeks",
            "simulation length must be longer than 10 weeks",
        );
    }
    if form.environment.num_people == 0 {
        report.flags.environment.num_people = true;
        report.record(
            "environment.num_people",
            "population must be greater than zero",
        );
    }
}

fn check_demographics(form: &SetupForm, report: &mut ValidationReport) {
    let total: f64 = form.demographics.values().map(|d| d.proportion).sum();
    if (total - 100.0).abs() > PROPORTION_TOLERANCE {
        for flags in report.flags.demographics.values_mut() {
            flags.proportion = true;
        }
        report.record(
            "demographics.proportions",
            format!("demographic proportions must sum to 100% (currently {total:.1}%)"),
        );
    }

    for (&tier, demographic) in &form.demographics {
        let flags = report.flags.demographics.entry(tier).or_default();
        let key = tier.key();

        if !(0.0..=100.0).contains(&demographic.unemployment_rate) {
            flags.unemployment_rate = true;
            report.record(
                format!("demographics.{key}.unemployment_rate"),
                format!("{tier} unemployment rate must be between 0% and 100%"),
            );
        }
        if demographic.mean_income <= 0.0 {
            let flags = report.flags.demographics.entry(tier).or_default();
            flags.mean_income = true;
            report.record(
                format!("demographics.{key}.mean_income"),
                format!("{tier} mean income must be greater than zero"),
            );
        }
        if demographic.sd_income <= 0.0 {
            let flags = report.flags.demographics.entry(tier).or_default();
            flags.sd_income = true;
            report.record(
                format!("demographics.{key}.sd_income"),
                format!("{tier} income standard deviation must be greater than zero"),
            );
        }
        if demographic.savings_mean < 0.0 {
            let flags = report.flags.demographics.entry(tier).or_default();
            flags.savings_mean = true;
            report.record(
                format!("demographics.{key}.savings_mean"),
                format!("{tier} mean savings cannot be negative"),
            );
        }
        if demographic.savings_sd <= 0.0 {
            let flags = report.flags.demographics.entry(tier).or_default();
            flags.savings_sd = true;
            report.record(
                format!("demographics.{key}.savings_sd"),
                format!("{tier} savings standard deviation must be greater than zero"),
            );
        }
        let spent: f64 = demographic.spending.values().sum();
        if (spent - 100.0).abs() > SPENDING_TOLERANCE {
            let flags = report.flags.demographics.entry(tier).or_default();
            flags.spending = true;
            report.record(
                format!("demographics.{key}.spending"),
                format!("{tier} spending shares must sum to 100% (currently {spent:.1}%)"),
            );
        }
    }

    // Richer tiers must out-earn poorer ones, in enumeration order.
    let mut previous: Option<(DemographicCategory, f64)> = None;
    for tier in DemographicCategory::ALL {
        let Some(demographic) = form.demographics.get(&tier) else {
            continue;
        };
        if let Some((poorer, income)) = previous {
            if demographic.mean_income <= income {
                let flags = report.flags.demographics.entry(tier).or_default();
                flags.mean_income = true;
                report.record(
                    format!("demographics.{}.mean_income_order", tier.key()),
                    format!("{tier} mean income must be higher than {poorer} mean income"),
                );
            }
        }
        previous = Some((tier, demographic.mean_income));
    }
}

fn check_industries(form: &SetupForm, report: &mut ValidationReport) {
    for (&sector, industry) in &form.industries {
        let flags = report.flags.industries.entry(sector).or_default();
        let key = sector.key();

        if industry.starting_price <= 0.0 {
            flags.starting_price = true;
            report.record(
                format!("industries.{key}.starting_price"),
                format!("{sector} starting price must be greater than zero"),
            );
        }
        if industry.starting_inventory <= 0.0 {
            let flags = report.flags.industries.entry(sector).or_default();
            flags.starting_inventory = true;
            report.record(
                format!("industries.{key}.starting_inventory"),
                format!("{sector} starting inventory must be greater than zero"),
            );
        }
        if industry.starting_balance <= 0.0 {
            let flags = report.flags.industries.entry(sector).or_default();
            flags.starting_balance = true;
            report.record(
                format!("industries.{key}.starting_balance"),
                format!("{sector} starting balance must be greater than zero"),
            );
        }
        if industry.offered_wage <= 0.0 {
            let flags = report.flags.industries.entry(sector).or_default();
            flags.offered_wage = true;
            report.record(
                format!("industries.{key}.offered_wage"),
                format!("{sector} offered wage must be greater than zero"),
            );
        }
    }
}

fn check_policy(form: &SetupForm, report: &mut ValidationReport) {
    let policy = &form.policy;

    let percent_fields = [
        ("sales_tax", "sales tax", policy.sales_tax),
        ("corporate_tax", "corporate tax", policy.corporate_tax),
        ("property_tax", "property tax", policy.property_tax),
        ("tariffs", "tariffs", policy.tariffs),
        ("subsidies", "subsidies", policy.subsidies),
    ];
    for (key, label, rate) in percent_fields {
        if rate.enabled && !(0.0..=100.0).contains(&rate.value) {
            set_policy_flag(&mut report.flags.policy, key);
            report.record(
                format!("policy.{key}"),
                format!("{label} must be between 0% and 100%"),
            );
        }
    }

    if policy.minimum_wage.enabled && policy.minimum_wage.value <= 0.0 {
        report.flags.policy.minimum_wage = true;
        report.record("policy.minimum_wage", "minimum wage must be greater than zero");
    }
    if policy.price_cap.enabled && policy.price_cap.value <= 0.0 {
        report.flags.policy.price_cap = true;
        report.record("policy.price_cap", "price cap must be greater than zero");
    }
    for (&sector, &cap) in &policy.price_cap_overrides {
        if cap <= 0.0 {
            report.flags.policy.price_cap_overrides.insert(sector, true);
            report.record(
                format!("policy.price_cap.{}", sector.key()),
                format!("{sector} price cap must be greater than zero"),
            );
        }
    }
}

fn set_policy_flag(flags: &mut PolicyFlags, key: &str) {
    match key {
        "sales_tax" => flags.sales_tax = true,
        "corporate_tax" => flags.corporate_tax = true,
        "property_tax" => flags.property_tax = true,
        "tariffs" => flags.tariffs = true,
        "subsidies" => flags.subsidies = true,
        _ => {}
    }
}
