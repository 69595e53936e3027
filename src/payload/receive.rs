use std::collections::BTreeMap;

use crate::categories::{DemographicCategory, IndustryCategory};
use crate::form::{
    DemographicForm, EnvironmentForm, IndustryForm, PolicyForm, SetupForm, TaxBracket, Toggled,
};
use crate::live::LiveIndustry;
use crate::payload::round2;
use crate::units::{decimal_to_percent, weekly_decimal_to_annual_percent, weekly_wage_to_annual, weekly_wage_to_hourly};
use crate::wire::{WireConfig, WireDemographic, WireEnvironment, WireIndustry, WirePolicies, WireTaxBracket};

/// Flattens a full wire config back into form state, inverting the unit
/// conversions and rounding currency and rate fields to display precision.
pub fn receive_setup(wire: &WireConfig) -> SetupForm {
    SetupForm {
        environment: receive_environment(&wire.environment),
        demographics: wire
            .demographics
            .iter()
            .map(|(&tier, demographic)| (tier, receive_demographic(demographic)))
            .collect(),
        industries: wire
            .industries
            .iter()
            .map(|(&sector, industry)| (sector, receive_industry(industry)))
            .collect(),
        policy: receive_policies(&wire.policies),
    }
}

/// Applies a running-simulation frame onto an existing form. Only the live
/// metric set is mapped (price, balance, wage, employee count); sectors the
/// frame does not mention keep their current values.
pub fn receive_live(form: &mut SetupForm, industries: &BTreeMap<IndustryCategory, LiveIndustry>) {
    for (sector, live) in industries {
        if let Some(industry) = form.industries.get_mut(sector) {
            industry.starting_price = round2(live.current_price);
            industry.starting_balance = round2(live.funds);
            industry.offered_wage = round2(weekly_wage_to_hourly(live.current_wage));
            industry.employees = live.employee_count;
        }
    }
}

fn receive_environment(environment: &WireEnvironment) -> EnvironmentForm {
    EnvironmentForm {
        max_weeks: environment.max_simulation_length,
        num_people: environment.num_people,
        inflation_rate: round2(weekly_decimal_to_annual_percent(environment.inflation_rate)),
        random_events: environment.random_events,
    }
}

fn receive_demographic(demographic: &WireDemographic) -> DemographicForm {
    let spending = IndustryCategory::ALL
        .into_iter()
        .map(|sector| {
            let share = demographic
                .spending_behavior
                .get(&sector)
                .copied()
                .unwrap_or(0.0);
            (sector, round2(decimal_to_percent(share)))
        })
        .collect();
    DemographicForm {
        mean_income: round2(weekly_wage_to_annual(demographic.mean_income)),
        sd_income: round2(weekly_wage_to_annual(demographic.sd_income)),
        proportion: round2(decimal_to_percent(demographic.proportion)),
        unemployment_rate: round2(decimal_to_percent(demographic.unemployment_rate)),
        savings_mean: round2(demographic.current_money_mean),
        savings_sd: round2(demographic.current_money_sd),
        spending,
    }
}

fn receive_industry(industry: &WireIndustry) -> IndustryForm {
    IndustryForm {
        starting_price: round2(industry.price),
        starting_inventory: industry.inventory,
        starting_balance: round2(industry.balance),
        offered_wage: round2(weekly_wage_to_hourly(industry.offered_wage)),
        fixed_cost: round2(industry.fixed_cost),
        material_cost: round2(industry.raw_material_cost),
        employees: industry.number_of_employees,
        worker_efficiency: industry.worker_efficiency,
        debt_allowed: industry.debt_allowed,
    }
}

fn receive_policies(policies: &WirePolicies) -> PolicyForm {
    let income_tax = policies
        .income_tax
        .get(&DemographicCategory::ALL[0])
        .map(|schedule| receive_schedule(schedule))
        .unwrap_or_default();
    PolicyForm {
        sales_tax: toggled_rate(round2(decimal_to_percent(policies.sales_tax))),
        corporate_tax: toggled_rate(round2(decimal_to_percent(uniform_value(
            &policies.corporate_tax,
        )))),
        property_tax: toggled_rate(round2(weekly_decimal_to_annual_percent(
            policies.property_tax,
        ))),
        tariffs: toggled_rate(round2(decimal_to_percent(policies.tariffs))),
        subsidies: toggled_rate(round2(decimal_to_percent(policies.subsidies))),
        minimum_wage: toggled_rate(round2(weekly_wage_to_hourly(policies.minimum_wage))),
        price_cap: Toggled {
            value: round2(uniform_value(&policies.price_cap)),
            enabled: policies.price_cap_enabled,
        },
        corporate_tax_overrides: BTreeMap::new(),
        price_cap_overrides: BTreeMap::new(),
        income_tax,
        income_tax_overrides: BTreeMap::new(),
    }
}

/// Uniform display value for a per-sector map: the first sector in
/// enumeration order, zero when absent. The form shows a single control for
/// these fields; downstream code relies on the first-sector convention, so
/// never average or reconcile here.
fn uniform_value(map: &BTreeMap<IndustryCategory, f64>) -> f64 {
    map.get(&IndustryCategory::ALL[0]).copied().unwrap_or(0.0)
}

/// Zero and disabled are indistinguishable on the wire; nonzero rates come
/// back with their toggle on.
fn toggled_rate(value: f64) -> Toggled<f64> {
    Toggled {
        value,
        enabled: value != 0.0,
    }
}

/// Wire order is preserved; the descending sort is a build-side contract.
fn receive_schedule(schedule: &[WireTaxBracket]) -> Vec<TaxBracket> {
    schedule
        .iter()
        .map(|bracket| TaxBracket {
            threshold: round2(weekly_wage_to_annual(bracket.threshold)),
            rate: round2(weekly_decimal_to_annual_percent(bracket.rate)),
        })
        .collect()
}
