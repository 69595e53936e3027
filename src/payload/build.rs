use crate::categories::{DemographicCategory, IndustryCategory};
use crate::form::{DemographicForm, EnvironmentForm, IndustryForm, PolicyForm, SetupForm, TaxBracket};
use crate::units::{
    annual_percent_to_weekly_decimal, annual_salary_to_weekly, hourly_wage_to_weekly,
    percent_to_decimal,
};
use crate::wire::{
    WireConfig, WireDemographic, WireEnvironment, WireIndustry, WirePolicies, WireTaxBracket,
};

/// Assembles the wire config the service expects from the flat form state.
pub fn build(form: &SetupForm) -> WireConfig {
    WireConfig {
        environment: build_environment(&form.environment),
        demographics: form
            .demographics
            .iter()
            .map(|(&tier, demographic)| (tier, build_demographic(demographic)))
            .collect(),
        industries: form
            .industries
            .iter()
            .map(|(&sector, industry)| (sector, build_industry(industry)))
            .collect(),
        policies: build_policies(&form.policy),
    }
}

fn build_environment(environment: &EnvironmentForm) -> WireEnvironment {
    WireEnvironment {
        max_simulation_length: environment.max_weeks,
        num_people: environment.num_people,
        inflation_rate: annual_percent_to_weekly_decimal(environment.inflation_rate),
        random_events: environment.random_events,
    }
}

fn build_demographic(demographic: &DemographicForm) -> WireDemographic {
    // The wire row covers every sector; sectors the form never touched
    // spend nothing.
    let spending_behavior = IndustryCategory::ALL
        .into_iter()
        .map(|sector| {
            let share = demographic.spending.get(&sector).copied().unwrap_or(0.0);
            (sector, percent_to_decimal(share))
        })
        .collect();
    WireDemographic {
        mean_income: annual_salary_to_weekly(demographic.mean_income),
        sd_income: annual_salary_to_weekly(demographic.sd_income),
        proportion: percent_to_decimal(demographic.proportion),
        unemployment_rate: percent_to_decimal(demographic.unemployment_rate),
        current_money_mean: demographic.savings_mean,
        current_money_sd: demographic.savings_sd,
        spending_behavior,
    }
}

fn build_industry(industry: &IndustryForm) -> WireIndustry {
    WireIndustry {
        price: industry.starting_price,
        inventory: industry.starting_inventory,
        balance: industry.starting_balance,
        offered_wage: hourly_wage_to_weekly(industry.offered_wage),
        fixed_cost: industry.fixed_cost,
        raw_material_cost: industry.material_cost,
        number_of_employees: industry.employees,
        worker_efficiency: industry.worker_efficiency,
        debt_allowed: industry.debt_allowed,
    }
}

fn build_policies(policy: &PolicyForm) -> WirePolicies {
    // Sector overrides win over the global value even when the global
    // toggle is off; an absent override always falls back.
    let corporate_global = policy.corporate_tax.effective();
    let corporate_tax = IndustryCategory::ALL
        .into_iter()
        .map(|sector| {
            let percent = policy
                .corporate_tax_overrides
                .get(&sector)
                .copied()
                .unwrap_or(corporate_global);
            (sector, percent_to_decimal(percent))
        })
        .collect();

    let price_cap = IndustryCategory::ALL
        .into_iter()
        .map(|sector| {
            let cap = policy
                .price_cap_overrides
                .get(&sector)
                .copied()
                .unwrap_or(policy.price_cap.value);
            (sector, cap)
        })
        .collect();

    let global_schedule = build_schedule(&policy.income_tax);
    let income_tax = DemographicCategory::ALL
        .into_iter()
        .map(|tier| {
            let schedule = policy
                .income_tax_overrides
                .get(&tier)
                .map(|brackets| build_schedule(brackets))
                .unwrap_or_else(|| global_schedule.clone());
            (tier, schedule)
        })
        .collect();

    WirePolicies {
        sales_tax: percent_to_decimal(policy.sales_tax.effective()),
        corporate_tax,
        property_tax: annual_percent_to_weekly_decimal(policy.property_tax.effective()),
        tariffs: percent_to_decimal(policy.tariffs.effective()),
        subsidies: percent_to_decimal(policy.subsidies.effective()),
        minimum_wage: hourly_wage_to_weekly(policy.minimum_wage.effective()),
        price_cap,
        price_cap_enabled: policy.price_cap.enabled,
        income_tax,
    }
}

/// Converts a schedule to wire units and orders it by threshold descending;
/// the service walks brackets top-down. Equal thresholds keep their input
/// order.
fn build_schedule(brackets: &[TaxBracket]) -> Vec<WireTaxBracket> {
    let mut schedule: Vec<WireTaxBracket> = brackets
        .iter()
        .map(|bracket| WireTaxBracket {
            threshold: annual_salary_to_weekly(bracket.threshold),
            rate: annual_percent_to_weekly_decimal(bracket.rate),
        })
        .collect();
    schedule.sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
    schedule
}
