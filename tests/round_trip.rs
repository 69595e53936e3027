use std::collections::BTreeMap;

use agora::categories::{DemographicCategory, IndustryCategory};
use agora::form::{SetupForm, TaxBracket, Toggled};
use agora::live::LiveIndustry;
use agora::payload;

/// Template with every policy toggle enabled, so each value survives the
/// trip onto the wire and back.
fn all_enabled_fixture() -> SetupForm {
    let mut form = SetupForm::template();
    form.policy.property_tax = Toggled::on(1.2);
    form.policy.tariffs = Toggled::on(5.0);
    form.policy.subsidies = Toggled::on(2.0);
    form.policy.price_cap = Toggled::on(10.0);
    form
}

fn assert_close(actual: f64, expected: f64, context: &str) {
    assert!(
        (actual - expected).abs() <= 0.005,
        "{context}: expected {expected}, got {actual}"
    );
}

#[test]
fn receive_inverts_build_at_display_precision() {
    let form = all_enabled_fixture();
    let wire = payload::build(&form);
    let back = payload::receive_setup(&wire);

    assert_eq!(back.environment.max_weeks, form.environment.max_weeks);
    assert_eq!(back.environment.num_people, form.environment.num_people);
    assert_close(
        back.environment.inflation_rate,
        form.environment.inflation_rate,
        "inflation rate",
    );

    for (tier, original) in &form.demographics {
        let received = &back.demographics[tier];
        assert_close(received.mean_income, original.mean_income, "mean income");
        assert_close(received.sd_income, original.sd_income, "income sd");
        assert_close(received.proportion, original.proportion, "proportion");
        assert_close(
            received.unemployment_rate,
            original.unemployment_rate,
            "unemployment",
        );
        assert_close(received.savings_mean, original.savings_mean, "savings mean");
        assert_close(received.savings_sd, original.savings_sd, "savings sd");
        for (sector, share) in &original.spending {
            assert_close(received.spending[sector], *share, "spending share");
        }
    }

    for (sector, original) in &form.industries {
        let received = &back.industries[sector];
        assert_close(received.starting_price, original.starting_price, "price");
        assert_close(
            received.starting_inventory,
            original.starting_inventory,
            "inventory",
        );
        assert_close(
            received.starting_balance,
            original.starting_balance,
            "balance",
        );
        assert_close(received.offered_wage, original.offered_wage, "wage");
        assert_close(received.fixed_cost, original.fixed_cost, "fixed cost");
        assert_close(received.material_cost, original.material_cost, "material cost");
        assert_eq!(received.employees, original.employees);
        assert_eq!(received.debt_allowed, original.debt_allowed);
    }

    let policy = &back.policy;
    assert_close(policy.sales_tax.value, 8.0, "sales tax");
    assert!(policy.sales_tax.enabled);
    assert_close(policy.corporate_tax.value, 21.0, "corporate tax");
    assert_close(policy.property_tax.value, 1.2, "property tax");
    assert_close(policy.tariffs.value, 5.0, "tariffs");
    assert_close(policy.subsidies.value, 2.0, "subsidies");
    assert_close(policy.minimum_wage.value, 12.0, "minimum wage");
    assert_close(policy.price_cap.value, 10.0, "price cap");
    assert!(policy.price_cap.enabled);

    // Build reorders the schedule; compare the bracket set, not the order.
    let mut original_brackets = form.policy.income_tax.clone();
    original_brackets.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    let mut received_brackets = policy.income_tax.clone();
    received_brackets.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    assert_eq!(original_brackets.len(), received_brackets.len());
    for (original, received) in original_brackets.iter().zip(&received_brackets) {
        assert_close(received.threshold, original.threshold, "bracket threshold");
        assert_close(received.rate, original.rate, "bracket rate");
    }
}

#[test]
fn brackets_are_sorted_descending_by_converted_threshold() {
    let mut form = SetupForm::template();
    form.policy.income_tax = vec![
        TaxBracket {
            threshold: 10_000.0,
            rate: 5.0,
        },
        TaxBracket {
            threshold: 50_000.0,
            rate: 10.0,
        },
        TaxBracket {
            threshold: 30_000.0,
            rate: 15.0,
        },
    ];
    let wire = payload::build(&form);

    for tier in DemographicCategory::ALL {
        let schedule = &wire.policies.income_tax[&tier];
        let thresholds: Vec<f64> = schedule.iter().map(|b| b.threshold).collect();
        assert!(
            thresholds.windows(2).all(|pair| pair[0] >= pair[1]),
            "{tier} schedule not descending: {thresholds:?}"
        );
        assert!(
            (thresholds[0] - 50_000.0 / 52.0).abs() < 1e-9,
            "highest weekly threshold should come first"
        );
    }
}

#[test]
fn policy_overrides_win_and_absent_overrides_fall_back() {
    let mut form = SetupForm::template();
    form.policy
        .corporate_tax_overrides
        .insert(IndustryCategory::Housing, 30.0);
    let wire = payload::build(&form);

    let housing = wire.policies.corporate_tax[&IndustryCategory::Housing];
    assert!((housing - 0.30).abs() < 1e-9, "override not applied: {housing}");
    for sector in IndustryCategory::ALL {
        if sector == IndustryCategory::Housing {
            continue;
        }
        let rate = wire.policies.corporate_tax[&sector];
        assert!(
            (rate - 0.21).abs() < 1e-9,
            "{sector} should fall back to the global rate, got {rate}"
        );
    }
}

#[test]
fn tier_schedule_override_converts_independently() {
    let mut form = SetupForm::template();
    form.policy.income_tax_overrides.insert(
        DemographicCategory::UpperClass,
        vec![TaxBracket {
            threshold: 260_000.0,
            rate: 40.0,
        }],
    );
    let wire = payload::build(&form);

    let upper = &wire.policies.income_tax[&DemographicCategory::UpperClass];
    assert_eq!(upper.len(), 1);
    assert!((upper[0].threshold - 5_000.0).abs() < 1e-9);

    let lower = &wire.policies.income_tax[&DemographicCategory::LowerClass];
    let middle = &wire.policies.income_tax[&DemographicCategory::MiddleClass];
    assert_eq!(lower, middle, "tiers without an override share the global schedule");
    assert_eq!(lower.len(), form.policy.income_tax.len());
}

#[test]
fn receive_collapses_sector_maps_to_the_first_sector() {
    let form = SetupForm::template();
    let mut wire = payload::build(&form);
    wire.policies
        .corporate_tax
        .insert(IndustryCategory::Groceries, 0.10);
    wire.policies
        .corporate_tax
        .insert(IndustryCategory::Housing, 0.55);

    let back = payload::receive_setup(&wire);
    assert!(
        (back.policy.corporate_tax.value - 10.0).abs() <= 0.005,
        "display value should come from the first sector, got {}",
        back.policy.corporate_tax.value
    );

    wire.policies.corporate_tax.clear();
    let back = payload::receive_setup(&wire);
    assert_eq!(back.policy.corporate_tax.value, 0.0);
    assert!(!back.policy.corporate_tax.enabled);
}

#[test]
fn live_frame_updates_only_named_sectors() {
    let mut form = SetupForm::template();
    let untouched = form.industries[&IndustryCategory::Clothing].clone();

    let mut frame = BTreeMap::new();
    frame.insert(
        IndustryCategory::Groceries,
        LiveIndustry {
            current_price: 5.25,
            funds: 200_000.0,
            current_wage: 700.0,
            employee_count: 95,
        },
    );
    payload::receive_live(&mut form, &frame);

    let groceries = &form.industries[&IndustryCategory::Groceries];
    assert_eq!(groceries.starting_price, 5.25);
    assert_eq!(groceries.starting_balance, 200_000.0);
    assert_eq!(groceries.offered_wage, 17.5);
    assert_eq!(groceries.employees, 95);
    assert_eq!(form.industries[&IndustryCategory::Clothing], untouched);
}

#[test]
fn missing_spending_entries_build_as_zero() {
    let mut form = SetupForm::template();
    form.demographics
        .get_mut(&DemographicCategory::LowerClass)
        .unwrap()
        .spending
        .remove(&IndustryCategory::Entertainment);
    let wire = payload::build(&form);

    let row = &wire.demographics[&DemographicCategory::LowerClass].spending_behavior;
    assert_eq!(row.len(), IndustryCategory::ALL.len());
    assert_eq!(row[&IndustryCategory::Entertainment], 0.0);
}

#[test]
fn disabled_toggles_send_the_neutral_rate() {
    let form = SetupForm::template();
    assert!(!form.policy.tariffs.enabled);
    let wire = payload::build(&form);

    assert_eq!(wire.policies.tariffs, 0.0);
    assert_eq!(wire.policies.property_tax, 0.0);
    assert!(!wire.policies.price_cap_enabled);
    // The cap value still travels; only the flag gates it.
    assert_eq!(
        wire.policies.price_cap[&IndustryCategory::Groceries],
        form.policy.price_cap.value
    );
}

#[test]
fn wire_json_uses_the_service_field_names() {
    let wire = payload::build(&SetupForm::template());
    let json = serde_json::to_value(&wire).unwrap();

    assert!(json["environment"]["max_simulation_length"].is_u64());
    assert!(json["demographics"]["lower_class"]["spending_behavior"]["groceries"].is_number());
    assert!(json["industries"]["groceries"]["raw_material_cost"].is_number());
    assert!(json["policies"]["price_cap_enabled"].is_boolean());
    assert!(json["policies"]["income_tax"]["upper_class"].is_array());
}
