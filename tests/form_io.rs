use agora::form::SetupForm;
use agora::payload;

#[test]
fn setup_form_round_trips_through_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("setup.yaml");

    let form = SetupForm::template();
    form.save_to_path(&path).unwrap();
    let loaded = SetupForm::load_from_path(&path).unwrap();

    assert_eq!(form, loaded);
}

#[test]
fn loading_a_missing_form_names_the_path() {
    let err = SetupForm::load_from_path("does/not/exist.yaml").unwrap_err();
    assert!(
        format!("{err}").contains("does/not/exist.yaml"),
        "error should name the file: {err}"
    );
}

#[test]
fn wire_config_round_trips_through_json() {
    let wire = payload::build(&SetupForm::template());
    let json = serde_json::to_string(&wire).unwrap();
    let parsed: agora::WireConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(wire, parsed);
}
