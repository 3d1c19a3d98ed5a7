use std::path::Path;

use serde_json::json;
use stepwise_lib::bootstrap::load_config;
use sw_core::ids::StepId;
use sw_core::wizard::{ProgressPolicy, WizardController};

fn sample_config_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("stepwise.toml")
}

#[test]
fn sample_config_builds_a_working_wizard() {
    let config = load_config(&sample_config_path()).expect("sample config loads");

    assert_eq!(config.progress_policy, ProgressPolicy::RequiredSteps);
    assert!(config.autosave);
    assert!(config.draft_path.as_os_str().is_empty());

    let mut controller =
        WizardController::initialize(config.descriptors(), config.initial_step.clone(), None)
            .expect("sample steps are valid");
    assert_eq!(controller.current_step_id(), "company");

    let rejection = controller
        .complete_step(&StepId::from("company"), json!({ "name": "  " }))
        .unwrap_err();
    assert_eq!(rejection.validation_errors(), ["name required"]);

    controller
        .complete_step(&StepId::from("company"), json!({ "name": "Acme" }))
        .expect("company completes");
    controller
        .skip_step(&StepId::from("branding"))
        .expect("branding is skippable");
    controller
        .complete_step(&StepId::from("confirm"), json!({}))
        .expect("confirm completes");

    assert!(controller.is_wizard_complete());
    assert_eq!(controller.progress_percentage(), 100);
}
