use std::sync::Arc;

use serde_json::json;
use sw_app::input::{command_for, parse_line, InputLine, Key, KeyPress, WizardCommand};
use sw_app::usecases::{DiscardDraft, DraftWriter, ResumeWizard};
use sw_core::ids::StepId;
use sw_core::ports::DraftRepositoryPort;
use sw_core::wizard::validators::required_fields;
use sw_core::wizard::{Advance, StepDescriptor, WizardController, WizardSnapshot, WizardStatus};
use sw_infra::{FileDraftRepository, InMemoryDraftRepository, SystemClock};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor::new("A", "Account").with_validator(required_fields(["name"])),
        StepDescriptor::new("B", "Branding").optional().skippable(),
        StepDescriptor::new("C", "Confirm"),
    ]
}

fn id(raw: &str) -> StepId {
    StepId::from(raw)
}

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn wizard_flow_test_draft_survives_restart() {
    init_test_tracing();
    let temp_dir = TempDir::new().expect("temp dir");
    let repo: Arc<dyn DraftRepositoryPort> =
        Arc::new(FileDraftRepository::with_defaults(temp_dir.path().to_path_buf()));

    let (sink, writer) = DraftWriter::new(repo.clone()).spawn();
    let mut controller = ResumeWizard::new(repo.clone())
        .execute(steps(), None)
        .await
        .expect("start wizard")
        .with_draft_sink(Arc::new(sink))
        .with_clock(Arc::new(SystemClock));

    controller
        .complete_step(&id("A"), json!({ "name": "Acme" }))
        .expect("complete A");
    controller.skip_step(&id("B")).expect("skip B");
    let expected = controller.snapshot();
    assert!(expected.saved_at_ms.is_some());

    drop(controller);
    writer.await.expect("writer task");

    let resumed = ResumeWizard::new(repo.clone())
        .execute(steps(), None)
        .await
        .expect("resume wizard");

    assert_eq!(resumed.snapshot(), expected);
    assert_eq!(resumed.current_step_id(), "C");
    assert_eq!(resumed.completed_step_ids().as_slice(), &[id("A")]);
    assert_eq!(resumed.status(), WizardStatus::InProgress);
}

#[tokio::test]
async fn wizard_flow_test_discard_clears_stored_progress() {
    init_test_tracing();
    let draft = WizardSnapshot::new("C")
        .with_completed(["A"])
        .with_data("A", json!({ "name": "Acme" }));
    let repo = Arc::new(InMemoryDraftRepository::with_draft(draft));

    let mut controller = ResumeWizard::new(repo.clone())
        .execute(steps(), None)
        .await
        .expect("resume wizard");
    assert_eq!(controller.current_step_id(), "C");

    DiscardDraft::new(repo.clone())
        .execute(&mut controller)
        .await
        .expect("discard");

    assert_eq!(controller.current_step_id(), "A");
    assert_eq!(controller.status(), WizardStatus::NotStarted);
    assert!(!repo.has_draft().await.expect("has_draft"));

    let resumed = ResumeWizard::new(repo)
        .execute(steps(), None)
        .await
        .expect("fresh start");
    assert!(resumed.snapshot().is_pristine());
}

#[tokio::test]
async fn wizard_flow_test_reset_key_drops_persisted_draft() {
    init_test_tracing();
    let repo = Arc::new(InMemoryDraftRepository::new());
    let (sink, writer) = DraftWriter::new(repo.clone()).spawn();
    let mut controller = WizardController::initialize(steps(), None, None)
        .expect("init")
        .with_draft_sink(Arc::new(sink));

    controller
        .complete_step(&id("A"), json!({ "name": "Acme" }))
        .expect("complete A");
    command_for(KeyPress::ctrl('r'))
        .expect("ctrl+r is bound")
        .apply(&mut controller)
        .expect("reset");

    drop(controller);
    writer.await.expect("writer task");

    assert!(repo.load_draft().await.expect("load").is_none());
}

#[tokio::test]
async fn wizard_flow_test_discard_wins_over_pending_autosave() {
    init_test_tracing();
    let repo = Arc::new(InMemoryDraftRepository::new());
    let (sink, writer) = DraftWriter::new(repo.clone()).spawn();
    let mut controller = WizardController::initialize(steps(), None, None)
        .expect("init")
        .with_draft_sink(Arc::new(sink));

    controller
        .complete_step(&id("A"), json!({ "name": "Acme" }))
        .expect("complete A");
    controller.skip_step(&id("B")).expect("skip B");
    DiscardDraft::new(repo.clone())
        .execute(&mut controller)
        .await
        .expect("discard");

    drop(controller);
    writer.await.expect("writer task");

    assert!(repo.load_draft().await.expect("load").is_none());
}

#[test]
fn wizard_flow_test_text_and_key_input_drive_the_scenario() {
    let mut controller = WizardController::initialize(steps(), None, None).expect("init");

    let apply = |controller: &mut WizardController, line: &str| match parse_line(line)
        .expect("parse")
    {
        InputLine::Command(command) => command.apply(controller),
        other => panic!("not a command: {other:?}"),
    };

    let rejection = apply(&mut controller, "complete A {}").unwrap_err();
    assert_eq!(rejection.validation_errors(), ["name required"]);
    assert!(controller.completed_step_ids().is_empty());

    apply(&mut controller, r#"complete A {"name":"x"}"#).expect("complete A");
    assert_eq!(controller.current_step_id(), "B");

    let skip = command_for(KeyPress::plain(Key::Escape)).expect("escape is bound");
    assert_eq!(skip, WizardCommand::Skip(None));
    skip.apply(&mut controller).expect("skip B");
    assert_eq!(controller.current_step_id(), "C");
    assert_eq!(controller.completed_step_ids().as_slice(), &[id("A")]);

    let outcome = controller.complete_step(&id("C"), json!({})).expect("complete C");
    assert_eq!(outcome, Advance::Finished);
    assert_eq!(controller.completed_step_ids().as_slice(), &[id("A"), id("C")]);
    assert!(controller.is_wizard_complete());

    // review navigation stays available once complete
    command_for(KeyPress::plain(Key::Left))
        .expect("left is bound")
        .apply(&mut controller)
        .expect("back to B");
    assert_eq!(controller.current_step_id(), "B");
    assert!(controller.is_wizard_complete());
}
