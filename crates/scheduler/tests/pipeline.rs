//! Scheduling and end-to-end pipeline tests with virtual time.

use std::sync::Arc;
use std::time::Duration;

use a11y_analysis::AnalysisEngine;
use a11y_config::{AxeSettings, LinterSettings, RunMode, SettingsStore};
use a11y_scheduler::{LogLevel, ValidationScheduler, ValidationState};
use a11y_test_utils::{violation, FakeDomEngine, FakeElement, RecordingHost, ScriptedRuleEngine};
use a11y_types::{DocumentUri, Impact, Position, Range, Severity};

type Scheduler = ValidationScheduler<FakeDomEngine, Arc<ScriptedRuleEngine>, RecordingHost>;

fn scheduler_with(
    dom: FakeDomEngine,
    rules: ScriptedRuleEngine,
    settings: LinterSettings,
) -> (Scheduler, Arc<ScriptedRuleEngine>, Arc<RecordingHost>) {
    let rules = Arc::new(rules);
    let host = Arc::new(RecordingHost::new());
    let scheduler = ValidationScheduler::new(
        AnalysisEngine::new(dom, Arc::clone(&rules)),
        Arc::clone(&host),
        Arc::new(SettingsStore::new(settings)),
    );
    (scheduler, rules, host)
}

fn image_alt_setup() -> (FakeDomEngine, ScriptedRuleEngine) {
    let dom = FakeDomEngine::new().with_element(
        "img",
        FakeElement::new("<img src=\"a.png\">").with_location(2, 0, 2, 17),
    );
    let rules = ScriptedRuleEngine::new(vec![violation(
        "image-alt",
        Some(Impact::Critical),
        &["img"],
    )]);
    (dom, rules)
}

fn uri() -> DocumentUri {
    DocumentUri::new("file:///page.html")
}

/// Let spawned tasks and due timers run in virtual time.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_open_validates_immediately_and_publishes() {
    let (dom, rules) = image_alt_setup();
    let (scheduler, _, host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(
            uri(),
            "html",
            1,
            Arc::from("<html>\n<img src=\"a.png\">\n</html>"),
        )
        .await;
    settle().await;

    let diagnostics = host.latest_for(&uri()).unwrap_or_default();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule_id, "image-alt");
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(
        diagnostics[0].range,
        Range::new(Position::new(1, 0), Position::new(1, 17))
    );
    assert_eq!(scheduler.validation_state(&uri()), ValidationState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_coalesce_into_one_run() {
    let (dom, rules) = image_alt_setup();
    let (scheduler, rules, _host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;
    let runs_after_open = rules.run_count();

    // Edits faster than the 500ms debounce keep re-arming the timer.
    for version in 2..=6 {
        scheduler
            .document_changed(uri(), version, Arc::from("<img>"))
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(600)).await;
    settle().await;

    assert_eq!(rules.run_count(), runs_after_open + 1);
    assert_eq!(rules.max_overlap(), 1);
    assert_eq!(scheduler.validation_state(&uri()), ValidationState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_edit_during_run_queues_exactly_one_followup() {
    let (dom, _) = image_alt_setup();
    let rules = ScriptedRuleEngine::new(vec![violation(
        "image-alt",
        Some(Impact::Critical),
        &["img"],
    )])
    .with_delay(Duration::from_millis(200));
    let (scheduler, rules, host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    // Let the open-triggered run get in flight (it holds for 200ms).
    settle().await;
    assert!(scheduler.validation_state(&uri()).is_running());

    scheduler
        .document_changed(uri(), 2, Arc::from("<img >"))
        .await;
    assert_eq!(
        scheduler.validation_state(&uri()),
        ValidationState::RunningWithFollowup
    );

    // First run completes (stale, suppressed), follow-up debounces and runs.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    settle().await;

    assert_eq!(rules.run_count(), 2);
    assert_eq!(rules.max_overlap(), 1);
    assert_eq!(scheduler.validation_state(&uri()), ValidationState::Idle);
    // Only the run for version 2 published.
    assert_eq!(host.publish_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reopen_during_run_queues_followup_instead_of_racing() {
    let (dom, _) = image_alt_setup();
    let rules = ScriptedRuleEngine::clean().with_delay(Duration::from_millis(200));
    let (scheduler, rules, _host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;
    assert!(scheduler.validation_state(&uri()).is_running());

    // A second open without a close must not reset the slot to idle and
    // start a second concurrent run for the same URI.
    scheduler
        .document_opened(uri(), "html", 2, Arc::from("<img >"))
        .await;
    assert_eq!(
        scheduler.validation_state(&uri()),
        ValidationState::RunningWithFollowup
    );

    tokio::time::sleep(Duration::from_millis(1500)).await;
    settle().await;

    assert_eq!(rules.run_count(), 2);
    assert_eq!(rules.max_overlap(), 1);
    assert_eq!(scheduler.validation_state(&uri()), ValidationState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_oversized_document_never_reaches_rule_engine() {
    let (dom, rules) = image_alt_setup();
    let settings = LinterSettings {
        max_file_size: 8,
        ..LinterSettings::default()
    };
    let (scheduler, rules, host) = scheduler_with(dom, rules, settings);

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<p>far too long</p>"))
        .await;
    settle().await;

    assert_eq!(rules.run_count(), 0);
    assert_eq!(host.latest_for(&uri()), Some(Vec::new()));
    assert_eq!(scheduler.validation_state(&uri()), ValidationState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_analyzer_clears_diagnostics() {
    let (dom, rules) = image_alt_setup();
    let settings = LinterSettings {
        enable: false,
        ..LinterSettings::default()
    };
    let (scheduler, rules, host) = scheduler_with(dom, rules, settings);

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;

    assert_eq!(rules.run_count(), 0);
    assert_eq!(host.latest_for(&uri()), Some(Vec::new()));
}

#[tokio::test(start_paused = true)]
async fn test_excluded_language_clears_diagnostics() {
    let (dom, rules) = image_alt_setup();
    let settings = LinterSettings {
        included_languages: vec!["html".to_string()],
        ..LinterSettings::default()
    };
    let (scheduler, rules, host) = scheduler_with(dom, rules, settings);

    scheduler
        .document_opened(
            DocumentUri::new("file:///page.php"),
            "php",
            1,
            Arc::from("<img>"),
        )
        .await;
    settle().await;

    assert_eq!(rules.run_count(), 0);
    assert_eq!(
        host.latest_for(&DocumentUri::new("file:///page.php")),
        Some(Vec::new())
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_language_id_clears_diagnostics() {
    let (dom, rules) = image_alt_setup();
    let settings = LinterSettings {
        included_languages: vec!["html".to_string(), "javascript".to_string()],
        ..LinterSettings::default()
    };
    let (scheduler, rules, host) = scheduler_with(dom, rules, settings);

    scheduler
        .document_opened(uri(), "javascript", 1, Arc::from("let x;"))
        .await;
    settle().await;

    assert_eq!(rules.run_count(), 0);
    assert_eq!(host.latest_for(&uri()), Some(Vec::new()));
}

#[tokio::test(start_paused = true)]
async fn test_close_clears_state_and_diagnostics() {
    let (dom, rules) = image_alt_setup();
    let (scheduler, _, host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;
    assert!(host.latest_for(&uri()).is_some_and(|d| !d.is_empty()));

    scheduler.document_closed(uri()).await;
    settle().await;

    assert_eq!(host.latest_for(&uri()), Some(Vec::new()));
    assert_eq!(scheduler.open_document_count(), 0);
    assert_eq!(scheduler.validation_state(&uri()), ValidationState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_close_while_pending_cancels_timer() {
    let (dom, rules) = image_alt_setup();
    let (scheduler, rules, _host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;
    let runs_after_open = rules.run_count();

    scheduler
        .document_changed(uri(), 2, Arc::from("<img >"))
        .await;
    scheduler.document_closed(uri()).await;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    settle().await;

    assert_eq!(rules.run_count(), runs_after_open);
}

#[tokio::test(start_paused = true)]
async fn test_on_save_mode_ignores_edits_and_validates_on_save() {
    let (dom, rules) = image_alt_setup();
    let settings = LinterSettings {
        run: RunMode::OnSave,
        ..LinterSettings::default()
    };
    let (scheduler, rules, _host) = scheduler_with(dom, rules, settings);

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;
    let runs_after_open = rules.run_count();

    scheduler
        .document_changed(uri(), 2, Arc::from("<img >"))
        .await;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    settle().await;
    assert_eq!(rules.run_count(), runs_after_open);

    scheduler.document_saved(uri()).await;
    settle().await;
    assert_eq!(rules.run_count(), runs_after_open + 1);
}

#[tokio::test(start_paused = true)]
async fn test_save_during_run_is_ignored_not_queued() {
    let (dom, _) = image_alt_setup();
    let rules = ScriptedRuleEngine::clean().with_delay(Duration::from_millis(200));
    let settings = LinterSettings {
        run: RunMode::OnSave,
        ..LinterSettings::default()
    };
    let (scheduler, rules, _host) = scheduler_with(dom, rules, settings);

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;
    assert!(scheduler.validation_state(&uri()).is_running());
    let runs_in_flight = rules.run_count();

    scheduler.document_saved(uri()).await;
    scheduler.document_saved(uri()).await;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    settle().await;

    // Neither save queued a follow-up; the in-flight run already covered them.
    assert_eq!(rules.run_count(), runs_in_flight);
    assert_eq!(scheduler.validation_state(&uri()), ValidationState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_settings_change_revalidates_open_documents() {
    let (dom, rules) = image_alt_setup();
    let (scheduler, _, host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;
    assert!(host.latest_for(&uri()).is_some_and(|d| !d.is_empty()));

    scheduler
        .settings_changed(serde_json::json!({ "enable": false }))
        .await;
    settle().await;

    assert_eq!(host.latest_for(&uri()), Some(Vec::new()));
}

#[tokio::test(start_paused = true)]
async fn test_malformed_settings_section_keeps_previous_settings() {
    let (dom, rules) = image_alt_setup();
    let (scheduler, _, host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;

    scheduler
        .settings_changed(serde_json::json!({ "run": 42 }))
        .await;
    settle().await;

    // The bad section is reported and the document still validates under
    // the previous settings.
    assert!(host
        .messages()
        .iter()
        .any(|(level, _)| *level == LogLevel::Warning));
    assert!(host.latest_for(&uri()).is_some_and(|d| !d.is_empty()));
}

#[tokio::test(start_paused = true)]
async fn test_rule_selection_follows_settings() {
    let (dom, rules) = image_alt_setup();
    let settings = LinterSettings {
        axe: AxeSettings {
            rules: Some(vec!["image-alt".to_string()]),
            tags: None,
        },
        ..LinterSettings::default()
    };
    let (scheduler, rules, _host) = scheduler_with(dom, rules, settings);

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;

    assert_eq!(
        rules.selections(),
        [a11y_analysis::RuleSelection::Rules(vec![
            "image-alt".to_string()
        ])]
    );
}

#[tokio::test(start_paused = true)]
async fn test_progress_reports_land_between_begin_and_end() {
    let (dom, rules) = image_alt_setup();
    let (scheduler, _, host) = scheduler_with(dom, rules, LinterSettings::default());

    scheduler
        .document_opened(uri(), "html", 1, Arc::from("<img>"))
        .await;
    settle().await;

    // Every checkpoint arrives in pipeline order, inside the token's
    // begin/end bracket; nothing trails the end notification.
    assert_eq!(
        host.progress_log(),
        [
            "begin:1:Accessibility analysis",
            "report:1:Constructing document",
            "report:1:Injecting rule runtime",
            "report:1:Evaluating accessibility rules",
            "report:1:Processing results",
            "end:1",
        ]
    );
}
