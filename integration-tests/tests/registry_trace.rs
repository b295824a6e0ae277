use integration_tests::harness::{TestSession, captured_events};
use pidcat_core::cli::PidcatArgs;
use pidcat_core::logcat::lock_registry;
use pretty_assertions::assert_eq;

#[test]
fn death_notice_for_reused_pid_is_traced_and_ignored() {
    // Arrange
    let mut session = TestSession::start(
        None,
        PidcatArgs {
            packages: vec!["com.example".to_string()],
            tag_width: Some(12),
            ..Default::default()
        },
    );

    // Act
    let (_, output) = session.play("reused_pid.log");

    // Assert
    assert!(!output.contains("ended"));
    assert!(output.contains(" SyncService  D  still running\n"));

    let registry = session.registry();
    assert_eq!(
        lock_registry(&registry).package_of("4321"),
        Some("com.example:remote")
    );

    let traced = captured_events().into_iter().any(|e| {
        e.message() == Some("ignoring terminal event for a reused pid")
            && e.field("pid") == Some("4321")
            && e.field("registered") == Some("com.example:remote")
    });
    assert!(traced, "expected a trace for the reused pid");
}

#[test]
fn process_starts_are_traced() {
    let mut session = TestSession::start(
        None,
        PidcatArgs {
            packages: vec!["com.example".to_string()],
            timestamp: true,
            ..Default::default()
        },
    );

    session.play("timestamped.log");

    let traced = captured_events().into_iter().any(|e| {
        e.message() == Some("watching process")
            && e.field("pid") == Some("2001")
            && e.level == tracing::Level::DEBUG
            && e.target.starts_with("pidcat_core::logcat")
    });
    assert!(traced, "expected a trace for the new process");
}
