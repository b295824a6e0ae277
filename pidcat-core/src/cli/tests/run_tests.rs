use crate::cli::{PidcatArgs, TerminalFacts, build_filter_spec};
use crate::conf::FileConfig;
use crate::logcat::Level;
use pretty_assertions::assert_eq;

fn tty() -> TerminalFacts {
    TerminalFacts {
        width: Some(120),
        color: true,
    }
}

#[test]
fn defaults_without_file_or_flags() {
    let spec = build_filter_spec(
        &PidcatArgs::default(),
        vec!["com.example".to_string()],
        &FileConfig::default(),
        tty(),
    );

    assert_eq!(spec.packages, vec!["com.example"]);
    assert_eq!(spec.min_level, "V");
    assert_eq!(spec.tag_width, 23);
    assert_eq!(spec.terminal_width, Some(120));
    assert!(spec.color);
    assert!(!spec.show_all);
}

#[test]
fn flags_override_file_values() {
    // Arrange
    let args = PidcatArgs {
        tag_width: Some(10),
        min_level: Some("E".to_string()),
        ..Default::default()
    };
    let file = FileConfig {
        tag_width: Some(30),
        min_level: Some("I".to_string()),
        always_display_tags: Some(true),
        ..Default::default()
    };

    // Act
    let spec = build_filter_spec(&args, Vec::new(), &file, tty());

    // Assert
    assert_eq!(spec.tag_width, 10);
    assert_eq!(spec.min_level, "E");
    assert!(spec.always_tags);
}

#[test]
fn file_values_fill_missing_flags() {
    let file = FileConfig {
        tag_width: Some(30),
        min_level: Some("I".to_string()),
        timestamp: Some(true),
        color_gc: Some(true),
        ..Default::default()
    };

    let config = build_filter_spec(&PidcatArgs::default(), Vec::new(), &file, tty())
        .lower()
        .unwrap();

    assert_eq!(config.tag_width, 30);
    assert_eq!(config.min_level, Level::Info);
    assert!(config.show_timestamp);
    assert!(config.color_gc);
}

#[test]
fn tag_lists_accumulate() {
    let args = PidcatArgs {
        tags: vec!["Cli".to_string()],
        ignored_tags: vec!["Noisy".to_string()],
        ..Default::default()
    };
    let file = FileConfig {
        tags: vec!["File".to_string()],
        ignore_tags: vec!["chatty".to_string()],
        ..Default::default()
    };

    let spec = build_filter_spec(&args, Vec::new(), &file, tty());

    assert_eq!(spec.tags, vec!["File", "Cli"]);
    assert_eq!(spec.ignored_tags, vec!["chatty", "Noisy"]);
}

#[test]
fn no_color_flag_wins_over_terminal() {
    let args = PidcatArgs {
        no_color: true,
        ..Default::default()
    };

    let spec = build_filter_spec(&args, Vec::new(), &FileConfig::default(), tty());

    assert!(!spec.color);
}

#[test]
fn piped_output_has_no_width_or_color() {
    let spec = build_filter_spec(
        &PidcatArgs::default(),
        Vec::new(),
        &FileConfig::default(),
        TerminalFacts::default(),
    );

    assert_eq!(spec.terminal_width, None);
    assert!(!spec.color);
}
