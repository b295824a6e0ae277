use crate::cli::PidcatArgs;
use clap::Parser;
use pretty_assertions::assert_eq;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    args: PidcatArgs,
}

fn parse(argv: &[&str]) -> PidcatArgs {
    TestCli::try_parse_from(std::iter::once("pidcat").chain(argv.iter().copied()))
        .unwrap()
        .args
}

#[test]
fn packages_are_positional() {
    let args = parse(&["com.example", "org.sample:"]);

    assert_eq!(args.packages, vec!["com.example", "org.sample:"]);
}

#[test]
fn short_flags_map_to_fields() {
    let args = parse(&[
        "-w", "30", "-l", "W", "-s", "emulator-5554", "-d", "-e", "-c", "-a", "com.example",
    ]);

    assert_eq!(args.tag_width, Some(30));
    assert_eq!(args.min_level.as_deref(), Some("W"));
    assert_eq!(args.device_serial.as_deref(), Some("emulator-5554"));
    assert!(args.use_device);
    assert!(args.use_emulator);
    assert!(args.clear_logcat);
    assert!(args.all);
}

#[test]
fn tag_options_repeat() {
    let args = parse(&["-t", "Net", "-t", "Ui", "-i", "chatty", "--ignore-tag", "Choreographer"]);

    assert_eq!(args.tags, vec!["Net", "Ui"]);
    assert_eq!(args.ignored_tags, vec!["chatty", "Choreographer"]);
}

#[test]
fn long_flags_map_to_fields() {
    let args = parse(&[
        "--always-display-tags",
        "--current",
        "--color-gc",
        "--timestamp",
        "--refresh-secs",
        "5",
        "--no-color",
    ]);

    assert!(args.always_tags);
    assert!(args.current_app);
    assert!(args.color_gc);
    assert!(args.timestamp);
    assert_eq!(args.refresh_secs, Some(5));
    assert!(args.no_color);
}

#[test]
fn rejects_non_numeric_width() {
    let result = TestCli::try_parse_from(["pidcat", "-w", "wide"]);

    assert!(result.is_err());
}
