use crate::conf::{FilterConfig, FilterSpec};
use crate::logcat::{
    ExternalRedirect, FilterPipeline, Interrupt, Outcome, PipelineState, StreamError,
    lock_registry,
};
use pretty_assertions::assert_eq;
use std::io::{self, BufReader, Cursor, Read, Write};

const START: &str = "I/ActivityManager(  587): Start proc com.example for activity com.example/.Main: pid=1234 uid=10045 gids={50045, 3003}";
const DEATH: &str = "I/ActivityManager(  587): Process com.example (pid 1234) has died.";

fn watching(packages: &[&str]) -> FilterConfig {
    FilterSpec {
        packages: packages.iter().map(|p| p.to_string()).collect(),
        tag_width: 8,
        ..Default::default()
    }
    .lower()
    .unwrap()
}

fn feed(pipeline: &mut FilterPipeline, line: &str) -> Vec<String> {
    pipeline.process_line(line.as_bytes())
}

#[test]
fn start_event_prints_one_banner_then_tag_header() {
    // Arrange
    let mut pipeline = FilterPipeline::new(watching(&["com.example"]));
    feed(&mut pipeline, "D/MyTag( 1234): before start");

    // Act
    let banner = feed(&mut pipeline, START);
    let first = feed(&mut pipeline, "D/MyTag( 1234): hello");
    let second = feed(&mut pipeline, "D/MyTag( 1234): again");

    // Assert
    assert_eq!(banner.len(), 1);
    assert!(banner[0].contains("Process com.example created for activity com.example/.Main"));
    assert_eq!(first, vec!["   MyTag  D  hello".to_string()]);
    assert_eq!(second, vec![format!("{} D  again", " ".repeat(9))]);
}

#[test]
fn banner_forces_next_tag_header() {
    let mut pipeline = FilterPipeline::new(watching(&["com.example"]));
    feed(&mut pipeline, START);
    feed(&mut pipeline, "D/MyTag( 1234): hello");

    feed(
        &mut pipeline,
        "I/ActivityManager(  587): Start proc 1240:com.example:remote/u0a45 for service com.example/.Remote",
    );
    let after = feed(&mut pipeline, "D/MyTag( 1234): hello again");

    assert_eq!(after, vec!["   MyTag  D  hello again".to_string()]);
}

#[test]
fn lines_from_unwatched_pids_are_dropped() {
    let mut pipeline = FilterPipeline::new(watching(&["com.example"]));
    feed(&mut pipeline, START);

    assert_eq!(feed(&mut pipeline, "D/Other(  999): not ours"), Vec::<String>::new());
    assert_eq!(feed(&mut pipeline, "not a log line"), Vec::<String>::new());
}

#[test]
fn death_of_watched_process_prints_ended_banner() {
    let mut pipeline = FilterPipeline::new(watching(&["com.example"]));
    feed(&mut pipeline, START);

    let blocks = feed(&mut pipeline, DEATH);

    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].contains("Process com.example (PID: 1234) ended"));
    assert!(lock_registry(&pipeline.registry()).is_empty());
}

#[test]
fn death_of_unknown_pid_prints_nothing() {
    let mut pipeline = FilterPipeline::new(watching(&["com.example"]));

    let blocks = feed(&mut pipeline, DEATH);

    assert_eq!(blocks, Vec::<String>::new());
}

#[test]
fn min_level_drops_less_severe_lines() {
    let config = FilterSpec {
        min_level: "W".to_string(),
        tag_width: 8,
        ..Default::default()
    }
    .lower()
    .unwrap();
    let mut pipeline = FilterPipeline::new(config);

    let info = feed(&mut pipeline, "I/MyTag( 1): info");
    let error = feed(&mut pipeline, "E/MyTag( 1): error");

    assert_eq!(info, Vec::<String>::new());
    assert_eq!(error, vec!["   MyTag  E  error".to_string()]);
}

#[test]
fn tag_filters_apply_to_watched_lines() {
    let config = FilterSpec {
        tags: vec!["Net.*".to_string()],
        ignored_tags: vec!["NetNoise".to_string()],
        tag_width: 8,
        ..Default::default()
    }
    .lower()
    .unwrap();
    let mut pipeline = FilterPipeline::new(config);

    assert_eq!(feed(&mut pipeline, "I/NetStack( 1): up").len(), 1);
    assert_eq!(feed(&mut pipeline, "I/NetNoise( 1): chatter").len(), 0);
    assert_eq!(feed(&mut pipeline, "I/Ui( 1): draw").len(), 0);
}

#[test]
fn show_all_prints_unwatched_processes() {
    let config = FilterSpec {
        packages: vec!["com.example".to_string()],
        show_all: true,
        tag_width: 8,
        ..Default::default()
    }
    .lower()
    .unwrap();
    let mut pipeline = FilterPipeline::new(config);

    assert_eq!(feed(&mut pipeline, "D/Other(  999): visible").len(), 1);
}

#[test]
fn native_backtrace_is_attributed_to_app() {
    let mut pipeline = FilterPipeline::new(watching(&["com.example"]));
    feed(&mut pipeline, START);

    let frame = feed(
        &mut pipeline,
        "F/DEBUG(  100):     #00  pc 0001a2b4  /system/lib/libc.so (abort+4)",
    );

    assert_eq!(
        frame,
        vec!["   DEBUG  F  #00  pc 0001a2b4  /system/lib/libc.so (abort+4)".to_string()]
    );
}

#[test]
fn always_tags_repeats_tag_header() {
    let config = FilterSpec {
        always_tags: true,
        tag_width: 8,
        ..Default::default()
    }
    .lower()
    .unwrap();
    let mut pipeline = FilterPipeline::new(config);

    feed(&mut pipeline, "D/MyTag( 1): one");
    let second = feed(&mut pipeline, "D/MyTag( 1): two");

    assert_eq!(second, vec!["   MyTag  D  two".to_string()]);
}

#[test]
fn run_writes_blocks_until_stream_closes() {
    // Arrange
    let input = format!("{START}\nD/MyTag( 1234): hello\n\nD/Other( 1): skip\n{DEATH}\n");
    let mut source = ExternalRedirect::new(Cursor::new(input.into_bytes()));
    let mut out = Vec::new();
    let mut pipeline = FilterPipeline::new(watching(&["com.example"]));

    // Act
    let outcome = pipeline.run(&mut source, &mut out, &Interrupt::new()).unwrap();

    // Assert
    assert_eq!(outcome, Outcome::Closed);
    assert_eq!(pipeline.state(), PipelineState::Closed);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("   MyTag  D  hello\n"));
    assert!(!text.contains("skip"));
    assert!(text.contains("Process com.example (PID: 1234) ended"));
}

#[test]
fn run_stops_on_interrupt() {
    let mut source = ExternalRedirect::new(Cursor::new(b"D/MyTag( 1): hello\n".to_vec()));
    let mut out = Vec::new();
    let mut pipeline = FilterPipeline::new(FilterConfig::default());
    let interrupt = Interrupt::new();
    interrupt.trigger();

    let outcome = pipeline.run(&mut source, &mut out, &interrupt).unwrap();

    assert_eq!(outcome, Outcome::Interrupted);
    assert_eq!(pipeline.state(), PipelineState::Interrupted);
    assert!(out.is_empty());
}

struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn run_reports_output_failure() {
    let mut source = ExternalRedirect::new(Cursor::new(b"D/MyTag( 1): hello\n".to_vec()));
    let mut pipeline = FilterPipeline::new(FilterConfig::default());

    let err = pipeline
        .run(&mut source, &mut BrokenSink, &Interrupt::new())
        .unwrap_err();

    assert!(matches!(err, StreamError::Output(e) if e.kind() == io::ErrorKind::BrokenPipe));
    assert_eq!(pipeline.state(), PipelineState::Closed);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device offline"))
    }
}

#[test]
fn run_reports_read_failure() {
    let mut source = ExternalRedirect::new(BufReader::new(FailingReader));
    let mut out = Vec::new();
    let mut pipeline = FilterPipeline::new(FilterConfig::default());

    let err = pipeline
        .run(&mut source, &mut out, &Interrupt::new())
        .unwrap_err();

    assert!(matches!(err, StreamError::Read(_)));
}

#[test]
fn empty_message_is_still_rendered() {
    let mut pipeline = FilterPipeline::new(FilterConfig {
        tag_width: 8,
        ..Default::default()
    });

    let blocks = feed(&mut pipeline, "I/MyTag( 1234): \n");

    assert_eq!(blocks, vec!["   MyTag  I  ".to_string()]);
}

#[test]
fn trailing_spaces_survive_rendering() {
    let mut pipeline = FilterPipeline::new(FilterConfig {
        tag_width: 8,
        ..Default::default()
    });

    let blocks = feed(&mut pipeline, "I/MyTag( 1234): padded   \r\n");

    assert_eq!(blocks, vec!["   MyTag  I  padded   ".to_string()]);
}
