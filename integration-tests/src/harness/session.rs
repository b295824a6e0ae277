use crate::harness::script::ScriptedSource;
use crate::harness::tracing::init_test_tracing;
use pidcat_core::cli::{PidcatArgs, TerminalFacts, build_filter_spec};
use pidcat_core::conf::{FileConfig, load_file_config};
use pidcat_core::logcat::{FilterPipeline, Interrupt, Outcome, SharedRegistry};
use std::fs;
use std::path::{Path, PathBuf};

/// A filter pipeline configured the way `pidcat` would configure it, with
/// output captured instead of printed.
pub struct TestSession {
    pipeline: FilterPipeline,
    interrupt: Interrupt,
}

impl TestSession {
    /// Build a session from a TOML fixture under `fixtures/config` (or no file
    /// at all) plus command line style arguments.
    pub fn start(fixture: Option<&str>, args: PidcatArgs) -> Self {
        Self::with_terminal(fixture, args, TerminalFacts::default())
    }

    pub fn with_terminal(fixture: Option<&str>, args: PidcatArgs, terminal: TerminalFacts) -> Self {
        init_test_tracing();

        let file = match fixture {
            Some(name) => {
                let path = fixture_path("config", name);
                load_file_config(&path).expect("failed to load fixture config")
            }
            None => FileConfig::default(),
        };

        let config = build_filter_spec(&args, args.packages.clone(), &file, terminal)
            .lower()
            .expect("invalid fixture config");

        Self {
            pipeline: FilterPipeline::new(config),
            interrupt: Interrupt::new(),
        }
    }

    /// Stream a log fixture under `fixtures/logs` through the pipeline.
    pub fn play(&mut self, log: &str) -> (Outcome, String) {
        let mut source = ScriptedSource::new(&read_fixture("logs", log));
        self.play_source(&mut source)
    }

    pub fn play_source(&mut self, source: &mut ScriptedSource) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = self
            .pipeline
            .run(source, &mut out, &self.interrupt)
            .expect("pipeline failed");
        (outcome, String::from_utf8(out).expect("output is not UTF-8"))
    }

    pub fn interrupt(&self) -> Interrupt {
        self.interrupt.clone()
    }

    pub fn registry(&self) -> SharedRegistry {
        self.pipeline.registry()
    }

    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }
}

pub fn fixture_path(kind: &str, name: &str) -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(kind)
        .join(name);

    assert!(path.exists(), "fixture does not exist: {:?}", path);
    path
}

pub fn read_fixture(kind: &str, name: &str) -> String {
    fs::read_to_string(fixture_path(kind, name)).expect("failed to read fixture")
}
