use crate::adb::{Adb, AdbTarget};
use crate::cli::args::PidcatArgs;
use crate::cli::terminal::TerminalFacts;
use crate::conf::{FileConfig, FilterSpec, load_file_config};
use crate::logcat::{
    DEFAULT_TAG_WIDTH, ExternalRedirect, FilterPipeline, Interrupt, OwnedProcess, Outcome,
    ProcessRegistry, SharedRegistry, SnapshotRefresher, StreamError, lock_registry,
    parse_snapshot,
};
use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Run pidcat until the log stream ends or the user interrupts it.
pub fn run(args: PidcatArgs) -> Result<Outcome> {
    let file = match &args.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };

    let adb = Adb::new(AdbTarget {
        serial: args.device_serial.clone(),
        use_device: args.use_device,
        use_emulator: args.use_emulator,
    });

    let mut packages = args.packages.clone();
    if args.current_app {
        let Some(package) = adb.current_app()? else {
            bail!("could not determine the app currently in the foreground");
        };
        tracing::info!(%package, "following current app");
        packages.push(package);
    }

    let config = build_filter_spec(&args, packages, &file, TerminalFacts::detect()).lower()?;
    let restricted = !config.packages.is_unrestricted();

    let registry = ProcessRegistry::new(config.packages.clone()).shared();
    if restricted {
        seed_registry(&adb, &registry);
    }

    if args.clear_logcat {
        adb.clear_log()?;
    }

    let interrupt = Interrupt::new();
    interrupt
        .install_ctrlc()
        .context("failed to install Ctrl-C handler")?;

    let refresher = args
        .refresh_secs
        .or(file.refresh_secs)
        .filter(|secs| restricted && *secs > 0)
        .map(|secs| {
            let adb = adb.clone();
            SnapshotRefresher::spawn(
                registry.clone(),
                Duration::from_secs(secs),
                interrupt.clone(),
                move || adb.process_snapshot(),
            )
        });

    let format = config.line_format();
    let mut pipeline = FilterPipeline::with_registry(config, registry);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = if io::stdin().is_terminal() {
        let mut source = OwnedProcess::spawn(adb.logcat(format))?;
        source.watch(&interrupt);
        pipeline.run(&mut source, &mut out, &interrupt)
    } else {
        let mut source = ExternalRedirect::stdin();
        pipeline.run(&mut source, &mut out, &interrupt)
    };

    if let Some(refresher) = refresher {
        refresher.stop();
    }

    match outcome {
        // Output piped into a pager or `head` that went away.
        Err(StreamError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => Ok(Outcome::Closed),
        other => Ok(other?),
    }
}

/// Merge CLI flags over file defaults. List options accumulate.
pub fn build_filter_spec(
    args: &PidcatArgs,
    packages: Vec<String>,
    file: &FileConfig,
    terminal: TerminalFacts,
) -> FilterSpec {
    FilterSpec {
        packages,
        min_level: args
            .min_level
            .clone()
            .or_else(|| file.min_level.clone())
            .unwrap_or_else(|| "V".to_string()),
        tags: file.tags.iter().chain(&args.tags).cloned().collect(),
        ignored_tags: file
            .ignore_tags
            .iter()
            .chain(&args.ignored_tags)
            .cloned()
            .collect(),
        tag_width: args
            .tag_width
            .or(file.tag_width)
            .unwrap_or(DEFAULT_TAG_WIDTH),
        always_tags: args.always_tags || file.always_display_tags.unwrap_or(false),
        show_timestamp: args.timestamp || file.timestamp.unwrap_or(false),
        color_gc: args.color_gc || file.color_gc.unwrap_or(false),
        show_all: args.all,
        terminal_width: terminal.width,
        color: terminal.color && !args.no_color,
    }
}

fn seed_registry(adb: &Adb, registry: &SharedRegistry) {
    match adb.process_snapshot() {
        Ok(text) => {
            let watched = lock_registry(registry).replace_all(parse_snapshot(&text));
            tracing::debug!(watched, "process registry seeded");
        }
        Err(e) => tracing::warn!(
            error = %e,
            "could not read device process list, waiting for process start events"
        ),
    }
}
