use clap::Parser;
use pidcat_core::cli::{PidcatArgs, run};
use pidcat_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "pidcat",
    version,
    about = "Filter logcat by application package name",
    disable_version_flag = true
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    #[command(flatten)]
    args: PidcatArgs,
}


fn main() {
    let cli = Cli::parse();

    init_logging();

    if let Err(e) = run(cli.args) {
        eprintln!("pidcat: {e:#}");
        std::process::exit(1);
    }
}
