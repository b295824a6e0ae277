use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct PidcatArgs {
    /// Application package name(s)
    pub packages: Vec<String>,

    /// Width of log tag
    #[arg(short = 'w', long = "tag-width", value_name = "N")]
    pub tag_width: Option<usize>,

    /// Minimum level to be displayed (one of VDIWEF)
    #[arg(short = 'l', long = "min-level", value_name = "LEVEL")]
    pub min_level: Option<String>,

    /// Color garbage collection
    #[arg(long)]
    pub color_gc: bool,

    /// Always display the tag name
    #[arg(long = "always-display-tags")]
    pub always_tags: bool,

    /// Filter logcat by current running app
    #[arg(long = "current")]
    pub current_app: bool,

    /// Device serial number (adb -s option)
    #[arg(short = 's', long = "serial", value_name = "SERIAL")]
    pub device_serial: Option<String>,

    /// Use first device for log input (adb -d option)
    #[arg(short = 'd', long = "device")]
    pub use_device: bool,

    /// Use first emulator for log input (adb -e option)
    #[arg(short = 'e', long = "emulator")]
    pub use_emulator: bool,

    /// Clear the entire log before running
    #[arg(short = 'c', long = "clear")]
    pub clear_logcat: bool,

    /// Filter output by specified tag(s)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Filter output by ignoring specified tag(s)
    #[arg(short = 'i', long = "ignore-tag", value_name = "TAG")]
    pub ignored_tags: Vec<String>,

    /// Print all log messages
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Read timestamped logcat output and show the timestamp column
    #[arg(long)]
    pub timestamp: bool,

    /// Re-read the device process list every N seconds
    #[arg(long = "refresh-secs", value_name = "N")]
    pub refresh_secs: Option<u64>,

    /// Never emit ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// TOML file with default settings
    #[arg(long, env = "PIDCAT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}
