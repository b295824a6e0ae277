use std::time::Duration;

/// Lines carrying this marker are framework diagnostics that never belong to an app.
pub const NOISE_MARKER: &str = "nativeGetEnabledTags";

/// Only this tag announces process deaths.
pub const ACTIVITY_MANAGER_TAG: &str = "ActivityManager";
pub const DALVIK_TAG: &str = "dalvikvm";
/// Tag used by debuggerd for native crash backtraces.
pub const NATIVE_CRASH_TAG: &str = "DEBUG";

pub const DEFAULT_TAG_WIDTH: usize = 23;
/// `MM-DD HH:MM:SS.mmm`
pub const TIMESTAMP_WIDTH: usize = 18;
pub const LEVEL_BADGE_WIDTH: usize = 3;
pub const TAB_EXPANSION: &str = "    ";

/// Granularity at which background loops notice an interrupt.
pub const LOOP_IDLE_SLEEP: Duration = Duration::from_millis(25);
