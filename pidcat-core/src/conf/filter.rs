use crate::conf::error::ConfigError;
use crate::logcat::constants::DEFAULT_TAG_WIDTH;
use crate::logcat::{Level, LineFormat};
use regex::Regex;

/// Decides which process names belong to the packages being watched.
///
/// Configured tokens come in two flavours:
/// - catch-all packages (`com.example`) match the package and all of its
///   `com.example:sub` processes
/// - named processes (`com.example:sync`) match exactly one process; the
///   CLI shorthand `com.example:` names the main process only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRule {
    catch_all: Vec<String>,
    named: Vec<String>,
}

impl PackageRule {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rule = Self::default();
        for package in packages {
            rule.add(package.as_ref());
        }
        rule
    }

    pub fn add(&mut self, package: &str) {
        let package = package.trim();
        if package.is_empty() {
            return;
        }
        match package.strip_suffix(':') {
            Some(main) => self.named.push(main.to_string()),
            None if package.contains(':') => self.named.push(package.to_string()),
            None => self.catch_all.push(package.to_string()),
        }
    }

    /// No packages configured: every process is of interest.
    pub fn is_unrestricted(&self) -> bool {
        self.catch_all.is_empty() && self.named.is_empty()
    }

    pub fn matches(&self, process: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        if self.named.iter().any(|named| named == process) {
            return true;
        }
        let base = match process.find(':') {
            Some(index) => &process[..index],
            None => process,
        };
        self.catch_all.iter().any(|package| package == base)
    }
}

/// Anchored tag patterns; a tag matches when any pattern matches all of it.
#[derive(Debug, Clone, Default)]
pub struct TagPatterns {
    patterns: Vec<Regex>,
}

impl TagPatterns {
    pub fn compile<I, S>(raw: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = raw
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref().trim();
                Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                    ConfigError::InvalidTagPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(tag))
    }
}

/// Raw filter settings as collected from the CLI and config file.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub packages: Vec<String>,
    pub min_level: String,
    pub tags: Vec<String>,
    pub ignored_tags: Vec<String>,
    pub tag_width: usize,
    pub always_tags: bool,
    pub show_timestamp: bool,
    pub color_gc: bool,
    pub show_all: bool,
    /// Environment fact: `None` disables wrapping.
    pub terminal_width: Option<usize>,
    /// Environment fact: whether the sink understands ANSI colors.
    pub color: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            min_level: "V".to_string(),
            tags: Vec::new(),
            ignored_tags: Vec::new(),
            tag_width: DEFAULT_TAG_WIDTH,
            always_tags: false,
            show_timestamp: false,
            color_gc: false,
            show_all: false,
            terminal_width: None,
            color: false,
        }
    }
}

impl FilterSpec {
    /// Validate and compile into the immutable per-run configuration.
    pub fn lower(self) -> Result<FilterConfig, ConfigError> {
        let min_level = Level::parse(&self.min_level).ok_or_else(|| ConfigError::InvalidLevel {
            value: self.min_level.clone(),
        })?;

        let packages = PackageRule::new(&self.packages);
        let show_all = self.show_all || packages.is_unrestricted();

        Ok(FilterConfig {
            packages,
            min_level,
            tags: TagPatterns::compile(&self.tags)?,
            ignored_tags: TagPatterns::compile(&self.ignored_tags)?,
            tag_width: self.tag_width,
            always_tags: self.always_tags,
            show_timestamp: self.show_timestamp,
            color_gc: self.color_gc,
            show_all,
            terminal_width: self.terminal_width.filter(|w| *w > 0),
            color: self.color,
        })
    }
}

/// Validated configuration, immutable for the whole run.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub packages: PackageRule,
    pub min_level: Level,
    pub tags: TagPatterns,
    pub ignored_tags: TagPatterns,
    pub tag_width: usize,
    pub always_tags: bool,
    pub show_timestamp: bool,
    pub color_gc: bool,
    /// Print lines of every process, not only the watched ones.
    pub show_all: bool,
    pub terminal_width: Option<usize>,
    pub color: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            packages: PackageRule::default(),
            min_level: Level::Verbose,
            tags: TagPatterns::default(),
            ignored_tags: TagPatterns::default(),
            tag_width: DEFAULT_TAG_WIDTH,
            always_tags: false,
            show_timestamp: false,
            color_gc: false,
            show_all: true,
            terminal_width: None,
            color: false,
        }
    }
}

impl FilterConfig {
    pub fn line_format(&self) -> LineFormat {
        if self.show_timestamp {
            LineFormat::Time
        } else {
            LineFormat::Brief
        }
    }

    /// Level, tag include and tag exclude checks. Ownership is the registry's call.
    pub fn admits(&self, level: Level, tag: &str) -> bool {
        if level < self.min_level {
            return false;
        }
        if !self.ignored_tags.is_empty() && self.ignored_tags.matches(tag) {
            return false;
        }
        self.tags.is_empty() || self.tags.matches(tag)
    }
}
