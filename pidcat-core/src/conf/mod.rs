mod error;
mod file;
mod filter;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use file::{FileConfig, load_file_config};
pub use filter::{FilterConfig, FilterSpec, PackageRule, TagPatterns};
