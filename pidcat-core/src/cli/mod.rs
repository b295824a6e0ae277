mod args;
mod run;
mod terminal;

#[cfg(test)]
mod tests;

pub use args::PidcatArgs;
pub use run::{build_filter_spec, run};
pub use terminal::TerminalFacts;
