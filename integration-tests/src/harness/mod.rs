pub mod fake_adb;
pub mod script;
pub mod session;
pub mod tracing;

pub use fake_adb::FakeAdb;
pub use script::ScriptedSource;
pub use session::{TestSession, fixture_path, read_fixture};
pub use tracing::{CapturedEvent, captured_events, init_test_tracing};
