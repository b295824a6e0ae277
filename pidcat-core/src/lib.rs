pub mod adb;
pub mod cli;
pub mod conf;
pub mod logcat;
pub mod logging;
