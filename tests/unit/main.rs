//! Unit test modules.

mod calendar_test;
mod config_test;
mod recent_test;
