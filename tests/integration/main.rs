//! Integration test modules.

mod pipeline_test;
