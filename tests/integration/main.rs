//! Integration test modules.

mod property_test;
mod workout_pipeline_test;
