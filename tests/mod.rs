mod common;

mod compose_tests;
mod health_tests;
mod probe_tests;
