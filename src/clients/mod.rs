pub mod database;
pub mod delivery_log;
pub mod http;
pub mod integration;
pub mod memory;
pub mod probe;
pub mod providers;
pub mod signal;
pub mod template;
