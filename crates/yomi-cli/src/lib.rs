pub mod commands;
pub mod dict_source;
pub mod setup;
pub mod trace_init;
