pub mod command;
pub mod kv;
pub mod reply;
