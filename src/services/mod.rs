pub mod check;
pub mod kv_service;
