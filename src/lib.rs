pub mod configuration;
pub mod controller;
pub mod error_handling;
pub mod lookup;
pub mod rendering;
pub mod responder;
pub mod session_log;
