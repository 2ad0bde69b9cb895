pub mod capture_sink;
pub mod completion_sink;
