pub mod capture_worker;
pub mod png_capture_sink;
