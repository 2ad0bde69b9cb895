pub mod trace_source;
