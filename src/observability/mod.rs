//! Tracing pipeline with file-based export.
//!
//! The terminal is the UI, so diagnostics never go to stdout or stderr. Spans
//! are exported as OTLP JSON and events are logged as plain text, both into the
//! per-user data directory:
//!
//! ```text
//! tracing macros ─┬→ tracing-opentelemetry → FileSpanExporter → flashfind-otlp.json
//!                 └→ fmt layer → LogWriter → flashfind.log
//! ```
//!
//! # Configuration
//!
//! Level is taken from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file or `--trace-level`
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber assembly
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Size-rotating file and its `MakeWriter` adapter

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, init_tracing_in};
