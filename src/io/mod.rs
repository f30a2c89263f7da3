pub mod output;

pub use output::{create_writer, writer_for, OutputFormat, OutputWriter, ReportSubject};
