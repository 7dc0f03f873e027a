pub mod matrix_reader;
pub use matrix_reader::*;
pub mod matrix_writer;
pub use matrix_writer::MatrixWriter;

pub mod report_writer;
pub use report_writer::Report;
pub mod tsplib_reader;
pub use tsplib_reader::*;
