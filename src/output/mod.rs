//! Output: the CSV report file and the console lines describing the run.

pub mod csv;
pub mod terminal;
