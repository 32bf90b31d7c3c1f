/// loading of question banks from JSON files
pub mod load_from_file;
/// terminal and file logging for the binary
pub mod logging;
