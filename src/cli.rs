/// drill loop: equation, balance table, coefficients, check and reveal
pub mod cli_drill;
pub mod cli_examples;
/// main menu of the terminal application
pub mod cli_main;
pub mod cli_settings;
