#[allow(non_snake_case)]
pub mod Balance;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Questions;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod session;
pub mod settings;
