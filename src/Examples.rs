/// walkthroughs of formula parsing, charges, answer checking and drill sessions
pub mod balance_examples;
