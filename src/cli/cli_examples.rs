use super::cli_main::{get_user_input, prompt};
use crate::Examples::balance_examples::balance_examples;

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Formula parsing and molar mass");
        println!("2. Charges of ions");
        println!("3. Checking an answer");
        println!("4. Half-equations");
        println!("5. Built-in equations");
        println!("6. Drill session");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim().parse::<usize>() {
            Ok(0) => break,
            Ok(n) if n <= 6 => balance_examples(n - 1),
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
