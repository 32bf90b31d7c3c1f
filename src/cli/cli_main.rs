use super::cli_drill::drill_menu;
use super::cli_examples::examples_menu;
use super::cli_settings::settings_menu;
use crate::Balance::hints::{Language, Topic};
use crate::settings::Settings;
use std::io::{self, Write};

pub fn run_interactive_menu(settings: &mut Settings) {
    loop {
        show_main_menu(settings);
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => drill_menu(settings),
            "2" => choose_topic(settings),
            "3" => choose_language(settings),
            "4" => settings_menu(settings),
            "5" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - "Enter your choice:" prompt

Green (\x1b[32m) / Red (\x1b[31m) - right and wrong answers

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu(settings: &Settings) {
    let config = settings.config();
    println!(
        "\x1b[34m\n Welcome to ChemDrill: balancing chemical equations,\n
    half-equations and redox reactions \n \x1b[0m"
    );
    println!(
        "Topic: {} | Language: {:?}",
        config.topic.title(config.language),
        config.language
    );
    println!("\x1b[33m1. Drill\x1b[0m");
    println!("\x1b[33m2. Choose topic\x1b[0m");
    println!("\x1b[33m3. Choose language\x1b[0m");
    println!("\x1b[33m4. Settings\x1b[0m");
    println!("\x1b[33m5. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

fn choose_topic(settings: &mut Settings) {
    let language = settings.config().language;
    println!("\nChoose topic:");
    for (i, topic) in Topic::ALL.iter().enumerate() {
        println!("\x1b[33m{}. {}\x1b[0m", i + 1, topic.title(language));
    }
    prompt("Enter your choice: ");
    let Some(choice) = get_user_input() else {
        return;
    };
    let topic = choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| Topic::ALL.get(i).copied());
    match topic {
        Some(topic) => report(settings.set_topic(topic)),
        None => println!("Invalid choice."),
    }
}

fn choose_language(settings: &mut Settings) {
    println!("\nChoose language / Выберите язык:");
    println!("\x1b[33m1. English\x1b[0m");
    println!("\x1b[33m2. Русский\x1b[0m");
    prompt("Enter your choice: ");
    let Some(choice) = get_user_input() else {
        return;
    };
    match choice.trim() {
        "1" => report(settings.set_language(Language::English)),
        "2" => report(settings.set_language(Language::Russian)),
        _ => println!("Invalid choice."),
    }
}

pub(crate) fn report<E: std::fmt::Display>(result: Result<(), E>) {
    match result {
        Ok(()) => println!("Saved."),
        Err(e) => println!("\x1b[31mError: {}\x1b[0m", e),
    }
}

pub(crate) fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    // a prompt that fails to flush still shows up with the next line
    let _ = io::stdout().flush();
}

/// one line from stdin; `None` at end of input
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}
