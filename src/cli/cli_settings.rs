use super::cli_main::{get_user_input, prompt, report};
use crate::settings::Settings;
use prettytable::{Table, row};

pub fn settings_menu(settings: &mut Settings) {
    loop {
        settings_table(settings).printstd();
        println!("\n=== Settings ===");
        println!("1. Equations per batch");
        println!("2. Question service URL");
        println!("3. Request timeout, s");
        println!("4. Question bank file");
        println!("5. Log level");
        println!("6. Reset to defaults");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");
        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "1" => {
                if let Some(value) = ask("Equations per batch (1-20): ") {
                    match value.parse::<usize>() {
                        Ok(n) => report(settings.set_batch_size(n)),
                        Err(_) => println!("'{}' is not a number", value),
                    }
                }
            }
            "2" => {
                if let Some(value) = ask("URL (empty to use local questions): ") {
                    report(settings.set_endpoint(Some(&value)));
                }
            }
            "3" => {
                if let Some(value) = ask("Timeout, s: ") {
                    match value.parse::<u64>() {
                        Ok(secs) => report(settings.set_timeout_secs(secs)),
                        Err(_) => println!("'{}' is not a number", value),
                    }
                }
            }
            "4" => {
                if let Some(value) = ask("Path to the bank file (empty for built-in questions): ") {
                    report(settings.set_question_bank(Some(&value)));
                }
            }
            "5" => {
                if let Some(value) = ask("Level (error, warn, info, debug, trace): ") {
                    println!("The new level applies after restart.");
                    report(settings.set_log_level(&value));
                }
            }
            "6" => report(settings.reset_to_defaults()),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn ask(text: &str) -> Option<String> {
    prompt(text);
    get_user_input().map(|s| s.trim().to_string())
}

fn settings_table(settings: &Settings) -> Table {
    let config = settings.config();
    let mut table = Table::new();
    table.add_row(row!["Setting", "Value"]);
    table.add_row(row!["config file", settings.config_file().display()]);
    table.add_row(row!["language", format!("{:?}", config.language)]);
    table.add_row(row!["topic", config.topic.title(config.language)]);
    table.add_row(row!["batch size", config.batch_size]);
    table.add_row(row![
        "question service",
        config.endpoint.as_deref().unwrap_or("-")
    ]);
    table.add_row(row!["timeout, s", config.timeout_secs]);
    table.add_row(row![
        "question bank",
        config.question_bank.as_deref().unwrap_or("built-in")
    ]);
    table.add_row(row!["log file", config.log_file]);
    table.add_row(row!["log level", config.log_level]);
    table
}
