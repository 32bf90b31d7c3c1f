use ChemDrill::Utils::logging::init_logging;
use ChemDrill::cli::cli_main::run_interactive_menu;
use ChemDrill::settings::Settings;
use log::warn;

pub fn main() {
    let mut settings = Settings::new();
    match init_logging(settings.config()) {
        Ok(()) => {
            if let Some(problem) = settings.load_problem() {
                warn!("{}", problem);
            }
        }
        Err(e) => {
            eprintln!("logging is not available: {}", e);
            if let Some(problem) = settings.load_problem() {
                eprintln!("{}", problem);
            }
        }
    }
    run_interactive_menu(&mut settings);
}
