use super::cli_main::{get_user_input, prompt};
use crate::Balance::charge::signed;
use crate::Balance::check::CheckOutcome;
use crate::Balance::evaluator::{
    Side, TermId, UserCoefficients, atom_table, evaluate, mass_balance,
};
use crate::Questions::equation::{ChemicalEquation, pretty_formula};
use crate::Questions::source::{QuestionProvider, QuestionSource};
use crate::session::{DrillSession, QuestionState};
use crate::settings::Settings;
use prettytable::{Table, row};

pub fn drill_menu(settings: &Settings) {
    let config = settings.config();
    let provider = QuestionProvider::from_config_or_builtin(config);
    println!("Questions from {}", provider.describe());
    let mut session = DrillSession::new(config.topic, config.language);
    session.fetch(&provider, config.batch_size);

    loop {
        let Some(equation) = session.current().cloned() else {
            println!("No equations available.");
            break;
        };
        show_question(&session, &equation);
        println!("\x1b[33m1. Enter coefficient (e.g. r-0 2, empty value resets to 1)\x1b[0m");
        println!("\x1b[33m2. Check answer\x1b[0m");
        println!("\x1b[33m3. Reveal answer\x1b[0m");
        println!("\x1b[33m4. Next equation\x1b[0m");
        println!("\x1b[33m0. Back to main menu\x1b[0m");
        prompt("Enter your choice: ");
        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "1" => enter_coefficient(&mut session),
            "2" => match session.check_answer() {
                Some(CheckOutcome::Correct) => println!("\x1b[32mCorrect!\x1b[0m"),
                Some(CheckOutcome::Incorrect(hint)) => println!("\x1b[31m{}\x1b[0m", hint),
                None => println!("This question is finished, take the next one."),
            },
            "3" => match session.reveal_answer() {
                Some(_) => {
                    println!("\x1b[32m{}\x1b[0m", equation.pretty());
                    let (left, right) = mass_balance(
                        &equation.reactants,
                        &equation.products,
                        session.coefficients(),
                    );
                    println!("Mass of reactants {:.3} g = mass of products {:.3} g", left, right);
                }
                None => println!("Already answered correctly."),
            },
            "4" => {
                if !session.next_question() {
                    println!("Batch finished, requesting new equations...");
                    session.fetch(&provider, config.batch_size);
                }
            }
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
    let score = session.score();
    println!(
        "Score: {} correct, {} checks, {} revealed",
        score.correct, score.attempted, score.revealed
    );
}

fn show_question(session: &DrillSession, equation: &ChemicalEquation) {
    let (position, total) = session.position();
    let offline = if session.is_offline() {
        " \x1b[31m[offline mode]\x1b[0m"
    } else {
        ""
    };
    println!("\n=== Equation {}/{} ==={}", position, total, offline);
    println!("{}", coefficient_line(equation, session.coefficients()));
    for (term, component) in equation.terms() {
        match &component.name {
            Some(name) => println!("  {}: {} ({})", term, pretty_formula(&component.formula), name),
            None => println!("  {}: {}", term, pretty_formula(&component.formula)),
        }
    }
    balance_table(equation, session.coefficients()).printstd();
    let state = match session.state() {
        QuestionState::Unanswered => "unanswered",
        QuestionState::Correct => "correct",
        QuestionState::Incorrect => "incorrect",
        QuestionState::Revealed => "revealed",
    };
    println!("State: {}", state);
    if let Some(hint) = session.hint() {
        println!("Hint: {}", hint);
    }
}

fn enter_coefficient(session: &mut DrillSession) {
    prompt("Term and coefficient: ");
    let Some(input) = get_user_input() else {
        return;
    };
    match parse_edit(&input) {
        Ok((term, raw)) => {
            if !session.on_coefficient_edit(term, &raw) {
                println!("'{}' is not accepted for {}", raw, term);
            }
        }
        Err(e) => println!("{}", e),
    }
}

/// "r-0 2" -> (r-0, "2"); a term alone gives an empty value
pub fn parse_edit(input: &str) -> Result<(TermId, String), String> {
    let mut parts = input.split_whitespace();
    let term: TermId = parts
        .next()
        .ok_or_else(|| "enter a term such as r-0 and a coefficient".to_string())?
        .parse()?;
    let raw = parts.next().unwrap_or("").to_string();
    if parts.next().is_some() {
        return Err("enter one term and one coefficient".to_string());
    }
    Ok((term, raw))
}

/// equation with the typed coefficients in brackets: "[2]H₂ + [ ]O₂ → [2]H₂O"
pub fn coefficient_line(equation: &ChemicalEquation, coefficients: &UserCoefficients) -> String {
    let side = |side: Side| {
        equation
            .side(side)
            .iter()
            .enumerate()
            .map(|(index, component)| {
                let raw = coefficients.get(&TermId { side, index }).unwrap_or(" ");
                format!("[{}]{}", raw, pretty_formula(&component.formula))
            })
            .collect::<Vec<_>>()
            .join(" + ")
    };
    format!("{} → {}", side(Side::Reactant), side(Side::Product))
}

/// atoms of every element and the net charge on both sides
pub fn balance_table(equation: &ChemicalEquation, coefficients: &UserCoefficients) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Element", "Left", "Right", ""]);
    for (element, left, right) in atom_table(&equation.reactants, &equation.products, coefficients)
    {
        let mark = if left == right { "ok" } else { "X" };
        table.add_row(row![element, left, right, mark]);
    }
    let report = evaluate(&equation.reactants, &equation.products, coefficients);
    let (left, right) = (report.charge_left, report.charge_right);
    let mark = if left == right { "ok" } else { "X" };
    table.add_row(row!["charge", signed(left), signed(right), mark]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Questions::equation::EquationComponent;

    fn water() -> ChemicalEquation {
        ChemicalEquation::new(
            vec![EquationComponent::new("H2", 2), EquationComponent::new("O2", 1)],
            vec![EquationComponent::new("H2O", 2)],
        )
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(
            parse_edit("r-1 3\n"),
            Ok((TermId::reactant(1), "3".to_string()))
        );
        assert_eq!(parse_edit("p-0"), Ok((TermId::product(0), String::new())));
        assert!(parse_edit("").is_err());
        assert!(parse_edit("x-1 2").is_err());
        assert!(parse_edit("r-0 2 3").is_err());
    }

    #[test]
    fn test_coefficient_line() {
        let mut coefficients = UserCoefficients::new();
        coefficients.edit(TermId::reactant(0), "2");
        assert_eq!(
            coefficient_line(&water(), &coefficients),
            "[2]H₂ + [ ]O₂ → [ ]H₂O"
        );
    }

    #[test]
    fn test_balance_table() {
        let table = balance_table(&water(), &UserCoefficients::new());
        // header, H, O, charge
        assert_eq!(table.len(), 4);
        let text = table.to_string();
        assert!(text.contains("charge"));
        assert!(text.contains('X'));
    }
}
