pub fn balance_examples(task: usize) {
    match task {
        0 => {
            // atomic composition and molar masses
            use crate::Balance::formula::{calculate_molar_mass, parse_formula, parse_formula_ordered};
            let formula = "C6H8O6";
            let (molar_mass, element_composition) = calculate_molar_mass(formula);
            println!("Element counts: {:?}", element_composition);
            println!("Molar mass: {:.3} g/mol", molar_mass);

            let atomic_composition = parse_formula("Fe2(SO4)3");
            println!("Fe2(SO4)3: {:?}", atomic_composition);
            assert_eq!(atomic_composition["O"], 12);
            // elements in the order they are written
            println!("Ca(OH)2: {:?}", parse_formula_ordered("Ca(OH)2"));
            // broken formulas never fail: the unclosed group is dropped
            println!("Na(OH: {:?}", parse_formula_ordered("Na(OH"));
        }
        1 => {
            // net charge of ions and electrons
            use crate::Balance::charge::{charge, signed};
            for formula in ["SO4^2-", "Fe^3+", "Na^+", "e^-", "H2O", "NH4^+"] {
                println!("{:>8}: {}", formula, signed(charge(formula)));
            }
        }
        2 => {
            // checking an answer and getting a hint
            use crate::Balance::check::{CheckOutcome, check_answer};
            use crate::Balance::evaluator::{TermId, UserCoefficients, evaluate};
            use crate::Balance::hints::{Language, Topic};
            use crate::Questions::equation::{ChemicalEquation, EquationComponent};
            let equation = ChemicalEquation::new(
                vec![EquationComponent::new("H2", 2), EquationComponent::new("O2", 1)],
                vec![EquationComponent::new("H2O", 2)],
            );
            let mut coefficients = UserCoefficients::new();
            let report = evaluate(&equation.reactants, &equation.products, &coefficients);
            println!("all coefficients 1: {:?}", report.unbalanced);
            for language in [Language::English, Language::Russian] {
                if let CheckOutcome::Incorrect(hint) =
                    check_answer(&equation, &coefficients, Topic::Basic, language)
                {
                    println!("hint: {}", hint);
                }
            }
            coefficients.edit(TermId::reactant(0), "2");
            coefficients.edit(TermId::product(0), "2");
            let outcome = check_answer(&equation, &coefficients, Topic::Basic, Language::English);
            println!("{}: {:?}", equation, outcome);
            // "02" is not a coefficient
            assert!(!coefficients.edit(TermId::reactant(1), "02"));
        }
        3 => {
            // half-equations: electrons balance the charge
            use crate::Balance::check::check_answer;
            use crate::Balance::evaluator::{TermId, UserCoefficients};
            use crate::Balance::hints::{Language, Topic};
            use crate::Questions::fallback::fallback_for;
            let equations = fallback_for(Topic::HalfEquation);
            for equation in &equations {
                println!("{}", equation.pretty());
            }
            let equation = &equations[0];
            let mut coefficients = UserCoefficients::new();
            coefficients.edit(TermId::product(1), "2");
            let outcome = check_answer(equation, &coefficients, Topic::HalfEquation, Language::English);
            println!("{} with 2e⁻: {:?}", equation, outcome);
        }
        4 => {
            // built-in bank: composition matrix of every equation and conservation of mass
            use crate::Balance::evaluator::mass_balance;
            use crate::Questions::fallback::builtin_bank;
            use crate::Questions::validate::{create_elem_composition_matrix, validate_equation};
            use prettytable::{Table, row};
            let mut table = Table::new();
            table.add_row(row!["Equation", "Topic", "Valid", "Mass, g"]);
            for equation in builtin_bank() {
                let (left, _) = mass_balance(
                    &equation.reactants,
                    &equation.products,
                    &equation.reference_coefficients(),
                );
                let valid = match validate_equation(&equation) {
                    Ok(()) => "yes".to_string(),
                    Err(reason) => reason,
                };
                let topic = equation.topic.map(|t| t.to_string()).unwrap_or_default();
                table.add_row(row![equation.pretty(), topic, valid, format!("{:.3}", left)]);
            }
            table.printstd();
            let bank = builtin_bank();
            let (matrix, rows) = create_elem_composition_matrix(&bank[bank.len() - 1]);
            println!("rows: {:?}", rows);
            println!("{}", matrix);
        }
        5 => {
            // a short drill session with the built-in questions
            use crate::Balance::hints::{Language, Topic};
            use crate::Questions::source::BuiltinSource;
            use crate::session::DrillSession;
            let mut session = DrillSession::new(Topic::Redox, Language::English);
            session.fetch(&BuiltinSource, 2);
            loop {
                if let Some(equation) = session.current() {
                    println!("question: {}", equation.pretty());
                }
                if let Some(outcome) = session.check_answer() {
                    println!("unit coefficients: {:?}", outcome);
                }
                if let Some(answer) = session.reveal_answer() {
                    println!("answer: {:?}", answer);
                }
                if !session.next_question() {
                    break;
                }
            }
            println!("score: {:?}", session.score());
            println!("recent: {:?}", session.history().signatures());
        }
        _ => {
            println!("there is no example {}", task);
        }
    }
}
