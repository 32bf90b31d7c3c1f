use super::classifier::classify;
use super::evaluator::{TermId, UserCoefficients, evaluate};
use super::hints::{Language, Topic, generate_hint};
use crate::Questions::equation::ChemicalEquation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Correct,
    Incorrect(String),
}

impl CheckOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, CheckOutcome::Correct)
    }
}

/// Checks the user's coefficients against the equation. The equation's own topic, when it has
/// one, selects the hint strategy, otherwise `topic` does.
pub fn check_answer(
    equation: &ChemicalEquation,
    coefficients: &UserCoefficients,
    topic: Topic,
    language: Language,
) -> CheckOutcome {
    let report = evaluate(&equation.reactants, &equation.products, coefficients);
    let verdict = report
        .is_balanced()
        .then(|| classify(&equation.reactants, &equation.products, coefficients));
    match generate_hint(&report, verdict, equation.topic.unwrap_or(topic), language) {
        None => CheckOutcome::Correct,
        Some(hint) => CheckOutcome::Incorrect(hint),
    }
}

/// reference coefficients of every term, reactants first
pub fn reveal_answer(equation: &ChemicalEquation) -> Vec<(TermId, u32)> {
    equation
        .terms()
        .map(|(term, component)| (term, component.coefficient))
        .collect()
}
