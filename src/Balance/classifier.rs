use super::evaluator::{Side, TermId, UserCoefficients};
use crate::Questions::equation::EquationComponent;

/// how a balanced answer relates to the reference coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// every coefficient equals the reference one
    Exact,
    /// balanced, but not the minimal whole-number ratio
    Scaled,
}

/// Meant for answers whose report is already balanced on atoms and charge.
pub fn classify(
    reactants: &[EquationComponent],
    products: &[EquationComponent],
    coefficients: &UserCoefficients,
) -> MatchKind {
    let side_matches = |components: &[EquationComponent], side: Side| {
        components
            .iter()
            .enumerate()
            .all(|(index, c)| coefficients.resolve(&TermId { side, index }) == c.coefficient)
    };
    if side_matches(reactants, Side::Reactant) && side_matches(products, Side::Product) {
        MatchKind::Exact
    } else {
        MatchKind::Scaled
    }
}

pub fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// greatest common divisor of all coefficients; 0 for an empty slice
pub fn common_divisor(coefficients: &[u32]) -> u32 {
    coefficients.iter().fold(0, |acc, &c| gcd(acc, c))
}
