use crate::Balance::evaluator::{Side, TermId, UserCoefficients};
use crate::Balance::formula::formula_body;
use crate::Balance::hints::Topic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// one term of an equation with its reference (minimal) coefficient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationComponent {
    pub formula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub coefficient: u32,
}

impl EquationComponent {
    pub fn new(formula: &str, coefficient: u32) -> Self {
        Self {
            formula: formula.to_string(),
            name: None,
            coefficient,
        }
    }
    pub fn named(formula: &str, name: &str, coefficient: u32) -> Self {
        Self {
            formula: formula.to_string(),
            name: Some(name.to_string()),
            coefficient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Balanced chemical equation as served to the student.
/// The reference coefficients balance every element and the net charge and have no common divisor
/// (see `Questions::validate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalEquation {
    pub reactants: Vec<EquationComponent>,
    pub products: Vec<EquationComponent>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
}

/// question bank as stored in JSON: either a bare array or `{"equations": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EquationList {
    Wrapped { equations: Vec<ChemicalEquation> },
    Bare(Vec<ChemicalEquation>),
}

impl EquationList {
    pub fn into_vec(self) -> Vec<ChemicalEquation> {
        match self {
            EquationList::Wrapped { equations } => equations,
            EquationList::Bare(equations) => equations,
        }
    }
}

impl ChemicalEquation {
    pub fn new(reactants: Vec<EquationComponent>, products: Vec<EquationComponent>) -> Self {
        Self {
            reactants,
            products,
            difficulty: Difficulty::default(),
            topic: None,
        }
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn side(&self, side: Side) -> &[EquationComponent] {
        match side {
            Side::Reactant => &self.reactants,
            Side::Product => &self.products,
        }
    }

    /// all terms, reactants first, with their identifiers
    pub fn terms(&self) -> impl Iterator<Item = (TermId, &EquationComponent)> {
        let reactants = self
            .reactants
            .iter()
            .enumerate()
            .map(|(index, c)| (TermId::reactant(index), c));
        let products = self
            .products
            .iter()
            .enumerate()
            .map(|(index, c)| (TermId::product(index), c));
        reactants.chain(products)
    }

    pub fn component(&self, term: TermId) -> Option<&EquationComponent> {
        self.side(term.side).get(term.index)
    }

    /// reference coefficients written as user input, e.g. to check the answer key itself
    pub fn reference_coefficients(&self) -> UserCoefficients {
        self.terms()
            .map(|(term, c)| (term, c.coefficient.to_string()))
            .collect()
    }

    /// every reference coefficient multiplied by `k`
    pub fn scaled_coefficients(&self, k: u32) -> UserCoefficients {
        self.terms()
            .map(|(term, c)| (term, c.coefficient.saturating_mul(k).to_string()))
            .collect()
    }

    /// Equation with Unicode subscripts and superscripts: 2MnO₄⁻ + 16H⁺ + 10e⁻ → ...
    pub fn pretty(&self) -> String {
        let side = |components: &[EquationComponent]| {
            components
                .iter()
                .map(|c| with_coefficient(c.coefficient, &pretty_formula(&c.formula)))
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("{} → {}", side(&self.reactants), side(&self.products))
    }
}

fn with_coefficient(coefficient: u32, formula: &str) -> String {
    if coefficient == 1 {
        formula.to_string()
    } else {
        format!("{}{}", coefficient, formula)
    }
}

impl fmt::Display for ChemicalEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |components: &[EquationComponent]| {
            components
                .iter()
                .map(|c| with_coefficient(c.coefficient, &c.formula))
                .collect::<Vec<_>>()
                .join(" + ")
        };
        write!(f, "{} -> {}", side(&self.reactants), side(&self.products))
    }
}

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// "Fe2(SO4)3" -> "Fe₂(SO₄)₃", "SO4^2-" -> "SO₄²⁻", "CuSO4.5H2O" -> "CuSO₄·5H₂O"
pub fn pretty_formula(formula: &str) -> String {
    let body = formula_body(formula);
    let mut out = String::new();
    // leading digits and hydrate multipliers stay on the line
    let mut plain_digits = true;
    for c in body.chars() {
        match c {
            '.' => {
                out.push('·');
                plain_digits = true;
            }
            d if d.is_ascii_digit() => match (plain_digits, d.to_digit(10)) {
                (false, Some(digit)) => out.push(SUBSCRIPTS[digit as usize]),
                _ => out.push(d),
            },
            other => {
                out.push(other);
                plain_digits = false;
            }
        }
    }
    if let Some((_, segment)) = formula.split_once('^') {
        for c in segment.trim().chars() {
            match c {
                '+' => out.push('⁺'),
                '-' => out.push('⁻'),
                d if d.is_ascii_digit() => {
                    out.push(SUPERSCRIPTS[d.to_digit(10).unwrap_or(0) as usize])
                }
                other => out.push(other),
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_synthesis() -> ChemicalEquation {
        ChemicalEquation::new(
            vec![EquationComponent::new("H2", 2), EquationComponent::new("O2", 1)],
            vec![EquationComponent::new("H2O", 2)],
        )
    }

    #[test]
    fn test_display() {
        assert_eq!(water_synthesis().to_string(), "2H2 + O2 -> 2H2O");
    }

    #[test]
    fn test_pretty_formula() {
        assert_eq!(pretty_formula("Fe2(SO4)3"), "Fe₂(SO₄)₃");
        assert_eq!(pretty_formula("SO4^2-"), "SO₄²⁻");
        assert_eq!(pretty_formula("Na^+"), "Na⁺");
        assert_eq!(pretty_formula("e^-"), "e⁻");
        assert_eq!(pretty_formula("CuSO4.5H2O"), "CuSO₄·5H₂O");
        assert_eq!(pretty_formula("C12H22O11"), "C₁₂H₂₂O₁₁");
    }

    #[test]
    fn test_pretty_equation() {
        assert_eq!(water_synthesis().pretty(), "2H₂ + O₂ → 2H₂O");
    }

    #[test]
    fn test_terms_and_reference_coefficients() {
        let eq = water_synthesis();
        let ids: Vec<String> = eq.terms().map(|(t, _)| t.to_string()).collect();
        assert_eq!(ids, vec!["r-0", "r-1", "p-0"]);
        let reference = eq.reference_coefficients();
        assert_eq!(reference.get(&TermId::reactant(0)), Some("2"));
        assert_eq!(reference.get(&TermId::product(0)), Some("2"));
        let doubled = eq.scaled_coefficients(2);
        assert_eq!(doubled.get(&TermId::reactant(1)), Some("2"));
        assert_eq!(eq.component(TermId::product(3)), None);
    }

    #[test]
    fn test_deserialize_bank_formats() {
        let bare = r#"[{"reactants":[{"formula":"H2","coefficient":2},{"formula":"O2","coefficient":1}],
                        "products":[{"formula":"H2O","name":"water","coefficient":2}]}]"#;
        let list: EquationList = serde_json::from_str(bare).unwrap();
        let equations = list.into_vec();
        assert_eq!(equations.len(), 1);
        assert_eq!(equations[0].difficulty, Difficulty::Medium);
        assert_eq!(equations[0].products[0].name.as_deref(), Some("water"));

        let wrapped = r#"{"equations":[{"reactants":[{"formula":"Ag^+","coefficient":1},{"formula":"Cl^-","coefficient":1}],
                        "products":[{"formula":"AgCl","coefficient":1}],"difficulty":"easy","topic":"precipitation"}]}"#;
        let list: EquationList = serde_json::from_str(wrapped).unwrap();
        let equations = list.into_vec();
        assert_eq!(equations[0].difficulty, Difficulty::Easy);
        assert_eq!(equations[0].topic, Some(Topic::Precipitation));
    }
}
