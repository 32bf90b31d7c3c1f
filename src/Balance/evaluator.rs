//! Atom and charge bookkeeping of both sides of an equation under user coefficients.
use super::charge::charge;
use super::formula::{ELECTRON, calculate_molar_mass, parse_formula_ordered};
use crate::Questions::equation::EquationComponent;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// one or more digits, no leading zero
static POSITIVE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").expect("coefficient pattern must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Reactant,
    Product,
}

/// position of a term in the equation; written as `r-0`, `p-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId {
    pub side: Side,
    pub index: usize,
}

impl TermId {
    pub fn reactant(index: usize) -> Self {
        Self {
            side: Side::Reactant,
            index,
        }
    }
    pub fn product(index: usize) -> Self {
        Self {
            side: Side::Product,
            index,
        }
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.side {
            Side::Reactant => "r",
            Side::Product => "p",
        };
        write!(f, "{}-{}", prefix, self.index)
    }
}

impl FromStr for TermId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, index) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("term id '{}' must look like r-0 or p-1", s))?;
        let index: usize = index
            .parse()
            .map_err(|_| format!("term id '{}' has no valid index", s))?;
        match prefix {
            "r" => Ok(TermId::reactant(index)),
            "p" => Ok(TermId::product(index)),
            _ => Err(format!("term id '{}' must start with r or p", s)),
        }
    }
}

/// true for "one or more digits, no leading zero" that fits a coefficient
pub fn is_positive_integer(raw: &str) -> bool {
    POSITIVE_INTEGER.is_match(raw) && raw.parse::<u32>().is_ok()
}

/// what the edit boundary accepts: the empty string or a positive integer
pub fn is_valid_coefficient_input(raw: &str) -> bool {
    raw.is_empty() || is_positive_integer(raw)
}

/// coefficient typed by the user, 1 when absent or not a positive integer
pub fn resolve_coefficient(raw: Option<&str>) -> u32 {
    match raw {
        Some(raw) if is_positive_integer(raw) => raw.parse().unwrap_or(1),
        _ => 1,
    }
}

/// raw coefficient strings typed by the user, keyed by term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCoefficients {
    entries: HashMap<TermId, String>,
}

impl UserCoefficients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &TermId) -> Option<&str> {
        self.entries.get(term).map(|s| s.as_str())
    }

    /// stores the input if the edit boundary accepts it; rejected input leaves the state unchanged.
    /// Values that do not fit `u32` are rejected as well.
    pub fn edit(&mut self, term: TermId, raw: &str) -> bool {
        if !is_valid_coefficient_input(raw) {
            debug!("coefficient input '{}' for {} rejected", raw, term);
            return false;
        }
        if raw.is_empty() {
            self.entries.remove(&term);
        } else {
            self.entries.insert(term, raw.to_string());
        }
        true
    }

    pub fn resolve(&self, term: &TermId) -> u32 {
        resolve_coefficient(self.get(term))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(TermId, String)> for UserCoefficients {
    fn from_iter<I: IntoIterator<Item = (TermId, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbalancedElement {
    pub element: String,
    pub left: u64,
    pub right: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub unbalanced: Vec<UnbalancedElement>,
    pub charge_left: i64,
    pub charge_right: i64,
}

impl BalanceReport {
    pub fn atoms_balanced(&self) -> bool {
        self.unbalanced.is_empty()
    }
    pub fn charge_balanced(&self) -> bool {
        self.charge_left == self.charge_right
    }
    pub fn is_balanced(&self) -> bool {
        self.atoms_balanced() && self.charge_balanced()
    }
}

// totals of one side: atoms in first-seen order and net charge
#[derive(Debug, Default)]
struct SideTotals {
    order: Vec<String>,
    atoms: HashMap<String, u64>,
    charge: i64,
}

fn side_totals(components: &[EquationComponent], side: Side, coefficients: &UserCoefficients) -> SideTotals {
    let mut totals = SideTotals::default();
    for (index, component) in components.iter().enumerate() {
        let coefficient = coefficients.resolve(&TermId { side, index });
        for (symbol, count) in parse_formula_ordered(&component.formula) {
            if symbol == ELECTRON {
                continue;
            }
            if !totals.atoms.contains_key(&symbol) {
                totals.order.push(symbol.clone());
            }
            let atoms = totals.atoms.entry(symbol).or_insert(0);
            *atoms = atoms.saturating_add((count as u64).saturating_mul(coefficient as u64));
        }
        let term_charge = (coefficient as i64).saturating_mul(charge(&component.formula));
        totals.charge = totals.charge.saturating_add(term_charge);
    }
    totals
}

// left-side elements first in first-seen order, then elements that appear only on the right
fn table_from(left: &SideTotals, right: &SideTotals) -> Vec<(String, u64, u64)> {
    left.order
        .iter()
        .chain(right.order.iter().filter(|s| !left.atoms.contains_key(*s)))
        .map(|symbol| {
            (
                symbol.clone(),
                left.atoms.get(symbol).copied().unwrap_or(0),
                right.atoms.get(symbol).copied().unwrap_or(0),
            )
        })
        .collect()
}

/// (element, left, right) for every element of the equation: left-side elements first in
/// first-seen order, then elements that appear only on the right
pub fn atom_table(
    reactants: &[EquationComponent],
    products: &[EquationComponent],
    coefficients: &UserCoefficients,
) -> Vec<(String, u64, u64)> {
    let left = side_totals(reactants, Side::Reactant, coefficients);
    let right = side_totals(products, Side::Product, coefficients);
    table_from(&left, &right)
}

/// Compares atoms (electrons excluded) and net charge of both sides.
/// Totals that exceed the integer range saturate.
pub fn evaluate(
    reactants: &[EquationComponent],
    products: &[EquationComponent],
    coefficients: &UserCoefficients,
) -> BalanceReport {
    let left = side_totals(reactants, Side::Reactant, coefficients);
    let right = side_totals(products, Side::Product, coefficients);
    let unbalanced = table_from(&left, &right)
        .into_iter()
        .filter(|(_, left, right)| left != right)
        .map(|(element, left, right)| UnbalancedElement {
            element,
            left,
            right,
        })
        .collect();
    let report = BalanceReport {
        unbalanced,
        charge_left: left.charge,
        charge_right: right.charge,
    };
    debug!("balance report {:?}", report);
    report
}

/// total molar mass of each side, g: conservation of mass for a balanced equation
pub fn mass_balance(
    reactants: &[EquationComponent],
    products: &[EquationComponent],
    coefficients: &UserCoefficients,
) -> (f64, f64) {
    let side_mass = |components: &[EquationComponent], side: Side| -> f64 {
        components
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let coefficient = coefficients.resolve(&TermId { side, index });
                coefficient as f64 * calculate_molar_mass(&c.formula).0
            })
            .sum()
    };
    (
        side_mass(reactants, Side::Reactant),
        side_mass(products, Side::Product),
    )
}
