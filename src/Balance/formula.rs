//! Atomic composition and molar mass of a chemical formula
use log::trace;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// symbol of the free electron pseudo-element, as in `e^-`
pub const ELECTRON: &str = "e";

// Define a struct to hold element data
pub struct Element {
    pub symbol: &'static str,
    pub atomic_mass: f64,
}

const fn el(symbol: &'static str, atomic_mass: f64) -> Element {
    Element {
        symbol,
        atomic_mass,
    }
}

// elements that show up in school-level equations
const ELEMENTS: &[Element] = &[
    el("H", 1.008),
    el("He", 4.0026),
    el("Li", 6.94),
    el("Be", 9.0122),
    el("B", 10.81),
    el("C", 12.011),
    el("N", 14.007),
    el("O", 15.999),
    el("F", 18.998),
    el("Ne", 20.18),
    el("Na", 22.99),
    el("Mg", 24.305),
    el("Al", 26.982),
    el("Si", 28.085),
    el("P", 30.974),
    el("S", 32.06),
    el("Cl", 35.45),
    el("Ar", 39.948),
    el("K", 39.098),
    el("Ca", 40.078),
    el("Cr", 51.996),
    el("Mn", 54.938),
    el("Fe", 55.845),
    el("Co", 58.933),
    el("Ni", 58.693),
    el("Cu", 63.546),
    el("Zn", 65.38),
    el("Br", 79.904),
    el("Ag", 107.868),
    el("Sn", 118.71),
    el("I", 126.904),
    el("Ba", 137.327),
    el("Pt", 195.084),
    el("Au", 196.967),
    el("Hg", 200.592),
    el("Pb", 207.2),
];

// one token of the formula grammar: element (or electron) with count, opening bracket,
// closing bracket with multiplier. Anything else is skipped by the scanner.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<element>[A-Z][a-z]*|e)(?P<count>\d*)|(?P<open>\()|\)(?P<multiplier>\d*)")
        .expect("formula token pattern must compile")
});

type Frame = Vec<(String, usize)>;

/// part of the formula before the charge suffix: "SO4^2-" -> "SO4"
pub fn formula_body(formula: &str) -> &str {
    formula
        .split_once('^')
        .map_or(formula, |(body, _charge)| body)
}

// None when the digit run does not fit usize
fn stoichio(digits: &str) -> Option<usize> {
    if digits.is_empty() {
        Some(1)
    } else {
        digits.parse().ok()
    }
}

// counts saturate at usize::MAX; returns false when that happened
fn add_atoms(frame: &mut Frame, symbol: &str, count: usize) -> bool {
    match frame.iter_mut().find(|(s, _)| s == symbol) {
        Some((_, n)) => match n.checked_add(count) {
            Some(sum) => {
                *n = sum;
                true
            }
            None => {
                *n = usize::MAX;
                false
            }
        },
        None => {
            frame.push((symbol.to_string(), count));
            true
        }
    }
}

// (atoms, overflow): overflow is set when some count did not fit usize and was saturated
fn scan_formula(formula: &str) -> (Frame, bool) {
    let body: String = formula_body(formula)
        .chars()
        .filter(|c| *c != '.')
        .collect();
    let mut overflow = false;
    let mut stack: Vec<Frame> = vec![Vec::new()];
    for cap in TOKEN.captures_iter(&body) {
        if let Some(element) = cap.name("element") {
            let count = stoichio(cap.name("count").map_or("", |m| m.as_str()));
            overflow |= count.is_none();
            if let Some(top) = stack.last_mut() {
                overflow |= !add_atoms(top, element.as_str(), count.unwrap_or(usize::MAX));
            }
        } else if cap.name("open").is_some() {
            stack.push(Vec::new());
        } else if stack.len() > 1 {
            let multiplier = stoichio(cap.name("multiplier").map_or("", |m| m.as_str()));
            overflow |= multiplier.is_none();
            let multiplier = multiplier.unwrap_or(usize::MAX);
            let group = stack.pop().unwrap_or_default();
            if let Some(top) = stack.last_mut() {
                for (symbol, count) in group {
                    let scaled = count.checked_mul(multiplier);
                    overflow |= scaled.is_none();
                    overflow |= !add_atoms(top, &symbol, scaled.unwrap_or(usize::MAX));
                }
            }
        } else {
            trace!("unmatched ')' skipped in formula {}", formula);
        }
    }
    if stack.len() > 1 {
        trace!(
            "{} unclosed group(s) dropped in formula {}",
            stack.len() - 1,
            formula
        );
    }
    if overflow {
        trace!("atom counts saturated in formula {}", formula);
    }
    (stack.into_iter().next().unwrap_or_default(), overflow)
}

/// Parses a formula into (symbol, count) pairs in the order symbols are first met.
/// The free electron "e" is kept, the charge suffix is ignored, hydrate dots are removed.
/// Unmatched ")" is skipped; atoms of a group that is never closed are dropped.
/// Counts too large for `usize` saturate at `usize::MAX`.
pub fn parse_formula_ordered(formula: &str) -> Vec<(String, usize)> {
    scan_formula(formula).0
}

/// Same as [`parse_formula_ordered`], but `None` when any atom count does not fit `usize`
pub fn parse_formula_checked(formula: &str) -> Option<Vec<(String, usize)>> {
    let (atoms, overflow) = scan_formula(formula);
    (!overflow).then_some(atoms)
}

/// Function to parse a chemical formula and return a HashMap of elements and their counts
pub fn parse_formula(formula: &str) -> HashMap<String, usize> {
    parse_formula_ordered(formula).into_iter().collect()
}

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|e| e.symbol == symbol)
        .map(|e| e.atomic_mass)
}

// Function to calculate the molar mass of a substance given its chemical formula.
// Electrons and symbols missing from the table add nothing to the mass.
pub fn calculate_molar_mass(formula: &str) -> (f64, HashMap<String, usize>) {
    let counts = parse_formula(formula);
    let mut molar_mass = 0.0;
    for (element, count) in counts.iter() {
        if element == ELECTRON {
            continue;
        }
        match atomic_mass(element) {
            Some(mass) => molar_mass += mass * *count as f64,
            None => log::warn!("no atomic mass for element {} in {}", element, formula),
        }
    }
    (molar_mass, counts)
}
