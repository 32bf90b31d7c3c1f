use super::equation::{ChemicalEquation, EquationComponent};
use crate::Balance::charge::{charge, charge_checked};
use crate::Balance::classifier::common_divisor;
use crate::Balance::formula::{ELECTRON, parse_formula_checked, parse_formula_ordered};
use log::debug;
use nalgebra::{DMatrix, DVector};

/// name of the extra matrix row that carries the net charge
pub const CHARGE_ROW: &str = "charge";

/// Signed element composition matrix of the equation: one row per element (electrons excluded)
/// plus a last row for the charge, one column per term, reactants positive and products negative.
/// The reference coefficients balance the equation iff `matrix * coefficients == 0`.
pub fn create_elem_composition_matrix(equation: &ChemicalEquation) -> (DMatrix<f64>, Vec<String>) {
    let terms: Vec<(&EquationComponent, f64)> = equation
        .reactants
        .iter()
        .map(|c| (c, 1.0))
        .chain(equation.products.iter().map(|c| (c, -1.0)))
        .collect();
    let compositions: Vec<Vec<(String, usize)>> = terms
        .iter()
        .map(|(c, _)| parse_formula_ordered(&c.formula))
        .collect();
    let mut rows: Vec<String> = Vec::new();
    for composition in compositions.iter() {
        for (symbol, _) in composition {
            if symbol != ELECTRON && !rows.contains(symbol) {
                rows.push(symbol.clone());
            }
        }
    }
    rows.push(CHARGE_ROW.to_string());
    let mut matrix = DMatrix::zeros(rows.len(), terms.len());
    for (j, ((component, sign), composition)) in terms.iter().zip(compositions.iter()).enumerate() {
        for (symbol, count) in composition {
            if let Some(i) = rows.iter().position(|r| r == symbol) {
                matrix[(i, j)] += sign * *count as f64;
            }
        }
        matrix[(rows.len() - 1, j)] = sign * charge(&component.formula) as f64;
    }
    (matrix, rows)
}

/// Checks the equation invariant: both sides present, positive reference coefficients that
/// balance every element and the charge, no common divisor greater than 1,
/// atom counts and charges that fit their integer types.
pub fn validate_equation(equation: &ChemicalEquation) -> Result<(), String> {
    if equation.reactants.is_empty() || equation.products.is_empty() {
        return Err(format!("equation '{}' needs reactants and products", equation));
    }
    let oversized = |c: &EquationComponent| {
        parse_formula_checked(&c.formula).is_none() || charge_checked(&c.formula).is_none()
    };
    if let Some((_, c)) = equation.terms().find(|(_, c)| oversized(*c)) {
        return Err(format!(
            "formula '{}' in '{}' has a count or charge that is too large",
            c.formula, equation
        ));
    }
    let coefficients: Vec<u32> = equation.terms().map(|(_, c)| c.coefficient).collect();
    if coefficients.contains(&0) {
        return Err(format!("equation '{}' has a zero coefficient", equation));
    }
    let (matrix, rows) = create_elem_composition_matrix(equation);
    let c = DVector::from_iterator(coefficients.len(), coefficients.iter().map(|&c| c as f64));
    let residual = &matrix * c;
    debug!("residual of {}: {:?}", equation, residual.as_slice());
    if let Some(i) = residual.iter().position(|r| r.abs() > 1e-9) {
        return Err(format!(
            "equation '{}' is not balanced in {} (difference {})",
            equation, rows[i], residual[i]
        ));
    }
    let divisor = common_divisor(&coefficients);
    if divisor > 1 {
        return Err(format!(
            "coefficients of '{}' share the factor {}",
            equation, divisor
        ));
    }
    Ok(())
}
