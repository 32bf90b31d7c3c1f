use super::equation::ChemicalEquation;
use std::collections::VecDeque;

/// default number of remembered equations
pub const HISTORY_CAPACITY: usize = 30;

/// sorted reactant formulas joined with '+': "H2+O2"
pub fn signature(equation: &ChemicalEquation) -> String {
    let mut formulas: Vec<&str> = equation
        .reactants
        .iter()
        .map(|c| c.formula.as_str())
        .collect();
    formulas.sort_unstable();
    formulas.join("+")
}

/// Signatures of recently served equations, oldest first. Never holds more than `capacity`
/// entries; pushing a known signature moves it to the back instead of duplicating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl RecentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// capacity is at least 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, signature: String) {
        if let Some(position) = self.entries.iter().position(|s| *s == signature) {
            self.entries.remove(position);
        }
        self.entries.push_back(signature);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn record(&mut self, equation: &ChemicalEquation) {
        self.push(signature(equation));
    }

    pub fn contains(&self, equation: &ChemicalEquation) -> bool {
        let signature = signature(equation);
        self.entries.iter().any(|s| *s == signature)
    }

    pub fn signatures(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Questions::equation::EquationComponent;

    #[test]
    fn test_signature_is_sorted() {
        let eq = ChemicalEquation::new(
            vec![EquationComponent::new("O2", 1), EquationComponent::new("H2", 2)],
            vec![EquationComponent::new("H2O", 2)],
        );
        assert_eq!(signature(&eq), "H2+O2");
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut history = RecentHistory::new();
        for i in 0..45 {
            history.push(format!("X{}", i));
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        let signatures = history.signatures();
        assert_eq!(signatures.first().map(String::as_str), Some("X15"));
        assert_eq!(signatures.last().map(String::as_str), Some("X44"));
    }

    #[test]
    fn test_repeated_signature_moves_to_back() {
        let mut history = RecentHistory::with_capacity(3);
        history.push("A".to_string());
        history.push("B".to_string());
        history.push("A".to_string());
        assert_eq!(history.signatures(), vec!["B", "A"]);
        history.push("C".to_string());
        history.push("D".to_string());
        assert_eq!(history.signatures(), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut history = RecentHistory::with_capacity(0);
        history.push("A".to_string());
        history.push("B".to_string());
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.signatures(), vec!["B"]);
    }
}
