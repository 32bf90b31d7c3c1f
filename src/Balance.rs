/// eng
/// Checking of student answers: coefficients typed by the student are applied to the terms of a
/// chemical equation, atoms and net charge of both sides are compared, and the result is turned
/// into a hint that follows the strategy of the topic (half-equations, full redox, ...).
/// Everything here is a pure function of its arguments.
/// ----------------------------------------------------------------
/// ru
/// Проверка ответов студента: коэффициенты, введённые студентом, применяются к веществам
/// уравнения, сравниваются атомы и суммарный заряд обеих частей, а результат превращается в
/// подсказку, которая следует стратегии темы (полуреакции, ОВР, ...).
/// ----------------------------------------------------------------
/// # Examples
/// ```
/// use ChemDrill::Balance::check::{check_answer, CheckOutcome};
/// use ChemDrill::Balance::evaluator::{TermId, UserCoefficients};
/// use ChemDrill::Balance::hints::{Language, Topic};
/// use ChemDrill::Questions::equation::{ChemicalEquation, EquationComponent};
/// let equation = ChemicalEquation::new(
///     vec![EquationComponent::new("H2", 2), EquationComponent::new("O2", 1)],
///     vec![EquationComponent::new("H2O", 2)],
/// );
/// let mut coefficients = UserCoefficients::new();
/// coefficients.edit(TermId::reactant(0), "2");
/// coefficients.edit(TermId::product(0), "2");
/// let outcome = check_answer(&equation, &coefficients, Topic::Basic, Language::English);
/// assert_eq!(outcome, CheckOutcome::Correct);
/// ```
pub mod check;
/// balanced answer: exact reference coefficients or a multiple of them
pub mod classifier;
/// Module to extract the net charge of a formula written as `SO4^2-`
///
///  # Examples
/// ```
/// use ChemDrill::Balance::charge::charge;
/// assert_eq!(charge("SO4^2-"), -2);
/// assert_eq!(charge("e^-"), -1);
/// ```
pub mod charge;
/// atom and charge totals of both sides, user coefficient resolution
pub mod evaluator;
/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///  # Examples
/// ```
/// use ChemDrill::Balance::formula::{calculate_molar_mass, parse_formula};
/// let atomic_composition = parse_formula("Fe2(SO4)3");
/// assert_eq!(atomic_composition["O"], 12);
/// let (molar_mass, _) = calculate_molar_mass("H2O");
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// ```
pub mod formula;
pub mod hints;
