/// eng
/// Drill questions: balanced chemical equations with reference coefficients, where they come from
/// (question service, bank file, built-in bank), how they are validated, and which ones were served
/// recently.
/// ----------------------------------------------------------------
/// ru
/// Вопросы тренажёра: уравненные химические реакции с эталонными коэффициентами, их источники
/// (сервис вопросов, файл с банком вопросов, встроенный банк), проверка корректности и история
/// недавно заданных уравнений.
/// ----------------------------------------------------------------
/// # Examples
/// ```
/// use ChemDrill::Questions::equation::{ChemicalEquation, EquationComponent};
/// let equation = ChemicalEquation::new(
///     vec![EquationComponent::new("Ba^2+", 1), EquationComponent::new("SO4^2-", 1)],
///     vec![EquationComponent::new("BaSO4", 1)],
/// );
/// assert_eq!(equation.to_string(), "Ba^2+ + SO4^2- -> BaSO4");
/// assert_eq!(equation.pretty(), "Ba²⁺ + SO₄²⁻ → BaSO₄");
/// ```
pub mod equation;
/// built-in equations for every topic
pub mod fallback;
/// capped history of served equations
pub mod history;
/// Module with question providers: remote service, bank file, built-in bank.
///
///  # Examples
/// ```
/// use ChemDrill::Balance::hints::{Language, Topic};
/// use ChemDrill::Questions::source::{BuiltinSource, QuestionRequest, fetch_or_fallback};
/// let request = QuestionRequest::new(3, Topic::HalfEquation, Language::English);
/// let batch = fetch_or_fallback(&BuiltinSource, &request);
/// assert!(!batch.offline);
/// assert_eq!(batch.equations.len(), 3);
/// ```
pub mod source;
/// element composition matrix and the balance invariant of reference equations
pub mod validate;
