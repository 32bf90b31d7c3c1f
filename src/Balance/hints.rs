//! Topic-aware hints for an unbalanced answer.
//!
//! Priority: unbalanced atoms -> charge mismatch with atoms balanced -> balanced but not
//! minimal. Each topic maps to a [`HintPolicy`], a pair of pure functions.
use super::charge::signed;
use super::classifier::MatchKind;
use super::evaluator::{BalanceReport, UnbalancedElement};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// synthesis, decomposition, single and double replacement
    #[default]
    Basic,
    Combustion,
    /// net ionic equations of precipitation
    Precipitation,
    AcidBase,
    /// redox half-equations with explicit electrons
    HalfEquation,
    /// full redox equations in acidic solution
    Redox,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Basic,
        Topic::Combustion,
        Topic::Precipitation,
        Topic::AcidBase,
        Topic::HalfEquation,
        Topic::Redox,
    ];

    pub fn title(&self, language: Language) -> &'static str {
        match (self, language) {
            (Topic::Basic, Language::English) => "Basic reactions",
            (Topic::Basic, Language::Russian) => "Основные типы реакций",
            (Topic::Combustion, Language::English) => "Combustion",
            (Topic::Combustion, Language::Russian) => "Горение",
            (Topic::Precipitation, Language::English) => "Precipitation (net ionic)",
            (Topic::Precipitation, Language::Russian) => "Осаждение (сокращённые ионные)",
            (Topic::AcidBase, Language::English) => "Acids and bases",
            (Topic::AcidBase, Language::Russian) => "Кислоты и основания",
            (Topic::HalfEquation, Language::English) => "Redox half-equations",
            (Topic::HalfEquation, Language::Russian) => "Полуреакции",
            (Topic::Redox, Language::English) => "Full redox equations",
            (Topic::Redox, Language::Russian) => "Окислительно-восстановительные реакции",
        }
    }

    fn hint_policy(self) -> &'static HintPolicy {
        match self {
            Topic::HalfEquation => &HALF_EQUATION_POLICY,
            Topic::Redox => &REDOX_POLICY,
            Topic::Basic | Topic::Combustion | Topic::Precipitation | Topic::AcidBase => {
                &GENERAL_POLICY
            }
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title(Language::English))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl Language {
    /// picks the string for this language
    fn pick<'a>(self, english: &'a str, russian: &'a str) -> &'a str {
        match self {
            Language::English => english,
            Language::Russian => russian,
        }
    }
}

/// strategy of one topic
pub struct HintPolicy {
    /// extra note appended to the charge-mismatch message
    pub charge_note: fn(Language) -> Option<&'static str>,
    /// advice for the atom-mismatch message, `None` lets the parity fallback decide
    pub atom_advice: fn(&[UnbalancedElement], Language) -> Option<String>,
}

static HALF_EQUATION_POLICY: HintPolicy = HintPolicy {
    charge_note: half_equation_charge_note,
    atom_advice: half_equation_atom_advice,
};

static REDOX_POLICY: HintPolicy = HintPolicy {
    charge_note: redox_charge_note,
    atom_advice: redox_atom_advice,
};

static GENERAL_POLICY: HintPolicy = HintPolicy {
    charge_note: no_charge_note,
    atom_advice: general_atom_advice,
};

fn is_oxygen_or_hydrogen(element: &str) -> bool {
    element == "O" || element == "H"
}

fn first_non_oh(unbalanced: &[UnbalancedElement]) -> Option<&UnbalancedElement> {
    unbalanced
        .iter()
        .find(|u| !is_oxygen_or_hydrogen(&u.element))
}

fn is_unbalanced(unbalanced: &[UnbalancedElement], element: &str) -> bool {
    unbalanced.iter().any(|u| u.element == element)
}

fn half_equation_charge_note(language: Language) -> Option<&'static str> {
    Some(language.pick(
        "Balance electrons after atoms: add e⁻ to the more positive side.",
        "Уравнивайте электроны после атомов: добавьте e⁻ в более положительную сторону.",
    ))
}

fn redox_charge_note(language: Language) -> Option<&'static str> {
    Some(language.pick(
        "Add H⁺ to balance charge.",
        "Добавьте H⁺, чтобы уравнять заряд.",
    ))
}

fn no_charge_note(_language: Language) -> Option<&'static str> {
    None
}

fn half_equation_atom_advice(unbalanced: &[UnbalancedElement], language: Language) -> Option<String> {
    if let Some(u) = first_non_oh(unbalanced) {
        return Some(match language {
            Language::English => format!("Balance {} first.", u.element),
            Language::Russian => format!("Сначала уравняйте {}.", u.element),
        });
    }
    if is_unbalanced(unbalanced, "O") {
        return Some(
            language
                .pick(
                    "Adjust H₂O to fix oxygen.",
                    "Подберите H₂O, чтобы уравнять кислород.",
                )
                .to_string(),
        );
    }
    if is_unbalanced(unbalanced, "H") {
        return Some(
            language
                .pick(
                    "Adjust H⁺ to fix hydrogen.",
                    "Подберите H⁺, чтобы уравнять водород.",
                )
                .to_string(),
        );
    }
    None
}

fn redox_atom_advice(unbalanced: &[UnbalancedElement], language: Language) -> Option<String> {
    if let Some(u) = first_non_oh(unbalanced) {
        return Some(match language {
            Language::English => format!(
                "Method 1, step 1: balance {} and the other atoms except O and H.",
                u.element
            ),
            Language::Russian => format!(
                "Метод 1, шаг 1: уравняйте {} и другие атомы, кроме O и H.",
                u.element
            ),
        });
    }
    if is_unbalanced(unbalanced, "O") {
        return Some(
            language
                .pick(
                    "Method 1, step 2: add H₂O to balance oxygen.",
                    "Метод 1, шаг 2: добавьте H₂O, чтобы уравнять кислород.",
                )
                .to_string(),
        );
    }
    if is_unbalanced(unbalanced, "H") {
        return Some(
            language
                .pick(
                    "Method 1, step 3: check hydrogen and balance it with H⁺.",
                    "Метод 1, шаг 3: проверьте водород и уравняйте его с помощью H⁺.",
                )
                .to_string(),
        );
    }
    None
}

fn general_atom_advice(unbalanced: &[UnbalancedElement], language: Language) -> Option<String> {
    if let Some(u) = first_non_oh(unbalanced) {
        return Some(match language {
            Language::English => format!(
                "Balance metals and non-metals such as {} first.",
                u.element
            ),
            Language::Russian => format!(
                "Сначала уравняйте металлы и неметаллы, например {}.",
                u.element
            ),
        });
    }
    if is_unbalanced(unbalanced, "O") || is_unbalanced(unbalanced, "H") {
        return Some(
            language
                .pick(
                    "Balance H and O last.",
                    "Водород и кислород уравнивайте в последнюю очередь.",
                )
                .to_string(),
        );
    }
    None
}

/// First element whose counts differ in parity: advise doubling the odd side.
pub fn parity_advice(unbalanced: &[UnbalancedElement], language: Language) -> Option<String> {
    let u = unbalanced.iter().find(|u| u.left % 2 != u.right % 2)?;
    let (odd, left_side) = if u.left % 2 == 1 {
        (u.left, true)
    } else {
        (u.right, false)
    };
    Some(match language {
        Language::English => format!(
            "{} has an odd count ({}) on the {} side; try doubling that coefficient so both counts are even.",
            u.element,
            odd,
            if left_side { "left" } else { "right" }
        ),
        Language::Russian => format!(
            "У {} нечётное число атомов ({}) {}; попробуйте удвоить этот коэффициент, чтобы обе стороны стали чётными.",
            u.element,
            odd,
            if left_side { "слева" } else { "справа" }
        ),
    })
}

fn charge_mismatch_hint(report: &BalanceReport, topic: Topic, language: Language) -> String {
    let mut message = match language {
        Language::English => format!(
            "Atoms are balanced, but the charge is not: left side {}, right side {}.",
            signed(report.charge_left),
            signed(report.charge_right)
        ),
        Language::Russian => format!(
            "Атомы уравнены, но заряд нет: слева {}, справа {}.",
            signed(report.charge_left),
            signed(report.charge_right)
        ),
    };
    if let Some(note) = (topic.hint_policy().charge_note)(language) {
        message.push(' ');
        message.push_str(note);
    }
    message
}

fn atom_mismatch_hint(report: &BalanceReport, topic: Topic, language: Language) -> String {
    let (heading, left, right) = match language {
        Language::English => ("Unbalanced:", "left", "right"),
        Language::Russian => ("Не уравнены:", "слева", "справа"),
    };
    let listing = report
        .unbalanced
        .iter()
        .map(|u| format!("{} ({} {}, {} {})", u.element, left, u.left, right, u.right))
        .collect::<Vec<_>>()
        .join(", ");
    let advice = (topic.hint_policy().atom_advice)(&report.unbalanced, language)
        .or_else(|| parity_advice(&report.unbalanced, language));
    match advice {
        Some(advice) => format!("{} {}. {}", heading, listing, advice),
        None => format!("{} {}.", heading, listing),
    }
}

fn scaled_hint(language: Language) -> String {
    language
        .pick(
            "Balanced, but not in the simplest whole-number ratio. Divide every coefficient by their common factor.",
            "Уравнено, но коэффициенты не наименьшие целые. Разделите все коэффициенты на общий множитель.",
        )
        .to_string()
}

/// Hint for the current answer; `None` only for a balanced answer that matches the reference.
/// `verdict` is the classifier result and only matters when the report is balanced.
pub fn generate_hint(
    report: &BalanceReport,
    verdict: Option<MatchKind>,
    topic: Topic,
    language: Language,
) -> Option<String> {
    if !report.atoms_balanced() {
        return Some(atom_mismatch_hint(report, topic, language));
    }
    if !report.charge_balanced() {
        return Some(charge_mismatch_hint(report, topic, language));
    }
    match verdict {
        Some(MatchKind::Scaled) => Some(scaled_hint(language)),
        Some(MatchKind::Exact) | None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unbalanced(entries: &[(&str, u64, u64)]) -> Vec<UnbalancedElement> {
        entries
            .iter()
            .map(|(e, l, r)| UnbalancedElement {
                element: e.to_string(),
                left: *l,
                right: *r,
            })
            .collect()
    }

    fn report(entries: &[(&str, u64, u64)], charge_left: i64, charge_right: i64) -> BalanceReport {
        BalanceReport {
            unbalanced: unbalanced(entries),
            charge_left,
            charge_right,
        }
    }

    #[test]
    fn test_charge_tier_with_signs() {
        let r = report(&[], 2, 3);
        let hint = generate_hint(&r, None, Topic::Basic, Language::English).unwrap();
        assert_eq!(
            hint,
            "Atoms are balanced, but the charge is not: left side +2, right side +3."
        );
        let r = report(&[], -1, 0);
        let hint = generate_hint(&r, None, Topic::Precipitation, Language::English).unwrap();
        assert!(hint.contains("left side -1, right side 0"));
    }

    #[test]
    fn test_charge_tier_topic_notes() {
        let r = report(&[], 2, 3);
        let half = generate_hint(&r, None, Topic::HalfEquation, Language::English).unwrap();
        assert!(half.ends_with("Balance electrons after atoms: add e⁻ to the more positive side."));
        let redox = generate_hint(&r, None, Topic::Redox, Language::English).unwrap();
        assert!(redox.ends_with("Add H⁺ to balance charge."));
        let russian = generate_hint(&r, None, Topic::Redox, Language::Russian).unwrap();
        assert!(russian.starts_with("Атомы уравнены"));
        assert!(russian.contains("слева +2, справа +3"));
    }

    #[test]
    fn test_atom_tier_lists_every_element() {
        let r = report(&[("O", 2, 1), ("H", 4, 2)], 0, 0);
        let hint = generate_hint(&r, None, Topic::Basic, Language::English).unwrap();
        assert_eq!(
            hint,
            "Unbalanced: O (left 2, right 1), H (left 4, right 2). Balance H and O last."
        );
    }

    #[test]
    fn test_atom_tier_wins_over_charge_tier() {
        let r = report(&[("Fe", 1, 2)], 2, 6);
        let hint = generate_hint(&r, None, Topic::HalfEquation, Language::English).unwrap();
        assert!(hint.starts_with("Unbalanced: Fe (left 1, right 2)."));
        assert!(hint.ends_with("Balance Fe first."));
    }

    #[test]
    fn test_half_equation_priority() {
        let r = report(&[("O", 4, 1), ("Mn", 1, 2)], 0, 0);
        let hint = generate_hint(&r, None, Topic::HalfEquation, Language::English).unwrap();
        assert!(hint.ends_with("Balance Mn first."));
        let r = report(&[("H", 8, 2), ("O", 4, 1)], 0, 0);
        let hint = generate_hint(&r, None, Topic::HalfEquation, Language::English).unwrap();
        assert!(hint.ends_with("Adjust H₂O to fix oxygen."));
        let r = report(&[("H", 8, 2)], 0, 0);
        let hint = generate_hint(&r, None, Topic::HalfEquation, Language::English).unwrap();
        assert!(hint.ends_with("Adjust H⁺ to fix hydrogen."));
    }

    #[test]
    fn test_redox_method_one_steps() {
        let r = report(&[("H", 16, 2), ("Cl", 10, 2)], 0, 0);
        let hint = generate_hint(&r, None, Topic::Redox, Language::English).unwrap();
        assert!(hint.contains("Method 1, step 1: balance Cl"));
        let r = report(&[("O", 8, 1)], 0, 0);
        let hint = generate_hint(&r, None, Topic::Redox, Language::English).unwrap();
        assert!(hint.ends_with("Method 1, step 2: add H₂O to balance oxygen."));
        let r = report(&[("H", 16, 2)], 0, 0);
        let hint = generate_hint(&r, None, Topic::Redox, Language::Russian).unwrap();
        assert!(hint.starts_with("Не уравнены: H (слева 16, справа 2)."));
        assert!(hint.contains("шаг 3"));
    }

    #[test]
    fn test_general_prefers_non_oh() {
        let r = report(&[("H", 4, 2), ("C", 3, 1)], 0, 0);
        let hint = generate_hint(&r, None, Topic::Combustion, Language::English).unwrap();
        assert!(hint.ends_with("Balance metals and non-metals such as C first."));
    }

    #[test]
    fn test_parity_fallback() {
        let advice = parity_advice(&unbalanced(&[("O", 2, 1)]), Language::English).unwrap();
        assert_eq!(
            advice,
            "O has an odd count (1) on the right side; try doubling that coefficient so both counts are even."
        );
        let advice = parity_advice(&unbalanced(&[("N", 2, 4), ("Cl", 3, 2)]), Language::English)
            .unwrap();
        assert!(advice.starts_with("Cl has an odd count (3) on the left side"));
        assert_eq!(
            parity_advice(&unbalanced(&[("N", 2, 4)]), Language::English),
            None
        );
    }

    #[test]
    fn test_scaled_and_exact() {
        let r = report(&[], 0, 0);
        let hint = generate_hint(&r, Some(MatchKind::Scaled), Topic::Basic, Language::English);
        assert!(hint.unwrap().contains("simplest whole-number ratio"));
        assert_eq!(
            generate_hint(&r, Some(MatchKind::Exact), Topic::Basic, Language::English),
            None
        );
    }

    #[test]
    fn test_every_topic_has_a_policy() {
        let r = report(&[("O", 2, 1)], 0, 0);
        for topic in Topic::ALL {
            for language in [Language::English, Language::Russian] {
                let hint = generate_hint(&r, None, topic, language).unwrap();
                assert!(hint.contains("O ("));
                assert!(!topic.title(language).is_empty());
            }
        }
    }
}
