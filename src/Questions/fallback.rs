//! Built-in question bank, served when the question service is unreachable.
use super::equation::{ChemicalEquation, Difficulty, EquationComponent};
use crate::Balance::hints::Topic;

// (formula, name, reference coefficient)
type Term = (&'static str, &'static str, u32);

fn equation(
    topic: Topic,
    difficulty: Difficulty,
    reactants: &[Term],
    products: &[Term],
) -> ChemicalEquation {
    let components = |terms: &[Term]| {
        terms
            .iter()
            .map(|(formula, name, coefficient)| EquationComponent::named(formula, name, *coefficient))
            .collect()
    };
    ChemicalEquation::new(components(reactants), components(products))
        .with_topic(topic)
        .with_difficulty(difficulty)
}

/// every built-in equation, grouped by topic in `Topic::ALL` order
pub fn builtin_bank() -> Vec<ChemicalEquation> {
    use Difficulty::{Easy, Hard, Medium};
    use Topic::{AcidBase, Basic, Combustion, HalfEquation, Precipitation, Redox};
    vec![
        equation(
            Basic,
            Easy,
            &[("H2", "hydrogen", 2), ("O2", "oxygen", 1)],
            &[("H2O", "water", 2)],
        ),
        equation(
            Basic,
            Easy,
            &[("N2", "nitrogen", 1), ("H2", "hydrogen", 3)],
            &[("NH3", "ammonia", 2)],
        ),
        equation(
            Basic,
            Easy,
            &[("Na", "sodium", 2), ("Cl2", "chlorine", 1)],
            &[("NaCl", "sodium chloride", 2)],
        ),
        equation(
            Basic,
            Medium,
            &[("KClO3", "potassium chlorate", 2)],
            &[("KCl", "potassium chloride", 2), ("O2", "oxygen", 3)],
        ),
        equation(
            Basic,
            Hard,
            &[("Fe2O3", "iron(III) oxide", 1), ("CO", "carbon monoxide", 3)],
            &[("Fe", "iron", 2), ("CO2", "carbon dioxide", 3)],
        ),
        equation(
            Combustion,
            Easy,
            &[("CH4", "methane", 1), ("O2", "oxygen", 2)],
            &[("CO2", "carbon dioxide", 1), ("H2O", "water", 2)],
        ),
        equation(
            Combustion,
            Medium,
            &[("C3H8", "propane", 1), ("O2", "oxygen", 5)],
            &[("CO2", "carbon dioxide", 3), ("H2O", "water", 4)],
        ),
        equation(
            Combustion,
            Hard,
            &[("C2H6", "ethane", 2), ("O2", "oxygen", 7)],
            &[("CO2", "carbon dioxide", 4), ("H2O", "water", 6)],
        ),
        equation(
            Combustion,
            Hard,
            &[("C6H12O6", "glucose", 1), ("O2", "oxygen", 6)],
            &[("CO2", "carbon dioxide", 6), ("H2O", "water", 6)],
        ),
        equation(
            Precipitation,
            Easy,
            &[("Ag^+", "silver ion", 1), ("Cl^-", "chloride ion", 1)],
            &[("AgCl", "silver chloride", 1)],
        ),
        equation(
            Precipitation,
            Easy,
            &[("Ba^2+", "barium ion", 1), ("SO4^2-", "sulfate ion", 1)],
            &[("BaSO4", "barium sulfate", 1)],
        ),
        equation(
            Precipitation,
            Medium,
            &[("Pb(NO3)2", "lead(II) nitrate", 1), ("KI", "potassium iodide", 2)],
            &[("PbI2", "lead(II) iodide", 1), ("KNO3", "potassium nitrate", 2)],
        ),
        equation(
            Precipitation,
            Hard,
            &[("Ca^2+", "calcium ion", 3), ("PO4^3-", "phosphate ion", 2)],
            &[("Ca3(PO4)2", "calcium phosphate", 1)],
        ),
        equation(
            AcidBase,
            Easy,
            &[("HCl", "hydrochloric acid", 1), ("NaOH", "sodium hydroxide", 1)],
            &[("NaCl", "sodium chloride", 1), ("H2O", "water", 1)],
        ),
        equation(
            AcidBase,
            Easy,
            &[("H^+", "hydrogen ion", 1), ("OH^-", "hydroxide ion", 1)],
            &[("H2O", "water", 1)],
        ),
        equation(
            AcidBase,
            Medium,
            &[("H2SO4", "sulfuric acid", 1), ("NaOH", "sodium hydroxide", 2)],
            &[("Na2SO4", "sodium sulfate", 1), ("H2O", "water", 2)],
        ),
        equation(
            AcidBase,
            Medium,
            &[("HNO3", "nitric acid", 2), ("Ca(OH)2", "calcium hydroxide", 1)],
            &[("Ca(NO3)2", "calcium nitrate", 1), ("H2O", "water", 2)],
        ),
        equation(
            HalfEquation,
            Easy,
            &[("Fe^2+", "iron(II) ion", 1)],
            &[("Fe^3+", "iron(III) ion", 1), ("e^-", "electron", 1)],
        ),
        equation(
            HalfEquation,
            Easy,
            &[("Cl2", "chlorine", 1), ("e^-", "electron", 2)],
            &[("Cl^-", "chloride ion", 2)],
        ),
        equation(
            HalfEquation,
            Hard,
            &[
                ("MnO4^-", "permanganate ion", 1),
                ("H^+", "hydrogen ion", 8),
                ("e^-", "electron", 5),
            ],
            &[("Mn^2+", "manganese(II) ion", 1), ("H2O", "water", 4)],
        ),
        equation(
            HalfEquation,
            Hard,
            &[
                ("Cr2O7^2-", "dichromate ion", 1),
                ("H^+", "hydrogen ion", 14),
                ("e^-", "electron", 6),
            ],
            &[("Cr^3+", "chromium(III) ion", 2), ("H2O", "water", 7)],
        ),
        equation(
            Redox,
            Easy,
            &[("Cu", "copper", 1), ("Ag^+", "silver ion", 2)],
            &[("Cu^2+", "copper(II) ion", 1), ("Ag", "silver", 2)],
        ),
        equation(
            Redox,
            Medium,
            &[("Zn", "zinc", 1), ("H^+", "hydrogen ion", 2)],
            &[("Zn^2+", "zinc ion", 1), ("H2", "hydrogen", 1)],
        ),
        equation(
            Redox,
            Hard,
            &[
                ("MnO4^-", "permanganate ion", 2),
                ("H^+", "hydrogen ion", 16),
                ("Cl^-", "chloride ion", 10),
            ],
            &[
                ("Mn^2+", "manganese(II) ion", 2),
                ("Cl2", "chlorine", 5),
                ("H2O", "water", 8),
            ],
        ),
        equation(
            Redox,
            Hard,
            &[
                ("Cr2O7^2-", "dichromate ion", 1),
                ("H^+", "hydrogen ion", 14),
                ("Fe^2+", "iron(II) ion", 6),
            ],
            &[
                ("Cr^3+", "chromium(III) ion", 2),
                ("Fe^3+", "iron(III) ion", 6),
                ("H2O", "water", 7),
            ],
        ),
    ]
}

/// built-in equations of one topic
pub fn fallback_for(topic: Topic) -> Vec<ChemicalEquation> {
    builtin_bank()
        .into_iter()
        .filter(|eq| eq.topic == Some(topic))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Questions::validate::validate_equation;

    #[test]
    fn test_every_topic_is_covered() {
        for topic in Topic::ALL {
            assert!(
                fallback_for(topic).len() >= 3,
                "topic {:?} needs at least three built-in equations",
                topic
            );
        }
    }

    #[test]
    fn test_builtin_bank_is_valid() {
        for equation in builtin_bank() {
            assert_eq!(validate_equation(&equation), Ok(()), "{}", equation);
        }
    }
}
