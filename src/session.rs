//! # Drill Session
//!
//! ## Purpose
//! Owns everything that changes while a student works through a batch of equations: the batch
//! itself, the position in it, the coefficients typed so far, the state of the current question,
//! the last hint, the recent history and the score.
//!
//! ## Question states
//! ```text
//! Unanswered --check--> Correct | Incorrect
//! Incorrect  --edit---> Unanswered (hint cleared)
//! Unanswered | Incorrect --reveal--> Revealed
//! ```
//! `Correct` and `Revealed` are terminal; `next_question` starts the next equation as
//! `Unanswered` with empty coefficients.
//!
//! ## Usage Pattern
//! ```rust
//! use ChemDrill::session::{DrillSession, QuestionState};
//! use ChemDrill::Balance::evaluator::TermId;
//! use ChemDrill::Balance::hints::{Language, Topic};
//! use ChemDrill::Questions::source::BuiltinSource;
//!
//! let mut session = DrillSession::new(Topic::Basic, Language::English);
//! session.fetch(&BuiltinSource, 3);
//! assert_eq!(session.state(), QuestionState::Unanswered);
//! assert!(!session.on_coefficient_edit(TermId::reactant(0), "02"));
//! let answer = session.reveal_answer().unwrap();
//! assert!(!answer.is_empty());
//! assert_eq!(session.state(), QuestionState::Revealed);
//! ```

use crate::Balance::check::{CheckOutcome, check_answer, reveal_answer};
use crate::Balance::evaluator::{BalanceReport, TermId, UserCoefficients, evaluate};
use crate::Balance::hints::{Language, Topic};
use crate::Questions::equation::ChemicalEquation;
use crate::Questions::history::RecentHistory;
use crate::Questions::source::{QuestionBatch, QuestionRequest, QuestionSource, fetch_or_fallback};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionState {
    Unanswered,
    Correct,
    Incorrect,
    Revealed,
}

impl QuestionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QuestionState::Correct | QuestionState::Revealed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// questions answered correctly
    pub correct: usize,
    /// checks made, correct or not
    pub attempted: usize,
    /// questions whose answer was revealed
    pub revealed: usize,
}

#[derive(Debug, Clone)]
pub struct DrillSession {
    topic: Topic,
    language: Language,
    batch: Vec<ChemicalEquation>,
    index: usize,
    coefficients: UserCoefficients,
    state: QuestionState,
    hint: Option<String>,
    history: RecentHistory,
    offline: bool,
    score: Score,
}

impl DrillSession {
    pub fn new(topic: Topic, language: Language) -> Self {
        Self {
            topic,
            language,
            batch: Vec::new(),
            index: 0,
            coefficients: UserCoefficients::new(),
            state: QuestionState::Unanswered,
            hint: None,
            history: RecentHistory::new(),
            offline: false,
            score: Score::default(),
        }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// The next batch is requested for the new topic; the current question stays.
    pub fn set_topic(&mut self, topic: Topic) {
        self.topic = topic;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// request for `count` equations of the session topic, excluding recent ones
    pub fn request(&self, count: usize) -> QuestionRequest {
        QuestionRequest::new(count, self.topic, self.language).with_recent(self.history.signatures())
    }

    /// Fetches a batch from the source (built-in equations on failure) and starts it.
    pub fn fetch<S: QuestionSource>(&mut self, source: &S, count: usize) {
        let batch = fetch_or_fallback(source, &self.request(count));
        self.load_batch(batch);
    }

    /// Replaces the batch and starts its first equation.
    pub fn load_batch(&mut self, batch: QuestionBatch) {
        info!(
            "loaded {} equations{}",
            batch.equations.len(),
            if batch.offline { " (offline)" } else { "" }
        );
        self.batch = batch.equations;
        self.offline = batch.offline;
        self.index = 0;
        self.start_question();
    }

    fn start_question(&mut self) {
        self.coefficients.clear();
        self.state = QuestionState::Unanswered;
        self.hint = None;
        if let Some(equation) = self.batch.get(self.index) {
            debug!("question {}: {}", self.index + 1, equation);
            self.history.record(equation);
        }
    }

    pub fn current(&self) -> Option<&ChemicalEquation> {
        self.batch.get(self.index)
    }

    /// 1-based position of the current question and the batch size
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.batch.len())
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.batch.len()
    }

    pub fn state(&self) -> QuestionState {
        self.state
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn coefficients(&self) -> &UserCoefficients {
        &self.coefficients
    }

    pub fn history(&self) -> &RecentHistory {
        &self.history
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Applies a coefficient typed by the student. Returns false and changes nothing when the text
    /// is not empty or a positive integer without leading zeros, the term does not exist, or the
    /// question is already finished. Editing after a wrong answer makes the question unanswered.
    pub fn on_coefficient_edit(&mut self, term: TermId, raw: &str) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        let Some(equation) = self.batch.get(self.index) else {
            return false;
        };
        if equation.component(term).is_none() {
            return false;
        }
        if !self.coefficients.edit(term, raw) {
            debug!("rejected coefficient '{}' for {}", raw, term);
            return false;
        }
        if self.state == QuestionState::Incorrect {
            self.state = QuestionState::Unanswered;
            self.hint = None;
        }
        true
    }

    /// Checks the current coefficients. `None` when there is no question or it is finished.
    pub fn check_answer(&mut self) -> Option<CheckOutcome> {
        if self.state.is_terminal() {
            return None;
        }
        let equation = self.batch.get(self.index)?;
        let outcome = check_answer(equation, &self.coefficients, self.topic, self.language);
        self.score.attempted += 1;
        match &outcome {
            CheckOutcome::Correct => {
                info!("correct answer for {}", equation);
                self.state = QuestionState::Correct;
                self.score.correct += 1;
                self.hint = None;
            }
            CheckOutcome::Incorrect(hint) => {
                debug!("incorrect answer for {}: {}", equation, hint);
                self.state = QuestionState::Incorrect;
                self.hint = Some(hint.clone());
            }
        }
        Some(outcome)
    }

    /// Reference coefficients of the current question. They replace the typed ones. Revealing twice
    /// gives the same answer; a correctly answered question is not revealed.
    pub fn reveal_answer(&mut self) -> Option<Vec<(TermId, u32)>> {
        if self.state == QuestionState::Correct {
            return None;
        }
        let equation = self.batch.get(self.index)?;
        let answer = reveal_answer(equation);
        if self.state != QuestionState::Revealed {
            info!("answer revealed for {}", equation);
            self.score.revealed += 1;
            self.state = QuestionState::Revealed;
            self.hint = None;
            self.coefficients = answer
                .iter()
                .map(|(term, coefficient)| (*term, coefficient.to_string()))
                .collect();
        }
        Some(answer)
    }

    /// Moves to the next equation of the batch; false when the batch is used up.
    pub fn next_question(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        self.start_question();
        true
    }

    /// unbalanced elements and charges for the current coefficients
    pub fn report(&self) -> Option<BalanceReport> {
        self.current()
            .map(|eq| evaluate(&eq.reactants, &eq.products, &self.coefficients))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Questions::equation::EquationComponent;
    use crate::Questions::history::signature;
    use crate::Questions::source::BuiltinSource;

    fn water() -> ChemicalEquation {
        ChemicalEquation::new(
            vec![EquationComponent::new("H2", 2), EquationComponent::new("O2", 1)],
            vec![EquationComponent::new("H2O", 2)],
        )
        .with_topic(Topic::Basic)
    }

    fn ammonia() -> ChemicalEquation {
        ChemicalEquation::new(
            vec![EquationComponent::new("N2", 1), EquationComponent::new("H2", 3)],
            vec![EquationComponent::new("NH3", 2)],
        )
        .with_topic(Topic::Basic)
    }

    fn session() -> DrillSession {
        let mut session = DrillSession::new(Topic::Basic, Language::English);
        session.load_batch(QuestionBatch {
            equations: vec![water(), ammonia()],
            offline: false,
        });
        session
    }

    #[test]
    fn test_correct_answer_is_terminal() {
        let mut session = session();
        assert!(session.on_coefficient_edit(TermId::reactant(0), "2"));
        assert!(session.on_coefficient_edit(TermId::product(0), "2"));
        assert_eq!(session.check_answer(), Some(CheckOutcome::Correct));
        assert_eq!(session.state(), QuestionState::Correct);
        assert!(!session.on_coefficient_edit(TermId::reactant(0), "4"));
        assert_eq!(session.check_answer(), None);
        assert_eq!(session.reveal_answer(), None);
        assert_eq!(
            session.score(),
            Score {
                correct: 1,
                attempted: 1,
                revealed: 0
            }
        );
    }

    #[test]
    fn test_edit_after_wrong_answer_clears_hint() {
        let mut session = session();
        let outcome = session.check_answer().unwrap();
        assert!(!outcome.is_correct());
        assert_eq!(session.state(), QuestionState::Incorrect);
        assert!(session.hint().unwrap().contains('O'));
        // rejected input keeps the state
        assert!(!session.on_coefficient_edit(TermId::product(0), "02"));
        assert_eq!(session.state(), QuestionState::Incorrect);
        assert!(session.on_coefficient_edit(TermId::product(0), "2"));
        assert_eq!(session.state(), QuestionState::Unanswered);
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_unknown_term_is_rejected() {
        let mut session = session();
        assert!(!session.on_coefficient_edit(TermId::product(1), "2"));
        assert!(!session.on_coefficient_edit(TermId::reactant(2), "2"));
        assert!(session.coefficients().is_empty());
    }

    #[test]
    fn test_reveal_fills_reference_coefficients() {
        let mut session = session();
        session.check_answer();
        let answer = session.reveal_answer().unwrap();
        assert_eq!(
            answer,
            vec![
                (TermId::reactant(0), 2),
                (TermId::reactant(1), 1),
                (TermId::product(0), 2)
            ]
        );
        assert_eq!(session.state(), QuestionState::Revealed);
        assert_eq!(session.coefficients().get(&TermId::reactant(0)), Some("2"));
        assert!(session.report().unwrap().is_balanced());
        // revealing again changes nothing
        assert_eq!(session.reveal_answer(), Some(answer));
        assert_eq!(session.score().revealed, 1);
        assert!(!session.on_coefficient_edit(TermId::reactant(0), "3"));
    }

    #[test]
    fn test_next_question_resets_state() {
        let mut session = session();
        session.on_coefficient_edit(TermId::reactant(0), "5");
        session.check_answer();
        assert!(session.next_question());
        assert_eq!(session.position(), (2, 2));
        assert_eq!(session.state(), QuestionState::Unanswered);
        assert!(session.coefficients().is_empty());
        assert_eq!(session.hint(), None);
        assert!(!session.next_question());
        assert_eq!(
            session.history().signatures(),
            vec![signature(&water()), signature(&ammonia())]
        );
    }

    #[test]
    fn test_empty_session_does_nothing() {
        let mut session = DrillSession::new(Topic::Redox, Language::Russian);
        assert!(session.current().is_none());
        assert!(!session.on_coefficient_edit(TermId::reactant(0), "1"));
        assert_eq!(session.check_answer(), None);
        assert_eq!(session.reveal_answer(), None);
        assert!(!session.next_question());
    }

    #[test]
    fn test_fetch_avoids_served_equations() {
        let mut session = DrillSession::new(Topic::Combustion, Language::English);
        session.fetch(&BuiltinSource, 2);
        assert!(!session.is_offline());
        let first: Vec<String> = session.batch.iter().map(signature).collect();
        session.next_question();
        session.fetch(&BuiltinSource, 2);
        let second: Vec<String> = session.batch.iter().map(signature).collect();
        assert!(second.iter().all(|s| !first.contains(s)));
        assert!(session.request(1).recent.len() >= 3);
    }

    #[test]
    fn test_offline_flag_follows_batch() {
        let mut session = session();
        session.load_batch(QuestionBatch {
            equations: vec![ammonia()],
            offline: true,
        });
        assert!(session.is_offline());
        assert_eq!(session.position(), (1, 1));
    }
}
