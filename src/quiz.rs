//! Trivia flash-card deck
//!
//! Built from the quiz proxy's JSON. Each card can be flipped to show the
//! answer and answered once.

use serde::{Deserialize, Serialize};

use crate::catalog::InstrumentId;
use crate::error::Result;

/// One question as delivered by the quiz service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: Option<String>,
}

/// Quiz service payload
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct QuizPayload {
    pub success: bool,
    pub questions: Vec<QuizQuestion>,
}

/// Result of answering the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The card was already answered, or the deck is empty
    Ignored,
}

#[derive(Debug, Clone)]
pub struct QuizDeck {
    pub instrument: InstrumentId,
    cards: Vec<QuizQuestion>,
    answers: Vec<Option<bool>>,
    current: usize,
    flipped: bool,
}

impl QuizDeck {
    pub fn new(instrument: InstrumentId, cards: Vec<QuizQuestion>) -> Self {
        // Cards without a question text can't be shown
        let cards: Vec<_> = cards
            .into_iter()
            .filter(|c| !c.question.trim().is_empty())
            .collect();
        Self {
            instrument,
            answers: vec![None; cards.len()],
            cards,
            current: 0,
            flipped: false,
        }
    }

    /// Build a deck from the raw quiz proxy body
    pub fn from_json(instrument: InstrumentId, json: &str) -> Result<Self> {
        let payload: QuizPayload = serde_json::from_str(json)?;
        if !payload.success {
            log::warn!("Quiz payload for {} reported failure", instrument.as_str());
        }
        Ok(Self::new(instrument, payload.questions))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.cards.get(self.current)
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Turn the current card over (or back)
    pub fn flip(&mut self) {
        if !self.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Answer the current card. Matching ignores case and surrounding space.
    pub fn answer(&mut self, choice: &str) -> AnswerOutcome {
        let Some(card) = self.cards.get(self.current) else {
            return AnswerOutcome::Ignored;
        };
        if self.answers[self.current].is_some() {
            return AnswerOutcome::Ignored;
        }

        let correct = choice.trim().eq_ignore_ascii_case(card.answer.trim());
        self.answers[self.current] = Some(correct);
        self.flipped = true;
        if correct {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Move to the next card. Returns false at the end of the deck.
    pub fn next_card(&mut self) -> bool {
        if self.current + 1 >= self.cards.len() {
            return false;
        }
        self.current += 1;
        self.flipped = false;
        true
    }

    pub fn previous_card(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.flipped = false;
        true
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| **a == Some(true)).count()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_finished(&self) -> bool {
        !self.is_empty() && self.answered_count() == self.len()
    }

    pub fn restart(&mut self) {
        self.answers.iter_mut().for_each(|a| *a = None);
        self.current = 0;
        self.flipped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "success": true,
        "questions": [
            { "question": "What does ASTER map?", "options": ["Elevation", "Ozone"], "answer": "Elevation" },
            { "question": "Which agency provided ASTER?", "answer": "METI", "explanation": "Japan" },
            { "options": ["orphan"] }
        ]
    }"#;

    #[test]
    fn test_parse_skips_cards_without_question() {
        let deck = QuizDeck::from_json(InstrumentId::Aster, PAYLOAD).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.current().unwrap().options.len(), 2);
    }

    #[test]
    fn test_answer_once_per_card() {
        let mut deck = QuizDeck::from_json(InstrumentId::Aster, PAYLOAD).unwrap();
        assert_eq!(deck.answer(" elevation "), AnswerOutcome::Correct);
        assert!(deck.is_flipped());
        assert_eq!(deck.answer("Ozone"), AnswerOutcome::Ignored);

        assert!(deck.next_card());
        assert!(!deck.is_flipped());
        assert_eq!(deck.answer("NASA"), AnswerOutcome::Incorrect);
        assert!(!deck.next_card());

        assert!(deck.is_finished());
        assert_eq!(deck.correct_count(), 1);
        assert_eq!(deck.answered_count(), 2);
    }

    #[test]
    fn test_restart_clears_progress() {
        let mut deck = QuizDeck::from_json(InstrumentId::Aster, PAYLOAD).unwrap();
        deck.answer("Elevation");
        deck.next_card();
        deck.restart();
        assert_eq!(deck.position(), 0);
        assert_eq!(deck.answered_count(), 0);
        assert!(!deck.is_finished());
    }

    #[test]
    fn test_empty_deck_is_inert() {
        let mut deck = QuizDeck::from_json(InstrumentId::Misr, "{}").unwrap();
        assert!(deck.is_empty());
        deck.flip();
        assert!(!deck.is_flipped());
        assert_eq!(deck.answer("anything"), AnswerOutcome::Ignored);
        assert!(!deck.next_card());
        assert!(!deck.previous_card());
        assert!(!deck.is_finished());
    }

    #[test]
    fn test_flip_toggles() {
        let mut deck = QuizDeck::from_json(InstrumentId::Aster, PAYLOAD).unwrap();
        deck.flip();
        assert!(deck.is_flipped());
        deck.flip();
        assert!(!deck.is_flipped());
    }
}
