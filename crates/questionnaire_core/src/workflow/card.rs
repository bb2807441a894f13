//! Questionnaire card aggregation.
//!
//! # Responsibility
//! - Recompute answered/total counters and the status theme from a
//!   question/answer list.
//! - Suppress change signals when a recomputation yields the cached value.
//!
//! # Invariants
//! - `questions_answered <= questions_to_answer == pairs.len()`.
//! - Recomputation is idempotent; identical input never raises a second
//!   change signal.

use crate::event::{EventSink, QuestionnaireEvent};
use crate::model::questionnaire::{
    QuestionAnswerPair, QuestionnaireOverview, QuestionnaireStatus,
};
use serde::{Deserialize, Serialize};

/// Base theme class every card footer carries.
pub const CARD_THEME_BASE: &str = "slds-card__footer";

/// Maps a progress status to its theme suffix.
///
/// Unknown or absent statuses fall back to the inverse theme.
pub fn theme_suffix(status: Option<QuestionnaireStatus>) -> &'static str {
    match status {
        Some(QuestionnaireStatus::InProgress) => " slds-theme_warning",
        Some(QuestionnaireStatus::Submitted) => " slds-theme_success",
        _ => " slds-theme_inverse",
    }
}

/// Full theme string for a card footer.
pub fn card_theme(status: Option<QuestionnaireStatus>) -> String {
    format!("{CARD_THEME_BASE}{}", theme_suffix(status))
}

/// Computed card projection: counters plus theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub questions_to_answer: usize,
    pub questions_answered: usize,
    pub theme: String,
}

/// Pure recomputation of the card projection from a question/answer list.
pub fn aggregate(
    pairs: &[QuestionAnswerPair],
    status: Option<QuestionnaireStatus>,
) -> CardSummary {
    CardSummary {
        questions_to_answer: pairs.len(),
        questions_answered: pairs
            .iter()
            .filter(|pair| pair.answer_id.is_some())
            .count(),
        theme: card_theme(status),
    }
}

/// One questionnaire card with a cached summary.
pub struct QuestionnaireCard<E: EventSink> {
    overview: QuestionnaireOverview,
    summary: Option<CardSummary>,
    sink: E,
}

impl<E: EventSink> QuestionnaireCard<E> {
    pub fn new(overview: QuestionnaireOverview, sink: E) -> Self {
        Self {
            overview,
            summary: None,
            sink,
        }
    }

    pub fn overview(&self) -> &QuestionnaireOverview {
        &self.overview
    }

    pub fn summary(&self) -> Option<&CardSummary> {
        self.summary.as_ref()
    }

    /// Replaces the underlying list and recomputes.
    ///
    /// Returns the fresh summary when it differs from the cached one, and
    /// `None` when nothing changed, so callers can skip redundant refreshes.
    pub fn on_data_changed(&mut self, overview: QuestionnaireOverview) -> Option<&CardSummary> {
        self.overview = overview;
        self.refresh()
    }

    /// Recomputes from the current overview without replacing it.
    pub fn refresh(&mut self) -> Option<&CardSummary> {
        let next = aggregate(&self.overview.pairs, self.overview.status);
        if self.summary.as_ref() == Some(&next) {
            return None;
        }
        self.summary = Some(next);
        self.summary.as_ref()
    }

    /// Raises the selection event for this card.
    pub fn open(&self) {
        self.sink.emit(QuestionnaireEvent::QuestionnaireSelected {
            record_id: self.overview.questionnaire_id,
            questionnaire: self.overview.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_covers_all_statuses() {
        assert_eq!(
            theme_suffix(Some(QuestionnaireStatus::InProgress)),
            " slds-theme_warning"
        );
        assert_eq!(
            theme_suffix(Some(QuestionnaireStatus::Submitted)),
            " slds-theme_success"
        );
        assert_eq!(
            theme_suffix(Some(QuestionnaireStatus::NotStarted)),
            " slds-theme_inverse"
        );
        assert_eq!(theme_suffix(None), " slds-theme_inverse");
    }

    #[test]
    fn answered_never_exceeds_total() {
        let pairs = vec![
            QuestionAnswerPair::answered(uuid::Uuid::new_v4(), uuid::Uuid::new_v4()),
            QuestionAnswerPair::unanswered(uuid::Uuid::new_v4()),
        ];
        let summary = aggregate(&pairs, None);
        assert_eq!(summary.questions_to_answer, pairs.len());
        assert!(summary.questions_answered <= summary.questions_to_answer);
    }
}
