mod common;

use common::RecordingSink;
use questionnaire_core::{
    aggregate, card_theme, QuestionAnswerPair, QuestionnaireCard, QuestionnaireEvent,
    QuestionnaireOverview, QuestionnaireStatus,
};
use uuid::Uuid;

fn overview_with(
    pairs: Vec<QuestionAnswerPair>,
    status: Option<QuestionnaireStatus>,
) -> QuestionnaireOverview {
    QuestionnaireOverview {
        questionnaire_id: Uuid::new_v4(),
        return_id: None,
        name: "UAT Evaluation".to_string(),
        status,
        pairs,
    }
}

#[test]
fn counts_answered_and_total() {
    let q1 = Uuid::new_v4();
    let q2 = Uuid::new_v4();
    let q3 = Uuid::new_v4();
    let pairs = vec![
        QuestionAnswerPair::answered(q1, Uuid::new_v4()),
        QuestionAnswerPair::unanswered(q2),
        QuestionAnswerPair::answered(q3, Uuid::new_v4()),
    ];

    let summary = aggregate(&pairs, Some(QuestionnaireStatus::InProgress));
    assert_eq!(summary.questions_to_answer, 3);
    assert_eq!(summary.questions_answered, 2);
}

#[test]
fn empty_list_counts_zero() {
    let summary = aggregate(&[], None);
    assert_eq!(summary.questions_to_answer, 0);
    assert_eq!(summary.questions_answered, 0);
}

#[test]
fn status_maps_to_theme() {
    assert_eq!(
        card_theme(Some(QuestionnaireStatus::InProgress)),
        "slds-card__footer slds-theme_warning"
    );
    assert_eq!(
        card_theme(Some(QuestionnaireStatus::Submitted)),
        "slds-card__footer slds-theme_success"
    );
    assert_eq!(
        card_theme(Some(QuestionnaireStatus::NotStarted)),
        "slds-card__footer slds-theme_inverse"
    );
    assert_eq!(card_theme(None), "slds-card__footer slds-theme_inverse");
}

#[test]
fn unchanged_recompute_raises_no_second_signal() {
    let sink = RecordingSink::new();
    let overview = overview_with(
        vec![QuestionAnswerPair::unanswered(Uuid::new_v4())],
        Some(QuestionnaireStatus::InProgress),
    );
    let mut card = QuestionnaireCard::new(overview.clone(), &sink);

    let first = card.refresh().cloned();
    assert!(first.is_some());

    assert!(card.refresh().is_none());
    assert!(card.on_data_changed(overview).is_none());
    assert_eq!(card.summary().cloned(), first);
}

#[test]
fn changed_list_raises_fresh_summary() {
    let sink = RecordingSink::new();
    let question_id = Uuid::new_v4();
    let mut overview = overview_with(
        vec![QuestionAnswerPair::unanswered(question_id)],
        Some(QuestionnaireStatus::NotStarted),
    );
    let mut card = QuestionnaireCard::new(overview.clone(), &sink);
    card.refresh();

    overview.pairs[0] = QuestionAnswerPair::answered(question_id, Uuid::new_v4());
    overview.status = Some(QuestionnaireStatus::InProgress);

    let summary = card.on_data_changed(overview).expect("summary should change");
    assert_eq!(summary.questions_answered, 1);
    assert_eq!(summary.theme, "slds-card__footer slds-theme_warning");
}

#[test]
fn open_emits_selection_with_overview() {
    let sink = RecordingSink::new();
    let overview = overview_with(
        vec![QuestionAnswerPair::unanswered(Uuid::new_v4())],
        None,
    );
    let card = QuestionnaireCard::new(overview.clone(), &sink);

    card.open();
    assert_eq!(
        sink.events(),
        vec![QuestionnaireEvent::QuestionnaireSelected {
            record_id: overview.questionnaire_id,
            questionnaire: overview,
        }]
    );
}
