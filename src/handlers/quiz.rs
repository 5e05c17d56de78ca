//! Quiz endpoints.
//!
//! Question views hide the expected forms until a question has been
//! checked or the quiz is over.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult};
use crate::config;
use crate::db::{self, try_lock, LogOnError, Stats};
use crate::domain::{Answer, Difficulty, DifficultyFilter, QuestionType, QuizMode, VerbForm};
use crate::quiz::{CheckOutcome, Navigation, PaletteEntry, QuizSession, QuizSummary};
use crate::state::AppState;

// ============================================================================
// Views
// ============================================================================

/// Expected answer, revealed once a question is graded
#[derive(Debug, Serialize)]
pub struct Solution {
  pub simple: &'static str,
  pub participle: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub correct_answer: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_true: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
  pub index: usize,
  pub id: String,
  #[serde(rename = "type")]
  pub question_type: QuestionType,
  pub base: &'static str,
  pub difficulty: Difficulty,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub form: Option<VerbForm>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_value: Option<String>,
  pub answer: Option<Answer>,
  pub result: Option<bool>,
  pub solution: Option<Solution>,
}

impl QuestionView {
  fn build(session: &QuizSession, index: usize) -> Option<Self> {
    let question = session.questions().get(index)?;
    let result = session.result(index);
    let revealed = result.is_some() || session.is_finished();

    Some(Self {
      index,
      id: question.id.clone(),
      question_type: question.question_type,
      base: question.verb.base,
      difficulty: question.verb.difficulty,
      form: question.form,
      options: question.options.clone(),
      target_value: question.target_value.clone(),
      answer: session.answer(index).cloned(),
      result,
      solution: revealed.then(|| Solution {
        simple: question.verb.simple,
        participle: question.verb.participle,
        correct_answer: question.correct_answer.clone(),
        is_true: question.is_true,
      }),
    })
  }
}

#[derive(Debug, Serialize)]
pub struct QuizView {
  pub id: String,
  pub mode: QuizMode,
  pub difficulty: DifficultyFilter,
  pub current_index: usize,
  pub streak: u32,
  pub total: usize,
  pub finished: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<QuizSummary>,
  pub questions: Vec<QuestionView>,
}

impl QuizView {
  fn build(id: &str, session: &QuizSession) -> Self {
    Self {
      id: id.to_string(),
      mode: session.mode(),
      difficulty: session.difficulty(),
      current_index: session.current_index(),
      streak: session.streak(),
      total: session.questions().len(),
      finished: session.is_finished(),
      summary: session.summary().cloned(),
      questions: (0..session.questions().len())
        .filter_map(|index| QuestionView::build(session, index))
        .collect(),
    }
  }
}

// ============================================================================
// Helpers
// ============================================================================

fn with_quiz<R>(state: &AppState, id: &str, f: impl FnOnce(&mut QuizSession) -> R) -> ApiResult<R> {
  state.quizzes.with(id, f).ok_or(ApiError::NotFound("Quiz"))
}

/// Add a finished quiz to the stored stats. Failures are logged, not surfaced:
/// the player still gets their summary.
fn record_finished(state: &AppState, summary: &QuizSummary) -> Option<Stats> {
  let conn = try_lock(&state.db).log_warn("Could not record game")?;
  db::record_game(
    &conn,
    summary.score,
    summary.total,
    summary.rank.title,
    summary.best_streak,
  )
  .log_warn("Failed to record game")
  .flatten()
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartQuizRequest {
  #[serde(default)]
  pub mode: QuizMode,
  pub count: Option<usize>,
  #[serde(default)]
  pub difficulty: DifficultyFilter,
}

/// POST /api/quiz
pub async fn start_quiz(
  State(state): State<AppState>,
  Json(request): Json<StartQuizRequest>,
) -> ApiResult<(StatusCode, Json<QuizView>)> {
  let count = request.count.unwrap_or(config::DEFAULT_QUESTION_COUNT);
  let session = QuizSession::start(request.mode, count, request.difficulty, &mut rand::rng())?;

  let id = state.quizzes.insert(session);
  tracing::info!(
    quiz = %id,
    mode = request.mode.as_str(),
    difficulty = request.difficulty.as_str(),
    count,
    "Started quiz"
  );

  let view = with_quiz(&state, &id, |session| QuizView::build(&id, session))?;
  Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/quiz/{id}
pub async fn get_quiz(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<QuizView>> {
  with_quiz(&state, &id, |session| QuizView::build(&id, session)).map(Json)
}

#[derive(Debug, Serialize)]
pub struct RecordAnswerResponse {
  /// False when the answer was locked (already checked, or review mode)
  pub recorded: bool,
  pub question: Option<QuestionView>,
}

/// PUT /api/quiz/{id}/answers/{index}
pub async fn record_answer(
  State(state): State<AppState>,
  Path((id, index)): Path<(String, usize)>,
  Json(answer): Json<Answer>,
) -> ApiResult<Json<RecordAnswerResponse>> {
  let response = with_quiz(&state, &id, |session| {
    let recorded = session.record_answer(index, answer)?;
    Ok::<_, ApiError>(RecordAnswerResponse {
      recorded,
      question: QuestionView::build(session, index),
    })
  })??;
  Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
  #[serde(flatten)]
  pub outcome: CheckOutcome,
  pub question: Option<QuestionView>,
}

/// POST /api/quiz/{id}/check/{index}
pub async fn check_answer(
  State(state): State<AppState>,
  Path((id, index)): Path<(String, usize)>,
) -> ApiResult<Json<CheckResponse>> {
  let response = with_quiz(&state, &id, |session| {
    let outcome = session.check(index)?;
    Ok::<_, ApiError>(CheckResponse {
      outcome,
      question: QuestionView::build(session, index),
    })
  })??;
  Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
  pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
  #[serde(flatten)]
  pub navigation: Navigation,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stats: Option<Stats>,
}

/// POST /api/quiz/{id}/navigate
pub async fn navigate(
  State(state): State<AppState>,
  Path(id): Path<String>,
  Json(request): Json<NavigateRequest>,
) -> ApiResult<Json<NavigateResponse>> {
  let navigation = with_quiz(&state, &id, |session| session.navigate(request.index))??;

  let stats = match &navigation {
    Navigation::Finished { summary } => {
      tracing::info!(quiz = %id, score = summary.score, total = summary.total, "Quiz finished");
      record_finished(&state, summary)
    }
    _ => None,
  };

  Ok(Json(NavigateResponse { navigation, stats }))
}

#[derive(Debug, Serialize)]
pub struct FinishResponse {
  pub summary: QuizSummary,
  /// Updated lifetime stats; absent if they could not be saved
  pub stats: Option<Stats>,
}

/// POST /api/quiz/{id}/finish
pub async fn finish_quiz(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> ApiResult<Json<FinishResponse>> {
  let summary = with_quiz(&state, &id, |session| session.finish())??;
  tracing::info!(quiz = %id, score = summary.score, total = summary.total, "Quiz finished");

  let stats = record_finished(&state, &summary);
  Ok(Json(FinishResponse { summary, stats }))
}

/// POST /api/quiz/{id}/review
pub async fn start_review(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<QuizView>> {
  let view = with_quiz(&state, &id, |session| {
    session.start_review()?;
    Ok::<_, ApiError>(QuizView::build(&id, session))
  })??;
  Ok(Json(view))
}

/// GET /api/quiz/{id}/palette
pub async fn palette(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Vec<PaletteEntry>>> {
  with_quiz(&state, &id, |session| session.palette()).map(Json)
}
