//! End-to-end tests of the JSON API over an in-memory database.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use verb_adventure::content::find_verb;
use verb_adventure::db;
use verb_adventure::domain::VerbForm;
use verb_adventure::handlers;
use verb_adventure::hint::{GenerateFuture, HintService, TextGenerator, COOLDOWN_MESSAGE, UNAVAILABLE_MESSAGE};
use verb_adventure::state::AppState;

/// Answers every prompt with a fixed JSON hint
struct StubGenerator;

impl TextGenerator for StubGenerator {
  fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
    Box::pin(async { Ok(r#"Here you go: {"hint": "I **go**, I **went**, I have **gone**!"}"#.to_string()) })
  }
}

fn server_with(generator: Option<Arc<dyn TextGenerator>>) -> TestServer {
  let pool = db::open_in_memory().unwrap();
  let hints = HintService::new(generator, Duration::from_millis(2000));
  TestServer::new(handlers::router(AppState::new(pool, hints))).unwrap()
}

fn server() -> TestServer {
  server_with(Some(Arc::new(StubGenerator)))
}

fn forwarded(ip: &'static str) -> (HeaderName, HeaderValue) {
  (HeaderName::from_static("x-forwarded-for"), HeaderValue::from_static(ip))
}

/// Build the right answer for a question view using the verb table
fn correct_answer(question: &Value) -> Value {
  let verb = find_verb(question["base"].as_str().unwrap()).unwrap();
  let form = match question["form"].as_str() {
    Some("participle") => VerbForm::Participle,
    _ => VerbForm::Simple,
  };
  match question["type"].as_str().unwrap() {
    "fill" => json!({ "simple": verb.simple, "participle": verb.participle }),
    "mcq" => json!({ "selected": verb.form(form) }),
    "tf" => {
      let truth = question["target_value"].as_str() == Some(verb.form(form));
      let label = if truth { "True" } else { "False" };
      json!({ "selected": label })
    }
    other => panic!("unexpected question type {other}"),
  }
}

async fn start_quiz(server: &TestServer, body: Value) -> Value {
  let response = server.post("/api/quiz").json(&body).await;
  assert_eq!(response.status_code(), StatusCode::CREATED);
  response.json::<Value>()
}

#[tokio::test]
async fn test_health() {
  let response = server().get("/api/health").await;
  assert_eq!(response.status_code(), StatusCode::OK);
  assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_verb_endpoints() {
  let server = server();

  let all = server.get("/api/verbs").await.json::<Value>();
  assert_eq!(all.as_array().unwrap().len(), 54);

  let advanced = server.get("/api/verbs?difficulty=advanced").await.json::<Value>();
  assert_eq!(advanced.as_array().unwrap().len(), 4);

  let summary = server.get("/api/verbs/summary").await.json::<Value>();
  assert_eq!(summary, json!({ "total": 54, "common": 50, "advanced": 4 }));

  let go = server.get("/api/verbs/GO").await.json::<Value>();
  assert_eq!(go["participle"], "gone");

  assert_eq!(server.get("/api/verbs/walk").await.status_code(), StatusCode::NOT_FOUND);
  assert_eq!(
    server.get("/api/verbs?difficulty=hard").await.status_code(),
    StatusCode::BAD_REQUEST
  );
}

#[tokio::test]
async fn test_immediate_quiz_perfect_run() {
  let server = server();
  let quiz = start_quiz(&server, json!({ "mode": "immediate", "count": 5 })).await;
  let id = quiz["id"].as_str().unwrap();
  let questions = quiz["questions"].as_array().unwrap();
  assert_eq!(questions.len(), 5);
  assert!(questions.iter().all(|q| q["solution"].is_null()));

  for (index, question) in questions.iter().enumerate() {
    let recorded = server
      .put(&format!("/api/quiz/{id}/answers/{index}"))
      .json(&correct_answer(question))
      .await
      .json::<Value>();
    assert_eq!(recorded["recorded"], true);

    let checked = server.post(&format!("/api/quiz/{id}/check/{index}")).await.json::<Value>();
    assert_eq!(checked["correct"], true);
    assert_eq!(checked["streak"], index as u64 + 1);
    assert!(!checked["question"]["solution"].is_null());
    if index > 0 {
      assert_eq!(checked["cues"], json!(["correct", "streak"]));
    }
  }

  // Checked answers are locked
  let locked = server
    .put(&format!("/api/quiz/{id}/answers/0"))
    .json(&json!({ "simple": "x", "participle": "y", "selected": "x" }))
    .await
    .json::<Value>();
  assert_eq!(locked["recorded"], false);

  // Stepping past the last question finishes the quiz
  let nav = server
    .post(&format!("/api/quiz/{id}/navigate"))
    .json(&json!({ "index": 5 }))
    .await
    .json::<Value>();
  assert_eq!(nav["outcome"], "finished");
  assert_eq!(nav["summary"]["percentage"], 100);
  assert_eq!(nav["summary"]["rank"]["title"], "Legendary Word Hero");
  assert_eq!(nav["summary"]["celebrate"], true);
  assert_eq!(nav["summary"]["best_streak"], 5);
  assert_eq!(nav["stats"]["games_played"], 1);

  let stats = server.get("/api/stats").await.json::<Value>();
  assert_eq!(stats["best_score"], 100);
  assert_eq!(stats["total_correct"], 5);
  assert_eq!(stats["accuracy"], 100);

  let history = server.get("/api/stats/history").await.json::<Value>();
  assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delayed_quiz_and_review() {
  let server = server();
  let quiz = start_quiz(&server, json!({ "mode": "delayed", "count": 3, "difficulty": "common" })).await;
  let id = quiz["id"].as_str().unwrap();

  let first = &quiz["questions"][0];
  server
    .put(&format!("/api/quiz/{id}/answers/0"))
    .json(&correct_answer(first))
    .await;

  // No per-question checking in delayed mode
  assert_eq!(
    server.post(&format!("/api/quiz/{id}/check/0")).await.status_code(),
    StatusCode::CONFLICT
  );
  // Review requires a finished quiz
  assert_eq!(
    server.post(&format!("/api/quiz/{id}/review")).await.status_code(),
    StatusCode::CONFLICT
  );

  let palette = server.get(&format!("/api/quiz/{id}/palette")).await.json::<Value>();
  assert_eq!(palette[0]["status"], "answered");
  assert_eq!(palette[1]["status"], "unanswered");

  let finished = server.post(&format!("/api/quiz/{id}/finish")).await.json::<Value>();
  assert_eq!(finished["summary"]["score"], 1);
  assert_eq!(finished["summary"]["total"], 3);
  assert_eq!(finished["summary"]["percentage"], 33);
  assert_eq!(finished["summary"]["celebrate"], false);

  assert_eq!(
    server.post(&format!("/api/quiz/{id}/finish")).await.status_code(),
    StatusCode::CONFLICT
  );

  let review = server.post(&format!("/api/quiz/{id}/review")).await.json::<Value>();
  assert_eq!(review["mode"], "review");
  assert_eq!(review["current_index"], 0);
  assert!(review["questions"].as_array().unwrap().iter().all(|q| !q["solution"].is_null()));

  let palette = server.get(&format!("/api/quiz/{id}/palette")).await.json::<Value>();
  assert_eq!(palette[0]["status"], "correct");
  assert_eq!(palette[2]["status"], "incorrect");

  // Review is read-only
  let ignored = server
    .put(&format!("/api/quiz/{id}/answers/1"))
    .json(&json!({ "selected": "True" }))
    .await
    .json::<Value>();
  assert_eq!(ignored["recorded"], false);
}

#[tokio::test]
async fn test_quiz_errors() {
  let server = server();
  assert_eq!(server.get("/api/quiz/nope").await.status_code(), StatusCode::NOT_FOUND);

  let empty = server.post("/api/quiz").json(&json!({ "count": 0 })).await;
  assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
  assert!(empty.json::<Value>()["error"].is_string());

  // "All" clamps to the pool size
  let quiz = start_quiz(&server, json!({ "count": 999, "difficulty": "advanced" })).await;
  assert_eq!(quiz["total"], 4);
  let id = quiz["id"].as_str().unwrap();

  assert_eq!(
    server
      .put(&format!("/api/quiz/{id}/answers/10"))
      .json(&json!({ "selected": "True" }))
      .await
      .status_code(),
    StatusCode::BAD_REQUEST
  );

  let nav = server
    .post(&format!("/api/quiz/{id}/navigate"))
    .json(&json!({ "index": 2 }))
    .await
    .json::<Value>();
  assert_eq!(nav, json!({ "outcome": "moved", "index": 2 }));
}

#[tokio::test]
async fn test_study_deck_and_hint_discovery() {
  let server = server();
  let deck = server.post("/api/study").await;
  assert_eq!(deck.status_code(), StatusCode::CREATED);
  let deck = deck.json::<Value>();
  let id = deck["id"].as_str().unwrap();
  assert_eq!(deck["card"]["position"], 0);
  assert_eq!(deck["card"]["total"], 54);
  assert_eq!(deck["cues"], json!([]));

  let prev = server.post(&format!("/api/study/{id}/prev")).await.json::<Value>();
  assert_eq!(prev["card"]["position"], 53);
  assert_eq!(prev["cues"], json!(["pop"]));
  let next = server.post(&format!("/api/study/{id}/next")).await.json::<Value>();
  assert_eq!(next["card"]["position"], 0);
  assert_eq!(next["cues"], json!(["pop"]));

  let base = next["card"]["verb"]["base"].as_str().unwrap();
  let (name, value) = forwarded("198.51.100.4");
  let hint = server
    .post("/api/hint")
    .add_header(name, value)
    .json(&json!({ "verb": base, "deck_id": id }))
    .await;
  assert_eq!(hint.status_code(), StatusCode::OK);
  let hint = hint.json::<Value>();
  assert_eq!(hint["status"], "generated");
  assert_eq!(hint["text"], "I **go**, I **went**, I have **gone**!");
  assert_eq!(hint["segments"][1], json!({ "kind": "bold", "text": "go" }));
  assert_eq!(hint["learned_count"], 1);
  assert_eq!(hint["cues"], json!(["pop"]));

  let card = server.get(&format!("/api/study/{id}")).await.json::<Value>();
  assert_eq!(card["card"]["discovered"], true);
  assert_eq!(card["cues"], json!([]));

  assert_eq!(server.get("/api/study/missing").await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hint_cooldown_per_caller() {
  let server = server();
  let (name, value) = forwarded("203.0.113.9");

  let first = server
    .post("/api/hint")
    .add_header(name.clone(), value.clone())
    .json(&json!({ "verb": "swim", "context": "quiz" }))
    .await;
  assert_eq!(first.status_code(), StatusCode::OK);

  let second = server
    .post("/api/hint")
    .add_header(name, value)
    .json(&json!({ "verb": "swim", "context": "quiz", "previous_hint": "old" }))
    .await;
  assert_eq!(second.status_code(), StatusCode::TOO_MANY_REQUESTS);
  assert!(second.headers().get("retry-after").is_some());
  let body = second.json::<Value>();
  assert_eq!(body["status"], "cooling_down");
  assert_eq!(body["text"], COOLDOWN_MESSAGE);

  let (name, value) = forwarded("203.0.113.10");
  let other = server
    .post("/api/hint")
    .add_header(name, value)
    .json(&json!({ "verb": "swim" }))
    .await;
  assert_eq!(other.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_hint_without_api_key() {
  let server = server_with(None);
  let response = server.post("/api/hint").json(&json!({ "verb": "go" })).await;
  assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
  assert_eq!(response.json::<Value>()["text"], UNAVAILABLE_MESSAGE);

  let unknown = server.post("/api/hint").json(&json!({ "verb": "walk" })).await;
  assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_hint_still_discovers_verb() {
  let server = server_with(None);
  let deck = server.post("/api/study").await.json::<Value>();
  let id = deck["id"].as_str().unwrap();
  let base = deck["card"]["verb"]["base"].as_str().unwrap();

  let hint = server
    .post("/api/hint")
    .json(&json!({ "verb": base, "deck_id": id }))
    .await;
  assert_eq!(hint.status_code(), StatusCode::SERVICE_UNAVAILABLE);
  let hint = hint.json::<Value>();
  assert_eq!(hint["status"], "unavailable");
  assert_eq!(hint["learned_count"], 1);
  assert_eq!(hint["cues"], json!(["pop"]));

  // Asking twice for the same verb does not count it again
  let again = server
    .post("/api/hint")
    .json(&json!({ "verb": base, "deck_id": id }))
    .await
    .json::<Value>();
  assert_eq!(again["learned_count"], 1);

  let card = server.get(&format!("/api/study/{id}")).await.json::<Value>();
  assert_eq!(card["card"]["discovered"], true);
  assert_eq!(card["card"]["learned_count"], 1);
}

#[tokio::test]
async fn test_cooldown_still_discovers_verb() {
  let server = server();
  let deck = server.post("/api/study").await.json::<Value>();
  let id = deck["id"].as_str().unwrap();
  let first = deck["card"]["verb"]["base"].as_str().unwrap().to_string();
  let next = server.post(&format!("/api/study/{id}/next")).await.json::<Value>();
  let second = next["card"]["verb"]["base"].as_str().unwrap().to_string();

  let (name, value) = forwarded("192.0.2.44");
  let generated = server
    .post("/api/hint")
    .add_header(name.clone(), value.clone())
    .json(&json!({ "verb": first, "deck_id": id }))
    .await;
  assert_eq!(generated.status_code(), StatusCode::OK);

  let limited = server
    .post("/api/hint")
    .add_header(name, value)
    .json(&json!({ "verb": second, "deck_id": id }))
    .await;
  assert_eq!(limited.status_code(), StatusCode::TOO_MANY_REQUESTS);
  assert_eq!(limited.json::<Value>()["learned_count"], 2);
}

#[tokio::test]
async fn test_user_and_settings() {
  let server = server();

  assert_eq!(server.get("/api/user").await.json::<Value>(), json!({ "name": null }));

  let saved = server.put("/api/user").json(&json!({ "name": "  Sam " })).await;
  assert_eq!(saved.json::<Value>()["name"], "Sam");

  let blank = server.put("/api/user").json(&json!({ "name": "   " })).await;
  assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);
  assert_eq!(server.get("/api/user").await.json::<Value>()["name"], "Sam");

  let settings = server.get("/api/settings").await.json::<Value>();
  assert_eq!(settings, json!({ "muted": false, "speech_rate": 0.9 }));

  let updated = server
    .put("/api/settings")
    .json(&json!({ "muted": true, "speech_rate": 3.0 }))
    .await
    .json::<Value>();
  assert_eq!(updated, json!({ "muted": true, "speech_rate": 1.5 }));

  let stats = server.get("/api/stats").await.json::<Value>();
  assert_eq!(stats["last_rank"], "Beginner");
  assert_eq!(stats["games_played"], 0);
}
