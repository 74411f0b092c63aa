//! Integration tests for `GameService`: typed calls, request dispatch and
//! the JSON wire contract.

use std::time::Duration;

use hangman::prelude::*;
use serde_json::{Value, json};

// =========================================================================
// Helpers
// =========================================================================

fn service() -> GameService<WordList> {
    GameService::builder()
        .build(WordList::new().with_words(Language::English, ["go"]))
}

async fn call(service: &GameService<WordList>, request: Value) -> Value {
    let bytes = serde_json::to_vec(&request).unwrap();
    let reply = service.handle_bytes(&bytes).await.unwrap();
    serde_json::from_slice(&reply).unwrap()
}

fn error_code(response: &Response) -> Option<u16> {
    match response {
        Response::Error { code, .. } => Some(*code),
        _ => None,
    }
}

// =========================================================================
// Typed API
// =========================================================================

#[tokio::test]
async fn test_typed_game_to_solved() {
    let service = service();

    let game = service.generate(Language::English).await.unwrap();
    service.guess(game.id, 'g').await.unwrap();
    let outcome = service.guess(game.id, 'o').await.unwrap();

    assert!(outcome.game.solved);
    assert_eq!(outcome.game.status, GameStatus::Solved);
    assert_eq!(service.reveal(game.id).await.unwrap().as_deref(), Some("go"));
}

#[tokio::test]
async fn test_typed_errors_carry_codes() {
    let service = service();
    let id = service.create_with_word("a").await.unwrap().id;
    service.guess(id, 'a').await.unwrap();

    let closed = service.guess(id, 'b').await.unwrap_err();
    let not_found = service.get(GameId(1)).await.unwrap_err();
    let invalid = service.create_with_word("").await.unwrap_err();
    let no_words = service.generate(Language::German).await.unwrap_err();

    assert_eq!(closed.code(), 409);
    assert_eq!(not_found.code(), 404);
    assert_eq!(invalid.code(), 422);
    assert_eq!(no_words.code(), 500);
}

// =========================================================================
// Request dispatch
// =========================================================================

#[tokio::test]
async fn test_handle_guess_returns_guess_response() {
    let service = service();
    let id = service.create_with_word("go").await.unwrap().id;

    let response = service
        .handle(Request::Guess {
            id,
            character: "G".into(),
        })
        .await;

    match response {
        Response::Guess { correct, game } => {
            assert!(correct);
            assert_eq!(game.masked_word, "g_");
        }
        other => panic!("expected Guess, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handle_multi_char_guess_is_422() {
    let service = service();
    let id = service.create_with_word("go").await.unwrap().id;

    let response = service
        .handle(Request::Guess {
            id,
            character: "go".into(),
        })
        .await;

    assert_eq!(error_code(&response), Some(422));
    assert_eq!(service.get(id).await.unwrap().mistake_count, 0);
}

#[tokio::test]
async fn test_handle_non_letter_guess_counts_as_mistake() {
    let service = service();
    let id = service.create_with_word("go").await.unwrap().id;

    let response = service
        .handle(Request::Guess {
            id,
            character: "7".into(),
        })
        .await;

    match response {
        Response::Guess { correct, game } => {
            assert!(!correct);
            assert_eq!(game.mistake_count, 1);
            assert_eq!(game.masked_word, "__");
        }
        other => panic!("expected Guess, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handle_unknown_game_is_404() {
    let service = service();

    let response = service.handle(Request::Get { id: GameId(3) }).await;

    assert_eq!(error_code(&response), Some(404));
}

// =========================================================================
// JSON wire contract
// =========================================================================

#[tokio::test]
async fn test_json_generate_and_guess() {
    let service = service();

    let created = call(&service, json!({ "type": "Generate", "lang": "ENG" })).await;
    assert_eq!(created["type"], "Game");
    assert_eq!(created["game"]["maskedWord"], "__");
    assert_eq!(created["game"]["mistakeCount"], 0);
    assert_eq!(created["game"]["status"], "IN_PROGRESS");
    assert_eq!(created["game"]["solved"], false);

    let id = created["game"]["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 32);

    let guessed = call(
        &service,
        json!({ "type": "Guess", "id": id, "character": "x" }),
    )
    .await;
    assert_eq!(guessed["type"], "Guess");
    assert_eq!(guessed["correct"], false);
    assert_eq!(guessed["game"]["mistakeCount"], 1);
    assert_eq!(guessed["game"]["guessed"], json!(["x"]));
}

#[tokio::test]
async fn test_json_generate_defaults_to_english() {
    let service = service();

    let created = call(&service, json!({ "type": "Generate" })).await;

    assert_eq!(created["type"], "Game");
}

#[tokio::test]
async fn test_json_snapshot_never_contains_secret() {
    let service = GameService::builder()
        .build(WordList::new().with_words(Language::English, ["zebra"]));

    let created = call(&service, json!({ "type": "Generate" })).await;
    let id = created["game"]["id"].clone();
    let fetched = call(&service, json!({ "type": "Get", "id": id })).await;

    assert!(!created.to_string().contains("zebra"));
    assert!(!fetched.to_string().contains("zebra"));
}

#[tokio::test]
async fn test_json_garbage_is_400() {
    let service = service();

    let reply = service.handle_bytes(b"not json").await.unwrap();
    let response: Value = serde_json::from_slice(&reply).unwrap();

    assert_eq!(response["type"], "Error");
    assert_eq!(response["code"], 400);
}

#[tokio::test]
async fn test_json_bad_game_id_is_400() {
    let service = service();

    let response = call(&service, json!({ "type": "Get", "id": "xyz" })).await;

    assert_eq!(response["code"], 400);
}

#[tokio::test]
async fn test_json_create_blank_word_is_422() {
    let service = service();

    let response = call(&service, json!({ "type": "Create", "word": "   " })).await;

    assert_eq!(response["type"], "Error");
    assert_eq!(response["code"], 422);
}

// =========================================================================
// Builder
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_builder_sweep_interval_expires_games() {
    let config = DirectoryConfig {
        idle_ttl: Duration::from_secs(5),
        finished_ttl: Duration::from_secs(1),
        ..DirectoryConfig::default()
    };
    let service = GameService::builder()
        .directory_config(config)
        .sweep_interval(Duration::from_secs(10))
        .build(WordList::new());
    let id = service.create_with_word("go").await.unwrap().id;

    tokio::time::sleep(Duration::from_secs(11)).await;

    assert_eq!(service.get(id).await.unwrap_err().code(), 404);
}

#[tokio::test]
async fn test_builder_dictionary_file_source() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("de_DE.dict"), "# comment\nApfel\n").unwrap();
    let service = GameService::builder().build(DictionaryFile::new(dir.path()));

    let game = service.generate(Language::German).await.unwrap();

    assert_eq!(game.masked_word, "_____");
    assert_eq!(
        service.generate(Language::English).await.unwrap_err().code(),
        500
    );
}

#[test]
fn test_builder_outside_runtime_skips_sweeper() {
    let service = GameService::builder()
        .sweep_interval(Duration::from_secs(1))
        .build(WordList::embedded());

    assert_eq!(service.directory().config().max_sessions, 10_000);
}
