use std::env;

use hangman::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(game: &GameSnapshot) -> String {
    let mut line = format!(
        "{}   mistakes: {}/{}",
        game.spaced_mask(),
        game.mistake_count,
        game.max_mistakes
    );
    if !game.guessed.is_empty() {
        let guessed: String = game.guessed.iter().collect();
        line.push_str(&format!("   guessed: {guessed}"));
    }
    line
}

fn verdict(game: &GameSnapshot) -> &'static str {
    match game.status {
        GameStatus::Solved => "You win!",
        GameStatus::Failed => "You lose.",
        GameStatus::InProgress => "Game abandoned.",
    }
}

// ---------------------------------------------------------------------------
// Game loop
// ---------------------------------------------------------------------------

async fn play<W: WordSource>(
    service: GameService<W>,
    language: Language,
) -> Result<(), HangmanError> {
    let mut game = service.generate(language).await?;
    println!("{}", render(&game));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !game.status.is_finished() {
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        let request = Request::Guess {
            id: game.id,
            character: line,
        };
        match service.handle(request).await {
            Response::Guess { correct, game: next } => {
                println!("{}", if correct { "Yes!" } else { "No." });
                game = next;
            }
            Response::Error { message, .. } => println!("{message}"),
            Response::Game { game: next } => game = next,
        }
        println!("{}", render(&game));
    }

    println!("{}", verdict(&game));
    if let Some(word) = service.reveal(game.id).await? {
        println!("The word was: {word}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let language = match env::args().nth(1) {
        Some(arg) => arg.parse::<Language>()?,
        None => Language::default(),
    };
    eprintln!("hangman ({language}), one letter per line");

    let builder = GameService::builder();
    match env::var_os("HANGMAN_DICT_DIR") {
        Some(dir) => {
            tracing::info!(dir = ?dir, "reading dictionaries");
            play(builder.build(DictionaryFile::new(dir)), language).await?;
        }
        None => play(builder.build(WordList::embedded()), language).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn game_with(word: &str) -> (GameService<WordList>, GameId) {
        let service = GameService::builder().build(WordList::new());
        let id = service.create_with_word(word).await.unwrap().id;
        (service, id)
    }

    #[tokio::test]
    async fn test_render_fresh_game() {
        let (service, id) = game_with("cat").await;

        let game = service.get(id).await.unwrap();

        assert_eq!(render(&game), "_ _ _   mistakes: 0/11");
    }

    #[tokio::test]
    async fn test_render_lists_guesses() {
        let (service, id) = game_with("cat").await;
        service.guess(id, 'z').await.unwrap();
        let game = service.guess(id, 'a').await.unwrap().game;

        assert_eq!(render(&game), "_ a _   mistakes: 1/11   guessed: az");
    }

    #[tokio::test]
    async fn test_verdict_solved() {
        let (service, id) = game_with("a").await;

        let game = service.guess(id, 'a').await.unwrap().game;

        assert_eq!(verdict(&game), "You win!");
    }
}
