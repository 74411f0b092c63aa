//! Where random secret words come from.
//!
//! The directory doesn't know any words itself. It asks a [`WordSource`]
//! for one, which keeps language handling and dictionary storage out of
//! the game engine:
//! - [`WordList`] keeps words in memory (built-in lists, or loaded once
//!   from dictionary files)
//! - [`DictionaryFile`] reads the dictionary file again on every pick
//! - tests can plug in a source that always returns the same word

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use hangman_protocol::Language;
use rand::Rng;
use rand::seq::IndexedRandom;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::DirectoryError;

/// Supplies a random secret word for a language.
///
/// `Send + Sync + 'static` because one source is shared by every request
/// the directory serves, from any Tokio worker thread.
///
/// # Example
///
/// ```rust
/// use hangman_directory::{DirectoryError, WordSource};
/// use hangman_protocol::Language;
///
/// /// Always the same word. Handy in tests, useless in a real game.
/// struct Fixed(&'static str);
///
/// impl WordSource for Fixed {
///     async fn pick(&self, _language: Language) -> Result<String, DirectoryError> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
pub trait WordSource: Send + Sync + 'static {
    /// Picks a word for `language`.
    ///
    /// # Errors
    /// - [`DirectoryError::NoWords`] — nothing playable for this language
    /// - [`DirectoryError::Io`] — the backing dictionary couldn't be read
    fn pick(
        &self,
        language: Language,
    ) -> impl Future<Output = Result<String, DirectoryError>> + Send;
}

/// Returns `true` if `word` can be a secret word: after trimming it is
/// non-empty and contains at least one letter. Lines starting with `#`
/// are comments in dictionary files and never playable.
pub fn is_playable(word: &str) -> bool {
    let word = word.trim();
    !word.starts_with('#') && word.chars().any(char::is_alphabetic)
}

// ---------------------------------------------------------------------------
// WordList
// ---------------------------------------------------------------------------

const EMBEDDED_ENGLISH: &[&str] = &[
    "anchor", "balloon", "blizzard", "bridge", "candle", "castle",
    "compass", "crystal", "dolphin", "dragon", "element", "falcon",
    "galaxy", "garden", "harbor", "horizon", "island", "journey",
    "jungle", "kitchen", "lantern", "library", "meadow", "mountain",
    "network", "orchestra", "oxygen", "pancake", "pyramid", "quantum",
    "rainbow", "river", "saddle", "shadow", "thunder", "tornado",
    "umbrella", "valley", "volcano", "whisper", "window", "zebra",
];

const EMBEDDED_GERMAN: &[&str] = &[
    "abend", "apfel", "bahnhof", "baum", "blume", "brücke", "drache",
    "eichhörnchen", "fenster", "fluss", "frühling", "gebirge", "geheimnis",
    "gewitter", "hafen", "himmel", "kastanie", "kerze", "kompass",
    "laterne", "löwe", "märchen", "mond", "nebel", "ozean", "regenbogen",
    "schatten", "schloss", "schmetterling", "sonne", "straße", "tanne",
    "vogel", "wald", "weltraum", "wiese", "wolke", "zauberer", "zug",
];

/// Words held in memory, grouped by language.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashMap<Language, Vec<String>>,
}

impl WordList {
    /// An empty list. Every pick fails with `NoWords` until words are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A small built-in English and German vocabulary.
    pub fn embedded() -> Self {
        Self::new()
            .with_words(Language::English, EMBEDDED_ENGLISH.iter().copied())
            .with_words(Language::German, EMBEDDED_GERMAN.iter().copied())
    }

    /// Loads `<locale>.dict` for every language from `dir`, one word per
    /// line. Languages without a file are left empty; unplayable lines are
    /// skipped.
    ///
    /// # Errors
    /// Returns [`DirectoryError::Io`] if a file exists but can't be read.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let dir = dir.as_ref();
        let mut list = Self::new();
        for language in Language::ALL {
            let path = dictionary_path(dir, language);
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "no dictionary file");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            list.extend(language, content.lines());
            tracing::info!(
                %language,
                words = list.len(language),
                path = %path.display(),
                "dictionary loaded"
            );
        }
        Ok(list)
    }

    /// Adds one word. Returns `false` (and ignores it) if it isn't
    /// [playable](is_playable).
    pub fn insert(&mut self, language: Language, word: &str) -> bool {
        if !is_playable(word) {
            return false;
        }
        self.words
            .entry(language)
            .or_default()
            .push(word.trim().to_string());
        true
    }

    /// Adds every playable word from `words`.
    pub fn extend<'a>(&mut self, language: Language, words: impl IntoIterator<Item = &'a str>) {
        for word in words {
            self.insert(language, word);
        }
    }

    /// Builder form of [`extend`](Self::extend).
    pub fn with_words<'a>(
        mut self,
        language: Language,
        words: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.extend(language, words);
        self
    }

    /// The words known for `language`.
    pub fn words(&self, language: Language) -> &[String] {
        self.words
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self, language: Language) -> usize {
        self.words(language).len()
    }

    /// Returns `true` if no language has any word.
    pub fn is_empty(&self) -> bool {
        self.words.values().all(Vec::is_empty)
    }
}

impl WordSource for WordList {
    async fn pick(&self, language: Language) -> Result<String, DirectoryError> {
        self.words(language)
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(DirectoryError::NoWords(language))
    }
}

// ---------------------------------------------------------------------------
// DictionaryFile
// ---------------------------------------------------------------------------

/// Streams `<dir>/<locale>.dict` on every pick.
///
/// The file is read line by line and one line is kept by reservoir
/// sampling, so any dictionary size works in constant memory and edits
/// to the file show up without a restart.
#[derive(Debug, Clone)]
pub struct DictionaryFile {
    dir: PathBuf,
}

impl DictionaryFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The dictionary file read for `language`.
    pub fn path(&self, language: Language) -> PathBuf {
        dictionary_path(&self.dir, language)
    }
}

impl WordSource for DictionaryFile {
    async fn pick(&self, language: Language) -> Result<String, DirectoryError> {
        let file = tokio::fs::File::open(self.path(language)).await?;
        let mut lines = BufReader::new(file).lines();
        let mut reservoir = Reservoir::default();

        while let Some(line) = lines.next_line().await? {
            if is_playable(&line) {
                reservoir.offer(line.trim(), &mut rand::rng());
            }
        }

        reservoir
            .into_choice()
            .ok_or(DirectoryError::NoWords(language))
    }
}

fn dictionary_path(dir: &Path, language: Language) -> PathBuf {
    dir.join(format!("{}.dict", language.locale()))
}

/// Single-item reservoir sampling.
///
/// The n-th candidate replaces the current choice with probability 1/n,
/// which leaves every candidate equally likely once the stream ends.
#[derive(Debug, Default)]
struct Reservoir {
    seen: u64,
    choice: Option<String>,
}

impl Reservoir {
    fn offer(&mut self, candidate: &str, rng: &mut impl Rng) {
        self.seen += 1;
        if rng.random_range(0..self.seen) == 0 {
            self.choice = Some(candidate.to_string());
        }
    }

    fn into_choice(self) -> Option<String> {
        self.choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // =====================================================================
    // is_playable()
    // =====================================================================

    #[test]
    fn test_is_playable_rejects_blank_comment_and_letterless() {
        assert!(!is_playable(""));
        assert!(!is_playable("   "));
        assert!(!is_playable("# comment"));
        assert!(!is_playable("1234"));
        assert!(is_playable("  apple "));
        assert!(is_playable("rock'n'roll"));
    }

    // =====================================================================
    // WordList
    // =====================================================================

    #[test]
    fn test_embedded_has_both_languages() {
        let list = WordList::embedded();
        assert!(list.len(Language::English) > 10);
        assert!(list.len(Language::German) > 10);
        assert!(
            list.words(Language::German)
                .iter()
                .chain(list.words(Language::English))
                .all(|w| is_playable(w))
        );
    }

    #[test]
    fn test_insert_trims_and_skips_unplayable() {
        let mut list = WordList::new();

        assert!(list.insert(Language::English, " apple\r"));
        assert!(!list.insert(Language::English, "42"));

        assert_eq!(list.words(Language::English).to_vec(), vec!["apple"]);
        assert!(list.words(Language::German).is_empty());
    }

    #[tokio::test]
    async fn test_pick_from_empty_language_returns_no_words() {
        let list = WordList::new().with_words(Language::English, ["apple"]);

        let result = list.pick(Language::German).await;

        assert!(matches!(
            result,
            Err(DirectoryError::NoWords(Language::German))
        ));
    }

    #[tokio::test]
    async fn test_pick_returns_a_listed_word() {
        let list = WordList::new().with_words(Language::German, ["apfel", "birne"]);

        let word = list.pick(Language::German).await.unwrap();

        assert!(word == "apfel" || word == "birne");
    }

    #[test]
    fn test_load_dir_reads_locale_files_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("de_DE.dict"),
            "Apfel\n\n# kommentar\nBirne\n",
        )
        .unwrap();

        let list = WordList::load_dir(dir.path()).unwrap();

        assert_eq!(list.len(Language::German), 2);
        assert_eq!(list.len(Language::English), 0);
    }

    // =====================================================================
    // DictionaryFile / Reservoir
    // =====================================================================

    #[tokio::test]
    async fn test_dictionary_file_picks_playable_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en_US.dict"), "\n42\nzebra\n")
            .unwrap();
        let source = DictionaryFile::new(dir.path());

        let word = source.pick(Language::English).await.unwrap();

        assert_eq!(word, "zebra");
    }

    #[tokio::test]
    async fn test_dictionary_file_missing_returns_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DictionaryFile::new(dir.path());

        let result = source.pick(Language::German).await;

        assert!(matches!(result, Err(DirectoryError::Io(_))));
    }

    #[tokio::test]
    async fn test_dictionary_file_without_words_returns_no_words() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en_US.dict"), "# nothing\n").unwrap();
        let source = DictionaryFile::new(dir.path());

        let result = source.pick(Language::English).await;

        assert!(matches!(result, Err(DirectoryError::NoWords(_))));
    }

    #[test]
    fn test_reservoir_first_candidate_always_taken() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut reservoir = Reservoir::default();

        reservoir.offer("only", &mut rng);

        assert_eq!(reservoir.into_choice().as_deref(), Some("only"));
    }

    #[test]
    fn test_reservoir_reaches_every_candidate() {
        // Over many runs each of three candidates should be chosen at
        // least once; a sampler stuck on the first or last would not.
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = HashMap::new();

        for _ in 0..300 {
            let mut reservoir = Reservoir::default();
            for word in ["a", "b", "c"] {
                reservoir.offer(word, &mut rng);
            }
            let choice = reservoir.into_choice().unwrap();
            *hits.entry(choice).or_insert(0) += 1;
        }

        assert_eq!(hits.len(), 3, "distribution: {hits:?}");
    }

    #[test]
    fn test_reservoir_empty_stream_has_no_choice() {
        assert!(Reservoir::default().into_choice().is_none());
    }
}
