use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::{LexcountError, Result};
use crate::pos::PartOfSpeech;

/// One token produced by a tagger.
///
/// `text_with_ws` holds the token exactly as it appeared in the sentence,
/// including any whitespace that followed it, so concatenating the tokens
/// of a sentence reproduces the sentence verbatim. `lemma` is lowercased
/// and trimmed; `is_stopword` is judged on the lemma.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedToken {
    pub text_with_ws: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_alpha: bool,
    pub is_stopword: bool,
}

/// Narrow interface to the part-of-speech tagging collaborator.
///
/// The counting and layout stages depend only on this trait, so any
/// tagging backend can be plugged in without touching them.
pub trait Tagger {
    /// Tokenizes and tags a single sentence.
    ///
    /// # Arguments
    /// * `sentence` - The raw sentence text.
    ///
    /// # Returns
    /// The tokens of the sentence in order, each carrying its original
    /// trailing whitespace. An empty or whitespace-only sentence yields
    /// an empty vector.
    fn tag(&self, sentence: &str) -> Vec<TaggedToken>;
}

/// On-disk tagger model.
///
/// Loaded from a JSON file. The lexicon maps lowercased surface forms to
/// tags; `lemmas` lists irregular lemmas; `suffix_rules` are regex
/// patterns tried in order against words the lexicon does not know;
/// `lemma_rules` rewrite a tagged word's suffix to form its lemma.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaggerModel {
    pub name: String,
    #[serde(default)]
    pub lexicon: HashMap<String, PartOfSpeech>,
    #[serde(default)]
    pub lemmas: HashMap<String, String>,
    #[serde(default)]
    pub suffix_rules: Vec<(String, PartOfSpeech)>,
    #[serde(default)]
    pub lemma_rules: Vec<(PartOfSpeech, String, String)>,
    #[serde(default)]
    pub stop_words: Vec<String>,
    pub default_tag: PartOfSpeech,
}

/// Lexicon-driven tagger.
///
/// Classifies each word by lexicon lookup first, then by the model's
/// suffix patterns (first match wins), then by the model's default tag.
/// This is the shipped implementation of [`Tagger`]; a statistical
/// backend can replace it behind the same trait.
pub struct LexiconTagger {
    model: TaggerModel,
    patterns: Vec<(Regex, PartOfSpeech)>,
    stop_words: HashSet<String>,
}

impl LexiconTagger {
    /// Loads a tagger model from a JSON file.
    ///
    /// # Arguments
    /// * `path` - The path to the model file.
    ///
    /// # Returns
    /// A new `LexiconTagger` backed by the loaded model.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` if the file does not exist, and
    /// `InvalidModel` if it cannot be parsed or contains a malformed
    /// suffix pattern.
    ///
    /// # Example
    /// ```
    /// use std::path::PathBuf;
    ///
    /// use lexcount::tagger::LexiconTagger;
    ///
    /// let model_file = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    ///     .join("../models")
    ///     .join("en-core-sm.json");
    /// let tagger = LexiconTagger::from_model_file(model_file.as_path()).unwrap();
    /// ```
    pub fn from_model_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(LexcountError::ModelUnavailable {
                name,
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let model: TaggerModel = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| LexcountError::InvalidModel(e.to_string()))?;

        log::info!("loaded tagger model '{}' from {}", model.name, path.display());

        Self::from_model(model)
    }

    /// Builds a tagger from an already-deserialized model.
    ///
    /// # Errors
    /// Returns `InvalidModel` if a suffix pattern does not compile.
    pub fn from_model(model: TaggerModel) -> Result<Self> {
        let mut patterns = Vec::with_capacity(model.suffix_rules.len());
        for (pattern, tag) in &model.suffix_rules {
            let regex = Regex::new(pattern).map_err(|e| {
                LexcountError::InvalidModel(format!("suffix pattern '{}': {}", pattern, e))
            })?;
            patterns.push((regex, *tag));
        }

        let stop_words = model.stop_words.iter().cloned().collect();

        Ok(LexiconTagger {
            model,
            patterns,
            stop_words,
        })
    }

    /// Resolves the tag of one word.
    fn resolve_tag(&self, lower: &str, is_alpha: bool) -> PartOfSpeech {
        if !is_alpha {
            if lower.chars().all(|c| c.is_numeric()) {
                return PartOfSpeech::Num;
            }
            if lower.chars().all(|c| !c.is_alphanumeric()) {
                return PartOfSpeech::Punct;
            }
            return PartOfSpeech::Other;
        }

        if let Some(tag) = self.model.lexicon.get(lower) {
            return *tag;
        }
        for (pattern, tag) in &self.patterns {
            if pattern.is_match(lower) {
                return *tag;
            }
        }
        self.model.default_tag
    }

    /// Resolves the lemma of a tagged word.
    ///
    /// Irregular forms come from the model's lemma table; otherwise the
    /// first matching suffix rule for the word's tag is applied. A bare
    /// strip (empty replacement) can leave a doubled consonant behind,
    /// which is collapsed unless the stem is itself a lexicon word; a
    /// rewrite keeps its replacement as written.
    fn lemmatize(&self, lower: &str, pos: PartOfSpeech) -> String {
        if let Some(lemma) = self.model.lemmas.get(lower) {
            return lemma.clone();
        }

        for (tag, suffix, replacement) in &self.model.lemma_rules {
            if *tag != pos {
                continue;
            }
            if !lower.ends_with(suffix.as_str()) || lower.len() < suffix.len() + 2 {
                continue;
            }
            let mut stem = lower[..lower.len() - suffix.len()].to_string();
            stem.push_str(replacement);
            if !replacement.is_empty() || self.model.lexicon.contains_key(&stem) {
                return stem;
            }
            return undouble(&stem);
        }

        lower.to_string()
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        let mut tokens: Vec<TaggedToken> = Vec::new();
        let mut leading_ws = String::new();

        for segment in sentence.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                // Whitespace belongs to the preceding token, or to the
                // first token if none has been produced yet.
                match tokens.last_mut() {
                    Some(last) => last.text_with_ws.push_str(segment),
                    None => leading_ws.push_str(segment),
                }
                continue;
            }

            let lower = segment.to_lowercase();
            let is_alpha = segment.chars().all(char::is_alphabetic);
            let pos = self.resolve_tag(&lower, is_alpha);
            let lemma = if is_alpha {
                self.lemmatize(&lower, pos)
            } else {
                lower
            };
            let is_stopword = self.stop_words.contains(&lemma);

            let mut text_with_ws = std::mem::take(&mut leading_ws);
            text_with_ws.push_str(segment);

            tokens.push(TaggedToken {
                text_with_ws,
                lemma,
                pos,
                is_alpha,
                is_stopword,
            });
        }

        tokens
    }
}

/// Collapses a trailing doubled consonant, e.g. `runn` to `run`.
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 3 {
        let last = chars[chars.len() - 1];
        let prev = chars[chars.len() - 2];
        if last == prev && last.is_alphabetic() && !"aeiou".contains(last) {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    stem.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    fn test_model() -> TaggerModel {
        serde_json::from_str(
            r#"{
                "name": "test",
                "lexicon": {
                    "cat": "NOUN",
                    "fall": "VERB",
                    "falling": "VERB",
                    "run": "VERB",
                    "running": "VERB",
                    "quick": "ADJ",
                    "the": "DET",
                    "and": "CONJ"
                },
                "lemmas": {
                    "went": "go",
                    "mice": "mouse"
                },
                "suffix_rules": [
                    ["(?:tion|ness|ment)$", "NOUN"],
                    ["(?:ize|ise)$", "VERB"],
                    ["(?:ful|ous|ive)$", "ADJ"]
                ],
                "lemma_rules": [
                    ["NOUN", "ies", "y"],
                    ["NOUN", "s", ""],
                    ["VERB", "ing", ""],
                    ["VERB", "ed", ""],
                    ["VERB", "s", ""],
                    ["ADJ", "er", ""],
                    ["ADJ", "est", ""]
                ],
                "stop_words": ["the", "and", "be"],
                "default_tag": "NOUN"
            }"#,
        )
        .unwrap()
    }

    fn tagger() -> LexiconTagger {
        LexiconTagger::from_model(test_model()).unwrap()
    }

    #[test]
    fn test_lexicon_lookup_wins() {
        let tokens = tagger().tag("the quick cat");

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].pos, PartOfSpeech::Det);
        assert_eq!(tokens[1].pos, PartOfSpeech::Adj);
        assert_eq!(tokens[2].pos, PartOfSpeech::Noun);
    }

    #[test]
    fn test_suffix_pattern_fallback() {
        let tokens = tagger().tag("joyous renovation");

        assert_eq!(tokens[0].pos, PartOfSpeech::Adj);
        assert_eq!(tokens[1].pos, PartOfSpeech::Noun);
    }

    #[test]
    fn test_default_tag_for_unknown_words() {
        let tokens = tagger().tag("zyzzyva");

        assert_eq!(tokens[0].pos, PartOfSpeech::Noun);
    }

    #[test]
    fn test_irregular_lemma_from_table() {
        let tokens = tagger().tag("went");

        assert_eq!(tokens[0].lemma, "go");
    }

    #[test]
    fn test_rule_lemma_with_undoubling() {
        // "running" strips "ing" to "runn", which is not a lexicon word,
        // so the doubled consonant collapses.
        let tokens = tagger().tag("running");

        assert_eq!(tokens[0].pos, PartOfSpeech::Verb);
        assert_eq!(tokens[0].lemma, "run");
    }

    #[test]
    fn test_rule_lemma_keeps_lexicon_stem() {
        // "falling" strips "ing" to "fall", which the lexicon knows, so
        // no undoubling happens.
        let tokens = tagger().tag("falling");

        assert_eq!(tokens[0].lemma, "fall");
    }

    #[test]
    fn test_stopword_flag_is_judged_on_lemma() {
        let tokens = tagger().tag("The cat");

        assert!(tokens[0].is_stopword);
        assert!(!tokens[1].is_stopword);
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let sentence = "the  quick \tcat";
        let tokens = tagger().tag(sentence);

        let rebuilt: String = tokens.iter().map(|t| t.text_with_ws.as_str()).collect();
        assert_eq!(rebuilt, sentence);
    }

    #[test]
    fn test_leading_whitespace_attaches_to_first_token() {
        let tokens = tagger().tag("  cat");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text_with_ws, "  cat");
    }

    #[test]
    fn test_punctuation_and_numbers() {
        let tokens = tagger().tag("cat, 42");

        assert_eq!(tokens[1].pos, PartOfSpeech::Punct);
        assert!(!tokens[1].is_alpha);
        assert_eq!(tokens[2].pos, PartOfSpeech::Num);
    }

    #[test]
    fn test_empty_sentence_yields_no_tokens() {
        assert!(tagger().tag("").is_empty());
        assert!(tagger().tag("   ").is_empty());
    }

    #[test]
    fn test_from_model_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", serde_json::to_string(&test_model())?)?;
        file.as_file().sync_all()?;

        let tagger = LexiconTagger::from_model_file(file.path())?;
        let tokens = tagger.tag("cat");
        assert_eq!(tokens[0].pos, PartOfSpeech::Noun);

        Ok(())
    }

    #[test]
    fn test_missing_model_file_is_model_unavailable() {
        let err = LexiconTagger::from_model_file(Path::new("no/such/en-core-md.json"))
            .err()
            .unwrap();

        assert!(matches!(err, LexcountError::ModelUnavailable { .. }));
        assert!(err.to_string().contains("en-core-md"));
    }

    #[test]
    fn test_malformed_model_file_is_invalid_model() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, "not json")?;
        file.as_file().sync_all()?;

        let err = LexiconTagger::from_model_file(file.path()).err().unwrap();
        assert!(matches!(err, LexcountError::InvalidModel(_)));

        Ok(())
    }

    #[test]
    fn test_bad_suffix_pattern_is_invalid_model() {
        let mut model = test_model();
        model.suffix_rules.push(("(".to_string(), PartOfSpeech::Noun));

        let err = LexiconTagger::from_model(model).err().unwrap();
        assert!(matches!(err, LexcountError::InvalidModel(_)));
    }
}
