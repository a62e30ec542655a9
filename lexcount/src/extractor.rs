use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::aggregator::{aggregate, WordRecord};
use crate::errors::{LexcountError, Result};
use crate::pos::PartOfSpeech;
use crate::tagger::{TaggedToken, Tagger};

/// One tagged token with the index of the sentence it came from.
///
/// This is the highlight renderer's input: `text_with_ws` carries the
/// original surface text and trailing whitespace, so concatenating the
/// tokens of one sentence reproduces it verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceToken {
    pub sentence_index: usize,
    pub text_with_ws: String,
    pub pos: PartOfSpeech,
}

/// Drives a tagger over a whole list of sentences.
///
/// Sentences are tagged in parallel; results keep sentence order. Blank
/// sentences yield no tokens but keep their index, so downstream
/// consumers see stable sentence numbering. A cooperative-interrupt flag
/// lets a Ctrl-C handler stop a long run between sentences.
pub struct Extractor<T: Tagger> {
    tagger: T,
}

impl<T: Tagger + Sync> Extractor<T> {
    /// Creates a new instance of [`Extractor`] wrapping a tagger.
    pub fn new(tagger: T) -> Self {
        Extractor { tagger }
    }

    /// Tags every sentence, keeping sentence indices.
    ///
    /// # Arguments
    /// * `sentences` - The raw sentences in order.
    /// * `running` - Cleared by an interrupt handler to request a stop.
    ///
    /// # Returns
    /// All tokens in sentence order, each labeled with the index of its
    /// sentence.
    ///
    /// # Errors
    /// Returns `Interrupted` when the running flag was cleared.
    pub fn tag_sentences(
        &self,
        sentences: &[String],
        running: Arc<AtomicBool>,
    ) -> Result<Vec<SentenceToken>> {
        let tagged = self.tag_indexed(sentences, running)?;

        Ok(tagged
            .into_iter()
            .flat_map(|(index, tokens)| {
                tokens.into_iter().map(move |token| SentenceToken {
                    sentence_index: index,
                    text_with_ws: token.text_with_ws,
                    pos: token.pos,
                })
            })
            .collect())
    }

    /// Tags every sentence and aggregates the result into word counts.
    ///
    /// # Arguments
    /// * `sentences` - The raw sentences in order.
    /// * `running` - Cleared by an interrupt handler to request a stop.
    ///
    /// # Returns
    /// One [`WordRecord`] per unique counted (lemma, part-of-speech)
    /// pair, see [`aggregate`].
    ///
    /// # Errors
    /// Returns `Interrupted` when the running flag was cleared.
    pub fn count_words(
        &self,
        sentences: &[String],
        running: Arc<AtomicBool>,
    ) -> Result<Vec<WordRecord>> {
        let tagged = self.tag_indexed(sentences, running)?;
        let tokens: Vec<TaggedToken> = tagged
            .into_iter()
            .flat_map(|(_, tokens)| tokens)
            .collect();

        Ok(aggregate(&tokens))
    }

    /// Runs the tagger over all sentences in parallel.
    ///
    /// The indexed collect keeps the output in sentence order regardless
    /// of scheduling.
    fn tag_indexed(
        &self,
        sentences: &[String],
        running: Arc<AtomicBool>,
    ) -> Result<Vec<(usize, Vec<TaggedToken>)>> {
        log::info!("tagging {} sentences", sentences.len());

        sentences
            .par_iter()
            .enumerate()
            .map(|(index, sentence)| {
                if !running.load(Ordering::SeqCst) {
                    return Err(LexcountError::Interrupted);
                }
                if sentence.trim().is_empty() {
                    return Ok((index, Vec::new()));
                }
                Ok((index, self.tagger.tag(sentence)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tagger::{LexiconTagger, TaggerModel};

    fn model() -> TaggerModel {
        serde_json::from_str(
            r#"{
                "name": "test",
                "lexicon": {
                    "cat": "NOUN",
                    "cats": "NOUN",
                    "sleep": "VERB",
                    "sleeps": "VERB",
                    "lazy": "ADJ",
                    "the": "DET"
                },
                "lemmas": {
                    "cats": "cat",
                    "sleeps": "sleep"
                },
                "stop_words": ["the"],
                "default_tag": "NOUN"
            }"#,
        )
        .unwrap()
    }

    fn extractor() -> Extractor<LexiconTagger> {
        Extractor::new(LexiconTagger::from_model(model()).unwrap())
    }

    fn running() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(true))
    }

    #[test]
    fn test_tag_sentences_keeps_indices() -> Result<(), Box<dyn std::error::Error>> {
        let sentences = vec!["The cat sleeps.".to_string(), "Lazy cats.".to_string()];

        let tokens = extractor().tag_sentences(&sentences, running())?;

        let first: Vec<&SentenceToken> =
            tokens.iter().filter(|t| t.sentence_index == 0).collect();
        let second: Vec<&SentenceToken> =
            tokens.iter().filter(|t| t.sentence_index == 1).collect();

        let rebuilt: String = first.iter().map(|t| t.text_with_ws.as_str()).collect();
        assert_eq!(rebuilt, "The cat sleeps.");
        assert_eq!(second.len(), 3);
        Ok(())
    }

    #[test]
    fn test_blank_sentences_yield_no_tokens() -> Result<(), Box<dyn std::error::Error>> {
        let sentences = vec![
            "The cat sleeps.".to_string(),
            String::new(),
            "   ".to_string(),
            "Lazy cats.".to_string(),
        ];

        let tokens = extractor().tag_sentences(&sentences, running())?;

        assert!(tokens.iter().all(|t| t.sentence_index != 1));
        assert!(tokens.iter().all(|t| t.sentence_index != 2));
        assert!(tokens.iter().any(|t| t.sentence_index == 3));
        Ok(())
    }

    #[test]
    fn test_count_words_aggregates_lemmas() -> Result<(), Box<dyn std::error::Error>> {
        let sentences = vec!["The cat sleeps.".to_string(), "Lazy cats.".to_string()];

        let records = extractor().count_words(&sentences, running())?;

        // "the" is a stop word, "." is not alphabetic; "cats" folds into
        // "cat".
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].word, "cat");
        assert_eq!(records[0].count, 2);
        assert_eq!(records[1].word, "sleep");
        assert_eq!(records[2].word, "lazy");
        Ok(())
    }

    #[test]
    fn test_cleared_flag_interrupts() {
        let sentences = vec!["The cat sleeps.".to_string()];
        let stopped = Arc::new(AtomicBool::new(false));

        let err = extractor()
            .tag_sentences(&sentences, stopped)
            .err()
            .unwrap();

        assert!(matches!(err, LexcountError::Interrupted));
    }
}
