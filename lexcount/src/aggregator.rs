use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pos::PartOfSpeech;
use crate::tagger::TaggedToken;

/// One counted word.
///
/// There is exactly one record per unique (word, part-of-speech) pair;
/// `pos` is always one of the three counted categories and `count` is at
/// least 1. Records are immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub pos: PartOfSpeech,
    pub count: u32,
}

/// Reduces tagged tokens into per-lemma counts partitioned by part of
/// speech.
///
/// Tokens that are stop-words, non-alphabetic, or whose lemma trims to
/// the empty string are discarded, as are all tokens outside the three
/// counted categories. The output lists nouns, then verbs, then
/// adjectives, each sorted by word, so equal inputs always produce equal
/// outputs.
///
/// # Arguments
/// * `tokens` - The tagged tokens of the whole corpus, in any order.
///
/// # Returns
/// One [`WordRecord`] per surviving (lemma, part-of-speech) pair.
///
/// # Example
/// ```
/// use lexcount::aggregator::aggregate;
/// use lexcount::pos::PartOfSpeech;
/// use lexcount::tagger::TaggedToken;
///
/// let token = TaggedToken {
///     text_with_ws: "cats ".to_string(),
///     lemma: "cat".to_string(),
///     pos: PartOfSpeech::Noun,
///     is_alpha: true,
///     is_stopword: false,
/// };
///
/// let records = aggregate(&[token.clone(), token]);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].count, 2);
/// ```
pub fn aggregate(tokens: &[TaggedToken]) -> Vec<WordRecord> {
    let mut nouns: BTreeMap<String, u32> = BTreeMap::new();
    let mut verbs: BTreeMap<String, u32> = BTreeMap::new();
    let mut adjs: BTreeMap<String, u32> = BTreeMap::new();

    for token in tokens {
        let lemma = token.lemma.trim();
        if lemma.is_empty() || token.is_stopword || !token.is_alpha {
            continue;
        }

        let counter = match token.pos {
            PartOfSpeech::Noun => &mut nouns,
            PartOfSpeech::Verb => &mut verbs,
            PartOfSpeech::Adj => &mut adjs,
            _ => continue,
        };
        *counter.entry(lemma.to_string()).or_insert(0) += 1;
    }

    let mut records = Vec::with_capacity(nouns.len() + verbs.len() + adjs.len());
    for (pos, counter) in [
        (PartOfSpeech::Noun, nouns),
        (PartOfSpeech::Verb, verbs),
        (PartOfSpeech::Adj, adjs),
    ] {
        for (word, count) in counter {
            records.push(WordRecord { word, pos, count });
        }
    }

    log::debug!("aggregated {} word records", records.len());

    records
}
