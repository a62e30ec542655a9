use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tag in the Universal Dependencies naming.
///
/// The tagger assigns one of these to every token. Only [`Noun`],
/// [`Verb`] and [`Adj`] take part in counting; the remaining variants
/// exist so the tagger can classify the rest of a sentence without
/// losing information the highlight renderer may need later.
///
/// [`Noun`]: PartOfSpeech::Noun
/// [`Verb`]: PartOfSpeech::Verb
/// [`Adj`]: PartOfSpeech::Adj
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum PartOfSpeech {
    /// Noun
    #[serde(rename = "NOUN")]
    Noun,
    /// Verb
    #[serde(rename = "VERB")]
    Verb,
    /// Adjective
    #[serde(rename = "ADJ")]
    Adj,
    /// Adverb
    #[serde(rename = "ADV")]
    Adv,
    /// Pronoun
    #[serde(rename = "PRON")]
    Pron,
    /// Determiner
    #[serde(rename = "DET")]
    Det,
    /// Adposition
    #[serde(rename = "ADP")]
    Adp,
    /// Numeral
    #[serde(rename = "NUM")]
    Num,
    /// Conjunction
    #[serde(rename = "CONJ")]
    Conj,
    /// Particle
    #[serde(rename = "PART")]
    Part,
    /// Interjection
    #[serde(rename = "INTJ")]
    Intj,
    /// Punctuation
    #[serde(rename = "PUNCT")]
    Punct,
    /// Anything else
    #[serde(rename = "X")]
    Other,
}

impl PartOfSpeech {
    /// Returns true for the three categories that take part in counting.
    pub fn is_counted(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::Verb | PartOfSpeech::Adj
        )
    }

    /// Returns the UD tag name, e.g. `NOUN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adj => "ADJ",
            PartOfSpeech::Adv => "ADV",
            PartOfSpeech::Pron => "PRON",
            PartOfSpeech::Det => "DET",
            PartOfSpeech::Adp => "ADP",
            PartOfSpeech::Num => "NUM",
            PartOfSpeech::Conj => "CONJ",
            PartOfSpeech::Part => "PART",
            PartOfSpeech::Intj => "INTJ",
            PartOfSpeech::Punct => "PUNCT",
            PartOfSpeech::Other => "X",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
