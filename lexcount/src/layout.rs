use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::aggregator::WordRecord;
use crate::pos::PartOfSpeech;

/// One physical row of the count sheet.
///
/// `label` is the first-letter marker, the second-letter marker, or
/// empty, following the suppression rule implemented by [`layout`]. A
/// `None` count renders as a blank cell; the word cell of an unused
/// column pair is the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputRow {
    pub label: String,
    pub noun_word: String,
    pub noun_count: Option<u32>,
    pub verb_word: String,
    pub verb_count: Option<u32>,
    pub adj_word: String,
    pub adj_count: Option<u32>,
}

impl OutputRow {
    /// The fixed header row preceding all group rows.
    pub fn header() -> Self {
        OutputRow {
            noun_word: "Nouns".to_string(),
            verb_word: "Verbs".to_string(),
            adj_word: "Adjectives".to_string(),
            ..Default::default()
        }
    }
}

/// The per-category word lists of one (first letter, second letter)
/// group. Words are inserted in global sort order, so each list is
/// sorted.
#[derive(Debug, Default)]
struct LetterGroup {
    nouns: Vec<String>,
    verbs: Vec<String>,
    adjs: Vec<String>,
}

impl LetterGroup {
    /// Number of physical rows this group occupies.
    fn row_count(&self) -> usize {
        self.nouns.len().max(self.verbs.len()).max(self.adjs.len())
    }
}

/// Lays the counted words out as spreadsheet rows.
///
/// The words of all three categories are merged, sorted, and grouped two
/// levels deep: by uppercased first letter, then by lowercased second
/// letter (single-character words get an empty second letter, which
/// sorts before every real letter, so they lead their block). Each group
/// spans as many rows as its longest category list; the three category
/// lists fill their column pairs independently, so a word appearing in
/// two categories shares a row only when its within-group indices happen
/// to coincide.
///
/// Label suppression is stateful across each first-letter block: the
/// block's very first row carries the uppercase letter, and within each
/// sub-group one row carries the lowercase second letter. The first row
/// of the block consumes only the first-letter slot, so when the leading
/// sub-group spans several rows its second-letter label lands on the
/// following row, and a one-row leading sub-group shows no second-letter
/// label at all.
///
/// # Arguments
/// * `records` - The counted words, one record per unique (word,
///   part-of-speech) pair. Order does not matter.
///
/// # Returns
/// The header row followed by all group rows in letter order. An empty
/// input yields the header row only.
///
/// # Example
/// ```
/// use lexcount::aggregator::WordRecord;
/// use lexcount::layout::layout;
/// use lexcount::pos::PartOfSpeech;
///
/// let records = vec![WordRecord {
///     word: "ant".to_string(),
///     pos: PartOfSpeech::Noun,
///     count: 3,
/// }];
///
/// let rows = layout(&records);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].label, "A");
/// assert_eq!(rows[1].noun_word, "ant");
/// assert_eq!(rows[1].noun_count, Some(3));
/// ```
pub fn layout(records: &[WordRecord]) -> Vec<OutputRow> {
    let mut noun_counts: HashMap<&str, u32> = HashMap::new();
    let mut verb_counts: HashMap<&str, u32> = HashMap::new();
    let mut adj_counts: HashMap<&str, u32> = HashMap::new();

    for record in records {
        let counts = match record.pos {
            PartOfSpeech::Noun => &mut noun_counts,
            PartOfSpeech::Verb => &mut verb_counts,
            PartOfSpeech::Adj => &mut adj_counts,
            _ => continue,
        };
        counts.insert(record.word.as_str(), record.count);
    }

    let all_words: BTreeSet<&str> = noun_counts
        .keys()
        .chain(verb_counts.keys())
        .chain(adj_counts.keys())
        .copied()
        .collect();

    // first letter -> second letter -> per-category word lists.
    // Processing the words in sorted order keeps every list sorted.
    let mut grouped: BTreeMap<String, BTreeMap<String, LetterGroup>> = BTreeMap::new();

    for word in all_words {
        let mut chars = word.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => continue,
        };
        let first_letter: String = first.to_uppercase().collect();
        let second_letter: String = chars
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default();

        let group = grouped
            .entry(first_letter)
            .or_default()
            .entry(second_letter)
            .or_default();

        if noun_counts.contains_key(word) {
            group.nouns.push(word.to_string());
        }
        if verb_counts.contains_key(word) {
            group.verbs.push(word.to_string());
        }
        if adj_counts.contains_key(word) {
            group.adjs.push(word.to_string());
        }
    }

    let mut rows = vec![OutputRow::header()];

    for (first_letter, subgroups) in &grouped {
        let mut first_letter_row_written = false;

        for (second_letter, group) in subgroups {
            let mut second_letter_shown = false;

            for idx in 0..group.row_count() {
                let label = if !first_letter_row_written {
                    first_letter_row_written = true;
                    first_letter.clone()
                } else if !second_letter_shown {
                    second_letter_shown = true;
                    second_letter.clone()
                } else {
                    String::new()
                };

                let (noun_word, noun_count) = column(&group.nouns, idx, &noun_counts);
                let (verb_word, verb_count) = column(&group.verbs, idx, &verb_counts);
                let (adj_word, adj_count) = column(&group.adjs, idx, &adj_counts);

                rows.push(OutputRow {
                    label,
                    noun_word,
                    noun_count,
                    verb_word,
                    verb_count,
                    adj_word,
                    adj_count,
                });
            }
        }
    }

    rows
}

/// Resolves one column pair of a row: the word at `idx` in the group's
/// category list and its count, or blanks past the end of the list.
fn column(words: &[String], idx: usize, counts: &HashMap<&str, u32>) -> (String, Option<u32>) {
    match words.get(idx) {
        Some(word) => (word.clone(), counts.get(word.as_str()).copied()),
        None => (String::new(), None),
    }
}
