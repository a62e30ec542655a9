use std::fs::File;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run};

use crate::errors::{LexcountError, Result};
use crate::extractor::SentenceToken;
use crate::pos::PartOfSpeech;

/// Highlight color for a counted category, `None` for everything else.
///
/// Cyan, yellow and magenta are the OOXML highlight names closest to
/// turquoise, yellow and pink.
fn highlight_for(pos: PartOfSpeech) -> Option<&'static str> {
    match pos {
        PartOfSpeech::Noun => Some("cyan"),
        PartOfSpeech::Verb => Some("yellow"),
        PartOfSpeech::Adj => Some("magenta"),
        _ => None,
    }
}

/// Splits the token stream into one slice per sentence.
///
/// Tokens arrive in sentence order, so contiguous runs of equal
/// `sentence_index` form the paragraphs.
fn paragraphs(tokens: &[SentenceToken]) -> Vec<&[SentenceToken]> {
    let mut groups = Vec::new();
    let mut start = 0;
    for idx in 1..=tokens.len() {
        if idx == tokens.len() || tokens[idx].sentence_index != tokens[start].sentence_index {
            groups.push(&tokens[start..idx]);
            start = idx;
        }
    }
    groups
}

/// Writes the tagged sentences as a highlighted document.
///
/// Each sentence becomes one paragraph; each token becomes one run
/// carrying its original trailing whitespace. Nouns, verbs and
/// adjectives get their background highlight, all other tokens render
/// unstyled. Sentences that produced no tokens produce no paragraph.
///
/// # Arguments
/// * `tokens` - The token stream from
///   [`Extractor::tag_sentences`](crate::extractor::Extractor::tag_sentences).
/// * `path` - The output document path.
///
/// # Errors
/// Returns `Io` if the file cannot be created and `Document` if the
/// document cannot be packed.
pub fn write_highlighted_docx(tokens: &[SentenceToken], path: &Path) -> Result<()> {
    let mut docx = Docx::new();

    for sentence in paragraphs(tokens) {
        let mut paragraph = Paragraph::new();
        for token in sentence {
            let mut run = Run::new().add_text(token.text_with_ws.as_str());
            if let Some(color) = highlight_for(token.pos) {
                run = run.highlight(color);
            }
            paragraph = paragraph.add_run(run);
        }
        docx = docx.add_paragraph(paragraph);
    }

    let file = File::create(path)?;
    docx.build()
        .pack(file)
        .map_err(|e| LexcountError::Document(e.to_string()))?;

    log::debug!("wrote highlighted document to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn token(index: usize, text: &str, pos: PartOfSpeech) -> SentenceToken {
        SentenceToken {
            sentence_index: index,
            text_with_ws: text.to_string(),
            pos,
        }
    }

    #[test]
    fn test_highlight_mapping() {
        assert_eq!(highlight_for(PartOfSpeech::Noun), Some("cyan"));
        assert_eq!(highlight_for(PartOfSpeech::Verb), Some("yellow"));
        assert_eq!(highlight_for(PartOfSpeech::Adj), Some("magenta"));
        assert_eq!(highlight_for(PartOfSpeech::Det), None);
        assert_eq!(highlight_for(PartOfSpeech::Punct), None);
    }

    #[test]
    fn test_paragraphs_group_contiguous_indices() {
        let tokens = vec![
            token(0, "The ", PartOfSpeech::Det),
            token(0, "cat", PartOfSpeech::Noun),
            token(2, "Dogs ", PartOfSpeech::Noun),
            token(2, "bark", PartOfSpeech::Verb),
            token(3, "Quiet", PartOfSpeech::Adj),
        ];

        let groups = paragraphs(&tokens);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[2].len(), 1);
        assert_eq!(groups[1][0].sentence_index, 2);
    }

    #[test]
    fn test_paragraphs_of_empty_stream() {
        assert!(paragraphs(&[]).is_empty());
    }

    #[test]
    fn test_writes_document_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("highlighted.docx");
        let tokens = vec![
            token(0, "The ", PartOfSpeech::Det),
            token(0, "cat ", PartOfSpeech::Noun),
            token(0, "sleeps", PartOfSpeech::Verb),
            token(0, ".", PartOfSpeech::Punct),
        ];

        write_highlighted_docx(&tokens, &path)?;

        let metadata = std::fs::metadata(&path)?;
        assert!(metadata.len() > 0);
        Ok(())
    }

    #[test]
    fn test_empty_stream_still_writes_a_document() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.docx");

        write_highlighted_docx(&[], &path)?;

        assert!(path.is_file());
        Ok(())
    }
}
