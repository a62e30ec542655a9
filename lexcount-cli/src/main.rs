use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use lexcount::docx::write_highlighted_docx;
use lexcount::extractor::Extractor;
use lexcount::get_version;
use lexcount::layout::layout;
use lexcount::pos::PartOfSpeech;
use lexcount::reader::read_sentences;
use lexcount::tagger::LexiconTagger;
use lexcount::writer::write_count_sheet;

#[derive(Debug, Args)]
#[clap(
    author,
    about = "Count nouns, verbs and adjectives into a workbook sheet",
    version = get_version(),
)]
struct CountArgs {
    excel_file: PathBuf,

    #[arg(long)]
    sheet_name: Option<String>,

    #[arg(long, default_value = "results")]
    output_sheet: String,

    #[arg(short, long, default_value = "sm")]
    model: String,

    #[arg(long, default_value = "models")]
    model_dir: PathBuf,
}

#[derive(Debug, Args)]
#[clap(
    author,
    about = "Write a document with nouns, verbs and adjectives highlighted",
    version = get_version(),
)]
struct HighlightArgs {
    excel_file: PathBuf,
    output_docx: PathBuf,

    #[arg(long)]
    sheet_name: Option<String>,

    #[arg(short, long, default_value = "sm")]
    model: String,

    #[arg(long, default_value = "models")]
    model_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Count(CountArgs),
    Highlight(HighlightArgs),
}

#[derive(Debug, Parser)]
#[clap(
    name = "lexcount",
    author,
    about = "A part-of-speech word counting command line interface",
    version = get_version(),
)]
struct CommandArgs {
    #[clap(subcommand)]
    command: Commands,
}

/// First Ctrl-C requests a cooperative stop, second one exits.
fn interrupt_flag() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        if r.load(Ordering::SeqCst) {
            r.store(false, Ordering::SeqCst);
        } else {
            std::process::exit(0);
        }
    })
    .expect("Error setting Ctrl-C handler");

    running
}

fn load_tagger(model: &str, model_dir: &Path) -> Result<(String, LexiconTagger), Box<dyn Error>> {
    let name = format!("en-core-{}", model);
    let path = model_dir.join(format!("{}.json", name));
    let tagger = LexiconTagger::from_model_file(&path)?;

    Ok((name, tagger))
}

fn count(args: CountArgs) -> Result<(), Box<dyn Error>> {
    println!("Reading sentences from {}...", args.excel_file.display());
    let sentences = read_sentences(&args.excel_file, args.sheet_name.as_deref())?;

    let (model_name, tagger) = load_tagger(&args.model, &args.model_dir)?;
    println!(
        "Processing {} sentences with model '{}'...",
        sentences.len(),
        model_name
    );

    let extractor = Extractor::new(tagger);
    let records = extractor.count_words(&sentences, interrupt_flag())?;

    let nouns = records
        .iter()
        .filter(|r| r.pos == PartOfSpeech::Noun)
        .count();
    let verbs = records
        .iter()
        .filter(|r| r.pos == PartOfSpeech::Verb)
        .count();
    let adjs = records
        .iter()
        .filter(|r| r.pos == PartOfSpeech::Adj)
        .count();

    println!("Found {} unique words:", records.len());
    println!("  Nouns: {}", nouns);
    println!("  Verbs: {}", verbs);
    println!("  Adjectives: {}", adjs);

    println!("Writing results to sheet '{}'...", args.output_sheet);
    let rows = layout(&records);
    write_count_sheet(&args.excel_file, &args.output_sheet, &rows)?;

    println!(
        "Results written to {} (sheet: {})",
        args.excel_file.display(),
        args.output_sheet
    );
    Ok(())
}

fn highlight(args: HighlightArgs) -> Result<(), Box<dyn Error>> {
    println!("Reading sentences from {}...", args.excel_file.display());
    let sentences = read_sentences(&args.excel_file, args.sheet_name.as_deref())?;

    let (model_name, tagger) = load_tagger(&args.model, &args.model_dir)?;
    println!(
        "Processing {} sentences with model '{}'...",
        sentences.len(),
        model_name
    );
    println!("Highlighting nouns (cyan), verbs (yellow), and adjectives (magenta)...");

    let extractor = Extractor::new(tagger);
    let tokens = extractor.tag_sentences(&sentences, interrupt_flag())?;

    write_highlighted_docx(&tokens, &args.output_docx)?;

    println!(
        "Highlighted document created at {}",
        args.output_docx.display()
    );
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = CommandArgs::parse();

    match args.command {
        Commands::Count(args) => count(args),
        Commands::Highlight(args) => highlight(args),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
