use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use hr_answerer::{format_sources_block, MAX_SOURCES};
use hr_chunker::{clean_text, Chunker, ChunkerConfig, Document};
use hr_indexer::{load_documents, IndexBuilder, IngestStats};
use hr_vector_store::{RetrievedChunk, CHUNKS_FILE, INDEX_FILE, META_FILE};

mod agent;
mod settings;

pub use agent::{AskOutcome, HrAgent};
pub use settings::{ChatBackend, EmbeddingBackend, Settings};

/// Longest chunk snippet printed by `--show-context`, in characters.
const SNIPPET_CHARS: usize = 350;

#[derive(Parser)]
#[command(name = "hr-rag")]
#[command(about = "Grounded question answering over HR policy documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask an HR policy question against the ingested index
    Ask(AskArgs),

    /// Build the policy index from raw documents
    Ingest(IngestArgs),

    /// Run a small answer-quality suite against the index
    Eval(EvalArgs),
}

#[derive(Args)]
struct AskArgs {
    /// HR question to answer
    question: String,

    /// Number of chunks to retrieve
    #[arg(long)]
    top_k: Option<usize>,

    /// Print retrieved chunks before the answer
    #[arg(long)]
    show_context: bool,

    /// Max characters of context fed to the model
    #[arg(long)]
    max_context_chars: Option<usize>,

    /// Model temperature
    #[arg(long)]
    temperature: Option<f32>,
}

#[derive(Args)]
struct IngestArgs {
    /// Directory of raw .md/.txt policy documents
    #[arg(long)]
    raw_dir: Option<PathBuf>,

    /// Output directory for the index artifacts
    #[arg(long)]
    index_dir: Option<PathBuf>,

    /// Window size in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Window overlap in characters
    #[arg(long)]
    chunk_overlap: Option<usize>,
}

#[derive(Args)]
struct EvalArgs {
    /// JSON file with eval cases; defaults to the built-in suite
    #[arg(long)]
    suite: Option<PathBuf>,

    /// Number of chunks to retrieve per question
    #[arg(long)]
    top_k: Option<usize>,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Ask(args) => run_ask(args).await,
        Commands::Ingest(args) => run_ingest(args).await,
        Commands::Eval(args) => run_eval(args).await,
    }
}

async fn run_ask(args: AskArgs) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(top_k) = args.top_k {
        settings.top_k = top_k;
    }
    if let Some(max_context_chars) = args.max_context_chars {
        settings.max_context_chars = max_context_chars;
    }
    if let Some(temperature) = args.temperature {
        settings.temperature = temperature;
    }
    settings.validate()?;

    let embeddings = settings.embedding_client()?;
    let chat = settings.chat_client()?;

    println!("== HR RAG ==");
    println!("Using INDEX_DIR: {}", settings.index_dir.display());
    println!("Embedding model: {}", embeddings.model_id());
    println!("Chat model:      {}", chat.model_id());
    println!("Top-K:           {}", settings.top_k);
    println!("Strict grounded: {}", settings.strict_grounded);
    println!("Max context:     {} chars", settings.max_context_chars);

    let store = agent::load_store(&settings).await?;
    let agent = HrAgent::new(store, embeddings, chat, &settings)?;
    let outcome = agent.ask(&args.question).await?;

    println!("\nQuestion:");
    println!("{}", outcome.retrieval.query);

    if args.show_context {
        print_hits(&outcome.retrieval.results);
    }

    println!("\nAnswer:");
    println!("{}", outcome.answer.answer);

    println!(
        "\n{}",
        format_sources_block(&outcome.retrieval.results, MAX_SOURCES)
    );
    Ok(())
}

async fn run_ingest(args: IngestArgs) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(raw_dir) = args.raw_dir {
        settings.raw_data_dir = raw_dir;
    }
    if let Some(index_dir) = args.index_dir {
        settings.index_dir = index_dir;
    }
    if let Some(chunk_size) = args.chunk_size {
        settings.chunk_size = chunk_size;
    }
    if let Some(chunk_overlap) = args.chunk_overlap {
        settings.chunk_overlap = chunk_overlap;
    }
    settings.validate()?;

    let embeddings = settings.embedding_client()?;

    println!("== HR RAG Ingestion ==");
    println!("Raw docs dir : {}", settings.raw_data_dir.display());
    println!("Index dir    : {}", settings.index_dir.display());
    println!("Chunk size   : {}", settings.chunk_size);
    println!("Overlap      : {}", settings.chunk_overlap);
    println!("Embeddings   : {}", embeddings.model_id());

    let started = Instant::now();
    let mut stats = IngestStats::new();

    let docs = load_documents(&settings.raw_data_dir).await?;
    let cleaned: Vec<Document> = docs
        .iter()
        .map(|doc| doc.with_text(clean_text(&doc.text)))
        .collect();
    for doc in &cleaned {
        stats.add_document(doc.char_count());
    }
    println!("\nLoaded documents: {}", stats.documents);
    println!("Total cleaned chars: {}", stats.total_text_chars);

    let chunker = Chunker::new(ChunkerConfig::new(
        settings.chunk_size,
        settings.chunk_overlap,
    ))?;
    let chunks = chunker.chunk_documents(&cleaned);
    stats.add_chunks(chunks.len());
    println!("Chunks created: {}", chunks.len());

    if let Some(first) = chunks.first() {
        let total_chunk_chars: usize = chunks.iter().map(|c| c.text.chars().count()).sum();
        let avg = total_chunk_chars as f64 / chunks.len() as f64;
        println!("Avg chunk length: {avg:.1} chars");
        println!("Example chunk id: {}", first.id);
    }

    println!("\nBuilding index (calling embeddings)...");
    let builder = IndexBuilder::new(settings.embedding_batch_size)?;
    let meta = builder
        .build(&chunks, embeddings.as_ref(), &settings.index_dir)
        .await?;

    stats.time_ms = u64::try_from(started.elapsed().as_millis())
        .unwrap_or(u64::MAX)
        .max(1);

    println!("\nIndexed {} chunks in {}ms.", meta.num_chunks, stats.time_ms);
    for file_name in [INDEX_FILE, CHUNKS_FILE, META_FILE] {
        println!("Saved: {}", settings.index_dir.join(file_name).display());
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct EvalCase {
    question: String,
    must_contain: String,
}

fn builtin_suite() -> Vec<EvalCase> {
    vec![
        EvalCase {
            question: "How many PTO days do I get?".to_string(),
            must_contain: "PTO".to_string(),
        },
        EvalCase {
            question: "What are core hours for remote work?".to_string(),
            must_contain: "Core".to_string(),
        },
    ]
}

async fn run_eval(args: EvalArgs) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(top_k) = args.top_k {
        settings.top_k = top_k;
    }
    settings.validate()?;

    let cases = match &args.suite {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read eval suite {}", path.display()))?;
            serde_json::from_slice::<Vec<EvalCase>>(&bytes)
                .with_context(|| format!("Invalid eval suite {}", path.display()))?
        }
        None => builtin_suite(),
    };
    if cases.is_empty() {
        bail!("Eval suite has no cases");
    }

    let agent = HrAgent::from_settings(&settings).await?;

    let total = cases.len();
    let mut passed = 0usize;
    for case in &cases {
        let outcome = agent.ask(&case.question).await?;
        let ok = outcome
            .answer
            .answer
            .to_lowercase()
            .contains(&case.must_contain.to_lowercase());
        passed += usize::from(ok);
        println!(
            "Q: {}\nA: {}\n-> contains '{}': {}\n",
            case.question, outcome.answer.answer, case.must_contain, ok
        );
    }

    println!("Passed {passed}/{total}");
    Ok(())
}

fn print_hits(results: &[RetrievedChunk]) {
    if results.is_empty() {
        println!("\nNo chunks retrieved.");
        return;
    }

    println!("\n== Retrieved Context ==");
    for (i, hit) in results.iter().enumerate() {
        let chunk = &hit.chunk;
        println!(
            "\n[{}] score={:.4}  source={}  id={}",
            i + 1,
            hit.score,
            chunk.source,
            chunk.id
        );
        println!("    {}", snippet(&chunk.text, SNIPPET_CHARS));
    }
}

/// One-line preview of a chunk body, capped at `max_chars` characters.
fn snippet(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() > max_chars {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        flat.to_string()
    }
}
