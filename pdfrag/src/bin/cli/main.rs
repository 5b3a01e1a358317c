use clap::{Args, Parser, Subcommand};
use pdfrag::{
    app::{document::fs::FsDocumentSource, state::AppState},
    config::StartArgs,
    core::{
        document::SourceFile,
        service::ingest::dto::FailurePolicy,
    },
    error::PdfragError,
    map_err,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pdfrag-cli", version = "0.1", about = "Ingest and query documents", long_about = None)]
struct CliArgs {
    #[command(flatten)]
    start: StartArgs,

    #[command(subcommand)]
    command: Execute,
}

#[derive(Debug, Subcommand)]
enum Execute {
    /// Chunk, embed and store every document in a directory.
    Ingest(IngestArg),

    /// Answer a question using the stored chunks.
    Ask(QuestionArg),

    /// List the chunks most similar to a question.
    Search(QuestionArg),

    /// Preview the chunks of a single file without embedding or storing them.
    Chunk(ChunkArg),

    /// List stored documents.
    Documents,
}

#[derive(Debug, Args)]
struct IngestArg {
    /// Directory to read documents from. Defaults to the configured input directory.
    #[arg(long, short)]
    dir: Option<PathBuf>,

    /// Record failing files and continue instead of aborting the run.
    #[arg(long)]
    isolate: bool,
}

#[derive(Debug, Args)]
struct QuestionArg {
    question: String,
}

#[derive(Debug, Args)]
struct ChunkArg {
    /// Path to a pdf, txt or md file.
    file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ChunkPreview<'a> {
    tokens: usize,
    text: &'a str,
}

#[tokio::main]
async fn main() {
    let CliArgs { start, command } = CliArgs::parse();
    let state = AppState::new(&start).await;

    if let Err(e) = run(command, &start, state).await {
        e.print();
        std::process::exit(1);
    }
}

async fn run(command: Execute, args: &StartArgs, state: AppState) -> Result<(), PdfragError> {
    match command {
        Execute::Ingest(IngestArg { dir, isolate }) => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(args.input_dir()));
            let source = FsDocumentSource::new(&dir);

            let policy = if isolate {
                FailurePolicy::Isolate
            } else {
                FailurePolicy::Abort
            };

            let report = state
                .services
                .ingest
                .with_policy(policy)
                .ingest_source(&source)
                .await?;

            print_json(&report)?;

            eprintln!(
                "{} ingested, {} skipped, {} failed, {} chunks",
                report.ingested().count(),
                report.skipped().count(),
                report.failed().count(),
                report.chunks()
            );
        }
        Execute::Ask(QuestionArg { question }) => {
            let answer = state.services.query.ask(question.trim()).await?;
            println!("{answer}");
        }
        Execute::Search(QuestionArg { question }) => {
            let matches = state.services.query.search(question.trim()).await?;
            print_json(&matches)?;
        }
        Execute::Chunk(ChunkArg { file }) => {
            let file = SourceFile::from_path(file)?;
            let source = FsDocumentSource::new(file.path.parent().unwrap_or(file.path.as_path()));

            let ingest = &state.services.ingest;
            let content = ingest.read_text(&source, &file).await?;
            let chunks = ingest.chunker().chunk(&content);

            let preview = chunks
                .iter()
                .map(|text| ChunkPreview {
                    tokens: ingest.chunker().count(text),
                    text,
                })
                .collect::<Vec<_>>();

            print_json(&preview)?;
        }
        Execute::Documents => {
            let documents = state.providers.store.list_documents().await?;
            print_json(&documents)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), PdfragError> {
    println!("{}", map_err!(serde_json::to_string_pretty(value)));
    Ok(())
}
