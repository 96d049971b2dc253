mod embed;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use concierge_core::{classify_query, detect_lang, tokenize, Chunk};
use concierge_retrieval::{compose_prompt, AdaptiveRetriever, RetrievalConfig};

use embed::{HashEmbedder, HashEmbedderConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_TEMPLATE: &str =
    "Ты виртуальный консьерж отеля. Отвечай доброжелательно и профессионально. \
     Используй информацию из документов отеля для ответа.";

#[derive(Parser, Debug)]
#[command(name = "concierge-gate", version = VERSION, about = "Retrieval quality gate driver")]
struct Cli {
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the adaptive retrieval protocol over a chunk fixture file.
    Ask {
        /// JSON array of {"text": ..., "embedding": [...]} records;
        /// records without an embedding are hash-embedded.
        #[arg(long)]
        chunks: PathBuf,
        #[arg(long)]
        query: String,
        /// System prompt template the verdict is composed into.
        #[arg(long)]
        template: Option<String>,
        /// Hash-embedder dimensions for records without embeddings.
        #[arg(long, default_value_t = 64)]
        dims: usize,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Show how a query classifies and tokenizes.
    Classify {
        #[arg(long)]
        query: String,
    },
}

#[derive(Debug, Deserialize)]
struct ChunkRecord {
    text: String,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Ask {
            chunks,
            query,
            template,
            dims,
            json,
        } => run_ask(&chunks, &query, template.as_deref(), dims, json),
        Commands::Classify { query } => run_classify(&query),
    }
}

fn run_ask(
    chunks_path: &PathBuf,
    query: &str,
    template: Option<&str>,
    dims: usize,
    json_out: bool,
) -> Result<()> {
    let raw = fs::read_to_string(chunks_path)
        .with_context(|| format!("failed to read {}", chunks_path.display()))?;
    let records: Vec<ChunkRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid chunk fixture {}", chunks_path.display()))?;

    let embedder = HashEmbedder::new(HashEmbedderConfig {
        dimensions: dims,
        seed: 1337,
    });
    let chunks: Vec<Chunk> = records
        .into_iter()
        .map(|record| {
            let embedding = record
                .embedding
                .unwrap_or_else(|| embedder.embed_text(&record.text));
            Chunk {
                text: record.text,
                embedding,
            }
        })
        .collect();
    let dims_in_use = chunks.first().map_or(dims, |c| c.embedding.len());
    let query_embedding = if dims_in_use == dims {
        embedder.embed_text(query)
    } else {
        HashEmbedder::new(HashEmbedderConfig {
            dimensions: dims_in_use,
            seed: 1337,
        })
        .embed_text(query)
    };

    let retriever = AdaptiveRetriever::new(RetrievalConfig::from_env());
    let outcome = retriever.retrieve(query, &query_embedding, &chunks, None)?;
    let prompt = compose_prompt(
        template.unwrap_or(DEFAULT_TEMPLATE),
        &outcome.context,
        outcome.verdict.accepted,
    );

    if json_out {
        let payload = json!({
            "accepted": outcome.verdict.accepted,
            "reason": outcome.verdict.reason.to_string(),
            "metrics": outcome.verdict.metrics,
            "depth_used": outcome.depth_used,
            "prompt": prompt,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("accepted:   {}", outcome.verdict.accepted);
        println!("reason:     {}", outcome.verdict.reason);
        println!("depth used: {}", outcome.depth_used);
        println!();
        println!("{prompt}");
    }
    Ok(())
}

fn run_classify(query: &str) -> Result<()> {
    let query_type = classify_query(query);
    let lang = detect_lang(query);
    let tokens = tokenize(query, lang);
    println!("type:   {query_type}");
    println!("lang:   {lang}");
    println!("tokens: {}", tokens.join(" "));
    Ok(())
}
