use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tfindex_core::{
    Corpus, DocId, EngineConfig, FilterOptions, IndexStatus, TermLookup, TextIndex, TokenizerConfig,
};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    #[serde(default)]
    id: Option<DocId>,
    #[serde(alias = "body")]
    text: String,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory inverted index and TF-IDF matrix, then inspect or query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Input path: .txt (one document per line), .json, .jsonl, or a directory of those
    #[arg(long)]
    input: String,
    /// JSON engine configuration file
    #[arg(long)]
    config: Option<String>,
    /// Tokenizer profile
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    /// Minimum number of documents a term must appear in
    #[arg(long)]
    no_below: Option<u32>,
    /// Maximum fraction of documents a term may appear in
    #[arg(long)]
    no_above: Option<f64>,
    /// Cap on vocabulary size (0 keeps nothing)
    #[arg(long)]
    keep_n: Option<usize>,
    /// Build on the current thread only
    #[arg(long, default_value_t = false)]
    sequential: bool,
    /// Ignore ids from the input and number all documents from 1 in load order
    #[arg(long, default_value_t = false)]
    renumber: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Basic,
    Filtered,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print vocabulary, inverted index and weight matrix
    Build {
        #[command(flatten)]
        args: BuildArgs,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Print L2-normalized rows
        #[arg(long, default_value_t = false)]
        normalize: bool,
    },
    /// List the documents containing a term
    Postings {
        #[command(flatten)]
        args: BuildArgs,
        #[arg(long)]
        term: String,
    },
    /// Rank documents by the TF-IDF weight of a term
    Query {
        #[command(flatten)]
        args: BuildArgs,
        #[arg(long)]
        term: String,
        /// Only show the best k documents
        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { args, format, normalize } => {
            let index = build(&args)?;
            print_index(&index, format, normalize)
        }
        Commands::Postings { args, term } => {
            let index = build(&args)?;
            println!("{}", serde_json::to_string(index.postings(&term))?);
            Ok(())
        }
        Commands::Query { args, term, top } => {
            let index = build(&args)?;
            if let Some(ranked) = index.ranked(&term, top) {
                for (doc_id, score) in ranked {
                    println!("{doc_id}\t{score:.4}");
                }
                return Ok(());
            }
            match index.score(&term) {
                TermLookup::NotFound { term } => println!("term '{term}' not found in the vocabulary"),
                TermLookup::EmptyQuery => println!("please enter a term to search for"),
                TermLookup::Found(_) => {}
            }
            Ok(())
        }
    }
}

fn engine_config(args: &BuildArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
            EngineConfig::from_json_str(&text)?
        }
        None => EngineConfig::new(TokenizerConfig::Basic, FilterOptions::keep_all()),
    };
    match args.mode {
        Some(Mode::Basic) => config.tokenizer = TokenizerConfig::Basic,
        Some(Mode::Filtered) => config.tokenizer = TokenizerConfig::filtered(),
        None => {}
    }
    if let Some(no_below) = args.no_below {
        config.filter.no_below = no_below;
    }
    if let Some(no_above) = args.no_above {
        config.filter.no_above = no_above;
    }
    if args.keep_n.is_some() {
        config.filter.keep_n = args.keep_n;
    }
    if args.sequential {
        config.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

fn build(args: &BuildArgs) -> Result<TextIndex> {
    let config = engine_config(args)?;
    let corpus = load_corpus(Path::new(&args.input), args.renumber)?;
    tracing::info!(num_docs = corpus.len(), input = %args.input, "ingested documents");
    let index = TextIndex::build(corpus, &config)?;
    match index.status() {
        IndexStatus::Ready => {}
        IndexStatus::EmptyCorpus => tracing::warn!("no documents found in input"),
        IndexStatus::EmptyVocabulary => tracing::warn!("no features survived filtering; try a lower --no-below"),
    }
    Ok(index)
}

fn load_corpus(input: &Path, renumber: bool) -> Result<Corpus> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl" | "txt")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }

    let mut docs: Vec<InputDoc> = Vec::new();
    for file in files {
        match extension(&file) {
            Some("jsonl") => read_jsonl(&file, &mut docs)?,
            Some("json") => read_json(&file, &mut docs)?,
            _ => read_lines(&file, &mut docs)?,
        }
    }
    if renumber {
        for doc in docs.iter_mut() {
            doc.id = None;
        }
    }
    assign_ids(docs)
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

/// Documents without an id are numbered after the largest id seen so far.
/// Lines of a `.txt` file keep their 1-based line numbers.
fn assign_ids(docs: Vec<InputDoc>) -> Result<Corpus> {
    let explicit: HashSet<DocId> = docs.iter().filter_map(|d| d.id).collect();
    let mut next: DocId = 0;
    let mut pairs = Vec::with_capacity(docs.len());
    for doc in docs {
        let id = match doc.id {
            Some(id) => id,
            None => {
                let mut candidate = next.checked_add(1);
                while let Some(c) = candidate.filter(|c| explicit.contains(c)) {
                    candidate = c.checked_add(1);
                }
                let Some(id) = candidate else {
                    bail!("no free document id left after {next}");
                };
                id
            }
        };
        next = next.max(id);
        pairs.push((id, doc.text));
    }
    Ok(Corpus::from_pairs(pairs)?)
}

fn read_lines(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let corpus = Corpus::from_lines(&text);
    docs.extend(corpus.documents().iter().map(|d| InputDoc { id: Some(d.id), text: d.text.clone() }));
    Ok(())
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => bail!("{}: expected a document object or an array of them", file.display()),
    }
    Ok(())
}

#[derive(Serialize)]
struct IndexReport<'a> {
    status: IndexStatus,
    vocabulary: Vec<&'a str>,
    postings: BTreeMap<&'a str, &'a [DocId]>,
    weights: BTreeMap<DocId, BTreeMap<&'a str, f64>>,
}

fn print_index(index: &TextIndex, format: Format, normalize: bool) -> Result<()> {
    let vocab = index.vocabulary();
    let normalized;
    let weights = if normalize {
        normalized = index.weights().l2_normalized();
        &normalized
    } else {
        index.weights()
    };

    match format {
        Format::Json => {
            let report = IndexReport {
                status: index.status(),
                vocabulary: vocab.iter().map(|(_, t)| t).collect(),
                postings: index
                    .inverted_index()
                    .iter()
                    .filter_map(|(id, list)| vocab.term(id).map(|t| (t, list)))
                    .collect(),
                weights: weights
                    .rows()
                    .map(|(doc, row)| {
                        let cells = row.iter().filter_map(|&(id, w)| vocab.term(id).map(|t| (t, w))).collect();
                        (doc, cells)
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Table => {
            println!("Inverted index");
            for (id, list) in index.inverted_index().iter() {
                let ids: Vec<String> = list.iter().map(|d| d.to_string()).collect();
                println!("  {:<20} [{}]", vocab.term(id).unwrap_or("?"), ids.join(", "));
            }
            println!();
            if weights.is_empty() {
                println!("TF-IDF matrix: no features found");
                return Ok(());
            }
            println!("TF-IDF matrix");
            let header: Vec<String> = vocab.iter().map(|(_, t)| format!("{t:>12}")).collect();
            println!("{:>8}{}", "doc", header.join(""));
            for ((doc, _), dense) in weights.rows().zip(weights.to_dense()) {
                let cells: Vec<String> = dense.iter().map(|w| format!("{w:>12.4}")).collect();
                println!("{doc:>8}{}", cells.join(""));
            }
        }
    }
    Ok(())
}
