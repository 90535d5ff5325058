//! qfocus CLI: question focus extraction and category resolution.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use qfocus::config::AnalyzerConfig;
use qfocus::lexicon::Pos;
use qfocus::question::QuestionAnalyzer;
use qfocus::syntax::{HeadFinder, ParserCache, Tree};

#[derive(Parser)]
#[command(name = "qfocus", version, about = "Question focus extraction and category resolution")]
struct Cli {
    /// Analyzer configuration (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the category of each question.
    Classify {
        questions: Vec<String>,

        /// Read questions from a file, one per line.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the full analysis of each question as JSON.
    Analyze {
        questions: Vec<String>,

        /// Read questions from a file, one per line.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Analyze a question against a supplied parse tree.
    Tree {
        /// Bracketed parse tree, e.g. "(ROOT (SBARQ ...))".
        #[arg(long)]
        tree: String,

        question: String,
    },

    /// Show the head of a parse tree.
    Head {
        /// Bracketed parse tree.
        #[arg(long)]
        tree: String,
    },

    /// Resolve a word to a category through the lexicon.
    Lookup {
        word: String,

        /// Part of speech: noun, verb, adjective or adverb.
        #[arg(long, default_value = "noun")]
        pos: Pos,

        /// Try every sense, not only the most frequent one.
        #[arg(long)]
        all_senses: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { questions, input } => {
            let analyzer = load_analyzer(cli.config.as_deref())?;
            let questions = gather(questions, input.as_deref())?;
            let categories = analyzer.classify_batch(&questions);
            for (question, category) in questions.iter().zip(categories) {
                println!("{category}\t{question}");
            }
        }

        Commands::Analyze { questions, input } => {
            let analyzer = load_analyzer(cli.config.as_deref())?;
            let questions = gather(questions, input.as_deref())?;
            for analyzed in analyzer.analyze_batch(&questions) {
                let json = serde_json::to_string_pretty(&analyzed).into_diagnostic()?;
                println!("{json}");
            }
        }

        Commands::Tree { tree, question } => {
            let analyzer = load_analyzer(cli.config.as_deref())?;
            let tree: Tree = tree.parse()?;
            let analyzed = analyzer.analyze_parsed(&question, tree);
            let category = analyzer.classify(&analyzed);
            let json = serde_json::to_string_pretty(&analyzed).into_diagnostic()?;
            println!("{json}");
            println!("category: {category}");
        }

        Commands::Head { tree } => {
            let tree: Tree = tree.parse()?;
            let finder = HeadFinder::question();
            match finder.head_preterminal(&tree) {
                Some(pt) => println!("{}\t{}", pt.label(), pt.first_terminal().label()),
                None => println!("no head"),
            }
        }

        Commands::Lookup {
            word,
            pos,
            all_senses,
        } => {
            let analyzer = load_analyzer(cli.config.as_deref())?;
            match analyzer.lookup(&word, pos, all_senses) {
                Some(resolution) => {
                    println!("{resolution}");
                    println!("  synset: {}", resolution.id);
                    println!("  depth:  {}", resolution.depth);
                }
                None => println!("{word} ({pos}): no category"),
            }
        }
    }

    Ok(())
}

fn load_analyzer(config: Option<&Path>) -> Result<QuestionAnalyzer> {
    let Some(path) = config else {
        miette::bail!("this command needs --config <file>");
    };
    let config = AnalyzerConfig::load(path)?;
    let cache = ParserCache::new();
    Ok(QuestionAnalyzer::from_config(&config, &cache)?)
}

/// Questions from the command line followed by those in `input`.
fn gather(mut questions: Vec<String>, input: Option<&Path>) -> Result<Vec<String>> {
    if let Some(path) = input {
        let content = std::fs::read_to_string(path).into_diagnostic()?;
        questions.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }
    if questions.is_empty() {
        miette::bail!("no questions given");
    }
    Ok(questions)
}
