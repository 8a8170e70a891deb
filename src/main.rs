//! Text Matcher command line
//!
//! Finds similar passages in pairs of text files. Either argument may be a
//! directory, in which case every `.txt` file below it is compared.

use clap::{ArgAction, Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use text_matcher::compare::{compare_file_pairs, load_document};
use text_matcher::discover::{get_files, pairs};
use text_matcher::models::{ComparisonResult, MatchParams};
use text_matcher::output::{print_matches, print_summary, write_csv_file, write_json_file};
use text_matcher::pairlog::PairLog;

#[derive(Parser)]
#[command(name = "text-matcher")]
#[command(about = "Finds similar passages in two text files")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two texts, or every pair drawn from two directories
    ///
    /// Parameters not given on the command line come from MatchParams::default().
    Compare {
        /// First text file or directory
        text1: PathBuf,

        /// Second text file or directory
        text2: PathBuf,

        /// Keep aligned runs longer than this many n-grams
        #[arg(short, long, default_value = "2")]
        threshold: usize,

        /// N-gram size [default: 3]
        #[arg(short = 'n', long = "ngrams")]
        ngram_size: Option<usize>,

        /// Pair log recording finished comparisons
        #[arg(short, long, default_value = "log.txt")]
        logfile: PathBuf,

        /// Minimum final match size in n-grams [default: 5]
        #[arg(long)]
        cutoff: Option<usize>,

        /// Heal runs separated by fewer n-grams than this [default: 8]
        #[arg(long)]
        min_distance: Option<usize>,

        /// Maximum edit ratio for extending over a boundary word [default: 0.4]
        #[arg(long)]
        extension_cutoff: Option<f64>,

        /// Keep stopwords instead of filtering them out
        #[arg(long)]
        keep_stopwords: bool,

        /// Context words shown on each side of a match [default: 5]
        #[arg(long)]
        context: Option<usize>,

        /// Let very frequent n-grams seed matches in long texts
        #[arg(long)]
        no_autojunk: bool,

        /// Write one JSON result per pair into this directory
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write one CSV of matches per pair into this directory
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print at most N matches per pair
        #[arg(long)]
        show_matches: Option<usize>,

        /// Suppress progress and match output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show tokenization statistics for a text
    Info {
        /// Text file
        path: PathBuf,

        /// Keep stopwords instead of filtering them out
        #[arg(long)]
        keep_stopwords: bool,

        /// Print the first N tokens with their spans
        #[arg(long)]
        show_tokens: Option<usize>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let level = if quiet && verbose == 0 { "error" } else { log_level };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            text1,
            text2,
            threshold,
            ngram_size,
            logfile,
            cutoff,
            min_distance,
            extension_cutoff,
            keep_stopwords,
            context,
            no_autojunk,
            json,
            csv,
            show_matches,
            quiet,
        } => {
            init_logging(cli.verbose, quiet);

            // Start with library defaults
            let defaults = MatchParams::default();

            // Overlay user-specified values onto defaults
            let params = MatchParams {
                threshold,
                ngram_size: ngram_size.unwrap_or(defaults.ngram_size),
                cutoff: cutoff.unwrap_or(defaults.cutoff),
                remove_stopwords: !keep_stopwords,
                min_distance: min_distance.unwrap_or(defaults.min_distance),
                extension_cutoff: extension_cutoff.unwrap_or(defaults.extension_cutoff),
                context_tokens: context.unwrap_or(defaults.context_tokens),
                autojunk: !no_autojunk,
                silent: quiet,
            };
            if params.ngram_size == 0 {
                return Err("n-gram size must be at least 1".into());
            }

            let texts1 = get_files(&text1)?;
            let texts2 = get_files(&text2)?;
            log::debug!("comparing {:?} with {:?}", texts1, texts2);

            let all_pairs = pairs(&texts1, &texts2);
            let mut pair_log = PairLog::open(&logfile)?;

            let todo: Vec<(PathBuf, PathBuf)> = all_pairs
                .into_iter()
                .filter(|(a, b)| {
                    let logged = pair_log.contains(&a.display().to_string(), &b.display().to_string());
                    if logged {
                        log::info!("{} and {} already in the log, skipping", a.display(), b.display());
                    }
                    !logged
                })
                .collect();

            if !quiet {
                eprintln!("Comparing {} pairs...", todo.len());
            }

            for dir in [&json, &csv].into_iter().flatten() {
                std::fs::create_dir_all(dir)?;
            }

            let outcomes = compare_file_pairs(&todo, &params, !quiet && todo.len() > 1);

            let mut failed = 0;
            let mut stems_seen = HashSet::new();
            for outcome in outcomes {
                let result = match outcome.result {
                    Ok(result) => result,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        failed += 1;
                        continue;
                    }
                };

                let label_a = outcome.path_a.display().to_string();
                let label_b = outcome.path_b.display().to_string();

                if !quiet {
                    report_pair(&result, show_matches);
                }

                record_pair(&mut pair_log, &label_a, &label_b, &result);

                let stem = output_stem(&outcome.path_a, &outcome.path_b, &mut stems_seen);
                if let Some(dir) = &json {
                    write_json_file(&result, &dir.join(format!("{}.json", stem)))?;
                }
                if let Some(dir) = &csv {
                    write_csv_file(&result.matches, &dir.join(format!("{}.csv", stem)))?;
                }
            }

            if failed > 0 {
                eprintln!("\n{} pair(s) failed", failed);
            }
            if !quiet {
                eprintln!("Log: {}", pair_log.path().display());
            }
        }

        Commands::Info {
            path,
            keep_stopwords,
            show_tokens,
        } => {
            init_logging(cli.verbose, false);

            let doc = load_document(&path, !keep_stopwords)?;
            let unique: HashSet<&String> = doc.tokens().iter().collect();

            println!("=== {} ===", doc.label());
            println!("Length: {} bytes", doc.length());
            println!("Tokens: {}", doc.token_count());
            println!("Unique tokens: {}", unique.len());
            println!(
                "Trigrams: {}",
                doc.ngram_count(MatchParams::default().ngram_size)
            );

            if let Some(limit) = show_tokens {
                println!("\n=== Tokens ===");
                for (token, (start, end)) in doc.tokens().iter().zip(doc.spans()).take(limit) {
                    println!("  {:>8}..{:<8} {:<20} {}", start, end, token, &doc.text()[*start..*end]);
                }
            }
        }
    }

    Ok(())
}

/// Print the matches of one pair followed by its summary.
fn report_pair(result: &ComparisonResult, limit: Option<usize>) {
    println!(
        "\n=== {} <-> {} ===",
        result.text_a.label, result.text_b.label
    );
    if result.matches.is_empty() {
        println!("No matches found.");
        return;
    }
    println!("{} total matches found.", result.summary.match_count);
    print_matches(&result.matches, limit);
    print_summary(result);
}

/// Log a finished pair. A failed write is reported and the batch goes on.
fn record_pair(pair_log: &mut PairLog, label_a: &str, label_b: &str, result: &ComparisonResult) -> bool {
    match pair_log.record(label_a, label_b, result) {
        Ok(written) => written,
        Err(e) => {
            log::warn!("{} and {} not logged: {}", label_a, label_b, e);
            false
        }
    }
}

/// File name stem for a pair's output, unique within this run.
fn output_stem(path_a: &Path, path_b: &Path, seen: &mut HashSet<String>) -> String {
    let name = |p: &Path| {
        p.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "text".to_string())
    };
    let base = format!("{}__{}", name(path_a), name(path_b));

    let mut stem = base.clone();
    let mut n = 2;
    while !seen.insert(stem.clone()) {
        stem = format!("{}_{}", base, n);
        n += 1;
    }
    stem
}
