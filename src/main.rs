use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::time::Instant;
use taxon_decompose::cli::{Cli, OutputMode};
use taxon_decompose::csv_handler::{load_records, write_json_lines, write_tsv};
use taxon_decompose::error::Result;
use taxon_decompose::taxon::{DecomposedName, Decomposer, HybridFlag, Rank, RankCode};

const CHUNK_SIZE: usize = 1024;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .init();

    info!("Starting taxon decomposition...");
    info!("Input file: {:?}", cli.input_file);
    info!("Output file: {:?} ({:?})", cli.output_file, cli.mode);

    let start_time = Instant::now();
    let config = cli.decomposer_config();
    info!("Policies: {:?}", config);

    // 1. Load records
    let delimiter = cli.delimiter_byte()?;
    let (table, records) = match load_records(&cli.input_file, delimiter, &cli.column_config()) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load input file: {}", e);
            return Err(e);
        }
    };
    if records.is_empty() {
        info!("Input file contains no records. Exiting.");
        return Ok(());
    }

    // 2. Rank codes are checked for the whole batch before any row is parsed.
    let decomposer = Decomposer::new(config);
    if let Err(e) = decomposer.validate_rank_codes(&records) {
        error!("{}", e);
        return Err(e);
    }

    // 3. Decompose
    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(records.len() as u64)
    };
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("##-"));
    }

    let mut results: Vec<DecomposedName> = Vec::with_capacity(records.len());
    for chunk in records.chunks(CHUNK_SIZE) {
        results.extend(decomposer.decompose_batch(chunk)?);
        pb.inc(chunk.len() as u64);
    }
    pb.finish_with_message("Decomposition complete.");

    // 4. Write output
    let written = match cli.mode {
        OutputMode::Tsv => write_tsv(&cli.output_file, &table, &results),
        OutputMode::JsonLines => write_json_lines(&cli.output_file, &results),
    };
    if let Err(e) = written {
        error!("Failed to write {:?}: {}", cli.output_file, e);
        return Err(e);
    }
    info!("Output written to {:?}", cli.output_file);

    let duration = start_time.elapsed();
    info!("Total execution time: {:.2?}", duration);

    print_summary(&records, &results);
    Ok(())
}

fn print_summary(records: &[taxon_decompose::RawName], results: &[DecomposedName]) {
    let missing_rank = records.iter().filter(|r| r.rank_code.is_none()).count();
    let qualified = results.iter().filter(|r| !r.qualifier.is_empty()).count();
    let new_taxa = results
        .iter()
        .filter(|r| Rank::ALL.iter().any(|&rank| r.field(rank).new_flag))
        .count();
    let hybrids = results
        .iter()
        .filter(|r| {
            Rank::EPITHETS
                .iter()
                .any(|&rank| r.field(rank).hybrid == HybridFlag::True)
        })
        .count();
    // Infraspecific records whose marker was not found.
    let unresolved = records
        .iter()
        .zip(results)
        .filter(|(raw, out)| match raw.rank_code.and_then(RankCode::rank) {
            Some(rank @ (Rank::Subspecies | Rank::Variety | Rank::Forma)) => {
                out.field(rank).epithet.is_empty()
            }
            _ => false,
        })
        .count();

    println!("\n--- Summary Report ---");
    println!("Records decomposed: {}", results.len());
    println!("Records with a qualifier: {}", qualified);
    println!("Records flagged as new taxa: {}", new_taxa);
    println!("Records with a hybrid epithet: {}", hybrids);
    if missing_rank > 0 {
        println!("Records without rank code (genus only): {}", missing_rank);
    }
    if unresolved > 0 {
        warn!(
            "{} infraspecific record(s) had no matching rank marker",
            unresolved
        );
        println!("Infraspecific records left empty: {}", unresolved);
    }
}
