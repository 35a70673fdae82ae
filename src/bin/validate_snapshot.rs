use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use monza::api::{NewsApiResponse, TrendingApiResponse};
use monza::model::{audit_snapshot, check_rank_ordered, CountMode, MAX_RANK, MIN_RANK};

#[derive(Parser)]
#[command(author, version, about = "Audit a snapshot file for data-model violations", long_about = None)]
struct Cli {
    /// Path to a NewsApiResponse-shaped snapshot file
    snapshot: PathBuf,

    /// articleCount checking: strict, at-least, or off
    #[arg(short, long, default_value = "strict")]
    count_mode: String,

    /// Treat the file as a TrendingApiResponse instead of a NewsApiResponse
    #[arg(long)]
    trending: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let count_mode = CountMode::parse(&cli.count_mode)
        .with_context(|| format!("unknown count mode '{}'", cli.count_mode))?;

    let raw = fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("failed to read {}", cli.snapshot.display()))?;

    let failures = if cli.trending {
        audit_trending(&raw)?
    } else {
        audit_news(&raw, count_mode)?
    };

    if failures > 0 {
        println!("{} violation(s) found", failures);
        process::exit(1);
    }

    println!("OK");
    Ok(())
}

fn audit_news(raw: &str, count_mode: CountMode) -> Result<usize> {
    let response: NewsApiResponse =
        serde_json::from_str(raw).context("file is not a valid NewsApiResponse")?;

    let mut failures = 0;

    if (response.total_count as usize) < response.stories.len() {
        println!(
            "FAIL totalCount: {} is less than the {} stories present",
            response.total_count,
            response.stories.len()
        );
        failures += 1;
    }

    for error in audit_snapshot(&response.stories, count_mode) {
        println!("FAIL {}", error);
        failures += 1;
    }

    Ok(failures)
}

fn audit_trending(raw: &str) -> Result<usize> {
    let response: TrendingApiResponse =
        serde_json::from_str(raw).context("file is not a valid TrendingApiResponse")?;

    let mut failures = 0;

    if let Err(error) = check_rank_ordered(&response.trending) {
        println!("FAIL {}", error);
        failures += 1;
    }

    for item in &response.trending {
        if !(MIN_RANK..=MAX_RANK).contains(&item.rank) {
            println!(
                "FAIL trending: rank {} for '{}' is outside {}..={}",
                item.rank, item.slug, MIN_RANK, MAX_RANK
            );
            failures += 1;
        }
    }

    Ok(failures)
}
