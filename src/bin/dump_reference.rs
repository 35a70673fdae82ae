use anyhow::Result;
use clap::Parser;

use monza::model::{CATEGORIES, LEANING_LABELS, STATUS_COLORS};

#[derive(Parser)]
#[command(author, version, about = "Print the static reference tables as JSON", long_about = None)]
struct Cli {
    /// Which table to print: categories, status-colors, leaning-labels, all
    #[arg(short, long, default_value = "all")]
    table: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = match cli.table.as_str() {
        "categories" => serde_json::to_value(&*CATEGORIES)?,
        "status-colors" => serde_json::to_value(&*STATUS_COLORS)?,
        "leaning-labels" => serde_json::to_value(&*LEANING_LABELS)?,
        "all" => serde_json::json!({
            "categories": &*CATEGORIES,
            "statusColors": &*STATUS_COLORS,
            "leaningLabels": &*LEANING_LABELS,
        }),
        other => anyhow::bail!("unknown table '{}'", other),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
