use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sales_report::generate;

/// Generates a random sales dataset for the report pipeline
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Directory the dataset is written to
    #[clap(long, default_value = "archivos")]
    data_dir: PathBuf,
    /// Number of catalog products
    #[clap(long, default_value_t = 30)]
    products: usize,
    /// Number of roster agents
    #[clap(long, default_value_t = 10)]
    agents: usize,
    /// Seed for a reproducible dataset
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate::generate_dataset(&mut rng, &args.data_dir, args.products, args.agents)?;

    println!("dataset written to {}", args.data_dir.display());

    Ok(())
}
