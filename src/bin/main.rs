use std::path::PathBuf;

use clap::Parser;

use sales_report::{generate_agent_report, generate_product_report, SalesEngine};

/// Aggregates semicolon separated sales files into two ranked CSV reports
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Directory holding the catalog, the roster, and the sales files
    #[clap(long, default_value = "archivos")]
    data_dir: PathBuf,
    /// File name of the product catalog inside the data directory
    #[clap(long, default_value = "productos.txt")]
    catalog: String,
    /// File name of the agent roster inside the data directory
    #[clap(long, default_value = "vendedores.txt")]
    roster: String,
    /// Path of the agent revenue report
    #[clap(long, default_value = "reporte_vendedores.csv")]
    agent_report: PathBuf,
    /// Path of the product quantity report
    #[clap(long, default_value = "reporte_productos.csv")]
    product_report: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut engine = SalesEngine::new();
    let products = engine.load_products(&args.data_dir.join(&args.catalog))?;
    let agents = engine.load_agents(&args.data_dir.join(&args.roster))?;
    log::info!("loaded {products} products and {agents} agents");

    engine.process_sales_dir(&args.data_dir, &[args.catalog.as_str(), args.roster.as_str()])?;

    generate_agent_report(engine.agents().values(), &args.agent_report)?;
    generate_product_report(engine.products().values(), &args.product_report)?;

    println!("sales processing finished");
    println!("agent report: {}", args.agent_report.display());
    println!("product report: {}", args.product_report.display());

    Ok(())
}
