pub use self::{
    agent::Agent,
    engine::{list_sales_files, ProcessError, SalesEngine, SALES_FILE_EXT},
    product::Product,
    record::{RecordError, SaleHeader, SaleLine},
    report::{generate_agent_report, generate_product_report, ReportError},
};

/// The money type used for unit prices and revenue totals
///
/// An unsigned fixed-point number: prices and totals cannot go negative,
/// and sums of two-decimal currency values stay exact. Rounding happens
/// only when a report is formatted.
pub type Money = fixed::types::U51F13;

mod agent;
mod engine;
pub mod generate;
mod product;
mod record;
mod report;
