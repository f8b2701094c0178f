use std::io;
use std::path::{Path, PathBuf};

use crate::record;
use crate::{Agent, Money, Product};

/// Possible errors to occur while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot access {}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Writes the agent ranking to `path`
///
/// One line per agent, ordered by descending revenue, after the
/// `Nombre;TotalVentas` header. Totals are formatted with exactly two
/// decimal places. The agents themselves are left untouched.
pub fn generate_agent_report<'a, I>(agents: I, path: &Path) -> Result<(), ReportError>
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut ranking: Vec<&Agent> = agents.into_iter().collect();
    ranking.sort_by(|a, b| b.total_sales().cmp(&a.total_sales()));

    let mut writer = writer(path)?;
    writer
        .write_record(["Nombre", "TotalVentas"])
        .map_err(|source| write_error(path, source))?;
    for agent in ranking {
        writer
            .serialize(agent)
            .map_err(|source| write_error(path, source))?;
    }

    flush(writer, path)
}

/// Writes the product ranking to `path`
///
/// One line per product, ordered by descending units sold, after the
/// `Nombre;Precio;CantidadVendida` header. The products themselves are
/// left untouched.
pub fn generate_product_report<'a, I>(products: I, path: &Path) -> Result<(), ReportError>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut ranking: Vec<&Product> = products.into_iter().collect();
    ranking.sort_by(|a, b| b.quantity_sold().cmp(&a.quantity_sold()));

    let mut writer = writer(path)?;
    writer
        .write_record(["Nombre", "Precio", "CantidadVendida"])
        .map_err(|source| write_error(path, source))?;
    for product in ranking {
        writer
            .serialize(product)
            .map_err(|source| write_error(path, source))?;
    }

    flush(writer, path)
}

/// Formats a price the way the catalog writes it
///
/// Whole prices keep a trailing `.0` (`543210.0`), fractional prices
/// print as-is (`250.5`).
pub(crate) fn format_price(price: Money) -> String {
    if price.frac() == Money::ZERO {
        format!("{}.0", price.int())
    } else {
        price.to_string()
    }
}

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>, ReportError> {
    record::writer(path).map_err(|source| ReportError::FileAccess {
        path: path.to_owned(),
        source,
    })
}

fn write_error(path: &Path, source: csv::Error) -> ReportError {
    ReportError::Write {
        path: path.to_owned(),
        source,
    }
}

fn flush(mut writer: csv::Writer<std::fs::File>, path: &Path) -> Result<(), ReportError> {
    writer.flush().map_err(|source| ReportError::FileAccess {
        path: path.to_owned(),
        source,
    })
}
