use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::warn;

use crate::record::{self, RecordError, SaleHeader, SaleLine};
use crate::{Agent, Money, Product};

/// The file extension shared by all input files
pub const SALES_FILE_EXT: &str = "txt";

/// Possible errors to occur while loading or aggregating sales data
///
/// All of these abort the run. Malformed headers, unknown agents, and
/// unknown products are not errors: they skip the affected file or line
/// with a diagnostic and processing continues.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("cannot access {}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}, line {line}", .path.display())]
    Record {
        path: PathBuf,
        line: u64,
        #[source]
        source: RecordError,
    },
}

/// The central engine folding catalog, roster, and sales files into
/// per-product and per-agent totals
///
/// The engine owns both lookup tables. Only the `process_*` methods
/// mutate the accumulators; report generation reads the tables through
/// the accessors. Accumulators are never reset, so processing the same
/// file twice doubles its contribution.
#[derive(Debug, Default)]
pub struct SalesEngine {
    /// All catalog products, keyed by product id
    products: HashMap<String, Product>,
    /// All roster agents, keyed by document number
    agents: HashMap<String, Agent>,
}

impl SalesEngine {
    /// Creates a new engine with empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// The product table, keyed by product id
    pub fn products(&self) -> &HashMap<String, Product> {
        &self.products
    }

    /// The agent table, keyed by document number
    pub fn agents(&self) -> &HashMap<String, Agent> {
        &self.agents
    }

    /// Loads the product catalog and returns the number of well-formed
    /// lines
    ///
    /// Records with fewer than three fields are skipped; a later record
    /// with an already known id replaces the earlier product.
    pub fn load_products(&mut self, path: &Path) -> Result<usize, ProcessError> {
        let mut reader = record::reader(open(path)?);
        let mut loaded = 0;

        for result in reader.records() {
            let record = result.map_err(|source| read_error(path, source))?;
            match Product::from_record(&record) {
                Ok(Some(product)) => {
                    self.products.insert(product.id().to_owned(), product);
                    loaded += 1;
                }
                Ok(None) => {}
                Err(source) => return Err(record_error(path, &record, source)),
            }
        }

        Ok(loaded)
    }

    /// Loads the agent roster and returns the number of well-formed lines
    ///
    /// Records with fewer than four fields are skipped; a later record
    /// with an already known document number replaces the earlier agent.
    pub fn load_agents(&mut self, path: &Path) -> Result<usize, ProcessError> {
        let mut reader = record::reader(open(path)?);
        let mut loaded = 0;

        for result in reader.records() {
            let record = result.map_err(|source| read_error(path, source))?;
            if let Some(agent) = Agent::from_record(&record) {
                self.agents.insert(agent.document_number().to_owned(), agent);
                loaded += 1;
            }
        }

        Ok(loaded)
    }

    /// Processes every sales file in `dir`
    ///
    /// `exclude` lists the exact file names of the catalog and roster so
    /// they are not mistaken for sales files. A directory without sales
    /// files is not an error; the reports then show all-zero totals.
    pub fn process_sales_dir(&mut self, dir: &Path, exclude: &[&str]) -> Result<(), ProcessError> {
        let files = list_sales_files(dir, exclude)?;
        if files.is_empty() {
            warn!("no sales files found in {}", dir.display());
            return Ok(());
        }

        for path in &files {
            self.process_sales_file(path)?;
        }

        Ok(())
    }

    /// Processes a single sales file
    ///
    /// The first line names the owning agent; every following line is one
    /// sale. A missing, malformed, or unknown header skips the whole
    /// file; an unknown product skips only its line. Every resolved sale
    /// grows both accumulators: the product by the quantity, the agent by
    /// quantity times unit price.
    pub fn process_sales_file(&mut self, path: &Path) -> Result<(), ProcessError> {
        let mut reader = record::reader(open(path)?);
        let mut records = reader.records();

        let header = match records.next() {
            Some(result) => result.map_err(|source| read_error(path, source))?,
            // an empty sales file sells nothing
            None => return Ok(()),
        };
        let header = match SaleHeader::from_record(&header) {
            Some(header) => header,
            None => {
                warn!("malformed header in {}, skipping file", path.display());
                return Ok(());
            }
        };

        let agent = match self.agents.get_mut(&header.document_number) {
            Some(agent) => agent,
            None => {
                warn!(
                    "unknown agent {} in {}, skipping file",
                    header.document_number,
                    path.display()
                );
                return Ok(());
            }
        };

        for result in records {
            let record = result.map_err(|source| read_error(path, source))?;
            let sale = match SaleLine::from_record(&record) {
                Ok(Some(sale)) => sale,
                Ok(None) => continue,
                Err(source) => return Err(record_error(path, &record, source)),
            };

            match self.products.get_mut(&sale.product_id) {
                Some(product) => {
                    product.record_sale(sale.quantity);
                    agent.record_sale(product.unit_price() * Money::from_num(sale.quantity));
                }
                None => warn!(
                    "unknown product {} in {}, skipping line",
                    sale.product_id,
                    path.display()
                ),
            }
        }

        Ok(())
    }
}

/// Lists the sales files in `dir`
///
/// A sales file has the [`SALES_FILE_EXT`] extension and a file name that
/// is none of the `exclude`d names. The result is sorted so files are
/// always processed in the same order.
pub fn list_sales_files(dir: &Path, exclude: &[&str]) -> Result<Vec<PathBuf>, ProcessError> {
    let entries = fs::read_dir(dir).map_err(|source| ProcessError::FileAccess {
        path: dir.to_owned(),
        source,
    })?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|source| ProcessError::FileAccess {
            path: dir.to_owned(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || path.extension() != Some(OsStr::new(SALES_FILE_EXT)) {
            continue;
        }
        match path.file_name().and_then(OsStr::to_str) {
            Some(name) if !exclude.contains(&name) => files.push(path),
            _ => {}
        }
    }

    files.sort();
    Ok(files)
}

fn open(path: &Path) -> Result<File, ProcessError> {
    File::open(path).map_err(|source| ProcessError::FileAccess {
        path: path.to_owned(),
        source,
    })
}

fn read_error(path: &Path, source: csv::Error) -> ProcessError {
    ProcessError::Read {
        path: path.to_owned(),
        source,
    }
}

fn record_error(path: &Path, record: &StringRecord, source: RecordError) -> ProcessError {
    ProcessError::Record {
        path: path.to_owned(),
        line: record.position().map_or(0, |position| position.line()),
        source,
    }
}
