use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Writer, WriterBuilder};

/// The field delimiter shared by every input and output file
pub const DELIMITER: u8 = b';';

/// Possible errors to occur while parsing a single record
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid unit price {value:?}")]
    InvalidPrice {
        value: String,
        #[source]
        source: fixed::ParseFixedError,
    },
    #[error("invalid quantity {value:?}")]
    InvalidQuantity {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Builds a reader for the semicolon separated input files
///
/// Fields are the raw substrings between delimiters: no header row, no
/// quoting, no trimming, and records may differ in length.
pub fn reader<R: Read>(input: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input)
}

/// Builds a writer producing the same semicolon separated format
pub fn writer(path: &Path) -> io::Result<Writer<File>> {
    let file = File::create(path)?;
    Ok(WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_writer(file))
}

/// The first line of a sales file, naming the agent the sales belong to
#[derive(Debug, PartialEq, Eq)]
pub struct SaleHeader {
    pub document_type: String,
    pub document_number: String,
}

impl SaleHeader {
    /// Parses `documentType;documentNumber`; extra fields are ignored
    ///
    /// Returns `None` for records with fewer than two fields, in which
    /// case the whole file has to be skipped.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        match (record.get(0), record.get(1)) {
            (Some(document_type), Some(document_number)) => Some(Self {
                document_type: document_type.to_owned(),
                document_number: document_number.to_owned(),
            }),
            _ => None,
        }
    }
}

/// One sale inside a sales file
///
/// Sales are transient: they are folded into the product and agent
/// accumulators and never kept around.
#[derive(Debug, PartialEq, Eq)]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: u32,
}

impl SaleLine {
    /// Parses `productId;quantity`; a trailing delimiter (empty extra
    /// field) is tolerated and ignored
    ///
    /// Records with fewer than two fields yield `Ok(None)` and are
    /// skipped by the caller; a quantity that does not parse as a
    /// non-negative integer is an error.
    pub fn from_record(record: &StringRecord) -> Result<Option<Self>, RecordError> {
        let (product_id, quantity) = match (record.get(0), record.get(1)) {
            (Some(product_id), Some(quantity)) => (product_id, quantity),
            _ => return Ok(None),
        };
        let quantity = quantity
            .parse()
            .map_err(|source| RecordError::InvalidQuantity {
                value: quantity.to_owned(),
                source,
            })?;

        Ok(Some(Self {
            product_id: product_id.to_owned(),
            quantity,
        }))
    }
}
