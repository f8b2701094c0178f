//! Synthetic dataset generation for the report pipeline
//!
//! Writes a random catalog, roster, and one sales file per agent in the
//! exact shape the engine consumes. Every function takes the random
//! source explicitly, so a seeded generator reproduces the same dataset.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::engine::SALES_FILE_EXT;
use crate::record;
use crate::report::format_price;
use crate::Money;

/// Default file name of the generated product catalog
pub const CATALOG_FILE_NAME: &str = "productos.txt";
/// Default file name of the generated agent roster
pub const ROSTER_FILE_NAME: &str = "vendedores.txt";

/// First names drawn for generated agents
pub const FIRST_NAMES: &[&str] = &[
    "Juan", "María", "Pedro", "Ana", "Luis", "Sofía", "Carlos", "Laura", "José", "Gabriela",
    "Andrés", "Paula", "Diego", "Valeria", "Fernando", "Daniela", "Jorge", "Camila", "Miguel",
    "Natalia",
];

/// Last names drawn for generated agents
pub const LAST_NAMES: &[&str] = &[
    "García", "Rodríguez", "Martínez", "López", "González", "Pérez", "Sánchez", "Ramírez",
    "Torres", "Flores", "Rivera", "Gómez", "Díaz", "Reyes", "Cruz", "Morales", "Ortiz", "Jiménez",
    "Vargas", "Romero",
];

/// Document types drawn for generated agents
pub const DOCUMENT_TYPES: &[&str] = &["CC", "NIT"];

/// Product names drawn for the generated catalog
pub const PRODUCT_NAMES: &[&str] = &[
    "Laptop", "Smartphone", "Tablet", "Monitor", "Teclado", "Mouse", "Impresora", "Cámara",
    "Auriculares", "Parlantes", "Disco Duro", "SSD", "RAM", "Procesador", "Tarjeta Gráfica",
    "Motherboard", "Fuente de Poder", "Case", "Router", "Switch", "Smartwatch", "Cargador",
    "Batería", "Cable USB", "Cable HDMI", "Adaptador", "Webcam", "Micrófono", "Escáner", "UPS",
];

/// Possible errors to occur while generating a dataset
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
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
    #[error("no product ids to draw sales from")]
    EmptyCatalog,
}

/// The identity of a generated agent, kept around to name and head the
/// agent's sales file
#[derive(Debug)]
pub struct AgentStub {
    pub document_type: String,
    pub document_number: String,
    pub first_name: String,
}

/// Writes a catalog of `count` random products to `path` and returns
/// their ids
///
/// Ids are `P001`, `P002`, …; names are unique draws from
/// [`PRODUCT_NAMES`] (a numeric suffix resolves collisions) and prices
/// are whole amounts below one million.
pub fn create_products_file(
    rng: &mut impl Rng,
    count: usize,
    path: &Path,
) -> Result<Vec<String>, GenerateError> {
    let mut writer = writer(path)?;
    let mut used_names = HashSet::new();
    let mut ids = Vec::with_capacity(count);

    for index in 0..count {
        let id = format!("P{:03}", index + 1);
        let mut name = pick(rng, PRODUCT_NAMES).to_owned();
        while !used_names.insert(name.clone()) {
            name = format!("{} {}", pick(rng, PRODUCT_NAMES), rng.gen_range(1..=100));
        }
        let price = format_price(Money::from_num(rng.gen_range(10_000u32..1_000_000)));

        writer
            .write_record([id.as_str(), name.as_str(), price.as_str()])
            .map_err(|source| write_error(path, source))?;
        ids.push(id);
    }

    flush(writer, path)?;
    Ok(ids)
}

/// Writes a roster of `count` random agents to `path` and returns the
/// stubs needed to generate their sales files
///
/// Document numbers are unique ten-digit strings.
pub fn create_agents_file(
    rng: &mut impl Rng,
    count: usize,
    path: &Path,
) -> Result<Vec<AgentStub>, GenerateError> {
    let mut writer = writer(path)?;
    let mut used_numbers = HashSet::new();
    let mut stubs = Vec::with_capacity(count);

    for _ in 0..count {
        let document_type = pick(rng, DOCUMENT_TYPES).to_owned();
        let mut document_number = random_document_number(rng);
        while !used_numbers.insert(document_number.clone()) {
            document_number = random_document_number(rng);
        }
        let first_name = pick(rng, FIRST_NAMES).to_owned();
        let last_name = pick(rng, LAST_NAMES);

        writer
            .write_record([document_type.as_str(), document_number.as_str(), first_name.as_str(), last_name])
            .map_err(|source| write_error(path, source))?;
        stubs.push(AgentStub {
            document_type,
            document_number,
            first_name,
        });
    }

    flush(writer, path)?;
    Ok(stubs)
}

/// Writes one agent's sales file into `dir` and returns its path
///
/// The file is named `{first name}_{document number}.txt`, starts with
/// the agent header, and lists `sales_count` sales with quantities
/// between 1 and 10. Sale lines carry a trailing delimiter, the same
/// shape the upstream files have. Products repeat only once the catalog
/// is exhausted.
pub fn create_sales_file(
    rng: &mut impl Rng,
    sales_count: usize,
    agent: &AgentStub,
    dir: &Path,
    product_ids: &[String],
) -> Result<PathBuf, GenerateError> {
    if product_ids.is_empty() {
        return Err(GenerateError::EmptyCatalog);
    }

    let file_name = format!(
        "{}_{}.{}",
        agent.first_name.to_lowercase().replace(' ', "_"),
        agent.document_number,
        SALES_FILE_EXT,
    );
    let path = dir.join(file_name);

    let mut writer = writer(&path)?;
    writer
        .write_record([agent.document_type.as_str(), agent.document_number.as_str()])
        .map_err(|source| write_error(&path, source))?;

    let mut used_products = HashSet::new();
    for _ in 0..sales_count {
        let mut product_id = &product_ids[rng.gen_range(0..product_ids.len())];
        while used_products.contains(product_id) && used_products.len() < product_ids.len() {
            product_id = &product_ids[rng.gen_range(0..product_ids.len())];
        }
        used_products.insert(product_id);

        let quantity = rng.gen_range(1..=10u32).to_string();
        // the empty third field renders as `P001;3;`
        writer
            .write_record([product_id.as_str(), quantity.as_str(), ""])
            .map_err(|source| write_error(&path, source))?;
    }

    flush(writer, &path)?;
    Ok(path)
}

/// Generates a complete dataset under `dir`
///
/// Creates the directory if needed, then writes the catalog
/// ([`CATALOG_FILE_NAME`]), the roster ([`ROSTER_FILE_NAME`]), and one
/// sales file per agent with 5 to 19 sales.
pub fn generate_dataset(
    rng: &mut impl Rng,
    dir: &Path,
    product_count: usize,
    agent_count: usize,
) -> Result<(), GenerateError> {
    fs::create_dir_all(dir).map_err(|source| GenerateError::FileAccess {
        path: dir.to_owned(),
        source,
    })?;

    let product_ids = create_products_file(rng, product_count, &dir.join(CATALOG_FILE_NAME))?;
    let agents = create_agents_file(rng, agent_count, &dir.join(ROSTER_FILE_NAME))?;

    for agent in &agents {
        let sales_count = rng.gen_range(5..20);
        create_sales_file(rng, sales_count, agent, dir, &product_ids)?;
    }

    Ok(())
}

fn pick<'a>(rng: &mut impl Rng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn random_document_number(rng: &mut impl Rng) -> String {
    rng.gen_range(1_000_000_000u64..10_000_000_000u64).to_string()
}

fn writer(path: &Path) -> Result<csv::Writer<fs::File>, GenerateError> {
    record::writer(path).map_err(|source| GenerateError::FileAccess {
        path: path.to_owned(),
        source,
    })
}

fn write_error(path: &Path, source: csv::Error) -> GenerateError {
    GenerateError::Write {
        path: path.to_owned(),
        source,
    }
}

fn flush(mut writer: csv::Writer<fs::File>, path: &Path) -> Result<(), GenerateError> {
    writer.flush().map_err(|source| GenerateError::FileAccess {
        path: path.to_owned(),
        source,
    })
}
