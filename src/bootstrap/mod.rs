use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info};

use crate::cloudant::{CloudantError, DatabaseCreated, DocumentStore};

/// Fixed seed table: collection name -> CSV fixture under the data directory.
pub const SEED_COLLECTIONS: &[(&str, &str)] = &[
    ("allergies", "allergies.csv"),
    ("appointments", "appointments.csv"),
    ("observations", "observations.csv"),
    ("organizations", "organizations.csv"),
    ("patients", "patients.csv"),
    ("prescriptions", "prescriptions.csv"),
    ("providers", "providers.csv"),
];

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to read CSV fixture {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Store(#[from] CloudantError),
}

/// Per-run accounting, for the startup log line and for tests.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: Vec<(String, usize)>,
    pub failed: Vec<String>,
}

/// Seed every collection in [`SEED_COLLECTIONS`] from `data_dir`.
///
/// Collections are processed sequentially in table order; a failure in one
/// is logged and does not stop the ones after it. No retries, no duplicate
/// detection.
pub async fn run(store: &dyn DocumentStore, data_dir: &Path) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for (collection, file) in SEED_COLLECTIONS {
        let path = data_dir.join(file);
        info!("processing collection {} from {}", collection, path.display());
        match seed_collection(store, collection, &path).await {
            Ok(count) => {
                info!("imported {} documents into \"{}\"", count, collection);
                summary.imported.push(((*collection).to_string(), count));
            }
            Err(err) => {
                error!("error processing {}: {}", collection, err);
                summary.failed.push((*collection).to_string());
            }
        }
    }
    summary
}

async fn seed_collection(
    store: &dyn DocumentStore,
    collection: &str,
    path: &Path,
) -> Result<usize, BootstrapError> {
    match store.create_database(collection).await? {
        DatabaseCreated::Created => {}
        DatabaseCreated::AlreadyExists => {
            info!("collection \"{}\" already exists", collection);
        }
    }

    let docs = read_csv_documents(path)?;
    if docs.is_empty() {
        return Ok(0);
    }
    Ok(store.bulk_insert(collection, docs).await?)
}

/// Parse a CSV fixture into one JSON object per row, field names taken from
/// the header row, every cell a string. A missing or empty file yields no
/// documents and no error.
pub fn read_csv_documents(path: &Path) -> Result<Vec<Value>, BootstrapError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let csv_err = |source| BootstrapError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut docs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let mut doc = Map::new();
        for (field, cell) in headers.iter().zip(record.iter()) {
            doc.insert(field.to_string(), Value::String(cell.to_string()));
        }
        docs.push(Value::Object(doc));
    }
    Ok(docs)
}
