/// Clubs catalog loading.
///
/// The catalog is a JSON array of club records. Records without a usable
/// description cannot be indexed and are skipped with a warning; everything
/// else is kept verbatim so responses carry the original text.
use serde::Deserialize;
use tracing::warn;

use crate::error::AppError;

/// Raw catalog record as it appears on disk. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ClubRecord {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

/// A club with a non-empty description, ready for indexing.
#[derive(Debug, Clone)]
pub struct Club {
    pub name: String,
    pub description: String,
}

/// Load and filter the catalog from a JSON file.
pub fn load_clubs(path: &str) -> Result<Vec<Club>, AppError> {
    let content = std::fs::read_to_string(path)?;
    let clubs = parse_clubs(&content)?;
    if clubs.is_empty() {
        return Err(AppError::Catalog(format!(
            "no clubs with descriptions in {path}"
        )));
    }
    Ok(clubs)
}

fn parse_clubs(content: &str) -> Result<Vec<Club>, AppError> {
    let records: Vec<ClubRecord> = serde_json::from_str(content)?;
    let total = records.len();

    let clubs: Vec<Club> = records
        .into_iter()
        .filter_map(|record| match record.description {
            Some(description) if !description.is_empty() => Some(Club {
                name: record.name,
                description,
            }),
            _ => {
                warn!(name = %record.name, "skipping club without description");
                None
            }
        })
        .collect();

    if clubs.len() < total {
        warn!(
            kept = clubs.len(),
            skipped = total - clubs.len(),
            "catalog filtered"
        );
    }
    Ok(clubs)
}
