//! Wild encounter table loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{EncounterTable, SpeciesId};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Deserialize)]
struct EncounterTableRon {
    area: u16,
    species: Vec<(u16, u32)>, // (species id, weight)
}

/// Loader for encounter tables from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load encounter tables from a RON file.
    ///
    /// RON format: `Vec<(area: u16, species: Vec<(u16, u32)>)>`
    pub fn load(path: &Path) -> LoadResult<Vec<EncounterTable>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to load encounters {}: {}", path.display(), e)
        })
    }

    /// Parse encounter tables from RON text.
    ///
    /// Every table must be able to produce a species; areas may not repeat.
    pub fn parse(content: &str) -> LoadResult<Vec<EncounterTable>> {
        let raw: Vec<EncounterTableRon> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        let mut seen = HashSet::new();
        let mut tables = Vec::with_capacity(raw.len());
        for table in raw {
            anyhow::ensure!(
                seen.insert(table.area),
                "Encounter area {} is defined twice",
                table.area
            );
            anyhow::ensure!(
                table.species.iter().any(|(_, weight)| *weight > 0),
                "Encounter area {} has no weighted species",
                table.area
            );

            tables.push(EncounterTable::new(
                table.area,
                table
                    .species
                    .into_iter()
                    .map(|(id, weight)| (SpeciesId(id), weight))
                    .collect(),
            ));
        }

        Ok(tables)
    }
}
