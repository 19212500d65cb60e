//! Line-oriented text formats: rule mapping, intermediate record and cell locations.

pub mod cell_map;
pub mod ini;
pub mod mapping;
pub mod record;

pub use record::VALUE_SEPARATOR;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::extraction::profile::ProfileSet;
use crate::models::location::CellLocationMap;
use crate::models::record::SectionRecord;

/// Load the rule mapping file.
pub fn load_profiles(path: &Path) -> Result<ProfileSet> {
    let profiles = ProfileSet::parse(&fs::read_to_string(path)?)?;
    debug!("Loaded {} profiles from {}", profiles.len(), path.display());
    Ok(profiles)
}

/// Load an intermediate record file.
pub fn load_record(path: &Path) -> Result<SectionRecord> {
    let record = SectionRecord::parse_ini(&fs::read_to_string(path)?)?;
    debug!("Loaded {} fields from {}", record.field_count(), path.display());
    Ok(record)
}

/// Write an intermediate record file, creating parent directories.
pub fn save_record(record: &SectionRecord, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, record.to_ini())?;
    Ok(())
}

/// Load the cell location file.
pub fn load_cell_locations(path: &Path) -> Result<CellLocationMap> {
    let map = CellLocationMap::parse(&fs::read_to_string(path)?)?;
    debug!("Loaded {} cell locations from {}", map.len(), path.display());
    Ok(map)
}
