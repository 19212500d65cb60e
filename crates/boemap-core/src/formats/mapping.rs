//! Rule mapping file: one `[PROFILE]` section per sheet kind, `key = rule` entries.

use tracing::{debug, warn};

use super::ini;
use crate::error::FormatError;
use crate::extraction::profile::{ExtractionProfile, ProfileSet};
use crate::extraction::rules::Rule;
use crate::models::field::FieldKey;

impl ProfileSet {
    /// Parse a rule mapping.
    ///
    /// Unrecognized rules are dropped with a warning. A key repeated within
    /// a profile keeps the later rule.
    pub fn parse(text: &str) -> Result<ProfileSet, FormatError> {
        let mut set = ProfileSet::new();

        for section in ini::parse(text)? {
            let mut profile = ExtractionProfile::new(section.name);

            for entry in section.entries {
                let key = FieldKey::new(entry.key);
                if key.is_empty() {
                    warn!("line {}: rule without a key in [{}]", entry.line, section.name);
                    continue;
                }

                let rule: Rule = match entry.value.parse() {
                    Ok(rule) => rule,
                    Err(e) => {
                        warn!("line {}: [{}] {}: {}", entry.line, section.name, key, e);
                        continue;
                    }
                };

                if let Some(previous) = profile.insert(key.clone(), rule) {
                    warn!(
                        "line {}: [{}] {} redefined, {} replaces {}",
                        entry.line, section.name, key, rule, previous
                    );
                }
            }

            debug!("Loaded profile {} with {} rules", profile.name(), profile.len());
            set.insert(profile);
        }

        Ok(set)
    }
}
