//! Named sets of field extraction rules.

use super::rules::Rule;
use crate::models::field::{FieldKey, normalize_key};

/// The rules applied to one kind of sheet, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionProfile {
    name: String,
    rules: Vec<(FieldKey, Rule)>,
}

impl ExtractionProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a rule for `key`. An existing rule for the same key is replaced
    /// in place and returned.
    pub fn insert(&mut self, key: FieldKey, rule: Rule) -> Option<Rule> {
        match self.rules.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, rule)),
            None => {
                self.rules.push((key, rule));
                None
            }
        }
    }

    pub fn with_rule(mut self, key: impl Into<FieldKey>, rule: Rule) -> Self {
        self.insert(key.into(), rule);
        self
    }

    pub fn rule(&self, key: &str) -> Option<&Rule> {
        let key = normalize_key(key);
        self.rules
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, rule)| rule)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&FieldKey, &Rule)> {
        self.rules.iter().map(|(k, r)| (k, r))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// All loaded profiles, looked up by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileSet {
    profiles: Vec<ExtractionProfile>,
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile, replacing any profile with the same name.
    pub fn insert(&mut self, profile: ExtractionProfile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ExtractionProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractionProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<ExtractionProfile> for ProfileSet {
    fn from_iter<I: IntoIterator<Item = ExtractionProfile>>(iter: I) -> Self {
        let mut set = ProfileSet::new();
        for profile in iter {
            set.insert(profile);
        }
        set
    }
}
