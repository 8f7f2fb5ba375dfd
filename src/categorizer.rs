use std::collections::{BTreeMap, HashMap};

/// Payee -> bookkeeping category, keyed the way the config file is keyed:
/// colons removed, trimmed, case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    entries: HashMap<String, String>,
}

fn normalize(payee: &str) -> String {
    payee.replace(':', "").trim().to_ascii_lowercase()
}

impl CategoryMap {
    pub fn new(mapping: &BTreeMap<String, String>) -> Self {
        let entries = mapping
            .iter()
            .map(|(payee, category)| (normalize(payee), category.clone()))
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, payee: &str) -> Option<&str> {
        self.entries.get(&normalize(payee)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
