//! Sorted-by-name lookup table for per-field type/help strings, used by
//! the HTML renderer's `data-type`/`data-help` attributes when
//! `HandleFlags::INFO` is set. Grounded on the common pattern of sorting
//! a table once up front and then searching it rather than scanning
//! linearly on every lookup.

/// One entry: a field name plus the type/help text to annotate it with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoEntry {
    pub name: &'static str,
    pub kind: &'static str,
    pub help: &'static str,
}

/// A table of [`InfoEntry`] values, sorted by name. `set_info` builds one
/// of these from the caller's slice; building validates sortedness in
/// debug builds only, to keep the release-mode hot path cheap — a
/// release-mode caller who hands in an unsorted table simply gets
/// `lookup` misses rather than a panic, per this crate's "never panic"
/// rule.
#[derive(Clone, Debug, Default)]
pub struct InfoTable {
    entries: Vec<InfoEntry>,
}

impl InfoTable {
    pub fn new(entries: Vec<InfoEntry>) -> Self {
        debug_assert!(
            entries.windows(2).all(|w| w[0].name <= w[1].name),
            "info table must be sorted by name"
        );
        InfoTable { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<&InfoEntry> {
        self.entries
            .binary_search_by_key(&name, |e| e.name)
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_sorted_entry() {
        let table = InfoTable::new(vec![
            InfoEntry { name: "in-stock", kind: "number", help: "Number of items in stock" },
            InfoEntry { name: "name", kind: "string", help: "Name of the item" },
            InfoEntry { name: "sold", kind: "number", help: "Number of items sold" },
        ]);
        assert_eq!(table.lookup("name").unwrap().kind, "string");
        assert!(table.lookup("missing").is_none());
    }
}
