//! Pending file entries awaiting a link into the current library.

#[cfg(test)]
#[path = "pending_test.rs"]
mod pending_test;

use std::collections::BTreeMap;

use crate::net::types::{LibraryId, NewRecord};

/// One metadata input on a pending entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingField {
    pub name: String,
    pub value: String,
}

/// A selected tree file with one input per current library field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEntry {
    /// Full path of the source file.
    pub path: String,
    /// Inputs in library field order.
    pub fields: Vec<PendingField>,
}

impl PendingEntry {
    #[must_use]
    pub fn new(path: &str, fields: &[String]) -> Self {
        let mut entry = Self { path: path.to_owned(), fields: Vec::new() };
        entry.attach_fields(fields);
        entry
    }

    /// Rebuild the inputs to match `fields`. Values typed for fields that
    /// survive the change are carried over; inputs for dropped fields go away.
    pub fn attach_fields(&mut self, fields: &[String]) {
        let mut previous: BTreeMap<String, String> = self
            .fields
            .drain(..)
            .map(|f| (f.name, f.value))
            .collect();
        self.fields = fields
            .iter()
            .map(|name| PendingField {
                name: name.clone(),
                value: previous.remove(name).unwrap_or_default(),
            })
            .collect();
    }

    /// Set the value of input `name`. Returns `false` if no such input exists.
    pub fn set_value(&mut self, name: &str, value: String) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Request body linking this file under `parent_id`.
    #[must_use]
    pub fn to_record(&self, parent_id: LibraryId) -> NewRecord {
        NewRecord {
            attributes: self.attributes(),
            parent_id,
            referrent: self.path.clone(),
        }
    }
}
