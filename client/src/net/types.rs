//! Shared wire DTOs for the client/API boundary.
//!
//! DESIGN
//! ======
//! These types mirror the JSON the library API emits so serde round-trips stay
//! lossless. The root library row is created server-side with only `fields`,
//! so every descriptive column is nullable on the wire.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numeric library identifier. The root library is always [`ROOT_LIBRARY_ID`].
pub type LibraryId = i64;

/// Identifier of the library every hierarchy starts from.
pub const ROOT_LIBRARY_ID: LibraryId = 0;

/// One directory of the unlinked file tree returned by `GET /tree`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Directory name. For the root node this is the full listen root path.
    pub name: String,
    /// Child directories in server order.
    #[serde(default)]
    pub dirs: Vec<TreeNode>,
    /// File names directly inside this directory.
    #[serde(default)]
    pub files: Vec<String>,
}

impl TreeNode {
    /// Prefix handed to this node's children: `prefix + name + "/"`.
    #[must_use]
    pub fn child_prefix(&self, prefix: &str) -> String {
        format!("{prefix}{}/", self.name)
    }

    /// Full paths of every file in this subtree, depth-first, dirs before files.
    #[cfg(test)]
    pub fn file_paths(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths(prefix, &mut out);
        out
    }

    #[cfg(test)]
    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        let next = self.child_prefix(prefix);
        for dir in &self.dirs {
            dir.collect_paths(&next, out);
        }
        out.extend(self.files.iter().map(|f| format!("{next}{f}")));
    }
}

/// Flat library row as echoed by `PUT /library` and `PATCH /library/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRow {
    pub id: LibraryId,
    #[serde(default)]
    pub name: Option<String>,
    /// Destination directory (relative to the library root), always `/`-terminated.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub parent_id: Option<LibraryId>,
    /// Metadata field names defined on this library, in display order.
    #[serde(default)]
    pub fields: Vec<String>,
    /// File-name template filled from a record's attributes.
    #[serde(default)]
    pub format: Option<String>,
}

/// A library with one level of children, as returned by `GET /list_library/:id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySpec {
    pub id: LibraryId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub parent_id: Option<LibraryId>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub format: Option<String>,
    /// Direct child libraries.
    #[serde(rename = "Library", default)]
    pub libraries: Vec<LibrarySpec>,
    /// Records linked directly under this library.
    #[serde(rename = "Record", default)]
    pub records: Vec<RecordSpec>,
}

impl LibrarySpec {
    /// Build a childless spec from a freshly created row.
    #[must_use]
    pub fn from_row(row: LibraryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
            parent_id: row.parent_id,
            fields: row.fields,
            format: row.format,
            libraries: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Shallow-merge an echoed row over this spec. Children and records are kept.
    pub fn merge_row(&mut self, row: LibraryRow) {
        self.id = row.id;
        self.name = row.name;
        self.location = row.location;
        self.parent_id = row.parent_id;
        self.fields = row.fields;
        self.format = row.format;
    }

    /// Display label: the library name, or `"/"` for the unnamed root.
    #[must_use]
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| "/".to_owned())
    }

    /// Location a child named `name` should be created at.
    #[must_use]
    pub fn child_location(&self, name: &str) -> String {
        match self.location.as_deref() {
            Some(location) => format!("{location}{name}/"),
            None => format!("{name}/"),
        }
    }
}

/// A stored record: one file linked under a library with its attribute values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    #[serde(default)]
    pub id: Option<i64>,
    pub parent_id: LibraryId,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Full path of the linked source file.
    pub referrent: String,
}

/// Request body for `PUT /library`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLibrary {
    pub location: String,
    pub name: String,
    pub parent_id: LibraryId,
    pub fields: Vec<String>,
    pub format: Option<String>,
}

/// Request body for `PATCH /library/:id`. Absent members are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl LibraryPatch {
    /// Patch replacing the whole field set.
    #[must_use]
    pub fn fields(fields: Vec<String>) -> Self {
        Self { fields: Some(fields), format: None }
    }

    /// Patch replacing the file-name format.
    #[must_use]
    pub fn format(format: String) -> Self {
        Self { fields: None, format: Some(format) }
    }
}

/// Request body for `PUT /record`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub attributes: BTreeMap<String, String>,
    pub parent_id: LibraryId,
    pub referrent: String,
}
