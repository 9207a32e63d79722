//! Tree object
//!
//! A tree is a flat, sorted mapping from workspace path to blob object ID,
//! one snapshot of every tracked file. Nested directories are represented by
//! the `/` separators inside the paths themselves, not by sub-trees.
//!
//! On disk: `tree <size>\0` followed by one `<oid>\t<path>` line per entry.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    pub fn from_entries(entries: BTreeMap<String, ObjectId>) -> Self {
        Tree { entries }
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, ObjectId> {
        self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(path, oid)| format!("{}\t{}", oid.as_ref(), path))
            .collect::<Vec<_>>()
            .join("\n");

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(content.as_bytes())?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let mut entries = BTreeMap::new();
        for line in content.lines() {
            let (oid, path) = line
                .split_once('\t')
                .context("Invalid tree object: missing entry separator")?;
            entries.insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(path, oid)| format!("blob {}\t{}", oid.as_ref(), path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
