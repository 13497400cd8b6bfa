use crate::error::{Error, Result};
use crate::DocId;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::collections::HashSet;

/// A caller-identified document. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

/// Ordered collection of documents with unique IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents with caller-assigned IDs, kept in the given order.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DocId, S)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut docs = Vec::new();
        for (id, text) in pairs {
            if !seen.insert(id) {
                return Err(Error::DuplicateDocument(id));
            }
            docs.push(Document { id, text: text.into() });
        }
        Ok(Self { docs })
    }

    /// Documents numbered sequentially from 1.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let docs = texts
            .into_iter()
            .zip(1..)
            .map(|(text, id)| Document { id, text: text.into() })
            .collect();
        Self { docs }
    }

    /// One document per non-blank line. The ID is the 1-based line number, so
    /// blank lines leave gaps in the numbering.
    pub fn from_lines(input: &str) -> Self {
        let docs = input
            .trim()
            .split('\n')
            .zip(1..)
            .filter(|(line, _)| !line.trim().is_empty())
            .map(|(line, id)| Document { id, text: line.trim_end_matches('\r').to_string() })
            .collect();
        Self { docs }
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// SHA-1 over every (id, text) pair in order, hex encoded.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha1::new();
        for doc in &self.docs {
            hasher.update(doc.id.to_le_bytes());
            hasher.update((doc.text.len() as u64).to_le_bytes());
            hasher.update(doc.text.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}
