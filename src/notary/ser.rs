//! Canonical little-endian byte codecs for [`Recipe`] and [`Evidence`].
//!
//! The structures also derive `serde` traits for integrators that prefer
//! a self-describing format; this codec is the byte-stable layout meant
//! for anchoring, storage and transmission.  Both payloads share the same
//! framing: a `u16` wire version, the leaf count, then the length-prefixed
//! record and node lists in ascending index order.

use super::types::{
    Digest, Evidence, LeafRecord, LeafValue, NotaryError, Recipe, SerKind, TreeNode,
};

/// Version tag leading every canonical payload.
pub const WIRE_VERSION: u16 = 1;

const VALUE_TAG_REDACTED: u8 = 0;
const VALUE_TAG_BYTES: u8 = 1;

fn encode_records(out: &mut Vec<u8>, records: &[LeafRecord]) {
    out.extend_from_slice(&(records.len() as u32).to_le_bytes());
    for record in records {
        out.extend_from_slice(&record.index.to_le_bytes());
        match &record.value {
            LeafValue::Redacted => out.push(VALUE_TAG_REDACTED),
            LeafValue::Bytes(bytes) => {
                out.push(VALUE_TAG_BYTES);
                out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                out.extend_from_slice(bytes);
            }
        }
        out.extend_from_slice(&(record.nonce.len() as u32).to_le_bytes());
        out.extend_from_slice(&record.nonce);
    }
}

fn encode_nodes(out: &mut Vec<u8>, nodes: &[TreeNode]) {
    out.extend_from_slice(&(nodes.len() as u32).to_le_bytes());
    for node in nodes {
        out.extend_from_slice(&node.index.to_le_bytes());
        out.extend_from_slice(&(node.hash.as_bytes().len() as u32).to_le_bytes());
        out.extend_from_slice(node.hash.as_bytes());
    }
}

/// Serializes a [`Recipe`] into the canonical byte layout.
pub fn encode_recipe(recipe: &Recipe) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&WIRE_VERSION.to_le_bytes());
    out.extend_from_slice(&recipe.leaf_count.to_le_bytes());
    encode_records(&mut out, &recipe.values);
    encode_nodes(&mut out, &recipe.nodes);
    out
}

/// Serializes an [`Evidence`] into the canonical byte layout.
pub fn encode_evidence(evidence: &Evidence) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&WIRE_VERSION.to_le_bytes());
    out.extend_from_slice(&evidence.leaf_count.to_le_bytes());
    encode_records(&mut out, &evidence.values);
    encode_nodes(&mut out, &evidence.nodes);
    out
}

struct Cursor<'a> {
    bytes: &'a [u8],
    at: usize,
    kind: SerKind,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8], kind: SerKind) -> Self {
        Self { bytes, at: 0, kind }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], NotaryError> {
        if self.at + len > self.bytes.len() {
            return Err(NotaryError::Serialization(self.kind));
        }
        let slice = &self.bytes[self.at..self.at + len];
        self.at += len;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8, NotaryError> {
        Ok(self.take(1)?[0])
    }

    fn take_u16(&mut self) -> Result<u16, NotaryError> {
        let mut raw = [0u8; 2];
        raw.copy_from_slice(self.take(2)?);
        Ok(u16::from_le_bytes(raw))
    }

    fn take_u32(&mut self) -> Result<u32, NotaryError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(raw))
    }

    fn finished(&self) -> bool {
        self.at == self.bytes.len()
    }
}

fn decode_records(cursor: &mut Cursor<'_>) -> Result<Vec<LeafRecord>, NotaryError> {
    let count = cursor.take_u32()? as usize;
    let mut records = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let index = cursor.take_u32()?;
        let value = match cursor.take_u8()? {
            VALUE_TAG_REDACTED => LeafValue::Redacted,
            VALUE_TAG_BYTES => {
                let len = cursor.take_u32()? as usize;
                LeafValue::Bytes(cursor.take(len)?.to_vec())
            }
            _ => return Err(NotaryError::Serialization(cursor.kind)),
        };
        let nonce_len = cursor.take_u32()? as usize;
        let nonce = cursor.take(nonce_len)?.to_vec();
        records.push(LeafRecord {
            index,
            value,
            nonce,
        });
    }
    Ok(records)
}

fn decode_nodes(cursor: &mut Cursor<'_>) -> Result<Vec<TreeNode>, NotaryError> {
    let count = cursor.take_u32()? as usize;
    let mut nodes = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let index = cursor.take_u32()?;
        let len = cursor.take_u32()? as usize;
        let hash = Digest::new(cursor.take(len)?.to_vec());
        nodes.push(TreeNode { index, hash });
    }
    Ok(nodes)
}

/// Deserializes a [`Recipe`] from its canonical byte representation.
pub fn decode_recipe(bytes: &[u8]) -> Result<Recipe, NotaryError> {
    let mut cursor = Cursor::new(bytes, SerKind::Recipe);
    if cursor.take_u16()? != WIRE_VERSION {
        return Err(NotaryError::Serialization(SerKind::Recipe));
    }
    let leaf_count = cursor.take_u32()?;
    let values = decode_records(&mut cursor)?;
    let nodes = decode_nodes(&mut cursor)?;
    if !cursor.finished() {
        return Err(NotaryError::Serialization(SerKind::Recipe));
    }
    Ok(Recipe {
        leaf_count,
        values,
        nodes,
    })
}

/// Deserializes an [`Evidence`] from its canonical byte representation.
pub fn decode_evidence(bytes: &[u8]) -> Result<Evidence, NotaryError> {
    let mut cursor = Cursor::new(bytes, SerKind::Evidence);
    if cursor.take_u16()? != WIRE_VERSION {
        return Err(NotaryError::Serialization(SerKind::Evidence));
    }
    let leaf_count = cursor.take_u32()?;
    let values = decode_records(&mut cursor)?;
    let nodes = decode_nodes(&mut cursor)?;
    if !cursor.finished() {
        return Err(NotaryError::Serialization(SerKind::Evidence));
    }
    Ok(Evidence {
        leaf_count,
        values,
        nodes,
    })
}
