use crate::error::AdvisorError;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;

const MAGIC: [u8; 4] = *b"CPA1";
const FORMAT_VERSION: u32 = 1;

/// What a serialized artifact claims to contain. Loading an artifact under
/// the wrong kind is version skew and fails loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    NeighborModel,
    TextVectorizer,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    magic: [u8; 4],
    version: u32,
    kind: ArtifactKind,
    checksum: [u8; 32],
    payload: Vec<u8>,
}

fn checksum_of(payload: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hasher.finalize().into()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn corrupt(path: &str, reason: impl Into<String>) -> AdvisorError {
    AdvisorError::CorruptArtifact {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Serialize `value` into a checksummed artifact file. Used by artifact
/// builders and test fixtures; the advisor itself only reads.
pub fn write_artifact<T: Serialize>(path: &str, kind: ArtifactKind, value: &T) -> Result<()> {
    let payload = bincode::serialize(value)?;
    let envelope = Envelope {
        magic: MAGIC,
        version: FORMAT_VERSION,
        kind,
        checksum: checksum_of(&payload),
        payload,
    };
    fs::write(path, bincode::serialize(&envelope)?)?;
    Ok(())
}

/// Read and verify an artifact file. Any failure aborts startup: an
/// unreadable file is `MissingArtifact`, everything past that (bad magic,
/// format version, kind, checksum, or payload decode) is `CorruptArtifact`.
pub fn read_artifact<T: DeserializeOwned>(path: &str, kind: ArtifactKind) -> Result<T, AdvisorError> {
    let raw = fs::read(path).map_err(|e| AdvisorError::MissingArtifact {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let envelope: Envelope = bincode::deserialize(&raw)
        .map_err(|e| corrupt(path, format!("not a careerpath artifact: {}", e)))?;

    if envelope.magic != MAGIC {
        return Err(corrupt(path, "bad magic bytes"));
    }
    if envelope.version != FORMAT_VERSION {
        return Err(corrupt(
            path,
            format!(
                "format version {} but this build reads {}",
                envelope.version, FORMAT_VERSION
            ),
        ));
    }
    if envelope.kind != kind {
        return Err(corrupt(
            path,
            format!("expected {:?} but found {:?}", kind, envelope.kind),
        ));
    }

    let checksum = checksum_of(&envelope.payload);
    if checksum != envelope.checksum {
        return Err(corrupt(path, "checksum mismatch, file is damaged"));
    }
    log::debug!("loaded {:?} artifact '{}' sha256={}", kind, path, hex(&checksum));

    bincode::deserialize(&envelope.payload)
        .map_err(|e| corrupt(path, format!("payload does not decode: {}", e)))
}
