//! Deploy payloads
//!
//! Netlify accepts two kinds of deploy:
//!
//! 1. A digest of every file in the deploy (path to content hash). Netlify
//!    answers with the hashes it does not already store; those files are
//!    uploaded separately.
//! 2. A zipped site that Netlify unpacks itself.

use std::io::{Read, Seek};

use serde_json::Value;

use netlify_api::FileDigest;

use crate::error::{InvalidPayload, Result};

const ZIP_SIGNATURES: [&[u8; 4]; 3] = [
    b"PK\x03\x04", // local file header
    b"PK\x05\x06", // end of central directory (empty archive)
    b"PK\x07\x08", // spanned archive
];

/// Content of a deploy: exactly one of a digest or a zip archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPayload {
    /// Path to content hash mapping
    Digest(FileDigest),
    /// Raw bytes of a zip archive
    Archive(Vec<u8>),
}

impl DeployPayload {
    /// Digest deploy
    #[must_use]
    pub fn digest(digest: FileDigest) -> Self {
        Self::Digest(digest)
    }

    /// Archive deploy read from any seekable byte stream
    ///
    /// The stream is rewound and read to the end.
    ///
    /// # Errors
    /// Returns `InvalidPayload::ArchiveType` if the bytes are not a zip archive,
    /// or an I/O error if the stream cannot be read.
    pub fn archive<R: Read + Seek>(mut reader: R) -> Result<Self> {
        reader.rewind()?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::archive_bytes(bytes)?)
    }

    /// Archive deploy from bytes already in memory
    ///
    /// # Errors
    /// Returns `InvalidPayload::ArchiveType` if the bytes are not a zip archive.
    pub fn archive_bytes(bytes: impl Into<Vec<u8>>) -> std::result::Result<Self, InvalidPayload> {
        let bytes = bytes.into();
        if !is_zip(&bytes) {
            return Err(InvalidPayload::ArchiveType);
        }
        Ok(Self::Archive(bytes))
    }

    /// Build a payload from loosely typed inputs
    ///
    /// The archive is checked first and its failure is final: a bad archive
    /// never falls through to digest handling. A `null` or empty-object digest
    /// counts as not supplied.
    ///
    /// # Errors
    /// - `InvalidPayload::ArchiveType` when the archive is not zip data
    /// - `InvalidPayload::Conflicting` when a valid archive comes with a digest
    /// - `InvalidPayload::DigestType` when the digest is not a string-to-string object
    /// - `InvalidPayload::Missing` when neither is supplied
    pub fn from_parts<R: Read + Seek>(archive: Option<R>, digest: Option<Value>) -> Result<Self> {
        let digest = digest.filter(is_supplied);

        if let Some(reader) = archive {
            let payload = Self::archive(reader)?;
            if digest.is_some() {
                return Err(InvalidPayload::Conflicting.into());
            }
            return Ok(payload);
        }

        match digest {
            Some(value) => Ok(Self::Digest(digest_from_value(value)?)),
            None => Err(InvalidPayload::Missing.into()),
        }
    }

    /// Check a payload that may have been built directly from its variants
    ///
    /// # Errors
    /// Returns `InvalidPayload::ArchiveType` for non-zip archive bytes and
    /// `InvalidPayload::Missing` for an empty digest.
    pub fn validate(&self) -> std::result::Result<(), InvalidPayload> {
        match self {
            Self::Archive(bytes) if !is_zip(bytes) => Err(InvalidPayload::ArchiveType),
            Self::Digest(digest) if digest.is_empty() => Err(InvalidPayload::Missing),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }
}

fn is_zip(bytes: &[u8]) -> bool {
    bytes
        .get(..4)
        .is_some_and(|head| ZIP_SIGNATURES.iter().any(|sig| head == sig.as_slice()))
}

fn is_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

fn digest_from_value(value: Value) -> std::result::Result<FileDigest, InvalidPayload> {
    let Value::Object(map) = value else {
        return Err(InvalidPayload::DigestType);
    };

    map.into_iter()
        .map(|(path, hash)| match hash {
            Value::String(hash) => Ok((path, hash)),
            _ => Err(InvalidPayload::DigestType),
        })
        .collect()
}
