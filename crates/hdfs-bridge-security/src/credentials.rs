//! Token and secret-key collections, readable from Hadoop token storage files.
//!
//! Storage layout: magic `HDTS`, version byte `0`, vint token count followed by
//! `Text` alias + token per entry, then vint secret count followed by `Text`
//! alias + vint-length bytes per entry.

use crate::{SecurityError, Token};
use hdfs_bridge_protocol::writable;
use log::debug;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

const TOKEN_STORAGE_MAGIC: &[u8; 4] = b"HDTS";
const TOKEN_STORAGE_VERSION: u8 = 0;

/// Tokens and secret keys held by a user, keyed by alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    tokens: BTreeMap<String, Token>,
    secret_keys: BTreeMap<String, Vec<u8>>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the token stored under `alias`.
    pub fn add_token(&mut self, alias: impl Into<String>, token: Token) {
        self.tokens.insert(alias.into(), token);
    }

    /// Add or replace the secret key stored under `alias`.
    pub fn add_secret_key(&mut self, alias: impl Into<String>, key: impl Into<Vec<u8>>) {
        self.secret_keys.insert(alias.into(), key.into());
    }

    pub fn token(&self, alias: &str) -> Option<&Token> {
        self.tokens.get(alias)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn secret_key(&self, alias: &str) -> Option<&[u8]> {
        self.secret_keys.get(alias).map(Vec::as_slice)
    }

    pub fn number_of_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// Merge `other` into `self`; entries from `other` win.
    pub fn add_all(&mut self, other: Credentials) {
        self.tokens.extend(other.tokens);
        self.secret_keys.extend(other.secret_keys);
    }

    /// Load a token storage file.
    pub fn read_token_storage_file(path: &Path) -> Result<Self, SecurityError> {
        debug!("reading token storage file (path={})", path.display());
        let file = File::open(path).map_err(|source| SecurityError::TokenFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_token_storage(&mut BufReader::new(file))
    }

    /// Read the token storage format from `input`.
    pub fn read_token_storage<R: Read + ?Sized>(input: &mut R) -> Result<Self, SecurityError> {
        let mut magic = [0u8; 4];
        input.read_exact(&mut magic)?;
        if &magic != TOKEN_STORAGE_MAGIC {
            return Err(SecurityError::InvalidTokenStorage(
                "bad header in token storage".to_string(),
            ));
        }
        let mut version = [0u8; 1];
        input.read_exact(&mut version)?;
        if version[0] != TOKEN_STORAGE_VERSION {
            return Err(SecurityError::InvalidTokenStorage(format!(
                "unknown version {} in token storage",
                version[0]
            )));
        }

        let mut credentials = Self::new();
        for _ in 0..read_count(input)? {
            let alias = writable::read_string(input)?;
            let token = Token::read(input)?;
            credentials.tokens.insert(alias, token);
        }
        for _ in 0..read_count(input)? {
            let alias = writable::read_string(input)?;
            let key = writable::read_bytes(input)?;
            credentials.secret_keys.insert(alias, key);
        }
        debug!(
            "read token storage (tokens={}, secret_keys={})",
            credentials.tokens.len(),
            credentials.secret_keys.len()
        );
        Ok(credentials)
    }

    /// Write the token storage format to `out`.
    pub fn write_token_storage<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), SecurityError> {
        out.write_all(TOKEN_STORAGE_MAGIC)?;
        out.write_all(&[TOKEN_STORAGE_VERSION])?;
        write_count(out, self.tokens.len())?;
        for (alias, token) in &self.tokens {
            writable::write_string(out, alias)?;
            token.write(out)?;
        }
        write_count(out, self.secret_keys.len())?;
        for (alias, key) in &self.secret_keys {
            writable::write_string(out, alias)?;
            writable::write_bytes(out, key)?;
        }
        Ok(())
    }
}

fn read_count<R: Read + ?Sized>(input: &mut R) -> Result<usize, SecurityError> {
    let count = writable::read_vint(input)?;
    usize::try_from(count)
        .map_err(|_| SecurityError::InvalidTokenStorage(format!("negative entry count: {count}")))
}

fn write_count<W: Write + ?Sized>(out: &mut W, count: usize) -> Result<(), SecurityError> {
    let count = i32::try_from(count)
        .map_err(|_| SecurityError::InvalidTokenStorage(format!("too many entries: {count}")))?;
    writable::write_vint(out, count)?;
    Ok(())
}
