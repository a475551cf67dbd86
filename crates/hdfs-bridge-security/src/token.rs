//! Delegation tokens.

use hdfs_bridge_protocol::writable;
use std::io::{self, Read, Write};

/// Kind tag of tokens issued by the HDFS NameNode.
pub const HDFS_DELEGATION_TOKEN_KIND: &str = "HDFS_DELEGATION_TOKEN";

/// An opaque credential tagged with the system it authenticates against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    identifier: Vec<u8>,
    password: Vec<u8>,
    kind: String,
    service: String,
}

impl Token {
    pub fn new(
        identifier: Vec<u8>,
        password: Vec<u8>,
        kind: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            identifier,
            password,
            kind: kind.into(),
            service: service.into(),
        }
    }

    pub fn identifier(&self) -> &[u8] {
        &self.identifier
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Write in Hadoop's `Token.write` layout.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writable::write_bytes(out, &self.identifier)?;
        writable::write_bytes(out, &self.password)?;
        writable::write_string(out, &self.kind)?;
        writable::write_string(out, &self.service)
    }

    /// Read a token written by [`Token::write`].
    pub fn read<R: Read + ?Sized>(input: &mut R) -> io::Result<Self> {
        Ok(Self {
            identifier: writable::read_bytes(input)?,
            password: writable::read_bytes(input)?,
            kind: writable::read_string(input)?,
            service: writable::read_string(input)?,
        })
    }
}
