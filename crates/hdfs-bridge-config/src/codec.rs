//! Binary transport for [`Configuration`] objects.
//!
//! Bytes are produced by [`Configuration::write`] and consumed by
//! [`Configuration::read_fields`]. Each direction runs against a scoped byte
//! channel that is released on every exit path. Failures of the write or read
//! itself surface as `Ok(None)`; failures while releasing the channel surface
//! as [`ReleaseError`].

use crate::{Configuration, ReleaseError};
use log::{debug, warn};
use std::io::{self, Cursor, Read, Write};

/// Key under which a serialized configuration is embedded in a larger payload.
pub const HADOOP_CONF_BYTES: &str = "hadoop.conf.bytes";

/// A byte channel that must be explicitly released after use.
pub trait Release {
    /// Tear the channel down. Called exactly once by the codec.
    fn release(&mut self) -> io::Result<()>;
}

/// Destination for serialized bytes.
pub trait ScopedSink: Write + Release {
    /// Everything written so far.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Source of serialized bytes.
pub trait ScopedSource: Read + Release {}

impl<T: Read + Release> ScopedSource for T {}

/// In-memory sink backing [`serialize_hadoop_conf`].
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Vec<u8>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Release for MemorySink {
    fn release(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ScopedSink for MemorySink {
    fn to_bytes(&self) -> Vec<u8> {
        self.buffer.clone()
    }
}

/// In-memory source backing [`deserialize_hadoop_conf`].
#[derive(Debug)]
pub struct MemorySource<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> MemorySource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }
}

impl Read for MemorySource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Release for MemorySource<'_> {
    fn release(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `body` against `channel`, then release it regardless of the outcome.
fn with_released<C: Release, T>(
    mut channel: C,
    body: impl FnOnce(&mut C) -> T,
) -> Result<T, ReleaseError> {
    let outcome = body(&mut channel);
    channel.release()?;
    Ok(outcome)
}

/// Serialize `conf` into memory.
///
/// Returns `Ok(None)` when the configuration cannot be written, for example
/// because one of its resources fails to load.
pub fn serialize_hadoop_conf(conf: &Configuration) -> Result<Option<Vec<u8>>, ReleaseError> {
    serialize_into(conf, MemorySink::new())
}

/// Serialize `conf` through a caller-provided sink.
pub fn serialize_into<S: ScopedSink>(
    conf: &Configuration,
    sink: S,
) -> Result<Option<Vec<u8>>, ReleaseError> {
    with_released(sink, |sink| {
        let written = conf
            .write(sink)
            .and_then(|()| sink.flush().map_err(Into::into));
        match written {
            Ok(()) => {
                let bytes = sink.to_bytes();
                debug!("serialized hadoop configuration (bytes={})", bytes.len());
                Some(bytes)
            }
            Err(err) => {
                debug!("failed to serialize hadoop configuration: {err}");
                None
            }
        }
    })
}

/// Rebuild a configuration from bytes produced by [`serialize_hadoop_conf`].
///
/// The result holds no resources; every decoded pair is an assigned value.
pub fn deserialize_hadoop_conf(bytes: &[u8]) -> Result<Option<Configuration>, ReleaseError> {
    deserialize_from(MemorySource::new(bytes))
}

/// Rebuild a configuration from a caller-provided source.
pub fn deserialize_from<S: ScopedSource>(source: S) -> Result<Option<Configuration>, ReleaseError> {
    with_released(source, |source| {
        let mut conf = Configuration::empty();
        match conf.read_fields(source) {
            Ok(()) => Some(conf),
            Err(err) => {
                warn!("failed to deserialize hadoop configuration: {err}");
                None
            }
        }
    })
}
