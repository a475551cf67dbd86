//! Hadoop `Writable` encoding primitives.
//!
//! Integers use Hadoop's zero-compressed variable-length encoding, strings are
//! UTF-8 prefixed with their byte length (`Text`), and compressed strings are
//! gzip payloads prefixed with a big-endian `i32` length. All functions work on
//! plain [`std::io::Read`] / [`std::io::Write`] streams.

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{self, Read, Write};

/// Write a variable-length `i64`.
pub fn write_vlong<W: Write + ?Sized>(out: &mut W, value: i64) -> io::Result<()> {
    if (-112..=127).contains(&value) {
        return out.write_all(&[value as u8]);
    }

    let mut value = value;
    let mut len: i32 = -112;
    if value < 0 {
        value = !value;
        len = -120;
    }
    let mut tmp = value;
    while tmp != 0 {
        tmp >>= 8;
        len -= 1;
    }
    out.write_all(&[len as i8 as u8])?;

    let len = if len < -120 { -(len + 120) } else { -(len + 112) };
    for idx in (1..=len).rev() {
        let shift = (idx - 1) * 8;
        out.write_all(&[((value >> shift) & 0xFF) as u8])?;
    }
    Ok(())
}

/// Write a variable-length `i32`.
pub fn write_vint<W: Write + ?Sized>(out: &mut W, value: i32) -> io::Result<()> {
    write_vlong(out, i64::from(value))
}

/// Read a variable-length `i64`.
pub fn read_vlong<R: Read + ?Sized>(input: &mut R) -> io::Result<i64> {
    let first = read_u8(input)? as i8;
    let len = decode_vint_size(first);
    if len == 1 {
        return Ok(i64::from(first));
    }
    let mut value: i64 = 0;
    for _ in 0..len - 1 {
        value = (value << 8) | i64::from(read_u8(input)?);
    }
    Ok(if is_negative_vint(first) { !value } else { value })
}

/// Read a variable-length `i32`, rejecting values outside the `i32` range.
pub fn read_vint<R: Read + ?Sized>(input: &mut R) -> io::Result<i32> {
    let value = read_vlong(input)?;
    i32::try_from(value).map_err(|_| invalid_data(format!("value too long to fit in integer: {value}")))
}

/// Total encoded size of a vint given its first byte.
fn decode_vint_size(first: i8) -> usize {
    let first = i32::from(first);
    if first >= -112 {
        1
    } else if first < -120 {
        (-119 - first) as usize
    } else {
        (-111 - first) as usize
    }
}

fn is_negative_vint(first: i8) -> bool {
    first < -120 || (-112..0).contains(&first)
}

/// Write a `Text` string: vint byte length followed by UTF-8 bytes.
pub fn write_string<W: Write + ?Sized>(out: &mut W, value: &str) -> io::Result<()> {
    write_bytes(out, value.as_bytes())
}

/// Read a `Text` string.
pub fn read_string<R: Read + ?Sized>(input: &mut R) -> io::Result<String> {
    let bytes = read_bytes(input)?;
    String::from_utf8(bytes).map_err(|err| invalid_data(format!("malformed utf-8 in text: {err}")))
}

/// Write a byte array prefixed with its vint length.
pub fn write_bytes<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    let len = i32::try_from(bytes.len())
        .map_err(|_| invalid_data(format!("byte array too large: {}", bytes.len())))?;
    write_vint(out, len)?;
    out.write_all(bytes)
}

/// Read a byte array prefixed with its vint length.
pub fn read_bytes<R: Read + ?Sized>(input: &mut R) -> io::Result<Vec<u8>> {
    let len = read_vint(input)?;
    let len = usize::try_from(len).map_err(|_| invalid_data(format!("negative length: {len}")))?;
    read_exact_vec(input, len)
}

/// Write a gzip-compressed string; `None` is encoded as length `-1`.
pub fn write_compressed_string<W: Write + ?Sized>(
    out: &mut W,
    value: Option<&str>,
) -> io::Result<()> {
    let Some(value) = value else {
        return out.write_all(&(-1i32).to_be_bytes());
    };
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(value.as_bytes())?;
    let compressed = encoder.finish()?;
    let len = i32::try_from(compressed.len())
        .map_err(|_| invalid_data(format!("compressed string too large: {}", compressed.len())))?;
    out.write_all(&len.to_be_bytes())?;
    out.write_all(&compressed)
}

/// Read a gzip-compressed string written by [`write_compressed_string`].
pub fn read_compressed_string<R: Read + ?Sized>(input: &mut R) -> io::Result<Option<String>> {
    let mut len = [0u8; 4];
    input.read_exact(&mut len)?;
    let len = i32::from_be_bytes(len);
    if len == -1 {
        return Ok(None);
    }
    let len = usize::try_from(len).map_err(|_| invalid_data(format!("negative length: {len}")))?;
    let compressed = read_exact_vec(input, len)?;
    let mut decoded = String::new();
    GzDecoder::new(compressed.as_slice()).read_to_string(&mut decoded)?;
    Ok(Some(decoded))
}

/// Write an optional array of compressed strings; `None` is encoded as vint `-1`.
pub fn write_compressed_string_array<W: Write + ?Sized>(
    out: &mut W,
    values: Option<&[String]>,
) -> io::Result<()> {
    let Some(values) = values else {
        return write_vint(out, -1);
    };
    let len = i32::try_from(values.len())
        .map_err(|_| invalid_data(format!("string array too large: {}", values.len())))?;
    write_vint(out, len)?;
    for value in values {
        write_compressed_string(out, Some(value))?;
    }
    Ok(())
}

/// Read an optional array of compressed strings. Null elements are dropped.
pub fn read_compressed_string_array<R: Read + ?Sized>(
    input: &mut R,
) -> io::Result<Option<Vec<String>>> {
    let len = read_vint(input)?;
    if len == -1 {
        return Ok(None);
    }
    let len = usize::try_from(len).map_err(|_| invalid_data(format!("negative length: {len}")))?;
    let mut values = Vec::with_capacity(len.min(64));
    for _ in 0..len {
        if let Some(value) = read_compressed_string(input)? {
            values.push(value);
        }
    }
    Ok(Some(values))
}

fn read_u8<R: Read + ?Sized>(input: &mut R) -> io::Result<u8> {
    let mut byte = [0u8; 1];
    input.read_exact(&mut byte)?;
    Ok(byte[0])
}

/// Read exactly `len` bytes without trusting `len` for the up-front allocation.
fn read_exact_vec<R: Read + ?Sized>(input: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(len.min(8 * 1024));
    let read = input.take(len as u64).read_to_end(&mut bytes)?;
    if read != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {len} bytes, found {read}"),
        ));
    }
    Ok(bytes)
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
