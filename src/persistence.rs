//! History log persistence.
//!
//! Two formats are supported:
//! - Text: one line per save, each value followed by a space, appended to a file.
//! - Binary: records of `[u64 LE count][count × i32 LE]`, written to and read
//!   from caller-owned streams. Several records may share one stream.

use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::debug;

use crate::{Result, error::Error};

const COUNT_BYTES: usize = 8;
const VALUE_BYTES: u64 = 4;

/// Parse whitespace-delimited decimal integers.
///
/// # Errors
///
/// Returns [`Error::ParseStep`] for the first token that is not an `i32`.
pub fn parse_steps(input: &str) -> Result<Vec<i32>> {
    input
        .split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|source| Error::ParseStep {
                token: token.to_string(),
                source,
            })
        })
        .collect()
}

/// Append `history` as one text line to the file at `path`, creating it if needed.
pub fn append_text_line(path: &Path, history: &[i32]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Io {
            operation: format!("open {path:?} for saving history"),
            source,
        })?;

    let mut writer = BufWriter::new(file);
    for value in history {
        write!(writer, "{value} ")?;
    }
    writeln!(writer)?;
    writer.flush()?;

    debug!("appended {} history values to {path:?}", history.len());
    Ok(())
}

/// Read every line previously written by [`append_text_line`].
pub fn read_text_lines(path: &Path) -> Result<Vec<Vec<i32>>> {
    let file = File::open(path).map_err(|source| Error::Io {
        operation: format!("open {path:?} for reading history"),
        source,
    })?;

    BufReader::new(file)
        .lines()
        .map(|line| parse_steps(&line?))
        .collect()
}

/// Write `history` as a single binary record.
pub fn write_record<W: Write>(writer: &mut W, history: &[i32]) -> Result<()> {
    writer.write_all(&(history.len() as u64).to_le_bytes())?;
    for value in history {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

/// Read one binary record.
///
/// Returns `Ok(None)` when the stream ends cleanly before a new record. A
/// partial length field yields [`Error::TruncatedLength`]; the declared count
/// is checked against the bytes actually present before any value is
/// returned, so a short payload yields [`Error::TruncatedHistory`] instead of
/// a partial record.
pub fn read_record<R: Read>(reader: &mut R) -> Result<Option<Vec<i32>>> {
    let mut count_bytes = Vec::with_capacity(COUNT_BYTES);
    (&mut *reader)
        .take(COUNT_BYTES as u64)
        .read_to_end(&mut count_bytes)
        .map_err(|source| Error::Io {
            operation: "read history record length".to_string(),
            source,
        })?;

    let mut length = [0u8; COUNT_BYTES];
    match count_bytes.len() {
        0 => return Ok(None),
        COUNT_BYTES => length.copy_from_slice(&count_bytes),
        available => return Err(Error::TruncatedLength { available }),
    }
    let declared = u64::from_le_bytes(length);

    let byte_len = declared
        .checked_mul(VALUE_BYTES)
        .filter(|&len| usize::try_from(len).is_ok())
        .ok_or(Error::HistoryTooLong { declared })?;

    let mut payload = Vec::new();
    (&mut *reader)
        .take(byte_len)
        .read_to_end(&mut payload)
        .map_err(|source| Error::Io {
            operation: "read history record values".to_string(),
            source,
        })?;

    if payload.len() as u64 != byte_len {
        return Err(Error::TruncatedHistory {
            declared,
            available: payload.len() as u64 / VALUE_BYTES,
        });
    }

    Ok(Some(
        payload
            .chunks_exact(VALUE_BYTES as usize)
            .map(|chunk| {
                let mut bytes = [0u8; VALUE_BYTES as usize];
                bytes.copy_from_slice(chunk);
                i32::from_le_bytes(bytes)
            })
            .collect(),
    ))
}
