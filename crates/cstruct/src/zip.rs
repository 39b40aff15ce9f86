//! Zip local-file-header listing.
//!
//! Each entry is read in two steps. A fixed prefix (signature plus header)
//! comes first. Its `name_length` and `extra_length` fields then size a
//! second layout, compiled per entry, for the file name and extra data.
//! Entries using a trailing data descriptor (sizes zeroed in the header) are
//! rejected, since their payload length is unknown up front.

use std::io;

use crate::error::{CodecError, CompileError, Result};
use crate::layout::Layout;
use crate::primitive::{fixed_string, int8, uint16, uint32};
use crate::schema::{array_of, field, record};
use crate::value::Value;

/// `type` of a local file header signature (`PK\x03\x04`).
pub const LOCAL_FILE_HEADER: u64 = 0x0403;

/// General-purpose flag bit 3: sizes follow the payload in a data descriptor.
pub const DATA_DESCRIPTOR_FLAG: u64 = 0x0008;

/// Largest read request made while skipping a payload.
const PAYLOAD_CHUNK: usize = 64 * 1024;

/// `{pk: "PK", type: u16}`.
pub fn signature() -> Result<Layout, CompileError> {
    Layout::new(record([
        field("pk", fixed_string(2)),
        field("type", uint16()),
    ]))
}

/// The 26 bytes following a local file header signature.
pub fn local_file_header() -> Result<Layout, CompileError> {
    Layout::new(record([
        field("version", uint16()),
        field("flags", uint16()),
        field("method", uint16()),
        field(
            "timestamp",
            record([field("time", uint16()), field("date", uint16())]),
        ),
        field("crc32", uint32()),
        field("compressed_size", uint32()),
        field("uncompressed_size", uint32()),
        field("name_length", uint16()),
        field("extra_length", uint16()),
    ]))
}

/// File name and extra field of one entry, sized from its header.
pub fn variable_header(name_length: usize, extra_length: usize) -> Result<Layout, CompileError> {
    Layout::new(record([
        field("filename", fixed_string(name_length)),
        field("extdata", array_of(int8(), extra_length)),
    ]))
}

/// One local file entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ZipEntry {
    pub signature: Value,
    pub header: Value,
    pub variable: Value,
}

/// Entries found by [`scan`] and their size totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZipSummary {
    pub entries: Vec<ZipEntry>,
    pub compressed: u64,
    pub uncompressed: u64,
}

impl ZipSummary {
    pub fn files(&self) -> usize {
        self.entries.len()
    }

    /// Compressed over uncompressed size; `None` for an empty archive.
    pub fn ratio(&self) -> Option<f64> {
        (self.uncompressed > 0).then(|| self.compressed as f64 / self.uncompressed as f64)
    }

    /// Entries as a JSON array of `{signature, header, variable}` objects.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.entries
                .iter()
                .map(|e| {
                    let mut obj = serde_json::Map::new();
                    obj.insert("signature".into(), e.signature.clone().into());
                    obj.insert("header".into(), e.header.clone().into());
                    obj.insert("variable".into(), e.variable.clone().into());
                    serde_json::Value::Object(obj)
                })
                .collect(),
        )
    }
}

/// Walks consecutive local file entries.
///
/// `read(n)` must return the next `n` bytes of the archive, or fewer at end
/// of input. Scanning stops at end of input or at the first signature that is
/// not a local file header (normally the central directory). Payloads are
/// skipped in bounded chunks, so a header claiming a huge size never turns
/// into a huge request. A truncated entry fails with
/// [`CodecError::ShortRead`]; an entry with a data descriptor fails with
/// [`CodecError::Unsupported`].
pub fn scan<F>(mut read: F) -> Result<ZipSummary>
where
    F: FnMut(usize) -> io::Result<Vec<u8>>,
{
    let signature = signature()?;
    let header = local_file_header()?;
    let mut summary = ZipSummary::default();

    loop {
        let prefix = read(signature.size() + header.size())?;
        if prefix.len() < signature.size() {
            tracing::debug!(remaining = prefix.len(), "end of input");
            break;
        }
        let sig = signature.parse_bytes(&prefix)?;
        let is_local = sig.get("pk").and_then(Value::as_str) == Some("PK")
            && sig.get("type").and_then(Value::as_u64) == Some(LOCAL_FILE_HEADER);
        if !is_local {
            tracing::debug!(entries = summary.files(), "stopping at non-local signature");
            break;
        }
        let head = header.parse_bytes(&prefix[signature.size()..])?;

        if header_field(&head, "flags")? & DATA_DESCRIPTOR_FLAG != 0 {
            return Err(CodecError::Unsupported(format!(
                "entry {} stores its sizes in a data descriptor",
                summary.files()
            )));
        }

        let name_length = header_field(&head, "name_length")?;
        let extra_length = header_field(&head, "extra_length")?;
        let compressed = header_field(&head, "compressed_size")?;
        let uncompressed = header_field(&head, "uncompressed_size")?;

        let variable = variable_header(name_length as usize, extra_length as usize)?
            .parse(&mut read)?;

        skip_payload(&mut read, compressed)?;

        tracing::trace!(name_length, compressed, uncompressed, "local file entry");
        summary.compressed += compressed;
        summary.uncompressed += uncompressed;
        summary.entries.push(ZipEntry {
            signature: sig,
            header: head,
            variable,
        });
    }

    Ok(summary)
}

fn skip_payload<F>(read: &mut F, len: u64) -> Result<()>
where
    F: FnMut(usize) -> io::Result<Vec<u8>>,
{
    let mut remaining = len;
    while remaining > 0 {
        let want = remaining.min(PAYLOAD_CHUNK as u64) as usize;
        let got = read(want)?.len().min(want);
        remaining -= got as u64;
        if got < want {
            return Err(CodecError::ShortRead {
                expected: len as usize,
                actual: (len - remaining) as usize,
            });
        }
    }
    Ok(())
}

fn header_field(head: &Value, name: &str) -> Result<u64> {
    head.get(name)
        .and_then(Value::as_u64)
        .ok_or_else(|| CodecError::ShapeMismatch(format!("missing header field `{name}`")))
}
