//! Compact binary template codec.
//!
//! Record layout (all multi-byte integers big-endian):
//!
//! ```text
//! 4B  magic (50 BC AF 15)
//! 1B  version (current = 2)
//! 2B  total length, including magic
//! 2B  original DPI     (version >= 2)
//! 2B  original width   (version >= 2)
//! 2B  original height  (version >= 2)
//! 2B  minutia count
//! N * 6B minutia records: 2B x, 2B y, 1B direction, 1B type
//! ```
//!
//! Export always writes version 2; import accepts version 1, where the three
//! metadata fields are absent and default to 0.

use std::io::{self, Read, Write};

use nom::combinator::{cond, map_res};
use nom::multi::count;
use nom::number::complete::{be_u16, be_u8};
use nom::{IResult, Parser};
use tracing::debug;

use crate::angle::Angle;
use crate::error::RidgeMatchError;
use crate::minutia::{Minutia, MinutiaType};
use crate::template::Template;

/// Fixed magic bytes opening every compact template record.
pub const MAGIC: [u8; 4] = [0x50, 0xBC, 0xAF, 0x15];

/// Version written by [`encode`].
pub const CURRENT_VERSION: u8 = 2;

/// Magic + version + total length.
const HEADER_LEN: usize = 7;

const MINUTIA_RECORD_LEN: usize = 6;

/// Largest minutia count whose record still fits the 16-bit length field.
const MAX_MINUTIAE: usize = (u16::MAX as usize - 15) / MINUTIA_RECORD_LEN;

/// Serializes a template into a version-2 compact record.
///
/// The length field at offset 5 is patched after the full encode, exactly as
/// conforming readers expect it.
pub fn encode(template: &Template) -> Result<Vec<u8>, RidgeMatchError> {
    if template.minutiae.len() > MAX_MINUTIAE {
        return Err(RidgeMatchError::Format(format!(
            "{} minutiae exceed the compact record capacity of {MAX_MINUTIAE}",
            template.minutiae.len()
        )));
    }

    let mut record =
        Vec::with_capacity(HEADER_LEN + 8 + template.minutiae.len() * MINUTIA_RECORD_LEN);
    record.extend_from_slice(&MAGIC);
    record.push(CURRENT_VERSION);
    // total length, patched below
    record.extend_from_slice(&[0, 0]);
    record.extend_from_slice(&template.original_dpi.to_be_bytes());
    record.extend_from_slice(&template.original_width.to_be_bytes());
    record.extend_from_slice(&template.original_height.to_be_bytes());
    record.extend_from_slice(&(template.minutiae.len() as u16).to_be_bytes());
    for minutia in &template.minutiae {
        record.extend_from_slice(&minutia.x.to_be_bytes());
        record.extend_from_slice(&minutia.y.to_be_bytes());
        record.push(minutia.direction.0);
        record.push(minutia.minutia_type.to_byte());
    }

    let total_length = record.len() as u16;
    record[5..7].copy_from_slice(&total_length.to_be_bytes());

    debug!(
        minutiae = template.minutiae.len(),
        bytes = record.len(),
        "encoded compact template"
    );
    Ok(record)
}

/// Deserializes one isolated compact record into a [`Template`].
///
/// Magic, version and truncation failures are reported as distinct errors,
/// and no partially populated template ever escapes.
pub fn decode(record: &[u8]) -> Result<Template, RidgeMatchError> {
    if record.len() < 4 {
        return Err(RidgeMatchError::Format(format!(
            "record of {} bytes is shorter than the magic",
            record.len()
        )));
    }
    let mut magic = [0u8; 4];
    magic.copy_from_slice(&record[..4]);
    if magic != MAGIC {
        return Err(RidgeMatchError::BadMagic(magic));
    }
    let Some(&version) = record.get(4) else {
        return Err(RidgeMatchError::Format(
            "record ends before the version byte".to_string(),
        ));
    };
    if !(1..=CURRENT_VERSION).contains(&version) {
        return Err(RidgeMatchError::UnsupportedVersion(version));
    }

    let (_, template) = parse_body(&record[5..], version)
        .map_err(|err| RidgeMatchError::Format(format!("template body: {err}")))?;

    debug!(
        version,
        minutiae = template.minutiae.len(),
        "decoded compact template"
    );
    Ok(template)
}

fn parse_body(input: &[u8], version: u8) -> IResult<&[u8], Template> {
    // total length, already consumed by the framing layer
    let (input, _total_length) = be_u16(input)?;
    let (input, metadata) = cond(version >= 2, (be_u16, be_u16, be_u16)).parse(input)?;
    let (original_dpi, original_width, original_height) = metadata.unwrap_or((0, 0, 0));
    let (input, minutia_count) = be_u16(input)?;
    let (input, minutiae) = count(parse_minutia, usize::from(minutia_count)).parse(input)?;
    Ok((
        input,
        Template {
            minutiae,
            original_dpi,
            original_width,
            original_height,
        },
    ))
}

fn parse_minutia(input: &[u8]) -> IResult<&[u8], Minutia> {
    let (input, x) = be_u16(input)?;
    let (input, y) = be_u16(input)?;
    let (input, direction) = be_u8(input)?;
    let (input, minutia_type) = map_res(be_u8, MinutiaType::from_byte).parse(input)?;
    Ok((
        input,
        Minutia {
            x,
            y,
            direction: Angle(direction),
            minutia_type,
        },
    ))
}

/// Reads one framed compact record from an open stream.
///
/// Pulls the 7-byte header first, takes the declared total length from
/// offset 5, then reads the remaining `length - 7` bytes. The returned
/// buffer is the whole record, ready for [`decode`]. Successive calls pull
/// successive templates out of a shared stream.
pub fn read_record<R: Read>(reader: &mut R) -> Result<Vec<u8>, RidgeMatchError> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header).map_err(short_read)?;
    let total_length = usize::from(u16::from_be_bytes([header[5], header[6]]));
    if total_length < HEADER_LEN {
        return Err(RidgeMatchError::Format(format!(
            "declared record length {total_length} is shorter than the header"
        )));
    }
    let mut record = vec![0u8; total_length];
    record[..HEADER_LEN].copy_from_slice(&header);
    reader
        .read_exact(&mut record[HEADER_LEN..])
        .map_err(short_read)?;
    Ok(record)
}

/// Writes one compact record to an open stream.
pub fn write_record<W: Write>(writer: &mut W, record: &[u8]) -> Result<(), RidgeMatchError> {
    writer.write_all(record)?;
    Ok(())
}

fn short_read(err: io::Error) -> RidgeMatchError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        RidgeMatchError::Format("short read, record truncated mid-stream".to_string())
    } else {
        err.into()
    }
}
