use crate::config::Format;
use chrono::{DateTime, Utc};
use ksuid::Ksuid;
use std::io::{self, Write};

/// Writes `id` to `out` in the given format.
///
/// Text formats end with a newline; `payload` and `raw` write bare bytes.
pub fn write_id<W: Write>(
    out: &mut W,
    id: &Ksuid,
    format: Format,
    verbose: bool,
) -> io::Result<()> {
    if verbose {
        write!(out, "{id}: ")?;
    }

    match format {
        Format::String => writeln!(out, "{id}"),
        Format::Inspect => write_inspect(out, id),
        Format::Time => writeln!(out, "{}", utc_time(id)),
        Format::Timestamp => writeln!(out, "{}", id.timestamp()),
        Format::Payload => out.write_all(&id.payload()),
        Format::Raw => out.write_all(id.as_bytes()),
    }
}

fn write_inspect<W: Write>(out: &mut W, id: &Ksuid) -> io::Result<()> {
    writeln!(out, "REPRESENTATION:")?;
    writeln!(out)?;
    writeln!(out, "  String: {id}")?;
    writeln!(out, "     Raw: {}", UpperHex(id.as_bytes()))?;
    writeln!(out)?;
    writeln!(out, "COMPONENTS:")?;
    writeln!(out)?;
    writeln!(out, "       Time: {}", utc_time(id))?;
    writeln!(out, "  Timestamp: {}", id.timestamp())?;
    writeln!(out, "    Payload: {}", UpperHex(&id.payload()))?;
    writeln!(out)
}

fn utc_time(id: &Ksuid) -> impl core::fmt::Display {
    DateTime::<Utc>::from(id.time()).format("%Y-%m-%d %H:%M:%S %z %Z")
}

struct UpperHex<'a>(&'a [u8]);

impl core::fmt::Display for UpperHex<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02X}"))
    }
}
