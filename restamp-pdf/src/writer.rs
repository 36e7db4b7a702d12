use std::fs::OpenOptions;
use std::io::{Seek, Write};
use std::path::Path;

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::document::Document;
use crate::types::{Numeric, Object};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Appends every object marked new, then a fresh xref section whose
/// trailer `/Prev`-links back to the previous one. The original bytes are
/// never touched.
///
/// Each entry line is exactly twenty bytes, `%010u %05u n\r\n` — the `\r`
/// is load-bearing for some readers, as is the lone `\r` separating the
/// appended region from the previous `%%EOF`. When nothing is new the file
/// is closed with only that separator written.
pub(crate) fn write_update(document: &mut Document, path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|_| error::OpenFileSnafu {
            path: path.to_path_buf(),
        })?;

    file.write_all(b"\r").context(error::IoSnafu)?;

    let mut xref = b"xref\n".to_vec();
    let mut new_objects = 0u32;

    for object in &document.objects {
        if !object.is_new {
            continue;
        }
        new_objects += 1;

        let offset = file.stream_position().context(error::IoSnafu)?;
        let mut serialized = Vec::new();
        object.serialize(&mut serialized, document.source());
        file.write_all(&serialized).context(error::IoSnafu)?;

        // One single-entry subsection per object.
        xref.extend_from_slice(format!("{} 1\n", object.id).as_bytes());
        xref.extend_from_slice(format!("{:010} {:05} n\r\n", offset, object.gen_id).as_bytes());
    }

    if new_objects == 0 {
        debug!("no new objects, nothing to append");
        return Ok(());
    }

    let new_xref_offset = file.stream_position().context(error::IoSnafu)?;
    file.write_all(&xref).context(error::IoSnafu)?;

    document.trailer.remove("Prev");
    document.trailer.insert(
        "Prev",
        Some(Object::Numeric(Numeric::integer(document.xref_offset as i64))),
    );

    let mut tail = b"trailer\n".to_vec();
    document.trailer.serialize(&mut tail, document.source());
    tail.extend_from_slice(format!("startxref\n{new_xref_offset}\n%%EOF").as_bytes());
    file.write_all(&tail).context(error::IoSnafu)?;

    debug!(new_objects, new_xref_offset, "incremental update written");

    Ok(())
}

/// Writes a complete file from scratch: header with the binary marker,
/// every object in order, one xref section opened by the synthetic free
/// head entry, and a trailer carrying a recomputed `/Size`.
pub(crate) fn write_full(document: &mut Document, path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|_| error::OpenFileSnafu {
            path: path.to_path_buf(),
        })?;

    let version = document.version;
    file.write_all(format!("%PDF-{}.{}\r%", version.major, version.minor).as_bytes())
        .context(error::IoSnafu)?;
    file.write_all(&[0xE2, 0xE3, 0xCF, 0xD3, b'\r', b'\n'])
        .context(error::IoSnafu)?;

    let mut xref = b"xref\n0 1 f\r\n0000000000 65535 f\r\n".to_vec();
    let mut count = 1i64; // the synthetic free head

    for object in &document.objects {
        let offset = file.stream_position().context(error::IoSnafu)?;
        let mut serialized = Vec::new();
        object.serialize(&mut serialized, document.source());
        file.write_all(&serialized).context(error::IoSnafu)?;

        let marker = if object.used { 'n' } else { 'f' };
        xref.extend_from_slice(format!("{} 1\n", object.id).as_bytes());
        xref.extend_from_slice(
            format!("{:010} {:05} {marker}\r\n", offset, object.gen_id).as_bytes(),
        );
        count += 1;
    }

    let xref_offset = file.stream_position().context(error::IoSnafu)?;
    file.write_all(&xref).context(error::IoSnafu)?;

    document.trailer.remove("Prev");
    document.trailer.remove("Size");
    document.trailer.insert("Size", Some(Object::Numeric(Numeric::integer(count))));
    document.trailer.remove("XRefStm");

    let mut tail = b"trailer\n".to_vec();
    document.trailer.serialize(&mut tail, document.source());
    tail.extend_from_slice(format!("startxref\n{xref_offset}\n%%EOF").as_bytes());
    file.write_all(&tail).context(error::IoSnafu)?;

    debug!(objects = count - 1, xref_offset, "full document written");

    Ok(())
}

mod error {
    use std::path::PathBuf;

    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)))]
    pub(super) enum Error {
        #[snafu(display("Unable to open {}", path.display()))]
        OpenFile {
            path: PathBuf,
            source: std::io::Error,
        },

        #[snafu(display("Failed to write output"))]
        Io { source: std::io::Error },
    }
}
