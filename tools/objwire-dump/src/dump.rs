// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subcommand implementations, writing to any output stream.

use anyhow::Context;
use objwire::{BinaryObject, DecodeLimits, Decoder, Encoder, Registry};
use objwire_records::{Id, SliceMetadata};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Print every registered entity with its fingerprint and fields.
pub fn list_types(registry: &Registry, out: &mut dyn Write) -> anyhow::Result<()> {
    for (id, entity) in registry.entities() {
        let version = if entity.version().is_empty() {
            String::new()
        } else {
            format!(" v{}", entity.version())
        };
        writeln!(out, "{}  {}{}", id, entity.name(), version)?;
        for field in entity.fields() {
            writeln!(out, "    {}: {}", field.name(), field.node())?;
        }
    }
    Ok(())
}

/// Decode every envelope of `path` and print one line per object.
///
/// Returns the number of envelopes read. Stops at the first decode error.
pub fn decode_file(
    path: &Path,
    registry: &Registry,
    limits: DecodeLimits,
    out: &mut dyn Write,
) -> anyhow::Result<usize> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut offset = 0u64;
    let mut index = 0usize;

    while !reader.fill_buf()?.is_empty() {
        let mut decoder = Decoder::with_registry(&mut reader, registry).limits(limits);
        let decoded = decoder.dynamic_object().with_context(|| {
            format!("envelope #{} starting at offset {}", index, offset)
        })?;
        let consumed = decoder.offset();

        match decoded {
            Some(obj) => {
                let id = obj.entity().fingerprint()?;
                writeln!(
                    out,
                    "#{} {} {} {} {}",
                    index,
                    offset,
                    obj.entity().name(),
                    id,
                    obj
                )?;
            }
            None => writeln!(out, "#{} {} null", index, offset)?,
        }

        offset += consumed;
        index += 1;
    }

    debug!("decoded {} envelope(s), {} byte(s)", index, offset);
    Ok(index)
}

/// Write one identifier and one slice metadata record to `path`.
pub fn write_sample(path: &Path, registry: &Registry) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let id = Id::new(objwire::BinaryId::of(path.to_string_lossy().as_bytes()));
    let metadata = SliceMetadata::new("uint32_t");
    {
        let mut e = Encoder::with_registry(&mut writer, registry);
        e.object(Some(&id as &dyn BinaryObject))?;
        e.object(Some(&metadata as &dyn BinaryObject))?;
        info!("wrote {} byte(s) to {}", e.offset(), path.display());
    }
    writer.flush()?;
    Ok(())
}
