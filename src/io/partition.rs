// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Partition instance files: the element count, then one `id size` per line.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::Path;

use num_bigint::BigUint;

use super::{create, open, ContentLines};
use crate::error::{Error, Result};
use crate::model::{PartitionElement, PartitionInstance};

pub fn read_partition<R: BufRead>(reader: R) -> Result<PartitionInstance> {
    let content = ContentLines::read(reader)?;
    let end = content.end();
    let mut lines = content.into_lines();

    let (line, text) = lines
        .next()
        .ok_or_else(|| Error::parse(end, "missing element count"))?;
    let n: usize = text
        .parse()
        .map_err(|_| Error::parse(line, format!("element count must be an integer, found '{text}'")))?;

    let mut seen = HashSet::new();
    // The header is untrusted: grow with the lines actually read.
    let mut elements = Vec::new();
    for (line, text) in lines {
        if elements.len() == n {
            return Err(Error::parse(line, format!("more than {n} elements")));
        }
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [id, size] = fields.as_slice() else {
            return Err(Error::parse(
                line,
                format!("an element needs 'id size', found {} fields", fields.len()),
            ));
        };
        if size.starts_with('-') {
            return Err(Error::parse(line, format!("size of '{id}' is negative: {size}")));
        }
        let size: BigUint = size
            .parse()
            .map_err(|_| Error::parse(line, format!("size of '{id}' is not an integer: {size}")))?;
        if !seen.insert(id.to_string()) {
            return Err(Error::parse(line, format!("duplicate element id '{id}'")));
        }
        elements.push(PartitionElement::new(*id, size));
    }
    if elements.len() != n {
        return Err(Error::parse(
            end,
            format!("expected {n} elements, found {}", elements.len()),
        ));
    }
    Ok(PartitionInstance::new(elements)?)
}

pub fn parse_partition(text: &str) -> Result<PartitionInstance> {
    read_partition(text.as_bytes())
}

pub fn read_partition_file(path: impl AsRef<Path>) -> Result<PartitionInstance> {
    let path = path.as_ref();
    read_partition(open(path)?).map_err(|e| match e {
        Error::Io(source) => Error::file(path, source),
        other => other,
    })
}

/// Write `instance` in the format [`read_partition`] accepts.
pub fn write_partition<W: Write>(instance: &PartitionInstance, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", instance.len())?;
    for element in instance.elements() {
        writeln!(writer, "{} {}", element.id(), element.size())?;
    }
    Ok(())
}

pub fn write_partition_file(instance: &PartitionInstance, path: impl AsRef<Path>) -> Result<()> {
    create(path.as_ref(), |writer| write_partition(instance, writer))
}
