// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! 3DM instance and matching files.
//!
//! ```text
//! 2          # q
//! w1 w2      # W
//! x1 x2      # X
//! y1 y2      # Y
//! w1 x1 y1   # one triple per line
//! w2 x2 y2
//! ```
//!
//! A matching file holds only triple lines.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::Path;

use strum::IntoEnumIterator;

use super::{create, open, ContentLines};
use crate::error::{Error, Result};
use crate::model::{ThreeDmInstance, Triple, Universe};

/// Read a 3DM instance.
pub fn read_three_dm<R: BufRead>(reader: R) -> Result<ThreeDmInstance> {
    let content = ContentLines::read(reader)?;
    let end = content.end();
    let mut lines = content.into_lines();

    let (line, text) = lines
        .next()
        .ok_or_else(|| Error::parse(end, "missing q"))?;
    let q: usize = match text.parse() {
        Ok(q) if q > 0 => q,
        _ => {
            return Err(Error::parse(
                line,
                format!("q must be a positive integer, found '{text}'"),
            ))
        }
    };

    let mut sets: Vec<Vec<String>> = Vec::with_capacity(3);
    for universe in Universe::iter() {
        let (line, text) = lines
            .next()
            .ok_or_else(|| Error::parse(end, format!("missing set {universe}")))?;
        sets.push(parse_set(line, &text, q, universe)?);
    }

    let mut triples = Vec::new();
    for (line, text) in lines {
        let triple = parse_triple(line, &text)?;
        for (universe, (element, set)) in Universe::iter().zip(
            [triple.w(), triple.x(), triple.y()]
                .into_iter()
                .zip(&sets),
        ) {
            if !set.iter().any(|e| e == element) {
                return Err(Error::parse(
                    line,
                    format!("element '{element}' is not in set {universe}"),
                ));
            }
        }
        triples.push(triple);
    }

    let mut sets = sets.into_iter();
    let (w, x, y) = (
        sets.next().unwrap_or_default(),
        sets.next().unwrap_or_default(),
        sets.next().unwrap_or_default(),
    );
    Ok(ThreeDmInstance::new(q, w, x, y, triples)?)
}

/// Parse a 3DM instance from a string.
pub fn parse_three_dm(text: &str) -> Result<ThreeDmInstance> {
    read_three_dm(text.as_bytes())
}

pub fn read_three_dm_file(path: impl AsRef<Path>) -> Result<ThreeDmInstance> {
    let path = path.as_ref();
    read_three_dm(open(path)?).map_err(|e| with_path(path, e))
}

/// Write `instance` in the format [`read_three_dm`] accepts.
pub fn write_three_dm<W: Write>(instance: &ThreeDmInstance, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", instance.q())?;
    for universe in Universe::iter() {
        writeln!(writer, "{}", instance.universe(universe).join(" "))?;
    }
    write_matching(instance.triples(), writer)
}

pub fn write_three_dm_file(instance: &ThreeDmInstance, path: impl AsRef<Path>) -> Result<()> {
    create(path.as_ref(), |writer| write_three_dm(instance, writer))
}

/// Read a list of triples, one `w x y` per line.
pub fn read_matching<R: BufRead>(reader: R) -> Result<Vec<Triple>> {
    ContentLines::read(reader)?
        .into_lines()
        .map(|(line, text)| parse_triple(line, &text))
        .collect()
}

pub fn parse_matching(text: &str) -> Result<Vec<Triple>> {
    read_matching(text.as_bytes())
}

pub fn read_matching_file(path: impl AsRef<Path>) -> Result<Vec<Triple>> {
    let path = path.as_ref();
    read_matching(open(path)?).map_err(|e| with_path(path, e))
}

pub fn write_matching<W: Write>(triples: &[Triple], mut writer: W) -> Result<()> {
    for triple in triples {
        writeln!(writer, "{} {} {}", triple.w(), triple.x(), triple.y())?;
    }
    Ok(())
}

fn parse_set(line: usize, text: &str, q: usize, universe: Universe) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut elements = Vec::new();
    for element in text.split_whitespace() {
        if !seen.insert(element) {
            return Err(Error::parse(
                line,
                format!("duplicate element '{element}' in set {universe}"),
            ));
        }
        elements.push(element.to_string());
    }
    if elements.len() != q {
        return Err(Error::parse(
            line,
            format!("set {universe} has {} elements, expected q = {q}", elements.len()),
        ));
    }
    Ok(elements)
}

fn parse_triple(line: usize, text: &str) -> Result<Triple> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [w, x, y] => Ok(Triple::new(*w, *x, *y)),
        _ => Err(Error::parse(
            line,
            format!("a triple needs 3 fields, found {}", fields.len()),
        )),
    }
}

/// Plain I/O errors gain the path; parse errors already say where.
fn with_path(path: &Path, error: Error) -> Error {
    match error {
        Error::Io(source) => Error::file(path, source),
        other => other,
    }
}
