// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Text formats for 3DM and Partition instances.
//!
//! Both formats are line based. `#` starts a comment that runs to the end of
//! the line; blank lines are ignored. Errors carry 1-based line numbers of
//! the original input.

pub mod partition;
pub mod three_dm;

pub use partition::{
    parse_partition, read_partition, read_partition_file, write_partition, write_partition_file,
};
pub use three_dm::{
    parse_matching, parse_three_dm, read_matching, read_matching_file, read_three_dm,
    read_three_dm_file, write_matching, write_three_dm, write_three_dm_file,
};

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Non-empty lines with comments stripped and whitespace trimmed, paired
/// with their 1-based line numbers.
pub(crate) struct ContentLines {
    lines: Vec<(usize, String)>,
    /// Line number just past the input, for "missing" errors.
    end: usize,
}

impl ContentLines {
    pub(crate) fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        let mut count = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            count = i + 1;
            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line.as_str(),
            };
            let content = content.trim();
            if !content.is_empty() {
                lines.push((i + 1, content.to_string()));
            }
        }
        Ok(Self {
            lines,
            end: count + 1,
        })
    }

    pub(crate) fn end(&self) -> usize {
        self.end
    }

    pub(crate) fn into_lines(self) -> std::vec::IntoIter<(usize, String)> {
        self.lines.into_iter()
    }
}

pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::file(path, e))
}

/// Create `path` and run `write` on a buffered writer for it.
pub(crate) fn create<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(path).map_err(|e| Error::file(path, e))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(|e| Error::file(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_lines_strip_comments() {
        let text = "# header\n\n  2  \nw1 w2 # trailing\n   # only comment\nx1\n";
        let content = ContentLines::read(text.as_bytes()).unwrap();
        assert_eq!(content.end(), 7);
        let lines: Vec<_> = content.into_lines().collect();
        assert_eq!(
            lines,
            vec![
                (3, "2".to_string()),
                (4, "w1 w2".to_string()),
                (6, "x1".to_string())
            ]
        );
    }
}
