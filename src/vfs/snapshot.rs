//! Flat text snapshot of the files stored directly under the root directory.
//!
//! The format is a sequence of two-line records: the file name on the first line and the file
//! content on the second. Subdirectories and their contents are not part of the format, and a
//! content holding a line break cannot be represented.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use anyhow::Context;
use log::{info, warn};

use crate::core::Result;
use crate::vfs::Entry;

/// One restored `(name, content)` record.
pub type Record = (String, Vec<u8>);

/// Parses records from `reader`.
/// A trailing name without a content line is dropped with a warning.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut lines = reader.split(b'\n');

    while let Some(name) = lines.next() {
        let name = String::from_utf8(name?).context("file name is not valid UTF-8")?;
        match lines.next() {
            Some(content) => records.push((name, content?)),
            None => warn!("snapshot ends after file name {:?}, record dropped", name),
        }
    }

    Ok(records)
}

/// Writes one record per entry to `writer`.
/// Entries whose name or content holds a line break are skipped with a warning and not counted.
pub fn write<'a, W, I>(mut writer: W, entries: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Entry>,
{
    let mut count = 0;
    for entry in entries {
        if entry.name().contains('\n') || entry.content().contains(&b'\n') {
            warn!("file {:?} holds a line break, left out of snapshot", entry.name());
            continue;
        }
        writer.write_all(entry.name().as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(entry.content())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Reads the snapshot at `path`.
/// Returns `Ok(None)` when there is no such file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Vec<Record>>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("cannot open snapshot {}", path.display()));
        }
    };

    let records = read(BufReader::new(file))
        .with_context(|| format!("cannot read snapshot {}", path.display()))?;
    info!("loaded {} file(s) from {}", records.len(), path.display());
    Ok(Some(records))
}

/// Replaces the snapshot at `path` with `entries`. Returns the number of records written.
pub fn save<'a, P, I>(path: P, entries: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Entry>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("cannot open snapshot {} for writing", path.display()))?;

    let count = write(BufWriter::new(file), entries)
        .with_context(|| format!("cannot write snapshot {}", path.display()))?;
    info!("saved {} file(s) to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use tempdir::TempDir;

    #[test]
    fn test_read_records() -> Result<()> {
        let records = read(Cursor::new("a\n1\nb\n2\n"))?;
        assert_eq!(
            records,
            vec![
                ("a".to_string(), b"1".to_vec()),
                ("b".to_string(), b"2".to_vec())
            ]
        );
        Ok(())
    }

    #[test]
    fn test_read_without_final_newline() -> Result<()> {
        let records = read(Cursor::new("a\nhello world"))?;
        assert_eq!(records, vec![("a".to_string(), b"hello world".to_vec())]);
        Ok(())
    }

    #[test]
    fn test_read_empty_content() -> Result<()> {
        let records = read(Cursor::new("a\n\nb\n2\n"))?;
        assert_eq!(records[0], ("a".to_string(), Vec::new()));
        assert_eq!(records[1], ("b".to_string(), b"2".to_vec()));
        Ok(())
    }

    #[test]
    fn test_read_dangling_name() -> Result<()> {
        let records = read(Cursor::new("a\n1\nb\n"))?;
        assert_eq!(records, vec![("a".to_string(), b"1".to_vec())]);
        Ok(())
    }

    #[test]
    fn test_read_empty_input() -> Result<()> {
        assert!(read(Cursor::new(""))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_write_records() -> Result<()> {
        let entries = [Entry::new("a", b"1"), Entry::new("notes", b"two words")];
        let mut buf = Vec::new();
        let count = write(&mut buf, &entries)?;
        assert_eq!(count, 2);
        assert_eq!(buf, b"a\n1\nnotes\ntwo words\n");
        Ok(())
    }

    #[test]
    fn test_write_skips_line_breaks() -> Result<()> {
        let entries = [
            Entry::new("a", b"x\ny"),
            Entry::new("b", b"2"),
            Entry::new("bad\nname", b"3"),
        ];
        let mut buf = Vec::new();
        assert_eq!(write(&mut buf, &entries)?, 1);
        assert_eq!(buf, b"b\n2\n");

        let records = read(Cursor::new(buf))?;
        assert_eq!(records, vec![("b".to_string(), b"2".to_vec())]);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() -> Result<()> {
        let tmp = TempDir::new("rofis")?;
        assert!(load(tmp.path().join("absent.txt"))?.is_none());
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let tmp = TempDir::new("rofis")?;
        let path = tmp.path().join("fs.txt");
        let entries = [Entry::new("a", b"1"), Entry::new("b", b"2")];

        assert_eq!(save(&path, &entries)?, 2);
        let records = load(&path)?.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], ("b".to_string(), b"2".to_vec()));
        Ok(())
    }

    #[test]
    fn test_save_into_missing_directory_fails() -> Result<()> {
        let tmp = TempDir::new("rofis")?;
        let result = save(tmp.path().join("no/such/dir/fs.txt"), &[Entry::new("a", b"1")]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("for writing"));
        Ok(())
    }
}
