// ============================================================
// Layer 6 — Delimited File I/O
// ============================================================
// Every file this tool reads or writes is a delimited UTF-8 table.
// The downstream training scripts read them with Python's `csv`
// module, so writing follows its defaults:
//
//   - quote a field only when it contains the delimiter,
//     a quote character or a line break
//   - double embedded quotes
//   - terminate records with \r\n
//
// Reading is flexible about row width so that ragged raw corpora
// can be inspected row by row and rejected per record.
//
// Some corpora (MRPC) are plain tab-separated text where a quote
// character is just a character. The *_raw functions read and
// write those without any quoting, with \n line ends.

use std::{fs::File, path::Path};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

pub const COMMA: u8 = b',';
pub const TAB:   u8 = b'\t';

/// Open a writer with the quoting rules described above.
pub fn writer(path: &Path, delimiter: u8) -> csv::Result<csv::Writer<File>> {
    WriterBuilder::new()
        .delimiter(delimiter)
        .quote(b'"')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_path(path)
}

/// Write an optional header row followed by `rows` to `path`.
pub fn write_table<R, F>(
    path:      &Path,
    header:    Option<&[&str]>,
    rows:      R,
    delimiter: u8,
) -> csv::Result<usize>
where
    R: IntoIterator<Item = F>,
    F: IntoIterator,
    F::Item: AsRef<[u8]>,
{
    write_rows(writer(path, delimiter)?, path, header, rows)
}

/// Write `rows` verbatim: no quoting, `\n` terminators, no header.
pub fn write_raw_table<R, F>(path: &Path, rows: R, delimiter: u8) -> csv::Result<usize>
where
    R: IntoIterator<Item = F>,
    F: IntoIterator,
    F::Item: AsRef<[u8]>,
{
    let w = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_path(path)?;
    write_rows(w, path, None, rows)
}

fn write_rows<R, F>(
    mut w:  csv::Writer<File>,
    path:   &Path,
    header: Option<&[&str]>,
    rows:   R,
) -> csv::Result<usize>
where
    R: IntoIterator<Item = F>,
    F: IntoIterator,
    F::Item: AsRef<[u8]>,
{
    if let Some(header) = header {
        w.write_record(header)?;
    }

    let mut written = 0usize;
    for row in rows {
        w.write_record(row)?;
        written += 1;
    }
    w.flush()?;

    tracing::debug!("Wrote {} rows to '{}'", written, path.display());
    Ok(written)
}

/// Read every row of a delimited file, optionally dropping the first
/// (header) row.
pub fn read_rows(path: &Path, delimiter: u8, skip_header: bool) -> csv::Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(skip_header)
        .flexible(true)
        .from_path(path)?;

    reader.records().collect()
}

/// Like [`read_rows`], but quote characters are ordinary text.
pub fn read_raw_rows(path: &Path, delimiter: u8, skip_header: bool) -> csv::Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(skip_header)
        .flexible(true)
        .quoting(false)
        .from_path(path)?;

    reader.records().collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_quoting_and_crlf() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.tsv");
        write_table(
            &path,
            Some(&["a", "b"][..]),
            vec![vec!["plain", "has\ttab"], vec!["say \"hi\"", "x,y"]],
            TAB,
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "a\tb\r\nplain\t\"has\ttab\"\r\n\"say \"\"hi\"\"\"\tx,y\r\n");
    }

    #[test]
    fn test_raw_files_keep_quotes_verbatim() {
        let dir   = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        std::fs::write(&input, "Quality\tText\n1\t\"Yes,\" he said.\n").unwrap();

        let rows = read_raw_rows(&input, TAB, true).unwrap();
        assert_eq!(&rows[0][1], "\"Yes,\" he said.");

        let output = dir.path().join("out.txt");
        write_raw_table(&output, rows.iter(), TAB).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "1\t\"Yes,\" he said.\n");
    }

    #[test]
    fn test_read_rows_skips_header() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "h1,h2\n1,2\n3\n").unwrap();

        let rows = read_rows(&path, COMMA, true).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "2");
        assert_eq!(rows[1].len(), 1);

        let all = read_rows(&path, COMMA, false).unwrap();
        assert_eq!(all.len(), 3);
    }
}
