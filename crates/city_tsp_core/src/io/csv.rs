use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{Error, Result};

/// One parsed record with the 1-based line it starts on.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvRow {
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or_default()
    }
}

/// Headerless, flexible-width CSV table. Quoted fields may hold commas; every field
/// is trimmed and blank records are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvTable {
    /// Where the rows came from, used in error messages.
    pub name: String,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let table = Self::from_reader(path.display().to_string(), file)?;
        log::debug!("csv: read file={} rows={}", table.name, table.rows.len());
        Ok(table)
    }

    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        Self::from_reader(name.into(), text.as_bytes())
    }

    fn from_reader(name: String, source: impl Read) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        loop {
            let more = reader.read_record(&mut record).map_err(|e| {
                let line = e.position().map_or(0, |pos| line_number(pos.line()));
                Error::format(&name, line, e.to_string())
            })?;
            if !more {
                break;
            }
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(CsvRow {
                line: record.position().map_or(0, |pos| line_number(pos.line())),
                fields: record.iter().map(str::to_owned).collect(),
            });
        }

        Ok(Self { name, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row when its first cell is not a number.
    pub fn header(&self) -> Option<&CsvRow> {
        self.rows
            .first()
            .filter(|row| row.field(0).parse::<f64>().is_err())
    }

    /// Rows after the header, if any.
    pub fn records(&self) -> &[CsvRow] {
        let skip = usize::from(self.header().is_some());
        &self.rows[skip..]
    }
}

fn line_number(line: u64) -> usize {
    usize::try_from(line).unwrap_or(usize::MAX)
}
