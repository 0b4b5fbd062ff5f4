//! Persists the ledger as a CSV file.

use std::{
    fs::{self, File},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    Error,
    ledger::{
        record::{COLUMNS, TransactionRecord},
        table::Ledger,
    },
};

/// Reads and writes the [Ledger] as a comma separated file with a header row.
///
/// The whole table is the unit of persistence: [CsvLedgerStore::load] reads
/// every row and [CsvLedgerStore::save] replaces the file in one rename.
///
/// There is no locking between writers. If two requests both load the
/// ledger, append a row and save, the second save overwrites the first and
/// its row is lost. This is an accepted limitation of a single-kiosk tool.
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    path: PathBuf,
}

impl CsvLedgerStore {
    /// Create a store backed by the CSV file at `path`.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The location of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full ledger.
    ///
    /// A missing file means nothing has been recorded yet and yields an
    /// empty ledger.
    ///
    /// # Errors
    ///
    /// Any other failure is returned as is: the file cannot be read, the
    /// header does not match [Ledger::COLUMNS], or a row is malformed.
    pub fn load(&self) -> Result<Ledger, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::info!(
                    "No ledger found at {}, starting with an empty ledger",
                    self.path.display()
                );
                return Ok(Ledger::empty());
            }
            Err(error) => return Err(self.read_error(error)),
        };

        let ledger = read_ledger(file).inspect_err(|error| {
            tracing::error!("Could not load ledger {}: {error}", self.path.display())
        })?;
        tracing::debug!(
            "Loaded {} transactions from {}",
            ledger.len(),
            self.path.display()
        );

        Ok(ledger)
    }

    /// Write the full ledger, replacing the previous contents.
    ///
    /// The table is written to a temporary file next to the ledger which is
    /// then renamed over it, so readers see either the old or the new table.
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [Error::LedgerWriteError] if any step of the write fails.
    pub fn save(&self, ledger: &Ledger) -> Result<(), Error> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(directory).map_err(|error| self.write_error(error))?;

        let mut temp_file =
            NamedTempFile::new_in(directory).map_err(|error| self.write_error(error))?;
        write_ledger(ledger, temp_file.as_file_mut())
            .map_err(|error| self.write_error(error))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|error| self.write_error(error))?;
        temp_file
            .persist(&self.path)
            .map_err(|error| self.write_error(error.error))?;

        tracing::debug!(
            "Saved {} transactions to {}",
            ledger.len(),
            self.path.display()
        );

        Ok(())
    }

    fn read_error(&self, error: impl std::fmt::Display) -> Error {
        tracing::error!("Could not read ledger {}: {error}", self.path.display());
        Error::LedgerReadError(format!("{}: {error}", self.path.display()))
    }

    fn write_error(&self, error: impl std::fmt::Display) -> Error {
        tracing::error!("Could not save ledger {}: {error}", self.path.display());
        Error::LedgerWriteError(format!("{}: {error}", self.path.display()))
    }
}

fn read_ledger(reader: impl Read) -> Result<Ledger, Error> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|error| Error::LedgerReadError(error.to_string()))?;

    if !headers.iter().eq(COLUMNS) {
        return Err(Error::UnexpectedColumns(
            headers.iter().map(str::to_owned).collect(),
        ));
    }

    let mut records = Vec::new();

    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|error| Error::LedgerReadError(error.to_string()))?;
        // Line 1 is the header.
        records.push(TransactionRecord::from_csv_row(&row, index + 2)?);
    }

    Ok(Ledger::from_records(records))
}

fn write_ledger(ledger: &Ledger, writer: impl Write) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(COLUMNS)?;

    for record in ledger.records() {
        writer.write_record(record.to_csv_row())?;
    }

    writer.flush()?;

    Ok(())
}
