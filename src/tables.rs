//! Table reader/writer.
//!
//! Thin format dispatch over the resolved data extension: parquet for
//! columnar storage, CSV for text. Any other extension is rejected before
//! touching the filesystem. Paths are caller-supplied; the extension comes
//! from the resolved `DataPaths` sub-configuration.

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by table I/O.
#[derive(Debug, Error)]
pub enum TableError {
    /// The configured extension is outside the supported set.
    #[error("unsupported table format '{0}', expected parquet or csv")]
    UnsupportedFormat(String),

    /// Writing requires at least one record batch for the schema.
    #[error("cannot write an empty set of record batches")]
    EmptyTable,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Supported table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Csv,
}

impl TableFormat {
    /// Dispatch on a resolved extension value.
    pub fn from_extension(ext: &str) -> Result<Self, TableError> {
        match ext.trim().to_lowercase().as_str() {
            "parquet" => Ok(TableFormat::Parquet),
            "csv" => Ok(TableFormat::Csv),
            other => Err(TableError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Read a table from `path` in the given format.
pub fn read_table(path: &Path, format: TableFormat) -> Result<Vec<RecordBatch>, TableError> {
    match format {
        TableFormat::Parquet => {
            let file = File::open(path)?;
            let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
            Ok(reader.collect::<Result<Vec<_>, _>>()?)
        }
        TableFormat::Csv => {
            let mut file = File::open(path)?;
            let csv_format = Format::default().with_header(true);
            let (schema, _) = csv_format.infer_schema(&mut file, None)?;
            file.rewind()?;
            let reader = ReaderBuilder::new(Arc::new(schema))
                .with_format(csv_format)
                .build(file)?;
            Ok(reader.collect::<Result<Vec<_>, _>>()?)
        }
    }
}

/// Write record batches to `path` in the given format.
///
/// All batches must share the schema of the first one.
pub fn write_table(
    batches: &[RecordBatch],
    path: &Path,
    format: TableFormat,
) -> Result<(), TableError> {
    let first = batches.first().ok_or(TableError::EmptyTable)?;
    match format {
        TableFormat::Parquet => {
            let file = File::create(path)?;
            let mut writer = ArrowWriter::try_new(file, first.schema(), None)?;
            for batch in batches {
                writer.write(batch)?;
            }
            writer.close()?;
        }
        TableFormat::Csv => {
            let file = File::create(path)?;
            let mut writer = WriterBuilder::new().with_header(true).build(file);
            for batch in batches {
                writer.write(batch)?;
            }
        }
    }
    Ok(())
}
