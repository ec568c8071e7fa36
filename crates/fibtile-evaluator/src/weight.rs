//! Weight tables and their binary file format.
//!
//! # File Format
//!
//! All integers and floats are little-endian:
//!
//! ```text
//! u64                 table count
//! repeated per table:
//!   u64               entry count
//!   f32 x entry count entries
//! ```
//!
//! A file that cannot be opened or created, or that ends early, is reported as a
//! [`WeightFileError`]. Callers treat these as fatal.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    ops::{Index, IndexMut},
    path::{Path, PathBuf},
};

/// A flat table of learned values.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    values: Vec<f32>,
}

impl WeightTable {
    /// Creates a table of `len` entries initialised to 0.0.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    #[must_use]
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Index<usize> for WeightTable {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl IndexMut<usize> for WeightTable {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum WeightFileError {
    #[display("failed to open weight file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to create weight file {}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[display("failed to read weight file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to write weight file {}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

fn read_u64(reader: &mut impl Read) -> io::Result<u64> {
    let mut buf = [0; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_len(reader: &mut impl Read) -> io::Result<usize> {
    let len = read_u64(reader)?;
    usize::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("length {len} does not fit in memory"),
        )
    })
}

fn read_table(reader: &mut impl Read) -> io::Result<WeightTable> {
    let len = read_len(reader)?;
    let mut values = Vec::new();
    let mut buf = [0; 4];
    for _ in 0..len {
        reader.read_exact(&mut buf)?;
        values.push(f32::from_le_bytes(buf));
    }
    Ok(WeightTable { values })
}

/// Reads weight tables from `reader`.
pub fn read_tables(reader: &mut impl Read) -> io::Result<Vec<WeightTable>> {
    let count = read_len(reader)?;
    let mut tables = Vec::new();
    for _ in 0..count {
        tables.push(read_table(reader)?);
    }
    Ok(tables)
}

/// Writes weight tables to `writer`.
pub fn write_tables(writer: &mut impl Write, tables: &[WeightTable]) -> io::Result<()> {
    writer.write_all(&(tables.len() as u64).to_le_bytes())?;
    for table in tables {
        writer.write_all(&(table.len() as u64).to_le_bytes())?;
        for value in &table.values {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Loads weight tables from the file at `path`.
pub fn load_weights<P>(path: P) -> Result<Vec<WeightTable>, WeightFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| WeightFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let tables =
        read_tables(&mut BufReader::new(file)).map_err(|source| WeightFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!(
        "Loaded {} weight tables from {}",
        tables.len(),
        path.display()
    );
    Ok(tables)
}

/// Saves weight tables to the file at `path`, replacing any existing file.
pub fn save_weights<P>(path: P, tables: &[WeightTable]) -> Result<(), WeightFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WeightFileError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_tables(&mut writer, tables)
        .and_then(|()| writer.flush())
        .map_err(|source| WeightFileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Saved {} weight tables to {}", tables.len(), path.display());
    Ok(())
}
