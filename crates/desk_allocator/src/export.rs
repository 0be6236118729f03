use crate::constants::{EXPORT_HEADER, FEATURE_SEPARATOR};
use crate::error::{AllocatorError, Result};
use crate::model::Desk;
use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Writes `desks` in rank order to `allocation_<timestamp>.csv` under
/// `output_dir` (or the working directory) and returns the file path.
pub fn export_to_csv(desks: &[Desk], output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("allocation_{timestamp}.csv");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| AllocatorError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| AllocatorError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;

    write_csv(desks, BufWriter::new(file))?;
    Ok(file_path)
}

/// Writes the CSV rows for `desks` to any writer
pub fn write_csv<W: Write>(desks: &[Desk], writer: W) -> Result<()> {
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }

    let mut wtr = builder.from_writer(writer);

    wtr.write_record(EXPORT_HEADER)?;
    for (i, desk) in desks.iter().enumerate() {
        let rank = (i + 1).to_string();
        let floor = desk.floor.to_string();
        let features = desk.features.join(FEATURE_SEPARATOR);
        let status = desk.status.to_string();
        wtr.write_record([
            rank.as_str(),
            desk.id.as_str(),
            desk.kind.as_str(),
            floor.as_str(),
            desk.zone.as_str(),
            desk.location_description.as_str(),
            status.as_str(),
            features.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
