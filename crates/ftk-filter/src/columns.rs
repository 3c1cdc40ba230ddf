//! Whitespace-separated numeric columns, the format the plotting scripts read.
//!
//! Each file holds one line of real numbers separated by single spaces.

use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use ftk_fft::Complex64;

use crate::FilterError;
use crate::band::FilterOutcome;
use crate::signal::SignalSpec;

pub const SIGNAL_FILE: &str = "signal.txt";
pub const SPECTRUM_REAL_FILE: &str = "ftr.txt";
pub const SPECTRUM_IMAG_FILE: &str = "fti.txt";
pub const FILTERED_SIGNAL_FILE: &str = "filtered_signal.txt";
pub const DOMAINS_FILE: &str = "dom.txt";

pub fn write_columns<W: Write>(
    writer: &mut W,
    values: impl IntoIterator<Item = f64>,
) -> std::io::Result<()> {
    let mut first = true;
    for value in values {
        if !first {
            writer.write_all(b" ")?;
        }
        write!(writer, "{value}")?;
        first = false;
    }
    writer.write_all(b"\n")
}

/// Parse the first line of a column file.
pub fn read_columns<R: BufRead>(reader: R) -> Result<Vec<f64>, FilterError> {
    let Some(line) = reader.lines().next().transpose()? else {
        return Ok(Vec::new());
    };
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| FilterError::MalformedColumn {
                token: token.to_owned(),
            })
        })
        .collect()
}

fn write_file(path: &Path, values: impl IntoIterator<Item = f64>) -> Result<(), FilterError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_columns(&mut writer, values)?;
    writer.flush()?;
    Ok(())
}

/// Write every artifact of a filtering run into `dir`, creating it if
/// needed. Returns the paths written, in a fixed order.
pub fn write_outcome(
    dir: &Path,
    spec: &SignalSpec,
    signal: &[Complex64],
    outcome: &FilterOutcome,
) -> Result<Vec<PathBuf>, FilterError> {
    fs::create_dir_all(dir)?;

    let signal_path = dir.join(SIGNAL_FILE);
    write_file(&signal_path, signal.iter().map(|z| z.re))?;

    let real_path = dir.join(SPECTRUM_REAL_FILE);
    write_file(&real_path, outcome.spectrum.iter().map(|z| z.re))?;
    let imag_path = dir.join(SPECTRUM_IMAG_FILE);
    write_file(&imag_path, outcome.spectrum.iter().map(|z| z.im))?;

    let filtered_path = dir.join(FILTERED_SIGNAL_FILE);
    write_file(&filtered_path, outcome.filtered.iter().map(|z| z.re))?;

    // t0 t1 first-bin last-bin samples
    let domains_path = dir.join(DOMAINS_FILE);
    let first_bin = outcome.frequencies.first().copied().unwrap_or(0.0);
    let last_bin = outcome.frequencies.last().copied().unwrap_or(0.0);
    write_file(
        &domains_path,
        [spec.t0, spec.t1, first_bin, last_bin, spec.samples as f64],
    )?;

    Ok(vec![
        signal_path,
        real_path,
        imag_path,
        filtered_path,
        domains_path,
    ])
}
