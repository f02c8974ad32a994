//! This module is in charge of outputting the π⁺π⁻ mass resolution diagnostic
//! to the standard output and to disk

use crate::{
    config::Configuration,
    histogram::Histogram,
    numeric::{floats, Float},
};

use eyre::Result;
use time::{format_description, OffsetDateTime};

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    time::Duration,
};

/// Default name of the mass histogram file
pub const DEFAULT_OUTPUT: &str = "mpipi.dat";

// Number of significant digits in file output
const SIG_DIGITS: usize = (floats::DIGITS - 1) as usize;

/// Summary statistics of the reconstructed π⁺π⁻ masses
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassSummary {
    /// Mean mass (MeV)
    pub mean: Float,

    /// Standard deviation of the mass (MeV)
    pub std_dev: Float,
}
//
impl MassSummary {
    /// Compute the summary of a set of masses
    pub fn new(masses: &[Float]) -> Self {
        let n = masses.len() as Float;
        let mean = masses.iter().sum::<Float>() / n;
        let variance = masses.iter().map(|m| (m - mean).powi(2)).sum::<Float>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Output the mass histogram to the console and to disk
pub fn dump_histogram(
    path: &Path,
    cfg: &Configuration,
    summary: &MassSummary,
    histogram: &Histogram,
    elapsed_time: Duration,
) -> Result<()> {
    // Print out some final results on stdout
    println!();
    println!("m(pi+pi-) mean    : {:.4} MeV", summary.mean);
    println!("m(pi+pi-) std dev : {:.4} MeV", summary.std_dev);
    println!("Elapsed time      : {:.3} s", elapsed_time.as_secs_f64());

    // Compute a timestamp of when the run ended
    let timestamp_format =
        format_description::parse("[day]-[month repr:short]-[year repr:last_two]   [hour]:[minute]:[second]")?;
    let timestamp = OffsetDateTime::now_utc().format(&timestamp_format)?;

    // Write the histogram file, with the run parameters in a comment header
    let mut file = BufWriter::new(File::create(path)?);
    let file = &mut file;
    writeln_3p(file, &timestamp[..])?;
    writeln_3p(file, ("Nombre d'evenements", cfg.num_events))?;
    writeln_3p(file, ("Graine", cfg.seed as usize))?;
    for (axis, row) in ["x", "y", "z"].iter().zip(cfg.covariance.row_iter()) {
        write!(file, "#  Covariance {axis}                 :")?;
        for &entry in row.iter() {
            write!(file, " ")?;
            write_engineering(file, entry, SIG_DIGITS)?;
        }
        writeln!(file)?;
    }
    match &cfg.lab_momentum {
        Some(p) => {
            writeln_3p(file, ("Impulsion K0s x      (MeV)", p[0]))?;
            writeln_3p(file, ("Impulsion K0s y      (MeV)", p[1]))?;
            writeln_3p(file, ("Impulsion K0s z      (MeV)", p[2]))?;
        }
        None => writeln_3p(file, "Referentiel du K0s")?,
    }
    writeln_3p(file, ("Masse moyenne        (MeV)", summary.mean))?;
    writeln_3p(file, ("Ecart-Type           (MeV)", summary.std_dev))?;
    writeln_3p(file, ("Temps ecoule         (s)", elapsed_time.as_secs_f64() as Float))?;
    writeln_3p(file, "---------------------------------------------")?;
    writeln_3p(file, "centre  entrees  erreur-  erreur+")?;

    // One line per bin
    for ((&center, &count), &(err_low, err_high)) in histogram
        .centers
        .iter()
        .zip(&histogram.counts)
        .zip(&histogram.errors)
    {
        write_engineering(file, center, SIG_DIGITS)?;
        write!(file, " {count} ")?;
        write_engineering(file, err_low, SIG_DIGITS)?;
        write!(file, " ")?;
        write_engineering(file, err_high, SIG_DIGITS)?;
        writeln!(file)?;
    }
    file.flush()?;

    // ...and we're done
    tracing::info!(path = %path.display(), "Wrote the pi+pi- mass histogram");
    Ok(())
}

/// Comment line output facility for the histogram file header
fn writeln_3p(file: &mut impl Write, data: impl Write3p) -> std::io::Result<()> {
    write!(file, "# ")?;
    data.write(file)?;
    writeln!(file)
}

/// Trait implemented by things which can be printed in the file header
trait Write3p: Sized {
    /// Write down `self` to the output file using the header style
    fn write(self, file: &mut impl Write) -> std::io::Result<()>;
}

impl Write3p for &str {
    // Strings work in the usual way
    fn write(self, file: &mut impl Write) -> std::io::Result<()> {
        write!(file, "{}", self)
    }
}

impl Write3p for usize {
    // Integers work in the usual way too
    fn write(self, file: &mut impl Write) -> std::io::Result<()> {
        write!(file, "{}", self)
    }
}

impl Write3p for Float {
    // Floats use %g-like formatting
    fn write(self, file: &mut impl Write) -> std::io::Result<()> {
        write_engineering(file, self, SIG_DIGITS)
    }
}

impl<T: Write3p> Write3p for (&str, T) {
    // Key-value output that uses fixed-size columns for better readability
    fn write(self, file: &mut impl Write) -> std::io::Result<()> {
        write!(file, "{:<31}: ", self.0)?;
        self.1.write(file)
    }
}

/// Write a floating-point number using "engineering" notation
///
/// Analogous to the %g format of the C printf function, this method switches
/// between naive and scientific notation for floating-point numbers when the
/// number being printed becomes so small that printing leading zeroes could end
/// up larger than the scientific notation, or so large that we would be forced
/// to print more significant digits than requested.
///
fn write_engineering(writer: &mut impl Write, x: Float, sig_digits: usize) -> std::io::Result<()> {
    let mut precision = sig_digits - 1;
    if x == 0. {
        // Zero is special because you can't take its log
        write!(writer, "0")
    } else {
        // Otherwise, use log to evaluate order of magnitude
        let log_x = x.abs().log10();
        if log_x >= -3. && log_x <= (sig_digits as Float) {
            // Print using naive notation
            //
            // Since Rust's precision controls number of digits after the
            // decimal point, we must adjust it depending on magnitude in order
            // to operate at a constant number of significant digits.
            precision = (precision as isize - log_x.trunc() as isize) as usize;

            // Numbers smaller than 1 must get one extra digit since the leading
            // zero does not count as a significant digit.
            if log_x < 0. {
                precision += 1
            }

            // People don't normally expect trailing zeros or decimal point in
            // naive notation, but be careful with integer numbers...
            let str_with_zeros = format!("{:.1$}", x, precision);
            if str_with_zeros.contains('.') {
                write!(
                    writer,
                    "{}",
                    str_with_zeros.trim_end_matches('0').trim_end_matches('.')
                )
            } else {
                write!(writer, "{}", str_with_zeros)
            }
        } else {
            // Print using scientific notation
            write!(writer, "{:.1$e}", x, precision)
        }
    }
}
