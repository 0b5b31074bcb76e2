//! Plain-text bigram histogram.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::frequency::HistogramEntry;

/// One `bigram<TAB>count<TAB>percentage` line per entry, in the given order.
pub fn write_histogram<W: Write>(entries: &[HistogramEntry], mut out: W) -> Result<()> {
    for entry in entries {
        writeln!(out, "{}\t{}\t{:.4}", entry.bigram, entry.count, entry.percentage)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the histogram to a file.
pub fn save_histogram(entries: &[HistogramEntry], path: impl AsRef<Path>) -> Result<()> {
    write_histogram(entries, BufWriter::new(File::create(path)?))
}
