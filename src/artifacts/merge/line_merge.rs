use crate::artifacts::core::atomic;
use crate::artifacts::merge::resolver::{ConflictResolver, LineConflict};
use crate::errors::KeeperError;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Lines written to the output
    pub lines: usize,
    /// Positions where the inputs disagreed
    pub conflicts: usize,
}

/// Merge two line streams into `output`
///
/// Every emitted line is terminated by `\n`.
pub fn merge_lines<A: BufRead, B: BufRead, W: Write>(
    first: A,
    second: B,
    output: &mut W,
    resolver: &mut dyn ConflictResolver,
) -> anyhow::Result<MergeSummary> {
    let mut first = first.split(b'\n');
    let mut second = second.split(b'\n');
    let mut summary = MergeSummary::default();
    let mut line_number = 0;

    loop {
        line_number += 1;
        let lines = (first.next().transpose()?, second.next().transpose()?);

        let emitted = match lines {
            (None, None) => break,
            (Some(first), Some(second)) if first == second => vec![first],
            (Some(first), Some(second)) => {
                summary.conflicts += 1;
                resolver.resolve(&LineConflict {
                    line_number,
                    first: &first,
                    second: &second,
                })?
            }
            (Some(line), None) | (None, Some(line)) => vec![line],
        };

        for line in emitted {
            output.write_all(&line)?;
            output.write_all(b"\n")?;
            summary.lines += 1;
        }
    }

    Ok(summary)
}

fn open_input(path: &Path) -> anyhow::Result<BufReader<File>> {
    if !path.is_file() {
        return Err(KeeperError::not_found("file", path.display()).into());
    }

    let file = File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Merge `first` and `second` into `output`
///
/// The output is written atomically; on failure an existing output file is
/// left untouched.
pub fn merge_files(
    first: &Path,
    second: &Path,
    output: &Path,
    resolver: &mut dyn ConflictResolver,
) -> anyhow::Result<MergeSummary> {
    let first = open_input(first)?;
    let second = open_input(second)?;

    atomic::write_atomically(output, |file| {
        let mut writer = BufWriter::new(file);
        let summary = merge_lines(first, second, &mut writer, resolver)?;
        writer.flush()?;
        Ok(summary)
    })
    .with_context(|| format!("Unable to write merge output {}", output.display()))
}
