use crate::artifacts::merge::line_merge::{self, MergeSummary};
use crate::artifacts::merge::resolver::{ConflictResolver, InteractiveResolver, MarkerResolver};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Merge two files into `output`, no repository required
///
/// Relative paths are taken from `work_dir`. Conflicts are written as marker
/// blocks labelled with `first` as given, or settled one by one on stdin when
/// `interactive` is set.
pub fn merge_files(
    work_dir: &Path,
    first: &str,
    second: &str,
    output: &str,
    interactive: bool,
    writer: &mut dyn Write,
) -> anyhow::Result<MergeSummary> {
    let mut resolver: Box<dyn ConflictResolver> = if interactive {
        Box::new(InteractiveResolver::new(
            std::io::stdin().lock(),
            std::io::stdout(),
        ))
    } else {
        Box::new(MarkerResolver::new(first))
    };

    let summary = line_merge::merge_files(
        &work_dir.join(first),
        &work_dir.join(second),
        &work_dir.join(output),
        resolver.as_mut(),
    )?;

    info!(output, lines = summary.lines, conflicts = summary.conflicts, "files merged");
    writeln!(
        writer,
        "Merged {} and {} into {} ({} conflict(s))",
        first, second, output, summary.conflicts
    )?;

    Ok(summary)
}
