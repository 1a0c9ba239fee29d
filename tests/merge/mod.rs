mod merge_branches_writes_merged_files;
mod merge_files_marks_conflicts;
