mod conflicts_follow_working_copy_changes;
