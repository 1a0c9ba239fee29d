mod history_lists_commits_in_log_order;
