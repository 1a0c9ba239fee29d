mod commands_outside_a_repository_are_not_initialized;
mod init_creates_repository_layout;
mod init_rejects_invalid_project_name;
mod reinit_keeps_existing_history;
