mod adding_a_missing_file_stages_the_rest_and_fails;
mod reset_unstages_and_reports_unknown_files;
