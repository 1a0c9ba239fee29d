mod rollback_restores_latest_version;
