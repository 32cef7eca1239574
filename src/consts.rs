/// Fixed key under which the whole tracker state is stored
pub(crate) const STORAGE_KEY: &str = "simpleTrackerData";

/// Display format frozen into each entry: "18/10/2026 14:05:09"
pub(crate) const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Directory / file stem used for data, config and the SQLite database
pub(crate) const APP_NAME: &str = "tallybook";

/// Environment override for the data directory
pub(crate) const DATA_DIR_ENV: &str = "TALLYBOOK_DATA_DIR";
