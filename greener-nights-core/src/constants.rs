//! Fixed identifiers and calendar metadata.

/// Prefix of every UID this tool generates.
pub const UID_PREFIX: &str = "greener-night-";

/// Namespace suffix of every UID this tool generates.
pub const UID_DOMAIN: &str = "greener-nights-history";

/// First category on every generated event; the greenness index follows it.
pub const CATEGORY_LABEL: &str = "Greener Nights";

pub const PRODID: &str = "-//Greener Nights History//EN";
pub const VERSION: &str = "2.0";
pub const CALSCALE: &str = "GREGORIAN";
pub const METHOD: &str = "PUBLISH";
pub const CALENDAR_NAME: &str = "Greener Nights History";
pub const CALENDAR_DESCRIPTION: &str = "Historical record of greener nights";

pub const DEFAULT_INPUT_FILE: &str = "greener-nights-history.json";
pub const DEFAULT_STORE_FILE: &str = "greener-nights-history.ics";
