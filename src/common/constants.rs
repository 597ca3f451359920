/// Desktop browser user agent; the supported shops block or reshape responses for anything else
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Largest accepted request body, in bytes
pub const MAX_REQUEST_SIZE: usize = 2000;

/// Largest page body read from an upstream shop, in bytes
pub const MAX_PAGE_SIZE: usize = 5 * 1024 * 1024;

/// Default timeout for outbound HTTP requests in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Address the server listens on when nothing else is configured
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Settings file looked up in the user config directory
pub const SETTINGS_DIR_NAME: &str = "linkpure";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Environment variable overriding the bind address
pub const BIND_ADDRESS_ENV: &str = "LINKPURE_BIND_ADDRESS";

/// Progress bar template
pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Progress bar characters
pub const PROGRESS_BAR_CHARS: &str = "#>-";
