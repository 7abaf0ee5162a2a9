/// Default log filter expression.
///
/// Kept at `warn` because the parent process treats stderr as its diagnostic
/// channel.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Largest request line accepted by the read loop, in bytes.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}

/// Default request size limit.
pub const fn default_max_request_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}
