use intake_blob::BlobError;

/// Classify an AWS SDK error string into the appropriate [`BlobError`].
///
/// Looks for common throttling, timeout, connection and credential patterns;
/// anything else is a plain storage error carrying the original message.
pub fn classify_sdk_error(error_str: &str) -> BlobError {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("slowdown") || lower.contains("too many") {
        BlobError::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        BlobError::Timeout
    } else if lower.contains("credential")
        || lower.contains("invalidaccesskeyid")
        || lower.contains("signaturedoesnotmatch")
        || lower.contains("nosuchbucket")
    {
        BlobError::Configuration(error_str.to_owned())
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        BlobError::Connection(error_str.to_owned())
    } else {
        BlobError::Storage(error_str.to_owned())
    }
}
