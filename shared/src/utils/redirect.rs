//! Redirect target sanitising

/// Fallback for unsafe or missing redirect targets
pub const DEFAULT_REDIRECT: &str = "/";

/// Keep only same-origin absolute paths.
///
/// `/notes` is kept; `//evil.com`, `https://evil.com`, `notes` or nothing
/// become `/`.
pub fn safe_redirect(to: Option<&str>) -> String {
    match to.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}
