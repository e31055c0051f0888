/// Known email provider domains, all lower-case.
///
/// The order is significant: typo correction returns the first domain within
/// edit distance, and autocomplete preserves this order in its results.
pub const KNOWN_DOMAINS: &[&str] = &[
    "gmail.com",
    "outlook.com",
    "icloud.com",
    "hotmail.com",
    "yahoo.com",
    "aol.com",
    "live.com",
];
