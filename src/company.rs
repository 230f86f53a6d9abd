//! Guesses a company name out of a job posting url.

use url::Url;

pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Host segments that never name a company.
const STOPLIST: [&str; 6] = ["www", "com", "org", "net", "careers", "jobs"];

/// Returns the first host segment that isn't in the stoplist, with its first character
/// uppercased. Urls that can't be parsed or have no such segment resolve to [UNKNOWN_COMPANY].
///
/// `https://jobs.careers.acme.com/x` resolves to `Acme`.
pub fn resolve(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return UNKNOWN_COMPANY.to_string();
    };
    parsed
        .host_str()
        .and_then(|host| {
            host.split('.')
                .find(|segment| !segment.is_empty() && !STOPLIST.contains(segment))
        })
        .map(capitalize)
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
