//! Rewriting the API endpoint in the app's `.env` file.

pub const API_BASE_URL_KEY: &str = "API_BASE_URL";

/// Replaces the first complete `API_BASE_URL=...` line with `url`.
///
/// Only a line that starts with the key and is terminated by `\n` is
/// replaced; every other byte of `contents` is preserved. Returns `None` when
/// there is no such line.
#[must_use]
pub fn replace_api_base_url(contents: &str, url: &str) -> Option<String> {
    let prefix = format!("{API_BASE_URL_KEY}=");

    let mut offset = 0;
    for line in contents.split_inclusive('\n') {
        if line.starts_with(&prefix) && line.ends_with('\n') {
            let end = offset + line.len();
            let mut rewritten = String::with_capacity(contents.len() + url.len());
            rewritten.push_str(&contents[..offset]);
            rewritten.push_str(&prefix);
            rewritten.push_str(url);
            rewritten.push('\n');
            rewritten.push_str(&contents[end..]);
            return Some(rewritten);
        }
        offset += line.len();
    }

    None
}
