//! Resolves font and import references found in CSS against the stylesheet URL.
//!
//! This is string surgery, not RFC 3986 resolution: malformed input produces a
//! best-effort joined string instead of an error.

const QUOTES: [char; 2] = ['"', '\''];

pub fn resolve(relative_ref: &str, base_url: &str) -> String {
    let base = clean(base_url);
    let reference = clean(relative_ref);

    if base.is_empty() {
        return reference.to_string();
    }
    if reference.is_empty() {
        return base.to_string();
    }

    if is_absolute(reference) {
        return reference.to_string();
    }

    if let Some(rest) = reference.strip_prefix("//") {
        return format!("{}//{}", scheme(base), rest);
    }

    if reference.starts_with('/') {
        return format!("{}{}", origin(base), reference);
    }

    if reference.starts_with("../") {
        let mut directory = parent(base);
        let mut rest = reference;
        while let Some(stripped) = rest.strip_prefix("../") {
            directory = parent(directory);
            rest = stripped;
        }
        return join(directory, rest);
    }

    if let Some(rest) = reference.strip_prefix("./") {
        return join(parent(base), rest);
    }

    join(parent(base), reference)
}

fn clean(input: &str) -> &str {
    input
        .trim()
        .trim_matches(|c: char| QUOTES.contains(&c) || c.is_whitespace())
        .trim_end_matches('/')
}

fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("data:")
}

/// `https:` for `https://host/path`, empty when the base has no scheme.
fn scheme(base: &str) -> &str {
    match base.find("//") {
        Some(index) => &base[..index],
        None => "",
    }
}

/// `scheme://host` portion of a URL.
fn origin(base: &str) -> &str {
    let authority_start = base.find("://").map(|index| index + 3).unwrap_or(0);
    let authority_end = base[authority_start..]
        .find(['/', '?', '#'])
        .map(|index| authority_start + index)
        .unwrap_or(base.len());
    &base[..authority_end]
}

/// Drops the last path segment (plus any query or fragment), never climbing above the origin.
fn parent(url: &str) -> &str {
    let origin = origin(url);
    let path = &url[origin.len()..];
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.rfind('/') {
        Some(index) => &url[..origin.len() + index],
        None => origin,
    }
}

fn join(directory: &str, rest: &str) -> String {
    format!("{}/{}", directory.trim_end_matches('/'), rest)
}
