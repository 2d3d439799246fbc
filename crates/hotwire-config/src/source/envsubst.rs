//! K8s-style `$(VAR)` substitution over raw content bytes.

use hotwire_common::ContentError;
use regex::bytes::Regex;
use std::sync::LazyLock;

/// Group 1 is the escaping `$` of `$$(VAR)`, group 2 the variable name.
static ENV_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\$)?\$\(([A-Za-z0-9_]+)\)").unwrap());

/// Replace every `$(VAR)` with the value of the environment variable `VAR`.
///
/// `$$(VAR)` is left as the literal `$(VAR)`. Any unset variable fails
/// the whole expansion.
pub fn expand_env(content: &[u8]) -> Result<Vec<u8>, ContentError> {
    expand_with(content, |name| std::env::var(name).ok())
}

pub(crate) fn expand_with<F>(content: &[u8], lookup: F) -> Result<Vec<u8>, ContentError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = Vec::with_capacity(content.len());
    let mut last = 0;

    for caps in ENV_REF.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        out.extend_from_slice(&content[last..whole.start()]);
        last = whole.end();

        if caps.get(1).is_some() {
            out.extend_from_slice(&whole.as_bytes()[1..]);
            continue;
        }

        // The name group only matches ASCII.
        let name = String::from_utf8_lossy(&caps[2]);
        match lookup(&name) {
            Some(value) => out.extend_from_slice(value.as_bytes()),
            None => return Err(ContentError::MissingEnvVar(name.into_owned())),
        }
    }

    out.extend_from_slice(&content[last..]);
    Ok(out)
}
