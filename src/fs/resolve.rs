//! Request path resolution
//!
//! Turns a raw request target into an absolute path inside the base directory.
//! Containment is a literal byte-prefix check against `base + separator`.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

use crate::error::HandlerError;

/// Resolves request targets against a fixed base directory
#[derive(Debug, Clone)]
pub struct PathResolver {
    base: PathBuf,
    /// Raw bytes of `base` followed by the platform separator
    prefix: Vec<u8>,
}

impl PathResolver {
    /// Create a resolver rooted at `base`.
    ///
    /// `base` is expected to be absolute; it is normalized lexically but never
    /// touched on disk.
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = normalize(base.as_ref());
        let mut prefix = base.as_os_str().as_encoded_bytes().to_vec();
        prefix.extend_from_slice(MAIN_SEPARATOR_STR.as_bytes());
        Self { base, prefix }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve a request target (path plus optional query) to a contained path
    pub fn resolve(&self, target: &str) -> Result<PathBuf, HandlerError> {
        let decoded = decode_path(extract_path(target))?;

        // Exactly one leading separator belongs to the URL, the rest is relative
        let relative = decoded.strip_prefix('/').unwrap_or(&decoded);
        let path = normalize(&self.base.join(relative));

        if self.contains(&path) {
            Ok(path)
        } else {
            Err(HandlerError::Forbidden)
        }
    }

    fn contains(&self, path: &Path) -> bool {
        // Raw bytes: lossy text would map distinct invalid names to U+FFFD
        path == self.base.as_path()
            || path.as_os_str().as_encoded_bytes().starts_with(&self.prefix)
    }
}

/// Path component of a request target, query and fragment dropped
fn extract_path(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    let target = &target[..end];

    // absolute-form: http://host/path
    if target.starts_with('/') {
        return target;
    }
    match target.find("://") {
        Some(scheme_end) => {
            let rest = &target[scheme_end + 3..];
            rest.find('/').map_or("/", |slash| &rest[slash..])
        }
        None => target,
    }
}

/// Strict percent-decoding: a `%` must introduce two hex digits and the
/// decoded bytes must be UTF-8.
fn decode_path(raw: &str) -> Result<String, HandlerError> {
    let bytes = raw.as_bytes();
    let mut pos = 0;
    while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'%') {
        let at = pos + offset;
        let escaped = bytes
            .get(at + 1..at + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !escaped {
            return Err(HandlerError::Decode(raw.to_string()));
        }
        pos = at + 3;
    }

    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| HandlerError::Decode(raw.to_string()))
}

/// Lexical normalization: drops `.`, resolves `..` without going above root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
