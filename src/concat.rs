//! Concatenate step

use sha2::{Digest, Sha256};

/// The bundle produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    name: String,
    content: Vec<u8>,
}

impl OutputArtifact {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// File name the artifact is written under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// SHA256 of the content, `sha256:<hex>`
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.content);
        format!("sha256:{:x}", hasher.finalize())
    }
}

/// Join `parts` byte-for-byte in iteration order, with no separator.
pub fn concatenate<I, P>(parts: I, name: impl Into<String>) -> OutputArtifact
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut content = Vec::new();
    for part in parts {
        content.extend_from_slice(part.as_ref());
    }
    OutputArtifact::new(name, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_separator() {
        let artifact = concatenate(["A{color:red}", "B{color:blue}"], "out.css");

        assert_eq!(artifact.name(), "out.css");
        assert_eq!(artifact.content(), b"A{color:red}B{color:blue}");
    }

    #[test]
    fn preserves_input_order() {
        let forward = concatenate(["a", "b", "c"], "x");
        let reversed = concatenate(["c", "b", "a"], "x");

        assert_eq!(forward.content(), b"abc");
        assert_eq!(reversed.content(), b"cba");
    }

    #[test]
    fn empty_input_gives_empty_artifact() {
        let artifact = concatenate(Vec::<Vec<u8>>::new(), "empty.css");

        assert!(artifact.is_empty());
        assert_eq!(artifact.len(), 0);
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let a = concatenate(["x{}"], "a.css");
        let b = concatenate(["x{}"], "b.css");
        let c = concatenate(["y{}"], "a.css");

        assert!(a.digest().starts_with("sha256:"));
        // SHA-256 is 64 hex chars + "sha256:" prefix
        assert_eq!(a.digest().len(), 71);
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
    }
}
