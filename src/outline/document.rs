// Document identity as seen by the outline core

/// A host document: a stable key, a revision token, its text and language id
pub trait SourceDocument {
    fn unique_key(&self) -> &str;

    /// Changes whenever the content changes
    fn revision(&self) -> u64;

    fn full_text(&self) -> &str;

    fn language_id(&self) -> &str;
}

/// Owned document snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    pub key: String,
    pub revision: u64,
    pub text: String,
    pub language_id: String,
}

impl TextDocument {
    pub fn new(
        key: impl Into<String>,
        revision: u64,
        text: impl Into<String>,
        language_id: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            revision,
            text: text.into(),
            language_id: language_id.into(),
        }
    }

    /// Snapshot whose revision is derived from the content hash
    pub fn from_content(
        key: impl Into<String>,
        text: impl Into<String>,
        language_id: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let revision = content_revision(&text);
        Self::new(key, revision, text, language_id)
    }
}

impl SourceDocument for TextDocument {
    fn unique_key(&self) -> &str {
        &self.key
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn full_text(&self) -> &str {
        &self.text
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }
}

/// Revision token for hosts without their own versioning: the first 8 bytes of the blake3 hash
pub fn content_revision(text: &str) -> u64 {
    let hash = blake3::hash(text.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}
