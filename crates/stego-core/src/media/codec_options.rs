use std::fmt::{self, Debug, Formatter};

/// Length of the payload header in bits, it stores the payload byte length
pub const HEADER_BITS: usize = 32;

/// Length of the payload header in bytes
pub const HEADER_BYTES: usize = HEADER_BITS / 8;

/// Default coefficient margin `d` for the Zhao-Koch algorithm
pub const DEFAULT_MARGIN: i32 = 5;

/// Settings shared by both algorithms, used for embedding and decoding
///
/// The key only decides *where* bits are placed, it does not encrypt anything.
#[derive(Clone, PartialEq, Eq)]
pub struct EmbeddingSettings {
    /// Seeds the pseudo random placement of payload bits.
    /// `None` behaves exactly like an empty key.
    pub key: Option<String>,

    /// Coefficient separation margin for Zhao-Koch.
    /// Embedding separates the coefficients by `d + 5`, decoding tests against `d`.
    pub d: i32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            key: None,
            d: DEFAULT_MARGIN,
        }
    }
}

impl EmbeddingSettings {
    pub fn with_key<S: AsRef<str>>(mut self, key: S) -> Self {
        self.key = Some(key.as_ref().to_string());
        self
    }

    pub fn with_d(mut self, d: i32) -> Self {
        self.d = d;
        self
    }

    /// The key as used for seeding, an absent key is the empty string
    pub fn key_or_empty(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }
}

impl Debug for EmbeddingSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let key = match &self.key {
            Some(key) => format!("Some({})", "*".repeat(key.len())),
            None => "None".to_string(),
        };
        f.debug_struct("EmbeddingSettings")
            .field("key", &format_args!("{key}"))
            .field("d", &self.d)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_key_and_margin_5() {
        let settings = EmbeddingSettings::default();
        assert_eq!(settings.key, None);
        assert_eq!(settings.d, 5);
        assert_eq!(settings.key_or_empty(), "");
    }

    #[test]
    fn builder_helpers_set_fields() {
        let settings = EmbeddingSettings::default().with_key("Secret42").with_d(9);
        assert_eq!(settings.key_or_empty(), "Secret42");
        assert_eq!(settings.d, 9);
    }

    #[test]
    fn debug_masks_the_key() {
        let settings = EmbeddingSettings::default().with_key("password");
        assert_eq!(
            format!("{:?}", settings),
            "EmbeddingSettings { key: Some(********), d: 5 }"
        );

        let settings = EmbeddingSettings::default();
        assert_eq!(
            format!("{:?}", settings),
            "EmbeddingSettings { key: None, d: 5 }"
        );
    }
}
