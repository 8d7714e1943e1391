use std::path::{Path, PathBuf};

use log::error;

use crate::{AlgorithmVariant, EmbeddingSettings, Stego, StegoError};

pub fn prepare() -> DecodeApi {
    DecodeApi::default()
}

/// Recovers a secret from an image file, optionally writing it to a file
#[derive(Default, Debug)]
pub struct DecodeApi {
    secret_image: Option<PathBuf>,
    output: Option<PathBuf>,
    algorithm: AlgorithmVariant,
    settings: EmbeddingSettings,
}

impl DecodeApi {
    pub fn from_secret_image<A: AsRef<Path>>(mut self, secret_image: A) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    pub fn using_algorithm(mut self, algorithm: AlgorithmVariant) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_settings(mut self, settings: EmbeddingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The recovered bytes are written there as they are
    pub fn into_output_file<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<Vec<u8>, StegoError> {
        let Some(secret_image) = self.secret_image else {
            return Err(StegoError::CarrierNotSet);
        };

        let secret = Stego::from_file(&secret_image)?.decode(self.algorithm, Some(&self.settings))?;

        if let Some(output) = self.output {
            std::fs::write(&output, &secret).map_err(|e| {
                error!("Error writing secret to {output:?}: {e}");
                StegoError::WriteError { source: e }
            })?;
        }

        Ok(secret)
    }
}
