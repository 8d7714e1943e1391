use std::path::{Path, PathBuf};

use log::error;

use crate::{AlgorithmVariant, EmbeddingSettings, Stego, StegoError};

pub fn prepare() -> EmbedApi {
    EmbedApi::default()
}

/// Hides a secret in a carrier image file and writes the result to a new file
#[derive(Default, Debug)]
pub struct EmbedApi {
    secret: Option<Vec<u8>>,
    secret_file: Option<PathBuf>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    algorithm: AlgorithmVariant,
    settings: EmbeddingSettings,
}

impl EmbedApi {
    pub fn with_settings(mut self, settings: EmbeddingSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn using_algorithm(mut self, algorithm: AlgorithmVariant) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_secret<B: AsRef<[u8]>>(mut self, secret: B) -> Self {
        self.secret = Some(secret.as_ref().to_vec());
        self
    }

    /// Takes the secret from a file, read when [`EmbedApi::execute`] runs.
    /// Wins over [`EmbedApi::with_secret`].
    pub fn with_secret_file<A: AsRef<Path>>(mut self, secret_file: A) -> Self {
        self.secret_file = Some(secret_file.as_ref().to_path_buf());
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<(), StegoError> {
        let Some(image) = self.image else {
            return Err(StegoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(StegoError::TargetNotSet);
        };
        let secret = match (self.secret_file, self.secret) {
            (Some(file), _) => std::fs::read(&file).map_err(|e| {
                error!("Error reading secret file {file:?}: {e}");
                StegoError::ReadError { source: e }
            })?,
            (None, Some(secret)) => secret,
            (None, None) => return Err(StegoError::MissingSecret),
        };

        let mut s = Stego::from_file(&image)?;
        s.set_secret_data(secret)?;
        s.embed(self.algorithm, Some(&self.settings))?;
        s.save_as(&output)
    }
}
