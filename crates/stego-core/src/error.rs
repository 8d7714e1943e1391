use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// Represents an algorithm tag that does not name one of the supported variants
    #[error("Unknown algorithm: {0}")]
    InvalidAlgorithm(String),

    /// Represents a payload that does not fit into the carrier, raised before any pixel is touched.
    /// Both numbers are in bits, header included.
    #[error("Capacity Error: the payload needs {required} bits but the image only offers {available} bits")]
    InsufficientCapacity { required: usize, available: usize },

    /// Represents a length header that cannot belong to a real payload.
    /// Usually caused by a wrong key, a wrong algorithm or an image that carries no secret at all.
    #[error("Decode Error: header announces {length} bytes but the image holds at most {available} bytes")]
    DecodeError { length: i32, available: usize },

    /// Represents malformed numeric input, for example a non square matrix handed to the DCT
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Represents an image that the image decoder cannot parse
    #[error("Image format is not supported")]
    UnsupportedFormat,

    /// Represents an image that was parsed but is unusable as carrier, for example zero sized
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing secret data")]
    MissingSecret,
}
