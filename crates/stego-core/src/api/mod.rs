pub mod decode;
pub mod embed;
