pub mod dct;
pub mod luma;
pub mod lsb_codec;
pub mod permutation;
pub mod zhao_koch;

pub use lsb_codec::Lsb;
pub use permutation::Permutation;
pub use zhao_koch::ZhaoKoch;
