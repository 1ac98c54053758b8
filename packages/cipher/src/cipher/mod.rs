mod algorithm;
mod operations;
mod provider;

pub use self::algorithm::{CipherAlgorithm, CipherFamily};
pub use operations::{decrypt, encrypt, fit_key};
pub use provider::{iv_length, supported_ciphers};
