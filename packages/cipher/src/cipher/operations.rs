//! Encrypt and decrypt with caller-supplied key and IV

use super::CipherAlgorithm;
use crate::{CipherError, Result};
use zeroize::Zeroizing;

#[cfg(feature = "aes")]
use aes::cipher::block_padding::Pkcs7;
#[cfg(feature = "aes")]
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
#[cfg(feature = "aes")]
use aes::{Aes128, Aes192, Aes256};
#[cfg(feature = "aes")]
use aes_gcm::{Aes128Gcm, Aes256Gcm};
#[cfg(feature = "chacha20")]
use chacha20poly1305::ChaCha20Poly1305;

// both AEAD crates re-export the same `aead` traits
#[cfg(feature = "aes")]
use aes_gcm::aead::{Aead, KeyInit, Nonce};
#[cfg(all(feature = "chacha20", not(feature = "aes")))]
use chacha20poly1305::aead::{Aead, KeyInit, Nonce};

#[cfg(feature = "aes")]
type Ctr128<C> = ctr::Ctr128BE<C>;

/// Size a key to exactly `size` bytes
///
/// Shorter keys are right-padded with zero bytes and longer keys are
/// truncated. This is how OpenSSL treats passphrase-style keys, so a peer
/// configured with `"1234567890ABCDEF"` for AES-256 derives the same key here.
#[must_use]
pub fn fit_key(key: &[u8], size: usize) -> Zeroizing<Vec<u8>> {
    if key.len() != size {
        tracing::trace!(supplied = key.len(), size, "fitting key to cipher key size");
    }
    let mut fitted = Zeroizing::new(vec![0u8; size]);
    let len = key.len().min(size);
    fitted[..len].copy_from_slice(&key[..len]);
    fitted
}

/// Encrypt `plaintext`, returning raw ciphertext bytes
///
/// AEAD ciphers append their 16-byte tag to the ciphertext.
///
/// # Errors
///
/// Returns `CipherError::InvalidIvLength` if `iv` is not exactly
/// `cipher.iv_size()` bytes, or `CipherError::EncryptionFailed` if the
/// cipher rejects its input.
pub fn encrypt(plaintext: &[u8], cipher: CipherAlgorithm, key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    check_iv(cipher, iv)?;
    let key = fit_key(key, cipher.key_size());

    match cipher {
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes128Cbc => cbc_encrypt::<cbc::Encryptor<Aes128>>(&key, iv, plaintext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes192Cbc => cbc_encrypt::<cbc::Encryptor<Aes192>>(&key, iv, plaintext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes256Cbc => cbc_encrypt::<cbc::Encryptor<Aes256>>(&key, iv, plaintext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes128Ctr => ctr_apply::<Ctr128<Aes128>>(&key, iv, plaintext)
            .map_err(CipherError::EncryptionFailed),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes192Ctr => ctr_apply::<Ctr128<Aes192>>(&key, iv, plaintext)
            .map_err(CipherError::EncryptionFailed),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes256Ctr => ctr_apply::<Ctr128<Aes256>>(&key, iv, plaintext)
            .map_err(CipherError::EncryptionFailed),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes128Gcm => aead_seal::<Aes128Gcm>(&key, iv, plaintext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes256Gcm => aead_seal::<Aes256Gcm>(&key, iv, plaintext),
        #[cfg(feature = "chacha20")]
        CipherAlgorithm::ChaCha20Poly1305 => aead_seal::<ChaCha20Poly1305>(&key, iv, plaintext),
        #[allow(unreachable_patterns)]
        _ => Err(CipherError::UnsupportedAlgorithm(cipher.name().to_string())),
    }
}

/// Decrypt raw ciphertext produced by [`encrypt`]
///
/// With a wrong key or IV, CBC usually fails its padding check but may
/// return garbage, and CTR always returns garbage. AEAD ciphers always fail.
///
/// # Errors
///
/// Returns `CipherError::InvalidIvLength` for a wrongly sized IV and
/// `CipherError::DecryptionFailed` for bad padding, a failed tag check, or
/// ciphertext that is not a whole number of blocks.
pub fn decrypt(ciphertext: &[u8], cipher: CipherAlgorithm, key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    check_iv(cipher, iv)?;
    let key = fit_key(key, cipher.key_size());

    match cipher {
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes128Cbc => cbc_decrypt::<cbc::Decryptor<Aes128>>(&key, iv, ciphertext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes192Cbc => cbc_decrypt::<cbc::Decryptor<Aes192>>(&key, iv, ciphertext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes256Cbc => cbc_decrypt::<cbc::Decryptor<Aes256>>(&key, iv, ciphertext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes128Ctr => ctr_apply::<Ctr128<Aes128>>(&key, iv, ciphertext)
            .map_err(CipherError::DecryptionFailed),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes192Ctr => ctr_apply::<Ctr128<Aes192>>(&key, iv, ciphertext)
            .map_err(CipherError::DecryptionFailed),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes256Ctr => ctr_apply::<Ctr128<Aes256>>(&key, iv, ciphertext)
            .map_err(CipherError::DecryptionFailed),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes128Gcm => aead_open::<Aes128Gcm>(&key, iv, ciphertext),
        #[cfg(feature = "aes")]
        CipherAlgorithm::Aes256Gcm => aead_open::<Aes256Gcm>(&key, iv, ciphertext),
        #[cfg(feature = "chacha20")]
        CipherAlgorithm::ChaCha20Poly1305 => aead_open::<ChaCha20Poly1305>(&key, iv, ciphertext),
        #[allow(unreachable_patterns)]
        _ => Err(CipherError::UnsupportedAlgorithm(cipher.name().to_string())),
    }
}

fn check_iv(cipher: CipherAlgorithm, iv: &[u8]) -> Result<()> {
    if iv.len() == cipher.iv_size() {
        Ok(())
    } else {
        Err(CipherError::InvalidIvLength {
            cipher: cipher.name(),
            expected: cipher.iv_size(),
            actual: iv.len(),
        })
    }
}

#[cfg(feature = "aes")]
fn cbc_encrypt<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    E: KeyIvInit + BlockEncryptMut,
{
    let encryptor =
        E::new_from_slices(key, iv).map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

#[cfg(feature = "aes")]
fn cbc_decrypt<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    D: KeyIvInit + BlockDecryptMut,
{
    let decryptor =
        D::new_from_slices(key, iv).map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::DecryptionFailed("invalid padding".to_string()))
}

// CTR is its own inverse
#[cfg(feature = "aes")]
fn ctr_apply<S>(key: &[u8], iv: &[u8], input: &[u8]) -> std::result::Result<Vec<u8>, String>
where
    S: KeyIvInit + StreamCipher,
{
    let mut stream = S::new_from_slices(key, iv).map_err(|e| e.to_string())?;
    let mut buffer = input.to_vec();
    stream
        .try_apply_keystream(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok(buffer)
}

#[cfg(any(feature = "aes", feature = "chacha20"))]
fn aead_seal<A>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    A: KeyInit + Aead,
{
    let aead = A::new_from_slice(key).map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
    aead.encrypt(Nonce::<A>::from_slice(iv), plaintext)
        .map_err(|_| CipherError::EncryptionFailed("AEAD seal failed".to_string()))
}

#[cfg(any(feature = "aes", feature = "chacha20"))]
fn aead_open<A>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    A: KeyInit + Aead,
{
    let aead = A::new_from_slice(key).map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;
    aead.decrypt(Nonce::<A>::from_slice(iv), ciphertext)
        .map_err(|_| CipherError::DecryptionFailed("authentication tag mismatch".to_string()))
}
