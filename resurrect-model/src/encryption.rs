//! Optional seam for encrypting saved state at rest.
//!
//! No implementation lives in this crate — a host that wants encrypted
//! state on disk implements this trait itself and hands it to
//! `resurrect_core::Config`. Leaving `Config::encryption` as `None`
//! writes plain JSON, as every test in this workspace does.

use crate::error::Result;

pub trait EncryptionAdapter: Send + Sync {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
