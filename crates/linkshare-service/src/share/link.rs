//! Share link hash and access token generation.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use linkshare_core::result::AppResult;
use linkshare_core::traits::RandomSource;

/// Generates link hashes and access tokens from an injected random source.
#[derive(Debug, Clone)]
pub struct LinkService {
    random: Arc<dyn RandomSource>,
    hash_bytes: usize,
    token_bytes: usize,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(random: Arc<dyn RandomSource>, hash_bytes: usize, token_bytes: usize) -> Self {
        Self {
            random,
            hash_bytes,
            token_bytes,
        }
    }

    /// Generates a URL-safe link hash.
    pub fn generate_hash(&self) -> AppResult<String> {
        self.encode_random(self.hash_bytes)
    }

    /// Generates a URL-safe access token for password-protected links.
    pub fn generate_token(&self) -> AppResult<String> {
        self.encode_random(self.token_bytes)
    }

    fn encode_random(&self, len: usize) -> AppResult<String> {
        let mut bytes = vec![0u8; len];
        self.random.fill(&mut bytes)?;
        Ok(URL_SAFE.encode(bytes))
    }
}
