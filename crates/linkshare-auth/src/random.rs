//! Operating-system backed random bytes.

use rand::RngCore;
use rand::rngs::OsRng;

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::traits::RandomSource;

/// Random source drawing from the operating system generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
        OsRng.try_fill_bytes(buf).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Random generator unavailable", e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_produces_distinct_buffers() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsRandom.fill(&mut a).unwrap();
        OsRandom.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }
}
