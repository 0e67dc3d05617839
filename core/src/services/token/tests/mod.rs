
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::KeyManager;

/// One keypair per test binary; RSA generation is slow
pub(crate) static TEST_KEYS: Lazy<Arc<KeyManager>> = Lazy::new(|| {
    Arc::new(KeyManager::generate("primary", 2048).expect("Failed to generate test keypair"))
});
