use hmac::{Hmac, Mac};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::Sha256;

// Provably-fair seeding:
// server_seed (secret) + client_seed + nonce -> HMAC-SHA256 -> 32-byte StdRng seed.
// Publishing sha256(server_seed) up front lets a player check every spin afterwards.

pub type HmacSha256 = Hmac<Sha256>;

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairSeed {
    pub server_seed: String, // secret
    pub client_seed: String,
}

impl FairSeed {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
        }
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self, nonce: u64) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes())
            .expect("HMAC accepts keys of any length");
        let msg = format!("{}:{}", self.client_seed, nonce);
        mac.update(msg.as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    /// The generator used for spin number `nonce`.
    pub fn rng_for(&self, nonce: u64) -> StdRng {
        StdRng::from_seed(self.hmac_bytes(nonce))
    }
}

/// Where each spin's randomness comes from.
#[derive(Debug)]
pub enum RngSource {
    /// Seeded once from the operating system.
    Entropy(StdRng),
    /// Replayable: spin `n` uses `seed.rng_for(n)`; the first spin is nonce 1.
    ProvablyFair { seed: FairSeed, nonce: u64 },
}

impl RngSource {
    pub fn entropy() -> Self {
        Self::Entropy(StdRng::from_entropy())
    }

    pub fn provably_fair(seed: FairSeed) -> Self {
        Self::ProvablyFair { seed, nonce: 0 }
    }

    /// Nonce of the most recent spin, if this source is replayable.
    pub fn nonce(&self) -> Option<u64> {
        match self {
            Self::Entropy(_) => None,
            Self::ProvablyFair { nonce, .. } => Some(*nonce),
        }
    }

    /// Generator for the next spin.
    pub fn next_rng(&mut self) -> StdRng {
        match self {
            Self::Entropy(inner) => StdRng::from_seed(inner.gen()),
            Self::ProvablyFair { seed, nonce } => {
                *nonce += 1;
                seed.rng_for(*nonce)
            }
        }
    }
}
