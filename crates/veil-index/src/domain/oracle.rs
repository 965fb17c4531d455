//! Keyed digest oracle
//!
//! Maps plaintext terms to opaque, salted identifiers with HMAC-SHA256. The
//! salt is the only coordination an index builder and a query issuer need:
//! two oracles with different salts produce disjoint digest spaces, and every
//! lookup silently misses. Compare [`Salt::fingerprint`] out-of-band to catch
//! that.

use std::fmt;

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::{Digest as _, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;

/// Shared secret salt.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh salt from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; SALT_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    /// Short public checksum of the salt (first 8 bytes of SHA-256, hex).
    ///
    /// Safe to exchange; parties with equal fingerprints share a digest space.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0);
        hex::encode(&digest[..8])
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.fingerprint())
    }
}

/// Opaque identifier for a term, term variant or term pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 8 hex characters, for logs.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

/// Deterministic salted mapping from plaintext to [`Digest`].
#[derive(Clone)]
pub struct KeyedDigestOracle {
    salt: Salt,
    mac: HmacSha256,
}

impl KeyedDigestOracle {
    pub fn new(salt: Salt) -> Self {
        let mac =
            HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC can take key of any size");
        Self { salt, mac }
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Digest of a single value.
    pub fn encode(&self, value: &str) -> Digest {
        self.digest(Kind::Term, &[value], None)
    }

    /// `count` distinguishable-but-unlinkable digests of one value, one per
    /// variant index in `0..count`.
    pub fn encode_multiple(&self, value: &str, count: usize) -> Vec<Digest> {
        (0..count as u64)
            .map(|i| self.digest(Kind::Alternate, &[value], Some(i)))
            .collect()
    }

    /// Digest of an unordered pair; the members are sorted before encoding.
    pub fn encode_pair(&self, first: &str, second: &str) -> Digest {
        let (a, b) = canonical_pair(first, second);
        self.digest(Kind::Pair, &[a, b], None)
    }

    /// MAC over `kind`, each part as a big-endian `u64` length then its
    /// bytes, then the variant index. Distinct inputs never share MAC bytes.
    fn digest(&self, kind: Kind, parts: &[&str], variant: Option<u64>) -> Digest {
        let mut mac = self.mac.clone();
        mac.update(&[kind as u8]);
        for part in parts {
            mac.update(&(part.len() as u64).to_be_bytes());
            mac.update(part.as_bytes());
        }
        if let Some(variant) = variant {
            mac.update(&variant.to_be_bytes());
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&mac.finalize().into_bytes());
        Digest(bytes)
    }
}

/// Domain tag prefixed to every MAC input.
#[derive(Clone, Copy)]
#[repr(u8)]
enum Kind {
    Term = 0,
    Alternate = 1,
    Pair = 2,
}

impl fmt::Debug for KeyedDigestOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedDigestOracle")
            .field("salt", &self.salt)
            .finish()
    }
}

/// Lexicographically ordered pair.
pub fn canonical_pair<'a>(first: &'a str, second: &'a str) -> (&'a str, &'a str) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}
