//! Request signatures.

use std::fmt;

use sha2::{Digest, Sha256};

/// A deterministic hash of a request's URL and canonicalised parameters.
///
/// Parameters are sorted before hashing, so construction order never
/// changes the signature. Every component is length-prefixed, so no two
/// distinct requests share a byte stream.
///
/// # Examples
///
/// ```
/// use buoy_ingest::cache::Signature;
///
/// let url = "https://www.ndbc.noaa.gov/station_page.php";
/// let a = Signature::of(url, &[("a", "1".into()), ("b", "2".into())]);
/// let b = Signature::of(url, &[("b", "2".into()), ("a", "1".into())]);
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 32]);

impl Signature {
    /// Compute the signature of a GET request.
    pub fn of(url: &str, params: &[(&str, String)]) -> Self {
        let mut sorted: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        sorted.sort_unstable();

        let mut hasher = Sha256::new();
        update_prefixed(&mut hasher, url.as_bytes());
        hasher.update((sorted.len() as u64).to_le_bytes());
        for (key, value) in sorted {
            update_prefixed(&mut hasher, key.as_bytes());
            update_prefixed(&mut hasher, value.as_bytes());
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        Signature(digest)
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Store key under which the response body is cached.
    pub fn cache_key(&self) -> String {
        format!("pages/{}.html", self.to_hex())
    }
}

fn update_prefixed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", &self.to_hex()[..12])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
