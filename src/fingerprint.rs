use sha2::{Digest, Sha256};

/// Derive a stable voter fingerprint from the client IP and user agent.
///
/// First 16 bytes of SHA-256(ip || user_agent), hex-encoded to a 32
/// character lowercase token. No per-process salt, so the same network
/// position and client collapse to the same identity across restarts.
/// A duplicate-reduction heuristic, not authentication: shared NATs
/// collide, and switching browsers splits one person into two voters.
pub fn fingerprint(ip: &str, user_agent: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hasher.update(user_agent.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let a = fingerprint("203.0.113.7", "Mozilla/5.0");
        let b = fingerprint("203.0.113.7", "Mozilla/5.0");
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_length_lowercase_hex() {
        let fp = fingerprint("198.51.100.23", "curl/8.5.0");
        assert_eq!(fp.len(), 32);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn distinct_inputs_diverge() {
        let base = fingerprint("203.0.113.7", "Mozilla/5.0");
        assert_ne!(base, fingerprint("203.0.113.8", "Mozilla/5.0"));
        assert_ne!(base, fingerprint("203.0.113.7", "Mozilla/5.0 (X11)"));
    }

    #[test]
    fn empty_input_matches_sha256_prefix() {
        // SHA-256 of the empty string, first 16 bytes.
        assert_eq!(fingerprint("", ""), "e3b0c44298fc1c149afbf4c8996fb924");
    }
}
