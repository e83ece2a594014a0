use sha2::{Digest, Sha256};

/// Process- and platform-independent hash of `text`.
///
/// Uses the first eight bytes of the SHA-256 digest, big-endian. Template
/// picks, remote seeds and procedural rendering all derive from this value.
pub fn stable_hash(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Picks an index in `0..len` from the text's stable hash.
pub fn pick_index(text: &str, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((stable_hash(text) % len as u64) as usize)
}

/// The seed forwarded to remote generators that accept small integers.
pub fn remote_seed(text: &str) -> u64 {
    stable_hash(text) % 10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_hash_known_value() {
        // sha256("") = e3b0c44298fc1c14...
        assert_eq!(stable_hash(""), 0xe3b0_c442_98fc_1c14);
    }

    #[test]
    fn test_stable_hash_is_repeatable() {
        assert_eq!(stable_hash("delicious pizza"), stable_hash("delicious pizza"));
        assert_ne!(stable_hash("delicious pizza"), stable_hash("Delicious pizza"));
    }

    #[test]
    fn test_pick_index_bounds() {
        assert_eq!(pick_index("anything", 0), None);
        for text in ["a", "b", "sunset over the lake", ""] {
            let idx = pick_index(text, 3).unwrap();
            assert!(idx < 3);
        }
        assert!(remote_seed("sunset") < 10_000);
    }
}
