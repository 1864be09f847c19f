use crate::types::Signature;
use sha2::{Digest, Sha256};

/// Hashes `parts` under a `domain` tag into a lowercase hex SHA-256 digest.
///
/// Every part is length-prefixed so that `["ab", "c"]` and `["a", "bc"]` never collide.
pub fn compute_signature<I, P>(domain: &str, parts: I) -> Signature
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    update_with_part(&mut hasher, domain.as_bytes());

    for part in parts {
        update_with_part(&mut hasher, part.as_ref());
    }

    format!("{:x}", hasher.finalize())
}

fn update_with_part(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use super::compute_signature;

    #[test]
    fn test_signature_is_stable_hex() {
        let signature = compute_signature("test", ["a", "b"]);
        assert_eq!(signature.len(), 64);
        assert_eq!(signature, compute_signature("test", ["a", "b"]));
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_part_boundaries_are_significant() {
        assert_ne!(
            compute_signature("test", ["ab", "c"]),
            compute_signature("test", ["a", "bc"])
        );
    }

    #[test]
    fn test_domain_is_significant() {
        assert_ne!(
            compute_signature("vocabulary", ["a"]),
            compute_signature("labels", ["a"])
        );
    }
}
