//! # Identity Validation
//!
//! An identity is valid if it decodes to exactly 20 bytes and is not the
//! null identity. Width is enforced by the `Address` type at parse time, so
//! a typed `Address` only needs the null check.

use super::value_objects::Address;

/// Returns true if `identity` may act as a signatory or role member.
#[must_use]
pub fn is_valid_identity(identity: &Address) -> bool {
    !identity.is_zero()
}

/// Returns true if `raw` parses to a valid identity.
#[must_use]
pub fn is_valid_identity_str(raw: &str) -> bool {
    raw.parse::<Address>()
        .map(|identity| is_valid_identity(&identity))
        .unwrap_or(false)
}

/// Returns true if every identity in `identities` is valid.
#[must_use]
pub fn all_valid(identities: &[Address]) -> bool {
    identities.iter().all(is_valid_identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_identity_is_invalid() {
        assert!(!is_valid_identity(&Address::ZERO));
        assert!(is_valid_identity(&Address::new([1u8; 20])));
    }

    #[test]
    fn test_string_identities() {
        assert!(is_valid_identity_str(
            "0x0badcafe0badcafe0badcafe0badcafe0badcafe"
        ));
        assert!(!is_valid_identity_str(
            "0x0000000000000000000000000000000000000000"
        ));
        assert!(!is_valid_identity_str("0x0badcafe"));
        assert!(!is_valid_identity_str("not an address"));
    }

    #[test]
    fn test_all_valid() {
        assert!(all_valid(&[Address::new([1u8; 20]), Address::new([2u8; 20])]));
        assert!(!all_valid(&[Address::new([1u8; 20]), Address::ZERO]));
        assert!(all_valid(&[]));
    }
}
