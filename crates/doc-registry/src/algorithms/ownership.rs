//! # Ownership Prover
//!
//! Confirms that an identity is one of a document's signatories.
//!
//! An unknown hash and a signatory mismatch both yield `ProofFailed`, so a
//! failed proof reveals nothing about whether the hash is registered.

use crate::domain::{
    is_valid_identity, AccessControlRegistry, Address, DocumentRecord, Hash, ProofError, Role,
};
use crate::ports::outbound::DocumentStore;

/// Returns the record under `hash` if `signatory` co-owns it. Read-only.
pub fn prove_ownership<S: DocumentStore + ?Sized>(
    store: &S,
    access: &AccessControlRegistry,
    hash: &Hash,
    signatory: &Address,
    caller: &Address,
) -> Result<DocumentRecord, ProofError> {
    access.require_role(Role::Admin, caller)?;

    if !is_valid_identity(signatory) {
        return Err(ProofError::InvalidSignatory);
    }

    if !store.exists(hash) {
        return Err(ProofError::ProofFailed);
    }
    let record = store.get(hash);
    if record.has_signatory(signatory) {
        Ok(record)
    } else {
        Err(ProofError::ProofFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDocumentStore;
    use crate::domain::DocumentLink;

    const OWNER: Address = Address::new([0xAA; 20]);
    const SIGNER: Address = Address::new([0x01; 20]);
    const STRANGER: Address = Address::new([0x02; 20]);

    fn setup() -> (InMemoryDocumentStore, AccessControlRegistry) {
        let mut access = AccessControlRegistry::new();
        access.initialize(OWNER).unwrap();

        let mut store = InMemoryDocumentStore::new();
        store
            .insert(DocumentRecord {
                hash: Hash::new([1u8; 32]),
                name: "doc".to_string(),
                description: "desc".to_string(),
                signatories: vec![SIGNER],
                main_document: DocumentLink::none(),
            })
            .unwrap();
        (store, access)
    }

    #[test]
    fn test_prove_ownership_success() {
        let (store, access) = setup();
        let record =
            prove_ownership(&store, &access, &Hash::new([1u8; 32]), &SIGNER, &OWNER).unwrap();
        assert_eq!(record.name, "doc");
    }

    #[test]
    fn test_unknown_hash_and_non_member_are_indistinguishable() {
        let (store, access) = setup();
        let non_member =
            prove_ownership(&store, &access, &Hash::new([1u8; 32]), &STRANGER, &OWNER);
        let unknown_hash =
            prove_ownership(&store, &access, &Hash::new([9u8; 32]), &STRANGER, &OWNER);
        let zero_hash = prove_ownership(&store, &access, &Hash::ZERO, &STRANGER, &OWNER);

        assert_eq!(non_member, Err(ProofError::ProofFailed));
        assert_eq!(unknown_hash, Err(ProofError::ProofFailed));
        assert_eq!(zero_hash, Err(ProofError::ProofFailed));
    }

    #[test]
    fn test_zero_signatory_rejected() {
        let (store, access) = setup();
        assert_eq!(
            prove_ownership(&store, &access, &Hash::new([1u8; 32]), &Address::ZERO, &OWNER),
            Err(ProofError::InvalidSignatory)
        );
    }

    #[test]
    fn test_non_admin_denied() {
        let (store, access) = setup();
        // Even a signatory cannot prove without the admin role.
        assert_eq!(
            prove_ownership(&store, &access, &Hash::new([1u8; 32]), &SIGNER, &SIGNER),
            Err(ProofError::Unauthorized)
        );
    }
}
