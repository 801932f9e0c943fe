use cosmwasm_std::{Addr, Api, Binary, DepsMut};
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::state::{Campaign, USED_NONCES};

/// Digest the campaign admin signs off-chain to authorize a claim:
/// Sha256 over the raw nonce bytes followed by the claimant's address bytes.
/// The campaign id is deliberately not part of the message; uniqueness is
/// enforced on the (nonce, claimant) pair instead.
///
/// The two fields are packed without a length prefix, so a nonce ending in
/// a prefix of another claimant's address hashes to the same digest as
/// that other pair. Signer tooling must issue opaque, fixed-format nonces
/// and never derive them from addresses.
pub fn claim_digest(nonce: &str, claimant: &Addr) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(nonce.as_bytes());
    hasher.update(claimant.as_bytes());
    hasher.finalize().into()
}

/// Check that `signature` is a valid compact secp256k1 signature by the
/// campaign admin's key over the claim digest.
pub fn verify_signature(
    api: &dyn Api,
    campaign: &Campaign,
    nonce: &str,
    claimant: &Addr,
    signature: &Binary,
) -> Result<(), ContractError> {
    let digest = claim_digest(nonce, claimant);
    let valid = api
        .secp256k1_verify(&digest, signature.as_slice(), campaign.admin_pubkey.as_slice())
        .map_err(|_| ContractError::InvalidSignature {})?;
    if !valid {
        return Err(ContractError::InvalidSignature {});
    }
    Ok(())
}

/// Full claim authorization: signature check plus replay protection.
/// Consumes the (nonce, claimant) pair. The write only persists when the
/// whole execution succeeds, so a failed downstream step never leaves the
/// nonce marked as used.
pub fn authorize_claim(
    deps: &mut DepsMut,
    campaign: &Campaign,
    nonce: &str,
    claimant: &Addr,
    signature: &Binary,
) -> Result<(), ContractError> {
    verify_signature(deps.api, campaign, nonce, claimant, signature)?;
    if USED_NONCES.has(deps.storage, (nonce, claimant)) {
        return Err(ContractError::NonceAlreadyUsed {
            nonce: nonce.to_string(),
        });
    }
    USED_NONCES.save(deps.storage, (nonce, claimant), &true)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::Uint128;
    use k256::ecdsa::signature::DigestSigner;
    use k256::ecdsa::{Signature, SigningKey};

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32].into()).unwrap()
    }

    fn pubkey(key: &SigningKey) -> Binary {
        Binary(key.verifying_key().to_encoded_point(true).as_bytes().to_vec())
    }

    fn sign(key: &SigningKey, nonce: &str, claimant: &Addr) -> Binary {
        let digest = Sha256::new()
            .chain_update(nonce.as_bytes())
            .chain_update(claimant.as_bytes());
        let sig: Signature = key.sign_digest(digest);
        let sig = sig.normalize_s().unwrap_or(sig);
        Binary(sig.to_bytes().to_vec())
    }

    fn campaign(key: &SigningKey) -> Campaign {
        Campaign {
            admin: Addr::unchecked("admin"),
            admin_pubkey: pubkey(key),
            token: Addr::unchecked("token"),
            balance: Uint128::new(100),
            claim_amount: Uint128::new(10),
            active: true,
            cancelled: false,
            beneficiaries: vec![],
        }
    }

    #[test]
    fn digest_depends_on_nonce_and_claimant() {
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");
        assert_ne!(claim_digest("1", &alice), claim_digest("2", &alice));
        assert_ne!(claim_digest("1", &alice), claim_digest("1", &bob));
        assert_eq!(claim_digest("1", &alice), claim_digest("1", &alice));
    }

    #[test]
    fn accepts_admin_signature() {
        let deps = mock_dependencies();
        let key = signing_key();
        let campaign = campaign(&key);
        let claimant = Addr::unchecked("alice");
        let sig = sign(&key, "2", &claimant);

        verify_signature(&deps.api, &campaign, "2", &claimant, &sig).unwrap();
    }

    #[test]
    fn rejects_foreign_signature() {
        let deps = mock_dependencies();
        let key = signing_key();
        let other = SigningKey::from_bytes(&[9u8; 32].into()).unwrap();
        let campaign = campaign(&key);
        let claimant = Addr::unchecked("alice");
        let sig = sign(&other, "2", &claimant);

        let err = verify_signature(&deps.api, &campaign, "2", &claimant, &sig).unwrap_err();
        assert_eq!(err, ContractError::InvalidSignature {});
    }

    #[test]
    fn rejects_signature_bound_to_other_claimant() {
        let deps = mock_dependencies();
        let key = signing_key();
        let campaign = campaign(&key);
        let sig = sign(&key, "2", &Addr::unchecked("alice"));

        let err = verify_signature(&deps.api, &campaign, "2", &Addr::unchecked("bob"), &sig)
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidSignature {});
    }

    #[test]
    fn rejects_malformed_signature() {
        let deps = mock_dependencies();
        let key = signing_key();
        let campaign = campaign(&key);
        let claimant = Addr::unchecked("alice");

        let err = verify_signature(&deps.api, &campaign, "2", &claimant, &Binary(vec![0u8; 12]))
            .unwrap_err();
        assert_eq!(err, ContractError::InvalidSignature {});
    }

    #[test]
    fn consumes_nonce_once() {
        let mut deps = mock_dependencies();
        let key = signing_key();
        let campaign = campaign(&key);
        let claimant = Addr::unchecked("alice");
        let sig = sign(&key, "2", &claimant);

        authorize_claim(&mut deps.as_mut(), &campaign, "2", &claimant, &sig).unwrap();
        let err = authorize_claim(&mut deps.as_mut(), &campaign, "2", &claimant, &sig).unwrap_err();
        assert_eq!(
            err,
            ContractError::NonceAlreadyUsed {
                nonce: "2".to_string()
            }
        );
    }

    #[test]
    fn same_nonce_different_claimant_is_distinct() {
        let mut deps = mock_dependencies();
        let key = signing_key();
        let campaign = campaign(&key);
        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");

        let sig = sign(&key, "2", &alice);
        authorize_claim(&mut deps.as_mut(), &campaign, "2", &alice, &sig).unwrap();

        let sig = sign(&key, "2", &bob);
        authorize_claim(&mut deps.as_mut(), &campaign, "2", &bob, &sig).unwrap();
    }

    #[test]
    fn failed_signature_does_not_consume_nonce() {
        let mut deps = mock_dependencies();
        let key = signing_key();
        let campaign = campaign(&key);
        let claimant = Addr::unchecked("alice");

        let bad = Binary(vec![1u8; 64]);
        authorize_claim(&mut deps.as_mut(), &campaign, "2", &claimant, &bad).unwrap_err();

        // a later valid authorization for the same nonce must still pass
        let sig = sign(&key, "2", &claimant);
        authorize_claim(&mut deps.as_mut(), &campaign, "2", &claimant, &sig).unwrap();
    }
}
