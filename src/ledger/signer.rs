//! Canonical signing of transaction envelopes.
//!
//! Only `$tx` is signed. The digest is SHA-256 over its canonical JSON bytes,
//! signed with ECDSA over secp256k1 and stored as base64 DER under the
//! signing identity in `$sigs`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::Signature;

use crate::ledger::envelope::Envelope;
use crate::ledger::otk::{decode_public_key, Otk};
use crate::ledger::types::{AkashicError, AkashicResult};

/// Role name differential-consensus transactions sign under.
pub const OWNER_ROLE: &str = "owner";

/// Sign `envelope.tx` with `otk` and store the signature under `sign_as`.
///
/// Signatures already present for other identities are kept, so one
/// envelope can collect several signers.
pub fn sign(mut envelope: Envelope, otk: &Otk, sign_as: &str) -> AkashicResult<Envelope> {
    let bytes = envelope
        .tx
        .canonical_bytes()
        .map_err(|e| AkashicError::SigningFailure(format!("canonicalization failed: {}", e)))?;

    let signature = sign_bytes(otk, &bytes)?;
    envelope.signatures.insert(sign_as.to_string(), signature);

    tracing::debug!(
        contract = %envelope.tx.contract,
        sign_as = %sign_as,
        signers = envelope.signatures.len(),
        "Transaction signed"
    );

    Ok(envelope)
}

/// ECDSA-sign arbitrary bytes, returning base64 DER.
pub fn sign_bytes(otk: &Otk, bytes: &[u8]) -> AkashicResult<String> {
    let signature: Signature = otk
        .signing_key()
        .try_sign(bytes)
        .map_err(|e| AkashicError::SigningFailure(e.to_string()))?;
    Ok(STANDARD.encode(signature.to_der().as_bytes()))
}

/// Check the signature stored under `identity` against `public_key_hex`.
///
/// Returns `Ok(false)` when no signature is stored or it does not verify.
pub fn verify(envelope: &Envelope, public_key_hex: &str, identity: &str) -> AkashicResult<bool> {
    let Some(encoded) = envelope.signature(identity) else {
        return Ok(false);
    };
    let verifying_key = decode_public_key(public_key_hex)?;

    let der = match STANDARD.decode(encoded) {
        Ok(der) => der,
        Err(_) => return Ok(false),
    };
    let signature = match Signature::from_der(&der) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };

    let bytes = envelope.tx.canonical_bytes()?;
    Ok(verifying_key.verify(&bytes, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::envelope::TxObject;
    use serde_json::json;

    const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_otk(identity: &str) -> Otk {
        Otk::reconstruct(TEST_PRIVATE_KEY, identity).unwrap()
    }

    fn unsigned() -> Envelope {
        let mut tx = TxObject::new("akashicchain", "contract@1", 15);
        tx.input.insert("owner".into(), json!({ "$stream": "AS1", "amount": "1500000" }));
        Envelope::new(tx)
    }

    #[test]
    fn test_sign_stores_under_identity() {
        let otk = test_otk("AS1");
        let signed = sign(unsigned(), &otk, otk.identity()).unwrap();
        assert_eq!(signed.signatures.len(), 1);
        assert!(verify(&signed, otk.public_key(), "AS1").unwrap());
    }

    #[test]
    fn test_repeat_signatures_both_verify() {
        let otk = test_otk("AS1");
        let first = sign(unsigned(), &otk, "AS1").unwrap();
        let second = sign(unsigned(), &otk, "AS1").unwrap();
        assert_eq!(first.tx, second.tx);
        assert!(verify(&first, otk.public_key(), "AS1").unwrap());
        assert!(verify(&second, otk.public_key(), "AS1").unwrap());
    }

    #[test]
    fn test_tampered_tx_fails_verification() {
        let otk = test_otk("AS1");
        let mut signed = sign(unsigned(), &otk, "AS1").unwrap();
        signed.tx.input.insert("owner".into(), json!({ "$stream": "AS1", "amount": "9" }));
        assert!(!verify(&signed, otk.public_key(), "AS1").unwrap());
    }

    #[test]
    fn test_multi_signer_keeps_existing_signatures() {
        let owner = test_otk("AS1");
        let cosigner = Otk::reconstruct(
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
            "AS2",
        )
        .unwrap();

        let signed = sign(unsigned(), &owner, owner.identity()).unwrap();
        let signed = sign(signed, &cosigner, cosigner.identity()).unwrap();

        assert_eq!(signed.signatures.len(), 2);
        assert!(verify(&signed, owner.public_key(), "AS1").unwrap());
        assert!(verify(&signed, cosigner.public_key(), "AS2").unwrap());
        assert!(!verify(&signed, owner.public_key(), "AS2").unwrap());
    }

    #[test]
    fn test_sign_as_role() {
        let otk = test_otk("AS1");
        let signed = sign(unsigned(), &otk, OWNER_ROLE).unwrap();
        assert!(signed.signature("AS1").is_none());
        assert!(verify(&signed, otk.public_key(), OWNER_ROLE).unwrap());
    }

    #[test]
    fn test_missing_signature_is_not_valid() {
        let otk = test_otk("AS1");
        assert!(!verify(&unsigned(), otk.public_key(), "AS1").unwrap());
    }
}
