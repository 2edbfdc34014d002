// Copyright 2022-2023 Futureverse Corporation Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// You may obtain a copy of the License at the root of this project source code

//! Ethereum flavoured ECDSA, used both for chain accounts and for bridge checkpoint signatures

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_core::{ecdsa, H160, H256};
use sp_io::hashing::keccak_256;
use sp_std::vec::Vec;

/// Length of a recoverable secp256k1 signature `r ++ s ++ v`
pub const ETHEREUM_SIGNATURE_LEN: usize = 65;

#[derive(
	Eq, PartialEq, Copy, Clone, Encode, Decode, TypeInfo, MaxEncodedLen, Default, PartialOrd, Ord,
)]
pub struct AccountId20(pub [u8; 20]);

#[cfg(feature = "std")]
impl_serde::impl_fixed_hash_serde!(AccountId20, 20);

#[cfg(feature = "std")]
impl std::fmt::Display for AccountId20 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", H160(self.0))
	}
}

impl core::fmt::Debug for AccountId20 {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{:?}", H160(self.0))
	}
}

impl From<[u8; 20]> for AccountId20 {
	fn from(bytes: [u8; 20]) -> Self {
		Self(bytes)
	}
}

impl From<H160> for AccountId20 {
	fn from(h160: H160) -> Self {
		Self(h160.0)
	}
}

impl From<AccountId20> for H160 {
	fn from(account: AccountId20) -> Self {
		H160(account.0)
	}
}

#[cfg(feature = "std")]
impl std::str::FromStr for AccountId20 {
	type Err = &'static str;
	fn from_str(input: &str) -> Result<Self, Self::Err> {
		H160::from_str(input).map(Into::into).map_err(|_| "invalid hex address.")
	}
}

#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[derive(Eq, PartialEq, Clone, Encode, Decode, sp_core::RuntimeDebug, TypeInfo)]
pub struct EthereumSignature(ecdsa::Signature);

impl From<ecdsa::Signature> for EthereumSignature {
	fn from(x: ecdsa::Signature) -> Self {
		EthereumSignature(x)
	}
}

impl sp_runtime::traits::Verify for EthereumSignature {
	type Signer = EthereumSigner;

	/// Verify this signature is for `msg` produced by `signer`
	///
	/// Accepts either a plain `keccak256(message)` signature or Ethereum's 'personal sign' scheme
	fn verify<L: sp_runtime::traits::Lazy<[u8]>>(&self, mut msg: L, signer: &AccountId20) -> bool {
		let message = msg.get();
		let signer = H160::from(*signer);
		verify_signature(self.0.as_ref(), &keccak_256(message), &signer) ||
			verify_signature(
				self.0.as_ref(),
				&keccak_256(personal_sign_message(message).as_slice()),
				&signer,
			)
	}
}

/// Recover the Ethereum address that produced `signature` over the 32 byte `message` digest
pub fn recover_eth_address(signature: &[u8; 65], message: &[u8; 32]) -> Option<H160> {
	match sp_io::crypto::secp256k1_ecdsa_recover(signature, message) {
		Ok(pubkey) => Some(H160::from_slice(&keccak_256(&pubkey)[12..])),
		Err(sp_io::EcdsaVerifyError::BadRS) => {
			log::debug!(target: "bridge", "Error recovering: Incorrect value of R or S");
			None
		},
		Err(sp_io::EcdsaVerifyError::BadV) => {
			log::debug!(target: "bridge", "Error recovering: Incorrect value of V");
			None
		},
		Err(sp_io::EcdsaVerifyError::BadSignature) => {
			log::debug!(target: "bridge", "Error recovering: Invalid signature");
			None
		},
	}
}

pub fn verify_signature(signature: &[u8; 65], message: &[u8; 32], signer: &H160) -> bool {
	recover_eth_address(signature, message).map_or(false, |recovered| recovered == *signer)
}

/// Constructs the message that Ethereum RPC's `personal_sign` and `eth_sign` would sign.
pub fn personal_sign_message(message: &[u8]) -> Vec<u8> {
	let mut l = message.len();
	let mut rev = Vec::new();
	while l > 0 {
		rev.push(b'0' + (l % 10) as u8);
		l /= 10;
	}
	let mut v = b"\x19Ethereum Signed Message:\n".to_vec();
	v.extend(rev.into_iter().rev());
	v.extend_from_slice(message);
	v
}

/// The digest an orchestrator signs for a bridge checkpoint
///
/// Bridge contracts verify signatures with `ecrecover` over the `eth_sign` digest of the checkpoint.
pub fn checkpoint_signing_digest(checkpoint: &H256) -> [u8; 32] {
	keccak_256(personal_sign_message(checkpoint.as_bytes()).as_slice())
}

/// Verify a raw signature over a bridge checkpoint was produced by `signer`
pub fn verify_checkpoint_signature(checkpoint: &H256, signature: &[u8], signer: &H160) -> bool {
	let Ok(signature) = <[u8; ETHEREUM_SIGNATURE_LEN]>::try_from(signature) else {
		return false
	};
	verify_signature(&signature, &checkpoint_signing_digest(checkpoint), signer)
}

/// Derive the Ethereum address of a compressed secp256k1 public key
pub fn eth_address_of(public: &ecdsa::Public) -> Option<H160> {
	let decompressed = libsecp256k1::PublicKey::parse_slice(
		&public.0,
		Some(libsecp256k1::PublicKeyFormat::Compressed),
	)
	.ok()?
	.serialize();
	Some(H160::from_slice(&keccak_256(&decompressed[1..65])[12..]))
}

/// Public key for an Ethereum compatible account
#[derive(
	Eq, PartialEq, Ord, PartialOrd, Clone, Encode, Decode, sp_core::RuntimeDebug, TypeInfo,
)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EthereumSigner([u8; 20]);

impl sp_runtime::traits::IdentifyAccount for EthereumSigner {
	type AccountId = AccountId20;
	fn into_account(self) -> AccountId20 {
		AccountId20(self.0)
	}
}

impl From<[u8; 20]> for EthereumSigner {
	fn from(x: [u8; 20]) -> Self {
		EthereumSigner(x)
	}
}

impl From<ecdsa::Public> for EthereumSigner {
	/// Keys that fail to decompress map to the zero address, which no signature recovers to
	fn from(x: ecdsa::Public) -> Self {
		EthereumSigner(eth_address_of(&x).unwrap_or_default().0)
	}
}

#[cfg(feature = "std")]
impl std::fmt::Display for EthereumSigner {
	fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(fmt, "ethereum signer: {:?}", H160::from_slice(&self.0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hex_literal::hex;
	use sp_core::{ecdsa, Pair};
	use sp_runtime::traits::{IdentifyAccount, Verify};

	#[test]
	fn account_derivation() {
		// Test from https://asecuritysite.com/encryption/ethadd
		let secret_key =
			hex::decode("502f97299c472b88754accd412b7c9a6062ef3186fba0c0388365e1edec24875")
				.unwrap();
		let public_key = ecdsa::Pair::from_seed_slice(&secret_key).unwrap().public();

		assert_eq!(
			eth_address_of(&public_key),
			Some(H160::from(hex!("976f8456e4e2034179b284a23c0e0c8f6d3da50c")))
		);
		let account: EthereumSigner = public_key.into();
		assert_eq!(
			account.into_account(),
			AccountId20::from(hex!("976f8456e4e2034179b284a23c0e0c8f6d3da50c"))
		);
	}

	#[test]
	fn recover_raw_signature() {
		let message = keccak_256(b"\x19Ethereum Signed Message:\n7Testing");
		let signature_raw = hex!["a2681e584058b5725e86b7d00c9a05963eff07543c9fb7e7f1a9b9980b5ae17b5428b8ccc0306c37923f5ef3e7762fd6ddf5f0278aae976f5fa8363f14e71aaa1c"];
		let expected = H160::from(hex!("3DA64aDE0Fd4354c3c7FF6A45A849b8CB94e3D2b"));

		assert_eq!(recover_eth_address(&signature_raw, &message), Some(expected));
		assert!(verify_signature(&signature_raw, &message, &expected));

		let signature: EthereumSignature = ecdsa::Signature(signature_raw).into();
		assert!(signature.verify("Testing".as_ref(), &AccountId20::from(expected)));
	}

	#[test]
	fn personal_sign_message_prefix() {
		assert_eq!(personal_sign_message(b"hello"), b"\x19Ethereum Signed Message:\n5hello".to_vec());
		assert_eq!(
			personal_sign_message(&[0_u8; 32])[..28],
			b"\x19Ethereum Signed Message:\n32"[..]
		);
	}

	#[test]
	fn checkpoint_signature_verifies() {
		let pair = ecdsa::Pair::from_seed(&hex![
			"7e9c7ad85df5cdc88659f53e06fb2eb9bab3ebc59083a3190eaf2c730332529c"
		]);
		let signer = eth_address_of(&pair.public()).unwrap();
		let checkpoint = H256::from_low_u64_be(42);
		let signature = pair.sign_prehashed(&checkpoint_signing_digest(&checkpoint));

		assert!(verify_checkpoint_signature(&checkpoint, &signature.0, &signer));
		// wrong signer
		assert!(!verify_checkpoint_signature(&checkpoint, &signature.0, &H160::from_low_u64_be(1)));
		// tampered checkpoint
		assert!(!verify_checkpoint_signature(&H256::from_low_u64_be(43), &signature.0, &signer));
		// truncated
		assert!(!verify_checkpoint_signature(&checkpoint, &signature.0[..64], &signer));
	}

	#[test]
	fn verify_fails_with_corrupt_signature() {
		let pair = ecdsa::Pair::from_seed(&hex![
			"7e9c7ad85df5cdc88659f53e06fb2eb9bab3ebc59083a3190eaf2c730332529c"
		]);
		let address: EthereumSigner = pair.public().into();
		let signature: EthereumSignature = ecdsa::Signature(hex!["ad0992d40e5cdf99db76bed162808508ac65acd7ae2fdc8573594f03ed9c939773e813181788fc02c3c68f3fdc592759b35f6354484343e18cb5317d34dab6c61b"]).into();

		assert!(!signature.verify("test eth signed message".as_ref(), &address.into_account()));
	}
}
