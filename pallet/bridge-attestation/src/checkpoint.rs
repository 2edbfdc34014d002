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

//! Checkpoints validators sign for artifacts, encoded the way the Ethereum bridge contract
//! reconstructs them

use ethabi::Token;
use seed_pallet_common::{CheckpointEncoder, SignatureVerifier};
use seed_primitives::{
	bridge::{Artifact, ContractCall, OutgoingBatch, SignerSet},
	EthAddress,
};
use sp_core::H256;
use sp_io::hashing::keccak_256;
use sp_std::prelude::*;

/// Right pad an ABI method name to 32 bytes
fn method_name(name: &[u8]) -> Token {
	let mut padded = [0_u8; 32];
	padded[..name.len()].copy_from_slice(name);
	Token::FixedBytes(padded.to_vec())
}

fn uint_array<I: Iterator<Item = u128>>(values: I) -> Token {
	Token::Array(values.map(|v| Token::Uint(v.into())).collect())
}

fn address_array<I: Iterator<Item = EthAddress>>(addresses: I) -> Token {
	Token::Array(addresses.map(Token::Address).collect())
}

/// ABI encodes artifacts and hashes them with keccak256
pub struct EthAbiCheckpointEncoder;

impl EthAbiCheckpointEncoder {
	fn signer_set(set: &SignerSet, domain: Token) -> Vec<u8> {
		ethabi::encode(&[
			domain,
			method_name(b"checkpoint"),
			Token::Uint(set.nonce.into()),
			address_array(set.members.iter().map(|m| m.eth_address)),
			uint_array(set.members.iter().map(|m| m.power as u128)),
		])
	}

	fn batch(batch: &OutgoingBatch, domain: Token) -> Vec<u8> {
		ethabi::encode(&[
			domain,
			method_name(b"transactionBatch"),
			uint_array(batch.transfers.iter().map(|t| t.amount)),
			address_array(batch.transfers.iter().map(|t| t.destination)),
			uint_array(batch.transfers.iter().map(|t| t.fee)),
			Token::Uint(batch.batch_nonce.into()),
			Token::Address(batch.token_contract),
			Token::Uint(batch.timeout.into()),
		])
	}

	fn contract_call(call: &ContractCall, domain: Token) -> Vec<u8> {
		ethabi::encode(&[
			domain,
			method_name(b"logicCall"),
			uint_array(call.tokens.iter().map(|t| t.amount)),
			address_array(call.tokens.iter().map(|t| t.contract)),
			uint_array(call.fees.iter().map(|t| t.amount)),
			address_array(call.fees.iter().map(|t| t.contract)),
			Token::Address(call.address),
			Token::Bytes(call.payload.clone()),
			Token::Uint(call.timeout.into()),
			Token::FixedBytes(call.invalidation_scope.as_bytes().to_vec()),
			Token::Uint(call.invalidation_nonce.into()),
		])
	}
}

impl CheckpointEncoder for EthAbiCheckpointEncoder {
	fn checkpoint(artifact: &Artifact, domain_separator: &H256) -> H256 {
		let domain = Token::FixedBytes(domain_separator.as_bytes().to_vec());
		let encoded = match artifact {
			Artifact::SignerSet(set) => Self::signer_set(set, domain),
			Artifact::Batch(batch) => Self::batch(batch, domain),
			Artifact::ContractCall(call) => Self::contract_call(call, domain),
		};
		H256::from(keccak_256(&encoded))
	}
}

/// Verifies `personal_sign` style secp256k1 signatures over a checkpoint
pub struct EthereumCheckpointVerifier;

impl SignatureVerifier for EthereumCheckpointVerifier {
	fn verify(checkpoint: &H256, signature: &[u8], signer: &EthAddress) -> bool {
		seed_primitives::verify_checkpoint_signature(checkpoint, signature, signer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use seed_primitives::bridge::{Erc20Token, OutgoingTransfer, SignerSetMember};
	use sp_core::H160;

	fn signer_set() -> Artifact {
		Artifact::SignerSet(SignerSet {
			nonce: 3,
			members: vec![
				SignerSetMember { eth_address: H160::repeat_byte(1), power: 60 },
				SignerSetMember { eth_address: H160::repeat_byte(2), power: 40 },
			],
			height: 10,
		})
	}

	fn batch() -> Artifact {
		Artifact::Batch(OutgoingBatch {
			batch_nonce: 1,
			token_contract: H160::repeat_byte(7),
			timeout: 500,
			transfers: vec![OutgoingTransfer {
				id: 1,
				sender: H160::repeat_byte(9).into(),
				destination: H160::repeat_byte(8),
				amount: 1_000,
				fee: 5,
			}],
		})
	}

	#[test]
	fn checkpoint_is_deterministic() {
		let domain = H256::repeat_byte(0x42);
		assert_eq!(
			EthAbiCheckpointEncoder::checkpoint(&signer_set(), &domain),
			EthAbiCheckpointEncoder::checkpoint(&signer_set(), &domain),
		);
	}

	#[test]
	fn domain_separator_changes_checkpoint() {
		assert_ne!(
			EthAbiCheckpointEncoder::checkpoint(&batch(), &H256::repeat_byte(1)),
			EthAbiCheckpointEncoder::checkpoint(&batch(), &H256::repeat_byte(2)),
		);
	}

	#[test]
	fn artifacts_have_distinct_checkpoints() {
		let domain = H256::zero();
		let call = Artifact::ContractCall(ContractCall {
			invalidation_scope: H256::repeat_byte(3),
			invalidation_nonce: 1,
			address: H160::repeat_byte(4),
			payload: vec![1, 2, 3],
			timeout: 100,
			tokens: vec![Erc20Token { contract: H160::repeat_byte(5), amount: 10 }],
			fees: vec![],
		});
		let checkpoints = [
			EthAbiCheckpointEncoder::checkpoint(&signer_set(), &domain),
			EthAbiCheckpointEncoder::checkpoint(&batch(), &domain),
			EthAbiCheckpointEncoder::checkpoint(&call, &domain),
		];
		assert_ne!(checkpoints[0], checkpoints[1]);
		assert_ne!(checkpoints[1], checkpoints[2]);
		assert_ne!(checkpoints[0], checkpoints[2]);
	}

	#[test]
	fn signer_set_checkpoint_matches_abi_layout() {
		let domain = H256::repeat_byte(0x42);
		let Artifact::SignerSet(set) = signer_set() else { unreachable!() };
		let mut name = [0_u8; 32];
		name[..10].copy_from_slice(b"checkpoint");
		let expected = keccak_256(&ethabi::encode(&[
			Token::FixedBytes(domain.as_bytes().to_vec()),
			Token::FixedBytes(name.to_vec()),
			Token::Uint(3_u64.into()),
			Token::Array(vec![
				Token::Address(H160::repeat_byte(1)),
				Token::Address(H160::repeat_byte(2)),
			]),
			Token::Array(vec![Token::Uint(60_u64.into()), Token::Uint(40_u64.into())]),
		]));
		assert_eq!(
			EthAbiCheckpointEncoder::checkpoint(&Artifact::SignerSet(set), &domain),
			H256::from(expected),
		);
	}
}
