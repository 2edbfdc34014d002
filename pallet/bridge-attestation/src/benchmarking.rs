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

#![cfg(feature = "runtime-benchmarks")]

use super::*;
use crate::Pallet as BridgeAttestation;
use frame_benchmarking::{account as bench_account, benchmarks, impl_benchmark_test_suite};
use frame_support::assert_ok;
use frame_system::RawOrigin;
use seed_pallet_common::BridgeArtifactRegistry;
use seed_primitives::{
	bridge::{BatchExecutedEvent, DepositEvent, OutgoingBatch, OutgoingTransfer},
	checkpoint_signing_digest, eth_address_of,
};
use sp_core::{ecdsa, H160};

/// Batches the executed batch supersedes in `execute_event`
const SUPERSEDED_BATCHES: u64 = 10;

/// This is a helper function to get an account.
pub fn account<T: Config>(name: &'static str) -> AccountId {
	bench_account(name, 0, 0)
}

pub fn origin<T: Config>(acc: &AccountId) -> RawOrigin<AccountId> {
	RawOrigin::Signed(*acc)
}

/// An Ethereum key and its address, derived from `seed`
fn eth_signer(seed: u8) -> (libsecp256k1::SecretKey, EthAddress) {
	let secret = libsecp256k1::SecretKey::parse(&[seed; 32]).expect("valid secret key");
	let public = libsecp256k1::PublicKey::from_secret_key(&secret).serialize_compressed();
	let address = eth_address_of(&ecdsa::Public::from_raw(public)).expect("valid public key");
	(secret, address)
}

fn sign(secret: &libsecp256k1::SecretKey, checkpoint: &H256) -> Vec<u8> {
	let message = libsecp256k1::Message::parse(&checkpoint_signing_digest(checkpoint));
	let (signature, recovery_id) = libsecp256k1::sign(&message, secret);
	let mut signature = signature.serialize().to_vec();
	signature.push(recovery_id.serialize());
	signature
}

/// A bonded validator with an orchestrator and Ethereum key bound to it
fn setup_validator<T: Config>(
	name: &'static str,
	seed: u8,
) -> (AccountId, AccountId, libsecp256k1::SecretKey) {
	let validator = account::<T>(name);
	let orchestrator = bench_account(name, 1, 0);
	let (secret, eth_address) = eth_signer(seed);
	T::VotingPower::set_bonded_validator(&validator, 1);
	assert_ok!(BridgeAttestation::<T>::set_delegate_keys(
		origin::<T>(&validator).into(),
		orchestrator,
		eth_address
	));
	(validator, orchestrator, secret)
}

fn batch(batch_nonce: u64, transfers: u64) -> OutgoingBatch {
	OutgoingBatch {
		batch_nonce,
		token_contract: H160::repeat_byte(0xaa),
		timeout: 1_000,
		transfers: (0..transfers)
			.map(|id| OutgoingTransfer {
				id,
				sender: bench_account("Sender", 0, 0),
				destination: H160::from_low_u64_be(id),
				amount: 1_000,
				fee: 1,
			})
			.collect(),
	}
}

benchmarks! {
	submit_ethereum_event {
		// a second validator keeps the single vote below the threshold
		let (validator, orchestrator, _) = setup_validator::<T>("Alice", 1);
		setup_validator::<T>("Bob", 2);
		let claim = EventClaim::Deposit(DepositEvent {
			event_nonce: 1,
			token_contract: H160::repeat_byte(0xaa),
			amount: 1_000,
			ethereum_sender: H160::repeat_byte(0xbb),
			receiver: account::<T>("Receiver"),
			ethereum_height: 100,
		});
		let claim_hash = claim.claim_hash();
	}: _(origin::<T>(&orchestrator), claim)
	verify {
		let record = EventVoteRecords::<T>::get(1, claim_hash).expect("vote recorded");
		assert_eq!(record.voters, vec![validator]);
	}

	submit_ethereum_signature {
		let (validator, orchestrator, secret) = setup_validator::<T>("Alice", 1);
		let artifact = Artifact::Batch(batch(1, 100));
		let artifact_key = artifact.key();
		assert_ok!(BridgeAttestation::<T>::register_artifact(artifact.clone()));
		let signature = sign(&secret, &BridgeAttestation::<T>::checkpoint_of(&artifact));
		let (_, eth_address) = eth_signer(1);
	}: _(origin::<T>(&orchestrator), artifact_key, eth_address, signature)
	verify {
		assert!(Confirmations::<T>::contains_key(artifact_key, validator));
	}

	set_delegate_keys {
		// rotating releases the previous bindings
		let (validator, _, _) = setup_validator::<T>("Alice", 1);
		let orchestrator = bench_account("Alice", 2, 0);
		let (_, eth_address) = eth_signer(2);
	}: _(origin::<T>(&validator), orchestrator, eth_address)
	verify {
		assert_eq!(OrchestratorValidator::<T>::get(orchestrator), Some(validator));
		assert_eq!(ValidatorEthAddress::<T>::get(validator), Some(eth_address));
	}

	execute_event {
		for batch_nonce in 1..=SUPERSEDED_BATCHES + 1 {
			let artifact = Artifact::Batch(batch(batch_nonce, 1));
			assert_ok!(BridgeAttestation::<T>::register_artifact(artifact));
		}
		let claim = EventClaim::BatchExecuted(BatchExecutedEvent {
			event_nonce: 1,
			token_contract: H160::repeat_byte(0xaa),
			batch_nonce: SUPERSEDED_BATCHES + 1,
			ethereum_height: 100,
		});
		let claim_hash = claim.claim_hash();
		let mut record = EventVoteRecord::new(claim);
		record.accepted = true;
		EventVoteRecords::<T>::insert(1, claim_hash, record);
		AcceptedEvents::<T>::insert(1, claim_hash);
	}: { BridgeAttestation::<T>::process_accepted_events(); }
	verify {
		assert_eq!(LastObservedEventNonce::<T>::get(), 1);
		let superseded = ArtifactKey::Batch(H160::repeat_byte(0xaa), 1);
		assert!(!BridgeAttestation::<T>::artifact_exists(&superseded));
	}
}

impl_benchmark_test_suite!(
	BridgeAttestation,
	crate::mock::ExtBuilder::default().build(),
	crate::mock::Test
);
