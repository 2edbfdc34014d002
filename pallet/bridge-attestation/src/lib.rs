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

//! # Pallet Bridge Attestation 🌉
//!
//! The on-chain half of the Ethereum bridge.
//!
//! Validators (or the orchestrator keys they delegate to) vote on events observed on Ethereum.
//! Once a claim gathers votes from validators holding at least 2/3 of bonded power it is accepted,
//! and accepted events are executed exactly once, strictly in event nonce order.
//!
//! Validators also sign checkpoints of artifacts produced on this chain (signer sets, outgoing
//! batches, contract calls). Signatures are verified against the validator's registered Ethereum
//! key and stored so relayers can submit them to the bridge contract.
#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

use frame_support::pallet_prelude::*;
use frame_system::pallet_prelude::*;
use seed_pallet_common::{
	CheckpointEncoder, EthereumEventHandler, OrchestratorResolver, SignatureVerifier,
	VotingPowerOracle,
};
use seed_primitives::{
	bridge::{Artifact, ArtifactKey, EthereumConfirmation, EventClaim},
	AccountId, EthAddress, EventNonce,
};
use sp_core::H256;
use sp_std::prelude::*;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
mod checkpoint;
mod impls;
pub mod types;
pub mod weights;

#[cfg(test)]
mod mock;

pub use checkpoint::{EthAbiCheckpointEncoder, EthereumCheckpointVerifier};
pub use types::*;
pub use weights::WeightInfo;

/// The logging target for this pallet
pub(crate) const LOG_TARGET: &str = "bridge-attestation";

#[frame_support::pallet]
pub mod pallet {
	use super::*;

	/// The current storage version.
	const STORAGE_VERSION: StorageVersion = StorageVersion::new(0);

	#[pallet::pallet]
	#[pallet::storage_version(STORAGE_VERSION)]
	#[pallet::without_storage_info]
	pub struct Pallet<T>(_);

	#[pallet::config]
	pub trait Config: frame_system::Config<AccountId = AccountId> {
		/// The overarching event type
		type RuntimeEvent: From<Event> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
		/// Identifies this bridge deployment, mixed into every checkpoint
		#[pallet::constant]
		type BridgeId: Get<H256>;
		/// Upper bound on accepted events executed in one pass
		#[pallet::constant]
		type MaxExecutionsPerBlock: Get<u32>;
		/// Bonded status and voting power of validators
		type VotingPower: VotingPowerOracle<AccountId>;
		/// Maps submitters to the validator (and Ethereum key) they act for
		type OrchestratorResolver: OrchestratorResolver<AccountId>;
		/// Produces the checkpoint hash validators sign for an artifact
		type CheckpointEncoder: CheckpointEncoder;
		/// Verifies checkpoint signatures
		type SignatureVerifier: SignatureVerifier;
		/// Applies the effects of accepted Ethereum events
		type EventHandler: EthereumEventHandler;
		/// Interface to access weight values
		type WeightInfo: WeightInfo;
	}

	/// Votes for claims about Ethereum events, keyed by (event nonce, claim hash)
	#[pallet::storage]
	pub type EventVoteRecords<T> =
		StorageDoubleMap<_, Twox64Concat, EventNonce, Identity, H256, EventVoteRecord>;

	/// The claim hash accepted at each event nonce
	/// At most one claim may ever be accepted per nonce
	#[pallet::storage]
	pub type AcceptedEvents<T> = StorageMap<_, Twox64Concat, EventNonce, H256>;

	/// The highest event nonce that has been accepted and executed
	#[pallet::storage]
	#[pallet::getter(fn last_observed_event_nonce)]
	pub type LastObservedEventNonce<T> = StorageValue<_, EventNonce, ValueQuery>;

	/// The highest event nonce each validator has voted for
	#[pallet::storage]
	#[pallet::getter(fn last_event_nonce_by_validator)]
	pub type LastEventNonceByValidator<T> =
		StorageMap<_, Twox64Concat, AccountId, EventNonce, ValueQuery>;

	/// Nonce of the signer set most recently observed active on Ethereum
	#[pallet::storage]
	#[pallet::getter(fn last_observed_signer_set_nonce)]
	pub type LastObservedSignerSetNonce<T> = StorageValue<_, u64, ValueQuery>;

	/// Artifacts awaiting validator signatures
	#[pallet::storage]
	pub type Artifacts<T> = StorageMap<_, Blake2_128Concat, ArtifactKey, Artifact>;

	/// Validator signatures over artifact checkpoints
	#[pallet::storage]
	pub type Confirmations<T> = StorageDoubleMap<
		_,
		Blake2_128Concat,
		ArtifactKey,
		Twox64Concat,
		AccountId,
		EthereumConfirmation,
	>;

	/// Orchestrator -> validator
	#[pallet::storage]
	pub type OrchestratorValidator<T> = StorageMap<_, Twox64Concat, AccountId, AccountId>;

	/// Validator -> orchestrator
	#[pallet::storage]
	pub type ValidatorOrchestrator<T> = StorageMap<_, Twox64Concat, AccountId, AccountId>;

	/// Validator -> Ethereum signing key
	#[pallet::storage]
	pub type ValidatorEthAddress<T> = StorageMap<_, Twox64Concat, AccountId, EthAddress>;

	/// Ethereum signing key -> validator
	#[pallet::storage]
	pub type EthAddressValidator<T> = StorageMap<_, Twox64Concat, EthAddress, AccountId>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event {
		/// A validator voted for a claim
		EventVoteRecorded { validator: AccountId, event_nonce: EventNonce, claim_hash: H256 },
		/// A claim crossed the voting threshold
		EventClaimAccepted { event_nonce: EventNonce, claim_hash: H256 },
		/// An accepted claim was executed
		EventClaimExecuted { event_nonce: EventNonce, claim_hash: H256 },
		/// Executing an accepted claim failed, it will be retried next block
		EventClaimExecutionFailed {
			event_nonce: EventNonce,
			claim_hash: H256,
			error: DispatchError,
		},
		/// An artifact is available for signing
		ArtifactRegistered { artifact_key: ArtifactKey },
		/// A validator's signature over an artifact was stored
		ConfirmationStored { artifact_key: ArtifactKey, validator: AccountId, storage_key: Vec<u8> },
		/// A validator delegated its bridge duties
		DelegateKeysSet { validator: AccountId, orchestrator: AccountId, eth_address: EthAddress },
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The claim is malformed
		InvalidClaim,
		/// The submitter is neither a validator nor a registered orchestrator
		UnknownSubmitter,
		/// The submitter's validator is not bonded
		ValidatorNotBonded,
		/// The validator already voted for this claim
		DuplicateVote,
		/// No artifact exists with the given key
		ArtifactNotFound,
		/// An artifact with the same key was already registered
		ArtifactExists,
		/// The signature does not match the checkpoint and expected signer
		InvalidSignature,
		/// The validator already confirmed this artifact
		DuplicateConfirmation,
		/// The orchestrator is bound to another validator
		OrchestratorInUse,
		/// The Ethereum address is bound to another validator
		EthAddressInUse,
		/// The Ethereum address is the zero address
		InvalidEthAddress,
	}

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
		/// Execute accepted events that are next in line, retrying any that failed previously
		fn on_initialize(_n: BlockNumberFor<T>) -> Weight {
			let attempts = Self::process_accepted_events();
			T::DbWeight::get()
				.reads(2)
				.saturating_add(T::WeightInfo::execute_event().saturating_mul(attempts as u64))
		}
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Vote that an event happened on Ethereum
		///
		/// The caller must be a bonded validator or the orchestrator of one.
		/// Votes for an event that becomes accepted and is next in line trigger its execution
		/// (and any already accepted events following it).
		#[pallet::call_index(0)]
		#[pallet::weight(
			T::WeightInfo::submit_ethereum_event().saturating_add(
				T::WeightInfo::execute_event()
					.saturating_mul(T::MaxExecutionsPerBlock::get() as u64)
			)
		)]
		pub fn submit_ethereum_event(
			origin: OriginFor<T>,
			claim: EventClaim,
		) -> DispatchResultWithPostInfo {
			let who = ensure_signed(origin)?;
			let validator = Self::bonded_validator(&who)?;
			let outcome = Self::record_vote(claim, validator)?;

			Ok(Some(T::WeightInfo::submit_ethereum_event().saturating_add(
				T::WeightInfo::execute_event().saturating_mul(outcome.execution_attempts as u64),
			))
			.into())
		}

		/// Submit an Ethereum signature over the checkpoint of `artifact_key`
		///
		/// `eth_signer` must be the Ethereum key registered for the caller's validator.
		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::submit_ethereum_signature())]
		pub fn submit_ethereum_signature(
			origin: OriginFor<T>,
			artifact_key: ArtifactKey,
			eth_signer: EthAddress,
			signature: Vec<u8>,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::submit_confirmation(&who, artifact_key, eth_signer, signature)?;
			Ok(())
		}

		/// Delegate bridge duties of the calling validator to `orchestrator`, signing with
		/// `eth_address` on Ethereum
		///
		/// Replaces any keys the validator set previously.
		#[pallet::call_index(2)]
		#[pallet::weight(T::WeightInfo::set_delegate_keys())]
		pub fn set_delegate_keys(
			origin: OriginFor<T>,
			orchestrator: AccountId,
			eth_address: EthAddress,
		) -> DispatchResult {
			let validator = ensure_signed(origin)?;
			ensure!(T::VotingPower::is_validator(&validator), Error::<T>::UnknownSubmitter);
			ensure!(!eth_address.is_zero(), Error::<T>::InvalidEthAddress);
			// another validator's own account can't act for this one
			ensure!(
				orchestrator == validator || !T::VotingPower::is_validator(&orchestrator),
				Error::<T>::OrchestratorInUse
			);
			if let Some(owner) = OrchestratorValidator::<T>::get(orchestrator) {
				ensure!(owner == validator, Error::<T>::OrchestratorInUse);
			}
			if let Some(owner) = EthAddressValidator::<T>::get(eth_address) {
				ensure!(owner == validator, Error::<T>::EthAddressInUse);
			}

			if let Some(previous) = ValidatorOrchestrator::<T>::take(validator) {
				OrchestratorValidator::<T>::remove(previous);
			}
			if let Some(previous) = ValidatorEthAddress::<T>::take(validator) {
				EthAddressValidator::<T>::remove(previous);
			}
			OrchestratorValidator::<T>::insert(orchestrator, validator);
			ValidatorOrchestrator::<T>::insert(validator, orchestrator);
			ValidatorEthAddress::<T>::insert(validator, eth_address);
			EthAddressValidator::<T>::insert(eth_address, validator);

			Self::deposit_event(Event::DelegateKeysSet { validator, orchestrator, eth_address });
			Ok(())
		}
	}
}
