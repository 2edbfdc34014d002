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

use super::*;
use frame_support::storage::with_storage_layer;
use seed_pallet_common::{log, BridgeArtifactRegistry};
use seed_primitives::VotingPower;
use sp_runtime::traits::Zero;

impl<T: Config> Pallet<T> {
	/// Resolve the submitter of a claim to the bonded validator it acts for
	pub fn bonded_validator(who: &AccountId) -> Result<AccountId, DispatchError> {
		let validator = match T::OrchestratorResolver::resolve(who) {
			Some((validator, _)) => validator,
			None => *who,
		};
		ensure!(T::VotingPower::is_validator(&validator), Error::<T>::UnknownSubmitter);
		ensure!(T::VotingPower::is_bonded(&validator), Error::<T>::ValidatorNotBonded);
		Ok(validator)
	}

	/// Record `validator`'s vote for `claim`
	///
	/// Accepts the claim once its voters hold at least 2/3 of bonded power, then executes it if
	/// it is the next event in line.
	pub fn record_vote(
		claim: EventClaim,
		validator: AccountId,
	) -> Result<VoteOutcome, DispatchError> {
		claim.validate().map_err(|e| {
			log!(debug, "🌉 rejected malformed claim from {:?}: {:?}", validator, e);
			Error::<T>::InvalidClaim
		})?;
		let event_nonce = claim.event_nonce();
		let claim_hash = claim.claim_hash();

		let accepted = EventVoteRecords::<T>::try_mutate(
			event_nonce,
			claim_hash,
			|maybe_record| -> Result<bool, DispatchError> {
				let record = maybe_record.get_or_insert_with(|| EventVoteRecord::new(claim));
				ensure!(!record.voters.contains(&validator), Error::<T>::DuplicateVote);
				record.voters.push(validator);

				// a sibling claim (or this one) already won this nonce
				if record.accepted || AcceptedEvents::<T>::contains_key(event_nonce) {
					return Ok(false)
				}
				record.accepted = Self::has_quorum(&record.voters);
				Ok(record.accepted)
			},
		)?;

		LastEventNonceByValidator::<T>::mutate(validator, |last| {
			*last = (*last).max(event_nonce);
		});
		log!(debug, "🌉 vote from {:?} for event {} ({:?})", validator, event_nonce, claim_hash);
		Self::deposit_event(Event::EventVoteRecorded { validator, event_nonce, claim_hash });

		let mut execution_attempts = 0;
		if accepted {
			AcceptedEvents::<T>::insert(event_nonce, claim_hash);
			log!(info, "🌉 event {} accepted ({:?})", event_nonce, claim_hash);
			Self::deposit_event(Event::EventClaimAccepted { event_nonce, claim_hash });

			if event_nonce == LastObservedEventNonce::<T>::get().saturating_add(1) {
				execution_attempts = Self::process_accepted_events();
			}
		}

		Ok(VoteOutcome { event_nonce, claim_hash, accepted, execution_attempts })
	}

	/// Whether `voters` together hold at least 2/3 of the current total bonded power
	///
	/// Power is read fresh, unbonded voters count for nothing.
	pub fn has_quorum(voters: &[AccountId]) -> bool {
		let total = T::VotingPower::total_bonded_power();
		if total.is_zero() {
			return false
		}
		let power = voters
			.iter()
			.filter(|v| T::VotingPower::is_bonded(v))
			.fold(VotingPower::zero(), |acc: VotingPower, v| {
				acc.saturating_add(T::VotingPower::power_of(v))
			});

		power.saturating_mul(3) >= total.saturating_mul(2)
	}

	/// Execute accepted events in nonce order starting at `LastObservedEventNonce + 1`
	///
	/// Stops at the first gap or failure. A failed event stays accepted and is retried on the next
	/// call. Returns the number of execution attempts.
	pub(crate) fn process_accepted_events() -> u32 {
		let mut attempts = 0_u32;
		while attempts < T::MaxExecutionsPerBlock::get() {
			let event_nonce = LastObservedEventNonce::<T>::get().saturating_add(1);
			let Some(claim_hash) = AcceptedEvents::<T>::get(event_nonce) else { break };
			let Some(record) = EventVoteRecords::<T>::get(event_nonce, claim_hash) else {
				log!(error, "🌉 accepted event {} is missing its vote record", event_nonce);
				break
			};
			attempts += 1;

			match with_storage_layer(|| Self::dispatch_event(&record.claim)) {
				Ok(()) => {
					LastObservedEventNonce::<T>::put(event_nonce);
					log!(info, "🌉 executed event {}", event_nonce);
					Self::deposit_event(Event::EventClaimExecuted { event_nonce, claim_hash });
				},
				Err(error) => {
					log!(error, "🌉 executing event {} failed: {:?}", event_nonce, error);
					Self::deposit_event(Event::EventClaimExecutionFailed {
						event_nonce,
						claim_hash,
						error,
					});
					break
				},
			}
		}
		attempts
	}

	/// Apply an accepted claim's effect
	fn dispatch_event(claim: &EventClaim) -> DispatchResult {
		match claim {
			EventClaim::Deposit(event) => T::EventHandler::on_deposit(event),
			EventClaim::BatchExecuted(event) => {
				Self::retire_artifact(ArtifactKey::Batch(event.token_contract, event.batch_nonce))?;
				T::EventHandler::on_batch_executed(event)
			},
			EventClaim::Erc20Deployed(event) => T::EventHandler::on_erc20_deployed(event),
			EventClaim::ContractCallExecuted(event) => {
				Self::retire_artifact(ArtifactKey::ContractCall(
					event.invalidation_scope,
					event.invalidation_nonce,
				))?;
				T::EventHandler::on_contract_call_executed(event)
			},
			EventClaim::SignerSetUpdated(event) => {
				LastObservedSignerSetNonce::<T>::put(event.signer_set_nonce);
				T::EventHandler::on_signer_set_updated(event)
			},
		}
	}

	/// Remove an artifact that was executed on Ethereum, along with its signatures
	///
	/// Older artifacts of the same token or scope can no longer execute and are removed too.
	pub(crate) fn retire_artifact(artifact_key: ArtifactKey) -> DispatchResult {
		ensure!(Artifacts::<T>::contains_key(artifact_key), Error::<T>::ArtifactNotFound);
		let superseded: Vec<ArtifactKey> = Artifacts::<T>::iter_keys()
			.filter(|key| key.is_invalidated_by(&artifact_key))
			.collect();

		for key in superseded.iter().chain(sp_std::iter::once(&artifact_key)) {
			Artifacts::<T>::remove(key);
			let _ = Confirmations::<T>::clear_prefix(key, u32::MAX, None);
		}
		if !superseded.is_empty() {
			log!(
				debug,
				"🌉 {:?} executed, pruned {} superseded artifacts",
				artifact_key,
				superseded.len()
			);
		}
		Ok(())
	}

	/// Verify and store a validator's signature over an artifact checkpoint
	///
	/// Returns the storage key of the stored confirmation.
	pub fn submit_confirmation(
		who: &AccountId,
		artifact_key: ArtifactKey,
		eth_signer: EthAddress,
		signature: Vec<u8>,
	) -> Result<Vec<u8>, DispatchError> {
		let artifact = Artifacts::<T>::get(artifact_key).ok_or(Error::<T>::ArtifactNotFound)?;
		let (validator, expected_signer) =
			T::OrchestratorResolver::resolve(who).ok_or(Error::<T>::UnknownSubmitter)?;

		let checkpoint = Self::checkpoint_of(&artifact);
		if let Err(mismatch) =
			Self::verify_confirmation(&checkpoint, expected_signer, eth_signer, &signature)
		{
			log!(warn, "🌉 {}", mismatch);
			return Err(Error::<T>::InvalidSignature.into())
		}

		Confirmations::<T>::try_mutate(artifact_key, validator, |maybe_confirmation| {
			ensure!(maybe_confirmation.is_none(), Error::<T>::DuplicateConfirmation);
			*maybe_confirmation = Some(EthereumConfirmation { eth_signer, signature });
			Ok::<(), DispatchError>(())
		})?;

		let storage_key = Confirmations::<T>::hashed_key_for(artifact_key, validator);
		log!(debug, "🌉 stored confirmation of {:?} by {:?}", artifact_key, validator);
		Self::deposit_event(Event::ConfirmationStored {
			artifact_key,
			validator,
			storage_key: storage_key.clone(),
		});
		Ok(storage_key)
	}

	/// Check `signature` is a signature of `checkpoint` by `expected_signer`
	pub fn verify_confirmation(
		checkpoint: &H256,
		expected_signer: EthAddress,
		eth_signer: EthAddress,
		signature: &[u8],
	) -> Result<(), SignatureMismatch> {
		if eth_signer == expected_signer &&
			T::SignatureVerifier::verify(checkpoint, signature, &expected_signer)
		{
			return Ok(())
		}
		Err(SignatureMismatch {
			expected_signer,
			bridge_id: T::BridgeId::get(),
			checkpoint: *checkpoint,
			found: signature.to_vec(),
		})
	}

	/// The checkpoint validators sign for `artifact` on this bridge
	pub fn checkpoint_of(artifact: &Artifact) -> H256 {
		T::CheckpointEncoder::checkpoint(artifact, &T::BridgeId::get())
	}

	/// All signatures collected for an artifact
	pub fn confirmations_for(artifact_key: &ArtifactKey) -> Vec<(AccountId, EthereumConfirmation)> {
		Confirmations::<T>::iter_prefix(artifact_key).collect()
	}
}

impl<T: Config> OrchestratorResolver<AccountId> for Pallet<T> {
	/// Orchestrators resolve to the validator that delegated to them, validators with a registered
	/// Ethereum key resolve to themselves
	fn resolve(who: &AccountId) -> Option<(AccountId, EthAddress)> {
		// a validator always acts for itself, even if another validator once delegated to it
		let validator = if T::VotingPower::is_validator(who) {
			*who
		} else {
			OrchestratorValidator::<T>::get(who).unwrap_or(*who)
		};
		ValidatorEthAddress::<T>::get(validator).map(|eth_address| (validator, eth_address))
	}
}

impl<T: Config> BridgeArtifactRegistry for Pallet<T> {
	fn register_artifact(artifact: Artifact) -> DispatchResult {
		let artifact_key = artifact.key();
		Artifacts::<T>::try_mutate(artifact_key, |maybe_artifact| {
			ensure!(maybe_artifact.is_none(), Error::<T>::ArtifactExists);
			*maybe_artifact = Some(artifact);
			Ok::<(), DispatchError>(())
		})?;
		Self::deposit_event(Event::ArtifactRegistered { artifact_key });
		Ok(())
	}

	fn artifact_exists(artifact_key: &ArtifactKey) -> bool {
		Artifacts::<T>::contains_key(artifact_key)
	}
}
