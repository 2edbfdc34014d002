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

//! shared pallet types and traits
#![cfg_attr(not(feature = "std"), no_std)]

pub use log as logger;

use frame_support::dispatch::DispatchResult;
use sp_core::H256;

use seed_primitives::{
	bridge::{
		Artifact, ArtifactKey, BatchExecutedEvent, ContractCallExecutedEvent, DepositEvent,
		Erc20DeployedEvent, SignerSetUpdatedEvent,
	},
	EthAddress, VotingPower,
};

#[cfg(feature = "std")]
pub mod test_utils;
#[cfg(feature = "std")]
pub use test_utils::test_prelude;

/// syntactic sugar for logging.
/// the caller must define a variable `LOG_TARGET = "<my-target>"`
#[macro_export]
macro_rules! log {
	($level:tt, $patter:expr $(, $values:expr)* $(,)?) => {
		seed_pallet_common::logger::$level!(
			target: crate::LOG_TARGET,
			$patter $(, $values)*
		)
	};
}

/// Stake weighted voting power of validators at the current block
pub trait VotingPowerOracle<AccountId> {
	/// Whether `who` is a validator at all (bonded or not)
	fn is_validator(who: &AccountId) -> bool;
	/// Whether `who` is an active, bonded validator
	fn is_bonded(who: &AccountId) -> bool;
	/// Current voting power of `who`, zero when unbonded
	fn power_of(who: &AccountId) -> VotingPower;
	/// Sum of the voting power of all bonded validators
	fn total_bonded_power() -> VotingPower;
	/// Make `who` a bonded validator with `power`
	#[cfg(feature = "runtime-benchmarks")]
	fn set_bonded_validator(who: &AccountId, power: VotingPower);
}

/// Resolves a submitting identity to the validator it acts for and that validator's Ethereum key
pub trait OrchestratorResolver<AccountId> {
	/// Returns `(validator, ethereum_address)` or `None` if `who` is not bound
	fn resolve(who: &AccountId) -> Option<(AccountId, EthAddress)>;
}

/// Deterministic encoding of a signable artifact into the hash validators sign
pub trait CheckpointEncoder {
	/// `domain_separator` identifies the bridge deployment so signatures can't be replayed
	/// across bridges sharing the same artifact shape
	fn checkpoint(artifact: &Artifact, domain_separator: &H256) -> H256;
}

/// Checks an Ethereum signature over a checkpoint
pub trait SignatureVerifier {
	fn verify(checkpoint: &H256, signature: &[u8], signer: &EthAddress) -> bool;
}

/// Applies the chain state effect of an observed Ethereum event
///
/// Invoked exactly once per event, after the event is accepted and every lower nonce has been
/// applied. Returning an error halts processing of later events until this one succeeds.
pub trait EthereumEventHandler {
	/// Tokens were locked on Ethereum, credit the receiver
	fn on_deposit(event: &DepositEvent) -> DispatchResult;
	/// An outgoing batch was executed on Ethereum
	fn on_batch_executed(event: &BatchExecutedEvent) -> DispatchResult;
	/// An ERC20 was deployed on Ethereum for a native asset
	fn on_erc20_deployed(event: &Erc20DeployedEvent) -> DispatchResult;
	/// A contract call was executed on Ethereum
	fn on_contract_call_executed(event: &ContractCallExecutedEvent) -> DispatchResult;
	/// The bridge contract rotated its signer set
	fn on_signer_set_updated(event: &SignerSetUpdatedEvent) -> DispatchResult;
}

#[impl_trait_for_tuples::impl_for_tuples(5)]
impl EthereumEventHandler for Tuple {
	fn on_deposit(event: &DepositEvent) -> DispatchResult {
		for_tuples!( #( Tuple::on_deposit(event)?; )* );
		Ok(())
	}
	fn on_batch_executed(event: &BatchExecutedEvent) -> DispatchResult {
		for_tuples!( #( Tuple::on_batch_executed(event)?; )* );
		Ok(())
	}
	fn on_erc20_deployed(event: &Erc20DeployedEvent) -> DispatchResult {
		for_tuples!( #( Tuple::on_erc20_deployed(event)?; )* );
		Ok(())
	}
	fn on_contract_call_executed(event: &ContractCallExecutedEvent) -> DispatchResult {
		for_tuples!( #( Tuple::on_contract_call_executed(event)?; )* );
		Ok(())
	}
	fn on_signer_set_updated(event: &SignerSetUpdatedEvent) -> DispatchResult {
		for_tuples!( #( Tuple::on_signer_set_updated(event)?; )* );
		Ok(())
	}
}

/// Registry of artifacts validators may confirm
pub trait BridgeArtifactRegistry {
	/// Make `artifact` available for confirmation, fails if its key already exists
	fn register_artifact(artifact: Artifact) -> DispatchResult;
	/// Whether an artifact is registered under `key`
	fn artifact_exists(key: &ArtifactKey) -> bool;
}
