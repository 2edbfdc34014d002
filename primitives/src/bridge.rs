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

//! Bridge data model
//!
//! Claims describe events observed on Ethereum, artifacts are the things validators co-sign so
//! they can be relayed back to Ethereum.

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_core::{H160, H256};
use sp_runtime::RuntimeDebug;
use sp_std::prelude::*;

use crate::{AccountId, Balance, EthAddress, EventNonce};

/// Maximum length of ERC20 token metadata strings
pub const MAX_TOKEN_METADATA_LEN: usize = 64;

/// An Ethereum key authorized to sign for the bridge together with its relative power
#[derive(Clone, Copy, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo, MaxEncodedLen)]
pub struct SignerSetMember {
	pub eth_address: EthAddress,
	pub power: u64,
}

/// Tokens were locked in the bridge contract for a receiver on this chain
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct DepositEvent {
	pub event_nonce: EventNonce,
	pub token_contract: EthAddress,
	pub amount: Balance,
	pub ethereum_sender: EthAddress,
	pub receiver: AccountId,
	pub ethereum_height: u64,
}

/// An outgoing batch was submitted and executed by the bridge contract
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct BatchExecutedEvent {
	pub event_nonce: EventNonce,
	pub token_contract: EthAddress,
	pub batch_nonce: u64,
	pub ethereum_height: u64,
}

/// The bridge contract deployed an ERC20 representing a native asset of this chain
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct Erc20DeployedEvent {
	pub event_nonce: EventNonce,
	pub denom: Vec<u8>,
	pub token_contract: EthAddress,
	pub name: Vec<u8>,
	pub symbol: Vec<u8>,
	pub decimals: u8,
	pub ethereum_height: u64,
}

/// An arbitrary contract call was executed by the bridge contract
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct ContractCallExecutedEvent {
	pub event_nonce: EventNonce,
	pub invalidation_scope: H256,
	pub invalidation_nonce: u64,
	pub ethereum_height: u64,
}

/// The bridge contract rotated to a new signer set
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct SignerSetUpdatedEvent {
	pub event_nonce: EventNonce,
	pub signer_set_nonce: u64,
	pub members: Vec<SignerSetMember>,
	pub ethereum_height: u64,
}

/// A validator's claim about an event observed on Ethereum
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub enum EventClaim {
	Deposit(DepositEvent),
	BatchExecuted(BatchExecutedEvent),
	Erc20Deployed(Erc20DeployedEvent),
	ContractCallExecuted(ContractCallExecutedEvent),
	SignerSetUpdated(SignerSetUpdatedEvent),
}

/// Reason a claim was rejected as malformed
#[derive(Clone, Copy, RuntimeDebug, PartialEq, Eq)]
pub enum ClaimError {
	ZeroEventNonce,
	ZeroTokenContract,
	ZeroAmount,
	ZeroArtifactNonce,
	InvalidTokenMetadata,
	InvalidSignerSet,
}

impl EventClaim {
	/// The Ethereum side event nonce of this claim
	pub fn event_nonce(&self) -> EventNonce {
		match self {
			Self::Deposit(e) => e.event_nonce,
			Self::BatchExecuted(e) => e.event_nonce,
			Self::Erc20Deployed(e) => e.event_nonce,
			Self::ContractCallExecuted(e) => e.event_nonce,
			Self::SignerSetUpdated(e) => e.event_nonce,
		}
	}

	/// Hash of the full claim payload
	///
	/// Two claims at the same nonce with different payloads produce different hashes, so forks are
	/// tallied separately.
	pub fn claim_hash(&self) -> H256 {
		H256::from(sp_io::hashing::keccak_256(&self.encode()))
	}

	/// Stateless validity checks
	pub fn validate(&self) -> Result<(), ClaimError> {
		if self.event_nonce() == 0 {
			return Err(ClaimError::ZeroEventNonce)
		}
		match self {
			Self::Deposit(e) => {
				ensure_contract(&e.token_contract)?;
				if e.amount == 0 {
					return Err(ClaimError::ZeroAmount)
				}
			},
			Self::BatchExecuted(e) => {
				ensure_contract(&e.token_contract)?;
				if e.batch_nonce == 0 {
					return Err(ClaimError::ZeroArtifactNonce)
				}
			},
			Self::Erc20Deployed(e) => {
				ensure_contract(&e.token_contract)?;
				let in_bounds = |s: &Vec<u8>| !s.is_empty() && s.len() <= MAX_TOKEN_METADATA_LEN;
				if !(in_bounds(&e.denom) && in_bounds(&e.name) && in_bounds(&e.symbol)) {
					return Err(ClaimError::InvalidTokenMetadata)
				}
			},
			Self::ContractCallExecuted(e) =>
				if e.invalidation_nonce == 0 {
					return Err(ClaimError::ZeroArtifactNonce)
				},
			Self::SignerSetUpdated(e) => {
				let total_power = e.members.iter().fold(0_u64, |acc, m| acc.saturating_add(m.power));
				if e.members.is_empty() ||
					total_power == 0 || e.members.iter().any(|m| m.eth_address.is_zero())
				{
					return Err(ClaimError::InvalidSignerSet)
				}
			},
		}
		Ok(())
	}
}

fn ensure_contract(address: &H160) -> Result<(), ClaimError> {
	if address.is_zero() {
		Err(ClaimError::ZeroTokenContract)
	} else {
		Ok(())
	}
}

/// A single transfer inside an outgoing batch
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct OutgoingTransfer {
	pub id: u64,
	pub sender: AccountId,
	pub destination: EthAddress,
	pub amount: Balance,
	pub fee: Balance,
}

/// A batch of transfers of one token, to be executed on Ethereum
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct OutgoingBatch {
	pub batch_nonce: u64,
	pub token_contract: EthAddress,
	pub timeout: u64,
	pub transfers: Vec<OutgoingTransfer>,
}

/// An ERC20 amount
#[derive(Clone, Copy, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo, MaxEncodedLen)]
pub struct Erc20Token {
	pub contract: EthAddress,
	pub amount: Balance,
}

/// An arbitrary call the bridge contract should make on Ethereum
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct ContractCall {
	pub invalidation_scope: H256,
	pub invalidation_nonce: u64,
	pub address: EthAddress,
	pub payload: Vec<u8>,
	pub timeout: u64,
	pub tokens: Vec<Erc20Token>,
	pub fees: Vec<Erc20Token>,
}

/// The set of Ethereum keys (and their powers) that control the bridge contract
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct SignerSet {
	pub nonce: u64,
	pub members: Vec<SignerSetMember>,
	pub height: u64,
}

/// Identifies a signable artifact
#[derive(
	Clone, Copy, Encode, Decode, RuntimeDebug, PartialEq, Eq, PartialOrd, Ord, TypeInfo, MaxEncodedLen,
)]
pub enum ArtifactKey {
	/// A signer set by nonce
	SignerSet(u64),
	/// An outgoing batch by (token contract, batch nonce)
	Batch(EthAddress, u64),
	/// A contract call by (invalidation scope, invalidation nonce)
	ContractCall(H256, u64),
}

impl ArtifactKey {
	/// Whether executing `executed` on Ethereum leaves this artifact unexecutable
	///
	/// The bridge contract only accepts increasing nonces per token for batches and per scope for
	/// contract calls.
	pub fn is_invalidated_by(&self, executed: &ArtifactKey) -> bool {
		match (self, executed) {
			(Self::Batch(token, nonce), Self::Batch(executed_token, executed_nonce)) =>
				token == executed_token && nonce < executed_nonce,
			(Self::ContractCall(scope, nonce), Self::ContractCall(executed_scope, executed_nonce)) =>
				scope == executed_scope && nonce < executed_nonce,
			_ => false,
		}
	}
}

/// Something the validators co-sign so it can be submitted to Ethereum
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub enum Artifact {
	SignerSet(SignerSet),
	Batch(OutgoingBatch),
	ContractCall(ContractCall),
}

impl Artifact {
	pub fn key(&self) -> ArtifactKey {
		match self {
			Self::SignerSet(s) => ArtifactKey::SignerSet(s.nonce),
			Self::Batch(b) => ArtifactKey::Batch(b.token_contract, b.batch_nonce),
			Self::ContractCall(c) =>
				ArtifactKey::ContractCall(c.invalidation_scope, c.invalidation_nonce),
		}
	}
}

/// A validator's Ethereum signature over an artifact checkpoint
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct EthereumConfirmation {
	pub eth_signer: EthAddress,
	pub signature: Vec<u8>,
}
