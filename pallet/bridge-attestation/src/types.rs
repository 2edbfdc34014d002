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

use codec::{Decode, Encode};
use scale_info::TypeInfo;
use seed_primitives::{bridge::EventClaim, AccountId, EthAddress, EventNonce};
use sp_core::H256;
use sp_runtime::RuntimeDebug;
use sp_std::prelude::*;

/// Aggregated votes for one (event nonce, claim hash) pair
#[derive(Clone, Encode, Decode, RuntimeDebug, PartialEq, Eq, TypeInfo)]
pub struct EventVoteRecord {
	/// The claim, as first submitted
	pub claim: EventClaim,
	/// Validators that voted for this exact claim
	pub voters: Vec<AccountId>,
	/// Whether the voters crossed the acceptance threshold
	pub accepted: bool,
}

impl EventVoteRecord {
	pub fn new(claim: EventClaim) -> Self {
		Self { claim, voters: Default::default(), accepted: false }
	}
}

/// Result of recording a vote
#[derive(Clone, Copy, RuntimeDebug, PartialEq, Eq)]
pub struct VoteOutcome {
	pub event_nonce: EventNonce,
	pub claim_hash: H256,
	/// This vote moved the record over the threshold
	pub accepted: bool,
	/// Number of events execution was attempted for as a consequence of this vote
	pub execution_attempts: u32,
}

/// Why a confirmation signature was rejected
///
/// Every field is public information, it is surfaced to help operators debug misconfigured
/// orchestrators.
#[derive(Clone, RuntimeDebug, PartialEq, Eq)]
pub struct SignatureMismatch {
	pub expected_signer: EthAddress,
	pub bridge_id: H256,
	pub checkpoint: H256,
	pub found: Vec<u8>,
}

impl core::fmt::Display for SignatureMismatch {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"signature verification failed expected sig by {:?} with bridge-id {:?} with checkpoint {:?} found 0x{}",
			self.expected_signer,
			self.bridge_id,
			self.checkpoint,
			hex::encode(&self.found),
		)
	}
}
