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

//! Common types across the bridge runtime and pallets
#![cfg_attr(not(feature = "std"), no_std)]

pub use signature::*;
pub use types::*;

pub mod bridge;
mod signature;
#[cfg(feature = "std")]
pub mod test_utils;

pub mod types {
	use sp_runtime::traits::{IdentifyAccount, Verify};

	use crate::EthereumSignature;

	/// An index to a block.
	pub type BlockNumber = u32;

	/// Alias to 512-bit hash when used in the context of a transaction signature on the chain.
	pub type Signature = EthereumSignature;

	/// Some way of identifying an account on the chain. We intentionally make it equivalent
	/// to the public key of our transaction signing scheme.
	pub type AccountId = <<Signature as Verify>::Signer as IdentifyAccount>::AccountId;

	/// Balance of an account.
	pub type Balance = u128;

	/// A hash of some data used by the chain.
	pub type Hash = sp_core::H256;

	/// Ethereum address type
	pub type EthAddress = sp_core::H160;

	/// Sequence number of an event observed on Ethereum.
	/// Globally ordered across every event type emitted by the bridge contract.
	pub type EventNonce = u64;

	/// Voting power of a bonded validator
	pub type VotingPower = u128;
}
