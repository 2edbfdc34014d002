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

//! Weights for pallet_bridge_attestation
//!
//! Regenerate from `benchmarking.rs` on reference hardware with:
//!
//! ```text
//! ./target/release/seed benchmark pallet \
//!     --chain=dev --steps=50 --repeat=20 \
//!     --pallet=pallet-bridge-attestation --extrinsic="*" \
//!     --wasm-execution=compiled --heap-pages=4096 \
//!     --output=./pallet/bridge-attestation/src/weights.rs
//! ```

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use sp_std::marker::PhantomData;

/// Weight functions needed for pallet_bridge_attestation.
pub trait WeightInfo {
	fn submit_ethereum_event() -> Weight;
	fn submit_ethereum_signature() -> Weight;
	fn set_delegate_keys() -> Weight;
	fn execute_event() -> Weight;
}

/// Weights for pallet_bridge_attestation using the Seed node and recommended hardware.
pub struct BridgeAttestationWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for BridgeAttestationWeight<T> {
	/// Storage: BridgeAttestation OrchestratorValidator (r:1 w:0)
	/// Proof Skipped: BridgeAttestation OrchestratorValidator (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation ValidatorEthAddress (r:1 w:0)
	/// Proof Skipped: BridgeAttestation ValidatorEthAddress (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation EventVoteRecords (r:1 w:1)
	/// Proof Skipped: BridgeAttestation EventVoteRecords (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation AcceptedEvents (r:1 w:1)
	/// Proof Skipped: BridgeAttestation AcceptedEvents (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation LastEventNonceByValidator (r:1 w:1)
	/// Proof Skipped: BridgeAttestation LastEventNonceByValidator (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation LastObservedEventNonce (r:1 w:0)
	/// Proof Skipped: BridgeAttestation LastObservedEventNonce (max_values: Some(1), max_size: None, mode: Measured)
	fn submit_ethereum_event() -> Weight {
		Weight::from_all(45_000_000 as u64)
			.saturating_add(T::DbWeight::get().reads(6 as u64))
			.saturating_add(T::DbWeight::get().writes(3 as u64))
	}
	/// Storage: BridgeAttestation Artifacts (r:1 w:0)
	/// Proof Skipped: BridgeAttestation Artifacts (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation OrchestratorValidator (r:1 w:0)
	/// Proof Skipped: BridgeAttestation OrchestratorValidator (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation ValidatorEthAddress (r:1 w:0)
	/// Proof Skipped: BridgeAttestation ValidatorEthAddress (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation Confirmations (r:1 w:1)
	/// Proof Skipped: BridgeAttestation Confirmations (max_values: None, max_size: None, mode: Measured)
	fn submit_ethereum_signature() -> Weight {
		Weight::from_all(95_000_000 as u64)
			.saturating_add(T::DbWeight::get().reads(4 as u64))
			.saturating_add(T::DbWeight::get().writes(1 as u64))
	}
	/// Storage: BridgeAttestation OrchestratorValidator (r:2 w:2)
	/// Proof Skipped: BridgeAttestation OrchestratorValidator (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation EthAddressValidator (r:2 w:2)
	/// Proof Skipped: BridgeAttestation EthAddressValidator (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation ValidatorOrchestrator (r:1 w:1)
	/// Proof Skipped: BridgeAttestation ValidatorOrchestrator (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation ValidatorEthAddress (r:1 w:1)
	/// Proof Skipped: BridgeAttestation ValidatorEthAddress (max_values: None, max_size: None, mode: Measured)
	fn set_delegate_keys() -> Weight {
		Weight::from_all(38_000_000 as u64)
			.saturating_add(T::DbWeight::get().reads(6 as u64))
			.saturating_add(T::DbWeight::get().writes(6 as u64))
	}
	/// Storage: BridgeAttestation LastObservedEventNonce (r:1 w:1)
	/// Proof Skipped: BridgeAttestation LastObservedEventNonce (max_values: Some(1), max_size: None, mode: Measured)
	/// Storage: BridgeAttestation AcceptedEvents (r:1 w:0)
	/// Proof Skipped: BridgeAttestation AcceptedEvents (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation EventVoteRecords (r:1 w:0)
	/// Proof Skipped: BridgeAttestation EventVoteRecords (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation Artifacts (r:12 w:11)
	/// Proof Skipped: BridgeAttestation Artifacts (max_values: None, max_size: None, mode: Measured)
	/// Storage: BridgeAttestation Confirmations (r:11 w:0)
	/// Proof Skipped: BridgeAttestation Confirmations (max_values: None, max_size: None, mode: Measured)
	fn execute_event() -> Weight {
		Weight::from_all(120_000_000 as u64)
			.saturating_add(T::DbWeight::get().reads(26 as u64))
			.saturating_add(T::DbWeight::get().writes(12 as u64))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn submit_ethereum_event() -> Weight {
		Weight::from_all(45_000_000 as u64)
			.saturating_add(RocksDbWeight::get().reads(6 as u64))
			.saturating_add(RocksDbWeight::get().writes(3 as u64))
	}
	fn submit_ethereum_signature() -> Weight {
		Weight::from_all(95_000_000 as u64)
			.saturating_add(RocksDbWeight::get().reads(4 as u64))
			.saturating_add(RocksDbWeight::get().writes(1 as u64))
	}
	fn set_delegate_keys() -> Weight {
		Weight::from_all(38_000_000 as u64)
			.saturating_add(RocksDbWeight::get().reads(6 as u64))
			.saturating_add(RocksDbWeight::get().writes(6 as u64))
	}
	fn execute_event() -> Weight {
		Weight::from_all(120_000_000 as u64)
			.saturating_add(RocksDbWeight::get().reads(26 as u64))
			.saturating_add(RocksDbWeight::get().writes(12 as u64))
	}
}
