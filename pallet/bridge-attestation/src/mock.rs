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

use crate::{
	self as pallet_bridge_attestation, Config, EthAbiCheckpointEncoder, EthereumCheckpointVerifier,
};
use codec::Encode;
use frame_support::storage::unhashed;
use seed_pallet_common::{test_prelude::*, EthereumEventHandler, VotingPowerOracle};
use seed_primitives::{checkpoint_signing_digest, eth_address_of};
use sp_core::{ecdsa, Pair};
use std::{
	cell::RefCell,
	collections::{BTreeMap, BTreeSet},
};

construct_runtime!(
	pub enum Test
	{
		System: frame_system,
		BridgeAttestation: pallet_bridge_attestation,
	}
);

impl_frame_system_config!(Test);

parameter_types! {
	pub const MockBridgeId: H256 = H256([0x42; 32]);
}

impl Config for Test {
	type RuntimeEvent = RuntimeEvent;
	type BridgeId = MockBridgeId;
	type MaxExecutionsPerBlock = MockMaxExecutions;
	type VotingPower = MockVotingPower;
	type OrchestratorResolver = BridgeAttestation;
	type CheckpointEncoder = EthAbiCheckpointEncoder;
	type SignatureVerifier = EthereumCheckpointVerifier;
	type EventHandler = MockEventHandler;
	type WeightInfo = ();
}

thread_local! {
	/// validator -> (power, bonded)
	static VALIDATORS: RefCell<BTreeMap<AccountId, (VotingPower, bool)>> = RefCell::new(BTreeMap::new());
	static TOTAL_POWER: RefCell<Option<VotingPower>> = RefCell::new(None);
	static MAX_EXECUTIONS: RefCell<u32> = RefCell::new(16);
	static FAILING_NONCES: RefCell<BTreeSet<EventNonce>> = RefCell::new(BTreeSet::new());
	static HANDLED: RefCell<Vec<EventNonce>> = RefCell::new(Vec::new());
}

pub struct MockMaxExecutions;
impl MockMaxExecutions {
	pub fn set(max: u32) {
		MAX_EXECUTIONS.with(|m| *m.borrow_mut() = max);
	}
}
impl Get<u32> for MockMaxExecutions {
	fn get() -> u32 {
		MAX_EXECUTIONS.with(|m| *m.borrow())
	}
}

/// Validator set with configurable power and bond status
pub struct MockVotingPower;
impl MockVotingPower {
	/// Replace the validator set, every validator starts bonded
	pub fn set_validators(validators: &[(AccountId, VotingPower)]) {
		VALIDATORS.with(|v| {
			*v.borrow_mut() = validators.iter().map(|(who, power)| (*who, (*power, true))).collect()
		});
	}

	pub fn set_bonded(who: AccountId, bonded: bool) {
		VALIDATORS.with(|v| {
			if let Some(entry) = v.borrow_mut().get_mut(&who) {
				entry.1 = bonded;
			}
		});
	}

	pub fn set_power(who: AccountId, power: VotingPower) {
		VALIDATORS.with(|v| {
			if let Some(entry) = v.borrow_mut().get_mut(&who) {
				entry.0 = power;
			}
		});
	}

	/// Report a total bonded power other than the sum of the set, standing in for validators
	/// that exist but never vote
	pub fn set_total_power(total: VotingPower) {
		TOTAL_POWER.with(|t| *t.borrow_mut() = Some(total));
	}
}

impl VotingPowerOracle<AccountId> for MockVotingPower {
	fn is_validator(who: &AccountId) -> bool {
		VALIDATORS.with(|v| v.borrow().contains_key(who))
	}

	fn is_bonded(who: &AccountId) -> bool {
		VALIDATORS.with(|v| v.borrow().get(who).map_or(false, |(_, bonded)| *bonded))
	}

	fn power_of(who: &AccountId) -> VotingPower {
		VALIDATORS.with(|v| match v.borrow().get(who) {
			Some((power, true)) => *power,
			_ => 0,
		})
	}

	fn total_bonded_power() -> VotingPower {
		TOTAL_POWER.with(|t| *t.borrow()).unwrap_or_else(|| {
			VALIDATORS.with(|v| {
				v.borrow().values().filter(|(_, bonded)| *bonded).map(|(power, _)| power).sum()
			})
		})
	}

	#[cfg(feature = "runtime-benchmarks")]
	fn set_bonded_validator(who: &AccountId, power: VotingPower) {
		VALIDATORS.with(|v| v.borrow_mut().insert(*who, (power, true)));
	}
}

/// Records the nonces it handles, failing for nonces marked as failing
///
/// Writes a storage marker before deciding the outcome so tests can check failed handlers are
/// rolled back.
pub struct MockEventHandler;
impl MockEventHandler {
	pub fn fail_on(event_nonce: EventNonce) {
		FAILING_NONCES.with(|f| f.borrow_mut().insert(event_nonce));
	}

	pub fn recover(event_nonce: EventNonce) {
		FAILING_NONCES.with(|f| f.borrow_mut().remove(&event_nonce));
	}

	/// Nonces handled successfully, in order
	pub fn handled() -> Vec<EventNonce> {
		HANDLED.with(|h| h.borrow().clone())
	}

	pub fn marker_key(event_nonce: EventNonce) -> Vec<u8> {
		(b"mock_handler", event_nonce).encode()
	}

	fn handle(event_nonce: EventNonce) -> DispatchResult {
		unhashed::put(&Self::marker_key(event_nonce), &true);
		if FAILING_NONCES.with(|f| f.borrow().contains(&event_nonce)) {
			return Err(DispatchError::Other("mock handler failure"))
		}
		HANDLED.with(|h| h.borrow_mut().push(event_nonce));
		Ok(())
	}
}

impl EthereumEventHandler for MockEventHandler {
	fn on_deposit(event: &DepositEvent) -> DispatchResult {
		Self::handle(event.event_nonce)
	}
	fn on_batch_executed(event: &BatchExecutedEvent) -> DispatchResult {
		Self::handle(event.event_nonce)
	}
	fn on_erc20_deployed(event: &Erc20DeployedEvent) -> DispatchResult {
		Self::handle(event.event_nonce)
	}
	fn on_contract_call_executed(event: &ContractCallExecutedEvent) -> DispatchResult {
		Self::handle(event.event_nonce)
	}
	fn on_signer_set_updated(event: &SignerSetUpdatedEvent) -> DispatchResult {
		Self::handle(event.event_nonce)
	}
}

/// An Ethereum keypair derived from `seed`
pub fn eth_keypair(seed: u8) -> (ecdsa::Pair, EthAddress) {
	let pair = ecdsa::Pair::from_seed(&[seed; 32]);
	let address = eth_address_of(&pair.public()).expect("valid public key");
	(pair, address)
}

/// Sign a checkpoint the way an orchestrator does
pub fn sign_checkpoint(pair: &ecdsa::Pair, checkpoint: &H256) -> Vec<u8> {
	pair.sign_prehashed(&checkpoint_signing_digest(checkpoint)).0.to_vec()
}

/// A deposit claim for `event_nonce`
pub fn deposit(event_nonce: EventNonce, amount: Balance) -> EventClaim {
	EventClaim::Deposit(DepositEvent {
		event_nonce,
		token_contract: H160::repeat_byte(0xaa),
		amount,
		ethereum_sender: H160::repeat_byte(0xbb),
		receiver: create_account(77),
		ethereum_height: 100 + event_nonce,
	})
}

/// Most recent pallet event
pub fn last_event() -> pallet_bridge_attestation::Event {
	System::events()
		.into_iter()
		.filter_map(|r| match r.event {
			RuntimeEvent::BridgeAttestation(inner) => Some(inner),
			_ => None,
		})
		.last()
		.expect("a bridge attestation event was deposited")
}

pub struct ExtBuilder {
	validators: Vec<(AccountId, VotingPower)>,
	total_power: Option<VotingPower>,
}

impl Default for ExtBuilder {
	fn default() -> Self {
		Self { validators: vec![(alice(), 40), (bob(), 35), (charlie(), 30)], total_power: None }
	}
}

impl ExtBuilder {
	pub fn with_validators(mut self, validators: &[(AccountId, VotingPower)]) -> Self {
		self.validators = validators.to_vec();
		self
	}

	pub fn with_total_power(mut self, total_power: VotingPower) -> Self {
		self.total_power = Some(total_power);
		self
	}

	pub fn build(self) -> sp_io::TestExternalities {
		MockVotingPower::set_validators(&self.validators);
		if let Some(total_power) = self.total_power {
			MockVotingPower::set_total_power(total_power);
		}
		seed_primitives::test_utils::TestExt::<Test>::default().build()
	}
}
