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

/// Prelude to be used in mocks and tests, for ease of use
pub mod test_prelude {
	pub use crate::{
		test_utils::{account_creation::*, test_types::*, *},
		*,
	};
	pub use frame_support::{
		assert_err, assert_noop, assert_ok, assert_storage_noop, construct_runtime,
		dispatch::{DispatchError, DispatchResult},
		parameter_types,
		traits::{Get, Hooks},
		weights::Weight,
	};
	pub use frame_system::{EnsureRoot, RawOrigin};
	pub use seed_primitives::{
		bridge::*, test_utils::TestExt, AccountId, Balance, EthAddress, EventNonce, VotingPower,
	};
	pub use sp_core::{H160, H256};
	pub use sp_runtime::{
		traits::{BlakeTwo256, IdentityLookup},
		BuildStorage,
		DispatchError::BadOrigin,
	};
	pub use sp_std::{vec, vec::Vec};
}

pub mod test_types {
	pub type BlockNumber = u64;

	pub type Block<Test> = frame_system::mocking::MockBlock<Test>;
}

/// Helper functions for creating accounts to be used in tests
pub mod account_creation {
	use seed_primitives::AccountId;
	use sp_core::H160;

	/// Create an AccountId from a u64 seed
	pub fn create_account(seed: u64) -> AccountId {
		AccountId::from(H160::from_low_u64_be(seed))
	}

	/// Common account Alice
	pub fn alice() -> AccountId {
		create_account(1000)
	}

	/// Common account Bob
	pub fn bob() -> AccountId {
		create_account(2000)
	}

	/// Common account Charlie
	pub fn charlie() -> AccountId {
		create_account(3000)
	}

	/// Common account Dave
	pub fn dave() -> AccountId {
		create_account(4000)
	}
}

#[macro_export]
macro_rules! impl_frame_system_config {
	($test:ident) => {
		parameter_types! {
			pub const BlockHashCount: u64 = 250;
		}

		impl frame_system::Config for $test {
			type Block = frame_system::mocking::MockBlock<$test>;
			type BlockWeights = ();
			type BlockLength = ();
			type BaseCallFilter = frame_support::traits::Everything;
			type RuntimeOrigin = RuntimeOrigin;
			type Nonce = u32;
			type RuntimeCall = RuntimeCall;
			type Hash = H256;
			type Hashing = BlakeTwo256;
			type AccountId = AccountId;
			type Lookup = IdentityLookup<Self::AccountId>;
			type BlockHashCount = BlockHashCount;
			type RuntimeEvent = RuntimeEvent;
			type DbWeight = ();
			type Version = ();
			type PalletInfo = PalletInfo;
			type AccountData = ();
			type OnNewAccount = ();
			type OnKilledAccount = ();
			type SystemWeightInfo = ();
			type SS58Prefix = ();
			type OnSetCode = ();
			type MaxConsumers = frame_support::traits::ConstU32<16>;
		}
	};
}
