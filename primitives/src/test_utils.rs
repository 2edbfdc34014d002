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

use crate::*;
use frame_support::sp_io;
use sp_runtime::BuildStorage;

/// Generic TestExternalities builder to be used across all pallets
pub struct TestExt<T: frame_system::Config> {
	block_number: BlockNumber,
	_marker: sp_std::marker::PhantomData<T>,
}

impl<T: frame_system::Config> Default for TestExt<T> {
	/// Create new TestExt with default values
	fn default() -> Self {
		Self { block_number: 1, _marker: Default::default() }
	}
}

impl<T> TestExt<T>
where
	T: frame_system::Config,
	<T as frame_system::Config>::Hash: From<[u8; 32]>,
{
	/// Configure starting block number
	pub fn with_block_number(mut self, block_number: BlockNumber) -> Self {
		self.block_number = block_number;
		self
	}

	/// Build the Test Externalities for general use across all pallets
	pub fn build(self) -> sp_io::TestExternalities {
		let storage = frame_system::GenesisConfig::<T>::default()
			.build_storage()
			.expect("frame_system genesis builds");

		let mut ext: sp_io::TestExternalities = storage.into();
		ext.execute_with(|| {
			frame_system::Pallet::<T>::initialize(
				&self.block_number.into(),
				&[0u8; 32].into(),
				&Default::default(),
			)
		});

		ext
	}
}
