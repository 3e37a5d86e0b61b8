//! Fixed SPSP pool table: contract addresses and display names.

use alloy_primitives::{address, Address};

pub const POOL_COUNT: usize = 6;

/// One staking pool, defined at process start. Immutable.
#[derive(Clone, Copy, Debug)]
pub struct Pool {
    pub index: usize,
    pub name: &'static str,
    pub address: Address,
}

/// Mainnet SPSP pools, indexed by position.
pub const POOLS: [Pool; POOL_COUNT] = [
    Pool {
        index: 0,
        name: "ParaSwapPool1",
        address: address!("0x55A68016910A7Bcb0ed63775437e04d2bB70D570"),
    },
    Pool {
        index: 1,
        name: "ParaSwapPool3",
        address: address!("0xea02DF45f56A690071022c45c95c46E7F61d3eAb"),
    },
    Pool {
        index: 2,
        name: "ParaSwapPool4",
        address: address!("0x6b1D394Ca67fDB9C90BBd26FE692DdA4F4f53ECD"),
    },
    Pool {
        index: 3,
        name: "ParaSwapPool7",
        address: address!("0x37b1E4590638A266591a9C11d6f945fe7A1adAA7"),
    },
    Pool {
        index: 4,
        name: "ParaSwapPool8",
        address: address!("0x03c1eaff32c4bd67ee750ab75ce85ba7e5aa65fb"),
    },
    Pool {
        index: 5,
        name: "ParaSwapPool9",
        address: address!("0xC3359DbdD579A3538Ea49669002e8E8eeA191433"),
    },
];

/// Look up a pool by index. None when out of range.
pub fn pool_by_index(index: usize) -> Option<&'static Pool> {
    POOLS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_consistent() {
        for (i, pool) in POOLS.iter().enumerate() {
            assert_eq!(pool.index, i);
            assert!(pool.name.starts_with("ParaSwapPool"));
        }
    }

    #[test]
    fn addresses_are_distinct() {
        for a in 0..POOL_COUNT {
            for b in (a + 1)..POOL_COUNT {
                assert_ne!(POOLS[a].address, POOLS[b].address);
            }
        }
    }

    #[test]
    fn out_of_range_is_none() {
        assert!(pool_by_index(POOL_COUNT).is_none());
        assert_eq!(pool_by_index(0).unwrap().name, "ParaSwapPool1");
    }
}
