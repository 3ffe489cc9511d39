//! Proptest generators for property-based testing.

use proptest::prelude::*;

use star_registry_core::{Block, BlockHash, Keypair, StarInfo};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a wallet address (hex public key).
pub fn address() -> impl Strategy<Value = String> {
    keypair().prop_map(|kp| kp.address())
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a reasonable timestamp in Unix milliseconds.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800_000i64
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a star description, optional fields included half the time.
pub fn star_info() -> impl Strategy<Value = StarInfo> {
    (
        "[0-9]{1,2}° [0-9]{1,2}' [0-9]{1,2}\\.[0-9]",
        "[0-9]{1,2}h [0-9]{1,2}m [0-9]{1,2}\\.[0-9]s",
        "\\PC{0,64}",
        proptest::option::of("[0-9]\\.[0-9]{1,2}"),
        proptest::option::of("[A-Z][a-z]{2}"),
    )
        .prop_map(|(dec, ra, story, mag, cen)| {
            let mut star = StarInfo::new(dec, ra, story);
            if let Some(mag) = mag {
                star = star.with_magnitude(mag);
            }
            if let Some(cen) = cen {
                star = star.with_constellation(cen);
            }
            star
        })
}

/// Parameters for sealing a block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub data: Vec<u8>,
    pub height: u64,
    pub time: i64,
    pub previous: Option<BlockHash>,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            payload(512),
            0u64..=1_000_000u64,
            timestamp(),
            proptest::option::of(block_hash()),
        )
            .prop_map(|(data, height, time, previous)| BlockParams {
                data,
                height,
                time,
                previous,
            })
            .boxed()
    }
}

/// Seal a block from parameters.
pub fn block_from_params(params: &BlockParams) -> Block {
    Block::new(params.data.clone()).seal(params.height, params.time, params.previous)
}

/// Build a correctly linked chain of `len` blocks over the given payloads.
pub fn linked_chain(payloads: &[Vec<u8>], start_time: i64) -> Vec<Block> {
    let mut chain: Vec<Block> = Vec::with_capacity(payloads.len());
    for (i, data) in payloads.iter().enumerate() {
        let previous = chain.last().and_then(|b| b.hash().copied());
        let block = Block::new(data.clone()).seal(i as u64, start_time + i as i64, previous);
        chain.push(block);
    }
    chain
}

/// Generate a linked chain of 1..=max_len blocks.
pub fn chain(max_len: usize) -> impl Strategy<Value = Vec<Block>> {
    (prop::collection::vec(payload(64), 1..=max_len), timestamp())
        .prop_map(|(payloads, start)| linked_chain(&payloads, start))
}
