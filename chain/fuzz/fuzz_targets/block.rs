#![no_main]

use ledger_chain::{mocks::Payload, Block, Header, Limits};
use ledger_codec::{Decode, Encode, RangeCfg};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::default();

    // Decoding is canonical: anything accepted re-encodes to the input.
    if let Ok(header) = Header::decode_cfg(data, &limits) {
        assert_eq!(&header.encode()[..], data);
        assert_eq!(Header::decode_cfg(header.encode(), &limits).unwrap().hash(), header.hash());
    }

    let cfg = (limits, RangeCfg::new(..=1024));
    if let Ok(block) = Block::<Payload>::decode_cfg(data, &cfg) {
        assert_eq!(&block.encode()[..], data);
        assert_eq!(block.hash(), block.header.hash());
    }
});
