#![no_main]

use ledger_codec::{varint, Error, RangeCfg, Read};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any accepted varint must re-encode to exactly the bytes consumed.
    let mut reader = data;
    match varint::read::<u64>(&mut reader) {
        Ok(value) => {
            let consumed = data.len() - reader.len();
            let mut encoded = Vec::new();
            varint::write(value, &mut encoded);
            assert_eq!(&data[..consumed], &encoded[..]);
            assert_eq!(varint::size(value), consumed);
        }
        Err(Error::EndOfBuffer) | Err(Error::InvalidVarint) => {}
        Err(err) => panic!("unexpected varint error: {err}"),
    }

    // Same for length-prefixed byte strings.
    let mut reader = data;
    if let Ok(value) = Vec::<u8>::read_cfg(&mut reader, &RangeCfg::default()) {
        let consumed = data.len() - reader.len();
        let mut encoded = Vec::new();
        ledger_codec::types::bytes::write_slice(&value, &mut encoded);
        assert_eq!(&data[..consumed], &encoded[..]);
    }
});
