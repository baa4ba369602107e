use bytes::Bytes;
use ledger_chain::{
    mocks::{HashLock, KeyScript, Payload},
    store::{Stored, Value},
    validate, Block, Commitment, Error, Header, Limits, Transaction, NEW_BLOCK_VERSION,
};
use ledger_codec::{Decode, Encode, RangeCfg};
use ledger_cryptography::sha3::{self, Digest};
use ledger_utils::hex;
use rand::{rngs::StdRng, RngCore, SeedableRng};

fn cfg() -> (Limits, RangeCfg) {
    (Limits::default(), RangeCfg::new(..=4096))
}

/// Produces a signed child of `parent` carrying `count` random transactions.
fn produce(
    rng: &mut StdRng,
    parent: &Header,
    key: &KeyScript,
    timestamp: u64,
    count: usize,
) -> Block<Payload> {
    let transactions: Vec<_> = (0..count)
        .map(|_| {
            let mut data = vec![0u8; (rng.next_u32() % 512) as usize];
            rng.fill_bytes(&mut data);
            Transaction::new(Payload::new(rng.next_u64(), data.into()))
        })
        .collect();

    let mut header = Header::child(parent, timestamp, key.output_script()).unwrap();
    let ids: Vec<u8> = transactions.iter().flat_map(|tx| tx.id().0).collect();
    header.set_tx_root(sha3::hash(&ids));
    header.set_state_root(sha3::hash(&header.height.to_be_bytes()));
    header.sign(&parent.output_script, key).unwrap();
    Block::new(header, transactions)
}

#[test]
fn test_chain_of_blocks() {
    let mut rng = StdRng::seed_from_u64(42);
    let key = KeyScript::new(Bytes::from_static(b"producer"));
    let genesis = Header::genesis(1_700_000_000, key.output_script());

    let mut stored = Vec::new();
    let mut parent = genesis.clone();
    for i in 0..10u64 {
        let block = produce(&mut rng, &parent, &key, 1_700_000_000 + i * 5, i as usize);
        stored.push(block.value());
        parent = block.header;
    }

    // A peer replays the stored chain from genesis.
    let mut tip = genesis;
    for (height, value) in stored.iter().enumerate() {
        let block = Block::<Payload>::scan(value, &cfg()).unwrap();
        validate::accept(&tip, &block.header, &HashLock).unwrap();
        assert_eq!(block.height(), height as u64 + 1);
        assert_eq!(block.header.version, NEW_BLOCK_VERSION);
        assert_eq!(block.transactions.len(), height);

        let ids: Vec<u8> = block.transaction_ids().into_iter().flat_map(|id| id.0).collect();
        assert_eq!(block.tx_root(), sha3::hash(&ids));
        tip = block.header;
    }
    assert_eq!(tip, parent);
}

#[test]
fn test_tampered_block_rejected() {
    let mut rng = StdRng::seed_from_u64(7);
    let key = KeyScript::new(Bytes::from_static(b"producer"));
    let genesis = Header::genesis(1000, key.output_script());
    let block = produce(&mut rng, &genesis, &key, 1001, 3);

    // Flip a bit inside the state root.
    let Value::Bytes(mut bytes) = block.value() else {
        panic!("stored value must be bytes");
    };
    let commitment = 4 + 8 + 32 + 1;
    bytes[commitment + 40] ^= 1;
    let tampered = Block::<Payload>::scan(&Value::Bytes(bytes), &cfg()).unwrap();
    assert_ne!(tampered.hash(), block.hash());
    assert!(matches!(
        validate::accept(&genesis, &tampered.header, &HashLock),
        Err(Error::InvalidSignature)
    ));

    // A header that skips a height never links.
    let child = produce(&mut rng, &block.header, &key, 1002, 0);
    assert!(matches!(
        validate::accept(&genesis, &child.header, &HashLock),
        Err(Error::HeightMismatch { expected: 1, found: 2 })
    ));
}

#[test]
fn test_genesis() {
    let genesis = Header::genesis(1000, Bytes::from_static(&[0xAA]));
    assert_eq!(genesis.version, 1);
    assert_eq!(genesis.height, 0);
    assert_eq!(genesis.previous, Digest::ZERO);
    assert_eq!(genesis.commitment.as_ref(), &[0u8; 64][..]);
    assert!(genesis.signature_script.is_empty());
    assert_eq!(genesis.hash(), genesis.hash_for_sig());

    let encoded = genesis.encode();
    assert_eq!(
        hex(&encoded),
        [
            "00000001",
            "0000000000000000",
            &"00".repeat(32),
            "40",
            &"00".repeat(64),
            "00000000000003e8",
            "00",
            "01aa",
        ]
        .concat()
    );
    assert_eq!(genesis.hash(), sha3::hash(&encoded));
    assert_eq!(genesis.time().timestamp(), 1000);
}

#[test]
fn test_commitment_round_trip() {
    let a = sha3::hash(b"transactions");
    let b = sha3::hash(b"state");
    let mut header = Header::genesis(1000, Bytes::new());
    header.commitment = Commitment::new();
    header.set_state_root(b);
    header.set_tx_root(a);
    assert_eq!(header.tx_root(), a);
    assert_eq!(header.state_root(), b);

    let expected: Vec<u8> = a.0.iter().chain(b.0.iter()).copied().collect();
    assert_eq!(header.commitment.as_ref(), &expected[..]);

    let decoded = Header::decode_cfg(header.encode(), &Limits::default()).unwrap();
    assert_eq!(decoded.tx_root(), a);
    assert_eq!(decoded.state_root(), b);
}

#[test]
fn test_empty_block() {
    let header = Header::genesis(1000, Bytes::from_static(&[0xAA]));
    let block = Block::<Payload>::new(header.clone(), Vec::new());
    let mut expected = header.encode().to_vec();
    expected.push(0x00);
    assert_eq!(&block.encode()[..], &expected[..]);
    assert_eq!(block.hash(), header.hash());

    let decoded = Block::<Payload>::decode_cfg(&expected[..], &cfg()).unwrap();
    assert!(decoded.transactions.is_empty());
}

#[test]
fn test_streams() {
    let mut rng = StdRng::seed_from_u64(3);
    let key = KeyScript::new(Bytes::from_static(b"producer"));
    let genesis = Header::genesis(1000, key.output_script());
    let block = produce(&mut rng, &genesis, &key, 1001, 4);

    let mut file = Vec::new();
    let written = block.write_to(&mut file).unwrap();
    assert_eq!(written as usize, file.len());
    let read = Block::<Payload>::read_from(&mut &file[..], &cfg()).unwrap();
    assert_eq!(read, block);

    let mut signing = Vec::new();
    block.header.write_for_sig_to(&mut signing).unwrap();
    assert_eq!(sha3::hash(&signing), block.hash_for_sig());
}
