use criterion::criterion_main;


criterion_main!(header_hash::benches, block_decode::benches);
