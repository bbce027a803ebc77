use canonical_huffman::{
    ArtifactFormat, CodeTable, CodecConfig, DecodeError, FrequencyTable, HuffmanError, HuffmanTree,
    ParseError, decode, decode_artifact, encode, encode_artifact, header,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_inputs(seed: u64, count: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..2000);
            // Narrow alphabets give skewed trees, wide ones give balanced trees.
            let alphabet = rng.gen_range(1..=256u16);
            (0..len).map(|_| rng.gen_range(0..alphabet) as u8).collect()
        })
        .collect()
}

#[test]
fn decode_inverts_encode() {
    for input in random_inputs(7, 200) {
        let encoded = encode(&input);
        assert_eq!(decode(&encoded.header, &encoded.bits).unwrap(), input);
    }
}

#[test]
fn artifacts_round_trip_in_both_formats() {
    for input in random_inputs(11, 50) {
        for format in [ArtifactFormat::Text, ArtifactFormat::Packed] {
            let config = CodecConfig { format, verify_counts: true, ..CodecConfig::default() };
            let artifact = encode_artifact(&input, None, &config).unwrap();
            assert_eq!(decode_artifact(&artifact, &config).unwrap(), input);
        }
    }
}

#[test]
fn header_round_trips() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let mut freq = FrequencyTable::new();
        for symbol in 0..=255u8 {
            if rng.gen_bool(0.3) {
                freq.set(symbol, rng.gen_range(1..=u32::MAX as u64));
            }
        }
        assert_eq!(header::deserialize(&header::serialize(&freq)).unwrap(), freq);
    }
}

#[test]
fn codes_are_prefix_free() {
    for input in random_inputs(19, 40) {
        let codes = CodeTable::from_frequencies(&FrequencyTable::count(&input));
        let all: Vec<&str> = codes.iter().map(|(_, code)| code).collect();
        for a in &all {
            for b in &all {
                assert!(a == b || !b.starts_with(a), "{a} prefixes {b}");
            }
        }
    }
}

#[test]
fn construction_is_deterministic() {
    for input in random_inputs(23, 40) {
        let freq = FrequencyTable::count(&input);
        let first = HuffmanTree::build(&freq);
        let second = HuffmanTree::build(&freq);
        assert_eq!(first, second);
        assert_eq!(
            CodeTable::generate(first.as_ref()),
            CodeTable::generate(second.as_ref())
        );
    }
}

#[test]
fn header_alone_reproduces_the_code_table() {
    for input in random_inputs(29, 40) {
        let encoded = encode(&input);
        let from_input = CodeTable::from_frequencies(&FrequencyTable::count(&input));
        let from_header = CodeTable::from_frequencies(&header::deserialize(&encoded.header).unwrap());
        assert_eq!(from_input, from_header);
    }
}

#[test]
fn empty_input() {
    let encoded = encode(b"");
    assert_eq!(encoded.header, "");
    assert_eq!(encoded.bits, "");
    assert_eq!(decode("", "").unwrap(), b"");
}

#[test]
fn single_symbol_input() {
    let encoded = encode(b"aaaa");
    assert_eq!(encoded.header, "97 4");
    assert_eq!(decode(&encoded.header, &encoded.bits).unwrap(), b"aaaa");
}

#[test]
fn known_vector() {
    let freq: FrequencyTable = [(97, 2), (98, 4), (99, 8), (100, 16), (102, 2)]
        .into_iter()
        .collect();
    let tree = HuffmanTree::build(&freq).unwrap();
    assert_eq!(tree.root_node().frequency(), 32);
    assert_eq!(tree.root_node().representative(), 97);
    assert_eq!(header::serialize(&freq), "97 2 98 4 99 8 100 16 102 2");

    let codes = CodeTable::generate(Some(&tree));
    assert_eq!(codes.get(b'd'), Some("1"));
    assert_eq!(codes.get(b'a'), Some("0000"));
    assert_eq!(codes.get(b'f'), Some("0001"));
}

#[test]
fn malformed_header_is_rejected() {
    assert_eq!(header::deserialize("97 2 98"), Err(ParseError::OddFieldCount(3)));
}

#[test]
fn bitstream_ending_mid_code_is_rejected() {
    let encoded = encode(b"abcdefgh");
    let cut = &encoded.bits[..encoded.bits.len() - 1];
    assert!(matches!(
        decode(&encoded.header, cut),
        Err(HuffmanError::Decode(DecodeError::Truncated { .. }))
    ));
}
