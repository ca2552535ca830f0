#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use utf8modem::{Encoding, StreamDecoder, encode_json_to_vec, encode_utf8_to_vec};

#[derive(Arbitrary, Debug)]
struct Input {
    encoding: u8,
    split_seed: u64,
    text: Vec<u16>,
    payload: Vec<u8>,
}

/// Cut `payload` at offsets drawn from `seed`. Cuts ignore symbol
/// boundaries on purpose.
fn random_chunks(payload: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut chunks = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let size = rng.random_range(1..=rest.len().min(9));
        let (chunk, tail) = rest.split_at(size);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

fn stream(encoding: Encoding, chunks: &[&[u8]]) -> Vec<u16> {
    let mut decoder = StreamDecoder::with_encoding(encoding);
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.write(chunk));
    }
    out.extend(decoder.end(None));
    out
}

fn check_stream(input: &Input) {
    let encoding = Encoding::ALL[usize::from(input.encoding) % Encoding::ALL.len()];
    let chunks = random_chunks(&input.payload, input.split_seed);
    let streamed = stream(encoding, &chunks);

    assert_eq!(streamed, encoding.decode(&input.payload));

    if encoding == Encoding::Utf8 {
        assert!(streamed.len() <= input.payload.len());
        let valid = String::from_utf8_lossy(&input.payload).into_owned();
        let chunks = random_chunks(valid.as_bytes(), input.split_seed);
        let expected: Vec<u16> = valid.encode_utf16().collect();
        assert_eq!(stream(Encoding::Utf8, &chunks), expected);
    }
}

fn check_encoders(text: &[u16]) {
    let mut utf8 = Vec::new();
    encode_utf8_to_vec(text, &mut utf8);
    assert_eq!(utf8, String::from_utf16_lossy(text).into_bytes());

    let mut json = vec![b'"'];
    encode_json_to_vec(text, &mut json);
    json.push(b'"');
    assert!(std::str::from_utf8(&json).is_ok());
    if let Ok(expected) = String::from_utf16(text) {
        let parsed: String = serde_json::from_slice(&json).expect("encoder produced invalid JSON");
        assert_eq!(parsed, expected);
    }
}

fuzz_target!(|input: Input| {
    check_stream(&input);
    check_encoders(&input.text);
});
