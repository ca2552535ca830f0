use alloc::vec::Vec;

/// Split `payload` into `parts` approximately equal-sized chunks.
///
/// Unlike text chunking, the cuts ignore symbol boundaries: that is the
/// point of feeding a [`StreamDecoder`](crate::StreamDecoder).
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` into chunks whose sizes are drawn from `sizes`.
///
/// Each size is reduced modulo the remaining length (plus one) so any
/// sequence of integers, such as one produced by a property-test generator,
/// yields a valid non-empty partition. Whatever is left after `sizes` runs
/// out becomes the last chunk.
#[must_use]
pub fn split_at_offsets<'a>(payload: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(sizes.len() + 1);
    let mut rest = payload;
    for &s in sizes {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(chunk);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
