use askforge_relay::StreamDecoder;
use pretty_assertions::assert_eq;

#[test]
fn decodes_whole_chunks() {
    let mut decoder = StreamDecoder::new();
    assert_eq!(decoder.push(b"hello "), "hello ");
    assert_eq!(decoder.push("caf\u{e9}".as_bytes()), "caf\u{e9}");
    assert_eq!(decoder.finish(), "");
}

#[test]
fn holds_back_a_split_code_point() {
    // U+00E9 is 0xC3 0xA9; split it across two chunks.
    let mut decoder = StreamDecoder::new();
    assert_eq!(decoder.push(&[b'c', b'a', b'f', 0xC3]), "caf");
    assert_eq!(decoder.push(&[0xA9, b'!']), "\u{e9}!");
}

#[test]
fn holds_back_a_split_four_byte_code_point() {
    let bytes = "\u{1F600}".as_bytes();
    let mut decoder = StreamDecoder::new();
    assert_eq!(decoder.push(&bytes[..2]), "");
    assert_eq!(decoder.push(&bytes[2..]), "\u{1F600}");
}

#[test]
fn finish_flushes_a_dangling_sequence_lossily() {
    let mut decoder = StreamDecoder::new();
    assert_eq!(decoder.push(&[b'o', b'k', 0xC3]), "ok");
    assert_eq!(decoder.finish(), "\u{FFFD}");
}

#[test]
fn invalid_bytes_decode_lossily_without_stalling() {
    let mut decoder = StreamDecoder::new();
    assert_eq!(decoder.push(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    assert_eq!(decoder.push(b"c"), "c");
}
