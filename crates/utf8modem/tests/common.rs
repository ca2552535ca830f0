#![allow(missing_docs, dead_code)]

use core::fmt::Write;

use utf8modem::StreamDecoder;

/// Renders 16-bit text as a quoted string, escaping everything outside
/// printable ASCII as `\uXXXX` so unpaired surrogates stay visible.
pub fn units(text: &[u16]) -> String {
    let mut out = String::from("\"");
    for &unit in text {
        match unit {
            0x20..=0x7E => out.push(char::from(u8::try_from(unit).unwrap())),
            _ => write!(out, "\\u{unit:04x}").unwrap(),
        }
    }
    out.push('"');
    out
}

pub fn hex(bytes: &[u8]) -> String {
    let parts: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("[{}]", parts.join(" "))
}

/// Feeds `chunks` to a decoder for `encoding`, one line per call.
pub fn render_stream(encoding: &str, chunks: &[&[u8]]) -> String {
    let mut decoder = StreamDecoder::new(encoding).expect("known encoding");
    let mut out = String::new();
    for chunk in chunks {
        let segment = decoder.write(chunk);
        writeln!(
            out,
            "write {} => {} pending={}",
            hex(chunk),
            units(&segment),
            hex(decoder.pending())
        )
        .unwrap();
    }
    writeln!(out, "end => {}", units(&decoder.end(None))).unwrap();
    out
}
