#![no_main]

use arbitrary::Arbitrary;
use cef::{
    DecodeOptions, Decoded, FixedWidthDecoder, StreamingDecoder, VariableWidthDecoder,
    testing::{Be16, HighBitPair, split_at_cuts},
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    replace: bool,
    cuts: Vec<u8>,
    units: Vec<u8>,
}

fn check(input: &Input) {
    let options = if input.replace {
        DecodeOptions::replacing(0xFFFD)
    } else {
        DecodeOptions::default()
    };

    // One-shot: the cursor never overshoots and stops on the end or an error.
    let mut one_shot: Vec<Decoded<u32>> = Vec::new();
    let mut failed = false;
    let mut cursor = 0;
    for decoded in VariableWidthDecoder::<HighBitPair>::with_options(&input.units, options) {
        match decoded {
            Ok(d) => {
                assert_eq!(d.offset, cursor);
                assert!(d.len > 0 && d.end() <= input.units.len());
                cursor = d.end();
                one_shot.push(d);
            }
            Err(err) => {
                assert_eq!(err.offset(), cursor);
                assert!(!input.replace);
                failed = true;
            }
        }
    }
    assert!(failed || cursor == input.units.len());

    // Streaming agrees with one-shot whenever the input decodes.
    let mut decoder = StreamingDecoder::<HighBitPair>::with_options(options);
    let mut streamed = Vec::new();
    let mut stream_failed = false;
    let cuts: Vec<usize> = input.cuts.iter().map(|&cut| usize::from(cut)).collect();
    for chunk in split_at_cuts(&input.units, &cuts) {
        for decoded in decoder.feed(chunk) {
            match decoded {
                Ok(d) => streamed.push(d),
                Err(_) => stream_failed = true,
            }
        }
    }
    match decoder.finish() {
        Ok(tail) => streamed.extend(tail),
        Err(_) => stream_failed = true,
    }
    assert_eq!(failed, stream_failed);
    if !failed {
        assert_eq!(one_shot, streamed);
    }

    // Fixed-width: alignment is decided before anything is decoded.
    match FixedWidthDecoder::<Be16>::with_options(&input.units, options) {
        Ok(decoder) => {
            assert_eq!(input.units.len() % 2, 0);
            assert_eq!(decoder.count(), input.units.len() / 2);
        }
        Err(err) => {
            assert_eq!(err.offset(), 0);
            assert_eq!(input.units.len() % 2, 1);
        }
    }
}

fuzz_target!(|input: Input| check(&input));
