// zlib streaming driver: output growth, stream termination, malformed input.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use codec_core::chain::ByteChain;
    use codec_core::compression::{
        get_codec, Codec, CodecError, CodecType, CompressionLevel, ZlibCodec, ZlibOptions,
    };
    use flate2::read::ZlibDecoder;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};
    use test_log::test;

    const TEN_MIB: usize = 10 * 1024 * 1024;

    fn tiny() -> Codec {
        let options = ZlibOptions { max_single_step_length: 16, default_buffer_length: 7 };
        Codec::from(ZlibCodec::with_options(CompressionLevel::Default, options).unwrap())
    }

    fn noisy(len: usize) -> Vec<u8> {
        let mut x = 0x2545_f491_u32;
        (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                (x >> 24) as u8
            })
            .collect()
    }

// # ✅ 1. 10 MiB of 'A'

    #[test]
    fn ten_mib_of_a_best_and_fastest() {
        let payload = ByteChain::from(vec![0x41u8; TEN_MIB]);

        for level in [CompressionLevel::Best, CompressionLevel::Fastest] {
            let codec = get_codec(CodecType::Zlib, level).unwrap();
            let compressed = codec.compress(&payload).unwrap();
            assert!(compressed.len() < TEN_MIB / 100, "{}: {} bytes", level, compressed.len());

            // Known length fits one step: a single output segment.
            let known = codec.uncompress(&compressed, Some(TEN_MIB as u64)).unwrap();
            assert_eq!(known.segment_count(), 1);
            assert_eq!(known, payload);

            // Unknown length: 4 MiB segments, the last one trimmed.
            let unknown = codec.uncompress(&compressed, None).unwrap();
            assert_eq!(unknown.segment_count(), 3);
            assert_eq!(unknown.as_segments()[2].len(), 2 * 1024 * 1024);
            assert_eq!(unknown, payload);
        }
    }

// # ✅ 2. Output growth with small segments

    #[test]
    fn small_segments_round_trip() {
        let codec = tiny();
        let payload = ByteChain::from(noisy(5_000));

        let compressed = codec.compress(&payload).unwrap();
        assert!(compressed.segment_count() > 1);
        assert!(compressed.as_segments().iter().all(|s| s.len() <= 7));

        let restored = codec.uncompress(&compressed, None).unwrap();
        assert!(restored.segment_count() > 1);
        assert_eq!(restored, payload);

        let restored = codec.uncompress(&compressed, Some(5_000)).unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn small_known_length_is_one_step() {
        let codec = tiny();
        let payload = ByteChain::from(&b"0123456789abcdef"[..]);
        let compressed = codec.compress(&payload).unwrap();

        let restored = codec.uncompress(&compressed, Some(16)).unwrap();
        assert_eq!(restored.segment_count(), 1);
        assert_eq!(restored, payload);
    }

    #[test]
    fn output_is_standard_zlib() {
        let payload = noisy(40_000);
        let codec = get_codec(CodecType::Zlib, CompressionLevel::Default).unwrap();
        let compressed = codec.compress(&ByteChain::from(payload.clone())).unwrap();

        let mut decoded = Vec::new();
        ZlibDecoder::new(&compressed.to_vec()[..]).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn decodes_foreign_zlib_stream() {
        let payload = noisy(40_000);
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(6));
        encoder.write_all(&payload).unwrap();
        let foreign = encoder.finish().unwrap();

        let codec = tiny();
        let chain: ByteChain = foreign.chunks(10).map(Bytes::copy_from_slice).collect();
        assert_eq!(codec.uncompress(&chain, Some(payload.len() as u64)).unwrap().to_vec(), payload);
    }

// # ❌ 3. Stream termination

    #[test]
    fn junk_after_end_in_same_segment() {
        let codec = get_codec(CodecType::Zlib, CompressionLevel::Default).unwrap();
        let mut bytes = codec.compress(&ByteChain::from(noisy(1_000))).unwrap().to_vec();
        bytes.extend_from_slice(b"junk");

        match codec.uncompress(&ByteChain::from(bytes), None) {
            Err(CodecError::Runtime { codec, msg }) => {
                assert_eq!(codec, CodecType::Zlib);
                assert!(msg.contains("junk after end of stream"), "{}", msg);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn junk_after_end_in_next_segment() {
        let codec = get_codec(CodecType::Zlib, CompressionLevel::Default).unwrap();
        let mut chain = codec.compress(&ByteChain::from(noisy(1_000))).unwrap();
        chain.push(Bytes::from_static(&[0u8]));

        assert!(matches!(
            codec.uncompress(&chain, None),
            Err(CodecError::Runtime { codec: CodecType::Zlib, .. })
        ));
    }

    #[test]
    fn trailing_empty_segment_is_not_junk() {
        let codec = get_codec(CodecType::Zlib, CompressionLevel::Default).unwrap();
        let payload = ByteChain::from(noisy(1_000));
        let mut chain = codec.compress(&payload).unwrap();
        chain.push(Bytes::new());

        assert_eq!(codec.uncompress(&chain, None).unwrap(), payload);
    }

    #[test]
    fn truncated_stream_is_runtime_error() {
        let codec = tiny();
        let compressed = codec.compress(&ByteChain::from(noisy(10_000))).unwrap().to_vec();
        let truncated = ByteChain::from(compressed[..compressed.len() - 10].to_vec());

        assert!(matches!(
            codec.uncompress(&truncated, None),
            Err(CodecError::Runtime { codec: CodecType::Zlib, .. })
        ));
    }

    #[test]
    fn corrupt_header_is_runtime_error() {
        let codec = get_codec(CodecType::Zlib, CompressionLevel::Default).unwrap();
        let mut bytes = codec.compress(&ByteChain::from(noisy(1_000))).unwrap().to_vec();
        bytes[0] ^= 0xff;

        assert!(matches!(
            codec.uncompress(&ByteChain::from(bytes), None),
            Err(CodecError::Runtime { .. })
        ));
    }

    #[test]
    fn corrupt_checksum_is_runtime_error() {
        let codec = get_codec(CodecType::Zlib, CompressionLevel::Default).unwrap();
        let mut bytes = codec.compress(&ByteChain::from(noisy(1_000))).unwrap().to_vec();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        assert!(matches!(
            codec.uncompress(&ByteChain::from(bytes), None),
            Err(CodecError::Runtime { .. })
        ));
    }

// # ❌ 4. Declared length mismatch

    #[test]
    fn declared_length_mismatch_is_runtime_error() {
        let codec = get_codec(CodecType::Zlib, CompressionLevel::Default).unwrap();
        let compressed = codec.compress(&ByteChain::from(noisy(1_000))).unwrap();

        for declared in [999u64, 1_001] {
            match codec.uncompress(&compressed, Some(declared)) {
                Err(CodecError::Runtime { msg, .. }) => {
                    assert!(msg.contains("invalid uncompressed length"), "{}", msg)
                }
                other => panic!("declared {}: unexpected result: {:?}", declared, other),
            }
        }
    }
}
