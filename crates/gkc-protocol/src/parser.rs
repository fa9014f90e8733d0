//! A self-synchronizing streaming decoder.
//!
//! [`StreamingParser`] accumulates bytes fed to it in arbitrary chunks and
//! dispatches each complete, valid frame's packet exactly once. A prefix
//! that can never become a valid frame — a stray byte, a corrupted length,
//! a bad checksum — is discarded one byte at a time so the parser always
//! makes forward progress and never wedges on garbage.

use gkc_errors::FrameError;

use crate::frame::{decode_frame, END_BYTE, NON_PAYLOAD_BYTES, START_BYTE};
use crate::packet::Packet;

/// Running counters describing what a [`StreamingParser`] has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserStats {
    /// Frames successfully decoded and dispatched.
    pub frames_dispatched: u64,
    /// Bytes discarded while resynchronizing after bad input.
    pub resyncs: u64,
    /// Frames whose checksum failed to verify.
    pub bad_checksums: u64,
}

/// A byte-accumulating, resync-capable streaming frame decoder.
#[derive(Debug, Default)]
pub struct StreamingParser {
    buffer: Vec<u8>,
    stats: ParserStats,
}

impl StreamingParser {
    /// Builds an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counters.
    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Feeds `bytes` into the accumulator and returns every [`Packet`]
    /// decoded as a result, in the order their frames appeared on the wire.
    ///
    /// A payload whose discriminator is unrecognized, or whose fields don't
    /// decode, still counts as a *framed* success (its CRC and boundaries
    /// were valid) and is silently dropped from the returned list rather
    /// than treated as a resync — the bytes it occupied are still consumed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Packet> {
        self.buffer.extend_from_slice(bytes);
        let mut dispatched = Vec::new();

        loop {
            let Some(start) = self.buffer.iter().position(|&b| b == START_BYTE) else {
                self.buffer.clear();
                break;
            };

            if start > 0 {
                self.buffer.drain(..start);
                self.stats.resyncs += start as u64;
            }

            // Need at least the length byte to know how much more to wait for.
            if self.buffer.len() < 2 {
                break;
            }
            let payload_size = self.buffer[1] as usize;
            if payload_size == 0 {
                // Can never be a valid frame; drop the start byte and rescan.
                self.buffer.remove(0);
                self.stats.resyncs += 1;
                continue;
            }

            let frame_len = NON_PAYLOAD_BYTES + payload_size;
            if self.buffer.len() < frame_len {
                // Wait for more bytes before deciding this frame is bad.
                break;
            }

            match decode_frame(&self.buffer[..frame_len]) {
                Ok(payload) => {
                    let discriminator = payload[0];
                    if let Ok(packet) = Packet::decode(discriminator, payload) {
                        dispatched.push(packet);
                    }
                    self.stats.frames_dispatched += 1;
                    self.buffer.drain(..frame_len);
                }
                Err(err) => {
                    if err == FrameError::BadChecksum {
                        self.stats.bad_checksums += 1;
                    }
                    tracing::debug!(?err, "discarding candidate frame start, resynchronizing");
                    // The framing we guessed was wrong; drop just the start
                    // byte and let the next loop iteration rescan for the
                    // next 0x02. This guarantees forward progress even if
                    // the "payload_size" we read was itself garbage.
                    self.buffer.remove(0);
                    self.stats.resyncs += 1;
                }
            }
        }

        dispatched
    }

    /// True if the accumulator holds no unconsumed bytes.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::frame::encode_frame;

    fn handshake1_frame(seq: u32) -> Vec<u8> {
        let packet = Packet::Handshake1 { seq_number: seq };
        encode_frame(&packet.encode()).expect("encodes")
    }

    #[test]
    fn dispatches_single_frame() {
        let mut parser = StreamingParser::new();
        let packets = parser.feed(&handshake1_frame(7));
        assert_eq!(packets, vec![Packet::Handshake1 { seq_number: 7 }]);
        assert_eq!(parser.stats().frames_dispatched, 1);
        assert!(parser.is_empty());
    }

    #[test]
    fn dispatches_multiple_frames_in_one_feed() {
        let mut parser = StreamingParser::new();
        let mut bytes = handshake1_frame(1);
        bytes.extend_from_slice(&handshake1_frame(2));
        let packets = parser.feed(&bytes);
        assert_eq!(
            packets,
            vec![
                Packet::Handshake1 { seq_number: 1 },
                Packet::Handshake1 { seq_number: 2 },
            ]
        );
    }

    /// Spec §8: streaming resync scenario. A corrupt prefix before a
    /// well-formed frame must not prevent the good frame from dispatching.
    #[test]
    fn resyncs_past_corrupt_prefix() {
        let mut parser = StreamingParser::new();
        let mut bytes = vec![0x02, 0xFF, 0xAA, 0xAA]; // looks like a frame start, isn't one
        bytes.extend_from_slice(&handshake1_frame(99));
        let packets = parser.feed(&bytes);
        assert_eq!(packets, vec![Packet::Handshake1 { seq_number: 99 }]);
        assert!(parser.stats().resyncs > 0);
    }

    /// Spec §8: byte-split invariance. Feeding one byte at a time must
    /// dispatch the same packets as feeding the whole frame at once.
    #[test]
    fn byte_split_invariance() {
        let frame = handshake1_frame(55);
        let mut whole = StreamingParser::new();
        let whole_result = whole.feed(&frame);

        let mut split = StreamingParser::new();
        let mut split_result = Vec::new();
        for byte in &frame {
            split_result.extend(split.feed(&[*byte]));
        }

        assert_eq!(whole_result, split_result);
    }

    #[test]
    fn bad_checksum_counted_and_does_not_wedge_parser() {
        let mut parser = StreamingParser::new();
        let mut frame = handshake1_frame(3);
        let crc_idx = frame.len() - 3;
        frame[crc_idx] ^= 0xFF;
        frame.extend_from_slice(&handshake1_frame(4));

        let packets = parser.feed(&frame);
        assert_eq!(packets, vec![Packet::Handshake1 { seq_number: 4 }]);
        assert!(parser.stats().bad_checksums >= 1);
    }

    #[test]
    fn lone_stray_bytes_are_dropped_without_growing_buffer_forever() {
        let mut parser = StreamingParser::new();
        parser.feed(&[0xAA, 0xBB, 0xCC]);
        assert!(parser.is_empty());
    }

    #[test]
    fn unknown_discriminator_consumes_frame_without_dispatch() {
        let mut parser = StreamingParser::new();
        let frame = encode_frame(&[0x09, 0x01]).expect("encodes");
        let packets = parser.feed(&frame);
        assert!(packets.is_empty());
        assert_eq!(parser.stats().frames_dispatched, 1);
        assert!(parser.is_empty());
    }

    #[test]
    fn end_byte_constant_is_reachable() {
        assert_eq!(END_BYTE, 0x03);
    }
}

#[cfg(test)]
mod property_tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::frame::encode_frame;
    use proptest::prelude::*;

    fn arb_handshake_frame() -> impl Strategy<Value = (u32, Vec<u8>)> {
        any::<u32>().prop_map(|seq| {
            let packet = Packet::Handshake1 { seq_number: seq };
            (seq, encode_frame(&packet.encode()).expect("encodes"))
        })
    }

    proptest! {
        /// Property 3: feeding a well-formed stream of frames, in any chunk
        /// split, dispatches each packet exactly once.
        #[test]
        fn prop_byte_split_invariance(frames in proptest::collection::vec(arb_handshake_frame(), 1..8)) {
            let mut all_bytes = Vec::new();
            let mut expected = Vec::new();
            for (seq, frame) in &frames {
                all_bytes.extend_from_slice(frame);
                expected.push(Packet::Handshake1 { seq_number: *seq });
            }

            let mut whole = StreamingParser::new();
            let whole_result = whole.feed(&all_bytes);
            prop_assert_eq!(&whole_result, &expected);

            let mut split = StreamingParser::new();
            let mut split_result = Vec::new();
            for byte in &all_bytes {
                split_result.extend(split.feed(&[*byte]));
            }
            prop_assert_eq!(split_result, whole_result);
        }

        /// Property: the parser never wedges — arbitrary noise followed by
        /// a well-formed frame always eventually yields that frame.
        #[test]
        fn prop_always_recovers_from_noise(
            noise in proptest::collection::vec(any::<u8>(), 0..64),
            seq in any::<u32>(),
        ) {
            let mut bytes = noise;
            let packet = Packet::Handshake1 { seq_number: seq };
            bytes.extend_from_slice(&encode_frame(&packet.encode()).expect("encodes"));

            let mut parser = StreamingParser::new();
            let packets = parser.feed(&bytes);
            prop_assert!(packets.contains(&packet));
        }
    }
}
