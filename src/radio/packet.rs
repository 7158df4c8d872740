//! Byte-level packetization for the simulated radio link.
//!
//! A message is terminated with a single EOT sentinel byte and then split
//! into fragments of at most 252 bytes, so the sentinel always lands inside
//! the final non-empty fragment. The receiver accumulates fragment payloads
//! until it sees the sentinel. Because the sentinel is found by scanning,
//! message payloads must not themselves contain the EOT byte; the text
//! encodings used over this link never do.
//!
//! The link is lossless and ordered, with no acknowledgment or
//! retransmission. That is a deliberate simplification of the real radio.

/// Maximum payload bytes carried by a single fragment.
pub const MAX_FRAGMENT_LEN: usize = 252;

/// End-of-message sentinel (ASCII EOT) appended before fragmenting.
pub const EOT_SENTINEL: u8 = 0x04;

/// Reserved framing/address header bytes in the full over-the-air
/// protocol. The in-process link carries no header and scans from offset 0.
pub const FRAME_HEADER_LEN: usize = 2;

/// Split a message into wire fragments. The sentinel is appended first, so
/// even an empty message produces one single-byte fragment. No fragment is
/// ever empty.
pub fn fragment(message: &[u8]) -> Vec<Vec<u8>> {
    let mut terminated = Vec::with_capacity(message.len() + 1);
    terminated.extend_from_slice(message);
    terminated.push(EOT_SENTINEL);

    terminated.chunks(MAX_FRAGMENT_LEN).map(|chunk| chunk.to_vec()).collect()
}

/// Incremental receive side of the link: feed frames in arrival order and
/// take completed messages out.
pub struct Reassembler {
    buf: Vec<u8>,
    /// Bytes to skip at the head of every frame (the framing/address
    /// header in the full protocol; 0 on the minimal link).
    scan_offset: usize,
}

impl Reassembler {
    pub fn new(scan_offset: usize) -> Self {
        Self {
            buf: Vec::new(),
            scan_offset,
        }
    }

    /// Consume one received frame. Returns the completed message when this
    /// frame carries the sentinel, `None` while the message is still
    /// accumulating. The reassembler is immediately reusable for the next
    /// message afterwards.
    pub fn push_frame(&mut self, frame: &[u8]) -> Option<Vec<u8>> {
        let body = frame.get(self.scan_offset..).unwrap_or(&[]);

        match body.iter().position(|&byte| byte == EOT_SENTINEL) {
            Some(sentinel_at) => {
                let mut message = std::mem::take(&mut self.buf);
                message.extend_from_slice(&body[..sentinel_at]);
                Some(message)
            }
            None => {
                self.buf.extend_from_slice(body);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sentinel-free payload of the requested length.
    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i % 251) + 5) as u8).collect()
    }

    fn round_trip(message: &[u8]) -> Vec<u8> {
        let mut reassembler = Reassembler::new(0);
        let frames = fragment(message);
        let mut out = None;
        for (i, frame) in frames.iter().enumerate() {
            assert!(!frame.is_empty());
            assert!(frame.len() <= MAX_FRAGMENT_LEN);
            let completed = reassembler.push_frame(frame);
            if i + 1 < frames.len() {
                assert!(completed.is_none());
            } else {
                out = completed;
            }
        }
        out.expect("final frame must complete the message")
    }

    #[test]
    fn round_trips_across_length_boundaries() {
        for len in [0, 1, 250, 251, 252, 253, 503, 504, 505, 1000, 10_000] {
            let message = payload(len);
            assert_eq!(round_trip(&message), message, "length {len}");
        }
    }

    #[test]
    fn empty_message_is_one_sentinel_frame() {
        let frames = fragment(&[]);
        assert_eq!(frames, vec![vec![EOT_SENTINEL]]);
    }

    #[test]
    fn sentinel_lands_in_final_fragment() {
        // 252 message bytes + sentinel spill into a second fragment.
        let frames = fragment(&payload(252));
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].len(), MAX_FRAGMENT_LEN);
        assert_eq!(frames[1], vec![EOT_SENTINEL]);
    }

    #[test]
    fn reassembler_is_reusable_across_messages() {
        let mut reassembler = Reassembler::new(0);
        for len in [10, 700, 0, 300] {
            let message = payload(len);
            let frames = fragment(&message);
            let mut got = None;
            for frame in &frames {
                got = reassembler.push_frame(frame);
            }
            assert_eq!(got.unwrap(), message);
        }
    }

    #[test]
    fn header_bytes_are_skipped_at_the_scan_offset() {
        let message = b"robot status: nominal";
        let mut reassembler = Reassembler::new(FRAME_HEADER_LEN);
        let mut got = None;
        for frame in fragment(message) {
            // Prepend the 2-byte address header of the full protocol.
            let mut framed = vec![0xAA, 0x01];
            framed.extend_from_slice(&frame);
            got = reassembler.push_frame(&framed);
        }
        assert_eq!(got.unwrap(), message.to_vec());
    }

    #[test]
    fn short_frame_is_ignored_under_the_offset() {
        let mut reassembler = Reassembler::new(FRAME_HEADER_LEN);
        assert!(reassembler.push_frame(&[0xAA]).is_none());
        assert_eq!(reassembler.push_frame(&[0xAA, 0x01, EOT_SENTINEL]).unwrap(), Vec::<u8>::new());
    }
}
