use crate::{HashingMode, Hop, Result};

/// Frame marker for nodes whose output chains into a parent
const INNER_MARKER: u8 = 0x00;
/// Frame marker for the terminal node of a computation
const FINAL_MARKER: u8 = 0x01;

/// A tree hashing encoder
///
/// The encoder evaluates a hop tree depth-first (left to right, children
/// before parent), resolving each child to its chaining value and hashing
/// every node's framed content with a fresh accumulator drawn from the
/// mode's hasher.
///
/// A chaining node's frame is its children's contributions, the node degree
/// as a big-endian `u64`, the two block size bytes when the mode interleaves,
/// and one marker byte separating terminal from non-terminal nodes. A message
/// node's frame is its byte stream followed by the marker byte. The degree
/// field and the marker make differently shaped trees, and final versus
/// intermediate results, diverge before they ever reach the hash function.
///
/// Hop trees must be finite; a cyclic hop graph recurses without bound and
/// is the tree owner's responsibility to rule out.
pub struct Encoder {
    mode: HashingMode,
}

impl Encoder {
    /// Creates a new encoder with the given hashing mode
    pub fn new(mode: HashingMode) -> Encoder {
        Encoder { mode }
    }

    /// Encodes the given hop as an inner node and returns its chaining value
    ///
    /// Serves the hop's cached chaining value when one is present, so
    /// repeated calls on an unchanged hop are idempotent and do not re-read
    /// already consumed message streams. On computation, the result is
    /// written back to the hop's cache slot (best-effort).
    pub fn inner(&self, hop: &mut Hop) -> Result<Vec<u8>> {
        if let Some(value) = hop.chaining_value() {
            return Ok(value.to_vec());
        }

        self.encode(hop, false)
    }

    /// Encodes the given hop as the final node and returns the digest of the
    /// whole tree rooted at it
    ///
    /// The terminal frame marker domain-separates this digest from every
    /// chaining value, so the result of `final` can never be replayed as an
    /// intermediate value. The root's cache slot is neither consulted nor
    /// written.
    pub fn finalize(&self, hop: &mut Hop) -> Result<Vec<u8>> {
        self.encode(hop, true)
    }

    /// Hashes the hop's framed content; the shared tail of both entry points
    fn encode(&self, hop: &mut Hop, is_final: bool) -> Result<Vec<u8>> {
        let mut content = self.content(hop, is_final)?;

        let alignment = usize::from(self.mode.alignment);

        if alignment > 0 {
            let overhang = content.len() % alignment;

            if overhang != 0 {
                content.resize(content.len() + (alignment - overhang), 0);
            }
        }

        let mut accumulator = self.mode.accumulator()?;
        accumulator.update(&content);
        let digest = accumulator.finalize().into_vec();

        if !is_final {
            hop.set_chaining_value(digest.clone());
        }

        Ok(digest)
    }

    /// Assembles the hop's frame: contributions, degree, block size bytes
    /// when interleaving, and the marker byte. Unpadded and unhashed.
    fn content(&self, hop: &mut Hop, is_final: bool) -> Result<Vec<u8>> {
        let marker = if is_final { FINAL_MARKER } else { INNER_MARKER };

        if !hop.is_chaining() {
            let mut content = hop.read_source()?;
            content.push(marker);
            return Ok(content);
        }

        let degree = hop.degree();
        let hopping = self.mode.kangaroo && degree >= 1;

        let mut parts = Vec::with_capacity(degree);

        for (index, child) in hop.children_mut().iter_mut().enumerate() {
            parts.push(self.contribution(child, hopping && index == 0)?);
        }

        let mut content = Vec::new();

        // A spliced first child always precedes the interleave set
        let spliced = usize::from(hopping);

        for part in &parts[..spliced] {
            content.extend_from_slice(part);
        }

        let rest = &parts[spliced..];

        match self.mode.interleave {
            Some(block) if rest.len() > 1 => {
                round_robin(rest, block.value() as usize, &mut content)
            }
            _ => {
                for part in rest {
                    content.extend_from_slice(part);
                }
            }
        }

        content.extend_from_slice(&(degree as u64).to_be_bytes());

        if let Some(block) = self.mode.interleave {
            content.push(block.mantissa);
            content.push(block.exponent);
        }

        content.push(marker);

        Ok(content)
    }

    /// Resolves one child's byte contribution to its parent's content
    ///
    /// `splice` marks a first child under kangaroo hopping: its inner-framed
    /// content is inlined without an intervening hash boundary (and without a
    /// cache write, since unhashed content is not a chaining value). All
    /// other chaining children are hashed as their own inner nodes; message
    /// children contribute their raw byte stream.
    fn contribution(&self, child: &mut Hop, splice: bool) -> Result<Vec<u8>> {
        if let Some(value) = child.chaining_value() {
            return Ok(value.to_vec());
        }

        if splice {
            return self.content(child, false);
        }

        if child.is_chaining() {
            self.encode(child, false)
        } else {
            Ok(child.read_source()?)
        }
    }
}

/// Interleaves parts into `out` in fixed-size chunks, round-robin
///
/// Short final chunks are taken as-is and exhausted parts are skipped in
/// subsequent rounds.
fn round_robin(parts: &[Vec<u8>], block: usize, out: &mut Vec<u8>) {
    debug_assert!(block > 0);

    let mut taken = vec![0; parts.len()];

    loop {
        let mut exhausted = true;

        for (part, taken) in parts.iter().zip(taken.iter_mut()) {
            if *taken < part.len() {
                let take = block.min(part.len() - *taken);

                out.extend_from_slice(&part[*taken..(*taken + take)]);
                *taken += take;
                exhausted = false;
            }
        }

        if exhausted {
            break;
        }
    }
}
