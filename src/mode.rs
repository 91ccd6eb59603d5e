use std::fmt;
use std::sync::Arc;

use digest::DynDigest;

use crate::{BlockSize, Result};

/// Source of fresh hash accumulators
///
/// The encoder draws one accumulator per tree node, so nodes never share or
/// leak internal hash state. The factory is fallible so that external sources
/// (hardware tokens, FFI wrappers) can report construction failure; factories
/// over in-process digest types simply never fail.
pub type Hasher = Arc<dyn Fn() -> Result<Box<dyn DynDigest>> + Send + Sync>;

/// Tree hashing mode describing how a hop tree is encoded
///
/// Constructed once and shared read-only by every encoding call.
#[derive(Clone)]
pub struct HashingMode {
    /// Source of hash accumulators
    pub hasher: Hasher,
    /// Whether the mode applies kangaroo hopping, wherein each node's first
    /// child is inlined into its parent instead of being hashed on its own
    pub kangaroo: bool,
    /// Byte multiple that node content is zero-padded to before hashing;
    /// `0` disables padding
    pub alignment: u8,
    /// Block size for interleaving children's byte contributions; `None`
    /// disables interleaving
    pub interleave: Option<BlockSize>,
}

impl HashingMode {
    /// Creates a mode with the given accumulator source and all variants
    /// (hopping, alignment, interleaving) disabled
    pub fn new(hasher: Hasher) -> HashingMode {
        HashingMode {
            hasher,
            kangaroo: false,
            alignment: 0,
            interleave: None,
        }
    }

    /// Creates a mode drawing accumulators of digest type `D`
    pub fn with_digest<D: DynDigest + Default + 'static>() -> HashingMode {
        HashingMode::new(Arc::new(|| {
            Ok(Box::new(D::default()) as Box<dyn DynDigest>)
        }))
    }

    /// Enables or disables kangaroo hopping
    pub fn with_kangaroo(mut self, kangaroo: bool) -> HashingMode {
        self.kangaroo = kangaroo;
        self
    }

    /// Sets the alignment byte multiple
    pub fn with_alignment(mut self, alignment: u8) -> HashingMode {
        self.alignment = alignment;
        self
    }

    /// Sets the interleaving block size
    pub fn with_interleave(mut self, interleave: BlockSize) -> HashingMode {
        self.interleave = Some(interleave);
        self
    }

    /// Draws a fresh accumulator from the hasher
    pub(crate) fn accumulator(&self) -> Result<Box<dyn DynDigest>> {
        (self.hasher)()
    }
}

impl fmt::Debug for HashingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashingMode")
            .field("kangaroo", &self.kangaroo)
            .field("alignment", &self.alignment)
            .field("interleave", &self.interleave)
            .finish_non_exhaustive()
    }
}
