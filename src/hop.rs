use std::fmt;
use std::io::{self, Cursor, Read};

/// A node in a hop tree
///
/// A hop is either a *chaining hop* (a node with zero or more children) or a
/// *message hop* (a finite, single-pass byte stream). Trees are built and
/// owned by the caller; the encoder only borrows them, reading children and
/// message bytes and writing chaining values into the cache slot.
///
/// Message streams are read at most once per encoding call and never rewound;
/// reusing a consumed message hop is only sound through its cached chaining
/// value.
pub struct Hop {
    kind: HopKind,
    cache: Option<Vec<u8>>,
    retain: bool,
}

enum HopKind {
    /// Node whose content is derived from its children
    Chaining(Vec<Hop>),
    /// Leaf holding a byte stream
    Message(Box<dyn Read>),
}

impl Hop {
    /// Creates a chaining hop with the given children
    ///
    /// A chaining hop with no children is valid; its content is just the
    /// frame fields.
    pub fn chaining(children: Vec<Hop>) -> Hop {
        Hop {
            kind: HopKind::Chaining(children),
            cache: None,
            retain: true,
        }
    }

    /// Creates a message hop reading from the given byte stream
    pub fn message<R: Read + 'static>(source: R) -> Hop {
        Hop {
            kind: HopKind::Message(Box::new(source)),
            cache: None,
            retain: true,
        }
    }

    /// Creates a message hop over an in-memory byte string
    pub fn bytes<B: Into<Vec<u8>>>(bytes: B) -> Hop {
        Hop::message(Cursor::new(bytes.into()))
    }

    /// Makes the cache slot discard chaining-value writes
    ///
    /// The cache is advisory; a hop that drops writes trades recomputation
    /// (and, for message hops, re-readability) for memory.
    pub fn without_cache(mut self) -> Hop {
        self.retain = false;
        self.cache = None;
        self
    }

    /// Returns `true` if this is a chaining hop
    #[inline]
    pub fn is_chaining(&self) -> bool {
        matches!(self.kind, HopKind::Chaining(_))
    }

    /// Returns the number of children; `0` for message hops
    #[inline]
    pub fn degree(&self) -> usize {
        match self.kind {
            HopKind::Chaining(ref children) => children.len(),
            HopKind::Message(_) => 0,
        }
    }

    /// Returns the child hop at index `i`
    pub fn child(&self, i: usize) -> Option<&Hop> {
        match self.kind {
            HopKind::Chaining(ref children) => children.get(i),
            HopKind::Message(_) => None,
        }
    }

    /// Returns the cached chaining value, if one has been computed and
    /// retained
    #[inline]
    pub fn chaining_value(&self) -> Option<&[u8]> {
        self.cache.as_deref()
    }

    /// Stores a computed chaining value in the cache slot
    ///
    /// Best-effort: the write is dropped if the hop was built with
    /// [`without_cache`](Hop::without_cache).
    pub fn set_chaining_value(&mut self, value: Vec<u8>) {
        if self.retain {
            self.cache = Some(value);
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Hop] {
        match self.kind {
            HopKind::Chaining(ref mut children) => children,
            HopKind::Message(_) => &mut [],
        }
    }

    /// Drains the message stream; empty for chaining hops
    pub(crate) fn read_source(&mut self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();

        if let HopKind::Message(ref mut source) = self.kind {
            source.read_to_end(&mut bytes)?;
        }

        Ok(bytes)
    }
}

impl fmt::Debug for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Hop");

        match self.kind {
            HopKind::Chaining(ref children) => s.field("degree", &children.len()),
            HopKind::Message(_) => s.field("message", &".."),
        };

        s.field("cached", &self.cache.is_some()).finish()
    }
}
