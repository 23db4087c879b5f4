//! Transient image sources and the decoders that turn them into render trees.

use crate::error::{ExportError, Result};
use futures::FutureExt as _;
use futures::future::LocalBoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts transient source handles so leaks show up in tests and diagnostics.
#[derive(Debug, Default)]
pub struct SourceLedger {
    allocated: AtomicUsize,
    released: AtomicUsize,
}

impl SourceLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.allocated().saturating_sub(self.released())
    }
}

/// Serialized SVG handed to a decoder. Released exactly once, when dropped.
#[derive(Debug)]
pub struct TransientSource {
    bytes: Vec<u8>,
    ledger: Arc<SourceLedger>,
}

impl TransientSource {
    pub fn allocate(svg: String, ledger: &Arc<SourceLedger>) -> Self {
        let n = ledger.allocated.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(handles = n, bytes = svg.len(), "transient source allocated");
        Self {
            bytes: svg.into_bytes(),
            ledger: Arc::clone(ledger),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        "image/svg+xml;charset=utf-8"
    }
}

impl Drop for TransientSource {
    fn drop(&mut self) {
        self.ledger.released.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("transient source released");
    }
}

/// Asynchronously decodes a transient source into a render tree.
pub trait SourceDecoder {
    fn decode<'a>(&'a self, source: &'a TransientSource) -> LocalBoxFuture<'a, Result<usvg::Tree>>;
}

/// Decodes with `usvg`, sharing one font database across calls.
#[derive(Clone)]
pub struct UsvgDecoder {
    fontdb: Arc<usvg::fontdb::Database>,
    font_family: String,
}

impl std::fmt::Debug for UsvgDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsvgDecoder")
            .field("fonts", &self.fontdb.len())
            .field("font_family", &self.font_family)
            .finish()
    }
}

impl Default for UsvgDecoder {
    fn default() -> Self {
        Self::with_system_fonts()
    }
}

impl UsvgDecoder {
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::with_fontdb(db)
    }

    /// No fonts at all: text is dropped, shapes still render. Useful for deterministic tests.
    pub fn without_fonts() -> Self {
        Self::with_fontdb(usvg::fontdb::Database::new())
    }

    pub fn with_fontdb(db: usvg::fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(db),
            // Diagram CSS assumes a sans-serif stack; system selection may vary.
            font_family: "Arial".to_string(),
        }
    }

    pub fn parse(&self, data: &[u8]) -> Result<usvg::Tree> {
        let opt = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_family: self.font_family.clone(),
            ..usvg::Options::default()
        };
        usvg::Tree::from_data(data, &opt).map_err(|err| ExportError::Decode {
            message: err.to_string(),
        })
    }
}

impl SourceDecoder for UsvgDecoder {
    fn decode<'a>(&'a self, source: &'a TransientSource) -> LocalBoxFuture<'a, Result<usvg::Tree>> {
        async move { self.parse(source.bytes()) }.boxed_local()
    }
}
