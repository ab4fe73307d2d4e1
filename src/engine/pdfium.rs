//! PDFium-backed [`TextEngine`].
//!
//! The shared library is located once per process. That outcome is latched:
//! if the library cannot be bound the first time, every later call reports
//! the same failure without trying again.
//!
//! PDFium keeps one global library state, and dropping a `Pdfium` tears it
//! down for every other instance. Each thread therefore initializes the
//! library once and keeps it alive until the process exits; every engine
//! [`bind`] hands out on that thread borrows the same instance. Engines are
//! tied to the thread that bound them.
//!
//! Handles are the raw `FPDF_*` pointers, driven through
//! [`PdfiumLibraryBindings`].

use super::capability::{Capability, CapabilityLatch};
use super::{MatchSpan, SearchFlags, TextEngine};
use crate::error::{Error, Result};
use crate::geometry::{CharacterBox, PageMetrics};
use pdfium_render::prelude::*;
use std::cell::OnceCell;
use std::marker::PhantomData;
use std::os::raw::{c_ulong, c_void};
use std::path::{Path, PathBuf};

/// Environment variable naming the directory that holds the PDFium library.
pub const PDFIUM_PATH_ENV: &str = "PDF_LOCATE_PDFIUM_PATH";

/// Where to find the PDFium shared library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfiumConfig {
    /// Directory containing the platform library; `None` uses the system library
    pub library_dir: Option<PathBuf>,
}

impl PdfiumConfig {
    /// Use the system library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the library directory from [`PDFIUM_PATH_ENV`], if set.
    pub fn from_env() -> Self {
        Self {
            library_dir: std::env::var_os(PDFIUM_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Load the library from `dir`.
    pub fn with_library_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.library_dir = Some(dir.into());
        self
    }
}

/// Resolved library location, the only state kept process-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LibraryLocation {
    dir: Option<PathBuf>,
}

impl LibraryLocation {
    fn bind(&self) -> Result<Box<dyn PdfiumLibraryBindings>> {
        let bindings = match &self.dir {
            Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
            None => Pdfium::bind_to_system_library(),
        };
        bindings.map_err(|e| Error::EngineUnavailable(format!("Failed to initialize Pdfium: {}", e)))
    }
}

static LIBRARY: CapabilityLatch<LibraryLocation> = CapabilityLatch::new();

thread_local! {
    static THREAD_PDFIUM: OnceCell<&'static Pdfium> = const { OnceCell::new() };
}

/// The library instance of the current thread, initialized on first use.
///
/// The instance is leaked so `FPDF_DestroyLibrary` never runs under a live
/// engine, including during thread-local teardown.
fn thread_pdfium(location: &LibraryLocation) -> Result<&'static Pdfium> {
    THREAD_PDFIUM.with(|cell| {
        if let Some(pdfium) = cell.get() {
            return Ok(*pdfium);
        }
        let pdfium: &'static Pdfium = Box::leak(Box::new(Pdfium::new(location.bind()?)));
        Ok(*cell.get_or_init(|| pdfium))
    })
}

/// Bind PDFium, resolving the library location on first use.
///
/// `config` is consulted only by the first call in the process; later calls
/// reuse the latched location, or the latched failure.
pub fn bind(config: &PdfiumConfig) -> Capability<PdfiumEngine> {
    let location = LIBRARY.get_or_resolve(|| {
        let location = LibraryLocation {
            dir: config.library_dir.clone(),
        };
        thread_pdfium(&location)?;
        match &location.dir {
            Some(dir) => log::info!("Bound Pdfium from {}", dir.display()),
            None => log::info!("Bound system Pdfium library"),
        }
        Ok(location)
    });

    let result = location
        .require()
        .and_then(thread_pdfium)
        .map(|pdfium| PdfiumEngine {
            pdfium,
            _thread_bound: PhantomData,
        });
    Capability::from_result(result)
}

/// A text engine over the PDFium library of the binding thread.
pub struct PdfiumEngine {
    pdfium: &'static Pdfium,
    _thread_bound: PhantomData<*const ()>,
}

impl PdfiumEngine {
    fn ffi(&self) -> &dyn PdfiumLibraryBindings {
        self.pdfium.bindings()
    }
}

impl std::fmt::Debug for PdfiumEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfiumEngine").finish_non_exhaustive()
    }
}

/// An active PDFium find iteration.
#[derive(Debug)]
pub struct PdfiumSearch {
    handle: FPDF_SCHHANDLE,
}

fn non_null<T>(handle: *mut T) -> Option<*mut T> {
    (!handle.is_null()).then_some(handle)
}

/// NUL-terminated UTF-16 copy of `s`.
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode a UTF-16 buffer, dropping everything from the first NUL.
fn from_wide(buffer: &[u16]) -> String {
    let end = buffer.iter().position(|&unit| unit == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..end])
}

impl TextEngine for PdfiumEngine {
    type Document = FPDF_DOCUMENT;
    type Page = FPDF_PAGE;
    type TextPage = FPDF_TEXTPAGE;
    type Search = PdfiumSearch;
    type Bookmark = FPDF_BOOKMARK;

    fn open_document(&self, path: &Path) -> Option<FPDF_DOCUMENT> {
        let path = path.to_str()?;
        non_null(self.ffi().FPDF_LoadDocument(path, None))
    }

    fn close_document(&self, document: &FPDF_DOCUMENT) {
        self.ffi().FPDF_CloseDocument(*document);
    }

    fn page_count(&self, document: &FPDF_DOCUMENT) -> i32 {
        self.ffi().FPDF_GetPageCount(*document)
    }

    fn load_page(&self, document: &FPDF_DOCUMENT, index: i32) -> Option<FPDF_PAGE> {
        if index < 0 {
            return None;
        }
        non_null(self.ffi().FPDF_LoadPage(*document, index))
    }

    fn close_page(&self, page: &FPDF_PAGE) {
        self.ffi().FPDF_ClosePage(*page);
    }

    fn page_metrics(&self, page: &FPDF_PAGE) -> PageMetrics {
        PageMetrics::new(
            f64::from(self.ffi().FPDF_GetPageWidthF(*page)),
            f64::from(self.ffi().FPDF_GetPageHeightF(*page)),
        )
    }

    fn load_text_page(&self, page: &FPDF_PAGE) -> Option<FPDF_TEXTPAGE> {
        non_null(self.ffi().FPDFText_LoadPage(*page))
    }

    fn close_text_page(&self, text_page: &FPDF_TEXTPAGE) {
        self.ffi().FPDFText_ClosePage(*text_page);
    }

    fn char_count(&self, text_page: &FPDF_TEXTPAGE) -> i32 {
        self.ffi().FPDFText_CountChars(*text_page)
    }

    fn char_box(&self, text_page: &FPDF_TEXTPAGE, index: i32) -> Option<CharacterBox> {
        let (mut left, mut right, mut bottom, mut top) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        let ok = self
            .ffi()
            .FPDFText_GetCharBox(*text_page, index, &mut left, &mut right, &mut bottom, &mut top);
        (ok != 0).then(|| CharacterBox::new(index, left, right, top, bottom))
    }

    fn char_at(&self, text_page: &FPDF_TEXTPAGE, index: i32) -> Option<char> {
        char::from_u32(self.ffi().FPDFText_GetUnicode(*text_page, index))
    }

    fn text_range(&self, text_page: &FPDF_TEXTPAGE, start: i32, count: i32) -> Option<String> {
        let units = usize::try_from(count).ok()?.checked_add(1)?;
        let mut buffer = vec![0u16; units];
        // PDFium writes at most `count + 1` units, terminator included
        let written = self
            .ffi()
            .FPDFText_GetText(*text_page, start, count, buffer.as_mut_ptr());
        if written <= 0 {
            return None;
        }
        let written = usize::try_from(written).ok()?.min(buffer.len());
        Some(from_wide(&buffer[..written]))
    }

    fn find_start(&self, text_page: &FPDF_TEXTPAGE, query: &str, flags: SearchFlags) -> Option<PdfiumSearch> {
        let wide = to_wide(query);
        let handle = self
            .ffi()
            .FPDFText_FindStart(*text_page, wide.as_ptr(), flags.to_bits() as c_ulong, 0);
        non_null(handle).map(|handle| PdfiumSearch { handle })
    }

    fn find_next(&self, search: &mut PdfiumSearch) -> Option<MatchSpan> {
        if self.ffi().FPDFText_FindNext(search.handle) == 0 {
            return None;
        }
        Some(MatchSpan {
            start: self.ffi().FPDFText_GetSchResultIndex(search.handle),
            count: self.ffi().FPDFText_GetSchCount(search.handle),
        })
    }

    fn find_close(&self, search: &PdfiumSearch) {
        self.ffi().FPDFText_FindClose(search.handle);
    }

    fn first_child(&self, document: &FPDF_DOCUMENT, parent: Option<&FPDF_BOOKMARK>) -> Option<FPDF_BOOKMARK> {
        let parent = parent.copied().unwrap_or(std::ptr::null_mut());
        non_null(self.ffi().FPDFBookmark_GetFirstChild(*document, parent))
    }

    fn next_sibling(&self, document: &FPDF_DOCUMENT, bookmark: &FPDF_BOOKMARK) -> Option<FPDF_BOOKMARK> {
        non_null(self.ffi().FPDFBookmark_GetNextSibling(*document, *bookmark))
    }

    fn bookmark_title(&self, bookmark: &FPDF_BOOKMARK) -> String {
        // Byte length of the UTF-16LE title, terminator included
        let byte_len = self.ffi().FPDFBookmark_GetTitle(*bookmark, std::ptr::null_mut(), 0);
        let units = usize::try_from(byte_len).unwrap_or(0) / 2;
        if units <= 1 {
            return String::new();
        }

        let mut buffer = vec![0u16; units];
        self.ffi()
            .FPDFBookmark_GetTitle(*bookmark, buffer.as_mut_ptr() as *mut c_void, byte_len);
        from_wide(&buffer)
    }

    fn bookmark_page_index(&self, document: &FPDF_DOCUMENT, bookmark: &FPDF_BOOKMARK) -> Option<i32> {
        let dest = self.ffi().FPDFBookmark_GetDest(*document, *bookmark);
        if dest.is_null() {
            return None;
        }
        Some(self.ffi().FPDFDest_GetDestPageIndex(*document, dest))
    }
}
