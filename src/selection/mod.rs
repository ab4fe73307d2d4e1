//! Text selection by rectangle.
//!
//! Maps a UI-space rectangle back into page space, picks the characters it
//! touches, and reports them as reading-order text plus one highlight box per
//! visual line (see [`crate::layout::line_clustering`]).

mod text_select;

pub use text_select::{select_text, TextSelection};
