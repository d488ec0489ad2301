//! PPTX (OOXML) backend for venue recommendation decks.
//!
//! Lays out the fixed deck template, writes it as a .pptx package (a ZIP
//! archive of XML parts), and reads slide text back out for verification.

pub mod layout;
pub mod reader;
pub mod slide;
pub mod template;
pub mod units;
pub mod writer;

pub use layout::{DeckOptions, DeckRenderer};
pub use reader::{DeckReader, SlideContent};
pub use slide::{Deck, Slide};
pub use writer::PptxWriter;
