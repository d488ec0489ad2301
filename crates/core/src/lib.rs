//! Core domain types, input parsing, and slide text formatting for venue
//! recommendation decks.

pub mod error;
pub mod parser;
pub mod summary;
pub mod types;

pub use error::{Error, Result};
pub use parser::{parse, InputParser};
pub use summary::{deck_filename, RecommendationSummary};
pub use types::{fields, ParsedInput, VenueRecord};
