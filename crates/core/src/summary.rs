//! Text shown on the generated slides.
//!
//! Keeps the wording of titles, overview bullets and the deck filename in one
//! place so the renderer only deals with layout.

use crate::types::{fields, VenueRecord};

/// Label that precedes the proposed dates on each content slide.
pub const PROPOSED_DATES_LABEL: &str = "Proposed Dates: ";

/// Title of the overview box on each content slide.
pub const OVERVIEW_TITLE: &str = "Hotel Overview";

/// Captions under the four photo placeholders, in reading order.
pub const PHOTO_CAPTIONS: [&str; 4] = ["Main Ballroom", "Bedroom", "Breakout room", "Outdoor space"];

/// Fallback filename when the heading is empty.
const DEFAULT_FILENAME: &str = "presentation.pptx";

/// Formatter for the text of one venue recommendation slide.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSummary<'a> {
    /// 1-based position of the record in the deck.
    number: usize,
    record: &'a VenueRecord,
}

impl<'a> RecommendationSummary<'a> {
    /// Create a summary for the record at 1-based position `number`.
    pub fn new(number: usize, record: &'a VenueRecord) -> Self {
        Self { number, record }
    }

    /// Slide title, e.g. `Recommendation #1 – Grand Hotel : 250 rooms`.
    pub fn title(&self) -> String {
        format!(
            "Recommendation #{} \u{2013} {} : {} rooms",
            self.number,
            self.record.get_or_empty(fields::VENUE_NAME),
            self.record.get_or_empty(fields::VENUE_GUEST_ROOMS)
        )
    }

    /// The proposed dates, without the label.
    pub fn proposed_dates(&self) -> &'a str {
        self.record.get_or_empty(fields::PROPOSED_DATES)
    }

    /// Bullet lines for the overview box.
    pub fn overview_lines(&self) -> Vec<String> {
        let r = self.record;
        vec![
            format!("\u{2022} City: {}", r.get_or_empty(fields::VENUE_CITY)),
            format!("\u{2022} Guest Rooms: {}", r.get_or_empty(fields::VENUE_GUEST_ROOMS)),
            format!(
                "\u{2022} Average Daily Rate: {}",
                r.get_or_empty(fields::AVERAGE_DAILY_RATE)
            ),
            format!(
                "\u{2022} Total Food & Beverages: {}",
                r.get_or_empty(fields::TOTAL_F_AND_B)
            ),
            format!("\u{2022} Additional Fees: {}", r.get_or_empty(fields::ADDITIONAL_FEES)),
        ]
    }
}

/// Filename for the uploaded deck: the heading with spaces turned into
/// underscores.
pub fn deck_filename(heading: &str) -> String {
    if heading.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{}.pptx", heading.replace(' ', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grand_hotel() -> VenueRecord {
        [
            (fields::VENUE_NAME, "Grand Hotel"),
            (fields::VENUE_CITY, "Austin"),
            (fields::VENUE_GUEST_ROOMS, "250"),
            (fields::PROPOSED_DATES, "March 3-5"),
            (fields::AVERAGE_DAILY_RATE, "$289"),
            (fields::TOTAL_F_AND_B, "$40,000"),
            (fields::ADDITIONAL_FEES, "Resort fee $25"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_title() {
        let record = grand_hotel();
        let summary = RecommendationSummary::new(1, &record);
        assert_eq!(summary.title(), "Recommendation #1 – Grand Hotel : 250 rooms");
    }

    #[test]
    fn test_title_with_missing_fields() {
        let record = VenueRecord::new();
        let summary = RecommendationSummary::new(3, &record);
        assert_eq!(summary.title(), "Recommendation #3 –  :  rooms");
        assert_eq!(summary.proposed_dates(), "");
    }

    #[test]
    fn test_overview_lines() {
        let record = grand_hotel();
        let lines = RecommendationSummary::new(1, &record).overview_lines();
        assert_eq!(
            lines,
            vec![
                "• City: Austin",
                "• Guest Rooms: 250",
                "• Average Daily Rate: $289",
                "• Total Food & Beverages: $40,000",
                "• Additional Fees: Resort fee $25",
            ]
        );
    }

    #[test]
    fn test_deck_filename() {
        assert_eq!(deck_filename("Q1 Offsite"), "Q1_Offsite.pptx");
        assert_eq!(deck_filename("Summit"), "Summit.pptx");
        assert_eq!(deck_filename(""), "presentation.pptx");
    }
}
