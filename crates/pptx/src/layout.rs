//! Fixed slide template for venue recommendation decks.
//!
//! The deck is A4 landscape: a grey title page followed by one slide per
//! record. Every position below is in centimetres from the top-left corner.

use crate::slide::{Align, Anchor, Bounds, Color, Deck, Fill, Outline, Paragraph, Run, Shape, Slide};
use crate::units::{cm, pt};
use crate::writer::PptxWriter;
use deck_core::summary::{OVERVIEW_TITLE, PHOTO_CAPTIONS, PROPOSED_DATES_LABEL};
use deck_core::{ParsedInput, RecommendationSummary, Result};
use serde::{Deserialize, Serialize};

const TITLE_PAGE_BACKGROUND: Color = Color(153, 153, 153);
const DATES_BOX_FILL: Color = Color(224, 234, 238);
const DATES_LABEL_COLOR: Color = Color(204, 0, 0);
const OVERVIEW_TITLE_COLOR: Color = Color(255, 0, 0);
const PHOTO_FILL: Color = Color(230, 230, 230);
const PHOTO_OUTLINE: Color = Color(200, 200, 200);
const FOOTER_TEXT_COLOR: Color = Color(128, 128, 128);

const FOOTER_TOP_CM: f64 = 18.03;

/// Deck-wide settings: page size and branding text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckOptions {
    /// Slide width in centimetres.
    pub width_cm: f64,
    /// Slide height in centimetres.
    pub height_cm: f64,
    /// Lines shown in the top-left corner of the title page; the first is bold.
    pub brand_lines: Vec<String>,
    /// Right-aligned line at the bottom of the title page.
    pub company_line: String,
    /// Footer text on every content slide.
    pub disclaimer: String,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            width_cm: 29.7,
            height_cm: 21.0,
            brand_lines: vec!["S&P Global".to_string(), "Market Intelligence".to_string()],
            company_line: "S&P Global Market Intelligence".to_string(),
            disclaimer: "Permission to reprint or distribute any content from this presentation \
                         requires the prior written approval of S&P Global Market Intelligence."
                .to_string(),
        }
    }
}

/// Builds venue recommendation decks.
#[derive(Debug, Clone, Default)]
pub struct DeckRenderer {
    options: DeckOptions,
}

impl DeckRenderer {
    /// Create a renderer with the default template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom page size or branding.
    pub fn with_options(mut self, options: DeckOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DeckOptions {
        &self.options
    }

    /// Lay out the deck: a title page, then one slide per record.
    pub fn build(&self, input: &ParsedInput) -> Deck {
        let mut deck = Deck::new(cm(self.options.width_cm), cm(self.options.height_cm));
        deck.title = input.heading.clone();

        deck.add_slide(self.title_page(&input.heading, &input.date_to_present));
        for (idx, record) in input.records.iter().enumerate() {
            let summary = RecommendationSummary::new(idx + 1, record);
            // The title page is page 1.
            deck.add_slide(self.recommendation_slide(&summary, idx + 2));
        }

        log::debug!(
            "Laid out deck '{}' with {} slides",
            input.heading,
            deck.slides.len()
        );
        deck
    }

    /// Lay out and serialize the deck to PPTX bytes.
    pub fn render(&self, input: &ParsedInput) -> Result<Vec<u8>> {
        PptxWriter::new().write(&self.build(input))
    }

    fn slide_width(&self) -> i64 {
        cm(self.options.width_cm)
    }

    fn slide_height(&self) -> i64 {
        cm(self.options.height_cm)
    }

    fn title_page(&self, heading: &str, date_to_present: &str) -> Slide {
        let mut slide = Slide::new();

        slide.add_shape(
            Shape::rectangle(
                "Background",
                Bounds::new(0, 0, self.slide_width(), self.slide_height()),
            )
            .fill(Fill::Solid(TITLE_PAGE_BACKGROUND))
            .outline(Outline::None),
        );

        let mut brand = Shape::text_box("Brand", Bounds::new(cm(1.0), cm(1.0), cm(8.0), cm(2.0)));
        for (idx, line) in self.options.brand_lines.iter().enumerate() {
            let mut run = Run::new(line.as_str()).size(20.0).color(Color::WHITE);
            if idx == 0 {
                run = run.bold(true);
            }
            brand = brand.paragraph(Paragraph::from_run(run));
        }
        slide.add_shape(brand);

        slide.add_shape(
            Shape::text_box("Heading", Bounds::new(cm(1.0), cm(6.0), cm(22.0), cm(4.0))).paragraph(
                Paragraph::from_run(Run::new(heading).size(54.0).bold(true).color(Color::WHITE)),
            ),
        );

        slide.add_shape(
            Shape::text_box("Date", Bounds::new(cm(1.0), cm(17.0), cm(8.0), cm(2.0)))
                .paragraph(Paragraph::from_run(Run::new(date_to_present).size(32.0).color(Color::WHITE))),
        );

        slide.add_shape(
            Shape::text_box(
                "Company",
                Bounds::new(
                    self.slide_width() - cm(9.0),
                    self.slide_height() - cm(2.0),
                    cm(8.0),
                    cm(1.0),
                ),
            )
            .paragraph(
                Paragraph::from_run(
                    Run::new(self.options.company_line.as_str())
                        .size(14.0)
                        .color(Color::WHITE),
                )
                .align(Align::Right),
            ),
        );

        slide
    }

    fn recommendation_slide(&self, summary: &RecommendationSummary<'_>, page_number: usize) -> Slide {
        let mut slide = Slide::new();

        slide.add_shape(
            Shape::text_box("Title", Bounds::new(cm(1.0), cm(1.0), cm(21.0), cm(2.0)))
                .paragraph(Paragraph::from_run(Run::new(summary.title()).size(32.0).bold(true))),
        );

        slide.add_shape(
            Shape::text_box("Proposed Dates", Bounds::new(cm(1.0), cm(5.54), cm(10.0), cm(1.2)))
                .fill(Fill::Solid(DATES_BOX_FILL))
                .outline(Outline::Solid {
                    color: DATES_BOX_FILL,
                    width: None,
                })
                .anchor(Anchor::Middle)
                .paragraph(
                    Paragraph::new()
                        .align(Align::Left)
                        .run(
                            Run::new(PROPOSED_DATES_LABEL)
                                .size(14.0)
                                .bold(true)
                                .color(DATES_LABEL_COLOR),
                        )
                        .run(
                            Run::new(summary.proposed_dates())
                                .size(14.0)
                                .bold(false)
                                .color(Color::BLACK),
                        ),
                ),
        );

        let overview = Bounds::new(cm(1.0), cm(8.0), cm(12.0), cm(7.0));
        slide.add_shape(
            Shape::rectangle("Overview Frame", overview)
                .fill(Fill::None)
                .outline(Outline::Solid {
                    color: Color::BLACK,
                    width: Some(pt(2.0)),
                }),
        );
        slide.add_shape(
            Shape::text_box("Overview", overview)
                .paragraph(
                    Paragraph::from_run(
                        Run::new(OVERVIEW_TITLE)
                            .size(16.0)
                            .bold(true)
                            .color(OVERVIEW_TITLE_COLOR),
                    )
                    .space_after(8.0),
                )
                .paragraph(Paragraph::from_run(
                    Run::new(summary.overview_lines().join("\n"))
                        .size(14.0)
                        .color(Color::BLACK),
                )),
        );

        for (caption, bounds) in PHOTO_CAPTIONS.iter().zip(photo_grid()) {
            slide.add_shape(
                Shape::rectangle(format!("{} Photo", caption), bounds)
                    .fill(Fill::Solid(PHOTO_FILL))
                    .outline(Outline::Solid {
                        color: PHOTO_OUTLINE,
                        width: None,
                    }),
            );
            let label = Bounds {
                height: cm(1.0),
                ..bounds.below(cm(0.2))
            };
            slide.add_shape(
                Shape::text_box(format!("{} Caption", caption), label)
                    .paragraph(Paragraph::from_run(Run::new(*caption).size(12.0)).align(Align::Center)),
            );
        }

        self.add_footer(&mut slide, page_number);
        slide
    }

    fn add_footer(&self, slide: &mut Slide, page_number: usize) {
        let top = cm(FOOTER_TOP_CM);

        slide.add_shape(
            Shape::text_box("Disclaimer", Bounds::new(cm(1.0), top, cm(10.0), cm(1.5))).paragraph(
                Paragraph::from_run(
                    Run::new(self.options.disclaimer.as_str())
                        .size(10.0)
                        .color(FOOTER_TEXT_COLOR),
                )
                .align(Align::Left),
            ),
        );

        slide.add_shape(
            Shape::text_box(
                "Page Number",
                Bounds::new(self.slide_width() - cm(3.0), top, cm(2.5), cm(1.5)),
            )
            .paragraph(
                Paragraph::from_run(
                    Run::new(page_number.to_string())
                        .size(14.0)
                        .color(FOOTER_TEXT_COLOR),
                )
                .align(Align::Right),
            ),
        );
    }
}

/// Positions of the four photo placeholders: a 2x2 grid, row by row.
fn photo_grid() -> [Bounds; 4] {
    let (width, height) = (cm(7.0), cm(4.0));
    let (left, top) = (cm(14.5), cm(5.54));
    let right = left + width + cm(0.5);
    let bottom = top + height + cm(2.54);

    [
        Bounds::new(left, top, width, height),
        Bounds::new(right, top, width, height),
        Bounds::new(left, bottom, width, height),
        Bounds::new(right, bottom, width, height),
    ]
}
