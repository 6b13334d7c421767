//! Cell formats shared by every sheet.

use rust_xlsxwriter::{Color, Format, FormatAlign};

/// Header fill colour.
pub const HEADER_FILL: u32 = 0x000D_1B2A;

/// Number format for success rates.
pub const PERCENT_FORMAT: &str = "0.00%";

/// The formats used when writing the report.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Header row: bold white Calibri 12 on a dark fill, centred.
    pub header: Format,
    /// Text and count cells: Calibri 11, left aligned.
    pub data: Format,
    /// Success rate cells.
    pub percent: Format,
}

impl Styles {
    /// Builds the report formats.
    #[must_use]
    pub fn new() -> Self {
        let header = Format::new()
            .set_font_name("Calibri")
            .set_font_size(12)
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let data = Format::new()
            .set_font_name("Calibri")
            .set_font_size(11)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter);

        let percent = data.clone().set_num_format(PERCENT_FORMAT);

        Self {
            header,
            data,
            percent,
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}
