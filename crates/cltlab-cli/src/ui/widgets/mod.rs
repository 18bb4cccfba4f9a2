pub use self::histogram_card::HistogramCard;

mod histogram_card;

pub mod color {
    use ratatui::style::Color;

    pub const POPULATION: Color = Color::Rgb(66, 135, 245);
    pub const SAMPLE: Color = Color::Rgb(245, 166, 35);
    pub const MEANS: Color = Color::Rgb(80, 200, 120);
    pub const MUTED: Color = Color::DarkGray;
    pub const ERROR: Color = Color::Rgb(255, 85, 85);
}
