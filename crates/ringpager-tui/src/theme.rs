use ratatui::style::Color;

/// Colors used by the strip and status bar
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey1: Color,
    pub grey2: Color,

    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,
    pub blue: Color,
    pub orange: Color,

    // Slot kinds
    pub real: Color,
    pub dummy: Color,
    pub empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            aqua: Color::Rgb(0x89, 0xb4, 0x82),
            blue: Color::Rgb(0x7d, 0xae, 0xa3),
            orange: Color::Rgb(0xe7, 0x8a, 0x4e),
            real: Color::Rgb(0xa9, 0xb6, 0x65),
            dummy: Color::Rgb(0xd8, 0xa6, 0x57),
            empty: Color::Rgb(0x7c, 0x6f, 0x64),
        }
    }
}
