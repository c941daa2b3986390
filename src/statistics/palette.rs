use std::ops::Range;

/// Fixed list of colors assigned to categories by their order of first appearance.
#[derive(Copy, Clone)]
pub struct Palette(&'static [&'static str]);

impl Palette {
    pub const PARCELS: Self = Self(&["#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6"]);
    pub const CACAO_TYPES: Self = Self(&["#8b5cf6", "#06b6d4", "#f97316", "#84cc16"]);

    /// Color slot for the category first seen at `position`, cycling past the palette end.
    pub const fn swatch(self, position: usize) -> Swatch {
        let color_index = position % self.0.len();
        Swatch { color_index, color: self.0[color_index] }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Swatch {
    pub color_index: usize,

    /// `#rrggbb`.
    pub color: &'static str,
}

impl Swatch {
    /// Parse the hex color into RGB components.
    #[must_use]
    pub fn rgb(self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        let component = |range: Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
        Some((component(0..2)?, component(2..4)?, component(4..6)?))
    }
}
