use crate::foundation::color::Color;

/// Colors used by a construction scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub grid: Color,
    pub construction: Color,
    pub reference: Color,
    pub indicate: Color,
    pub label_fill: Color,
    pub label_ink: Color,
    pub star: Color,
    pub instruction: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Color::rgb8(0x00, 0x30, 0x49),
            construction: Color::rgb8(0xFF, 0x99, 0x11),
            reference: Color::rgb8(0xD6, 0x28, 0x28),
            indicate: Color::rgb8(0x9D, 0xD9, 0xD2),
            label_fill: Color::rgb8(0xEA, 0xE2, 0xB7),
            label_ink: Color::rgb8(0xD6, 0x28, 0x28),
            star: Color::rgb8(0x39, 0x2F, 0x5A),
            instruction: Color::rgb8(0xA5, 0x2A, 0x2A),
        }
    }
}

impl Palette {
    /// Bright-on-dark colors of the concept sketch.
    pub fn sketch() -> Self {
        let blue = Color::rgb8(0x58, 0xC4, 0xDD);
        let red = Color::rgb8(0xFC, 0x62, 0x55);
        Self {
            grid: Color::rgb8(0x29, 0xAB, 0xCA),
            construction: Color::rgb8(0xFF, 0xFF, 0x00),
            reference: red,
            indicate: Color::rgb8(0xFF, 0xFF, 0x00),
            label_fill: Color::WHITE,
            label_ink: red,
            star: blue,
            instruction: Color::WHITE,
        }
    }
}

/// Fixed inputs of a construction script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StarConfig {
    pub radius: f64,
    pub palette: Palette,
}
