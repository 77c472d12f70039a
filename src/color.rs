//! Highlight color classification
//!
//! Maps annotation colors to a fixed palette of named buckets by converting
//! RGB to HSV and splitting the hue circle into ranges.

use serde::{Deserialize, Serialize};

/// Saturation below which a color counts as achromatic
const ACHROMATIC_SATURATION: f64 = 0.15;
/// Achromatic values darker than this are black
const BLACK_VALUE: f64 = 0.25;
/// Achromatic values lighter than this are white
const WHITE_VALUE: f64 = 0.85;

/// Named color bucket, declared in display/priority order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    Gray,
    Black,
    White,
}

impl Default for ColorBucket {
    /// Yellow is what almost every reader highlights with out of the box
    fn default() -> Self {
        Self::Yellow
    }
}

impl ColorBucket {
    /// Every bucket in display order
    pub const ALL: [ColorBucket; 11] = [
        ColorBucket::Red,
        ColorBucket::Orange,
        ColorBucket::Yellow,
        ColorBucket::Green,
        ColorBucket::Cyan,
        ColorBucket::Blue,
        ColorBucket::Purple,
        ColorBucket::Pink,
        ColorBucket::Gray,
        ColorBucket::Black,
        ColorBucket::White,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Gray => "gray",
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// Resolve a color name typed by a user, in English or Portuguese
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "red" | "vermelho" | "vermelha" => Some(Self::Red),
            "orange" | "laranja" => Some(Self::Orange),
            "yellow" | "amarelo" | "amarela" => Some(Self::Yellow),
            "green" | "verde" => Some(Self::Green),
            "cyan" | "ciano" => Some(Self::Cyan),
            "blue" | "azul" => Some(Self::Blue),
            "purple" | "violet" | "roxo" | "roxa" | "violeta" => Some(Self::Purple),
            "pink" | "magenta" | "rosa" => Some(Self::Pink),
            "gray" | "grey" | "cinza" => Some(Self::Gray),
            "black" | "preto" | "preta" => Some(Self::Black),
            "white" | "branco" | "branca" => Some(Self::White),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColorBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown color: {}", s))
    }
}

/// HSV triple: hue in degrees [0, 360), saturation and value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Hexagonal RGB to HSV conversion, components in [0, 1]
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsv {
        h: h.rem_euclid(360.0),
        s,
        v,
    }
}

/// Bucket for an HSV color
pub fn classify_hsv(hsv: Hsv) -> ColorBucket {
    if hsv.s < ACHROMATIC_SATURATION {
        return if hsv.v < BLACK_VALUE {
            ColorBucket::Black
        } else if hsv.v > WHITE_VALUE {
            ColorBucket::White
        } else {
            ColorBucket::Gray
        };
    }

    match hsv.h {
        h if h >= 345.0 || h < 15.0 => ColorBucket::Red,
        h if h < 45.0 => ColorBucket::Orange,
        h if h < 70.0 => ColorBucket::Yellow,
        h if h < 150.0 => ColorBucket::Green,
        h if h < 210.0 => ColorBucket::Cyan,
        h if h < 255.0 => ColorBucket::Blue,
        h if h < 290.0 => ColorBucket::Purple,
        h if h < 345.0 => ColorBucket::Pink,
        _ => ColorBucket::default(),
    }
}

/// Bucket for an annotation color
///
/// Accepts 0-1 or 0-255 components (any component above 1 means the latter).
/// Missing or short color arrays fall back to yellow.
pub fn classify_color(rgb: Option<&[f64]>) -> ColorBucket {
    let Some(&[r, g, b, ..]) = rgb else {
        return ColorBucket::default();
    };

    let scale = if r > 1.0 || g > 1.0 || b > 1.0 {
        255.0
    } else {
        1.0
    };
    let unit = |c: f64| {
        if c.is_finite() {
            (c / scale).clamp(0.0, 1.0)
        } else {
            0.0
        }
    };

    classify_hsv(rgb_to_hsv(unit(r), unit(g), unit(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(r: f64, g: f64, b: f64) -> ColorBucket {
        classify_color(Some(&[r, g, b]))
    }

    #[test]
    fn test_reference_colors() {
        assert_eq!(classify(255.0, 255.0, 0.0), ColorBucket::Yellow);
        assert_eq!(classify(0.0, 0.0, 0.0), ColorBucket::Black);
        assert_eq!(classify(128.0, 128.0, 128.0), ColorBucket::Gray);
        assert_eq!(classify(255.0, 255.0, 255.0), ColorBucket::White);
        assert_eq!(classify(255.0, 0.0, 0.0), ColorBucket::Red);
        assert_eq!(classify(0.0, 255.0, 0.0), ColorBucket::Green);
        assert_eq!(classify(0.0, 0.0, 255.0), ColorBucket::Blue);
        assert_eq!(classify(0.0, 255.0, 255.0), ColorBucket::Cyan);
        assert_eq!(classify(255.0, 128.0, 0.0), ColorBucket::Orange);
        assert_eq!(classify(140.0, 0.0, 255.0), ColorBucket::Purple);
        assert_eq!(classify(255.0, 0.0, 200.0), ColorBucket::Pink);
    }

    #[test]
    fn test_unit_scale_input() {
        assert_eq!(classify(1.0, 1.0, 0.0), ColorBucket::Yellow);
        assert_eq!(classify(0.0, 0.8, 0.2), ColorBucket::Green);
        assert_eq!(classify(0.5, 0.5, 0.5), ColorBucket::Gray);
    }

    #[test]
    fn test_reader_default_highlight_colors() {
        // Acrobat yellow, Preview green, Foxit blue
        assert_eq!(classify(1.0, 0.819, 0.0), ColorBucket::Yellow);
        assert_eq!(classify(0.486, 0.784, 0.408), ColorBucket::Green);
        assert_eq!(classify(0.0, 0.4, 1.0), ColorBucket::Blue);
    }

    #[test]
    fn test_missing_or_short_color_defaults_to_yellow() {
        assert_eq!(classify_color(None), ColorBucket::Yellow);
        assert_eq!(classify_color(Some(&[])), ColorBucket::Yellow);
        assert_eq!(classify_color(Some(&[0.2, 0.4])), ColorBucket::Yellow);
    }

    #[test]
    fn test_hue_boundaries() {
        let at = |h: f64| classify_hsv(Hsv { h, s: 1.0, v: 1.0 });
        assert_eq!(at(0.0), ColorBucket::Red);
        assert_eq!(at(14.9), ColorBucket::Red);
        assert_eq!(at(15.0), ColorBucket::Orange);
        assert_eq!(at(45.0), ColorBucket::Yellow);
        assert_eq!(at(70.0), ColorBucket::Green);
        assert_eq!(at(150.0), ColorBucket::Cyan);
        assert_eq!(at(210.0), ColorBucket::Blue);
        assert_eq!(at(255.0), ColorBucket::Purple);
        assert_eq!(at(290.0), ColorBucket::Pink);
        assert_eq!(at(344.9), ColorBucket::Pink);
        assert_eq!(at(345.0), ColorBucket::Red);
    }

    #[test]
    fn test_classification_is_total_over_byte_grid() {
        let steps = [0.0, 1.0, 17.0, 64.0, 127.0, 128.0, 200.0, 254.0, 255.0];
        for r in steps {
            for g in steps {
                for b in steps {
                    let bucket = classify(r, g, b);
                    assert!(ColorBucket::ALL.contains(&bucket));
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_and_non_finite_components() {
        assert_eq!(classify(f64::NAN, f64::NAN, f64::NAN), ColorBucket::Black);
        assert_eq!(classify(-3.0, 0.0, 0.0), ColorBucket::Black);
        assert_eq!(classify(300.0, 300.0, 0.0), ColorBucket::Yellow);
    }

    #[test]
    fn test_rgb_to_hsv() {
        let hsv = rgb_to_hsv(1.0, 1.0, 0.0);
        assert_eq!(hsv.h, 60.0);
        assert_eq!(hsv.s, 1.0);
        assert_eq!(hsv.v, 1.0);

        let magenta = rgb_to_hsv(1.0, 0.0, 1.0);
        assert_eq!(magenta.h, 300.0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ColorBucket::from_name("verde"), Some(ColorBucket::Green));
        assert_eq!(ColorBucket::from_name("AMARELO"), Some(ColorBucket::Yellow));
        assert_eq!(ColorBucket::from_name("grey"), Some(ColorBucket::Gray));
        assert_eq!(ColorBucket::from_name("turquesa"), None);
        assert_eq!("blue".parse::<ColorBucket>().unwrap(), ColorBucket::Blue);
    }
}
