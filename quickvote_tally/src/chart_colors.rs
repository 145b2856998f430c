//! Chart palettes and the lightness nudge that keeps bars visible.

use log::debug;

use crate::config::{ColorError, QuestionType};
use crate::contrast::{contrast_ratio, hex_to_rgb, relative_luminance, Rgb};

/// Default contrast ratio required between a bar and the background.
pub const DEFAULT_MIN_CONTRAST: f64 = 3.0;

/// Lightness shift (in percentage points) applied to a bar that does not
/// stand out enough from its background.
pub const LIGHTNESS_SHIFT: f64 = 30.0;

/// Colors for the columns of multiple choice questions, used in column order.
pub const MULTIPLE_CHOICE_COLORS: [&str; 8] = [
    "#3b82f6", "#8b5cf6", "#ec4899", "#f97316", "#14b8a6", "#84cc16", "#6366f1", "#06b6d4",
];

/// The three canonical answers of an agree/disagree question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum AgreeDisagreeChoice {
    Agree,
    Sometimes,
    Disagree,
}

impl AgreeDisagreeChoice {
    pub const ALL: [AgreeDisagreeChoice; 3] = [
        AgreeDisagreeChoice::Agree,
        AgreeDisagreeChoice::Sometimes,
        AgreeDisagreeChoice::Disagree,
    ];

    /// Accepts both the stored vote value (`agree`) and the column label (`Agree`).
    pub fn from_label(label: &str) -> Option<AgreeDisagreeChoice> {
        match label.to_lowercase().as_str() {
            "agree" => Some(AgreeDisagreeChoice::Agree),
            "sometimes" => Some(AgreeDisagreeChoice::Sometimes),
            "disagree" => Some(AgreeDisagreeChoice::Disagree),
            _ => None,
        }
    }

    /// The value stored in the votes.
    pub fn value(&self) -> &'static str {
        match self {
            AgreeDisagreeChoice::Agree => "agree",
            AgreeDisagreeChoice::Sometimes => "sometimes",
            AgreeDisagreeChoice::Disagree => "disagree",
        }
    }

    /// The label of the chart column.
    pub fn label(&self) -> &'static str {
        match self {
            AgreeDisagreeChoice::Agree => "Agree",
            AgreeDisagreeChoice::Sometimes => "Sometimes",
            AgreeDisagreeChoice::Disagree => "Disagree",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AgreeDisagreeChoice::Agree => "#22c55e",
            AgreeDisagreeChoice::Sometimes => "#eab308",
            AgreeDisagreeChoice::Disagree => "#ef4444",
        }
    }
}

/// The palette color of the column at `position` (0-based).
///
/// Agree/disagree columns are colored by meaning. Anything else, including an
/// unexpected label on an agree/disagree question, cycles through
/// [`MULTIPLE_CHOICE_COLORS`].
pub fn column_color(question_type: QuestionType, value: &str, position: usize) -> &'static str {
    if question_type == QuestionType::AgreeDisagree {
        if let Some(choice) = AgreeDisagreeChoice::from_label(value) {
            return choice.color();
        }
    }
    MULTIPLE_CHOICE_COLORS[position % MULTIPLE_CHOICE_COLORS.len()]
}

/// HSL color: hue in degrees [0, 360), saturation and lightness in percent [0, 100].
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

pub fn rgb_to_hsl(rgb: &Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn hsl_to_rgb(hsl: &Hsl) -> Rgb {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    if s == 0.0 {
        let c = to_channel(l);
        return Rgb { r: c, g: c, b: c };
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb {
        r: to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        g: to_channel(hue_to_rgb(p, q, h)),
        b: to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    }
}

pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Ok(rgb_to_hsl(&hex_to_rgb(hex)?))
}

pub fn hsl_to_hex(hsl: &Hsl) -> String {
    hsl_to_rgb(hsl).to_hex()
}

/// Returns a version of `original` that stands out against `background`.
///
/// Colors that already reach `min_contrast` are returned untouched. Otherwise
/// the lightness is shifted once by [`LIGHTNESS_SHIFT`]: up on dark
/// backgrounds, down on light ones. The resulting ratio is not checked again,
/// so it may still fall short of `min_contrast`.
pub fn adaptive_chart_color(
    original: &str,
    background: &str,
    min_contrast: f64,
) -> Result<String, ColorError> {
    let ratio = contrast_ratio(original, background)?;
    if ratio >= min_contrast {
        return Ok(original.to_string());
    }

    let hsl = hex_to_hsl(original)?;
    let dark_background = relative_luminance(background)? < 0.5;
    let l = if dark_background {
        (hsl.l + LIGHTNESS_SHIFT).min(100.0)
    } else {
        (hsl.l - LIGHTNESS_SHIFT).max(0.0)
    };
    let adjusted = hsl_to_hex(&Hsl { l, ..hsl });
    debug!(
        "adaptive_chart_color: {} on {} has contrast {:.2} < {:.2}, using {}",
        original, background, ratio, min_contrast, adjusted
    );
    Ok(adjusted)
}
