use ratatui::style::Color;

/// A color in hue/saturation/lightness terms.
/// Hue in degrees (240 = blue, 360 = red), saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

/// Map case counts to a severity color.
///
/// Hue encodes lethality: 240 (blue) when no deaths, sliding toward 360
/// (red) as the deaths share of `confirmed + deaths` grows. Lightness
/// encodes magnitude on a log scale: small outbreaks stay near-white,
/// large ones go dark. Absent counts are treated as zero so countries
/// with no data get the lightest blue instead of an error.
pub fn severity_color(confirmed: Option<u64>, deaths: Option<u64>) -> Hsl {
    let confirmed = confirmed.unwrap_or(0);
    let deaths = deaths.unwrap_or(0);

    let denom = match confirmed + deaths {
        0 => 1,
        n => n,
    };
    let hue = (240.0 + 120.0 * deaths as f64 / denom as f64).floor() as u16;

    let magnitude = confirmed + 20 * deaths;
    let mut weight = if magnitude == 0 {
        0
    } else {
        (7.0 * (magnitude as f64).ln()).floor() as i64
    };
    if weight > 100 {
        weight = 95;
    }

    Hsl {
        hue,
        saturation: 100,
        lightness: (95 - weight).max(0) as u8,
    }
}

impl Hsl {
    /// The shade painted for countries with no case data at all.
    pub fn no_data() -> Self {
        severity_color(None, None)
    }

    /// Convert to 24-bit RGB for the terminal cell painter.
    pub fn to_rgb(self) -> Color {
        let h = f64::from(self.hue % 360) / 60.0;
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Color::Rgb(to_byte(r), to_byte(g), to_byte(b))
    }
}
