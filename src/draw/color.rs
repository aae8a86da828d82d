use crate::{
    animation::tween::Lerp,
    foundation::error::{FlipbookError, FlipbookResult},
};

/// Straight-alpha RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// HSL to RGB, hue in degrees (wrapped), saturation and lightness in `[0, 1]`.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        Self::from_hsla(h, s, l, 1.0)
    }

    pub fn from_hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgba(l, l, l, a);
        }

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        Self::rgba(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
            a,
        )
    }

    /// Same color with alpha multiplied by `factor`.
    pub fn with_alpha_mul(self, factor: f64) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Straight-alpha RGBA8, components clamped.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Parse a CSS-style color specification.
    ///
    /// Accepts named colors, `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb()`, `rgba()`, `hsl()` and
    /// `hsla()`.
    pub fn parse(spec: &str) -> FlipbookResult<Self> {
        let s = spec.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(FlipbookError::color_parse("empty color specification"));
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map_err(|e| FlipbookError::color_parse(format!("'{spec}': {e}")));
        }
        if let Some((name, args)) = split_function(&s) {
            return parse_function(name, args)
                .map_err(|e| FlipbookError::color_parse(format!("'{spec}': {e}")));
        }
        named(&s).ok_or_else(|| FlipbookError::color_parse(format!("unknown color '{spec}'")))
    }
}

impl std::str::FromStr for Color {
    type Err = FlipbookError;

    fn from_str(s: &str) -> FlipbookResult<Self> {
        Self::parse(s)
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

/// Anything a style setter accepts as a color.
pub trait IntoColor {
    fn into_color(self) -> FlipbookResult<Color>;
}

impl IntoColor for Color {
    fn into_color(self) -> FlipbookResult<Color> {
        Ok(self)
    }
}

impl IntoColor for &str {
    fn into_color(self) -> FlipbookResult<Color> {
        Color::parse(self)
    }
}

impl IntoColor for String {
    fn into_color(self) -> FlipbookResult<Color> {
        Color::parse(&self)
    }
}

impl IntoColor for &String {
    fn into_color(self) -> FlipbookResult<Color> {
        Color::parse(self)
    }
}

impl IntoColor for (f64, f64, f64) {
    fn into_color(self) -> FlipbookResult<Color> {
        (self.0, self.1, self.2, 1.0).into_color()
    }
}

impl IntoColor for (f64, f64, f64, f64) {
    fn into_color(self) -> FlipbookResult<Color> {
        let (r, g, b, a) = self;
        for c in [r, g, b, a] {
            if !(0.0..=1.0).contains(&c) {
                return Err(FlipbookError::color_parse(format!(
                    "component {c} of ({r}, {g}, {b}, {a}) is outside [0, 1]"
                )));
            }
        }
        Ok(Color::rgba(r, g, b, a))
    }
}

impl IntoColor for [f64; 3] {
    fn into_color(self) -> FlipbookResult<Color> {
        (self[0], self[1], self[2]).into_color()
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }

    let bytes = s.as_bytes();
    let channel = |i: usize| -> Result<u8, String> { Ok(nibble(bytes[i])? * 16 + nibble(bytes[i + 1])?) };
    let short = |i: usize| -> Result<u8, String> { Ok(nibble(bytes[i])? * 17) };

    let (r, g, b, a) = match bytes.len() {
        3 => (short(0)?, short(1)?, short(2)?, 255),
        6 => (channel(0)?, channel(2)?, channel(4)?, 255),
        8 => (channel(0)?, channel(2)?, channel(4)?, channel(6)?),
        _ => return Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    };
    Ok(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn split_function(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s.strip_suffix(')')?;
    Some((s[..open].trim(), &inner[open + 1..]))
}

fn parse_function(name: &str, args: &str) -> Result<Color, String> {
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let alpha = |idx: usize| -> Result<f64, String> {
        match parts.get(idx) {
            None => Ok(1.0),
            Some(p) => Ok(number_or_percent(p, 1.0)?.clamp(0.0, 1.0)),
        }
    };

    match (name, parts.len()) {
        ("rgb" | "rgba", 3 | 4) => {
            let c = |i: usize| number_or_percent(parts[i], 255.0).map(|v| (v / 255.0).clamp(0.0, 1.0));
            Ok(Color::rgba(c(0)?, c(1)?, c(2)?, alpha(3)?))
        }
        ("hsl" | "hsla", 3 | 4) => {
            let h = parts[0]
                .strip_suffix("deg")
                .unwrap_or(parts[0])
                .parse::<f64>()
                .map_err(|_| format!("invalid hue '{}'", parts[0]))?;
            let s = percent(parts[1])?;
            let l = percent(parts[2])?;
            Ok(Color::from_hsla(h, s, l, alpha(3)?))
        }
        ("rgb" | "rgba" | "hsl" | "hsla", n) => Err(format!("{name}() takes 3 or 4 arguments, got {n}")),
        _ => Err(format!("unknown color function '{name}'")),
    }
}

/// `"50%"` -> `0.5 * full`, `"128"` -> `128`.
fn number_or_percent(p: &str, full: f64) -> Result<f64, String> {
    if let Some(pct) = p.strip_suffix('%') {
        let v = pct
            .parse::<f64>()
            .map_err(|_| format!("invalid percentage '{p}'"))?;
        return Ok(v / 100.0 * full);
    }
    p.parse::<f64>().map_err(|_| format!("invalid number '{p}'"))
}

fn percent(p: &str) -> Result<f64, String> {
    let pct = p
        .strip_suffix('%')
        .ok_or_else(|| format!("expected percentage, got '{p}'"))?;
    pct.parse::<f64>()
        .map(|v| v / 100.0)
        .map_err(|_| format!("invalid percentage '{p}'"))
}

fn named(name: &str) -> Option<Color> {
    let rgb = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "lime" => (0, 255, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "gold" => (255, 215, 0),
        "violet" => (238, 130, 238),
        "indigo" => (75, 0, 130),
        "darkblue" => (0, 0, 139),
        "darkred" => (139, 0, 0),
        "darkgreen" => (0, 100, 0),
        "lightblue" => (173, 216, 230),
        "skyblue" => (135, 206, 235),
        "steelblue" => (70, 130, 180),
        "royalblue" => (65, 105, 225),
        "midnightblue" => (25, 25, 112),
        "slategray" | "slategrey" => (112, 128, 144),
        "crimson" => (220, 20, 60),
        "coral" => (255, 127, 80),
        "salmon" => (250, 128, 114),
        "tomato" => (255, 99, 71),
        "khaki" => (240, 230, 140),
        "beige" => (245, 245, 220),
        "ivory" => (255, 255, 240),
        "wheat" => (245, 222, 179),
        "tan" => (210, 180, 140),
        "chocolate" => (210, 105, 30),
        "orchid" => (218, 112, 214),
        "plum" => (221, 160, 221),
        "turquoise" => (64, 224, 208),
        "lavender" => (230, 230, 250),
        "transparent" => return Some(Color::TRANSPARENT),
        _ => return None,
    };
    Some(Color::from_rgb8(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
#[path = "../../tests/unit/draw/color.rs"]
mod tests;
