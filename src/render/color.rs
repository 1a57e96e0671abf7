//! Colour strings as picked by the operator.

/// An opaque 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `#rgb`, or one of a few CSS names.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        match s.to_ascii_lowercase().as_str() {
            "red" => Some(Rgb::RED),
            "green" => Some(Rgb::new(0, 128, 0)),
            "lime" => Some(Rgb::new(0, 255, 0)),
            "blue" => Some(Rgb::new(0, 0, 255)),
            "yellow" => Some(Rgb::new(255, 255, 0)),
            "white" => Some(Rgb::new(255, 255, 255)),
            "black" => Some(Rgb::new(0, 0, 0)),
            _ => None,
        }
    }

    /// Like [`parse`](Self::parse), but anything unreadable draws red.
    pub fn parse_or_red(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("unrecognised colour '{s}', drawing in red");
            Rgb::RED
        })
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some(Rgb::new(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}
