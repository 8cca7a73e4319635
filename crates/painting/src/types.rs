use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ColorParseError, PartParseError};

/// An 8-bit straight-alpha RGBA color.
///
/// Serialized as a CSS-style hex string (`#rrggbb`, or `#rrggbbaa` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(transparent)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    /// Opaque color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    #[inline]
    pub fn r(self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub fn a(self) -> u8 {
        self.0[3]
    }

    /// A fully transparent pixel carries no paint, whatever its color channels say.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.0[3] == 0
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(ColorParseError::InvalidDigit(hex.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidDigit(hex.to_string()))
        };

        match digits.len() {
            3 => {
                let mut out = [0u8; 4];
                for (i, c) in digits.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    out[i] = v * 17;
                }
                out[3] = 255;
                Ok(Self(out))
            }
            6 | 8 => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                let a = if digits.len() == 8 {
                    channel(&digits[6..8])?
                } else {
                    255
                };
                Ok(Self([r, g, b, a]))
            }
            len => Err(ColorParseError::InvalidLength(len)),
        }
    }

    /// Hex form; alpha is only written when the color is not opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.0;
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Source-over composite of `src` onto `self`.
    pub fn blend(self, src: Rgba) -> Rgba {
        let sa = src.a() as u32;
        if sa == 255 {
            return src;
        }
        if sa == 0 {
            return self;
        }

        let da = self.a() as u32;
        // out_a = sa + da * (1 - sa), all in 0..=255 fixed point
        let out_a = sa + da * (255 - sa) / 255;
        if out_a == 0 {
            return Rgba::TRANSPARENT;
        }

        let mix = |s: u8, d: u8| -> u8 {
            let s = s as u32 * sa;
            let d = d as u32 * da * (255 - sa) / 255;
            ((s + d) / out_a).min(255) as u8
        };

        Rgba([
            mix(src.r(), self.r()),
            mix(src.g(), self.g()),
            mix(src.b(), self.b()),
            out_a as u8,
        ])
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(color: Rgba) -> Self {
        image::Rgba(color.0)
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Rgba(pixel.0)
    }
}

/// The six box-shaped body parts of the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartId {
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl PartId {
    pub const ALL: [PartId; 6] = [
        PartId::Head,
        PartId::Body,
        PartId::LeftArm,
        PartId::RightArm,
        PartId::LeftLeg,
        PartId::RightLeg,
    ];

    /// Stable identifier, also used as the color-store key.
    pub fn name(self) -> &'static str {
        match self {
            PartId::Head => "head",
            PartId::Body => "body",
            PartId::LeftArm => "left-arm",
            PartId::RightArm => "right-arm",
            PartId::LeftLeg => "left-leg",
            PartId::RightLeg => "right-leg",
        }
    }

    /// Arms and legs share one small canvas between several faces and need face provenance.
    pub fn is_limb(self) -> bool {
        matches!(
            self,
            PartId::LeftArm | PartId::RightArm | PartId::LeftLeg | PartId::RightLeg
        )
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartId {
    type Err = PartParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartId::ALL
            .into_iter()
            .find(|part| part.name() == s)
            .ok_or_else(|| PartParseError(s.to_string()))
    }
}

/// Axis-aligned cube face, identified by the sign of the dominant world normal axis.
///
/// The discriminants are the face indices used throughout the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CubeFace {
    Right = 0,
    Left = 1,
    Top = 2,
    Bottom = 3,
    Front = 4,
    Back = 5,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Top,
        CubeFace::Bottom,
        CubeFace::Front,
        CubeFace::Back,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        CubeFace::ALL.get(index as usize).copied()
    }
}

/// A cell position inside a part's logical grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection with a `width` x `height` surface rooted at the origin
    pub fn clip(&self, width: u32, height: u32) -> Rect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Rect {
            x,
            y,
            w: self.right().min(width) - x,
            h: self.bottom().min(height) - y,
        }
    }
}
