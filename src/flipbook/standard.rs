use crate::foundation::{
    core::{Fps, Size},
    error::{FlipbookError, FlipbookResult},
};

/// Analog TV system a disc is authored for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvSystem {
    #[default]
    Ntsc,
    Pal,
}

impl TvSystem {
    /// 30000/1001 for NTSC, 25 for PAL.
    pub fn fps(self) -> Fps {
        match self {
            Self::Ntsc => Fps {
                num: 30000,
                den: 1001,
            },
            Self::Pal => Fps { num: 25, den: 1 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ntsc => "ntsc",
            Self::Pal => "pal",
        }
    }
}

impl std::str::FromStr for TvSystem {
    type Err = FlipbookError;

    fn from_str(s: &str) -> FlipbookResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ntsc" => Ok(Self::Ntsc),
            "pal" => Ok(Self::Pal),
            _ => Err(FlipbookError::validation(format!(
                "unknown TV system '{s}' (expected ntsc or pal)"
            ))),
        }
    }
}

impl std::fmt::Display for TvSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Target disc video format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscFormat {
    #[default]
    Dvd,
    HalfDvd,
    Svcd,
    Vcd,
}

impl DiscFormat {
    pub const ALL: [DiscFormat; 4] = [
        DiscFormat::Dvd,
        DiscFormat::HalfDvd,
        DiscFormat::Svcd,
        DiscFormat::Vcd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dvd => "dvd",
            Self::HalfDvd => "half_dvd",
            Self::Svcd => "svcd",
            Self::Vcd => "vcd",
        }
    }
}

impl std::str::FromStr for DiscFormat {
    type Err = FlipbookError;

    fn from_str(s: &str) -> FlipbookResult<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|f| f.name() == norm)
            .ok_or_else(|| FlipbookError::validation(format!("unknown disc format '{s}'")))
    }
}

impl std::fmt::Display for DiscFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Disc format plus TV system: fixes frame size and rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct VideoStandard {
    pub format: DiscFormat,
    pub tv_system: TvSystem,
}

impl VideoStandard {
    pub fn new(format: DiscFormat, tv_system: TvSystem) -> Self {
        Self { format, tv_system }
    }

    /// Encoded frame size in pixels.
    pub fn size(self) -> Size {
        let pal = self.tv_system == TvSystem::Pal;
        let (width, height) = match self.format {
            DiscFormat::Dvd => (720, if pal { 576 } else { 480 }),
            DiscFormat::HalfDvd => (352, if pal { 576 } else { 480 }),
            DiscFormat::Svcd => (480, if pal { 576 } else { 480 }),
            DiscFormat::Vcd => (352, if pal { 288 } else { 240 }),
        };
        Size { width, height }
    }

    pub fn fps(self) -> Fps {
        self.tv_system.fps()
    }
}

impl std::fmt::Display for VideoStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.format, self.tv_system)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flipbook/standard.rs"]
mod tests;
