use super::types::Stage;

/// Color family a stage is emphasized with on cards, badges and progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Orange,
    Blue,
    Purple,
    Green,
}

impl Emphasis {
    /// Accent color used by the pod visualization.
    pub fn accent_rgb(self) -> (u8, u8, u8) {
        match self {
            Emphasis::Orange => (0xfe, 0xa5, 0x5f),
            Emphasis::Blue => (0x60, 0xa5, 0xfa),
            Emphasis::Purple => (0xc0, 0x84, 0xfc),
            Emphasis::Green => (0x4a, 0xde, 0x80),
        }
    }
}

/// Presentation attributes of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDescriptor {
    pub label: &'static str,
    pub emphasis: Emphasis,
    /// Terminal stages render a total-weight summary instead of a progress bar.
    pub is_terminal: bool,
}

pub fn resolve(stage: Stage) -> StatusDescriptor {
    match stage {
        Stage::Fermenting => StatusDescriptor {
            label: "Fermenting",
            emphasis: Emphasis::Orange,
            is_terminal: false,
        },
        Stage::Drying => StatusDescriptor {
            label: "Drying",
            emphasis: Emphasis::Blue,
            is_terminal: false,
        },
        Stage::Sorting => StatusDescriptor {
            label: "Sorting",
            emphasis: Emphasis::Purple,
            is_terminal: false,
        },
        Stage::Ready => StatusDescriptor {
            label: "Ready for Sale",
            emphasis: Emphasis::Green,
            is_terminal: true,
        },
    }
}
