use std::fmt::{Display, Formatter};

use comfy_table::Color;

/// Energy-efficiency label, ordered best to worst. The declaration order
/// drives the class column sort.
#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum EnergyClass {
    #[value(name = "A+++")]
    APlusPlusPlus,

    #[value(name = "A++")]
    APlusPlus,

    #[value(name = "A+")]
    APlus,

    #[value(name = "A")]
    A,

    #[value(name = "B")]
    B,

    #[value(name = "C")]
    C,

    #[value(name = "D")]
    D,

    #[value(name = "E")]
    E,

    #[value(name = "F")]
    F,

    #[value(name = "G")]
    G,
}

impl EnergyClass {
    /// The rank used for stored labels that do not parse: they sort after `G`.
    pub const UNKNOWN_RANK: usize = 10;

    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Lenient parse of a stored label; unknown labels are kept as-is by the
    /// caller and rank last.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim() {
            "A+++" => Some(Self::APlusPlusPlus),
            "A++" => Some(Self::APlusPlus),
            "A+" => Some(Self::APlus),
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "F" => Some(Self::F),
            "G" => Some(Self::G),
            _ => None,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::APlusPlusPlus | Self::APlusPlus | Self::APlus => Color::Green,
            Self::A => Color::DarkGreen,
            Self::B => Color::Yellow,
            Self::C | Self::D => Color::DarkYellow,
            Self::E | Self::F | Self::G => Color::Red,
        }
    }
}

impl Display for EnergyClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::APlusPlusPlus => write!(f, "A+++"),
            Self::APlusPlus => write!(f, "A++"),
            Self::APlus => write!(f, "A+"),
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
            Self::F => write!(f, "F"),
            Self::G => write!(f, "G"),
        }
    }
}
