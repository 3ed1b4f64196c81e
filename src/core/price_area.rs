use std::fmt::{Display, Formatter};

/// Norwegian electricity price area.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, clap::ValueEnum)]
pub enum PriceArea {
    /// Oslo.
    #[value(name = "NO1")]
    No1,

    /// Kristiansand.
    #[value(name = "NO2")]
    No2,

    /// Bergen.
    #[value(name = "NO3")]
    No3,

    /// Trondheim.
    #[value(name = "NO4")]
    No4,

    /// Tromsø.
    #[value(name = "NO5")]
    No5,
}

impl PriceArea {
    pub const fn code(self) -> &'static str {
        match self {
            Self::No1 => "NO1",
            Self::No2 => "NO2",
            Self::No3 => "NO3",
            Self::No4 => "NO4",
            Self::No5 => "NO5",
        }
    }
}

impl Display for PriceArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
