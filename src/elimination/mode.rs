use std::fmt;
use std::str::FromStr;

/// Target form of a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Mode {
    /// Row echelon form, pivots left as found.
    Ref,
    /// Row echelon form with every pivot scaled to 1.
    RefNormalized,
    /// Reduced row echelon form (Gauss-Jordan).
    Rref,
}

impl Mode {
    pub fn normalizes(self) -> bool {
        matches!(self, Mode::RefNormalized | Mode::Rref)
    }

    pub fn clears_above(self) -> bool {
        self == Mode::Rref
    }

    /// Label of the last recorded step.
    pub fn result_name(self) -> &'static str {
        match self {
            Mode::Ref => "Row echelon form",
            Mode::RefNormalized => "Row echelon form (leading ones)",
            Mode::Rref => "Reduced row echelon form",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Ref => "ref",
            Mode::RefNormalized => "ref-leading-one",
            Mode::Rref => "rref",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ref" => Ok(Mode::Ref),
            "ref-leading-one" => Ok(Mode::RefNormalized),
            "rref" | "gauss-jordan" => Ok(Mode::Rref),
            other => Err(format!("Unknown reduction mode {other:?}")),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
