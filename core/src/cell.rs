use serde::{Deserialize, Serialize};

/// True content of a cell, fixed when the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(u8),
    Bomb,
}

impl CellValue {
    pub const fn from_adjacent(count: u8) -> Self {
        match count {
            0 => Self::Empty,
            n => Self::Number(n),
        }
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayValue {
    Hidden,
    Empty,
    Number(u8),
    Bomb,
    Flag,
}

impl DisplayValue {
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Empty => '.',
            Self::Number(n) => (b'0' + n) as char,
            Self::Bomb => '*',
            Self::Flag => 'F',
        }
    }
}

impl From<CellValue> for DisplayValue {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => Self::Empty,
            CellValue::Number(n) => Self::Number(n),
            CellValue::Bomb => Self::Bomb,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub is_open: bool,
    pub is_flagged: bool,
}

impl Cell {
    pub const fn closed(value: CellValue) -> Self {
        Self {
            value,
            is_open: false,
            is_flagged: false,
        }
    }

    /// The flag overlays the true value; it never replaces it.
    pub fn display_value(&self) -> DisplayValue {
        if self.is_flagged {
            DisplayValue::Flag
        } else if self.is_open {
            self.value.into()
        } else {
            DisplayValue::Hidden
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::closed(CellValue::Empty)
    }
}
