use serde::{Deserialize, Serialize};

/// Header line announcing the stockpile block.
pub const STOCKPILE_HEADER: &str = "Stockpiles: (date, priority, stockpile1, stockpile2, stockpile3, stockpile4, stockpile5, stockpile6, stockpile7, stockpile8, stockpile9, stockpile10)";

/// Header line announcing the blend block. The TAB characters are part of
/// the contract.
pub const BLEND_HEADER: &str = "Blend: (date, Priority,\tCoal1, Coal2, Coal3, Coal4,\tCoal5, Coal6, Coal7, Coal8,\tCoal9, Coal10)";

/// Header line announcing the coal movement block.
pub const MOVEMENT_HEADER: &str =
    "CoalMovements (Coal, Daily mining (repeat until sequence for different coals mined))";

/// Line that closes a repeating block.
pub const SENTINEL: &str = "END";

/// Input line that stands for a SQL NULL.
pub const NULL_TOKEN: &str = "NULL";

/// Input sections, in the order they appear in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Stockpile,
    Blend,
    Movements,
}

impl Section {
    pub const ORDER: [Section; 3] = [Section::Stockpile, Section::Blend, Section::Movements];

    pub fn header(self) -> &'static str {
        match self {
            Section::Stockpile => STOCKPILE_HEADER,
            Section::Blend => BLEND_HEADER,
            Section::Movements => MOVEMENT_HEADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Stockpile => "stockpile",
            Section::Blend => "blend",
            Section::Movements => "movements",
        }
    }

    /// Exact, character-for-character header comparison.
    pub fn matches(self, line: &str) -> bool {
        line == self.header()
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Literal shape of an `INSERT` statement for one table.
///
/// The downstream loader was written against hand-typed statements, so the
/// spacing around the table name, `VALUES` and each value is fixed per
/// table rather than normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    /// Text between the table name and the column list.
    pub name_gap: &'static str,
    /// Text between `VALUES` and the value list.
    pub values_gap: &'static str,
    /// Separators placed before the 2nd, 3rd, ... value; the last one repeats.
    pub separators: &'static [&'static str],
}

impl TableLayout {
    pub fn expected_values(&self) -> usize {
        self.columns.len()
    }

    /// Separator written before the value at `index` (1-based position > 0).
    pub fn separator_before(&self, index: usize) -> &'static str {
        let last = self.separators.len().saturating_sub(1);
        let slot = index.saturating_sub(1).min(last);
        self.separators.get(slot).copied().unwrap_or(",")
    }

    /// Everything up to and including the opening parenthesis of the values.
    pub fn prefix(&self) -> String {
        format!(
            "INSERT INTO {}{}({}) VALUES{}(",
            self.name,
            self.name_gap,
            self.columns.join(", "),
            self.values_gap
        )
    }
}

pub const STOCKPILE_TABLE: TableLayout = TableLayout {
    name: "Stockpile",
    columns: &[
        "date",
        "priority",
        "stockpile1",
        "stockpile2",
        "stockpile3",
        "stockpile4",
        "stockpile5",
        "stockpile6",
        "stockpile7",
        "stockpile8",
        "stockpile9",
        "stockpile10",
    ],
    name_gap: " ",
    values_gap: " ",
    separators: &[", ", ","],
};

pub const BLEND_TABLE: TableLayout = TableLayout {
    name: "Blend",
    columns: &[
        "date", "Priority", "Coal1", "Coal2", "Coal3", "Coal4", "Coal5", "Coal6", "Coal7",
        "Coal8", "Coal9", "Coal10",
    ],
    name_gap: "",
    values_gap: " ",
    separators: &[","],
};

pub const COAL_MOVEMENT_TABLE: TableLayout = TableLayout {
    name: "CoalMovement",
    columns: &["Coal", "Truck", "DateTimeArrival"],
    name_gap: "",
    values_gap: "",
    separators: &[",", ", "],
};
