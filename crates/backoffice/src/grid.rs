//! Row collection plus column/action metadata handed to a presentation grid.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub title: &'static str,
}

impl Column {
    pub const fn new(field: &'static str, title: &'static str) -> Self {
        Self { field, title }
    }
}

/// A per-row action offered by a screen (e.g. edit, delete).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowAction {
    pub key: &'static str,
    pub label: &'static str,
}

impl RowAction {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// A row that can be rendered as cells aligned with its screen's columns.
pub trait GridRow {
    fn cells(&self) -> Vec<String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Pastel colour derived from a group key; equal keys get equal colours.
pub fn group_color(key: &str) -> Rgb {
    // FNV-1a, 32 bit.
    let hash = key.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    });
    let [a, b, c, _] = hash.to_le_bytes();
    Rgb {
        r: 128 | (a >> 1),
        g: 128 | (b >> 1),
        b: 128 | (c >> 1),
    }
}

#[derive(Debug)]
pub struct Grid<R> {
    pub columns: &'static [Column],
    pub actions: &'static [RowAction],
    pub rows: Vec<R>,
}

impl<R> Grid<R> {
    pub fn new(columns: &'static [Column], actions: &'static [RowAction]) -> Self {
        Self {
            columns,
            actions,
            rows: Vec::new(),
        }
    }

    pub fn replace(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One colour per row, grouping rows by `key`.
    pub fn group_colors<F>(&self, key: F) -> Vec<Rgb>
    where
        F: Fn(&R) -> &str,
    {
        self.rows.iter().map(|row| group_color(key(row))).collect()
    }
}

impl<R: GridRow> Grid<R> {
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.title).collect()
    }

    pub fn cell_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(GridRow::cells).collect()
    }
}
