//! Logical page identity.

use std::fmt;

/// Kind of payload a page carries.
///
/// The discriminant doubles as the kind byte in the on-disk page header, so
/// the numeric values are part of the file format.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Ordered rows of a table.
    Table = 1,
    /// One dense block of a matrix.
    Matrix = 2,
}

impl PageKind {
    /// Decode the on-disk kind byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(PageKind::Table),
            2 => Some(PageKind::Matrix),
            _ => None,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::Table => write!(f, "table"),
            PageKind::Matrix => write!(f, "matrix"),
        }
    }
}

/// Identifies one page of a table or one block of a matrix.
///
/// Tables and matrices are separate namespaces: a table page and a matrix
/// block are never the same identity, even when the table and the matrix
/// share a name.
///
/// # File naming
/// [`PageKey::file_name`] derives the backing file name, and every disk
/// path (read, write, delete) goes through it:
///
/// ```text
/// <table>_Page<index>
/// <matrix>_Page<rowBlock>_<colBlock>
/// ```
///
/// # Example
/// ```
/// use gridbase::PageKey;
///
/// let key = PageKey::matrix("grid", 1, 2);
/// assert_eq!(key.file_name(), "grid_Page1_2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    /// One page of a row-oriented table.
    Table {
        /// Name of the owning table.
        table: String,
        /// Zero-based page position within the table.
        index: usize,
    },
    /// One block of a dense matrix, addressed by block row and block column.
    Matrix {
        /// Name of the owning matrix.
        matrix: String,
        /// Zero-based block row.
        row_block: usize,
        /// Zero-based block column.
        col_block: usize,
    },
}

impl PageKey {
    /// Key for one page of a table.
    pub fn table(table: impl Into<String>, index: usize) -> Self {
        PageKey::Table {
            table: table.into(),
            index,
        }
    }

    /// Key for one block of a matrix.
    pub fn matrix(matrix: impl Into<String>, row_block: usize, col_block: usize) -> Self {
        PageKey::Matrix {
            matrix: matrix.into(),
            row_block,
            col_block,
        }
    }

    /// Kind of page this key names.
    pub fn kind(&self) -> PageKind {
        match self {
            PageKey::Table { .. } => PageKind::Table,
            PageKey::Matrix { .. } => PageKind::Matrix,
        }
    }

    /// Name of the owning table or matrix.
    pub fn entity_name(&self) -> &str {
        match self {
            PageKey::Table { table, .. } => table,
            PageKey::Matrix { matrix, .. } => matrix,
        }
    }

    /// Backing file name, relative to the data directory.
    pub fn file_name(&self) -> String {
        match self {
            PageKey::Table { table, index } => format!("{}_Page{}", table, index),
            PageKey::Matrix {
                matrix,
                row_block,
                col_block,
            } => format!("{}_Page{}_{}", matrix, row_block, col_block),
        }
    }

    /// Whether this key names a block of the matrix called `name`.
    ///
    /// Table pages never match, even when the table shares the name.
    pub fn belongs_to_matrix(&self, name: &str) -> bool {
        matches!(self, PageKey::Matrix { matrix, .. } if matrix == name)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}
