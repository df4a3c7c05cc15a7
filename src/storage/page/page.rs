//! Page - one block of table rows or matrix cells.
//!
//! A [`Page`] couples a [`PageKey`] with the decoded payload of its backing
//! file, and owns the byte codec for that file.

use crate::common::{Error, PageKey, PageKind, Result};

use super::page_header::PageHeader;

/// One row of a table page.
pub type Row = Vec<i64>;

/// Payload of a page, by kind.
///
/// Rows of a table page may have different lengths; a matrix block is a
/// flat run of cells whose shape the caller tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageData {
    /// Ordered rows of a table page.
    Table { rows: Vec<Row> },
    /// Cells of one matrix block.
    Matrix { cells: Vec<i64> },
}

/// In-memory image of one on-disk block.
///
/// `Page` is `Clone` on purpose: the buffer manager hands out owned copies,
/// so holders may mutate theirs freely without changing what the pool
/// returns next.
///
/// # On-disk encoding
/// A [`PageHeader`] followed by the body, all integers little-endian:
/// - table page: per row, a `u32` cell count then that many `i64` cells
/// - matrix block: `entry_count` `i64` cells
///
/// # Example
/// ```
/// use gridbase::Page;
///
/// let page = Page::table("orders", 0, vec![vec![1, 2], vec![3]]);
/// assert_eq!(page.row_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    key: PageKey,
    data: PageData,
}

impl Page {
    /// Create a table page from its rows.
    pub fn table(table: impl Into<String>, index: usize, rows: Vec<Row>) -> Self {
        Self {
            key: PageKey::table(table, index),
            data: PageData::Table { rows },
        }
    }

    /// Create a matrix block from its cells.
    pub fn matrix(
        matrix: impl Into<String>,
        row_block: usize,
        col_block: usize,
        cells: Vec<i64>,
    ) -> Self {
        Self {
            key: PageKey::matrix(matrix, row_block, col_block),
            data: PageData::Matrix { cells },
        }
    }

    /// Logical identity of this page.
    #[inline]
    pub fn key(&self) -> &PageKey {
        &self.key
    }

    /// Kind of payload this page carries.
    #[inline]
    pub fn kind(&self) -> PageKind {
        self.key.kind()
    }

    /// Payload of this page.
    #[inline]
    pub fn data(&self) -> &PageData {
        &self.data
    }

    /// Rows, if this is a table page.
    pub fn rows(&self) -> Option<&[Row]> {
        match &self.data {
            PageData::Table { rows } => Some(rows),
            PageData::Matrix { .. } => None,
        }
    }

    /// Mutable rows, if this is a table page.
    pub fn rows_mut(&mut self) -> Option<&mut Vec<Row>> {
        match &mut self.data {
            PageData::Table { rows } => Some(rows),
            PageData::Matrix { .. } => None,
        }
    }

    /// Cells, if this is a matrix block.
    pub fn cells(&self) -> Option<&[i64]> {
        match &self.data {
            PageData::Table { .. } => None,
            PageData::Matrix { cells } => Some(cells),
        }
    }

    /// Mutable cells, if this is a matrix block.
    pub fn cells_mut(&mut self) -> Option<&mut Vec<i64>> {
        match &mut self.data {
            PageData::Table { .. } => None,
            PageData::Matrix { cells } => Some(cells),
        }
    }

    /// Number of rows on a table page; 0 for a matrix block.
    pub fn row_count(&self) -> usize {
        match &self.data {
            PageData::Table { rows } => rows.len(),
            PageData::Matrix { .. } => 0,
        }
    }

    /// Number of payload entries as stored in the header: rows for a table
    /// page, cells for a matrix block.
    fn entry_count(&self) -> usize {
        match &self.data {
            PageData::Table { rows } => rows.len(),
            PageData::Matrix { cells } => cells.len(),
        }
    }

    /// Encode this page into the backing-file byte format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; PageHeader::SIZE];

        match &self.data {
            PageData::Table { rows } => {
                for row in rows {
                    buffer.extend_from_slice(&(row.len() as u32).to_le_bytes());
                    for cell in row {
                        buffer.extend_from_slice(&cell.to_le_bytes());
                    }
                }
            }
            PageData::Matrix { cells } => {
                for cell in cells {
                    buffer.extend_from_slice(&cell.to_le_bytes());
                }
            }
        }

        let header = PageHeader::new(self.kind(), self.entry_count() as u32);
        header.write_to(&mut buffer);

        // Patch the checksum in after the full page is laid out.
        let checksum = PageHeader::compute_checksum(&buffer);
        buffer[PageHeader::OFFSET_CHECKSUM..PageHeader::OFFSET_CHECKSUM + 4]
            .copy_from_slice(&checksum.to_le_bytes());

        buffer
    }

    /// Decode a page read from the backing file for `key`.
    ///
    /// # Errors
    /// [`Error::CorruptPage`] if the bytes are malformed in any way: bad
    /// header, checksum mismatch, a kind byte that disagrees with `key`,
    /// or a body with missing or trailing bytes.
    pub fn from_bytes(key: PageKey, bytes: &[u8]) -> Result<Self> {
        let header =
            PageHeader::read_from(bytes).map_err(|e| corrupt(&key, e.to_string()))?;

        if !header.verify_checksum(bytes) {
            return Err(corrupt(&key, "checksum mismatch"));
        }

        if header.kind != key.kind() {
            return Err(corrupt(
                &key,
                format!("file holds a {} page, expected {}", header.kind, key.kind()),
            ));
        }

        let mut body = &bytes[PageHeader::SIZE..];

        // Counts are untrusted until the walk below finds their bytes; cap
        // each reservation by what the remaining body could hold.
        let data = match header.kind {
            PageKind::Table => {
                let mut rows =
                    Vec::with_capacity((header.entry_count as usize).min(body.len() / 4));
                for _ in 0..header.entry_count {
                    let cell_count = read_u32(&mut body)
                        .ok_or_else(|| corrupt(&key, "truncated row header"))?;
                    let mut row = Vec::with_capacity((cell_count as usize).min(body.len() / 8));
                    for _ in 0..cell_count {
                        row.push(
                            read_i64(&mut body).ok_or_else(|| corrupt(&key, "truncated row"))?,
                        );
                    }
                    rows.push(row);
                }
                PageData::Table { rows }
            }
            PageKind::Matrix => {
                let mut cells =
                    Vec::with_capacity((header.entry_count as usize).min(body.len() / 8));
                for _ in 0..header.entry_count {
                    cells.push(
                        read_i64(&mut body).ok_or_else(|| corrupt(&key, "truncated cells"))?,
                    );
                }
                PageData::Matrix { cells }
            }
        };

        if !body.is_empty() {
            return Err(corrupt(&key, "trailing bytes after payload"));
        }

        Ok(Self { key, data })
    }
}

/// Build the corrupt-page error for `key`.
fn corrupt(key: &PageKey, reason: impl Into<String>) -> Error {
    Error::CorruptPage {
        file: key.file_name(),
        reason: reason.into(),
    }
}

/// Read a little-endian u32 from the front of `input`, advancing it.
fn read_u32(input: &mut &[u8]) -> Option<u32> {
    if input.len() < 4 {
        return None;
    }
    let value = u32::from_le_bytes([input[0], input[1], input[2], input[3]]);
    *input = &input[4..];
    Some(value)
}

/// Read a little-endian i64 from the front of `input`, advancing it.
fn read_i64(input: &mut &[u8]) -> Option<i64> {
    if input.len() < 8 {
        return None;
    }
    let value = i64::from_le_bytes([
        input[0], input[1], input[2], input[3], input[4], input[5], input[6], input[7],
    ]);
    *input = &input[8..];
    Some(value)
}

// ============================================================================
// TESTS
// ============================================================================
