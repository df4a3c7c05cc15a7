//! Page header definitions.
//!
//! Every page file starts with a fixed [`PageHeader`] containing metadata:
//! - magic bytes and format version
//! - [`PageKind`] discriminator
//! - CRC32 checksum for integrity
//! - entry count (rows for a table page, cells for a matrix block)

use thiserror::Error;

use crate::common::PageKind;

/// Why a page header failed to decode.
///
/// Carries no file name; the caller adds that context when turning this
/// into a crate-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Fewer bytes than a full header.
    #[error("truncated header")]
    Truncated,
    /// The magic bytes are not `GBPG`.
    #[error("bad magic bytes")]
    BadMagic,
    /// The version byte names a format this build does not know.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),
    /// The kind byte is not a known [`PageKind`].
    #[error("unknown page kind {0}")]
    UnknownKind(u8),
}

/// Metadata stored at the beginning of every page file.
///
/// # Layout (14 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     magic (`GBPG`)
/// 4       1     format version
/// 5       1     kind (PageKind as u8)
/// 6       4     checksum (CRC32, little-endian)
/// 10      4     entry_count (little-endian)
/// ```
///
/// # Checksum
/// The checksum is computed over the entire encoded page with the checksum
/// field itself set to zero. This allows verification without special
/// handling.
///
/// # Entry count
/// Number of payload entries after the header: rows for a table page,
/// cells for a matrix block. The decoder uses it to walk the body and to
/// reject files with missing or trailing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    /// Kind of payload the page carries.
    pub kind: PageKind,
    /// CRC32 checksum of the encoded page.
    pub checksum: u32,
    /// Number of payload entries.
    pub entry_count: u32,
}

impl PageHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = 14;

    /// Magic bytes at the start of every page file.
    pub const MAGIC: [u8; 4] = *b"GBPG";

    /// Current file format version.
    pub const VERSION: u8 = 1;

    /// Offset of each field within the header.
    pub const OFFSET_MAGIC: usize = 0;
    pub const OFFSET_VERSION: usize = 4;
    pub const OFFSET_KIND: usize = 5;
    pub const OFFSET_CHECKSUM: usize = 6;
    pub const OFFSET_ENTRY_COUNT: usize = 10;

    /// Create a new header with the given kind and entry count.
    ///
    /// The checksum is initialized to zero; the encoder patches it in after
    /// the full page is laid out.
    pub fn new(kind: PageKind, entry_count: u32) -> Self {
        Self {
            kind,
            checksum: 0,
            entry_count,
        }
    }

    /// Read a header from the beginning of an encoded page.
    ///
    /// Checks structure only (length, magic, version, kind byte); checksum
    /// verification is a separate step via [`PageHeader::verify_checksum`]
    /// because it needs the full page.
    pub fn read_from(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < Self::SIZE {
            return Err(HeaderError::Truncated);
        }

        if data[Self::OFFSET_MAGIC..Self::OFFSET_MAGIC + 4] != Self::MAGIC {
            return Err(HeaderError::BadMagic);
        }

        let version = data[Self::OFFSET_VERSION];
        if version != Self::VERSION {
            return Err(HeaderError::UnsupportedVersion(version));
        }

        let kind_byte = data[Self::OFFSET_KIND];
        let kind = PageKind::from_u8(kind_byte).ok_or(HeaderError::UnknownKind(kind_byte))?;

        let checksum = u32::from_le_bytes([
            data[Self::OFFSET_CHECKSUM],
            data[Self::OFFSET_CHECKSUM + 1],
            data[Self::OFFSET_CHECKSUM + 2],
            data[Self::OFFSET_CHECKSUM + 3],
        ]);

        let entry_count = u32::from_le_bytes([
            data[Self::OFFSET_ENTRY_COUNT],
            data[Self::OFFSET_ENTRY_COUNT + 1],
            data[Self::OFFSET_ENTRY_COUNT + 2],
            data[Self::OFFSET_ENTRY_COUNT + 3],
        ]);

        Ok(Self {
            kind,
            checksum,
            entry_count,
        })
    }

    /// Write this header to the beginning of a byte slice.
    ///
    /// # Panics
    /// Panics if `data.len() < PageHeader::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(data.len() >= Self::SIZE, "buffer too small for PageHeader");

        data[Self::OFFSET_MAGIC..Self::OFFSET_MAGIC + 4].copy_from_slice(&Self::MAGIC);
        data[Self::OFFSET_VERSION] = Self::VERSION;
        data[Self::OFFSET_KIND] = self.kind as u8;

        let checksum_bytes = self.checksum.to_le_bytes();
        data[Self::OFFSET_CHECKSUM..Self::OFFSET_CHECKSUM + 4].copy_from_slice(&checksum_bytes);

        let count_bytes = self.entry_count.to_le_bytes();
        data[Self::OFFSET_ENTRY_COUNT..Self::OFFSET_ENTRY_COUNT + 4].copy_from_slice(&count_bytes);
    }

    /// Compute the CRC32 checksum of an encoded page.
    ///
    /// The checksum is computed with the checksum field (bytes 6-9) zeroed
    /// out, so the checksum doesn't include itself.
    ///
    /// # Panics
    /// Panics if `page_data.len() < PageHeader::SIZE`.
    pub fn compute_checksum(page_data: &[u8]) -> u32 {
        assert!(
            page_data.len() >= Self::SIZE,
            "buffer too small for PageHeader"
        );

        let mut hasher = crc32fast::Hasher::new();

        // Hash bytes before the checksum field (magic, version, kind).
        hasher.update(&page_data[..Self::OFFSET_CHECKSUM]);

        // Skip the checksum field by feeding zeros instead.
        hasher.update(&[0u8; 4]);

        // Hash bytes after the checksum field (entry count and body).
        hasher.update(&page_data[Self::OFFSET_CHECKSUM + 4..]);

        hasher.finalize()
    }

    /// Verify that the stored checksum matches the computed checksum.
    pub fn verify_checksum(&self, page_data: &[u8]) -> bool {
        self.checksum == Self::compute_checksum(page_data)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_header(kind: PageKind, entry_count: u32) -> Vec<u8> {
        let mut buffer = vec![0u8; PageHeader::SIZE];
        PageHeader::new(kind, entry_count).write_to(&mut buffer);
        buffer
    }

    #[test]
    fn test_header_new() {
        let header = PageHeader::new(PageKind::Table, 7);
        assert_eq!(header.kind, PageKind::Table);
        assert_eq!(header.checksum, 0);
        assert_eq!(header.entry_count, 7);
    }

    #[test]
    fn test_header_roundtrip() {
        let original = PageHeader {
            kind: PageKind::Matrix,
            checksum: 0xDEADBEEF,
            entry_count: 0x12345678,
        };

        let mut buffer = [0u8; PageHeader::SIZE];
        original.write_to(&mut buffer);

        let recovered = PageHeader::read_from(&buffer).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_header_byte_layout() {
        let header = PageHeader {
            kind: PageKind::Table,
            checksum: 0x04030201,    // Little-endian: 01 02 03 04
            entry_count: 0x08070605, // Little-endian: 05 06 07 08
        };

        let mut buffer = [0u8; PageHeader::SIZE];
        header.write_to(&mut buffer);

        // Verify exact byte layout
        assert_eq!(&buffer[0..4], b"GBPG");
        assert_eq!(buffer[4], 1); // format version
        assert_eq!(buffer[5], 1); // PageKind::Table
        assert_eq!(buffer[6], 0x01); // checksum byte 0 (LSB)
        assert_eq!(buffer[9], 0x04); // checksum byte 3 (MSB)
        assert_eq!(buffer[10], 0x05); // entry_count byte 0 (LSB)
        assert_eq!(buffer[13], 0x08); // entry_count byte 3 (MSB)
    }

    #[test]
    fn test_read_rejects_truncation() {
        let buffer = encoded_header(PageKind::Table, 1);
        assert_eq!(
            PageHeader::read_from(&buffer[..PageHeader::SIZE - 1]),
            Err(HeaderError::Truncated)
        );
        assert_eq!(PageHeader::read_from(&[]), Err(HeaderError::Truncated));
    }

    #[test]
    fn test_read_rejects_bad_magic() {
        let mut buffer = encoded_header(PageKind::Table, 1);
        buffer[0] = b'X';
        assert_eq!(
            PageHeader::read_from(&buffer),
            Err(HeaderError::BadMagic)
        );
    }

    #[test]
    fn test_read_rejects_unknown_version() {
        let mut buffer = encoded_header(PageKind::Table, 1);
        buffer[PageHeader::OFFSET_VERSION] = 9;
        assert_eq!(
            PageHeader::read_from(&buffer),
            Err(HeaderError::UnsupportedVersion(9))
        );
    }

    #[test]
    fn test_read_rejects_unknown_kind() {
        let mut buffer = encoded_header(PageKind::Table, 1);
        buffer[PageHeader::OFFSET_KIND] = 0;
        assert_eq!(
            PageHeader::read_from(&buffer),
            Err(HeaderError::UnknownKind(0))
        );
    }

    // --- Checksum tests ---

    #[test]
    fn test_checksum_deterministic() {
        let mut page_data = vec![0u8; 256];
        page_data[20] = 0xAB;
        page_data[200] = 0xCD;

        let checksum1 = PageHeader::compute_checksum(&page_data);
        let checksum2 = PageHeader::compute_checksum(&page_data);

        assert_eq!(checksum1, checksum2);
        assert_ne!(checksum1, 0);
    }

    #[test]
    fn test_checksum_changes_with_data() {
        let mut page1 = vec![0u8; 256];
        let mut page2 = vec![0u8; 256];

        page1[100] = 0xFF;
        page2[100] = 0xFE;

        assert_ne!(
            PageHeader::compute_checksum(&page1),
            PageHeader::compute_checksum(&page2)
        );
    }

    #[test]
    fn test_checksum_ignores_checksum_field() {
        let mut page_data = vec![0u8; 256];
        page_data[100] = 0xAB;

        let checksum1 = PageHeader::compute_checksum(&page_data);

        // Write a different value in the checksum field (bytes 6-9)
        page_data[6] = 0xFF;
        page_data[7] = 0xFF;
        page_data[8] = 0xFF;
        page_data[9] = 0xFF;

        let checksum2 = PageHeader::compute_checksum(&page_data);

        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_checksum_verify() {
        let mut page_data = vec![0u8; 256];
        page_data[100] = 0xAB;

        let checksum = PageHeader::compute_checksum(&page_data);
        let header = PageHeader {
            kind: PageKind::Table,
            checksum,
            entry_count: 0,
        };

        assert!(header.verify_checksum(&page_data));

        // Corrupt the page
        page_data[100] = 0xFF;
        assert!(!header.verify_checksum(&page_data));
    }
}
