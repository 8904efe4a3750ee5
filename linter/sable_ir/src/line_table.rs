//! Line offset table for line/column lookups.
//!
//! Pre-computes the byte offset of each line start for O(log L) lookups.
//! Lines are 1-based; columns are 0-based character counts from the line
//! start, so a line's leading-whitespace width and its first token's column
//! are the same number.

/// Pre-computed line offset table.
///
/// Built once per file, O(n) construction for O(log L) lookups where L is
/// the number of lines.
#[derive(Clone, Debug, Default)]
pub struct LineTable {
    /// Byte offset of each line start.
    /// offsets[0] = 0 (line 1 starts at byte 0)
    /// offsets[1] = byte after first \n (line 2 start)
    offsets: Vec<u32>,
}

impl LineTable {
    /// Build a line table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineTable { offsets }
    }

    /// Get the 1-based line number containing a byte offset.
    #[inline]
    pub fn line_of(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        (line_idx as u32) + 1
    }

    /// Get 1-based line and 0-based character column for a byte offset.
    pub fn line_col_of(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_of(offset);
        let line_start = self.offsets[(line - 1) as usize] as usize;
        let offset = (offset as usize).min(source.len());
        let col = u32::try_from(source[line_start..offset].chars().count()).unwrap_or(u32::MAX);
        (line, col)
    }

    /// Get the byte offset of a line start (1-based line number).
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Translate a (1-based line, 0-based character column) position to a
    /// byte offset.
    ///
    /// Returns `None` when the line is out of range or the column lies past
    /// the end of the line.
    pub fn offset_of(&self, source: &str, line: u32, col: u32) -> Option<u32> {
        let start = self.line_start_offset(line)? as usize;
        let mut remaining = col;
        for (i, ch) in source[start..].char_indices() {
            if remaining == 0 {
                return Some((start + i) as u32);
            }
            if ch == '\n' {
                return None;
            }
            remaining -= 1;
        }
        if remaining == 0 {
            Some(source.len() as u32)
        } else {
            None
        }
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
