//! Required-character set: the sorted, deduplicated code points of a text.

/// Ascending, duplicate-free list of 16-bit code points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointSet {
    points: Vec<u16>,
}

impl CodePointSet {
    /// Collect the distinct code points of `text`.
    ///
    /// Characters outside the Basic Multilingual Plane cannot be indexed by
    /// a 16-bit code point; they are skipped with a warning.
    pub fn from_text(text: &str) -> Self {
        let mut skipped = 0usize;
        let points = text
            .chars()
            .filter_map(|ch| {
                let cp = u16::try_from(u32::from(ch)).ok();
                if cp.is_none() {
                    skipped += 1;
                    log::warn!("charset: U+{:X} is outside the BMP, skipping", u32::from(ch));
                }
                cp
            })
            .collect();
        if skipped > 0 {
            log::debug!("charset: skipped {skipped} non-BMP characters");
        }
        Self::from_code_points(points)
    }

    /// Sort and deduplicate raw code points.
    pub fn from_code_points(mut points: Vec<u16>) -> Self {
        points.sort_unstable();
        points.dedup();
        Self { points }
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, cp: u16) -> bool {
        self.points.binary_search(&cp).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.points.iter().copied()
    }
}

impl FromIterator<char> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let text: String = iter.into_iter().collect();
        Self::from_text(&text)
    }
}

#[cfg(test)]
mod tests;
