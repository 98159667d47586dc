use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
    #[error("{name} must be a non-negative integer, got '{value}'")]
    NotANumber { name: &'static str, value: String },
}

/// Zero-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub size: NonZeroUsize,
}

impl PageRequest {
    pub fn new(index: usize, size: usize) -> Result<Self, PageError> {
        let size = NonZeroUsize::new(size).ok_or(PageError::ZeroPageSize)?;
        Ok(Self { index, size })
    }

    pub fn first(size: NonZeroUsize) -> Self {
        Self { index: 0, size }
    }

    /// Half-open row range `[index*size, (index+1)*size)` clamped to `total`.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let size = self.size.get();
        let start = self.index.saturating_mul(size).min(total);
        let end = self
            .index
            .saturating_add(1)
            .saturating_mul(size)
            .min(total);
        (start, end)
    }
}

pub fn page_count(total: usize, size: NonZeroUsize) -> usize {
    total.div_ceil(size.get())
}

/// One page of rows plus the counters a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0 && self.page_count > 0
    }
}

pub fn page_slice<T>(rows: &[T], request: PageRequest) -> &[T] {
    let (start, end) = request.bounds(rows.len());
    &rows[start..end]
}

pub fn paginate<T: Clone>(rows: &[T], request: PageRequest) -> Page<T> {
    Page {
        page_index: request.index,
        page_size: request.size.get(),
        page_count: page_count(rows.len(), request.size),
        total_rows: rows.len(),
        rows: page_slice(rows, request).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_and_counts_pages() {
        let rows: Vec<u32> = (1..=12).collect();
        let first = paginate(&rows, PageRequest::new(0, 5).unwrap());
        assert_eq!(first.rows, [1, 2, 3, 4, 5]);
        assert_eq!(first.page_count, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&rows, PageRequest::new(2, 5).unwrap());
        assert_eq!(last.rows, [11, 12]);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let rows: Vec<u32> = (1..=3).collect();
        assert!(page_slice(&rows, PageRequest::new(4, 2).unwrap()).is_empty());
        assert!(page_slice(&rows, PageRequest::new(usize::MAX, 2).unwrap()).is_empty());
        let beyond = paginate(&rows, PageRequest::new(usize::MAX, 2).unwrap());
        assert!(!beyond.has_next());
        assert!(beyond.has_previous());
        let empty: Vec<u32> = Vec::new();
        assert_eq!(paginate(&empty, PageRequest::new(0, 10).unwrap()).page_count, 0);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageRequest::new(0, 0), Err(PageError::ZeroPageSize));
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        let rows: Vec<u32> = (0..23).collect();
        for size in 1..=25 {
            let size = NonZeroUsize::new(size).unwrap();
            let pages = page_count(rows.len(), size);
            let rebuilt: Vec<u32> = (0..pages)
                .flat_map(|index| page_slice(&rows, PageRequest { index, size }).to_vec())
                .collect();
            assert_eq!(rebuilt, rows);
        }
    }
}
