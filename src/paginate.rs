//! Grouping wrapped lines into pages of bounded line count.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::PageGeometry;
use crate::style::HandwritingStyle;
use crate::wrap::Line;

/// One page of wrapped lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Page {
    /// Lines in reading order.
    pub lines: Vec<Line>,
    /// 1-based page number.
    pub page_number: usize,
}

impl Page {
    pub fn new(page_number: usize, lines: Vec<Line>) -> Self {
        Self { lines, page_number }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Page text with lines joined by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.as_str().len() + 1).sum());
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(line.as_str());
        }
        out
    }
}

/// Splits an ordered line sequence into pages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paginator {
    usable_height: f32,
}

impl Paginator {
    pub fn new(usable_height: f32) -> Self {
        Self { usable_height }
    }

    /// Paginate to the usable height of `geometry`.
    pub fn for_geometry(geometry: &PageGeometry) -> Self {
        Self::new(geometry.usable_height())
    }

    pub fn usable_height(&self) -> f32 {
        self.usable_height
    }

    /// Lines that fit on one page for `style`.
    ///
    /// Never less than 1: a line taller than the page still gets a page.
    pub fn max_lines_per_page(&self, style: &HandwritingStyle) -> usize {
        let fit = (self.usable_height / style.line_height()).floor();
        if fit.is_finite() && fit >= 1.0 {
            return fit as usize;
        }
        log::warn!(
            "line height {} does not fit usable height {}; placing one line per page",
            style.line_height(),
            self.usable_height
        );
        1
    }

    /// Group `lines` into pages numbered from 1.
    pub fn paginate<I>(&self, lines: I, style: &HandwritingStyle) -> Vec<Page>
    where
        I: IntoIterator<Item = Line>,
    {
        let mut pages = Vec::with_capacity(0);
        self.paginate_with(lines, style, |page| pages.push(page));
        pages
    }

    /// Group `lines` into pages and stream each completed page.
    pub fn paginate_with<I, F>(&self, lines: I, style: &HandwritingStyle, mut on_page: F)
    where
        I: IntoIterator<Item = Line>,
        F: FnMut(Page),
    {
        let max_lines = self.max_lines_per_page(style);
        let mut page_number = 1usize;
        let mut current: Vec<Line> = Vec::with_capacity(0);

        for line in lines {
            if current.len() >= max_lines {
                log::trace!("page {} closed with {} lines", page_number, current.len());
                on_page(Page::new(page_number, core::mem::take(&mut current)));
                page_number += 1;
            }
            current.push(line);
        }

        if !current.is_empty() {
            log::trace!("page {} closed with {} lines", page_number, current.len());
            on_page(Page::new(page_number, current));
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::for_geometry(&PageGeometry::A4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_lines(count: usize) -> Vec<Line> {
        (0..count).map(|i| Line::new(format!("line {i}"))).collect()
    }

    #[test]
    fn max_lines_follows_line_height() {
        let paginator = Paginator::default();
        let style = HandwritingStyle::default();
        assert_eq!(paginator.max_lines_per_page(&style), 22);
    }

    #[test]
    fn twenty_lines_fit_on_one_a4_page() {
        let pages = Paginator::default().paginate(numbered_lines(20), &HandwritingStyle::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].line_count(), 20);
    }

    #[test]
    fn no_lines_means_no_pages() {
        let pages = Paginator::default().paginate(Vec::new(), &HandwritingStyle::default());
        assert!(pages.is_empty());
    }

    #[test]
    fn full_pages_flush_before_next_line() {
        let paginator = Paginator::new(100.0);
        let style = HandwritingStyle::default(); // 30 per line -> 3 lines per page
        let pages = paginator.paginate(numbered_lines(7), &style);
        let sizes: Vec<usize> = pages.iter().map(Page::line_count).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        let numbers: Vec<usize> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn exact_multiple_leaves_no_empty_trailing_page() {
        let paginator = Paginator::new(90.0);
        let pages = paginator.paginate(numbered_lines(6), &HandwritingStyle::default());
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.line_count() == 3));
    }

    #[test]
    fn line_taller_than_page_gets_one_line_per_page() {
        let paginator = Paginator::new(20.0);
        let style = HandwritingStyle::default();
        assert_eq!(paginator.max_lines_per_page(&style), 1);
        let pages = paginator.paginate(numbered_lines(3), &style);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].lines, vec![Line::from("line 2")]);
    }

    #[test]
    fn zero_line_height_still_terminates() {
        let paginator = Paginator::default();
        let style = HandwritingStyle {
            line_spacing: 0.0,
            ..HandwritingStyle::default()
        };
        assert_eq!(paginator.max_lines_per_page(&style), 1);
    }

    #[test]
    fn page_text_joins_lines() {
        let page = Page::new(1, vec![Line::from("first"), Line::from("second")]);
        assert_eq!(page.text(), "first\nsecond");
    }
}
