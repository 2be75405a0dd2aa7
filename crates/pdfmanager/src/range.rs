//! Page range specifications.
//!
//! A page range is what the user types into the split dialog:
//!
//! - `"5"` - a single page
//! - `"1-3"` - an inclusive range
//! - `"1-3,5"` - any comma-separated mix of both
//!
//! Page numbers are 1-based. Token order is preserved, since it decides the
//! order of pages in combined output and the order of files in per-range
//! output. Parsing only checks syntax; [`PageRange::validate`] checks the
//! tokens against a concrete document before anything is written.

use anyhow::{Context, bail};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{PdfManagerError, Result};

/// One comma-separated element of a page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageToken {
    /// A single page.
    Single(u32),
    /// An inclusive `start-end` range.
    Range(u32, u32),
}

impl PageToken {
    /// First page covered by the token.
    pub fn start(&self) -> u32 {
        match *self {
            Self::Single(page) => page,
            Self::Range(start, _) => start,
        }
    }

    /// Last page covered by the token.
    pub fn end(&self) -> u32 {
        match *self {
            Self::Single(page) => page,
            Self::Range(_, end) => end,
        }
    }

    /// Pages covered by the token, in ascending order.
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start()..=self.end()
    }

    /// Number of pages covered.
    pub fn len(&self) -> usize {
        (self.end() - self.start() + 1) as usize
    }

    /// Tokens always cover at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check `1 <= start <= end <= page_count`.
    pub fn check_bounds(&self, page_count: usize) -> Result<()> {
        let in_bounds = self.start() >= 1
            && self.start() <= self.end()
            && (self.end() as usize) <= page_count;

        if in_bounds {
            Ok(())
        } else {
            Err(PdfManagerError::PageOutOfRange {
                token: self.to_string(),
                page_count,
            })
        }
    }

    fn parse(part: &str) -> anyhow::Result<Self> {
        if part.is_empty() {
            bail!("empty entry (check for doubled or trailing commas)");
        }

        if let Some((start, end)) = part.split_once('-') {
            if end.contains('-') {
                bail!("'{part}' has more than one '-'. Expected format like '1-5'");
            }

            let start = parse_page_number(start)?;
            let end = parse_page_number(end)?;

            if start > end {
                bail!("range {start}-{end} starts after it ends");
            }

            Ok(Self::Range(start, end))
        } else {
            Ok(Self::Single(parse_page_number(part)?))
        }
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(page) => write!(f, "{page}"),
            Self::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

fn parse_page_number(text: &str) -> anyhow::Result<u32> {
    let text = text.trim();
    let page: u32 = text
        .parse()
        .with_context(|| format!("'{text}' is not a page number"))?;

    if page == 0 {
        bail!("page numbers start at 1");
    }

    Ok(page)
}

/// A parsed page range: an ordered list of [`PageToken`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    tokens: Vec<PageToken>,
}

impl PageRange {
    /// Parse a page range string.
    ///
    /// Whitespace around tokens and around the dash is ignored. Empty
    /// entries, non-numbers, zero, and reversed ranges are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfmanager::range::{PageRange, PageToken};
    ///
    /// let range = PageRange::parse("1-3, 5").unwrap();
    /// assert_eq!(range.tokens(), &[PageToken::Range(1, 3), PageToken::Single(5)]);
    /// assert_eq!(range.pages(), vec![1, 2, 3, 5]);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(PdfManagerError::invalid_page_range(
                s,
                "enter at least one page, e.g. 1-3,5",
            ));
        }

        let tokens = s
            .split(',')
            .map(|part| PageToken::parse(part.trim()))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|err| PdfManagerError::invalid_page_range(s.trim(), format!("{err:#}")))?;

        Ok(Self { tokens })
    }

    /// The tokens in the order they were entered.
    pub fn tokens(&self) -> &[PageToken] {
        &self.tokens
    }

    /// Check every token against a document's page count.
    ///
    /// Tokens are checked in order and the first failure is returned.
    pub fn validate(&self, page_count: usize) -> Result<()> {
        self.tokens
            .iter()
            .try_for_each(|token| token.check_bounds(page_count))
    }

    /// All pages, token by token, in entry order.
    ///
    /// Pages named by more than one token appear more than once.
    pub fn pages(&self) -> Vec<u32> {
        self.tokens.iter().flat_map(PageToken::pages).collect()
    }

    /// Tokens joined with `_`, for use in file names.
    pub fn file_label(&self) -> String {
        self.tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl FromStr for PageRange {
    type Err = PdfManagerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&text)
    }
}
