//! Configuration types for PDF-to-Word conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The keyword lists that drive the
//! heuristics live in [`Vocabulary`] rather than in module-level literals, so
//! tests and callers with other document families can swap them out.

use crate::classify::HeaderMatcher;
use crate::error::Pdf2DocxError;
use crate::progress::ProgressCallback;
use crate::pipeline::extract::ExtractionStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Configuration for a PDF-to-Word conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2docx::{ConversionConfig, FooterScope};
///
/// let config = ConversionConfig::builder()
///     .footer_scope(FooterScope::AnyPage)
///     .password("secret")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Keyword lists driving header detection, company header, special
    /// lines and the footer disclaimer.
    pub vocabulary: Vocabulary,

    /// Fonts, sizes and spacing of the generated document.
    pub typography: Typography,

    /// Output page geometry. Default: A4 with narrow margins.
    pub layout: PageLayout,

    /// Table-extraction strategies, tried in order until one yields a table
    /// with more than one row. Default: [`ExtractionStrategy::fallback_chain`].
    pub strategies: Vec<ExtractionStrategy>,

    /// Which pages are searched for the footer trigger. Default: last page.
    pub footer_scope: FooterScope,

    /// Page selection. Default: All pages.
    pub pages: PageSelection,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Explicit path to the pdfium shared library. When `None`, the library
    /// is looked up next to the executable, in the working directory, then
    /// through the system loader.
    pub pdfium_library_path: Option<PathBuf>,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            typography: Typography::default(),
            layout: PageLayout::default(),
            strategies: ExtractionStrategy::fallback_chain(),
            footer_scope: FooterScope::default(),
            pages: PageSelection::default(),
            password: None,
            pdfium_library_path: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("vocabulary", &self.vocabulary)
            .field("typography", &self.typography)
            .field("layout", &self.layout)
            .field("strategies", &self.strategies)
            .field("footer_scope", &self.footer_scope)
            .field("pages", &self.pages)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pdfium_library_path", &self.pdfium_library_path)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.config.vocabulary = vocabulary;
        self
    }

    pub fn typography(mut self, typography: Typography) -> Self {
        self.config.typography = typography;
        self
    }

    pub fn layout(mut self, layout: PageLayout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn strategies(mut self, strategies: Vec<ExtractionStrategy>) -> Self {
        self.config.strategies = strategies;
        self
    }

    pub fn footer_scope(mut self, scope: FooterScope) -> Self {
        self.config.footer_scope = scope;
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2DocxError> {
        let c = &self.config;
        if c.strategies.is_empty() {
            return Err(Pdf2DocxError::InvalidConfig(
                "At least one table-extraction strategy is required".into(),
            ));
        }
        if c.typography.font_family.trim().is_empty() {
            return Err(Pdf2DocxError::InvalidConfig(
                "Font family must not be empty".into(),
            ));
        }
        if c.typography.cell_size_pt <= 0.0 || c.typography.dense_cell_size_pt <= 0.0 {
            return Err(Pdf2DocxError::InvalidConfig(format!(
                "Cell font sizes must be positive, got {} / {}",
                c.typography.cell_size_pt, c.typography.dense_cell_size_pt
            )));
        }
        if c.layout.margin_left + c.layout.margin_right >= c.layout.width
            || c.layout.margin_top + c.layout.margin_bottom >= c.layout.height
        {
            return Err(Pdf2DocxError::InvalidConfig(
                "Page margins leave no printable area".into(),
            ));
        }
        c.vocabulary.header_matcher()?;
        Ok(self.config)
    }
}

// ── Vocabulary ───────────────────────────────────────────────────────────

/// A trigger phrase whose first matching line on a page is emitted as its
/// own paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialLine {
    pub phrase: String,
    pub bold: bool,
    pub size_pt: f32,
}

impl SpecialLine {
    pub fn new(phrase: impl Into<String>, bold: bool, size_pt: f32) -> Self {
        Self {
            phrase: phrase.into(),
            bold,
            size_pt,
        }
    }
}

/// Keyword lists consumed by the classification and emission stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Case-insensitive substrings that mark a cell as a header/label.
    pub header_keywords: Vec<String>,
    /// Case-sensitive substrings identifying a company-name line.
    pub corporate_suffixes: Vec<String>,
    /// How many leading lines of the first page are searched for a company name.
    pub company_scan_lines: usize,
    /// Case-sensitive phrases emitted as standalone paragraphs, in order.
    pub special_lines: Vec<SpecialLine>,
    /// Case-insensitive phrase that triggers the footer disclaimer.
    pub footer_trigger: String,
    /// The disclaimer paragraph text.
    pub footer_text: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        Self {
            header_keywords: owned(&[
                "Employee",
                "Date",
                "Designation",
                "Location",
                "Bank",
                "PF",
                "ESI",
                "Earnings",
                "Deductions",
                "Amount",
                "Particulars",
                "Total",
                "Gross",
                "Net",
                "Income",
                "Tax",
                "Basic",
                "HRA",
                "Allowance",
                "Provident",
                "Monthly",
                "Year to Date",
                "Arrear",
                "Details",
                "Calculation",
                "Cumulative",
                "Projected",
                "Exempted",
                "Annual",
            ]),
            corporate_suffixes: owned(&["Limited", "Pvt", "Inc", "Corp", "LLC"]),
            company_scan_lines: 5,
            special_lines: vec![
                SpecialLine::new("Payslip for the month", true, 11.0),
                SpecialLine::new("Net Pay", true, 10.0),
            ],
            footer_trigger: "computer generated".to_string(),
            footer_text: "Note: This is a computer generated statement and does not require \
                          authentication."
                .to_string(),
        }
    }
}

impl Vocabulary {
    /// Compile [`Self::header_keywords`] into a matcher.
    pub fn header_matcher(&self) -> Result<HeaderMatcher, Pdf2DocxError> {
        HeaderMatcher::new(&self.header_keywords).map_err(|e| {
            Pdf2DocxError::InvalidConfig(format!("Header keywords do not compile: {e}"))
        })
    }
}

// ── Typography & layout ──────────────────────────────────────────────────

/// Fonts, sizes and spacing used for every generated element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Font family applied to every run. Default: Arial.
    pub font_family: String,
    /// Table cell size. Default: 9 pt.
    pub cell_size_pt: f32,
    /// Table cell size for wide tables. Default: 8 pt.
    pub dense_cell_size_pt: f32,
    /// Tables with more columns than this use `dense_cell_size_pt`. Default: 6.
    pub dense_table_columns: usize,
    /// Company header paragraph size. Default: 14 pt.
    pub company_header_size_pt: f32,
    /// Footer disclaimer size. Default: 8 pt.
    pub footer_size_pt: f32,
    /// Space before and after each cell paragraph. Default: 1 pt.
    pub cell_spacing_pt: f32,
    /// Space after the spacer paragraph following each table. Default: 6 pt.
    pub table_gap_pt: f32,
    /// Table border colour (hex RGB). Default: black.
    pub border_color: String,
    /// Table border width in eighths of a point. Default: 4.
    pub border_size: usize,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            cell_size_pt: 9.0,
            dense_cell_size_pt: 8.0,
            dense_table_columns: 6,
            company_header_size_pt: 14.0,
            footer_size_pt: 8.0,
            cell_spacing_pt: 1.0,
            table_gap_pt: 6.0,
            border_color: "000000".to_string(),
            border_size: 4,
        }
    }
}

/// Twips (1/20 pt) per inch.
pub const TWIPS_PER_INCH: f64 = 1440.0;

/// Twips per centimetre.
pub const TWIPS_PER_CM: f64 = TWIPS_PER_INCH / 2.54;

/// Output page size and margins, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub margin_right: u32,
}

fn inches(v: f64) -> u32 {
    (v * TWIPS_PER_INCH).round() as u32
}

fn cm(v: f64) -> u32 {
    (v * TWIPS_PER_CM).round() as u32
}

impl Default for PageLayout {
    /// A4 (8.27 × 11.69 in) with 1.0 cm top/bottom and 1.2 cm side margins.
    fn default() -> Self {
        Self {
            width: inches(8.27),
            height: inches(11.69),
            margin_top: cm(1.0),
            margin_bottom: cm(1.0),
            margin_left: cm(1.2),
            margin_right: cm(1.2),
        }
    }
}

impl PageLayout {
    /// Width between the side margins.
    pub fn content_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which pages are searched for [`Vocabulary::footer_trigger`].
///
/// Payslips put the "computer generated" note on their final page, so only
/// the last processed page is searched by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FooterScope {
    /// Only the last processed page. (default)
    #[default]
    LastPage,
    /// Any processed page.
    AnyPage,
}

/// Specifies which pages of the PDF to convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Convert all pages (default).
    #[default]
    All,
    /// Convert a single page (1-indexed).
    Single(usize),
    /// Convert a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Convert specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}
