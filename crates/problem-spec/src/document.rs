//! Read-only structural queries over a parsed page.

use crate::error::{ExtractError, Result};
use scraper::{ElementRef, Html, Selector};

/// A parsed markup document.
///
/// Created once per page and borrowed by extractors for the duration of a
/// single extraction call. Nothing in this crate mutates it.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document. Malformed markup is repaired the way a
    /// browser would, so this never fails.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// First element matching `selector` in document order.
    pub fn find_one(&self, selector: &str) -> Result<ElementRef<'_>> {
        let sel = compile(selector)?;
        self.html
            .select(&sel)
            .next()
            .ok_or_else(|| ExtractError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    /// All elements matching `selector`, in document order. An empty result
    /// is not an error.
    pub fn find_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).collect())
    }

    /// First descendant of `scope` matching `selector`.
    pub fn find_one_in<'a>(
        &self,
        scope: ElementRef<'a>,
        selector: &str,
    ) -> Result<Option<ElementRef<'a>>> {
        let sel = compile(selector)?;
        Ok(scope.select(&sel).next())
    }

    /// Trimmed text content of an element.
    pub fn text(element: ElementRef<'_>) -> String {
        Self::raw_text(element).trim().to_string()
    }

    /// Text content of an element exactly as it appears in the markup.
    pub fn raw_text(element: ElementRef<'_>) -> String {
        element.text().collect()
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
