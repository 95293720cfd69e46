//! Response validation and field extraction

use crate::error::{CallError, WetpaintError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::cell::OnceCell;

const FAILURE: &str = "response failure";
const FAILURE_CAUSE: &str = "cause";
const FAILURE_MESSAGE: &str = "messages message";
const PAGE_PARAGRAPH: &str = "body > p";
const PAGE_ITEM: &str = "li";
pub(crate) const TICKET: &str = "response ticket";
pub(crate) const CELL_ID: &str = "response cell cellid";

/// A response body that carried no failure marker
#[derive(Debug)]
pub(crate) struct ValidatedResponse {
    /// Body exactly as received
    pub body: String,
    /// Lenient parse of the body
    pub document: Html,
}

/// Parser for service responses with cached selectors
///
/// Bodies are parsed with an HTML5 parser, which never rejects input. Tag
/// names are matched case-insensitively, so `cellId` in the payload matches
/// `cellid` in a selector. The HTML5 parser ignores the XML empty-element
/// slash, so `<status/>` is rewritten to `<status></status>` first; otherwise
/// the following siblings end up nested inside it.
#[derive(Clone, Debug)]
pub(crate) struct ResponseParser {
    empty_element_regex: OnceCell<Regex>,
    failure: OnceCell<Selector>,
    failure_cause: OnceCell<Selector>,
    failure_message: OnceCell<Selector>,
    page_paragraph: OnceCell<Selector>,
    page_item: OnceCell<Selector>,
    ticket: OnceCell<Selector>,
    cell_id: OnceCell<Selector>,
}

impl ResponseParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self {
            empty_element_regex: OnceCell::new(),
            failure: OnceCell::new(),
            failure_cause: OnceCell::new(),
            failure_message: OnceCell::new(),
            page_paragraph: OnceCell::new(),
            page_item: OnceCell::new(),
            ticket: OnceCell::new(),
            cell_id: OnceCell::new(),
        }
    }

    /// Get or compile the empty-element tag regex
    fn empty_element_regex(&self) -> &Regex {
        self.empty_element_regex.get_or_init(|| {
            Regex::new(r"<([A-Za-z][A-Za-z0-9_:.\-]*)(\s[^<>]*?)?\s*/>").unwrap()
        })
    }

    /// Expand XML empty-element tags into explicit start/end pairs
    fn expand_empty_elements<'b>(&self, body: &'b str) -> Cow<'b, str> {
        self.empty_element_regex()
            .replace_all(body, "<${1}${2}></${1}>")
    }

    fn selector<'a>(cell: &'a OnceCell<Selector>, css: &str) -> &'a Selector {
        cell.get_or_init(|| Selector::parse(css).unwrap())
    }

    /// Check a raw body for a failure payload
    ///
    /// The structured `response/failure` envelope is checked first, then a
    /// top-level `<p>` of an HTML error page. A body matching neither shape
    /// is accepted, even when it is empty or not markup at all.
    pub fn validate(&self, body: String) -> Result<ValidatedResponse, CallError> {
        let document = Html::parse_document(&self.expand_empty_elements(&body));

        if let Some(err) = self.failure_envelope(&document) {
            return Err(err);
        }
        if let Some(err) = self.error_page(&document) {
            return Err(err);
        }

        Ok(ValidatedResponse { body, document })
    }

    fn failure_envelope(&self, document: &Html) -> Option<CallError> {
        let failures: Vec<ElementRef<'_>> = document
            .select(Self::selector(&self.failure, FAILURE))
            .collect();
        if failures.is_empty() {
            return None;
        }

        let cause_selector = Self::selector(&self.failure_cause, FAILURE_CAUSE);
        let message_selector = Self::selector(&self.failure_message, FAILURE_MESSAGE);

        let cause = failures
            .iter()
            .flat_map(|failure| failure.select(cause_selector))
            .map(inner_text)
            .collect::<String>();
        let messages = failures
            .iter()
            .flat_map(|failure| failure.select(message_selector))
            .map(inner_text)
            .collect();

        Some(CallError::new(cause, messages))
    }

    fn error_page(&self, document: &Html) -> Option<CallError> {
        let paragraphs: Vec<ElementRef<'_>> = document
            .select(Self::selector(&self.page_paragraph, PAGE_PARAGRAPH))
            .collect();
        if paragraphs.is_empty() {
            return None;
        }

        let cause = paragraphs.into_iter().map(inner_text).collect::<String>();
        let messages = document
            .select(Self::selector(&self.page_item, PAGE_ITEM))
            .map(inner_text)
            .collect();

        Some(CallError::new(cause, messages))
    }

    /// Extract the session ticket from a login response
    pub fn extract_ticket(&self, document: &Html) -> Result<String, WetpaintError> {
        self.extract_field(document, Self::selector(&self.ticket, TICKET), TICKET)
    }

    /// Extract the new cell id from a create-cell response
    pub fn extract_cell_id(&self, document: &Html) -> Result<String, WetpaintError> {
        self.extract_field(document, Self::selector(&self.cell_id, CELL_ID), CELL_ID)
    }

    fn extract_field(
        &self,
        document: &Html,
        selector: &Selector,
        name: &'static str,
    ) -> Result<String, WetpaintError> {
        document
            .select(selector)
            .next()
            .map(inner_text)
            .filter(|text| !text.is_empty())
            .ok_or(WetpaintError::MissingField { selector: name })
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

fn inner_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
