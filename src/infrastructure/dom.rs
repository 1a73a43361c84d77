use crate::application::ports::{EquitySource, TextTarget};
use crate::domain::{
    errors::{AppResult, UiError},
    logging::LogComponent,
};
use crate::log_debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement};

pub fn document() -> Result<Document, UiError> {
    web_sys::window()
        .ok_or_else(|| UiError::BrowserApi("window not available".to_string()))?
        .document()
        .ok_or_else(|| UiError::BrowserApi("document not available".to_string()))
}

pub fn element_by_id(id: &str) -> Result<Element, UiError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| UiError::ElementNotFound(id.to_string()))
}

pub fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, UiError> {
    element_by_id(id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| UiError::ElementNotFound(format!("{} (not a canvas)", id)))
}

/// Equity records embedded as a data attribute on an element
pub struct DataAttributeSource {
    element: Element,
    attribute: String,
}

impl DataAttributeSource {
    pub fn new(element: Element, attribute: impl Into<String>) -> Self {
        Self { element, attribute: attribute.into() }
    }
}

impl EquitySource for DataAttributeSource {
    fn read_series_json(&self) -> AppResult<String> {
        let raw = self.element.get_attribute(&self.attribute).ok_or_else(|| {
            UiError::MissingAttribute {
                element: self.element.id(),
                attribute: self.attribute.clone(),
            }
        })?;
        log_debug!(
            LogComponent::Infrastructure("DataAttributeSource"),
            "Read {} bytes from {}#{}",
            raw.len(),
            self.attribute,
            self.element.id()
        );
        Ok(raw)
    }
}

/// Writes plain text into an element, replacing its children
pub struct ElementTextTarget {
    element: Element,
}

impl ElementTextTarget {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn by_id(id: &str) -> Result<Self, UiError> {
        element_by_id(id).map(Self::new)
    }
}

impl TextTarget for ElementTextTarget {
    fn write_text(&mut self, text: &str) -> AppResult<()> {
        self.element.set_text_content(Some(text));
        Ok(())
    }
}
