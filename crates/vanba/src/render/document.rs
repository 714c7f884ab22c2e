use serde::Serialize;
use std::collections::BTreeMap;

use crate::palm::{PalmAnalysis, PalmImage};
use crate::render::markup;
use crate::render::projection::ResultsViewModel;
use crate::render::view::{ElementId, View};

/// Content and visibility of one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub hidden: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// In-memory document: records every element update a page host would apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    elements: BTreeMap<ElementId, ElementState>,
    alerts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scrolled_to: Option<ElementId>,
}

impl Default for DocumentView {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentView {
    /// Results section and loader start hidden.
    pub fn new() -> Self {
        let mut doc = Self {
            elements: BTreeMap::new(),
            alerts: Vec::new(),
            scrolled_to: None,
        };
        doc.element_mut(ElementId::ResultsSection).hidden = true;
        doc.element_mut(ElementId::Loader).hidden = true;
        doc
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(|e| e.text.as_deref())
    }

    pub fn html(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(|e| e.html.as_deref())
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).map(|e| !e.hidden).unwrap_or(true)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn scrolled_to(&self) -> Option<ElementId> {
        self.scrolled_to
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn element_mut(&mut self, id: ElementId) -> &mut ElementState {
        self.elements.entry(id).or_default()
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        let el = self.element_mut(id);
        el.text = Some(text.to_string());
        el.html = None;
    }

    fn set_html(&mut self, id: ElementId, html: String) {
        let el = self.element_mut(id);
        el.html = Some(html);
        el.text = None;
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: String) {
        self.element_mut(id).attributes.insert(name.to_string(), value);
    }
}

impl View for DocumentView {
    fn show_results(&mut self, results: &ResultsViewModel) {
        self.element_mut(ElementId::ResultsSection).hidden = false;
        self.set_text(ElementId::Rashi, &results.rashi);
        self.set_text(ElementId::Ascendant, &results.ascendant);
        self.set_text(ElementId::Nakshatra, &results.nakshatra);
        self.set_html(ElementId::PlanetDetails, markup::planet_rows_html(&results.planets));
        self.set_html(ElementId::HouseDetails, markup::house_cells_html(&results.houses));
    }

    fn show_palm_image(&mut self, image: &PalmImage) {
        self.set_attribute(ElementId::PalmCanvas, "width", image.width.to_string());
        self.set_attribute(ElementId::PalmCanvas, "height", image.height.to_string());
        self.set_attribute(ElementId::PalmCanvas, "data-url", image.data_url.clone());
    }

    fn show_palm_analysis(&mut self, analysis: &PalmAnalysis) {
        self.set_html(ElementId::PalmResults, markup::palm_analysis_html(analysis));
        self.scrolled_to = Some(ElementId::PalmResults);
    }

    fn set_loading(&mut self, loading: bool, message: Option<&str>) {
        self.element_mut(ElementId::Loader).hidden = !loading;
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            self.set_text(ElementId::Loader, message);
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
