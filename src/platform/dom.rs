//! DOM side of the deck
//!
//! Reads the deck layout from the page once and applies `DeckView`s by
//! toggling classes and transforms. Expected markup:
//!
//! ```html
//! <h1 id="section-title"></h1>
//! <div id="nav-dots"></div>
//! <section class="section" data-title="About">
//!   <div class="card">...</div>
//! </section>
//! ```

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::nav::{DeckLayout, SectionLayout};
use crate::view::{CardClass, DeckView, ViewRenderer};

const SECTION_SELECTOR: &str = ".section";
const CARD_SELECTOR: &str = ".card";

fn elements(root: &impl AsRef<Element>, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = root.as_ref().query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn document_sections(document: &Document) -> Result<Vec<HtmlElement>, JsValue> {
    let list = document.query_selector_all(SECTION_SELECTOR)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Section titles and card counts, in document order
pub fn read_layout(document: &Document) -> Result<DeckLayout, JsValue> {
    let mut sections = Vec::new();
    for section in document_sections(document)? {
        let title = section.get_attribute("data-title").unwrap_or_default();
        let cards = elements(&section, CARD_SELECTOR)?.len();
        sections.push(SectionLayout::new(title, cards));
    }
    Ok(DeckLayout::new(sections))
}

struct SectionNodes {
    root: HtmlElement,
    cards: Vec<Element>,
}

/// Applies deck views to the live page
pub struct DomRenderer {
    sections: Vec<SectionNodes>,
    title: Option<Element>,
    dots: Vec<Element>,
}

impl DomRenderer {
    /// Look up the section nodes and create one position dot per section
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let mut sections = Vec::new();
        for root in document_sections(document)? {
            let cards = elements(&root, CARD_SELECTOR)?;
            sections.push(SectionNodes { root, cards });
        }

        let title = document.get_element_by_id("section-title");
        if title.is_none() {
            log::warn!("#section-title not found; titles will not be shown");
        }

        let mut dots = Vec::with_capacity(sections.len());
        match document.get_element_by_id("nav-dots") {
            Some(container) => {
                for _ in &sections {
                    let dot = document.create_element("div")?;
                    dot.class_list().add_1("nav-dot")?;
                    container.append_child(&dot)?;
                    dots.push(dot);
                }
            }
            None => log::warn!("#nav-dots not found; position dots disabled"),
        }

        Ok(Self {
            sections,
            title,
            dots,
        })
    }

    fn apply(&self, view: &DeckView) -> Result<(), JsValue> {
        for (nodes, section) in self.sections.iter().zip(&view.sections) {
            nodes
                .root
                .class_list()
                .toggle_with_force("active", section.active)?;
            nodes
                .root
                .style()
                .set_property("transform", &section.transform())?;

            for (card, class) in nodes.cards.iter().zip(&section.cards) {
                let list = card.class_list();
                for other in CardClass::ALL {
                    list.remove_1(other.as_str())?;
                }
                list.add_1(class.as_str())?;
            }
        }

        if let (Some(el), Some(title)) = (&self.title, &view.title) {
            el.set_text_content(Some(title));
        }

        for (i, dot) in self.dots.iter().enumerate() {
            dot.class_list()
                .toggle_with_force("active", i == view.active_dot)?;
        }
        Ok(())
    }
}

impl ViewRenderer for DomRenderer {
    fn render(&mut self, view: &DeckView) {
        if let Err(e) = self.apply(view) {
            log::warn!("Deck render failed: {:?}", e);
        }
    }
}
