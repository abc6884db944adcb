//! DOM card markup
//!
//! Builds the card inside `#birthday-card` and re-renders it from a
//! [`CardView`]. Elements are only touched when the view changed.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::sim::CardInput;
use crate::view::{CandleLook, CardView};

/// Root element id the card is mounted into
pub const ROOT_ID: &str = "birthday-card";

const CANDLE_ICON: &str = "\u{1F382}";
const BALLOON_ICON: &str = "\u{1F388}";
const GIFT_ICON: &str = "\u{1F381}";

/// Callback receiving user actions from the card
pub type InputSink = Rc<dyn Fn(CardInput)>;

/// Handles to the card elements
pub struct CardDom {
    title: Element,
    recipient: Element,
    date: Element,
    candles: Vec<HtmlElement>,
    balloons: Vec<HtmlElement>,
    celebrate: HtmlButtonElement,
    progress: Element,
    last_view: Option<CardView>,
}

/// JSON config embedded in the root element, if any
pub fn read_config_attribute(document: &Document) -> Option<String> {
    document.get_element_by_id(ROOT_ID)?.get_attribute("data-config")
}

fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

fn create_html(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    create(document, tag, class)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

fn on_click(el: &Element, sink: &InputSink, input: CardInput) -> Result<(), JsValue> {
    let sink = sink.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
        sink(input);
    });
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// A titled row of clickable icons
fn mini_game(
    document: &Document,
    parent: &Element,
    heading: &str,
    icon: &str,
    class: &str,
    count: u32,
    sink: &InputSink,
    input: fn(u32) -> CardInput,
) -> Result<Vec<HtmlElement>, JsValue> {
    let section = create(document, "div", "mini-game")?;
    let h3 = create(document, "h3", "mini-game-heading")?;
    h3.set_text_content(Some(heading));
    section.append_child(&h3)?;

    let row = create(document, "div", "icon-row")?;
    let mut items = Vec::with_capacity(count as usize);
    for i in 0..count {
        let item = create_html(document, "button", class)?;
        item.set_text_content(Some(icon));
        item.set_attribute("aria-label", &format!("{} {}", class, i + 1))?;
        on_click(&item, sink, input(i))?;
        row.append_child(&item)?;
        items.push(item);
    }
    section.append_child(&row)?;
    parent.append_child(&section)?;
    Ok(items)
}

impl CardDom {
    /// Build the card markup and wire click handlers to `sink`
    pub fn mount(document: &Document, view: &CardView, sink: InputSink) -> Result<Self, JsValue> {
        let root = document
            .get_element_by_id(ROOT_ID)
            .ok_or_else(|| JsValue::from_str("missing #birthday-card element"))?;
        root.set_inner_html("");

        let header = create(document, "header", "card-header")?;
        let title = create(document, "h1", "card-title")?;
        let recipient = create(document, "h2", "card-recipient")?;
        let date = create(document, "p", "card-date")?;
        header.append_child(&title)?;
        header.append_child(&recipient)?;
        header.append_child(&date)?;
        root.append_child(&header)?;

        let content = create(document, "section", "card-content")?;
        let candles = mini_game(
            document,
            &content,
            "Light the Candles:",
            CANDLE_ICON,
            "candle",
            view.candles.len() as u32,
            &sink,
            CardInput::LightCandle,
        )?;
        let balloons = mini_game(
            document,
            &content,
            "Pop the Balloons:",
            BALLOON_ICON,
            "balloon",
            view.balloons.len() as u32,
            &sink,
            CardInput::PopBalloon,
        )?;
        let progress = create(document, "p", "card-progress")?;
        progress.set_attribute("aria-live", "polite")?;
        content.append_child(&progress)?;
        root.append_child(&content)?;

        let footer = create(document, "footer", "card-footer")?;
        let celebrate = create(document, "button", "celebrate-btn")?
            .dyn_into::<HtmlButtonElement>()
            .map_err(JsValue::from)?;
        celebrate.set_text_content(Some(&format!("Celebrate! {}", GIFT_ICON)));
        on_click(&celebrate, &sink, CardInput::Celebrate)?;
        footer.append_child(&celebrate)?;
        root.append_child(&footer)?;

        let mut dom = Self {
            title,
            recipient,
            date,
            candles,
            balloons,
            celebrate,
            progress,
            last_view: None,
        };
        dom.render(view)?;
        log::info!("Card mounted");
        Ok(dom)
    }

    /// Sync the DOM with `view`
    pub fn render(&mut self, view: &CardView) -> Result<(), JsValue> {
        if self.last_view.as_ref() == Some(view) {
            return Ok(());
        }

        self.title.set_text_content(Some(&view.title));
        self.recipient.set_text_content(Some(&view.recipient));
        self.date.set_text_content(Some(&view.date));

        for (el, candle) in self.candles.iter().zip(&view.candles) {
            let look = match candle.look {
                CandleLook::Unlit => "unlit",
                CandleLook::Igniting => "igniting",
                CandleLook::Lit => "lit",
            };
            el.set_class_name(&format!("candle {}", look));
            let style = el.style();
            match &candle.color {
                Some(color) => style.set_property("color", color)?,
                None => style.remove_property("color").map(|_| ())?,
            }
            style.set_property("animation-delay", &format!("{}s", candle.appear_delay))?;
        }

        for (el, balloon) in self.balloons.iter().zip(&view.balloons) {
            el.set_class_name(if balloon.popped { "balloon popped" } else { "balloon" });
            let style = el.style();
            style.set_property("color", &balloon.color)?;
            style.set_property("transform", &format!("scale({})", balloon.scale))?;
        }

        self.celebrate.set_disabled(!view.celebrate_enabled);
        self.progress.set_text_content(Some(&view.progress));

        self.last_view = Some(view.clone());
        Ok(())
    }
}
