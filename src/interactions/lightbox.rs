use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, HtmlMediaElement, HtmlSourceElement, KeyboardEvent};

use crate::dom;
use crate::error::SetupError;

#[derive(Debug, Clone, PartialEq)]
pub struct LightboxClip {
    pub src: String,
    pub title: String,
    pub category: String,
}

impl LightboxClip {
    /// A clip needs a video source, title and category default to empty.
    pub fn from_parts(
        src: Option<String>,
        title: Option<String>,
        category: Option<String>,
    ) -> Option<Self> {
        let src = src.filter(|src| !src.is_empty())?;
        let clean = |text: Option<String>| text.map(|t| t.trim().to_string()).unwrap_or_default();
        Some(Self {
            src,
            title: clean(title),
            category: clean(category),
        })
    }

    fn from_item(item: &Element) -> Option<Self> {
        let src = item
            .query_selector("source")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlSourceElement>().ok())
            .map(|source| source.src());
        Self::from_parts(src, text_of(item, "h4"), text_of(item, "span"))
    }

    pub fn caption_parts(&self) -> [(&'static str, &str); 2] {
        [("h3", self.title.as_str()), ("p", self.category.as_str())]
    }
}

fn text_of(item: &Element, selector: &str) -> Option<String> {
    item.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
}

/// What a single open or close does to the modal and its video.
#[derive(Debug, Clone, PartialEq)]
pub enum LightboxChange {
    Open { clip: LightboxClip },
    Close { rewind_to: f64 },
}

impl LightboxChange {
    pub fn close() -> Self {
        LightboxChange::Close { rewind_to: 0.0 }
    }

    pub fn active_after(&self) -> bool {
        matches!(self, LightboxChange::Open { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloseTrigger<'a> {
    CloseControl,
    Click { on_backdrop: bool },
    Key(&'a str),
}

impl CloseTrigger<'_> {
    pub fn closes(&self, active: bool) -> bool {
        match self {
            CloseTrigger::CloseControl => true,
            // Clicks on the video or caption bubble up, only the backdrop itself counts
            CloseTrigger::Click { on_backdrop } => *on_backdrop,
            CloseTrigger::Key(key) => active && *key == "Escape",
        }
    }
}

struct Lightbox {
    document: Document,
    root: Element,
    video: HtmlMediaElement,
    caption: Element,
}

impl Lightbox {
    fn is_active(&self) -> bool {
        dom::has_class(&self.root, "active")
    }

    fn set_caption(&self, clip: &LightboxClip) {
        self.caption.set_inner_html("");
        for (tag, text) in clip.caption_parts() {
            if let Ok(el) = self.document.create_element(tag) {
                el.set_text_content(Some(text));
                let _ = self.caption.append_child(&el);
            }
        }
    }

    fn apply(&self, change: &LightboxChange) {
        match change {
            LightboxChange::Open { clip } => {
                self.video.set_src(&clip.src);
                self.set_caption(clip);
                dom::add_class(&self.root, "active");
                debug!("Lightbox opened: {}", clip.title);

                if let Ok(promise) = self.video.play() {
                    spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            warn!("Lightbox video did not start: {:?}", e);
                        }
                    });
                }
            }
            LightboxChange::Close { rewind_to } => {
                dom::remove_class(&self.root, "active");
                let _ = self.video.pause();
                self.video.set_current_time(*rewind_to);
                debug!("Lightbox closed");
            }
        }
    }

    fn close_on(&self, trigger: CloseTrigger) {
        if trigger.closes(self.is_active()) {
            self.apply(&LightboxChange::close());
        }
    }
}

pub fn wire(document: &Document) -> Result<(), SetupError> {
    let video = dom::by_id(document, "lightbox-video")?
        .dyn_into::<HtmlMediaElement>()
        .map_err(|_| SetupError::UnexpectedElement("lightbox-video"))?;
    let lightbox = Rc::new(Lightbox {
        document: document.clone(),
        root: dom::by_id(document, "lightbox")?,
        video,
        caption: dom::query(document, ".lightbox-caption")?,
    });

    let play_buttons = dom::query_all(document, ".play-btn")?;
    for button in &play_buttons {
        let lightbox = lightbox.clone();
        let button_el = button.clone();
        dom::listen(button, "click", move |event| {
            event.stop_propagation();
            let Some(item) = button_el.closest(".portfolio-item").ok().flatten() else {
                return;
            };
            match LightboxClip::from_item(&item) {
                Some(clip) => lightbox.apply(&LightboxChange::Open { clip }),
                None => warn!("Portfolio item has no video source"),
            }
        })?;
    }

    if let Some(close_button) = dom::query_optional(document, ".close-lightbox") {
        let lightbox = lightbox.clone();
        dom::listen(&close_button, "click", move |_| {
            lightbox.close_on(CloseTrigger::CloseControl);
        })?;
    }

    {
        let backdrop = JsValue::from(lightbox.root.clone());
        let lightbox_for_click = lightbox.clone();
        dom::listen(&lightbox.root, "click", move |event| {
            let on_backdrop = event.target().map(JsValue::from).as_ref() == Some(&backdrop);
            lightbox_for_click.close_on(CloseTrigger::Click { on_backdrop });
        })?;
    }

    {
        let lightbox = lightbox.clone();
        dom::listen(document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            lightbox.close_on(CloseTrigger::Key(&event.key()));
        })?;
    }

    info!("Lightbox attached ({} play buttons)", play_buttons.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> LightboxClip {
        LightboxClip::from_parts(
            Some("https://cdn.example.com/reel.mp4".to_string()),
            Some("  Brand Reel \n".to_string()),
            Some("Motion".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn opening_uses_the_items_source_and_caption() {
        let clip = clip();
        assert_eq!(clip.src, "https://cdn.example.com/reel.mp4");
        assert_eq!(clip.caption_parts(), [("h3", "Brand Reel"), ("p", "Motion")]);

        let change = LightboxChange::Open { clip };
        assert!(change.active_after());
    }

    #[test]
    fn item_without_video_cannot_open() {
        assert_eq!(LightboxClip::from_parts(None, Some("Title".into()), None), None);
        assert_eq!(LightboxClip::from_parts(Some(String::new()), None, None), None);
    }

    #[test]
    fn missing_text_gives_empty_caption() {
        let clip = LightboxClip::from_parts(Some("a.mp4".into()), None, None).unwrap();
        assert_eq!(clip.caption_parts(), [("h3", ""), ("p", "")]);
    }

    #[test]
    fn closing_rewinds_and_deactivates() {
        let change = LightboxChange::close();
        assert_eq!(change, LightboxChange::Close { rewind_to: 0.0 });
        assert!(!change.active_after());
    }

    #[test]
    fn close_control_always_closes() {
        assert!(CloseTrigger::CloseControl.closes(true));
    }

    #[test]
    fn only_backdrop_clicks_close() {
        assert!(CloseTrigger::Click { on_backdrop: true }.closes(true));
        assert!(!CloseTrigger::Click { on_backdrop: false }.closes(true));
    }

    #[test]
    fn escape_closes_only_an_open_lightbox() {
        assert!(CloseTrigger::Key("Escape").closes(true));
        assert!(!CloseTrigger::Key("Escape").closes(false));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert!(!CloseTrigger::Key("Enter").closes(true));
        assert!(!CloseTrigger::Key("Esc").closes(true));
        assert!(!CloseTrigger::Key("escape").closes(true));
    }
}
