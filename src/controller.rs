use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use web_sys::{Document, Window};

use crate::config;
use crate::dom;
use crate::error::SetupError;
use crate::interactions::{
    counters::{self, Latch},
    cursor::{self, PointerPosition},
    header, lightbox, menu,
    music::{self, MusicToggle},
    navigation, portfolio, reveal, tilt,
};

/// Owns the page-wide state shared between handlers. Built once, lives as long as the page.
pub struct PageController {
    window: Window,
    document: Document,
    pointer: Rc<Cell<PointerPosition>>,
    counters_started: Rc<Latch>,
    music: Rc<RefCell<MusicToggle>>,
}

impl PageController {
    pub fn new() -> Result<Self, SetupError> {
        let window = dom::window()?;
        let document = dom::document()?;
        Ok(Self {
            window,
            document,
            pointer: Rc::new(Cell::new(PointerPosition::default())),
            counters_started: Rc::new(Latch::default()),
            music: Rc::new(RefCell::new(MusicToggle::default())),
        })
    }

    /// Wires everything now, or once `DOMContentLoaded` fires if the document is still parsing.
    pub fn start(self) -> Result<(), SetupError> {
        if is_parsed(&self.document.ready_state()) {
            self.init();
            return Ok(());
        }

        let document = self.document.clone();
        let mut pending = Some(self);
        dom::listen(&document, "DOMContentLoaded", move |_| {
            if let Some(controller) = pending.take() {
                controller.init();
            }
        })
    }

    fn init(&self) {
        // Read here, the config block may sit after our script tag
        let config = &config::load(&self.document);
        let (window, document) = (&self.window, &self.document);

        attach("cursor", cursor::wire_pointer(window, document, self.pointer.clone()));
        attach("hover", cursor::wire_hover(document));
        attach("sticky header", header::wire(window, document, config.header_scroll_threshold));
        attach("mobile menu", menu::wire(document));
        attach("reveal", reveal::wire(document, config));
        attach(
            "counters",
            counters::wire(window, document, config, self.counters_started.clone()),
        );
        attach("portfolio filter", portfolio::wire(document, config));
        attach("lightbox", lightbox::wire(document));
        attach(
            "smooth scrolling",
            navigation::wire_anchor_scrolling(window, document, config),
        );
        attach(
            "section highlighting",
            navigation::wire_section_highlighting(window, document, config),
        );
        attach("tilt", tilt::wire(document, config));
        attach("music", music::wire(document, config, self.music.clone()));

        info!("Page interactions ready");
    }
}

/// `interactive` and `complete` both mean the markup is fully parsed.
fn is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

fn attach(name: &str, result: Result<(), SetupError>) {
    if let Err(e) = result {
        warn!("{} disabled: {}", name, e);
    }
}
