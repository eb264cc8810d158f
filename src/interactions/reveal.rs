use log::info;
use web_sys::Document;

use crate::config::InteractionConfig;
use crate::dom;
use crate::error::SetupError;

const REVEAL_SELECTOR: &str =
    ".reveal-text, .service-card, .portfolio-item, .about-content, .image-frame";

pub fn wire(document: &Document, config: &InteractionConfig) -> Result<(), SetupError> {
    let observer = dom::intersection_observer(
        config.reveal_threshold,
        Some(config.reveal_root_margin.as_str()),
        |entries| {
            for entry in entries.iter().filter(|entry| entry.is_intersecting()) {
                // Stays visible, we keep observing but never hide again
                dom::add_class(&entry.target(), "visible");
            }
        },
    )?;

    let targets = dom::query_all(document, REVEAL_SELECTOR)?;
    for el in &targets {
        dom::add_class(el, "reveal-text");
        observer.observe(el);
    }

    info!("Reveal-on-scroll observing {} elements", targets.len());
    Ok(())
}
