use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent};

use crate::config::InteractionConfig;
use crate::dom;
use crate::error::SetupError;

const TILT_SELECTOR: &str =
    ".service-card, .portfolio-item, .step-card, .testimonial-card, .feature-item";

pub const NEUTRAL_TRANSFORM: &str = "perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltAngles {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl TiltAngles {
    /// `x`/`y` are relative to the element's top-left corner.
    pub fn from_pointer(x: f64, y: f64, width: f64, height: f64, max_degrees: f64) -> Self {
        let max = max_degrees.abs();
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        if center_x <= 0.0 || center_y <= 0.0 {
            return Self { rotate_x: 0.0, rotate_y: 0.0 };
        }

        // Pointer below center tips the top edge away
        let rotate_x = ((y - center_y) / center_y * -max).clamp(-max, max);
        let rotate_y = ((x - center_x) / center_x * max).clamp(-max, max);
        Self { rotate_x, rotate_y }
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) scale3d(1.02, 1.02, 1.02)",
            self.rotate_x, self.rotate_y
        )
    }
}

pub fn wire(document: &Document, config: &InteractionConfig) -> Result<(), SetupError> {
    let cards = dom::query_all(document, TILT_SELECTOR)?;
    let max_degrees = config.tilt_max_degrees;
    let reset_ms = config.tilt_reset_ms;

    for card in &cards {
        let el = card.clone();
        dom::listen(card, "mouseenter", move |_| {
            dom::set_style(&el, "transition", "transform 0.1s ease-out");
        })?;

        let el = card.clone();
        dom::listen(card, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = el.get_bounding_client_rect();
            let angles = TiltAngles::from_pointer(
                event.client_x() as f64 - rect.left(),
                event.client_y() as f64 - rect.top(),
                rect.width(),
                rect.height(),
                max_degrees,
            );
            dom::set_style(&el, "transform", &angles.transform());
        })?;

        let el = card.clone();
        dom::listen(card, "mouseleave", move |_| {
            dom::set_style(&el, "transition", "transform 0.5s ease");
            dom::set_style(&el, "transform", NEUTRAL_TRANSFORM);

            // Hand control back to the stylesheet so idle float animations resume
            let el = el.clone();
            Timeout::new(reset_ms, move || {
                dom::clear_style(&el, "transform");
                dom::clear_style(&el, "transition");
            })
            .forget();
        })?;
    }

    info!("Tilt attached to {} cards", cards.len());
    Ok(())
}
