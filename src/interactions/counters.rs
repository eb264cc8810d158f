use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Function;
use web_sys::{Document, Element, Window};

use crate::config::InteractionConfig;
use crate::dom;
use crate::error::SetupError;

/// A flag that can be set exactly once.
#[derive(Debug, Default)]
pub struct Latch(Cell<bool>);

impl Latch {
    /// Returns `true` for the first call only.
    pub fn trigger(&self) -> bool {
        !self.0.replace(true)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterFrame {
    Running(String),
    Finished(String),
}

/// Linear count-up from zero, one increment per animation frame.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: f64, duration_ms: f64, frame_ms: f64) -> Self {
        let frames = duration_ms / frame_ms;
        let frames = if frames.is_finite() && frames >= 1.0 { frames } else { 1.0 };
        Self {
            target,
            increment: target / frames,
            current: 0.0,
        }
    }

    pub fn step(&mut self) -> CounterFrame {
        self.current += self.increment;
        if self.current < self.target {
            CounterFrame::Running(format!("{}+", self.current.ceil()))
        } else {
            CounterFrame::Finished(format!("{}+", self.target))
        }
    }
}

pub fn parse_target(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn animate(window: &Window, counter: Element, mut animation: CounterAnimation) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let frame_clone = frame.clone();
    let window_clone = window.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || match animation.step() {
        CounterFrame::Running(text) => {
            counter.set_text_content(Some(text.as_str()));
            if let Some(callback) = frame_clone.borrow().as_ref() {
                let _ = window_clone.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        }
        CounterFrame::Finished(text) => {
            counter.set_text_content(Some(text.as_str()));
            // Break the Rc cycle so the closure can be freed
            frame_clone.borrow_mut().take();
        }
    }) as Box<dyn FnMut()>));

    // First step runs right away, the rest on animation frames
    let start = frame
        .borrow()
        .as_ref()
        .map(|callback| callback.as_ref().unchecked_ref::<Function>().clone());
    if let Some(start) = start {
        let _ = start.call0(&JsValue::NULL);
    }
}

pub fn wire(
    window: &Window,
    document: &Document,
    config: &InteractionConfig,
    started: Rc<Latch>,
) -> Result<(), SetupError> {
    let Some(stats) = dom::query_optional(document, ".stats-banner") else {
        debug!("No .stats-banner on this page, counters skipped");
        return Ok(());
    };
    let counters = dom::query_all(document, ".counter")?;

    let window = window.clone();
    let duration_ms = config.counter_duration_ms;
    let frame_ms = config.counter_frame_ms;
    let count = counters.len();

    let observer = dom::intersection_observer(config.counter_threshold, None, move |entries| {
        let Some(first) = entries.first() else {
            return;
        };
        if !first.is_intersecting() || !started.trigger() {
            return;
        }

        debug!("Stats visible, animating {} counters", counters.len());
        for counter in &counters {
            let raw = counter.get_attribute("data-target");
            let target = parse_target(raw.as_deref()).unwrap_or_else(|| {
                warn!("Counter has unusable data-target {:?}, using 0", raw);
                0.0
            });
            animate(&window, counter.clone(), CounterAnimation::new(target, duration_ms, frame_ms));
        }
    })?;
    observer.observe(&stats);

    info!("Counters armed ({} counters)", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut animation: CounterAnimation) -> Vec<String> {
        let mut shown = Vec::new();
        loop {
            match animation.step() {
                CounterFrame::Running(text) => shown.push(text),
                CounterFrame::Finished(text) => {
                    shown.push(text);
                    return shown;
                }
            }
        }
    }

    fn value(text: &str) -> f64 {
        text.trim_end_matches('+').parse().unwrap()
    }

    #[test]
    fn counts_to_target_without_going_backwards() {
        let shown = run(CounterAnimation::new(100.0, 2000.0, 16.0));
        assert_eq!(shown.last().unwrap(), "100+");
        assert!(shown.windows(2).all(|w| value(&w[0]) <= value(&w[1])));
        assert!(shown.iter().all(|s| s.ends_with('+')));
    }

    #[test]
    fn takes_about_two_seconds_of_frames() {
        let shown = run(CounterAnimation::new(100.0, 2000.0, 16.0));
        // 125 increments, float rounding may need one extra frame
        assert!((125..=126).contains(&shown.len()), "got {} frames", shown.len());
    }

    #[test]
    fn displayed_values_are_rounded_up() {
        let mut animation = CounterAnimation::new(10.0, 2000.0, 16.0);
        assert_eq!(animation.step(), CounterFrame::Running("1+".to_string()));
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut animation = CounterAnimation::new(0.0, 2000.0, 16.0);
        assert_eq!(animation.step(), CounterFrame::Finished("0+".to_string()));
    }

    #[test]
    fn degenerate_frame_length_still_terminates() {
        let shown = run(CounterAnimation::new(50.0, 2000.0, 0.0));
        assert_eq!(shown, vec!["50+".to_string()]);
    }

    #[test]
    fn latch_triggers_once() {
        let latch = Latch::default();
        assert!(latch.trigger());
        assert!(!latch.trigger());
        assert!(!latch.trigger());
    }

    #[test]
    fn parses_targets() {
        assert_eq!(parse_target(Some("250")), Some(250.0));
        assert_eq!(parse_target(Some(" 12.5 ")), Some(12.5));
        assert_eq!(parse_target(Some("lots")), None);
        assert_eq!(parse_target(Some("NaN")), None);
        assert_eq!(parse_target(None), None);
    }
}
