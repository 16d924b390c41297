//! Scroll-linked effects for the landing page: marquee speed-up, line
//! reveals and parallax. Elements opt in through markup: `.marquee-row`,
//! `.reveal-line` and `[data-parallax]`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use crate::anim::{AnimContext, Ease, Props, TrackId, TweenSpec};
use crate::components::marquee::{marquee_timeline, row_reversed, travel};
use crate::config;
use crate::dom::{self, Listener};
use crate::scroll::{
    parallax_progress, LayoutBox, RateGovernor, RevealTrigger, VelocityTracker, Viewport,
};

struct Marquee {
    track: TrackId,
    governor: RateGovernor,
}

struct Reveal {
    el: HtmlElement,
    layout: LayoutBox,
    trigger: RevealTrigger,
}

struct Parallax {
    el: HtmlElement,
    layout: LayoutBox,
}

struct State {
    ctx: Rc<AnimContext>,
    marquees: Vec<Marquee>,
    velocity: VelocityTracker,
    reveals: Vec<Reveal>,
    parallax: Vec<Parallax>,
}

impl State {
    fn measure(&mut self) {
        for reveal in self.reveals.iter_mut().filter(|r| !r.trigger.fired()) {
            reveal.layout = dom::layout_box(&reveal.el);
        }
        for item in &mut self.parallax {
            item.layout = dom::layout_box(&item.el);
        }
    }

    fn update(&mut self, viewport: &Viewport) {
        for reveal in &mut self.reveals {
            if reveal.trigger.check(&reveal.layout, viewport) {
                self.ctx.to(
                    &reveal.el,
                    Props::new().y_percent(0.0),
                    TweenSpec::new(config::REVEAL_DURATION, Ease::Power4Out),
                );
            }
        }
        for item in &self.parallax {
            let progress = parallax_progress(&item.layout, viewport);
            self.ctx.set(&item.el, Props::new().y_percent(config::PARALLAX_Y_PERCENT * progress));
        }
    }

    fn apply_velocity(&mut self, velocity: f64) {
        for marquee in &mut self.marquees {
            if let Some(rate) = marquee.governor.observe(velocity) {
                debug!("Marquee rate -> {:.2}", rate);
                self.ctx.ramp_time_scale(marquee.track, rate, config::RATE_RAMP_SECS);
            }
        }
    }

    fn on_scroll(&mut self, viewport: &Viewport, now_ms: f64) {
        let velocity = self.velocity.record(now_ms, viewport.scroll_y);
        self.apply_velocity(velocity);
        self.update(viewport);
    }

    fn settle(&mut self) {
        self.velocity.reset();
        self.apply_velocity(0.0);
    }
}

/// Live scroll effects under one root element. Dropping it removes the
/// listeners and reverts every style the effects wrote.
pub struct ScrollEffects {
    ctx: Rc<AnimContext>,
    _listeners: Vec<Listener>,
    _idle: Rc<RefCell<Option<Timeout>>>,
}

fn child(parent: &HtmlElement, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

impl ScrollEffects {
    pub fn mount(root: &Element) -> Self {
        let ctx = Rc::new(AnimContext::new());

        let marquees: Vec<Marquee> = dom::query_all(root, ".marquee-row")
            .iter()
            .filter_map(|row| {
                let inner = child(row, ".marquee-inner")?;
                let reverse = row_reversed(row.get_attribute("data-reverse").as_deref());
                let (start, _) = travel(reverse);
                ctx.set(&inner, Props::new().x_percent(start));
                let timeline = marquee_timeline(ctx.bind(&inner), reverse);
                let track = ctx.run(timeline, Props::new().x_percent(0.0));
                Some(Marquee {
                    track,
                    governor: RateGovernor::new(config::VELOCITY_THRESHOLD, config::VELOCITY_CLAMP),
                })
            })
            .collect();

        let reveals: Vec<Reveal> = dom::query_all(root, ".reveal-line")
            .into_iter()
            .map(|el| {
                ctx.set(&el, Props::new().y_percent(100.0));
                Reveal {
                    layout: dom::layout_box(&el),
                    el,
                    trigger: RevealTrigger::new(config::REVEAL_START_FRACTION),
                }
            })
            .collect();

        let parallax: Vec<Parallax> = dom::query_all(root, "[data-parallax]")
            .into_iter()
            .map(|el| Parallax { layout: dom::layout_box(&el), el })
            .collect();

        info!(
            "Scroll effects: {} marquees, {} reveal lines, {} parallax layers",
            marquees.len(),
            reveals.len(),
            parallax.len()
        );

        let state = Rc::new(RefCell::new(State {
            ctx: ctx.clone(),
            marquees,
            velocity: VelocityTracker::new(),
            reveals,
            parallax,
        }));
        if let Some(viewport) = dom::viewport() {
            state.borrow_mut().update(&viewport);
        }

        let idle: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let mut listeners = Vec::new();

        listeners.extend(Listener::on_window("scroll", {
            let state = state.clone();
            let idle = idle.clone();
            move |_: Event| {
                let Some(viewport) = dom::viewport() else {
                    return;
                };
                state.borrow_mut().on_scroll(&viewport, dom::now_ms());

                let settle_state = state.clone();
                // Replacing the pending timeout cancels it.
                *idle.borrow_mut() = Some(Timeout::new(config::SCROLL_IDLE_MS, move || {
                    settle_state.borrow_mut().settle();
                }));
            }
        }));

        listeners.extend(Listener::on_window("resize", {
            let state = state.clone();
            move |_: Event| {
                let Some(viewport) = dom::viewport() else {
                    return;
                };
                let mut state = state.borrow_mut();
                state.measure();
                state.update(&viewport);
            }
        }));

        Self { ctx, _listeners: listeners, _idle: idle }
    }
}

impl Drop for ScrollEffects {
    fn drop(&mut self) {
        self.ctx.revert();
    }
}
