use std::cell::RefCell;
use std::collections::BTreeMap;

use log::{debug, warn};
use web_sys::HtmlElement;

use super::pose::{Props, Stage, TargetId};
use super::ticker::Ticker;
use super::timeline::{Status, Timeline, TweenSpec};

// Longer gaps between frames (a backgrounded tab) are not replayed.
const MAX_FRAME_STEP: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ContextId(u32);

struct Bound {
    el: HtmlElement,
    original_style: Option<String>,
    owner: ContextId,
}

struct Track {
    owner: ContextId,
    timeline: Timeline,
    // Controlled tracks survive completion so they can be replayed.
    controlled: bool,
    on_complete: Option<Box<dyn FnOnce()>>,
}

#[derive(Default)]
struct Engine {
    next_id: u32,
    targets: BTreeMap<TargetId, Bound>,
    tracks: BTreeMap<TrackId, Track>,
    stage: Stage,
    last_frame: Option<f64>,
    // Removed tracks are dropped outside the engine borrow: their callbacks
    // may own an `AnimContext`, whose drop re-enters the engine.
    graveyard: Vec<Track>,
}

thread_local! {
    static ENGINE: RefCell<Engine> = RefCell::new(Engine::default());
    static TICKER: Ticker = Ticker::new(frame);
}

fn with_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> R {
    let (result, graveyard) = ENGINE.with(|engine| {
        let mut engine = engine.borrow_mut();
        let result = f(&mut engine);
        (result, std::mem::take(&mut engine.graveyard))
    });
    drop(graveyard);
    result
}

fn wake() {
    TICKER.with(Ticker::wake);
}

fn frame(now_ms: f64) -> bool {
    let (completed, active) = with_engine(|engine| engine.tick(now_ms));
    for on_complete in completed {
        on_complete();
    }
    active || with_engine(|engine| engine.is_active())
}

impl Engine {
    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn bind(&mut self, owner: ContextId, el: &HtmlElement) -> TargetId {
        if let Some((id, _)) = self.targets.iter().find(|(_, bound)| bound.el == *el) {
            return *id;
        }
        let id = TargetId(self.next());
        self.targets.insert(
            id,
            Bound { el: el.clone(), original_style: el.get_attribute("style"), owner },
        );
        id
    }

    fn claim(&mut self, target: TargetId, props: &Props) {
        let mut emptied = Vec::new();
        for (id, track) in self.tracks.iter_mut() {
            track.timeline.release(target, props);
            if track.timeline.is_empty() {
                emptied.push(*id);
            }
        }
        for id in emptied {
            if let Some(track) = self.tracks.remove(&id) {
                self.graveyard.push(track);
            }
        }
    }

    fn add(&mut self, track: Track, claims: Vec<(TargetId, Props)>) -> TrackId {
        for (target, props) in &claims {
            self.claim(*target, props);
        }
        let id = TrackId(self.next());
        self.tracks.insert(id, track);
        id
    }

    fn set(&mut self, target: TargetId, props: &Props) {
        self.claim(target, props);
        self.stage.pose_mut(target).apply(props);
        self.flush();
    }

    fn tick(&mut self, now_ms: f64) -> (Vec<Box<dyn FnOnce()>>, bool) {
        let dt = match self.last_frame {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_STEP),
            None => 0.0,
        };
        self.last_frame = Some(now_ms);

        let mut completed = Vec::new();
        let mut finished = Vec::new();
        for (id, track) in self.tracks.iter_mut() {
            if track.timeline.advance(dt, &mut self.stage) == Status::Completed {
                if let Some(on_complete) = track.on_complete.take() {
                    completed.push(on_complete);
                }
                if !track.controlled {
                    finished.push(*id);
                }
            }
        }
        for id in finished {
            if let Some(track) = self.tracks.remove(&id) {
                self.graveyard.push(track);
            }
        }
        self.flush();

        let active = self.is_active();
        if !active {
            self.last_frame = None;
        }
        (completed, active)
    }

    fn is_active(&self) -> bool {
        self.tracks.values().any(|track| track.timeline.is_active())
    }

    fn flush(&mut self) {
        for id in self.stage.take_dirty() {
            let Some(bound) = self.targets.get(&id) else {
                continue;
            };
            let style = bound.el.style();
            for (name, value) in self.stage.pose(id).style_pairs() {
                if let Err(e) = style.set_property(name, &value) {
                    warn!("Failed to write {} on animated element: {:?}", name, e);
                }
            }
        }
    }

    fn revert(&mut self, owner: ContextId) {
        let owned: Vec<TrackId> = self
            .tracks
            .iter()
            .filter(|(_, track)| track.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        for id in owned {
            if let Some(track) = self.tracks.remove(&id) {
                self.graveyard.push(track);
            }
        }

        let bound: Vec<TargetId> = self
            .targets
            .iter()
            .filter(|(_, b)| b.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        for id in bound {
            self.stage.remove(id);
            if let Some(b) = self.targets.remove(&id) {
                let result = match &b.original_style {
                    Some(style) => b.el.set_attribute("style", style),
                    None => b.el.remove_attribute("style"),
                };
                if let Err(e) = result {
                    warn!("Failed to restore style on revert: {:?}", e);
                }
            }
        }
    }

    fn with_track(&mut self, id: TrackId, f: impl FnOnce(&mut Timeline)) -> bool {
        match self.tracks.get_mut(&id) {
            Some(track) => {
                f(&mut track.timeline);
                true
            }
            None => false,
        }
    }
}

fn claims_of(timeline: &Timeline, props: impl Fn(TargetId) -> Props) -> Vec<(TargetId, Props)> {
    timeline.targets().map(|target| (target, props(target))).collect()
}

/// Dropping (or `revert`ing) the context kills its animations and restores
/// the original inline style of each element it bound.
pub struct AnimContext {
    id: ContextId,
}

impl Default for AnimContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimContext {
    pub fn new() -> Self {
        let id = ContextId(with_engine(Engine::next));
        debug!("Animation context {} opened", id.0);
        Self { id }
    }

    pub fn bind(&self, el: &HtmlElement) -> TargetId {
        with_engine(|engine| engine.bind(self.id, el))
    }

    pub fn set(&self, el: &HtmlElement, props: Props) {
        with_engine(|engine| {
            let target = engine.bind(self.id, el);
            engine.set(target, &props);
        });
    }

    pub fn to(&self, el: &HtmlElement, props: Props, spec: TweenSpec) -> TrackId {
        let id = with_engine(|engine| {
            let target = engine.bind(self.id, el);
            let claims = vec![(target, props.clone())];
            let track = Track {
                owner: self.id,
                timeline: Timeline::single(target, props, spec),
                controlled: false,
                on_complete: None,
            };
            engine.add(track, claims)
        });
        wake();
        id
    }

    pub fn run(&self, timeline: Timeline, claim: Props) -> TrackId {
        self.start(timeline, claim, false, None)
    }

    pub fn run_then(
        &self,
        timeline: Timeline,
        claim: Props,
        on_complete: impl FnOnce() + 'static,
    ) -> TrackId {
        self.start(timeline, claim, false, Some(Box::new(on_complete)))
    }

    /// Keeps the timeline after it finishes so `play`/`reverse` can drive it.
    pub fn control(&self, timeline: Timeline, claim: Props) -> TrackId {
        self.start(timeline, claim, true, None)
    }

    // `claim` names the properties the timeline takes over on each of its
    // targets.
    fn start(
        &self,
        timeline: Timeline,
        claim: Props,
        controlled: bool,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) -> TrackId {
        let active = timeline.is_active();
        let claims = claims_of(&timeline, |_| claim.clone());
        let id = with_engine(|engine| {
            engine.add(Track { owner: self.id, timeline, controlled, on_complete }, claims)
        });
        if active {
            wake();
        }
        id
    }

    pub fn play(&self, track: TrackId) {
        if with_engine(|engine| engine.with_track(track, Timeline::play)) {
            wake();
        }
    }

    pub fn reverse(&self, track: TrackId) {
        if with_engine(|engine| engine.with_track(track, Timeline::reverse)) {
            wake();
        }
    }

    pub fn ramp_time_scale(&self, track: TrackId, to: f64, duration: f64) {
        if with_engine(|engine| engine.with_track(track, |t| t.ramp_time_scale(to, duration))) {
            wake();
        }
    }

    pub fn revert(&self) {
        with_engine(|engine| engine.revert(self.id));
    }
}

impl Drop for AnimContext {
    fn drop(&mut self) {
        self.revert();
        debug!("Animation context {} reverted", self.id.0);
    }
}
