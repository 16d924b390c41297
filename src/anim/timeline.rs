use super::ease::Ease;
use super::pose::{Pose, Props, Stage, TargetId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub duration: f64,
    pub ease: Ease,
}

impl TweenSpec {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self { duration, ease }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    At(f64),
    // Relative to the end of the previous step; negative overlaps.
    AfterPrevious(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Idle,
    /// The playhead just reached the end while playing forward.
    Completed,
}

#[derive(Debug)]
struct Step {
    target: TargetId,
    to: Props,
    spec: TweenSpec,
    start: f64,
    // Captured from the stage the first time the playhead reaches `start`.
    from: Option<Pose>,
    last_progress: Option<f64>,
}

impl Step {
    fn end(&self) -> f64 {
        self.start + self.spec.duration
    }

    fn progress(&self, time: f64) -> f64 {
        if self.spec.duration <= 0.0 {
            1.0
        } else {
            ((time - self.start) / self.spec.duration).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug)]
struct Ramp {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
}

#[derive(Debug)]
pub struct Timeline {
    steps: Vec<Step>,
    time: f64,
    direction: Direction,
    playing: bool,
    repeat: bool,
    time_scale: f64,
    ramp: Option<Ramp>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            time: 0.0,
            direction: Direction::Forward,
            playing: true,
            repeat: false,
            time_scale: 1.0,
            ramp: None,
        }
    }

    pub fn single(target: TargetId, to: Props, spec: TweenSpec) -> Self {
        let mut timeline = Self::new();
        timeline.push(target, to, spec, Position::At(0.0));
        timeline
    }

    pub fn push(
        &mut self,
        target: TargetId,
        to: Props,
        spec: TweenSpec,
        position: Position,
    ) -> &mut Self {
        let start = match position {
            Position::At(at) => at,
            Position::AfterPrevious(offset) => {
                self.steps.last().map_or(0.0, Step::end) + offset
            }
        }
        .max(0.0);
        self.steps.push(Step { target, to, spec, start, from: None, last_progress: None });
        self
    }

    pub fn paused(mut self) -> Self {
        self.playing = false;
        self
    }

    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn duration(&self) -> f64 {
        self.steps.iter().map(Step::end).fold(0.0, f64::max)
    }

    pub fn is_active(&self) -> bool {
        self.playing
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.steps.iter().map(|s| s.target)
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.playing = true;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Backward;
        self.playing = true;
    }

    pub fn ramp_time_scale(&mut self, to: f64, duration: f64) {
        if duration <= 0.0 {
            self.time_scale = to;
            self.ramp = None;
        } else {
            self.ramp = Some(Ramp { from: self.time_scale, to, elapsed: 0.0, duration });
        }
    }

    pub fn release(&mut self, target: TargetId, props: &Props) {
        for step in self.steps.iter_mut().filter(|s| s.target == target) {
            step.to.release(props);
        }
        self.steps.retain(|s| !s.to.is_empty());
    }

    pub fn advance(&mut self, dt: f64, stage: &mut Stage) -> Status {
        if !self.playing {
            return Status::Idle;
        }
        self.step_ramp(dt);

        let total = self.duration();
        let sign = match self.direction {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        };
        let delta = dt * self.time_scale * sign;

        if self.repeat && total > 0.0 {
            self.time = (self.time + delta).rem_euclid(total);
            self.render(stage);
            return Status::Running;
        }

        self.time = (self.time + delta).clamp(0.0, total);
        self.render(stage);

        match self.direction {
            Direction::Forward if self.time >= total => {
                self.playing = false;
                Status::Completed
            }
            Direction::Backward if self.time <= 0.0 => {
                self.playing = false;
                Status::Idle
            }
            _ => Status::Running,
        }
    }

    fn step_ramp(&mut self, dt: f64) {
        let Some(ramp) = self.ramp.as_mut() else {
            return;
        };
        ramp.elapsed += dt;
        let t = Ease::Power1Out.apply(ramp.elapsed / ramp.duration);
        self.time_scale = ramp.from * (1.0 - t) + ramp.to * t;
        if ramp.elapsed >= ramp.duration {
            self.ramp = None;
        }
    }

    fn render(&mut self, stage: &mut Stage) {
        let time = self.time;
        for step in &mut self.steps {
            if step.from.is_none() {
                if time < step.start {
                    continue;
                }
                step.from = Some(stage.pose(step.target));
            }
            let progress = step.progress(time);
            if step.last_progress == Some(progress) {
                continue;
            }
            step.last_progress = Some(progress);
            if let Some(from) = &step.from {
                let eased = step.spec.ease.apply(progress);
                stage.pose_mut(step.target).blend(from, &step.to, eased);
            }
        }
    }
}

#[cfg(test)]
impl Timeline {
    fn time(&self) -> f64 {
        self.time
    }

    fn time_scale(&self) -> f64 {
        self.time_scale
    }

    fn step_starts(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.start).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(duration: f64) -> TweenSpec {
        TweenSpec::new(duration, Ease::Linear)
    }

    fn looping() -> Timeline {
        Timeline::single(A, Props::new().x_percent(-50.0), linear(20.0)).repeating()
    }

    const A: TargetId = TargetId(1);
    const B: TargetId = TargetId(2);

    fn run(timeline: &mut Timeline, stage: &mut Stage, seconds: f64) -> Status {
        let mut status = timeline.advance(0.0, stage);
        let mut elapsed = 0.0;
        while elapsed < seconds && status == Status::Running {
            status = timeline.advance(1.0 / 60.0, stage);
            elapsed += 1.0 / 60.0;
        }
        status
    }

    #[test]
    fn overlapping_steps_stagger_by_the_overlap() {
        let spec = TweenSpec::new(0.9, Ease::Power4InOut);
        let mut timeline = Timeline::new();
        for i in 0..6 {
            let position = if i == 0 { Position::At(0.0) } else { Position::AfterPrevious(-0.8) };
            timeline.push(TargetId(i), Props::new().y_percent(-110.0), spec, position);
        }
        let starts = timeline.step_starts();
        for (i, start) in starts.iter().enumerate() {
            assert!((start - 0.1 * i as f64).abs() < 1e-9);
        }
        assert!((timeline.duration() - 1.4).abs() < 1e-9);
    }

    #[test]
    fn completes_once_and_lands_on_target() {
        let mut stage = Stage::default();
        let spec = TweenSpec::new(0.5, Ease::Power3Out);
        let mut timeline = Timeline::single(A, Props::new().x(100.0), spec);
        let status = run(&mut timeline, &mut stage, 0.3);
        assert_eq!(status, Status::Running);
        assert!(stage.pose(A).x > 0.0 && stage.pose(A).x < 100.0);

        let status = run(&mut timeline, &mut stage, 0.3);
        assert_eq!(status, Status::Completed);
        assert_eq!(stage.pose(A).x, 100.0);
        assert!(!timeline.is_active());
        assert_eq!(timeline.advance(0.1, &mut stage), Status::Idle);
    }

    #[test]
    fn later_steps_wait_for_their_start() {
        let mut stage = Stage::default();
        stage.pose_mut(B).y_percent = 5.0;
        let mut timeline = Timeline::new();
        timeline.push(A, Props::new().y_percent(-10.0), linear(1.0), Position::At(0.0));
        timeline.push(B, Props::new().y_percent(10.0), linear(1.0), Position::At(0.5));
        timeline.advance(0.25, &mut stage);
        assert_eq!(stage.pose(B).y_percent, 5.0);
        timeline.advance(0.5, &mut stage);
        assert!((stage.pose(B).y_percent - 6.25).abs() < 1e-9);
    }

    #[test]
    fn paused_timeline_plays_and_reverses_without_residue() {
        let mut stage = Stage::default();
        let spec = TweenSpec::new(0.35, Ease::Power3Out);
        let mut timeline = Timeline::single(A, Props::new().y_percent(-50.0), spec).paused();
        assert_eq!(timeline.advance(0.1, &mut stage), Status::Idle);
        assert_eq!(stage.pose(A).y_percent, 0.0);

        timeline.play();
        run(&mut timeline, &mut stage, 0.5);
        assert_eq!(stage.pose(A).y_percent, -50.0);

        timeline.reverse();
        let status = run(&mut timeline, &mut stage, 0.5);
        assert_eq!(status, Status::Idle);
        assert_eq!(stage.pose(A).y_percent, 0.0);
        assert_eq!(timeline.time(), 0.0);
    }

    #[test]
    fn reverse_mid_flight_heads_back_from_current_time() {
        let mut stage = Stage::default();
        let mut timeline = Timeline::single(A, Props::new().y_percent(-50.0), linear(1.0)).paused();
        timeline.play();
        timeline.advance(0.0, &mut stage);
        timeline.advance(0.4, &mut stage);
        timeline.reverse();
        timeline.advance(0.1, &mut stage);
        assert!((timeline.time() - 0.3).abs() < 1e-9);
        assert!((stage.pose(A).y_percent + 15.0).abs() < 1e-9);
    }

    #[test]
    fn repeating_timeline_wraps() {
        let mut stage = Stage::default();
        let mut timeline = looping();
        timeline.advance(0.0, &mut stage);
        timeline.advance(25.0, &mut stage);
        assert!((timeline.time() - 5.0).abs() < 1e-9);
        assert!((stage.pose(A).x_percent + 12.5).abs() < 1e-9);
        assert!(timeline.is_active());
    }

    #[test]
    fn negative_time_scale_runs_backwards_through_the_loop() {
        let mut stage = Stage::default();
        let mut timeline = looping();
        timeline.advance(0.0, &mut stage);
        timeline.ramp_time_scale(-1.0, 0.0);
        timeline.advance(5.0, &mut stage);
        assert!((timeline.time() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn time_scale_ramp_settles_on_target() {
        let mut stage = Stage::default();
        let mut timeline = looping();
        timeline.ramp_time_scale(3.0, 0.2);
        timeline.advance(0.1, &mut stage);
        let mid = timeline.time_scale();
        assert!(mid > 1.0 && mid < 3.0);
        timeline.advance(0.1, &mut stage);
        assert_eq!(timeline.time_scale(), 3.0);
        timeline.advance(0.5, &mut stage);
        assert_eq!(timeline.time_scale(), 3.0);
    }

    #[test]
    fn release_hands_properties_to_a_newer_tween() {
        let mut timeline = Timeline::single(A, Props::new().x(10.0).y(10.0), linear(0.2));
        timeline.release(B, &Props::new().x(0.0));
        assert!(!timeline.is_empty());
        timeline.release(A, &Props::new().x(0.0));
        assert!(!timeline.is_empty());
        timeline.release(A, &Props::new().y(0.0));
        assert!(timeline.is_empty());
    }

    #[test]
    fn instant_step_applies_on_first_frame() {
        let mut stage = Stage::default();
        let mut timeline = Timeline::single(A, Props::new().auto_alpha(0.0), linear(0.0));
        assert_eq!(timeline.advance(0.0, &mut stage), Status::Completed);
        assert_eq!(stage.pose(A).opacity, Some(0.0));
    }
}
