use yew::prelude::*;

use crate::anim::{Ease, Props, TargetId, Timeline, TweenSpec};
use crate::config;

#[derive(Properties, PartialEq)]
pub struct MarqueeRowProps {
    pub text: AttrValue,
    #[prop_or_default]
    pub reverse: bool,
}

/// Start and end `xPercent` of a row's loop. Reversed rows start one copy to
/// the left and travel right, so both directions stay seamless.
pub fn travel(reverse: bool) -> (f64, f64) {
    if reverse {
        (-config::MARQUEE_TRAVEL_PERCENT, 0.0)
    } else {
        (0.0, -config::MARQUEE_TRAVEL_PERCENT)
    }
}

/// Rows alternate direction by index.
pub fn is_reversed(index: usize) -> bool {
    index % 2 == 1
}

/// Direction a row was rendered with, read back from its `data-reverse`.
pub fn row_reversed(data_reverse: Option<&str>) -> bool {
    data_reverse == Some("true")
}

pub fn marquee_timeline(inner: TargetId, reverse: bool) -> Timeline {
    let (_, end) = travel(reverse);
    Timeline::single(
        inner,
        Props::new().x_percent(end),
        TweenSpec::new(config::MARQUEE_CYCLE_SECS, Ease::Linear),
    )
    .repeating()
}

/// Markup only; the page drives `.marquee-inner` horizontally.
#[function_component(MarqueeRow)]
pub fn marquee_row(props: &MarqueeRowProps) -> Html {
    html! {
        <div class="marquee-row" data-reverse={props.reverse.to_string()}>
            <div class="marquee-inner">
                <span class="marquee-copy">{props.text.clone()}</span>
                <span class="marquee-copy">{props.text.clone()}</span>
            </div>
        </div>
    }
}

pub const MARQUEE_CSS: &str = r#"
    .marquee-row {
        overflow: hidden;
        white-space: nowrap;
    }
    .marquee-inner {
        display: inline-block;
        will-change: transform;
    }
    .marquee-copy {
        font-size: 8vw;
        font-weight: 900;
        text-transform: uppercase;
        letter-spacing: -0.025em;
        margin-right: 2rem;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::pose::Stage;

    #[test]
    fn rows_alternate() {
        let flags: Vec<bool> = (0..4).map(is_reversed).collect();
        assert_eq!(flags, [false, true, false, true]);
    }

    #[test]
    fn forward_row_moves_left_one_copy_per_cycle() {
        let inner = TargetId(1);
        let mut stage = Stage::default();
        let mut timeline = marquee_timeline(inner, false);
        timeline.advance(0.0, &mut stage);
        timeline.advance(config::MARQUEE_CYCLE_SECS / 2.0, &mut stage);
        assert!((stage.pose(inner).x_percent + 25.0).abs() < 1e-9);
    }

    #[test]
    fn reverse_row_moves_right_from_one_copy_left() {
        let inner = TargetId(2);
        let mut stage = Stage::default();
        let (start, _) = travel(true);
        stage.pose_mut(inner).x_percent = start;
        let mut timeline = marquee_timeline(inner, true);
        timeline.advance(0.0, &mut stage);
        assert_eq!(stage.pose(inner).x_percent, -50.0);
        timeline.advance(config::MARQUEE_CYCLE_SECS / 4.0, &mut stage);
        assert!((stage.pose(inner).x_percent + 37.5).abs() < 1e-9);
    }

    #[test]
    fn loop_never_leaves_the_travel_range() {
        for reverse in [false, true] {
            let inner = TargetId(3);
            let mut stage = Stage::default();
            stage.pose_mut(inner).x_percent = travel(reverse).0;
            let mut timeline = marquee_timeline(inner, reverse);
            timeline.ramp_time_scale(3.0, 0.0);
            for _ in 0..2000 {
                timeline.advance(1.0 / 30.0, &mut stage);
                let x = stage.pose(inner).x_percent;
                assert!((-50.0..=0.0).contains(&x), "{} escaped to {}", reverse, x);
            }
        }
    }
}
