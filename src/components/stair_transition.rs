use std::rc::Rc;

use log::{debug, info};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::anim::{AnimContext, Display, Ease, Position, Props, TargetId, Timeline, TweenSpec};
use crate::config;
use crate::dom;

#[derive(Properties, PartialEq)]
pub struct StairTransitionProps {
    /// Fires once, after the last column has left the screen.
    #[prop_or_default]
    pub on_complete: Option<Callback<()>>,
}

/// Even columns leave upward, odd columns downward.
pub fn column_exit_percent(index: usize) -> f64 {
    if index % 2 == 0 {
        -config::STAIR_TRAVEL_PERCENT
    } else {
        config::STAIR_TRAVEL_PERCENT
    }
}

pub fn stair_timeline(columns: &[TargetId]) -> Timeline {
    let spec = TweenSpec::new(config::STAIR_DURATION, Ease::Power4InOut);
    let mut timeline = Timeline::new();
    for (i, column) in columns.iter().enumerate() {
        let position = if i == 0 {
            Position::At(0.0)
        } else {
            Position::AfterPrevious(-config::STAIR_OVERLAP)
        };
        timeline.push(*column, Props::new().y_percent(column_exit_percent(i)), spec, position);
    }
    timeline
}

#[function_component(StairTransition)]
pub fn stair_transition(props: &StairTransitionProps) -> Html {
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        let on_complete = props.on_complete.clone();
        use_effect_with_deps(
            move |_| {
                let ctx = Rc::new(AnimContext::new());

                if let Some(container) = container_ref.cast::<HtmlElement>() {
                    let columns: Vec<TargetId> = dom::query_all(&container, ".stair-col")
                        .iter()
                        .map(|col| {
                            ctx.set(col, Props::new().y_percent(0.0));
                            ctx.bind(col)
                        })
                        .collect();
                    debug!("Stair transition starting with {} columns", columns.len());

                    let finish = Rc::downgrade(&ctx);
                    ctx.run_then(stair_timeline(&columns), Props::new().y_percent(0.0), move || {
                        if let Some(ctx) = finish.upgrade() {
                            let hidden = Props::new().auto_alpha(0.0).display(Display::None);
                            ctx.set(&container, hidden);
                        }
                        info!("Stair transition finished");
                        if let Some(on_complete) = on_complete {
                            on_complete.emit(());
                        }
                    });
                }

                move || drop(ctx)
            },
            (),
        );
    }

    html! {
        <div ref={container_ref} class="stair-transition" aria-hidden="true">
            <style>
                {r#"
                    .stair-transition {
                        position: fixed;
                        inset: 0;
                        z-index: 9999;
                        pointer-events: none;
                        user-select: none;
                    }
                    .stair-grid {
                        position: absolute;
                        inset: 0;
                        display: grid;
                    }
                    .stair-col {
                        width: 100%;
                        height: 100%;
                        background: #000;
                        border-right: 1px solid rgba(255, 255, 255, 0.05);
                    }
                    .stair-col:last-child {
                        border-right: none;
                    }
                "#}
            </style>
            <div
                class="stair-grid"
                style={format!("grid-template-columns: repeat({}, 1fr);", config::STAIR_COLUMNS)}
            >
                {
                    for (0..config::STAIR_COLUMNS).map(|i| html! {
                        <div key={i.to_string()} class="stair-col"></div>
                    })
                }
            </div>
        </div>
    }
}
