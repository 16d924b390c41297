use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::anim::{AnimContext, Ease, Props, TweenSpec};
use crate::config;
use crate::dom::Listener;

/// Circle that trails the pointer, inverting whatever is under it.
#[function_component(Cursor)]
pub fn cursor() -> Html {
    let cursor_ref = use_node_ref();

    {
        let cursor_ref = cursor_ref.clone();
        use_effect_with_deps(
            move |_| {
                let listener = cursor_ref.cast::<HtmlElement>().and_then(|cursor| {
                    let ctx = AnimContext::new();
                    Listener::on_window("mousemove", move |e: MouseEvent| {
                        ctx.to(
                            &cursor,
                            Props::new().x(f64::from(e.client_x())).y(f64::from(e.client_y())),
                            TweenSpec::new(config::CURSOR_FOLLOW_DURATION, Ease::Power3Out),
                        );
                    })
                });
                // Dropping the listener drops its context, which reverts the cursor.
                move || drop(listener)
            },
            (),
        );
    }

    html! {
        <div ref={cursor_ref} class="cursor" aria-hidden="true">
            <style>
                {r#"
                    .cursor {
                        position: fixed;
                        top: 0;
                        left: 0;
                        pointer-events: none;
                        z-index: 60;
                        mix-blend-mode: difference;
                    }
                    .cursor-dot {
                        width: 2rem;
                        height: 2rem;
                        border-radius: 9999px;
                        background: rgba(255, 255, 255, 0.9);
                        backdrop-filter: invert(1);
                    }
                "#}
            </style>
            <div class="cursor-dot"></div>
        </div>
    }
}
