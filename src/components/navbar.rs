use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::anim::{AnimContext, Ease, Props, TargetId, Timeline, TweenSpec};
use crate::config;
use crate::content::{NavLink, NAV_LINKS};
use crate::dom::{self, Listener};

/// Paused roll that lifts a link's two-line stack by one line.
pub fn roll_timeline(inner: TargetId) -> Timeline {
    Timeline::single(
        inner,
        Props::new().y_percent(-50.0),
        TweenSpec::new(config::NAV_ROLL_DURATION, Ease::Power3Out),
    )
    .paused()
}

fn render_link(link: &NavLink) -> Html {
    html! {
        <a key={link.label} href={link.href} class="nav-roll">
            <span class="inner">
                <span class="line">{link.label}</span>
                <span class="line accent">{link.label}</span>
            </span>
        </a>
    }
}

pub const NAV_CSS: &str = r#"
    .site-nav {
        position: fixed;
        top: 0;
        left: 0;
        right: 0;
        z-index: 50;
        mix-blend-mode: difference;
        color: #fff;
    }
    .site-nav-bar {
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 1rem 1.5rem;
        text-transform: uppercase;
        letter-spacing: -0.025em;
    }
    .site-nav-logo {
        font-weight: 900;
        font-size: 1.25rem;
        color: inherit;
        text-decoration: none;
        cursor: none;
    }
    .site-nav-links {
        display: flex;
        align-items: center;
        gap: 2rem;
    }
    .nav-roll {
        display: block;
        overflow: hidden;
        height: 24px;
        line-height: 24px;
        color: inherit;
        text-decoration: none;
        cursor: none;
    }
    .nav-roll .inner {
        display: block;
        will-change: transform;
    }
    .nav-roll .line {
        display: block;
    }
    .nav-roll .accent {
        color: #CCFF00;
    }
    .menu-toggle {
        display: inline-flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        gap: 4px;
        width: 2.5rem;
        height: 2.5rem;
        border-radius: 9999px;
        border: 1px solid rgba(255, 255, 255, 0.2);
        background: transparent;
        cursor: none;
    }
    .menu-toggle span {
        display: block;
        width: 18px;
        height: 2px;
        background: #fff;
    }
    .site-nav-menu {
        display: none;
        flex-direction: column;
        gap: 1rem;
        padding: 0 1.5rem 1.5rem;
        text-transform: uppercase;
    }
    .site-nav-menu.open {
        display: flex;
    }
    .site-nav-menu a {
        color: inherit;
        text-decoration: none;
        font-weight: 700;
        cursor: none;
    }
"#;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let nav_ref = use_node_ref();
    let menu_open = use_state(|| false);
    let (width, _) = use_window_size();
    let compact = width < config::NAV_BREAKPOINT_PX;

    // The dropdown only exists below the breakpoint.
    {
        let menu_open = menu_open.clone();
        use_effect_with_deps(
            move |compact| {
                if !*compact {
                    menu_open.set(false);
                }
                || ()
            },
            compact,
        );
    }

    // Hover rolls, rebuilt whenever the link list is swapped in or out.
    {
        let nav_ref = nav_ref.clone();
        use_effect_with_deps(
            move |compact| {
                let ctx = Rc::new(AnimContext::new());
                let mut listeners = Vec::new();

                if let (false, Some(nav)) = (*compact, nav_ref.cast::<HtmlElement>()) {
                    for item in dom::query_all(&nav, ".nav-roll") {
                        let Some(inner) = item
                            .query_selector(".inner")
                            .ok()
                            .flatten()
                            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                        else {
                            continue;
                        };
                        let roll = roll_timeline(ctx.bind(&inner));
                        let track = ctx.control(roll, Props::new().y_percent(0.0));

                        let enter_ctx = ctx.clone();
                        let on_enter = move |_: MouseEvent| enter_ctx.play(track);
                        listeners.push(Listener::new(item.as_ref(), "mouseenter", on_enter));
                        let leave_ctx = ctx.clone();
                        let on_leave = move |_: MouseEvent| leave_ctx.reverse(track);
                        listeners.push(Listener::new(item.as_ref(), "mouseleave", on_leave));
                    }
                    debug!("Navbar wired {} hover listeners", listeners.len());
                }

                move || {
                    drop(listeners);
                    ctx.revert();
                }
            },
            compact,
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    html! {
        <header ref={nav_ref} class="site-nav">
            <style>
                {NAV_CSS}
            </style>
            <div class="site-nav-bar">
                <a href="#" class="site-nav-logo">{"UniConnect"}</a>
                {
                    if compact {
                        html! {
                            <button
                                class="menu-toggle"
                                aria-label="Menu"
                                aria-expanded={(*menu_open).to_string()}
                                onclick={toggle_menu}
                            >
                                <span></span>
                                <span></span>
                                <span></span>
                            </button>
                        }
                    } else {
                        html! {
                            <nav class="site-nav-links">
                                { for NAV_LINKS.iter().map(render_link) }
                            </nav>
                        }
                    }
                }
            </div>
            {
                if compact {
                    html! {
                        <nav class={classes!("site-nav-menu", (*menu_open).then(|| "open"))}>
                            {
                                for NAV_LINKS.iter().map(|link| html! {
                                    <a key={link.label} href={link.href} onclick={close_menu.clone()}>
                                        {link.label}
                                    </a>
                                })
                            }
                        </nav>
                    }
                } else {
                    html! {}
                }
            }
        </header>
    }
}
