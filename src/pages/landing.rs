use chrono::Datelike;
use log::info;
use web_sys::Element;
use yew::prelude::*;

use crate::components::cursor::Cursor;
use crate::components::feature_tile::{FeatureGrid, FEATURE_TILE_CSS};
use crate::components::marquee::{is_reversed, MarqueeRow, MARQUEE_CSS};
use crate::components::navbar::Navbar;
use crate::components::stair_transition::StairTransition;
use crate::config;
use crate::content::{self, MARQUEE_PHRASES};
use crate::effects::ScrollEffects;

pub const LANDING_CSS: &str = r#"
    html, body {
        margin: 0;
        cursor: none;
    }
    .landing {
        min-height: 100vh;
        background: #F0F0F0;
        color: #000;
        font-family: "Inter", -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
        cursor: none;
    }
    .landing a,
    .landing button {
        cursor: none;
    }
    .landing ::selection {
        background: #000;
        color: #F0F0F0;
    }
    .hero {
        position: relative;
        height: 100svh;
        width: 100%;
        overflow: hidden;
        border-bottom: 1px solid #000;
    }
    .hero spline-viewer {
        display: block;
        width: 100%;
        height: 100%;
    }
    .hero-overlay {
        position: absolute;
        inset: 0;
        display: grid;
        place-items: center;
        pointer-events: none;
    }
    .hero-headline {
        text-align: center;
        text-transform: uppercase;
        letter-spacing: -0.02em;
        line-height: 0.95;
    }
    .hero-headline h1 {
        margin: 0;
        font-size: 10vw;
        font-weight: 900;
    }
    .features {
        position: relative;
        border-bottom: 1px solid #000;
    }
    .feature-grid {
        display: grid;
        grid-template-columns: 1fr;
    }
    .marquees {
        border-bottom: 1px solid #000;
        padding: 2rem 0;
        background: #000;
        color: #F0F0F0;
    }
    .cta {
        padding: 6rem 0;
    }
    .cta-container {
        max-width: 80rem;
        margin: 0 auto;
        padding: 0 1.5rem;
    }
    .reveal-mask {
        overflow: hidden;
    }
    .reveal-line {
        margin: 0;
        font-size: 3.75rem;
        font-weight: 900;
        text-transform: uppercase;
        line-height: 0.95;
    }
    .cta-copy {
        margin-top: 1.5rem;
        max-width: 48rem;
        font-size: 1.125rem;
    }
    .cta-media {
        margin-top: 3rem;
        height: 24rem;
        overflow: hidden;
        border: 1px solid #000;
    }
    .cta-media img {
        display: block;
        width: 100%;
        height: 120%;
        object-fit: cover;
    }
    .site-footer {
        border-top: 1px solid #000;
        padding: 3rem 0;
        text-align: center;
        text-transform: uppercase;
        font-size: 0.875rem;
        letter-spacing: -0.025em;
    }
    @media (min-width: 768px) {
        .feature-grid {
            grid-template-columns: repeat(2, 1fr);
        }
        .marquees {
            padding: 3.5rem 0;
        }
        .cta {
            padding: 10rem 0;
        }
        .reveal-line {
            font-size: 6rem;
        }
        .cta-copy {
            font-size: 1.25rem;
        }
    }
    @media (min-width: 1024px) {
        .feature-grid {
            grid-template-columns: repeat(4, 1fr);
        }
    }
"#;

#[function_component(Landing)]
pub fn landing() -> Html {
    let root_ref = use_node_ref();
    let entered = use_state(|| false);

    // Always open at the top of the page
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    {
        let root_ref = root_ref.clone();
        use_effect_with_deps(
            move |_| {
                let effects = root_ref.cast::<Element>().map(|root| ScrollEffects::mount(&root));
                move || drop(effects)
            },
            (),
        );
    }

    let on_entered = {
        let entered = entered.clone();
        Callback::from(move |_: ()| {
            info!("Landing page revealed");
            entered.set(true);
        })
    };

    let year = chrono::Local::now().year();

    html! {
        <div
            ref={root_ref}
            class={classes!("landing", (*entered).then(|| "entered"))}
            aria-busy={(!*entered).to_string()}
        >
            <style>
                {LANDING_CSS}
                {FEATURE_TILE_CSS}
                {MARQUEE_CSS}
            </style>

            <StairTransition on_complete={on_entered} />
            <Navbar />
            <Cursor />

            <section class="hero">
                <spline-viewer url={config::SPLINE_SCENE_URL}></spline-viewer>
                <div class="hero-overlay">
                    <div class="hero-headline">
                        <h1>{"ONE NATION."}</h1>
                        <h1>{"ONE APP."}</h1>
                    </div>
                </div>
            </section>

            <section class="features">
                <FeatureGrid />
            </section>

            <section class="marquees">
                {
                    for MARQUEE_PHRASES.iter().enumerate().map(|(i, phrase)| html! {
                        <MarqueeRow
                            key={i.to_string()}
                            text={content::marquee_text(phrase)}
                            reverse={is_reversed(i)}
                        />
                    })
                }
            </section>

            <section class="cta">
                <div class="cta-container">
                    <div class="reveal-mask">
                        <p class="reveal-line">{"Study Now,"}</p>
                    </div>
                    <div class="reveal-mask">
                        <p class="reveal-line">{"Pay Later."}</p>
                    </div>
                    <p class="cta-copy">
                        {"Flexible financing designed for ambitious learners. Focus on mastering skills today and settle tuition once you land your role through UniConnect."}
                    </p>
                    <div class="cta-media">
                        <img data-parallax="true" src={content::CTA_IMAGE} alt="Students on campus" loading="lazy" />
                    </div>
                </div>
            </section>

            <footer class="site-footer">{content::copyright(year)}</footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::navbar::NAV_CSS;

    fn rule<'a>(css: &'a str, selector: &str) -> &'a str {
        let open = format!("{} {{", selector);
        let start = css
            .find(&open)
            .unwrap_or_else(|| panic!("no rule for {}", selector))
            + open.len();
        let len = css[start..].find('}').unwrap();
        &css[start..start + len]
    }

    #[test]
    fn native_cursor_is_hidden_everywhere() {
        for selector in ["html, body", ".landing", ".landing a,\n    .landing button"] {
            assert!(rule(LANDING_CSS, selector).contains("cursor: none;"), "{}", selector);
        }
        for selector in [".site-nav-logo", ".nav-roll", ".menu-toggle", ".site-nav-menu a"] {
            assert!(rule(NAV_CSS, selector).contains("cursor: none;"), "{}", selector);
        }
    }
}
