use std::rc::Rc;

use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::anim::{AnimContext, Ease, Props, TweenSpec};
use crate::config;
use crate::content::FEATURE_ITEMS;
use crate::dom::Listener;

#[derive(Properties, PartialEq)]
pub struct FeatureTileProps {
    pub title: AttrValue,
    pub img: AttrValue,
}

pub fn tile_colors(hovered: bool) -> Props {
    let background = if hovered { config::ACCENT } else { config::PAPER };
    Props::new().background(background).color(config::INK)
}

pub fn thumbnail_state(hovered: bool) -> Props {
    if hovered {
        Props::new().auto_alpha(1.0).scale(1.0)
    } else {
        Props::new().auto_alpha(0.0).scale(config::THUMB_HIDDEN_SCALE)
    }
}

/// Thumbnail position inside the tile for a pointer at `client`, given the
/// tile's top-left corner in the same coordinates.
pub fn thumbnail_offset(client: (f64, f64), tile_origin: (f64, f64)) -> (f64, f64) {
    let (anchor_x, anchor_y) = config::THUMB_ANCHOR;
    (client.0 - tile_origin.0 - anchor_x, client.1 - tile_origin.1 - anchor_y)
}

fn color_spec() -> TweenSpec {
    TweenSpec::new(config::TILE_COLOR_DURATION, Ease::Power2Out)
}

fn fade_spec() -> TweenSpec {
    TweenSpec::new(config::THUMB_FADE_DURATION, Ease::Power3Out)
}

#[function_component(FeatureTile)]
pub fn feature_tile(props: &FeatureTileProps) -> Html {
    let tile_ref = use_node_ref();
    let img_ref = use_node_ref();

    {
        let tile_ref = tile_ref.clone();
        let img_ref = img_ref.clone();
        use_effect_with_deps(
            move |_| {
                let ctx = Rc::new(AnimContext::new());
                let mut listeners = Vec::new();

                let tile = tile_ref.cast::<HtmlElement>();
                let img = img_ref.cast::<HtmlElement>();
                if let (Some(tile), Some(img)) = (tile, img) {
                    ctx.set(&tile, tile_colors(false));
                    ctx.set(&img, thumbnail_state(false));

                    listeners.push(Listener::new(tile.as_ref(), "mouseenter", {
                        let (ctx, tile, img) = (ctx.clone(), tile.clone(), img.clone());
                        move |_: MouseEvent| {
                            ctx.to(&tile, tile_colors(true), color_spec());
                            ctx.to(&img, thumbnail_state(true), fade_spec());
                        }
                    }));
                    listeners.push(Listener::new(tile.as_ref(), "mouseleave", {
                        let (ctx, tile, img) = (ctx.clone(), tile.clone(), img.clone());
                        move |_: MouseEvent| {
                            ctx.to(&tile, tile_colors(false), color_spec());
                            ctx.to(&img, thumbnail_state(false), fade_spec());
                        }
                    }));
                    listeners.push(Listener::new(tile.as_ref(), "mousemove", {
                        let (ctx, tile, img) = (ctx.clone(), tile.clone(), img.clone());
                        move |e: MouseEvent| {
                            let rect = tile.get_bounding_client_rect();
                            let (x, y) = thumbnail_offset(
                                (f64::from(e.client_x()), f64::from(e.client_y())),
                                (rect.left(), rect.top()),
                            );
                            ctx.to(
                                &img,
                                Props::new().x(x).y(y),
                                TweenSpec::new(config::THUMB_FOLLOW_DURATION, Ease::Power3Out),
                            );
                        }
                    }));
                }

                move || {
                    drop(listeners);
                    ctx.revert();
                }
            },
            (),
        );
    }

    html! {
        <div ref={tile_ref} class="feature-tile">
            <h3 class="feature-tile-title">{props.title.clone()}</h3>
            <img ref={img_ref} class="feature-tile-thumb" src={props.img.clone()} alt="" />
        </div>
    }
}

#[function_component(FeatureGrid)]
pub fn feature_grid() -> Html {
    html! {
        <div class="feature-grid">
            {
                for FEATURE_ITEMS.iter().map(|item| html! {
                    <FeatureTile key={item.title} title={item.title} img={item.img} />
                })
            }
        </div>
    }
}

pub const FEATURE_TILE_CSS: &str = r#"
    .feature-tile {
        position: relative;
        aspect-ratio: 4 / 3;
        border: 1px solid #000;
        padding: 1.5rem;
        overflow: hidden;
        cursor: none;
        background-color: #F0F0F0;
    }
    .feature-tile-title {
        margin: 0;
        font-size: 1.875rem;
        font-weight: 900;
        text-transform: uppercase;
        letter-spacing: -0.025em;
    }
    .feature-tile-thumb {
        pointer-events: none;
        position: absolute;
        top: 0;
        left: 0;
        width: 12rem;
        height: 9rem;
        object-fit: cover;
        border-radius: 0.375rem;
        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);
        opacity: 0;
        transform: scale(0.9);
    }
    @media (min-width: 768px) {
        .feature-tile {
            aspect-ratio: 1 / 1;
            padding: 2rem;
        }
        .feature-tile-title {
            font-size: 2.25rem;
        }
    }
"#;
