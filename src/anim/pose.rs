use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u32);

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    // Exact at both ends, so a reversed tween lands back on its start value.
    a * (1.0 - t) + b * t
}

fn num(v: f64) -> f64 {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    // `#rgb` or `#rrggbb`
    pub fn parse(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#')?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
        match digits.len() {
            3 => {
                let mut it = digits.chars().map(|c| channel(&format!("{c}{c}")));
                Some(Rgb { r: it.next()??, g: it.next()??, b: it.next()?? })
            }
            6 => Some(Rgb {
                r: channel(digits.get(0..2)?)?,
                g: channel(digits.get(2..4)?)?,
                b: channel(digits.get(4..6)?)?,
            }),
            _ => None,
        }
    }

    pub fn lerp(self, to: Rgb, t: f64) -> Rgb {
        Rgb {
            r: lerp(self.r, to.r, t),
            g: lerp(self.g, to.g, t),
            b: lerp(self.b, to.b, t),
        }
    }

    pub fn css(self) -> String {
        format!(
            "rgb({}, {}, {})",
            self.r.round().clamp(0.0, 255.0),
            self.g.round().clamp(0.0, 255.0),
            self.b.round().clamp(0.0, 255.0)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Display {
    None,
}

// Unset fields are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub x_percent: Option<f64>,
    pub y_percent: Option<f64>,
    pub scale: Option<f64>,
    /// Opacity that also toggles `visibility: hidden` at zero.
    pub auto_alpha: Option<f64>,
    pub background: Option<Rgb>,
    pub color: Option<Rgb>,
    pub display: Option<Display>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, v: f64) -> Self {
        self.x = Some(v);
        self
    }

    pub fn y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }

    pub fn x_percent(mut self, v: f64) -> Self {
        self.x_percent = Some(v);
        self
    }

    pub fn y_percent(mut self, v: f64) -> Self {
        self.y_percent = Some(v);
        self
    }

    pub fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn auto_alpha(mut self, v: f64) -> Self {
        self.auto_alpha = Some(v);
        self
    }

    pub fn background(mut self, hex: &str) -> Self {
        self.background = Rgb::parse(hex);
        self
    }

    pub fn color(mut self, hex: &str) -> Self {
        self.color = Rgb::parse(hex);
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Props::default()
    }

    pub fn release(&mut self, other: &Props) {
        if other.x.is_some() {
            self.x = None;
        }
        if other.y.is_some() {
            self.y = None;
        }
        if other.x_percent.is_some() {
            self.x_percent = None;
        }
        if other.y_percent.is_some() {
            self.y_percent = None;
        }
        if other.scale.is_some() {
            self.scale = None;
        }
        if other.auto_alpha.is_some() {
            self.auto_alpha = None;
        }
        if other.background.is_some() {
            self.background = None;
        }
        if other.color.is_some() {
            self.color = None;
        }
        if other.display.is_some() {
            self.display = None;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub x_percent: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub opacity: Option<f64>,
    pub background: Option<Rgb>,
    pub color: Option<Rgb>,
    pub display: Option<Display>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            x_percent: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            opacity: None,
            background: None,
            color: None,
            display: None,
        }
    }
}

impl Pose {
    // Fields `to` leaves unset are untouched.
    pub fn blend(&mut self, from: &Pose, to: &Props, t: f64) {
        if let Some(v) = to.x {
            self.x = lerp(from.x, v, t);
        }
        if let Some(v) = to.y {
            self.y = lerp(from.y, v, t);
        }
        if let Some(v) = to.x_percent {
            self.x_percent = lerp(from.x_percent, v, t);
        }
        if let Some(v) = to.y_percent {
            self.y_percent = lerp(from.y_percent, v, t);
        }
        if let Some(v) = to.scale {
            self.scale = lerp(from.scale, v, t);
        }
        if let Some(v) = to.auto_alpha {
            self.opacity = Some(lerp(from.opacity.unwrap_or(1.0), v, t));
        }
        if let Some(c) = to.background {
            self.background = Some(from.background.unwrap_or(c).lerp(c, t));
        }
        if let Some(c) = to.color {
            self.color = Some(from.color.unwrap_or(c).lerp(c, t));
        }
        if let Some(d) = to.display {
            if t >= 1.0 {
                self.display = Some(d);
            }
        }
    }

    pub fn apply(&mut self, to: &Props) {
        let from = self.clone();
        self.blend(&from, to, 1.0);
    }

    pub fn transform_css(&self) -> String {
        format!(
            "translate({}%, {}%) translate3d({}px, {}px, 0px) scale({})",
            num(self.x_percent),
            num(self.y_percent),
            num(self.x),
            num(self.y),
            num(self.scale)
        )
    }

    pub fn style_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("transform", self.transform_css())];
        if let Some(opacity) = self.opacity {
            pairs.push(("opacity", num(opacity).to_string()));
            let visibility = if opacity <= 0.0 { "hidden" } else { "inherit" };
            pairs.push(("visibility", visibility.to_string()));
        }
        if let Some(bg) = self.background {
            pairs.push(("background-color", bg.css()));
        }
        if let Some(color) = self.color {
            pairs.push(("color", color.css()));
        }
        if let Some(Display::None) = self.display {
            pairs.push(("display", "none".to_string()));
        }
        pairs
    }
}

#[derive(Debug, Default)]
pub struct Stage {
    poses: BTreeMap<TargetId, Pose>,
    dirty: BTreeSet<TargetId>,
}

impl Stage {
    pub fn pose(&self, id: TargetId) -> Pose {
        self.poses.get(&id).cloned().unwrap_or_default()
    }

    pub fn pose_mut(&mut self, id: TargetId) -> &mut Pose {
        self.dirty.insert(id);
        self.poses.entry(id).or_default()
    }

    pub fn take_dirty(&mut self) -> Vec<TargetId> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    pub fn remove(&mut self, id: TargetId) {
        self.poses.remove(&id);
        self.dirty.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgb::parse("#CCFF00"), Some(Rgb { r: 204.0, g: 255.0, b: 0.0 }));
        assert_eq!(Rgb::parse("#000"), Some(Rgb { r: 0.0, g: 0.0, b: 0.0 }));
        assert_eq!(Rgb::parse("CCFF00"), None);
        assert_eq!(Rgb::parse("#12345"), None);
        assert_eq!(Rgb::parse("#zzzzzz"), None);
    }

    #[test]
    fn color_blend_lands_on_target() {
        let paper = Rgb::parse("#F0F0F0").unwrap();
        let accent = Rgb::parse("#CCFF00").unwrap();
        assert_eq!(paper.lerp(accent, 1.0), accent);
        assert_eq!(paper.lerp(accent, 0.0), paper);
        assert_eq!(paper.lerp(accent, 0.5).css(), "rgb(222, 248, 120)");
    }

    #[test]
    fn blend_only_touches_listed_fields() {
        let from = Pose { x: 10.0, scale: 0.5, ..Pose::default() };
        let mut pose = from.clone();
        pose.blend(&from, &Props::new().y_percent(-50.0), 0.5);
        assert_eq!(pose.y_percent, -25.0);
        assert_eq!(pose.x, 10.0);
        assert_eq!(pose.scale, 0.5);
    }

    #[test]
    fn auto_alpha_hides_at_zero() {
        let mut pose = Pose::default();
        pose.apply(&Props::new().auto_alpha(0.0));
        assert_eq!(pose.opacity, Some(0.0));
        let pairs = pose.style_pairs();
        assert!(pairs.contains(&("visibility", "hidden".to_string())));
        assert!(pairs.contains(&("opacity", "0".to_string())));

        let from = pose.clone();
        pose.blend(&from, &Props::new().auto_alpha(1.0), 0.3);
        assert!(pose.style_pairs().contains(&("visibility", "inherit".to_string())));
    }

    #[test]
    fn display_switches_only_at_the_end() {
        let from = Pose::default();
        let mut pose = from.clone();
        let to = Props::new().display(Display::None);
        pose.blend(&from, &to, 0.99);
        assert_eq!(pose.display, None);
        pose.blend(&from, &to, 1.0);
        assert_eq!(pose.display, Some(Display::None));
        assert!(pose.style_pairs().contains(&("display", "none".to_string())));
    }

    #[test]
    fn transform_css_orders_percent_before_pixels() {
        let pose = Pose { x: 12.0, y: -8.0, y_percent: 110.0, scale: 0.9, ..Pose::default() };
        assert_eq!(
            pose.transform_css(),
            "translate(0%, 110%) translate3d(12px, -8px, 0px) scale(0.9)"
        );
    }

    #[test]
    fn release_clears_shared_fields() {
        let mut props = Props::new().x(1.0).y(2.0).scale(1.0);
        let newer = Props::new().x(5.0).y(6.0);
        props.release(&newer);
        assert_eq!(props, Props::new().scale(1.0));
        props.release(&Props::new().scale(0.0));
        assert!(props.is_empty());
    }

    #[test]
    fn stage_tracks_dirty_targets() {
        let mut stage = Stage::default();
        stage.pose_mut(TargetId(2)).x = 4.0;
        stage.pose_mut(TargetId(1)).y = 1.0;
        assert_eq!(stage.take_dirty(), vec![TargetId(1), TargetId(2)]);
        assert!(stage.take_dirty().is_empty());
        assert_eq!(stage.pose(TargetId(2)).x, 4.0);
        stage.remove(TargetId(2));
        assert_eq!(stage.pose(TargetId(2)), Pose::default());
    }
}
