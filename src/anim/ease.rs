// `PowerN` uses an exponent of N + 1, so `Power1` is quadratic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power2Out,
    Power3Out,
    Power4Out,
    Power4InOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => out(t, 2),
            Ease::Power2Out => out(t, 3),
            Ease::Power3Out => out(t, 4),
            Ease::Power4Out => out(t, 5),
            Ease::Power4InOut => in_out(t, 5),
        }
    }
}

fn out(t: f64, exp: i32) -> f64 {
    1.0 - (1.0 - t).powi(exp)
}

fn in_out(t: f64, exp: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(exp) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
    }
}
