/// Easing curves for timing animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Maps a linear fraction in [0, 1] onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    (t - 1.0) * u * u + 1.0
                }
            }
        }
    }

    /// Host-facing names. `easeIn`/`easeOut` are the quadratic curves;
    /// `easeInOut` and `default` are the cubic in-out curve.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Easing::Linear),
            "easeIn" => Some(Easing::EaseInQuad),
            "easeOut" => Some(Easing::EaseOutQuad),
            "easeInOutQuad" => Some(Easing::EaseInOutQuad),
            "easeInCubic" => Some(Easing::EaseInCubic),
            "easeOutCubic" => Some(Easing::EaseOutCubic),
            "easeInOut" | "easeInOutCubic" | "default" => Some(Easing::EaseInOutCubic),
            _ => None,
        }
    }
}
