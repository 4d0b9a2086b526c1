/// Rate functions mapping linear beat progress `0..=1` to animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// Sigmoid ease with flat ends; the default for most actions.
    Smooth,
    /// Smooth on each half: draw the border, then fill.
    DoubleSmooth,
    /// Goes 0 -> 1 -> 0; used for pulses that must end where they started.
    ThereAndBack,
    /// Jumps to the end value immediately.
    Instant,
}

const SMOOTH_INFLECTION: f64 = 10.0;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn smooth(t: f64) -> f64 {
    let error = sigmoid(-SMOOTH_INFLECTION / 2.0);
    ((sigmoid(SMOOTH_INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smooth(t),
            Self::DoubleSmooth => {
                if t < 0.5 {
                    0.5 * smooth(2.0 * t)
                } else {
                    0.5 * (1.0 + smooth(2.0 * t - 1.0))
                }
            }
            Self::ThereAndBack => {
                let u = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
                smooth(u)
            }
            Self::Instant => 1.0,
        }
    }

    /// Whether the eased value at `t == 1` equals 1 (false for pulses).
    pub fn ends_at_one(self) -> bool {
        !matches!(self, Self::ThereAndBack)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
