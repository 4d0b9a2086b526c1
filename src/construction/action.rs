use crate::{
    animation::ease::Ease,
    foundation::error::{StellateError, StellateResult},
};

/// One change applied to the scene during a [`Beat`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    /// Put a shape on stage fully drawn, without animation.
    Add { id: String },
    /// Trace the outline from its start point.
    Create { id: String },
    FadeIn { id: String },
    FadeOut { id: String },
    /// Multiply current opacity by `1 - amount`.
    Dim { id: String, amount: f64 },
    /// Grow and highlight briefly, then return.
    Indicate { id: String },
    /// Radial burst around a dot.
    Flash { id: String },
    /// Animate fill opacity to `opacity`.
    Fill { id: String, opacity: f64 },
    DrawThenFill { id: String },
    /// Move a dot onto the position of another dot.
    Morph { id: String, into: String },
    /// Take a shape off stage instantly.
    Remove { id: String },
    Caption { text: String },
    ClearCaption,
}

impl Action {
    pub fn add(id: impl Into<String>) -> Self {
        Self::Add { id: id.into() }
    }

    pub fn create(id: impl Into<String>) -> Self {
        Self::Create { id: id.into() }
    }

    pub fn fade_in(id: impl Into<String>) -> Self {
        Self::FadeIn { id: id.into() }
    }

    pub fn fade_out(id: impl Into<String>) -> Self {
        Self::FadeOut { id: id.into() }
    }

    pub fn dim(id: impl Into<String>, amount: f64) -> Self {
        Self::Dim {
            id: id.into(),
            amount,
        }
    }

    pub fn indicate(id: impl Into<String>) -> Self {
        Self::Indicate { id: id.into() }
    }

    pub fn flash(id: impl Into<String>) -> Self {
        Self::Flash { id: id.into() }
    }

    pub fn fill(id: impl Into<String>, opacity: f64) -> Self {
        Self::Fill {
            id: id.into(),
            opacity,
        }
    }

    pub fn draw_then_fill(id: impl Into<String>) -> Self {
        Self::DrawThenFill { id: id.into() }
    }

    pub fn morph(id: impl Into<String>, into: impl Into<String>) -> Self {
        Self::Morph {
            id: id.into(),
            into: into.into(),
        }
    }

    pub fn remove(id: impl Into<String>) -> Self {
        Self::Remove { id: id.into() }
    }

    /// Shape the action changes, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Add { id }
            | Self::Create { id }
            | Self::FadeIn { id }
            | Self::FadeOut { id }
            | Self::Dim { id, .. }
            | Self::Indicate { id }
            | Self::Flash { id }
            | Self::Fill { id, .. }
            | Self::DrawThenFill { id }
            | Self::Morph { id, .. }
            | Self::Remove { id } => Some(id),
            Self::Caption { .. } | Self::ClearCaption => None,
        }
    }

    /// Every shape id the action reads or writes.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        let extra = match self {
            Self::Morph { into, .. } => Some(into.as_str()),
            _ => None,
        };
        self.target().into_iter().chain(extra)
    }

    /// Actions that bring an off-stage shape on stage.
    pub fn introduces(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Create { .. }
                | Self::FadeIn { .. }
                | Self::Indicate { .. }
                | Self::DrawThenFill { .. }
                | Self::Morph { .. }
        )
    }

    /// Actions that only make sense on a shape that is already visible.
    ///
    /// `Fill` is absent: it also sets the resting fill of a shape before it appears.
    pub fn requires_on_stage(&self) -> bool {
        matches!(
            self,
            Self::FadeOut { .. } | Self::Dim { .. } | Self::Remove { .. }
        )
    }

    pub fn rate(&self) -> Ease {
        match self {
            Self::Add { .. } | Self::Remove { .. } => Ease::Instant,
            Self::Indicate { .. } => Ease::ThereAndBack,
            Self::Flash { .. } => Ease::Linear,
            Self::DrawThenFill { .. } => Ease::DoubleSmooth,
            _ => Ease::Smooth,
        }
    }

    pub fn validate(&self) -> StellateResult<()> {
        match self {
            Self::Dim { amount, .. } if !(0.0..=1.0).contains(amount) => Err(
                StellateError::invalid_argument(format!("dim amount must be in 0..=1, got {amount}")),
            ),
            Self::Fill { opacity, .. } if !(0.0..=1.0).contains(opacity) => {
                Err(StellateError::invalid_argument(format!(
                    "fill opacity must be in 0..=1, got {opacity}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Simultaneous actions played over `run_time` seconds. No actions means a pause.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Beat {
    pub actions: Vec<Action>,
    pub run_time: f64,
}

impl Beat {
    pub fn new(actions: Vec<Action>, run_time: f64) -> Self {
        Self { actions, run_time }
    }

    pub fn wait(secs: f64) -> Self {
        Self {
            actions: Vec::new(),
            run_time: secs,
        }
    }

    pub fn is_wait(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/construction/action.rs"]
mod tests;
