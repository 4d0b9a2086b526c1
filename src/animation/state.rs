use std::collections::BTreeMap;

use crate::{
    construction::{
        action::{Action, Beat},
        script::ConstructionScript,
        shape::ShapeSet,
    },
    foundation::error::{StellateError, StellateResult},
};

/// Visual state of one shape at an instant.
///
/// `opacity` and `fill_opacity` are the shape's own attributes; they persist while the
/// shape is off stage so that a later fade-in restores them.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShapeState {
    pub on_stage: bool,
    pub opacity: f64,
    pub fill_opacity: f64,
    /// Fraction of the outline traced so far.
    pub drawn: f64,
    /// Highlight strength of an indicate, `0` at rest.
    pub emphasis: f64,
    /// Progress of a running flash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morph: Option<MorphState>,
}

impl ShapeState {
    fn resting(fill_opacity: f64) -> Self {
        Self {
            on_stage: false,
            opacity: 1.0,
            fill_opacity,
            drawn: 1.0,
            emphasis: 0.0,
            flash: None,
            morph: None,
        }
    }

    /// Whether anything of the shape would be painted.
    pub fn is_visible(&self) -> bool {
        self.on_stage && (self.opacity > 0.0 || self.fill_opacity > 0.0)
    }
}

/// A dot travelling toward the position of another dot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MorphState {
    pub into: String,
    pub progress: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionState {
    pub text: String,
    pub opacity: f64,
}

/// Everything the renderer needs to paint one instant of a script.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneState {
    pub shapes: BTreeMap<String, ShapeState>,
    pub caption: Option<CaptionState>,
    /// Previous caption while it crossfades out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing_caption: Option<CaptionState>,
}

impl SceneState {
    /// Every registered shape off stage at its resting style.
    pub fn initial(shapes: &ShapeSet) -> Self {
        Self {
            shapes: shapes
                .iter()
                .map(|s| (s.id.clone(), ShapeState::resting(s.style.fill_opacity)))
                .collect(),
            caption: None,
            outgoing_caption: None,
        }
    }

    pub fn shape(&self, id: &str) -> Option<&ShapeState> {
        self.shapes.get(id)
    }

    /// Ids of shapes currently on stage, sorted.
    pub fn on_stage(&self) -> impl Iterator<Item = &str> {
        self.shapes
            .iter()
            .filter(|(_, s)| s.on_stage)
            .map(|(id, _)| id.as_str())
    }

    /// State partway through `beat`, computed from the state at its start.
    ///
    /// `progress` is the raw fraction of the beat's run time; each action eases it with
    /// its own rate. At `progress >= 1` transient effects are cleared.
    pub fn apply_beat(&self, beat: &Beat, progress: f64, shapes: &ShapeSet) -> StellateResult<Self> {
        let done = progress >= 1.0;
        let mut next = self.clone();
        if done {
            next.outgoing_caption = None;
        }

        for action in &beat.actions {
            action.validate()?;
            let rate = action.rate();
            let e = if done {
                if rate.ends_at_one() { 1.0 } else { 0.0 }
            } else {
                rate.apply(progress)
            };

            match action {
                Action::Caption { text } => {
                    if done {
                        next.caption = Some(CaptionState {
                            text: text.clone(),
                            opacity: 1.0,
                        });
                    } else {
                        next.outgoing_caption = self.caption.as_ref().map(|c| CaptionState {
                            text: c.text.clone(),
                            opacity: c.opacity * (1.0 - e),
                        });
                        next.caption = Some(CaptionState {
                            text: text.clone(),
                            opacity: e,
                        });
                    }
                    continue;
                }
                Action::ClearCaption => {
                    next.caption = if done {
                        None
                    } else {
                        self.caption.as_ref().map(|c| CaptionState {
                            text: c.text.clone(),
                            opacity: c.opacity * (1.0 - e),
                        })
                    };
                    continue;
                }
                _ => {}
            }

            for id in action.references() {
                shapes.require(id)?;
            }
            let Some(id) = action.target() else {
                continue;
            };
            let before = self.shapes.get(id).ok_or_else(|| {
                StellateError::missing_dependency(format!("shape '{id}' has no scene state"))
            })?;
            if action.requires_on_stage() && !before.on_stage {
                return Err(StellateError::missing_dependency(format!(
                    "{action:?} needs shape '{id}' on stage"
                )));
            }
            let Some(after) = next.shapes.get_mut(id) else {
                continue;
            };

            match action {
                Action::Add { .. } => {
                    after.on_stage = true;
                    after.drawn = 1.0;
                }
                Action::Create { .. } => {
                    after.on_stage = true;
                    after.drawn = e;
                }
                Action::FadeIn { .. } => {
                    after.on_stage = true;
                    after.drawn = 1.0;
                    if !before.on_stage {
                        after.opacity = before.opacity * e;
                        after.fill_opacity = before.fill_opacity * e;
                        if done {
                            after.opacity = before.opacity;
                            after.fill_opacity = before.fill_opacity;
                        }
                    }
                }
                Action::FadeOut { .. } => {
                    if done {
                        *after = ShapeState {
                            on_stage: false,
                            ..ShapeState::resting(before.fill_opacity)
                        };
                        after.opacity = before.opacity;
                    } else {
                        after.opacity = before.opacity * (1.0 - e);
                        after.fill_opacity = before.fill_opacity * (1.0 - e);
                    }
                }
                Action::Dim { amount, .. } => {
                    let factor = 1.0 - amount * e;
                    after.opacity = before.opacity * factor;
                    after.fill_opacity = before.fill_opacity * factor;
                }
                Action::Indicate { .. } => {
                    if !before.on_stage {
                        after.on_stage = true;
                        after.drawn = 1.0;
                    }
                    after.emphasis = e;
                }
                Action::Flash { .. } => {
                    after.flash = (!done).then_some(e);
                }
                Action::Fill { opacity, .. } => {
                    after.fill_opacity = before.fill_opacity + (opacity - before.fill_opacity) * e;
                }
                Action::DrawThenFill { .. } => {
                    after.on_stage = true;
                    after.drawn = (2.0 * e).min(1.0);
                    after.fill_opacity = before.fill_opacity * (2.0 * e - 1.0).clamp(0.0, 1.0);
                }
                Action::Morph { into, .. } => {
                    after.on_stage = true;
                    after.drawn = 1.0;
                    after.morph = Some(MorphState {
                        into: into.clone(),
                        progress: e,
                    });
                }
                Action::Remove { .. } => {
                    *after = ShapeState {
                        on_stage: false,
                        opacity: before.opacity,
                        ..ShapeState::resting(before.fill_opacity)
                    };
                }
                Action::Caption { .. } | Action::ClearCaption => {}
            }
        }
        Ok(next)
    }
}

/// Scene state at a step boundary.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StepSnapshot {
    /// `None` for the state after the prelude.
    pub step: Option<usize>,
    pub label: String,
    pub state: SceneState,
}

/// Play every beat of `script` to completion, recording the state after the prelude and
/// after each step.
#[tracing::instrument(skip(script), fields(kind = ?script.kind))]
pub fn replay(script: &ConstructionScript) -> StellateResult<Vec<StepSnapshot>> {
    let mut state = SceneState::initial(&script.shapes);
    for beat in &script.prelude {
        state = state.apply_beat(beat, 1.0, &script.shapes)?;
    }
    let mut out = Vec::with_capacity(script.steps.len() + 1);
    out.push(StepSnapshot {
        step: None,
        label: "prelude".to_string(),
        state: state.clone(),
    });
    for step in &script.steps {
        for beat in &step.beats {
            state = state.apply_beat(beat, 1.0, &script.shapes).map_err(|e| match e {
                StellateError::MissingDependency(msg) => {
                    StellateError::missing_dependency(format!("step '{}': {msg}", step.label))
                }
                other => other,
            })?;
        }
        out.push(StepSnapshot {
            step: Some(step.index),
            label: step.label.clone(),
            state: state.clone(),
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
