use crate::{
    animation::state::{StepSnapshot, replay},
    construction::{
        StarKind,
        action::{Action, Beat},
        palette::StarConfig,
        shape::{Geometry, Shape, ShapeSet, ShapeStyle},
    },
    foundation::{
        color::Color,
        core::Point,
        error::{StellateError, StellateResult},
    },
    geometry::star::StarGeometry,
};

/// Shape id every construction starts from.
pub const BASELINE_ID: &str = "baseline";
/// Shape id of the finished star polygon.
pub const STAR_ID: &str = "star";

/// Where instruction captions go and how they wrap.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionLayout {
    pub anchor: Point,
    pub size: f64,
    pub wrap: usize,
}

/// One numbered (or continued) instruction and the beats that illustrate it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConstructionStep {
    pub index: usize,
    pub label: String,
    /// `None` for continuation steps and uncaptioned steps.
    pub number: Option<u32>,
    pub instruction: Option<String>,
    pub beats: Vec<Beat>,
}

impl ConstructionStep {
    /// On-screen caption text, e.g. `"3. Draw arcs"`.
    pub fn caption(&self) -> Option<String> {
        match (&self.number, &self.instruction) {
            (Some(n), Some(text)) => Some(format!("{n}. {text}")),
            (None, Some(text)) => Some(text.clone()),
            (_, None) => None,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.beats.iter().map(|b| b.run_time).sum()
    }
}

/// A complete, validated construction: geometry, shapes and the ordered steps.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ConstructionScript {
    pub kind: StarKind,
    pub title: String,
    pub config: StarConfig,
    pub star: StarGeometry,
    pub shapes: ShapeSet,
    pub caption: CaptionLayout,
    /// Overrides the render clear color and background image when set.
    pub backdrop: Option<Color>,
    /// Title card played before the first step.
    pub prelude: Vec<Beat>,
    pub steps: Vec<ConstructionStep>,
}

impl ConstructionScript {
    pub fn duration_secs(&self) -> f64 {
        self.prelude.iter().map(|b| b.run_time).sum::<f64>()
            + self
                .steps
                .iter()
                .map(ConstructionStep::duration_secs)
                .sum::<f64>()
    }

    /// Beats in playback order, tagged with the step they belong to (`None` for the prelude).
    pub fn beats(&self) -> impl Iterator<Item = (Option<usize>, &Beat)> {
        self.prelude.iter().map(|b| (None, b)).chain(
            self.steps
                .iter()
                .flat_map(|s| s.beats.iter().map(move |b| (Some(s.index), b))),
        )
    }

    /// Scene state after the prelude and after every step, in order.
    pub fn snapshots(&self) -> StellateResult<Vec<StepSnapshot>> {
        replay(self)
    }

    fn validate(&self) -> StellateResult<Vec<StepSnapshot>> {
        let Some(first) = self.steps.first() else {
            return Err(StellateError::validation("script has no steps"));
        };
        let introduces_baseline = first
            .beats
            .iter()
            .flat_map(|b| &b.actions)
            .any(|a| a.introduces() && a.target() == Some(BASELINE_ID));
        if !introduces_baseline {
            return Err(StellateError::validation(format!(
                "first step '{}' must introduce the baseline",
                first.label
            )));
        }
        for later in &self.steps[1..] {
            let again = later
                .beats
                .iter()
                .flat_map(|b| &b.actions)
                .any(|a| a.introduces() && a.target() == Some(BASELINE_ID));
            if again {
                return Err(StellateError::validation(format!(
                    "step '{}' re-introduces the baseline",
                    later.label
                )));
            }
        }

        let snapshots = replay(self)?;
        let revealed = snapshots
            .last()
            .and_then(|s| s.state.shape(STAR_ID))
            .is_some_and(|s| s.on_stage && s.drawn >= 1.0 && s.fill_opacity >= 1.0 - 1e-9);
        if !revealed {
            return Err(StellateError::validation(
                "script must end by revealing the filled star",
            ));
        }
        Ok(snapshots)
    }
}

/// Incrementally scripts a construction, numbering instructions as it goes.
pub struct ScriptBuilder {
    kind: StarKind,
    title: String,
    config: StarConfig,
    star: StarGeometry,
    shapes: ShapeSet,
    caption: CaptionLayout,
    backdrop: Option<Color>,
    prelude: Vec<Beat>,
    steps: Vec<ConstructionStep>,
    instruction_count: u32,
    pending_caption: Option<String>,
}

impl ScriptBuilder {
    pub fn new(
        kind: StarKind,
        title: impl Into<String>,
        config: StarConfig,
        star: StarGeometry,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            config,
            star,
            shapes: ShapeSet::default(),
            caption: CaptionLayout {
                anchor: Point::new(0.0, -4.9),
                size: 0.3,
                wrap: 34,
            },
            backdrop: None,
            prelude: Vec::new(),
            steps: Vec::new(),
            instruction_count: 0,
            pending_caption: None,
        }
    }

    pub fn backdrop(&mut self, color: Color) -> &mut Self {
        self.backdrop = Some(color);
        self
    }

    pub fn star(&self) -> &StarGeometry {
        &self.star
    }

    pub fn config(&self) -> &StarConfig {
        &self.config
    }

    pub fn shape(
        &mut self,
        id: impl Into<String>,
        geometry: Geometry,
        style: ShapeStyle,
    ) -> StellateResult<&mut Self> {
        self.shapes.insert(Shape {
            id: id.into(),
            geometry,
            style,
        })?;
        Ok(self)
    }

    /// Start a numbered step; its caption appears with the next beat.
    pub fn step(&mut self, label: impl Into<String>, instruction: impl Into<String>) -> &mut Self {
        self.instruction_count += 1;
        self.open_step(label.into(), Some(self.instruction_count), Some(instruction.into()))
    }

    /// Start a step that continues the previous instruction without a new number.
    pub fn continued(
        &mut self,
        label: impl Into<String>,
        instruction: impl Into<String>,
    ) -> &mut Self {
        self.open_step(label.into(), None, Some(instruction.into()))
    }

    /// Start a step without a caption.
    pub fn silent_step(&mut self, label: impl Into<String>) -> &mut Self {
        self.open_step(label.into(), None, None)
    }

    fn open_step(&mut self, label: String, number: Option<u32>, instruction: Option<String>) -> &mut Self {
        let step = ConstructionStep {
            index: self.steps.len(),
            label,
            number,
            instruction,
            beats: Vec::new(),
        };
        self.pending_caption = step.caption();
        tracing::debug!(step = step.index, label = %step.label, "open step");
        self.steps.push(step);
        self
    }

    pub fn instruction_count(&self) -> u32 {
        self.instruction_count
    }

    /// Play actions over the default one second.
    pub fn play(&mut self, actions: impl IntoIterator<Item = Action>) -> StellateResult<&mut Self> {
        self.play_for(1.0, actions)
    }

    pub fn play_for(
        &mut self,
        run_time: f64,
        actions: impl IntoIterator<Item = Action>,
    ) -> StellateResult<&mut Self> {
        if !run_time.is_finite() || run_time < 0.0 {
            return Err(StellateError::invalid_argument(format!(
                "beat run time must be finite and >= 0, got {run_time}"
            )));
        }

        let mut beat_actions = Vec::new();
        if let Some(text) = self.pending_caption.take() {
            beat_actions.push(Action::Caption { text });
        }
        for action in actions {
            action.validate()?;
            for id in action.references() {
                self.shapes.require(id)?;
            }
            if !beat_actions.contains(&action) {
                beat_actions.push(action);
            }
        }
        self.push_beat(Beat::new(beat_actions, run_time));
        Ok(self)
    }

    /// Show the pending caption on its own beat.
    pub fn announce(&mut self) -> StellateResult<&mut Self> {
        self.play_for(1.0, std::iter::empty())
    }

    /// Apply actions without animation.
    pub fn instant(&mut self, actions: impl IntoIterator<Item = Action>) -> StellateResult<&mut Self> {
        self.play_for(0.0, actions)
    }

    pub fn wait(&mut self, secs: f64) -> StellateResult<&mut Self> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(StellateError::invalid_argument(format!(
                "wait must be finite and >= 0, got {secs}"
            )));
        }
        if self.pending_caption.is_some() {
            return self.play_for(secs, std::iter::empty());
        }
        self.push_beat(Beat::wait(secs));
        Ok(self)
    }

    fn push_beat(&mut self, beat: Beat) {
        match self.steps.last_mut() {
            Some(step) => step.beats.push(beat),
            None => self.prelude.push(beat),
        }
    }

    #[tracing::instrument(skip(self), fields(kind = ?self.kind))]
    pub fn build(self) -> StellateResult<ConstructionScript> {
        let script = ConstructionScript {
            kind: self.kind,
            title: self.title,
            config: self.config,
            star: self.star,
            shapes: self.shapes,
            caption: self.caption,
            backdrop: self.backdrop,
            prelude: self.prelude,
            steps: self.steps,
        };
        script.validate()?;
        tracing::debug!(
            steps = script.steps.len(),
            shapes = script.shapes.len(),
            secs = script.duration_secs(),
            "script built"
        );
        Ok(script)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/construction/script.rs"]
mod tests;
