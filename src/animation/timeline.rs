use crate::{
    animation::state::SceneState,
    construction::{action::Beat, script::ConstructionScript},
    foundation::{
        core::{FrameIndex, Fps},
        error::StellateResult,
    },
};

#[derive(Clone, Debug)]
struct PlacedBeat<'a> {
    start: f64,
    step: Option<usize>,
    beat: &'a Beat,
}

/// A script laid out on a clock, with the scene state cached at every beat boundary.
#[derive(Clone, Debug)]
pub struct Timeline<'a> {
    script: &'a ConstructionScript,
    fps: Fps,
    beats: Vec<PlacedBeat<'a>>,
    /// `keyframes[i]` is the state at the start of beat `i`; the last entry is the end state.
    keyframes: Vec<SceneState>,
    duration: f64,
}

impl<'a> Timeline<'a> {
    #[tracing::instrument(skip(script), fields(kind = ?script.kind))]
    pub fn new(script: &'a ConstructionScript, fps: Fps) -> StellateResult<Self> {
        let mut beats = Vec::new();
        let mut keyframes = Vec::new();
        let mut state = SceneState::initial(&script.shapes);
        let mut clock = 0.0;
        for (step, beat) in script.beats() {
            keyframes.push(state.clone());
            beats.push(PlacedBeat {
                start: clock,
                step,
                beat,
            });
            state = state.apply_beat(beat, 1.0, &script.shapes)?;
            clock += beat.run_time;
        }
        keyframes.push(state);
        tracing::debug!(beats = beats.len(), secs = clock, "timeline laid out");
        Ok(Self {
            script,
            fps,
            beats,
            keyframes,
            duration: clock,
        })
    }

    pub fn script(&self) -> &'a ConstructionScript {
        self.script
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    /// Frames needed to show the whole script, including its final state.
    pub fn duration_frames(&self) -> u64 {
        self.fps.secs_to_frames_ceil(self.duration) + 1
    }

    /// Index of the beat playing at `secs`. Zero-length beats are skipped over.
    fn beat_at(&self, secs: f64) -> Option<usize> {
        let after = self.beats.partition_point(|b| b.start <= secs);
        (0..after)
            .rev()
            .find(|&i| self.beats[i].start + self.beats[i].beat.run_time > secs)
    }

    pub fn state_at_secs(&self, secs: f64) -> StellateResult<SceneState> {
        match self.beat_at(secs) {
            Some(i) => {
                let placed = &self.beats[i];
                let progress = (secs - placed.start) / placed.beat.run_time;
                self.keyframes[i].apply_beat(placed.beat, progress, &self.script.shapes)
            }
            None if secs < 0.0 => Ok(self.keyframes[0].clone()),
            None => {
                // Past the end, or exactly on a boundary after instant beats.
                let done = self.beats.partition_point(|b| b.start + b.beat.run_time <= secs);
                Ok(self.keyframes[done].clone())
            }
        }
    }

    pub fn state_at(&self, frame: FrameIndex) -> StellateResult<SceneState> {
        self.state_at_secs(self.fps.frames_to_secs(frame.0))
    }

    /// Step playing at `secs`; `None` during the prelude.
    pub fn step_at_secs(&self, secs: f64) -> Option<usize> {
        let i = self
            .beat_at(secs)
            .or_else(|| self.beats.partition_point(|b| b.start <= secs).checked_sub(1))?;
        self.beats[i].step
    }

    /// Time at which every step's beats have all finished.
    pub fn step_end_secs(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.script.steps.len()];
        for b in &self.beats {
            if let Some(step) = b.step {
                out[step] = b.start + b.beat.run_time;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
