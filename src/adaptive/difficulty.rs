use super::config::DifficultyParams;
use super::types::{DifficultyProfile, PerformanceSample};

const LEVEL_CEILING: u32 = 10;
const LEVEL_FLOOR: u32 = 1;
const SPEED_CEILING: f64 = 2.0;
const SPEED_FLOOR: f64 = 0.5;
const COMPLEXITY_CEILING: f64 = 3.0;
const COMPLEXITY_FLOOR: f64 = 0.5;
const COLOR_SIMILARITY_CEILING: f64 = 0.8;
const COLOR_SIMILARITY_FLOOR: f64 = 0.1;
const PATTERN_CEILING: f64 = 3.0;
const PATTERN_FLOOR: f64 = 0.5;

// Raise gains land perfect accuracy (boost 0.2) exactly on the ceilings.
const RAISE_LEVEL_GAIN: f64 = 50.0;
const RAISE_SPEED_GAIN: f64 = 5.0;
const RAISE_COMPLEXITY_GAIN: f64 = 10.0;
const RAISE_COLOR_GAIN: f64 = 2.5;
const RAISE_PATTERN_GAIN: f64 = 10.0;

// Lower gains land zero accuracy (drop 0.6) exactly on the floors.
const LOWER_LEVEL_GAIN: f64 = 10.0;
const LOWER_SPEED_GAIN: f64 = 1.0;
const LOWER_COMPLEXITY_GAIN: f64 = 1.0;
const LOWER_COLOR_GAIN: f64 = 0.5;
const LOWER_PATTERN_GAIN: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct DifficultyEstimator {
    params: DifficultyParams,
}

impl DifficultyEstimator {
    pub fn new(params: DifficultyParams) -> Self {
        Self { params }
    }

    /// Difficulty vector for a user's next session, derived from the most
    /// recent window of that game's samples. Empty history returns the
    /// baseline; steady performance freezes at the baseline rather than
    /// interpolating.
    pub fn estimate(&self, history: &[PerformanceSample]) -> DifficultyProfile {
        let baseline = DifficultyProfile::default();
        if history.is_empty() {
            return baseline;
        }

        // A configured window of zero still reads the most recent sample.
        let window_start = history.len().saturating_sub(self.params.window.max(1));
        let window = &history[window_start..];

        let avg_accuracy = mean(window.iter().map(|s| s.accuracy));
        let avg_reaction_ms = mean(window.iter().map(|s| s.reaction_time_ms as f64));
        let trend = window[window.len() - 1].accuracy - window[0].accuracy;

        if avg_accuracy > self.params.raise_min_accuracy
            && avg_reaction_ms < self.params.raise_max_reaction_ms
            && trend > 0.0
        {
            return self.raise_from(baseline, avg_accuracy);
        }

        if avg_accuracy < self.params.lower_max_accuracy
            || avg_reaction_ms > self.params.lower_min_reaction_ms
        {
            return self.lower_from(baseline, avg_accuracy);
        }

        baseline
    }

    fn raise_from(&self, base: DifficultyProfile, avg_accuracy: f64) -> DifficultyProfile {
        let boost = avg_accuracy - self.params.raise_pivot;
        let level = base.level as f64 + (boost * RAISE_LEVEL_GAIN).round();
        DifficultyProfile {
            level: (level as u32).min(LEVEL_CEILING),
            speed: (base.speed + boost * RAISE_SPEED_GAIN).min(SPEED_CEILING),
            complexity: (base.complexity + boost * RAISE_COMPLEXITY_GAIN).min(COMPLEXITY_CEILING),
            color_similarity: (base.color_similarity + boost * RAISE_COLOR_GAIN)
                .min(COLOR_SIMILARITY_CEILING),
            pattern_complexity: (base.pattern_complexity + boost * RAISE_PATTERN_GAIN)
                .min(PATTERN_CEILING),
        }
    }

    fn lower_from(&self, base: DifficultyProfile, avg_accuracy: f64) -> DifficultyProfile {
        // The branch also fires on slow reaction times alone; a drop below
        // zero would push dimensions upward, so it is floored first.
        let drop = (self.params.lower_max_accuracy - avg_accuracy).max(0.0);
        let level = (base.level as f64 - (drop * LOWER_LEVEL_GAIN).round()).max(0.0);
        DifficultyProfile {
            level: (level as u32).max(LEVEL_FLOOR),
            speed: (base.speed - drop * LOWER_SPEED_GAIN).max(SPEED_FLOOR),
            complexity: (base.complexity - drop * LOWER_COMPLEXITY_GAIN).max(COMPLEXITY_FLOOR),
            color_similarity: (base.color_similarity - drop * LOWER_COLOR_GAIN)
                .max(COLOR_SIMILARITY_FLOOR),
            pattern_complexity: (base.pattern_complexity - drop * LOWER_PATTERN_GAIN)
                .max(PATTERN_FLOOR),
        }
    }
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
