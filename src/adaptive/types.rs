use serde::{Deserialize, Serialize};

/// One of the four fixed skill groupings used to aggregate game performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Visual,
    Memory,
    Attention,
    Spatial,
}

impl Category {
    /// Fixed evaluation order for weak-area / strength scans.
    pub const ALL: [Category; 4] = [
        Category::Visual,
        Category::Memory,
        Category::Attention,
        Category::Spatial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Memory => "memory",
            Self::Attention => "attention",
            Self::Spatial => "spatial",
        }
    }

    /// Korean display label used in coaching copy.
    pub fn label_ko(&self) -> &'static str {
        match self {
            Self::Visual => "시각",
            Self::Memory => "기억력",
            Self::Attention => "집중력",
            Self::Spatial => "공간지각",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "visual" => Some(Self::Visual),
            "memory" => Some(Self::Memory),
            "attention" => Some(Self::Attention),
            "spatial" => Some(Self::Spatial),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    ColorMatching,
    ShapeRecognition,
    VisualTracking,
    CardMatching,
    SequenceMemory,
    PatternRecall,
    ReactionSpeed,
    StroopTest,
    TargetSearch,
    Sudoku,
    HanoiTower,
    MazeNavigation,
}

impl GameType {
    /// Catalog order, grouped by category.
    pub const ALL: [GameType; 12] = [
        GameType::ColorMatching,
        GameType::ShapeRecognition,
        GameType::VisualTracking,
        GameType::CardMatching,
        GameType::SequenceMemory,
        GameType::PatternRecall,
        GameType::ReactionSpeed,
        GameType::StroopTest,
        GameType::TargetSearch,
        GameType::Sudoku,
        GameType::HanoiTower,
        GameType::MazeNavigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColorMatching => "color-matching",
            Self::ShapeRecognition => "shape-recognition",
            Self::VisualTracking => "visual-tracking",
            Self::CardMatching => "card-matching",
            Self::SequenceMemory => "sequence-memory",
            Self::PatternRecall => "pattern-recall",
            Self::ReactionSpeed => "reaction-speed",
            Self::StroopTest => "stroop-test",
            Self::TargetSearch => "target-search",
            Self::Sudoku => "sudoku",
            Self::HanoiTower => "hanoi-tower",
            Self::MazeNavigation => "maze-navigation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "color-matching" => Some(Self::ColorMatching),
            "shape-recognition" => Some(Self::ShapeRecognition),
            "visual-tracking" => Some(Self::VisualTracking),
            "card-matching" => Some(Self::CardMatching),
            "sequence-memory" => Some(Self::SequenceMemory),
            "pattern-recall" => Some(Self::PatternRecall),
            "reaction-speed" => Some(Self::ReactionSpeed),
            "stroop-test" => Some(Self::StroopTest),
            "target-search" => Some(Self::TargetSearch),
            "sudoku" => Some(Self::Sudoku),
            "hanoi-tower" => Some(Self::HanoiTower),
            "maze-navigation" => Some(Self::MazeNavigation),
            _ => None,
        }
    }

    /// Every game belongs to exactly one skill category.
    pub fn category(&self) -> Category {
        match self {
            Self::ColorMatching | Self::ShapeRecognition | Self::VisualTracking => {
                Category::Visual
            }
            Self::CardMatching | Self::SequenceMemory | Self::PatternRecall => Category::Memory,
            Self::ReactionSpeed | Self::StroopTest | Self::TargetSearch => Category::Attention,
            Self::Sudoku | Self::HanoiTower | Self::MazeNavigation => Category::Spatial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum EmotionalState {
    Frustrated,
    #[default]
    Engaged,
    Bored,
    Confident,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frustrated => "frustrated",
            Self::Engaged => "engaged",
            Self::Bored => "bored",
            Self::Confident => "confident",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "frustrated" => Self::Frustrated,
            "bored" => Self::Bored,
            "confident" => Self::Confident,
            _ => Self::Engaged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SessionDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl SessionDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    ReduceDifficulty,
    ShowEncouragement,
    BreakSession,
    IncreaseDifficulty,
    ChallengeMode,
    Celebrate,
    NewGameType,
    IncreaseVariety,
    AddChallenge,
    MaintainDifficulty,
    PositiveFeedback,
    StartTraining,
}

impl SuggestedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReduceDifficulty => "reduce_difficulty",
            Self::ShowEncouragement => "show_encouragement",
            Self::BreakSession => "break_session",
            Self::IncreaseDifficulty => "increase_difficulty",
            Self::ChallengeMode => "challenge_mode",
            Self::Celebrate => "celebrate",
            Self::NewGameType => "new_game_type",
            Self::IncreaseVariety => "increase_variety",
            Self::AddChallenge => "add_challenge",
            Self::MaintainDifficulty => "maintain_difficulty",
            Self::PositiveFeedback => "positive_feedback",
            Self::StartTraining => "start_training",
        }
    }
}

/// One completed answer/interaction. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    pub user_id: String,
    pub session_id: String,
    pub game_type: GameType,
    pub accuracy: f64,
    pub reaction_time_ms: u64,
    pub attempts: u32,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<EmotionalState>,
}

impl Default for PerformanceSample {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            session_id: String::new(),
            game_type: GameType::ColorMatching,
            accuracy: 1.0,
            reaction_time_ms: 1500,
            attempts: 1,
            timestamp: chrono::Utc::now().timestamp_millis(),
            emotional_state: None,
        }
    }
}

/// Five-dimensional tuning vector consumed by a game's content generator.
/// `Default` is the cold-start baseline returned when a user has no history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyProfile {
    pub level: u32,
    pub speed: f64,
    pub complexity: f64,
    pub color_similarity: f64,
    pub pattern_complexity: f64,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self {
            level: 1,
            speed: 1.0,
            complexity: 1.0,
            color_similarity: 0.3,
            pattern_complexity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAssessment {
    pub state: EmotionalState,
    pub confidence: f64,
    pub suggested_actions: Vec<SuggestedAction>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecommendation {
    pub recommended_games: Vec<GameType>,
    pub weak_areas: Vec<Category>,
    pub strengths: Vec<Category>,
    pub next_session_plan: Vec<String>,
    pub estimated_progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressForecast {
    pub current_level: u32,
    pub predicted_level: f64,
    pub estimated_weeks_to_goal: u32,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}
