// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skill assessment service.
//!
//! Turns a vision-model [`SkillAnalysis`] into a learning path assignment
//! plus the celebration and encouragement shown with it.

use crate::models::assessment::{
    AssessmentResult, LearningPathId, LessonPreview, MarkerCategory, MarkerStrength,
    PathAssignment, SkillAnalysis, SkillLevel,
};
use crate::services::VisionClient;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Runs assessments; owns the randomness used for encouragement picks.
pub struct AssessmentService {
    vision: VisionClient,
    rng: Mutex<StdRng>,
}

impl AssessmentService {
    pub fn new(vision: VisionClient) -> Self {
        Self::with_rng(vision, StdRng::from_entropy())
    }

    /// Use a fixed random source (tests).
    pub fn with_rng(vision: VisionClient, rng: StdRng) -> Self {
        Self {
            vision,
            rng: Mutex::new(rng),
        }
    }

    pub fn vision(&self) -> &VisionClient {
        &self.vision
    }

    /// Analyze a drawing and build the full assessment.
    pub async fn assess(
        &self,
        image_url: &str,
        drawing_time: u32,
        now: DateTime<Utc>,
    ) -> AssessmentResult {
        let analysis = self.vision.detect_skill_level(image_url, drawing_time).await;
        self.build_result(analysis, now)
    }

    /// Build the learner-facing result from an analysis.
    pub fn build_result(&self, analysis: SkillAnalysis, now: DateTime<Utc>) -> AssessmentResult {
        let assignment = assign_learning_path(&analysis);
        let encouragement = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            encouragement(analysis.skill_level, &mut *rng)
        };

        tracing::info!(
            path = assignment.path.as_str(),
            level = ?analysis.skill_level,
            "Assessment completed"
        );

        AssessmentResult {
            celebration_message: celebration_message(assignment.path).to_string(),
            positives: analysis.positives,
            encouragement: encouragement.to_string(),
            skill_level: analysis.skill_level,
            skill_markers: analysis.skill_markers,
            recommended_path: assignment.path,
            path_reason: assignment.reason,
            detected_styles: analysis.detected_styles,
            next_steps: assignment.next_steps,
            first_lesson: assignment.first_lesson,
            analysis_id: uuid::Uuid::new_v4().to_string(),
            timestamp: format_utc_rfc3339(now),
            model: format!("{}-assessment", self.vision.model()),
        }
    }
}

fn preview(
    id: &str,
    title: &str,
    description: &str,
    duration: &str,
    difficulty: &str,
    preview_url: Option<&str>,
) -> LessonPreview {
    LessonPreview {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration: duration.to_string(),
        difficulty: difficulty.to_string(),
        preview_url: preview_url.map(String::from),
    }
}

fn steps(items: [&str; 3]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn first_circle() -> LessonPreview {
    preview(
        "foundation-01",
        "Your First Circle",
        "Discover the joy of confident lines and perfect circles. It's more fun than you think!",
        "2 minutes",
        "Beginner",
        Some("/lessons/foundation/01/preview"),
    )
}

/// Pick the learning path for an analysis.
///
/// Learners with some experience go to Skill Sharpener only when a shape or
/// line-quality marker is already solid.
pub fn assign_learning_path(analysis: &SkillAnalysis) -> PathAssignment {
    match analysis.skill_level {
        SkillLevel::AbsoluteBeginner => PathAssignment {
            path: LearningPathId::FoundationBuilder,
            reason: "Perfect! You're starting your artistic journey. Our Foundation Builder path will help you build confidence with the basics step by step.".to_string(),
            first_lesson: first_circle(),
            next_steps: steps([
                "Master confident lines and basic shapes",
                "Build your artistic confidence one stroke at a time",
                "Learn the foundation skills that support all art",
            ]),
        },
        SkillLevel::SomeExperience => {
            let has_strong_foundation = analysis.skill_markers.iter().any(|m| {
                matches!(
                    m.category,
                    MarkerCategory::Shapes | MarkerCategory::LineQuality
                ) && m.strength == MarkerStrength::Solid
            });

            if has_strong_foundation {
                PathAssignment {
                    path: LearningPathId::SkillSharpener,
                    reason: "I see you have some solid foundation skills! Skill Sharpener will help you take your technique to the next level.".to_string(),
                    first_lesson: preview(
                        "sharpener-01",
                        "Confident Line Variation",
                        "Take your line work from good to great with expressive techniques",
                        "3 minutes",
                        "Intermediate",
                        Some("/lessons/sharpener/01/preview"),
                    ),
                    next_steps: steps([
                        "Refine your technique with targeted exercises",
                        "Add expressiveness to your line work",
                        "Build on your existing strengths",
                    ]),
                }
            } else {
                PathAssignment {
                    path: LearningPathId::FoundationBuilder,
                    reason: "Let's strengthen your fundamentals! Foundation Builder will give you the solid base to really take off.".to_string(),
                    first_lesson: first_circle(),
                    next_steps: steps([
                        "Solidify your foundational skills",
                        "Build consistency in your technique",
                        "Prepare for more advanced concepts",
                    ]),
                }
            }
        }
        SkillLevel::Intermediate => PathAssignment {
            path: LearningPathId::SkillSharpener,
            reason: "Excellent technique foundation! Skill Sharpener will help you refine your style and tackle new challenges.".to_string(),
            first_lesson: preview(
                "sharpener-05",
                "Advanced Shading Techniques",
                "Master light and shadow to bring your drawings to life",
                "4 minutes",
                "Intermediate",
                Some("/lessons/sharpener/05/preview"),
            ),
            next_steps: steps([
                "Refine advanced techniques",
                "Develop your personal style",
                "Master complex artistic concepts",
            ]),
        },
        SkillLevel::Advanced => PathAssignment {
            path: LearningPathId::MasterClass,
            reason: "Impressive skills! Master Class will help you explore artistic styles and push creative boundaries.".to_string(),
            first_lesson: preview(
                "master-01",
                "Style Exploration: Finding Your Voice",
                "Discover what makes your art uniquely yours",
                "5 minutes",
                "Advanced",
                Some("/lessons/master/01/preview"),
            ),
            next_steps: steps([
                "Explore different artistic styles",
                "Develop your unique artistic voice",
                "Create portfolio-worthy pieces",
            ]),
        },
    }
}

/// Welcome message for a newly assigned path.
pub fn celebration_message(path: LearningPathId) -> &'static str {
    match path {
        LearningPathId::FoundationBuilder => "Welcome to your artistic journey! Every great artist started exactly where you are. Let's build something amazing together! 🎨✨",
        LearningPathId::SkillSharpener => "Welcome back, Artist! I can see the skills you've developed. Ready to take them to the next level? 🚀🎨",
        LearningPathId::MasterClass => "Welcome, accomplished Artist! Your technical skills are impressive. Time to explore new creative horizons! 🎭✨",
    }
}

fn encouragements(level: SkillLevel) -> &'static [&'static str] {
    match level {
        SkillLevel::AbsoluteBeginner => &[
            "You have the most important thing - the courage to create! 🌟",
            "Every master artist was once a beginner. You're on an exciting journey! 🚀",
            "I love your enthusiasm for learning. That's what makes great artists! ✨",
        ],
        SkillLevel::SomeExperience => &[
            "I can see you've been practicing! Your skills are developing beautifully. 🎯",
            "You're building real artistic muscle. Keep that growth mindset going! 💪",
            "Your improvement potential is exciting to see! 🌱",
        ],
        SkillLevel::Intermediate => &[
            "Your technique shows real dedication to the craft. Impressive! 🎨",
            "You've developed solid skills. Time to add your personal flair! ✨",
            "I see an artist who understands the fundamentals. Let's explore further! 🧭",
        ],
        SkillLevel::Advanced => &[
            "Your artistic maturity really shows. Exciting possibilities ahead! 🎭",
            "You have the skills to create amazing work. Let's push boundaries! 🚀",
            "Ready to explore new artistic territories? Your foundation is rock solid! ⛰️",
        ],
    }
}

/// Pick one encouragement for a skill level.
pub fn encouragement<R: Rng + ?Sized>(level: SkillLevel, rng: &mut R) -> &'static str {
    let options = encouragements(level);
    options.choose(rng).copied().unwrap_or(options[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::SkillMarker;
    use crate::services::vision::fallback_analysis;

    fn analysis(level: SkillLevel, markers: Vec<SkillMarker>) -> SkillAnalysis {
        SkillAnalysis {
            skill_level: level,
            skill_markers: markers,
            detected_styles: vec![],
            positives: vec!["Nice".to_string()],
            raw_analysis: String::new(),
        }
    }

    fn marker(category: MarkerCategory, strength: MarkerStrength) -> SkillMarker {
        SkillMarker {
            category,
            strength,
            description: String::new(),
            evidence: String::new(),
        }
    }

    #[test]
    fn test_level_to_path_mapping() {
        let cases = [
            (SkillLevel::AbsoluteBeginner, LearningPathId::FoundationBuilder, "foundation-01"),
            (SkillLevel::SomeExperience, LearningPathId::FoundationBuilder, "foundation-01"),
            (SkillLevel::Intermediate, LearningPathId::SkillSharpener, "sharpener-05"),
            (SkillLevel::Advanced, LearningPathId::MasterClass, "master-01"),
        ];

        for (level, path, first_lesson) in cases {
            let assignment = assign_learning_path(&analysis(level, vec![]));
            assert_eq!(assignment.path, path, "level {:?}", level);
            assert_eq!(assignment.first_lesson.id, first_lesson);
            assert_eq!(assignment.next_steps.len(), 3);
        }
    }

    #[test]
    fn test_some_experience_with_solid_lines_sharpens() {
        let assignment = assign_learning_path(&analysis(
            SkillLevel::SomeExperience,
            vec![marker(MarkerCategory::LineQuality, MarkerStrength::Solid)],
        ));
        assert_eq!(assignment.path, LearningPathId::SkillSharpener);
        assert_eq!(assignment.first_lesson.id, "sharpener-01");
    }

    #[test]
    fn test_solid_creativity_does_not_count_as_foundation() {
        let assignment = assign_learning_path(&analysis(
            SkillLevel::SomeExperience,
            vec![
                marker(MarkerCategory::Creativity, MarkerStrength::Solid),
                marker(MarkerCategory::Shapes, MarkerStrength::Developing),
            ],
        ));
        assert_eq!(assignment.path, LearningPathId::FoundationBuilder);
    }

    #[test]
    fn test_encouragement_is_reproducible_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let first = encouragement(SkillLevel::Intermediate, &mut a);
            assert_eq!(first, encouragement(SkillLevel::Intermediate, &mut b));
            assert!(encouragements(SkillLevel::Intermediate).contains(&first));
        }
    }

    #[test]
    fn test_build_result_from_fallback() {
        let vision = VisionClient::new(String::new(), None, "test-model".to_string());
        let service = AssessmentService::with_rng(vision, StdRng::seed_from_u64(1));
        let now = chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 5, 1, 12, 0, 0).unwrap();

        let result = service.build_result(fallback_analysis(), now);

        assert_eq!(result.skill_level, SkillLevel::SomeExperience);
        assert_eq!(result.recommended_path, LearningPathId::FoundationBuilder);
        assert_eq!(
            result.celebration_message,
            celebration_message(LearningPathId::FoundationBuilder)
        );
        assert_eq!(result.timestamp, "2024-05-01T12:00:00.000Z");
        assert_eq!(result.model, "test-model-assessment");
        assert_eq!(result.positives.len(), 3);
    }
}
