// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skill assessment model: what the vision model reports and what we
//! hand back to the learner.

use serde::{Deserialize, Serialize};

/// Coarse skill level detected from a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    AbsoluteBeginner,
    SomeExperience,
    Intermediate,
    Advanced,
}

/// The three paths a learner can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningPathId {
    FoundationBuilder,
    SkillSharpener,
    MasterClass,
}

impl LearningPathId {
    /// Catalog id of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningPathId::FoundationBuilder => "foundation_builder",
            LearningPathId::SkillSharpener => "skill_sharpener",
            LearningPathId::MasterClass => "master_class",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    LineQuality,
    Shapes,
    Proportions,
    Creativity,
    Detail,
    Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStrength {
    Emerging,
    Developing,
    Solid,
}

/// One observed skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMarker {
    pub category: MarkerCategory,
    pub strength: MarkerStrength,
    pub description: String,
    /// What the model saw in the drawing
    #[serde(default)]
    pub evidence: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Realistic,
    Cartoon,
    Abstract,
    Anime,
    Sketch,
    Experimental,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtStyle {
    pub style: StyleKind,
    /// 0.0 to 1.0
    pub confidence: f64,
    #[serde(default)]
    pub elements: Vec<String>,
}

/// Parsed reply of the vision model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub skill_markers: Vec<SkillMarker>,
    #[serde(default)]
    pub detected_styles: Vec<ArtStyle>,
    #[serde(default)]
    pub positives: Vec<String>,
    #[serde(default, alias = "analysis")]
    pub raw_analysis: String,
}

/// Short description of a lesson used in assessment results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPreview {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// Path chosen for a learner and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAssignment {
    pub path: LearningPathId,
    pub reason: String,
    pub first_lesson: LessonPreview,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Web,
    Mobile,
}

/// Complete assessment returned to the learner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    // Celebration & positives
    pub celebration_message: String,
    pub positives: Vec<String>,
    pub encouragement: String,

    // Skill detection
    pub skill_level: SkillLevel,
    pub skill_markers: Vec<SkillMarker>,

    // Path assignment
    pub recommended_path: LearningPathId,
    pub path_reason: String,

    pub detected_styles: Vec<ArtStyle>,

    pub next_steps: Vec<String>,
    pub first_lesson: LessonPreview,

    // Metadata
    pub analysis_id: String,
    pub timestamp: String,
    pub model: String,
}

/// Free-text critique of an uploaded artwork.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkAnalysis {
    pub feedback: String,
    pub timestamp: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_analysis_accepts_model_field_names() {
        let json = r#"{
            "skillLevel": "some_experience",
            "skillMarkers": [
                {"category": "line_quality", "strength": "solid", "description": "Steady lines", "evidence": "Long strokes"}
            ],
            "detectedStyles": [
                {"style": "cartoon", "confidence": 0.8, "elements": ["Big eyes"]}
            ],
            "positives": ["Confident lines"],
            "analysis": "A lively sketch"
        }"#;

        let analysis: SkillAnalysis = serde_json::from_str(json).unwrap();

        assert_eq!(analysis.skill_level, SkillLevel::SomeExperience);
        assert_eq!(analysis.skill_markers[0].category, MarkerCategory::LineQuality);
        assert_eq!(analysis.detected_styles[0].style, StyleKind::Cartoon);
        assert_eq!(analysis.raw_analysis, "A lively sketch");
    }

    #[test]
    fn test_path_id_matches_wire_name() {
        let json = serde_json::to_value(LearningPathId::SkillSharpener).unwrap();
        assert_eq!(json, LearningPathId::SkillSharpener.as_str());
    }
}
