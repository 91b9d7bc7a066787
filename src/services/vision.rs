// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vision model client for skill detection and artwork critique.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint, sending a text
//! prompt plus the image URL.

use crate::error::AppError;
use crate::models::assessment::{
    ArtStyle, MarkerCategory, MarkerStrength, SkillAnalysis, SkillLevel, SkillMarker, StyleKind,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

const MAX_TOKENS: u32 = 1000;
const SKILL_TEMPERATURE: f32 = 0.3;
const CRITIQUE_TEMPERATURE: f32 = 0.7;

/// Vision API client.
#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl VisionClient {
    pub fn new(api_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Detect the skill level shown in a drawing.
    ///
    /// Never fails: any problem with the model call yields
    /// [`fallback_analysis`].
    pub async fn detect_skill_level(&self, image_url: &str, drawing_time: u32) -> SkillAnalysis {
        let prompt = skill_prompt(drawing_time);

        let result = match self.complete(&prompt, image_url, SKILL_TEMPERATURE).await {
            Ok(content) => parse_skill_analysis(&content),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Skill detection failed, using fallback analysis");
            fallback_analysis()
        })
    }

    /// Free-text critique of an artwork.
    pub async fn critique_artwork(&self, image_url: &str, notes: &str) -> Result<String, AppError> {
        self.complete(&critique_prompt(notes), image_url, CRITIQUE_TEMPERATURE)
            .await
    }

    /// Send one user message (text + image) and return the reply text.
    async fn complete(
        &self,
        prompt: &str,
        image_url: &str,
        temperature: f32,
    ) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::VisionApi("Vision API key not configured".to_string()))?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url", "image_url": { "url": image_url } }
                ]
            })],
            max_tokens: MAX_TOKENS,
            temperature,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::VisionApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!("Vision API rate limit hit (429)");
            }
            return Err(AppError::VisionApi(format!("HTTP {}: {}", status, body)));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::VisionApi(format!("Invalid response body: {}", e)))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::VisionApi("No response from vision model".to_string()))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<serde_json::Value>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Parse the model's JSON reply, tolerating a surrounding markdown fence.
pub fn parse_skill_analysis(content: &str) -> Result<SkillAnalysis, AppError> {
    let trimmed = content.trim();
    let json_text = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(json_text.trim())
        .map_err(|e| AppError::VisionApi(format!("Unparseable skill analysis: {}", e)))
}

/// Analysis used whenever the model cannot be reached or understood.
pub fn fallback_analysis() -> SkillAnalysis {
    SkillAnalysis {
        skill_level: SkillLevel::SomeExperience,
        skill_markers: vec![SkillMarker {
            category: MarkerCategory::Confidence,
            strength: MarkerStrength::Developing,
            description: "Shows willingness to create and explore".to_string(),
            evidence: "Took the initiative to draw".to_string(),
        }],
        detected_styles: vec![ArtStyle {
            style: StyleKind::Sketch,
            confidence: 0.7,
            elements: vec!["Quick drawing style".to_string()],
        }],
        positives: vec![
            "I love that you jumped right in and started creating!".to_string(),
            "Your willingness to draw shows real artistic spirit".to_string(),
            "Every artist started exactly where you are now".to_string(),
        ],
        raw_analysis: "You have the most important thing - the courage to create. Let's build on that foundation!".to_string(),
    }
}

fn skill_prompt(drawing_time: u32) -> String {
    format!(
        r#"You are an expert art instructor analyzing a student's quick drawing for SKILL ASSESSMENT and ENCOURAGEMENT.

CRITICAL INSTRUCTIONS:
1. ALWAYS find 2-3 genuine positive things, no matter the skill level
2. Focus on potential and improvement markers, not perfection
3. Be encouraging while being accurate about skill level

SKILL LEVELS:
- absolute_beginner: Basic shapes, learning fundamentals, early mark-making
- some_experience: Shows understanding of basic forms, some control
- intermediate: Good line confidence, understands proportions, shows technique
- advanced: Strong technique, sophisticated understanding, artistic expression

SKILL MARKERS: line_quality, shapes, proportions, creativity, detail, confidence
ART STYLES: realistic, cartoon, abstract, anime, sketch, experimental

Drawing time: {drawing_time} seconds

Reply with JSON only, in this shape:
{{
  "skillLevel": "absolute_beginner|some_experience|intermediate|advanced",
  "skillMarkers": [
    {{
      "category": "line_quality|shapes|proportions|creativity|detail|confidence",
      "strength": "emerging|developing|solid",
      "description": "What you observed",
      "evidence": "Specific visual evidence"
    }}
  ],
  "detectedStyles": [
    {{
      "style": "realistic|cartoon|abstract|anime|sketch|experimental",
      "confidence": 0.8,
      "elements": ["specific elements you see"]
    }}
  ],
  "positives": ["2-3 warm, specific positives"],
  "analysis": "A warm, encouraging summary of what you see, leading with positives"
}}"#
    )
}

fn critique_prompt(notes: &str) -> String {
    let mut prompt = String::from(
        "You are an expert art instructor analyzing a student's artwork. Please provide constructive feedback covering:

1. **Composition**: Rule of thirds, balance, focal points
2. **Technique**: Line work, shading, proportions
3. **Color**: Color theory, harmony, contrast (if applicable)
4. **Areas for Improvement**: Specific, actionable suggestions
5. **Strengths**: What the artist did well
6. **Next Steps**: 1-2 specific exercises to improve
",
    );

    if !notes.trim().is_empty() {
        prompt.push_str(&format!(
            "\nAdditional context from artist: \"{}\"\n",
            notes.trim()
        ));
    }

    prompt.push_str(
        "\nPlease be encouraging but honest, and provide specific rather than general feedback.",
    );
    prompt
}
