//! Skill extractor. Chooses between the LLM-backed analysis and the
//! deterministic fallback.
//!
//! The LLM path returns `Result<SkillAnalysisResult, ExtractionError>`; any
//! error sends the request down the fallback path, so `extract` itself never
//! fails and a CV upload is never blocked on the model.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{extract_json_block, GenerationConfig, LlmError, TextGenerator};
use crate::skills::fallback;
use crate::skills::models::SkillAnalysisResult;
use crate::skills::prompts::build_analysis_prompt;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no LLM API key configured")]
    Unconfigured,

    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model reply is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("model reply does not match the analysis schema: {0}")]
    SchemaMismatch(String),
}

pub struct SkillExtractor {
    generator: Option<Arc<dyn TextGenerator>>,
    max_skills: usize,
}

impl SkillExtractor {
    /// `generator` is `None` when no API key is configured; every request then
    /// uses the fallback. `max_skills` caps the fallback's skill list.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, max_skills: usize) -> Self {
        if generator.is_some() {
            info!("LLM available for skill extraction");
        } else {
            warn!("No LLM API key configured, using fallback skill extraction");
        }
        Self {
            generator,
            max_skills,
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Analyses a CV, optionally against a job description.
    pub async fn extract(&self, text: &str, job_description: Option<&str>) -> SkillAnalysisResult {
        if text.trim().is_empty() {
            return SkillAnalysisResult::empty();
        }

        if self.llm_enabled() {
            match self.extract_with_llm(text, job_description).await {
                Ok(result) => {
                    info!(
                        "LLM extraction succeeded with {} skills",
                        result.current_skills.len()
                    );
                    return result;
                }
                Err(e) => warn!("LLM extraction failed, falling back: {e}"),
            }
        }

        self.extract_fallback(text)
    }

    pub async fn extract_with_llm(
        &self,
        text: &str,
        job_description: Option<&str>,
    ) -> Result<SkillAnalysisResult, ExtractionError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(ExtractionError::Unconfigured)?;

        let prompt = build_analysis_prompt(text, job_description);
        let reply = generator
            .generate(&prompt, &GenerationConfig::SKILL_ANALYSIS)
            .await?;
        debug!("LLM reply: {reply}");

        let value: serde_json::Value = serde_json::from_str(extract_json_block(&reply))?;
        SkillAnalysisResult::from_llm_value(&value)
    }

    pub fn extract_fallback(&self, text: &str) -> SkillAnalysisResult {
        fallback::analyze(text, self.max_skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::models::ExperienceLevel;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed reply and records the prompts it was sent.
    struct StubGenerator {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(vec![]),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                prompts: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            prompt: &str,
            config: &GenerationConfig,
        ) -> Result<String, LlmError> {
            assert_eq!(*config, GenerationConfig::SKILL_ANALYSIS);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    const CV: &str = "Senior Software Engineer with 10 years experience in Python, Docker, and AWS";

    #[tokio::test]
    async fn test_no_key_uses_fallback() {
        let extractor = SkillExtractor::new(None, 20);
        let result = extractor.extract(CV, None).await;
        assert!(result.current_skills.contains(&"Python".to_string()));
        assert!(result.current_skills.contains(&"Docker".to_string()));
        assert!(result.current_skills.contains(&"AWS".to_string()));
        assert_eq!(result.experience_level, ExperienceLevel::Senior);
    }

    #[tokio::test]
    async fn test_llm_path_without_key_is_unconfigured() {
        let extractor = SkillExtractor::new(None, 20);
        let err = extractor.extract_with_llm(CV, None).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Unconfigured));
    }

    #[tokio::test]
    async fn test_llm_fenced_reply_is_cleaned() {
        let stub = StubGenerator::replying(
            "```json\n{\"current_skills\": [\"rust\", \"RUST\", \"sql\"], \
             \"experience_level\": \"Principal\"}\n```",
        );
        let extractor = SkillExtractor::new(Some(stub.clone()), 20);

        let result = extractor.extract(CV, None).await;
        assert_eq!(result.current_skills, vec!["Rust".to_string(), "SQL".to_string()]);
        assert_eq!(result.experience_level, ExperienceLevel::Senior);
        assert!(result.skill_categories.is_empty());
        assert_eq!(stub.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_job_description_reaches_prompt_and_result() {
        let stub = StubGenerator::replying(
            r#"{"current_skills": ["Python"], "job_requirements": ["Kafka"],
                "skill_gaps": ["Kafka"], "matching_skills": [], "career_advice": "Learn Kafka"}"#,
        );
        let extractor = SkillExtractor::new(Some(stub.clone()), 20);

        let result = extractor.extract(CV, Some("Streaming role using Kafka")).await;
        let job = result.job_match.expect("job fields present");
        assert_eq!(job.skill_gaps, vec!["Kafka".to_string()]);
        assert_eq!(job.career_advice, "Learn Kafka");

        let prompts = stub.prompts.lock().unwrap();
        assert!(prompts[0].contains("JOB DESCRIPTION:\nStreaming role using Kafka"));
    }

    #[tokio::test]
    async fn test_api_error_falls_back() {
        let extractor = SkillExtractor::new(Some(StubGenerator::failing(503)), 20);
        let result = extractor.extract(CV, None).await;
        assert!(result.current_skills.contains(&"Docker".to_string()));
        assert_eq!(result.experience_level, ExperienceLevel::Senior);
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let stub = StubGenerator::replying("I could not analyse this CV, sorry.");
        let extractor = SkillExtractor::new(Some(stub), 20);

        assert!(matches!(
            extractor.extract_with_llm(CV, None).await,
            Err(ExtractionError::MalformedJson(_))
        ));
        let result = extractor.extract(CV, None).await;
        assert!(result.current_skills.contains(&"AWS".to_string()));
    }

    #[tokio::test]
    async fn test_schema_mismatch_falls_back() {
        let stub = StubGenerator::replying(r#"{"skills": ["Python"]}"#);
        let extractor = SkillExtractor::new(Some(stub), 20);

        assert!(matches!(
            extractor.extract_with_llm(CV, None).await,
            Err(ExtractionError::SchemaMismatch(_))
        ));
        let result = extractor.extract(CV, None).await;
        assert!(result.current_skills.contains(&"Python".to_string()));
    }

    #[tokio::test]
    async fn test_blank_text_short_circuits_without_llm_call() {
        let stub = StubGenerator::replying(r#"{"current_skills": ["Rust"]}"#);
        let extractor = SkillExtractor::new(Some(stub.clone()), 20);

        let result = extractor.extract("  \n\t", None).await;
        assert_eq!(result, SkillAnalysisResult::empty());
        assert!(stub.prompts.lock().unwrap().is_empty());
    }
}
