//! Deterministic text generation backend
//!
//! Stands in for a hosted language model: it consumes a digest and emits
//! templated prose after a configurable simulated latency. Timeouts are
//! the caller's responsibility (`tokio::time::timeout` around the call),
//! the generator itself never gives up.

use crate::error::{Result, SkillAlignerError};
use log::debug;
use std::time::Duration;

pub struct TextGenerator {
    latency: Duration,
}

impl TextGenerator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Instant generation, used by tests and `--no-generation` fallbacks.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Produce a three-phase progression plan from a progression digest.
    pub async fn generate_plan(&self, digest: &str) -> Result<String> {
        let digest = self.check_digest(digest)?;
        self.simulate_latency().await;

        let plan = format!(
            "## Progression plan\n\n\
             Current standing:\n{digest}\n\
             ### Phase 1 (months 1-3)\n\
             Consolidate the fundamentals behind your weakest areas through \
             short, focused practice projects.\n\n\
             ### Phase 2 (months 4-6)\n\
             Close the specific gaps listed for your target jobs and ship one \
             portfolio project that exercises them end to end.\n\n\
             ### Phase 3 (months 7-12)\n\
             Apply for the top-ranked roles, seek feedback from practitioners, \
             and iterate on the remaining gaps.\n"
        );

        debug!("generated progression plan ({} chars)", plan.len());
        Ok(plan)
    }

    /// Produce a short professional bio from a bio digest.
    pub async fn generate_bio(&self, digest: &str) -> Result<String> {
        let digest = self.check_digest(digest)?;
        self.simulate_latency().await;

        let bio = format!(
            "## Professional bio\n\n\
             {digest}\n\
             A motivated data practitioner with demonstrated strengths in the \
             areas above, looking to grow into the best-matching role through \
             hands-on project work and continuous learning.\n"
        );

        debug!("generated bio ({} chars)", bio.len());
        Ok(bio)
    }

    fn check_digest<'a>(&self, digest: &'a str) -> Result<&'a str> {
        let trimmed = digest.trim();
        if trimmed.is_empty() {
            return Err(SkillAlignerError::Generation(
                "cannot generate text from an empty digest".to_string(),
            ));
        }
        Ok(digest)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plan_is_deterministic() {
        let generator = TextGenerator::instant();
        let digest = "Global score: 42% (Junior)\n";
        let first = generator.generate_plan(digest).await.unwrap();
        let second = generator.generate_plan(digest).await.unwrap();
        assert_eq!(first, second);
        assert!(first.contains("Phase 1"));
        assert!(first.contains("Phase 3"));
        assert!(first.contains("42%"));
    }

    #[tokio::test]
    async fn test_bio_includes_digest() {
        let generator = TextGenerator::instant();
        let bio = generator
            .generate_bio("Key strengths: SQL, Python\n")
            .await
            .unwrap();
        assert!(bio.contains("SQL, Python"));
    }

    #[tokio::test]
    async fn test_empty_digest_is_rejected() {
        let generator = TextGenerator::instant();
        assert!(generator.generate_plan("   ").await.is_err());
        assert!(generator.generate_bio("").await.is_err());
    }

    #[tokio::test]
    async fn test_caller_timeout_wraps_latency() {
        let generator = TextGenerator::new(Duration::from_secs(30));
        let outcome = tokio::time::timeout(
            Duration::from_millis(10),
            generator.generate_plan("Global score: 10% (Junior)\n"),
        )
        .await;
        assert!(outcome.is_err());
    }
}
