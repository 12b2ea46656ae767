use pressbox_llm::{LlmProvider, Message, Role};

use crate::error::GenerationError;

/// Input excerpt cap, in characters, applied before prompting.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 6000;

const SYSTEM_PROMPT: &str = "You are a sports journalist writing concise, factual match reports. \
     Use only information present in the material you are given.";

const PERFORMERS_HEADING: &str = "STAR PERFORMERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub body: String,
    pub star_performers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ArticleGenerator {
    max_input_chars: usize,
}

impl Default for ArticleGenerator {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl ArticleGenerator {
    #[must_use]
    pub fn new(max_input_chars: usize) -> Self {
        Self { max_input_chars }
    }

    /// Generate a match article plus a star-performer list from extracted
    /// document text.
    ///
    /// The model is asked to follow a `STAR PERFORMERS:` heading
    /// convention. If the response does not contain it, the whole
    /// response becomes the article body and the performer list is empty;
    /// that is a degraded outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the inference call fails.
    pub async fn generate<P: LlmProvider>(
        &self,
        provider: &P,
        text: &str,
    ) -> Result<Article, GenerationError> {
        let excerpt = truncate_chars(text, self.max_input_chars);
        let messages = [
            Message::new(Role::System, SYSTEM_PROMPT),
            Message::new(
                Role::User,
                format!(
                    "Write a professional sports news article based on the match report \
                     below. After the article, add a section titled '{PERFORMERS_HEADING}:' \
                     listing the three standout players, one name per line.\n\n\
                     Match report:\n{excerpt}"
                ),
            ),
        ];

        let response = provider.chat(&messages).await?;
        let article = parse_article(&response);
        tracing::debug!(
            performers = article.star_performers.len(),
            "article generated"
        );
        Ok(article)
    }
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn parse_article(response: &str) -> Article {
    let lines: Vec<&str> = response.lines().collect();
    let Some(heading_pos) = lines.iter().position(|line| is_performers_heading(line)) else {
        return Article {
            body: response.trim().to_owned(),
            star_performers: Vec::new(),
        };
    };

    let star_performers: Vec<String> = lines[heading_pos + 1..]
        .iter()
        .filter_map(|line| clean_performer_line(line))
        .collect();

    if star_performers.is_empty() {
        return Article {
            body: response.trim().to_owned(),
            star_performers,
        };
    }

    Article {
        body: lines[..heading_pos].join("\n").trim().to_owned(),
        star_performers,
    }
}

fn is_performers_heading(line: &str) -> bool {
    let stripped =
        line.trim()
            .trim_start_matches(|c: char| c == '#' || c == '*' || c.is_whitespace());
    stripped.to_uppercase().starts_with(PERFORMERS_HEADING)
}

/// Strip list markers (`-`, `*`, `•`, `1.`) and emphasis from a performer
/// line; returns `None` for lines that do not look like a name.
fn clean_performer_line(line: &str) -> Option<String> {
    let mut s = line.trim();
    s = s.trim_start_matches(['-', '*', '•']).trim_start();
    let without_digits = s.trim_start_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() != s.len() {
        s = without_digits.trim_start_matches(['.', ')']).trim_start();
    }
    let s = s.trim_end_matches('*').trim();
    if s.is_empty() || s.chars().count() > 60 {
        return None;
    }
    Some(s.to_owned())
}

#[cfg(test)]
mod tests {
    use pressbox_llm::mock::MockProvider;

    use super::*;

    #[tokio::test]
    async fn generate_parses_body_and_performers() {
        let response = "A tense derby ended three-one.\n\
                        The visitors never recovered from an early collapse.\n\
                        \n\
                        STAR PERFORMERS:\n\
                        - Maya Okafor\n\
                        - Liam Petrov\n\
                        - Sana Iqbal\n";
        let provider = MockProvider::with_responses(vec![response.into()]);

        let article = ArticleGenerator::default()
            .generate(&provider, "raw match text")
            .await
            .unwrap();

        assert!(article.body.starts_with("A tense derby"));
        assert!(!article.body.contains("STAR PERFORMERS"));
        assert_eq!(
            article.star_performers,
            vec!["Maya Okafor", "Liam Petrov", "Sana Iqbal"]
        );
    }

    #[tokio::test]
    async fn missing_heading_degrades_to_full_body() {
        let provider =
            MockProvider::with_responses(vec!["Just an article with no list at all.".into()]);
        let article = ArticleGenerator::default()
            .generate(&provider, "text")
            .await
            .unwrap();
        assert_eq!(article.body, "Just an article with no list at all.");
        assert!(article.star_performers.is_empty());
    }

    #[tokio::test]
    async fn inference_failure_surfaces_as_error() {
        let provider = MockProvider::failing();
        let result = ArticleGenerator::default().generate(&provider, "text").await;
        assert!(matches!(result, Err(GenerationError::Llm(_))));
    }

    #[tokio::test]
    async fn input_is_truncated_before_prompting() {
        let provider = MockProvider::default();
        let long_text = "x".repeat(10_000);
        ArticleGenerator::new(100)
            .generate(&provider, &long_text)
            .await
            .unwrap();

        let prompt = provider.last_chat_messages()[1].content.clone();
        assert!(prompt.contains(&"x".repeat(100)));
        assert!(!prompt.contains(&"x".repeat(101)));
    }

    #[test]
    fn parse_handles_markdown_heading_and_markers() {
        let response = "Body paragraph.\n\n## **Star Performers:**\n1. Dana Reyes\n2) Kofi Mensah\n* Ines Alvarez";
        let article = parse_article(response);
        assert_eq!(article.body, "Body paragraph.");
        assert_eq!(
            article.star_performers,
            vec!["Dana Reyes", "Kofi Mensah", "Ines Alvarez"]
        );
    }

    #[test]
    fn parse_heading_with_no_valid_lines_keeps_full_response() {
        let response = "Article text.\nSTAR PERFORMERS:\n\n   \n";
        let article = parse_article(response);
        assert_eq!(article.body, response.trim());
        assert!(article.star_performers.is_empty());
    }

    #[test]
    fn clean_performer_line_rejects_overlong_entries() {
        let long = "a".repeat(61);
        assert!(clean_performer_line(&long).is_none());
        assert_eq!(clean_performer_line("- Jo Kim"), Some("Jo Kim".into()));
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn heading_detection_is_case_insensitive() {
        assert!(is_performers_heading("star performers:"));
        assert!(is_performers_heading("  STAR PERFORMERS"));
        assert!(is_performers_heading("### Star Performers"));
        assert!(!is_performers_heading("the stars aligned"));
    }
}
