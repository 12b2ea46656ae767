use pressbox_index::{PdfExtractor, SplitterConfig, TextSplitter};
use pressbox_report::{ArticleGenerator, ChatResponder};

/// Configured processing components shared by all requests.
pub struct Pipeline {
    pub extractor: PdfExtractor,
    pub splitter: TextSplitter,
    pub article: ArticleGenerator,
    pub chat: ChatResponder,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        extractor: PdfExtractor,
        splitter: TextSplitter,
        article: ArticleGenerator,
        chat: ChatResponder,
    ) -> Self {
        Self {
            extractor,
            splitter,
            article,
            chat,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            extractor: PdfExtractor::default(),
            splitter: TextSplitter::new(SplitterConfig::default()),
            article: ArticleGenerator::default(),
            chat: ChatResponder::default(),
        }
    }
}
