#[derive(Debug, Clone)]
pub struct SplitterConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub index: usize,
}

pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    #[must_use]
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Split text into fixed-size character windows where each window after
    /// the first starts `chunk_overlap` characters before the previous
    /// window's end. Emission stops with the window that reaches the end of
    /// the text, so the final chunk may be short. Empty input yields an
    /// empty sequence.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let size = self.config.chunk_size.max(1);
        let step = size.saturating_sub(self.config.chunk_overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + size).min(chars.len());
            chunks.push(Chunk {
                content: chars[start..end].iter().collect(),
                index: chunks.len(),
            });
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> TextSplitter {
        TextSplitter::new(SplitterConfig {
            chunk_size,
            chunk_overlap,
        })
    }

    fn expected_count(len: usize, size: usize, overlap: usize) -> usize {
        if len == 0 {
            0
        } else if len <= size {
            1
        } else {
            (len - overlap).div_ceil(size - overlap)
        }
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(splitter(10, 3).split("").is_empty());
    }

    #[test]
    fn text_within_chunk_size_is_single_chunk() {
        let chunks = splitter(100, 20).split("Short text.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Short text.");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn windows_overlap_previous_chunk_tail() {
        let chunks = splitter(10, 3).split("abcdefghijklmnopqrstuvwxyz");
        assert!(chunks.len() > 1);
        // end of chunk N equals start of chunk N+1 for the overlap width
        assert_eq!(&chunks[0].content[7..10], &chunks[1].content[..3]);
    }

    #[test]
    fn chunk_count_matches_formula() {
        // len 10, size 5, overlap 3 -> step 2 -> ceil(7/2) = 4 windows
        let chunks = splitter(5, 3).split("abcdefghij");
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3].content, "ghij");
    }

    #[test]
    fn dropping_overlap_tails_reconstructs_input() {
        let text = "The opening batsman struck four boundaries before the rain delay.";
        let overlap = 4;
        let chunks = splitter(12, overlap).split(text);

        let mut rebuilt = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i + 1 == chunks.len() {
                rebuilt.push_str(&chunk.content);
            } else {
                let kept: String = chunk
                    .content
                    .chars()
                    .take(chunk.content.chars().count() - overlap)
                    .collect();
                rebuilt.push_str(&kept);
            }
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn no_overlap_partitions_text() {
        let chunks = splitter(5, 0).split("abcdefghij");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "abcde");
        assert_eq!(chunks[1].content, "fghij");
    }

    #[test]
    fn overlap_at_least_size_still_makes_progress() {
        let chunks = splitter(3, 3).split("abcde");
        assert!(!chunks.is_empty());
        assert_eq!(chunks[0].content, "abc");
        assert_eq!(chunks.last().unwrap().content.chars().last(), Some('e'));
    }

    #[test]
    fn indices_are_sequential() {
        let chunks = splitter(4, 1).split("abcdefghijklmnop");
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "матч закончился со счётом три один";
        let chunks = splitter(10, 2).split(text);
        let rebuilt: String = {
            let mut s = String::new();
            for (i, chunk) in chunks.iter().enumerate() {
                if i + 1 == chunks.len() {
                    s.push_str(&chunk.content);
                } else {
                    let kept: String = chunk
                        .content
                        .chars()
                        .take(chunk.content.chars().count() - 2)
                        .collect();
                    s.push_str(&kept);
                }
            }
            s
        };
        assert_eq!(rebuilt, text);
    }

    mod proptest_splitter {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn split_never_panics(
                content in "\\PC{0,2000}",
                chunk_size in 1usize..500,
                chunk_overlap in 0usize..500,
            ) {
                let _ = splitter(chunk_size, chunk_overlap).split(&content);
            }

            #[test]
            fn chunk_count_formula_holds(
                content in "[a-z ]{0,800}",
                chunk_size in 2usize..100,
                overlap_frac in 0usize..100,
            ) {
                // keep overlap strictly below chunk_size, as config validation does
                let chunk_overlap = overlap_frac % chunk_size.max(1);
                prop_assume!(chunk_overlap < chunk_size);

                let chunks = splitter(chunk_size, chunk_overlap).split(&content);
                let expected = expected_count(content.chars().count(), chunk_size, chunk_overlap);
                prop_assert_eq!(chunks.len(), expected);
            }

            #[test]
            fn overlap_reconstruction(
                content in "[a-zA-Z0-9 .,]{1,600}",
                chunk_size in 2usize..80,
                overlap_frac in 0usize..80,
            ) {
                let chunk_overlap = overlap_frac % chunk_size;
                let chunks = splitter(chunk_size, chunk_overlap).split(&content);

                let mut rebuilt = String::new();
                for (i, chunk) in chunks.iter().enumerate() {
                    if i + 1 == chunks.len() {
                        rebuilt.push_str(&chunk.content);
                    } else {
                        let keep = chunk.content.chars().count() - chunk_overlap;
                        rebuilt.extend(chunk.content.chars().take(keep));
                    }
                }
                prop_assert_eq!(rebuilt, content);
            }

            #[test]
            fn no_empty_chunks_and_sequential_indices(
                content in "[a-z ]{0,500}",
                chunk_size in 1usize..60,
                chunk_overlap in 0usize..60,
            ) {
                let chunks = splitter(chunk_size, chunk_overlap).split(&content);
                for (i, chunk) in chunks.iter().enumerate() {
                    prop_assert!(!chunk.content.is_empty());
                    prop_assert_eq!(chunk.index, i);
                }
            }
        }
    }
}
