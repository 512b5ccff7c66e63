use crate::core::sniffer;
use crate::domain::model::FileType;
use crate::domain::ports::{FontDecoder, Fetcher};
use crate::fonts;
use crate::utils::error::{FontGrabError, Result};

/// Resolves a font file's display name, trying every decoder when the expected one fails.
pub struct NameDecoder {
    strategies: Vec<Box<dyn FontDecoder>>,
}

impl Default for NameDecoder {
    fn default() -> Self {
        Self::new(fonts::default_decoders())
    }
}

impl NameDecoder {
    /// `strategies` is also the brute-force order.
    pub fn new(strategies: Vec<Box<dyn FontDecoder>>) -> Self {
        Self { strategies }
    }

    pub async fn decode_name<F: Fetcher + ?Sized>(&self, fetcher: &F, font_url: &str) -> Result<String> {
        let sniffed = match sniffer::sniff(fetcher, font_url).await {
            Ok(file_type) => Some(file_type),
            Err(e) => {
                tracing::debug!("Type sniff failed for {}: {}", font_url, e);
                None
            }
        };
        self.decode_with_hint(fetcher, font_url, sniffed).await
    }

    /// Same as [`decode_name`](Self::decode_name) with the sniff already done; `None` goes straight to brute force.
    pub async fn decode_with_hint<F: Fetcher + ?Sized>(
        &self,
        fetcher: &F,
        font_url: &str,
        file_type: Option<FileType>,
    ) -> Result<String> {
        let bytes = fetcher.fetch_bytes(font_url).await?;
        self.decode_bytes(&bytes, file_type)
    }

    pub fn decode_bytes(&self, bytes: &[u8], file_type: Option<FileType>) -> Result<String> {
        let expected = file_type.and_then(|file_type| {
            self.strategies
                .iter()
                .position(|strategy| strategy.handles(file_type))
        });

        let mut last_error = None;
        if let Some(index) = expected {
            let strategy = &self.strategies[index];
            match strategy.decode(bytes) {
                Ok(name) => return Ok(name),
                Err(e) => {
                    tracing::debug!("{} decoder failed, trying all decoders: {}", strategy.label(), e);
                    last_error = Some(e);
                }
            }
        }

        for (index, strategy) in self.strategies.iter().enumerate() {
            if Some(index) == expected {
                continue;
            }
            match strategy.decode(bytes) {
                Ok(name) => {
                    tracing::debug!("{} decoder recovered name '{}'", strategy.label(), name);
                    return Ok(name);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(FontGrabError::DecodeError {
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no decoder could read the font".to_string()),
        })
    }
}
