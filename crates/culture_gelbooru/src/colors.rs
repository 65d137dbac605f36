//! Dominant color extraction from preview thumbnails.

use async_trait::async_trait;
use culture_cache::{BoundedCache, CacheConfig};
use culture_core::Color;
use culture_interface::ColorSource;
use image::{GenericImageView, Rgba};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Number of preview URLs whose color is remembered.
pub const DEFAULT_COLOR_CACHE_SIZE: usize = 1000;

/// Samples per axis of the sampling grid.
const GRID: u32 = 16;

/// Quantisation step applied to each channel.
const QUANTUM: u8 = 16;

/// Extract the dominant color of an encoded image.
///
/// Samples a grid excluding a 10% border, skips translucent pixels,
/// quantises channels, and picks the most frequent color that is neither
/// near-black, near-white nor grey; ties go to the more saturated color.
/// Returns `None` when the image cannot be decoded or has no such color.
pub fn extract_dominant_color(data: &[u8]) -> Option<Color> {
    let img = match image::load_from_memory(data) {
        Ok(img) => img,
        Err(e) => {
            warn!("Failed to decode image for color extraction: {}", e);
            return None;
        }
    };

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let border_x = width / 10;
    let border_y = height / 10;
    let sample_width = (width - 2 * border_x).max(1);
    let sample_height = (height - 2 * border_y).max(1);

    let mut color_counts: HashMap<[u8; 3], u32> = HashMap::new();
    for i in 0..GRID {
        for j in 0..GRID {
            let x = (border_x + i * (sample_width - 1) / (GRID - 1)).min(width - 1);
            let y = (border_y + j * (sample_height - 1) / (GRID - 1)).min(height - 1);

            let Rgba([r, g, b, a]) = img.get_pixel(x, y);
            if a < 128 {
                continue;
            }

            let quantized = [
                (r / QUANTUM) * QUANTUM,
                (g / QUANTUM) * QUANTUM,
                (b / QUANTUM) * QUANTUM,
            ];
            *color_counts.entry(quantized).or_insert(0) += 1;
        }
    }

    let mut best: Option<([u8; 3], u32, u32)> = None;
    for (color, count) in &color_counts {
        let [r, g, b] = *color;

        let brightness = (r as u32 + g as u32 + b as u32) / 3;
        if !(30..=225).contains(&brightness) {
            continue;
        }

        // Saturation in percent; greys carry no hue worth showing
        let max = r.max(g).max(b) as u32;
        let min = r.min(g).min(b) as u32;
        let saturation = if max > 0 { (max - min) * 100 / max } else { 0 };
        if saturation < 20 {
            continue;
        }

        let better = match best {
            None => true,
            Some((_, best_count, best_saturation)) => {
                *count > best_count || (*count == best_count && saturation > best_saturation)
            }
        };
        if better {
            best = Some((*color, *count, saturation));
        }
    }

    let color = best.map(|([r, g, b], _, _)| Color::from_rgb(r, g, b));
    debug!(?color, sampled = color_counts.len(), "Extracted dominant color");
    color
}

/// [`ColorSource`] that downloads previews and extracts their dominant color.
///
/// Successful extractions are memoised per preview URL in a bounded LRU.
/// Download failures are not memoised, so a later render retries.
pub struct DominantColorExtractor {
    http: reqwest::Client,
    cache: Mutex<BoundedCache<String, Color>>,
    default_color: Color,
}

impl DominantColorExtractor {
    /// Create an extractor remembering up to `cache_size` previews.
    pub fn new(http: reqwest::Client, cache_size: usize, default_color: Color) -> Self {
        Self {
            http,
            cache: Mutex::new(BoundedCache::new(CacheConfig::bounded(cache_size))),
            default_color,
        }
    }

    /// Number of memoised previews.
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }

    async fn download(&self, preview_url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self
            .http
            .get(preview_url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl std::fmt::Debug for DominantColorExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DominantColorExtractor")
            .field("cached", &self.cached())
            .field("default_color", &self.default_color)
            .finish()
    }
}

#[async_trait]
impl ColorSource for DominantColorExtractor {
    #[instrument(skip(self))]
    async fn dominant_color(&self, preview_url: &str) -> Color {
        if preview_url.is_empty() {
            return self.default_color;
        }

        if let Some(color) = self.cache.lock().get(&preview_url.to_string()).copied() {
            debug!("Color cache hit");
            return color;
        }

        let bytes = match self.download(preview_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to download preview for color extraction");
                return self.default_color;
            }
        };

        let extracted = tokio::task::spawn_blocking(move || extract_dominant_color(&bytes)).await;
        let color = match extracted {
            Ok(color) => color.unwrap_or(self.default_color),
            Err(e) => {
                warn!(error = %e, "Color extraction task failed");
                return self.default_color;
            }
        };

        self.cache.lock().insert(preview_url.to_string(), color);
        color
    }
}
