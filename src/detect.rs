use tracing::debug;

use crate::{error::CaptureResult, page::DeckPage};

/// Source-path extensions treated as inherently looping media.
pub const ANIMATED_EXTENSIONS: &[&str] = &["gif", "webp"];

/// Script listing the `src` of every image inside the slide currently marked
/// present, or `null` when no slide carries the marker.
pub const PRESENT_IMAGES_SCRIPT: &str = r#"
(() => {
  const present = document.querySelector('.present');
  if (!present) {
    return null;
  }
  return Array.from(present.querySelectorAll('img')).map((img) => img.src);
})()
"#;

/// Whether the currently visible slide contains animated image content.
///
/// A deck without a present-marked slide reads as "no media" rather than
/// failing the run; a failed evaluation propagates.
pub async fn has_animated_media(page: &dyn DeckPage) -> CaptureResult<bool> {
    let value = page.eval(PRESENT_IMAGES_SCRIPT).await?;
    let Some(sources) = value.as_array() else {
        debug!("no present slide container, treating as no media");
        return Ok(false);
    };

    Ok(sources
        .iter()
        .filter_map(|src| src.as_str())
        .any(is_animated_source))
}

/// Whether a source path ends in a recognized animated-media extension,
/// ignoring case and any query/fragment suffix.
pub fn is_animated_source(src: &str) -> bool {
    let path = src
        .split_once(['?', '#'])
        .map_or(src, |(path, _)| path)
        .to_ascii_lowercase();

    ANIMATED_EXTENSIONS
        .iter()
        .any(|ext| path.ends_with(&format!(".{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_animated_extensions() {
        assert!(is_animated_source("http://deck.local/media/loop.gif"));
        assert!(is_animated_source("http://deck.local/media/loop.webp"));
        assert!(is_animated_source("LOOP.GIF"));
    }

    #[test]
    fn ignores_query_and_fragment_suffixes() {
        assert!(is_animated_source("http://deck.local/a.gif?v=2"));
        assert!(is_animated_source("http://deck.local/a.webp#frag"));
    }

    #[test]
    fn rejects_still_images() {
        assert!(!is_animated_source("http://deck.local/chart.png"));
        assert!(!is_animated_source("http://deck.local/photo.jpg"));
        assert!(!is_animated_source("http://deck.local/gif.png"));
        assert!(!is_animated_source(""));
    }
}
