use crate::{error::CaptureResult, page::DeckPage};

/// Script returning the page's raw location fragment, e.g. `"#/4"`.
pub const HASH_SCRIPT: &str = "window.location.hash";

/// Read the zero-based index of the currently visible slide.
///
/// Hash-addressed decks encode the position as the last `/`-separated segment
/// of the fragment. A missing or unparsable segment reads as slide 0; a
/// failed evaluation propagates.
pub async fn read_slide_index(page: &dyn DeckPage) -> CaptureResult<u64> {
    let value = page.eval(HASH_SCRIPT).await?;
    let fragment = value.as_str().unwrap_or_default();
    Ok(parse_slide_index(fragment))
}

/// Last `/`-separated segment of the fragment, parsed as a non-negative
/// integer; 0 when missing or unparsable.
pub fn parse_slide_index(fragment: &str) -> u64 {
    fragment
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .unwrap_or(0)
}
