use tracing::debug;

use crate::{error::CaptureResult, page::DeckPage, position::read_slide_index};

/// The deck's own "move to next slide" input.
pub const ADVANCE_KEY: &str = "ArrowRight";

/// Try to advance to the next slide; report whether the position changed.
///
/// There is no explicit last-slide marker — a press that leaves the position
/// unchanged is the only end-of-deck signal, so a single-slide deck returns
/// false on the very first call.
pub async fn advance(page: &dyn DeckPage) -> CaptureResult<bool> {
    let before = read_slide_index(page).await?;
    page.press_key(ADVANCE_KEY).await?;
    let after = read_slide_index(page).await?;

    debug!(before, after, "advance attempt");
    Ok(before != after)
}
