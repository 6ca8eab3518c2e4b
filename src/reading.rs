use serde::{Deserialize, Serialize};

pub const WORDS_PER_MINUTE: u32 = 200;
pub const CODE_WORDS_PER_MINUTE: u32 = 100;

const TENTHS_PER_MINUTE: u32 = 600;
const FIRST_IMAGE_SECONDS: u32 = 12;
const MIN_IMAGE_SECONDS: u32 = 3;

/// Minutes needed to read `content` at [`WORDS_PER_MINUTE`], rounded up.
/// Anything, even an empty string, takes at least a minute.
pub fn calculate_read_time(content: &str) -> u32 {
    let words = content.split_whitespace().count() as u32;
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadTime {
    pub minutes: u32,
    pub words: u32,
    pub code_words: u32,
    pub images: u32,
}

/// Read time for a markdown document.
///
/// Fenced code is read at half speed and every image adds viewing time, 12s for
/// the first and one second less for each one after it, down to 3s.
pub fn calculate_advanced_read_time(content: &str) -> ReadTime {
    let mut estimate = ReadTime::default();
    let mut fence: Option<&str> = None;

    for line in content.lines() {
        let trimmed = line.trim_start();
        match fence {
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    fence = None;
                } else {
                    estimate.code_words += line.split_whitespace().count() as u32;
                }
            }
            None => {
                if let Some(marker) = fence_marker(trimmed) {
                    fence = Some(marker);
                    continue;
                }
                let (images, prose) = strip_images(line);
                estimate.images += images;
                estimate.words += prose.split_whitespace().count() as u32;
            }
        }
    }

    // tenths of a second, so every rate divides evenly and nothing is lost
    // before the single round up
    let tenths = estimate.words * (TENTHS_PER_MINUTE / WORDS_PER_MINUTE)
        + estimate.code_words * (TENTHS_PER_MINUTE / CODE_WORDS_PER_MINUTE)
        + image_seconds(estimate.images) * 10;
    estimate.minutes = tenths.div_ceil(TENTHS_PER_MINUTE).max(1);
    estimate
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

fn image_seconds(images: u32) -> u32 {
    (0..images)
        .map(|i| FIRST_IMAGE_SECONDS.saturating_sub(i).max(MIN_IMAGE_SECONDS))
        .sum()
}

/// Removes `![alt](src)` images from a line, returning how many were found and
/// the remaining text.
fn strip_images(line: &str) -> (u32, String) {
    let mut images = 0;
    let mut rest = line;
    let mut prose = String::with_capacity(line.len());

    while let Some(open) = rest.find("![") {
        let after = &rest[open..];
        let end = after
            .find("](")
            .and_then(|mid| after[mid..].find(')').map(|close| mid + close));
        match end {
            Some(close) => {
                prose.push_str(&rest[..open]);
                prose.push(' ');
                images += 1;
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    prose.push_str(rest);
    (images, prose)
}
