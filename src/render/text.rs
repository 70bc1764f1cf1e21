use crate::config::RenderConfig;
use crate::text_metrics;
use crate::theme::Theme;

/// A caption laid out to fit inside its box.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub width: f32,
    pub height: f32,
}

/// Shrinks and re-wraps `text` until it fits within `fit_ratio` of the box.
///
/// Starting from `max_font_size`, a line that is too wide is wrapped at a
/// character budget proportional to the overflow. The first size whose
/// block fits both dimensions wins; otherwise the result at
/// `min_font_size` is returned even if it still overflows.
pub fn fit_text(
    text: &str,
    box_width: f32,
    box_height: f32,
    theme: &Theme,
    config: &RenderConfig,
) -> FittedText {
    let min_size = config.min_font_size.max(1.0);
    let max_size = config.max_font_size.max(min_size);
    let max_w = box_width * config.fit_ratio;
    let max_h = box_height * config.fit_ratio;
    let char_count = text.chars().count().max(1);

    let mut font_size = max_size;
    loop {
        let mut block = measure_block(vec![text.to_string()], font_size, theme, config);
        if block.width > max_w && block.width > 0.0 {
            let max_chars = ((char_count as f32 * max_w / block.width) as usize).max(1);
            block = measure_block(wrap_chars(text, max_chars), font_size, theme, config);
        }
        if (block.width <= max_w && block.height <= max_h) || font_size - 1.0 < min_size {
            return block;
        }
        font_size -= 1.0;
    }
}

fn measure_block(lines: Vec<String>, font_size: f32, theme: &Theme, config: &RenderConfig) -> FittedText {
    let width = lines
        .iter()
        .map(|line| text_width(line, font_size, &theme.font_family))
        .fold(0.0, f32::max);
    let extent = text_metrics::line_extent(&theme.font_family, font_size).unwrap_or(font_size);
    let gaps = lines.len().saturating_sub(1) as f32;
    let height = gaps * font_size * config.line_height + extent;
    FittedText {
        lines,
        font_size,
        width,
        height,
    }
}

pub(crate) fn text_width(text: &str, font_size: f32, font_family: &str) -> f32 {
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| fallback_text_width(text, font_size))
}

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '\'' => 0.321,
        'i' | 'j' | 'l' | 'I' => 0.25,
        'f' | 't' | 'r' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.93,
        'A'..='Z' => 0.66,
        'a'..='z' => 0.56,
        '0'..='9' => 0.6,
        '@' | '#' | '%' | '&' => 0.946,
        _ => 0.568,
    }
}

/// Greedy word wrap to at most `width` characters per line, splitting words
/// that are longer than a full line.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(chars.drain(..width).collect());
        }
        if chars.is_empty() {
            continue;
        }
        let needed = if current_len == 0 {
            chars.len()
        } else {
            current_len + 1 + chars.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars.iter());
        current_len += chars.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
