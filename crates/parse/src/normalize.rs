/// Split raw OCR output into trimmed, non-empty lines, in order.
///
/// Accepts `\n`, `\r\n` and bare `\r` line endings. Tesseract's trailing
/// form feed is whitespace and disappears with the trim.
pub fn normalize_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
