/// Spaces kept between the longest label and its value.
pub const LABEL_GAP: usize = 2;

/// Column-aligns tab-delimited `label\tvalue` lines.
///
/// The label is everything before the first tab and the value is the field
/// between the first and second tab; anything after a second tab is dropped, so
/// the output never holds a tab. Labels are padded to the longest label plus
/// [`LABEL_GAP`]. Lines without a tab pass through untouched, which makes
/// aligning already aligned text a no-op.
pub fn align(text: &str) -> String {
    let width = text
        .split('\n')
        .filter_map(|line| line.split_once('\t'))
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    text.split('\n')
        .map(|line| match line.split_once('\t') {
            Some((label, rest)) => {
                let value = rest.split('\t').next().unwrap_or_default();
                let pad = width + LABEL_GAP - label.chars().count();
                format!("{label}{}{value}", " ".repeat(pad))
            }
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
