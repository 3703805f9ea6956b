//! Console rendering of binary buffers

const BYTES_PER_LINE: usize = 16;
const INDENT: &str = "   ";

/// Render `data` as uppercase hex, 16 space-separated bytes per line
///
/// Every line is indented by three spaces and ends with a newline. An empty
/// buffer renders as an empty string.
pub fn hex_dump(data: &[u8]) -> String {
    data.chunks(BYTES_PER_LINE)
        .map(|line| {
            let bytes: Vec<String> = line.chunks(1).map(hex::encode_upper).collect();
            format!("{INDENT}{}\n", bytes.join(" "))
        })
        .collect()
}
