//! Point-code classification: field codes to marker colors.
//!
//! Matching is case-insensitive substring against an ordered rule table;
//! the first matching rule wins, so "POSTE VIA" classifies as a road point.

/// Marker color for codes that match no rule
pub const DEFAULT_COLOR: [u8; 3] = [148, 163, 184];

/// Ordered classification table: (code substrings, marker color)
const RULES: &[(&[&str], [u8; 3])] = &[
    // Control points / benchmarks
    (&["BASE", "BM"], [239, 68, 68]),
    // Vegetation
    (&["ARBOL"], [34, 197, 94]),
    // Roads
    (&["VIA", "CALLE"], [96, 165, 250]),
    // Utility poles
    (&["POSTE"], [245, 158, 11]),
];

/// Resolve a point's classification code to its marker color
pub fn point_color(code: &str) -> [u8; 3] {
    let code = code.to_uppercase();
    for (needles, color) in RULES {
        if needles.iter().any(|needle| code.contains(needle)) {
            return *color;
        }
    }
    DEFAULT_COLOR
}

/// Parse a `#rrggbb` (or bare `rrggbb`) layer color string
pub fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}
