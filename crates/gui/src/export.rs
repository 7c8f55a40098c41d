//! Point cloud export.

use std::io::{self, Write};

use shared::Point;

/// Write the point cloud as CSV (name, easting, northing, elevation, code,
/// fixed flag). Coordinates keep millimeter precision.
pub fn write_points_csv<W: Write>(points: &[Point], mut out: W) -> io::Result<()> {
    writeln!(out, "nombre,este,norte,cota,codigo,fijo")?;
    for p in points {
        writeln!(
            out,
            "{},{:.3},{:.3},{:.3},{},{}",
            csv_field(&p.name),
            p.x,
            p.y,
            p.z,
            csv_field(&p.code),
            if p.is_fixed { "1" } else { "0" },
        )?;
    }
    Ok(())
}

/// Quote a field only when it needs it
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_csv_header_and_rows() {
        let points = vec![
            fixtures::fixed_point(1, "BM1", 1000.0, 2000.0, 98.765),
            fixtures::coded_point(2, "P2", 10.5, -3.25, "ARBOL"),
        ];
        let mut buf = Vec::new();
        write_points_csv(&points, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "nombre,este,norte,cota,codigo,fijo");
        assert_eq!(lines[1], "BM1,1000.000,2000.000,98.765,,1");
        assert_eq!(lines[2], "P2,10.500,-3.250,0.000,ARBOL,0");
    }

    #[test]
    fn test_csv_quotes_awkward_names() {
        let mut p = fixtures::point(1, "poste, esquina", 0.0, 0.0, 0.0);
        p.code = "A\"B".to_string();
        let mut buf = Vec::new();
        write_points_csv(&[p], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"poste, esquina\""));
        assert!(text.contains("\"A\"\"B\""));
    }
}
