//! Shaded text rendering of a [`MeshGrid`] for terminals.

use crate::grid::MeshGrid;

/// Shades from lowest to highest value.
const RAMP: &[u8] = b" .:-=+*#%@";
const GAP: char = '?';

/// Render `mesh` with y increasing upwards and x to the right.
///
/// Each cell is two characters wide so the aspect ratio looks roughly square.
/// Missing cells print as `?`. A legend with the value range follows the map.
pub fn render_ascii(mesh: &MeshGrid) -> String {
    let Some((lo, hi)) = mesh.value_range() else {
        return format!("{}: no values to plot\n", mesh.value_label);
    };
    let span = hi - lo;
    let shade = |v: f64| -> char {
        let t = if span > 0.0 { (v - lo) / span } else { 0.5 };
        let idx = (t * (RAMP.len() - 1) as f64).round() as usize;
        RAMP[idx.min(RAMP.len() - 1)] as char
    };

    let label_width = mesh
        .ys
        .iter()
        .map(|y| format_axis(*y).len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{} over {} (→) × {} (↑)\n", mesh.value_label, mesh.x_label, mesh.y_label);
    for (j, y) in mesh.ys.iter().enumerate().rev() {
        out.push_str(&format!("{:>w$} |", format_axis(*y), w = label_width));
        for row in &mesh.z {
            let c = match row.get(j).copied().flatten() {
                Some(v) => shade(v),
                None => GAP,
            };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str(&format!("{:>w$} +{}\n", "", "-".repeat(mesh.xs.len() * 2), w = label_width));
    if let (Some(first), Some(last)) = (mesh.xs.first(), mesh.xs.last()) {
        out.push_str(&format!(
            "{:>w$}  {} .. {}\n",
            "",
            format_axis(*first),
            format_axis(*last),
            w = label_width
        ));
    }
    out.push_str(&format!(
        "scale: '{}' = {} .. '{}' = {}",
        RAMP[0] as char,
        format_axis(lo),
        RAMP[RAMP.len() - 1] as char,
        format_axis(hi)
    ));
    if mesh.z.iter().flatten().any(Option::is_none) {
        out.push_str(&format!(", '{}' = no data", GAP));
    }
    out.push('\n');
    out
}

fn format_axis(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e5 || v.abs() < 1e-3) {
        format!("{:.3e}", v)
    } else {
        format!("{}", (v * 1e4).round() / 1e4)
    }
}
