//! HTML fragments for the results and palm containers.

use crate::palm::{PalmAnalysis, PalmLine};
use crate::render::projection::{HouseCell, PlanetRow};

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn planet_row_html(row: &PlanetRow) -> String {
    format!(
        concat!(
            r#"<div class="flex justify-between py-1">"#,
            r#"<span class="capitalize font-medium">{}:</span>"#,
            r#"<span>{} ({})</span>"#,
            "</div>"
        ),
        escape_html(&row.name),
        row.degrees_label(),
        row.sign
    )
}

pub fn house_cell_html(cell: &HouseCell) -> String {
    format!(
        concat!(
            r#"<div class="bg-gray-700 p-2 rounded text-center">"#,
            r#"<div class="font-medium">House {}</div>"#,
            "<div>{}</div>",
            r#"<div class="text-sm">{}</div>"#,
            "</div>"
        ),
        cell.number,
        cell.sign,
        cell.degrees_label()
    )
}

pub fn palm_line_html(line: &PalmLine) -> String {
    format!(
        concat!(
            r#"<div class="bg-gray-800 p-4 rounded-lg mb-3">"#,
            r#"<h4 class="font-semibold text-purple-400">{}</h4>"#,
            r#"<p class="text-sm mt-1">{}</p>"#,
            r#"<div class="flex justify-between mt-2 text-xs text-gray-400">"#,
            "<span>Length: {}</span>",
            "<span>Quality: {}</span>",
            "</div>",
            "</div>"
        ),
        escape_html(&line.name),
        escape_html(&line.description),
        escape_html(&line.length),
        escape_html(&line.quality)
    )
}

pub fn planet_rows_html(rows: &[PlanetRow]) -> String {
    rows.iter().map(planet_row_html).collect()
}

pub fn house_cells_html(cells: &[HouseCell]) -> String {
    cells.iter().map(house_cell_html).collect()
}

pub fn palm_analysis_html(analysis: &PalmAnalysis) -> String {
    analysis.lines.iter().map(palm_line_html).collect()
}
