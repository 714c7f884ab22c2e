use std::collections::BTreeSet;

use vanba::palm::{PalmAnalysis, PalmImage};
use vanba::render::{capitalize, ResultsViewModel};
use vanba::theme::{self, Color, ANSI_RESET};
use vanba::{ChartHandle, ChartKind, ChartSpec, ChartSurface, View};

const BAR_WIDTH: usize = 30;
const HOUSES_PER_ROW: usize = 4;

/// Paints the reading onto stdout; alerts go to stderr.
pub struct TerminalView {
    color: bool,
}

impl TerminalView {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color.ansi_fg(), text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) {
        println!("\n{}", self.paint(theme::PRIMARY, text));
    }
}

impl View for TerminalView {
    fn show_results(&mut self, results: &ResultsViewModel) {
        self.heading("Astrological Profile");
        for (label, value) in [
            ("Rashi", &results.rashi),
            ("Ascendant", &results.ascendant),
            ("Nakshatra", &results.nakshatra),
        ] {
            println!("  {:<10} {}", label, self.paint(theme::ACCENT, value));
        }

        self.heading("Planetary Positions");
        for row in &results.planets {
            println!(
                "  {:<10} {:>8} ({})",
                capitalize(&row.name),
                row.degrees_label(),
                row.sign
            );
        }

        self.heading("Houses");
        for chunk in results.houses.chunks(HOUSES_PER_ROW) {
            let cells: Vec<String> = chunk
                .iter()
                .map(|h| format!("{:>2} {:<11} {:>8}", h.number, h.sign, h.degrees_label()))
                .collect();
            println!("  {}", cells.join("   "));
        }
    }

    fn show_palm_image(&mut self, image: &PalmImage) {
        println!(
            "{}",
            self.paint(
                theme::TEXT_SECONDARY,
                &format!("Palm image {} ({}x{})", image.file_name, image.width, image.height)
            )
        );
    }

    fn show_palm_analysis(&mut self, analysis: &PalmAnalysis) {
        self.heading("Palm Reading");
        for line in &analysis.lines {
            println!("  {}", self.paint(theme::SECONDARY_400, &line.name));
            println!("    {}", line.description);
            println!(
                "    {}",
                self.paint(
                    theme::TEXT_SECONDARY,
                    &format!("Length: {}   Quality: {}", line.length, line.quality)
                )
            );
        }
    }

    fn set_loading(&mut self, loading: bool, message: Option<&str>) {
        if loading {
            if let Some(message) = message {
                eprintln!("{}", self.paint(theme::TEXT_SECONDARY, message));
            }
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", self.paint(theme::ERROR, message));
    }
}

/// Draws each chart once as horizontal bars.
#[derive(Debug, Default)]
pub struct TerminalChart {
    next_id: u64,
    live: BTreeSet<ChartHandle>,
    color: bool,
}

impl TerminalChart {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

impl ChartSurface for TerminalChart {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle {
        let handle = ChartHandle(self.next_id);
        self.next_id += 1;
        self.live.insert(handle);

        let unit = match spec.kind {
            ChartKind::Bar => "°",
            ChartKind::Radar => "",
        };
        println!("\n{} ({})", spec.dataset_label, spec.kind);
        // radar values may exceed the suggested max
        let scale = spec
            .values
            .iter()
            .copied()
            .fold(spec.max, f64::max)
            .max(f64::EPSILON);
        for (label, value) in spec.labels.iter().zip(&spec.values) {
            let filled = ((value.max(0.0) / scale) * BAR_WIDTH as f64).round() as usize;
            let bar = format!("{:<width$}", "#".repeat(filled.min(BAR_WIDTH)), width = BAR_WIDTH);
            let bar = if self.color {
                format!("{}{}{}", spec.stroke.ansi_fg(), bar, ANSI_RESET)
            } else {
                bar
            };
            println!("  {:<10} {} {:.2}{}", label, bar, value, unit);
        }
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if !self.live.remove(&handle) {
            log::warn!("destroy requested for unknown chart {:?}", handle);
        }
    }

    fn live_charts(&self) -> usize {
        self.live.len()
    }
}
