pub mod chart;
pub mod document;
pub mod markup;
pub mod projection;
pub mod view;

pub use chart::{ChartHandle, ChartKind, ChartRegistry, ChartSpec, ChartSurface};
pub use document::{DocumentView, ElementState};
pub use projection::{capitalize, project, HouseCell, PlanetRow, ResultsViewModel};
pub use view::{ElementId, View};

use crate::model::AstrologyResult;

/// Projects results onto a view and owns the single live chart instance.
pub struct ResultRenderer {
    kind: ChartKind,
    surface: Box<dyn ChartSurface>,
    current: Option<(ChartHandle, ChartSpec)>,
}

impl ResultRenderer {
    pub fn new(kind: ChartKind, surface: Box<dyn ChartSurface>) -> Self {
        Self {
            kind,
            surface,
            current: None,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn surface(&self) -> &dyn ChartSurface {
        self.surface.as_ref()
    }

    pub fn current_chart(&self) -> Option<(ChartHandle, &ChartSpec)> {
        self.current.as_ref().map(|(handle, spec)| (*handle, spec))
    }

    /// Full re-render: text nodes, planet rows, house cells, chart.
    ///
    /// The previous chart is destroyed before the new one is created.
    pub fn render(&mut self, result: &AstrologyResult, view: &mut dyn View) -> ResultsViewModel {
        let model = project(result);
        view.show_results(&model);

        if let Some((handle, _)) = self.current.take() {
            self.surface.destroy(handle);
        }
        if !result.planets.is_empty() {
            let spec = ChartSpec::for_planets(self.kind, &result.planets);
            let handle = self.surface.create(&spec);
            log::debug!("planet chart {:?} created ({} series)", handle, spec.labels.len());
            self.current = Some((handle, spec));
        }
        model
    }
}
