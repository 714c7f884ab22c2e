use std::path::Path;

use vanba_config::VanbaSettings;

use crate::client::{AstrologyService, HttpAstrologyClient};
use crate::error::{Result, VanbaError};
use crate::form::{read_birth_input, BirthForm, FormDefaults};
use crate::model::SubmittedBirth;
use crate::palm::{capture_from_bytes, capture_from_path, PalmAnalyzer, PalmImage, TemplatePalmAnalyzer};
use crate::render::{ChartSurface, ResultRenderer, View};
use crate::session::Session;

pub const PROCESSING_IMAGE_MESSAGE: &str = "Processing palm image...";
pub const ANALYZING_PALM_MESSAGE: &str = "Analyzing palm...";

/// Drives the three user actions against one session.
///
/// Handlers take `&mut self`, so a second calculation cannot start while one
/// is in flight. Each handler reports its own failure to the view and returns
/// it; nothing carries over to the next action except `session.error`.
pub struct ReadingController {
    service: Box<dyn AstrologyService>,
    analyzer: Box<dyn PalmAnalyzer>,
    renderer: ResultRenderer,
    defaults: FormDefaults,
    session: Session,
}

impl ReadingController {
    pub fn new(
        service: Box<dyn AstrologyService>,
        analyzer: Box<dyn PalmAnalyzer>,
        renderer: ResultRenderer,
        defaults: FormDefaults,
    ) -> Self {
        Self {
            service,
            analyzer,
            renderer,
            defaults,
            session: Session::new(),
        }
    }

    /// HTTP client, template analyzer and chart kind taken from settings.
    pub fn from_settings(settings: &VanbaSettings, surface: Box<dyn ChartSurface>) -> Self {
        Self::new(
            Box::new(HttpAstrologyClient::from_settings(&settings.api)),
            Box::new(TemplatePalmAnalyzer::new(settings.palm.analysis_delay)),
            ResultRenderer::new(settings.chart.kind, surface),
            FormDefaults::from(&settings.birth),
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &ResultRenderer {
        &self.renderer
    }

    pub async fn handle_astrology_calculation(
        &mut self,
        form: &BirthForm,
        view: &mut dyn View,
    ) -> Result<()> {
        self.set_loading(view, true, None);
        let outcome = self.calculate(form, view).await;
        self.set_loading(view, false, None);
        self.finish(outcome, view)
    }

    async fn calculate(&mut self, form: &BirthForm, view: &mut dyn View) -> Result<()> {
        let input = read_birth_input(form, &self.defaults)?;
        let result = self.service.calculate(&input).await?;

        self.renderer.render(&result, view);
        self.session.user_data = Some(SubmittedBirth::new(input));
        self.session.astrology = Some(result);
        self.session.error = None;
        self.prepare_palm_analysis();
        Ok(())
    }

    pub async fn handle_image_upload(&mut self, path: &Path, view: &mut dyn View) -> Result<()> {
        self.set_loading(view, true, Some(PROCESSING_IMAGE_MESSAGE));
        let outcome = capture_from_path(path).await;
        self.set_loading(view, false, None);
        let outcome = outcome.map(|image| self.store_image(image, view));
        self.finish(outcome, view)
    }

    /// Same as [`handle_image_upload`](Self::handle_image_upload) for bytes
    /// already in memory.
    pub fn handle_image_bytes(
        &mut self,
        file_name: &str,
        bytes: &[u8],
        view: &mut dyn View,
    ) -> Result<()> {
        self.set_loading(view, true, Some(PROCESSING_IMAGE_MESSAGE));
        let outcome = capture_from_bytes(file_name, bytes);
        self.set_loading(view, false, None);
        let outcome = outcome.map(|image| self.store_image(image, view));
        self.finish(outcome, view)
    }

    pub async fn handle_palm_analysis(&mut self, view: &mut dyn View) -> Result<()> {
        let image = match self.session.palm_image.clone() {
            Some(image) => image,
            None => return self.finish(Err(VanbaError::MissingImage), view),
        };

        self.set_loading(view, true, Some(ANALYZING_PALM_MESSAGE));
        let outcome = self
            .analyzer
            .analyze(&image, self.session.astrology.as_ref())
            .await;
        self.set_loading(view, false, None);

        let outcome = outcome.map(|analysis| {
            view.show_palm_analysis(&analysis);
            log::info!(
                "palm analysis by {} complete ({} lines)",
                self.analyzer.name(),
                analysis.lines.len()
            );
            self.session.palm_analysis = Some(analysis);
        });
        self.finish(outcome, view)
    }

    fn store_image(&mut self, image: PalmImage, view: &mut dyn View) {
        view.show_palm_image(&image);
        self.session.palm_image = Some(image);
    }

    fn prepare_palm_analysis(&self) {
        log::info!("palm analysis prepared with astrology context");
    }

    fn set_loading(&mut self, view: &mut dyn View, loading: bool, message: Option<&str>) {
        self.session.loading = loading;
        view.set_loading(loading, message);
    }

    fn finish(&mut self, outcome: Result<()>, view: &mut dyn View) -> Result<()> {
        if let Err(err) = &outcome {
            self.display_error(err, view);
        }
        outcome
    }

    fn display_error(&mut self, err: &VanbaError, view: &mut dyn View) {
        match err.detail() {
            Some(detail) => log::error!("{} ({})", err, detail),
            None => log::error!("{}", err),
        }
        self.session.error = Some(err.to_string());
        view.alert(&format!("Error: {}", err));
    }
}
