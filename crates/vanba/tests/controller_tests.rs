use async_trait::async_trait;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use vanba::client::interpret_response;
use vanba::controller::{ANALYZING_PALM_MESSAGE, PROCESSING_IMAGE_MESSAGE};
use vanba::error::{CALCULATION_FAILED, INVALID_DATE_OF_BIRTH, PALM_IMAGE_REQUIRED};
use vanba::render::{ChartHandle, ChartSpec};
use vanba::{
    AstrologyResult, AstrologyService, BirthForm, BirthInput, ChartKind, ChartRegistry,
    ChartSurface, DocumentView, ElementId, FormDefaults, ReadingController, ResultRenderer,
    TemplatePalmAnalyzer, VanbaError,
};

const SAMPLE_RESPONSE: &str = r#"{
    "success": true,
    "data": {
        "rashi": {"name": "Leo"},
        "ascendant": "Virgo",
        "nakshatra": {"name": "Magha"},
        "planets": {
            "sun": {"longitude": 45.5, "speed": 0.98},
            "moon": {"longitude": 125.0, "speed": 13.2},
            "mercury": {"longitude": 61.25, "speed": 1.4},
            "venus": {"longitude": 15.0, "speed": 1.2},
            "mars": {"longitude": 200.0, "speed": 0.6},
            "saturn": {"longitude": 300.0, "speed": -0.05}
        },
        "houses": [150.0, 180.0, 210.0, 240.0, 270.0, 300.0,
                   330.0, 0.0, 30.0, 60.0, 90.0, 120.0]
    }
}"#;

/// Replays a fixed HTTP exchange and counts calls.
struct ScriptedService {
    status: u16,
    body: &'static str,
    calls: Arc<AtomicUsize>,
    last_input: Arc<Mutex<Option<BirthInput>>>,
}

impl ScriptedService {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            calls: Arc::new(AtomicUsize::new(0)),
            last_input: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl AstrologyService for ScriptedService {
    async fn calculate(&self, input: &BirthInput) -> vanba::Result<AstrologyResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.clone());
        interpret_response(self.status, self.body)
    }
}

struct FailingService;

#[async_trait]
impl AstrologyService for FailingService {
    async fn calculate(&self, _input: &BirthInput) -> vanba::Result<AstrologyResult> {
        Err(VanbaError::network("connection refused"))
    }
}

/// Chart surface whose live count is observable after the controller takes ownership.
#[derive(Clone, Default)]
struct SharedSurface(Arc<Mutex<ChartRegistry>>);

impl ChartSurface for SharedSurface {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle {
        self.0.lock().unwrap().create(spec)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.0.lock().unwrap().destroy(handle)
    }

    fn live_charts(&self) -> usize {
        self.0.lock().unwrap().live_charts()
    }
}

fn controller(service: impl AstrologyService + 'static, kind: ChartKind) -> ReadingController {
    ReadingController::new(
        Box::new(service),
        Box::new(TemplatePalmAnalyzer::immediate()),
        ResultRenderer::new(kind, Box::new(ChartRegistry::new())),
        FormDefaults::default(),
    )
}

fn valid_form() -> BirthForm {
    BirthForm::new("1990-05-14", "08:30", "", "")
}

fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(6, 8, Rgb([200, 150, 120]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_malformed_date_never_calls_service() {
    let service = ScriptedService::new(200, SAMPLE_RESPONSE);
    let calls = service.calls.clone();
    let mut controller = controller(service, ChartKind::Radar);
    let mut view = DocumentView::new();

    let result = controller
        .handle_astrology_calculation(&BirthForm::new("not-a-date", "08:30", "", ""), &mut view)
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(view.alerts(), &[format!("Error: {}", INVALID_DATE_OF_BIRTH)]);
    assert!(!view.is_visible(ElementId::Loader));
    assert!(!view.is_visible(ElementId::ResultsSection));
    assert_eq!(controller.session().error.as_deref(), Some(INVALID_DATE_OF_BIRTH));
    assert!(!controller.session().loading);
}

#[tokio::test]
async fn test_successful_calculation_populates_view() {
    let service = ScriptedService::new(200, SAMPLE_RESPONSE);
    let last_input = service.last_input.clone();
    let mut controller = controller(service, ChartKind::Bar);
    let mut view = DocumentView::new();

    controller
        .handle_astrology_calculation(&valid_form(), &mut view)
        .await
        .unwrap();

    let sent = last_input.lock().unwrap().clone().unwrap();
    assert_eq!(sent.latitude, 28.6139);
    assert_eq!(sent.longitude, 77.2090);

    assert!(view.alerts().is_empty());
    assert!(view.is_visible(ElementId::ResultsSection));
    assert!(!view.is_visible(ElementId::Loader));
    assert_eq!(view.text(ElementId::Rashi), Some("Leo"));
    assert_eq!(view.text(ElementId::Ascendant), Some("Virgo"));
    assert_eq!(view.text(ElementId::Nakshatra), Some("Magha"));

    let planets = view.html(ElementId::PlanetDetails).unwrap();
    assert!(planets.contains("sun:</span><span>45.50° (Taurus)"));
    assert!(planets.find("sun").unwrap() < planets.find("saturn").unwrap());
    let houses = view.html(ElementId::HouseDetails).unwrap();
    assert!(houses.contains("House 1</div><div>Virgo</div>"));
    assert!(houses.contains("House 12</div><div>Leo</div>"));

    let session = controller.session();
    assert!(session.has_astrology());
    assert_eq!(session.user_data.as_ref().unwrap().input, sent);
    assert!(session.error.is_none());

    let (_, spec) = controller.renderer().current_chart().unwrap();
    assert_eq!(spec.kind, ChartKind::Bar);
    assert_eq!(spec.labels[0], "Sun");
    assert!((spec.values[0] - 15.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_server_error_message_is_alerted() {
    let mut controller = controller(
        ScriptedService::new(400, r#"{"success": false, "error": "Invalid date"}"#),
        ChartKind::Radar,
    );
    let mut view = DocumentView::new();

    let err = controller
        .handle_astrology_calculation(&valid_form(), &mut view)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        VanbaError::Server {
            status: 400,
            message: "Invalid date".to_string()
        }
    );
    assert_eq!(view.alerts(), &["Error: Invalid date".to_string()]);
    assert!(!controller.session().has_astrology());
}

#[tokio::test]
async fn test_error_body_with_success_status_is_alerted() {
    let mut controller = controller(
        ScriptedService::new(200, r#"{"error": "Ephemeris unavailable"}"#),
        ChartKind::Radar,
    );
    let mut view = DocumentView::new();

    controller
        .handle_astrology_calculation(&valid_form(), &mut view)
        .await
        .unwrap_err();
    assert_eq!(view.alerts(), &["Error: Ephemeris unavailable".to_string()]);
    assert!(!view.is_visible(ElementId::ResultsSection));
    assert!(!controller.session().has_astrology());
}

#[tokio::test]
async fn test_server_error_without_message_uses_fallback() {
    let mut controller = controller(ScriptedService::new(502, "<html>bad gateway</html>"), ChartKind::Radar);
    let mut view = DocumentView::new();

    controller
        .handle_astrology_calculation(&valid_form(), &mut view)
        .await
        .unwrap_err();
    assert_eq!(view.alerts(), &[format!("Error: {}", CALCULATION_FAILED)]);
}

#[tokio::test]
async fn test_network_failure_uses_fallback() {
    let mut controller = controller(FailingService, ChartKind::Radar);
    let mut view = DocumentView::new();

    let err = controller
        .handle_astrology_calculation(&valid_form(), &mut view)
        .await
        .unwrap_err();
    assert_eq!(err.detail(), Some("connection refused"));
    assert_eq!(view.alerts(), &[format!("Error: {}", CALCULATION_FAILED)]);
    assert!(!view.is_visible(ElementId::Loader));
}

#[tokio::test]
async fn test_rerender_keeps_single_chart() {
    let surface = SharedSurface::default();
    let mut controller = ReadingController::new(
        Box::new(ScriptedService::new(200, SAMPLE_RESPONSE)),
        Box::new(TemplatePalmAnalyzer::immediate()),
        ResultRenderer::new(ChartKind::Radar, Box::new(surface.clone())),
        FormDefaults::default(),
    );
    let mut view = DocumentView::new();

    for _ in 0..3 {
        controller
            .handle_astrology_calculation(&valid_form(), &mut view)
            .await
            .unwrap();
        assert_eq!(surface.live_charts(), 1);
    }
    let registry = surface.0.lock().unwrap();
    let (handle, spec) = registry.latest().unwrap();
    assert_eq!(handle, ChartHandle(2));
    assert_eq!(spec.kind, ChartKind::Radar);
}

#[tokio::test]
async fn test_palm_analysis_requires_image() {
    let mut controller = controller(ScriptedService::new(200, SAMPLE_RESPONSE), ChartKind::Radar);
    let mut view = DocumentView::new();

    let err = controller.handle_palm_analysis(&mut view).await.unwrap_err();
    assert_eq!(err, VanbaError::MissingImage);
    assert_eq!(view.alerts(), &[format!("Error: {}", PALM_IMAGE_REQUIRED)]);
    assert!(view.html(ElementId::PalmResults).is_none());
}

#[tokio::test]
async fn test_generic_palm_analysis_without_astrology() {
    let mut controller = controller(ScriptedService::new(200, SAMPLE_RESPONSE), ChartKind::Radar);
    let mut view = DocumentView::new();

    controller
        .handle_image_bytes("palm.png", &png_bytes(), &mut view)
        .unwrap();
    assert_eq!(view.attribute(ElementId::PalmCanvas, "width"), Some("6"));
    assert_eq!(view.attribute(ElementId::PalmCanvas, "height"), Some("8"));
    assert_eq!(view.text(ElementId::Loader), Some(PROCESSING_IMAGE_MESSAGE));

    controller.handle_palm_analysis(&mut view).await.unwrap();
    assert_eq!(view.text(ElementId::Loader), Some(ANALYZING_PALM_MESSAGE));
    assert!(!view.is_visible(ElementId::Loader));

    let analysis = controller.session().palm_analysis.as_ref().unwrap();
    assert!(!analysis.astrology_integration);
    assert_eq!(analysis.lines[3].quality, "Faint");
    assert_eq!(view.scrolled_to(), Some(ElementId::PalmResults));
    assert!(view
        .html(ElementId::PalmResults)
        .unwrap()
        .contains("<span>Quality: Faint</span>"));
}

#[tokio::test]
async fn test_integrated_palm_analysis_after_calculation() {
    let mut controller = controller(ScriptedService::new(200, SAMPLE_RESPONSE), ChartKind::Radar);
    let mut view = DocumentView::new();

    controller
        .handle_astrology_calculation(&valid_form(), &mut view)
        .await
        .unwrap();
    controller
        .handle_image_bytes("palm.png", &png_bytes(), &mut view)
        .unwrap();
    controller.handle_palm_analysis(&mut view).await.unwrap();

    let analysis = controller.session().palm_analysis.as_ref().unwrap();
    assert!(analysis.astrology_integration);
    assert!(analysis.lines[0].description.contains("Venus in Aries (15.00°)"));
    assert!(analysis.lines[1].description.contains("4th house cusp in Sagittarius (240.00°)"));
    assert!(analysis.lines[3].description.contains("11th house cusp in Cancer (90.00°)"));
    assert!(view.alerts().is_empty());
}

#[tokio::test]
async fn test_unreadable_image_is_alerted() {
    let mut controller = controller(ScriptedService::new(200, SAMPLE_RESPONSE), ChartKind::Radar);
    let mut view = DocumentView::new();

    let err = controller
        .handle_image_upload(std::path::Path::new("/nonexistent/palm.jpg"), &mut view)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), vanba::ErrorKind::FileRead);
    assert_eq!(view.alerts(), &["Error: Failed to read image file".to_string()]);
    assert!(controller.session().palm_image.is_none());
    assert!(!view.is_visible(ElementId::Loader));
}
