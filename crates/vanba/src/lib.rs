//! Vanba - astrology and palm reading client
//!
//! Collects birth details, calls the remote calculation API, projects the
//! result onto a typed view, and runs a pluggable palm analysis.

pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod model;
pub mod palm;
pub mod render;
pub mod session;
pub mod theme;
pub mod zodiac;

pub use client::{AstrologyService, HttpAstrologyClient};
pub use controller::ReadingController;
pub use error::{ErrorKind, Result, VanbaError};
pub use form::{BirthForm, FormDefaults};
pub use model::{AstrologyResult, BirthInput, PlanetInfo, Planets, SignLabel};
pub use palm::{PalmAnalysis, PalmAnalyzer, PalmImage, PalmLine, TemplatePalmAnalyzer};
pub use render::{
    ChartHandle, ChartKind, ChartRegistry, ChartSpec, ChartSurface, DocumentView, ElementId,
    ResultRenderer, ResultsViewModel, View,
};
pub use session::Session;
pub use zodiac::{get_sign, get_sign_index, ZODIAC_SIGNS};
