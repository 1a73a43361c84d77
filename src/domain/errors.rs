use chrono::NaiveDate;
use derive_more::Display;
use wasm_bindgen::JsValue;

/// Root error type for the entire application
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Domain Error: {}", _0)]
    Domain(DomainError),
    #[display(fmt = "Configuration Error: {}", _0)]
    Configuration(ConfigurationError),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(RenderingError),
    #[display(fmt = "UI Error: {}", _0)]
    Ui(UiError),
}

/// Problems with the equity data itself
#[derive(Debug, Clone, PartialEq, Display)]
pub enum DomainError {
    #[display(fmt = "invalid input data: {}", _0)]
    InvalidInputData(String),
    #[display(fmt = "equity series is empty")]
    EmptySeries,
    #[display(fmt = "record {} has a non-finite {}", index, field)]
    NonFiniteValue { index: usize, field: &'static str },
    #[display(fmt = "date window starts after it ends ({} > {})", start, end)]
    InvalidDateWindow { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum ConfigurationError {
    #[display(fmt = "malformed configuration: {}", _0)]
    Malformed(String),
    #[display(fmt = "invalid value for `{}`: {}", field, reason)]
    InvalidParameter { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum RenderingError {
    #[display(fmt = "2D context unavailable: {}", _0)]
    ContextUnavailable(String),
    #[display(fmt = "surface {}x{} leaves no room for the plot area", width, height)]
    SurfaceTooSmall { width: u32, height: u32 },
    #[display(fmt = "draw call failed: {}", _0)]
    DrawFailed(String),
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum UiError {
    #[display(fmt = "browser API unavailable: {}", _0)]
    BrowserApi(String),
    #[display(fmt = "element `{}` not found", _0)]
    ElementNotFound(String),
    #[display(fmt = "element `{}` has no `{}` attribute", element, attribute)]
    MissingAttribute { element: String, attribute: String },
}

impl std::error::Error for AppError {}
impl std::error::Error for DomainError {}
impl std::error::Error for ConfigurationError {}
impl std::error::Error for RenderingError {}
impl std::error::Error for UiError {}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        AppError::Domain(error)
    }
}

impl From<ConfigurationError> for AppError {
    fn from(error: ConfigurationError) -> Self {
        AppError::Configuration(error)
    }
}

impl From<RenderingError> for AppError {
    fn from(error: RenderingError) -> Self {
        AppError::Rendering(error)
    }
}

impl From<UiError> for AppError {
    fn from(error: UiError) -> Self {
        AppError::Ui(error)
    }
}

impl From<AppError> for JsValue {
    fn from(error: AppError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
pub type DomainResult<T> = Result<T, DomainError>;
