use thiserror::Error;

/// The map library or its stylesheet could not be brought into the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapLoadError {
    #[error("stylesheet `{href}` failed to load")]
    Stylesheet { href: String },
    #[error("script `{src}` failed to load")]
    Script { src: String },
    #[error("map engine is missing after its script loaded")]
    EngineMissing,
    #[error("map engine rejected the container: {0}")]
    Engine(String),
    #[error("no document to load map assets into")]
    NoDocument,
    #[error("map container is not mounted")]
    NoContainer,
}

impl MapLoadError {
    pub fn user_message(&self) -> &'static str {
        "خطا در بارگذاری نقشه"
    }

    pub fn user_hint(&self) -> &'static str {
        match self {
            MapLoadError::Stylesheet { .. }
            | MapLoadError::Script { .. }
            | MapLoadError::EngineMissing => {
                "فایل‌های Leaflet را در مسیر assets/vendor/leaflet/ قرار دهید (leaflet.css و leaflet.js)."
            }
            _ => "لطفاً صفحه را دوباره بارگذاری کنید.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported by this browser")]
    Unavailable,
    #[error("geolocation was denied or timed out")]
    Denied,
    #[error("no visible center has valid coordinates")]
    NoEligibleRecord,
}

impl GeolocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unavailable => "مرورگر شما از موقعیت مکانی پشتیبانی نمی‌کند.",
            GeolocationError::Denied => "دسترسی موقعیت مکانی داده نشد.",
            GeolocationError::NoEligibleRecord => "مرکزی با مختصات معتبر پیدا نشد.",
        }
    }
}
