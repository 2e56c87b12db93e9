use model::execution::request::{ApiCredentials, DateRange, EstablishmentId, ReportFlags};

/// Immutable, validated configuration for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Base URL of the sales API
    pub base_url: String,
    pub credentials: ApiCredentials,
    /// Establishments in configured order, duplicates removed
    pub establishments: Vec<EstablishmentId>,
    pub range: DateRange,
    pub flags: ReportFlags,
    /// Abort the run instead of ending the establishment on a failed page
    pub fail_on_transient_error: bool,
}

impl ExtractorConfig {
    pub fn from_builder(builder: ExtractorConfigBuilder) -> Option<Self> {
        Some(Self {
            base_url: builder.base_url?,
            credentials: builder.credentials?,
            establishments: builder.establishments,
            range: builder.range?,
            flags: builder.flags.unwrap_or_default(),
            fail_on_transient_error: builder.fail_on_transient_error.unwrap_or(false),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn establishments(&self) -> &[EstablishmentId] {
        &self.establishments
    }
}

#[derive(Debug, Default)]
pub struct ExtractorConfigBuilder {
    pub base_url: Option<String>,
    pub credentials: Option<ApiCredentials>,
    pub establishments: Vec<EstablishmentId>,
    pub range: Option<DateRange>,
    pub flags: Option<ReportFlags>,
    pub fail_on_transient_error: Option<bool>,
}

impl ExtractorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn establishments(mut self, establishments: Vec<EstablishmentId>) -> Self {
        self.establishments = establishments;
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn flags(mut self, flags: ReportFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn fail_on_transient_error(mut self, fail: bool) -> Self {
        self.fail_on_transient_error = Some(fail);
        self
    }

    /// `None` while a required part (url, credentials, range) is missing.
    pub fn build(self) -> Option<ExtractorConfig> {
        ExtractorConfig::from_builder(self)
    }
}
