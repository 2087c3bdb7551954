use tracing::{debug, instrument};
use url::Url;

use crate::client::OpenWeatherClient;
use crate::error::Result;
use crate::model::{Language, ResponseFormat, UnitSystem};
use crate::transport::redact;

/// Which of the two API hosts serves an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    Api,
    /// Paid plans: hourly and climatic forecasts.
    Pro,
}

/// One API endpoint: where it lives, what it sends and how its body maps to models.
pub trait Endpoint {
    type Output;

    fn host(&self) -> Host {
        Host::Api
    }

    /// Path relative to the host root, without a leading slash.
    fn path(&self) -> &'static str;

    fn query(&self) -> Vec<(&'static str, String)>;

    /// Rejects input the API would refuse. Runs before the URL is built.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// JSON payload for endpoints that are called with POST.
    fn body(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn parse(&self, body: &str, units: UnitSystem) -> Result<Self::Output>;
}

/// Endpoints that honor `units` and `lang`.
pub trait Localized: Endpoint {}

/// Endpoints that can answer with `mode=xml`.
pub trait XmlMode: Endpoint {}

/// Endpoints that can answer with `mode=html`.
pub trait HtmlMode: Endpoint {}

/// A fully described request, ready to be turned into a URL or sent.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a, E> {
    client: &'a OpenWeatherClient,
    pub(crate) endpoint: E,
    units: Option<UnitSystem>,
    language: Option<Language>,
}

impl<'a, E: Endpoint> ApiRequest<'a, E> {
    pub(crate) fn new(client: &'a OpenWeatherClient, endpoint: E) -> Self {
        Self { client, endpoint, units: None, language: None }
    }

    pub(crate) fn localized(client: &'a OpenWeatherClient, endpoint: E) -> Self
    where
        E: Localized,
    {
        Self {
            client,
            endpoint,
            units: Some(client.options().unit_system),
            language: client.options().language,
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Unit system the response values will be expressed in.
    pub fn units(&self) -> UnitSystem {
        self.units.unwrap_or_default()
    }

    pub fn url(&self) -> Result<Url> {
        self.url_with_mode(None)
    }

    fn url_with_mode(&self, mode: Option<ResponseFormat>) -> Result<Url> {
        self.endpoint.validate()?;

        let mut url = self.client.base_url(self.endpoint.host()).join(self.endpoint.path())?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in self.endpoint.query() {
                query.append_pair(key, &value);
            }
            if let Some(mode) = mode {
                query.append_pair("mode", mode.as_str());
            }
            if let Some(units) = self.units.and_then(|u| u.query_value()) {
                query.append_pair("units", units);
            }
            if let Some(language) = self.language {
                query.append_pair("lang", language.code());
            }
            query.append_pair("appid", self.client.api_key());
        }

        Ok(url)
    }

    #[instrument(level = "debug", skip(self), fields(path = self.endpoint.path()))]
    async fn fetch(&self, mode: Option<ResponseFormat>) -> Result<String> {
        let url = self.url_with_mode(mode)?;
        let transport = self.client.transport();

        match self.endpoint.body()? {
            Some(body) => {
                debug!(url = %redact(&url), bytes = body.len(), "POST");
                transport.post_json(&url, body).await
            }
            None => {
                debug!(url = %redact(&url), "GET");
                transport.get(&url).await
            }
        }
    }

    /// Raw JSON body as returned by the API.
    pub async fn retrieve_json(&self) -> Result<String> {
        self.fetch(None).await
    }

    /// Response mapped into the endpoint's model.
    pub async fn retrieve(&self) -> Result<E::Output> {
        let body = self.fetch(None).await?;
        self.endpoint.parse(&body, self.units())
    }
}

impl<E: Localized> ApiRequest<'_, E> {
    pub fn unit_system(mut self, units: UnitSystem) -> Self {
        self.units = Some(units);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

impl<E: XmlMode> ApiRequest<'_, E> {
    pub fn xml_url(&self) -> Result<Url> {
        self.url_with_mode(Some(ResponseFormat::Xml))
    }

    pub async fn retrieve_xml(&self) -> Result<String> {
        self.fetch(Some(ResponseFormat::Xml)).await
    }
}

impl<E: HtmlMode> ApiRequest<'_, E> {
    pub async fn retrieve_html(&self) -> Result<String> {
        self.fetch(Some(ResponseFormat::Html)).await
    }
}
