//! Where drill questions come from.
//!
//! Three providers share the [`QuestionSource`] trait: a remote question service speaking JSON
//! over HTTP, a question bank file, and the built-in bank. Whatever the provider returns is
//! validated and checked against the recent history before it reaches the student.
//! [`fetch_or_fallback`] never fails: any provider error turns into a batch of built-in
//! equations flagged as offline.
use super::equation::{ChemicalEquation, EquationList};
use super::fallback::fallback_for;
use super::history::signature;
use super::validate::validate_equation;
use crate::Balance::hints::{Language, Topic};
use crate::Utils::load_from_file::{LoadData, LoadError};
use crate::settings::DrillConfig;
use enum_dispatch::enum_dispatch;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum QuestionSourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Question service did not answer in time")]
    Timeout,
    #[error("No equations available")]
    Empty,
    #[error("Invalid equation: {0}")]
    InvalidEquation(String),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Body of a request to the question service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRequest {
    pub count: usize,
    pub topic: Topic,
    pub language: Language,
    /// signatures of recently served equations, oldest first
    pub recent: Vec<String>,
}

impl QuestionRequest {
    pub fn new(count: usize, topic: Topic, language: Language) -> Self {
        Self {
            count,
            topic,
            language,
            recent: Vec::new(),
        }
    }

    pub fn with_recent(mut self, recent: Vec<String>) -> Self {
        self.recent = recent;
        self
    }

    fn is_recent(&self, equation: &ChemicalEquation) -> bool {
        let signature = signature(equation);
        self.recent.iter().any(|s| *s == signature)
    }
}

#[enum_dispatch]
pub trait QuestionSource {
    fn request_equations(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<ChemicalEquation>, QuestionSourceError>;
    /// short description for the menu and the log
    fn describe(&self) -> String;
}

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn post_json(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> Result<String, QuestionSourceError>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn post_json(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> Result<String, QuestionSourceError> {
        let response = self
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .timeout(timeout)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text());
        response.map_err(|e| {
            if e.is_timeout() {
                QuestionSourceError::Timeout
            } else {
                QuestionSourceError::Network(e)
            }
        })
    }
}

/// Drops equations that break the balance invariant, dedups them and skips recently served
/// ones. If every equation is a recent one, repeats are better than nothing.
fn select(
    equations: Vec<ChemicalEquation>,
    request: &QuestionRequest,
    origin: &str,
) -> Result<Vec<ChemicalEquation>, QuestionSourceError> {
    let mut valid: Vec<ChemicalEquation> = Vec::new();
    for equation in equations {
        if let Err(reason) = validate_equation(&equation) {
            warn!("dropping equation '{}' from {}: {}", equation, origin, reason);
            continue;
        }
        if valid.iter().any(|e| signature(e) == signature(&equation)) {
            continue;
        }
        valid.push(equation);
    }
    if valid.is_empty() {
        return Err(QuestionSourceError::Empty);
    }
    let (fresh, recent): (Vec<_>, Vec<_>) = valid.into_iter().partition(|e| !request.is_recent(e));
    let mut selected = if fresh.is_empty() {
        debug!("every equation from {} was served recently", origin);
        recent
    } else {
        fresh
    };
    selected.truncate(request.count.max(1));
    Ok(selected)
}

pub struct RemoteSource<C: HttpClient = Client> {
    client: C,
    endpoint: Url,
    timeout: Duration,
}

impl RemoteSource<Client> {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, QuestionSourceError> {
        Self::with_client(Client::new(), endpoint, timeout_secs)
    }
}

impl<C: HttpClient> RemoteSource<C> {
    pub fn with_client(
        client: C,
        endpoint: &str,
        timeout_secs: u64,
    ) -> Result<Self, QuestionSourceError> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self {
            client,
            endpoint,
            timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }
}

impl<C: HttpClient> QuestionSource for RemoteSource<C> {
    fn request_equations(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<ChemicalEquation>, QuestionSourceError> {
        let body = serde_json::to_string(request)?;
        debug!("requesting {} equations from {}", request.count, self.endpoint);
        let text = self
            .client
            .post_json(self.endpoint.as_str(), body, self.timeout)?;
        let equations = serde_json::from_str::<EquationList>(&text)?.into_vec();
        // the service is asked for one topic, equations it does not tag are taken as that topic
        let equations = equations
            .into_iter()
            .map(|e| {
                let topic = e.topic.unwrap_or(request.topic);
                e.with_topic(topic)
            })
            .collect();
        let selected = select(equations, request, &self.describe())?;
        info!("received {} equations from {}", selected.len(), self.endpoint);
        Ok(selected)
    }

    fn describe(&self) -> String {
        format!("question service {}", self.endpoint)
    }
}

/// Equations of a JSON bank file. Untagged equations belong to every topic.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuestionSource for FileSource {
    fn request_equations(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<ChemicalEquation>, QuestionSourceError> {
        let equations: Vec<ChemicalEquation> = LoadData::new(&self.path)
            .load_equations()?
            .into_iter()
            .filter(|e| e.topic.is_none_or(|t| t == request.topic))
            .map(|e| e.with_topic(request.topic))
            .collect();
        select(equations, request, &self.describe())
    }

    fn describe(&self) -> String {
        format!("question bank '{}'", self.path.display())
    }
}

#[derive(Debug, Default)]
pub struct BuiltinSource;

impl QuestionSource for BuiltinSource {
    fn request_equations(
        &self,
        request: &QuestionRequest,
    ) -> Result<Vec<ChemicalEquation>, QuestionSourceError> {
        select(fallback_for(request.topic), request, &self.describe())
    }

    fn describe(&self) -> String {
        "built-in equations".to_string()
    }
}

#[enum_dispatch(QuestionSource)]
pub enum QuestionProvider {
    Remote(RemoteSource),
    File(FileSource),
    Builtin(BuiltinSource),
}

impl QuestionProvider {
    /// remote endpoint if set, else the bank file if set, else the built-in bank
    pub fn from_config(config: &DrillConfig) -> Result<Self, QuestionSourceError> {
        if let Some(endpoint) = &config.endpoint {
            return Ok(RemoteSource::new(endpoint, config.timeout_secs)?.into());
        }
        if let Some(bank) = &config.question_bank {
            return Ok(FileSource::new(bank).into());
        }
        Ok(BuiltinSource.into())
    }

    /// Like `from_config`, but a broken endpoint leaves the built-in bank in charge.
    pub fn from_config_or_builtin(config: &DrillConfig) -> Self {
        Self::from_config(config).unwrap_or_else(|e| {
            warn!("question source not available ({}), using built-in equations", e);
            BuiltinSource.into()
        })
    }
}

/// equations to drill and whether they replace what the provider should have given
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBatch {
    pub equations: Vec<ChemicalEquation>,
    pub offline: bool,
}

/// Asks the provider for equations; on any failure the built-in equations of the requested topic
/// are served instead and the batch is marked offline.
pub fn fetch_or_fallback<S: QuestionSource>(source: &S, request: &QuestionRequest) -> QuestionBatch {
    match source.request_equations(request) {
        Ok(equations) => QuestionBatch {
            equations,
            offline: false,
        },
        Err(e) => {
            warn!(
                "{} failed: {}. Switching to built-in equations",
                source.describe(),
                e
            );
            let equations =
                select(fallback_for(request.topic), request, "built-in equations")
                    .unwrap_or_else(|_| fallback_for(request.topic));
            QuestionBatch {
                equations,
                offline: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Mock HTTP client for testing
    struct MockHttpClient {
        response: Result<String, ()>,
        timeout: bool,
        last_body: RefCell<Option<String>>,
    }

    impl MockHttpClient {
        fn answering(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                timeout: false,
                last_body: RefCell::new(None),
            }
        }
        fn timing_out() -> Self {
            Self {
                response: Err(()),
                timeout: true,
                last_body: RefCell::new(None),
            }
        }
    }

    impl HttpClient for MockHttpClient {
        fn post_json(
            &self,
            _url: &str,
            body: String,
            _timeout: Duration,
        ) -> Result<String, QuestionSourceError> {
            *self.last_body.borrow_mut() = Some(body);
            if self.timeout {
                return Err(QuestionSourceError::Timeout);
            }
            self.response
                .clone()
                .map_err(|_| QuestionSourceError::Empty)
        }
    }

    const SERVICE_ANSWER: &str = r#"{"equations": [
        {"reactants": [{"formula": "CH4", "coefficient": 1}, {"formula": "O2", "coefficient": 2}],
         "products": [{"formula": "CO2", "coefficient": 1}, {"formula": "H2O", "coefficient": 2}]},
        {"reactants": [{"formula": "C3H8", "coefficient": 1}, {"formula": "O2", "coefficient": 1}],
         "products": [{"formula": "CO2", "coefficient": 3}, {"formula": "H2O", "coefficient": 4}]}
    ]}"#;

    fn request(topic: Topic) -> QuestionRequest {
        QuestionRequest::new(5, topic, Language::English)
    }

    #[test]
    fn test_remote_source_validates_and_tags() {
        let source = RemoteSource::with_client(
            MockHttpClient::answering(SERVICE_ANSWER),
            "http://localhost:8080/equations",
            5,
        )
        .unwrap();
        let request = request(Topic::Combustion).with_recent(vec!["H2+O2".to_string()]);
        let equations = source.request_equations(&request).unwrap();
        // the propane equation is not balanced and is dropped
        assert_eq!(equations.len(), 1);
        assert_eq!(equations[0].to_string(), "CH4 + 2O2 -> CO2 + 2H2O");
        assert_eq!(equations[0].topic, Some(Topic::Combustion));

        let body = source.client.last_body.borrow().clone().unwrap();
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["count"], 5);
        assert_eq!(body["topic"], "combustion");
        assert_eq!(body["language"], "english");
        assert_eq!(body["recent"][0], "H2+O2");
    }

    #[test]
    fn test_remote_source_bad_url() {
        let result = RemoteSource::with_client(MockHttpClient::answering("[]"), "not a url", 5);
        assert!(matches!(result, Err(QuestionSourceError::Url(_))));
    }

    #[test]
    fn test_remote_garbage_is_a_json_error() {
        let source = RemoteSource::with_client(
            MockHttpClient::answering("<html>busy</html>"),
            "http://localhost/q",
            5,
        )
        .unwrap();
        let result = source.request_equations(&request(Topic::Basic));
        assert!(matches!(result, Err(QuestionSourceError::Json(_))));
    }

    #[test]
    fn test_fallback_on_timeout() {
        let source =
            RemoteSource::with_client(MockHttpClient::timing_out(), "http://localhost/q", 1)
                .unwrap();
        let batch = fetch_or_fallback(&source, &request(Topic::Redox));
        assert!(batch.offline);
        assert!(!batch.equations.is_empty());
        assert!(
            batch
                .equations
                .iter()
                .all(|e| e.topic == Some(Topic::Redox))
        );
    }

    #[test]
    fn test_fallback_on_empty_answer() {
        let source =
            RemoteSource::with_client(MockHttpClient::answering("[]"), "http://localhost/q", 1)
                .unwrap();
        let batch = fetch_or_fallback(&source, &request(Topic::AcidBase));
        assert!(batch.offline);
        assert!(!batch.equations.is_empty());
    }

    #[test]
    fn test_fallback_on_oversized_formula() {
        let answer = r#"{"equations": [
            {"reactants": [{"formula": "(H4294967296)4294967296", "coefficient": 1}],
             "products": [{"formula": "(H4294967296)4294967296", "coefficient": 1}]}
        ]}"#;
        let source =
            RemoteSource::with_client(MockHttpClient::answering(answer), "http://localhost/q", 1)
                .unwrap();
        assert!(matches!(
            source.request_equations(&request(Topic::Basic)),
            Err(QuestionSourceError::Empty)
        ));
        let batch = fetch_or_fallback(&source, &request(Topic::Basic));
        assert!(batch.offline);
        assert!(!batch.equations.is_empty());
    }

    #[test]
    fn test_builtin_source_is_online_and_avoids_recent() {
        let provider: QuestionProvider = BuiltinSource.into();
        let all = fallback_for(Topic::Basic);
        let recent = vec![signature(&all[0])];
        let batch = fetch_or_fallback(&provider, &request(Topic::Basic).with_recent(recent));
        assert!(!batch.offline);
        assert_eq!(batch.equations.len(), all.len() - 1);
        assert!(!batch.equations.contains(&all[0]));
    }

    #[test]
    fn test_recent_equations_are_repeated_when_nothing_else_is_left() {
        let all = fallback_for(Topic::Precipitation);
        let recent: Vec<String> = all.iter().map(signature).collect();
        let equations = BuiltinSource
            .request_equations(&request(Topic::Precipitation).with_recent(recent))
            .unwrap();
        assert_eq!(equations.len(), all.len().min(5));
    }

    #[test]
    fn test_count_limits_batch() {
        let mut request = request(Topic::Basic);
        request.count = 2;
        let equations = BuiltinSource.request_equations(&request).unwrap();
        assert_eq!(equations.len(), 2);
    }

    #[test]
    fn test_file_source_filters_by_topic() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
  {"reactants": [{"formula": "H2", "coefficient": 2}, {"formula": "O2", "coefficient": 1}],
   "products": [{"formula": "H2O", "coefficient": 2}]},
  {"reactants": [{"formula": "CH4", "coefficient": 1}, {"formula": "O2", "coefficient": 2}],
   "products": [{"formula": "CO2", "coefficient": 1}, {"formula": "H2O", "coefficient": 2}],
   "topic": "combustion"}
]"#,
        )
        .unwrap();
        let source = FileSource::new(file.path());
        let basic = source.request_equations(&request(Topic::Basic)).unwrap();
        assert_eq!(basic.len(), 1);
        assert_eq!(basic[0].topic, Some(Topic::Basic));
        let combustion = source.request_equations(&request(Topic::Combustion)).unwrap();
        assert_eq!(combustion.len(), 2);
    }

    #[test]
    fn test_missing_bank_file_falls_back() {
        let provider: QuestionProvider = FileSource::new("no_such_bank_file.json").into();
        assert!(matches!(
            provider.request_equations(&request(Topic::Basic)),
            Err(QuestionSourceError::Load(LoadError::Missing(_)))
        ));
        let batch = fetch_or_fallback(&provider, &request(Topic::Basic));
        assert!(batch.offline);
    }

    #[test]
    fn test_provider_from_config() {
        let mut config = DrillConfig::default();
        assert!(matches!(
            QuestionProvider::from_config(&config),
            Ok(QuestionProvider::Builtin(_))
        ));
        config.question_bank = Some("bank.json".to_string());
        assert!(matches!(
            QuestionProvider::from_config(&config),
            Ok(QuestionProvider::File(_))
        ));
        config.endpoint = Some("http://localhost:8080/equations".to_string());
        let provider = QuestionProvider::from_config(&config).unwrap();
        assert!(matches!(provider, QuestionProvider::Remote(_)));
        assert_eq!(
            provider.describe(),
            "question service http://localhost:8080/equations"
        );
        config.endpoint = Some("::".to_string());
        assert!(matches!(
            QuestionProvider::from_config_or_builtin(&config),
            QuestionProvider::Builtin(_)
        ));
    }
}
